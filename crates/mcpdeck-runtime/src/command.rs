//! Platform command construction for process queries.
//!
//! Pure builders, no spawning: the control module runs these and
//! interprets the results.

/// Command that lists processes matching an image name.
pub fn find_command(process_name: &str) -> (&'static str, Vec<String>) {
    if cfg!(windows) {
        (
            "tasklist",
            vec![
                "/fi".to_string(),
                format!("imagename eq {process_name}"),
                "/fo".to_string(),
                "csv".to_string(),
                "/nh".to_string(),
            ],
        )
    } else {
        ("pgrep", vec!["-f".to_string(), process_name.to_string()])
    }
}

/// Command that kills all processes matching an image name.
pub fn kill_command(process_name: &str) -> (&'static str, Vec<String>) {
    if cfg!(windows) {
        (
            "taskkill",
            vec!["/im".to_string(), process_name.to_string(), "/f".to_string()],
        )
    } else {
        ("pkill", vec!["-f".to_string(), process_name.to_string()])
    }
}

/// Interpret a find command's result as "running or not".
///
/// On Windows, `tasklist` exits 0 even with no matches and prints an
/// INFO line instead, so the image name has to appear in the output. On
/// Unix, `pgrep` signals matches through its exit status.
pub fn interpret_find_output(status_success: bool, stdout: &str, process_name: &str) -> bool {
    if cfg!(windows) {
        stdout
            .to_lowercase()
            .contains(&process_name.to_lowercase())
    } else {
        status_success && !stdout.trim().is_empty()
    }
}

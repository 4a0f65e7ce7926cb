//! Shell-backed implementation of the process control port.

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

use mcpdeck_core::ports::{ProcessControl, ProcessError};

use crate::command::{find_command, interpret_find_output, kill_command};

/// Process control via platform shell commands: `tasklist`/`taskkill`
/// on Windows, `pgrep`/`pkill` elsewhere. Launches are detached with
/// null stdio; the child outlives this process.
#[derive(Debug, Clone, Default)]
pub struct ShellProcessControl;

impl ShellProcessControl {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProcessControl for ShellProcessControl {
    async fn find(&self, process_name: &str) -> Result<bool, ProcessError> {
        let (program, args) = find_command(process_name);
        let output = Command::new(program)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| ProcessError::QueryFailed(format!("{program}: {e}")))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let running = interpret_find_output(output.status.success(), &stdout, process_name);
        debug!(process = process_name, running, "Process lookup");
        Ok(running)
    }

    async fn kill(&self, process_name: &str) -> Result<(), ProcessError> {
        let (program, args) = kill_command(process_name);
        let output = Command::new(program)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| ProcessError::KillFailed(format!("{program}: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ProcessError::KillFailed(format!(
                "{program} exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        info!(process = process_name, "Killed process");
        Ok(())
    }

    async fn launch(&self, path: &Path, args: &[String]) -> Result<Option<u32>, ProcessError> {
        let mut command = Command::new(path);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        // Detach from our process group so the tool survives us.
        #[cfg(unix)]
        command.process_group(0);
        #[cfg(windows)]
        command.creation_flags(0x0000_0008); // DETACHED_PROCESS

        let child = command
            .spawn()
            .map_err(|e| ProcessError::LaunchFailed(format!("{}: {e}", path.display())))?;

        let pid = child.id();
        info!(path = %path.display(), ?pid, "Launched application");
        // Dropping the handle leaves the child running.
        drop(child);
        Ok(pid)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_find_reports_absent_process() {
        let control = ShellProcessControl::new();
        let running = control
            .find("mcpdeck-test-process-that-cannot-exist")
            .await
            .unwrap();
        assert!(!running);
    }

    #[tokio::test]
    async fn test_kill_absent_process_errors() {
        let control = ShellProcessControl::new();
        let result = control.kill("mcpdeck-test-process-that-cannot-exist").await;
        assert!(matches!(result, Err(ProcessError::KillFailed(_))));
    }

    #[tokio::test]
    async fn test_launch_missing_binary_errors() {
        let control = ShellProcessControl::new();
        let result = control
            .launch(Path::new("/nonexistent/mcpdeck-tool"), &[])
            .await;
        assert!(matches!(result, Err(ProcessError::LaunchFailed(_))));
    }

    #[tokio::test]
    async fn test_launch_detached_returns_pid() {
        let control = ShellProcessControl::new();
        let pid = control
            .launch(Path::new("/bin/sh"), &["-c".to_string(), "true".to_string()])
            .await
            .unwrap();
        assert!(pid.is_some());
    }
}

//! Main commands enum and primary subcommands.

use clap::Subcommand;

/// Available commands for the MCP category switcher.
#[derive(Subcommand)]
pub enum Commands {
    /// Manage MCP server definitions
    #[command(subcommand)]
    Server(ServerCommand),

    /// Manage categories of servers
    #[command(subcommand)]
    Category(CategoryCommand),

    /// Manage config targets (external tools)
    #[command(subcommand)]
    Target(TargetCommand),

    /// Manage stored keys and their server bindings
    #[command(subcommand)]
    Key(KeyCommand),

    /// Activate a category for a target: write the tool's config file
    Activate {
        /// Category id to activate
        category_id: String,
        /// Target to write the config for
        #[arg(short, long)]
        target: String,
        /// Restart the tool after a successful switch
        #[arg(long)]
        restart: bool,
        /// Process image name to restart (defaults to claude.exe for
        /// the built-in claude target)
        #[arg(long)]
        process_name: Option<String>,
        /// Executable path used for the relaunch
        #[arg(long)]
        app_path: Option<String>,
    },

    /// Print the config document a category would materialize, without
    /// writing it
    Preview {
        /// Category id to preview
        category_id: String,
        /// Target whose path and format to use
        #[arg(short, long)]
        target: String,
    },

    /// Import a category from an existing mcpServers config document
    Import {
        /// Name for the imported category
        category_name: String,
        /// Path to the config document (reads stdin when omitted)
        #[arg(short, long)]
        file: Option<String>,
        /// Target scope for the category ("all" or a target id)
        #[arg(short, long, default_value = "all")]
        target: String,
        /// Icon name (Code, Database, Globe, Layers, Settings)
        #[arg(long, default_value = "Layers")]
        icon: String,
        /// Category description
        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// Set the default target filter used by listings
    Select {
        /// Target id, or "all"
        target: String,
    },

    /// Show targets, their categories and the active selections
    Status,

    /// Replace the whole store with a fresh default document
    Reset {
        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Server management subcommands.
#[derive(Subcommand)]
pub enum ServerCommand {
    /// Add a server definition
    Add {
        /// Display name (also the key in materialized output)
        name: String,
        /// Raw configuration blob (JSON with command/args/env)
        #[arg(long, conflicts_with_all = ["command", "args"])]
        value: Option<String>,
        /// Command to execute
        #[arg(short, long)]
        command: Option<String>,
        /// Arguments, repeatable
        #[arg(short, long)]
        args: Vec<String>,
        /// Human-readable description
        #[arg(short, long)]
        description: Option<String>,
    },
    /// List active servers
    List,
    /// Update a server's name and/or value
    Update {
        /// Server id
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        value: Option<String>,
    },
    /// Soft-delete a server
    Remove {
        /// Server id
        id: String,
    },
}

/// Category management subcommands.
#[derive(Subcommand)]
pub enum CategoryCommand {
    /// Create a category
    Create {
        name: String,
        #[arg(short, long, default_value = "")]
        description: String,
        /// Icon name (Code, Database, Globe, Layers, Settings)
        #[arg(long, default_value = "Layers")]
        icon: String,
        /// Target scope ("all" or a target id)
        #[arg(short, long, default_value = "all")]
        target: String,
    },
    /// List active categories, optionally filtered by target
    List {
        /// Filter: "all" or a target id
        #[arg(short, long)]
        target: Option<String>,
    },
    /// Update a category
    Update {
        /// Category id
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        icon: Option<String>,
        #[arg(long)]
        target: Option<String>,
    },
    /// Soft-delete a category
    Remove {
        /// Category id
        id: String,
    },
    /// List a category's servers in materialization order
    Servers {
        /// Category id
        id: String,
    },
    /// Attach a server to a category
    Attach {
        /// Category id
        category_id: String,
        /// Server id
        server_id: String,
        /// Merge order within the category
        #[arg(short, long, default_value_t = 0)]
        order: i64,
    },
    /// Detach a server from a category
    Detach {
        /// Category id
        category_id: String,
        /// Server id
        server_id: String,
    },
}

/// Config target management subcommands.
#[derive(Subcommand)]
pub enum TargetCommand {
    /// Add a config target
    Add {
        /// Display name
        name: String,
        /// Config file path (may embed %NAME% / ${NAME} placeholders)
        config_path: String,
    },
    /// List active targets
    List,
    /// Update a target (built-in targets are immutable)
    Update {
        /// Target id
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        config_path: Option<String>,
    },
    /// Soft-delete a target (built-in targets are undeletable)
    Remove {
        /// Target id
        id: String,
    },
}

/// Key management subcommands.
#[derive(Subcommand)]
pub enum KeyCommand {
    /// Add a key
    Add {
        /// Key name
        name: String,
        /// Secret value
        value: String,
    },
    /// List active keys (values are not printed)
    List,
    /// Soft-delete a key
    Remove {
        /// Key id
        id: String,
    },
    /// Bind a key to a server as an environment variable
    Bind {
        /// Server id
        server_id: String,
        /// Key id
        key_id: String,
        /// Environment variable name to inject the value as
        env_name: String,
    },
}

//! CLI adapter for mcpdeck.

pub mod bootstrap;
pub mod commands;
pub mod handlers;
pub mod parser;
pub mod presentation;

pub use bootstrap::{CliContext, bootstrap};
pub use commands::{CategoryCommand, Commands, KeyCommand, ServerCommand, TargetCommand};
pub use parser::Cli;

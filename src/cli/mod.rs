pub mod commands;
pub mod context;
pub mod core;
pub mod guided;
pub mod help;
pub mod io;
pub mod output;
pub mod quote;
pub mod registry;
pub mod remote;
pub mod render;
pub mod service;
mod shell;

pub use context::ShellContext;
pub use core::{CliError, CliMode, CommandError, CommandResult, LoopControl};
pub use service::run_serve;
pub use shell::{parse_command_line, run_book, run_cli, SCRIPT_ENV};

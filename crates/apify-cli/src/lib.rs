mod cli;
mod commands;
mod context;
mod error;
mod formatter;
pub mod pages;
pub mod server;

pub use cli::{run, run_cli};
pub use error::CliError;

use clap::{ArgMatches, Command};

use crate::commands::CommandResult;
use crate::context::CliSession;
use crate::error::CliError;

pub fn command() -> Command {
    Command::new("list")
        .visible_alias("ls")
        .about("List every discovered API spec")
}

pub fn run(session: &CliSession, _matches: &ArgMatches) -> Result<CommandResult, CliError> {
    let specs = session.catalog.list()?;
    Ok(CommandResult::SpecList { specs })
}

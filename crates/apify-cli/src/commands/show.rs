use clap::{Arg, ArgMatches, Command};

use crate::commands::CommandResult;
use crate::context::CliSession;
use crate::error::{CliError, ExitStatus};

pub fn command() -> Command {
    Command::new("show")
        .about("Describe one spec by id or filename")
        .arg(
            Arg::new("id")
                .required(true)
                .value_name("ID")
                .help("Spec id as printed by `list`, or a bare filename."),
        )
}

pub fn run(session: &CliSession, matches: &ArgMatches) -> Result<CommandResult, CliError> {
    let id = matches
        .get_one::<String>("id")
        .ok_or_else(|| CliError::new("spec id required", ExitStatus::Usage))?;
    let document = session.catalog.require(id)?;
    let summary = session.catalog.summarize(&document);
    Ok(CommandResult::SpecDetail {
        summary,
        source: document.location,
    })
}

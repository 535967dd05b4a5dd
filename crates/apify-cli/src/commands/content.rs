use clap::{Arg, ArgMatches, Command};

use apify::ApifyError;

use crate::commands::CommandResult;
use crate::context::CliSession;
use crate::error::{CliError, ExitStatus};

pub fn command() -> Command {
    Command::new("content")
        .about("Print the raw content of one spec")
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
    let content = session
        .catalog
        .content(id)?
        .ok_or_else(|| ApifyError::NotFound(id.clone()))?;

    Ok(CommandResult::SpecContent {
        id: content.document.id(),
        media_type: content.media_type(),
        content: String::from_utf8_lossy(&content.bytes).into_owned(),
        raw: content.bytes,
    })
}

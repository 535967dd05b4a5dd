use std::net::SocketAddr;

use clap::{Arg, ArgMatches, Command};

use crate::commands::CommandResult;
use crate::context::CliSession;
use crate::error::{CliError, ExitStatus};
use crate::server;

const DEFAULT_BIND: &str = "127.0.0.1:8080";

pub fn command() -> Command {
    Command::new("serve")
        .about("Serve the spec index, Redoc viewer and raw content over HTTP")
        .arg(
            Arg::new("bind")
                .long("bind")
                .value_name("ADDR")
                .default_value(DEFAULT_BIND)
                .help("Socket address to listen on."),
        )
}

pub fn run(session: &CliSession, matches: &ArgMatches) -> Result<CommandResult, CliError> {
    let raw = matches
        .get_one::<String>("bind")
        .map(String::as_str)
        .unwrap_or(DEFAULT_BIND);
    let addr: SocketAddr = raw.parse().map_err(|err| {
        CliError::new(format!("invalid bind address '{raw}': {err}"), ExitStatus::Usage)
    })?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let local = runtime.block_on(server::serve(session.catalog.clone(), addr))?;

    Ok(CommandResult::ServerStopped {
        address: local.to_string(),
    })
}

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Arg, ArgAction, ArgMatches, Command};

use crate::commands;
use crate::context::{CatalogOverrides, CliSession, Verbosity};
use crate::error::{CliError, ExitStatus};
use crate::formatter::{OutputFormat, emit_result};

const NAME: &str = "apify";

pub fn run() -> ExitCode {
    init_tracing();
    match run_cli(std::env::args_os()) {
        Ok(code) => code,
        Err(err) => {
            err.print();
            err.exit_code()
        }
    }
}

/// Parses arguments, builds the catalog from defaults, config file and flags,
/// then dispatches to the selected command.
pub fn run_cli<I, S>(args: I) -> Result<ExitCode, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString> + Clone,
{
    let command = build_cli();
    let matches = command.try_get_matches_from(args)?;

    let verbosity = Verbosity {
        json: matches.get_flag("json"),
        verbose: matches.get_flag("verbose"),
    };
    let output = if verbosity.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    let overrides = CatalogOverrides {
        config_file: matches.get_one::<PathBuf>("config").cloned(),
        roots: matches
            .get_many::<PathBuf>("root")
            .map(|values| values.cloned().collect())
            .unwrap_or_default(),
        extensions: matches
            .get_many::<String>("ext")
            .map(|values| values.cloned().collect())
            .unwrap_or_default(),
    };
    let session = CliSession::bootstrap(overrides, verbosity)?;
    if session.verbosity.verbose {
        tracing::info!(
            roots = ?session.config.roots,
            extensions = ?session.config.extensions,
            display_markers = ?session.config.display_markers,
            follow_links = session.config.follow_links,
            "resolved catalog configuration"
        );
    }

    let result = dispatch(&session, &matches)?;
    emit_result(result, output)
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn build_cli() -> Command {
    Command::new(NAME)
        .about("Browse the OpenAPI specs bundled with an application")
        .arg(
            Arg::new("root")
                .long("root")
                .value_name("DIR")
                .action(ArgAction::Append)
                .value_parser(clap::value_parser!(PathBuf))
                .global(true)
                .help("Directory to search for specs, recursively. Repeatable. Defaults to the current directory."),
        )
        .arg(
            Arg::new("ext")
                .long("ext")
                .value_name("EXT")
                .action(ArgAction::Append)
                .value_delimiter(',')
                .global(true)
                .help("Document extensions to recognise (default: yaml,yml,json)."),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf))
                .global(true)
                .help("YAML catalog configuration file. Flags take precedence over its values."),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Emit newline-delimited JSON instead of human-readable text."),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Log the resolved catalog configuration."),
        )
        .subcommand_required(true)
        .subcommand(commands::list::command())
        .subcommand(commands::show::command())
        .subcommand(commands::content::command())
        .subcommand(commands::serve::command())
}

fn dispatch(
    session: &CliSession,
    matches: &ArgMatches,
) -> Result<commands::CommandResult, CliError> {
    match matches.subcommand() {
        Some(("list", sub)) => commands::list::run(session, sub),
        Some(("show", sub)) => commands::show::run(session, sub),
        Some(("content", sub)) => commands::content::run(session, sub),
        Some(("serve", sub)) => commands::serve::run(session, sub),
        _ => Err(CliError::new("missing command", ExitStatus::Usage)),
    }
}

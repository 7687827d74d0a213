//! Purpose: `rashader-probe` CLI: load librashader and report which capabilities bound.
//! Role: Binary crate root; parses args, runs the loader, emits JSON on stdout.
//! Invariants: A missing library is not an error; the report says so and the exit code is 0.
//! Invariants: Errors are emitted as JSON on stderr when stderr is not a terminal.
//! Invariants: Process exit code is derived from `to_exit_code`.
use std::error::Error as StdError;
use std::io::{self, IsTerminal};

use clap::{CommandFactory, Parser, Subcommand, ValueHint, error::ErrorKind as ClapErrorKind};
use clap_complete::aot::Shell;
use serde_json::{Map, Value, json};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use rashader_loader::{
    DEFAULT_LIBRARY_NAME, Error, ErrorKind, LoadReport, SystemLoader, load_with, to_exit_code,
};

#[derive(Copy, Clone, Debug)]
struct RunOutcome {
    exit_code: i32,
}

impl RunOutcome {
    fn ok() -> Self {
        Self { exit_code: 0 }
    }
}

#[derive(Parser)]
#[command(
    name = "rashader-probe",
    version,
    about = "Load librashader at runtime and report which capabilities are available",
    long_about = None,
    after_help = r#"EXAMPLES
  $ rashader-probe
  $ rashader-probe --library /opt/librashader/lib/librashader.so --pretty
  $ rashader-probe --require-loaded || echo "librashader unavailable"
  $ rashader-probe completion bash > ~/.local/share/bash-completion/completions/rashader-probe

Set RUST_LOG=debug to trace each resolution step on stderr."#
)]
struct Cli {
    #[arg(
        long,
        help = "Library file name or path (default: platform librashader name)",
        value_hint = ValueHint::FilePath
    )]
    library: Option<String>,
    #[arg(long, help = "Pretty-print the JSON report")]
    pretty: bool,
    #[arg(long, help = "Exit with an error unless every step of loading succeeded")]
    require_loaded: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    #[command(about = "Print shell completions")]
    Completion {
        #[arg(help = "Shell to generate completions for")]
        shell: Shell,
    },
}

fn main() {
    let exit_code = match run() {
        Ok(outcome) => outcome.exit_code,
        Err(err) => {
            emit_error(&err);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run() -> Result<RunOutcome, Error> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion => {
                err.print().map_err(|io_err| {
                    Error::new(ErrorKind::Io)
                        .with_message("failed to write help")
                        .with_source(io_err)
                })?;
                return Ok(RunOutcome::ok());
            }
            _ => {
                return Err(Error::new(ErrorKind::Usage)
                    .with_message(clap_error_summary(&err))
                    .with_hint("Try `rashader-probe --help`."));
            }
        },
    };

    init_tracing();

    if let Some(Command::Completion { shell }) = cli.command {
        let mut cmd = Cli::command();
        clap_complete::aot::generate(shell, &mut cmd, "rashader-probe", &mut io::stdout());
        return Ok(RunOutcome::ok());
    }

    let library = cli.library.as_deref().unwrap_or(DEFAULT_LIBRARY_NAME);
    let table = load_with(&SystemLoader, library);
    if let Some(err) = table.open_error() {
        warn!(
            library,
            kind = ?err.kind(),
            hint = err.hint().unwrap_or_default(),
            "{err}"
        );
    }
    let report = LoadReport::from_table(&table).with_library(library);
    emit_json(&report, cli.pretty)?;

    if cli.require_loaded && !table.fully_loaded() {
        return Err(Error::new(ErrorKind::NotFound)
            .with_message(format!("librashader not fully loaded ({})", report.state))
            .with_library(library)
            .with_hint("Run with RUST_LOG=debug to see why, or pass --library <PATH>."));
    }
    Ok(RunOutcome::ok())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn emit_json(report: &LoadReport, pretty: bool) -> Result<(), Error> {
    let encoded = if pretty {
        serde_json::to_string_pretty(report)
    } else {
        serde_json::to_string(report)
    };
    let json = encoded.map_err(|err| {
        Error::new(ErrorKind::Internal)
            .with_message("failed to encode report")
            .with_source(err)
    })?;
    println!("{json}");
    Ok(())
}

fn emit_error(err: &Error) {
    if io::stderr().is_terminal() {
        eprintln!("{}", error_text(err));
        return;
    }

    let json = serde_json::to_string(&error_json(err)).unwrap_or_else(|_| {
        "{\"error\":{\"kind\":\"Internal\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}

fn error_message(err: &Error) -> String {
    if let Some(message) = err.message() {
        return message.to_string();
    }
    match err.kind() {
        ErrorKind::Internal => "internal error".to_string(),
        ErrorKind::Usage => "usage error".to_string(),
        ErrorKind::NotFound => "not found".to_string(),
        ErrorKind::Permission => "permission denied".to_string(),
        ErrorKind::Corrupt => "not a loadable library".to_string(),
        ErrorKind::Io => "i/o error".to_string(),
    }
}

fn error_causes(err: &Error) -> Vec<String> {
    let mut causes = Vec::new();
    let mut cur = err.source();
    while let Some(source) = cur {
        causes.push(source.to_string());
        cur = source.source();
    }
    causes
}

fn error_json(err: &Error) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(format!("{:?}", err.kind())));
    inner.insert("message".to_string(), json!(error_message(err)));
    if let Some(hint) = err.hint() {
        inner.insert("hint".to_string(), json!(hint));
    }
    if let Some(library) = err.library() {
        inner.insert("library".to_string(), json!(library));
    }
    let causes = error_causes(err);
    if !causes.is_empty() {
        inner.insert("causes".to_string(), json!(causes));
    }

    let mut outer = Map::new();
    outer.insert("error".to_string(), Value::Object(inner));
    Value::Object(outer)
}

fn error_text(err: &Error) -> String {
    let mut lines = vec![format!("error: {}", error_message(err))];
    if let Some(hint) = err.hint() {
        lines.push(format!("hint: {hint}"));
    }
    if let Some(library) = err.library() {
        lines.push(format!("library: {library}"));
    }
    if let Some(cause) = error_causes(err).first() {
        lines.push(format!("caused by: {cause}"));
    }
    lines.join("\n")
}

fn clap_error_summary(err: &clap::Error) -> String {
    for line in err.to_string().lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix("error:") {
            return rest.trim().to_string();
        }
        return trimmed.to_string();
    }
    "invalid arguments".to_string()
}

//! Purpose: `ordervalue` CLI entry point.
//! Role: Binary crate root; parses args, initialises logging, runs commands.
//! Invariants: Results go to stdout (human text or one JSON line with --json).
//! Invariants: Errors are emitted as JSON on stderr when stderr is not a TTY.
//! Invariants: Process exit code is derived from `api::to_exit_code`.
#![allow(clippy::result_large_err)]
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::time::Duration;

use clap::{
    CommandFactory, Parser, Subcommand, ValueEnum, ValueHint, error::ErrorKind as ClapErrorKind,
};
use clap_complete::aot::Shell;
use ordervalue::api::{Error, ErrorKind, to_exit_code};
use serde_json::{Map, Value, json};
use std::error::Error as StdError;
use tracing_subscriber::EnvFilter;

mod command_dispatch;

#[derive(Copy, Clone, Debug)]
struct RunOutcome {
    exit_code: i32,
}

impl RunOutcome {
    fn ok() -> Self {
        Self { exit_code: 0 }
    }

    fn with_code(exit_code: i32) -> Self {
        Self { exit_code }
    }
}

fn main() {
    let exit_code = match run() {
        Ok(outcome) => outcome.exit_code,
        Err((err, color_mode)) => {
            emit_error(&err, color_mode);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run() -> Result<RunOutcome, (Error, ColorMode)> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp
            | ClapErrorKind::DisplayVersion
            | ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                err.print().map_err(|io_err| {
                    (
                        Error::new(ErrorKind::Io)
                            .with_message("failed to write help")
                            .with_source(io_err),
                        ColorMode::Auto,
                    )
                })?;
                let exit_code = if matches!(
                    err.kind(),
                    ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                ) {
                    2
                } else {
                    0
                };
                return Ok(RunOutcome::with_code(exit_code));
            }
            _ => {
                return Err((
                    Error::new(ErrorKind::Usage)
                        .with_message(clap_error_summary(&err))
                        .with_hint("Try `ordervalue --help`."),
                    ColorMode::Auto,
                ));
            }
        },
    };

    init_tracing(cli.verbose);
    let color_mode = cli.color;

    command_dispatch::dispatch_command(cli.command)
        .map_err(add_transport_hint)
        .map_err(|err| (err, color_mode))
}

#[derive(Parser)]
#[command(
    name = "ordervalue",
    version,
    about = "Report the average value of orders served by an HTTP endpoint",
    long_about = None,
    after_help = r#"EXAMPLES
  $ ordervalue average --url https://shop.example.com/api/orders
  $ ORDERVALUE_URL=http://127.0.0.1:8000/orders ordervalue average --json
  $ ordervalue average --file orders.json
  $ curl -s https://shop.example.com/api/orders | ordervalue average --file -

LOGGING
  Diagnostics go to stderr. Use -v for debug output or set RUST_LOG."#,
    arg_required_else_help = true
)]
struct Cli {
    #[arg(
        long,
        default_value = "auto",
        value_enum,
        global = true,
        help = "Colorize stderr diagnostics: auto|always|never"
    )]
    color: ColorMode,
    #[arg(
        short,
        long,
        global = true,
        help = "Log skipped records and request details to stderr"
    )]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    fn use_color(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    #[command(
        about = "Fetch orders and print the average order value",
        long_about = r#"Fetch the orders payload, parse it, and print the average order value.

The payload must be a JSON object with an "orders" array. Orders or items that are
malformed are skipped; a payload without an "orders" key is an error."#,
        after_help = r#"NOTES
  - Endpoint precedence: --url, then ORDERVALUE_URL, then http://127.0.0.1:8000/orders
  - Token precedence: --token, then ORDERVALUE_TOKEN (sent as a bearer token)
  - --file reads a local payload instead (use - for stdin)
  - An empty "orders" array reports 0.00"#
    )]
    Average {
        #[arg(long, help = "Orders endpoint URL", value_hint = ValueHint::Url)]
        url: Option<String>,
        #[arg(long, help = "Bearer token for the orders endpoint")]
        token: Option<String>,
        #[arg(long, help = "Request timeout (e.g. 500ms, 10s, 1m)")]
        timeout: Option<String>,
        #[arg(
            short = 'f',
            long = "file",
            help = "Read the payload from a file (use - for stdin)",
            conflicts_with = "url",
            value_hint = ValueHint::FilePath
        )]
        file: Option<PathBuf>,
        #[arg(long, help = "Emit a JSON object instead of text")]
        json: bool,
    },
    #[command(
        arg_required_else_help = true,
        about = "Generate shell completion scripts",
        after_help = r#"EXAMPLES
  $ ordervalue completion bash > ~/.local/share/bash-completion/completions/ordervalue
  $ ordervalue completion zsh > ~/.zfunc/_ordervalue"#
    )]
    Completion {
        #[arg(help = "Shell to generate completions for")]
        shell: Shell,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn parse_duration(input: &str) -> Result<Duration, Error> {
    let invalid = || {
        Error::new(ErrorKind::Usage)
            .with_message(format!("invalid duration {input:?}"))
            .with_hint("Use a number plus ms|s|m|h (e.g. 10s).")
    };
    let trimmed = input.trim();
    let split = trimmed.char_indices().find(|(_, ch)| !ch.is_ascii_digit());
    let (num_str, unit) = match split {
        Some((idx, _)) => trimmed.split_at(idx),
        None => return Err(invalid()),
    };
    if num_str.is_empty() {
        return Err(invalid());
    }
    let value: u64 = num_str.parse().map_err(|_| invalid())?;
    let millis = match unit {
        "ms" => value,
        "s" => value.saturating_mul(1_000),
        "m" => value.saturating_mul(60_000),
        "h" => value.saturating_mul(3_600_000),
        _ => return Err(invalid()),
    };
    if millis == 0 {
        return Err(invalid());
    }
    Ok(Duration::from_millis(millis))
}

fn emit_json(value: &Value) {
    let json = serde_json::to_string(value)
        .unwrap_or_else(|_| "{\"error\":\"json encode failed\"}".to_string());
    println!("{json}");
}

fn add_transport_hint(err: Error) -> Error {
    if err.kind() != ErrorKind::Transport || err.hint().is_some() || err.status().is_some() {
        return err;
    }
    err.with_hint("Is the orders endpoint reachable? Check --url or ORDERVALUE_URL.")
}

#[derive(Copy, Clone)]
enum AnsiColor {
    Red,
    Yellow,
}

fn colorize_label(label: &str, enabled: bool, color: AnsiColor) -> String {
    if !enabled {
        return label.to_string();
    }
    let code = match color {
        AnsiColor::Red => "31",
        AnsiColor::Yellow => "33",
    };
    format!("\u{1b}[{code}m{label}\u{1b}[0m")
}

fn emit_error(err: &Error, color_mode: ColorMode) {
    let is_tty = io::stderr().is_terminal();
    if is_tty {
        eprintln!("{}", error_text(err, color_mode.use_color(is_tty)));
        return;
    }

    let value = error_json(err);
    let json = serde_json::to_string(&value).unwrap_or_else(|_| {
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
        ErrorKind::Transport => "request failed".to_string(),
        ErrorKind::InvalidFormat => "invalid orders payload".to_string(),
        ErrorKind::Parse => "invalid order data".to_string(),
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
    if let Some(url) = err.url() {
        inner.insert("url".to_string(), json!(url));
    }
    if let Some(status) = err.status() {
        inner.insert("status".to_string(), json!(status));
    }
    let causes = error_causes(err);
    if !causes.is_empty() {
        inner.insert("causes".to_string(), json!(causes));
    }

    let mut outer = Map::new();
    outer.insert("error".to_string(), Value::Object(inner));
    Value::Object(outer)
}

fn error_text(err: &Error, use_color: bool) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "{} {}",
        colorize_label("error:", use_color, AnsiColor::Red),
        error_message(err)
    ));

    if let Some(hint) = err.hint() {
        lines.push(format!(
            "{} {hint}",
            colorize_label("hint:", use_color, AnsiColor::Yellow)
        ));
    }
    if let Some(url) = err.url() {
        lines.push(format!(
            "{} {url}",
            colorize_label("url:", use_color, AnsiColor::Yellow)
        ));
    }
    if let Some(status) = err.status() {
        lines.push(format!(
            "{} {status}",
            colorize_label("status:", use_color, AnsiColor::Yellow)
        ));
    }

    let causes = error_causes(err);
    if let Some(cause) = causes.first() {
        lines.push(format!(
            "{} {cause}",
            colorize_label("caused by:", use_color, AnsiColor::Yellow)
        ));
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

#[cfg(test)]
mod tests {
    use super::{Cli, error_json, error_text, parse_duration};
    use clap::CommandFactory;
    use ordervalue::api::{Error, ErrorKind};
    use std::time::Duration;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_duration_accepts_units() {
        assert_eq!(parse_duration("250ms").expect("ms"), Duration::from_millis(250));
        assert_eq!(parse_duration("10s").expect("s"), Duration::from_secs(10));
        assert_eq!(parse_duration("2m").expect("m"), Duration::from_secs(120));
        assert_eq!(parse_duration("1h").expect("h"), Duration::from_secs(3600));
    }

    #[test]
    fn parse_duration_rejects_bad_input() {
        for input in ["", "10", "s", "10x", "0s", "-5s"] {
            let err = parse_duration(input).expect_err(input);
            assert_eq!(err.kind(), ErrorKind::Usage);
        }
    }

    #[test]
    fn error_json_carries_context() {
        let err = Error::new(ErrorKind::Transport)
            .with_message("orders endpoint returned status 503")
            .with_url("http://localhost/orders")
            .with_status(503)
            .with_source(std::io::Error::other("upstream down"));
        let value = error_json(&err);
        assert_eq!(value["error"]["kind"], "Transport");
        assert_eq!(value["error"]["status"], 503);
        assert_eq!(value["error"]["url"], "http://localhost/orders");
        assert_eq!(value["error"]["causes"][0], "upstream down");
    }

    #[test]
    fn error_text_without_color_has_no_escapes() {
        let err = Error::new(ErrorKind::InvalidFormat).with_hint("Check the payload.");
        let text = error_text(&err, false);
        assert_eq!(
            text,
            "error: invalid orders payload\nhint: Check the payload."
        );
    }
}

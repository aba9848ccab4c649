//! Purpose: Hold top-level CLI command dispatch for `ordervalue`.
//! Exports: `dispatch_command`.
//! Role: Keep `main.rs` focused on parse/bootstrap and delegate command execution.
//! Invariants: `average` reads exactly one payload (remote or local) per run.

use super::*;
use ordervalue::api::{
    FileSource, OrdersSource, RemoteClient, Report, fetch_orders, report_json,
    resolve_endpoint_url, resolve_token,
};

pub(super) fn dispatch_command(command: Command) -> Result<RunOutcome, Error> {
    match command {
        Command::Completion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::aot::generate(shell, &mut cmd, "ordervalue", &mut io::stdout());
            Ok(RunOutcome::ok())
        }
        Command::Average {
            url,
            token,
            timeout,
            file,
            json,
        } => {
            let report = match file {
                Some(path) => {
                    if token.is_some() || timeout.is_some() {
                        return Err(Error::new(ErrorKind::Usage)
                            .with_message("--token and --timeout only apply to remote fetches")
                            .with_hint("Drop them when reading a payload with --file."));
                    }
                    average_report(&FileSource::new(path))?
                }
                None => {
                    let client =
                        remote_client(url.as_deref(), token.as_deref(), timeout.as_deref())?;
                    average_report(&client)?
                }
            };
            if json {
                emit_json(&report_json(&report));
            } else {
                println!("{}", report.human());
            }
            Ok(RunOutcome::ok())
        }
    }
}

fn remote_client(
    url: Option<&str>,
    token: Option<&str>,
    timeout: Option<&str>,
) -> Result<RemoteClient, Error> {
    let mut client = RemoteClient::new(resolve_endpoint_url(url))?;
    if let Some(token) = resolve_token(token) {
        client = client.with_token(token);
    }
    if let Some(timeout) = timeout {
        client = client.with_timeout(parse_duration(timeout)?);
    }
    Ok(client)
}

fn average_report(source: &impl OrdersSource) -> Result<Report, Error> {
    let orders = fetch_orders(source)?;
    let report = Report::from_orders(&orders);
    tracing::debug!(
        orders = report.orders,
        items = report.items,
        average = report.average,
        "computed average order value"
    );
    Ok(report)
}

//! jpfund CLI binary.
//!
//! Prints fundamentals for one Japanese-listed security as a single JSON line.

mod output;

use clap::{Parser, error::ErrorKind};
use jpfund_core::{ErrorRecord, InfoProvider, fetch_financials};
use jpfund_yahoo::{ClientConfig, YahooClient};
use output::Status;
use std::{
    ffi::OsString,
    io::{self, Write},
    process,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Message reported for a malformed invocation.
const USAGE: &str = "usage: jpfund <SYMBOL>";

#[derive(Debug, Parser)]
#[command(name = "jpfund")]
#[command(about = "Fetch fundamentals for a Japanese-listed security", long_about = None)]
#[command(version)]
struct Cli {
    /// Ticker symbol, with or without the .T suffix (e.g. 7203)
    symbol: String,
}

/// What the command line asks for.
#[derive(Debug)]
enum Invocation {
    /// Fetch fundamentals for the symbol.
    Fetch(String),
    /// Help or version text was requested.
    Info(clap::Error),
    /// Wrong number of arguments or an unknown flag.
    Usage(clap::Error),
}

fn parse_invocation<I, T>(args: I) -> Invocation
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => Invocation::Fetch(cli.symbol),
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            Invocation::Info(e)
        }
        Err(e) => Invocation::Usage(e),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Fetch `symbol` from `provider` and write the outcome.
async fn run<P: InfoProvider, O: Write, E: Write>(
    provider: &P,
    symbol: &str,
    out: &mut O,
    err: &mut E,
) -> Status {
    let result = fetch_financials(provider, symbol).await;
    output::report(result, symbol, out, err)
}

/// Build the Yahoo client from `config` and fetch `symbol`.
///
/// A configuration error is reported for the symbol without touching the
/// network.
async fn fetch_with_config<O: Write, E: Write>(
    symbol: &str,
    config: jpfund_yahoo::Result<ClientConfig>,
    out: &mut O,
    err: &mut E,
) -> Status {
    match config.and_then(YahooClient::new) {
        Ok(client) => run(&client, symbol, out, err).await,
        Err(e) => output::fail(err, &ErrorRecord::for_symbol(symbol, e.to_string())),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_tracing();

    let status = match parse_invocation(std::env::args_os()) {
        Invocation::Fetch(symbol) => {
            fetch_with_config(
                &symbol,
                ClientConfig::from_env(),
                &mut io::stdout(),
                &mut io::stderr(),
            )
            .await
        }
        Invocation::Info(e) => {
            let _ = e.print();
            Status::Success
        }
        Invocation::Usage(e) => {
            debug!(error = %e, "invalid invocation");
            output::fail(&mut io::stderr().lock(), &ErrorRecord::usage(USAGE))
        }
    };

    process::exit(status.code());
}

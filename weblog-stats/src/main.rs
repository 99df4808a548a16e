mod analytics;
mod ingest;
mod invariants;
mod loader;
mod logging;
mod models;
mod parser;
mod report;

use std::{io, process::ExitCode, time::Duration};

use clap::Parser;
use ingest::{FetchOptions, fetch_log};
use loader::load_records;
use report::{OutputFormat, Report};
use tracing::error;

#[derive(Parser, Debug)]
#[command(version, about = "Summarize a remote CSV access log", long_about = None)]
struct Args {
    /// URL of the access log
    #[arg(long)]
    url: String,

    /// Give up on the download after this many seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Extra attempts when the server cannot be reached
    #[arg(long, default_value_t = 0)]
    retries: u32,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    logging::init_logging();
    let args = Args::parse();

    let options = FetchOptions {
        timeout: args.timeout_secs.map(Duration::from_secs),
        retries: args.retries,
    };
    let body = match fetch_log(&args.url, options).await {
        Ok(body) => body,
        Err(e) => {
            error!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let records = load_records(body.as_bytes());
    let report = Report::from_records(&records);
    if let Err(e) = report.write(&mut io::stdout().lock(), args.format) {
        error!("Unable to write report: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

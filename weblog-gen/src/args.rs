use std::path::PathBuf;

use clap::Parser;
use derive_getters::Getters;

#[derive(Parser, Debug, Getters)]
#[command(name = "weblog-gen")]
#[command(about = "Generate fake CSV access logs for weblog-stats", long_about = None)]
pub struct CliArgs {
    #[arg(long, default_value_t = 1000)]
    rows: usize,

    /// Fixed seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Share of rows that are deliberately broken
    #[arg(long, default_value_t = 0.05, value_parser = parse_ratio)]
    malformed_ratio: f64,

    /// Write here instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn parse_ratio(raw: &str) -> Result<f64, String> {
    let ratio: f64 = raw.parse().map_err(|e| format!("{e}"))?;
    if (0.0..=1.0).contains(&ratio) {
        Ok(ratio)
    } else {
        Err(format!("{ratio} is not between 0 and 1"))
    }
}

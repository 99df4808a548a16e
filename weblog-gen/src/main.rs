mod args;
mod generator;

use std::{
    fs::File,
    io::{self, Write},
};

use args::CliArgs;
use chrono::Local;
use clap::Parser;
use generator::{csv_writer, generate_malformed_row, generate_row};
use rand::{Rng, SeedableRng, rngs::StdRng};

fn main() -> io::Result<()> {
    let args = CliArgs::parse();
    let mut rng = match args.seed() {
        Some(seed) => StdRng::seed_from_u64(*seed),
        None => StdRng::from_os_rng(),
    };
    let day = Local::now().date_naive();

    let sink: Box<dyn Write> = match args.output() {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout().lock()),
    };
    let mut out = csv_writer(sink);
    for _ in 0..*args.rows() {
        let row = if rng.random_bool(*args.malformed_ratio()) {
            generate_malformed_row(&mut rng, day)
        } else {
            generate_row(&mut rng, day)
        };
        out.write_record(&row)?;
    }
    out.flush()
}

use std::io::Write;

use chrono::{NaiveDate, NaiveDateTime};
use csv::{Writer, WriterBuilder};
use rand::{Rng, seq::IndexedRandom};

const PATHS: [(&str, u8); 10] = [
    ("/", 20),
    ("/index.html", 15),
    ("/login", 8),
    ("/search?q=shoes,boots", 4),
    ("/images/logo.png", 12),
    ("/images/banner.JPG", 6),
    ("/images/spinner.gif", 5),
    ("/img/photo.Png", 4),
    ("/assets/app.js", 10),
    ("/assets/site.css", 10),
];
const BROWSERS: [(&str, u8); 7] = [
    (
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36",
        40,
    ),
    (
        "Mozilla/5.0 (X11; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0",
        20,
    ),
    (
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_2) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.2 Safari/605.1.15",
        20,
    ),
    ("Mozilla/4.0 (compatible; MSIE 8.0; Windows NT 6.1)", 4),
    ("Mozilla/5.0 (Windows NT 6.1; Trident/7.0; rv:11.0) like Gecko", 4),
    ("curl/8.5.0", 6),
    ("Opera/9.80 (Windows NT 6.0) Presto/2.12", 2),
];
// Quiet nights, busy office hours.
const HOURS: [(u32, u8); 24] = [
    (0, 2),
    (1, 1),
    (2, 1),
    (3, 1),
    (4, 1),
    (5, 2),
    (6, 4),
    (7, 6),
    (8, 10),
    (9, 14),
    (10, 16),
    (11, 15),
    (12, 12),
    (13, 14),
    (14, 16),
    (15, 15),
    (16, 12),
    (17, 9),
    (18, 7),
    (19, 6),
    (20, 5),
    (21, 4),
    (22, 3),
    (23, 2),
];
const STATUS: [(u16, u8); 6] = [
    (200, 70),
    (301, 5),
    (304, 10),
    (404, 10),
    (403, 2),
    (500, 3),
];
const DATE_FORMATS: [&str; 2] = ["%m/%d/%Y %H:%M:%S", "%Y-%m-%d %H:%M:%S"];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Defect {
    ShortRow,
    BadDate,
    BadStatus,
    BadSize,
}

const DEFECTS: [Defect; 4] = [
    Defect::ShortRow,
    Defect::BadDate,
    Defect::BadStatus,
    Defect::BadSize,
];

fn pick<'a, T, R: Rng + ?Sized>(rng: &mut R, table: &'a [(T, u8)]) -> &'a T {
    &table
        .choose_weighted(rng, |(_, w)| *w)
        .expect("weight tables are non-empty with positive weights")
        .0
}

/// Short rows must be writable, so field counts may vary between records.
pub fn csv_writer<W: Write>(sink: W) -> Writer<W> {
    WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_writer(sink)
}

fn random_moment<R: Rng + ?Sized>(rng: &mut R, day: NaiveDate) -> NaiveDateTime {
    let hour = *pick(rng, &HOURS);
    day.and_hms_opt(hour, rng.random_range(0..60), rng.random_range(0..60))
        .unwrap_or_default()
}

fn format_moment<R: Rng + ?Sized>(rng: &mut R, moment: NaiveDateTime) -> String {
    let format = DATE_FORMATS.choose(rng).unwrap_or(&DATE_FORMATS[0]);
    moment.format(format).to_string()
}

pub fn generate_row<R: Rng + ?Sized>(rng: &mut R, day: NaiveDate) -> Vec<String> {
    let path = pick(rng, &PATHS);
    let moment = random_moment(rng, day);
    let timestamp = format_moment(rng, moment);
    let browser = pick(rng, &BROWSERS);
    let status = pick(rng, &STATUS);
    let size: u32 = rng.random_range(100..50_000);

    vec![
        path.to_string(),
        timestamp,
        browser.to_string(),
        status.to_string(),
        size.to_string(),
    ]
}

pub fn generate_malformed_row<R: Rng + ?Sized>(rng: &mut R, day: NaiveDate) -> Vec<String> {
    let defect = *DEFECTS.choose(rng).unwrap_or(&Defect::ShortRow);
    malformed_row(rng, day, defect)
}

pub fn malformed_row<R: Rng + ?Sized>(rng: &mut R, day: NaiveDate, defect: Defect) -> Vec<String> {
    let mut row = generate_row(rng, day);
    match defect {
        Defect::ShortRow => row.truncate(2),
        Defect::BadDate => row[1] = row[1].replacen(' ', ":", 1),
        Defect::BadStatus => row[3] = "OK".into(),
        Defect::BadSize => row[4] = "-".into(),
    }
    row
}

use std::sync::LazyLock;

use chrono::NaiveDateTime;
use csv::StringRecord;
use regex::Regex;
use thiserror::Error;

use crate::models::LogRecord;

/// Accepted timestamp layouts, tried in order.
pub const DATE_FORMATS: [&str; 2] = ["%m/%d/%Y %H:%M:%S", "%Y-%m-%d %H:%M:%S"];

// chrono alone lets through leading blanks, signed years and a missing date/time separator.
static DATE_SHAPES: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        r"^\d{1,2}/\d{1,2}/\d{4}\s+\d{1,2}:\d{1,2}:\d{1,2}$",
        r"^\d{4}-\d{1,2}-\d{1,2}\s+\d{1,2}:\d{1,2}:\d{1,2}$",
    ]
    .map(|shape| Regex::new(shape).expect("valid date shape"))
});

const MIN_FIELDS: usize = 5;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unrecognized date format: {raw:?}")]
pub struct DateFormatError {
    pub raw: String,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RowError {
    #[error("row has {found} fields, expected at least {min}", min = MIN_FIELDS)]
    ShortRow { found: usize },

    #[error(transparent)]
    BadDate(#[from] DateFormatError),

    #[error("invalid {field}: {raw:?}")]
    BadNumericField { field: &'static str, raw: String },

    #[error("undecodable row: {0}")]
    Malformed(String),
}

pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, DateFormatError> {
    DATE_FORMATS
        .iter()
        .zip(DATE_SHAPES.iter())
        .filter(|(_, shape)| shape.is_match(raw))
        .find_map(|(format, _)| NaiveDateTime::parse_from_str(raw, format).ok())
        .ok_or_else(|| DateFormatError { raw: raw.into() })
}

pub fn parse_record(row: &StringRecord) -> Result<LogRecord, RowError> {
    if row.len() < MIN_FIELDS {
        return Err(RowError::ShortRow { found: row.len() });
    }
    // length checked above
    let field = |i: usize| row.get(i).unwrap_or_default();

    let timestamp = parse_timestamp(field(1))?;
    let status = parse_integer("status", field(3))?;
    let size = parse_integer("size", field(4))?;

    Ok(LogRecord {
        path: field(0).into(),
        timestamp,
        browser: field(2).into(),
        status,
        size,
    })
}

fn parse_integer(field: &'static str, raw: &str) -> Result<i64, RowError> {
    raw.parse().map_err(|_| RowError::BadNumericField {
        field,
        raw: raw.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use asserting::prelude::*;
    use chrono::NaiveDate;

    fn ts(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    fn row(fields: &[&str]) -> StringRecord {
        StringRecord::from(fields.to_vec())
    }

    #[test]
    fn parses_us_date_format() {
        assert_that!(parse_timestamp("07/04/2023 13:05:09"))
            .is_equal_to(Ok(ts(2023, 7, 4, 13, 5, 9)));
    }

    #[test]
    fn parses_iso_date_format() {
        assert_that!(parse_timestamp("2023-07-04 13:05:09"))
            .is_equal_to(Ok(ts(2023, 7, 4, 13, 5, 9)));
    }

    #[test]
    fn rejects_other_date_formats() {
        for raw in [
            "2023-07-04T13:05:09",
            "04/Jul/2023:13:05:09 +0000",
            "07/04/2023",
            "07/04/2023 13:05:09 extra",
            " 07/04/2023 13:05:09",
            "07/04/202313:05:09",
            "2023-07-0413:05:09",
            "+2023-07-04 13:05:09",
            "13/45/2023 13:05:09",
            "",
        ] {
            assert_that!(parse_timestamp(raw)).is_equal_to(Err(DateFormatError { raw: raw.into() }));
        }
    }

    #[test]
    fn accepts_unpadded_fields_and_wide_separator() {
        assert_that!(parse_timestamp("7/4/2023 9:05:09"))
            .is_equal_to(Ok(ts(2023, 7, 4, 9, 5, 9)));
        assert_that!(parse_timestamp("2023-07-04  13:05:09"))
            .is_equal_to(Ok(ts(2023, 7, 4, 13, 5, 9)));
    }

    #[test]
    fn timestamp_survives_formatting_in_either_layout() {
        let original = ts(1999, 12, 31, 23, 59, 58);
        for format in DATE_FORMATS {
            let text = original.format(format).to_string();
            assert_that!(parse_timestamp(&text)).is_equal_to(Ok(original));
        }
    }

    #[test]
    fn parses_valid_row_verbatim() {
        let parsed = parse_record(&row(&[
            "/img/a.png",
            "07/04/2023 13:05:09",
            "Mozilla/5.0 (X11) Firefox/115.0",
            "200",
            "512",
        ]));
        assert_that!(parsed).is_equal_to(Ok(LogRecord {
            path: "/img/a.png".into(),
            timestamp: ts(2023, 7, 4, 13, 5, 9),
            browser: "Mozilla/5.0 (X11) Firefox/115.0".into(),
            status: 200,
            size: 512,
        }));
    }

    #[test]
    fn ignores_extra_fields() {
        let parsed = parse_record(&row(&[
            "/", "2023-07-04 01:00:00", "Safari", "301", "0", "extra", "more",
        ]));
        assert_that!(parsed.map(|r| r.status)).is_equal_to(Ok(301));
    }

    #[test]
    fn accepts_empty_path_and_signed_numbers() {
        let parsed = parse_record(&row(&["", "2023-07-04 01:00:00", "", "+200", "-1"]))
            .expect("row should parse");
        assert_eq!(parsed.path, "");
        assert_eq!(parsed.status, 200);
        assert_eq!(parsed.size, -1);
    }

    #[test]
    fn short_row_is_rejected() {
        assert_that!(parse_record(&row(&["bad", "row"])))
            .is_equal_to(Err(RowError::ShortRow { found: 2 }));
    }

    #[test]
    fn bad_date_is_rejected() {
        let parsed = parse_record(&row(&["/", "yesterday", "Chrome", "200", "1"]));
        assert!(matches!(parsed, Err(RowError::BadDate(_))));
    }

    #[test]
    fn non_integer_numbers_are_rejected() {
        assert_that!(parse_record(&row(&["/", "2023-07-04 01:00:00", "Chrome", "2OO", "1"])))
            .is_equal_to(Err(RowError::BadNumericField {
                field: "status",
                raw: "2OO".into(),
            }));
        assert_that!(parse_record(&row(&["/", "2023-07-04 01:00:00", "Chrome", "200", "1.5"])))
            .is_equal_to(Err(RowError::BadNumericField {
                field: "size",
                raw: "1.5".into(),
            }));
        assert_that!(parse_record(&row(&["/", "2023-07-04 01:00:00", "Chrome", " 200", "1"])))
            .is_err();
    }
}

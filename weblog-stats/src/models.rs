use chrono::NaiveDateTime;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub path: String,
    pub timestamp: NaiveDateTime,
    pub browser: String,
    pub status: i64,
    pub size: i64,
}

use chrono::{NaiveDateTime, Timelike};
use derive_more::{Debug, Display};
use serde::Serialize;

/// Hour of day, always in `0..24`.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[display("{_0:02}")]
#[serde(transparent)]
pub struct Hour(u8);

impl Hour {
    pub fn get(self) -> u8 {
        self.0
    }

    pub fn index(self) -> usize {
        usize::from(self.get())
    }
}

impl From<NaiveDateTime> for Hour {
    fn from(value: NaiveDateTime) -> Self {
        // chrono keeps hour() in 0..24
        Self(value.hour() as u8)
    }
}

use std::{cmp::Reverse, sync::LazyLock};

use derive_more::Display;
use regex::Regex;
use serde::Serialize;

use crate::{invariants::Hour, models::LogRecord};

static IMAGE_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.(jpg|png|gif)$").expect("valid image regex"));

/// One pass over the working sequence producing a single statistic.
///
/// Accumulators are plain values: `aggregate` builds a fresh one for every call.
pub trait Aggregator: Default {
    type Output;

    fn observe(&mut self, record: &LogRecord);
    fn finish(self) -> Self::Output;

    fn aggregate<'a, I>(records: I) -> Self::Output
    where
        I: IntoIterator<Item = &'a LogRecord>,
    {
        let mut acc = Self::default();
        for record in records {
            acc.observe(record);
        }
        acc.finish()
    }
}

pub fn is_image_request(path: &str) -> bool {
    IMAGE_PATH.is_match(path)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageRatio {
    pub images: usize,
    pub total: usize,
}

impl ImageRatio {
    pub fn percentage(&self) -> f64 {
        self.images as f64 / self.total as f64 * 100.0
    }
}

#[derive(Debug, Default)]
pub struct ImageRequests {
    images: usize,
    total: usize,
}

impl Aggregator for ImageRequests {
    /// `None` when there were no requests at all.
    type Output = Option<ImageRatio>;

    fn observe(&mut self, record: &LogRecord) {
        self.total += 1;
        if is_image_request(&record.path) {
            self.images += 1;
        }
    }

    fn finish(self) -> Self::Output {
        (self.total > 0).then_some(ImageRatio {
            images: self.images,
            total: self.total,
        })
    }
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BrowserFamily {
    Firefox,
    Chrome,
    Safari,
    #[display("Internet Explorer")]
    #[serde(rename = "Internet Explorer")]
    InternetExplorer,
}

impl BrowserFamily {
    pub const ALL: [Self; 4] = [
        Self::Firefox,
        Self::Chrome,
        Self::Safari,
        Self::InternetExplorer,
    ];

    /// Substring match, first hit wins. `None` means the agent is not one we bucket.
    pub fn classify(agent: &str) -> Option<Self> {
        if agent.contains("Firefox") {
            Some(Self::Firefox)
        } else if agent.contains("Chrome") {
            Some(Self::Chrome)
        } else if agent.contains("Safari") {
            Some(Self::Safari)
        } else if agent.contains("MSIE") || agent.contains("Trident") {
            Some(Self::InternetExplorer)
        } else {
            None
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PopularBrowser {
    pub browser: BrowserFamily,
    pub hits: usize,
}

#[derive(Debug, Default)]
pub struct BrowserPopularity {
    counts: [usize; BrowserFamily::ALL.len()],
    first_seen: Vec<BrowserFamily>,
}

impl Aggregator for BrowserPopularity {
    /// Ties go to the family that appeared first in the log.
    type Output = Option<PopularBrowser>;

    fn observe(&mut self, record: &LogRecord) {
        let Some(family) = BrowserFamily::classify(&record.browser) else {
            return;
        };
        let count = &mut self.counts[family.index()];
        if *count == 0 {
            self.first_seen.push(family);
        }
        *count += 1;
    }

    fn finish(self) -> Self::Output {
        let mut best: Option<PopularBrowser> = None;
        for browser in self.first_seen {
            let hits = self.counts[browser.index()];
            if best.is_none_or(|b| hits > b.hits) {
                best = Some(PopularBrowser { browser, hits });
            }
        }
        best
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HourlyHits {
    pub hour: Hour,
    pub hits: usize,
}

#[derive(Debug, Default)]
pub struct HourlyHistogram {
    counts: [usize; 24],
    first_seen: Vec<Hour>,
}

impl Aggregator for HourlyHistogram {
    /// Busiest first; equal counts keep first-seen hour order.
    type Output = Vec<HourlyHits>;

    fn observe(&mut self, record: &LogRecord) {
        let hour = Hour::from(record.timestamp);
        let count = &mut self.counts[hour.index()];
        if *count == 0 {
            self.first_seen.push(hour);
        }
        *count += 1;
    }

    fn finish(self) -> Self::Output {
        let mut hits: Vec<_> = self
            .first_seen
            .into_iter()
            .map(|hour| HourlyHits {
                hour,
                hits: self.counts[hour.index()],
            })
            .collect();
        // stable: ties stay in first-seen order
        hits.sort_by_key(|h| Reverse(h.hits));
        hits
    }
}

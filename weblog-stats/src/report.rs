use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;

use crate::{
    analytics::{
        Aggregator, BrowserPopularity, HourlyHistogram, HourlyHits, ImageRatio, ImageRequests,
        PopularBrowser,
    },
    models::LogRecord,
};

#[derive(Copy, Clone, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub image_requests: Option<ImageShare>,
    pub popular_browser: Option<PopularBrowser>,
    pub hourly_hits: Vec<HourlyHits>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ImageShare {
    pub images: usize,
    pub total: usize,
    pub percentage: f64,
}

impl From<ImageRatio> for ImageShare {
    fn from(ratio: ImageRatio) -> Self {
        Self {
            images: ratio.images,
            total: ratio.total,
            percentage: ratio.percentage(),
        }
    }
}

impl Report {
    pub fn from_records(records: &[LogRecord]) -> Self {
        Self {
            image_requests: ImageRequests::aggregate(records).map(ImageShare::from),
            popular_browser: BrowserPopularity::aggregate(records),
            hourly_hits: HourlyHistogram::aggregate(records),
        }
    }

    pub fn write<W: Write>(&self, out: &mut W, format: OutputFormat) -> io::Result<()> {
        match format {
            OutputFormat::Text => self.write_text(out),
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, self)?;
                writeln!(out)
            }
        }
    }

    fn write_text<W: Write>(&self, out: &mut W) -> io::Result<()> {
        match &self.image_requests {
            Some(share) => writeln!(
                out,
                "Image requests account for {:.2}% of all requests",
                share.percentage
            )?,
            None => writeln!(out, "No requests found.")?,
        }
        if let Some(popular) = &self.popular_browser {
            writeln!(out, "Most popular browser: {}", popular.browser)?;
        }
        for HourlyHits { hour, hits } in &self.hourly_hits {
            writeln!(out, "Hour {hour} has {hits} hits")?;
        }
        Ok(())
    }
}

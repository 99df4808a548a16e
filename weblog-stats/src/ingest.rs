use std::time::Duration;

use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::info;
use tryhard::{RetryFutureConfig, retry_fn};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unable to fetch file, HTTP status: {0}")]
    Status(StatusCode),

    #[error("file is empty")]
    Empty,
}

#[derive(Debug, Clone, Copy)]
pub struct FetchOptions {
    pub timeout: Option<Duration>,
    pub retries: u32,
}

/// GETs `url` and returns the body. Only transport failures are retried.
pub async fn fetch_log(url: &str, options: FetchOptions) -> Result<String, FetchError> {
    let mut builder = Client::builder();
    if let Some(timeout) = options.timeout {
        builder = builder.timeout(timeout);
    }
    let client = builder.build()?;

    let config = RetryFutureConfig::new(options.retries)
        .exponential_backoff(Duration::from_millis(100))
        .max_delay(Duration::from_secs(5));
    let client = &client;
    let response = retry_fn(move || async move {
        info!("Fetching log from {url}");
        client.get(url).send().await
    })
    .with_config(config)
    .await?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(FetchError::Status(status));
    }
    let body = response.text().await?;
    if body.lines().next().is_none() {
        return Err(FetchError::Empty);
    }
    info!("File downloaded successfully ({} bytes)", body.len());
    Ok(body)
}

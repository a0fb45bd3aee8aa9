//! Print preview cache.

use std::time::Duration;

use chrono::Local;
use reqwest::Client;
use tracing::{debug, warn};

use creality_core::PrinterConfig;

use crate::error::HttpError;

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Caches the current print's preview image.
///
/// The firmware stores one preview under a fixed path, so the image is
/// refetched only when the reported filename changes; a timestamp query
/// bypasses the device's HTTP cache. A failed fetch keeps whatever was
/// cached until the next filename change.
#[derive(Debug)]
pub struct PreviewCache {
    client: Client,
    config: PrinterConfig,
    last_image: Option<Vec<u8>>,
    last_filename: String,
}

impl PreviewCache {
    pub fn new(config: PrinterConfig) -> Result<Self, HttpError> {
        let client = Client::builder().timeout(FETCH_TIMEOUT).build()?;
        Ok(Self {
            client,
            config,
            last_image: None,
            last_filename: String::new(),
        })
    }

    /// Returns the preview for the printer's current filename.
    ///
    /// An empty filename (no job loaded) serves the cached image as-is.
    pub async fn image_for(&mut self, filename: &str) -> Option<&[u8]> {
        if filename.is_empty() {
            return self.last_image.as_deref();
        }

        if filename != self.last_filename {
            // Mark the filename first so a failed fetch is not retried
            // until the job changes again
            self.last_filename = filename.to_string();
            self.refresh().await;
        }

        self.last_image.as_deref()
    }

    async fn refresh(&mut self) {
        let url = format!(
            "{}?date={}",
            self.config.preview_url(),
            Local::now().format("%Y-%m-%dT%H:%M:%S%.f")
        );

        match self.client.get(&url).send().await {
            Ok(response) if response.status().is_success() => match response.bytes().await {
                Ok(bytes) => {
                    debug!("Fetched print preview thumbnail");
                    self.last_image = Some(bytes.to_vec());
                }
                Err(e) => warn!("Error reading print preview body: {}", e),
            },
            Ok(response) => {
                warn!("Error getting print preview: HTTP {}", response.status());
            }
            Err(e) => warn!("Error fetching print preview: {}", e),
        }
    }
}

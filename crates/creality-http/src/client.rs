//! Printer HTTP endpoints.

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info, warn};

use creality_core::PrinterConfig;

use crate::error::HttpError;

/// Per-request timeout for validation probes.
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Per-request timeout for image fetches.
const IMAGE_TIMEOUT: Duration = Duration::from_secs(10);

/// Paths probed during validation, in order.
const PROBE_PATHS: [&str; 3] = ["/", "/server/info", "/printer/info"];

/// Client for the printer's plain HTTP endpoints: the info endpoints used
/// to validate reachability and the mjpg-streamer webcam.
#[derive(Debug, Clone)]
pub struct PrinterWebClient {
    client: Client,
    config: PrinterConfig,
}

impl PrinterWebClient {
    pub fn new(config: PrinterConfig) -> Result<Self, HttpError> {
        let client = Client::builder().timeout(IMAGE_TIMEOUT).build()?;
        Ok(Self { client, config })
    }

    /// Probes the printer until any endpoint answers.
    ///
    /// Any HTTP response counts as reachable, whatever the status code;
    /// firmware versions differ in what they serve at each path. Only
    /// when every probe fails is the printer considered unreachable.
    pub async fn validate_connection(&self) -> Result<(), HttpError> {
        let base = self.config.http_base();

        for path in PROBE_PATHS {
            let url = format!("{base}{path}");
            debug!("Testing endpoint: {}", url);
            match self.client.get(&url).timeout(PROBE_TIMEOUT).send().await {
                Ok(response) => {
                    info!(
                        "Printer responded with HTTP {} - connection valid",
                        response.status()
                    );
                    return Ok(());
                }
                Err(e) => debug!("Error on {}: {}", url, e),
            }
        }

        warn!(
            "Cannot reach printer at {}:{}",
            self.config.host, self.config.port
        );
        Err(HttpError::Unreachable {
            host: self.config.host.clone(),
            port: self.config.port,
        })
    }

    /// Fetches one still frame from the webcam.
    pub async fn snapshot(&self) -> Result<Vec<u8>, HttpError> {
        let response = self.client.get(self.config.snapshot_url()).send().await?;
        if !response.status().is_success() {
            return Err(HttpError::Status {
                status: response.status(),
            });
        }
        Ok(response.bytes().await?.to_vec())
    }

    /// URL of the webcam MJPEG stream, consumed by viewers directly.
    pub fn stream_url(&self) -> String {
        self.config.stream_url()
    }
}

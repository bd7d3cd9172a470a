//! QR code proxy for the tournament bracket link.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use reqwest::Client;

/// Fetches QR images from an external generator.
pub struct QrClient {
    client: Client,
    api: String,
    size: u32,
}

impl QrClient {
    pub fn new(api: &str, size: u32) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("Failed to build QR HTTP client")?;
        Ok(Self {
            client,
            api: api.to_owned(),
            size,
        })
    }

    /// Bracket view of a tournament, without site navigation.
    pub fn bracket_url(tournament_url: &str) -> String {
        format!("{}/bracket?navigation=false", tournament_url.trim_end_matches('/'))
    }

    /// PNG bytes encoding `target`.
    pub async fn fetch(&self, target: &str) -> Result<Vec<u8>> {
        let size = format!("{0}x{0}", self.size);
        let resp = self
            .client
            .get(&self.api)
            .query(&[("size", size.as_str()), ("data", target)])
            .send()
            .await
            .with_context(|| format!("QR service unreachable at {}", self.api))?
            .error_for_status()
            .context("QR service returned an error")?;

        let bytes = resp.bytes().await.context("Failed to read QR image")?;
        if bytes.is_empty() {
            bail!("QR service returned an empty image");
        }
        Ok(bytes.to_vec())
    }
}

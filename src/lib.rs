use std::{path::Path, time::Duration};

use anyhow::{Context, Result};
use log::debug;
use reqwest::header::{HeaderValue, CONTENT_TYPE};

/// Address of the local service answering `dnsZoneLineForCert` requests
pub const DEFAULT_SERVER: &str = "http://localhost:25353";

/// Build the request URL for `identifier`.
///
/// The identifier is inserted as-is, without any percent-encoding, so an identifier containing
/// `/` or other reserved characters changes the path. Only pass trusted input here.
pub fn endpoint_url(server: &str, identifier: &str) -> String {
    format!(
        "{}/{identifier}/dnsZoneLineForCert",
        server.trim_end_matches('/')
    )
}

/// Read the whole certificate file into memory. The file is closed before this returns.
pub async fn read_certificate(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();
    tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read certificate file {}.", path.display()))
}

pub struct Submitter {
    client: reqwest::Client,
    server: String,
}

impl Submitter {
    /// Create a submitter talking to `server`. Without a `timeout` requests wait indefinitely.
    pub fn new(server: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder().no_proxy();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build().context("Couldn't build HTTP client")?,
            server: server.into(),
        })
    }

    /// Send the raw contents of `cert_path` on behalf of `identifier` and return the decoded
    /// JSON response.
    pub async fn submit(
        &self,
        identifier: &str,
        cert_path: impl AsRef<Path>,
    ) -> Result<serde_json::Value> {
        let url = endpoint_url(&self.server, identifier);
        // Read before connecting, a missing file must never result in a request
        let certificate = read_certificate(cert_path).await?;
        debug!("posting {} bytes to {url}", certificate.len());

        // The body is sent raw even though the header claims JSON, the service expects exactly
        // this.
        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .body(certificate)
            .send()
            .await
            .with_context(|| format!("Couldn't send certificate to {url}"))?;
        debug!("response status {}", response.status());

        let body = response
            .error_for_status()
            .with_context(|| format!("Server rejected certificate sent to {url}"))?
            .bytes()
            .await
            .context("Couldn't read response body")?;

        serde_json::from_slice(&body).context("Response body is not valid JSON")
    }
}

//! HTTP fetches for source documents
//!
//! Provides `HttpClient`, a thin wrapper over `reqwest::Client` that turns a
//! non-success status into an error instead of handing back the error page.

use eyre::{Context, Result};
use reqwest::Client;
use url::Url;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// HTTP client used by extractors that read from the web.
///
/// No retries and no timeout beyond the transport defaults: a failed or hung
/// request fails or hangs the run.
///
/// # Example
/// ```no_run
/// use etl_jobs::client::HttpClient;
/// use url::Url;
///
/// # async fn example() -> eyre::Result<()> {
/// let client = HttpClient::try_new()?;
/// let url = Url::parse("https://example.com/")?;
/// let body = client.get_text(&url).await?;
/// println!("{} bytes", body.len());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Build a client with this crate's user agent.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be built
    pub fn try_new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }

    /// GET a URL and return the response body as text.
    ///
    /// # Errors
    /// Returns an error on transport failure, a non-success status, or a body
    /// that cannot be decoded
    pub async fn get_text(&self, url: &Url) -> Result<String> {
        log::debug!("GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("Failed to fetch {}", url))?;

        let status = response.status();
        if !status.is_success() {
            eyre::bail!("Failed to fetch {} ({})", url, status);
        }

        let body = response
            .text()
            .await
            .with_context(|| format!("Failed to read response body from {}", url))?;
        log::debug!("Fetched {} bytes from {}", body.len(), url);

        Ok(body)
    }
}

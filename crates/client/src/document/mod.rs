//! Court document retrieval.
//!
//! ### URL Handling
//! - Trim whitespace, ensure scheme (default: `https`)
//! - Lowercase host, remove fragments
//!
//! ### Safety Gates
//! - Resolve DNS and require every A/AAAA answer to be public.
//! - Max redirects: 5
//! - Max body bytes: configurable (default 20MB)
//!
//! ### Naming
//! - Downloads are offered under a filename derived from the display title
//!   with every non-alphanumeric character replaced.

pub mod filename;
pub mod guard;
pub mod url;

use bytes::Bytes;
use reqwest::{Client, header};
use std::time::{Duration, Instant};

pub use filename::sanitize_filename;
pub use guard::{GuardError, check_url, is_blocked};
pub use self::url::{UrlError, canonicalize};

use casefetch_core::{AppConfig, Error};

const DEFAULT_CONTENT_TYPE: &str = "application/pdf";

/// Configuration for the document client.
#[derive(Debug, Clone)]
pub struct DocumentConfig {
    /// User agent string sent to court websites.
    pub user_agent: String,

    /// Maximum response body size in bytes (default: 20MB)
    pub max_bytes: usize,

    /// Request timeout (default: 20s)
    pub timeout: Duration,

    /// Maximum number of redirects to follow (default: 5)
    pub max_redirects: usize,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        let app = AppConfig::default();
        let timeout = app.timeout();
        Self { user_agent: app.user_agent, max_bytes: app.max_document_bytes, timeout, max_redirects: 5 }
    }
}

impl From<&AppConfig> for DocumentConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            user_agent: config.user_agent.clone(),
            max_bytes: config.max_document_bytes,
            timeout: config.timeout(),
            ..Default::default()
        }
    }
}

/// A retrieved document ready to be offered for download.
#[derive(Debug, Clone)]
pub struct Document {
    /// Sanitized download filename.
    pub filename: String,
    /// Content-Type reported upstream, `application/pdf` when absent.
    pub content_type: String,
    /// Document body.
    pub bytes: Bytes,
    /// Time taken to fetch in milliseconds.
    pub fetch_ms: u64,
}

/// HTTP client for court order and judgment documents.
pub struct DocumentClient {
    http: Client,
    config: DocumentConfig,
}

impl DocumentClient {
    /// Create a new document client with the given configuration.
    pub fn new(config: DocumentConfig) -> Result<Self, Error> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| Error::DocumentFetch(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, config })
    }

    /// Retrieve a document and name it after `title`.
    ///
    /// Performs URL normalization and the address check before any request.
    pub async fn download(&self, url_str: &str, title: &str) -> Result<Document, Error> {
        let start = Instant::now();
        let url = canonicalize(url_str).map_err(|e| Error::InvalidUrl(e.to_string()))?;

        check_url(&url).await.map_err(|e| match e {
            GuardError::DnsError(msg) => Error::DocumentFetch(msg),
            other => Error::SsrfBlocked(other.to_string()),
        })?;

        let response = self
            .http
            .get(url.as_str())
            .header(header::ACCEPT, "application/pdf,*/*;q=0.8")
            .send()
            .await
            .map_err(|e| Error::DocumentFetch(format!("network error: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::DocumentFetch(format!("status {}", status.as_u16())));
        }

        if let Some(len) = response.content_length()
            && len as usize > self.config.max_bytes
        {
            return Err(Error::DocumentTooLarge(format!("{} bytes exceeds {}", len, self.config.max_bytes)));
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string())
            .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::DocumentFetch(format!("failed to read response: {e}")))?;

        if bytes.len() > self.config.max_bytes {
            return Err(Error::DocumentTooLarge(format!(
                "{} bytes exceeds {}",
                bytes.len(),
                self.config.max_bytes
            )));
        }

        let fetch_ms = start.elapsed().as_millis() as u64;
        tracing::debug!(url = %url, bytes = bytes.len(), fetch_ms, "downloaded document");

        Ok(Document { filename: sanitize_filename(title), content_type, bytes, fetch_ms })
    }
}

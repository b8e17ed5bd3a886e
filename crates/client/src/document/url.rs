//! Document URL normalization.

/// Error type for document URL parsing failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum UrlError {
    #[error("empty URL")]
    Empty,

    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// Normalize a document URL before it is checked and fetched.
///
/// Normalization steps:
/// 1. Trim leading/trailing whitespace
/// 2. Default scheme to https:// if missing
/// 3. Lowercase the host
/// 4. Remove fragment (#...)
/// 5. Keep query string intact
pub fn canonicalize(input: &str) -> Result<::url::Url, UrlError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }

    let url_str = if trimmed.contains("://") { trimmed.to_string() } else { format!("https://{trimmed}") };

    let mut parsed = ::url::Url::parse(&url_str).map_err(|e| UrlError::InvalidUrl(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => return Err(UrlError::UnsupportedScheme(scheme.to_string())),
    }

    if let Some(host) = parsed.host_str().map(str::to_lowercase) {
        parsed
            .set_host(Some(&host))
            .map_err(|e| UrlError::InvalidUrl(e.to_string()))?;
    }

    parsed.set_fragment(None);

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonicalize_court_order_url() {
        let url = canonicalize("https://delhihighcourt.nic.in/orders/1234_order.pdf").unwrap();
        assert_eq!(url.host_str(), Some("delhihighcourt.nic.in"));
        assert_eq!(url.path(), "/orders/1234_order.pdf");
    }

    #[test]
    fn test_canonicalize_default_scheme() {
        let url = canonicalize("main.sci.gov.in/judgments/1.pdf").unwrap();
        assert_eq!(url.scheme(), "https");
    }

    #[test]
    fn test_canonicalize_lowercase_host_and_drop_fragment() {
        let url = canonicalize("  https://DelhiHighCourt.NIC.in/orders/1.pdf#page=2  ").unwrap();
        assert_eq!(url.as_str(), "https://delhihighcourt.nic.in/orders/1.pdf");
    }

    #[test]
    fn test_canonicalize_preserve_query() {
        let url = canonicalize("https://example.com/view?id=7&type=order").unwrap();
        assert_eq!(url.query(), Some("id=7&type=order"));
    }

    #[test]
    fn test_canonicalize_unsupported_scheme() {
        let result = canonicalize("file:///etc/passwd");
        assert!(matches!(result, Err(UrlError::UnsupportedScheme(_))));
    }

    #[test]
    fn test_canonicalize_empty() {
        assert!(matches!(canonicalize("   "), Err(UrlError::Empty)));
    }
}

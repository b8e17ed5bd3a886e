//! Address guard for document downloads.
//!
//! Document URLs come from case records and callers, so every host is
//! resolved and each answer must be a public address before a request is
//! sent.

use std::net::IpAddr;
use std::sync::LazyLock;

use ipnet::IpNet;
use url::{Host, Url};

/// Error type for address guard failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GuardError {
    #[error("URL has no host")]
    MissingHost,

    #[error("blocked address: {0} (private/reserved)")]
    BlockedIp(IpAddr),

    #[error("DNS resolution failed: {0}")]
    DnsError(String),
}

/// Ranges that are never fetched, beyond what the std predicates cover.
static BLOCKED_NETS: LazyLock<Vec<IpNet>> = LazyLock::new(|| {
    [
        "0.0.0.0/8",     // "this" network
        "100.64.0.0/10", // carrier-grade NAT
        "192.0.0.0/24",  // IETF protocol assignments
        "198.18.0.0/15", // benchmarking
        "240.0.0.0/4",   // reserved
        "fc00::/7",      // unique local
        "fe80::/10",     // link-local
    ]
    .iter()
    .filter_map(|net| net.parse().ok())
    .collect()
});

/// Check if an IP address is private, reserved, or otherwise blocked.
///
/// IPv4-mapped IPv6 addresses are checked as their IPv4 form.
pub fn is_blocked(ip: IpAddr) -> bool {
    let ip = match ip {
        IpAddr::V6(v6) => v6.to_ipv4_mapped().map(IpAddr::V4).unwrap_or(ip),
        v4 => v4,
    };

    let std_blocked = match ip {
        IpAddr::V4(v4) => {
            v4.is_loopback()
                || v4.is_private()
                || v4.is_link_local()
                || v4.is_multicast()
                || v4.is_broadcast()
                || v4.is_unspecified()
        }
        IpAddr::V6(v6) => v6.is_loopback() || v6.is_multicast() || v6.is_unspecified(),
    };

    std_blocked || BLOCKED_NETS.iter().any(|net| net.contains(&ip))
}

/// Resolve the URL's host and reject it if any answer is blocked.
///
/// Returns the resolved addresses on success.
pub async fn check_url(url: &Url) -> Result<Vec<IpAddr>, GuardError> {
    let host = url.host().ok_or(GuardError::MissingHost)?;
    let port = url.port_or_known_default().unwrap_or(443);

    let addrs: Vec<IpAddr> = match host {
        Host::Ipv4(v4) => vec![IpAddr::V4(v4)],
        Host::Ipv6(v6) => vec![IpAddr::V6(v6)],
        Host::Domain(domain) => tokio::net::lookup_host((domain, port))
            .await
            .map_err(|e| GuardError::DnsError(format!("{domain}: {e}")))?
            .map(|addr| addr.ip())
            .collect(),
    };

    if addrs.is_empty() {
        return Err(GuardError::DnsError("no addresses returned".into()));
    }

    if let Some(blocked) = addrs.iter().copied().find(|ip| is_blocked(*ip)) {
        return Err(GuardError::BlockedIp(blocked));
    }

    Ok(addrs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, Ipv6Addr};

    #[test]
    fn test_blocks_loopback_and_private() {
        assert!(is_blocked(IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1))));
        assert!(is_blocked(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1))));
        assert!(is_blocked(IpAddr::V4(Ipv4Addr::new(172, 16, 0, 1))));
        assert!(is_blocked(IpAddr::V4(Ipv4Addr::new(192, 168, 1, 1))));
        assert!(is_blocked(IpAddr::V6(Ipv6Addr::LOCALHOST)));
    }

    #[test]
    fn test_blocks_link_local_and_metadata() {
        assert!(is_blocked(IpAddr::V4(Ipv4Addr::new(169, 254, 169, 254))));
        assert!(is_blocked(IpAddr::V6(Ipv6Addr::new(0xfe80, 0, 0, 0, 0, 0, 0, 1))));
    }

    #[test]
    fn test_blocks_cgnat_and_unique_local() {
        assert!(is_blocked(IpAddr::V4(Ipv4Addr::new(100, 64, 0, 1))));
        assert!(is_blocked(IpAddr::V6(Ipv6Addr::new(0xfd12, 0, 0, 0, 0, 0, 0, 1))));
    }

    #[test]
    fn test_blocks_mapped_loopback() {
        let mapped = Ipv4Addr::new(127, 0, 0, 1).to_ipv6_mapped();
        assert!(is_blocked(IpAddr::V6(mapped)));
    }

    #[test]
    fn test_allows_public() {
        assert!(!is_blocked(IpAddr::V4(Ipv4Addr::new(164, 100, 59, 80))));
        assert!(!is_blocked(IpAddr::V6(Ipv6Addr::new(0x2001, 0x4860, 0x4860, 0, 0, 0, 0, 0x8888))));
    }

    #[tokio::test]
    async fn test_check_url_literal_ip() {
        let url = Url::parse("http://127.0.0.1/orders/1.pdf").unwrap();
        assert!(matches!(check_url(&url).await, Err(GuardError::BlockedIp(_))));

        let url = Url::parse("https://[::1]/orders/1.pdf").unwrap();
        assert!(matches!(check_url(&url).await, Err(GuardError::BlockedIp(_))));
    }

    #[tokio::test]
    async fn test_check_url_localhost_name() {
        let url = Url::parse("http://localhost:8080/orders/1.pdf").unwrap();
        assert!(check_url(&url).await.is_err());
    }
}

//! Stateless service façade exposing all toolbox operations.
//!
//! Every method on [`ToolboxService`] is an async associated function; no instance needed.

mod dns;
mod http;
mod resolver;

use std::time::Duration;

use serde_json::Value;

pub use dns::DnsLookup;

use crate::error::{ToolboxError, ToolboxResult};
use crate::types::DnsQueryType;

/// Validate and normalise a domain name.
///
/// Trims whitespace and a trailing dot, converts internationalised names to ASCII
/// and rejects empty, IP-address or overlong inputs.
fn validate_domain(domain: &str) -> ToolboxResult<String> {
    let domain = domain.trim().trim_end_matches('.');
    if domain.is_empty() {
        return Err(ToolboxError::ValidationError(
            "Domain name is required".to_string(),
        ));
    }
    let ascii_domain = match url::Host::parse(domain) {
        Ok(url::Host::Domain(ascii)) => ascii,
        Ok(_) => {
            return Err(ToolboxError::ValidationError(format!(
                "Expected a domain name, got an IP address: {domain}"
            )))
        }
        Err(_) => {
            return Err(ToolboxError::ValidationError(format!(
                "Invalid domain name: {domain}"
            )))
        }
    };
    if ascii_domain.len() > 253 {
        return Err(ToolboxError::ValidationError(format!(
            "Domain name exceeds maximum length of 253 characters (got {})",
            ascii_domain.len()
        )));
    }
    Ok(ascii_domain)
}

/// Entry point for the network helpers.
///
/// ```rust,no_run
/// use std::time::Duration;
/// use shepherd_toolbox::{DnsQueryType, ToolboxService};
/// # async fn demo() -> shepherd_toolbox::ToolboxResult<()> {
/// let ns = ToolboxService::dns_values("example.com", DnsQueryType::Ns, Duration::from_secs(5)).await?;
/// # Ok(())
/// # }
/// ```
pub struct ToolboxService;

impl ToolboxService {
    /// Resolve one record type with the system resolver.
    ///
    /// Returns an empty vector when the name has no such record; transport
    /// failures and timeouts are errors.
    pub async fn dns_values(
        domain: &str,
        record_type: DnsQueryType,
        timeout: Duration,
    ) -> ToolboxResult<Vec<String>> {
        let domain = validate_domain(domain)?;
        DnsLookup::system()
            .values(&domain, record_type, timeout)
            .await
    }

    /// Resolve one record type with a caller-held resolver.
    pub async fn dns_values_with(
        lookup: &DnsLookup,
        domain: &str,
        record_type: DnsQueryType,
        timeout: Duration,
    ) -> ToolboxResult<Vec<String>> {
        let domain = validate_domain(domain)?;
        lookup.values(&domain, record_type, timeout).await
    }

    /// GET a URL with query parameters and parse the JSON body.
    pub async fn fetch_json(
        url: &str,
        query: &[(&str, &str)],
        timeout: Duration,
    ) -> ToolboxResult<Value> {
        http::get_json(url, query, timeout).await
    }

    /// POST a JSON body. Any non-2xx status is an error.
    pub async fn post_json(url: &str, body: &Value, timeout: Duration) -> ToolboxResult<()> {
        http::post_json(url, body, timeout).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::validate_domain;
    use crate::error::ToolboxError;

    #[test]
    fn test_validate_domain_normal() {
        assert_eq!(validate_domain("example.com").unwrap(), "example.com");
    }

    #[test]
    fn test_validate_domain_idn() {
        assert_eq!(validate_domain("münchen.de").unwrap(), "xn--mnchen-3ya.de");
    }

    #[test]
    fn test_validate_domain_dmarc_label() {
        assert_eq!(
            validate_domain("_dmarc.example.com").unwrap(),
            "_dmarc.example.com"
        );
    }

    #[test]
    fn test_validate_domain_trims_whitespace_and_root_dot() {
        assert_eq!(validate_domain("  example.com.  ").unwrap(), "example.com");
    }

    #[test]
    fn test_validate_domain_rejects_ip() {
        assert!(matches!(
            validate_domain("1.2.3.4"),
            Err(ToolboxError::ValidationError(_))
        ));
    }

    #[test]
    fn test_validate_domain_empty() {
        assert!(matches!(
            validate_domain("   "),
            Err(ToolboxError::ValidationError(_))
        ));
    }

    #[test]
    fn test_validate_domain_invalid() {
        assert!(matches!(
            validate_domain("not a valid domain!!!"),
            Err(ToolboxError::ValidationError(_))
        ));
    }
}

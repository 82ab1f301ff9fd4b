use super::DomainError;
use std::fmt;
use std::net::{Ipv6Addr, SocketAddr};
use std::sync::Arc;

pub const DEFAULT_DNS_PORT: u16 = 53;

/// The domain to enumerate and the nameserver to ask, fixed for a whole run.
///
/// Construction normalises both halves: the domain becomes fully qualified
/// (trailing dot) and a nameserver without a port gets port 53.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTarget {
    domain: Arc<str>,
    nameserver: Arc<str>,
}

impl QueryTarget {
    pub fn new(domain: &str, nameserver: &str) -> Result<Self, DomainError> {
        let domain = fqdn(domain)?;
        let nameserver = with_default_port(nameserver)?;

        Ok(Self {
            domain: Arc::from(domain),
            nameserver: Arc::from(nameserver),
        })
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn nameserver(&self) -> &str {
        &self.nameserver
    }

    pub fn domain_arc(&self) -> Arc<str> {
        Arc::clone(&self.domain)
    }
}

impl fmt::Display for QueryTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.domain, self.nameserver)
    }
}

/// Appends the root label unless the name already ends with it.
pub fn fqdn(domain: &str) -> Result<String, DomainError> {
    let domain = domain.trim();
    if domain.is_empty() {
        return Err(DomainError::InvalidDomainName(
            "domain must not be empty".to_string(),
        ));
    }

    if domain.ends_with('.') {
        Ok(domain.to_string())
    } else {
        Ok(format!("{}.", domain))
    }
}

/// Returns `nameserver` as `host:port`, adding port 53 when none is given.
///
/// Bare IPv6 literals are bracketed first so the result stays parseable.
pub fn with_default_port(nameserver: &str) -> Result<String, DomainError> {
    let nameserver = nameserver.trim();
    if nameserver.is_empty() || nameserver.ends_with(':') {
        return Err(DomainError::InvalidNameserver(nameserver.to_string()));
    }

    if nameserver.parse::<SocketAddr>().is_ok() {
        return Ok(nameserver.to_string());
    }

    if let Ok(ip) = nameserver.parse::<Ipv6Addr>() {
        return Ok(format!("[{}]:{}", ip, DEFAULT_DNS_PORT));
    }

    if nameserver.starts_with('[') && nameserver.ends_with(']') {
        return Ok(format!("{}:{}", nameserver, DEFAULT_DNS_PORT));
    }

    match nameserver.rsplit_once(':') {
        Some((host, port)) if !host.is_empty() && port.parse::<u16>().is_ok() => {
            Ok(nameserver.to_string())
        }
        Some(_) => Err(DomainError::InvalidNameserver(nameserver.to_string())),
        None => Ok(format!("{}:{}", nameserver, DEFAULT_DNS_PORT)),
    }
}

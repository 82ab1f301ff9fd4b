//! axfr-sweep domain layer
pub mod config;
pub mod dns_query;
pub mod dns_record;
pub mod errors;
pub mod query_target;

pub use config::{CliOverrides, ClientConfig, Config, ConfigError, LoggingConfig, RetryConfig};
pub use dns_query::DnsQuery;
pub use dns_record::RecordType;
pub use errors::DomainError;
pub use query_target::{QueryTarget, DEFAULT_DNS_PORT};

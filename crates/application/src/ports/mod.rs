mod dns_client;

pub use dns_client::{DnsClient, ZoneTransferStream};

// Re-export for convenience
pub use axfr_sweep_domain::{DnsQuery, QueryTarget};
pub use hickory_proto::rr::Record;

use async_trait::async_trait;
use axfr_sweep_domain::{DnsQuery, DomainError, QueryTarget};
use futures::stream::BoxStream;
use hickory_proto::rr::Record;

/// Ordered envelopes of a zone transfer. Each item is either the answer
/// records of one transfer message or the error that ended the transfer.
pub type ZoneTransferStream = BoxStream<'static, Result<Vec<Record>, DomainError>>;

#[async_trait]
pub trait DnsClient: Send + Sync {
    /// Sends one single-question query to `nameserver` and returns the answer
    /// section of the response, which may be empty.
    async fn exchange(&self, nameserver: &str, query: &DnsQuery) -> Result<Vec<Record>, DomainError>;

    /// Opens an AXFR session for the target's domain. An error here means the
    /// transfer could not even be requested; errors after that arrive through
    /// the stream.
    async fn zone_transfer(&self, target: &QueryTarget) -> Result<ZoneTransferStream, DomainError>;
}

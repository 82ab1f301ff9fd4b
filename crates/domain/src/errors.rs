use super::RecordType;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid nameserver address: {0}")]
    InvalidNameserver(String),

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("DNS response ID mismatch: expected {expected:#06x}, received {received:#06x}")]
    ResponseIdMismatch { expected: u16, received: u16 },

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Transport timeout talking to {server}")]
    TransportTimeout { server: String },

    #[error("Transport connection refused by {server}")]
    TransportConnectionRefused { server: String },

    #[error("Transport connection reset by {server}")]
    TransportConnectionReset { server: String },

    #[error("Zone transfer refused: {rcode}")]
    ZoneTransferRefused { rcode: String },

    #[error("Zone transfer did not start with an SOA record")]
    ZoneTransferMissingSoa,

    #[error("Zone transfer ended before the closing SOA record")]
    ZoneTransferIncomplete,

    #[error("{record_type} query gave up after {attempts} attempts: {last_error}")]
    RetriesExhausted {
        record_type: RecordType,
        attempts: u32,
        last_error: String,
    },

    #[error("Operation cancelled")]
    Cancelled,
}

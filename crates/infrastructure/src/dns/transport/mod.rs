pub mod tcp;
pub mod udp;

use async_trait::async_trait;
use axfr_sweep_domain::{ClientConfig, DomainError};
use std::future::Future;
use std::io::ErrorKind;
use std::net::SocketAddr;
use std::time::Duration;

pub use tcp::TcpTransport;
pub use udp::UdpTransport;

#[derive(Debug)]
pub struct TransportResponse {
    pub bytes: Vec<u8>,

    pub protocol_used: &'static str,
}

#[async_trait]
pub trait DnsTransport: Send + Sync {
    /// Send one query and wait for the matching response, bounding each
    /// socket phase by the client's timeouts.
    async fn send(
        &self,
        message_bytes: &[u8],
        config: &ClientConfig,
    ) -> Result<TransportResponse, DomainError>;
}

/// Reject a response whose header ID differs from the query's.
pub(crate) fn validate_response_id(
    query: &[u8],
    response: &[u8],
    server: SocketAddr,
) -> Result<(), DomainError> {
    if query.len() < 2 || response.len() < 2 {
        return Err(DomainError::InvalidDnsResponse(format!(
            "Message from {} too short to carry an ID",
            server
        )));
    }

    let expected = u16::from_be_bytes([query[0], query[1]]);
    let received = u16::from_be_bytes([response[0], response[1]]);
    if expected != received {
        return Err(DomainError::ResponseIdMismatch { expected, received });
    }
    Ok(())
}

pub(crate) fn io_error(server: SocketAddr, error: std::io::Error) -> DomainError {
    let server = server.to_string();
    match error.kind() {
        ErrorKind::TimedOut => DomainError::TransportTimeout { server },
        ErrorKind::ConnectionRefused => DomainError::TransportConnectionRefused { server },
        ErrorKind::ConnectionReset
        | ErrorKind::ConnectionAborted
        | ErrorKind::BrokenPipe
        | ErrorKind::UnexpectedEof => DomainError::TransportConnectionReset { server },
        _ => DomainError::IoError(format!("{}: {}", server, error)),
    }
}

/// Run one socket operation under `limit`, mapping both elapsed timers and
/// I/O failures onto transport errors for `server`.
pub(crate) async fn within<T, F>(limit: Duration, server: SocketAddr, op: F) -> Result<T, DomainError>
where
    F: Future<Output = std::io::Result<T>>,
{
    match tokio::time::timeout(limit, op).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(io_error(server, e)),
        Err(_) => Err(DomainError::TransportTimeout {
            server: server.to_string(),
        }),
    }
}

//! TCP Transport for DNS queries (RFC 1035 §4.2.2)
//!
//! Every message is framed with a two-byte big-endian length prefix. Used for
//! truncated UDP answers and for zone transfers.

use super::{validate_response_id, within, DnsTransport, TransportResponse};
use async_trait::async_trait;
use axfr_sweep_domain::{ClientConfig, DomainError};
use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::debug;

pub struct TcpTransport {
    server_addr: SocketAddr,
}

impl TcpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }
}

/// Open a TCP connection to `server` within the dial timeout.
pub(crate) async fn connect(server: SocketAddr, config: &ClientConfig) -> Result<TcpStream, DomainError> {
    let stream = within(config.dial_timeout(), server, TcpStream::connect(server)).await?;

    stream
        .set_nodelay(true)
        .map_err(|e| super::io_error(server, e))?;

    Ok(stream)
}

#[async_trait]
impl DnsTransport for TcpTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        config: &ClientConfig,
    ) -> Result<TransportResponse, DomainError> {
        let server = self.server_addr;
        let mut stream = connect(server, config).await?;

        within(
            config.write_timeout(),
            server,
            send_with_length_prefix(&mut stream, message_bytes),
        )
        .await?;

        debug!(server = %server, message_len = message_bytes.len(), "TCP query sent");

        let response_bytes = within(
            config.read_timeout(),
            server,
            read_with_length_prefix(&mut stream),
        )
        .await?
        .ok_or_else(|| DomainError::TransportConnectionReset {
            server: server.to_string(),
        })?;

        validate_response_id(message_bytes, &response_bytes, server)?;

        debug!(server = %server, response_len = response_bytes.len(), "TCP response received");

        Ok(TransportResponse {
            bytes: response_bytes,
            protocol_used: "TCP",
        })
    }
}

pub(crate) async fn send_with_length_prefix<S>(
    stream: &mut S,
    message_bytes: &[u8],
) -> std::io::Result<()>
where
    S: AsyncWriteExt + Unpin,
{
    let length = u16::try_from(message_bytes.len()).map_err(|_| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("DNS message of {} bytes exceeds TCP framing", message_bytes.len()),
        )
    })?;

    stream.write_all(&length.to_be_bytes()).await?;
    stream.write_all(message_bytes).await?;
    stream.flush().await
}

/// Read one length-prefixed message. `None` means the peer closed the
/// connection cleanly on a message boundary.
pub(crate) async fn read_with_length_prefix<S>(stream: &mut S) -> std::io::Result<Option<Vec<u8>>>
where
    S: AsyncReadExt + Unpin,
{
    let mut len_buf = [0u8; 2];
    match stream.read_exact(&mut len_buf).await {
        Ok(_) => {}
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(e),
    }

    let response_len = u16::from_be_bytes(len_buf) as usize;
    let mut response = vec![0u8; response_len];
    stream.read_exact(&mut response).await?;

    Ok(Some(response))
}

//! UDP Transport for DNS queries (RFC 1035 §4.2.1)
//!
//! Standard DNS transport. Messages are sent as-is (no framing).
//! If the response has the TC (truncated) bit set, the caller should retry via TCP.

use super::{validate_response_id, within, DnsTransport, TransportResponse};
use async_trait::async_trait;
use axfr_sweep_domain::{ClientConfig, DomainError};
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use tokio::net::UdpSocket;
use tracing::{debug, warn};

/// Maximum UDP DNS response size with EDNS(0)
const MAX_UDP_RESPONSE_SIZE: usize = 4096;

/// DNS over UDP transport
pub struct UdpTransport {
    server_addr: SocketAddr,
}

impl UdpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }

    fn bind_addr(&self) -> SocketAddr {
        if self.server_addr.is_ipv4() {
            SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0))
        } else {
            SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0))
        }
    }
}

#[async_trait]
impl DnsTransport for UdpTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        config: &ClientConfig,
    ) -> Result<TransportResponse, DomainError> {
        let server = self.server_addr;

        // Bind to ephemeral port (0 = OS assigns)
        let socket = within(config.dial_timeout(), server, UdpSocket::bind(self.bind_addr())).await?;

        let bytes_sent = within(
            config.write_timeout(),
            server,
            socket.send_to(message_bytes, server),
        )
        .await?;

        debug!(server = %server, bytes_sent = bytes_sent, "UDP query sent");

        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];

        let (bytes_received, from_addr) =
            within(config.read_timeout(), server, socket.recv_from(&mut recv_buf)).await?;

        if from_addr.ip() != server.ip() {
            warn!(
                expected = %server,
                received_from = %from_addr,
                "UDP response from unexpected source"
            );
        }

        recv_buf.truncate(bytes_received);
        validate_response_id(message_bytes, &recv_buf, server)?;

        debug!(server = %server, bytes_received = bytes_received, "UDP response received");

        Ok(TransportResponse {
            bytes: recv_buf,
            protocol_used: "UDP",
        })
    }
}

#[cfg(test)]
#[path = "udp_test.rs"]
mod tests;

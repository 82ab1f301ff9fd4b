use super::axfr::AxfrStream;
use super::transport::{DnsTransport, TcpTransport, UdpTransport};
use super::wire::{DnsResponse, MessageBuilder, ResponseParser};
use async_trait::async_trait;
use axfr_sweep_application::ports::{DnsClient, ZoneTransferStream};
use axfr_sweep_domain::{ClientConfig, DnsQuery, DomainError, QueryTarget};
use hickory_proto::rr::Record;
use std::net::SocketAddr;
use tracing::debug;

/// A parsed response and the transport that finally carried it.
#[derive(Debug)]
pub struct Exchange {
    pub response: DnsResponse,

    pub protocol_used: &'static str,
}

/// `DnsClient` adapter built on `hickory-proto` wire messages and plain tokio
/// sockets.
pub struct HickoryDnsClient {
    config: ClientConfig,
}

impl HickoryDnsClient {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    /// Resolve a `host:port` nameserver to the first address the system
    /// resolver returns.
    pub async fn resolve(nameserver: &str) -> Result<SocketAddr, DomainError> {
        let mut addrs = tokio::net::lookup_host(nameserver).await.map_err(|e| {
            DomainError::InvalidNameserver(format!("Cannot resolve '{}': {}", nameserver, e))
        })?;

        addrs.next().ok_or_else(|| {
            DomainError::InvalidNameserver(format!("'{}' resolved to no addresses", nameserver))
        })
    }

    /// Send `query` to `server` over UDP, repeating it over TCP when the UDP
    /// answer comes back truncated.
    pub async fn exchange_with(
        &self,
        server: SocketAddr,
        query: &DnsQuery,
    ) -> Result<Exchange, DomainError> {
        let (_, request) = MessageBuilder::build_query(&query.domain, query.record_type)?;

        let udp = UdpTransport::new(server).send(&request, &self.config).await?;
        let response = ResponseParser::parse(&udp.bytes)?;
        if !response.truncated {
            return Ok(Exchange {
                response,
                protocol_used: udp.protocol_used,
            });
        }

        debug!(
            server = %server,
            domain = %query.domain,
            record_type = %query.record_type,
            "Truncated UDP response, retrying over TCP"
        );

        let tcp = TcpTransport::new(server).send(&request, &self.config).await?;
        Ok(Exchange {
            response: ResponseParser::parse(&tcp.bytes)?,
            protocol_used: tcp.protocol_used,
        })
    }
}

#[async_trait]
impl DnsClient for HickoryDnsClient {
    async fn exchange(&self, nameserver: &str, query: &DnsQuery) -> Result<Vec<Record>, DomainError> {
        let server = Self::resolve(nameserver).await?;
        let Exchange {
            response,
            protocol_used,
        } = self.exchange_with(server, query).await?;

        debug!(
            server = %server,
            domain = %query.domain,
            record_type = %query.record_type,
            protocol = protocol_used,
            rcode = ?response.rcode,
            answers = response.answers.len(),
            "Exchange completed"
        );

        Ok(response.answers)
    }

    async fn zone_transfer(&self, target: &QueryTarget) -> Result<ZoneTransferStream, DomainError> {
        let server = Self::resolve(target.nameserver()).await?;
        let axfr = AxfrStream::open(server, target.domain(), &self.config).await?;
        Ok(axfr.into_stream())
    }
}

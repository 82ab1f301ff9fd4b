//! Inbound zone transfer (RFC 5936) over a single TCP connection.
//!
//! The server answers with a sequence of messages whose answer sections, read
//! in order, start and end with the zone's SOA record. Each message becomes one
//! envelope on the stream.

use crate::dns::transport::tcp::{connect, read_with_length_prefix, send_with_length_prefix};
use crate::dns::transport::within;
use crate::dns::wire::{DnsResponse, MessageBuilder, ResponseParser};
use axfr_sweep_application::ports::ZoneTransferStream;
use axfr_sweep_domain::{ClientConfig, DomainError};
use futures::stream::{self, StreamExt};
use hickory_proto::rr::{Record, RecordType as HickoryRecordType};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpStream;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    AwaitingSoa,
    Streaming,
    Done,
}

/// Tracks where a transfer stands and decides what each received message means.
#[derive(Debug)]
pub struct AxfrTracker {
    query_id: u16,
    phase: Phase,
}

impl AxfrTracker {
    pub fn new(query_id: u16) -> Self {
        Self {
            query_id,
            phase: Phase::AwaitingSoa,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Done
    }

    /// Accept the next message of the transfer and return its answer records.
    ///
    /// Any error ends the transfer.
    pub fn accept(&mut self, response: DnsResponse) -> Result<Vec<Record>, DomainError> {
        let result = self.classify(response);
        if result.is_err() {
            self.phase = Phase::Done;
        }
        result
    }

    fn classify(&mut self, response: DnsResponse) -> Result<Vec<Record>, DomainError> {
        if response.id != self.query_id {
            return Err(DomainError::ResponseIdMismatch {
                expected: self.query_id,
                received: response.id,
            });
        }

        if self.phase == Phase::AwaitingSoa {
            if !response.is_success() {
                return Err(DomainError::ZoneTransferRefused {
                    rcode: ResponseParser::rcode_to_status(response.rcode).to_string(),
                });
            }
            if !starts_with_soa(&response.answers) {
                return Err(DomainError::ZoneTransferMissingSoa);
            }
            self.phase = Phase::Streaming;

            // A lone opening SOA: the rest of the zone follows in later messages.
            if response.answers.len() == 1 {
                return Ok(response.answers);
            }
        }

        if ends_with_soa(&response.answers) {
            self.phase = Phase::Done;
        }
        Ok(response.answers)
    }
}

fn is_soa(record: &Record) -> bool {
    record.record_type() == HickoryRecordType::SOA
}

fn starts_with_soa(answers: &[Record]) -> bool {
    answers.first().is_some_and(is_soa)
}

fn ends_with_soa(answers: &[Record]) -> bool {
    answers.last().is_some_and(is_soa)
}

/// An open zone transfer connection.
pub struct AxfrStream {
    stream: TcpStream,
    server: SocketAddr,
    read_timeout: Duration,
    tracker: AxfrTracker,
}

impl AxfrStream {
    /// Connect to `server` and send the AXFR request for `domain`.
    pub async fn open(
        server: SocketAddr,
        domain: &str,
        config: &ClientConfig,
    ) -> Result<Self, DomainError> {
        let (query_id, request) = MessageBuilder::build_axfr(domain)?;
        let mut stream = connect(server, config).await?;

        within(
            config.write_timeout(),
            server,
            send_with_length_prefix(&mut stream, &request),
        )
        .await?;

        debug!(server = %server, domain = domain, query_id = query_id, "AXFR request sent");

        Ok(Self {
            stream,
            server,
            read_timeout: config.read_timeout(),
            tracker: AxfrTracker::new(query_id),
        })
    }

    async fn next_envelope(&mut self) -> Option<Result<Vec<Record>, DomainError>> {
        if self.tracker.is_complete() {
            return None;
        }

        let frame = within(
            self.read_timeout,
            self.server,
            read_with_length_prefix(&mut self.stream),
        )
        .await;

        let envelope = match frame {
            Ok(Some(bytes)) => ResponseParser::parse(&bytes).and_then(|r| self.tracker.accept(r)),
            Ok(None) => Err(DomainError::ZoneTransferIncomplete),
            Err(e) => Err(e),
        };

        if envelope.is_err() {
            self.tracker.phase = Phase::Done;
        }

        if let Ok(records) = &envelope {
            debug!(
                server = %self.server,
                records = records.len(),
                complete = self.tracker.is_complete(),
                "AXFR envelope received"
            );
        }

        Some(envelope)
    }

    /// Turn the connection into a stream of envelopes. The stream ends after
    /// the closing SOA or right after the first error.
    pub fn into_stream(self) -> ZoneTransferStream {
        stream::unfold(self, |mut axfr| async move {
            let envelope = axfr.next_envelope().await?;
            Some((envelope, axfr))
        })
        .boxed()
    }
}

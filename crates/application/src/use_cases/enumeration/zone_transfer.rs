use crate::ports::DnsClient;
use axfr_sweep_domain::{DomainError, QueryTarget};
use futures::StreamExt;
use hickory_proto::rr::Record;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// A single AXFR attempt. All or nothing: any error discards what was
/// already received.
pub struct ZoneTransferUseCase {
    client: Arc<dyn DnsClient>,
}

impl ZoneTransferUseCase {
    pub fn new(client: Arc<dyn DnsClient>) -> Self {
        Self { client }
    }

    pub async fn execute(
        &self,
        target: &QueryTarget,
        cancel: &CancellationToken,
    ) -> Result<Vec<Record>, DomainError> {
        let mut stream = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(DomainError::Cancelled),
            opened = self.client.zone_transfer(target) => opened?,
        };

        let mut records = Vec::new();
        let mut envelopes = 0usize;

        loop {
            let envelope = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(DomainError::Cancelled),
                envelope = stream.next() => envelope,
            };

            match envelope {
                Some(Ok(batch)) => {
                    envelopes += 1;
                    records.extend(batch);
                }
                Some(Err(e)) => {
                    debug!(
                        domain = target.domain(),
                        nameserver = target.nameserver(),
                        envelopes = envelopes,
                        discarded = records.len(),
                        error = %e,
                        "Zone transfer aborted"
                    );
                    return Err(e);
                }
                None => break,
            }
        }

        debug!(
            domain = target.domain(),
            nameserver = target.nameserver(),
            envelopes = envelopes,
            records = records.len(),
            "Zone transfer complete"
        );

        Ok(records)
    }
}

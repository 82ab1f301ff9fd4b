use super::sweep::SweepRecordsUseCase;
use super::zone_transfer::ZoneTransferUseCase;
use axfr_sweep_domain::{DomainError, QueryTarget};
use hickory_proto::rr::Record;
use std::fmt;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumerationStrategy {
    ZoneTransfer,
    Sweep,
}

impl EnumerationStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ZoneTransfer => "zone-transfer",
            Self::Sweep => "sweep",
        }
    }
}

impl fmt::Display for EnumerationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Records found for a target and the strategy that found them.
#[derive(Debug, Clone)]
pub struct Enumeration {
    pub strategy: EnumerationStrategy,
    pub records: Vec<Record>,
}

/// Tries a zone transfer first and sweeps record types only if it fails.
pub struct EnumerateRecordsUseCase {
    zone_transfer: Arc<ZoneTransferUseCase>,
    sweep: Arc<SweepRecordsUseCase>,
}

impl EnumerateRecordsUseCase {
    pub fn new(zone_transfer: Arc<ZoneTransferUseCase>, sweep: Arc<SweepRecordsUseCase>) -> Self {
        Self {
            zone_transfer,
            sweep,
        }
    }

    pub async fn execute(
        &self,
        target: &QueryTarget,
        cancel: &CancellationToken,
    ) -> Result<Enumeration, DomainError> {
        match self.zone_transfer.execute(target, cancel).await {
            Ok(records) => {
                info!(
                    domain = target.domain(),
                    records = records.len(),
                    "Zone transfer succeeded"
                );
                Ok(Enumeration {
                    strategy: EnumerationStrategy::ZoneTransfer,
                    records,
                })
            }
            Err(DomainError::Cancelled) => Err(DomainError::Cancelled),
            // Refusal, non-authority and unreachable servers all land here alike.
            Err(e) => {
                info!(
                    domain = target.domain(),
                    error = %e,
                    "Zone transfer unavailable, sweeping record types"
                );
                let records = self.sweep.execute(target, cancel).await?;
                Ok(Enumeration {
                    strategy: EnumerationStrategy::Sweep,
                    records,
                })
            }
        }
    }
}

use super::query_record::QueryRecordUseCase;
use axfr_sweep_domain::{DomainError, QueryTarget, RecordType};
use hickory_proto::rr::Record;
use std::sync::Arc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Queries every sweepable record type concurrently and unions the answers.
pub struct SweepRecordsUseCase {
    query: Arc<QueryRecordUseCase>,
}

impl SweepRecordsUseCase {
    pub fn new(query: Arc<QueryRecordUseCase>) -> Self {
        Self { query }
    }

    /// The record types one sweep queries, one task each.
    pub fn planned_types() -> Vec<RecordType> {
        RecordType::sweepable().collect()
    }

    pub async fn execute(
        &self,
        target: &QueryTarget,
        cancel: &CancellationToken,
    ) -> Result<Vec<Record>, DomainError> {
        let mut tasks = JoinSet::new();

        for record_type in RecordType::sweepable() {
            let query = Arc::clone(&self.query);
            let target = target.clone();
            let cancel = cancel.clone();

            tasks.spawn(async move {
                let result = query.execute(&target, record_type, &cancel).await;
                (record_type, result)
            });
        }

        let spawned = tasks.len();
        debug!(domain = target.domain(), tasks = spawned, "Sweep started");

        // Each task owns its answers; they are only merged here, after join.
        let mut records = Vec::new();
        let mut failed = 0usize;

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((record_type, Ok(answers))) => {
                    if !answers.is_empty() {
                        debug!(
                            record_type = %record_type,
                            answers = answers.len(),
                            "Sweep collected answers"
                        );
                    }
                    records.extend(answers);
                }
                Ok((_, Err(DomainError::Cancelled))) => {}
                Ok((record_type, Err(e))) => {
                    failed += 1;
                    warn!(record_type = %record_type, error = %e, "Record type skipped");
                }
                Err(e) => {
                    failed += 1;
                    error!(error = %e, "Sweep task aborted");
                }
            }
        }

        if cancel.is_cancelled() {
            return Err(DomainError::Cancelled);
        }

        info!(
            domain = target.domain(),
            nameserver = target.nameserver(),
            queried = spawned,
            failed = failed,
            records = records.len(),
            "Sweep finished"
        );

        Ok(records)
    }
}

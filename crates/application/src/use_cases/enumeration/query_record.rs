use crate::ports::DnsClient;
use axfr_sweep_domain::{DnsQuery, DomainError, QueryTarget, RecordType, RetryConfig};
use hickory_proto::rr::Record;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// When a failing record-type query stops being retried.
///
/// Retries are immediate: there is no backoff and no jitter. With no bound
/// set a query is retried until it succeeds or the run is cancelled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: Option<u32>,
    deadline: Option<Duration>,
}

impl RetryPolicy {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn from_config(config: &RetryConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            deadline: config.deadline(),
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    fn is_exhausted(&self, attempts: u32, elapsed: Duration) -> bool {
        self.max_attempts.is_some_and(|max| attempts >= max)
            || self.deadline.is_some_and(|deadline| elapsed >= deadline)
    }
}

/// Queries one record type for the target, retrying failed exchanges.
pub struct QueryRecordUseCase {
    client: Arc<dyn DnsClient>,
    policy: RetryPolicy,
}

impl QueryRecordUseCase {
    pub fn new(client: Arc<dyn DnsClient>) -> Self {
        Self {
            client,
            policy: RetryPolicy::unbounded(),
        }
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the answer records for `record_type`, possibly none.
    ///
    /// Under the unbounded policy the only error is `Cancelled`; a bounded
    /// policy can also end with `RetriesExhausted`.
    pub async fn execute(
        &self,
        target: &QueryTarget,
        record_type: RecordType,
        cancel: &CancellationToken,
    ) -> Result<Vec<Record>, DomainError> {
        let query = DnsQuery::for_target(target, record_type);
        let started = Instant::now();
        let mut attempts: u32 = 0;

        loop {
            attempts = attempts.saturating_add(1);

            let result = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(DomainError::Cancelled),
                result = self.client.exchange(target.nameserver(), &query) => result,
            };

            let error = match result {
                Ok(answers) => {
                    debug!(
                        record_type = %record_type,
                        answers = answers.len(),
                        attempts = attempts,
                        "Record query answered"
                    );
                    return Ok(answers);
                }
                Err(e) => e,
            };

            if self.policy.is_exhausted(attempts, started.elapsed()) {
                debug!(
                    record_type = %record_type,
                    attempts = attempts,
                    error = %error,
                    "Record query retries exhausted"
                );
                return Err(DomainError::RetriesExhausted {
                    record_type,
                    attempts,
                    last_error: error.to_string(),
                });
            }

            debug!(
                record_type = %record_type,
                attempt = attempts,
                error = %error,
                "Record query failed, retrying"
            );

            // A client that fails without ever suspending must not pin the worker.
            tokio::task::yield_now().await;
        }
    }
}

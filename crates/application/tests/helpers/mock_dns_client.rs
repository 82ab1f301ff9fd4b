use async_trait::async_trait;
use axfr_sweep_application::ports::{DnsClient, ZoneTransferStream};
use axfr_sweep_domain::{DnsQuery, DomainError, QueryTarget, RecordType};
use futures::StreamExt;
use hickory_proto::rr::Record;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock};

/// What the mock answers to a zone transfer request.
#[derive(Clone)]
pub enum ZoneTransferScript {
    /// The transfer cannot be requested at all.
    OpenError(DomainError),
    /// The transfer opens and yields these envelopes in order.
    Envelopes(Vec<Result<Vec<Record>, DomainError>>),
}

#[derive(Clone)]
pub struct MockDnsClient {
    answers: Arc<RwLock<HashMap<RecordType, Vec<Record>>>>,
    failures_remaining: Arc<Mutex<HashMap<RecordType, u32>>>,
    always_failing: Arc<RwLock<HashSet<RecordType>>>,
    hanging: Arc<RwLock<HashSet<RecordType>>>,
    zone_transfer: Arc<Mutex<ZoneTransferScript>>,
    exchange_calls: Arc<Mutex<Vec<RecordType>>>,
    zone_transfer_calls: Arc<AtomicUsize>,
}

impl MockDnsClient {
    pub fn new() -> Self {
        Self {
            answers: Arc::new(RwLock::new(HashMap::new())),
            failures_remaining: Arc::new(Mutex::new(HashMap::new())),
            always_failing: Arc::new(RwLock::new(HashSet::new())),
            hanging: Arc::new(RwLock::new(HashSet::new())),
            zone_transfer: Arc::new(Mutex::new(ZoneTransferScript::OpenError(
                DomainError::ZoneTransferRefused {
                    rcode: "Refused".to_string(),
                },
            ))),
            exchange_calls: Arc::new(Mutex::new(Vec::new())),
            zone_transfer_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn set_answers(&self, record_type: RecordType, records: Vec<Record>) {
        self.answers.write().unwrap().insert(record_type, records);
    }

    pub fn fail_times(&self, record_type: RecordType, times: u32) {
        self.failures_remaining
            .lock()
            .unwrap()
            .insert(record_type, times);
    }

    pub fn fail_always(&self, record_type: RecordType) {
        self.always_failing.write().unwrap().insert(record_type);
    }

    pub fn hang(&self, record_type: RecordType) {
        self.hanging.write().unwrap().insert(record_type);
    }

    pub fn set_zone_transfer(&self, script: ZoneTransferScript) {
        *self.zone_transfer.lock().unwrap() = script;
    }

    pub fn exchange_calls(&self) -> Vec<RecordType> {
        self.exchange_calls.lock().unwrap().clone()
    }

    pub fn exchange_count(&self, record_type: RecordType) -> usize {
        self.exchange_calls
            .lock()
            .unwrap()
            .iter()
            .filter(|rt| **rt == record_type)
            .count()
    }

    pub fn zone_transfer_calls(&self) -> usize {
        self.zone_transfer_calls.load(Ordering::SeqCst)
    }
}

impl Default for MockDnsClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DnsClient for MockDnsClient {
    async fn exchange(&self, nameserver: &str, query: &DnsQuery) -> Result<Vec<Record>, DomainError> {
        let record_type = query.record_type;
        self.exchange_calls.lock().unwrap().push(record_type);

        let hangs = self.hanging.read().unwrap().contains(&record_type);
        if hangs {
            std::future::pending::<()>().await;
        }

        if self.always_failing.read().unwrap().contains(&record_type) {
            return Err(DomainError::TransportTimeout {
                server: nameserver.to_string(),
            });
        }

        let should_fail = {
            let mut remaining = self.failures_remaining.lock().unwrap();
            match remaining.get_mut(&record_type) {
                Some(count) if *count > 0 => {
                    *count -= 1;
                    true
                }
                _ => false,
            }
        };
        if should_fail {
            return Err(DomainError::TransportConnectionRefused {
                server: nameserver.to_string(),
            });
        }

        Ok(self
            .answers
            .read()
            .unwrap()
            .get(&record_type)
            .cloned()
            .unwrap_or_default())
    }

    async fn zone_transfer(&self, _target: &QueryTarget) -> Result<ZoneTransferStream, DomainError> {
        self.zone_transfer_calls.fetch_add(1, Ordering::SeqCst);

        let script = self.zone_transfer.lock().unwrap().clone();
        match script {
            ZoneTransferScript::OpenError(e) => Err(e),
            ZoneTransferScript::Envelopes(envelopes) => Ok(futures::stream::iter(envelopes).boxed()),
        }
    }
}

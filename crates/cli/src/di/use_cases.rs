use super::DnsServices;
use axfr_sweep_application::use_cases::{
    EnumerateRecordsUseCase, QueryRecordUseCase, RetryPolicy, SweepRecordsUseCase,
    ZoneTransferUseCase,
};
use axfr_sweep_domain::Config;
use std::sync::Arc;

pub struct UseCases {
    pub enumerate: Arc<EnumerateRecordsUseCase>,
}

impl UseCases {
    pub fn new(config: &Config) -> Self {
        let dns = DnsServices::new(config);

        let query = Arc::new(
            QueryRecordUseCase::new(dns.client.clone())
                .with_retry_policy(RetryPolicy::from_config(&config.retry)),
        );
        let sweep = Arc::new(SweepRecordsUseCase::new(query));
        let zone_transfer = Arc::new(ZoneTransferUseCase::new(dns.client));

        Self {
            enumerate: Arc::new(EnumerateRecordsUseCase::new(zone_transfer, sweep)),
        }
    }
}

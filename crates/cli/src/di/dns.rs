use axfr_sweep_application::ports::DnsClient;
use axfr_sweep_domain::Config;
use axfr_sweep_infrastructure::dns::HickoryDnsClient;
use std::sync::Arc;

pub struct DnsServices {
    pub client: Arc<dyn DnsClient>,
}

impl DnsServices {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Arc::new(HickoryDnsClient::new(config.client)),
        }
    }
}

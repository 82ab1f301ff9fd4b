use axfr_sweep_domain::{CliOverrides, Config};
use tracing::info;

pub fn load_config(
    config_path: Option<&str>,
    cli_overrides: CliOverrides,
) -> anyhow::Result<Config> {
    let config = Config::load(config_path, cli_overrides)?;
    config.validate()?;
    Ok(config)
}

/// Report the effective configuration. Call once logging is initialised.
pub fn log_config(config: &Config, config_path: Option<&str>) {
    info!(
        config_file = config_path.unwrap_or("default"),
        timeout_secs = config.client.read_timeout_secs,
        retry = if config.retry.is_unbounded() { "unbounded" } else { "bounded" },
        max_attempts = ?config.retry.max_attempts,
        retry_deadline_secs = ?config.retry.deadline_secs,
        "Configuration loaded"
    );
}

use anyhow::Context;
use axfr_sweep_domain::{CliOverrides, DomainError, QueryTarget};
use clap::{CommandFactory, Parser};
use std::ffi::OsString;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

mod bootstrap;
mod di;
mod output;

#[derive(Parser, Debug)]
#[command(name = "axfr-sweep")]
#[command(version = "0.1.0")]
#[command(about = "Enumerate a domain's DNS records: zone transfer first, per-type sweep otherwise")]
struct Cli {
    /// Domain to enumerate
    #[arg(short = 'd', long)]
    domain: Option<String>,

    /// Nameserver to ask, as host[:port]
    #[arg(long = "ns", value_name = "NAMESERVER", default_value = "8.8.8.8:53")]
    ns: String,

    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Dial, read and write timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Give up on a record type after this many attempts
    #[arg(long, value_name = "N")]
    max_attempts: Option<u32>,

    /// Give up on a record type after retrying for this long
    #[arg(long, value_name = "SECS")]
    retry_deadline: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    /// The domain to enumerate, if one was given and is not blank.
    fn requested_domain(&self) -> Option<&str> {
        self.domain
            .as_deref()
            .map(str::trim)
            .filter(|domain| !domain.is_empty())
    }
}

/// Accept the single-dash `-ns` spelling by rewriting it to `--ns`.
fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| match arg.to_str() {
            Some("-ns") => OsString::from("--ns"),
            Some(s) if s.starts_with("-ns=") => OsString::from(format!("-{}", s)),
            _ => arg,
        })
        .collect()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_from(normalize_args(std::env::args_os()));

    let Some(domain) = cli.requested_domain() else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let cli_overrides = CliOverrides {
        timeout_secs: cli.timeout,
        max_attempts: cli.max_attempts,
        retry_deadline_secs: cli.retry_deadline,
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);
    bootstrap::log_config(&config, cli.config.as_deref());

    let target = QueryTarget::new(domain, &cli.ns).context("Invalid query target")?;

    let use_cases = di::UseCases::new(&config);

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, cancelling");
            ctrl_c.cancel();
        }
    });

    match use_cases.enumerate.execute(&target, &cancel).await {
        Ok(enumeration) => {
            info!(
                domain = target.domain(),
                nameserver = target.nameserver(),
                strategy = %enumeration.strategy,
                records = enumeration.records.len(),
                "Enumeration finished"
            );
            output::print_records(std::io::stdout().lock(), &enumeration.records)
                .context("Failed to write records")?;
        }
        Err(DomainError::Cancelled) => {
            info!("Enumeration cancelled");
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}

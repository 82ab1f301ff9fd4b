pub mod client;
pub mod errors;
pub mod logging;
pub mod retry;
pub mod root;

pub use client::ClientConfig;
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use retry::RetryConfig;
pub use root::{CliOverrides, Config};

pub mod axfr;
pub mod client;
pub mod transport;
pub mod wire;

pub use axfr::AxfrStream;
pub use client::{Exchange, HickoryDnsClient};

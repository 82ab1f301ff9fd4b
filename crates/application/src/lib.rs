//! axfr-sweep application layer: the DNS client port and the enumeration
//! use cases built on top of it.
pub mod ports;
pub mod use_cases;

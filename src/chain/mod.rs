//! Chain configuration

mod config;

pub use config::{ChainAddresses, ChainConfig};

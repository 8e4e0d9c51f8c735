pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::config::{cli::CliConfig, OracleConfig};
pub use crate::core::{dispatcher::Dispatcher, registry::VerifierRegistry, server::OracleServer};
pub use crate::utils::error::{OracleError, Result, VerificationError};

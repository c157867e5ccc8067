//! Resize a single Hetzner Cloud server by changing its server type.
//!
//! The binary resolves a [`models::RescaleRequest`] from an INI file plus
//! command-line overrides ([`config`]) and hands it to the API client
//! ([`api::HetznerClient`]), which issues exactly one change-type call.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod output;

pub use error::{ConfigurationError, Error, ProviderError};
pub use models::RescaleRequest;

//! Shared types, configuration, and response extraction for TrendBurst services.

pub mod analysis;
pub mod config;
pub mod error;
pub mod extract;
pub mod logging;

pub use error::{Error, Result};

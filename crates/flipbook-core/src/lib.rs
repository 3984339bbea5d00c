//! Flipbook Core: shared error type and configuration.

pub mod config;
pub mod error;

pub use config::{DataPaths, FlipbookConfig};
pub use error::{Error, Result};

//! Flipbook Store: SQLite persistence for brochures.

pub mod schema;
pub mod sqlite;
pub mod types;

pub use sqlite::BrochureStore;
pub use types::*;

//! Configuration and data directory management.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{Error, Result};

pub const DEFAULT_PORT: u16 = 3000;

/// Paths to all Flipbook data directories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataPaths {
    /// Root data directory (e.g., `data/`).
    pub root: PathBuf,
    /// Database directory (`data/db/`).
    pub db: PathBuf,
    /// AI capability configuration (`data/ai-config.json`).
    pub ai_config_file: PathBuf,
}

impl DataPaths {
    /// Create data paths from a root directory. Creates directories if needed.
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        let paths = Self {
            db: root.join("db"),
            ai_config_file: root.join("ai-config.json"),
            root,
        };
        paths.ensure_dirs()?;
        Ok(paths)
    }

    fn ensure_dirs(&self) -> Result<()> {
        std::fs::create_dir_all(&self.root)?;
        std::fs::create_dir_all(&self.db)?;
        Ok(())
    }
}

/// Top-level server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlipbookConfig {
    /// HTTP server port.
    pub port: u16,
    /// Data directory paths.
    pub data_paths: DataPaths,
}

impl FlipbookConfig {
    /// Create configuration from environment and defaults.
    ///
    /// An unset `PORT` falls back to [`DEFAULT_PORT`]; a malformed one is an error.
    pub fn from_env(data_dir: impl AsRef<Path>) -> Result<Self> {
        let port = parse_port(std::env::var("PORT").ok().as_deref())?;
        let data_paths = DataPaths::new(data_dir)?;
        debug!("Resolved port {} and data root {}", port, data_paths.root.display());

        Ok(Self { port, data_paths })
    }
}

fn parse_port(raw: Option<&str>) -> Result<u16> {
    match raw.map(str::trim).filter(|p| !p.is_empty()) {
        None => Ok(DEFAULT_PORT),
        Some(p) => p
            .parse()
            .map_err(|_| Error::Config(format!("PORT must be a port number, got {:?}", p))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_paths_created() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("data");
        let paths = DataPaths::new(&root).unwrap();

        assert!(paths.db.is_dir());
        assert_eq!(paths.ai_config_file, root.join("ai-config.json"));
    }

    #[test]
    fn test_parse_port() {
        assert_eq!(parse_port(None).unwrap(), DEFAULT_PORT);
        assert_eq!(parse_port(Some("  ")).unwrap(), DEFAULT_PORT);
        assert_eq!(parse_port(Some("8080")).unwrap(), 8080);
        assert!(matches!(parse_port(Some("not-a-port")), Err(Error::Config(_))));
        assert!(matches!(parse_port(Some("70000")), Err(Error::Config(_))));
    }
}

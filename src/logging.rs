use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::Result;

pub const LOG_ENV: &str = "SWIPEWORD_LOG";

/// Sends tracing output to `path`. The terminal belongs to the game, so
/// nothing is ever logged to stdout or stderr.
///
/// The filter comes from `SWIPEWORD_LOG`, defaulting to `info`.
pub fn init_file_logging(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    // a second init (tests, reentry) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn creates_log_file_and_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state").join("swipeword.log");

        init_file_logging(&path).unwrap();
        assert!(path.exists());
    }
}

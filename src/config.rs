use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::gesture::{SwipeThresholds, DEFAULT_MIN_DISTANCE, DEFAULT_MIN_VELOCITY};
use crate::round::Rules;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub swipe_distance: u16,
    pub swipe_velocity: f64,
    pub reset_timer_per_word: bool,
    pub word_list: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            swipe_distance: DEFAULT_MIN_DISTANCE,
            swipe_velocity: DEFAULT_MIN_VELOCITY,
            reset_timer_per_word: false,
            word_list: None,
        }
    }
}

impl Config {
    pub fn thresholds(&self) -> SwipeThresholds {
        SwipeThresholds {
            min_distance: self.swipe_distance.max(1),
            min_velocity: self.swipe_velocity,
        }
    }

    pub fn rules(&self) -> Rules {
        Rules {
            reset_timer_per_word: self.reset_timer_per_word,
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "swipeword") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("swipeword_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        if let Ok(bytes) = fs::read(&self.path) {
            match serde_json::from_slice::<Config>(&bytes) {
                Ok(cfg) => return cfg,
                Err(err) => {
                    tracing::warn!(path = %self.path.display(), %err, "ignoring malformed config")
                }
            }
        }
        Config::default()
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn roundtrip_default_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config::default();
        store.save(&cfg).unwrap();
        let loaded = store.load();
        assert_eq!(cfg, loaded);
    }

    #[test]
    fn save_and_load_custom_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config {
            swipe_distance: 10,
            swipe_velocity: 25.5,
            reset_timer_per_word: true,
            word_list: Some(PathBuf::from("/tmp/office.txt")),
        };
        store.save(&cfg).unwrap();
        let loaded = store.load();
        assert_eq!(cfg, loaded);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("nope.json"));
        assert_eq!(store.load(), Config::default());
    }

    #[test]
    fn malformed_file_loads_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ swipe_distance: ").unwrap();
        assert_eq!(FileConfigStore::with_path(&path).load(), Config::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "reset_timer_per_word": true }"#).unwrap();

        let cfg = FileConfigStore::with_path(&path).load();
        assert!(cfg.reset_timer_per_word);
        assert_eq!(cfg.swipe_distance, DEFAULT_MIN_DISTANCE);
        assert!(cfg.rules().reset_timer_per_word);
    }

    #[test]
    fn zero_distance_is_clamped() {
        let cfg = Config {
            swipe_distance: 0,
            ..Config::default()
        };
        assert_eq!(cfg.thresholds().min_distance, 1);
    }
}

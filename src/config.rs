//! Configuration loaded from `bacon.toml`.
//!
//! Every section is optional. A missing file yields the defaults, and
//! relative data paths resolve against the directory holding the file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{BaconError, Result};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaconConfig {
    pub data: DataConfig,
    pub game: GameConfig,
    pub logging: LoggingConfig,
}

/// Locations of the three pipe-delimited input files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// `<id>|<actor name>` lines.
    pub actors: PathBuf,
    /// `<id>|<movie title>` lines.
    pub movies: PathBuf,
    /// `<movie id>|<actor id>` lines.
    pub movie_actors: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            actors: PathBuf::from("data/actors.txt"),
            movies: PathBuf::from("data/movies.txt"),
            movie_actors: PathBuf::from("data/movie-actors.txt"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Root actor used when none is given on the command line.
    pub default_root: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, overridden by `RUST_LOG`.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "warn".to_string(),
        }
    }
}

impl BaconConfig {
    /// Load the config at `path`, falling back to defaults when the file is
    /// absent or cannot be parsed.
    pub fn load(path: &Path) -> Self {
        Self::try_load(path).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "invalid config, using defaults");
            Self::default()
        })
    }

    /// Load the config at `path`. A missing file gives the defaults; a file
    /// that cannot be read or parsed is a `Config` error, so the caller
    /// decides when to report it.
    pub fn try_load(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(BaconError::Config(format!("{}: {}", path.display(), e)));
            }
        };

        let config: Self = toml::from_str(&content)
            .map_err(|e| BaconError::Config(format!("{}: {}", path.display(), e)))?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Ok(config.resolve_paths(base))
    }

    /// Parse a config from TOML text. Paths are left as written.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Make relative data paths relative to `base`.
    pub fn resolve_paths(mut self, base: &Path) -> Self {
        for path in [
            &mut self.data.actors,
            &mut self.data.movies,
            &mut self.data.movie_actors,
        ] {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = BaconConfig::from_toml_str("").unwrap();
        assert_eq!(config, BaconConfig::default());
        assert_eq!(config.logging.filter, "warn");
        assert!(config.game.default_root.is_none());
    }

    #[test]
    fn test_partial_toml() {
        let config = BaconConfig::from_toml_str(
            r#"
[data]
actors = "files/actors-small.txt"

[game]
default_root = "Kevin Bacon"
"#,
        )
        .unwrap();

        assert_eq!(config.data.actors, PathBuf::from("files/actors-small.txt"));
        assert_eq!(config.data.movies, PathBuf::from("data/movies.txt"));
        assert_eq!(config.game.default_root.as_deref(), Some("Kevin Bacon"));
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let result = BaconConfig::from_toml_str("[data\nactors = ");
        assert!(matches!(result, Err(crate::BaconError::Config(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = BaconConfig::load(&dir.path().join("bacon.toml"));
        assert_eq!(config, BaconConfig::default());
    }

    #[test]
    fn test_load_resolves_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bacon.toml");
        fs::write(
            &path,
            "[data]\nactors = \"a.txt\"\nmovies = \"/abs/movies.txt\"\n",
        )
        .unwrap();

        let config = BaconConfig::load(&path);
        assert_eq!(config.data.actors, dir.path().join("a.txt"));
        assert_eq!(config.data.movies, PathBuf::from("/abs/movies.txt"));
        assert_eq!(
            config.data.movie_actors,
            dir.path().join("data/movie-actors.txt")
        );
    }

    #[test]
    fn test_load_garbage_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bacon.toml");
        fs::write(&path, "this is = = not toml").unwrap();
        assert_eq!(BaconConfig::load(&path), BaconConfig::default());
    }

    #[test]
    fn test_try_load_reports_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bacon.toml");
        fs::write(&path, "this is = = not toml").unwrap();

        match BaconConfig::try_load(&path) {
            Err(BaconError::Config(message)) => {
                assert!(message.contains("bacon.toml"), "{message}");
            }
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn test_try_load_missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = BaconConfig::try_load(&dir.path().join("bacon.toml")).unwrap();
        assert_eq!(config, BaconConfig::default());
    }
}

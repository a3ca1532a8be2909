//! CLI module for the Bacon game.
//!
//! Commands:
//! - play: interactive shell (default)
//! - stats: graph statistics
//! - levels: actors per degree of separation from the root
//! - number: one actor's Bacon number and path

pub mod shell;

pub use shell::{Command, Shell};

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::BaconConfig;
use crate::loader::DataFiles;

#[derive(Parser, Debug)]
#[command(name = "bacon")]
#[command(about = "Degrees of separation between actors via shared movies")]
pub struct Cli {
    /// Config file (optional; defaults apply when missing)
    #[arg(short, long, default_value = "bacon.toml")]
    pub config: PathBuf,

    /// Actor file: `<id>|<name>` lines
    #[arg(long)]
    pub actors: Option<PathBuf>,

    /// Movie file: `<id>|<title>` lines
    #[arg(long)]
    pub movies: Option<PathBuf>,

    /// Movie-actor file: `<movie id>|<actor id>` lines
    #[arg(long)]
    pub movie_actors: Option<PathBuf>,

    /// Root actor (skips the opening prompt)
    #[arg(short, long)]
    pub root: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Play the interactive game
    Play,

    /// Show graph statistics
    Stats,

    /// Show how many actors sit at each distance from --root
    Levels,

    /// Show an actor's number relative to --root, with the connecting movies
    Number {
        /// Actor name
        actor: String,
    },
}

impl Cli {
    /// Data file paths: command-line flags over config values.
    pub fn data_files(&self, config: &BaconConfig) -> DataFiles {
        let mut files = DataFiles::from(&config.data);
        if let Some(path) = &self.actors {
            files.actors = path.clone();
        }
        if let Some(path) = &self.movies {
            files.movies = path.clone();
        }
        if let Some(path) = &self.movie_actors {
            files.movie_actors = path.clone();
        }
        files
    }

    /// Root actor: `--root` over the configured default.
    pub fn root_actor<'a>(&'a self, config: &'a BaconConfig) -> Option<&'a str> {
        self.root
            .as_deref()
            .or(config.game.default_root.as_deref())
    }

    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Play)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_play() {
        let cli = Cli::try_parse_from(["bacon"]).unwrap();
        assert_eq!(cli.command(), Commands::Play);
        assert_eq!(cli.config, PathBuf::from("bacon.toml"));
        assert!(cli.root.is_none());
    }

    #[test]
    fn test_number_subcommand() {
        let cli = Cli::try_parse_from(["bacon", "-r", "Kevin Bacon", "number", "Tom Hanks"]).unwrap();
        assert_eq!(cli.root.as_deref(), Some("Kevin Bacon"));
        assert_eq!(
            cli.command(),
            Commands::Number {
                actor: "Tom Hanks".to_string()
            }
        );
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from(["bacon", "--actors", "small/actors.txt"]).unwrap();
        let config = BaconConfig::default();
        let files = cli.data_files(&config);

        assert_eq!(files.actors, PathBuf::from("small/actors.txt"));
        assert_eq!(files.movies, config.data.movies);
        assert_eq!(files.movie_actors, config.data.movie_actors);
    }

    #[test]
    fn test_root_falls_back_to_config() {
        let mut config = BaconConfig::default();
        config.game.default_root = Some("Kevin Bacon".to_string());

        let cli = Cli::try_parse_from(["bacon"]).unwrap();
        assert_eq!(cli.root_actor(&config), Some("Kevin Bacon"));

        let cli = Cli::try_parse_from(["bacon", "--root", "Meryl Streep"]).unwrap();
        assert_eq!(cli.root_actor(&config), Some("Meryl Streep"));
    }
}

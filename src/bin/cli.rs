//! Bacon CLI - degrees of separation between actors.
//!
//! Usage:
//!   bacon                               # Interactive game
//!   bacon -r "Kevin Bacon"              # Interactive game, root preset
//!   bacon stats                         # Graph statistics
//!   bacon -r "Kevin Bacon" levels       # Actors per distance
//!   bacon -r "Kevin Bacon" number NAME  # One actor's number and path

use anyhow::{Context, Result};
use bacon::cli::{Cli, Commands, Shell};
use bacon::{build_graph_from_files, BaconConfig, BaconSession};
use clap::Parser;
use serde_json::json;
use std::io;
use tracing::{info, warn};

fn main() {
    let cli = Cli::parse();
    let (config, config_error) = match BaconConfig::try_load(&cli.config) {
        Ok(config) => (config, None),
        Err(e) => (BaconConfig::default(), Some(e)),
    };

    // Logs go to stderr; stdout belongs to the game.
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.filter)),
        )
        .init();

    if let Some(e) = config_error {
        warn!(error = %e, "invalid config, using defaults");
    }

    if let Err(e) = run(cli, config) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli, config: BaconConfig) -> Result<()> {
    let files = cli.data_files(&config);
    info!(
        actors = %files.actors.display(),
        movies = %files.movies.display(),
        movie_actors = %files.movie_actors.display(),
        "loading movie database"
    );
    let graph = build_graph_from_files(&files).context("failed to load the movie database")?;
    let root = cli.root_actor(&config);

    match cli.command() {
        Commands::Play => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            Shell::new(&graph, stdin.lock(), stdout.lock()).run(root)?;
        }

        Commands::Stats => {
            let json = serde_json::to_string_pretty(&graph.stats())
                .context("failed to serialize graph stats")?;
            println!("{}", json);
        }

        Commands::Levels => {
            let root = root.context("--root is required for levels")?;
            let session = BaconSession::new(&graph, root)?;
            let report = json!({
                "root": session.root(),
                "max_distance": session.max_distance(),
                "average_distance": session.average_distance().ok(),
                "levels": session.distances().summary(),
            });
            let json =
                serde_json::to_string_pretty(&report).context("failed to serialize levels")?;
            println!("{}", json);
        }

        Commands::Number { actor } => {
            let root = root.context("--root is required for number")?;
            let session = BaconSession::new(&graph, root)?;
            let result = session.bacon_number(&graph, &actor)?;
            let json = serde_json::to_string_pretty(&result)
                .context("failed to serialize bacon number")?;
            println!("{}", json);
        }
    }

    Ok(())
}

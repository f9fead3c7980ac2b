//! GeoQuiz CLI - find capital cities on a terminal world map.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod cli;

use clap::{Parser, Subcommand};
use geoquiz::Difficulty;
use std::path::PathBuf;
use std::process::ExitCode;

/// GeoQuiz - a capital city geography quiz
#[derive(Parser, Debug)]
#[command(name = "geoquiz")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play a ten-round session
    Play {
        /// Player name (new names are registered with 0 points)
        #[arg(short, long)]
        player: String,

        /// Continent to draw capitals from (repeatable)
        #[arg(short, long = "continent", default_value = "Europe")]
        continents: Vec<String>,

        /// Hit threshold in km: 250, 500 or 1000
        #[arg(short, long, default_value = "500", value_parser = cli::parse_difficulty)]
        difficulty: Difficulty,

        /// Capital catalog JSON file (default: built-in catalog)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Score file
        #[arg(long, default_value = "scores.json")]
        scores: PathBuf,

        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Read "lat lon" lines from stdin instead of opening the map
        #[arg(long)]
        plain: bool,

        /// Report format for --plain: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },

    /// List the continents of the catalog
    Continents {
        /// Capital catalog JSON file (default: built-in catalog)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// List the capitals of the selected continents
    Capitals {
        /// Continent to list (repeatable, default: all)
        #[arg(short, long = "continent")]
        continents: Vec<String>,

        /// Capital catalog JSON file (default: built-in catalog)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },

    /// Show or manage players
    Players {
        /// Score file
        #[arg(long, default_value = "scores.json")]
        scores: PathBuf,

        #[command(subcommand)]
        action: Option<cli::players::PlayerAction>,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    let result = match args.command {
        Commands::Play {
            player,
            continents,
            difficulty,
            catalog,
            scores,
            seed,
            plain,
            format,
        } => cli::play::execute(cli::play::PlayOptions {
            player,
            continents,
            difficulty,
            catalog,
            scores,
            seed,
            plain,
            format,
        }),

        Commands::Continents { catalog } => cli::catalog::continents(catalog),

        Commands::Capitals {
            continents,
            catalog,
            format,
        } => cli::catalog::capitals(continents, catalog, format),

        Commands::Players { scores, action } => cli::players::execute(scores, action),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

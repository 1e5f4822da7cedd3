//! # platnav CLI Module
//!
//! ## Available Commands
//!
//! - `map` - Build or extend the map from position traces
//! - `status` - Show map and graph metrics
//! - `graph` - Dump the navigation graph
//! - `locate` - Find the platform under a position
//! - `walk` - Replay seeded exploration from a position
//! - `export` - Write the map as JSON

mod commands;

use clap::{Parser, Subcommand};
use platnav_core::{NavError, Rect};
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// platnav - platform layout mapping and exploration
///
/// Infers platforms and ladders from recorded positions, derives how they
/// connect, and replays exploration over the result.
#[derive(Parser, Debug)]
#[command(name = "platnav")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the map file
    #[arg(short = 'm', long, global = true, default_value = "mapdata.pnav")]
    pub map: PathBuf,

    /// TOML file with terrain tuning overrides
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the map from recorded traces
    Map {
        /// Trace sampled on ordinary terrain (JSON pairs or `x,y` lines)
        #[arg(short, long)]
        trace: PathBuf,

        /// Trace sampled on one-way platforms
        #[arg(short, long)]
        oneway_trace: Option<PathBuf>,

        /// Minimap bounding box as `x,y,width,height`
        #[arg(long, value_parser = parse_minimap)]
        minimap: Option<Rect>,

        /// Extend the existing map instead of replacing it
        #[arg(short, long)]
        append: bool,
    },

    /// Show map and graph metrics
    Status,

    /// Dump platforms and their outgoing edges
    Graph,

    /// Find the platform under a position
    Locate {
        #[arg(short, long, allow_negative_numbers = true)]
        x: i32,

        #[arg(short, long, allow_negative_numbers = true)]
        y: i32,
    },

    /// Replay exploration, assuming every maneuver lands on its goal
    Walk {
        #[arg(short, long, allow_negative_numbers = true)]
        x: i32,

        #[arg(short, long, allow_negative_numbers = true)]
        y: i32,

        /// Number of plans to produce
        #[arg(short = 'n', long, default_value = "20")]
        steps: usize,

        /// Seed for the selection rng
        #[arg(short, long, default_value = "0")]
        seed: u64,
    },

    /// Export the map as JSON
    Export {
        /// Output file path
        #[arg(short, long)]
        output: PathBuf,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<(), NavError> {
    let json_mode = cli.json_mode;
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Some(Commands::Map {
            trace,
            oneway_trace,
            minimap,
            append,
        }) => {
            let request = MapRequest {
                trace,
                oneway_trace,
                minimap,
                append,
            };
            cmd_map(&cli.map, config, &request, json_mode)
        }
        Some(Commands::Status) => cmd_status(&cli.map, config, json_mode),
        Some(Commands::Graph) => cmd_graph(&cli.map, config, json_mode),
        Some(Commands::Locate { x, y }) => cmd_locate(&cli.map, x, y, json_mode),
        Some(Commands::Walk { x, y, steps, seed }) => {
            cmd_walk(&cli.map, config, x, y, steps, seed, json_mode)
        }
        Some(Commands::Export { output }) => cmd_export(&cli.map, &output),
        None => {
            // No subcommand - show status by default
            cmd_status(&cli.map, config, json_mode)
        }
    }
}

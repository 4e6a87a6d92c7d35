// src/cli.rs
//! CLI definitions for the cookbook server
//!
//! The command implementations are in the `commands` module.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cookbook")]
#[command(version)]
#[command(about = "Recipe storage service with a JSON HTTP API", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create or migrate the recipe database
    Init {
        /// Path to the database file (default: $COOKBOOK_DB_PATH or /var/lib/cookbook/cookbook.db)
        #[arg(short, long)]
        db_path: Option<PathBuf>,
    },

    /// Run the HTTP API server
    Serve {
        /// Path to a TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Address to listen on, overriding the config file
        #[arg(short, long)]
        bind: Option<String>,

        /// Path to the database file, overriding the config file
        #[arg(short, long)]
        db_path: Option<PathBuf>,
    },
}

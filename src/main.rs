// src/main.rs

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init { db_path } => commands::cmd_init(db_path),
        Commands::Serve {
            config,
            bind,
            db_path,
        } => commands::cmd_serve(config, bind, db_path).await,
    }
}

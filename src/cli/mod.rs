//! CLI module for the asset tracking API

pub mod serve;

use clap::{Parser, Subcommand};

/// Asset tracking API - business provider accounts and asset ingestion
#[derive(Parser)]
#[command(name = "asset-tracking-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the API server
    Serve,
}

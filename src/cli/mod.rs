//! CLI module
//!
//! - `serve`: run the HTTP server (default)
//! - `migrate`: apply or revert schema migrations and exit

pub mod migrate;
pub mod serve;

use clap::{Parser, Subcommand};

/// User API - CRUD service for user records
#[derive(Parser)]
#[command(name = "user-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server (default mode)
    Serve,

    /// Apply pending schema migrations, or revert the latest one
    Migrate(migrate::MigrateArgs),
}

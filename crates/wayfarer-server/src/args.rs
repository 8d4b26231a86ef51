use std::{net::SocketAddr, path::PathBuf};

use clap::{Parser, Subcommand};
use wayfarer_core::generation::groq::{DEFAULT_BASE_URL, DEFAULT_MODEL};

/// Command-line interface for the Wayfarer travel planner backend
///
/// Every option can also be set through its environment variable, which may
/// come from a `.env` file in the working directory. Flags win over the
/// environment.
#[derive(Parser)]
#[command(version, about, name = "wayfarer")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/wayfarer/wayfarer.db
    #[arg(long, global = true, env = "WAYFARER_DATABASE")]
    pub database_file: Option<PathBuf>,

    #[command(flatten)]
    pub server: ServerArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Options for the HTTP server
#[derive(clap::Args, Debug, Clone)]
pub struct ServerArgs {
    /// Address the HTTP server listens on
    #[arg(long, global = true, env = "WAYFARER_BIND", default_value = "127.0.0.1:5000")]
    pub bind: SocketAddr,

    /// API key for the text-generation service. Generation is disabled
    /// without one
    #[arg(long, global = true, env = "GROQ_API_KEY", hide_env_values = true)]
    pub groq_api_key: Option<String>,

    /// Model used for generation
    #[arg(long, global = true, env = "GROQ_MODEL", default_value = DEFAULT_MODEL)]
    pub groq_model: String,

    /// Base URL of the chat-completions API
    #[arg(long, global = true, env = "GROQ_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub groq_base_url: String,
}

/// Available commands. `serve` runs when none is given.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Start the HTTP API server
    Serve,
    /// Create the database schema and apply migrations
    InitDb,
    /// Load the sample city and activity catalogue into an empty database
    Seed,
}

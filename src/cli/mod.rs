use std::path::PathBuf;

use clap::{Subcommand, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the completion gateway (POST /complete)
    Serve {
        /// Listen on this port instead of TRANSFORMBOT_PORT
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Open the terminal chat assistant
    Chat {
        /// Call the completion gateway in-process instead of over HTTP
        #[arg(long)]
        embedded: bool,

        /// Write logs to this file; the chat is silent otherwise
        #[arg(long)]
        log_file: Option<PathBuf>,
    },

    /// Look up existing transformations matching a query
    Suggest {
        query: String,

        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Generate a transformation for a prompt and print it
    Complete { prompt: String },
}

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "finnews",
    version,
    about = "Financial news analyzer: sentiment, summaries and live ticker news"
)]
pub struct Cli {
    /// Read configuration from this dotenv file instead of the process environment
    #[arg(long, global = true)]
    pub env_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve models and serve the HTTP API
    Serve {
        /// Listen address (overrides BIND_ADDR)
        #[arg(long)]
        bind: Option<String>,
    },
    /// Resolve models and analyze one piece of text
    Analyze {
        text: String,
    },
    /// Fetch live news for a ticker
    News {
        ticker: String,
    },
}

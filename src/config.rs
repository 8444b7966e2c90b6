//! Server configuration read from command line flags or the environment.

use std::time::Duration;

use clap::Parser;

/// The REST API server for tracking expenses.
///
/// Every option may be given as a flag or as the environment variable named
/// in its help text.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// File path to the application SQLite database.
    #[arg(long, env = "DATABASE_PATH")]
    pub db_path: String,

    /// API key for the Gemini text generation service.
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: String,

    /// The Gemini model used to summarize expenses.
    #[arg(long, env = "GEMINI_MODEL", default_value = "gemini-2.5-flash")]
    pub gemini_model: String,

    /// Comma separated origins allowed to make cross-origin requests, or `*` for any origin.
    #[arg(
        long,
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:3001"
    )]
    pub allowed_origins: Vec<String>,

    /// How long to wait for the expense summary before giving up, in seconds.
    #[arg(long, env = "SUMMARY_TIMEOUT_SECS", default_value_t = 30)]
    pub summary_timeout_secs: u64,

    /// The port to serve the API from.
    #[arg(short, long, env = "PORT", default_value_t = 8000)]
    pub port: u16,
}

impl Config {
    /// The timeout for a single summary request.
    pub fn summary_timeout(&self) -> Duration {
        Duration::from_secs(self.summary_timeout_secs)
    }
}

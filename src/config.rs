use serde::Deserialize;
use std::path::PathBuf;

use crate::services::recommender::{DEFAULT_COUNT, DEFAULT_MAX_OUTFITS};

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// CSV catalog with Tags, AnswerText and QuestionText columns
    #[serde(default = "default_dataset_path")]
    pub dataset_path: PathBuf,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Outfits requested when a client does not say
    #[serde(default = "default_count")]
    pub default_count: usize,

    /// Upper bound on outfits assembled per request
    #[serde(default = "default_max_outfits")]
    pub max_outfits: usize,
}

fn default_dataset_path() -> PathBuf {
    PathBuf::from("data/fashion_dataset.csv")
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_count() -> usize {
    DEFAULT_COUNT
}

fn default_max_outfits() -> usize {
    DEFAULT_MAX_OUTFITS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset_path: default_dataset_path(),
            host: default_host(),
            port: default_port(),
            default_count: default_count(),
            max_outfits: default_max_outfits(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from explicit key/value pairs
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Config>(vars).map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

use std::num::NonZeroU32;
use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

const ENV_PREFIX: &str = "JOBSTACKS";
const SETTINGS_FILE: &str = "jobstacks";

pub const DEFAULT_BASE_URL: &str = "https://api.jumpit.co.kr/api/positions";
pub const DEFAULT_REFERER: &str = "https://www.jumpit.co.kr/positions";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/102.0.5005.141 Whale/3.15.136.29 Safari/537.36";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub api: ApiSettings,
    pub output: OutputSettings,
    pub database: DatabaseSettings,
}

/// Listing endpoint plus the fixed header set the upstream expects.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiSettings {
    pub base_url: String,
    pub user_agent: String,
    pub referer: String,
    /// Stop after this many non-empty pages. Unset means fetch until an empty page;
    /// zero is rejected.
    pub max_pages: Option<NonZeroU32>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputSettings {
    pub records_json: PathBuf,
    pub records_csv: PathBuf,
    pub frequency_json: PathBuf,
    pub frequency_csv: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub path: PathBuf,
}

impl Settings {
    /// Defaults, then `jobstacks.toml` if present, then `JOBSTACKS_*` env vars
    /// (nested keys use `__`, e.g. `JOBSTACKS_DATABASE__PATH`).
    pub fn load() -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::with_name(SETTINGS_FILE).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );
        Self::from_builder(builder)
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, ConfigError> {
        builder
            .set_default("api.base_url", DEFAULT_BASE_URL)?
            .set_default("api.user_agent", DEFAULT_USER_AGENT)?
            .set_default("api.referer", DEFAULT_REFERER)?
            .set_default("api.timeout_secs", 30)?
            .set_default("output.records_json", "techInfoData/tech_info.json")?
            .set_default("output.records_csv", "techInfoData/tech_info.csv")?
            .set_default("output.frequency_json", "techInfoData/frequency_counter.json")?
            .set_default("output.frequency_csv", "techInfoData/frequency_counter.csv")?
            .set_default("database.path", "techInfoData/jobstacks.sqlite")?
            .build()?
            .try_deserialize()
    }
}

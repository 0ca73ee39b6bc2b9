//! Backend connection settings.

use std::fmt;
use std::time::Duration;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::RestResult;

/// Environment variable prefix, e.g. `ADMISSIONS_BASE_URL`.
pub const ENV_PREFIX: &str = "ADMISSIONS";

/// Optional settings file name (`admissions.toml`, `admissions.json`, ...).
pub const CONFIG_FILE: &str = "admissions";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Clone, Deserialize, PartialEq)]
pub struct RestConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`
    pub base_url: String,
    /// Anon or service key, sent as `apikey` and bearer token
    pub api_key: String,
    /// Postgres schema, sent as `Content-Profile` when set
    #[serde(default)]
    pub schema: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl fmt::Debug for RestConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("schema", &self.schema)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl RestConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            schema: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Load from `admissions.*` in the working directory (optional), overridden by
    /// `ADMISSIONS_*` environment variables.
    pub fn load() -> RestResult<Self> {
        Self::load_from(CONFIG_FILE)
    }

    pub fn load_from(file: &str) -> RestResult<Self> {
        let settings = Config::builder()
            .add_source(File::with_name(file).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Insert endpoint for a table.
    pub fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url.trim_end_matches('/'), table)
    }
}

use std::{fs::File, path::{Path, PathBuf}};

use anyhow::Context;
use app::shell::Theme;
use market_feed::{API_HOST, DEFAULT_LIMIT};
use serde::Deserialize;
use sources_common::interval::Interval;
use toolset::deserialize_url;
use url::Url;

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default = "default_api_host", deserialize_with = "deserialize_url")]
    pub api_host: Url,
    #[serde(default)]
    pub interval: Interval,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default = "default_candles_amount")]
    pub limit: u32,
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_api_host() -> Url {
    Url::parse(API_HOST).expect("default api host is a valid url")
}

fn default_candles_amount() -> u32 {
    DEFAULT_LIMIT
}

fn default_log_file() -> PathBuf {
    PathBuf::from("btc-chart.log")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_host: default_api_host(),
            interval: Interval::default(),
            theme: Theme::default(),
            limit: default_candles_amount(),
            log_file: default_log_file(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Without a file every setting takes its default.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let file = File::open(path)
            .with_context(|| format!("Cannot open config file {}", path.display()))?;
        serde_yaml::from_reader(file)
            .with_context(|| format!("Cannot parse config file {}", path.display()))
    }
}

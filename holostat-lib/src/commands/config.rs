use crate::Result;
use crate::normalize::SentinelSet;
use camino::{Utf8Path, Utf8PathBuf};
use core::time::Duration;
use ohno::{IntoAppError, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use url::Url;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "holostat.toml";

#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Root of the catalog API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Timeout for a single page request
    #[serde(default = "default_request_timeout", with = "humantime_serde")]
    pub request_timeout: Duration,

    /// User-Agent header for API requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Placeholder strings read as missing values
    #[serde(default = "default_sentinels")]
    pub sentinels: Vec<String>,
}

fn default_base_url() -> String {
    "https://swapi.dev/api/".to_string()
}

const fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_user_agent() -> String {
    "holostat".to_string()
}

fn default_sentinels() -> Vec<String> {
    crate::normalize::DEFAULT_SENTINELS.iter().map(ToString::to_string).collect()
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// An explicit path must exist. Otherwise `holostat.toml` in `search_dir` is used if present.
    pub fn load(search_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading holostat configuration file '{path}'"))?;
            (path.clone(), text)
        } else {
            let path = search_dir.join(CONFIG_FILE_NAME);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    return Ok(Self::default());
                }
                Err(e) => return Err(e).into_app_err_with(|| format!("reading holostat configuration file '{path}'")),
            }
        };

        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;
        config.validate()?;

        Ok(config)
    }

    /// Save the default configuration to a TOML file
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    #[must_use]
    pub fn sentinel_set(&self) -> SentinelSet {
        SentinelSet::new(self.sentinels.iter().cloned())
    }

    fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.base_url).into_app_err_with(|| format!("base_url '{}' is not a valid URL", self.base_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!("base_url must use http or https, got '{}'", url.scheme());
        }

        if self.request_timeout.is_zero() {
            bail!("request_timeout must be greater than zero");
        }

        if self.user_agent.trim().is_empty() {
            bail!("user_agent must not be empty");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}

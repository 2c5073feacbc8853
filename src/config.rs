use std::{env, path::PathBuf, time::Duration};
use tracing::warn;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATA_PATH: &str = "data/state.json";
const DEFAULT_FEED_TIMEOUT_SECS: u64 = 10;
const DEFAULT_SAMPLE_SEED: u64 = 0x5eed_b0d1;

/// Process settings, read from the environment once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub port: u16,
    pub data_path: PathBuf,
    /// Upstream `[daily, monthly]` endpoint. Unset means the local store.
    pub source_url: Option<String>,
    pub feed_timeout: Duration,
    pub sample_seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            source_url: None,
            feed_timeout: Duration::from_secs(DEFAULT_FEED_TIMEOUT_SECS),
            sample_seed: DEFAULT_SAMPLE_SEED,
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            port: parsed(&lookup, "PORT").unwrap_or(defaults.port),
            data_path: lookup("APP_DATA_PATH")
                .filter(|value| !value.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.data_path),
            source_url: lookup("BODYCOMP_SOURCE_URL")
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty()),
            feed_timeout: parsed(&lookup, "BODYCOMP_FEED_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.feed_timeout),
            sample_seed: parsed(&lookup, "APP_SAMPLE_SEED").unwrap_or(defaults.sample_seed),
        }
    }
}

fn parsed<T: std::str::FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("ignoring invalid {key}={raw:?}, using default");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> Settings {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(settings(&[]), Settings::default());
    }

    #[test]
    fn reads_every_variable() {
        let settings = settings(&[
            ("PORT", "9000"),
            ("APP_DATA_PATH", "/tmp/bc.json"),
            ("BODYCOMP_SOURCE_URL", " http://upstream/api/body_composition "),
            ("BODYCOMP_FEED_TIMEOUT_SECS", "3"),
            ("APP_SAMPLE_SEED", "12"),
        ]);
        assert_eq!(settings.port, 9000);
        assert_eq!(settings.data_path, PathBuf::from("/tmp/bc.json"));
        assert_eq!(settings.source_url.as_deref(), Some("http://upstream/api/body_composition"));
        assert_eq!(settings.feed_timeout, Duration::from_secs(3));
        assert_eq!(settings.sample_seed, 12);
    }

    #[test]
    fn invalid_values_fall_back() {
        let settings = settings(&[("PORT", "eighty"), ("BODYCOMP_SOURCE_URL", "  ")]);
        assert_eq!(settings.port, DEFAULT_PORT);
        assert_eq!(settings.source_url, None);
    }
}

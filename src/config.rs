// Runtime configuration with page-URL overrides.
//
// Defaults come from `constants.rs`; the query string may override the model
// URL (`model=`), the console log level (`log=`) and the jitter RNG seed
// (`seed=`). Unknown keys and malformed values are ignored.

use crate::constants::{DEFAULT_MODEL_URL, DEFAULT_SEED};

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub model_url: String,
    pub log_level: log::Level,
    pub seed: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model_url: DEFAULT_MODEL_URL.to_string(),
            log_level: log::Level::Info,
            seed: DEFAULT_SEED,
        }
    }
}

impl AppConfig {
    /// Parse a `location.search` string (leading `?` optional). Keys and
    /// values are form-urlencoded, so `%2F` and `+` decode as usual.
    pub fn from_query(query: &str) -> Self {
        let mut cfg = Self::default();
        let query = query.strip_prefix('?').unwrap_or(query);
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match &*key {
                "model" if !value.is_empty() => cfg.model_url = value.into_owned(),
                "log" => {
                    if let Some(level) = parse_level(&value) {
                        cfg.log_level = level;
                    }
                }
                "seed" => {
                    if let Ok(seed) = value.parse() {
                        cfg.seed = seed;
                    }
                }
                _ => {}
            }
        }
        cfg
    }

    /// Read overrides from the current page URL.
    pub fn from_window() -> Self {
        web_sys::window()
            .and_then(|w| w.location().search().ok())
            .map(|q| Self::from_query(&q))
            .unwrap_or_default()
    }
}

fn parse_level(value: &str) -> Option<log::Level> {
    match value.to_ascii_lowercase().as_str() {
        "error" => Some(log::Level::Error),
        "warn" => Some(log::Level::Warn),
        "info" => Some(log::Level::Info),
        "debug" => Some(log::Level::Debug),
        "trace" => Some(log::Level::Trace),
        _ => None,
    }
}

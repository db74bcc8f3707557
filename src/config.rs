use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use log::warn;

use crate::i18n::Language;

const APP_DIR: &str = "monopoly_bookkeeper";

#[derive(Debug, Clone)]
pub struct Config {
    pub bind: String,
    pub port: u16,
    pub data_dir: PathBuf,
    pub language: Language,
    /// Only set when explicitly configured.
    pub upstream_timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 8080,
            data_dir: default_data_dir(),
            language: Language::default(),
            upstream_timeout: None,
        }
    }
}

fn default_data_dir() -> PathBuf {
    match dirs::data_dir() {
        Some(mut dir) => {
            dir.push(APP_DIR);
            dir
        }
        None => PathBuf::from("."),
    }
}

fn parsed<T: FromStr>(name: &str, raw: Option<String>, fallback: T) -> T {
    match raw {
        None => fallback,
        Some(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                warn!("Ignoring invalid {}={:?}", name, raw);
                fallback
            }
        },
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from any variable source. Unset or invalid values
    /// keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let language = match lookup("BOOKKEEPER_LANG") {
            None => defaults.language,
            Some(raw) => Language::parse(&raw).unwrap_or_else(|| {
                warn!("Ignoring invalid BOOKKEEPER_LANG={:?}", raw);
                defaults.language
            }),
        };

        let upstream_timeout = lookup("BOOKKEEPER_UPSTREAM_TIMEOUT_SECS")
            .and_then(|raw| match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
                _ => {
                    warn!("Ignoring invalid BOOKKEEPER_UPSTREAM_TIMEOUT_SECS={:?}", raw);
                    None
                }
            });

        Self {
            bind: lookup("BOOKKEEPER_BIND")
                .filter(|b| !b.trim().is_empty())
                .unwrap_or(defaults.bind),
            port: parsed("BOOKKEEPER_PORT", lookup("BOOKKEEPER_PORT"), defaults.port),
            data_dir: lookup("BOOKKEEPER_DATA_DIR")
                .filter(|d| !d.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            language,
            upstream_timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = config(&[]);

        assert_eq!(config.bind, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.language, Language::En);
        assert!(config.upstream_timeout.is_none());
        assert!(config.data_dir.ends_with(APP_DIR) || config.data_dir == PathBuf::from("."));
    }

    #[test]
    fn reads_every_variable() {
        let config = config(&[
            ("BOOKKEEPER_BIND", "127.0.0.1"),
            ("BOOKKEEPER_PORT", "9000"),
            ("BOOKKEEPER_DATA_DIR", "/tmp/ledger"),
            ("BOOKKEEPER_LANG", "zh-CN"),
            ("BOOKKEEPER_UPSTREAM_TIMEOUT_SECS", "30"),
        ]);

        assert_eq!(config.bind, "127.0.0.1");
        assert_eq!(config.port, 9000);
        assert_eq!(config.data_dir, PathBuf::from("/tmp/ledger"));
        assert_eq!(config.language, Language::Zh);
        assert_eq!(config.upstream_timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = config(&[
            ("BOOKKEEPER_PORT", "eighty"),
            ("BOOKKEEPER_LANG", "klingon"),
            ("BOOKKEEPER_UPSTREAM_TIMEOUT_SECS", "0"),
        ]);

        assert_eq!(config.port, 8080);
        assert_eq!(config.language, Language::En);
        assert!(config.upstream_timeout.is_none());
    }
}

//! Runtime configuration.
//!
//! Read from the environment on first use and cached for the process:
//! - `FPUTS_MIN_LEN`: minimum text length accepted by [`crate::write_file`]
//!   (default 10).
//! - `FPUTS_LOG`: path of a JSONL sink the ABI layer installs on first call.
//! - `FPUTS_FLUSH`: `1|true|yes|on` flushes the stream after every successful
//!   write. Anything else leaves buffering to the stream.
//!
//! Unparseable values fall back to the defaults.

use std::path::PathBuf;
use std::sync::OnceLock;

pub const MIN_LEN_ENV: &str = "FPUTS_MIN_LEN";
pub const LOG_ENV: &str = "FPUTS_LOG";
pub const FLUSH_ENV: &str = "FPUTS_FLUSH";

/// Minimum text length for the file-path writer unless overridden.
pub const DEFAULT_MIN_TEXT_LEN: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub min_text_len: usize,
    pub log_path: Option<PathBuf>,
    pub flush_after_write: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_text_len: DEFAULT_MIN_TEXT_LEN,
            log_path: None,
            flush_after_write: false,
        }
    }
}

impl Config {
    /// Build a config from an arbitrary variable lookup.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let min_text_len = lookup(MIN_LEN_ENV)
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .unwrap_or(defaults.min_text_len);
        let log_path = lookup(LOG_ENV)
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
            .map(PathBuf::from);
        let flush_after_write = lookup(FLUSH_ENV)
            .map(|raw| parse_bool_loose(&raw))
            .unwrap_or(defaults.flush_after_write);
        Self {
            min_text_len,
            log_path,
            flush_after_write,
        }
    }

    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}

fn parse_bool_loose(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Process-wide configuration (reads the environment once).
#[must_use]
pub fn get() -> &'static Config {
    static CONFIG: OnceLock<Config> = OnceLock::new();
    CONFIG.get_or_init(Config::from_env)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(Config::from_lookup(lookup(&[])), Config::default());
        assert_eq!(Config::default().min_text_len, 10);
    }

    #[test]
    fn all_variables_parse() {
        let cfg = Config::from_lookup(lookup(&[
            (MIN_LEN_ENV, " 3 "),
            (LOG_ENV, "/tmp/fputs.jsonl"),
            (FLUSH_ENV, "YES"),
        ]));
        assert_eq!(cfg.min_text_len, 3);
        assert_eq!(cfg.log_path, Some(PathBuf::from("/tmp/fputs.jsonl")));
        assert!(cfg.flush_after_write);
    }

    #[test]
    fn garbage_falls_back_to_defaults() {
        let cfg = Config::from_lookup(lookup(&[
            (MIN_LEN_ENV, "-4"),
            (LOG_ENV, "   "),
            (FLUSH_ENV, "maybe"),
        ]));
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn zero_min_len_disables_check() {
        let cfg = Config::from_lookup(lookup(&[(MIN_LEN_ENV, "0")]));
        assert_eq!(cfg.min_text_len, 0);
    }
}

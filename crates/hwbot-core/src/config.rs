use std::{env, fs, path::Path, time::Duration};

use crate::{domain::ChatId, errors::Error, Result};

/// Production endpoint of the homework-review API.
pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

const DEFAULT_POLL_INTERVAL_SECS: u64 = 600;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Typed configuration, read once at startup.
///
/// A missing or blank required variable is the one unrecoverable failure in
/// the whole program; everything past startup is caught at the loop boundary.
#[derive(Clone, Debug)]
pub struct Config {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: ChatId,

    pub endpoint: String,
    pub poll_interval: Duration,
    pub request_timeout: Duration,

    /// Forward fetch/parse failures to the chat (deduplicated) in addition to
    /// logging them.
    pub notify_on_error: bool,
}

impl Config {
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));
        Self::from_lookup(&|key| env::var(key).ok())
    }

    fn from_lookup(lookup: &dyn Fn(&str) -> Option<String>) -> Result<Self> {
        let practicum_token = require(lookup, "PRACTICUM_TOKEN")?;
        let telegram_token = require(lookup, "TELEGRAM_TOKEN")?;

        let chat_raw = require(lookup, "TELEGRAM_CHAT_ID")?;
        let telegram_chat_id = chat_raw
            .trim()
            .parse::<i64>()
            .map(ChatId)
            .map_err(|_| {
                Error::Config(format!(
                    "TELEGRAM_CHAT_ID must be a numeric chat id, got {chat_raw:?}"
                ))
            })?;

        let endpoint = lookup("PRACTICUM_ENDPOINT")
            .and_then(non_empty)
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        let poll_interval = Duration::from_secs(
            parse_u64(lookup, "POLL_INTERVAL_SECS")?.unwrap_or(DEFAULT_POLL_INTERVAL_SECS),
        );
        let request_timeout = Duration::from_secs(
            parse_u64(lookup, "REQUEST_TIMEOUT_SECS")?.unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        );

        let notify_on_error = lookup("NOTIFY_ON_ERROR")
            .and_then(non_empty)
            .map(|s| parse_bool(&s))
            .unwrap_or(true);

        Ok(Self {
            practicum_token,
            telegram_token,
            telegram_chat_id,
            endpoint,
            poll_interval,
            request_timeout,
            notify_on_error,
        })
    }
}

fn require(lookup: &dyn Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    lookup(key)
        .and_then(non_empty)
        .ok_or_else(|| Error::Config(format!("{key} environment variable is required")))
}

fn parse_u64(lookup: &dyn Fn(&str) -> Option<String>, key: &str) -> Result<Option<u64>> {
    let Some(raw) = lookup(key).and_then(non_empty) else {
        return Ok(None);
    };
    raw.trim()
        .parse::<u64>()
        .map(Some)
        .map_err(|_| Error::Config(format!("{key} must be an integer, got {raw:?}")))
}

fn parse_bool(s: &str) -> bool {
    matches!(
        s.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

/// Load a `.env` file into the process environment without overriding
/// variables that are already set.
fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for (key, value) in parse_dotenv(&contents) {
        if env::var_os(&key).is_none() {
            env::set_var(key, value);
        }
    }
}

fn parse_dotenv(contents: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();

    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        out.push((key.to_string(), val));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    fn required_vars() -> Vec<(&'static str, &'static str)> {
        vec![
            ("PRACTICUM_TOKEN", "pt-token"),
            ("TELEGRAM_TOKEN", "tg-token"),
            ("TELEGRAM_CHAT_ID", "12345"),
        ]
    }

    #[test]
    fn loads_with_defaults() {
        let cfg = Config::from_lookup(&lookup_from(&required_vars())).unwrap();
        assert_eq!(cfg.practicum_token, "pt-token");
        assert_eq!(cfg.telegram_chat_id, ChatId(12345));
        assert_eq!(cfg.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(cfg.poll_interval, Duration::from_secs(600));
        assert_eq!(cfg.request_timeout, Duration::from_secs(10));
        assert!(cfg.notify_on_error);
    }

    #[test]
    fn missing_required_var_names_it() {
        for missing in ["PRACTICUM_TOKEN", "TELEGRAM_TOKEN", "TELEGRAM_CHAT_ID"] {
            let vars: Vec<_> = required_vars()
                .into_iter()
                .filter(|(k, _)| *k != missing)
                .collect();
            let err = Config::from_lookup(&lookup_from(&vars)).unwrap_err();
            assert!(err.is_fatal());
            assert!(err.to_string().contains(missing), "{err} should name {missing}");
        }
    }

    #[test]
    fn blank_required_var_is_rejected() {
        let mut vars = required_vars();
        vars[0] = ("PRACTICUM_TOKEN", "   ");
        let err = Config::from_lookup(&lookup_from(&vars)).unwrap_err();
        assert!(err.to_string().contains("PRACTICUM_TOKEN"));
    }

    #[test]
    fn non_numeric_chat_id_is_rejected() {
        let mut vars = required_vars();
        vars[2] = ("TELEGRAM_CHAT_ID", "@channel");
        let err = Config::from_lookup(&lookup_from(&vars)).unwrap_err();
        assert!(err.to_string().contains("TELEGRAM_CHAT_ID"));
    }

    #[test]
    fn optional_vars_override_defaults() {
        let mut vars = required_vars();
        vars.push(("POLL_INTERVAL_SECS", "30"));
        vars.push(("REQUEST_TIMEOUT_SECS", "5"));
        vars.push(("NOTIFY_ON_ERROR", "off"));
        vars.push(("PRACTICUM_ENDPOINT", "http://localhost:9999/statuses/"));
        let cfg = Config::from_lookup(&lookup_from(&vars)).unwrap();
        assert_eq!(cfg.poll_interval, Duration::from_secs(30));
        assert_eq!(cfg.request_timeout, Duration::from_secs(5));
        assert!(!cfg.notify_on_error);
        assert_eq!(cfg.endpoint, "http://localhost:9999/statuses/");
    }

    #[test]
    fn dotenv_parsing_skips_comments_and_strips_quotes() {
        let parsed = parse_dotenv(
            "# comment\n\nPRACTICUM_TOKEN=\"abc\"\nTELEGRAM_TOKEN='xyz'\nnot a pair\n=nokey\nTELEGRAM_CHAT_ID= 42 \n",
        );
        assert_eq!(
            parsed,
            vec![
                ("PRACTICUM_TOKEN".to_string(), "abc".to_string()),
                ("TELEGRAM_TOKEN".to_string(), "xyz".to_string()),
                ("TELEGRAM_CHAT_ID".to_string(), "42".to_string()),
            ]
        );
    }
}

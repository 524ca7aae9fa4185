//! Process configuration (§4.8), read once at startup from the environment.

use std::env;

use crate::errors::StoreError;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_ROUTES_FILE: &str = "routes.txt";
const DEFAULT_MAX_METRIC: u16 = 32768;
const DEFAULT_CACHE_CAPACITY: usize = 10000;

/// Settings read from `HOST`, `PORT`, `ROUTES_FILE`, `MAX_METRIC` and
/// `CACHE_CAPACITY`. Every field has a default; a present-but-unparseable
/// value is a startup error rather than a silent fallback.
#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub routes_file: String,
    pub max_metric: u16,
    pub cache_capacity: usize,
}

impl Settings {
    pub fn from_env() -> Result<Self, StoreError> {
        Ok(Settings {
            host: env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: parse_env("PORT", DEFAULT_PORT)?,
            routes_file: env::var("ROUTES_FILE")
                .unwrap_or_else(|_| DEFAULT_ROUTES_FILE.to_string()),
            max_metric: parse_env("MAX_METRIC", DEFAULT_MAX_METRIC)?,
            cache_capacity: parse_env("CACHE_CAPACITY", DEFAULT_CACHE_CAPACITY)?,
        })
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T, StoreError>
where
    T: std::str::FromStr,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| StoreError::ConfigError(format!("{key}={raw:?} is not a valid value"))),
        Err(env::VarError::NotPresent) => Ok(default),
        Err(env::VarError::NotUnicode(_)) => {
            Err(StoreError::ConfigError(format!("{key} is not valid UTF-8")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_values() {
        // Not run in parallel with tests that mutate env vars in this
        // process; Settings::from_env reads whatever the process
        // environment happens to hold at call time.
        env::remove_var("HOST");
        env::remove_var("PORT");
        env::remove_var("ROUTES_FILE");
        env::remove_var("MAX_METRIC");
        env::remove_var("CACHE_CAPACITY");

        let settings = Settings::from_env().unwrap();
        assert_eq!(settings.host, DEFAULT_HOST);
        assert_eq!(settings.port, DEFAULT_PORT);
        assert_eq!(settings.routes_file, DEFAULT_ROUTES_FILE);
        assert_eq!(settings.max_metric, DEFAULT_MAX_METRIC);
        assert_eq!(settings.cache_capacity, DEFAULT_CACHE_CAPACITY);
    }

    #[test]
    fn invalid_port_is_a_config_error() {
        env::set_var("PORT", "not-a-number");
        let result = Settings::from_env();
        env::remove_var("PORT");
        assert!(matches!(result, Err(StoreError::ConfigError(_))));
    }
}

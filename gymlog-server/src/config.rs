use anyhow::{Context, Result};
use gymlog::db::DEFAULT_DATABASE_URL;
use gymlog::logging;
use log::LevelFilter;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_BIND: &str = "0.0.0.0:5000";
pub const DEV_TOKEN_SECRET: &str = "gymlog-dev-secret-change-me";
const DEFAULT_POOL_SIZE: u32 = 8;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub database_url: String,
    pub pool_size: u32,
    pub token_secret: String,
    /// 0 disables expiry.
    pub token_ttl_secs: u64,
    pub seed_dev_data: bool,
    pub auto_seed_if_empty: bool,
    pub dataset_path: Option<PathBuf>,
    pub log_level: LevelFilter,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bind = get("GYMLOG_BIND")
            .unwrap_or_else(|| DEFAULT_BIND.to_string())
            .parse::<SocketAddr>()
            .context("GYMLOG_BIND must be a socket address such as 0.0.0.0:5000")?;
        let pool_size = match get("GYMLOG_POOL_SIZE") {
            Some(raw) => raw.parse::<u32>().context("GYMLOG_POOL_SIZE must be a positive integer")?,
            None => DEFAULT_POOL_SIZE,
        };
        let token_ttl_secs = match get("GYMLOG_TOKEN_TTL_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .context("GYMLOG_TOKEN_TTL_SECS must be a number of seconds")?,
            None => 0,
        };
        let log_level = ["GYMLOG_LOG", "RUST_LOG"]
            .iter()
            .filter_map(|key| get(*key))
            .find_map(|value| logging::parse_level(&value))
            .unwrap_or(LevelFilter::Info);

        Ok(ServerConfig {
            bind,
            database_url: get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            pool_size,
            token_secret: get("GYMLOG_TOKEN_SECRET").unwrap_or_else(|| DEV_TOKEN_SECRET.to_string()),
            token_ttl_secs,
            seed_dev_data: get("GYMLOG_SEED_DEV_DATA").is_some_and(|v| is_truthy(&v)),
            auto_seed_if_empty: get("AUTO_SEED_IF_EMPTY").is_some_and(|v| is_truthy(&v)),
            dataset_path: get("GYMLOG_DATASET_PATH").map(PathBuf::from),
            log_level,
        })
    }

    pub fn uses_dev_secret(&self) -> bool {
        self.token_secret == DEV_TOKEN_SECRET
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "1" | "true" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Result<ServerConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.bind.to_string(), DEFAULT_BIND);
        assert_eq!(cfg.database_url, "database/app.db");
        assert_eq!(cfg.token_ttl_secs, 0);
        assert!(cfg.uses_dev_secret());
        assert!(!cfg.seed_dev_data);
        assert!(!cfg.auto_seed_if_empty);
        assert_eq!(cfg.log_level, LevelFilter::Info);
    }

    #[test]
    fn overrides() {
        let cfg = config(&[
            ("GYMLOG_BIND", "127.0.0.1:8080"),
            ("DATABASE_URL", "/tmp/x.db"),
            ("GYMLOG_TOKEN_SECRET", "s3cret"),
            ("GYMLOG_TOKEN_TTL_SECS", "3600"),
            ("AUTO_SEED_IF_EMPTY", "Yes"),
            ("GYMLOG_SEED_DEV_DATA", "0"),
            ("RUST_LOG", "debug"),
        ])
        .unwrap();
        assert_eq!(cfg.bind.port(), 8080);
        assert_eq!(cfg.database_url, "/tmp/x.db");
        assert_eq!(cfg.token_ttl_secs, 3600);
        assert!(!cfg.uses_dev_secret());
        assert!(cfg.auto_seed_if_empty);
        assert!(!cfg.seed_dev_data);
        assert_eq!(cfg.log_level, LevelFilter::Debug);
    }

    #[test]
    fn bad_values_are_reported() {
        assert!(config(&[("GYMLOG_BIND", "nowhere")]).is_err());
        assert!(config(&[("GYMLOG_TOKEN_TTL_SECS", "soon")]).is_err());
    }
}

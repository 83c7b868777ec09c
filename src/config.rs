use std::env;
use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;
use std::time::Duration;

use crate::idiom::loader::LoadOptions;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub log_level: String,
    pub enable_file_logs: bool,
    pub log_dir: String,
    pub cors_origin: String,
    pub request_timeout_secs: u64,
    pub dataset: DatasetConfig,
}

#[derive(Debug, Clone)]
pub struct DatasetConfig {
    /// URL（http/https）或本地文件路径
    pub source: String,
    pub fetch_timeout_secs: u64,
    pub max_bytes: usize,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            host: env_or_parse("HOST", IpAddr::V4(Ipv4Addr::UNSPECIFIED)),
            port: env_or_parse("PORT", 8099_u16),
            log_level: env_or("RUST_LOG", "info"),
            enable_file_logs: env_or_bool("ENABLE_FILE_LOGS", false),
            log_dir: env_or("LOG_DIR", "./logs"),
            cors_origin: env_or("CORS_ORIGIN", "*"),
            request_timeout_secs: env_or_parse("REQUEST_TIMEOUT_SECS", 15_u64),
            dataset: DatasetConfig {
                source: env_or("IDIOM_DATASET", "./idiom.json"),
                fetch_timeout_secs: env_or_parse("DATASET_FETCH_TIMEOUT_SECS", 30_u64),
                max_bytes: env_or_parse("DATASET_MAX_BYTES", 32 * 1024 * 1024_usize),
            },
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

impl DatasetConfig {
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            fetch_timeout: Duration::from_secs(self.fetch_timeout_secs.max(1)),
            max_bytes: self.max_bytes,
        }
    }
}

pub fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

pub fn env_or_parse<T>(key: &str, default: T) -> T
where
    T: FromStr + Copy,
{
    match env::var(key) {
        Ok(raw) => match raw.parse::<T>() {
            Ok(v) => v,
            Err(_) => {
                tracing::warn!(
                    key,
                    value = %raw,
                    "Failed to parse env var, using default"
                );
                default
            }
        },
        Err(_) => default,
    }
}

pub fn env_or_bool(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => default,
        },
        Err(_) => default,
    }
}

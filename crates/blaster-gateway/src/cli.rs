use blaster_core::ExpirationPolicy;
use clap::{Parser, ValueEnum};
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::time::Duration;

pub const LISTEN_ADDR_ENV: &str = "BLASTER_LISTEN_ADDR";
pub const PUBLIC_BASE_URL_ENV: &str = "BLASTER_PUBLIC_BASE_URL";
pub const STORAGE_HOST_ENV: &str = "BLASTER_STORAGE_HOST";
pub const STORAGE_PORT_ENV: &str = "BLASTER_STORAGE_PORT";
pub const MAPPING_TTL_SECS_ENV: &str = "BLASTER_MAPPING_TTL_SECS";
pub const COMMAND_TIMEOUT_MS_ENV: &str = "BLASTER_COMMAND_TIMEOUT_MS";
pub const LOG_FORMAT_ENV: &str = "BLASTER_LOG_FORMAT";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:9808";
pub const DEFAULT_PUBLIC_BASE_URL: &str = "http://127.0.0.1:9808";
pub const DEFAULT_STORAGE_HOST: &str = "127.0.0.1";
pub const DEFAULT_STORAGE_PORT: u16 = 6379;
pub const DEFAULT_MAPPING_TTL_SECS: u64 = 6 * 60 * 60;
pub const DEFAULT_COMMAND_TIMEOUT_MS: u64 = 3000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[value(name = "text")]
    Text,
    #[value(name = "json")]
    Json,
}

impl Display for LogFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Text => write!(f, "text"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "url-blaster")]
pub struct Cli {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    /// Prefix of the short URLs handed back to clients.
    #[arg(long, env = PUBLIC_BASE_URL_ENV, default_value = DEFAULT_PUBLIC_BASE_URL)]
    pub public_base_url: String,

    #[arg(long, env = STORAGE_HOST_ENV, default_value = DEFAULT_STORAGE_HOST)]
    pub storage_host: String,

    #[arg(long, env = STORAGE_PORT_ENV, default_value_t = DEFAULT_STORAGE_PORT)]
    pub storage_port: u16,

    /// Lifetime of new mappings in seconds; 0 keeps them until deleted.
    #[arg(long, env = MAPPING_TTL_SECS_ENV, default_value_t = DEFAULT_MAPPING_TTL_SECS)]
    pub mapping_ttl_secs: u64,

    #[arg(long, env = COMMAND_TIMEOUT_MS_ENV, default_value_t = DEFAULT_COMMAND_TIMEOUT_MS)]
    pub command_timeout_ms: u64,

    #[arg(long, env = LOG_FORMAT_ENV, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl Cli {
    pub fn redis_url(&self) -> String {
        format!("redis://{}:{}", self.storage_host, self.storage_port)
    }

    pub fn expiration(&self) -> ExpirationPolicy {
        ExpirationPolicy::from_secs(self.mapping_ttl_secs)
    }

    pub fn command_timeout(&self) -> Duration {
        Duration::from_millis(self.command_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["url-blaster"]).unwrap();
        assert_eq!(cli.listen_addr.to_string(), DEFAULT_LISTEN_ADDR);
        assert_eq!(cli.redis_url(), "redis://127.0.0.1:6379");
        assert_eq!(cli.expiration(), ExpirationPolicy::default());
        assert_eq!(cli.command_timeout(), Duration::from_secs(3));
        assert_eq!(cli.log_format, LogFormat::Text);
    }

    #[test]
    fn zero_ttl_means_never() {
        let cli = Cli::try_parse_from(["url-blaster", "--mapping-ttl-secs", "0"]).unwrap();
        assert_eq!(cli.expiration(), ExpirationPolicy::Never);
    }

    #[test]
    fn storage_address() {
        let cli = Cli::try_parse_from([
            "url-blaster",
            "--storage-host",
            "redis.internal",
            "--storage-port",
            "6380",
            "--log-format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.redis_url(), "redis://redis.internal:6380");
        assert_eq!(cli.log_format, LogFormat::Json);
    }
}

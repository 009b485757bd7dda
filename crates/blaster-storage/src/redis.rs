use async_trait::async_trait;
use blaster_core::store::{ensure_target_url, ensure_valid_code, Result};
use blaster_core::{ExpirationPolicy, ShortCode, StoreError, UrlStore};
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info, trace, warn};
use typed_builder::TypedBuilder;

/// Connection and policy settings for [`RedisStore`].
///
/// # Example
///
/// ```rust
/// use blaster_storage::RedisStoreSettings;
/// use blaster_storage::ExpirationPolicy;
///
/// let settings = RedisStoreSettings::builder()
///     .url("redis://127.0.0.1:6379")
///     .expiration(ExpirationPolicy::Never)
///     .build();
/// assert_eq!(settings.expiration, ExpirationPolicy::Never);
/// ```
#[derive(Debug, Clone, TypedBuilder)]
pub struct RedisStoreSettings {
    /// Redis connection URL, e.g. `redis://127.0.0.1:6379`.
    #[builder(setter(into))]
    pub url: String,

    /// Expiration applied by plain saves.
    #[builder(default)]
    pub expiration: ExpirationPolicy,

    /// Deadline for a single command round trip.
    #[builder(default = Duration::from_secs(3))]
    pub command_timeout: Duration,
}

/// A [`UrlStore`] backed by Redis.
///
/// Keys are short codes and values are the raw long URL strings. TTLs are
/// delegated to Redis key expiry, so an expired mapping is simply absent.
#[derive(Debug, Clone)]
pub struct RedisStore {
    conn: MultiplexedConnection,
    expiration: ExpirationPolicy,
    command_timeout: Duration,
}

fn map_redis_error(operation: &str, err: redis::RedisError) -> StoreError {
    StoreError::Unavailable(format!("{operation}: {err}"))
}

impl RedisStore {
    /// Connects to Redis and verifies the server answers a `PING`.
    pub async fn connect(settings: RedisStoreSettings) -> Result<Self> {
        let client = redis::Client::open(settings.url.as_str())
            .map_err(|e| map_redis_error("invalid redis url", e))?;

        let connect = client.get_multiplexed_async_connection();
        let mut conn = match tokio::time::timeout(settings.command_timeout, connect).await {
            Ok(conn) => conn.map_err(|e| map_redis_error("failed to connect to redis", e))?,
            Err(_) => {
                return Err(StoreError::Unavailable(format!(
                    "failed to connect to redis: timed out after {:?}",
                    settings.command_timeout
                )))
            }
        };

        let ping_cmd = redis::cmd("PING");
        let ping = ping_cmd.query_async::<String>(&mut conn);
        let pong = match tokio::time::timeout(settings.command_timeout, ping).await {
            Ok(pong) => pong.map_err(|e| map_redis_error("redis did not answer ping", e))?,
            Err(_) => {
                return Err(StoreError::Unavailable(format!(
                    "redis did not answer ping: timed out after {:?}",
                    settings.command_timeout
                )))
            }
        };
        info!(url = %settings.url, pong = %pong, "connected to redis");

        Ok(Self::from_connection(conn, settings))
    }

    /// Wraps an existing connection.
    pub fn from_connection(conn: MultiplexedConnection, settings: RedisStoreSettings) -> Self {
        Self {
            conn,
            expiration: settings.expiration,
            command_timeout: settings.command_timeout,
        }
    }

    /// Runs one command under the configured deadline.
    async fn run<T, F>(&self, operation: &str, fut: F) -> Result<T>
    where
        F: Future<Output = redis::RedisResult<T>> + Send,
    {
        match tokio::time::timeout(self.command_timeout, fut).await {
            Ok(result) => result.map_err(|e| map_redis_error(operation, e)),
            Err(_) => Err(StoreError::Unavailable(format!(
                "{operation}: timed out after {:?}",
                self.command_timeout
            ))),
        }
    }
}

#[async_trait]
impl UrlStore for RedisStore {
    fn expiration(&self) -> &ExpirationPolicy {
        &self.expiration
    }

    async fn save_url_mapping_with(
        &self,
        code: &ShortCode,
        url: &str,
        expiration: ExpirationPolicy,
    ) -> Result<()> {
        ensure_valid_code(code)?;
        ensure_target_url(url)?;
        let ttl = expiration.ttl_secs()?;
        let key = code.as_str();
        trace!(code = %code, ?ttl, "saving mapping in redis");

        let mut conn = self.conn.clone();
        let result = match ttl {
            Some(secs) => {
                self.run(
                    "failed to write mapping to redis",
                    conn.set_ex::<_, _, ()>(key, url, secs),
                )
                .await
            }
            None => {
                self.run(
                    "failed to write mapping to redis",
                    conn.set::<_, _, ()>(key, url),
                )
                .await
            }
        };

        match result {
            Ok(()) => {
                debug!(code = %code, "saved mapping in redis");
                Ok(())
            }
            Err(e) => {
                warn!(code = %code, url, error = %e, "failed saving mapping");
                Err(e)
            }
        }
    }

    async fn retrieve_initial_url(&self, code: &ShortCode) -> Result<String> {
        ensure_valid_code(code)?;
        let key = code.as_str();
        trace!(code = %code, "fetching mapping from redis");

        let mut conn = self.conn.clone();
        match self
            .run(
                "failed to fetch mapping from redis",
                conn.get::<_, Option<String>>(key),
            )
            .await
        {
            Ok(Some(url)) => {
                debug!(code = %code, "mapping found in redis");
                Ok(url)
            }
            Ok(None) => {
                trace!(code = %code, "mapping not found in redis");
                Err(StoreError::NotFound(code.to_string()))
            }
            Err(e) => {
                warn!(code = %code, error = %e, "failed retrieving mapping");
                Err(e)
            }
        }
    }

    async fn check_if_short_url_exists(&self, code: &ShortCode) -> bool {
        if ensure_valid_code(code).is_err() {
            return false;
        }
        let key = code.as_str();
        trace!(code = %code, "checking mapping existence in redis");

        let mut conn = self.conn.clone();
        match self
            .run(
                "failed to check mapping in redis",
                conn.exists::<_, bool>(key),
            )
            .await
        {
            Ok(exists) => exists,
            Err(e) => {
                warn!(code = %code, error = %e, "treating unavailable backend as missing code");
                false
            }
        }
    }

    async fn delete_url_mapping(&self, code: &ShortCode) -> Result<()> {
        ensure_valid_code(code)?;
        let key = code.as_str();
        trace!(code = %code, "removing mapping from redis");

        let mut conn = self.conn.clone();
        match self
            .run(
                "failed to delete mapping from redis",
                conn.del::<_, u64>(key),
            )
            .await
        {
            Ok(removed) => {
                debug!(code = %code, removed, "removed mapping from redis");
                Ok(())
            }
            Err(e) => {
                warn!(code = %code, error = %e, "failed deleting mapping");
                Err(e)
            }
        }
    }
}

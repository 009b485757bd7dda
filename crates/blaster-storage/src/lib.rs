//! Mapping store implementations.
//!
//! [`RedisStore`] talks to the external key-value service and is what the
//! gateway runs against. [`InMemoryStore`] honours the same contract inside
//! the process and can simulate a backend outage for tests.

pub mod memory;
pub mod redis;

pub use blaster_core::{ExpirationPolicy, StoreError, UrlStore};
pub use crate::memory::InMemoryStore;
pub use crate::redis::{RedisStore, RedisStoreSettings};

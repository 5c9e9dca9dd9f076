//! Key-value persistence with simulated latency.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::{query, query_scalar, SqlitePool};
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, warn};

use crate::errors::FleetResult;

/// Artificial delays, in milliseconds, applied before each kind of store call.
pub mod latency {
    pub const READ: u64 = 300;
    pub const LOOKUP: u64 = 200;
    pub const WRITE: u64 = 400;
    pub const DELETE: u64 = 300;
    pub const REMINDER_READ: u64 = 200;
    pub const REMINDER_WRITE: u64 = 250;
    pub const USER_READ: u64 = 250;
    pub const USER_WRITE: u64 = 350;
}

/// Cloneable handle to the fleet store.
///
/// All clones share one write lock, so read-modify-write sequences on a
/// collection are serialized.
#[derive(Debug, Clone)]
pub struct Store {
    pool: SqlitePool,
    latency: bool,
    write_lock: Arc<Mutex<()>>,
}

impl Store {
    pub fn new(pool: SqlitePool, latency: bool) -> Self {
        Self {
            pool,
            latency,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub const fn latency_enabled(&self) -> bool {
        self.latency
    }

    /// Sleeps for `millis` unless latency is disabled.
    pub async fn pause(&self, millis: u64) {
        if self.latency {
            tokio::time::sleep(Duration::from_millis(millis)).await;
        }
    }

    pub async fn write_lock(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }

    /// Reads `key`, storing `default` the first time so later reads agree.
    pub async fn get<T>(&self, key: &str, default: impl FnOnce() -> T) -> FleetResult<T>
    where
        T: Serialize + DeserializeOwned,
    {
        let stored: Option<String> = query_scalar("SELECT value FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        if let Some(raw) = stored {
            return Ok(serde_json::from_str(&raw)?);
        }

        debug!(key, "seeding missing key");
        let value = default();
        let raw = serde_json::to_string(&value)?;
        // Another caller may have seeded the key first; keep whichever landed.
        let inserted = query("INSERT OR IGNORE INTO kv_store (key, value) VALUES (?, ?)")
            .bind(key)
            .bind(&raw)
            .execute(&self.pool)
            .await?
            .rows_affected();

        let raw = if inserted == 0 {
            warn!(key, "key seeded concurrently, rereading");
            query_scalar("SELECT value FROM kv_store WHERE key = ?")
                .bind(key)
                .fetch_one(&self.pool)
                .await?
        } else {
            raw
        };

        // Decode what was stored, not `value`, so this read matches every later one.
        Ok(serde_json::from_str(&raw)?)
    }

    pub async fn set<T>(&self, key: &str, value: &T) -> FleetResult<()>
    where
        T: Serialize + ?Sized,
    {
        let raw = serde_json::to_string(value)?;
        query(
            "INSERT INTO kv_store (key, value) VALUES (?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        )
        .bind(key)
        .bind(raw)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::create_memory_pool;

    async fn setup_test_store() -> Result<Store, sqlx::Error> {
        Ok(Store::new(create_memory_pool().await?, false))
    }

    #[tokio::test]
    async fn first_read_persists_the_default() -> Result<(), Box<dyn std::error::Error>> {
        let store = setup_test_store().await?;

        let first: Vec<u32> = store.get("numbers", || vec![1, 2, 3]).await?;
        let second: Vec<u32> = store.get("numbers", || vec![9]).await?;

        assert_eq!(first, vec![1, 2, 3]);
        assert_eq!(second, vec![1, 2, 3]);
        Ok(())
    }

    #[tokio::test]
    async fn seeded_floats_read_back_identically() -> Result<(), Box<dyn std::error::Error>> {
        let store = setup_test_store().await?;
        let awkward = vec![9.866_437_777_792_157_f64, 1.220_212_786_037_412_1, 0.1 + 0.2];

        let first: Vec<f64> = store.get("floats", || awkward.clone()).await?;
        let second: Vec<f64> = store.get("floats", Vec::new).await?;

        assert_eq!(first, second);
        assert_eq!(second, awkward);
        Ok(())
    }

    #[tokio::test]
    async fn set_overwrites_existing_value() -> Result<(), Box<dyn std::error::Error>> {
        let store = setup_test_store().await?;

        store.set("names", &vec!["a".to_string()]).await?;
        store.set("names", &vec!["b".to_string(), "c".to_string()]).await?;
        let names: Vec<String> = store.get("names", Vec::new).await?;

        assert_eq!(names, vec!["b", "c"]);
        Ok(())
    }

    #[tokio::test]
    async fn corrupt_value_is_a_serialization_error() -> Result<(), Box<dyn std::error::Error>> {
        let store = setup_test_store().await?;
        query("INSERT INTO kv_store (key, value) VALUES ('broken', '{not json')")
            .execute(store.pool())
            .await?;

        let result: FleetResult<Vec<u32>> = store.get("broken", Vec::new).await;

        assert!(matches!(
            result,
            Err(crate::errors::FleetError::Serialization(_))
        ));
        Ok(())
    }

    #[tokio::test]
    async fn pause_is_skipped_without_latency() -> Result<(), Box<dyn std::error::Error>> {
        let store = setup_test_store().await?;
        let started = std::time::Instant::now();
        store.pause(latency::WRITE).await;
        assert!(started.elapsed() < Duration::from_millis(latency::WRITE));
        Ok(())
    }
}

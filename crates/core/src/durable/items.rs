//! [`DurableLayer`] implementation over the `sync_items` table.

use async_trait::async_trait;
use serde_json::Value;
use tokio_rusqlite::params;

use super::connection::SyncDb;
use super::{DurableLayer, Quota, StoredItems};
use crate::Error;

/// Decode a stored value. Text that isn't JSON (written by a foreign client)
/// is surfaced as a plain string so the schema filter can reject it.
fn decode_value(raw: String) -> Value {
    serde_json::from_str(&raw).unwrap_or(Value::String(raw))
}

#[async_trait]
impl DurableLayer for SyncDb {
    async fn get(&self, key: Option<&str>) -> Result<StoredItems, Error> {
        let key = key.map(str::to_string);
        self.conn
            .call(move |conn| -> Result<StoredItems, Error> {
                let mut items = StoredItems::new();
                match key {
                    Some(key) => {
                        let mut stmt = conn.prepare("SELECT key, value FROM sync_items WHERE key = ?1")?;
                        let rows = stmt.query_map(params![key], |row| {
                            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
                        })?;
                        for row in rows {
                            let (k, v) = row?;
                            items.insert(k, decode_value(v));
                        }
                    }
                    None => {
                        let mut stmt = conn.prepare("SELECT key, value FROM sync_items")?;
                        let rows =
                            stmt.query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?;
                        for row in rows {
                            let (k, v) = row?;
                            items.insert(k, decode_value(v));
                        }
                    }
                }
                Ok(items)
            })
            .await
            .map_err(Error::from)
    }

    async fn set(&self, items: StoredItems) -> Result<(), Error> {
        let quota = self.quota;
        let mut encoded = Vec::with_capacity(items.len());
        for (key, value) in items {
            let text = serde_json::to_string(&value)
                .map_err(|e| Error::InvalidInput(format!("failed to encode value for {key}: {e}")))?;
            let size = Quota::entry_size(&key, &text);
            if size > quota.bytes_per_item {
                return Err(Error::quota_exceeded(format!(
                    "item {key} is {size} bytes, limit is {}",
                    quota.bytes_per_item
                )));
            }
            encoded.push((key, text));
        }

        let now = chrono::Utc::now().to_rfc3339();
        self.conn
            .call(move |conn| -> Result<(), Error> {
                let tx = conn.transaction()?;
                for (key, text) in &encoded {
                    tx.execute(
                        "INSERT INTO sync_items (key, value, updated_at) VALUES (?1, ?2, ?3)
                        ON CONFLICT(key) DO UPDATE SET
                            value = excluded.value,
                            updated_at = excluded.updated_at",
                        params![key, text, now],
                    )?;
                }

                let (count, bytes): (i64, i64) = tx.query_row(
                    "SELECT COUNT(*), COALESCE(SUM(length(CAST(key AS BLOB)) + length(CAST(value AS BLOB))), 0)
                    FROM sync_items",
                    [],
                    |row| Ok((row.get(0)?, row.get(1)?)),
                )?;

                if count as usize > quota.max_items {
                    return Err(Error::quota_exceeded(format!("{count} items, limit is {}", quota.max_items)));
                }
                if bytes as usize > quota.bytes {
                    return Err(Error::quota_exceeded(format!("{bytes} bytes, limit is {}", quota.bytes)));
                }

                tx.commit()?;
                Ok(())
            })
            .await
            .map_err(Error::from)
    }

    async fn remove(&self, key: &str) -> Result<(), Error> {
        let key = key.to_string();
        self.conn
            .call(move |conn| -> Result<(), Error> {
                let deleted = conn.execute("DELETE FROM sync_items WHERE key = ?1", params![key])?;
                if deleted == 0 {
                    tracing::debug!(%key, "remove of absent key");
                }
                Ok(())
            })
            .await
            .map_err(Error::from)
    }

    async fn clear(&self) -> Result<(), Error> {
        self.conn
            .call(|conn| -> Result<(), Error> {
                let deleted = conn.execute("DELETE FROM sync_items", [])?;
                tracing::debug!(deleted, "cleared sync items");
                Ok(())
            })
            .await
            .map_err(Error::from)
    }
}

//! Database connection management with pragma configuration.
//!
//! Every client that opens the same database file sees the same items;
//! WAL mode lets several processes read while one writes.

use super::{Quota, migrations};
use crate::Error;
use std::path::Path;
use tokio_rusqlite::Connection;

const PRAGMAS: &str = "PRAGMA journal_mode=WAL;
     PRAGMA synchronous=NORMAL;
     PRAGMA temp_store=MEMORY;
     PRAGMA busy_timeout=5000;";

/// Synchronized item database handle.
///
/// Wraps a tokio-rusqlite Connection that runs database operations
/// on a background thread. Cloning shares the connection.
#[derive(Clone, Debug)]
pub struct SyncDb {
    pub(crate) conn: Connection,
    pub(crate) quota: Quota,
}

impl SyncDb {
    /// Open a database at the specified path.
    ///
    /// Creates the file if it doesn't exist, applies pragmas,
    /// and runs any pending migrations.
    pub async fn open(path: impl AsRef<Path>, quota: Quota) -> Result<Self, Error> {
        let path = path.as_ref().to_path_buf();
        let conn = Connection::open(&path).await.map_err(Error::from)?;
        Self::prepare(conn, quota).await.inspect(|_| {
            tracing::info!(path = %path.display(), "opened sync database");
        })
    }

    /// Open an in-memory database for testing.
    pub async fn open_in_memory() -> Result<Self, Error> {
        Self::open_in_memory_with_quota(Quota::default()).await
    }

    /// Open an in-memory database with explicit limits.
    pub async fn open_in_memory_with_quota(quota: Quota) -> Result<Self, Error> {
        let conn = Connection::open_in_memory().await.map_err(Error::from)?;
        Self::prepare(conn, quota).await
    }

    async fn prepare(conn: Connection, quota: Quota) -> Result<Self, Error> {
        conn.call(|conn| conn.execute_batch(PRAGMAS))
            .await
            .map_err(Error::from)?;

        migrations::run(&conn).await?;

        Ok(Self { conn, quota })
    }

    /// Limits enforced on writes.
    pub fn quota(&self) -> Quota {
        self.quota
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_in_memory() {
        let db = SyncDb::open_in_memory().await.unwrap();
        let version = db
            .conn
            .call(|conn| conn.query_row("SELECT sqlite_version()", [], |row| row.get::<_, String>(0)))
            .await
            .unwrap();
        assert!(!version.is_empty());
        assert_eq!(db.quota(), Quota::default());
    }
}

use crate::Result;
use sqlx::{
    Pool, Sqlite, SqlitePool,
    migrate::Migrator,
    sqlite::{SqliteConnectOptions, SqliteJournalMode},
};
use std::path::Path;
use tracing::trace;

static MIGRATOR: Migrator = sqlx::migrate!("../db/migrations");

/// An object that represents a connection to the location catalog database
#[derive(Clone, Debug)]
pub struct Database(Pool<Sqlite>);

impl From<Pool<Sqlite>> for Database {
    /// **WARNING**: This is primarily intended for tests. You should probably
    /// use [Database::open()] instead of creating the pool yourself, since
    /// [Database::open()] will ensure the database schema automatically.
    fn from(value: Pool<Sqlite>) -> Self {
        Self(value)
    }
}

impl Database {
    /// Open a connection to the specified database file, creating it if it
    /// doesn't exist yet, and ensure that the application tables are present.
    /// WAL mode keeps page renders readable while an insert is in flight.
    pub async fn open<P: AsRef<Path>>(db: P) -> Result<Self> {
        let dbpool = SqlitePool::connect_with(
            SqliteConnectOptions::new()
                .filename(db)
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal),
        )
        .await?;
        let db = Database(dbpool);
        db.ensure_schema().await?;
        Ok(db)
    }

    /// Make sure the application tables exist. Safe to run any number of
    /// times; an already up-to-date database is left untouched.
    pub async fn ensure_schema(&self) -> Result<()> {
        trace!("Ensuring database schema");
        MIGRATOR.run(&self.0).await.map_err(Into::into)
    }

    /// gets a reference to the underlying sqlx connection pool
    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::{Category, Location};
    use sqlx::Pool;
    use test_log::test;

    #[test(sqlx::test(migrations = false))]
    async fn test_ensure_schema_idempotent(pool: Pool<Sqlite>) {
        let db = Database::from(pool);
        db.ensure_schema().await.expect("first ensure failed");

        let mut loc = Location::new(
            "Örebro Castle".to_string(),
            59.2741,
            15.2151,
            Category::Historical,
        );
        loc.insert(&db).await.expect("failed to insert");

        // running the schema ensure again must not error or lose data
        db.ensure_schema().await.expect("second ensure failed");
        db.ensure_schema().await.expect("third ensure failed");

        let locations = Location::load_all(&db).await.expect("failed to load");
        assert_eq!(locations.len(), 1);
        assert_eq!(locations[0].name, "Örebro Castle");
    }
}

//! Objects to manage user-uploaded pictures and their on-disk files
use crate::{
    Database,
    error::{Error, Result},
};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteQueryResult;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A data type that represents one uploaded picture: the name of the file
/// holding the binary content and a free-text reference to the location it
/// was taken at.
///
/// The `location` field is a soft reference: it is *not* a foreign key into
/// the locations table, and nothing prevents it from naming a location that
/// doesn't exist. That looseness is intentional and must be preserved.
#[derive(Debug, sqlx::FromRow, Deserialize, Serialize, PartialEq, Clone)]
pub struct Image {
    /// A unique ID that identifies this image record in the database
    pub id: i64,

    /// The original upload filename, used verbatim as the storage key under
    /// the uploads directory. Uploading a second file with the same name
    /// silently overwrites the first one's content.
    pub filename: String,

    /// The name of the location this picture refers to
    pub location: String,
}

impl Image {
    /// Loads all image records from the database in the store's natural
    /// order. This only reads the rows; whether the referenced files still
    /// exist on disk is the renderer's problem.
    pub async fn load_all(db: &Database) -> Result<Vec<Image>> {
        sqlx::query_as("SELECT id, filename, location FROM images")
            .fetch_all(db.pool())
            .await
            .map_err(|e| e.into())
    }

    /// Add this image record to the database. If this call completes
    /// successfully, the id of this object will be updated to the ID of the
    /// inserted row
    pub async fn insert(&mut self, db: &Database) -> Result<SqliteQueryResult> {
        if self.id != -1 {
            return Err(Error::InvalidInsertObjectAlreadyExists(self.id));
        }

        sqlx::query(r#"INSERT INTO images (filename, location) VALUES (?, ?)"#)
            .bind(&self.filename)
            .bind(&self.location)
            .execute(db.pool())
            .await
            .inspect(|r| self.id = r.last_insert_rowid())
            .map_err(|e| e.into())
    }

    /// Store an uploaded picture: write `content` to this image's path under
    /// `uploads_dir` (creating the directory if needed, overwriting any
    /// existing file with the same name), then insert the database row.
    ///
    /// The two steps are not atomic. A failure after the file write leaves
    /// an orphaned file; there is no dangling-row window in this direction
    /// because the file write happens before the insert.
    pub async fn save(
        &mut self,
        content: &[u8],
        uploads_dir: &Path,
        db: &Database,
    ) -> Result<SqliteQueryResult> {
        tokio::fs::create_dir_all(uploads_dir).await?;
        let path = self.file_path(uploads_dir);
        debug!("writing {} bytes to {path:?}", content.len());
        tokio::fs::write(&path, content).await?;
        self.insert(db).await
    }

    /// The on-disk path of this image's binary content
    pub fn file_path(&self, uploads_dir: &Path) -> PathBuf {
        uploads_dir.join(&self.filename)
    }

    /// Creates a new image object with the given data. It will initially
    /// have an invalid ID until it is inserted into the database
    pub fn new(filename: String, location: String) -> Self {
        Self {
            id: -1,
            filename,
            location,
        }
    }
}

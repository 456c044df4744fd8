//! Objects to manage the points of interest shown on the city map
use crate::{
    Database,
    error::{Error, Result},
};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteQueryResult;
use std::ops::RangeInclusive;
use strum_macros::{Display, EnumIter, EnumString};

/// The range of latitudes that the application accepts for a new location.
/// Both endpoints are valid values.
pub const LATITUDE_RANGE: RangeInclusive<f64> = 59.0..=60.0;

/// The range of longitudes that the application accepts for a new location
pub const LONGITUDE_RANGE: RangeInclusive<f64> = 15.0..=16.0;

/// The closed set of categories that a location can be tagged with. Stored
/// in the database as the variant name.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Display, EnumIter,
    EnumString,
)]
pub enum Category {
    Historical,
    Cultural,
    Nature,
    Food,
    Shopping,
    Bikes,
}

/// A data type that represents a named geographic point of interest in the
/// city, tagged with a [Category]
#[derive(Debug, sqlx::FromRow, Deserialize, Serialize, PartialEq, Clone)]
pub struct Location {
    /// A unique ID that identifies this location in the database
    pub id: i64,

    /// The name of the location
    pub name: String,

    /// The latitude of the location
    #[sqlx(rename = "lat")]
    pub latitude: f64,

    /// The longitude of the location
    #[sqlx(rename = "lon")]
    pub longitude: f64,

    /// The category this location is tagged with
    pub category: Category,
}

impl Location {
    /// Loads all locations from the database. Rows come back in the store's
    /// natural order; callers must not assume any particular sorting.
    pub async fn load_all(db: &Database) -> Result<Vec<Location>> {
        sqlx::query_as("SELECT id, name, lat, lon, category FROM locations")
            .fetch_all(db.pool())
            .await
            .map_err(|e| e.into())
    }

    /// Add this location to the database. If this call completes
    /// successfully, the id of this object will be updated to the ID of the
    /// inserted row. The repository layer does not validate coordinates or
    /// the name; see [Location::validate].
    pub async fn insert(&mut self, db: &Database) -> Result<SqliteQueryResult> {
        if self.id != -1 {
            return Err(Error::InvalidInsertObjectAlreadyExists(self.id));
        }

        sqlx::query(
            r#"INSERT INTO locations
          (name, lat, lon, category)
          VALUES (?, ?, ?, ?)"#,
        )
        .bind(&self.name)
        .bind(self.latitude)
        .bind(self.longitude)
        .bind(self.category)
        .execute(db.pool())
        .await
        .inspect(|r| self.id = r.last_insert_rowid())
        .map_err(|e| e.into())
    }

    /// Check that this location's coordinates fall within the supported
    /// ranges (endpoints included). The html form constrains its inputs to
    /// the same ranges, but anything that reaches the handlers outside of
    /// the form widgets must re-invoke this check explicitly.
    pub fn validate(&self) -> Result<()> {
        if !LATITUDE_RANGE.contains(&self.latitude) {
            return Err(Error::LatitudeOutOfRange {
                lat: self.latitude,
                min: *LATITUDE_RANGE.start(),
                max: *LATITUDE_RANGE.end(),
            });
        }
        if !LONGITUDE_RANGE.contains(&self.longitude) {
            return Err(Error::LongitudeOutOfRange {
                lon: self.longitude,
                min: *LONGITUDE_RANGE.start(),
                max: *LONGITUDE_RANGE.end(),
            });
        }
        Ok(())
    }

    /// Creates a new location object with the given data. It will initially
    /// have an invalid ID until it is inserted into the database
    pub fn new(name: String, latitude: f64, longitude: f64, category: Category) -> Self {
        Self {
            id: -1,
            name,
            latitude,
            longitude,
            category,
        }
    }
}

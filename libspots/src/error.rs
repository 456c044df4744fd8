//! Objects related to reporting errors from this library

/// A list of error types that can occur within this library
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("can't insert the object, it already exists in the database with id = {}", .0)]
    InvalidInsertObjectAlreadyExists(i64),

    #[error("latitude {lat} is outside the supported range [{min}, {max}]")]
    LatitudeOutOfRange { lat: f64, min: f64, max: f64 },

    #[error("longitude {lon} is outside the supported range [{min}, {max}]")]
    LongitudeOutOfRange { lon: f64, min: f64, max: f64 },

    #[error(transparent)]
    DatabaseError(#[from] sqlx::Error),

    #[error(transparent)]
    DatabaseMigrationError(#[from] sqlx::migrate::MigrateError),

    #[error("I/O error while storing an image file")]
    ImageFileError(#[from] std::io::Error),
}

/// A convenience type alias for a [Result] with [Error] as its error type
pub type Result<T, E = Error> = std::result::Result<T, E>;

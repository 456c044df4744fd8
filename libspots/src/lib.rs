//! This is a library that provides the data objects for a small city
//! location catalog: named points of interest on a map and user-uploaded
//! pictures that reference them, all stored in a local sqlite database.

use serde::{Deserialize, Deserializer};
use std::str::FromStr;

pub mod database;
pub mod error;
pub mod image;
pub mod location;

pub use database::Database;
pub use error::Error;
pub use error::Result;

/// A serde helper for html form fields: browsers submit an empty string for
/// fields the user left blank, which should deserialize as `None`.
pub fn empty_string_as_none<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let opt = Option::<String>::deserialize(de)?;
    match opt.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => FromStr::from_str(s)
            .map_err(serde::de::Error::custom)
            .map(Some),
    }
}

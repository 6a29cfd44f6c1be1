//! Row-mapping and column helpers shared by the query modules.

use jiff::Timestamp;
use rusqlite::{types::Type, Row};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Result, TrackerError};

/// Read a required timestamp column stored as RFC 3339 text.
pub(crate) fn timestamp_col(row: &Row, idx: usize) -> rusqlite::Result<Timestamp> {
    row.get::<_, String>(idx)?
        .parse::<Timestamp>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Read an optional timestamp column stored as RFC 3339 text.
pub(crate) fn opt_timestamp_col(row: &Row, idx: usize) -> rusqlite::Result<Option<Timestamp>> {
    row.get::<_, Option<String>>(idx)?
        .map(|s| {
            s.parse::<Timestamp>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
            })
        })
        .transpose()
}

/// Read a JSON column into a value type, treating NULL as the default.
///
/// Used for opaque payload columns (pitfalls, resources, vision, pedagogy);
/// the engine round-trips these but never branches on their contents.
pub(crate) fn json_col<T: DeserializeOwned + Default>(
    row: &Row,
    idx: usize,
) -> rusqlite::Result<T> {
    match row.get::<_, Option<String>>(idx)? {
        Some(text) => serde_json::from_str(&text).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
        }),
        None => Ok(T::default()),
    }
}

/// Read an optional JSON column into a value type.
pub(crate) fn opt_json_col<T: DeserializeOwned>(
    row: &Row,
    idx: usize,
) -> rusqlite::Result<Option<T>> {
    row.get::<_, Option<String>>(idx)?
        .map(|text| {
            serde_json::from_str(&text).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
            })
        })
        .transpose()
}

/// Serialize a payload value for storage, mapping None (or an empty list)
/// to NULL.
pub(crate) fn to_json_col<T: Serialize>(value: Option<&T>) -> Result<Option<String>> {
    value
        .map(|v| serde_json::to_string(v).map_err(TrackerError::from))
        .transpose()
}

/// Serialize a string list for storage; empty lists become NULL.
pub(crate) fn list_to_json_col(values: &[String]) -> Result<Option<String>> {
    if values.is_empty() {
        Ok(None)
    } else {
        Ok(Some(serde_json::to_string(values)?))
    }
}

/// Parse a status column with a descriptive conversion error.
pub(crate) fn status_col<T: std::str::FromStr>(row: &Row, idx: usize) -> rusqlite::Result<T> {
    let text: String = row.get(idx)?;
    text.parse::<T>().map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Text,
            Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Invalid status: {text}"),
            )),
        )
    })
}

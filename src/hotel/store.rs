//! Loading and saving the Hotel Record Store.
//!
//! The whole file is read at once and rewritten at once. Saves go through a
//! temporary sibling file so an interrupted write never truncates the store.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use super::HotelRecord;
use crate::utils::path::write_atomic;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("hotel data file `{0}` not found")]
    NotFound(PathBuf),

    #[error("IO error when accessing `{0}`")]
    Io(PathBuf, #[source] io::Error),

    #[error("malformed JSON in `{path}`")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("`{0}` must hold a top-level JSON array of hotels")]
    NotAnArray(PathBuf),

    #[error("entry {index} of `{path}` is not a JSON object")]
    NotAnObject { path: PathBuf, index: usize },

    #[error("failed to serialize hotels")]
    Serialize(#[source] serde_json::Error),
}

/// Read every record, in file order.
pub fn load(path: &Path) -> Result<Vec<HotelRecord>, StoreError> {
    let content = fs::read_to_string(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => StoreError::NotFound(path.to_path_buf()),
        _ => StoreError::Io(path.to_path_buf(), err),
    })?;
    parse(&content, path)
}

/// Parse store content. `path` is only used in error messages.
pub fn parse(content: &str, path: &Path) -> Result<Vec<HotelRecord>, StoreError> {
    let value: Value = serde_json::from_str(content).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let Value::Array(items) = value else {
        return Err(StoreError::NotAnArray(path.to_path_buf()));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(map) => Ok(HotelRecord::new(map)),
            _ => Err(StoreError::NotAnObject {
                path: path.to_path_buf(),
                index,
            }),
        })
        .collect()
}

/// Serialize as two-space indented JSON with a trailing newline.
pub fn to_json(hotels: &[HotelRecord]) -> Result<String, StoreError> {
    let mut json = serde_json::to_string_pretty(hotels).map_err(StoreError::Serialize)?;
    json.push('\n');
    Ok(json)
}

/// Replace the store file with `hotels`.
pub fn save(path: &Path, hotels: &[HotelRecord]) -> Result<(), StoreError> {
    let json = to_json(hotels)?;
    write_atomic(path, json.as_bytes()).map_err(|err| StoreError::Io(path.to_path_buf(), err))
}

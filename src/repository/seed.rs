//! Seed catalog loading

use std::{fs, path::Path};

use crate::{
    error::{AppError, AppResult},
    models::CatalogSnapshot,
};

/// Read a seed catalog from a JSON file
pub fn load(path: impl AsRef<Path>) -> AppResult<CatalogSnapshot> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|e| {
        AppError::Internal(format!("Failed to read seed file {}: {}", path.display(), e))
    })?;
    let snapshot = parse(&raw)?;
    tracing::info!(
        "Loaded seed {} ({} books, {} authors, {} publications)",
        path.display(),
        snapshot.books.len(),
        snapshot.authors.len(),
        snapshot.publications.len()
    );
    Ok(snapshot)
}

/// Parse a seed catalog document
pub fn parse(raw: &str) -> AppResult<CatalogSnapshot> {
    serde_json::from_str(raw).map_err(|e| AppError::Validation(format!("Invalid seed catalog: {}", e)))
}

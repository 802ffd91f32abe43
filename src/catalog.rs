// src/catalog.rs
use crate::errors::CatalogError;
use crate::podcast::Podcast;
use log::info;
use std::fs;
use std::path::Path;

/// Sample podcasts compiled into the binary, used when no `--data` file is given.
pub const BUNDLED_CATALOG: &str = include_str!("../data/podcasts.json");

/// Parses a JSON array of podcast records.
pub fn parse_catalog(json: &str) -> Result<Vec<Podcast>, CatalogError> {
    Ok(serde_json::from_str(json)?)
}

pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Vec<Podcast>, CatalogError> {
    let content = fs::read_to_string(path.as_ref())?;
    let podcasts = parse_catalog(&content)?;
    info!("Loaded {} podcast(s) from {}", podcasts.len(), path.as_ref().display());
    Ok(podcasts)
}

pub fn bundled_catalog() -> Result<Vec<Podcast>, CatalogError> {
    parse_catalog(BUNDLED_CATALOG)
}

// errors.rs
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenreError {
    #[error("Genre lookup failed: {0}")]
    LookupFailed(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateFormatError {
    #[error("Invalid ISO-8601 date: '{0}'")]
    InvalidDate(String),
}

#[derive(Error, Debug)]
pub enum CardError {
    #[error("Could not resolve genre names: {0}")]
    Genre(#[from] GenreError),

    #[error("Could not format last-updated date: {0}")]
    Date(#[from] DateFormatError),
}

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Element '{0}' is already defined")]
    AlreadyDefined(String),

    #[error("Element '{0}' is not defined")]
    NotDefined(String),
}

#[derive(Error, Debug)]
pub enum GridError {
    #[error("Grid container '#{0}' not found in document")]
    ContainerNotFound(String),

    #[error("Failed to enrich podcast '{id}': {source}")]
    Enrichment {
        id: String,
        #[source]
        source: CardError,
    },

    #[error("Failed to bind podcast to card: {0}")]
    Card(#[from] CardError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read podcast catalog: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("Failed to parse podcast catalog: {0}")]
    ParseError(#[from] serde_json::Error),
}

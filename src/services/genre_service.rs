// src/services/genre_service.rs
use crate::errors::GenreError;
use log::trace;
use std::collections::HashMap;

/// Maps genre identifiers to display names.
///
/// Implementations must return one name per id, in input order.
pub trait GenreLookup {
    fn names(&self, genre_ids: &[u32]) -> Result<Vec<String>, GenreError>;
}

pub const UNKNOWN_GENRE: &str = "Unknown";

const DEFAULT_GENRES: [(u32, &str); 9] = [
    (1, "Personal Growth"),
    (2, "Investigative Journalism"),
    (3, "History"),
    (4, "Comedy"),
    (5, "Entertainment"),
    (6, "Business"),
    (7, "Fiction"),
    (8, "News"),
    (9, "Kids and Family"),
];

// ===== Table backed lookup
#[derive(Debug, Clone)]
pub struct GenreService {
    table: HashMap<u32, String>,
}

impl Default for GenreService {
    fn default() -> Self {
        Self::from_pairs(DEFAULT_GENRES.iter().map(|(id, name)| (*id, name.to_string())))
    }
}

impl GenreService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (u32, String)>,
    {
        Self { table: pairs.into_iter().collect() }
    }

    pub fn name(&self, id: u32) -> &str {
        self.table.get(&id).map(String::as_str).unwrap_or(UNKNOWN_GENRE)
    }
}

impl GenreLookup for GenreService {
    fn names(&self, genre_ids: &[u32]) -> Result<Vec<String>, GenreError> {
        trace!("GenreService: resolving {} genre ids", genre_ids.len());
        Ok(genre_ids.iter().map(|id| self.name(*id).to_string()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_preserve_order_and_length() {
        let service = GenreService::new();
        let names = service.names(&[8, 4, 1]).unwrap();

        assert_eq!(names, vec!["News", "Comedy", "Personal Growth"]);
    }

    #[test]
    fn test_unknown_id_maps_to_placeholder() {
        let service = GenreService::new();

        assert_eq!(service.names(&[42]).unwrap(), vec![UNKNOWN_GENRE]);
    }

    #[test]
    fn test_custom_table() {
        let service =
            GenreService::from_pairs([(1, "Comedy".to_string()), (2, "News".to_string())]);

        assert_eq!(service.names(&[2, 1]).unwrap(), vec!["News", "Comedy"]);
        assert!(service.names(&[]).unwrap().is_empty());
    }
}

// src/services/mod.rs
//! Collaborators the card and the grid depend on only through their contracts.
pub mod date_utils;
pub mod genre_service;

pub use date_utils::{DateFormat, DateUtils};
pub use genre_service::{GenreLookup, GenreService};

use crate::podcast::Podcast;

/// Shows the details of a selected podcast. Fire-and-forget from the grid's point of view.
pub trait ModalOpener {
    fn open(&self, podcast: &Podcast);
}

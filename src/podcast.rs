// src/podcast.rs
use serde::{Deserialize, Serialize};

/// One podcast as handed to the grid, raw or enriched.
///
/// Every field defaults when absent from the JSON so that a half-filled record still renders
/// (an absent title shows as an empty string instead of failing).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Podcast {
    #[serde(rename = "id")]
    id: String,
    #[serde(rename = "title")]
    title: String,
    #[serde(rename = "image")]
    image: String,
    #[serde(rename = "seasons")]
    seasons: u32,
    #[serde(rename = "genres")]
    genres: Vec<u32>,
    #[serde(rename = "updated")]
    updated: String,
    #[serde(rename = "genreNames", skip_serializing_if = "Option::is_none")]
    genre_names: Option<Vec<String>>,
    #[serde(rename = "formattedDate", skip_serializing_if = "Option::is_none")]
    formatted_date: Option<String>,
    #[serde(rename = "description", skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl Podcast {
    pub fn new(
        id: &str,
        title: &str,
        image: &str,
        seasons: u32,
        genres: Vec<u32>,
        updated: &str,
    ) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            image: image.to_string(),
            seasons,
            genres,
            updated: updated.to_string(),
            ..Self::default()
        }
    }

    // Builder methods
    pub fn with_genre_names(mut self, names: Vec<String>) -> Self {
        self.genre_names = Some(names);
        self
    }

    pub fn with_formatted_date(mut self, date: String) -> Self {
        self.formatted_date = Some(date);
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    // Accessor methods

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn seasons(&self) -> u32 {
        self.seasons
    }

    pub fn genres(&self) -> &[u32] {
        &self.genres
    }

    pub fn updated(&self) -> &str {
        &self.updated
    }

    pub fn genre_names(&self) -> Option<&[String]> {
        self.genre_names.as_deref()
    }

    pub fn formatted_date(&self) -> Option<&str> {
        self.formatted_date.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// `"1 season"` for exactly one season, `"{n} seasons"` otherwise (zero included).
    pub fn seasons_label(&self) -> String {
        seasons_label(self.seasons)
    }
}

pub fn seasons_label(seasons: u32) -> String {
    if seasons == 1 { "1 season".to_string() } else { format!("{} seasons", seasons) }
}

// src/registry.rs
//! Tag name -> card factory registration, performed once at start-up.
use crate::errors::RegistryError;
use crate::services::{DateFormat, GenreLookup};
use crate::widgets::preview_card::{PREVIEW_CARD_TAG, PreviewCard};
use log::{debug, info};
use std::collections::HashMap;
use std::rc::Rc;

pub type ElementFactory = Box<dyn Fn() -> PreviewCard>;

#[derive(Default)]
pub struct ElementRegistry {
    definitions: HashMap<String, ElementFactory>,
}

impl std::fmt::Debug for ElementRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElementRegistry").field("tags", &self.definitions.keys().collect::<Vec<_>>()).finish()
    }
}

impl ElementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define<F>(&mut self, tag: &str, factory: F) -> Result<(), RegistryError>
    where
        F: Fn() -> PreviewCard + 'static,
    {
        if self.is_defined(tag) {
            return Err(RegistryError::AlreadyDefined(tag.to_string()));
        }
        info!("ElementRegistry: defined <{}>", tag);
        self.definitions.insert(tag.to_string(), Box::new(factory));
        Ok(())
    }

    pub fn is_defined(&self, tag: &str) -> bool {
        self.definitions.contains_key(tag)
    }

    pub fn create(&self, tag: &str) -> Result<PreviewCard, RegistryError> {
        let factory = self.definitions.get(tag).ok_or_else(|| RegistryError::NotDefined(tag.to_string()))?;
        Ok(factory())
    }
}

/// Registers the preview card under [`PREVIEW_CARD_TAG`] unless something already claimed it.
///
/// Returns whether this call performed the registration.
pub fn define_preview_card(
    registry: &mut ElementRegistry,
    genres: Rc<dyn GenreLookup>,
    dates: Rc<dyn DateFormat>,
) -> bool {
    if registry.is_defined(PREVIEW_CARD_TAG) {
        debug!("ElementRegistry: <{}> already defined, skipping", PREVIEW_CARD_TAG);
        return false;
    }
    registry
        .define(PREVIEW_CARD_TAG, move || PreviewCard::new(Rc::clone(&genres), Rc::clone(&dates)))
        .is_ok()
}

// src/host.rs
//! The surrounding document: named containers plus the root event target.
use crate::events::{EventTarget, ListenerId, SelectionEvent};
use crate::widgets::preview_card::PreviewCard;
use log::debug;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

pub const GRID_CONTAINER_ID: &str = "podcast-grid";

/// An element that holds cards. Appending a card links its host target under the container so
/// selection notifications keep climbing to the document.
#[derive(Debug)]
pub struct Container {
    id: String,
    target: Rc<EventTarget>,
    cards: Vec<PreviewCard>,
}

impl Container {
    fn new(id: &str, document: &Rc<EventTarget>) -> Self {
        let target = EventTarget::new(&format!("#{}", id));
        target.set_parent(document);
        Self { id: id.to_string(), target, cards: Vec::new() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn append(&mut self, card: PreviewCard) {
        card.host().set_parent(&self.target);
        self.cards.push(card);
    }

    /// Drops every card; their targets and click handlers go with them.
    pub fn clear(&mut self) {
        if !self.cards.is_empty() {
            debug!("Container #{}: removing {} card(s)", self.id, self.cards.len());
        }
        self.cards.clear();
    }

    pub fn cards(&self) -> &[PreviewCard] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn add_selection_listener<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&SelectionEvent) + 'static,
    {
        self.target.add_listener(listener)
    }
}

#[derive(Debug)]
pub struct Document {
    root: Rc<EventTarget>,
    containers: RefCell<HashMap<String, Rc<RefCell<Container>>>>,
}

impl Default for Document {
    fn default() -> Self {
        Self { root: EventTarget::new("document"), containers: RefCell::new(HashMap::new()) }
    }
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the container with `id`, creating it when it does not exist yet.
    pub fn create_container(&self, id: &str) -> Rc<RefCell<Container>> {
        let mut containers = self.containers.borrow_mut();
        Rc::clone(
            containers
                .entry(id.to_string())
                .or_insert_with(|| Rc::new(RefCell::new(Container::new(id, &self.root)))),
        )
    }

    pub fn container(&self, id: &str) -> Option<Rc<RefCell<Container>>> {
        self.containers.borrow().get(id).map(Rc::clone)
    }

    pub fn add_selection_listener<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&SelectionEvent) + 'static,
    {
        self.root.add_listener(listener)
    }
}

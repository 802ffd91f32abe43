// src/events.rs
//! Selection notifications and the target tree they travel through.
//!
//! Every element that can observe a notification owns an [`EventTarget`]. Targets are linked to
//! their parent through a weak reference, so a notification dispatched on a card's inner surface
//! climbs card -> container -> document. Targets of kind [`TargetKind::ShadowRoot`] mark a card's
//! encapsulation boundary: an event that is not `composed` stops there and never reaches the
//! light tree.
use crate::podcast::Podcast;
use log::trace;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

pub type ListenerId = usize;

type Listener = Rc<dyn Fn(&SelectionEvent)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Node,
    ShadowRoot,
}

/// Payload of a selection notification: `{ podcast }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionDetail {
    pub podcast: Podcast,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventInit {
    pub bubbles: bool,
    pub composed: bool,
}

impl Default for EventInit {
    fn default() -> Self {
        Self { bubbles: true, composed: true }
    }
}

#[derive(Debug, Clone)]
pub struct SelectionEvent {
    detail: SelectionDetail,
    init: EventInit,
}

impl SelectionEvent {
    pub const NAME: &'static str = "podcast-selected";

    /// A bubbling event that crosses encapsulation boundaries.
    pub fn new(podcast: Podcast) -> Self {
        Self::with_init(podcast, EventInit::default())
    }

    pub fn with_init(podcast: Podcast, init: EventInit) -> Self {
        Self { detail: SelectionDetail { podcast }, init }
    }

    pub fn detail(&self) -> &SelectionDetail {
        &self.detail
    }

    pub fn podcast(&self) -> &Podcast {
        &self.detail.podcast
    }

    pub fn bubbles(&self) -> bool {
        self.init.bubbles
    }

    pub fn composed(&self) -> bool {
        self.init.composed
    }
}

pub struct EventTarget {
    name: String,
    kind: TargetKind,
    parent: RefCell<Weak<EventTarget>>,
    listeners: RefCell<Vec<(ListenerId, Listener)>>,
    next_id: Cell<ListenerId>,
}

impl std::fmt::Debug for EventTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventTarget")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("listeners", &self.listeners.borrow().len())
            .finish()
    }
}

impl EventTarget {
    pub fn new(name: &str) -> Rc<Self> {
        Self::with_kind(name, TargetKind::Node)
    }

    pub fn shadow_root(name: &str) -> Rc<Self> {
        Self::with_kind(name, TargetKind::ShadowRoot)
    }

    fn with_kind(name: &str, kind: TargetKind) -> Rc<Self> {
        Rc::new(Self {
            name: name.to_string(),
            kind,
            parent: RefCell::new(Weak::new()),
            listeners: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> TargetKind {
        self.kind
    }

    pub fn set_parent(&self, parent: &Rc<EventTarget>) {
        *self.parent.borrow_mut() = Rc::downgrade(parent);
    }

    pub fn detach(&self) {
        *self.parent.borrow_mut() = Weak::new();
    }

    pub fn parent(&self) -> Option<Rc<EventTarget>> {
        self.parent.borrow().upgrade()
    }

    pub fn add_listener<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&SelectionEvent) + 'static,
    {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.listeners.borrow_mut().push((id, Rc::new(listener)));
        id
    }

    /// Returns false when no listener with that id was registered.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(listener_id, _)| *listener_id != id);
        listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    fn invoke(&self, event: &SelectionEvent) -> usize {
        // Snapshot so a listener may add or remove listeners while being called.
        let listeners: Vec<Listener> =
            self.listeners.borrow().iter().map(|(_, l)| Rc::clone(l)).collect();
        for listener in &listeners {
            listener(event);
        }
        listeners.len()
    }
}

/// Delivers `event` to `target` and, when it bubbles, to each ancestor in turn.
///
/// Returns how many listeners were called along the way.
pub fn dispatch(target: &Rc<EventTarget>, event: &SelectionEvent) -> usize {
    let mut delivered = 0;
    let mut current = Some(Rc::clone(target));

    while let Some(node) = current {
        delivered += node.invoke(event);
        if !event.bubbles() {
            break;
        }
        if node.kind() == TargetKind::ShadowRoot && !event.composed() {
            trace!("dispatch: '{}' stopped at shadow root '{}'", SelectionEvent::NAME, node.name());
            break;
        }
        current = node.parent();
    }

    trace!(
        "dispatch: '{}' for podcast '{}' reached {} listener(s)",
        SelectionEvent::NAME,
        event.podcast().id(),
        delivered
    );
    delivered
}

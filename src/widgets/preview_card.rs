// src/widgets/preview_card.rs
//! Self-contained podcast preview card.
//!
//! A card keeps its current [`Podcast`] and a set of retained element handles
//! ([`CardElements`]). `set_podcast` replaces the record and runs a render pass that refreshes
//! each element in place; drawing to a terminal buffer only reads those elements.
//!
//! Activation (`click`) dispatches a [`SelectionEvent`] from the card's inner surface. The event
//! bubbles and is composed, so it leaves the card's shadow root and reaches the host, the grid
//! container and the document.
use crate::errors::CardError;
use crate::events::{self, EventTarget, ListenerId, SelectionEvent};
use crate::podcast::{Podcast, seasons_label};
use crate::services::{DateFormat, GenreLookup};
use crate::widgets::card_styles::CardStyles;
use log::{debug, trace};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Widget, Wrap},
};
use std::cell::RefCell;
use std::rc::Rc;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const PREVIEW_CARD_TAG: &str = "podcast-preview";

/// Rows a card needs to show every element: two border rows plus cover, two title rows,
/// seasons, tags and the updated line.
pub const CARD_HEIGHT: u16 = 8;

pub(crate) type ClickHandler = Rc<dyn Fn() -> bool>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct CoverElement {
    pub src: String,
    pub alt: String,
}

/// Handles to the card's sub-elements, updated field by field on every render pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct CardElements {
    pub cover: CoverElement,
    pub title: String,
    pub seasons: String,
    pub tags: Vec<String>,
    pub updated: String,
}

pub struct PreviewCard {
    podcast: Rc<RefCell<Option<Podcast>>>,
    elements: CardElements,
    host: Rc<EventTarget>,
    shadow_root: Rc<EventTarget>,
    surface: Rc<EventTarget>,
    on_click: Option<ClickHandler>,
    genres: Rc<dyn GenreLookup>,
    dates: Rc<dyn DateFormat>,
    styles: CardStyles,
}

impl std::fmt::Debug for PreviewCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewCard")
            .field("podcast", &self.podcast.borrow().as_ref().map(|p| p.id().to_string()))
            .field("elements", &self.elements)
            .field("has_click_handler", &self.on_click.is_some())
            .finish()
    }
}

impl PreviewCard {
    pub fn new(genres: Rc<dyn GenreLookup>, dates: Rc<dyn DateFormat>) -> Self {
        let host = EventTarget::new(PREVIEW_CARD_TAG);
        let shadow_root = EventTarget::shadow_root("#shadow-root");
        let surface = EventTarget::new("article.card");
        shadow_root.set_parent(&host);
        surface.set_parent(&shadow_root);

        Self {
            podcast: Rc::new(RefCell::new(None)),
            elements: CardElements::default(),
            host,
            shadow_root,
            surface,
            on_click: None,
            genres,
            dates,
            styles: CardStyles::default(),
        }
    }

    /// Replaces the bound record and refreshes every element.
    ///
    /// Collaborator failures are returned to the caller; the previously rendered elements are
    /// left untouched in that case.
    pub fn set_podcast(&mut self, podcast: Podcast) -> Result<(), CardError> {
        debug!("PreviewCard: binding podcast '{}'", podcast.id());
        *self.podcast.borrow_mut() = Some(podcast);
        self.render()
    }

    /// The record currently bound to the card.
    pub fn podcast(&self) -> Option<Podcast> {
        self.podcast.borrow().clone()
    }

    fn render(&mut self) -> Result<(), CardError> {
        let state = Rc::clone(&self.podcast);
        let state = state.borrow();
        let Some(podcast) = state.as_ref() else {
            trace!("PreviewCard: render skipped, no podcast bound");
            return Ok(());
        };

        let genre_names: Vec<String> = match podcast.genre_names() {
            Some(names) => names.to_vec(),
            None => self.genres.names(podcast.genres())?,
        };
        let updated: String = match podcast.formatted_date() {
            Some(date) => date.to_string(),
            None => self.dates.format(podcast.updated())?,
        };

        let elements = &mut self.elements;
        elements.cover.src.clear();
        elements.cover.src.push_str(podcast.image());
        elements.cover.alt = format!("{} cover", podcast.title());
        elements.title.clear();
        elements.title.push_str(podcast.title());
        elements.seasons = seasons_label(podcast.seasons());
        elements.tags = genre_names;
        elements.updated = updated;

        drop(state);
        self.attach_click_handler();
        Ok(())
    }

    // One handler per card. It looks the record up when invoked, not when attached.
    fn attach_click_handler(&mut self) {
        let podcast = Rc::clone(&self.podcast);
        let surface = Rc::clone(&self.surface);
        self.on_click = Some(Rc::new(move || {
            let current: Option<Podcast> = podcast.borrow().clone();
            match current {
                Some(podcast) => {
                    events::dispatch(&surface, &SelectionEvent::new(podcast));
                    true
                }
                None => false,
            }
        }));
    }

    /// Activates the card surface. Returns whether a selection notification was sent.
    pub fn click(&self) -> bool {
        match self.click_handler() {
            Some(handler) => handler(),
            None => false,
        }
    }

    pub(crate) fn click_handler(&self) -> Option<ClickHandler> {
        self.on_click.clone()
    }

    pub fn add_selection_listener<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&SelectionEvent) + 'static,
    {
        self.host.add_listener(listener)
    }

    pub fn remove_selection_listener(&self, id: ListenerId) -> bool {
        self.host.remove_listener(id)
    }

    pub(crate) fn host(&self) -> &Rc<EventTarget> {
        &self.host
    }

    pub(crate) fn elements(&self) -> &CardElements {
        &self.elements
    }

    pub fn view(&self) -> CardView<'_> {
        CardView { card: self, viewport_width: None, focused: false }
    }
}

impl Drop for PreviewCard {
    fn drop(&mut self) {
        self.host.detach();
        self.shadow_root.detach();
        self.surface.detach();
    }
}

/// Draws a card. The viewport width picks the responsive title style and defaults to the width
/// of the area the card is drawn into.
pub struct CardView<'a> {
    card: &'a PreviewCard,
    viewport_width: Option<u16>,
    focused: bool,
}

impl CardView<'_> {
    pub fn viewport_width(mut self, width: u16) -> Self {
        self.viewport_width = Some(width);
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for CardView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = area.intersection(buf.area);
        if area.is_empty() {
            return;
        }
        let styles = &self.card.styles;
        let viewport_width = self.viewport_width.unwrap_or(area.width);
        let compact = CardStyles::is_compact(viewport_width);

        // Wipe whatever the host drew here so none of its styling shows through.
        Clear.render(area, buf);
        let block = Block::bordered()
            .style(styles.surface)
            .border_style(styles.border_for(self.focused));
        let inner = block.inner(area);
        block.render(area, buf);

        if self.card.podcast.borrow().is_none() {
            return;
        }
        let elements = &self.card.elements;

        let rows = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(if compact { 1 } else { 2 }),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

        Paragraph::new(Line::from(vec![
            Span::styled("▣ ", styles.cover),
            Span::styled(elements.cover.alt.as_str(), styles.cover),
        ]))
        .render(rows[0], buf);

        let title_style = styles.title_for(viewport_width);
        if compact {
            let title = truncate_to_width(&elements.title, rows[1].width as usize);
            Paragraph::new(Span::styled(title, title_style)).render(rows[1], buf);
        } else {
            Paragraph::new(Span::styled(elements.title.as_str(), title_style))
                .wrap(Wrap { trim: true })
                .render(rows[1], buf);
        }

        Paragraph::new(Span::styled(elements.seasons.as_str(), styles.seasons))
            .render(rows[2], buf);

        let mut tag_spans: Vec<Span> = Vec::with_capacity(elements.tags.len() * 2);
        for (i, name) in elements.tags.iter().enumerate() {
            if i > 0 {
                tag_spans.push(Span::raw(" "));
            }
            tag_spans.push(Span::styled(format!(" {} ", name), styles.tag));
        }
        Paragraph::new(Line::from(tag_spans)).render(rows[3], buf);

        Paragraph::new(Line::from(vec![
            Span::styled("Updated ", styles.updated),
            Span::styled(elements.updated.as_str(), styles.updated),
        ]))
        .render(rows[4], buf);
    }
}

impl Widget for &PreviewCard {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.view().render(area, buf);
    }
}

/// Cuts `text` to `width` columns, ending in an ellipsis when something was dropped.
pub fn truncate_to_width(text: &str, width: usize) -> String {
    if UnicodeWidthStr::width(text) <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut truncated = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + ch_width + 1 > width {
            break;
        }
        truncated.push(ch);
        used += ch_width;
    }
    truncated.push('…');
    truncated
}

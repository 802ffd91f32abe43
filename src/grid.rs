// src/grid.rs
//! Grid of preview cards bound to a container of the host document.
use crate::errors::{CardError, GridError};
use crate::host::{Container, Document};
use crate::podcast::Podcast;
use crate::registry::ElementRegistry;
use crate::services::{DateFormat, GenreLookup, ModalOpener};
use crate::widgets::preview_card::{CARD_HEIGHT, PREVIEW_CARD_TAG};
use log::{debug, info, trace};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Position, Rect},
    style::{Color, Style},
    widgets::{Paragraph, Widget},
};
use std::cell::{Ref, RefCell};
use std::rc::Rc;

pub const DEFAULT_MIN_CARD_WIDTH: u16 = 28;
pub const DEFAULT_GAP: u16 = 1;

/// The services the grid hands work to.
#[derive(Clone)]
pub struct Collaborators {
    pub genres: Rc<dyn GenreLookup>,
    pub dates: Rc<dyn DateFormat>,
    pub modal: Rc<dyn ModalOpener>,
}

/// Auto-fill placement: as many columns of at least `min_card_width` as fit, rows of
/// `card_height`, `gap` cells between neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    min_card_width: u16,
    card_height: u16,
    gap: u16,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self { min_card_width: DEFAULT_MIN_CARD_WIDTH, card_height: CARD_HEIGHT, gap: DEFAULT_GAP }
    }
}

impl GridLayout {
    pub fn new(min_card_width: u16, card_height: u16) -> Self {
        Self { min_card_width: min_card_width.max(1), card_height: card_height.max(1), gap: DEFAULT_GAP }
    }

    pub fn min_card_width(&self) -> u16 {
        self.min_card_width
    }

    pub fn card_height(&self) -> u16 {
        self.card_height
    }

    pub fn columns(&self, width: u16) -> usize {
        let width = u32::from(width) + u32::from(self.gap);
        let step = u32::from(self.min_card_width) + u32::from(self.gap);
        ((width / step) as usize).max(1)
    }

    pub fn visible_rows(&self, height: u16) -> usize {
        let height = u32::from(height) + u32::from(self.gap);
        let step = u32::from(self.card_height) + u32::from(self.gap);
        ((height / step) as usize).max(1)
    }

    /// Rectangles of the cards visible when the grid is scrolled to `first_row`, as
    /// `(card index, rect)` pairs. The first visible row is always laid out, clipped if needed.
    pub fn cells(&self, area: Rect, count: usize, first_row: usize) -> Vec<(usize, Rect)> {
        if area.is_empty() {
            return Vec::new();
        }
        let columns = self.columns(area.width);
        let gaps = self.gap as usize * (columns - 1);
        let card_width = ((area.width as usize).saturating_sub(gaps) / columns).max(1);
        let bottom = area.bottom() as usize;

        let mut cells = Vec::new();
        for index in first_row * columns..count {
            let row = index / columns - first_row;
            let column = index % columns;
            let y = area.y as usize + row * (self.card_height as usize + self.gap as usize);
            if y >= bottom || (row > 0 && y + self.card_height as usize > bottom) {
                break;
            }
            let x = area.x as usize + column * (card_width + self.gap as usize);
            let height = (self.card_height as usize).min(bottom - y);
            cells.push((index, Rect::new(x as u16, y as u16, card_width as u16, height as u16)));
        }
        cells
    }

    /// Scroll position that keeps `selected` on screen, moving as little as possible.
    pub fn scroll_to(&self, area: Rect, selected: usize, first_row: usize) -> usize {
        let row = selected / self.columns(area.width);
        let visible = self.visible_rows(area.height);
        if row < first_row {
            row
        } else if row >= first_row + visible {
            row + 1 - visible
        } else {
            first_row
        }
    }
}

pub struct GridRenderer {
    container: Rc<RefCell<Container>>,
    registry: Rc<ElementRegistry>,
    collaborators: Collaborators,
    layout: GridLayout,
}

impl GridRenderer {
    /// Binds the grid to the container `container_id` of `document`.
    pub fn new(
        document: &Document,
        container_id: &str,
        registry: Rc<ElementRegistry>,
        collaborators: Collaborators,
    ) -> Result<Self, GridError> {
        let container = document
            .container(container_id)
            .ok_or_else(|| GridError::ContainerNotFound(container_id.to_string()))?;
        Ok(Self { container, registry, collaborators, layout: GridLayout::default() })
    }

    pub fn with_layout(mut self, layout: GridLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    /// Rebuilds the grid from scratch: the container is emptied, then one card per podcast is
    /// created in input order. On error the container is left holding the cards built so far.
    pub fn render(&self, podcasts: &[Podcast]) -> Result<(), GridError> {
        self.container.borrow_mut().clear();
        info!("GridRenderer: rendering {} podcast(s)", podcasts.len());

        for podcast in podcasts {
            let enriched = self.enrich(podcast)?;
            let mut card = self.registry.create(PREVIEW_CARD_TAG)?;

            let modal = Rc::clone(&self.collaborators.modal);
            card.add_selection_listener(move |event| {
                debug!("GridRenderer: forwarding selection of '{}' to modal", event.podcast().id());
                modal.open(event.podcast());
            });
            card.set_podcast(enriched)?;

            self.container.borrow_mut().append(card);
        }
        Ok(())
    }

    fn enrich(&self, podcast: &Podcast) -> Result<Podcast, GridError> {
        let wrap = |source: CardError| GridError::Enrichment { id: podcast.id().to_string(), source };
        let genre_names = self.collaborators.genres.names(podcast.genres()).map_err(|e| wrap(e.into()))?;
        let formatted_date = self.collaborators.dates.format(podcast.updated()).map_err(|e| wrap(e.into()))?;
        trace!("GridRenderer: enriched '{}' with {} genre name(s)", podcast.id(), genre_names.len());
        Ok(podcast.clone().with_genre_names(genre_names).with_formatted_date(formatted_date))
    }

    pub fn card_count(&self) -> usize {
        self.container.borrow().len()
    }

    pub fn container(&self) -> Ref<'_, Container> {
        self.container.borrow()
    }

    /// Clicks card `index`. The container is not borrowed while listeners run, so a listener
    /// may re-render the grid.
    pub fn click_card(&self, index: usize) -> bool {
        let handler = self.container.borrow().cards().get(index).and_then(|card| card.click_handler());
        match handler {
            Some(handler) => handler(),
            None => false,
        }
    }

    /// Card index under the terminal cell (`column`, `row`) for a grid drawn in `area`.
    pub fn card_at(&self, area: Rect, first_row: usize, column: u16, row: u16) -> Option<usize> {
        self.layout
            .cells(area, self.card_count(), first_row)
            .into_iter()
            .find(|(_, rect)| rect.contains(Position { x: column, y: row }))
            .map(|(index, _)| index)
    }

    pub fn click_at(&self, area: Rect, first_row: usize, column: u16, row: u16) -> bool {
        match self.card_at(area, first_row, column, row) {
            Some(index) => self.click_card(index),
            None => false,
        }
    }

    pub fn view(&self) -> GridView<'_> {
        GridView { container: self.container(), layout: self.layout, first_row: 0, focused: None }
    }
}

pub struct GridView<'a> {
    container: Ref<'a, Container>,
    layout: GridLayout,
    first_row: usize,
    focused: Option<usize>,
}

impl GridView<'_> {
    pub fn first_row(mut self, first_row: usize) -> Self {
        self.first_row = first_row;
        self
    }

    pub fn focused(mut self, focused: Option<usize>) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for GridView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let cards = self.container.cards();
        if cards.is_empty() {
            Paragraph::new("No podcasts to show")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .render(area, buf);
            return;
        }
        for (index, rect) in self.layout.cells(area, cards.len(), self.first_row) {
            cards[index]
                .view()
                .viewport_width(area.width)
                .focused(self.focused == Some(index))
                .render(rect, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::GRID_CONTAINER_ID;
    use crate::registry::define_preview_card;
    use crate::services::fakes::{FakeDates, FakeGenres, RecordingModal};
    use crate::widgets::buffer_lines;

    struct Fixture {
        document: Document,
        grid: GridRenderer,
        genres: Rc<FakeGenres>,
        modal: Rc<RecordingModal>,
    }

    fn fixture_with(genres: FakeGenres) -> Fixture {
        let document = Document::new();
        document.create_container(GRID_CONTAINER_ID);
        let genres = Rc::new(genres);
        let dates = Rc::new(FakeDates::default());
        let modal = Rc::new(RecordingModal::default());

        let mut registry = ElementRegistry::new();
        define_preview_card(&mut registry, genres.clone(), dates.clone());
        let collaborators = Collaborators { genres: genres.clone(), dates, modal: modal.clone() };
        let grid = GridRenderer::new(&document, GRID_CONTAINER_ID, Rc::new(registry), collaborators).unwrap();

        Fixture { document, grid, genres, modal }
    }

    fn fixture() -> Fixture {
        fixture_with(FakeGenres::default())
    }

    fn show_a() -> Podcast {
        Podcast::new("1", "Show A", "a.jpg", 3, vec![1, 2], "2023-01-15T00:00:00Z")
    }

    fn numbered(count: usize) -> Vec<Podcast> {
        (0..count)
            .map(|i| Podcast::new(&i.to_string(), &format!("Show {}", i), "x.jpg", 1, vec![1], "2023-01-15"))
            .collect()
    }

    #[test]
    fn test_end_to_end_show_a() {
        let f = fixture();

        f.grid.render(&[show_a()]).unwrap();

        assert_eq!(f.grid.card_count(), 1);
        {
            let container = f.grid.container();
            let elements = container.cards()[0].elements();
            assert_eq!(elements.title, "Show A");
            assert_eq!(elements.seasons, "3 seasons");
            assert_eq!(elements.tags, vec!["Comedy", "News"]);
            assert_eq!(elements.updated, "Jan 15, 2023");
        }

        assert!(f.grid.click_card(0));

        let opened = f.modal.opened.borrow();
        let expected = show_a()
            .with_genre_names(vec!["Comedy".to_string(), "News".to_string()])
            .with_formatted_date("Jan 15, 2023".to_string());
        assert_eq!(*opened, vec![expected]);
    }

    #[test]
    fn test_render_preserves_input_order() {
        let f = fixture();

        f.grid.render(&numbered(4)).unwrap();

        let container = f.grid.container();
        let titles: Vec<&str> = container.cards().iter().map(|c| c.elements().title.as_str()).collect();
        assert_eq!(titles, vec!["Show 0", "Show 1", "Show 2", "Show 3"]);
    }

    #[test]
    fn test_enrichment_happens_at_grid_level() {
        let f = fixture();

        f.grid.render(&[show_a()]).unwrap();

        // Once by the grid; the card sees precomputed names and skips its own lookup.
        assert_eq!(*f.genres.calls.borrow(), vec![vec![1, 2]]);
        let card_record = f.grid.container().cards()[0].podcast().unwrap();
        assert!(card_record.genre_names().is_some());
        assert_eq!(card_record.formatted_date(), Some("Jan 15, 2023"));
    }

    #[test]
    fn test_render_empty_list_clears_container() {
        let f = fixture();
        f.grid.render(&numbered(3)).unwrap();

        f.grid.render(&[]).unwrap();

        assert_eq!(f.grid.card_count(), 0);
    }

    #[test]
    fn test_second_render_leaves_no_residue() {
        let f = fixture();
        f.grid.render(&numbered(5)).unwrap();
        let stale_handler = f.grid.container().cards()[0].click_handler().unwrap();

        f.grid.render(&numbered(2)).unwrap();

        assert_eq!(f.grid.card_count(), 2);
        // The old card is gone together with its modal subscription.
        stale_handler();
        assert!(f.modal.opened.borrow().is_empty());
        f.grid.click_card(1);
        assert_eq!(f.modal.opened.borrow().len(), 1);
    }

    #[test]
    fn test_selection_also_reaches_document_listeners() {
        let f = fixture();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        f.document.add_selection_listener(move |e| sink.borrow_mut().push(e.podcast().id().to_string()));
        f.grid.render(&numbered(3)).unwrap();

        f.grid.click_card(2);

        assert_eq!(*seen.borrow(), vec!["2"]);
        assert_eq!(f.modal.opened.borrow().len(), 1);
    }

    #[test]
    fn test_listener_may_rerender_grid_during_click() {
        let f = fixture();
        let grid = Rc::new(f.grid);
        let weak = Rc::downgrade(&grid);
        f.document.add_selection_listener(move |_| {
            if let Some(grid) = weak.upgrade() {
                grid.render(&[]).unwrap();
            }
        });
        grid.render(&numbered(2)).unwrap();

        assert!(grid.click_card(0));
        assert_eq!(grid.card_count(), 0);
    }

    #[test]
    fn test_click_at_hits_card_under_cursor() {
        let f = fixture();
        f.grid.render(&numbered(4)).unwrap();
        let area = Rect::new(0, 0, 60, 20);

        // Two 29 column cards per row; the second row starts at y = 9.
        assert_eq!(f.grid.card_at(area, 0, 5, 2), Some(0));
        assert_eq!(f.grid.card_at(area, 0, 40, 2), Some(1));
        assert_eq!(f.grid.card_at(area, 0, 40, 10), Some(3));
        assert_eq!(f.grid.card_at(area, 0, 29, 2), None);
        assert!(f.grid.click_at(area, 0, 5, 10));
        assert_eq!(f.modal.opened.borrow()[0].id(), "2");
    }

    #[test]
    fn test_view_draws_cards_and_placeholder() {
        let f = fixture();
        let mut buf = Buffer::empty(Rect::new(0, 0, 60, 10));
        f.grid.view().render(buf.area, &mut buf);
        assert!(buffer_lines(&buf)[0].contains("No podcasts to show"));

        f.grid.render(&[show_a()]).unwrap();
        let mut buf = Buffer::empty(Rect::new(0, 0, 60, 10));
        f.grid.view().render(buf.area, &mut buf);
        let text = buffer_lines(&buf).join("\n");
        assert!(text.contains("Show A"));
        assert!(text.contains(" Comedy "));
    }

    // SAD PATHS

    #[test]
    fn test_missing_container_is_reported() {
        let document = Document::new();
        let collaborators = Collaborators {
            genres: Rc::new(FakeGenres::default()),
            dates: Rc::new(FakeDates::default()),
            modal: Rc::new(RecordingModal::default()),
        };

        let result = GridRenderer::new(&document, "missing", Rc::new(ElementRegistry::new()), collaborators);

        assert!(matches!(result, Err(GridError::ContainerNotFound(id)) if id == "missing"));
    }

    #[test]
    fn test_genre_failure_propagates() {
        let f = fixture_with(FakeGenres { fail: true, ..FakeGenres::default() });

        let result = f.grid.render(&[show_a()]);

        assert!(matches!(result, Err(GridError::Enrichment { ref id, .. }) if id == "1"));
        assert_eq!(f.grid.card_count(), 0);
    }

    #[test]
    fn test_unregistered_card_is_an_error() {
        let document = Document::new();
        document.create_container(GRID_CONTAINER_ID);
        let collaborators = Collaborators {
            genres: Rc::new(FakeGenres::default()),
            dates: Rc::new(FakeDates::default()),
            modal: Rc::new(RecordingModal::default()),
        };
        let grid =
            GridRenderer::new(&document, GRID_CONTAINER_ID, Rc::new(ElementRegistry::new()), collaborators).unwrap();

        assert!(matches!(grid.render(&[show_a()]), Err(GridError::Registry(_))));
    }

    // LAYOUT

    #[test]
    fn test_layout_columns_and_rows() {
        let layout = GridLayout::default();

        assert_eq!(layout.columns(10), 1);
        assert_eq!(layout.columns(57), 2);
        assert_eq!(layout.columns(60), 2);
        assert_eq!(layout.visible_rows(17), 2);
        assert_eq!(layout.visible_rows(3), 1);
    }

    #[test]
    fn test_layout_cells_skip_rows_before_scroll_position() {
        let layout = GridLayout::default();
        let area = Rect::new(0, 0, 60, 20);

        let cells = layout.cells(area, 7, 1);

        let indexes: Vec<usize> = cells.iter().map(|(i, _)| *i).collect();
        assert_eq!(indexes, vec![2, 3, 4, 5]);
        assert_eq!(cells[0].1, Rect::new(0, 0, 29, CARD_HEIGHT));
        assert_eq!(cells[1].1, Rect::new(30, 0, 29, CARD_HEIGHT));
        assert_eq!(cells[2].1.y, CARD_HEIGHT + 1);
    }

    #[test]
    fn test_layout_new_clamps_zero_sizes() {
        let layout = GridLayout::new(0, 0);

        assert_eq!(layout.min_card_width(), 1);
        assert_eq!(layout.card_height(), 1);
        assert_eq!(layout.columns(0), 1);
        assert_eq!(layout.visible_rows(0), 1);
    }

    #[test]
    fn test_layout_tallest_cards_are_clipped_to_the_area() {
        let layout = GridLayout::new(DEFAULT_MIN_CARD_WIDTH, u16::MAX);
        let area = Rect::new(0, 1, 80, 22);

        let cells = layout.cells(area, 3, 0);

        // Two columns; the second row starts past the area and is never laid out.
        assert_eq!(cells, vec![(0, Rect::new(0, 1, 39, 22)), (1, Rect::new(40, 1, 39, 22))]);
        assert_eq!(layout.visible_rows(area.height), 1);
        assert_eq!(layout.scroll_to(area, 2, 0), 1);
    }

    #[test]
    fn test_scroll_to_keeps_selection_visible() {
        let layout = GridLayout::default();
        let area = Rect::new(0, 0, 60, 17);

        assert_eq!(layout.scroll_to(area, 0, 0), 0);
        assert_eq!(layout.scroll_to(area, 5, 0), 1);
        assert_eq!(layout.scroll_to(area, 1, 2), 0);
        assert_eq!(layout.scroll_to(area, 3, 1), 1);
    }
}

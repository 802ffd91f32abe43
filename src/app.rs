use crate::errors::GridError;
use crate::grid::{Collaborators, GridLayout, GridRenderer};
use crate::host::{Document, GRID_CONTAINER_ID};
use crate::podcast::Podcast;
use crate::registry::{ElementRegistry, define_preview_card};
use crate::services::{DateFormat, DateUtils, GenreLookup, GenreService};
use crate::widgets::podcast_modal::PodcastModal;
use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
        MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{debug, error, info};
use ratatui::{Terminal, backend::Backend, layout::Rect};
use std::io;
use std::rc::Rc;

pub struct App {
    pub should_quit: bool,
    pub podcasts: Vec<Podcast>,
    pub selected_card_index: Option<usize>,
    pub first_row: usize,
    // Where the grid was drawn last; mouse clicks are resolved against it.
    pub grid_area: Rect,
    document: Document,
    grid: GridRenderer,
    modal: Rc<PodcastModal>,
}

impl App {
    /// Wires document, registry, collaborators and grid together and renders `podcasts`.
    pub fn new(podcasts: Vec<Podcast>, layout: GridLayout) -> Result<App, GridError> {
        let genres: Rc<dyn GenreLookup> = Rc::new(GenreService::new());
        let dates: Rc<dyn DateFormat> = Rc::new(DateUtils::new());
        let modal = Rc::new(PodcastModal::new());

        let mut registry = ElementRegistry::new();
        define_preview_card(&mut registry, Rc::clone(&genres), Rc::clone(&dates));

        let document = Document::new();
        document.create_container(GRID_CONTAINER_ID);
        document.add_selection_listener(|event| {
            info!("Selected podcast '{}' ({})", event.podcast().title(), event.podcast().id())
        });

        let collaborators = Collaborators { genres, dates, modal: modal.clone() };
        let grid = GridRenderer::new(&document, GRID_CONTAINER_ID, Rc::new(registry), collaborators)?
            .with_layout(layout);

        let mut app = App {
            should_quit: false,
            podcasts,
            selected_card_index: None,
            first_row: 0,
            grid_area: Rect::default(),
            document,
            grid,
            modal,
        };
        app.render_grid()?;
        Ok(app)
    }

    /// Rebuilds every card from `podcasts` and resets the keyboard selection.
    pub fn render_grid(&mut self) -> Result<(), GridError> {
        self.grid.render(&self.podcasts)?;
        self.first_row = 0;
        self.selected_card_index = if self.podcasts.is_empty() { None } else { Some(0) };
        Ok(())
    }

    pub fn grid(&self) -> &GridRenderer {
        &self.grid
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn modal(&self) -> &PodcastModal {
        &self.modal
    }

    fn columns(&self) -> usize {
        self.grid.layout().columns(self.grid_area.width)
    }

    // ====================================== Card selection =======================================

    fn move_selection(&mut self, delta: isize) {
        let count = self.grid.card_count();
        if count == 0 {
            self.selected_card_index = None;
            return;
        }
        let current = self.selected_card_index.unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, count as isize - 1) as usize;
        self.selected_card_index = Some(next);
        self.keep_selection_visible();
    }

    pub fn keep_selection_visible(&mut self) {
        if let Some(selected) = self.selected_card_index {
            self.first_row = self.grid.layout().scroll_to(self.grid_area, selected, self.first_row);
        }
    }

    pub fn select_next_card(&mut self) {
        self.move_selection(1);
    }

    pub fn select_prev_card(&mut self) {
        self.move_selection(-1);
    }

    pub fn select_card_below(&mut self) {
        self.move_selection(self.columns() as isize);
    }

    pub fn select_card_above(&mut self) {
        self.move_selection(-(self.columns() as isize));
    }

    pub fn activate_selected_card(&mut self) {
        if let Some(index) = self.selected_card_index {
            debug!("App: activating card {}", index);
            self.grid.click_card(index);
        }
    }

    // --- Key Handler ---
    pub fn on_key(&mut self, key: KeyCode) {
        // Handle global quit first
        if key == KeyCode::Char('q') {
            self.should_quit = true;
            return;
        }

        if self.modal.is_open() {
            match key {
                KeyCode::Esc => self.modal.close(),
                KeyCode::Down => self.modal.scroll_down(),
                KeyCode::Up => self.modal.scroll_up(),
                _ => {}
            }
            return;
        }

        match key {
            KeyCode::Right | KeyCode::Tab => self.select_next_card(),
            KeyCode::Left | KeyCode::BackTab => self.select_prev_card(),
            KeyCode::Down => self.select_card_below(),
            KeyCode::Up => self.select_card_above(),
            KeyCode::Enter | KeyCode::Char(' ') => self.activate_selected_card(),
            KeyCode::Char('r') => {
                if let Err(e) = self.render_grid() {
                    error!("App: re-rendering the grid failed: {}", e);
                }
            }
            _ => {}
        }
    }

    // --- Mouse Handler ---
    pub fn on_mouse(&mut self, mouse: MouseEvent) {
        if self.modal.is_open() {
            match mouse.kind {
                MouseEventKind::ScrollDown => self.modal.scroll_down(),
                MouseEventKind::ScrollUp => self.modal.scroll_up(),
                _ => {}
            }
            return;
        }
        if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
            if let Some(index) = self.grid.card_at(self.grid_area, self.first_row, mouse.column, mouse.row) {
                self.selected_card_index = Some(index);
                self.grid.click_card(index);
            }
        }
    }
}

pub fn start_ui(mut app: App) -> Result<()> {
    // Set up the terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app_loop(&mut terminal, &mut app);

    // Restore the terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(e) = &res {
        error!("UI loop failed: {}", e);
    }
    res
}

pub fn run_app_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    while !app.should_quit {
        let frame_area = terminal.get_frame().area(); // Fetch once before drawing
        crate::ui::prepare_ui_layout(app, frame_area);
        terminal.draw(|f| crate::ui::ui(f, app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                    app.on_key(key_event.code)
                }
                Event::Mouse(mouse_event) => app.on_mouse(mouse_event),
                _ => {}
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn podcasts(count: usize) -> Vec<Podcast> {
        (0..count)
            .map(|i| {
                Podcast::new(&i.to_string(), &format!("Show {}", i), "x.jpg", 2, vec![4], "2023-01-15T00:00:00Z")
            })
            .collect()
    }

    fn app(count: usize) -> App {
        let mut app = App::new(podcasts(count), GridLayout::default()).unwrap();
        app.grid_area = Rect::new(0, 1, 60, 17);
        app
    }

    fn left_click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_new_app_renders_all_cards() {
        let app = app(5);

        assert_eq!(app.grid().card_count(), 5);
        assert_eq!(app.selected_card_index, Some(0));
        assert!(!app.modal().is_open());
    }

    #[test]
    fn test_keyboard_navigation_moves_across_rows() {
        let mut app = app(5);

        app.on_key(KeyCode::Right);
        assert_eq!(app.selected_card_index, Some(1));
        app.on_key(KeyCode::Down);
        assert_eq!(app.selected_card_index, Some(3));
        app.on_key(KeyCode::Down);
        assert_eq!(app.selected_card_index, Some(4));
        assert_eq!(app.first_row, 1);
        app.on_key(KeyCode::Up);
        app.on_key(KeyCode::Up);
        assert_eq!(app.selected_card_index, Some(0));
        assert_eq!(app.first_row, 0);
    }

    #[test]
    fn test_enter_opens_modal_and_esc_closes_it() {
        let mut app = app(3);
        app.on_key(KeyCode::Right);

        app.on_key(KeyCode::Enter);
        let opened = app.modal().podcast().unwrap();
        assert_eq!(opened.id(), "1");
        assert_eq!(opened.genre_names(), Some(&["Comedy".to_string()][..]));
        assert_eq!(opened.formatted_date(), Some("Jan 15, 2023"));

        // Grid keys are ignored while the modal is up.
        app.on_key(KeyCode::Right);
        assert_eq!(app.selected_card_index, Some(1));

        app.on_key(KeyCode::Esc);
        assert!(!app.modal().is_open());
    }

    #[test]
    fn test_mouse_click_opens_card_under_cursor() {
        let mut app = app(4);

        app.on_mouse(left_click(40, 11));

        assert_eq!(app.selected_card_index, Some(3));
        assert_eq!(app.modal().podcast().map(|p| p.id().to_string()), Some("3".to_string()));
    }

    #[test]
    fn test_click_between_cards_does_nothing() {
        let mut app = app(4);

        app.on_mouse(left_click(29, 3));

        assert!(!app.modal().is_open());
    }

    #[test]
    fn test_empty_catalog() {
        let mut app = app(0);

        app.on_key(KeyCode::Right);
        app.on_key(KeyCode::Enter);

        assert_eq!(app.selected_card_index, None);
        assert!(!app.modal().is_open());
    }

    #[test]
    fn test_quit() {
        let mut app = app(1);

        app.on_key(KeyCode::Char('q'));

        assert!(app.should_quit);
    }

    #[test]
    fn test_rerender_resets_selection() {
        let mut app = app(4);
        app.on_key(KeyCode::Right);

        app.on_key(KeyCode::Char('r'));

        assert_eq!(app.selected_card_index, Some(0));
        assert_eq!(app.grid().card_count(), 4);
    }
}

// src/ui.rs
use crate::app::App;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use std::rc::Rc;

pub struct LayoutChunks {
    pub header_chunk: Rect,
    pub grid_chunk: Rect,
    pub hint_chunk: Rect,
}

pub fn compute_layout(frame_size: Rect) -> LayoutChunks {
    let main_chunks: Rc<[Rect]> = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0), Constraint::Length(1)])
        .split(frame_size);

    LayoutChunks { header_chunk: main_chunks[0], grid_chunk: main_chunks[1], hint_chunk: main_chunks[2] }
}

/// Records where the grid goes and scrolls the selection into view, outside the draw closure.
pub fn prepare_ui_layout(app: &mut App, frame_size: Rect) {
    app.grid_area = compute_layout(frame_size).grid_chunk;
    app.keep_selection_visible();
}

pub fn ui(f: &mut Frame, app: &App) {
    let layout_chunks: LayoutChunks = compute_layout(f.area());

    // ======================================= Header ==============================================
    let header = Line::from(vec![
        Span::styled("Podcasts", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
        Span::styled(format!(" ({})", app.grid().card_count()), Style::default().fg(Color::DarkGray)),
    ]);
    f.render_widget(Paragraph::new(header), layout_chunks.header_chunk);

    // ======================================== Grid ===============================================
    f.render_widget(
        app.grid().view().first_row(app.first_row).focused(app.selected_card_index),
        layout_chunks.grid_chunk,
    );

    // ==================================== Hint Bar (Bottom) ======================================
    let hint_text: &str = if app.modal().is_open() {
        "[Esc] Close | [↑/↓] Scroll | [Q] Quit"
    } else {
        "[←/→/↑/↓] Move | [Enter] Open | [Click] Open | [R] Reload | [Q] Quit"
    };
    let hint_widget: Paragraph = Paragraph::new(hint_text)
        .style(Style::default().fg(Color::DarkGray)) // Subtle color for hints
        .alignment(Alignment::Center);
    f.render_widget(hint_widget, layout_chunks.hint_chunk);

    // ======================================= Modal ===============================================
    f.render_widget(app.modal(), f.area());
}

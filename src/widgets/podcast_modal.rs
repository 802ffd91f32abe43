// src/widgets/podcast_modal.rs
use crate::podcast::Podcast;
use crate::services::ModalOpener;
use crate::widgets::scrollable_paragraph::ScrollableParagraphState;
use log::info;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style, Stylize},
    text::Line,
    widgets::{Block, BorderType, Clear, Paragraph, Widget, Wrap},
};
use std::cell::RefCell;
use unicode_width::UnicodeWidthStr;

/// Terminal popup showing the details of the podcast picked in the grid.
#[derive(Debug, Default)]
pub struct PodcastModal {
    podcast: RefCell<Option<Podcast>>,
    details: RefCell<ScrollableParagraphState>,
}

impl PodcastModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.podcast.borrow().is_some()
    }

    pub fn podcast(&self) -> Option<Podcast> {
        self.podcast.borrow().clone()
    }

    pub fn close(&self) {
        *self.podcast.borrow_mut() = None;
        self.details.borrow_mut().set_content(String::new());
    }

    pub fn scroll_up(&self) {
        self.details.borrow_mut().scroll_up(1);
    }

    pub fn scroll_down(&self) {
        self.details.borrow_mut().scroll_down(1);
    }

    pub fn scroll_offset(&self) -> u16 {
        self.details.borrow().scroll_offset_vertical
    }
}

impl ModalOpener for PodcastModal {
    fn open(&self, podcast: &Podcast) {
        info!("PodcastModal: opening '{}' ({})", podcast.title(), podcast.id());
        self.details.borrow_mut().set_content(
            podcast.description().unwrap_or("No description available.").to_string(),
        );
        *self.podcast.borrow_mut() = Some(podcast.clone());
    }
}

pub fn centered_rect(area: Rect) -> Rect {
    Rect {
        x: area.x + area.width / 4,
        y: area.y + area.height / 4,
        width: area.width / 2,
        height: area.height / 2,
    }
}

fn wrapped_line_count(lines: &[Line], width: u16) -> usize {
    let width = usize::from(width.max(1));
    lines.iter().map(|line| UnicodeWidthStr::width(line.to_string().as_str()).div_ceil(width).max(1)).sum()
}

impl Widget for &PodcastModal {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(podcast) = self.podcast() else {
            return;
        };
        let popup = centered_rect(area);
        Clear.render(popup, buf);

        let genres = match podcast.genre_names() {
            Some(names) if !names.is_empty() => names.join(", "),
            _ => "-".to_string(),
        };
        let updated = podcast.formatted_date().unwrap_or(podcast.updated()).to_string();

        let mut details = self.details.borrow_mut();
        let mut lines = vec![
            Line::from(vec!["Title: ".bold(), podcast.title().into()]),
            Line::from(vec!["Seasons: ".bold(), podcast.seasons_label().into()]),
            Line::from(vec!["Genres: ".bold(), genres.into()]),
            Line::from(vec!["Updated: ".bold(), updated.into()]),
            Line::from(vec!["Cover: ".bold(), podcast.image().into()]),
            Line::default(),
        ];
        lines.extend(details.content.lines().map(|l| Line::from(l.to_string())));

        let block = Block::bordered()
            .title(" Podcast Info ")
            .title_bottom(" Esc: close ")
            .border_type(BorderType::Thick)
            .style(Style::default().fg(Color::White).bg(Color::Black));
        let inner = block.inner(popup);
        details.set_visible_lines(wrapped_line_count(&lines, inner.width), inner.height);

        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .scroll((details.scroll_offset_vertical, 0))
            .block(block)
            .render(popup, buf);
    }
}

use ratatui::style::{Color, Modifier, Style};

/// Viewports narrower than this many columns get the compact title.
pub const COMPACT_BREAKPOINT: u16 = 48;

/// Styles scoped to one preview card. The host page has no way to reach them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardStyles {
    pub surface: Style,
    pub border: Style,
    pub focused_border: Style,
    pub cover: Style,
    pub title: Style,
    pub compact_title: Style,
    pub seasons: Style,
    pub tag: Style,
    pub updated: Style,
}

impl Default for CardStyles {
    fn default() -> Self {
        Self {
            surface: Style::default().fg(Color::White).bg(Color::Black),
            border: Style::default().fg(Color::DarkGray),
            focused_border: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            cover: Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            title: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            compact_title: Style::default().fg(Color::White),
            seasons: Style::default().fg(Color::Gray),
            tag: Style::default().fg(Color::Black).bg(Color::LightBlue),
            updated: Style::default().fg(Color::DarkGray),
        }
    }
}

impl CardStyles {
    pub fn is_compact(viewport_width: u16) -> bool {
        viewport_width < COMPACT_BREAKPOINT
    }

    pub fn title_for(&self, viewport_width: u16) -> Style {
        if Self::is_compact(viewport_width) { self.compact_title } else { self.title }
    }

    pub fn border_for(&self, focused: bool) -> Style {
        if focused { self.focused_border } else { self.border }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_narrows_below_breakpoint() {
        let styles = CardStyles::default();

        assert_eq!(styles.title_for(COMPACT_BREAKPOINT - 1), styles.compact_title);
        assert_eq!(styles.title_for(COMPACT_BREAKPOINT), styles.title);
        assert!(!styles.compact_title.add_modifier.contains(Modifier::BOLD));
    }
}

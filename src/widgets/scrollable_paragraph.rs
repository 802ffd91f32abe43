/// Scroll position of a block of text that may be taller than its panel.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScrollableParagraphState {
    pub content: String,
    pub scroll_offset_vertical: u16,
    // Zero until the panel has been laid out, which keeps the text pinned to the top.
    pub max_scroll: u16,
}

impl ScrollableParagraphState {
    pub fn new(content: String) -> Self {
        Self { content, scroll_offset_vertical: 0, max_scroll: 0 }
    }

    pub fn set_content(&mut self, content: String) {
        self.content = content;
        self.scroll_offset_vertical = 0; // Reset scroll when content changes
        self.max_scroll = 0;
    }

    /// Caps scrolling so the last line can reach the bottom of a panel `visible_lines` high.
    pub fn set_visible_lines(&mut self, total_lines: usize, visible_lines: u16) {
        let total = u16::try_from(total_lines).unwrap_or(u16::MAX);
        self.max_scroll = total.saturating_sub(visible_lines);
        self.scroll_offset_vertical = self.scroll_offset_vertical.min(self.max_scroll);
    }

    pub fn scroll_up(&mut self, amount: u16) {
        self.scroll_offset_vertical = self.scroll_offset_vertical.saturating_sub(amount);
    }

    pub fn scroll_down(&mut self, amount: u16) {
        self.scroll_offset_vertical = self.scroll_offset_vertical.saturating_add(amount).min(self.max_scroll);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_is_clamped() {
        let mut state = ScrollableParagraphState::new("a\nb\nc\nd".to_string());
        state.set_visible_lines(4, 2);

        state.scroll_down(5);
        assert_eq!(state.scroll_offset_vertical, 2);
        state.scroll_up(1);
        assert_eq!(state.scroll_offset_vertical, 1);
        state.scroll_up(9);
        assert_eq!(state.scroll_offset_vertical, 0);
    }

    #[test]
    fn test_set_content_resets_scroll() {
        let mut state = ScrollableParagraphState::new(String::new());
        state.set_visible_lines(10, 2);
        state.scroll_down(3);

        state.set_content("fresh".to_string());

        assert_eq!(state.scroll_offset_vertical, 0);
        assert_eq!(state.content, "fresh");
    }
}

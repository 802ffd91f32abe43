pub mod card_styles;
pub mod podcast_modal;
pub mod preview_card;
pub mod scrollable_paragraph;

#[cfg(test)]
pub(crate) fn buffer_lines(buf: &ratatui::buffer::Buffer) -> Vec<String> {
    let area = buf.area;
    (area.y..area.y + area.height)
        .map(|y| (area.x..area.x + area.width).map(|x| buf[(x, y)].symbol()).collect())
        .collect()
}

use super::Frame;
use crate::state::State;
use crate::ui::widgets::styling;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

/// Render log widget according to state, newest entries last.
///
pub fn log(frame: &mut Frame, size: Rect, state: &mut State) {
    let block = Block::default().title("Log").borders(Borders::ALL);
    let visible = size.height.saturating_sub(2) as usize;
    let entries = state.get_log_entries();
    let items: Vec<ListItem> = entries
        .iter()
        .skip(entries.len().saturating_sub(visible))
        .map(|entry| {
            ListItem::new(Line::from(vec![Span::styled(
                entry.clone(),
                styling::normal_text_style(),
            )]))
        })
        .collect();

    let list = List::new(items)
        .style(styling::normal_text_style())
        .block(block);
    frame.render_widget(list, size);
}

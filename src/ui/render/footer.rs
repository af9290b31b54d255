use super::Frame;
use crate::state::{FormField, State};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::Paragraph,
};

/// Render key hints for the focused field.
///
pub fn footer(frame: &mut Frame, size: Rect, state: &mut State) {
    let field_hint = match state.focus() {
        FormField::Project | FormField::Status => "←/→: choose",
        FormField::Description => "type to edit, Enter: new line",
        _ => "type to edit, Enter: submit",
    };
    let text = format!(
        " Tab/↓: next field, Shift+Tab/↑: previous, {}, Ctrl+S: submit, Esc: cancel, Ctrl+C: quit",
        field_hint
    );
    let paragraph = Paragraph::new(text).style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, size);
}

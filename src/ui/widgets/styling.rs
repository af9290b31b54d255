use ratatui::style::{Color, Modifier, Style};

/// Return the border style for the focused field.
///
pub fn active_block_border_style() -> Style {
    Style::default().fg(Color::Cyan)
}

/// Return the border style for other fields.
///
pub fn normal_block_border_style() -> Style {
    Style::default().fg(Color::Gray)
}

pub fn active_block_title_style() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

pub fn normal_text_style() -> Style {
    Style::default().fg(Color::White)
}

/// Return the style for values that cannot be changed.
///
pub fn locked_text_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn error_style() -> Style {
    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
}

pub fn hint_style() -> Style {
    Style::default().fg(Color::Yellow)
}

/// Return the style of the submit control.
///
pub fn button_style(enabled: bool) -> Style {
    if enabled {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
    }
}

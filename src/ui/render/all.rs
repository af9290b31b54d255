use super::{footer, log, task_form, Frame};
use crate::state::State;
use ratatui::layout::{Constraint, Direction, Layout};

/// Render the whole screen according to state.
///
pub fn all(frame: &mut Frame, state: &mut State) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(22),   // Form
            Constraint::Length(1), // Footer
            Constraint::Length(8), // Log
        ])
        .split(frame.size());

    task_form(frame, chunks[0], state);
    footer(frame, chunks[1], state);
    log(frame, chunks[2], state);
}

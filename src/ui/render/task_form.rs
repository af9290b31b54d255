use super::Frame;
use crate::state::{FormField, State};
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Render the task create/edit form.
///
pub fn task_form(frame: &mut Frame, size: Rect, state: &mut State) {
    let form = state.form();
    let has_error = !form.error().is_empty();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                               // Heading
            Constraint::Length(if has_error { 3 } else { 0 }),   // Error banner
            Constraint::Length(3),                               // Title
            Constraint::Length(5),                               // Description
            Constraint::Length(3),                               // Project
            Constraint::Length(3),                               // Status
            Constraint::Length(3),                               // Due date
            Constraint::Length(1),                               // Validation hint
            Constraint::Length(1),                               // Submit
            Constraint::Min(0),
        ])
        .split(size);

    let heading = if form.is_editing() {
        "Edit Task"
    } else {
        "Create New Task"
    };
    let heading = Paragraph::new(heading)
        .style(styling::active_block_title_style())
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
    frame.render_widget(heading, chunks[0]);

    if has_error {
        let banner = Paragraph::new(form.error())
            .style(styling::error_style())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(styling::error_style()),
            );
        frame.render_widget(banner, chunks[1]);
    }

    for (index, field) in FormField::ALL.iter().enumerate() {
        render_field(frame, chunks[2 + index], state, *field);
    }

    if let Some(hint) = state.validation_hint() {
        let hint = Paragraph::new(format!(" {}", hint)).style(styling::hint_style());
        frame.render_widget(hint, chunks[7]);
    }

    let form = state.form();
    let label = if form.is_submitting() {
        "Saving..."
    } else if form.is_editing() {
        "Update Task"
    } else {
        "Create Task"
    };
    let submit = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::styled(
            format!(" {} ", label),
            styling::button_style(form.can_submit()),
        ),
    ]));
    frame.render_widget(submit, chunks[8]);
}

/// Render a single field block with its current value.
///
fn render_field(frame: &mut Frame, size: Rect, state: &State, field: FormField) {
    let form = state.form();
    let is_active = state.focus() == field;
    let locked = field == FormField::Project && form.is_project_locked();

    let value = match field {
        FormField::Status => format!("‹ {} ›", form.draft().status.label()),
        FormField::Project => {
            let project = &form.draft().project;
            let name = if project.is_empty() {
                "Select a project".to_string()
            } else {
                form.projects()
                    .iter()
                    .find(|p| &p.id == project)
                    .map(|p| p.title.clone())
                    .unwrap_or_else(|| project.clone())
            };
            if locked {
                format!("{} (locked)", name)
            } else {
                format!("‹ {} ›", name)
            }
        }
        _ => {
            let mut value = form.field_value(field).to_owned();
            if is_active {
                value.push('█');
            }
            value
        }
    };

    let border_style = if is_active {
        styling::active_block_border_style()
    } else {
        styling::normal_block_border_style()
    };
    let text_style = if locked {
        styling::locked_text_style()
    } else {
        styling::normal_text_style()
    };

    let block = Block::default()
        .title(field.label())
        .borders(Borders::ALL)
        .border_style(border_style);
    let paragraph = Paragraph::new(value)
        .style(text_style)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, size);
}

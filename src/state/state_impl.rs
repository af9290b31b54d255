use crate::app::NetworkEventSender;
use crate::api::TaskStatus;
use log::*;

use super::form::{Action, Effect, FormField, FormState};
use super::navigation::{FormRoute, Route};

/// Maximum number of log lines kept for the log panel.
///
const LOG_CAPACITY: usize = 200;

/// Houses data representative of application state: the task form plus
/// everything the terminal input layer needs around it.
///
pub struct State {
    net_sender: Option<NetworkEventSender>,
    form: FormState,
    focus: FormField,
    validation_hint: Option<String>,
    log_entries: Vec<String>,
}

impl Default for State {
    fn default() -> State {
        State {
            net_sender: None,
            form: FormState::default(),
            focus: FormField::Title,
            validation_hint: None,
            log_entries: vec![],
        }
    }
}

impl State {
    pub fn new(net_sender: NetworkEventSender) -> Self {
        State {
            net_sender: Some(net_sender),
            ..State::default()
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    /// Apply action to the form and carry out the resulting effects.
    ///
    pub fn dispatch(&mut self, action: Action) -> &mut Self {
        match self.form.reduce(action) {
            Ok(effects) => {
                for effect in effects {
                    self.run_effect(effect);
                }
            }
            Err(e) => {
                warn!("Rejected form change: {}", e);
                self.validation_hint = Some(e.to_string());
            }
        }
        self
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::Request(event) => match &self.net_sender {
                Some(sender) => {
                    if let Err(e) = sender.send(event) {
                        error!("Failed to queue network event: {}", e);
                    }
                }
                None => warn!("No network sender, dropping {:?}", event),
            },
            Effect::Navigate(route) => info!("Navigating to {}", route),
        }
    }

    /// Open the form on route.
    ///
    pub fn mount(&mut self, route: FormRoute) -> &mut Self {
        info!("Opening task form at {}", route.path());
        self.focus = FormField::Title;
        self.validation_hint = None;
        self.dispatch(Action::Mount(route))
    }

    /// Return the route navigated to, if the form is done.
    ///
    pub fn navigated(&self) -> Option<&Route> {
        self.form.navigated()
    }

    pub fn focus(&self) -> FormField {
        self.focus
    }

    pub fn next_field(&mut self) -> &mut Self {
        self.focus = self.focus.next();
        self
    }

    pub fn previous_field(&mut self) -> &mut Self {
        self.focus = self.focus.previous();
        self
    }

    pub fn validation_hint(&self) -> Option<&str> {
        self.validation_hint.as_deref()
    }

    fn set_field(&mut self, field: FormField, value: String) -> &mut Self {
        self.validation_hint = None;
        self.dispatch(Action::FieldChanged { field, value })
    }

    /// Append a character to the focused text field.
    ///
    pub fn add_char(&mut self, c: char) -> &mut Self {
        if !self.focus.is_text() {
            return self;
        }
        let mut value = self.form.field_value(self.focus).to_owned();
        value.push(c);
        self.set_field(self.focus, value)
    }

    /// Remove the last character of the focused text field.
    ///
    pub fn remove_char(&mut self) -> &mut Self {
        if !self.focus.is_text() {
            return self;
        }
        let mut value = self.form.field_value(self.focus).to_owned();
        if value.pop().is_none() {
            return self;
        }
        self.set_field(self.focus, value)
    }

    /// Move the focused choice field to its next or previous option. The
    /// project list starts with an empty "select a project" option.
    ///
    pub fn cycle_option(&mut self, forward: bool) -> &mut Self {
        match self.focus {
            FormField::Status => {
                let status = self.form.draft().status;
                let status: TaskStatus = if forward {
                    status.next()
                } else {
                    status.previous()
                };
                self.set_field(FormField::Status, status.as_str().to_owned())
            }
            FormField::Project => {
                let mut options: Vec<String> = vec![String::new()];
                options.extend(self.form.projects().iter().map(|p| p.id.clone()));
                let current = options
                    .iter()
                    .position(|id| *id == self.form.draft().project)
                    .unwrap_or(0);
                let index = if forward {
                    (current + 1) % options.len()
                } else {
                    (current + options.len() - 1) % options.len()
                };
                let value = options.swap_remove(index);
                self.set_field(FormField::Project, value)
            }
            _ => self,
        }
    }

    /// Validate the required fields and start the submit request. Returns
    /// false when validation rejected the draft and nothing was sent.
    ///
    pub fn submit(&mut self) -> bool {
        if !self.form.can_submit() {
            debug!("Submit control is disabled.");
            return false;
        }
        if let Err(e) = self.form.validate() {
            warn!("Task form is invalid: {}", e);
            self.validation_hint = Some(e.to_string());
            return false;
        }
        self.validation_hint = None;
        self.dispatch(Action::SubmitStarted);
        true
    }

    pub fn cancel(&mut self) -> &mut Self {
        self.dispatch(Action::Cancel)
    }

    pub fn add_log_entry(&mut self, entry: String) -> &mut Self {
        self.log_entries.push(entry);
        if self.log_entries.len() > LOG_CAPACITY {
            let overflow = self.log_entries.len() - LOG_CAPACITY;
            self.log_entries.drain(..overflow);
        }
        self
    }

    pub fn get_log_entries(&self) -> &[String] {
        &self.log_entries
    }
}

//! Form editing state types.
//!
//! This module contains the task form's state container. All changes go
//! through [`FormState::reduce`], which applies an [`Action`] and returns
//! the [`Effect`]s the caller has to carry out. Request results are tagged
//! with the generation they were issued under so that results of superseded
//! requests are dropped.

use super::navigation::{FormRoute, Route};
use super::StateError;
use crate::api::{Project, Task, TaskDraft, TaskStatus};
use crate::events::network::Event as NetworkEvent;
use chrono::NaiveDate;
use log::*;
use std::str::FromStr;

/// Fallback messages shown when the server gives none.
pub const PROJECTS_LOAD_ERROR: &str = "Failed to fetch projects";
pub const TASK_LOAD_ERROR: &str = "Failed to fetch task";
pub const SAVE_ERROR: &str = "Failed to save task";

/// Specifying the form fields, in display order.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FormField {
    Title,
    Description,
    Project,
    Status,
    DueDate,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        FormField::Title,
        FormField::Description,
        FormField::Project,
        FormField::Status,
        FormField::DueDate,
    ];

    /// Return the field's name as used in request bodies.
    ///
    pub fn name(&self) -> &'static str {
        match self {
            FormField::Title => "title",
            FormField::Description => "description",
            FormField::Project => "project",
            FormField::Status => "status",
            FormField::DueDate => "dueDate",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Title => "Title *",
            FormField::Description => "Description",
            FormField::Project => "Project *",
            FormField::Status => "Status",
            FormField::DueDate => "Due Date (YYYY-MM-DD)",
        }
    }

    /// Whether the field takes free text input.
    ///
    pub fn is_text(&self) -> bool {
        matches!(
            self,
            FormField::Title | FormField::Description | FormField::DueDate
        )
    }

    pub fn next(&self) -> FormField {
        let index = FormField::ALL.iter().position(|f| f == self).unwrap_or(0);
        FormField::ALL[(index + 1) % FormField::ALL.len()]
    }

    pub fn previous(&self) -> FormField {
        let index = FormField::ALL.iter().position(|f| f == self).unwrap_or(0);
        FormField::ALL[(index + FormField::ALL.len() - 1) % FormField::ALL.len()]
    }
}

impl FromStr for FormField {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormField::ALL
            .iter()
            .find(|field| field.name() == s)
            .copied()
            .ok_or_else(|| StateError::UnknownField(s.to_string()))
    }
}

/// Progress of the submit request.
///
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum SubmitStatus {
    Idle,
    /// Request in flight for a draft of this project.
    Submitting { project: String },
    Navigated(Route),
}

/// Events the form state reacts to.
///
#[derive(Debug, Clone)]
pub enum Action {
    /// Form opened on a route, or the edit target changed.
    Mount(FormRoute),
    FieldChanged {
        field: FormField,
        value: String,
    },
    ProjectsLoaded {
        generation: u64,
        projects: Vec<Project>,
    },
    TaskLoaded {
        generation: u64,
        task: Option<Task>,
    },
    LoadFailed {
        generation: u64,
        message: String,
    },
    SubmitStarted,
    SubmitSucceeded {
        generation: u64,
    },
    SubmitFailed {
        generation: u64,
        message: String,
    },
    Cancel,
}

/// Work the reducer asks its caller to carry out.
///
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Request(NetworkEvent),
    Navigate(Route),
}

/// Houses the task draft and everything needed to load and submit it.
///
#[derive(Debug, Clone)]
pub struct FormState {
    route: FormRoute,
    mounted: bool,
    draft: TaskDraft,
    projects: Vec<Project>,
    projects_loaded: bool,
    submit_status: SubmitStatus,
    error: String,
    generation: u64,
}

impl Default for FormState {
    fn default() -> Self {
        FormState {
            route: FormRoute::default(),
            mounted: false,
            draft: TaskDraft::default(),
            projects: vec![],
            projects_loaded: false,
            submit_status: SubmitStatus::Idle,
            error: String::new(),
            generation: 0,
        }
    }
}

impl FormState {
    pub fn draft(&self) -> &TaskDraft {
        &self.draft
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn error(&self) -> &str {
        &self.error
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_editing(&self) -> bool {
        self.route.is_editing()
    }

    /// Whether the project field was fixed by the route.
    ///
    pub fn is_project_locked(&self) -> bool {
        self.route.project_id.is_some()
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.submit_status, SubmitStatus::Submitting { .. })
    }

    /// Return the route navigated to, if the form is done.
    ///
    pub fn navigated(&self) -> Option<&Route> {
        match &self.submit_status {
            SubmitStatus::Navigated(route) => Some(route),
            _ => None,
        }
    }

    /// Whether the submit control is enabled.
    ///
    pub fn can_submit(&self) -> bool {
        self.submit_status == SubmitStatus::Idle
    }

    /// Return the current text of a field.
    ///
    pub fn field_value(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.draft.title,
            FormField::Description => &self.draft.description,
            FormField::Project => &self.draft.project,
            FormField::Status => self.draft.status.as_str(),
            FormField::DueDate => &self.draft.due_date,
        }
    }

    /// Check the draft the way the input layer checks required fields.
    ///
    pub fn validate(&self) -> Result<(), StateError> {
        if self.draft.title.is_empty() {
            return Err(StateError::TitleRequired);
        }
        if self.draft.project.is_empty() {
            return Err(StateError::ProjectRequired);
        }
        if self.projects_loaded && !self.projects.iter().any(|p| p.id == self.draft.project) {
            return Err(StateError::UnknownProject {
                id: self.draft.project.clone(),
            });
        }
        if !self.draft.due_date.is_empty()
            && NaiveDate::parse_from_str(&self.draft.due_date, "%Y-%m-%d").is_err()
        {
            return Err(StateError::InvalidDueDate(self.draft.due_date.clone()));
        }
        Ok(())
    }

    /// Apply action and return the effects it produces.
    ///
    pub fn reduce(&mut self, action: Action) -> Result<Vec<Effect>, StateError> {
        match action {
            Action::Mount(route) => Ok(self.mount(route)),
            Action::FieldChanged { field, value } => {
                self.set_field(field, value)?;
                Ok(vec![])
            }
            Action::ProjectsLoaded {
                generation,
                projects,
            } => {
                if self.is_current(generation) {
                    self.projects = projects;
                    self.projects_loaded = true;
                }
                Ok(vec![])
            }
            Action::TaskLoaded { generation, task } => {
                if self.is_current(generation) {
                    if let Some(task) = task {
                        self.draft = TaskDraft::from(&task);
                    }
                }
                Ok(vec![])
            }
            Action::LoadFailed {
                generation,
                message,
            } => {
                if self.is_current(generation) {
                    self.error = message;
                }
                Ok(vec![])
            }
            Action::SubmitStarted => Ok(self.start_submit()),
            Action::SubmitSucceeded { generation } => {
                if !self.is_current(generation) {
                    return Ok(vec![]);
                }
                let route = match &self.submit_status {
                    SubmitStatus::Submitting { project } => Route::Project(project.clone()),
                    _ => return Ok(vec![]),
                };
                self.submit_status = SubmitStatus::Navigated(route.clone());
                Ok(vec![Effect::Navigate(route)])
            }
            Action::SubmitFailed {
                generation,
                message,
            } => {
                if self.is_current(generation) && self.is_submitting() {
                    self.submit_status = SubmitStatus::Idle;
                    self.error = message;
                }
                Ok(vec![])
            }
            Action::Cancel => {
                let route = if self.draft.project.is_empty() {
                    Route::Dashboard
                } else {
                    Route::Project(self.draft.project.clone())
                };
                self.submit_status = SubmitStatus::Navigated(route.clone());
                Ok(vec![Effect::Navigate(route)])
            }
        }
    }

    fn is_current(&self, generation: u64) -> bool {
        if generation != self.generation {
            debug!(
                "Dropping result of generation {} (current is {})",
                generation, self.generation
            );
            return false;
        }
        true
    }

    fn mount(&mut self, route: FormRoute) -> Vec<Effect> {
        if self.mounted && self.route.task_id == route.task_id {
            return vec![];
        }

        let generation = self.generation + 1;
        *self = FormState {
            draft: TaskDraft::new(route.project_id.as_deref()),
            mounted: true,
            generation,
            ..FormState::default()
        };

        let mut effects = vec![Effect::Request(NetworkEvent::LoadProjects { generation })];
        if let (Some(project_id), Some(task_id)) = (&route.project_id, &route.task_id) {
            effects.push(Effect::Request(NetworkEvent::LoadTask {
                generation,
                project_id: project_id.clone(),
                task_id: task_id.clone(),
            }));
        }
        self.route = route;
        effects
    }

    fn set_field(&mut self, field: FormField, value: String) -> Result<(), StateError> {
        match field {
            FormField::Title => self.draft.title = value,
            FormField::Description => self.draft.description = value,
            FormField::Project => {
                if self.is_project_locked() {
                    return Err(StateError::ProjectLocked);
                }
                self.draft.project = value;
            }
            FormField::Status => {
                self.draft.status = value.parse::<TaskStatus>().map_err(StateError::InvalidStatus)?;
            }
            FormField::DueDate => self.draft.due_date = value,
        }
        Ok(())
    }

    fn start_submit(&mut self) -> Vec<Effect> {
        if !self.can_submit() {
            warn!("Ignoring submit while {:?}", self.submit_status);
            return vec![];
        }
        self.submit_status = SubmitStatus::Submitting {
            project: self.draft.project.clone(),
        };
        self.error.clear();

        let generation = self.generation;
        let draft = self.draft.clone();
        let event = match &self.route.task_id {
            Some(task_id) => NetworkEvent::UpdateTask {
                generation,
                task_id: task_id.clone(),
                draft,
            },
            None => NetworkEvent::CreateTask { generation, draft },
        };
        vec![Effect::Request(event)]
    }
}

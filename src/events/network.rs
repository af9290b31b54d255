use crate::api::{Api, ApiError, TaskDraft};
use crate::state::{Action, State, PROJECTS_LOAD_ERROR, SAVE_ERROR, TASK_LOAD_ERROR};
use log::*;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Specify different network event types. Each carries the form generation
/// it was issued under so its result can be matched against the current
/// form.
///
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    LoadProjects {
        generation: u64,
    },
    LoadTask {
        generation: u64,
        project_id: String,
        task_id: String,
    },
    CreateTask {
        generation: u64,
        draft: TaskDraft,
    },
    UpdateTask {
        generation: u64,
        task_id: String,
        draft: TaskDraft,
    },
}

/// Specify struct for managing state with network events.
///
pub struct Handler<'a> {
    state: &'a Arc<Mutex<State>>,
    api: &'a Api,
}

impl<'a> Handler<'a> {
    /// Return new instance with reference to state.
    ///
    pub fn new(state: &'a Arc<Mutex<State>>, api: &'a Api) -> Self {
        Handler { state, api }
    }

    /// Handle network events by type. Failures are reported to the form
    /// rather than returned.
    ///
    pub async fn handle(&mut self, event: Event) {
        debug!("Processing network event '{:?}'...", event);
        let action = match event {
            Event::LoadProjects { generation } => self.load_projects(generation).await,
            Event::LoadTask {
                generation,
                project_id,
                task_id,
            } => self.load_task(generation, &project_id, &task_id).await,
            Event::CreateTask { generation, draft } => {
                info!("Creating task '{}'...", draft.title);
                let result = self.api.create_task(&draft).await;
                Self::submit_result(generation, result)
            }
            Event::UpdateTask {
                generation,
                task_id,
                draft,
            } => {
                info!("Updating task {}...", task_id);
                let result = self.api.update_task(&task_id, &draft).await;
                Self::submit_result(generation, result)
            }
        };
        self.state.lock().await.dispatch(action);
    }

    /// Fetch the selectable projects.
    ///
    async fn load_projects(&self, generation: u64) -> Action {
        info!("Fetching projects...");
        match self.api.projects().await {
            Ok(projects) => {
                info!("Received {} projects.", projects.len());
                Action::ProjectsLoaded {
                    generation,
                    projects,
                }
            }
            Err(e) => {
                error!("Failed to fetch projects: {}", e);
                log_error_chain(&e);
                Action::LoadFailed {
                    generation,
                    message: PROJECTS_LOAD_ERROR.to_string(),
                }
            }
        }
    }

    /// Fetch the task being edited.
    ///
    async fn load_task(&self, generation: u64, project_id: &str, task_id: &str) -> Action {
        info!("Fetching task {} of project {}...", task_id, project_id);
        match self.api.find_task(project_id, task_id).await {
            Ok(task) => Action::TaskLoaded { generation, task },
            Err(e) => {
                error!("Failed to fetch task {}: {}", task_id, e);
                log_error_chain(&e);
                Action::LoadFailed {
                    generation,
                    message: TASK_LOAD_ERROR.to_string(),
                }
            }
        }
    }

    fn submit_result(generation: u64, result: Result<(), ApiError>) -> Action {
        match result {
            Ok(()) => {
                info!("Task saved successfully.");
                Action::SubmitSucceeded { generation }
            }
            Err(e) => {
                error!("Failed to save task: {}", e);
                log_error_chain(&e);
                Action::SubmitFailed {
                    generation,
                    message: e.server_message().unwrap_or(SAVE_ERROR).to_string(),
                }
            }
        }
    }
}

fn log_error_chain(e: &dyn std::error::Error) {
    let mut source = e.source();
    while let Some(err) = source {
        error!("  Caused by: {}", err);
        source = err.source();
    }
}

//! Navigation-related state types.
//!
//! This module contains the routes the form can be opened on and the routes
//! it navigates to when it is done.

use super::StateError;
use std::fmt;
use std::str::FromStr;

/// Specifying the destinations the form navigates to.
///
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Route {
    Dashboard,
    Project(String),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Dashboard => "/dashboard".to_string(),
            Route::Project(id) => format!("/projects/{}", id),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Route context the form is mounted with. A task id selects edit mode; a
/// project id locks the project field.
///
#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub struct FormRoute {
    pub project_id: Option<String>,
    pub task_id: Option<String>,
}

impl FormRoute {
    /// Route for creating a task, optionally inside a project.
    ///
    pub fn create(project_id: Option<&str>) -> Self {
        FormRoute {
            project_id: project_id.map(str::to_owned),
            task_id: None,
        }
    }

    /// Route for editing a task of a project.
    ///
    pub fn edit(project_id: &str, task_id: &str) -> Self {
        FormRoute {
            project_id: Some(project_id.to_owned()),
            task_id: Some(task_id.to_owned()),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.task_id.is_some()
    }

    pub fn path(&self) -> String {
        match (&self.project_id, &self.task_id) {
            (Some(project), Some(task)) => format!("/projects/{}/tasks/{}/edit", project, task),
            (Some(project), None) => format!("/projects/{}/tasks/new", project),
            (None, _) => "/tasks/new".to_string(),
        }
    }
}

impl FromStr for FormRoute {
    type Err = StateError;

    /// Parse one of `/tasks/new`, `/projects/{id}/tasks/new` or
    /// `/projects/{id}/tasks/{task}/edit`.
    ///
    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let segments: Vec<&str> = path
            .trim_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();
        match segments.as_slice() {
            ["tasks", "new"] => Ok(FormRoute::create(None)),
            ["projects", project, "tasks", "new"] => Ok(FormRoute::create(Some(project))),
            ["projects", project, "tasks", task, "edit"] => Ok(FormRoute::edit(project, task)),
            _ => Err(StateError::InvalidRoute(path.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_path() {
        assert_eq!(Route::Dashboard.path(), "/dashboard");
        assert_eq!(Route::Project("P1".to_string()).path(), "/projects/P1");
        assert_eq!(Route::Project("P1".to_string()).to_string(), "/projects/P1");
    }

    #[test]
    fn test_form_route_parse() {
        assert_eq!("/tasks/new".parse::<FormRoute>(), Ok(FormRoute::create(None)));
        assert_eq!(
            "/projects/P1/tasks/new".parse::<FormRoute>(),
            Ok(FormRoute::create(Some("P1")))
        );
        assert_eq!(
            "/projects/P1/tasks/T1/edit/".parse::<FormRoute>(),
            Ok(FormRoute::edit("P1", "T1"))
        );
        assert!(matches!(
            "/projects/P1".parse::<FormRoute>(),
            Err(StateError::InvalidRoute(_))
        ));
    }

    #[test]
    fn test_form_route_mode() {
        assert!(!FormRoute::create(Some("P1")).is_editing());
        assert!(FormRoute::edit("P1", "T1").is_editing());
        assert_eq!(FormRoute::edit("P1", "T1").path(), "/projects/P1/tasks/T1/edit");
        assert_eq!(FormRoute::create(None).path(), "/tasks/new");
    }
}

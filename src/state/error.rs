//! State management-specific error types.

/// Errors that can occur during state operations.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    /// Title left empty at submit time
    #[error("Title is required")]
    TitleRequired,

    /// No project selected at submit time
    #[error("Project is required")]
    ProjectRequired,

    /// Selected project is not among the loaded projects
    #[error("Unknown project: {id}")]
    UnknownProject { id: String },

    /// Due date is not a calendar date
    #[error("Invalid due date: {0}")]
    InvalidDueDate(String),

    /// Status outside of the known values
    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    /// Field name that the form does not have
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// Project was supplied by the route and cannot be changed
    #[error("Project is locked by the current route")]
    ProjectLocked,

    /// Path that does not name a form route
    #[error("Invalid route: {0}")]
    InvalidRoute(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_error_display() {
        assert_eq!(StateError::TitleRequired.to_string(), "Title is required");
        assert_eq!(StateError::ProjectRequired.to_string(), "Project is required");

        let error = StateError::UnknownProject {
            id: "P9".to_string(),
        };
        assert!(error.to_string().contains("P9"));

        let error = StateError::InvalidStatus("blocked".to_string());
        assert!(error.to_string().contains("blocked"));

        let error = StateError::InvalidRoute("/nowhere".to_string());
        assert!(error.to_string().contains("/nowhere"));
    }
}

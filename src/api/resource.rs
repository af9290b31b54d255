use fake::Dummy;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Defines project data structure.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Deserialize)]
pub struct Project {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
}

/// Workflow states a task can be in.
///
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Todo, TaskStatus::InProgress, TaskStatus::Done];

    /// Return the wire representation.
    ///
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Done => "done",
        }
    }

    /// Return the human readable label.
    ///
    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "To Do",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Done => "Done",
        }
    }

    pub fn next(&self) -> TaskStatus {
        match self {
            TaskStatus::Todo => TaskStatus::InProgress,
            TaskStatus::InProgress => TaskStatus::Done,
            TaskStatus::Done => TaskStatus::Todo,
        }
    }

    pub fn previous(&self) -> TaskStatus {
        match self {
            TaskStatus::Todo => TaskStatus::Done,
            TaskStatus::InProgress => TaskStatus::Todo,
            TaskStatus::Done => TaskStatus::InProgress,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskStatus::ALL
            .iter()
            .find(|status| status.as_str() == s)
            .copied()
            .ok_or_else(|| s.to_string())
    }
}

/// Defines task data structure as returned by the backend.
///
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(deserialize_with = "project_id")]
    pub project: String,
}

/// A task's project is either a bare id or a populated project document.
///
#[derive(Deserialize)]
#[serde(untagged)]
enum ProjectRef {
    Id(String),
    Populated {
        #[serde(alias = "_id")]
        id: String,
    },
}

fn project_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match ProjectRef::deserialize(deserializer)? {
        ProjectRef::Id(id) => id,
        ProjectRef::Populated { id } => id,
    })
}

/// Unsaved task record, sent as the body of create and update requests.
///
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub due_date: String,
    pub project: String,
}

impl TaskDraft {
    /// Return an empty draft, optionally bound to a project.
    ///
    pub fn new(project: Option<&str>) -> Self {
        TaskDraft {
            project: project.unwrap_or_default().to_owned(),
            ..TaskDraft::default()
        }
    }
}

impl From<&Task> for TaskDraft {
    fn from(task: &Task) -> Self {
        TaskDraft {
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            status: task.status,
            due_date: task
                .due_date
                .as_deref()
                .map(date_portion)
                .unwrap_or_default()
                .to_owned(),
            project: task.project.clone(),
        }
    }
}

/// Return the date part of an ISO-8601 timestamp.
///
pub fn date_portion(value: &str) -> &str {
    value.split('T').next().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_date_portion() {
        assert_eq!(date_portion("2024-01-05T00:00:00Z"), "2024-01-05");
        assert_eq!(date_portion("2024-01-05"), "2024-01-05");
        assert_eq!(date_portion(""), "");
    }

    #[test]
    fn test_status_wire_format() {
        assert_eq!(json!(TaskStatus::InProgress), json!("in-progress"));
        assert_eq!("done".parse::<TaskStatus>(), Ok(TaskStatus::Done));
        assert_eq!("blocked".parse::<TaskStatus>(), Err("blocked".to_string()));
        assert_eq!(TaskStatus::default(), TaskStatus::Todo);
    }

    #[test]
    fn test_status_cycle() {
        for status in TaskStatus::ALL {
            assert_eq!(status.next().previous(), status);
        }
        assert_eq!(TaskStatus::Done.next(), TaskStatus::Todo);
    }

    #[test]
    fn test_task_deserializes_mongo_ids_and_populated_project() {
        let task: Task = serde_json::from_value(json!({
            "_id": "T1",
            "title": "Write report",
            "status": "in-progress",
            "dueDate": "2024-01-05T00:00:00.000Z",
            "project": { "_id": "P1", "title": "Reports" }
        }))
        .unwrap();
        assert_eq!(task.id, "T1");
        assert_eq!(task.project, "P1");
        assert_eq!(task.description, None);
    }

    #[test]
    fn test_draft_from_task_truncates_due_date() {
        let task: Task = serde_json::from_value(json!({
            "id": "T1",
            "title": "Write report",
            "description": "Quarterly",
            "status": "done",
            "dueDate": "2024-01-05T00:00:00Z",
            "project": "P1"
        }))
        .unwrap();
        let draft = TaskDraft::from(&task);
        assert_eq!(
            draft,
            TaskDraft {
                title: "Write report".to_string(),
                description: "Quarterly".to_string(),
                status: TaskStatus::Done,
                due_date: "2024-01-05".to_string(),
                project: "P1".to_string(),
            }
        );
    }

    #[test]
    fn test_draft_serializes_camel_case() {
        let draft = TaskDraft {
            title: "A".to_string(),
            due_date: "2024-02-01".to_string(),
            project: "P1".to_string(),
            ..TaskDraft::default()
        };
        assert_eq!(
            serde_json::to_value(&draft).unwrap(),
            json!({
                "title": "A",
                "description": "",
                "status": "todo",
                "dueDate": "2024-02-01",
                "project": "P1"
            })
        );
    }
}

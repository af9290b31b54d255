mod client;
mod error;
mod resource;

pub use error::ApiError;
pub use resource::*;

use client::Client;
use log::*;
use serde_json::Value;

/// Responsible for asynchronous interaction with the task backend including
/// transformation of response data into explicitly-defined types.
///
pub struct Api {
    client: Client,
}

impl Api {
    /// Returns a new instance for the given base URL and optional access
    /// token.
    ///
    pub fn new(base_url: &str, access_token: Option<&str>) -> Result<Api, ApiError> {
        debug!("Initializing API client for {}...", base_url);
        Ok(Api {
            client: Client::new(base_url, access_token)?,
        })
    }

    /// Returns every project visible to the user.
    ///
    pub async fn projects(&self) -> Result<Vec<Project>, ApiError> {
        debug!("Requesting projects...");
        let projects: Vec<Project> = self.client.get("projects").await?;
        debug!("Retrieved {} projects", projects.len());
        Ok(projects)
    }

    /// Returns every task of the project, undecoded.
    ///
    pub async fn project_tasks(&self, project_id: &str) -> Result<Vec<Value>, ApiError> {
        debug!("Requesting tasks for project {}...", project_id);
        let tasks: Vec<Value> = self
            .client
            .get(&format!("tasks/project/{}", project_id))
            .await?;
        debug!("Retrieved {} tasks for project {}", tasks.len(), project_id);
        Ok(tasks)
    }

    /// Returns the task with the given id from the project's task list, or
    /// `None` when the project has no such task. Only the matching entry is
    /// decoded, so malformed siblings do not affect the lookup.
    ///
    pub async fn find_task(
        &self,
        project_id: &str,
        task_id: &str,
    ) -> Result<Option<Task>, ApiError> {
        // The backend has no single-task endpoint, so scan the project's tasks.
        let entry = self
            .project_tasks(project_id)
            .await?
            .into_iter()
            .find(|entry| entry_id(entry) == Some(task_id));

        match entry {
            Some(mut entry) => {
                if let Some(fields) = entry.as_object_mut() {
                    if fields.contains_key("_id") {
                        fields.remove("id");
                    }
                }
                Ok(Some(serde_json::from_value(entry)?))
            }
            None => {
                debug!("Task {} not found in project {}", task_id, project_id);
                Ok(None)
            }
        }
    }

    /// Create a task from the draft.
    ///
    pub async fn create_task(&self, draft: &TaskDraft) -> Result<(), ApiError> {
        debug!("Creating task '{}' in project {}...", draft.title, draft.project);
        self.client.post("tasks", draft).await
    }

    /// Replace the fields of an existing task with the draft.
    ///
    pub async fn update_task(&self, task_id: &str, draft: &TaskDraft) -> Result<(), ApiError> {
        debug!("Updating task {}...", task_id);
        self.client.put(&format!("tasks/{}", task_id), draft).await
    }
}

/// Return the `_id` (or `id`) of a raw task entry.
///
fn entry_id(entry: &Value) -> Option<&str> {
    entry
        .get("_id")
        .or_else(|| entry.get("id"))
        .and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use fake::{Fake, Faker};
    use httpmock::MockServer;
    use serde_json::json;

    fn task_json(id: &str, project: &str) -> serde_json::Value {
        json!({
            "_id": id,
            "title": format!("Task {}", id),
            "description": "",
            "status": "todo",
            "dueDate": null,
            "project": project,
        })
    }

    #[tokio::test]
    async fn projects_success() -> Result<()> {
        let projects: [Project; 2] = Faker.fake();

        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("GET")
                    .path("/projects")
                    .header("Authorization", "Bearer secret");
                then.status(200).json_body(json!([
                    { "_id": projects[0].id, "title": projects[0].title, "owner": "u1" },
                    { "_id": projects[1].id, "title": projects[1].title, "owner": "u1" },
                ]));
            })
            .await;

        let api = Api::new(&server.base_url(), Some("secret"))?;
        assert_eq!(api.projects().await?, projects.to_vec());
        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn projects_unauthorized() -> Result<()> {
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("GET").path("/projects");
                then.status(401);
            })
            .await;

        let api = Api::new(&server.base_url(), None)?;
        assert!(matches!(
            api.projects().await,
            Err(ApiError::Server { status: 401, message: None })
        ));
        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn find_task_scans_project_tasks() -> Result<()> {
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("GET").path("/tasks/project/P1");
                then.status(200)
                    .json_body(json!([task_json("T0", "P1"), task_json("T1", "P1")]));
            })
            .await;

        let api = Api::new(&server.base_url(), None)?;
        let task = api.find_task("P1", "T1").await?;
        assert_eq!(task.map(|t| t.id), Some("T1".to_string()));
        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn find_task_missing_returns_none() -> Result<()> {
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("GET").path("/tasks/project/P1");
                then.status(200).json_body(json!([task_json("T0", "P1")]));
            })
            .await;

        let api = Api::new(&server.base_url(), None)?;
        assert_eq!(api.find_task("P1", "T9").await?, None);
        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn find_task_ignores_malformed_siblings() -> Result<()> {
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("GET").path("/tasks/project/P1");
                then.status(200).json_body(json!([
                    { "_id": "T0", "title": "Orphan", "status": "todo", "project": null },
                    { "_id": "T2", "status": "blocked", "project": "P1" },
                    {
                        "_id": "T1",
                        "id": "T1",
                        "title": "Target",
                        "status": "done",
                        "project": { "_id": "P1", "title": "Launch" }
                    },
                ]));
            })
            .await;

        let api = Api::new(&server.base_url(), None)?;
        let task = api.find_task("P1", "T1").await?.expect("target task");
        assert_eq!(task.title, "Target");
        assert_eq!(task.status, TaskStatus::Done);
        assert_eq!(task.project, "P1");
        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn find_task_malformed_target_is_an_error() -> Result<()> {
        let server = MockServer::start();
        server
            .mock_async(|when, then| {
                when.method("GET").path("/tasks/project/P1");
                then.status(200)
                    .json_body(json!([{ "_id": "T1", "status": "todo", "project": "P1" }]));
            })
            .await;

        let api = Api::new(&server.base_url(), None)?;
        assert!(matches!(
            api.find_task("P1", "T1").await,
            Err(ApiError::Deserialization(_))
        ));
        Ok(())
    }

    #[tokio::test]
    async fn create_task_accepts_any_success_body() -> Result<()> {
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("POST").path("/tasks");
                then.status(201).json_body(json!({ "message": "Task created" }));
            })
            .await;

        let api = Api::new(&server.base_url(), None)?;
        api.create_task(&TaskDraft::new(Some("P1"))).await?;
        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn create_task_posts_draft() -> Result<()> {
        let draft = TaskDraft {
            title: "Ship it".to_string(),
            due_date: "2024-01-05".to_string(),
            project: "P1".to_string(),
            ..TaskDraft::default()
        };

        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("POST").path("/tasks").json_body(json!({
                    "title": "Ship it",
                    "description": "",
                    "status": "todo",
                    "dueDate": "2024-01-05",
                    "project": "P1",
                }));
                then.status(201).json_body(task_json("T5", "P1"));
            })
            .await;

        let api = Api::new(&server.base_url(), None)?;
        api.create_task(&draft).await?;
        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn update_task_puts_draft() -> Result<()> {
        let draft = TaskDraft {
            title: "Renamed".to_string(),
            status: TaskStatus::Done,
            project: "P1".to_string(),
            ..TaskDraft::default()
        };

        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("PUT").path("/tasks/T1").json_body(json!({
                    "title": "Renamed",
                    "description": "",
                    "status": "done",
                    "dueDate": "",
                    "project": "P1",
                }));
                then.status(200).json_body(task_json("T1", "P1"));
            })
            .await;

        let api = Api::new(&server.base_url(), None)?;
        api.update_task("T1", &draft).await?;
        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn create_task_extracts_server_message() -> Result<()> {
        let server = MockServer::start();
        server
            .mock_async(|when, then| {
                when.method("POST").path("/tasks");
                then.status(400).json_body(json!({ "message": "Project not found" }));
            })
            .await;

        let api = Api::new(&server.base_url(), None)?;
        let error = api
            .create_task(&TaskDraft::new(Some("P404")))
            .await
            .unwrap_err();
        assert_eq!(error.server_message(), Some("Project not found"));
        Ok(())
    }
}

use crate::task::record::{format_time_of_day, parse_due_date, parse_time_of_day};
use crate::task::{Task, TaskDraft, TaskPatch, TaskStatus};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub const TASKS_TABLE: &str = "tasks";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("Request error: {0}")]
    RequestError(String),
    #[error("Task not found: {0}")]
    NotFound(String),
    #[error("Rate limit exceeded")]
    RateLimited,
    #[error("Authentication failed")]
    AuthenticationFailed,
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl ApiError {
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, ApiError::AuthenticationFailed)
    }
}

/// Row shape of the `tasks` table. Every column is optional on the wire so a
/// single malformed row can be skipped instead of failing the whole fetch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct TaskRow {
    id: Option<serde_json::Value>,
    title: Option<String>,
    status: Option<String>,
    due_date: Option<String>,
    start_time: Option<String>,
    end_time: Option<String>,
    color: Option<String>,
    user_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
struct InsertRow {
    title: String,
    user_id: Uuid,
    status: &'static str,
    due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<&'static str>,
}

#[derive(Debug, Default, Serialize)]
struct PatchRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    due_date: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_time: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    end_time: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<Option<&'static str>>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskApi: Send + Sync {
    async fn fetch_tasks(&self, owner: Uuid) -> Result<Vec<Task>, ApiError>;

    async fn insert_task(&self, owner: Uuid, draft: &TaskDraft) -> Result<Task, ApiError>;

    async fn update_task(&self, task_id: &str, patch: &TaskPatch) -> Result<(), ApiError>;

    async fn delete_task(&self, task_id: &str) -> Result<(), ApiError>;
}

pub struct SupabaseTaskClient {
    base_url: String,
    api_key: String,
    access_token: String,
    client: reqwest::Client,
}

impl SupabaseTaskClient {
    pub fn new(base_url: &str, api_key: String, access_token: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            access_token,
            client: reqwest::Client::new(),
        }
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, TASKS_TABLE)
    }

    fn request(&self, method: reqwest::Method) -> reqwest::RequestBuilder {
        self.client
            .request(method, self.table_url())
            .header("apikey", &self.api_key)
            .bearer_auth(&self.access_token)
    }

    fn convert_from_row(&self, row: TaskRow) -> Result<Task, ApiError> {
        let id = match row.id {
            Some(serde_json::Value::String(id)) => id,
            Some(serde_json::Value::Number(id)) => id.to_string(),
            _ => return Err(ApiError::ParseError("Missing task id".to_string())),
        };

        let status = row.status
            .as_deref()
            .ok_or_else(|| ApiError::ParseError(format!("Task {} has no status", id)))?
            .parse::<TaskStatus>()
            .map_err(|e| ApiError::ParseError(format!("Task {}: {}", id, e)))?;

        let owner = row.user_id
            .ok_or_else(|| ApiError::ParseError(format!("Task {} has no owner", id)))?;

        let color = match row.color.as_deref() {
            Some(value) if !value.trim().is_empty() => match value.parse() {
                Ok(color) => Some(color),
                Err(e) => {
                    tracing::warn!("Ignoring color of task {}: {}", id, e);
                    None
                }
            },
            _ => None,
        };

        Ok(Task {
            title: row.title.unwrap_or_default(),
            status,
            due_date: row.due_date.as_deref().and_then(parse_due_date),
            start_time: row.start_time.as_deref().and_then(parse_time_of_day),
            end_time: row.end_time.as_deref().and_then(parse_time_of_day),
            color,
            owner,
            id,
        })
    }

    fn convert_to_insert_row(&self, owner: Uuid, draft: &TaskDraft) -> InsertRow {
        InsertRow {
            title: draft.trimmed_title().to_string(),
            user_id: owner,
            status: TaskStatus::Todo.as_str(),
            due_date: draft.due_date.map(|d| d.format("%Y-%m-%d").to_string()),
            start_time: draft.start_time.map(format_time_of_day),
            end_time: draft.end_time.map(format_time_of_day),
            color: draft.color.map(|c| c.as_str()),
        }
    }

    fn convert_to_patch_row(&self, patch: &TaskPatch) -> PatchRow {
        PatchRow {
            title: patch.title.as_ref().map(|t| t.trim().to_string()),
            status: patch.status.map(|s| s.as_str()),
            due_date: patch.due_date.map(|d| d.map(|d| d.format("%Y-%m-%d").to_string())),
            start_time: patch.start_time.map(|t| t.map(format_time_of_day)),
            end_time: patch.end_time.map(|t| t.map(format_time_of_day)),
            color: patch.color.map(|c| c.map(|c| c.as_str())),
        }
    }
}

async fn error_for_status(response: reqwest::Response, target: &str) -> Result<reqwest::Response, ApiError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    if status == 401 || status == 403 {
        tracing::error!("Authentication failed for {}", target);
        return Err(ApiError::AuthenticationFailed);
    }

    if status == 404 {
        tracing::error!("Not found: {}", target);
        return Err(ApiError::NotFound(target.to_string()));
    }

    if status == 429 {
        tracing::warn!("Rate limit exceeded");
        return Err(ApiError::RateLimited);
    }

    let body = response.text().await?;
    tracing::error!("Request for {} failed. Status: {}, Body: {}", target, status, body);
    Err(ApiError::RequestError(format!("Status {}: {}", status, body)))
}

#[async_trait]
impl TaskApi for SupabaseTaskClient {
    async fn fetch_tasks(&self, owner: Uuid) -> Result<Vec<Task>, ApiError> {
        tracing::info!("Fetching tasks for {}", owner);

        let owner_filter = format!("eq.{}", owner);
        let response = self.request(reqwest::Method::GET)
            .query(&[("select", "*"), ("user_id", owner_filter.as_str())])
            .send()
            .await?;

        tracing::info!("Fetch tasks response status: {}", response.status());
        let response = error_for_status(response, TASKS_TABLE).await?;

        let rows: Vec<TaskRow> = response.json().await?;

        let tasks: Vec<Task> = rows
            .into_iter()
            .filter_map(|row| match self.convert_from_row(row) {
                Ok(task) => Some(task),
                Err(e) => {
                    tracing::warn!("Skipping task row: {}", e);
                    None
                }
            })
            .collect();

        tracing::info!("Fetched {} tasks successfully", tasks.len());
        Ok(tasks)
    }

    async fn insert_task(&self, owner: Uuid, draft: &TaskDraft) -> Result<Task, ApiError> {
        let row = self.convert_to_insert_row(owner, draft);

        tracing::info!("Creating task: {}", row.title);
        tracing::debug!("POST {} with payload: {:?}", self.table_url(), row);

        let response = self.request(reqwest::Method::POST)
            .header("Prefer", "return=representation")
            .json(&[row])
            .send()
            .await?;

        tracing::info!("Create task response status: {}", response.status());
        let response = error_for_status(response, TASKS_TABLE).await?;

        let created: Vec<TaskRow> = response.json().await?;
        let row = created
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::ParseError("Insert returned no rows".to_string()))?;

        let task = self.convert_from_row(row)?;
        tracing::info!("Task created successfully with ID: {}", task.id);
        Ok(task)
    }

    async fn update_task(&self, task_id: &str, patch: &TaskPatch) -> Result<(), ApiError> {
        let row = self.convert_to_patch_row(patch);
        let id_filter = format!("eq.{}", task_id);

        tracing::info!("Updating task {}", task_id);
        tracing::debug!("PATCH {} with payload: {:?}", self.table_url(), row);

        let response = self.request(reqwest::Method::PATCH)
            .query(&[("id", id_filter.as_str())])
            .json(&row)
            .send()
            .await?;

        tracing::info!("Update task response status: {}", response.status());
        error_for_status(response, task_id).await?;

        tracing::info!("Task {} updated successfully", task_id);
        Ok(())
    }

    async fn delete_task(&self, task_id: &str) -> Result<(), ApiError> {
        let id_filter = format!("eq.{}", task_id);

        tracing::info!("Deleting task {}", task_id);

        let response = self.request(reqwest::Method::DELETE)
            .query(&[("id", id_filter.as_str())])
            .send()
            .await?;

        error_for_status(response, task_id).await?;

        tracing::info!("Task {} deleted", task_id);
        Ok(())
    }
}

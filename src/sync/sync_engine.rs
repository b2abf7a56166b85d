use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::storage::config::Config;
use crate::sync::auth_session::AuthSession;
use crate::sync::supabase_auth::AuthError;
use crate::sync::task_api::{ApiError, SupabaseTaskClient, TaskApi};
use crate::task::{Task, TaskDraft, TaskPatch};

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Authentication error: {0}")]
    AuthError(#[from] AuthError),
    #[error("API error: {0}")]
    ApiError(#[from] ApiError),
}

/// Task API bound to whatever session is current at call time. A token the
/// data service refuses ends the session.
pub struct SyncEngine {
    config: Config,
    auth: Arc<AuthSession>,
}

impl SyncEngine {
    pub fn new(config: Config, auth: Arc<AuthSession>) -> Self {
        Self { config, auth }
    }

    async fn client(&self) -> Result<SupabaseTaskClient, ApiError> {
        let token = match self.auth.access_token().await {
            Ok(token) => token,
            Err(AuthError::NoSession) => return Err(ApiError::AuthenticationFailed),
            Err(e) => return Err(ApiError::RequestError(e.to_string())),
        };
        Ok(SupabaseTaskClient::new(
            &self.config.supabase.url,
            self.config.supabase.anon_key.clone(),
            token,
        ))
    }

    fn observe<T>(&self, result: Result<T, ApiError>) -> Result<T, ApiError> {
        if let Err(e) = &result
            && e.is_auth_failure()
        {
            self.auth.invalidate();
        }
        result
    }

    pub async fn fetch_tasks_for_current_user(&self) -> Result<Vec<Task>, SyncError> {
        let session = self.auth.get_session().await?.ok_or(AuthError::NoSession)?;
        let tasks = self.fetch_tasks(session.user.id).await?;
        Ok(tasks)
    }
}

#[async_trait]
impl TaskApi for SyncEngine {
    async fn fetch_tasks(&self, owner: Uuid) -> Result<Vec<Task>, ApiError> {
        let client = self.observe(self.client().await)?;
        self.observe(client.fetch_tasks(owner).await)
    }

    async fn insert_task(&self, owner: Uuid, draft: &TaskDraft) -> Result<Task, ApiError> {
        let client = self.observe(self.client().await)?;
        self.observe(client.insert_task(owner, draft).await)
    }

    async fn update_task(&self, task_id: &str, patch: &TaskPatch) -> Result<(), ApiError> {
        let client = self.observe(self.client().await)?;
        self.observe(client.update_task(task_id, patch).await)
    }

    async fn delete_task(&self, task_id: &str) -> Result<(), ApiError> {
        let client = self.observe(self.client().await)?;
        self.observe(client.delete_task(task_id).await)
    }
}

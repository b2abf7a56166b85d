use uuid::Uuid;

use crate::sync::task_api::{ApiError, TaskApi};
use crate::task::{Task, TaskDraft, TaskPatch, TaskStatus};

/// Whether a mutation went through or was turned down before any remote call.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Applied,
    Declined,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub todo: usize,
    pub doing: usize,
    pub done: usize,
}

impl StatusCounts {
    pub fn total(&self) -> usize {
        self.todo + self.doing + self.done
    }

    pub fn get(&self, status: TaskStatus) -> usize {
        match status {
            TaskStatus::Todo => self.todo,
            TaskStatus::Doing => self.doing,
            TaskStatus::Done => self.done,
        }
    }

    /// Share of `status` in whole percent, 0 for an empty board. Shares are
    /// rounded by largest remainder so a non-empty board sums to 100.
    pub fn percent(&self, status: TaskStatus) -> u16 {
        self.percentages()[status.index()]
    }

    fn percentages(&self) -> [u16; 3] {
        let total = self.total();
        let mut shares = [0u16; 3];
        if total == 0 {
            return shares;
        }

        let mut remainders = [(0usize, 0usize); 3];
        for (column, status) in TaskStatus::ALL.iter().enumerate() {
            let scaled = self.get(*status) * 100;
            shares[column] = (scaled / total) as u16;
            remainders[column] = (scaled % total, column);
        }

        let assigned: u16 = shares.iter().sum();
        // Ties go to the leftmost column.
        remainders.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
        for (_, column) in remainders.iter().take((100 - assigned) as usize) {
            shares[*column] += 1;
        }
        shares
    }
}

/// In-memory copy of the signed-in user's tasks. Every mutation is sent to the
/// remote store first and mirrored locally only once the store accepted it.
#[derive(Debug, Clone, Default)]
pub struct TaskList {
    tasks: Vec<Task>,
    owner: Option<Uuid>,
    loaded: bool,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tasks(owner: Uuid, tasks: Vec<Task>) -> Self {
        Self {
            tasks,
            owner: Some(owner),
            loaded: true,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn owner(&self) -> Option<Uuid> {
        self.owner
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    pub fn with_status(&self, status: TaskStatus) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.status == status).collect()
    }

    pub fn counts(&self) -> StatusCounts {
        self.tasks.iter().fold(StatusCounts::default(), |mut counts, task| {
            match task.status {
                TaskStatus::Todo => counts.todo += 1,
                TaskStatus::Doing => counts.doing += 1,
                TaskStatus::Done => counts.done += 1,
            }
            counts
        })
    }

    /// Forgets the current contents so the next view mount fetches again.
    pub fn reset(&mut self) {
        self.tasks.clear();
        self.owner = None;
        self.loaded = false;
    }

    pub async fn load(&mut self, api: &dyn TaskApi, owner: Uuid) -> Result<usize, ApiError> {
        let tasks = api.fetch_tasks(owner).await?;
        let count = tasks.len();
        self.tasks = tasks;
        self.owner = Some(owner);
        self.loaded = true;
        Ok(count)
    }

    pub async fn add(&mut self, api: &dyn TaskApi, owner: Uuid, draft: &TaskDraft) -> Result<Mutation, ApiError> {
        if !draft.has_title() {
            tracing::debug!("Declining task without title");
            return Ok(Mutation::Declined);
        }

        let created = api.insert_task(owner, draft).await?;
        self.tasks.push(created);
        Ok(Mutation::Applied)
    }

    pub async fn update_status(&mut self, api: &dyn TaskApi, task_id: &str, status: TaskStatus) -> Result<Mutation, ApiError> {
        self.update_fields(api, task_id, TaskPatch::status(status)).await
    }

    pub async fn update_fields(&mut self, api: &dyn TaskApi, task_id: &str, patch: TaskPatch) -> Result<Mutation, ApiError> {
        if patch.is_empty() || patch.has_blank_title() {
            tracing::debug!("Declining update of task {}", task_id);
            return Ok(Mutation::Declined);
        }

        api.update_task(task_id, &patch).await?;

        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == task_id) {
            task.apply(&patch);
        }
        Ok(Mutation::Applied)
    }

    pub async fn remove(&mut self, api: &dyn TaskApi, task_id: &str) -> Result<Mutation, ApiError> {
        api.delete_task(task_id).await?;
        self.tasks.retain(|t| t.id != task_id);
        Ok(Mutation::Applied)
    }
}

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use super::task_store::TaskStore;
use crate::core::error::StoreError;
use crate::models::{tasks_from_json, NewTask, Task, TaskId};

/// [`TaskStore`] backed by a JSON CRUD resource (`GET/POST /tasks`,
/// `PUT/DELETE /tasks/{id}`).
#[derive(Debug, Clone)]
pub struct HttpTaskStore {
    client: Client,
    base_url: String,
}

impl HttpTaskStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn task_url(&self, id: &TaskId) -> String {
        format!("{}/{}", self.base_url, id)
    }
}

// Any non-2xx status is a rejection; the code is kept only for logs.
fn check_status(resp: Response) -> Result<Response, StoreError> {
    let status = resp.status();
    if status.is_success() {
        Ok(resp)
    } else {
        Err(StoreError::Rejected { status: status.as_u16() })
    }
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, StoreError> {
    let bytes = resp.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| StoreError::Decode(e.to_string()))
}

#[async_trait(?Send)]
impl TaskStore for HttpTaskStore {
    async fn list(&self) -> Result<Vec<Task>, StoreError> {
        log::debug!("GET {}", self.base_url);
        let resp = check_status(self.client.get(&self.base_url).send().await?)?;
        let payload: serde_json::Value = decode(resp).await?;
        Ok(tasks_from_json(payload))
    }

    async fn create(&self, task: &NewTask) -> Result<Task, StoreError> {
        log::debug!("POST {} title={:?}", self.base_url, task.title);
        let resp = self.client.post(&self.base_url).json(task).send().await?;
        decode(check_status(resp)?).await
    }

    async fn update(&self, task: &Task) -> Result<Task, StoreError> {
        let url = self.task_url(&task.id);
        log::debug!("PUT {} status={}", url, task.status.id());
        let resp = self.client.put(&url).json(task).send().await?;
        decode(check_status(resp)?).await
    }

    async fn delete(&self, id: &TaskId) -> Result<(), StoreError> {
        let url = self.task_url(id);
        log::debug!("DELETE {}", url);
        check_status(self.client.delete(&url).send().await?)?;
        Ok(())
    }
}

//! HTTP adapter speaking the task backend's REST contract.

use crate::view::domain::{BoardColumns, NewTask, Task, TaskId, TaskPatch, TaskQuery};
use crate::view::ports::{BackendError, BackendResult, ParsedVoice, TaskBackend, TaskPage};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

const BOARD_PATH: &str = "/api/tasks/board";
const LIST_PATH: &str = "/api/tasks";
const CREATE_PATH: &str = "/api/tasks/create-task";
const UPDATE_PATH: &str = "/api/tasks/update-task";
const DELETE_PATH: &str = "/api/tasks/delete-task";
const PARSE_PATH: &str = "/api/tasks/parse-voice-data";

/// Task backend adapter over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTaskBackend {
    client: reqwest::Client,
    base_url: String,
}

/// Error payload shape shared by every failing endpoint.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Success envelope for single-entity responses.
#[derive(Debug, Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

/// Update request body; the backend identifies the task inside the payload.
#[derive(Debug, Serialize)]
struct UpdateBody<'a> {
    #[serde(rename = "_id")]
    id: &'a TaskId,
    #[serde(flatten)]
    patch: &'a TaskPatch,
}

/// Voice parse request body.
#[derive(Debug, Serialize)]
struct ParseBody<'a> {
    transcript: &'a str,
}

impl HttpTaskBackend {
    /// Creates an adapter with a fresh client.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Creates an adapter reusing an existing client (connection pooling,
    /// custom timeouts).
    #[must_use]
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let mut base = base_url.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self {
            client,
            base_url: base,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

/// Turns a non-2xx response into a rejection, recovering the payload
/// message when one is present.
async fn rejection(response: reqwest::Response) -> BackendError {
    let status = response.status();
    let message = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.message)
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_owned()
        });
    BackendError::rejected(status.as_u16(), message)
}

/// Decodes a successful response body, or maps the failure.
async fn into_result<T: DeserializeOwned>(response: reqwest::Response) -> BackendResult<T> {
    if response.status().is_success() {
        response.json::<T>().await.map_err(BackendError::decode)
    } else {
        Err(rejection(response).await)
    }
}

#[async_trait]
impl TaskBackend for HttpTaskBackend {
    async fn board_view(
        &self,
        query: &TaskQuery,
        page: u32,
        limit: u32,
    ) -> BackendResult<TaskPage<BoardColumns>> {
        let response = self
            .client
            .get(self.url(BOARD_PATH))
            .query(&query.to_params(page, limit))
            .send()
            .await
            .map_err(BackendError::transport)?;
        into_result(response).await
    }

    async fn list_view(
        &self,
        query: &TaskQuery,
        page: u32,
        limit: u32,
    ) -> BackendResult<TaskPage<Vec<Task>>> {
        let response = self
            .client
            .get(self.url(LIST_PATH))
            .query(&query.to_params(page, limit))
            .send()
            .await
            .map_err(BackendError::transport)?;
        into_result(response).await
    }

    async fn create_task(&self, payload: &NewTask) -> BackendResult<Task> {
        let response = self
            .client
            .post(self.url(CREATE_PATH))
            .json(payload)
            .send()
            .await
            .map_err(BackendError::transport)?;
        let envelope: DataEnvelope<Task> = into_result(response).await?;
        Ok(envelope.data)
    }

    async fn update_task(&self, id: &TaskId, patch: &TaskPatch) -> BackendResult<Task> {
        let response = self
            .client
            .put(self.url(UPDATE_PATH))
            .json(&UpdateBody { id, patch })
            .send()
            .await
            .map_err(BackendError::transport)?;
        let envelope: DataEnvelope<Task> = into_result(response).await?;
        Ok(envelope.data)
    }

    async fn delete_task(&self, id: &TaskId) -> BackendResult<()> {
        let response = self
            .client
            .delete(self.url(DELETE_PATH))
            .query(&[("id", id.as_str())])
            .send()
            .await
            .map_err(BackendError::transport)?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(rejection(response).await)
        }
    }

    async fn parse_voice(&self, transcript: &str) -> BackendResult<ParsedVoice> {
        let response = self
            .client
            .post(self.url(PARSE_PATH))
            .json(&ParseBody { transcript })
            .send()
            .await
            .map_err(BackendError::transport)?;
        let envelope: DataEnvelope<ParsedVoice> = into_result(response).await?;
        Ok(envelope.data)
    }
}

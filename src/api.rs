use crate::errors::ClientError;
use crate::log::RequestLog;
use crate::models::{Envelope, Task, TaskChanges, TaskDraft};
use reqwest::Method;
use serde_json::{Value, json};

// Client for the envelope contract: every response wraps the resource in
// {success, data|error, details?, message?}.
pub struct TaskApi {
    http: reqwest::Client,
    base_url: String,
}

impl TaskApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn list(&self, log: &mut RequestLog) -> Result<Vec<Task>, ClientError> {
        let (status, body) = self.send(log, Method::GET, "/tasks", None).await?;
        expect_data(status, serde_json::from_value(body)?)
    }

    pub async fn get(&self, log: &mut RequestLog, id: u64) -> Result<Task, ClientError> {
        let (status, body) = self
            .send(log, Method::GET, &format!("/tasks/{id}"), None)
            .await?;
        expect_data(status, serde_json::from_value(body)?)
    }

    pub async fn create(
        &self,
        log: &mut RequestLog,
        draft: &TaskDraft,
    ) -> Result<Task, ClientError> {
        let payload = serde_json::to_value(draft)?;
        let (status, body) = self.send(log, Method::POST, "/tasks", Some(payload)).await?;
        expect_data(status, serde_json::from_value(body)?)
    }

    pub async fn update(
        &self,
        log: &mut RequestLog,
        id: u64,
        changes: &TaskChanges,
    ) -> Result<Task, ClientError> {
        let payload = serde_json::to_value(changes)?;
        let (status, body) = self
            .send(log, Method::PUT, &format!("/tasks/{id}"), Some(payload))
            .await?;
        expect_data(status, serde_json::from_value(body)?)
    }

    pub async fn toggle(&self, log: &mut RequestLog, id: u64) -> Result<Task, ClientError> {
        let (status, body) = self
            .send(log, Method::PATCH, &format!("/tasks/{id}/toggle"), None)
            .await?;
        expect_data(status, serde_json::from_value(body)?)
    }

    pub async fn delete(&self, log: &mut RequestLog, id: u64) -> Result<(), ClientError> {
        let (status, body) = self
            .send(log, Method::DELETE, &format!("/tasks/{id}"), None)
            .await?;
        let envelope: Envelope<Value> = serde_json::from_value(body)?;
        expect_success(status, envelope)
    }

    // One request, one log entry, even when the call fails. Transport
    // failures get a synthetic entry with no status.
    async fn send(
        &self,
        log: &mut RequestLog,
        method: Method,
        path: &str,
        payload: Option<Value>,
    ) -> Result<(u16, Value), ClientError> {
        let url = format!("{}{}", self.base_url.trim_end_matches('/'), path);
        let mut request = self.http.request(method.clone(), &url);
        if let Some(payload) = &payload {
            request = request.json(payload);
        }

        match request.send().await {
            Ok(response) => {
                let status = response.status().as_u16();
                match response.json::<Value>().await {
                    Ok(body) => {
                        log.record(method.as_str(), &url, Some(status), Some(body.clone()));
                        Ok((status, body))
                    }
                    Err(err) => {
                        log.record(method.as_str(), &url, Some(status), None);
                        Err(ClientError::Transport(err))
                    }
                }
            }
            Err(err) => {
                log.record(
                    method.as_str(),
                    &url,
                    None,
                    Some(json!({ "error": err.to_string() })),
                );
                Err(ClientError::Transport(err))
            }
        }
    }
}

fn expect_data<T>(status: u16, envelope: Envelope<T>) -> Result<T, ClientError> {
    if !envelope.success {
        return Err(envelope_error(status, envelope));
    }
    envelope
        .data
        .ok_or_else(|| ClientError::api(status, "response envelope is missing 'data'"))
}

fn expect_success<T>(status: u16, envelope: Envelope<T>) -> Result<(), ClientError> {
    if envelope.success {
        Ok(())
    } else {
        Err(envelope_error(status, envelope))
    }
}

fn envelope_error<T>(status: u16, envelope: Envelope<T>) -> ClientError {
    ClientError::Api {
        status,
        message: envelope
            .error
            .unwrap_or_else(|| "request failed".to_string()),
        details: envelope.details.unwrap_or_default(),
    }
}

use crate::errors::ClientError;
use crate::log::RequestLog;
use crate::models::{Todo, TodoDraft};
use reqwest::Method;
use serde_json::Value;

// Client for the plain contract: bare JSON bodies, outcomes judged by the
// HTTP status alone. Incompatible with the envelope contract.
pub struct TodoApi {
    http: reqwest::Client,
    base_url: String,
}

impl TodoApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn list(&self, log: &mut RequestLog) -> Result<Vec<Todo>, ClientError> {
        let body = self.send(log, Method::GET, "/todos", None).await?;
        let body = body.ok_or_else(|| ClientError::api(200, "expected a todo list body"))?;
        Ok(serde_json::from_value(body)?)
    }

    pub async fn add(&self, log: &mut RequestLog, draft: &TodoDraft) -> Result<Todo, ClientError> {
        let payload = serde_json::to_value(draft)?;
        let body = self.send(log, Method::POST, "/todos", Some(payload)).await?;
        let body = body.ok_or_else(|| ClientError::api(201, "expected the created todo body"))?;
        Ok(serde_json::from_value(body)?)
    }

    // Positions are list indexes from the last fetch, not ids.
    pub async fn remove(&self, log: &mut RequestLog, position: usize) -> Result<(), ClientError> {
        self.send(log, Method::DELETE, &format!("/todos/{position}"), None)
            .await?;
        Ok(())
    }

    async fn send(
        &self,
        log: &mut RequestLog,
        method: Method,
        path: &str,
        payload: Option<Value>,
    ) -> Result<Option<Value>, ClientError> {
        let url = format!("{}{}", self.base_url.trim_end_matches('/'), path);
        let mut request = self.http.request(method.clone(), &url);
        if let Some(payload) = &payload {
            request = request.json(payload);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                log.record(
                    method.as_str(),
                    &url,
                    None,
                    Some(serde_json::json!({ "error": err.to_string() })),
                );
                return Err(ClientError::Transport(err));
            }
        };

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = if text.is_empty() {
                "request failed".to_string()
            } else {
                text.clone()
            };
            let body = (!text.is_empty()).then(|| Value::String(text));
            log.record(method.as_str(), &url, Some(status), body);
            return Err(ClientError::api(status, message));
        }

        let text = response.text().await.map_err(ClientError::Transport)?;
        if text.trim().is_empty() {
            log.record(method.as_str(), &url, Some(status), None);
            return Ok(None);
        }

        let body: Value = match serde_json::from_str(&text) {
            Ok(value) => value,
            Err(err) => {
                log.record(method.as_str(), &url, Some(status), Some(Value::String(text)));
                return Err(ClientError::Decode(err));
            }
        };
        log.record(method.as_str(), &url, Some(status), Some(body.clone()));
        Ok(Some(body))
    }
}

use std::time::Duration;

use api_types::{
    Ack, ErrorResponse,
    auth::{Login, Profile, SessionCreated, Signup},
    budget::{BudgetNew, BudgetPlan},
    expense::{Expense, ExpenseNew},
    message::{Message, MessageNew},
    note::{Note, NoteNew},
    summary::Summary,
};
use reqwest::{Method, Url, header::CONTENT_TYPE};
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

use crate::error::{AppError, Result};

/// Message used when a failed response carries no `error` field.
pub const GENERIC_ERROR: &str = "Request failed";

/// Errors surfaced by the gateway.
///
/// Server-reported variants display exactly the server message so callers can
/// show `err.to_string()` to the user as-is.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Validation(String),
    #[error("{message}")]
    Server { status: u16, message: String },
    #[error("server unreachable: {0}")]
    Transport(reqwest::Error),
    #[error("unexpected response: {0}")]
    Decode(serde_json::Error),
    #[error("invalid endpoint: {0}")]
    Endpoint(String),
}

impl ClientError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }
}

#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
}

impl Client {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, None)
    }

    /// Builds a client; the session cookie is kept in the client's cookie store
    /// and shared by every clone.
    pub fn with_timeout(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut base_url = Url::parse(base_url)
            .map_err(|err| AppError::BaseUrl(format!("{base_url}: {err}")))?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut builder = reqwest::Client::builder().cookie_store(true);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            base_url,
            http: builder.build()?,
        })
    }

    fn endpoint(&self, path: &str) -> std::result::Result<Url, ClientError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|err| ClientError::Endpoint(format!("{path}: {err}")))
    }

    /// Sends a JSON request and decodes the JSON response.
    ///
    /// Non-success statuses become a [`ClientError`] carrying the server's
    /// `error` field, or [`GENERIC_ERROR`] when the field is missing.
    pub async fn request<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> std::result::Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        tracing::debug!(%method, %url, "sending request");

        let mut req = self
            .http
            .request(method.clone(), url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            req = req.json(body);
        }

        let res = req.send().await.map_err(|err| {
            tracing::debug!("request failed: {err}");
            ClientError::Transport(err)
        })?;

        let status = res.status();
        let bytes = res.bytes().await.map_err(ClientError::Transport)?;

        if status.is_success() {
            return serde_json::from_slice(&bytes).map_err(|err| {
                tracing::debug!(%method, path, "undecodable body: {err}");
                ClientError::Decode(err)
            });
        }

        let err = error_for_status(status.as_u16(), &bytes);
        tracing::debug!(%method, path, status = status.as_u16(), "request rejected: {err}");
        Err(err)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> std::result::Result<T, ClientError> {
        self.request::<(), T>(Method::GET, path, None).await
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> std::result::Result<T, ClientError> {
        self.request(Method::POST, path, Some(body)).await
    }

    pub async fn me(&self) -> std::result::Result<Profile, ClientError> {
        self.get("/api/me").await
    }

    pub async fn login(&self, payload: &Login) -> std::result::Result<SessionCreated, ClientError> {
        self.post("/api/login", payload).await
    }

    pub async fn signup(
        &self,
        payload: &Signup,
    ) -> std::result::Result<SessionCreated, ClientError> {
        self.post("/api/signup", payload).await
    }

    pub async fn logout(&self) -> std::result::Result<Ack, ClientError> {
        self.request::<(), Ack>(Method::POST, "/api/logout", None).await
    }

    pub async fn summary(&self) -> std::result::Result<Summary, ClientError> {
        self.get("/api/summary").await
    }

    pub async fn budgets(&self) -> std::result::Result<Vec<BudgetPlan>, ClientError> {
        self.get("/api/budgets").await
    }

    pub async fn expenses(&self) -> std::result::Result<Vec<Expense>, ClientError> {
        self.get("/api/expenses").await
    }

    pub async fn notes(&self) -> std::result::Result<Vec<Note>, ClientError> {
        self.get("/api/notes").await
    }

    pub async fn messages(&self) -> std::result::Result<Vec<Message>, ClientError> {
        self.get("/api/messages").await
    }

    pub async fn create_budget(
        &self,
        payload: &BudgetNew,
    ) -> std::result::Result<Ack, ClientError> {
        self.post("/api/budgets", payload).await
    }

    pub async fn create_expense(
        &self,
        payload: &ExpenseNew,
    ) -> std::result::Result<Ack, ClientError> {
        self.post("/api/expenses", payload).await
    }

    pub async fn create_note(&self, payload: &NoteNew) -> std::result::Result<Ack, ClientError> {
        self.post("/api/notes", payload).await
    }

    pub async fn send_message(
        &self,
        payload: &MessageNew,
    ) -> std::result::Result<Ack, ClientError> {
        self.post("/api/messages", payload).await
    }
}

fn error_for_status(status: u16, body: &[u8]) -> ClientError {
    let message = serde_json::from_slice::<ErrorResponse>(body)
        .ok()
        .and_then(|err| err.error)
        .unwrap_or_else(|| GENERIC_ERROR.to_string());

    match status {
        401 | 403 => ClientError::Unauthorized(message),
        400 | 422 => ClientError::Validation(message),
        _ => ClientError::Server { status, message },
    }
}

use crate::config::EnvConfig;
use crate::dashboard::{NotesSource, UserSource};
use crate::models::{Note, UserInfo};
use crate::storage::load_token_from_storage;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ApiErrorKind {
    Unauthorized,
    Network,
    Http,
    Parse,
}

#[derive(Clone, Debug, Error)]
#[error("{message}")]
pub(crate) struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    fn network(e: reqwest::Error) -> Self {
        Self::new(ApiErrorKind::Network, e.to_string())
    }

    fn parse(e: impl std::fmt::Display) -> Self {
        Self::new(ApiErrorKind::Parse, e.to_string())
    }

    fn unauthorized() -> Self {
        Self::new(ApiErrorKind::Unauthorized, "Unauthorized")
    }

    fn http(status: reqwest::StatusCode, body: &str, ctx: &str) -> Self {
        Self::new(
            ApiErrorKind::Http,
            format!("{ctx} ({status}): {}", error_message(body)),
        )
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

/// Response envelope: `{status, message, data}`. `status` is implied by the
/// HTTP status and is not kept.
#[derive(Deserialize, Debug)]
pub(crate) struct Envelope<T> {
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    fn into_data(self, ctx: &str) -> ApiResult<T> {
        self.data
            .ok_or_else(|| ApiError::parse(format!("{ctx}: response has no `data`")))
    }
}

/// Prefer the API's `message` field; fall back to the raw body.
pub(crate) fn error_message(body: &str) -> String {
    serde_json::from_str::<Envelope<serde_json::Value>>(body)
        .ok()
        .and_then(|e| e.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| body.trim().to_string())
}

fn note_path(id: &str) -> String {
    format!("/notes/{}", urlencoding::encode(id))
}

#[derive(Clone, Debug)]
pub(crate) struct ApiClient {
    pub(crate) base_url: String,
    pub(crate) token: Option<String>,
}

impl ApiClient {
    #[cfg(test)]
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            token: None,
        }
    }

    /// Token issuance lives elsewhere; the client only picks up what is stored.
    pub fn load_from_storage(config: &EnvConfig) -> Self {
        Self {
            base_url: config.api_url.clone(),
            token: load_token_from_storage(),
        }
    }

    #[cfg(test)]
    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    fn get_auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    fn with_auth_headers(
        mut req: reqwest::RequestBuilder,
        auth_header: Option<String>,
    ) -> reqwest::RequestBuilder {
        if let Some(header) = auth_header {
            req = req.header("Authorization", header);
        }
        req
    }

    async fn request_api<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        ctx: &str,
    ) -> ApiResult<Envelope<T>> {
        let client = reqwest::Client::new();
        let url = format!("{}{}", self.base_url, path);
        let req = Self::with_auth_headers(client.request(method, url), self.get_auth_header());

        let res = req.send().await.map_err(ApiError::network)?;

        if res.status().is_success() {
            res.json().await.map_err(ApiError::parse)
        } else if res.status().as_u16() == 401 {
            Err(ApiError::unauthorized())
        } else {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            Err(ApiError::http(status, &body, ctx))
        }
    }

    pub async fn get_all_notes(&self) -> ApiResult<Vec<Note>> {
        let ctx = "Failed to load notes";
        self.request_api(Method::GET, "/notes", ctx)
            .await?
            .into_data(ctx)
    }

    pub async fn get_note(&self, id: &str) -> ApiResult<Note> {
        let ctx = "Failed to load note";
        self.request_api(Method::GET, &note_path(id), ctx)
            .await?
            .into_data(ctx)
    }

    pub async fn delete_note(&self, id: &str) -> ApiResult<String> {
        let envelope: Envelope<serde_json::Value> = self
            .request_api(Method::DELETE, &note_path(id), "Failed to delete note")
            .await?;
        Ok(envelope.message.unwrap_or_else(|| "Note deleted".to_string()))
    }

    pub async fn get_user_info(&self) -> ApiResult<UserInfo> {
        let ctx = "Failed to load user info";
        self.request_api(Method::GET, "/users/me", ctx)
            .await?
            .into_data(ctx)
    }
}

impl NotesSource for ApiClient {
    async fn get_all(&self) -> ApiResult<Vec<Note>> {
        self.get_all_notes().await
    }

    async fn get_by_id(&self, id: &str) -> ApiResult<Note> {
        self.get_note(id).await
    }

    async fn destroy(&self, id: &str) -> ApiResult<String> {
        self.delete_note(id).await
    }
}

impl UserSource for ApiClient {
    async fn get_user_info(&self) -> ApiResult<UserInfo> {
        ApiClient::get_user_info(self).await
    }
}

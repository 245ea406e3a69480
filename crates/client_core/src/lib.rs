//! HTTP client for the user-management REST service.
//!
//! Every call resolves to the server's own `{success, data, message}` envelope
//! or a [`RequestError`]; interpreting `success:false` is left to the caller.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use shared::{
    domain::{UserFields, UserId},
    error::{ErrorBody, HttpStatusError},
    protocol::{ApiResult, DeleteResult, MutationResult, UserListResult, UserResult},
};
use tracing::{debug, warn};
use url::Url;

pub mod config;
pub mod error;

pub use config::{load_settings, ApiSettings, ConfigError};
pub use error::RequestError;

/// The five logical operations of the user service.
#[async_trait]
pub trait UserApi: Send + Sync {
    async fn list_users(&self) -> Result<UserListResult, RequestError>;
    async fn get_user(&self, id: &UserId) -> Result<UserResult, RequestError>;
    async fn create_user(&self, fields: &UserFields) -> Result<MutationResult, RequestError>;
    async fn update_user(
        &self,
        id: &UserId,
        fields: &UserFields,
    ) -> Result<MutationResult, RequestError>;
    async fn delete_user(&self, id: &UserId) -> Result<DeleteResult, RequestError>;
}

#[derive(Debug, Clone)]
pub struct UserApiClient {
    http: Client,
    base: Url,
}

impl UserApiClient {
    /// `base_url` already includes the `/api` prefix, e.g. `http://localhost:8080/api`.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let trimmed = base_url.trim_end_matches('/');
        let base = Url::parse(trimmed).map_err(|source| ConfigError::InvalidBaseUrl {
            url: trimmed.to_string(),
            source,
        })?;
        if base.cannot_be_a_base() {
            return Err(ConfigError::CannotBeABase {
                url: trimmed.to_string(),
            });
        }
        Ok(Self {
            http: Client::new(),
            base,
        })
    }

    pub fn from_settings(settings: &ApiSettings) -> Result<Self, ConfigError> {
        Self::new(&settings.base_url()?)
    }

    pub fn base_url(&self) -> &str {
        self.base.as_str().trim_end_matches('/')
    }

    fn users_url(&self) -> Url {
        self.endpoint(None)
    }

    fn user_url(&self, id: &UserId) -> Url {
        self.endpoint(Some(id))
    }

    /// Appends `users[/{id}]` as path segments; the id is percent-encoded.
    fn endpoint(&self, id: Option<&UserId>) -> Url {
        let mut url = self.base.clone();
        // Checked in `new`: the base always accepts path segments.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("users");
            if let Some(id) = id {
                segments.push(&id.to_string());
            }
        }
        url
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        request: RequestBuilder,
    ) -> Result<ApiResult<T>, RequestError> {
        debug!(%method, %url, "sending user api request");
        let response = request.send().await.map_err(|err| {
            warn!(%method, %url, "user api request failed: {err}");
            RequestError::from(err)
        })?;
        let status = response.status();
        let body = response.bytes().await?;
        decode_envelope(status, &body).inspect_err(|err| {
            warn!(%method, %url, status = status.as_u16(), "user api call rejected: {err}");
        })
    }
}

/// Parses the body as JSON regardless of status; non-2xx replies become
/// [`RequestError::Status`] carrying the body's `message` when it has one.
pub fn decode_envelope<T: DeserializeOwned>(
    status: StatusCode,
    body: &[u8],
) -> Result<ApiResult<T>, RequestError> {
    let value: serde_json::Value = serde_json::from_slice(body)?;
    if !status.is_success() {
        let message = ErrorBody::from_value(&value).message.unwrap_or_else(|| {
            HttpStatusError {
                status: status.as_u16(),
            }
            .to_string()
        });
        return Err(RequestError::Status {
            status: status.as_u16(),
            message,
        });
    }
    Ok(serde_json::from_value(value)?)
}

#[async_trait]
impl UserApi for UserApiClient {
    async fn list_users(&self) -> Result<UserListResult, RequestError> {
        let url = self.users_url();
        let request = self.http.get(url.clone());
        self.execute(Method::GET, url, request).await
    }

    async fn get_user(&self, id: &UserId) -> Result<UserResult, RequestError> {
        let url = self.user_url(id);
        let request = self.http.get(url.clone());
        self.execute(Method::GET, url, request).await
    }

    async fn create_user(&self, fields: &UserFields) -> Result<MutationResult, RequestError> {
        let url = self.users_url();
        let request = self.http.post(url.clone()).json(fields);
        self.execute(Method::POST, url, request).await
    }

    async fn update_user(
        &self,
        id: &UserId,
        fields: &UserFields,
    ) -> Result<MutationResult, RequestError> {
        let url = self.user_url(id);
        let request = self.http.put(url.clone()).json(fields);
        self.execute(Method::PUT, url, request).await
    }

    async fn delete_user(&self, id: &UserId) -> Result<DeleteResult, RequestError> {
        let url = self.user_url(id);
        let request = self.http.delete(url.clone());
        self.execute(Method::DELETE, url, request).await
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;

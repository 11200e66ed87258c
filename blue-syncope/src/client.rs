use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde_json::Value;

use crate::connection::ConnectionContext;
use crate::edits::{apply_edits, AttributeEdit};
use crate::error::{Result, SyncopeError};
use crate::model::{StatusChangeRequest, StatusType, UserResource};
use crate::outcome::{
    OperationOutcome, CHANGE_STATUS_FAILED, MODIFY_USER_FAILED, MUST_CHANGE_PASSWORD_FAILED,
    RETRIEVE_USER_FAILED,
};

const DOMAIN_HEADER: &str = "X-Syncope-Domain";
const DOMAIN: &str = "Master";

/// What came back from one HTTP exchange.
/// `body` is `None` when the reply was empty or not JSON.
struct Reply {
    status: StatusCode,
    body: Option<Value>,
}

impl Reply {
    fn accepted(self) -> Option<Value> {
        match self.body {
            Some(body) if self.status == StatusCode::OK && !body.is_null() => Some(body),
            _ => None,
        }
    }
}

/// Read-modify-write client for a single Syncope user.
///
/// Every operation issues one GET and at most one POST/PUT. Transport
/// failures are returned as errors; error replies from the server become a
/// failed [`OperationOutcome`].
pub struct UserStateClient {
    http: reqwest::Client,
    connection: ConnectionContext,
}

impl UserStateClient {
    pub fn new(connection: ConnectionContext) -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| SyncopeError::Client(e.to_string()))?;

        Ok(Self { http, connection })
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.http
            .request(method, url)
            .basic_auth(&self.connection.admin_user, Some(&self.connection.admin_password))
            .header(ACCEPT, "application/json")
            .header("Prefer", "return-content")
            .header(DOMAIN_HEADER, DOMAIN)
    }

    async fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<&impl Serialize>,
    ) -> Result<Reply> {
        let mut request = self.request(method.clone(), url);
        if let Some(body) = body {
            request = request.header(CONTENT_TYPE, "application/json").json(body);
        }

        let transport = |e: reqwest::Error| SyncopeError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        };

        let response = request.send().await.map_err(transport)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(transport)?;
        tracing::debug!("{} {} -> {} ({} bytes)", method, url, status, bytes.len());

        let body = if bytes.is_empty() {
            None
        } else {
            serde_json::from_slice(&bytes).ok()
        };

        Ok(Reply { status, body })
    }

    /// Fetch the current state of a user.
    ///
    /// `Ok(None)` when the server answers with anything but 200, or with a body
    /// that is empty or does not decode as a user.
    pub async fn fetch_user(&self, key: &str) -> Result<Option<UserResource>> {
        let url = self.connection.user_url(key);
        let reply = self.send(Method::GET, &url, None::<&Value>).await?;
        let status = reply.status;

        let body = match reply.accepted() {
            Some(body) => body,
            None => {
                tracing::warn!("Could not retrieve user {} (status {})", key, status);
                return Ok(None);
            }
        };

        match serde_json::from_value(body) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                tracing::warn!("Unexpected user representation for {}: {}", key, e);
                Ok(None)
            }
        }
    }

    /// Suspend, activate or reactivate a user.
    ///
    /// In check mode a user whose current status label differs from `status`
    /// is reported as changeable without posting anything.
    pub async fn apply_status_change(
        &self,
        key: &str,
        status: StatusType,
        on_syncope: &str,
        check_mode: bool,
    ) -> Result<OperationOutcome> {
        let user = match self.fetch_user(key).await? {
            Some(user) => user,
            None => return Ok(OperationOutcome::failed(CHANGE_STATUS_FAILED)),
        };

        if check_mode && user.status() != Some(status.as_str()) {
            return Ok(OperationOutcome::predicted());
        }

        let request = StatusChangeRequest::new(key, status, on_syncope, &user);
        let url = format!("{}/status", self.connection.user_url(key));
        tracing::info!("Changing status of user {} to {}", key, status);
        let reply = self.send(Method::POST, &url, Some(&request)).await?;

        Ok(Self::mutation_outcome(reply, CHANGE_STATUS_FAILED))
    }

    /// Overwrite the first value of the listed plain attributes
    pub async fn apply_attribute_edits(
        &self,
        key: &str,
        edits: &[AttributeEdit],
        check_mode: bool,
    ) -> Result<OperationOutcome> {
        let mut user = match self.fetch_user(key).await? {
            Some(user) => user,
            None => return Ok(OperationOutcome::failed(RETRIEVE_USER_FAILED)),
        };

        apply_edits(&mut user, edits);
        self.put_user(key, &user, check_mode, MODIFY_USER_FAILED).await
    }

    pub async fn apply_must_change_password_flag(
        &self,
        key: &str,
        must_change_password: bool,
        check_mode: bool,
    ) -> Result<OperationOutcome> {
        let mut user = match self.fetch_user(key).await? {
            Some(user) => user,
            None => return Ok(OperationOutcome::failed(RETRIEVE_USER_FAILED)),
        };

        user.set_must_change_password(must_change_password);
        self.put_user(key, &user, check_mode, MUST_CHANGE_PASSWORD_FAILED).await
    }

    async fn put_user(
        &self,
        key: &str,
        user: &UserResource,
        check_mode: bool,
        failure: &str,
    ) -> Result<OperationOutcome> {
        if check_mode {
            return Ok(OperationOutcome::predicted());
        }

        let url = self.connection.user_url(key);
        tracing::info!("Updating user {}", key);
        let reply = self.send(Method::PUT, &url, Some(user)).await?;

        Ok(Self::mutation_outcome(reply, failure))
    }

    fn mutation_outcome(reply: Reply, failure: &str) -> OperationOutcome {
        let status = reply.status;
        match reply.accepted() {
            Some(body) => OperationOutcome::succeeded(body),
            None => {
                tracing::warn!("{} (status {})", failure, status);
                OperationOutcome::failed(failure)
            }
        }
    }
}

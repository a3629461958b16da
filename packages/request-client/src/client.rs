use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;
use uuid::Uuid;

use crate::error::{ClientError, Result};
use crate::session::Session;
use crate::types::{CreateRequest, ErrorBody, RequestView, SessionInfo, UpdateRequest};

/// Client for the marketplace requests API.
pub struct RequestsClient {
    client: reqwest::Client,
    base_url: String,
}

impl RequestsClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub async fn list(&self, session: &Session) -> Result<Vec<RequestView>> {
        self.send(self.request(Method::GET, "/requests", session)?).await
    }

    pub async fn get(&self, session: &Session, id: Uuid) -> Result<RequestView> {
        let path = format!("/requests/{}", id);
        self.send(self.request(Method::GET, &path, session)?).await
    }

    pub async fn create(&self, session: &Session, input: &CreateRequest) -> Result<RequestView> {
        let builder = self.request(Method::POST, "/requests", session)?.json(input);
        self.send(builder).await
    }

    pub async fn update(
        &self,
        session: &Session,
        id: Uuid,
        input: &UpdateRequest,
    ) -> Result<RequestView> {
        let path = format!("/requests/{}", id);
        let builder = self.request(Method::PUT, &path, session)?.json(input);
        self.send(builder).await
    }

    pub async fn delete(&self, session: &Session, id: Uuid) -> Result<()> {
        let path = format!("/requests/{}", id);
        let _: serde_json::Value = self.send(self.request(Method::DELETE, &path, session)?).await?;
        Ok(())
    }

    pub async fn current_session(&self, session: &Session) -> Result<SessionInfo> {
        self.send(self.request(Method::GET, "/auth/session", session)?)
            .await
    }

    /// Revokes the session server-side. The session cannot be used afterwards.
    pub async fn logout(&self, session: Session) -> Result<()> {
        let _: serde_json::Value = self
            .send(self.request(Method::POST, "/auth/logout", &session)?)
            .await?;
        Ok(())
    }

    fn request(&self, method: Method, path: &str, session: &Session) -> Result<RequestBuilder> {
        if session.is_expired() {
            return Err(ClientError::Unauthorized);
        }
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, "Calling requests API");
        Ok(self
            .client
            .request(method, url)
            .bearer_auth(session.token()))
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let resp = builder.send().await?;
        Self::parse(resp).await
    }

    async fn parse<T: DeserializeOwned>(resp: Response) -> Result<T> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|e| e.message)
                .unwrap_or(body);
            return Err(ClientError::from_status(status.as_u16(), message));
        }
        Ok(resp.json().await?)
    }
}

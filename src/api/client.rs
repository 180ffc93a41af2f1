//! Async HTTP client for the ReelMate messaging endpoints.

use std::time::Duration;

use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::domain::conversation_list::ConversationSummary;
use crate::domain::events::{
    ConversationSourceError, ConversationsSourceError, MarkReadReceipt, SendSourceError,
};
use crate::domain::message::Message;
use crate::infra::config::ApiConfig;
use crate::infra::error::AppError;

use super::types::{
    ConversationEntryDto, IdentityResponse, ListEnvelope, MarkReadResponse, MessageDto,
    ProfileResponse, SendResponse, UnreadCountResponse,
};

/// Failure of a best-effort call (mark-read, unread count, identity,
/// profile). Logged by the adapter, never surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BestEffortError {
    NotAuthenticated,
    Unavailable,
    InvalidData,
}

#[derive(Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    auth_token: Option<String>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(AppError::HttpClientInit)?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            auth_token: config.auth_token.clone(),
        })
    }

    pub async fn fetch_conversation(
        &self,
        peer_id: &str,
    ) -> Result<Vec<Message>, ConversationSourceError> {
        let request = self
            .get("/messages/conversation")
            .query(&[("user", peer_id)]);
        let envelope: ListEnvelope<MessageDto> = self
            .expect_json(request, |status| match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    ConversationSourceError::NotAuthenticated
                }
                _ => ConversationSourceError::Unavailable,
            })
            .await
            .map_err(|error| error.unwrap_or(ConversationSourceError::InvalidData))?;

        Ok(envelope
            .into_items()
            .into_iter()
            .map(MessageDto::into_message)
            .collect())
    }

    pub async fn send_message(
        &self,
        peer_id: &str,
        body: &str,
    ) -> Result<Option<Message>, SendSourceError> {
        let request = self
            .post("/messages")
            .json(&json!({ "recipient_id": peer_id, "body": body }));
        let outcome = self
            .expect_json::<SendResponse, _>(request, |status| match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    SendSourceError::NotAuthenticated
                }
                StatusCode::BAD_REQUEST => SendSourceError::Rejected,
                _ => SendSourceError::Unavailable,
            })
            .await;

        match outcome {
            Ok(response) => Ok(response.into_inserted()),
            // An unreadable success body still means the send went through;
            // degrade to the placeholder path.
            Err(None) => Ok(None),
            Err(Some(error)) => Err(error),
        }
    }

    pub async fn mark_read(
        &self,
        peer_id: &str,
        last_seen_id: Option<&str>,
    ) -> Result<MarkReadReceipt, BestEffortError> {
        let request = self
            .post("/messages/mark-read")
            .json(&json!({ "user": peer_id, "last_id": last_seen_id }));
        let response: MarkReadResponse = self
            .expect_json(request, best_effort_status)
            .await
            .map_err(|error| error.unwrap_or(BestEffortError::InvalidData))?;

        Ok(MarkReadReceipt {
            marked: response.marked,
        })
    }

    pub async fn unread_count(&self) -> Result<u32, BestEffortError> {
        let response: UnreadCountResponse = self
            .expect_json(self.get("/messages/unread-count"), best_effort_status)
            .await
            .map_err(|error| error.unwrap_or(BestEffortError::InvalidData))?;

        Ok(response.count)
    }

    pub async fn identity(&self) -> Result<String, BestEffortError> {
        let response: IdentityResponse = self
            .expect_json(self.get("/auth/me"), best_effort_status)
            .await
            .map_err(|error| error.unwrap_or(BestEffortError::InvalidData))?;

        Ok(response.user_id.into_string())
    }

    pub async fn conversations(&self) -> Result<Vec<ConversationSummary>, ConversationsSourceError> {
        let envelope: ListEnvelope<ConversationEntryDto> = self
            .expect_json(self.get("/messages/conversations"), |status| match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    ConversationsSourceError::NotAuthenticated
                }
                _ => ConversationsSourceError::Unavailable,
            })
            .await
            .map_err(|error| error.unwrap_or(ConversationsSourceError::InvalidData))?;

        Ok(envelope
            .into_items()
            .into_iter()
            .map(ConversationEntryDto::into_summary)
            .collect())
    }

    pub async fn peer_profile(&self, peer_id: &str) -> Result<Option<String>, BestEffortError> {
        let response: ProfileResponse = self
            .expect_json(self.get(&format!("/profile/{peer_id}")), best_effort_status)
            .await
            .map_err(|error| error.unwrap_or(BestEffortError::InvalidData))?;

        Ok(response.into_display_name())
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.authorize(self.http.get(format!("{}{path}", self.base_url)))
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.authorize(self.http.post(format!("{}{path}", self.base_url)))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.auth_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Sends the request and decodes a JSON body. Transport errors map
    /// through `map_status` with no status; HTTP errors map through it with
    /// the received status; a decode failure surfaces as `Err(None)` so the
    /// caller picks its own invalid-data variant.
    async fn expect_json<T, E>(
        &self,
        request: RequestBuilder,
        map_status: impl Fn(StatusCode) -> E,
    ) -> Result<T, Option<E>>
    where
        T: DeserializeOwned,
    {
        let response = request
            .send()
            .await
            .map_err(|_| Some(map_status(StatusCode::SERVICE_UNAVAILABLE)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Some(map_status(status)));
        }

        response.json::<T>().await.map_err(|_| None)
    }
}

fn best_effort_status(status: StatusCode) -> BestEffortError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => BestEffortError::NotAuthenticated,
        _ => BestEffortError::Unavailable,
    }
}

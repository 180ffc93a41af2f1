//! Wire types for the ReelMate messaging API and their domain mapping.
//!
//! The server is loose about shapes: ids arrive as strings or numbers,
//! list endpoints answer with either a bare array or an `{items: [...]}`
//! envelope, and a send may answer with an empty `item`. Everything here
//! degrades instead of failing where the engine has a fallback path.

use chrono::{DateTime, NaiveDateTime};
use serde::Deserialize;

use crate::domain::conversation_list::ConversationSummary;
use crate::domain::message::Message;

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum IdValue {
    Text(String),
    Number(i64),
}

impl IdValue {
    pub fn into_string(self) -> String {
        match self {
            Self::Text(value) => value,
            Self::Number(value) => value.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageDto {
    pub id: IdValue,
    pub sender_id: IdValue,
    pub recipient_id: IdValue,
    pub body: String,
    pub created_at: Option<String>,
}

impl MessageDto {
    pub fn into_message(self) -> Message {
        let created_at_unix_ms = self
            .created_at
            .as_deref()
            .and_then(parse_timestamp_ms)
            .unwrap_or(0);

        Message {
            id: self.id.into_string(),
            sender_id: self.sender_id.into_string(),
            recipient_id: self.recipient_id.into_string(),
            body: self.body,
            created_at_unix_ms,
        }
    }
}

fn parse_timestamp_ms(raw: &str) -> Option<i64> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.timestamp_millis());
    }

    // The backend serializes tz-naive timestamps without an offset; read
    // those as UTC.
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc().timestamp_millis())
}

/// List payloads arrive as `{items: [...]}` or as a bare array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListEnvelope<T> {
    Wrapped { items: Vec<T> },
    Bare(Vec<T>),
}

impl<T> ListEnvelope<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            Self::Wrapped { items } => items,
            Self::Bare(items) => items,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SendResponse {
    #[serde(default)]
    item: Option<serde_json::Value>,
}

impl SendResponse {
    /// The inserted record, when the server actually returned one. An empty
    /// or malformed `item` is not an error; the caller synthesizes a local
    /// placeholder instead.
    pub fn into_inserted(self) -> Option<Message> {
        self.item
            .and_then(|value| serde_json::from_value::<MessageDto>(value).ok())
            .map(MessageDto::into_message)
    }
}

#[derive(Debug, Deserialize)]
pub struct MarkReadResponse {
    #[serde(default)]
    pub marked: u32,
}

#[derive(Debug, Deserialize)]
pub struct UnreadCountResponse {
    pub count: u32,
}

#[derive(Debug, Deserialize)]
pub struct IdentityResponse {
    pub user_id: IdValue,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConversationEntryDto {
    pub user_id: IdValue,
    pub display_name: Option<String>,
    pub last_message: Option<String>,
    #[serde(default)]
    pub unread: u32,
}

impl ConversationEntryDto {
    pub fn into_summary(self) -> ConversationSummary {
        ConversationSummary {
            peer_id: self.user_id.into_string(),
            display_name: self.display_name,
            last_message_preview: self.last_message,
            unread: self.unread,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ProfileResponse {
    pub profile: Option<ProfileBody>,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProfileBody {
    pub display_name: Option<String>,
}

impl ProfileResponse {
    /// Display name, falling back to the local part of the email address.
    pub fn into_display_name(self) -> Option<String> {
        if let Some(name) = self.profile.and_then(|profile| profile.display_name) {
            return Some(name);
        }

        self.email
            .as_deref()
            .map(|email| email.split('@').next().unwrap_or(email).to_owned())
    }
}

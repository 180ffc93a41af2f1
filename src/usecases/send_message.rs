//! Use case for sending a message to the open conversation.
//!
//! Validation and error mapping live here; the session owns the sending
//! guard that serializes concurrent submissions.

use crate::domain::events::SendSourceError;

/// Command to send a message to a specific peer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendMessageCommand {
    pub peer_id: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendMessageError {
    /// Message text is empty after trimming whitespace.
    EmptyMessage,
    /// A previous send has not completed yet.
    SendInFlight,
    /// The server rejected the request as unauthenticated; the user should
    /// be prompted to sign in rather than shown a generic failure.
    NotAuthenticated,
    TemporarilyUnavailable,
    Rejected,
}

impl SendMessageError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::EmptyMessage => "Type a message first.",
            Self::SendInFlight => "Still sending the previous message.",
            Self::NotAuthenticated => "Sign in to send messages.",
            Self::TemporarilyUnavailable => "Message not sent. Check your connection and retry.",
            Self::Rejected => "The server rejected this message.",
        }
    }
}

/// Validates a command: trims the body and rejects empty input.
pub fn prepare_send(command: SendMessageCommand) -> Result<SendMessageCommand, SendMessageError> {
    let body = command.body.trim();
    if body.is_empty() {
        return Err(SendMessageError::EmptyMessage);
    }

    Ok(SendMessageCommand {
        peer_id: command.peer_id,
        body: body.to_owned(),
    })
}

pub fn map_source_error(error: SendSourceError) -> SendMessageError {
    match error {
        SendSourceError::NotAuthenticated => SendMessageError::NotAuthenticated,
        SendSourceError::Unavailable => SendMessageError::TemporarilyUnavailable,
        SendSourceError::Rejected => SendMessageError::Rejected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(body: &str) -> SendMessageCommand {
        SendMessageCommand {
            peer_id: "peer".to_owned(),
            body: body.to_owned(),
        }
    }

    #[test]
    fn rejects_empty_message_text() {
        assert_eq!(
            prepare_send(command("")),
            Err(SendMessageError::EmptyMessage)
        );
    }

    #[test]
    fn rejects_whitespace_only_message() {
        assert_eq!(
            prepare_send(command("   \n\t  ")),
            Err(SendMessageError::EmptyMessage)
        );
    }

    #[test]
    fn trims_whitespace_before_sending() {
        let prepared = prepare_send(command("  hello world  ")).expect("send should be prepared");

        assert_eq!(prepared.body, "hello world");
        assert_eq!(prepared.peer_id, "peer");
    }

    #[test]
    fn maps_unauthenticated_error_distinctly() {
        assert_eq!(
            map_source_error(SendSourceError::NotAuthenticated),
            SendMessageError::NotAuthenticated
        );
        assert!(SendMessageError::NotAuthenticated
            .user_message()
            .contains("Sign in"));
    }

    #[test]
    fn maps_unavailable_error() {
        assert_eq!(
            map_source_error(SendSourceError::Unavailable),
            SendMessageError::TemporarilyUnavailable
        );
    }

    #[test]
    fn maps_rejected_error() {
        assert_eq!(
            map_source_error(SendSourceError::Rejected),
            SendMessageError::Rejected
        );
    }

    #[test]
    fn generic_failure_text_differs_from_auth_prompt() {
        assert_ne!(
            SendMessageError::TemporarilyUnavailable.user_message(),
            SendMessageError::NotAuthenticated.user_message()
        );
    }
}

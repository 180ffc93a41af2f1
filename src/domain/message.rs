//! Core message entity for a two-party conversation.

/// Reserved id prefix for messages created locally and not yet confirmed
/// by the server. The reconciler replaces these with their server echo.
pub const LOCAL_ID_PREFIX: &str = "local-";

/// Sender id used for optimistic messages before the current user's
/// identity has been resolved.
pub const SELF_SENDER_FALLBACK: &str = "me";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: String,
    pub sender_id: String,
    pub recipient_id: String,
    pub body: String,
    pub created_at_unix_ms: i64,
}

impl Message {
    /// Returns true for a locally synthesized message awaiting server confirmation.
    pub fn is_placeholder(&self) -> bool {
        self.id.starts_with(LOCAL_ID_PREFIX)
    }

    /// Synthesizes an optimistic placeholder for a send the server has not
    /// confirmed (or whose response omitted the inserted record).
    pub fn local_placeholder(
        sender_id: Option<&str>,
        recipient_id: &str,
        body: &str,
        now_unix_ms: i64,
    ) -> Self {
        Self {
            id: format!("{LOCAL_ID_PREFIX}{now_unix_ms}"),
            sender_id: sender_id.unwrap_or(SELF_SENDER_FALLBACK).to_owned(),
            recipient_id: recipient_id.to_owned(),
            body: body.to_owned(),
            created_at_unix_ms: now_unix_ms,
        }
    }

    /// Whether the message should be displayed on the "own messages" side.
    ///
    /// Placeholders are always outgoing; confirmed messages are compared
    /// against the resolved user id.
    pub fn is_outgoing(&self, self_user_id: Option<&str>) -> bool {
        if self.is_placeholder() {
            return true;
        }

        self_user_id.is_some_and(|me| me == self.sender_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_id_uses_reserved_prefix() {
        let message = Message::local_placeholder(Some("u1"), "u2", "hello", 1_700_000_000_000);

        assert!(message.id.starts_with(LOCAL_ID_PREFIX));
        assert!(message.is_placeholder());
        assert_eq!(message.sender_id, "u1");
        assert_eq!(message.recipient_id, "u2");
        assert_eq!(message.body, "hello");
    }

    #[test]
    fn placeholder_falls_back_to_self_sender_when_identity_unknown() {
        let message = Message::local_placeholder(None, "u2", "hi", 1000);

        assert_eq!(message.sender_id, SELF_SENDER_FALLBACK);
    }

    #[test]
    fn server_message_is_not_placeholder() {
        let message = Message {
            id: "s42".to_owned(),
            sender_id: "u1".to_owned(),
            recipient_id: "u2".to_owned(),
            body: "hi".to_owned(),
            created_at_unix_ms: 1000,
        };

        assert!(!message.is_placeholder());
    }

    #[test]
    fn placeholder_is_always_outgoing() {
        let message = Message::local_placeholder(None, "u2", "hi", 1000);

        assert!(message.is_outgoing(None));
        assert!(message.is_outgoing(Some("whoever")));
    }

    #[test]
    fn outgoing_matches_resolved_identity() {
        let message = Message {
            id: "s1".to_owned(),
            sender_id: "u1".to_owned(),
            recipient_id: "u2".to_owned(),
            body: "hi".to_owned(),
            created_at_unix_ms: 1000,
        };

        assert!(message.is_outgoing(Some("u1")));
        assert!(!message.is_outgoing(Some("u2")));
        assert!(!message.is_outgoing(None));
    }
}

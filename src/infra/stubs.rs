//! Test doubles for the engine's collaborator seams.

#![cfg_attr(not(test), allow(dead_code))]

use std::cell::RefCell;

use crate::domain::events::ConversationUpdate;
use crate::usecases::contracts::{MessagingGateway, UpdateListener};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall {
    Conversation(String),
    Conversations,
    Send {
        peer_id: String,
        body: String,
    },
    MarkRead {
        peer_id: String,
        last_seen_id: Option<String>,
    },
    UnreadCount,
    Identity,
    PeerProfile(String),
}

/// Gateway that records dispatched calls instead of touching the network.
#[derive(Debug, Default)]
pub struct StubGateway {
    calls: RefCell<Vec<GatewayCall>>,
}

impl StubGateway {
    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.borrow().clone()
    }

    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }

    fn record(&self, call: GatewayCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl MessagingGateway for StubGateway {
    fn request_conversation(&self, peer_id: &str) {
        self.record(GatewayCall::Conversation(peer_id.to_owned()));
    }

    fn request_conversations(&self) {
        self.record(GatewayCall::Conversations);
    }

    fn dispatch_send(&self, peer_id: &str, body: &str) {
        self.record(GatewayCall::Send {
            peer_id: peer_id.to_owned(),
            body: body.to_owned(),
        });
    }

    fn dispatch_mark_read(&self, peer_id: &str, last_seen_id: Option<&str>) {
        self.record(GatewayCall::MarkRead {
            peer_id: peer_id.to_owned(),
            last_seen_id: last_seen_id.map(str::to_owned),
        });
    }

    fn request_unread_count(&self) {
        self.record(GatewayCall::UnreadCount);
    }

    fn request_identity(&self) {
        self.record(GatewayCall::Identity);
    }

    fn request_peer_profile(&self, peer_id: &str) {
        self.record(GatewayCall::PeerProfile(peer_id.to_owned()));
    }
}

/// Listener that keeps every notification together with its timestamp.
#[derive(Debug, Default)]
pub struct RecordingListener {
    pub updates: Vec<(ConversationUpdate, i64)>,
}

impl UpdateListener for RecordingListener {
    fn conversations_updated(&mut self, update: &ConversationUpdate, now_unix_ms: i64) {
        self.updates.push((update.clone(), now_unix_ms));
    }
}

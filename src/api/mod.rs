//! Server adapter: owns the HTTP client and the runtime its requests run on.
//!
//! Every gateway call spawns a one-shot task; the completion is pushed back
//! into the shell loop as an [`AppEvent`] tagged with the peer id the request
//! was issued for. Best-effort operations log their failures and produce no
//! event at all.

mod client;
mod types;

use std::sync::mpsc::Sender;
use std::sync::Arc;

use tokio::runtime::Runtime;

use crate::domain::events::AppEvent;
use crate::infra::config::ApiConfig;
use crate::infra::error::AppError;
use crate::usecases::contracts::MessagingGateway;

use client::ApiClient;

const MARK_READ_FAILED: &str = "API_MARK_READ_FAILED";
const UNREAD_COUNT_FAILED: &str = "API_UNREAD_COUNT_FAILED";
const IDENTITY_LOOKUP_FAILED: &str = "API_IDENTITY_LOOKUP_FAILED";
const PEER_PROFILE_FAILED: &str = "API_PEER_PROFILE_FAILED";
const EVENT_CHANNEL_CLOSED: &str = "API_EVENT_CHANNEL_CLOSED";

pub struct ApiAdapter {
    client: Arc<ApiClient>,
    runtime: Runtime,
    events: Sender<AppEvent>,
}

impl ApiAdapter {
    pub fn start(config: &ApiConfig, events: Sender<AppEvent>) -> Result<Self, AppError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .map_err(AppError::RuntimeInit)?;

        Ok(Self {
            client: Arc::new(ApiClient::new(config)?),
            runtime,
            events,
        })
    }

    fn spawn<F>(&self, task: F)
    where
        F: std::future::Future<Output = Option<AppEvent>> + Send + 'static,
    {
        let events = self.events.clone();
        self.runtime.spawn(async move {
            if let Some(event) = task.await {
                if events.send(event).is_err() {
                    tracing::debug!(
                        code = EVENT_CHANNEL_CLOSED,
                        "dropping completion event; shell loop is gone"
                    );
                }
            }
        });
    }
}

impl MessagingGateway for ApiAdapter {
    fn request_conversation(&self, peer_id: &str) {
        let client = Arc::clone(&self.client);
        let peer_id = peer_id.to_owned();
        self.spawn(async move {
            let outcome = client.fetch_conversation(&peer_id).await;
            Some(AppEvent::ConversationFetched { peer_id, outcome })
        });
    }

    fn request_conversations(&self) {
        let client = Arc::clone(&self.client);
        self.spawn(async move {
            let outcome = client.conversations().await;
            Some(AppEvent::ConversationsListed { outcome })
        });
    }

    fn dispatch_send(&self, peer_id: &str, body: &str) {
        let client = Arc::clone(&self.client);
        let peer_id = peer_id.to_owned();
        let body = body.to_owned();
        self.spawn(async move {
            let outcome = client.send_message(&peer_id, &body).await;
            Some(AppEvent::SendFinished { peer_id, outcome })
        });
    }

    fn dispatch_mark_read(&self, peer_id: &str, last_seen_id: Option<&str>) {
        let client = Arc::clone(&self.client);
        let peer_id = peer_id.to_owned();
        let last_seen_id = last_seen_id.map(str::to_owned);
        self.spawn(async move {
            match client.mark_read(&peer_id, last_seen_id.as_deref()).await {
                Ok(receipt) => Some(AppEvent::MarkReadFinished { peer_id, receipt }),
                Err(error) => {
                    tracing::debug!(
                        code = MARK_READ_FAILED,
                        peer_id,
                        error = ?error,
                        "mark-read failed; read state will catch up on a later pass"
                    );
                    None
                }
            }
        });
    }

    fn request_unread_count(&self) {
        let client = Arc::clone(&self.client);
        self.spawn(async move {
            match client.unread_count().await {
                Ok(count) => Some(AppEvent::UnreadCountFetched { count }),
                Err(error) => {
                    tracing::debug!(
                        code = UNREAD_COUNT_FAILED,
                        error = ?error,
                        "unread count fetch failed"
                    );
                    None
                }
            }
        });
    }

    fn request_identity(&self) {
        let client = Arc::clone(&self.client);
        self.spawn(async move {
            match client.identity().await {
                Ok(user_id) => Some(AppEvent::IdentityResolved { user_id }),
                Err(error) => {
                    tracing::debug!(
                        code = IDENTITY_LOOKUP_FAILED,
                        error = ?error,
                        "identity lookup failed; messages render without own-side alignment"
                    );
                    None
                }
            }
        });
    }

    fn request_peer_profile(&self, peer_id: &str) {
        let client = Arc::clone(&self.client);
        let peer_id = peer_id.to_owned();
        self.spawn(async move {
            match client.peer_profile(&peer_id).await {
                Ok(display_name) => Some(AppEvent::PeerProfileResolved {
                    peer_id,
                    display_name,
                }),
                Err(error) => {
                    tracing::debug!(
                        code = PEER_PROFILE_FAILED,
                        peer_id,
                        error = ?error,
                        "peer profile lookup failed; header falls back to the peer id"
                    );
                    None
                }
            }
        });
    }
}

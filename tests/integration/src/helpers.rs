//! Test helpers: wiring the engine against the in-memory fixtures

use std::sync::Arc;

use chrono::Duration;

use gate_core::entities::UserProfile;
use gate_core::events::GatewayEvent;
use gate_core::value_objects::{ChatId, UserId};
use gate_service::dto::EventOutcome;
use gate_service::services::{EventDispatcher, GroupSettings, ServiceContextBuilder};

use crate::fixtures::{FakeGateway, InMemoryStore};

/// The governed group chat used by every test
pub const GROUP_CHAT: ChatId = ChatId::new(-1_000_100);

/// The deciding administrator used by every test
pub const ADMIN: UserId = UserId::new(999);

/// A fully wired test engine
pub struct TestEngine {
    pub dispatcher: EventDispatcher,
    pub store: Arc<InMemoryStore>,
    pub gateway: Arc<FakeGateway>,
}

impl TestEngine {
    /// Build the engine against fresh in-memory fixtures
    pub fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let gateway = Arc::new(FakeGateway::new());

        let ctx = ServiceContextBuilder::new()
            .settings(GroupSettings::new(GROUP_CHAT, ADMIN, Duration::hours(24)))
            .member_repo(store.clone())
            .application_repo(store.clone())
            .invite_repo(store.clone())
            .admission_store(store.clone())
            .gateway(gateway.clone())
            .build()
            .expect("all test dependencies provided");

        Self {
            dispatcher: EventDispatcher::new(ctx),
            store,
            gateway,
        }
    }

    /// Dispatch one event, panicking on service errors
    pub async fn handle(&self, event: GatewayEvent) -> EventOutcome {
        self.dispatcher
            .handle(event)
            .await
            .expect("event handling failed")
    }
}

impl Default for TestEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// A platform profile for a numbered test user
pub fn profile(n: i64) -> UserProfile {
    UserProfile::new(
        Some(format!("user{n}")),
        format!("User{n}"),
        None,
    )
}

/// An apply event for a numbered test user
pub fn apply_event(n: i64) -> GatewayEvent {
    GatewayEvent::ApplyRequested {
        requester: UserId::new(n),
        profile: profile(n),
    }
}

/// A join attempt by user `n` presenting `link` at the governed chat
pub fn join_event(n: i64, link: Option<&str>) -> GatewayEvent {
    GatewayEvent::JoinAttempted {
        invite_link: link.map(str::to_string),
        user: UserId::new(n),
        profile: profile(n),
        chat: GROUP_CHAT,
    }
}

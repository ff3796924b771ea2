use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    response::Response,
    Router,
};
use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::de::{DeserializeOwned, Error as _};
use serde_json::Value;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use crate::{
    models::{
        debate::{Debate, Side},
        joined_debate::JoinedDebate,
        leaderboard::{LeaderboardEntry, VoteRecord},
    },
    routes,
    services::{
        debate_service::DebateService, join_service::JoinService,
        leaderboard_service::LeaderboardService,
    },
    store::{DebateStore, MemoryStore, StoreError},
};

pub struct TestServices {
    pub debate_service: DebateService,
    pub join_service: JoinService,
    pub leaderboard_service: LeaderboardService,
}

pub struct TestContext {
    pub app: Router,
    pub store: Arc<MemoryStore>,
    pub services: TestServices,
}

/// Fresh app and services sharing one empty in-memory store.
pub async fn setup() -> TestContext {
    let store = Arc::new(MemoryStore::new());
    let shared: Arc<dyn DebateStore> = store.clone();

    let services = TestServices {
        debate_service: DebateService::new(shared.clone()),
        join_service: JoinService::new(shared.clone()),
        leaderboard_service: LeaderboardService::new(shared.clone()),
    };

    TestContext {
        app: routes::init_routes(shared),
        store,
        services,
    }
}

/// Delegates to a [`MemoryStore`] but fails `add_participant` and
/// `vote_totals`, counting how often the joined-debate upsert runs.
#[derive(Default)]
pub struct FailingStore {
    pub inner: MemoryStore,
    pub upsert_calls: AtomicUsize,
}

impl FailingStore {
    pub fn upserts(&self) -> usize {
        self.upsert_calls.load(Ordering::SeqCst)
    }
}

fn connection_lost() -> StoreError {
    StoreError::Decode(bson::de::Error::custom("connection lost"))
}

#[async_trait]
impl DebateStore for FailingStore {
    async fn list_debates(&self) -> Result<Vec<Debate>, StoreError> {
        self.inner.list_debates().await
    }

    async fn find_debate(&self, id: ObjectId) -> Result<Option<Debate>, StoreError> {
        self.inner.find_debate(id).await
    }

    async fn insert_debate(&self, debate: &Debate) -> Result<(), StoreError> {
        self.inner.insert_debate(debate).await
    }

    async fn remove_participant(&self, debate_id: ObjectId, name: &str) -> Result<(), StoreError> {
        self.inner.remove_participant(debate_id, name).await
    }

    async fn add_participant(&self, _: ObjectId, _: Side, _: &str) -> Result<(), StoreError> {
        Err(connection_lost())
    }

    async fn upsert_joined_debate(&self, record: &JoinedDebate) -> Result<(), StoreError> {
        self.upsert_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.upsert_joined_debate(record).await
    }

    async fn joined_debates(&self, participant_name: &str) -> Result<Vec<JoinedDebate>, StoreError> {
        self.inner.joined_debates(participant_name).await
    }

    async fn insert_vote(&self, vote: &VoteRecord) -> Result<(), StoreError> {
        self.inner.insert_vote(vote).await
    }

    async fn vote_totals(&self, _: Option<DateTime<Utc>>) -> Result<Vec<LeaderboardEntry>, StoreError> {
        Err(connection_lost())
    }
}

/// App and join service over a [`FailingStore`].
pub async fn setup_failing() -> (Router, JoinService, Arc<FailingStore>) {
    let store = Arc::new(FailingStore::default());
    let shared: Arc<dyn DebateStore> = store.clone();

    (routes::init_routes(shared.clone()), JoinService::new(shared), store)
}

pub fn sample_debate(title: &str) -> Debate {
    Debate {
        id: Some(ObjectId::new()),
        title: title.to_string(),
        description: format!("{} description", title),
        tags: vec!["tech".to_string(), "ethics".to_string()],
        category: "Technology".to_string(),
        duration: 45,
        support: vec![],
        oppose: vec![],
        created_at: Utc::now(),
    }
}

/// Inserts a debate straight into the store and returns it with its ID.
pub async fn create_test_debate(store: &Arc<MemoryStore>, title: &str) -> Debate {
    let debate = sample_debate(title);
    store
        .insert_debate(&debate)
        .await
        .expect("Failed to insert test debate");
    debate
}

pub async fn insert_vote(
    store: &Arc<MemoryStore>,
    user_name: &str,
    debate_id: ObjectId,
    votes: i32,
    created_at: DateTime<Utc>,
) {
    let vote = VoteRecord {
        id: Some(ObjectId::new()),
        user_name: user_name.to_string(),
        debate_id,
        votes,
        created_at,
    };
    store
        .insert_vote(&vote)
        .await
        .expect("Failed to insert test vote");
}

/// Reloads a debate from the store.
pub async fn reload_debate(store: &Arc<MemoryStore>, debate: &Debate) -> Debate {
    store
        .find_debate(debate.id.expect("Test debate should have an ID"))
        .await
        .unwrap()
        .expect("Test debate should still exist")
}

/// Helper to create a JSON body for requests.
pub fn json_body(json: &Value) -> Body {
    Body::from(json.to_string())
}

pub async fn read_json<T: DeserializeOwned>(response: Response) -> T {
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

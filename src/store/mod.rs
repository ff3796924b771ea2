//! Persistence boundary for debates, joined-debate snapshots and vote records.
//!
//! Services hold an `Arc<dyn DebateStore>` so the same workflows run against
//! MongoDB in production and against [`MemoryStore`] in tests.

use async_trait::async_trait;
use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::{
    debate::{Debate, Side},
    joined_debate::JoinedDebate,
    leaderboard::{LeaderboardEntry, VoteRecord},
};

pub mod memory;
pub mod mongo;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("failed to decode document: {0}")]
    Decode(#[from] bson::de::Error),
}

#[async_trait]
pub trait DebateStore: Send + Sync {
    /// All debates, newest first.
    async fn list_debates(&self) -> Result<Vec<Debate>, StoreError>;

    async fn find_debate(&self, id: ObjectId) -> Result<Option<Debate>, StoreError>;

    /// `debate.id` must already be set.
    async fn insert_debate(&self, debate: &Debate) -> Result<(), StoreError>;

    /// Pulls `name` out of both the support and oppose sets.
    async fn remove_participant(&self, debate_id: ObjectId, name: &str) -> Result<(), StoreError>;

    /// Adds `name` to one side's set unless it is already there.
    async fn add_participant(
        &self,
        debate_id: ObjectId,
        side: Side,
        name: &str,
    ) -> Result<(), StoreError>;

    /// Replaces the record keyed by (debate_id, participant_name), inserting it if absent.
    async fn upsert_joined_debate(&self, record: &JoinedDebate) -> Result<(), StoreError>;

    /// Snapshots for one participant, latest join first.
    async fn joined_debates(&self, participant_name: &str)
        -> Result<Vec<JoinedDebate>, StoreError>;

    async fn insert_vote(&self, vote: &VoteRecord) -> Result<(), StoreError>;

    /// Two-stage grouping over vote records created at or after `since`:
    /// per (user, debate) subtotals, then per user totals and debate counts,
    /// sorted by total votes descending.
    async fn vote_totals(
        &self,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<LeaderboardEntry>, StoreError>;
}

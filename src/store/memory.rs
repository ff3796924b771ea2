use std::collections::HashMap;

use async_trait::async_trait;
use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::{DebateStore, StoreError};
use crate::models::{
    debate::{Debate, Side},
    joined_debate::JoinedDebate,
    leaderboard::{LeaderboardEntry, VoteRecord},
};

#[derive(Default)]
struct Collections {
    debates: Vec<Debate>,
    joined_debates: Vec<JoinedDebate>,
    votes: Vec<VoteRecord>,
}

/// Process-local store. Each method takes the lock once, so single-document
/// updates are atomic just like in MongoDB.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Same two grouping stages as the MongoDB leaderboard pipeline.
pub fn group_votes(votes: &[VoteRecord], since: Option<DateTime<Utc>>) -> Vec<LeaderboardEntry> {
    let mut per_debate: HashMap<(&str, ObjectId), i64> = HashMap::new();
    for vote in votes
        .iter()
        .filter(|v| since.map_or(true, |since| v.created_at >= since))
    {
        *per_debate
            .entry((vote.user_name.as_str(), vote.debate_id))
            .or_default() += i64::from(vote.votes);
    }

    let mut per_user: HashMap<&str, LeaderboardEntry> = HashMap::new();
    for ((user_name, _), subtotal) in per_debate {
        let entry = per_user
            .entry(user_name)
            .or_insert_with(|| LeaderboardEntry {
                user_name: user_name.to_string(),
                total_votes: 0,
                debates_participated: 0,
            });
        entry.total_votes += subtotal;
        entry.debates_participated += 1;
    }

    let mut entries: Vec<LeaderboardEntry> = per_user.into_values().collect();
    entries.sort_by(|a, b| b.total_votes.cmp(&a.total_votes));
    entries
}

#[async_trait]
impl DebateStore for MemoryStore {
    async fn list_debates(&self) -> Result<Vec<Debate>, StoreError> {
        let mut debates = self.inner.read().await.debates.clone();
        debates.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(debates)
    }

    async fn find_debate(&self, id: ObjectId) -> Result<Option<Debate>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.debates.iter().find(|d| d.id == Some(id)).cloned())
    }

    async fn insert_debate(&self, debate: &Debate) -> Result<(), StoreError> {
        self.inner.write().await.debates.push(debate.clone());
        Ok(())
    }

    async fn remove_participant(&self, debate_id: ObjectId, name: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        if let Some(debate) = inner.debates.iter_mut().find(|d| d.id == Some(debate_id)) {
            for side in Side::ALL {
                debate.participants_mut(side).retain(|p| p != name);
            }
        }
        Ok(())
    }

    async fn add_participant(
        &self,
        debate_id: ObjectId,
        side: Side,
        name: &str,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        if let Some(debate) = inner.debates.iter_mut().find(|d| d.id == Some(debate_id)) {
            let members = debate.participants_mut(side);
            if !members.iter().any(|p| p == name) {
                members.push(name.to_string());
            }
        }
        Ok(())
    }

    async fn upsert_joined_debate(&self, record: &JoinedDebate) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let existing = inner.joined_debates.iter_mut().find(|j| {
            j.debate_id == record.debate_id && j.participant_name == record.participant_name
        });

        match existing {
            Some(current) => {
                let id = current.id;
                *current = record.clone();
                current.id = id;
            }
            None => {
                let mut inserted = record.clone();
                inserted.id = Some(ObjectId::new());
                inner.joined_debates.push(inserted);
            }
        }
        Ok(())
    }

    async fn joined_debates(
        &self,
        participant_name: &str,
    ) -> Result<Vec<JoinedDebate>, StoreError> {
        let inner = self.inner.read().await;
        let mut joined: Vec<JoinedDebate> = inner
            .joined_debates
            .iter()
            .filter(|j| j.participant_name == participant_name)
            .cloned()
            .collect();
        joined.sort_by(|a, b| b.joined_at.cmp(&a.joined_at));
        Ok(joined)
    }

    async fn insert_vote(&self, vote: &VoteRecord) -> Result<(), StoreError> {
        self.inner.write().await.votes.push(vote.clone());
        Ok(())
    }

    async fn vote_totals(
        &self,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<LeaderboardEntry>, StoreError> {
        let inner = self.inner.read().await;
        Ok(group_votes(&inner.votes, since))
    }
}

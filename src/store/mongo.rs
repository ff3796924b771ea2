use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Document};
use chrono::{DateTime, Utc};
use futures::stream::TryStreamExt;
use mongodb::{options::IndexOptions, Collection, Database, IndexModel};
use tracing::info;

use super::{DebateStore, StoreError};
use crate::models::{
    debate::{Debate, Side},
    joined_debate::JoinedDebate,
    leaderboard::{LeaderboardEntry, VoteRecord},
};

pub struct MongoStore {
    debate_collection: Collection<Debate>,
    joined_collection: Collection<JoinedDebate>,
    vote_collection: Collection<VoteRecord>,
}

impl MongoStore {
    pub fn new(db: &Database) -> Self {
        Self {
            debate_collection: db.collection("debates"),
            joined_collection: db.collection("joined_debates"),
            vote_collection: db.collection("votes"),
        }
    }

    /// Unique key backing the joined-debate upsert, plus the leaderboard window scan.
    pub async fn ensure_indexes(&self) -> Result<(), StoreError> {
        let joined_key = IndexModel::builder()
            .keys(doc! { "debateId": 1, "participantName": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.joined_collection.create_index(joined_key).await?;

        let vote_time = IndexModel::builder()
            .keys(doc! { "createdAt": -1 })
            .build();
        self.vote_collection.create_index(vote_time).await?;

        info!("MongoDB indexes ensured");
        Ok(())
    }
}

pub fn leaderboard_pipeline(since: Option<DateTime<Utc>>) -> Vec<Document> {
    let mut pipeline = Vec::with_capacity(5);

    if let Some(since) = since {
        pipeline.push(doc! { "$match": { "createdAt": { "$gte": bson::DateTime::from_chrono(since) } } });
    }

    pipeline.extend([
        // 1. Subtotal per user per debate
        doc! { "$group": {
            "_id": { "userName": "$userName", "debateId": "$debateId" },
            "votes": { "$sum": "$votes" },
        } },
        // 2. Roll subtotals up per user, one row per debate participated in
        doc! { "$group": {
            "_id": "$_id.userName",
            "totalVotes": { "$sum": "$votes" },
            "debatesParticipated": { "$sum": 1 },
        } },
        doc! { "$sort": { "totalVotes": -1 } },
        doc! { "$project": {
            "_id": 0,
            "userName": "$_id",
            "totalVotes": 1,
            "debatesParticipated": 1,
        } },
    ]);

    pipeline
}

#[async_trait]
impl DebateStore for MongoStore {
    async fn list_debates(&self) -> Result<Vec<Debate>, StoreError> {
        let cursor = self
            .debate_collection
            .find(doc! {})
            .sort(doc! { "createdAt": -1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_debate(&self, id: ObjectId) -> Result<Option<Debate>, StoreError> {
        Ok(self.debate_collection.find_one(doc! { "_id": id }).await?)
    }

    async fn insert_debate(&self, debate: &Debate) -> Result<(), StoreError> {
        self.debate_collection.insert_one(debate).await?;
        Ok(())
    }

    async fn remove_participant(&self, debate_id: ObjectId, name: &str) -> Result<(), StoreError> {
        self.debate_collection
            .update_one(
                doc! { "_id": debate_id },
                doc! { "$pull": { "support": name, "oppose": name } },
            )
            .await?;
        Ok(())
    }

    async fn add_participant(
        &self,
        debate_id: ObjectId,
        side: Side,
        name: &str,
    ) -> Result<(), StoreError> {
        let mut field = Document::new();
        field.insert(side.field(), name);

        self.debate_collection
            .update_one(doc! { "_id": debate_id }, doc! { "$addToSet": field })
            .await?;
        Ok(())
    }

    async fn upsert_joined_debate(&self, record: &JoinedDebate) -> Result<(), StoreError> {
        self.joined_collection
            .replace_one(
                doc! { "debateId": record.debate_id, "participantName": record.participant_name.as_str() },
                record,
            )
            .upsert(true)
            .await?;
        Ok(())
    }

    async fn joined_debates(
        &self,
        participant_name: &str,
    ) -> Result<Vec<JoinedDebate>, StoreError> {
        let cursor = self
            .joined_collection
            .find(doc! { "participantName": participant_name })
            .sort(doc! { "joinedAt": -1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn insert_vote(&self, vote: &VoteRecord) -> Result<(), StoreError> {
        self.vote_collection.insert_one(vote).await?;
        Ok(())
    }

    async fn vote_totals(
        &self,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<LeaderboardEntry>, StoreError> {
        let mut cursor = self
            .vote_collection
            .aggregate(leaderboard_pipeline(since))
            .await?;

        let mut entries = Vec::new();
        while let Some(doc) = cursor.try_next().await? {
            entries.push(bson::from_document(doc)?);
        }
        Ok(entries)
    }
}

use bson::{oid::ObjectId, serde_helpers::chrono_datetime_as_bson_datetime};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// DB model for the `votes` collection. Append-only.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct VoteRecord {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_name: String,
    pub debate_id: ObjectId,
    pub votes: i32,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

/// Computed per request, never persisted.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub user_name: String,
    pub total_votes: i64,
    pub debates_participated: i64,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CastVoteRequest {
    #[serde(default)]
    pub user_name: String,
    #[serde(default = "one")]
    pub votes: i32,
}

fn one() -> i32 {
    1
}

#[derive(Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VoteResponse {
    pub id: Option<String>,
    pub user_name: String,
    pub debate_id: String,
    pub votes: i32,
    pub created_at: String, // RFC3339
}

impl From<VoteRecord> for VoteResponse {
    fn from(v: VoteRecord) -> Self {
        VoteResponse {
            id: v.id.map(|oid| oid.to_hex()),
            user_name: v.user_name,
            debate_id: v.debate_id.to_hex(),
            votes: v.votes,
            created_at: v.created_at.to_rfc3339(),
        }
    }
}

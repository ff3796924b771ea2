use bson::{oid::ObjectId, serde_helpers::chrono_datetime_as_bson_datetime};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::debate::{Debate, Side};

/// DB model, one per (debate_id, participant_name) in `joined_debates`.
/// Carries a copy of the debate's descriptive fields taken at join time.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct JoinedDebate {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub debate_id: ObjectId,
    pub participant_name: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub duration: i32,
    pub tags: Vec<String>,
    pub side: Side,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub joined_at: DateTime<Utc>,
}

impl JoinedDebate {
    pub fn snapshot(
        debate_id: ObjectId,
        debate: &Debate,
        participant_name: &str,
        side: Side,
        joined_at: DateTime<Utc>,
    ) -> Self {
        JoinedDebate {
            id: None,
            debate_id,
            participant_name: participant_name.to_string(),
            title: debate.title.clone(),
            description: debate.description.clone(),
            category: debate.category.clone(),
            duration: debate.duration,
            tags: debate.tags.clone(),
            side,
            joined_at,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JoinedDebateResponse {
    pub debate_id: String,
    pub participant_name: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub duration: i32,
    pub tags: Vec<String>,
    pub side: Side,
    pub joined_at: String, // RFC3339
}

impl From<JoinedDebate> for JoinedDebateResponse {
    fn from(j: JoinedDebate) -> Self {
        JoinedDebateResponse {
            debate_id: j.debate_id.to_hex(),
            participant_name: j.participant_name,
            title: j.title,
            description: j.description,
            category: j.category,
            duration: j.duration,
            tags: j.tags,
            side: j.side,
            joined_at: j.joined_at.to_rfc3339(),
        }
    }
}

use std::str::FromStr;

use bson::{oid::ObjectId, serde_helpers::chrono_datetime_as_bson_datetime};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;

/// DB model, stored in the `debates` collection
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Debate {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub category: String,
    /// Length of the debate in minutes.
    pub duration: i32,
    #[serde(default)]
    pub support: Vec<String>,
    #[serde(default)]
    pub oppose: Vec<String>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl Debate {
    pub fn participants_mut(&mut self, side: Side) -> &mut Vec<String> {
        match side {
            Side::Support => &mut self.support,
            Side::Oppose => &mut self.oppose,
        }
    }
}

/// Debate position. Only the exact spellings `Support` and `Oppose` are accepted.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, ToSchema)]
pub enum Side {
    Support,
    Oppose,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Support, Side::Oppose];

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Support => "Support",
            Side::Oppose => "Oppose",
        }
    }

    /// Name of the participant set on [`Debate`] holding this side.
    pub fn field(self) -> &'static str {
        match self {
            Side::Support => "support",
            Side::Oppose => "oppose",
        }
    }
}

impl FromStr for Side {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Support" => Ok(Side::Support),
            "Oppose" => Ok(Side::Oppose),
            other => Err(AppError::InvalidArgument(format!(
                "Side must be \"Support\" or \"Oppose\", got \"{}\"",
                other
            ))),
        }
    }
}

/// Request DTO (client → server)
#[derive(Deserialize, ToSchema)]
pub struct CreateDebateRequest {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub category: String,
    pub duration: i32,
}

/// Body of `POST /debates/{id}/join`. Missing fields deserialize as empty and fail validation.
#[derive(Deserialize, ToSchema)]
pub struct JoinRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub side: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct JoinResponse {
    pub message: String,
    pub side: Side,
}

/// Response DTO (server → client)
#[derive(Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DebateResponse {
    pub id: Option<String>,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub category: String,
    pub duration: i32,
    pub support: Vec<String>,
    pub oppose: Vec<String>,
    pub created_at: String, // RFC3339
}

impl From<Debate> for DebateResponse {
    fn from(d: Debate) -> Self {
        DebateResponse {
            id: d.id.map(|oid| oid.to_hex()),
            title: d.title,
            description: d.description,
            tags: d.tags,
            category: d.category,
            duration: d.duration,
            support: d.support,
            oppose: d.oppose,
            created_at: d.created_at.to_rfc3339(),
        }
    }
}

use bson::oid::ObjectId;

use crate::error::AppError;

pub mod debate_service;
pub mod join_service;
pub mod leaderboard_service;

/// Malformed ids cannot reference a stored debate, so they report `NotFound`.
pub(crate) fn parse_debate_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id).map_err(|_| AppError::NotFound("Debate not found".to_string()))
}

pub(crate) fn require_non_blank(value: &str, field: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::InvalidArgument(format!("{} is required", field)));
    }
    Ok(())
}

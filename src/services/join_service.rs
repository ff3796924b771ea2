use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::{parse_debate_id, require_non_blank};
use crate::{
    error::AppError,
    models::{debate::Side, joined_debate::JoinedDebate},
    store::DebateStore,
};

/// Moves a participant onto one side of a debate and records the join.
///
/// The three store writes are independent. A failure part way through leaves
/// the debate's membership updated without a matching joined-debate record;
/// nothing here rolls that back.
pub struct JoinService {
    store: Arc<dyn DebateStore>,
}

impl JoinService {
    pub fn new(store: Arc<dyn DebateStore>) -> Self {
        Self { store }
    }

    pub async fn join(&self, debate_id: &str, participant_name: &str, side: &str) -> Result<Side, AppError> {
        require_non_blank(participant_name, "name")?;
        let side: Side = side.parse()?;
        let debate_id = parse_debate_id(debate_id)?;

        let debate = match self.store.find_debate(debate_id).await? {
            Some(debate) => debate,
            None => {
                warn!(%debate_id, "join attempted on missing debate");
                return Err(AppError::NotFound("Debate not found".to_string()));
            }
        };

        // 1. Clear both sides so the name can never end up on both
        self.store.remove_participant(debate_id, participant_name).await?;

        // 2. Add to the chosen side
        self.store.add_participant(debate_id, side, participant_name).await?;

        // 3. Replace the participant's snapshot of this debate
        let record = JoinedDebate::snapshot(debate_id, &debate, participant_name, side, Utc::now());
        self.store.upsert_joined_debate(&record).await?;

        info!(%debate_id, participant = participant_name, side = side.as_str(), "participant joined debate");
        Ok(side)
    }
}

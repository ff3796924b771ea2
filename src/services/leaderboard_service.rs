use std::sync::Arc;

use chrono::{DateTime, Days, Months, Utc};
use tracing::{debug, info};

use super::{parse_debate_id, require_non_blank};
use crate::{
    error::AppError,
    models::leaderboard::{CastVoteRequest, LeaderboardEntry, VoteRecord},
    store::DebateStore,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LeaderboardFilter {
    #[default]
    All,
    Weekly,
    Monthly,
}

impl LeaderboardFilter {
    /// Unrecognised values fall back to `All` rather than erroring.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None | Some("all") => LeaderboardFilter::All,
            Some("weekly") => LeaderboardFilter::Weekly,
            Some("monthly") => LeaderboardFilter::Monthly,
            Some(other) => {
                debug!(filter = other, "unknown leaderboard filter, using all");
                LeaderboardFilter::All
            }
        }
    }

    /// Inclusive lower bound on vote timestamps, using calendar arithmetic.
    pub fn window_start(self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            LeaderboardFilter::All => None,
            LeaderboardFilter::Weekly => now.checked_sub_days(Days::new(7)),
            LeaderboardFilter::Monthly => now.checked_sub_months(Months::new(1)),
        }
    }
}

pub struct LeaderboardService {
    store: Arc<dyn DebateStore>,
}

impl LeaderboardService {
    pub fn new(store: Arc<dyn DebateStore>) -> Self {
        Self { store }
    }

    pub async fn get_leaderboard(&self, filter: LeaderboardFilter) -> Result<Vec<LeaderboardEntry>, AppError> {
        self.leaderboard_at(filter, Utc::now()).await
    }

    pub async fn leaderboard_at(
        &self,
        filter: LeaderboardFilter,
        now: DateTime<Utc>,
    ) -> Result<Vec<LeaderboardEntry>, AppError> {
        let since = filter.window_start(now);
        let entries = self.store.vote_totals(since).await?;
        debug!(?filter, ?since, count = entries.len(), "leaderboard computed");
        Ok(entries)
    }

    pub async fn record_vote(&self, debate_id: &str, req: CastVoteRequest) -> Result<VoteRecord, AppError> {
        require_non_blank(&req.user_name, "userName")?;
        if req.votes < 1 {
            return Err(AppError::InvalidArgument("votes must be at least 1".to_string()));
        }

        let debate_id = parse_debate_id(debate_id)?;
        if self.store.find_debate(debate_id).await?.is_none() {
            return Err(AppError::NotFound("Debate not found".to_string()));
        }

        let vote = VoteRecord {
            id: Some(bson::oid::ObjectId::new()),
            user_name: req.user_name,
            debate_id,
            votes: req.votes,
            created_at: Utc::now(),
        };
        self.store.insert_vote(&vote).await?;
        info!(%debate_id, user = %vote.user_name, votes = vote.votes, "vote recorded");

        Ok(vote)
    }
}

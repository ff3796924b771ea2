use std::sync::Arc;

use bson::oid::ObjectId;
use chrono::Utc;
use tracing::{debug, info};

use super::{parse_debate_id, require_non_blank};
use crate::{
    error::AppError,
    models::{
        debate::{CreateDebateRequest, Debate},
        joined_debate::JoinedDebate,
    },
    store::DebateStore,
};

pub struct DebateService {
    store: Arc<dyn DebateStore>,
}

impl DebateService {
    pub fn new(store: Arc<dyn DebateStore>) -> Self {
        Self { store }
    }

    pub async fn list_debates(&self) -> Result<Vec<Debate>, AppError> {
        let debates = self.store.list_debates().await?;
        debug!(count = debates.len(), "listed debates");
        Ok(debates)
    }

    pub async fn get_debate(&self, id: &str) -> Result<Debate, AppError> {
        let debate_id = parse_debate_id(id)?;
        self.store
            .find_debate(debate_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Debate not found".to_string()))
    }

    pub async fn create_debate(&self, req: CreateDebateRequest) -> Result<Debate, AppError> {
        require_non_blank(&req.title, "title")?;
        require_non_blank(&req.description, "description")?;
        require_non_blank(&req.category, "category")?;
        if req.duration <= 0 {
            return Err(AppError::InvalidArgument(
                "duration must be a positive number of minutes".to_string(),
            ));
        }

        let debate = Debate {
            id: Some(ObjectId::new()),
            title: req.title,
            description: req.description,
            tags: req.tags,
            category: req.category,
            duration: req.duration,
            support: vec![],
            oppose: vec![],
            created_at: Utc::now(),
        };

        self.store.insert_debate(&debate).await?;
        info!(debate_id = ?debate.id, title = %debate.title, "debate created");

        Ok(debate)
    }

    pub async fn joined_debates(&self, participant_name: &str) -> Result<Vec<JoinedDebate>, AppError> {
        require_non_blank(participant_name, "name")?;
        Ok(self.store.joined_debates(participant_name).await?)
    }
}

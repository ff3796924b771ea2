use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use std::sync::Arc;

use crate::error::{AppError, ErrorResponse};
use crate::models::joined_debate::JoinedDebateResponse;
use crate::services::debate_service::DebateService;

#[utoipa::path(
    get,
    path = "/users/{name}/joined-debates",
    params(
        ("name" = String, Path, description = "Participant name")
    ),
    responses(
        (status = 200, description = "Debates the participant has joined, latest first", body = [JoinedDebateResponse]),
        (status = 400, description = "Blank name", body = ErrorResponse)
    )
)]
pub async fn get_joined_debates(
    State(debate_service): State<Arc<DebateService>>,
    Path(name): Path<String>,
) -> Result<Json<Vec<JoinedDebateResponse>>, AppError> {
    let joined = debate_service.joined_debates(&name).await?;
    Ok(Json(joined.into_iter().map(Into::into).collect()))
}

pub fn joined_routes(debate_service: Arc<DebateService>) -> Router {
    Router::new()
        .route("/users/{name}/joined-debates", get(get_joined_debates))
        .with_state(debate_service)
}

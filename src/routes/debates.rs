use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;

use crate::error::{AppError, ErrorResponse};
use crate::models::debate::{CreateDebateRequest, DebateResponse, JoinRequest, JoinResponse};
use crate::services::{debate_service::DebateService, join_service::JoinService};

type DebateState = (Arc<DebateService>, Arc<JoinService>);

#[utoipa::path(
    get,
    path = "/debates",
    responses(
        (status = 200, description = "All debates, newest first", body = [DebateResponse]),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn list_debates(
    State((debate_service, _join_service)): State<DebateState>,
) -> Result<Json<Vec<DebateResponse>>, AppError> {
    let debates = debate_service.list_debates().await?;
    Ok(Json(debates.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/debates/{id}",
    params(
        ("id" = String, Path, description = "Debate ID")
    ),
    responses(
        (status = 200, description = "Debate found", body = DebateResponse),
        (status = 404, description = "Debate not found", body = ErrorResponse)
    )
)]
pub async fn get_debate(
    State((debate_service, _join_service)): State<DebateState>,
    Path(id): Path<String>,
) -> Result<Json<DebateResponse>, AppError> {
    let debate = debate_service.get_debate(&id).await?;
    Ok(Json(debate.into()))
}

#[utoipa::path(
    post,
    path = "/debates",
    request_body = CreateDebateRequest,
    responses(
        (status = 201, description = "Debate created", body = DebateResponse),
        (status = 400, description = "Missing or invalid field", body = ErrorResponse)
    )
)]
pub async fn create_debate(
    State((debate_service, _join_service)): State<DebateState>,
    payload: Result<Json<CreateDebateRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<DebateResponse>), AppError> {
    let Json(req) = payload?;
    let debate = debate_service.create_debate(req).await?;
    Ok((StatusCode::CREATED, Json(debate.into())))
}

#[utoipa::path(
    post,
    path = "/debates/{id}/join",
    params(
        ("id" = String, Path, description = "Debate ID")
    ),
    request_body = JoinRequest,
    responses(
        (status = 200, description = "Joined the requested side", body = JoinResponse),
        (status = 400, description = "Empty name or side other than Support/Oppose", body = ErrorResponse),
        (status = 404, description = "Debate not found", body = ErrorResponse)
    )
)]
pub async fn join_debate(
    State((_debate_service, join_service)): State<DebateState>,
    Path(id): Path<String>,
    payload: Result<Json<JoinRequest>, JsonRejection>,
) -> Result<Json<JoinResponse>, AppError> {
    let Json(req) = payload?;
    let side = join_service.join(&id, &req.name, &req.side).await?;

    Ok(Json(JoinResponse {
        message: format!("Joined debate as {}", side.as_str()),
        side,
    }))
}

pub fn debate_routes(debate_service: Arc<DebateService>, join_service: Arc<JoinService>) -> Router {
    Router::new()
        .route("/debates", get(list_debates).post(create_debate))
        .route("/debates/{id}", get(get_debate))
        .route("/debates/{id}/join", post(join_debate))
        .with_state((debate_service, join_service))
}

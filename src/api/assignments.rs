//! Assignment endpoints: assign by card id, return, audit log

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::assignment::{Assignment, AssignmentLogEntry},
};

/// Create assignment request
#[derive(Deserialize, ToSchema)]
pub struct CreateAssignmentRequest {
    /// Card ID to assign
    pub card_id: i64,
    /// Staff member taking the card
    pub staff_name: String,
}

/// Assign a card to a staff member by card id
#[utoipa::path(
    post,
    path = "/assignments",
    tag = "lifecycle",
    request_body = CreateAssignmentRequest,
    responses(
        (status = 201, description = "Card assigned", body = Assignment),
        (status = 400, description = "Empty staff name"),
        (status = 404, description = "Card not found"),
        (status = 422, description = "Card is already assigned")
    )
)]
pub async fn create_assignment(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateAssignmentRequest>,
) -> AppResult<(StatusCode, Json<Assignment>)> {
    let assignment = state
        .services
        .lifecycle
        .assign_card(request.card_id, &request.staff_name)
        .await?;
    Ok((StatusCode::CREATED, Json(assignment)))
}

/// Return a card by assignment id
#[utoipa::path(
    post,
    path = "/assignments/{id}/return",
    tag = "lifecycle",
    params(
        ("id" = i64, Path, description = "Assignment ID")
    ),
    responses(
        (status = 200, description = "Card returned", body = Assignment),
        (status = 404, description = "Assignment not found"),
        (status = 422, description = "Assignment already returned")
    )
)]
pub async fn return_assignment(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Assignment>> {
    let assignment = state.services.lifecycle.return_assignment(id).await?;
    Ok(Json(assignment))
}

/// Full assignment history, newest first
#[utoipa::path(
    get,
    path = "/assignments/log",
    tag = "lifecycle",
    responses(
        (status = 200, description = "Audit log with joined card fields", body = Vec<AssignmentLogEntry>)
    )
)]
pub async fn assignment_log(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<AssignmentLogEntry>>> {
    let entries = state.services.lifecycle.audit_log().await?;
    Ok(Json(entries))
}

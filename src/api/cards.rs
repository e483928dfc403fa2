//! Card registry and uid-addressed lifecycle endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{
        assignment::Assignment,
        card::{AssignedCard, Card, CreateCard},
    },
    services::lifecycle::TapAction,
};

use super::MessageResponse;

/// Rename card request
#[derive(Deserialize, ToSchema)]
pub struct RenameCardRequest {
    /// New human label
    pub name: String,
}

/// Assign-by-uid request
#[derive(Deserialize, ToSchema)]
pub struct AssignByUidRequest {
    /// Staff member taking the card
    pub staff_name: String,
}

/// Tap request; staff name is only needed when the tap assigns
#[derive(Deserialize, ToSchema)]
pub struct TapRequest {
    pub staff_name: Option<String>,
}

/// Tap response, reporting which branch fired
#[derive(serde::Serialize, ToSchema)]
pub struct TapResponse {
    pub action: TapAction,
    pub assignment: Assignment,
    pub message: String,
}

/// List all cards
#[utoipa::path(
    get,
    path = "/cards",
    tag = "cards",
    responses(
        (status = 200, description = "All cards in creation order", body = Vec<Card>)
    )
)]
pub async fn list_cards(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Card>>> {
    let cards = state.services.cards.list().await?;
    Ok(Json(cards))
}

/// List available cards
#[utoipa::path(
    get,
    path = "/cards/available",
    tag = "cards",
    responses(
        (status = 200, description = "Cards available for assignment", body = Vec<Card>)
    )
)]
pub async fn list_available(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Card>>> {
    let cards = state.services.cards.list_available().await?;
    Ok(Json(cards))
}

/// List assigned cards with their current holder
#[utoipa::path(
    get,
    path = "/cards/assigned",
    tag = "cards",
    responses(
        (status = 200, description = "Cards currently out", body = Vec<AssignedCard>)
    )
)]
pub async fn list_assigned(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<AssignedCard>>> {
    let cards = state.services.cards.list_assigned().await?;
    Ok(Json(cards))
}

/// Register a new card
#[utoipa::path(
    post,
    path = "/cards",
    tag = "cards",
    request_body = CreateCard,
    responses(
        (status = 201, description = "Card created", body = Card),
        (status = 400, description = "Empty uid"),
        (status = 409, description = "Uid already registered")
    )
)]
pub async fn create_card(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateCard>,
) -> AppResult<(StatusCode, Json<Card>)> {
    let card = state
        .services
        .cards
        .create(&request.uid, &request.name)
        .await?;
    Ok((StatusCode::CREATED, Json(card)))
}

/// Rename a card
#[utoipa::path(
    put,
    path = "/cards/{id}",
    tag = "cards",
    params(
        ("id" = i64, Path, description = "Card ID")
    ),
    request_body = RenameCardRequest,
    responses(
        (status = 200, description = "Card renamed", body = MessageResponse),
        (status = 404, description = "Card not found")
    )
)]
pub async fn rename_card(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
    Json(request): Json<RenameCardRequest>,
) -> AppResult<Json<MessageResponse>> {
    state.services.cards.rename(id, &request.name).await?;
    Ok(Json(MessageResponse {
        message: "Card updated".to_string(),
    }))
}

/// Delete a card; refused while the card is assigned
#[utoipa::path(
    delete,
    path = "/cards/{id}",
    tag = "cards",
    params(
        ("id" = i64, Path, description = "Card ID")
    ),
    responses(
        (status = 200, description = "Card deleted", body = MessageResponse),
        (status = 404, description = "Card not found"),
        (status = 422, description = "Card is currently assigned")
    )
)]
pub async fn delete_card(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MessageResponse>> {
    state.services.cards.delete(id).await?;
    Ok(Json(MessageResponse {
        message: "Card deleted".to_string(),
    }))
}

/// Assign a card by tag uid
#[utoipa::path(
    post,
    path = "/cards/uid/{uid}/assign",
    tag = "lifecycle",
    params(
        ("uid" = String, Path, description = "Card tag uid")
    ),
    request_body = AssignByUidRequest,
    responses(
        (status = 201, description = "Card assigned", body = Assignment),
        (status = 400, description = "Empty staff name"),
        (status = 404, description = "No card with this uid"),
        (status = 422, description = "Card is already assigned")
    )
)]
pub async fn assign_by_uid(
    State(state): State<crate::AppState>,
    Path(uid): Path<String>,
    Json(request): Json<AssignByUidRequest>,
) -> AppResult<(StatusCode, Json<Assignment>)> {
    let assignment = state
        .services
        .lifecycle
        .assign_by_uid(&uid, &request.staff_name)
        .await?;
    Ok((StatusCode::CREATED, Json(assignment)))
}

/// Return a card by tag uid
#[utoipa::path(
    post,
    path = "/cards/uid/{uid}/return",
    tag = "lifecycle",
    params(
        ("uid" = String, Path, description = "Card tag uid")
    ),
    responses(
        (status = 200, description = "Card returned", body = Assignment),
        (status = 404, description = "No card with this uid, or card not out"),
        (status = 422, description = "Registry and ledger disagree for this card")
    )
)]
pub async fn return_by_uid(
    State(state): State<crate::AppState>,
    Path(uid): Path<String>,
) -> AppResult<Json<Assignment>> {
    let assignment = state.services.lifecycle.return_by_uid(&uid).await?;
    Ok(Json(assignment))
}

/// Tap a card: assigns it when available, returns it when assigned
#[utoipa::path(
    post,
    path = "/cards/uid/{uid}/tap",
    tag = "lifecycle",
    params(
        ("uid" = String, Path, description = "Card tag uid")
    ),
    request_body = TapRequest,
    responses(
        (status = 200, description = "Tap applied", body = TapResponse),
        (status = 400, description = "Assignment tap without a staff name"),
        (status = 404, description = "No card with this uid")
    )
)]
pub async fn tap_card(
    State(state): State<crate::AppState>,
    Path(uid): Path<String>,
    Json(request): Json<TapRequest>,
) -> AppResult<Json<TapResponse>> {
    let staff_name = request.staff_name.unwrap_or_default();
    let (action, assignment) = state.services.lifecycle.tap_toggle(&uid, &staff_name).await?;

    let message = match action {
        TapAction::Assigned => "Card assigned".to_string(),
        TapAction::Returned => "Card returned".to_string(),
    };
    Ok(Json(TapResponse {
        action,
        assignment,
        message,
    }))
}

//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{assignments, cards, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Cardkeep API",
        version = "0.1.0",
        description = "Staff access card tracking REST API",
        license(name = "MIT")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Cards
        cards::list_cards,
        cards::list_available,
        cards::list_assigned,
        cards::create_card,
        cards::rename_card,
        cards::delete_card,
        cards::assign_by_uid,
        cards::return_by_uid,
        cards::tap_card,
        // Assignments
        assignments::create_assignment,
        assignments::return_assignment,
        assignments::assignment_log,
    ),
    components(
        schemas(
            // Cards
            crate::models::card::Card,
            crate::models::card::CardStatus,
            crate::models::card::CreateCard,
            crate::models::card::AssignedCard,
            cards::RenameCardRequest,
            cards::AssignByUidRequest,
            cards::TapRequest,
            cards::TapResponse,
            // Assignments
            crate::models::assignment::Assignment,
            crate::models::assignment::AssignmentLogEntry,
            crate::services::lifecycle::TapAction,
            assignments::CreateAssignmentRequest,
            // Health
            health::HealthResponse,
            // Errors
            crate::api::MessageResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "cards", description = "Card registry management"),
        (name = "lifecycle", description = "Assignment and return transitions")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

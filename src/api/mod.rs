//! API handlers for the Cardkeep REST endpoints

pub mod assignments;
pub mod cards;
pub mod health;
pub mod openapi;

use serde::Serialize;
use utoipa::ToSchema;

/// Simple confirmation payload for mutations with no richer result
#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

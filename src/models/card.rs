//! Card model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Card status as stored in the `cards` table.
///
/// A card is `Assigned` exactly when the ledger holds one open assignment
/// for it; only the lifecycle service flips this field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CardStatus {
    Available,
    Assigned,
}

/// Card model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Card {
    pub id: i64,
    /// Externally presented tag identifier, unique and immutable
    pub uid: String,
    /// Human label
    pub name: String,
    pub status: CardStatus,
}

/// Create card request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCard {
    pub uid: String,
    pub name: String,
}

/// A card that is currently out, joined with its open assignment
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct AssignedCard {
    /// The open assignment's id
    pub id: i64,
    pub uid: String,
    pub name: String,
    pub staff_name: String,
    pub assigned_at: DateTime<Utc>,
}

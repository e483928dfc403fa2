//! Assignment (checkout) model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Assignment model from database.
///
/// A null `returned_at` means the assignment is open; once set it never
/// reverts, and assignment rows are never deleted (audit trail). `card_id`
/// goes null when the card itself is deleted, which can only happen after
/// the assignment is closed.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Assignment {
    pub id: i64,
    pub card_id: Option<i64>,
    pub staff_name: String,
    pub assigned_at: DateTime<Utc>,
    pub returned_at: Option<DateTime<Utc>>,
}

impl Assignment {
    pub fn is_open(&self) -> bool {
        self.returned_at.is_none()
    }
}

/// Assignment joined with its card's fields, the audit view. Card fields are
/// null for history whose card has since been deleted.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct AssignmentLogEntry {
    pub id: i64,
    pub card_name: Option<String>,
    pub uid: Option<String>,
    pub staff_name: String,
    pub assigned_at: DateTime<Utc>,
    pub returned_at: Option<DateTime<Utc>>,
}

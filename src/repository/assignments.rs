//! Assignments repository (the checkout ledger)

use chrono::Utc;
use sqlx::{Pool, Sqlite, Transaction};

use crate::{
    error::{AppError, AppResult},
    models::assignment::{Assignment, AssignmentLogEntry},
};

#[derive(Clone)]
pub struct AssignmentsRepository {
    pool: Pool<Sqlite>,
}

impl AssignmentsRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Get assignment by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Assignment> {
        sqlx::query_as::<_, Assignment>("SELECT * FROM assignments WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Assignment with id {} not found", id)))
    }

    /// The unique open assignment for a card.
    ///
    /// More than one open row is a ledger consistency fault and is surfaced
    /// rather than silently resolved.
    pub async fn find_open_by_card(&self, card_id: i64) -> AppResult<Assignment> {
        let mut open = sqlx::query_as::<_, Assignment>(
            "SELECT * FROM assignments WHERE card_id = ? AND returned_at IS NULL ORDER BY id",
        )
        .bind(card_id)
        .fetch_all(&self.pool)
        .await?;

        match open.len() {
            0 => Err(AppError::NotFound(format!(
                "No open assignment for card {}",
                card_id
            ))),
            1 => Ok(open.remove(0)),
            n => Err(AppError::InvalidState(format!(
                "Card {} has {} open assignments, expected at most one",
                card_id, n
            ))),
        }
    }

    /// Open an assignment inside a lifecycle transaction
    pub(crate) async fn open(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        card_id: i64,
        staff_name: &str,
    ) -> AppResult<Assignment> {
        let now = Utc::now();
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO assignments (card_id, staff_name, assigned_at) VALUES (?, ?, ?) RETURNING id",
        )
        .bind(card_id)
        .bind(staff_name)
        .bind(now)
        .fetch_one(&mut **tx)
        .await?;

        Ok(Assignment {
            id,
            card_id: Some(card_id),
            staff_name: staff_name.to_string(),
            assigned_at: now,
            returned_at: None,
        })
    }

    /// Close an open assignment inside a lifecycle transaction.
    ///
    /// The update is conditional on `returned_at IS NULL` so a close never
    /// re-fires; a non-null `returned_at` is immutable.
    pub(crate) async fn close(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        id: i64,
    ) -> AppResult<Assignment> {
        let now = Utc::now();
        let result =
            sqlx::query("UPDATE assignments SET returned_at = ? WHERE id = ? AND returned_at IS NULL")
                .bind(now)
                .bind(id)
                .execute(&mut **tx)
                .await?;

        if result.rows_affected() == 0 {
            // Distinguish a missing row from one already closed
            let existing =
                sqlx::query_as::<_, Assignment>("SELECT * FROM assignments WHERE id = ?")
                    .bind(id)
                    .fetch_optional(&mut **tx)
                    .await?;
            return match existing {
                Some(_) => Err(AppError::InvalidState(format!(
                    "Assignment {} is already returned",
                    id
                ))),
                None => Err(AppError::NotFound(format!(
                    "Assignment with id {} not found",
                    id
                ))),
            };
        }

        let closed = sqlx::query_as::<_, Assignment>("SELECT * FROM assignments WHERE id = ?")
            .bind(id)
            .fetch_one(&mut **tx)
            .await?;
        Ok(closed)
    }

    /// Full ledger joined with card fields, newest first.
    /// Id breaks ties between same-second timestamps. The join is outer so
    /// history survives deletion of its card.
    pub async fn log(&self) -> AppResult<Vec<AssignmentLogEntry>> {
        let entries = sqlx::query_as::<_, AssignmentLogEntry>(
            r#"
            SELECT a.id, c.name AS card_name, c.uid, a.staff_name, a.assigned_at, a.returned_at
            FROM assignments a
            LEFT JOIN cards c ON a.card_id = c.id
            ORDER BY a.assigned_at DESC, a.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }
}

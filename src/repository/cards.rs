//! Cards repository (the card registry)

use sqlx::{Pool, Sqlite, Transaction};

use crate::{
    error::{AppError, AppResult},
    models::card::{AssignedCard, Card, CardStatus},
};

#[derive(Clone)]
pub struct CardsRepository {
    pool: Pool<Sqlite>,
}

impl CardsRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Get card by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Card> {
        sqlx::query_as::<_, Card>("SELECT * FROM cards WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Card with id {} not found", id)))
    }

    /// Get card by tag uid
    pub async fn get_by_uid(&self, uid: &str) -> AppResult<Card> {
        sqlx::query_as::<_, Card>("SELECT * FROM cards WHERE uid = ?")
            .bind(uid)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Card with uid {} not found", uid)))
    }

    /// All cards in creation order
    pub async fn list(&self) -> AppResult<Vec<Card>> {
        let cards = sqlx::query_as::<_, Card>("SELECT * FROM cards ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(cards)
    }

    /// Cards filtered by status, in creation order
    pub async fn list_by_status(&self, status: CardStatus) -> AppResult<Vec<Card>> {
        let cards = sqlx::query_as::<_, Card>("SELECT * FROM cards WHERE status = ? ORDER BY id")
            .bind(status)
            .fetch_all(&self.pool)
            .await?;
        Ok(cards)
    }

    /// Cards currently out, joined with their open assignment
    pub async fn list_assigned(&self) -> AppResult<Vec<AssignedCard>> {
        let cards = sqlx::query_as::<_, AssignedCard>(
            r#"
            SELECT a.id, c.uid, c.name, a.staff_name, a.assigned_at
            FROM assignments a
            JOIN cards c ON a.card_id = c.id
            WHERE a.returned_at IS NULL
            ORDER BY a.assigned_at DESC, a.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(cards)
    }

    /// Create a new card in Available status
    pub async fn create(&self, uid: &str, name: &str) -> AppResult<Card> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO cards (uid, name, status) VALUES (?, ?, 'available') RETURNING id",
        )
        .bind(uid)
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::DuplicateUid(format!("Card with uid {} already exists", uid))
            }
            _ => AppError::Store(e),
        })?;

        Ok(Card {
            id,
            uid: uid.to_string(),
            name: name.to_string(),
            status: CardStatus::Available,
        })
    }

    /// Rename a card
    pub async fn rename(&self, id: i64, name: &str) -> AppResult<()> {
        let result = sqlx::query("UPDATE cards SET name = ? WHERE id = ?")
            .bind(name)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Card with id {} not found", id)));
        }
        Ok(())
    }

    /// Delete a card, only permitted while Available
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.get_by_id(id).await?;

        // Conditional on status so a concurrent assign cannot race the check
        let result = sqlx::query("DELETE FROM cards WHERE id = ? AND status = 'available'")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::InvalidState(
                "Cannot delete an assigned card".to_string(),
            ));
        }
        Ok(())
    }

    /// Flip a card's status, conditional on the expected current status.
    ///
    /// Returns whether a row changed. Zero affected rows means the card was
    /// not in `from` status when the update ran; the lifecycle service treats
    /// that as a lost race and aborts the whole transition. Status mutation
    /// is deliberately not part of the public registry surface.
    pub(crate) async fn set_status(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        id: i64,
        from: CardStatus,
        to: CardStatus,
    ) -> AppResult<bool> {
        let result = sqlx::query("UPDATE cards SET status = ? WHERE id = ? AND status = ?")
            .bind(to)
            .bind(id)
            .bind(from)
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected() == 1)
    }

    /// Insert the fixed bootstrap cards if absent (first-run convenience).
    /// Returns how many rows were actually inserted.
    pub async fn seed_defaults(&self) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            INSERT OR IGNORE INTO cards (uid, name, status) VALUES
                ('CARD001', 'Card 1', 'available'),
                ('CARD002', 'Card 2', 'available'),
                ('CARD003', 'Card 3', 'available'),
                ('CARD004', 'Card 4', 'available'),
                ('CARD005', 'Card 5', 'available')
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }
}

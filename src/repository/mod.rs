//! Repository layer for database operations

pub mod assignments;
pub mod cards;

use sqlx::{Pool, Sqlite};

use crate::error::AppResult;

/// Main repository struct holding the database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Sqlite>,
    pub cards: cards::CardsRepository,
    pub assignments: assignments::AssignmentsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self {
            cards: cards::CardsRepository::new(pool.clone()),
            assignments: assignments::AssignmentsRepository::new(pool.clone()),
            pool,
        }
    }

    /// Cheap store round trip, used by the readiness probe
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

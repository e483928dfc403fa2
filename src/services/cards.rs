//! Card registry service

use crate::{
    error::{AppError, AppResult},
    models::card::{AssignedCard, Card, CardStatus},
    repository::Repository,
};

#[derive(Clone)]
pub struct CardsService {
    repository: Repository,
}

impl CardsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// All cards in creation order
    pub async fn list(&self) -> AppResult<Vec<Card>> {
        self.repository.cards.list().await
    }

    /// Cards currently available for assignment
    pub async fn list_available(&self) -> AppResult<Vec<Card>> {
        self.repository
            .cards
            .list_by_status(CardStatus::Available)
            .await
    }

    /// Cards currently out, with the holder's name and checkout time
    pub async fn list_assigned(&self) -> AppResult<Vec<AssignedCard>> {
        self.repository.cards.list_assigned().await
    }

    /// Register a new card
    pub async fn create(&self, uid: &str, name: &str) -> AppResult<Card> {
        let uid = uid.trim();
        if uid.is_empty() {
            return Err(AppError::InvalidInput("Card uid must not be empty".to_string()));
        }
        self.repository.cards.create(uid, name).await
    }

    /// Rename a card
    pub async fn rename(&self, id: i64, name: &str) -> AppResult<()> {
        self.repository.cards.rename(id, name).await
    }

    /// Delete a card; fails while the card is assigned
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.repository.cards.delete(id).await
    }
}

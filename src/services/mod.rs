//! Business logic services

pub mod cards;
pub mod lifecycle;

use crate::{error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub cards: cards::CardsService,
    pub lifecycle: lifecycle::LifecycleService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            cards: cards::CardsService::new(repository.clone()),
            lifecycle: lifecycle::LifecycleService::new(repository.clone()),
            repository,
        }
    }

    /// Verify the store answers; backs the readiness endpoint
    pub async fn ping_store(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}

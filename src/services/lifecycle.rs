//! Card lifecycle service, the Available/Assigned state machine.
//!
//! Every transition touches two rows (the card's status and an assignment)
//! and must be all-or-nothing: a concurrent request against the same card
//! must never observe a card whose status changed without its paired
//! assignment, and no card may carry two open assignments. Each transition
//! therefore runs in a single transaction with the status flip conditional on
//! the expected current status; when the flip affects zero rows the
//! transition lost a race and the whole transaction is rolled back. This
//! holds across processes because the conflict is resolved by the store,
//! not by an in-process lock.

use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::{
        assignment::{Assignment, AssignmentLogEntry},
        card::{Card, CardStatus},
    },
    repository::Repository,
};

/// Which branch a tap resolved to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TapAction {
    Assigned,
    Returned,
}

#[derive(Clone)]
pub struct LifecycleService {
    repository: Repository,
}

impl LifecycleService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Assign a card to a staff member by card id
    pub async fn assign_card(&self, card_id: i64, staff_name: &str) -> AppResult<Assignment> {
        let card = self.repository.cards.get_by_id(card_id).await?;
        self.assign(&card, staff_name).await
    }

    /// Assign a card to a staff member by tag uid
    pub async fn assign_by_uid(&self, uid: &str, staff_name: &str) -> AppResult<Assignment> {
        let card = self.repository.cards.get_by_uid(uid).await?;
        self.assign(&card, staff_name).await
    }

    async fn assign(&self, card: &Card, staff_name: &str) -> AppResult<Assignment> {
        let staff_name = staff_name.trim();
        if staff_name.is_empty() {
            return Err(AppError::InvalidInput(
                "Staff name is required for assignment".to_string(),
            ));
        }

        let mut tx = self.repository.pool.begin().await?;
        let flipped = self
            .repository
            .cards
            .set_status(&mut tx, card.id, CardStatus::Available, CardStatus::Assigned)
            .await?;
        if !flipped {
            // The card was not Available when the update ran; it was either
            // assigned or deleted in the meantime.
            return Err(AppError::InvalidState(format!(
                "Card {} is not available for assignment",
                card.uid
            )));
        }
        let assignment = self
            .repository
            .assignments
            .open(&mut tx, card.id, staff_name)
            .await?;
        tx.commit().await?;

        tracing::info!(
            card_uid = %card.uid,
            staff_name = %staff_name,
            assignment_id = assignment.id,
            "card assigned"
        );
        Ok(assignment)
    }

    /// Return a card by assignment id
    pub async fn return_assignment(&self, assignment_id: i64) -> AppResult<Assignment> {
        let assignment = self.repository.assignments.get_by_id(assignment_id).await?;
        let card_id = assignment.card_id.ok_or_else(|| {
            AppError::InvalidState(format!(
                "Assignment {} no longer references a card",
                assignment_id
            ))
        })?;
        let card = self.repository.cards.get_by_id(card_id).await?;
        self.finish_return(assignment, &card).await
    }

    /// Return a card by tag uid, resolving its open assignment
    pub async fn return_by_uid(&self, uid: &str) -> AppResult<Assignment> {
        let card = self.repository.cards.get_by_uid(uid).await?;
        let assignment = self.open_assignment_for(&card).await?;
        self.finish_return(assignment, &card).await
    }

    /// A physical tap: assigns when the card is available, returns it when
    /// assigned. The branch is decided by the current status, but the actual
    /// flip is conditional on that same status inside the transaction, so a
    /// second tap racing the first fails closed instead of applying twice.
    pub async fn tap_toggle(
        &self,
        uid: &str,
        staff_name: &str,
    ) -> AppResult<(TapAction, Assignment)> {
        let card = self.repository.cards.get_by_uid(uid).await?;
        match card.status {
            CardStatus::Available => {
                let assignment = self.assign(&card, staff_name).await?;
                Ok((TapAction::Assigned, assignment))
            }
            CardStatus::Assigned => {
                let assignment = self.open_assignment_for(&card).await?;
                let closed = self.finish_return(assignment, &card).await?;
                Ok((TapAction::Returned, closed))
            }
        }
    }

    /// Full assignment history joined with card fields, newest first
    pub async fn audit_log(&self) -> AppResult<Vec<AssignmentLogEntry>> {
        self.repository.assignments.log().await
    }

    /// Resolve the open assignment for a card addressed by uid. A card
    /// marked assigned with no open row means the registry and the ledger
    /// disagree; surface that rather than mask it as a plain miss.
    async fn open_assignment_for(&self, card: &Card) -> AppResult<Assignment> {
        match self.repository.assignments.find_open_by_card(card.id).await {
            Err(AppError::NotFound(_)) if card.status == CardStatus::Assigned => {
                Err(AppError::InvalidState(format!(
                    "Card {} is marked assigned but has no open assignment",
                    card.uid
                )))
            }
            other => other,
        }
    }

    /// Close the assignment and flip its card back to Available, as one
    /// transaction. The flip outcome is checked: the card update must land
    /// with the close or not at all.
    async fn finish_return(&self, assignment: Assignment, card: &Card) -> AppResult<Assignment> {
        let mut tx = self.repository.pool.begin().await?;
        let closed = self
            .repository
            .assignments
            .close(&mut tx, assignment.id)
            .await?;
        let flipped = self
            .repository
            .cards
            .set_status(&mut tx, card.id, CardStatus::Assigned, CardStatus::Available)
            .await?;
        if !flipped {
            return Err(AppError::InvalidState(format!(
                "Card {} is not in assigned status",
                card.uid
            )));
        }
        tx.commit().await?;

        tracing::info!(
            assignment_id = closed.id,
            card_uid = %card.uid,
            "card returned"
        );
        Ok(closed)
    }
}

//! Data models for Cardkeep

pub mod assignment;
pub mod card;

// Re-export commonly used types
pub use assignment::{Assignment, AssignmentLogEntry};
pub use card::{AssignedCard, Card, CardStatus, CreateCard};

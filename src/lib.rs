//! Cardkeep - Staff Access Card Tracking Server
//!
//! Tracks physical access cards loaned to staff: which cards exist, whether
//! each is currently checked out, and the full check-out/check-in history,
//! exposed over a REST JSON API.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

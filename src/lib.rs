//! Resa - Restaurant Booking Administration Server
//!
//! A REST JSON API for managing restaurant table bookings: triage of
//! incoming requests, a visitor directory, blocked dates for the
//! booking website, and staff notifications over Telegram.

use std::sync::Arc;

pub mod api;
pub mod bot;
pub mod config;
pub mod error;
pub mod models;
pub mod phone;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
    pub pool: sqlx::PgPool,
}

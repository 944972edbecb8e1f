//! API handlers for Resa REST endpoints

pub mod availability;
pub mod bookings;
pub mod disabled_dates;
pub mod health;
pub mod openapi;
pub mod visitors;

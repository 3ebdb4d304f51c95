//! Panchayat API Library
//!
//! HTTP handlers, middleware, services and application setup for the
//! content backend.

mod api_doc;
pub mod constants;
mod handlers;
pub mod middleware;
pub mod services;
pub mod setup;
mod telemetry;
pub mod utils;

pub mod auth;
pub mod error;
pub mod state;

pub use error::ErrorResponse;
pub use state::AppState;

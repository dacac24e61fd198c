//! Shared types for the Reserva client
//!
//! Common types used across the client crates: domain models, API
//! request/response DTOs, the response envelope, and form validation
//! schemas.

pub mod auth;
pub mod forms;
pub mod models;
pub mod response;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use auth::{LoginRequest, LoginResponse, RegisterRequest};
pub use models::{Booking, BookingPayload, Restaurant, RestaurantPayload, Role, User};
pub use response::{ApiResponse, ErrorBody};

//! Domain models mirrored from the reservation backend
//!
//! Records are plain serde structs matching the backend response shape;
//! `*Payload` structs are the create/update bodies.

pub mod booking;
pub mod restaurant;
pub mod user;

pub use booking::{Booking, BookingPayload};
pub use restaurant::{Restaurant, RestaurantPayload};
pub use user::{Role, User};

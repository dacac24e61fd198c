//! Booking Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Restaurant;

/// Booking entity; the restaurant comes embedded in the response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(rename = "_id")]
    pub id: String,
    pub booking_date: DateTime<Utc>,
    pub num_of_guests: u32,
    /// Owning user id
    pub user: String,
    pub restaurant: Restaurant,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Create/update booking payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingPayload {
    pub booking_date: DateTime<Utc>,
    pub num_of_guests: u32,
    pub created_at: DateTime<Utc>,
}

impl BookingPayload {
    pub fn new(booking_date: DateTime<Utc>, num_of_guests: u32) -> Self {
        Self {
            booking_date,
            num_of_guests,
            created_at: Utc::now(),
        }
    }

    /// Patch the date and guest count onto an existing record.
    pub fn apply_to(&self, booking: &mut Booking) {
        booking.booking_date = self.booking_date;
        booking.num_of_guests = self.num_of_guests;
    }
}

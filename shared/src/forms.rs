//! Form validation schemas
//!
//! One declarative schema per form. Validation runs synchronously before
//! submission; the first failing constraint per field produces the
//! user-visible message, and submission stays blocked while any field is
//! invalid. Constraints the derive cannot express (digit counts, numeric
//! parse, date parse) are custom functions next to the schemas.

use std::borrow::Cow;
use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::auth::{LoginRequest, RegisterRequest};
use crate::models::{BookingPayload, Restaurant, RestaurantPayload};

// ── Schemas ─────────────────────────────────────────────────────────

/// Login form: email + password
#[derive(Debug, Clone, Default, Validate)]
pub struct LoginForm {
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(custom(function = validate_login_password))]
    pub password: String,
}

impl LoginForm {
    pub fn to_request(&self) -> LoginRequest {
        LoginRequest {
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}

/// Register form: name, phone, email, password
#[derive(Debug, Clone, Default, Validate)]
pub struct RegisterForm {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: String,
    #[validate(custom(function = validate_register_phone))]
    pub phone: String,
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(custom(function = validate_register_password))]
    pub password: String,
}

impl RegisterForm {
    pub fn to_request(&self) -> RegisterRequest {
        RegisterRequest::new(&*self.name, &*self.email, &*self.phone, &*self.password)
    }
}

/// Restaurant create/edit form
#[derive(Debug, Clone, Default, Validate)]
pub struct RestaurantForm {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,
    #[validate(length(min = 1, message = "Food type is required"))]
    pub foodtype: String,
    #[validate(length(min = 1, message = "Province is required"))]
    pub province: String,
    #[validate(custom(function = validate_postalcode))]
    pub postalcode: String,
    #[validate(custom(function = validate_restaurant_tel))]
    pub tel: String,
    #[validate(url(message = "Picture must be a valid URL"))]
    pub picture: String,
}

impl RestaurantForm {
    /// Pre-fill the form from an existing record (edit mode).
    pub fn from_restaurant(restaurant: &Restaurant) -> Self {
        Self {
            name: restaurant.name.clone(),
            address: restaurant.address.clone(),
            foodtype: restaurant.foodtype.clone(),
            province: restaurant.province.clone(),
            postalcode: restaurant.postalcode.clone(),
            tel: restaurant.tel.clone().unwrap_or_default(),
            picture: restaurant.picture.clone(),
        }
    }

    pub fn to_payload(&self) -> RestaurantPayload {
        RestaurantPayload {
            name: self.name.clone(),
            foodtype: self.foodtype.clone(),
            address: self.address.clone(),
            province: self.province.clone(),
            postalcode: self.postalcode.clone(),
            tel: self.tel.clone(),
            picture: self.picture.clone(),
        }
    }
}

/// Booking form: date + guest count, both captured as text
#[derive(Debug, Clone, Validate)]
pub struct BookingForm {
    #[validate(custom(function = validate_booking_date))]
    pub booking_date: String,
    #[validate(custom(function = validate_guests))]
    pub num_of_guests: String,
}

impl Default for BookingForm {
    fn default() -> Self {
        Self {
            booking_date: String::new(),
            num_of_guests: "0".to_string(),
        }
    }
}

impl BookingForm {
    /// Build the wire payload. Returns `None` for unparseable input;
    /// callers validate first, so `None` only happens on a logic error.
    pub fn to_payload(&self) -> Option<BookingPayload> {
        let date = parse_booking_date(&self.booking_date)?;
        let guests: u32 = self.num_of_guests.trim().parse().ok().filter(|g| *g > 0)?;
        Some(BookingPayload::new(date, guests))
    }
}

// ── Custom constraints ──────────────────────────────────────────────

fn failure(message: &'static str) -> ValidationError {
    let mut error = ValidationError::new("invalid");
    error.message = Some(Cow::Borrowed(message));
    error
}

fn validate_login_password(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(failure("Password enter a valid password"));
    }
    if value.len() > 20 {
        return Err(failure("Password must be at most 20 characters"));
    }
    Ok(())
}

fn validate_register_password(value: &str) -> Result<(), ValidationError> {
    if value.len() < 6 {
        return Err(failure("Password must be at least 6 characters"));
    }
    if value.len() > 20 {
        return Err(failure("Password must be at most 20 characters"));
    }
    Ok(())
}

fn validate_register_phone(value: &str) -> Result<(), ValidationError> {
    if value.len() < 10 {
        return Err(failure("Phone number must be at least 10 digits"));
    }
    if value.len() > 15 {
        return Err(failure("Phone number must be at most 15 digits"));
    }
    if !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(failure("Phone number must contain only digits"));
    }
    Ok(())
}

fn validate_postalcode(value: &str) -> Result<(), ValidationError> {
    if value.len() != 5 || !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(failure("Postal code must be 5 digits"));
    }
    Ok(())
}

fn validate_restaurant_tel(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(failure("Phone number must be numeric"));
    }
    Ok(())
}

fn validate_booking_date(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(failure("Booking date is required"));
    }
    if parse_booking_date(value).is_none() {
        return Err(failure("Invalid date format"));
    }
    Ok(())
}

fn validate_guests(value: &str) -> Result<(), ValidationError> {
    match value.trim().parse::<i64>() {
        Ok(n) if n > 0 => Ok(()),
        _ => Err(failure("Invalid guest number")),
    }
}

// ── Helpers ─────────────────────────────────────────────────────────

/// Parse the booking date formats the forms accept: a bare date
/// (midnight UTC) or a date with minutes, `T` or space separated.
pub fn parse_booking_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    for fmt in ["%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt.and_utc());
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Run a schema and flatten failures to the first message per field.
pub fn check(form: &impl Validate) -> Result<(), HashMap<String, String>> {
    form.validate().map_err(|errors| first_messages(&errors))
}

/// Flatten `ValidationErrors` to the first message per field.
pub fn first_messages(errors: &ValidationErrors) -> HashMap<String, String> {
    errors
        .field_errors()
        .iter()
        .filter_map(|(field, errs)| {
            errs.first().map(|e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                (field.to_string(), message)
            })
        })
        .collect()
}

//! Typed endpoint calls
//!
//! One method per backend operation, all going through [`RestClient`]
//! and the `{data: T}` envelope.

use serde_json::Value;
use shared::{
    ApiResponse, Booking, BookingPayload, LoginRequest, LoginResponse, RegisterRequest,
    Restaurant, RestaurantPayload, User,
};

use crate::{ClientConfig, ClientError, ClientResult, RestClient, Session};

/// Typed API surface of the reservation backend
#[derive(Debug, Clone)]
pub struct Api {
    rest: RestClient,
}

impl Api {
    pub fn new(config: &ClientConfig, session: Session) -> Self {
        Self {
            rest: RestClient::new(config, session),
        }
    }

    pub fn session(&self) -> &Session {
        self.rest.session()
    }

    // ========== Auth ==========

    /// Login with email and password; the token is returned unwrapped
    pub async fn login(&self, request: &LoginRequest) -> ClientResult<LoginResponse> {
        self.rest.post("/auth/login", request).await
    }

    /// Register a new account; the backend answers with a bare success flag
    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<()> {
        let resp: ApiResponse<Value> = self.rest.post("/auth/register", request).await?;
        if resp.success {
            Ok(())
        } else {
            Err(ClientError::InvalidResponse(
                "Registration not acknowledged".to_string(),
            ))
        }
    }

    /// Get the current user profile
    pub async fn me(&self) -> ClientResult<User> {
        let resp: ApiResponse<User> = self.rest.get("/auth/me").await?;
        require_data(resp)
    }

    // ========== Restaurants ==========

    pub async fn list_restaurants(&self) -> ClientResult<Vec<Restaurant>> {
        let resp: ApiResponse<Vec<Restaurant>> = self.rest.get("/restaurants").await?;
        require_data(resp)
    }

    pub async fn get_restaurant(&self, id: &str) -> ClientResult<Restaurant> {
        let resp: ApiResponse<Restaurant> =
            self.rest.get(&format!("/restaurants/{id}")).await?;
        require_data(resp)
    }

    pub async fn create_restaurant(&self, payload: &RestaurantPayload) -> ClientResult<Restaurant> {
        let resp: ApiResponse<Restaurant> = self.rest.post("/restaurants", payload).await?;
        require_data(resp)
    }

    pub async fn update_restaurant(
        &self,
        id: &str,
        payload: &RestaurantPayload,
    ) -> ClientResult<()> {
        let _: ApiResponse<Value> = self
            .rest
            .put(&format!("/restaurants/{id}"), payload)
            .await?;
        Ok(())
    }

    pub async fn delete_restaurant(&self, id: &str) -> ClientResult<()> {
        let _: ApiResponse<Value> = self.rest.delete(&format!("/restaurants/{id}")).await?;
        Ok(())
    }

    // ========== Bookings ==========

    /// Create a booking scoped to a restaurant and the current user
    pub async fn create_booking(
        &self,
        restaurant_id: &str,
        payload: &BookingPayload,
    ) -> ClientResult<()> {
        let _: ApiResponse<Value> = self
            .rest
            .post(&format!("/restaurants/{restaurant_id}/bookings"), payload)
            .await?;
        Ok(())
    }

    /// List bookings; the backend scopes the set to the caller's role
    pub async fn list_bookings(&self) -> ClientResult<Vec<Booking>> {
        let resp: ApiResponse<Vec<Booking>> = self.rest.get("/bookings").await?;
        require_data(resp)
    }

    pub async fn update_booking(&self, id: &str, payload: &BookingPayload) -> ClientResult<()> {
        let _: ApiResponse<Value> = self.rest.put(&format!("/bookings/{id}"), payload).await?;
        Ok(())
    }

    pub async fn delete_booking(&self, id: &str) -> ClientResult<()> {
        let _: ApiResponse<Value> = self.rest.delete(&format!("/bookings/{id}")).await?;
        Ok(())
    }
}

fn require_data<T>(resp: ApiResponse<T>) -> ClientResult<T> {
    resp.data
        .ok_or_else(|| ClientError::InvalidResponse("Missing response data".to_string()))
}

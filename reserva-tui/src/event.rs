//! Screen commands and API events
//!
//! Screens never touch the network directly: they return [`Command`]s,
//! the app dispatches the API calls onto the runtime, and each completed
//! call comes back to the UI loop as an [`ApiEvent`] over the channel.

use reserva_client::{Api, ClientError};
use shared::{
    Booking, BookingPayload, LoginRequest, LoginResponse, RegisterRequest, Restaurant,
    RestaurantPayload, User,
};
use tokio::sync::mpsc::UnboundedSender;

/// Screen switch targets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Restaurants,
    RestaurantDetail(String),
    Manage,
    Bookings,
}

/// Result of a completed API call, delivered back to the UI loop
#[derive(Debug)]
pub enum ApiEvent {
    SessionLoaded(Result<User, ClientError>),
    LoggedIn(Result<LoginResponse, ClientError>),
    Registered(Result<(), ClientError>),
    RestaurantsLoaded(Result<Vec<Restaurant>, ClientError>),
    /// Background re-validation fetch after a mutation; never re-enters Loading
    RestaurantsRefreshed(Result<Vec<Restaurant>, ClientError>),
    RestaurantLoaded(Result<Restaurant, ClientError>),
    RestaurantCreated(Result<Restaurant, ClientError>),
    RestaurantUpdated {
        id: String,
        payload: RestaurantPayload,
        result: Result<(), ClientError>,
    },
    RestaurantDeleted {
        id: String,
        result: Result<(), ClientError>,
    },
    BookingCreated(Result<(), ClientError>),
    BookingsLoaded(Result<Vec<Booking>, ClientError>),
    BookingsRefreshed(Result<Vec<Booking>, ClientError>),
    BookingUpdated {
        id: String,
        payload: BookingPayload,
        result: Result<(), ClientError>,
    },
    BookingDeleted {
        id: String,
        result: Result<(), ClientError>,
    },
}

/// Effect a screen asks the app to perform
#[derive(Debug)]
pub enum Command {
    Api(ApiCall),
    SaveToken(String),
    Logout,
    Navigate(Route),
    Quit,
}

/// Network call to run on the runtime
#[derive(Debug)]
pub enum ApiCall {
    FetchMe,
    Login(LoginRequest),
    Register(RegisterRequest),
    LoadRestaurants,
    RefreshRestaurants,
    LoadRestaurant(String),
    CreateRestaurant(RestaurantPayload),
    UpdateRestaurant {
        id: String,
        payload: RestaurantPayload,
    },
    DeleteRestaurant(String),
    CreateBooking {
        restaurant_id: String,
        payload: BookingPayload,
    },
    LoadBookings,
    RefreshBookings,
    UpdateBooking {
        id: String,
        payload: BookingPayload,
    },
    DeleteBooking(String),
}

/// Spawn the call and deliver its result over the channel.
pub fn dispatch(api: Api, call: ApiCall, tx: UnboundedSender<ApiEvent>) {
    tokio::spawn(async move {
        let event = match call {
            ApiCall::FetchMe => ApiEvent::SessionLoaded(api.me().await),
            ApiCall::Login(req) => ApiEvent::LoggedIn(api.login(&req).await),
            ApiCall::Register(req) => ApiEvent::Registered(api.register(&req).await),
            ApiCall::LoadRestaurants => ApiEvent::RestaurantsLoaded(api.list_restaurants().await),
            ApiCall::RefreshRestaurants => {
                ApiEvent::RestaurantsRefreshed(api.list_restaurants().await)
            }
            ApiCall::LoadRestaurant(id) => {
                ApiEvent::RestaurantLoaded(api.get_restaurant(&id).await)
            }
            ApiCall::CreateRestaurant(payload) => {
                ApiEvent::RestaurantCreated(api.create_restaurant(&payload).await)
            }
            ApiCall::UpdateRestaurant { id, payload } => {
                let result = api.update_restaurant(&id, &payload).await;
                ApiEvent::RestaurantUpdated {
                    id,
                    payload,
                    result,
                }
            }
            ApiCall::DeleteRestaurant(id) => {
                let result = api.delete_restaurant(&id).await;
                ApiEvent::RestaurantDeleted { id, result }
            }
            ApiCall::CreateBooking {
                restaurant_id,
                payload,
            } => ApiEvent::BookingCreated(api.create_booking(&restaurant_id, &payload).await),
            ApiCall::LoadBookings => ApiEvent::BookingsLoaded(api.list_bookings().await),
            ApiCall::RefreshBookings => ApiEvent::BookingsRefreshed(api.list_bookings().await),
            ApiCall::UpdateBooking { id, payload } => {
                let result = api.update_booking(&id, &payload).await;
                ApiEvent::BookingUpdated {
                    id,
                    payload,
                    result,
                }
            }
            ApiCall::DeleteBooking(id) => {
                let result = api.delete_booking(&id).await;
                ApiEvent::BookingDeleted { id, result }
            }
        };
        let _ = tx.send(event);
    });
}

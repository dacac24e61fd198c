//! Screens
//!
//! One module per screen. Screens own their local state, react to keys
//! and completed API calls, and ask the app for effects via [`Command`].

use crossterm::event::KeyCode;
use reserva_client::Session;

use crate::event::{Command, Route};

pub mod booking_manage;
pub mod login;
pub mod register;
pub mod restaurant_detail;
pub mod restaurant_list;
pub mod restaurant_manage;

pub use booking_manage::BookingScreen;
pub use login::LoginScreen;
pub use register::RegisterScreen;
pub use restaurant_detail::RestaurantDetailScreen;
pub use restaurant_list::RestaurantListScreen;
pub use restaurant_manage::ManageScreen;

/// Navigation keys shared by the authenticated list screens.
///
/// Only usable where no text input has focus; the management entry is
/// offered to admins alone (the screen itself still re-checks).
pub fn global_nav(code: KeyCode, session: &Session) -> Option<Command> {
    match code {
        KeyCode::Char('q') => Some(Command::Quit),
        KeyCode::Char('h') => Some(Command::Navigate(Route::Restaurants)),
        KeyCode::Char('b') => Some(Command::Navigate(Route::Bookings)),
        KeyCode::Char('m') if session.is_admin() => Some(Command::Navigate(Route::Manage)),
        KeyCode::Char('o') => Some(Command::Logout),
        _ => None,
    }
}

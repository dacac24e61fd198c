//! Restaurant detail screen with the booking sub-form

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::*;
use reserva_client::Session;
use shared::Restaurant;
use shared::forms::{BookingForm, check};

use crate::event::{ApiCall, ApiEvent, Command, Route};
use crate::form::{FormField, FormState};
use crate::ui::{Remote, render_error, render_loading};

pub struct RestaurantDetailScreen {
    id: String,
    remote: Remote<Restaurant>,
    form: FormState,
    submitting: bool,
    error: Option<String>,
}

impl RestaurantDetailScreen {
    pub fn mount(id: String) -> (Self, Vec<Command>) {
        let commands = vec![Command::Api(ApiCall::LoadRestaurant(id.clone()))];
        (
            Self {
                id,
                remote: Remote::Loading,
                form: FormState::new(vec![
                    FormField::new("booking_date", "Booking Date"),
                    FormField::new("num_of_guests", "Guests").with_value("0"),
                ]),
                submitting: false,
                error: None,
            },
            commands,
        )
    }

    pub fn handle_key(&mut self, key: KeyEvent, _session: &Session) -> Vec<Command> {
        if key.code == KeyCode::Esc {
            return vec![Command::Navigate(Route::Restaurants)];
        }
        if self.submitting || self.remote.ready().is_none() {
            return Vec::new();
        }
        match key.code {
            KeyCode::Enter => self.submit(),
            _ => {
                self.form.handle_key(key);
                Vec::new()
            }
        }
    }

    fn submit(&mut self) -> Vec<Command> {
        self.form.clear_errors();
        let schema = BookingForm {
            booking_date: self.form.value("booking_date"),
            num_of_guests: self.form.value("num_of_guests"),
        };
        match check(&schema) {
            Err(messages) => {
                self.form.apply_errors(&messages);
                Vec::new()
            }
            Ok(()) => {
                let Some(payload) = schema.to_payload() else {
                    return Vec::new();
                };
                self.submitting = true;
                self.error = None;
                vec![Command::Api(ApiCall::CreateBooking {
                    restaurant_id: self.id.clone(),
                    payload,
                })]
            }
        }
    }

    pub fn handle_api(&mut self, event: ApiEvent) -> Vec<Command> {
        match event {
            ApiEvent::RestaurantLoaded(Ok(restaurant)) => {
                self.remote = Remote::Ready(restaurant);
                Vec::new()
            }
            ApiEvent::RestaurantLoaded(Err(err)) => {
                tracing::warn!(error = %err, "failed to load restaurant");
                self.remote = Remote::Error(
                    "Failed to load restaurant details. Please try again later.".to_string(),
                );
                Vec::new()
            }
            ApiEvent::BookingCreated(Ok(())) => vec![Command::Navigate(Route::Bookings)],
            ApiEvent::BookingCreated(Err(err)) => {
                self.submitting = false;
                if err.is_booking_limit() {
                    self.error = Some("You have already made 3 bookings.".to_string());
                } else {
                    tracing::warn!(error = %err, "booking failed");
                    self.error = Some(
                        "Failed to book the restaurant. Please try again later.".to_string(),
                    );
                }
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    pub fn view(&self, f: &mut Frame, area: Rect, _session: &Session) {
        match &self.remote {
            Remote::Loading => render_loading(f, area),
            Remote::Error(message) => render_error(f, area, message),
            Remote::Ready(restaurant) => {
                let rows = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Length(8), Constraint::Min(6)])
                    .split(area);

                let mut lines = vec![
                    Line::from(Span::styled(
                        restaurant.name.clone(),
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    )),
                    Line::from(format!("Address:     {}", restaurant.address)),
                    Line::from(format!("Province:    {}", restaurant.province)),
                    Line::from(format!("Postal Code: {}", restaurant.postalcode)),
                    Line::from(format!("Food Type:   {}", restaurant.foodtype)),
                ];
                if let Some(tel) = &restaurant.tel {
                    lines.push(Line::from(format!("Tel:         {tel}")));
                }
                let details = Paragraph::new(lines).block(
                    Block::default()
                        .title(" Restaurant ")
                        .borders(Borders::ALL),
                );
                f.render_widget(details, rows[0]);

                self.form.render_dialog(
                    f,
                    rows[1],
                    "Book",
                    self.submitting,
                    self.error.as_deref(),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use reserva_client::ClientError;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ready_screen() -> RestaurantDetailScreen {
        let (mut screen, _) = RestaurantDetailScreen::mount("r1".into());
        screen.handle_api(ApiEvent::RestaurantLoaded(Ok(Restaurant {
            id: "r1".into(),
            name: "Thai Garden".into(),
            foodtype: "Thai".into(),
            address: "1 Main Rd".into(),
            province: "Bangkok".into(),
            postalcode: "10110".into(),
            tel: None,
            picture: "https://example.com/p.jpg".into(),
        })));
        screen
    }

    fn set_field(screen: &mut RestaurantDetailScreen, name: &str, value: &str) {
        while screen.form.fields[screen.form.focus].name != name {
            screen.form.focus_next();
        }
        screen.form.fields[screen.form.focus].input.reset();
        for c in value.chars() {
            screen.handle_key(key(KeyCode::Char(c)), &Session::new());
        }
    }

    #[test]
    fn default_guest_count_is_rejected_before_any_call() {
        let mut screen = ready_screen();
        set_field(&mut screen, "booking_date", "2026-09-01");
        let commands = screen.handle_key(key(KeyCode::Enter), &Session::new());
        assert!(commands.is_empty());
        assert!(!screen.submitting);
        let guests = screen
            .form
            .fields
            .iter()
            .find(|f| f.name == "num_of_guests")
            .unwrap();
        assert_eq!(guests.error.as_deref(), Some("Invalid guest number"));
    }

    #[test]
    fn valid_form_books_the_scoped_restaurant() {
        let mut screen = ready_screen();
        set_field(&mut screen, "booking_date", "2026-09-01");
        set_field(&mut screen, "num_of_guests", "4");
        let commands = screen.handle_key(key(KeyCode::Enter), &Session::new());
        match commands.as_slice() {
            [Command::Api(ApiCall::CreateBooking {
                restaurant_id,
                payload,
            })] => {
                assert_eq!(restaurant_id, "r1");
                assert_eq!(payload.num_of_guests, 4);
            }
            other => panic!("unexpected commands: {other:?}"),
        }
        assert!(screen.submitting);
    }

    #[test]
    fn booking_cap_shows_the_exact_message_and_stays() {
        let mut screen = ready_screen();
        set_field(&mut screen, "booking_date", "2026-09-01");
        set_field(&mut screen, "num_of_guests", "2");
        screen.handle_key(key(KeyCode::Enter), &Session::new());

        let commands = screen.handle_api(ApiEvent::BookingCreated(Err(ClientError::Rejected {
            code: None,
            message: "The user with ID u1 has already made 3 bookings".into(),
        })));
        assert!(commands.is_empty(), "must not navigate away");
        assert!(!screen.submitting);
        assert_eq!(
            screen.error.as_deref(),
            Some("You have already made 3 bookings.")
        );
    }

    #[test]
    fn other_booking_failures_show_the_generic_message() {
        let mut screen = ready_screen();
        let commands = screen.handle_api(ApiEvent::BookingCreated(Err(ClientError::Internal(
            "boom".into(),
        ))));
        assert!(commands.is_empty());
        assert_eq!(
            screen.error.as_deref(),
            Some("Failed to book the restaurant. Please try again later.")
        );
    }

    #[test]
    fn successful_booking_navigates_to_the_booking_list() {
        let mut screen = ready_screen();
        let commands = screen.handle_api(ApiEvent::BookingCreated(Ok(())));
        assert!(matches!(
            commands.as_slice(),
            [Command::Navigate(Route::Bookings)]
        ));
    }
}

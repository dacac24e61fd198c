//! Booking management screen
//!
//! Lists whatever set the backend returns for the caller (admins see
//! every booking, users their own) and edits/deletes through the shared
//! dialog. Mutations patch the list in place and trigger a silent
//! background re-fetch.

use std::collections::HashSet;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::*;
use reserva_client::Session;
use shared::Booking;
use shared::forms::{BookingForm, check};

use crate::event::{ApiCall, ApiEvent, Command, Route};
use crate::form::{FormField, FormState};
use crate::screens::global_nav;
use crate::ui::{Remote, render_empty, render_error, render_hints, render_loading};

struct BookingDialog {
    /// Booking id when editing; `None` is the create path
    editing: Option<String>,
    form: FormState,
    submitting: bool,
    error: Option<String>,
}

impl BookingDialog {
    fn create() -> Self {
        Self {
            editing: None,
            form: FormState::new(vec![
                FormField::new("booking_date", "Date"),
                FormField::new("num_of_guests", "Guests"),
                FormField::new("restaurant_id", "Restaurant ID"),
            ]),
            submitting: false,
            error: None,
        }
    }

    fn edit(booking: &Booking) -> Self {
        Self {
            editing: Some(booking.id.clone()),
            form: FormState::new(vec![
                FormField::new("booking_date", "Date")
                    .with_value(booking.booking_date.format("%Y-%m-%dT%H:%M").to_string()),
                FormField::new("num_of_guests", "Guests")
                    .with_value(booking.num_of_guests.to_string()),
            ]),
            submitting: false,
            error: None,
        }
    }

    fn title(&self) -> &'static str {
        if self.editing.is_some() {
            "Edit Booking"
        } else {
            "Create Booking"
        }
    }
}

pub struct BookingScreen {
    remote: Remote<Vec<Booking>>,
    selected: usize,
    dialog: Option<BookingDialog>,
    deleting: HashSet<String>,
}

impl BookingScreen {
    pub fn mount() -> (Self, Vec<Command>) {
        (
            Self {
                remote: Remote::Loading,
                selected: 0,
                dialog: None,
                deleting: HashSet::new(),
            },
            vec![Command::Api(ApiCall::LoadBookings)],
        )
    }

    pub fn handle_key(&mut self, key: KeyEvent, session: &Session) -> Vec<Command> {
        if let Some(dialog) = &mut self.dialog {
            if dialog.submitting {
                return Vec::new();
            }
            return match key.code {
                KeyCode::Esc => {
                    self.dialog = None;
                    Vec::new()
                }
                KeyCode::Enter => self.submit_dialog(),
                _ => {
                    dialog.form.handle_key(key);
                    Vec::new()
                }
            };
        }

        if let Some(bookings) = self.remote.ready() {
            match key.code {
                KeyCode::Up => {
                    self.selected = self.selected.saturating_sub(1);
                    return Vec::new();
                }
                KeyCode::Down => {
                    if self.selected + 1 < bookings.len() {
                        self.selected += 1;
                    }
                    return Vec::new();
                }
                KeyCode::Char('n') => {
                    self.dialog = Some(BookingDialog::create());
                    return Vec::new();
                }
                KeyCode::Char('e') => {
                    if let Some(booking) = bookings.get(self.selected) {
                        self.dialog = Some(BookingDialog::edit(booking));
                    }
                    return Vec::new();
                }
                KeyCode::Char('d') => {
                    if let Some(booking) = bookings.get(self.selected)
                        && !self.deleting.contains(&booking.id)
                    {
                        self.deleting.insert(booking.id.clone());
                        return vec![Command::Api(ApiCall::DeleteBooking(booking.id.clone()))];
                    }
                    return Vec::new();
                }
                KeyCode::Esc => return vec![Command::Navigate(Route::Restaurants)],
                _ => {}
            }
        }
        global_nav(key.code, session).into_iter().collect()
    }

    fn submit_dialog(&mut self) -> Vec<Command> {
        let Some(dialog) = &mut self.dialog else {
            return Vec::new();
        };
        dialog.form.clear_errors();
        let schema = BookingForm {
            booking_date: dialog.form.value("booking_date"),
            num_of_guests: dialog.form.value("num_of_guests"),
        };
        let mut messages = match check(&schema) {
            Err(messages) => messages,
            Ok(()) => Default::default(),
        };
        let restaurant_id = dialog.form.value("restaurant_id");
        if dialog.editing.is_none() && restaurant_id.trim().is_empty() {
            messages.insert(
                "restaurant_id".to_string(),
                "Restaurant id is required".to_string(),
            );
        }
        if !messages.is_empty() {
            dialog.form.apply_errors(&messages);
            return Vec::new();
        }

        let Some(payload) = schema.to_payload() else {
            return Vec::new();
        };
        dialog.submitting = true;
        dialog.error = None;
        match &dialog.editing {
            Some(id) => vec![Command::Api(ApiCall::UpdateBooking {
                id: id.clone(),
                payload,
            })],
            None => vec![Command::Api(ApiCall::CreateBooking {
                restaurant_id,
                payload,
            })],
        }
    }

    fn clamp_selection(&mut self) {
        if let Some(bookings) = self.remote.ready() {
            self.selected = self.selected.min(bookings.len().saturating_sub(1));
        }
    }

    pub fn handle_api(&mut self, event: ApiEvent) -> Vec<Command> {
        match event {
            ApiEvent::BookingsLoaded(Ok(bookings)) => {
                self.remote = Remote::Ready(bookings);
                self.selected = 0;
                Vec::new()
            }
            ApiEvent::BookingsLoaded(Err(err)) => {
                tracing::warn!(error = %err, "failed to load bookings");
                self.remote =
                    Remote::Error("Failed to load bookings. Please try again later.".to_string());
                Vec::new()
            }
            ApiEvent::BookingsRefreshed(Ok(bookings)) => {
                if let Some(data) = self.remote.ready_mut() {
                    *data = bookings;
                    self.clamp_selection();
                }
                Vec::new()
            }
            ApiEvent::BookingsRefreshed(Err(err)) => {
                tracing::warn!(error = %err, "background refresh failed");
                Vec::new()
            }
            ApiEvent::BookingUpdated {
                id,
                payload,
                result,
            } => match result {
                Ok(()) => {
                    if let Some(data) = self.remote.ready_mut()
                        && let Some(entry) = data.iter_mut().find(|b| b.id == id)
                    {
                        payload.apply_to(entry);
                    }
                    self.dialog = None;
                    vec![Command::Api(ApiCall::RefreshBookings)]
                }
                Err(err) => {
                    tracing::warn!(error = %err, "failed to update booking");
                    if let Some(dialog) = &mut self.dialog {
                        dialog.submitting = false;
                    }
                    Vec::new()
                }
            },
            ApiEvent::BookingCreated(result) => match result {
                Ok(()) => {
                    self.dialog = None;
                    vec![Command::Api(ApiCall::RefreshBookings)]
                }
                Err(err) => {
                    if let Some(dialog) = &mut self.dialog {
                        dialog.submitting = false;
                        dialog.error = Some(if err.is_booking_limit() {
                            "You have already made 3 bookings.".to_string()
                        } else {
                            "Failed to book the restaurant. Please try again later.".to_string()
                        });
                    }
                    Vec::new()
                }
            },
            ApiEvent::BookingDeleted { id, result } => {
                self.deleting.remove(&id);
                match result {
                    Ok(()) => {
                        if let Some(data) = self.remote.ready_mut() {
                            data.retain(|b| b.id != id);
                        }
                        self.clamp_selection();
                        vec![Command::Api(ApiCall::RefreshBookings)]
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "failed to delete booking");
                        Vec::new()
                    }
                }
            }
            _ => Vec::new(),
        }
    }

    pub fn view(&self, f: &mut Frame, area: Rect, session: &Session) {
        let title = if session.is_admin() {
            " All Bookings "
        } else {
            " Your Booking "
        };

        match &self.remote {
            Remote::Loading => render_loading(f, area),
            Remote::Error(message) => render_error(f, area, message),
            Remote::Ready(bookings) if bookings.is_empty() => {
                render_empty(f, area, "No bookings found")
            }
            Remote::Ready(bookings) => {
                let rows = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(1), Constraint::Length(1)])
                    .split(area);

                let items: Vec<ListItem> = bookings
                    .iter()
                    .enumerate()
                    .map(|(i, booking)| {
                        let marker = if i == self.selected { "> " } else { "  " };
                        let date = booking
                            .booking_date
                            .format("%d %B %Y %H:%M")
                            .to_string();
                        let guests = if booking.num_of_guests == 1 {
                            "1 guest".to_string()
                        } else {
                            format!("{} guests", booking.num_of_guests)
                        };
                        let mut header = vec![
                            Span::raw(marker),
                            Span::styled(date, Style::default().add_modifier(Modifier::BOLD)),
                        ];
                        if self.deleting.contains(&booking.id) {
                            header.push(Span::styled(
                                "  deleting...",
                                Style::default().fg(Color::Red),
                            ));
                        }
                        let mut lines = vec![
                            Line::from(header),
                            Line::from(format!(
                                "    {} @ {}",
                                guests, booking.restaurant.name
                            )),
                        ];
                        if session.is_admin() {
                            lines.push(Line::from(Span::styled(
                                format!("    User ID: {}", booking.user),
                                Style::default().fg(Color::DarkGray),
                            )));
                        }
                        lines.push(Line::from(Span::raw(" ")));
                        ListItem::new(lines)
                    })
                    .collect();

                let list = List::new(items).block(
                    Block::default()
                        .title(format!("{title}({})", bookings.len()))
                        .borders(Borders::ALL),
                );
                f.render_widget(list, rows[0]);
                render_hints(
                    f,
                    rows[1],
                    "n new | e edit | d delete | h home | o logout | q quit",
                );
            }
        }

        if let Some(dialog) = &self.dialog {
            dialog.form.render_dialog(
                f,
                area,
                dialog.title(),
                dialog.submitting,
                dialog.error.as_deref(),
            );
        }
    }
}

//! Restaurant list screen
//!
//! The landing screen: every signed-in user browses the restaurants
//! here and opens one to book it.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::*;
use reserva_client::Session;
use shared::Restaurant;

use crate::event::{ApiCall, ApiEvent, Command, Route};
use crate::screens::global_nav;
use crate::ui::{Remote, render_empty, render_error, render_hints, render_loading};

pub struct RestaurantListScreen {
    remote: Remote<Vec<Restaurant>>,
    selected: usize,
}

impl RestaurantListScreen {
    pub fn mount() -> (Self, Vec<Command>) {
        (
            Self {
                remote: Remote::Loading,
                selected: 0,
            },
            vec![Command::Api(ApiCall::LoadRestaurants)],
        )
    }

    pub fn handle_key(&mut self, key: KeyEvent, session: &Session) -> Vec<Command> {
        if let Some(restaurants) = self.remote.ready() {
            match key.code {
                KeyCode::Up => {
                    self.selected = self.selected.saturating_sub(1);
                    return Vec::new();
                }
                KeyCode::Down => {
                    if self.selected + 1 < restaurants.len() {
                        self.selected += 1;
                    }
                    return Vec::new();
                }
                KeyCode::Enter => {
                    if let Some(restaurant) = restaurants.get(self.selected) {
                        return vec![Command::Navigate(Route::RestaurantDetail(
                            restaurant.id.clone(),
                        ))];
                    }
                    return Vec::new();
                }
                _ => {}
            }
        }
        // Loading and Error states react to navigation only; a failed
        // load issues no further calls until the screen is re-entered.
        global_nav(key.code, session).into_iter().collect()
    }

    pub fn handle_api(&mut self, event: ApiEvent) -> Vec<Command> {
        match event {
            ApiEvent::RestaurantsLoaded(Ok(restaurants)) => {
                self.remote = Remote::Ready(restaurants);
                self.selected = 0;
            }
            ApiEvent::RestaurantsLoaded(Err(err)) => {
                tracing::warn!(error = %err, "failed to load restaurants");
                self.remote = Remote::Error(
                    "Failed to load restaurants. Please try again later.".to_string(),
                );
            }
            _ => {}
        }
        Vec::new()
    }

    pub fn view(&self, f: &mut Frame, area: Rect, session: &Session) {
        match &self.remote {
            Remote::Loading => render_loading(f, area),
            Remote::Error(message) => render_error(f, area, message),
            Remote::Ready(restaurants) if restaurants.is_empty() => {
                render_empty(f, area, "No restaurants found")
            }
            Remote::Ready(restaurants) => {
                let rows = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(1), Constraint::Length(1)])
                    .split(area);

                let items: Vec<ListItem> = restaurants
                    .iter()
                    .enumerate()
                    .map(|(i, restaurant)| {
                        let marker = if i == self.selected { "> " } else { "  " };
                        let mut lines = vec![
                            Line::from(vec![
                                Span::raw(marker),
                                Span::styled(
                                    restaurant.name.clone(),
                                    Style::default()
                                        .fg(Color::Yellow)
                                        .add_modifier(Modifier::BOLD),
                                ),
                            ]),
                            Line::from(vec![
                                Span::raw("    "),
                                Span::styled(
                                    restaurant.foodtype.clone(),
                                    Style::default().fg(Color::Green),
                                ),
                            ]),
                        ];
                        if let Some(tel) = &restaurant.tel {
                            lines.push(Line::from(vec![
                                Span::raw("    Tel: "),
                                Span::styled(tel.clone(), Style::default().fg(Color::Blue)),
                            ]));
                        }
                        lines.push(Line::from(Span::raw(" ")));
                        ListItem::new(lines)
                    })
                    .collect();

                let list = List::new(items).block(
                    Block::default()
                        .title(format!(" Restaurants ({}) ", restaurants.len()))
                        .borders(Borders::ALL),
                );
                f.render_widget(list, rows[0]);
                // The management entry only exists for admins.
                let hints = if session.is_admin() {
                    "Enter open | b bookings | m manage | o logout | q quit"
                } else {
                    "Enter open | b bookings | o logout | q quit"
                };
                render_hints(f, rows[1], hints);
            }
        }
    }
}

//! Restaurant management screen (admin CRUD)

use std::collections::HashSet;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::*;
use reserva_client::Session;
use shared::Restaurant;
use shared::forms::{RestaurantForm, check};

use crate::event::{ApiCall, ApiEvent, Command, Route};
use crate::form::{FormField, FormState};
use crate::screens::global_nav;
use crate::ui::{Remote, render_empty, render_error, render_hints, render_loading};

enum DialogMode {
    Create,
    Edit { id: String },
}

struct RestaurantDialog {
    mode: DialogMode,
    form: FormState,
    submitting: bool,
}

impl RestaurantDialog {
    fn create() -> Self {
        Self {
            mode: DialogMode::Create,
            form: restaurant_fields(None),
            submitting: false,
        }
    }

    fn edit(restaurant: &Restaurant) -> Self {
        Self {
            mode: DialogMode::Edit {
                id: restaurant.id.clone(),
            },
            form: restaurant_fields(Some(restaurant)),
            submitting: false,
        }
    }

    fn title(&self) -> &'static str {
        match self.mode {
            DialogMode::Create => "Add New Restaurant",
            DialogMode::Edit { .. } => "Edit Restaurant",
        }
    }
}

fn restaurant_fields(prefill: Option<&Restaurant>) -> FormState {
    let value = |f: fn(&Restaurant) -> String| prefill.map(f).unwrap_or_default();
    FormState::new(vec![
        FormField::new("name", "Name").with_value(value(|r| r.name.clone())),
        FormField::new("address", "Address").with_value(value(|r| r.address.clone())),
        FormField::new("foodtype", "Food Type").with_value(value(|r| r.foodtype.clone())),
        FormField::new("province", "Province").with_value(value(|r| r.province.clone())),
        FormField::new("postalcode", "Postal Code").with_value(value(|r| r.postalcode.clone())),
        FormField::new("tel", "Telephone")
            .with_value(value(|r| r.tel.clone().unwrap_or_default())),
        FormField::new("picture", "Picture").with_value(value(|r| r.picture.clone())),
    ])
}

/// Admin-only CRUD over the restaurant records. Mutations patch the
/// local list in place and trigger a silent background re-fetch.
pub struct ManageScreen {
    denied: bool,
    remote: Remote<Vec<Restaurant>>,
    selected: usize,
    dialog: Option<RestaurantDialog>,
    deleting: HashSet<String>,
}

impl ManageScreen {
    pub fn mount(session: &Session) -> (Self, Vec<Command>) {
        // Non-admin visitors get the denial view and nothing is fetched.
        if !session.is_admin() {
            return (
                Self {
                    denied: true,
                    remote: Remote::Ready(Vec::new()),
                    selected: 0,
                    dialog: None,
                    deleting: HashSet::new(),
                },
                Vec::new(),
            );
        }
        (
            Self {
                denied: false,
                remote: Remote::Loading,
                selected: 0,
                dialog: None,
                deleting: HashSet::new(),
            },
            vec![Command::Api(ApiCall::LoadRestaurants)],
        )
    }

    pub fn handle_key(&mut self, key: KeyEvent, session: &Session) -> Vec<Command> {
        if self.denied {
            return match key.code {
                KeyCode::Esc => vec![Command::Navigate(Route::Restaurants)],
                code => global_nav(code, session).into_iter().collect(),
            };
        }

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
                KeyCode::Char('n') => {
                    self.dialog = Some(RestaurantDialog::create());
                    return Vec::new();
                }
                KeyCode::Char('e') => {
                    if let Some(restaurant) = restaurants.get(self.selected) {
                        self.dialog = Some(RestaurantDialog::edit(restaurant));
                    }
                    return Vec::new();
                }
                KeyCode::Char('d') => {
                    if let Some(restaurant) = restaurants.get(self.selected)
                        && !self.deleting.contains(&restaurant.id)
                    {
                        self.deleting.insert(restaurant.id.clone());
                        return vec![Command::Api(ApiCall::DeleteRestaurant(
                            restaurant.id.clone(),
                        ))];
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
        let schema = RestaurantForm {
            name: dialog.form.value("name"),
            address: dialog.form.value("address"),
            foodtype: dialog.form.value("foodtype"),
            province: dialog.form.value("province"),
            postalcode: dialog.form.value("postalcode"),
            tel: dialog.form.value("tel"),
            picture: dialog.form.value("picture"),
        };
        match check(&schema) {
            Err(messages) => {
                dialog.form.apply_errors(&messages);
                Vec::new()
            }
            Ok(()) => {
                dialog.submitting = true;
                let payload = schema.to_payload();
                match &dialog.mode {
                    DialogMode::Create => {
                        vec![Command::Api(ApiCall::CreateRestaurant(payload))]
                    }
                    DialogMode::Edit { id } => vec![Command::Api(ApiCall::UpdateRestaurant {
                        id: id.clone(),
                        payload,
                    })],
                }
            }
        }
    }

    fn clamp_selection(&mut self) {
        if let Some(restaurants) = self.remote.ready() {
            self.selected = self.selected.min(restaurants.len().saturating_sub(1));
        }
    }

    pub fn handle_api(&mut self, event: ApiEvent) -> Vec<Command> {
        match event {
            ApiEvent::RestaurantsLoaded(Ok(restaurants)) => {
                self.remote = Remote::Ready(restaurants);
                self.selected = 0;
                Vec::new()
            }
            ApiEvent::RestaurantsLoaded(Err(err)) => {
                tracing::warn!(error = %err, "failed to load restaurants");
                self.remote = Remote::Error(
                    "Failed to load restaurant details. Please try again later.".to_string(),
                );
                Vec::new()
            }
            // Background re-validation: replace the ready data without
            // re-entering Loading.
            ApiEvent::RestaurantsRefreshed(Ok(restaurants)) => {
                if let Some(data) = self.remote.ready_mut() {
                    *data = restaurants;
                    self.clamp_selection();
                }
                Vec::new()
            }
            ApiEvent::RestaurantsRefreshed(Err(err)) => {
                tracing::warn!(error = %err, "background refresh failed");
                Vec::new()
            }
            ApiEvent::RestaurantCreated(Ok(restaurant)) => {
                if let Some(data) = self.remote.ready_mut() {
                    data.push(restaurant);
                }
                self.dialog = None;
                vec![Command::Api(ApiCall::RefreshRestaurants)]
            }
            ApiEvent::RestaurantCreated(Err(err)) => {
                tracing::warn!(error = %err, "failed to create restaurant");
                if let Some(dialog) = &mut self.dialog {
                    dialog.submitting = false;
                }
                Vec::new()
            }
            ApiEvent::RestaurantUpdated {
                id,
                payload,
                result,
            } => match result {
                Ok(()) => {
                    if let Some(data) = self.remote.ready_mut()
                        && let Some(entry) = data.iter_mut().find(|r| r.id == id)
                    {
                        payload.apply_to(entry);
                    }
                    self.dialog = None;
                    vec![Command::Api(ApiCall::RefreshRestaurants)]
                }
                Err(err) => {
                    tracing::warn!(error = %err, "failed to update restaurant");
                    if let Some(dialog) = &mut self.dialog {
                        dialog.submitting = false;
                    }
                    Vec::new()
                }
            },
            ApiEvent::RestaurantDeleted { id, result } => {
                self.deleting.remove(&id);
                match result {
                    Ok(()) => {
                        if let Some(data) = self.remote.ready_mut() {
                            data.retain(|r| r.id != id);
                        }
                        self.clamp_selection();
                        vec![Command::Api(ApiCall::RefreshRestaurants)]
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "failed to delete restaurant");
                        Vec::new()
                    }
                }
            }
            _ => Vec::new(),
        }
    }

    pub fn view(&self, f: &mut Frame, area: Rect, _session: &Session) {
        // The guard short-circuits rendering: nothing below it runs for
        // non-admin visitors.
        if self.denied {
            let denial = Paragraph::new("You have no permission")
                .style(Style::default().fg(Color::Red))
                .alignment(Alignment::Center)
                .block(
                    Block::default()
                        .title(" Restaurant Management ")
                        .borders(Borders::ALL),
                );
            f.render_widget(denial, area);
            return;
        }

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
                        let mut title = vec![
                            Span::raw(marker),
                            Span::styled(
                                restaurant.name.clone(),
                                Style::default()
                                    .fg(Color::Yellow)
                                    .add_modifier(Modifier::BOLD),
                            ),
                        ];
                        if self.deleting.contains(&restaurant.id) {
                            title.push(Span::styled(
                                "  deleting...",
                                Style::default().fg(Color::Red),
                            ));
                        }
                        let lines = vec![
                            Line::from(title),
                            Line::from(format!(
                                "    {} | {} - {}",
                                restaurant.foodtype, restaurant.province, restaurant.postalcode
                            )),
                            Line::from(format!("    {}", restaurant.address)),
                            Line::from(Span::raw(" ")),
                        ];
                        ListItem::new(lines)
                    })
                    .collect();

                let list = List::new(items).block(
                    Block::default()
                        .title(format!(" Restaurant Management ({}) ", restaurants.len()))
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
            dialog
                .form
                .render_dialog(f, area, dialog.title(), dialog.submitting, None);
        }
    }
}

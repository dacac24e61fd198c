//! Login screen

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::*;
use shared::forms::{LoginForm, check};

use crate::event::{ApiCall, ApiEvent, Command, Route};
use crate::form::{FormField, FormState};
use crate::ui::centered_rect;

pub struct LoginScreen {
    form: FormState,
    error: Option<String>,
    submitting: bool,
}

impl LoginScreen {
    pub fn new() -> Self {
        Self {
            form: FormState::new(vec![
                FormField::new("email", "Email"),
                FormField::new("password", "Password").masked(),
            ]),
            error: None,
            submitting: false,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Vec<Command> {
        if self.submitting {
            return Vec::new();
        }
        match key.code {
            KeyCode::Esc => vec![Command::Quit],
            KeyCode::F(2) => vec![Command::Navigate(Route::Register)],
            KeyCode::Enter => self.submit(),
            _ => {
                self.form.handle_key(key);
                Vec::new()
            }
        }
    }

    fn submit(&mut self) -> Vec<Command> {
        self.form.clear_errors();
        let schema = LoginForm {
            email: self.form.value("email"),
            password: self.form.value("password"),
        };
        match check(&schema) {
            Err(messages) => {
                self.form.apply_errors(&messages);
                Vec::new()
            }
            Ok(()) => {
                self.submitting = true;
                self.error = None;
                vec![Command::Api(ApiCall::Login(schema.to_request()))]
            }
        }
    }

    pub fn handle_api(&mut self, event: ApiEvent) -> Vec<Command> {
        match event {
            ApiEvent::LoggedIn(Ok(resp)) => {
                // Token first, then the profile fetch that completes the
                // session and routes to the restaurant list.
                vec![
                    Command::SaveToken(resp.token),
                    Command::Api(ApiCall::FetchMe),
                ]
            }
            ApiEvent::LoggedIn(Err(err)) => {
                tracing::warn!(error = %err, "login failed");
                self.submitting = false;
                self.error = Some("Something went wrong please try again later".to_string());
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    pub fn view(&self, f: &mut Frame, area: Rect) {
        let outer = centered_rect(50, 60, area);
        let block = Block::default()
            .title(" Restaurant Reservation ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(outer);
        f.render_widget(block, outer);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(5),
                Constraint::Length(1),
            ])
            .split(inner);

        let heading = Paragraph::new("Sign in to your account")
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center);
        f.render_widget(heading, rows[0]);

        self.form.render_dialog(
            f,
            rows[1],
            "Login",
            self.submitting,
            self.error.as_deref(),
        );

        let hint = Paragraph::new("Enter login | F2 register | Esc quit")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        f.render_widget(hint, rows[2]);
    }
}

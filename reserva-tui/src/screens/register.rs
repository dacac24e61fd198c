//! Register screen

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::*;
use shared::forms::{RegisterForm, check};

use crate::event::{ApiCall, ApiEvent, Command, Route};
use crate::form::{FormField, FormState};
use crate::ui::centered_rect;

pub struct RegisterScreen {
    form: FormState,
    error: Option<String>,
    submitting: bool,
}

impl RegisterScreen {
    pub fn new() -> Self {
        Self {
            form: FormState::new(vec![
                FormField::new("name", "Name"),
                FormField::new("phone", "Phone"),
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
            KeyCode::Esc | KeyCode::F(2) => vec![Command::Navigate(Route::Login)],
            KeyCode::Enter => self.submit(),
            _ => {
                self.form.handle_key(key);
                Vec::new()
            }
        }
    }

    fn submit(&mut self) -> Vec<Command> {
        self.form.clear_errors();
        let schema = RegisterForm {
            name: self.form.value("name"),
            phone: self.form.value("phone"),
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
                vec![Command::Api(ApiCall::Register(schema.to_request()))]
            }
        }
    }

    pub fn handle_api(&mut self, event: ApiEvent) -> Vec<Command> {
        match event {
            ApiEvent::Registered(Ok(())) => {
                tracing::info!("account created");
                vec![Command::Navigate(Route::Login)]
            }
            ApiEvent::Registered(Err(err)) => {
                tracing::warn!(error = %err, "registration failed");
                self.submitting = false;
                self.error = Some("Registration failed. Please try again.".to_string());
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    pub fn view(&self, f: &mut Frame, area: Rect) {
        let outer = centered_rect(50, 70, area);
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
                Constraint::Min(8),
                Constraint::Length(1),
            ])
            .split(inner);

        let heading = Paragraph::new("Create your account")
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center);
        f.render_widget(heading, rows[0]);

        self.form.render_dialog(
            f,
            rows[1],
            "Create Account",
            self.submitting,
            self.error.as_deref(),
        );

        let hint = Paragraph::new("Enter create account | F2 back to login")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        f.render_widget(hint, rows[2]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use reserva_client::ClientError;
    use shared::models::Role;

    fn type_str(screen: &mut RegisterScreen, text: &str) {
        for c in text.chars() {
            screen.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        }
    }

    fn fill(screen: &mut RegisterScreen, values: [&str; 4]) {
        for (i, value) in values.iter().enumerate() {
            type_str(screen, value);
            if i < values.len() - 1 {
                screen.handle_key(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE));
            }
        }
    }

    #[test]
    fn short_phone_blocks_submission() {
        let mut screen = RegisterScreen::new();
        fill(&mut screen, ["Alice", "0812", "a@b.com", "secret1"]);
        let commands = screen.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        assert!(commands.is_empty());
        assert_eq!(
            screen.form.fields[1].error.as_deref(),
            Some("Phone number must be at least 10 digits")
        );
    }

    #[test]
    fn valid_submission_registers_with_user_role() {
        let mut screen = RegisterScreen::new();
        fill(&mut screen, ["Alice", "0812345678", "a@b.com", "secret1"]);
        let commands = screen.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        match commands.as_slice() {
            [Command::Api(ApiCall::Register(req))] => {
                assert_eq!(req.name, "Alice");
                assert_eq!(req.tel, "0812345678");
                assert_eq!(req.role, Role::User);
            }
            other => panic!("unexpected commands: {other:?}"),
        }
    }

    #[test]
    fn success_routes_back_to_login() {
        let mut screen = RegisterScreen::new();
        let commands = screen.handle_api(ApiEvent::Registered(Ok(())));
        assert!(matches!(
            commands.as_slice(),
            [Command::Navigate(Route::Login)]
        ));
    }

    #[test]
    fn failure_shows_register_message() {
        let mut screen = RegisterScreen::new();
        fill(&mut screen, ["Alice", "0812345678", "a@b.com", "secret1"]);
        screen.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        screen.handle_api(ApiEvent::Registered(Err(ClientError::Internal(
            "boom".into(),
        ))));
        assert!(!screen.submitting);
        assert_eq!(
            screen.error.as_deref(),
            Some("Registration failed. Please try again.")
        );
    }
}

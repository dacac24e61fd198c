//! Application loop and screen router
//!
//! Single-threaded UI: keys and completed API calls are both handled on
//! the draw loop; network work runs on spawned tasks and reports back
//! over the channel.

use std::io::Stdout;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use ratatui::Terminal;
use ratatui::prelude::*;
use ratatui::widgets::*;
use reserva_client::{Api, ClientConfig, Session, TokenStorage};
use tokio::sync::mpsc;
use tui_logger::{TuiLoggerLevelOutput, TuiLoggerWidget, TuiWidgetState};

use crate::event::{ApiCall, ApiEvent, Command, Route, dispatch};
use crate::screens::{
    BookingScreen, LoginScreen, ManageScreen, RegisterScreen, RestaurantDetailScreen,
    RestaurantListScreen,
};

enum Screen {
    /// Session bootstrap in flight (stored token being exchanged for a
    /// profile)
    Booting,
    Login(LoginScreen),
    Register(RegisterScreen),
    Restaurants(RestaurantListScreen),
    Detail(RestaurantDetailScreen),
    Manage(ManageScreen),
    Bookings(BookingScreen),
}

pub struct App {
    api: Api,
    session: Session,
    storage: TokenStorage,
    screen: Screen,
    tx: mpsc::UnboundedSender<ApiEvent>,
    rx: mpsc::UnboundedReceiver<ApiEvent>,
    logger_state: TuiWidgetState,
    should_quit: bool,
}

impl App {
    pub fn new(config: ClientConfig) -> Self {
        let session = Session::new();
        let storage = TokenStorage::new(&config.data_dir);
        let api = Api::new(&config, session.clone());
        let (tx, rx) = mpsc::unbounded_channel();

        // Session bootstrap: a stored token is exchanged for the profile;
        // anything else goes straight to the login screen.
        let screen = if let Some(token) = storage.load() {
            session.set_token(token);
            dispatch(api.clone(), ApiCall::FetchMe, tx.clone());
            Screen::Booting
        } else {
            Screen::Login(LoginScreen::new())
        };

        Self {
            api,
            session,
            storage,
            screen,
            tx,
            rx,
            logger_state: TuiWidgetState::new(),
            should_quit: false,
        }
    }

    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            terminal.draw(|f| self.draw(f))?;

            if self.should_quit {
                return Ok(());
            }

            if event::poll(Duration::from_millis(100))?
                && let Event::Key(key) = event::read()?
                && matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat)
            {
                self.on_key(key);
            }

            while let Ok(api_event) = self.rx.try_recv() {
                self.on_api(api_event);
            }
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        let commands = match &mut self.screen {
            Screen::Booting => Vec::new(),
            Screen::Login(screen) => screen.handle_key(key),
            Screen::Register(screen) => screen.handle_key(key),
            Screen::Restaurants(screen) => screen.handle_key(key, &self.session),
            Screen::Detail(screen) => screen.handle_key(key, &self.session),
            Screen::Manage(screen) => screen.handle_key(key, &self.session),
            Screen::Bookings(screen) => screen.handle_key(key, &self.session),
        };
        self.run_commands(commands);
    }

    fn on_api(&mut self, api_event: ApiEvent) {
        // Session bootstrap is app-level: it completes both the cold
        // start and the post-login profile fetch.
        if let ApiEvent::SessionLoaded(result) = api_event {
            match result {
                Ok(user) => {
                    self.session.set_user(user);
                    if matches!(self.screen, Screen::Booting | Screen::Login(_)) {
                        self.navigate(Route::Restaurants);
                    }
                }
                Err(err) => {
                    tracing::warn!(error = %err, "session bootstrap failed");
                    self.navigate(Route::Login);
                }
            }
            return;
        }

        let commands = match &mut self.screen {
            Screen::Booting => Vec::new(),
            Screen::Login(screen) => screen.handle_api(api_event),
            Screen::Register(screen) => screen.handle_api(api_event),
            Screen::Restaurants(screen) => screen.handle_api(api_event),
            Screen::Detail(screen) => screen.handle_api(api_event),
            Screen::Manage(screen) => screen.handle_api(api_event),
            Screen::Bookings(screen) => screen.handle_api(api_event),
        };
        self.run_commands(commands);
    }

    fn run_commands(&mut self, commands: Vec<Command>) {
        for command in commands {
            match command {
                Command::Api(call) => dispatch(self.api.clone(), call, self.tx.clone()),
                Command::SaveToken(token) => {
                    if let Err(err) = self.storage.save(&token) {
                        tracing::warn!(error = %err, "failed to persist token");
                    }
                    self.session.set_token(token);
                }
                Command::Logout => {
                    if let Err(err) = self.storage.delete() {
                        tracing::warn!(error = %err, "failed to remove stored token");
                    }
                    self.session.clear();
                    self.navigate(Route::Login);
                }
                Command::Navigate(route) => self.navigate(route),
                Command::Quit => self.should_quit = true,
            }
        }
    }

    fn navigate(&mut self, route: Route) {
        let (screen, commands) = match route {
            Route::Login => (Screen::Login(LoginScreen::new()), Vec::new()),
            Route::Register => (Screen::Register(RegisterScreen::new()), Vec::new()),
            Route::Restaurants => {
                let (screen, commands) = RestaurantListScreen::mount();
                (Screen::Restaurants(screen), commands)
            }
            Route::RestaurantDetail(id) => {
                let (screen, commands) = RestaurantDetailScreen::mount(id);
                (Screen::Detail(screen), commands)
            }
            Route::Manage => {
                let (screen, commands) = ManageScreen::mount(&self.session);
                (Screen::Manage(screen), commands)
            }
            Route::Bookings => {
                let (screen, commands) = BookingScreen::mount();
                (Screen::Bookings(screen), commands)
            }
        };
        self.screen = screen;
        self.run_commands(commands);
    }

    fn draw(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(1),    // Screen
                Constraint::Length(7), // Logs
            ])
            .split(f.area());

        // Header: app title plus the signed-in identity
        let identity = match self.session.user() {
            Some(user) => format!(" {} ({:?}) ", user.name, user.role),
            None => " Not signed in ".to_string(),
        };
        let title = Paragraph::new(Line::from(vec![
            Span::styled(
                " Restaurant Reservation ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("|"),
            Span::styled(identity, Style::default().fg(Color::Green)),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );
        f.render_widget(title, chunks[0]);

        match &self.screen {
            Screen::Booting => crate::ui::render_loading(f, chunks[1]),
            Screen::Login(screen) => screen.view(f, chunks[1]),
            Screen::Register(screen) => screen.view(f, chunks[1]),
            Screen::Restaurants(screen) => screen.view(f, chunks[1], &self.session),
            Screen::Detail(screen) => screen.view(f, chunks[1], &self.session),
            Screen::Manage(screen) => screen.view(f, chunks[1], &self.session),
            Screen::Bookings(screen) => screen.view(f, chunks[1], &self.session),
        }

        let log_pane = TuiLoggerWidget::default()
            .block(
                Block::default()
                    .title(" Logs ")
                    .borders(Borders::ALL)
                    .border_style(
                        Style::default()
                            .fg(Color::White)
                            .add_modifier(Modifier::DIM),
                    ),
            )
            .output_separator('|')
            .output_timestamp(Some("%H:%M:%S".to_string()))
            .output_level(Some(TuiLoggerLevelOutput::Abbreviated))
            .output_target(false)
            .output_file(false)
            .output_line(false)
            .style(Style::default().fg(Color::White))
            .state(&self.logger_state);
        f.render_widget(log_pane, chunks[2]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::User;
    use shared::models::Role;
    use tempfile::TempDir;

    fn config(dir: &TempDir) -> ClientConfig {
        ClientConfig::new("http://localhost:5000/api/v1").with_data_dir(dir.path())
    }

    #[test]
    fn cold_start_without_a_token_opens_the_login_screen() {
        let dir = TempDir::new().unwrap();
        let app = App::new(config(&dir));
        assert!(matches!(app.screen, Screen::Login(_)));
        assert!(app.session.token().is_none());
    }

    #[tokio::test]
    async fn cold_start_with_a_stored_token_boots_the_session() {
        let dir = TempDir::new().unwrap();
        let storage = reserva_client::TokenStorage::new(dir.path());
        storage.save("t0").unwrap();

        let app = App::new(config(&dir));
        assert!(matches!(app.screen, Screen::Booting));
        assert_eq!(app.session.token().as_deref(), Some("t0"));
    }

    #[test]
    fn save_token_writes_storage_and_session() {
        let dir = TempDir::new().unwrap();
        let mut app = App::new(config(&dir));
        app.run_commands(vec![Command::SaveToken("t1".into())]);
        assert_eq!(app.session.token().as_deref(), Some("t1"));
        assert_eq!(app.storage.load().as_deref(), Some("t1"));
    }

    #[tokio::test]
    async fn session_loaded_routes_login_to_the_restaurant_list() {
        let dir = TempDir::new().unwrap();
        let mut app = App::new(config(&dir));
        app.on_api(ApiEvent::SessionLoaded(Ok(User {
            id: "u1".into(),
            name: "Alice".into(),
            email: "a@b.com".into(),
            tel: "0812345678".into(),
            role: Role::User,
        })));
        assert!(matches!(app.screen, Screen::Restaurants(_)));
        assert!(app.session.is_authenticated());
    }

    #[test]
    fn logout_clears_the_session_and_the_stored_token() {
        let dir = TempDir::new().unwrap();
        let mut app = App::new(config(&dir));
        app.run_commands(vec![Command::SaveToken("t1".into())]);
        app.session.set_user(User {
            id: "u1".into(),
            name: "Alice".into(),
            email: "a@b.com".into(),
            tel: "0812345678".into(),
            role: Role::Admin,
        });

        app.run_commands(vec![Command::Logout]);
        assert!(matches!(app.screen, Screen::Login(_)));
        assert!(app.session.token().is_none());
        assert!(!app.session.is_authenticated());
        assert!(!app.storage.exists());
    }

    #[test]
    fn quit_sets_the_flag() {
        let dir = TempDir::new().unwrap();
        let mut app = App::new(config(&dir));
        app.run_commands(vec![Command::Quit]);
        assert!(app.should_quit);
    }
}

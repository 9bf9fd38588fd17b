use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

use api_types::{
    Ack,
    auth::{Profile, SessionCreated},
};

use crate::{
    auth::{self, AuthForm, Session},
    client::{Client, ClientError},
    config::AppConfig,
    dashboard::{self, Collections, Dashboard, DraftKind, FieldEdit, InputKind, LoadTicket},
    error::{AppError, Result},
    local_state::{LocalState, ThemePreference},
    ui::{
        self,
        keymap::{AppAction, map_key},
    },
};

const TOAST_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct ToastState {
    pub message: String,
    pub level: ToastLevel,
    pub expires_at: Instant,
}

#[derive(Debug)]
pub struct AppState {
    pub session: Session,
    /// True until the startup session probe has answered.
    pub probing: bool,
    pub logging_out: bool,
    pub auth: AuthForm,
    pub dashboard: Dashboard,
    pub theme: ThemePreference,
    pub toast: Option<ToastState>,
    pub base_url: String,
}

impl AppState {
    fn toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(ToastState {
            message: message.into(),
            level,
            expires_at: Instant::now() + TOAST_TTL,
        });
    }

    fn expire_toast(&mut self, now: Instant) {
        if self.toast.as_ref().is_some_and(|toast| toast.expires_at <= now) {
            self.toast = None;
        }
    }
}

/// Completed network work, delivered back to the UI loop.
#[derive(Debug)]
pub enum Outcome {
    Probe(std::result::Result<Profile, ClientError>),
    Auth(std::result::Result<SessionCreated, ClientError>),
    LoggedOut(Session),
    Reload(LoadTicket, std::result::Result<Collections, ClientError>),
    Submitted(DraftKind, std::result::Result<Ack, ClientError>),
}

pub struct App {
    config: AppConfig,
    client: Client,
    local_state: LocalState,
    outcome_tx: UnboundedSender<Outcome>,
    outcome_rx: UnboundedReceiver<Outcome>,
    pub state: AppState,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let timeout = config.request_timeout_secs.map(Duration::from_secs);
        let client = Client::with_timeout(&config.base_url, timeout)?;
        let local_state = LocalState::load(&config.state_path)?;
        let (outcome_tx, outcome_rx) = unbounded_channel();

        let state = AppState {
            session: Session::Unauthenticated,
            probing: true,
            logging_out: false,
            auth: AuthForm::default(),
            dashboard: Dashboard::default(),
            theme: local_state.theme,
            toast: None,
            base_url: config.base_url.clone(),
        };

        Ok(Self {
            config,
            client,
            local_state,
            outcome_tx,
            outcome_rx,
            state,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(100);
        self.spawn_probe();

        while !self.should_quit {
            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            while let Ok(outcome) = self.outcome_rx.try_recv() {
                self.handle_outcome(outcome);
            }

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
                    _ => {}
                }
            }

            self.state.expire_toast(Instant::now());
            tokio::task::yield_now().await;
        }

        Ok(())
    }

    fn spawn_probe(&mut self) {
        self.state.probing = true;
        let client = self.client.clone();
        let tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let result = client.me().await;
            let _ = tx.send(Outcome::Probe(result));
        });
    }

    fn spawn_reload(&mut self) {
        let ticket = self.state.dashboard.begin_reload();
        let client = self.client.clone();
        let tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let result = dashboard::load_collections(&client).await;
            let _ = tx.send(Outcome::Reload(ticket, result));
        });
    }

    pub fn handle_outcome(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Probe(result) => {
                self.state.probing = false;
                if Session::from_probe(&result) == Session::Authenticated {
                    tracing::info!("existing session found");
                    self.enter_dashboard(result.ok());
                } else {
                    self.state.session = Session::Unauthenticated;
                }
            }
            Outcome::Auth(result) => {
                if self.state.auth.finish(result) == Session::Authenticated {
                    self.enter_dashboard(None);
                }
            }
            Outcome::LoggedOut(session) => {
                self.state.logging_out = false;
                self.state.session = session;
                self.state.dashboard.reset();
                self.state.auth = AuthForm::default();
            }
            Outcome::Reload(ticket, result) => {
                let error = result.as_ref().err().map(ToString::to_string);
                let applied = self.state.dashboard.apply_reload(ticket, result);
                if let (true, Some(error)) = (applied, error) {
                    self.state.toast(ToastLevel::Error, error);
                }
            }
            Outcome::Submitted(kind, _)
                if self.state.session != Session::Authenticated
                    || self.state.dashboard.submitting != Some(kind) =>
            {
                tracing::debug!(kind = kind.label(), "dropping submit from an ended session");
            }
            Outcome::Submitted(kind, result) => {
                if self.state.dashboard.finish_submit(kind, &result) {
                    let message = result
                        .ok()
                        .and_then(|ack| ack.message)
                        .unwrap_or_else(|| format!("Saved {}.", kind.label()));
                    self.state.toast(ToastLevel::Success, message);
                    self.spawn_reload();
                } else if let Err(err) = result {
                    self.state.toast(ToastLevel::Error, err.to_string());
                }
            }
        }
    }

    fn enter_dashboard(&mut self, profile: Option<Profile>) {
        self.state.session = Session::Authenticated;
        self.state.dashboard.reset();
        self.state.dashboard.profile = profile;
        self.spawn_reload();
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        let action = map_key(key);
        match action {
            AppAction::Quit => {
                self.should_quit = true;
                return;
            }
            AppAction::ToggleTheme => {
                self.toggle_theme();
                return;
            }
            AppAction::Cancel => {
                self.state.toast = None;
                return;
            }
            _ => {}
        }

        match self.state.session {
            Session::Unauthenticated => self.handle_auth_action(action),
            Session::Authenticated => self.handle_dashboard_action(action),
        }
    }

    fn handle_auth_action(&mut self, action: AppAction) {
        if action == AppAction::Submit {
            self.attempt_auth();
            return;
        }

        let form = &mut self.state.auth;
        match action {
            AppAction::ToggleAuthMode => form.toggle_mode(),
            AppAction::NextField | AppAction::Down => form.next_field(),
            AppAction::PrevField | AppAction::Up => form.prev_field(),
            AppAction::Backspace => form.backspace(),
            AppAction::Input(ch) => form.input(ch),
            _ => {}
        }
    }

    fn attempt_auth(&mut self) {
        if self.state.probing || self.state.auth.pending {
            return;
        }

        let credentials = match self.state.auth.credentials() {
            Ok(credentials) => credentials,
            Err(message) => {
                self.state.auth.error = Some(message);
                return;
            }
        };

        self.state.auth.error = None;
        self.state.auth.pending = true;
        let client = self.client.clone();
        let tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let result = credentials.submit(&client).await;
            let _ = tx.send(Outcome::Auth(result));
        });
    }

    fn handle_dashboard_action(&mut self, action: AppAction) {
        match action {
            AppAction::Submit => return self.submit_focused(),
            AppAction::Reload => return self.spawn_reload(),
            AppAction::Logout => return self.logout(),
            _ => {}
        }

        let selecting = self
            .state
            .dashboard
            .focus
            .is_some_and(|field| field.input() == InputKind::Select);
        let dashboard = &mut self.state.dashboard;

        match action {
            AppAction::NextTab => dashboard.set_tab(dashboard.tab.next()),
            AppAction::PrevTab => dashboard.set_tab(dashboard.tab.prev()),
            AppAction::NextField => dashboard.next_field(),
            AppAction::PrevField => dashboard.prev_field(),
            AppAction::Down if selecting => dashboard.edit_focused(FieldEdit::Next),
            AppAction::Up if selecting => dashboard.edit_focused(FieldEdit::Prev),
            AppAction::Down => dashboard.next_field(),
            AppAction::Up => dashboard.prev_field(),
            AppAction::Backspace => dashboard.edit_focused(FieldEdit::Pop),
            AppAction::Input(ch) => dashboard.edit_focused(FieldEdit::Push(ch)),
            _ => {}
        }
    }

    fn submit_focused(&mut self) {
        let Some(kind) = self.state.dashboard.focus.map(|field| field.kind()) else {
            return;
        };
        let Some(draft) = self.state.dashboard.start_submit(kind) else {
            self.state.toast(ToastLevel::Info, "Still saving, hold on.");
            return;
        };

        let client = self.client.clone();
        let tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let result = draft.submit(&client).await;
            let _ = tx.send(Outcome::Submitted(kind, result));
        });
    }

    fn logout(&mut self) {
        if self.state.logging_out {
            return;
        }
        self.state.logging_out = true;
        let client = self.client.clone();
        let tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let session = auth::logout(&client, auth::LOGOUT_WAIT).await;
            let _ = tx.send(Outcome::LoggedOut(session));
        });
    }

    fn toggle_theme(&mut self) {
        match self.local_state.toggle_theme(&self.config.state_path) {
            Ok(theme) => tracing::debug!(theme = theme.label(), "theme persisted"),
            Err(err) => {
                tracing::warn!("failed to persist theme: {err}");
                self.state.toast(ToastLevel::Error, format!("Theme not saved: {err}"));
            }
        }
        self.state.theme = self.local_state.theme;
    }
}

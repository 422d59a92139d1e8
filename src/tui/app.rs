//! Main TUI application state machine.
//!
//! Handles:
//! - Screen navigation between the dashboard and one mounted page
//! - Input event handling
//! - Non-blocking API calls via per-screen workers

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use crate::adapters::HttpPredictionApi;
use crate::application::{PageConfig, PredictionService, PredictionSession};
use crate::config::Config;
use crate::ports::PredictionApi;

use super::ui::{
    dashboard::{render_dashboard, BackendHealth, DashboardState},
    page::render_page,
    patient::PatientFormState,
    render_disclaimer,
};
use super::worker::{ApiEvent, ApiWorker};

/// Current screen/view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    Page,
}

/// Everything owned by a mounted prediction page.
///
/// Dropping it unmounts the page; the worker's receiver goes with it.
struct MountedPage {
    session: PredictionSession,
    form: PatientFormState,
    worker: ApiWorker,
}

/// Main application state
pub struct App<A = HttpPredictionApi>
where
    A: PredictionApi + 'static,
{
    /// Current screen
    screen: Screen,

    /// Whether the app should quit
    should_quit: bool,

    /// Shared with background calls
    service: Arc<PredictionService<A>>,

    /// Dashboard state
    dashboard_state: DashboardState,

    /// Health checks for the dashboard
    dashboard_worker: ApiWorker,

    /// The open page, if any
    page: Option<MountedPage>,
}

impl App<HttpPredictionApi> {
    /// Create the application against the configured backend.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self> {
        let api = Arc::new(HttpPredictionApi::new(config.api_url.as_str())?);
        let service = Arc::new(PredictionService::new(api));

        let mut app = Self::with_dependencies(service, config.api_url.as_str());
        if let Some(page) = config.start_page {
            app.mount_page(page);
        }
        Ok(app)
    }
}

impl<A> App<A>
where
    A: PredictionApi + 'static,
{
    /// Create application with an injected service (Composition Root pattern).
    pub fn with_dependencies(service: Arc<PredictionService<A>>, api_url: &str) -> Self {
        let mut app = Self {
            screen: Screen::Dashboard,
            should_quit: false,
            service,
            dashboard_state: DashboardState::new(api_url),
            dashboard_worker: ApiWorker::new(),
            page: None,
        };
        app.refresh_health();
        app
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Main loop
        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            self.poll_workers();

            terminal.draw(|f| {
                let area = f.area();
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(3)])
                    .split(area);

                match (&self.screen, &self.page) {
                    (Screen::Page, Some(page)) => {
                        render_page(f, chunks[0], &page.session, &page.form);
                    }
                    _ => render_dashboard(f, chunks[0], &self.dashboard_state),
                }

                render_disclaimer(f, chunks[1]);
            })?;

            // Handle input (short poll to stay responsive)
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, key.modifiers);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        self.unmount_page();
        Ok(())
    }

    /// Drain completed calls into screen state.
    fn poll_workers(&mut self) {
        while let Some(event) = self.dashboard_worker.try_recv() {
            if let ApiEvent::Health(outcome) = event {
                self.dashboard_state.health = BackendHealth::from_check(outcome);
            }
        }

        let Some(page) = self.page.as_mut() else {
            return;
        };
        while let Some(event) = page.worker.try_recv() {
            match event {
                ApiEvent::Prediction(outcome) => page.session.finish_submit(outcome),
                ApiEvent::Accuracy(outcome) => page.session.apply_accuracy(outcome),
                ApiEvent::Health(_) => {}
            }
        }
    }

    fn refresh_health(&mut self) {
        self.dashboard_state.health = BackendHealth::Checking;
        self.dashboard_worker.spawn_health(self.service.clone());
    }

    /// Open a page with fresh state and start its accuracy fetch.
    fn mount_page(&mut self, page: &'static PageConfig) {
        self.unmount_page();
        tracing::info!(page = page.slug, "Opening prediction page");

        let session = PredictionSession::new(page);
        let form = PatientFormState::new(session.form());
        let worker = ApiWorker::new();
        worker.spawn_accuracy(self.service.clone(), page.model);

        self.page = Some(MountedPage {
            session,
            form,
            worker,
        });
        self.screen = Screen::Page;
    }

    fn unmount_page(&mut self) {
        if let Some(mut page) = self.page.take() {
            tracing::debug!(page = page.session.page().slug, "Closing prediction page");
            page.form.clear_sensitive();
        }
        self.screen = Screen::Dashboard;
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        // Global quit handling
        if key == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::Dashboard => self.handle_dashboard_key(key),
            Screen::Page => self.handle_page_key(key),
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Up => self.dashboard_state.prev(),
            KeyCode::Down | KeyCode::Tab => self.dashboard_state.next(),
            KeyCode::Enter => {
                let page = self.dashboard_state.selected_page();
                self.mount_page(page);
            }
            KeyCode::Char('r') | KeyCode::Char('R') => self.refresh_health(),
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_page_key(&mut self, key: KeyCode) {
        let Some(page) = self.page.as_mut() else {
            self.screen = Screen::Dashboard;
            return;
        };

        // The failure notice is modal.
        if page.session.notice().is_some() {
            page.session.dismiss_notice();
            return;
        }

        match key {
            KeyCode::Esc => self.unmount_page(),
            KeyCode::Up | KeyCode::BackTab => page.form.prev_field(),
            KeyCode::Down | KeyCode::Tab => page.form.next_field(),
            KeyCode::Left => page.form.cycle_option(false, &mut page.session),
            KeyCode::Right => page.form.cycle_option(true, &mut page.session),
            KeyCode::Char(c) => page.form.input_char(c, &mut page.session),
            KeyCode::Backspace => page.form.delete_char(&mut page.session),
            KeyCode::Delete => page.form.clear_field(&mut page.session),
            KeyCode::Enter => {
                if !page.session.can_submit() {
                    return;
                }
                let request = page.session.begin_submit();
                page.worker
                    .spawn_prediction(self.service.clone(), page.session.page().model, request);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Field, FieldValue, PredictionRequest, RiskClass};
    use crate::ports::fake::FakePredictionApi;
    use crate::ports::ApiError;
    use serde_json::json;
    use std::time::Instant;

    fn app(api: FakePredictionApi) -> (App<FakePredictionApi>, Arc<FakePredictionApi>) {
        let api = Arc::new(api);
        let service = Arc::new(PredictionService::new(api.clone()));
        (App::with_dependencies(service, "http://localhost:5000"), api)
    }

    fn press(app: &mut App<FakePredictionApi>, key: KeyCode) {
        app.handle_key(key, KeyModifiers::NONE);
    }

    /// Poll until `done` holds or five seconds pass.
    fn pump(app: &mut App<FakePredictionApi>, done: impl Fn(&App<FakePredictionApi>) -> bool) {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            app.poll_workers();
            if done(app) {
                return;
            }
            assert!(Instant::now() < deadline, "condition never held");
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    fn session(app: &App<FakePredictionApi>) -> &PredictionSession {
        &app.page.as_ref().expect("page mounted").session
    }

    #[test]
    fn test_dashboard_health_check() {
        let (mut app, _) = app(FakePredictionApi::default());
        pump(&mut app, |a| a.dashboard_state.health != BackendHealth::Checking);
        assert!(matches!(app.dashboard_state.health, BackendHealth::Up(_)));
    }

    #[test]
    fn test_open_page_and_submit() {
        let (mut app, api) = app(FakePredictionApi::default()
            .with_prediction(Ok(json!({ "status": true, "model": "xgboost", "hasil_prediksi": 1 }))));

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen(), Screen::Page);
        assert_eq!(session(&app).page().slug, "xgboost");

        press(&mut app, KeyCode::Enter);
        assert!(session(&app).is_loading());

        // Ignored while loading.
        press(&mut app, KeyCode::Enter);

        pump(&mut app, |a| !session(a).is_loading());
        assert_eq!(
            session(&app).result().map(|r| r.risk_class()),
            Some(RiskClass::StrokeRisk)
        );

        let requests = api.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert!(matches!(requests[0].1, PredictionRequest::FeatureVector { .. }));
    }

    #[test]
    fn test_failure_notice_is_modal() {
        let (mut app, _) = app(FakePredictionApi::default()
            .with_prediction(Err(ApiError::Transport("connection refused".into()))));
        app.mount_page(&PageConfig::XGBOOST);

        press(&mut app, KeyCode::Enter);
        pump(&mut app, |a| !session(a).is_loading());
        assert_eq!(session(&app).notice(), Some("Failed to connect backend"));

        // First key only dismisses.
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.screen(), Screen::Page);
        assert!(session(&app).notice().is_none());

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.screen(), Screen::Dashboard);
        assert!(app.page.is_none());
    }

    #[test]
    fn test_keys_edit_the_form() {
        let (mut app, _) = app(FakePredictionApi::default());
        app.mount_page(&PageConfig::XGBOOST);

        // Gender is the first field.
        press(&mut app, KeyCode::Right);
        assert_eq!(
            session(&app).form().get(Field::Gender),
            Some(&FieldValue::text("Female"))
        );

        let weight = app
            .page
            .as_ref()
            .and_then(|p| p.session.form().schema().iter().position(|s| s.field == Field::Weight))
            .unwrap();
        for _ in 0..weight {
            press(&mut app, KeyCode::Tab);
        }
        press(&mut app, KeyCode::Delete);
        press(&mut app, KeyCode::Char('9'));
        press(&mut app, KeyCode::Char('0'));
        assert_eq!(session(&app).form().get(Field::Bmi), Some(&FieldValue::Number(31.1)));
    }

    #[test]
    fn test_accuracy_loaded_on_mount() {
        let (mut app, _) = app(FakePredictionApi::default().with_accuracy(Ok(
            crate::domain::AccuracyReading {
                status: true,
                accuracy: Some(0.9512),
                model: Some("random_forest".into()),
            },
        )));
        app.mount_page(&PageConfig::RANDOM_FOREST);
        pump(&mut app, |a| session(a).accuracy().is_some());
        assert_eq!(
            session(&app)
                .accuracy()
                .and_then(crate::domain::AccuracyReading::label)
                .as_deref(),
            Some("Accuracy 95.12%")
        );
    }

    #[test]
    fn test_ctrl_q_quits_even_with_notice() {
        let (mut app, _) = app(FakePredictionApi::default());
        app.mount_page(&PageConfig::XGBOOST);
        press(&mut app, KeyCode::Enter);
        pump(&mut app, |a| session(a).notice().is_some());

        app.handle_key(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(app.should_quit);
    }
}

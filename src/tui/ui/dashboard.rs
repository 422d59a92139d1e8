//! Dashboard view: Page picker and backend status.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::application::PageConfig;
use crate::domain::HealthStatus;
use crate::ports::ApiError;
use crate::tui::styles::ClinicTheme;

/// Outcome of the last liveness check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendHealth {
    Checking,
    Up(String),
    Down(String),
}

impl BackendHealth {
    #[must_use]
    pub fn from_check(outcome: Result<HealthStatus, ApiError>) -> Self {
        match outcome {
            Ok(status) if status.is_ok() => {
                Self::Up(status.message.unwrap_or_else(|| "online".to_string()))
            }
            Ok(status) => Self::Down(format!("status '{}'", status.status)),
            Err(e) => Self::Down(e.to_string()),
        }
    }
}

/// Dashboard state for rendering.
pub struct DashboardState {
    pub selected: usize,
    pub health: BackendHealth,
    pub api_url: String,
}

impl DashboardState {
    #[must_use]
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            selected: 0,
            health: BackendHealth::Checking,
            api_url: api_url.into(),
        }
    }

    pub fn next(&mut self) {
        self.selected = (self.selected + 1) % PageConfig::ALL.len();
    }

    pub fn prev(&mut self) {
        self.selected = self
            .selected
            .checked_sub(1)
            .unwrap_or(PageConfig::ALL.len() - 1);
    }

    #[must_use]
    pub fn selected_page(&self) -> &'static PageConfig {
        PageConfig::ALL[self.selected % PageConfig::ALL.len()]
    }
}

/// Render the main dashboard view.
pub fn render_dashboard(f: &mut Frame, area: Rect, state: &DashboardState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Main content
        ])
        .split(area);

    render_header(f, chunks[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);

    render_page_list(f, columns[0], state);
    render_status_panels(f, columns[1], state);
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", ClinicTheme::text()),
        Span::styled("Strokecast", ClinicTheme::title()),
        Span::styled(" │ ", ClinicTheme::text_muted()),
        Span::styled("Stroke Risk Prediction Client", ClinicTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(ClinicTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_page_list(f: &mut Frame, area: Rect, state: &DashboardState) {
    let items: Vec<ListItem> = PageConfig::ALL
        .iter()
        .map(|page| {
            ListItem::new(vec![
                Line::from(Span::styled(page.title, ClinicTheme::text())),
                Line::from(Span::styled(
                    format!("   {}", page.payload_summary()),
                    ClinicTheme::text_muted(),
                )),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(Span::styled(" Prediction Pages ", ClinicTheme::subtitle()))
                .borders(Borders::ALL)
                .border_style(ClinicTheme::border_focused()),
        )
        .highlight_style(ClinicTheme::selected())
        .highlight_symbol("▸ ");

    let mut list_state = ListState::default().with_selected(Some(state.selected));
    f.render_stateful_widget(list, area, &mut list_state);
}

fn render_status_panels(f: &mut Frame, area: Rect, state: &DashboardState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Backend status
            Constraint::Min(0),    // Quick actions
        ])
        .split(area);

    let (icon, style, detail) = match &state.health {
        BackendHealth::Checking => ("..", ClinicTheme::pending(), "checking"),
        BackendHealth::Up(message) => ("OK", ClinicTheme::calm(), message.as_str()),
        BackendHealth::Down(reason) => ("FAIL", ClinicTheme::alarm(), reason.as_str()),
    };

    let status_items = vec![
        Line::from(vec![
            Span::styled(format!("  {icon} "), style),
            Span::styled(detail.to_string(), ClinicTheme::text()),
        ]),
        Line::from(vec![
            Span::styled("  URL: ", ClinicTheme::text_secondary()),
            Span::styled(state.api_url.clone(), ClinicTheme::text_muted()),
        ]),
    ];

    let status_block = Block::default()
        .title(Span::styled(" Backend ", ClinicTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(ClinicTheme::border());
    f.render_widget(Paragraph::new(status_items).block(status_block), chunks[0]);

    let actions = vec![
        Line::from(vec![
            Span::styled("[↑↓] ", ClinicTheme::key_hint()),
            Span::styled("Select page", ClinicTheme::key_desc()),
        ]),
        Line::from(vec![
            Span::styled("[Enter] ", ClinicTheme::key_hint()),
            Span::styled("Open", ClinicTheme::key_desc()),
        ]),
        Line::from(vec![
            Span::styled("[R] ", ClinicTheme::key_hint()),
            Span::styled("Recheck backend", ClinicTheme::key_desc()),
        ]),
        Line::from(vec![
            Span::styled("[Q] ", ClinicTheme::key_hint()),
            Span::styled("Quit", ClinicTheme::key_desc()),
        ]),
    ];

    let actions_block = Block::default()
        .title(Span::styled(" Quick Actions ", ClinicTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(ClinicTheme::border());
    f.render_widget(Paragraph::new(actions).block(actions_block), chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_wraps() {
        let mut state = DashboardState::new("http://localhost:5000");
        assert_eq!(state.selected_page().slug, "random-forest");

        state.prev();
        assert_eq!(state.selected_page().slug, "xgboost-manual");
        state.next();
        state.next();
        assert_eq!(state.selected_page().slug, "random-forest-vector");
    }

    #[test]
    fn test_health_from_check() {
        let up = BackendHealth::from_check(Ok(HealthStatus {
            status: "ok".into(),
            message: Some("Stroke Prediction API running".into()),
        }));
        assert_eq!(up, BackendHealth::Up("Stroke Prediction API running".into()));

        let down = BackendHealth::from_check(Err(ApiError::Transport("refused".into())));
        assert!(matches!(down, BackendHealth::Down(_)));
    }
}

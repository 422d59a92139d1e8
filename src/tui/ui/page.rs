//! Prediction page: form, submit control and result side by side.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::application::{submit_label, PredictionSession};
use crate::domain::AccuracyReading;
use crate::tui::styles::ClinicTheme;

use super::patient::{render_patient_form, PatientFormState};
use super::result::render_result;

/// Render a mounted prediction page.
pub fn render_page(f: &mut Frame, area: Rect, session: &PredictionSession, form: &PatientFormState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Form + result
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_page_header(f, chunks[0], session);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);
    render_patient_form(f, body[0], form, session.form());
    render_result(f, body[1], &session.view());

    render_page_footer(f, chunks[2], session.is_loading());

    if let Some(notice) = session.notice() {
        render_notice(f, area, notice);
    }
}

fn render_page_header(f: &mut Frame, area: Rect, session: &PredictionSession) {
    let page = session.page();
    let mut spans = vec![
        Span::styled(" ", ClinicTheme::text()),
        Span::styled("Stroke Prediction", ClinicTheme::title()),
        Span::styled(" │ ", ClinicTheme::text_muted()),
        Span::styled(format!("Model: {}", page.model), ClinicTheme::text_secondary()),
        Span::styled(format!(" ({})", page.title), ClinicTheme::text_muted()),
    ];
    if let Some(label) = session.accuracy().and_then(AccuracyReading::label) {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!(" {label} "),
            ClinicTheme::badge(ClinicTheme::CALM),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(ClinicTheme::border()),
    );
    f.render_widget(header, area);
}

fn render_page_footer(f: &mut Frame, area: Rect, loading: bool) {
    let content = Line::from(vec![
        Span::styled(format!(" {} ", submit_label(loading)), ClinicTheme::button(!loading)),
        Span::raw("  "),
        Span::styled("[Enter] ", ClinicTheme::key_hint()),
        Span::styled("Submit ", ClinicTheme::key_desc()),
        Span::styled("[↑↓] ", ClinicTheme::key_hint()),
        Span::styled("Navigate ", ClinicTheme::key_desc()),
        Span::styled("[←→] ", ClinicTheme::key_hint()),
        Span::styled("Choose ", ClinicTheme::key_desc()),
        Span::styled("[Del] ", ClinicTheme::key_hint()),
        Span::styled("Clear ", ClinicTheme::key_desc()),
        Span::styled("[Esc] ", ClinicTheme::key_hint()),
        Span::styled("Back", ClinicTheme::key_desc()),
    ]);

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(ClinicTheme::border()),
    );
    f.render_widget(footer, area);
}

/// Modal failure notice; any key dismisses it.
fn render_notice(f: &mut Frame, area: Rect, message: &str) {
    let popup = centered(area, 44, 7);
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(message.to_string(), ClinicTheme::alarm())),
        Line::from(""),
        Line::from(Span::styled("Press any key", ClinicTheme::text_muted())),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .title(Span::styled(" Error ", ClinicTheme::alarm()))
            .borders(Borders::ALL)
            .border_style(ClinicTheme::alarm()),
    );

    f.render_widget(Clear, popup);
    f.render_widget(content, popup);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

//! Prediction result panel.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::application::{ResultView, PLACEHOLDER_TEXT};
use crate::domain::RiskClass;
use crate::tui::styles::ClinicTheme;

/// Render the result panel for the current view.
pub fn render_result(f: &mut Frame, area: Rect, view: &ResultView<'_>) {
    let block = Block::default()
        .title(Span::styled(" Prediction Result ", ClinicTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(ClinicTheme::border());

    match view {
        ResultView::Busy => {
            let content = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled("Predicting...", ClinicTheme::pending())),
                Line::from(""),
                Line::from(Span::styled(
                    "Waiting for the prediction service",
                    ClinicTheme::text_muted(),
                )),
            ])
            .alignment(Alignment::Center)
            .block(block);
            f.render_widget(content, area);
        }
        ResultView::Placeholder => {
            let content = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(PLACEHOLDER_TEXT, ClinicTheme::text_muted())),
            ])
            .alignment(Alignment::Center)
            .block(block);
            f.render_widget(content, area);
        }
        ResultView::Classified {
            class,
            model,
            raw,
            received_at,
        } => {
            let block = block.border_style(ClinicTheme::risk_class(*class));
            let inner = block.inner(area);
            f.render_widget(block, area);
            render_classified(f, inner, *class, model, raw, received_at);
        }
    }
}

fn render_classified(
    f: &mut Frame,
    area: Rect,
    class: RiskClass,
    model: &str,
    raw: &str,
    received_at: &chrono::DateTime<chrono::Utc>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Classification
            Constraint::Length(2), // Model badge
            Constraint::Min(0),    // Raw response
        ])
        .margin(1)
        .split(area);

    let icon = if class.is_alarming() { "!" } else { "OK" };
    let headline = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("{icon} {}", class.label()),
            ClinicTheme::risk_class(class).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(class.description(), ClinicTheme::text_secondary())),
    ])
    .alignment(Alignment::Center);
    f.render_widget(headline, chunks[0]);

    let badge = Paragraph::new(Line::from(vec![
        Span::styled("Model: ", ClinicTheme::text_secondary()),
        Span::styled(format!(" {model} "), ClinicTheme::badge(ClinicTheme::BADGE)),
        Span::styled(
            format!("  {}", received_at.format("%H:%M:%S UTC")),
            ClinicTheme::text_muted(),
        ),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(badge, chunks[1]);

    let raw_block = Block::default()
        .title(Span::styled(" Response ", ClinicTheme::text_secondary()))
        .borders(Borders::TOP)
        .border_style(ClinicTheme::border());
    let body = Paragraph::new(raw.to_string())
        .style(ClinicTheme::text_muted())
        .wrap(Wrap { trim: false })
        .block(raw_block);
    f.render_widget(body, chunks[2]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, style::Color, Terminal};

    /// Foreground color of the first cell of `text`, wherever it was drawn.
    fn color_of(view: &ResultView<'_>, text: &str) -> Option<Color> {
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal
            .draw(|f| render_result(f, f.area(), view))
            .unwrap();
        let buf = terminal.backend().buffer();

        for y in 0..buf.area.height {
            let row: String = (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect();
            if let Some(start) = row.find(text) {
                let x = row[..start].chars().count() as u16;
                return Some(buf[(x, y)].fg);
            }
        }
        None
    }

    fn classified(class: RiskClass) -> ResultView<'static> {
        ResultView::Classified {
            class,
            model: "xgboost",
            raw: "{}".to_string(),
            received_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_stroke_risk_drawn_in_alarm() {
        let view = classified(RiskClass::StrokeRisk);
        assert_eq!(color_of(&view, "Stroke Risk"), Some(ClinicTheme::ALARM));
    }

    #[test]
    fn test_low_risk_drawn_in_calm() {
        let view = classified(RiskClass::LowRisk);
        assert_eq!(color_of(&view, "Low Risk"), Some(ClinicTheme::CALM));
    }

    #[test]
    fn test_placeholder_text_shown() {
        assert!(color_of(&ResultView::Placeholder, PLACEHOLDER_TEXT).is_some());
        assert!(color_of(&ResultView::Busy, "Predicting...").is_some());
    }
}

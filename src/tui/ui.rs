use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use super::app::{App, Phase};
use super::theme;
use super::widgets;

pub fn draw(f: &mut Frame, app: &App) {
    let size = f.area();

    // Outer border
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::BORDER_COLOR));
    f.render_widget(block, size);

    let inner = Rect {
        x: size.x + 2,
        y: size.y + 1,
        width: size.width.saturating_sub(4),
        height: size.height.saturating_sub(2),
    };

    if inner.height < 3 || inner.width < 20 {
        return;
    }

    // Layout: header (1) | phase (1) | content (flex) | progress (1)
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .split(inner);

    widgets::header::render(f, chunks[0], app);
    render_phase_label(f, chunks[1], app);

    let content = chunks[2];
    match app.phase {
        Phase::Connecting => render_connecting(f, content, app),
        Phase::Downloading => render_download(f, content, app),
        Phase::Results => widgets::results::render(f, content, app),
    }

    widgets::progress::render(f, chunks[3], app);
}

fn render_phase_label(f: &mut Frame, area: Rect, app: &App) {
    let (label, color) = match app.phase {
        Phase::Connecting => ("CONNECTING", theme::DIM_TEXT),
        Phase::Downloading => ("DOWNLOAD", theme::DOWNLOAD_COLOR),
        Phase::Results => ("RESULTS", theme::BRIGHT_TEXT),
    };

    let mut spans = vec![Span::styled(
        label,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )];
    if app.total > 1 && app.run > 0 && app.phase != Phase::Results {
        spans.push(Span::styled(
            format!("  run {}/{}", app.run, app.total),
            Style::default().fg(theme::DIM_TEXT),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_connecting(f: &mut Frame, area: Rect, app: &App) {
    let text = match app.failures.last() {
        Some(failure) if failure.run == app.run => {
            format!("Run {} failed: {}", failure.run, failure.error)
        }
        _ => "Waiting for response...".to_string(),
    };
    let msg = Paragraph::new(Line::from(Span::styled(
        text,
        Style::default().fg(theme::DIM_TEXT),
    )))
    .alignment(Alignment::Center);

    let centered = Rect {
        x: area.x,
        y: area.y + area.height / 2,
        width: area.width,
        height: 1,
    };
    f.render_widget(msg, centered);
}

fn render_download(f: &mut Frame, area: Rect, app: &App) {
    if area.height < 6 {
        // Small terminal: just show speed gauge
        widgets::speed_gauge::render(f, area, app);
        return;
    }

    // Split: gauge (3) | chart (rest)
    let chunks = Layout::vertical([Constraint::Length(3), Constraint::Min(3)]).split(area);

    widgets::speed_gauge::render(f, chunks[0], app);
    widgets::live_chart::render(f, chunks[1], &app.chart_data);
}

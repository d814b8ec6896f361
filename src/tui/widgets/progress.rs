use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::engine::types::format_bytes;
use crate::tui::app::{App, Phase};
use crate::tui::theme;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let progress = app.overall_progress();
    let bar_width = area.width.saturating_sub(30) as usize;
    let filled = (progress * bar_width as f64) as usize;
    let empty = bar_width.saturating_sub(filled);

    let label = match app.phase {
        Phase::Connecting => format!("Run {}/{} · connecting", app.run.max(1), app.total),
        Phase::Downloading => match (app.transfer_fraction(), app.transfer_total) {
            (Some(fraction), Some(total)) => format!(
                "{:.1}% · {}/{}",
                fraction * 100.0,
                format_bytes(app.transfer_bytes),
                format_bytes(total)
            ),
            _ => format!("{} received", format_bytes(app.transfer_bytes)),
        },
        Phase::Results => "Complete · q to quit".to_string(),
    };

    let line = Line::from(vec![
        Span::styled("▰".repeat(filled), Style::default().fg(theme::HEADER_COLOR)),
        Span::styled("▱".repeat(empty), Style::default().fg(theme::DIM_TEXT)),
        Span::raw("  "),
        Span::styled(label, Style::default().fg(theme::DIM_TEXT)),
    ]);

    f.render_widget(Paragraph::new(line), area);
}

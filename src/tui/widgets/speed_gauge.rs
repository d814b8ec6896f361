use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::engine::classify::classify;
use crate::tui::app::App;
use crate::tui::theme;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let tier = classify(app.current_rate);
    let lines = vec![
        Line::from(Span::styled(
            format!("{:.2}", app.current_rate / 1_000_000.0),
            Style::default()
                .fg(theme::DOWNLOAD_COLOR)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("MB/s  ", Style::default().fg(theme::DIM_TEXT)),
            Span::styled(tier.to_string(), Style::default().fg(theme::tier_color(tier))),
        ]),
    ];

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}

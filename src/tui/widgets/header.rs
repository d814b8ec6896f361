use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::tui::app::App;
use crate::tui::theme;
use crate::tui::widgets::truncate;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let title = Span::styled(
        " IMAGE SPEED TEST ",
        Style::default()
            .fg(theme::HEADER_COLOR)
            .add_modifier(Modifier::BOLD),
    );

    let budget = (area.width as usize).saturating_sub(24);
    let url = truncate(&app.url, budget);

    let line = Line::from(vec![
        title,
        Span::raw("  "),
        Span::styled(url, Style::default().fg(theme::DIM_TEXT)),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

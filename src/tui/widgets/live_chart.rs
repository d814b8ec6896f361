use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::Span;
use ratatui::widgets::{Axis, Chart, Dataset, GraphType};
use ratatui::Frame;

use crate::tui::theme;

/// Line chart of running rate samples, in MB/s.
pub fn render(f: &mut Frame, area: Rect, data: &[f64]) {
    if data.is_empty() || area.width < 10 || area.height < 4 {
        return;
    }

    let max_y = data.iter().cloned().fold(0.0_f64, f64::max).max(1.0);

    let points: Vec<(f64, f64)> = data
        .iter()
        .enumerate()
        .map(|(i, &v)| (i as f64, v))
        .collect();

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(theme::DOWNLOAD_COLOR))
        .data(&points);

    let x_axis = Axis::default()
        .bounds([0.0, (data.len().max(2) - 1) as f64])
        .style(Style::default().fg(theme::DIM_TEXT));

    let y_axis = Axis::default()
        .bounds([0.0, max_y * 1.1])
        .labels(vec![
            Span::from("0"),
            Span::from(format!("{:.1}", max_y / 2.0)),
            Span::from(format!("{:.1}", max_y)),
        ])
        .style(Style::default().fg(theme::DIM_TEXT));

    let chart = Chart::new(vec![dataset]).x_axis(x_axis).y_axis(y_axis);

    f.render_widget(chart, area);
}

use ratatui::layout::{Alignment, Constraint, Flex, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Paragraph, Row, Table};
use ratatui::Frame;

use crate::engine::types::{format_bytes, format_rate, AggregateReport};
use crate::tui::app::App;
use crate::tui::theme;
use crate::tui::widgets::truncate;

const COLUMN_WIDTHS: [u16; 4] = [5, 12, 9, 14];
const MIN_LAST_COLUMN: u16 = 9;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let Some(ref report) = app.report else {
        return;
    };
    if area.height < 6 {
        return;
    }

    let hero_area = Rect {
        x: area.x,
        y: area.y,
        width: area.width,
        height: 3,
    };
    render_hero(f, hero_area, report);

    let table_top = area.y + 4;
    let remaining = area.height.saturating_sub(5);
    if remaining >= 2 {
        let table_area = Rect {
            x: area.x + 1,
            y: table_top,
            width: area.width.saturating_sub(2),
            height: u16::try_from(report.attempts)
                .unwrap_or(u16::MAX)
                .saturating_add(1)
                .min(remaining),
        };
        render_runs_table(f, table_area, report);
    }

    let quit_area = Rect {
        x: area.x,
        y: area.y + area.height - 1,
        width: area.width,
        height: 1,
    };
    let quit = Paragraph::new(Line::from(Span::styled(
        "Press q to quit",
        Style::default().fg(theme::DIM_TEXT),
    )))
    .alignment(Alignment::Center);
    f.render_widget(quit, quit_area);
}

fn render_hero(f: &mut Frame, area: Rect, report: &AggregateReport) {
    let lines = match (report.mean_rate, report.tier) {
        (Some(mean), Some(tier)) => {
            let label = if report.attempts > 1 {
                format!("↓ AVERAGE · {}/{} runs", report.succeeded(), report.attempts)
            } else {
                "↓ DOWNLOAD".to_string()
            };
            vec![
                Line::from(Span::styled(label, Style::default().fg(theme::DOWNLOAD_COLOR))),
                Line::from(vec![
                    Span::styled(
                        format_rate(mean),
                        Style::default()
                            .fg(theme::BRIGHT_TEXT)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(
                        tier.to_string(),
                        Style::default()
                            .fg(theme::tier_color(tier))
                            .add_modifier(Modifier::BOLD),
                    ),
                ]),
                Line::from(Span::styled(tier.range(), Style::default().fg(theme::DIM_TEXT))),
            ]
        }
        _ => vec![
            Line::from(Span::styled(
                format!("All {} runs failed", report.attempts),
                Style::default()
                    .fg(theme::ERROR_COLOR)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![]),
            Line::from(Span::styled(
                "No speed could be measured",
                Style::default().fg(theme::DIM_TEXT),
            )),
        ],
    };

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}

fn render_runs_table(f: &mut Frame, area: Rect, report: &AggregateReport) {
    let dim = Style::default().fg(theme::DIM_TEXT);
    let header = Row::new(vec![
        Cell::from(Span::styled("run", dim)),
        Cell::from(Span::styled("size", dim)),
        Cell::from(Span::styled("time", dim)),
        Cell::from(Span::styled("speed", dim)),
        Cell::from(Span::styled("", dim)),
    ]);

    // Table spacing is one cell between each of the five columns.
    let fixed: u16 = COLUMN_WIDTHS.iter().sum::<u16>() + 4;
    let error_width = area.width.saturating_sub(fixed).max(MIN_LAST_COLUMN) as usize;
    let error_style = Style::default().fg(theme::ERROR_COLOR);

    let mut successes = report.results.iter();
    let mut failures = report.failures.iter().peekable();
    let mut rows = Vec::with_capacity(report.results.len() + report.failures.len());

    for run in 1..=report.attempts {
        let row = if let Some(failure) = failures.next_if(|failure| failure.run == run) {
            Row::new(vec![
                Cell::from(Span::styled(format!("{run:>3}"), dim)),
                Cell::from(Span::styled("failed", error_style)),
                Cell::from(""),
                Cell::from(""),
                Cell::from(Span::styled(
                    truncate(&failure.error, error_width),
                    error_style,
                )),
            ])
        } else if let Some(result) = successes.next() {
            let tier = result.tier();
            Row::new(vec![
                Cell::from(Span::styled(format!("{run:>3}"), dim)),
                Cell::from(Span::styled(format_bytes(result.byte_count()), dim)),
                Cell::from(Span::styled(
                    format!("{:.2}s", result.elapsed_seconds()),
                    dim,
                )),
                Cell::from(Span::styled(
                    format_rate(result.rate()),
                    Style::default().fg(theme::BRIGHT_TEXT),
                )),
                Cell::from(Span::styled(
                    tier.to_string(),
                    Style::default().fg(theme::tier_color(tier)),
                )),
            ])
        } else {
            continue;
        };
        rows.push(row);
    }

    let widths = [
        Constraint::Length(COLUMN_WIDTHS[0]),
        Constraint::Length(COLUMN_WIDTHS[1]),
        Constraint::Length(COLUMN_WIDTHS[2]),
        Constraint::Length(COLUMN_WIDTHS[3]),
        Constraint::Min(MIN_LAST_COLUMN),
    ];

    // Leftover width goes to the last column, which holds tiers and errors.
    let table = Table::new(rows, widths).header(header).flex(Flex::Legacy);
    f.render_widget(table, area);
}

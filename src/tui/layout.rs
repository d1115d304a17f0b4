//! TUI layout and widget rendering.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, List, ListItem, ListState, Paragraph};

use super::runtime::App;
use super::style;

/// Renders the full TUI frame.
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Min(10),   // selector + chart
            Constraint::Length(3), // status
            Constraint::Length(1), // footer
        ])
        .split(frame.area());

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(32), Constraint::Min(20)])
        .split(chunks[1]);

    render_header(frame, app, chunks[0]);
    render_plants(frame, app, body[0]);
    render_chart(frame, app, body[1]);
    render_status(frame, app, chunks[2]);
    render_footer(frame, chunks[3]);
}

/// Header bar: selected plant and year window.
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let window = match app.selection() {
        Some(sel) => format!(" │ {}-{} ", sel.first_year, sel.last_year),
        None => " │ no data ".to_string(),
    };
    let header = Line::from(vec![
        Span::styled(
            " NUCLEAR-CF ",
            Style::default()
                .fg(style::HEADER_FG)
                .bg(style::HEADER_BG)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            app.plant().unwrap_or("-"),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(window),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

/// Plant selector.
fn render_plants(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .plants
        .iter()
        .map(|p| ListItem::new(p.as_str()))
        .collect();
    let list = List::new(items)
        .block(Block::default().title(" Plants ").borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .fg(style::SELECTED_FG)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    if !app.plants.is_empty() {
        state.select(Some(app.selected));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

/// Monthly capacity factor of the selected plant over the year window.
fn render_chart(frame: &mut Frame, app: &App, area: Rect) {
    let series = app.current_series();
    let data: Vec<(f64, f64)> = series
        .iter()
        .map(|&(date, cf)| (style::month_x(date), cf))
        .collect();
    let x_bounds = style::x_bounds(&data);

    let x_label_lo = series
        .first()
        .map(|(d, _)| d.format("%Y-%m").to_string())
        .unwrap_or_default();
    let x_label_hi = series
        .last()
        .map(|(d, _)| d.format("%Y-%m").to_string())
        .unwrap_or_default();

    let title = app
        .selection()
        .map(|sel| format!(" {} ", sel.title()))
        .unwrap_or_else(|| " Monthly Capacity Factor ".to_string());

    let datasets = vec![
        Dataset::default()
            .name("Capacity factor")
            .marker(symbols::Marker::Braille)
            .style(Style::default().fg(style::SERIES_COLOR))
            .data(&data),
    ];

    let chart = Chart::new(datasets)
        .block(Block::default().title(title).borders(Borders::ALL))
        .x_axis(
            Axis::default()
                .title("month")
                .bounds(x_bounds)
                .labels(vec![x_label_lo, x_label_hi]),
        )
        .y_axis(
            Axis::default()
                .title("CF")
                .bounds(style::CF_BOUNDS)
                .labels(vec!["0.0".to_string(), "0.5".to_string(), "1.1".to_string()]),
        );

    frame.render_widget(chart, area);
}

/// Status panel: point count and the outcome of the last save.
fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let points = app.current_series().len();
    let mut spans = vec![Span::raw(format!("  {points} months"))];
    if let Some(status) = &app.status {
        spans.push(Span::raw("  │  "));
        spans.push(Span::styled(
            status.as_str(),
            Style::default().fg(style::STATUS_FG),
        ));
    }
    let block = Block::default().title(" Status ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

/// Footer with keybinding hints.
fn render_footer(frame: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(Span::styled(
        " q:Quit  ↑/↓:Plant  [/]:First year  {/}:Last year  s:Save",
        Style::default().fg(style::FOOTER_FG),
    )));
    frame.render_widget(footer, area);
}

//! Dashboard screen rendering
//!
//! Renders the header, three position metrics and a world map with the
//! subpoint marked, or a warning box when no position is available.

use chrono::{DateTime, Local};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Map, MapResolution, Points},
        Block, Borders, Paragraph, Wrap,
    },
    Frame,
};

use crate::app::{App, AppState};
use crate::data::Position;

/// Half the longitude span shown on the map
const MAP_HALF_WIDTH_DEG: f64 = 90.0;
/// Half the latitude span shown on the map
const MAP_HALF_HEIGHT_DEG: f64 = 45.0;

/// Formats a latitude or longitude to 4 decimal places
pub fn format_degrees(value: f64) -> String {
    format!("{:.4}°", value)
}

/// Formats an altitude to 2 decimal places
pub fn format_altitude(altitude_km: f64) -> String {
    format!("{:.2} km", altitude_km)
}

/// Formats a wall-clock time as HH:MM:SS
pub fn format_clock(time: &DateTime<Local>) -> String {
    time.format("%H:%M:%S").to_string()
}

/// Map window centered on the position at a fixed zoom
///
/// The center is clamped so the window never leaves the world map; near the
/// edges the point is shown off-center instead.
pub fn map_bounds(position: &Position) -> ([f64; 2], [f64; 2]) {
    let center_x = position
        .longitude
        .clamp(-180.0 + MAP_HALF_WIDTH_DEG, 180.0 - MAP_HALF_WIDTH_DEG);
    let center_y = position
        .latitude
        .clamp(-90.0 + MAP_HALF_HEIGHT_DEG, 90.0 - MAP_HALF_HEIGHT_DEG);

    (
        [center_x - MAP_HALF_WIDTH_DEG, center_x + MAP_HALF_WIDTH_DEG],
        [center_y - MAP_HALF_HEIGHT_DEG, center_y + MAP_HALF_HEIGHT_DEG],
    )
}

/// Renders the whole dashboard for the current app state
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Body
            Constraint::Length(1), // Footer
        ])
        .split(area);

    render_header(frame, app, chunks[0]);

    match &app.state {
        AppState::Loading => render_loading(frame, chunks[1]),
        AppState::Tracking(position) => render_tracking(frame, app, position, chunks[1]),
        AppState::Unavailable(message) => render_warning(frame, app, message, chunks[1]),
    }

    render_footer(frame, app, chunks[2]);
}

/// Renders the title bar
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let title = Line::from(vec![
        Span::styled(
            format!("Real-Time {} Tracker", app.object_label()),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  NORAD {}", app.catalog_number),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let header = Paragraph::new(title)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(header, area);
}

/// Renders a loading message before the first cycle completes
fn render_loading(frame: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(1),
            Constraint::Percentage(45),
        ])
        .split(area);

    let loading_text = Paragraph::new("Fetching orbital elements...")
        .style(Style::default().fg(Color::Cyan))
        .alignment(Alignment::Center);

    frame.render_widget(loading_text, chunks[1]);
}

/// Renders the metrics row and the map
fn render_tracking(frame: &mut Frame, app: &App, position: &Position, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let metric_areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(chunks[0]);

    render_metric(frame, "Latitude", format_degrees(position.latitude), metric_areas[0]);
    render_metric(frame, "Longitude", format_degrees(position.longitude), metric_areas[1]);
    render_metric(frame, "Altitude", format_altitude(position.altitude_km), metric_areas[2]);

    render_map(frame, app, position, chunks[1]);
}

/// Renders a single labelled metric box
fn render_metric(frame: &mut Frame, label: &str, value: String, area: Rect) {
    let block = Block::default()
        .title(format!(" {} ", label))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let paragraph = Paragraph::new(Span::styled(
        value,
        Style::default().add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center)
    .block(block);

    frame.render_widget(paragraph, area);
}

/// Renders the world map with the subpoint marked
fn render_map(frame: &mut Frame, app: &App, position: &Position, area: Rect) {
    let (x_bounds, y_bounds) = map_bounds(position);
    let point = [(position.longitude, position.latitude)];
    let label = app.object_label();

    let canvas = Canvas::default()
        .block(Block::default().title(" Subpoint ").borders(Borders::ALL))
        .marker(Marker::Braille)
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(|ctx| {
            ctx.draw(&Map {
                color: Color::Green,
                resolution: MapResolution::High,
            });
            ctx.layer();
            ctx.draw(&Points {
                coords: &point,
                color: Color::Red,
            });
            ctx.print(
                position.longitude,
                position.latitude,
                Span::styled(
                    format!(" {}", label),
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
            );
        });

    frame.render_widget(canvas, area);
}

/// Renders the warning shown instead of metrics and map
fn render_warning(frame: &mut Frame, app: &App, message: &str, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            format!("Could not display {} position.", app.object_label()),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Retrying on the next refresh.",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let block = Block::default()
        .title(" Warning ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

/// Renders the last-updated time and the quit hint
fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = Vec::new();

    if let (AppState::Tracking(_), Some(updated)) = (&app.state, &app.last_updated) {
        spans.push(Span::styled(
            format!("Last updated: {}", format_clock(updated)),
            Style::default().fg(Color::Gray),
        ));
        spans.push(Span::raw("  "));
    }
    spans.push(Span::styled("q", Style::default().fg(Color::Yellow)));
    spans.push(Span::styled(" quit", Style::default().fg(Color::DarkGray)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

use ratatui::layout::{Alignment, Direction, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::canvas::{Canvas, Circle, Map, MapResolution};
use ratatui::widgets::{
    Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph,
};
use ratatui::Frame;

use sales_dashboard::charts::{
    si_label, BarChartSpec, BarOrientation, GeoScatterSpec, LineChartSpec,
};

const SERIES_COLORS: [Color; 6] = [
    Color::Cyan,
    Color::Yellow,
    Color::Magenta,
    Color::Green,
    Color::Rgb(0, 0, 238),
    Color::Red,
];

pub fn series_color(index: usize) -> Color {
    SERIES_COLORS[index % SERIES_COLORS.len()]
}

pub fn chart_block(title: &str) -> Block<'static> {
    Block::default()
        .title(format!(" {title} "))
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
}

pub fn render_empty(f: &mut Frame<'_>, area: Rect, title: &str) {
    let paragraph = Paragraph::new("No sales for this selection")
        .block(chart_block(title))
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}

/// Bar values are drawn as integers; fractions only live in the text label.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn bar_height(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value.round() as u64
    } else {
        0
    }
}

pub fn render_bar_chart(f: &mut Frame<'_>, area: Rect, spec: &BarChartSpec) {
    if spec.bars.is_empty() {
        render_empty(f, area, &spec.title);
        return;
    }

    let bars: Vec<Bar<'_>> = spec
        .bars
        .iter()
        .enumerate()
        .map(|(index, point)| {
            Bar::default()
                .value(bar_height(point.value))
                .text_value(spec.value_label.render(point.value))
                .label(TextLine::from(point.label.as_str()))
                .style(Style::default().fg(series_color(index)))
                .value_style(
                    Style::default()
                        .fg(Color::Black)
                        .bg(series_color(index))
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let max_value = bar_height(spec.max_value()).max(1);
    let chart = BarChart::default()
        .block(chart_block(&spec.title))
        .data(BarGroup::default().bars(&bars))
        .max(max_value);

    let chart = match spec.orientation {
        BarOrientation::Vertical => {
            let count = u16::try_from(spec.bars.len()).unwrap_or(u16::MAX).max(1);
            let width = (area.width.saturating_sub(2) / count)
                .saturating_sub(1)
                .clamp(3, 14);
            chart.bar_width(width).bar_gap(1)
        }
        BarOrientation::Horizontal => chart
            .direction(Direction::Horizontal)
            .bar_width(1)
            .bar_gap(1),
    };

    f.render_widget(chart, area);
}

/// Scatter of locations over a world map, marker radius growing with the
/// point's relative size.
pub fn render_geo_scatter(f: &mut Frame<'_>, area: Rect, spec: &GeoScatterSpec) {
    if spec.points.is_empty() {
        render_empty(f, area, &spec.title);
        return;
    }

    let canvas = Canvas::default()
        .block(chart_block(&spec.title))
        .marker(Marker::Braille)
        .x_bounds(spec.scope.lon_bounds())
        .y_bounds(spec.scope.lat_bounds())
        .paint(|ctx| {
            ctx.draw(&Map {
                resolution: MapResolution::High,
                color: Color::DarkGray,
            });
            ctx.layer();

            for (index, point) in spec.points.iter().enumerate() {
                ctx.draw(&Circle {
                    x: point.lon,
                    y: point.lat,
                    radius: 0.6 + point.size * 2.4,
                    color: series_color(index),
                });
            }

            for point in &spec.points {
                let label = if spec.show_coordinates {
                    format!("{} ({:.1}, {:.1})", point.name, point.lat, point.lon)
                } else {
                    point.name.clone()
                };
                ctx.print(
                    point.lon,
                    point.lat,
                    Span::styled(label, Style::default().fg(Color::White)),
                );
            }
        });

    f.render_widget(canvas, area);
}

pub fn render_line_chart(f: &mut Frame<'_>, area: Rect, spec: &LineChartSpec) {
    if spec.series.is_empty() {
        render_empty(f, area, &spec.title);
        return;
    }

    let series: Vec<(String, Vec<(f64, f64)>)> = spec
        .series
        .iter()
        .map(|line| {
            let points = line
                .points
                .iter()
                .map(|(month, value)| (f64::from(*month), *value))
                .collect();
            (line.year.to_string(), points)
        })
        .collect();

    let mut datasets = Vec::new();
    for (index, (year, points)) in series.iter().enumerate() {
        let style = Style::default().fg(series_color(index));
        datasets.push(
            Dataset::default()
                .name(year.as_str())
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(style)
                .data(points),
        );
        if spec.markers {
            datasets.push(
                Dataset::default()
                    .marker(Marker::Dot)
                    .graph_type(GraphType::Scatter)
                    .style(style)
                    .data(points),
            );
        }
    }

    let y_max = if spec.y_range[1] > spec.y_range[0] {
        spec.y_range[1]
    } else {
        spec.y_range[0] + 1.0
    };
    let y_labels = vec![
        Span::raw(si_label(spec.y_range[0])),
        Span::raw(si_label((spec.y_range[0] + y_max) / 2.0)),
        Span::raw(si_label(y_max)),
    ];
    let x_labels = vec![
        Span::raw("Jan"),
        Span::raw("Apr"),
        Span::raw("Aug"),
        Span::raw("Dec"),
    ];

    let chart = Chart::new(datasets)
        .block(chart_block(&spec.title))
        .x_axis(
            Axis::default()
                .title("Month")
                .style(Style::default().fg(Color::Gray))
                .bounds([1.0, 12.0])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title(spec.y_title.as_str())
                .style(Style::default().fg(Color::Gray))
                .bounds([spec.y_range[0], y_max])
                .labels(y_labels),
        );

    f.render_widget(chart, area);
}

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs, Wrap};
use ratatui::Frame;
use throbber_widgets_tui::Throbber;

use sales_dashboard::DashboardView;

use crate::app::{App, Tab};
use crate::ui::screens::sidebar::{render_sidebar, SIDEBAR_WIDTH};
use crate::ui::widgets::charts::{render_bar_chart, render_geo_scatter, render_line_chart};
use crate::ui::widgets::metrics::render_metrics;
use crate::ui::widgets::tables::render_sales_table;

pub fn render_dashboard(app: &App, f: &mut Frame<'_>) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(10),   // Sidebar + tabs
            Constraint::Length(3), // Status
            Constraint::Length(1), // Shortcuts hint
        ])
        .split(f.area().inner(Margin::new(1, 0)));

    render_title(app, f, layout[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
        .split(layout[1]);
    render_sidebar(app, f, body[0]);
    render_main_area(app, f, body[1]);

    render_status(app, f, layout[2]);
    render_shortcuts(f, layout[3]);
}

fn render_title(app: &App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let line = TextLine::from(vec![
        Span::styled(
            "Sales ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "Dashboard",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {}", app.actions.origin()),
            Style::default().fg(Color::Gray),
        ),
    ]);

    f.render_widget(Paragraph::new(line).block(block), area);
}

fn render_main_area(app: &App, f: &mut Frame<'_>, area: Rect) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tabs
            Constraint::Length(3), // Metrics
            Constraint::Min(6),    // Charts
        ])
        .split(area.inner(Margin::new(1, 0)));

    render_tabs(app, f, sections[0]);

    if let Some(error) = &app.error {
        render_error_panel(f, sections[1].union(sections[2]), error);
        return;
    }

    let Some(view) = &app.view else {
        render_loading(app, f, sections[1].union(sections[2]));
        return;
    };

    render_metrics(f, sections[1], &view.metrics);
    match app.tab {
        Tab::Revenue => render_revenue_tab(view, f, sections[2]),
        Tab::SalesCount => render_sales_count_tab(app, view, f, sections[2]),
        Tab::Salespeople => render_salespeople_tab(view, f, sections[2]),
    }
}

fn render_tabs(app: &App, f: &mut Frame<'_>, area: Rect) {
    let titles = Tab::ALL
        .iter()
        .enumerate()
        .map(|(index, tab)| TextLine::from(format!("{} {}", index + 1, tab.label())))
        .collect::<Vec<_>>();

    let tabs = Tabs::new(titles)
        .select(app.tab.index())
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Rgb(0, 0, 238))
                .add_modifier(Modifier::BOLD),
        )
        .divider(Span::raw("|"));

    f.render_widget(tabs, area);
}

fn two_columns(area: Rect) -> (Rect, Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    (columns[0], columns[1])
}

fn stacked(area: Rect, top_percent: u16) -> (Rect, Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(top_percent),
            Constraint::Percentage(100 - top_percent),
        ])
        .split(area);
    (rows[0], rows[1])
}

fn render_revenue_tab(view: &DashboardView, f: &mut Frame<'_>, area: Rect) {
    let (left, right) = two_columns(area);

    let (map, categories) = stacked(left, 60);
    render_geo_scatter(f, map, &view.revenue.map);
    render_bar_chart(f, categories, &view.revenue.categories);

    let (monthly, states) = stacked(right, 50);
    render_line_chart(f, monthly, &view.revenue.monthly);
    render_bar_chart(f, states, &view.revenue.states);
}

fn render_sales_count_tab(app: &App, view: &DashboardView, f: &mut Frame<'_>, area: Rect) {
    let (charts, table) = stacked(area, 55);

    let (map, states) = two_columns(charts);
    render_geo_scatter(f, map, &view.sales_count.map);
    render_bar_chart(f, states, &view.sales_count.states);

    render_sales_table(f, table, &view.records, app.table_offset);
}

fn render_salespeople_tab(view: &DashboardView, f: &mut Frame<'_>, area: Rect) {
    let (left, right) = two_columns(area);
    render_bar_chart(f, left, &view.salespeople.by_revenue);
    render_bar_chart(f, right, &view.salespeople.by_sales);
}

fn render_loading(app: &App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let line = Rect {
        height: inner.height.min(1),
        ..inner
    };
    let throbber = Throbber::default()
        .label("Fetching sales...")
        .style(Style::default().fg(Color::Gray))
        .throbber_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
    let mut state = app.throbber.clone();
    f.render_stateful_widget(throbber, line, &mut state);
}

fn render_error_panel(f: &mut Frame<'_>, area: Rect, error: &str) {
    let block = Block::default()
        .title(" Error ")
        .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let text = Text::from(vec![
        TextLine::from(Span::styled(
            "The dashboard could not be rendered.",
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        TextLine::from(""),
        TextLine::from(Span::styled(
            error.to_string(),
            Style::default().fg(Color::Red),
        )),
        TextLine::from(""),
        TextLine::from(Span::styled(
            "Change any filter or press r to try again.",
            Style::default().fg(Color::Gray),
        )),
    ]);

    f.render_widget(
        Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn render_status(app: &App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(" Status ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let style = if app.error.is_some() {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Green)
    };

    if app.loading {
        let inner = block.inner(area);
        f.render_widget(block, area);
        let throbber = Throbber::default()
            .label(app.status_message.as_str())
            .style(style)
            .throbber_style(Style::default().fg(Color::Yellow));
        let mut state = app.throbber.clone();
        f.render_stateful_widget(throbber, inner, &mut state);
        return;
    }

    f.render_widget(
        Paragraph::new(Span::styled(app.status_message.as_str(), style)).block(block),
        area,
    );
}

fn render_shortcuts(f: &mut Frame<'_>, area: Rect) {
    let key = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let line = TextLine::from(vec![
        Span::styled("Tab", key),
        Span::raw(": Tabs  "),
        Span::styled("↑/↓", key),
        Span::raw(": Filter  "),
        Span::styled("←/→", key),
        Span::raw(": Adjust  "),
        Span::styled("Space", key),
        Span::raw(": Toggle  "),
        Span::styled("/", key),
        Span::raw(": Search  "),
        Span::styled("r", key),
        Span::raw(": Refresh  "),
        Span::styled("?", key),
        Span::raw(": Help  "),
        Span::styled("q", key),
        Span::raw(": Quit"),
    ]);
    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

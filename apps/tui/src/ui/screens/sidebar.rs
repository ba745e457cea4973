use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use sales_dashboard::charts::{MAX_TOP_SALESPEOPLE, MIN_TOP_SALESPEOPLE};
use sales_dashboard::YearFilter;

use crate::app::{App, SidebarField};
use crate::ui::widgets::tables::scroll_offset;

pub const SIDEBAR_WIDTH: u16 = 32;

fn field_style(app: &App, field: SidebarField) -> Style {
    if app.focus == field {
        Style::default()
            .fg(Color::Rgb(0, 0, 238))
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    }
}

fn field_line(app: &App, field: SidebarField, value: String) -> TextLine<'static> {
    let marker = if app.focus == field { "> " } else { "  " };
    TextLine::from(vec![
        Span::styled(format!("{marker}{}: ", field.label()), field_style(app, field)),
        Span::styled(value, Style::default().fg(Color::White)),
    ])
}

/// Filter controls: region, period, salespeople and top-N.
pub fn render_sidebar(app: &App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(" Filters ")
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Region + period
            Constraint::Min(4),    // Salespeople
            Constraint::Length(1), // Top N
        ])
        .split(inner);

    let year_value = if app.all_years {
        format!(
            "{}-{} (all)",
            YearFilter::FIRST_YEAR,
            YearFilter::LAST_YEAR
        )
    } else {
        format!("< {} >", app.year)
    };

    let period = vec![
        field_line(app, SidebarField::Region, format!("< {} >", app.region)),
        field_line(
            app,
            SidebarField::AllYears,
            if app.all_years { "[x]" } else { "[ ]" }.to_string(),
        ),
        field_line(app, SidebarField::Year, year_value),
    ];
    f.render_widget(Paragraph::new(period), sections[0]);

    render_salespeople(app, f, sections[1]);

    let top_n = field_line(
        app,
        SidebarField::TopN,
        format!("< {} > ({MIN_TOP_SALESPEOPLE}-{MAX_TOP_SALESPEOPLE})", app.top_n),
    );
    f.render_widget(Paragraph::new(top_n), sections[2]);
}

fn render_salespeople(app: &App, f: &mut Frame<'_>, area: Rect) {
    let selected = if app.salespeople.is_empty() {
        "all".to_string()
    } else {
        format!("{} selected", app.salespeople.len())
    };

    let mut lines = vec![field_line(app, SidebarField::Salespeople, selected)];

    let query_style = if app.searching {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Gray)
    };
    let cursor = if app.searching { "_" } else { "" };
    lines.push(TextLine::from(Span::styled(
        format!("  / {}{cursor}", app.salesperson_query),
        query_style,
    )));

    let visible = app.visible_salespeople();
    let rows = usize::from(area.height.saturating_sub(2));
    let offset = scroll_offset(visible.len(), rows, app.salesperson_cursor);
    let focused = app.focus == SidebarField::Salespeople;

    if visible.is_empty() {
        lines.push(TextLine::from(Span::styled(
            "  (no salespeople)",
            Style::default().fg(Color::DarkGray),
        )));
    }

    for (index, name) in visible.iter().enumerate().skip(offset).take(rows) {
        let checked = if app.salespeople.contains(*name) {
            "[x]"
        } else {
            "[ ]"
        };
        let style = if focused && index == app.salesperson_cursor {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        lines.push(TextLine::from(Span::styled(
            format!("  {checked} {name}"),
            style,
        )));
    }

    f.render_widget(Paragraph::new(lines), area);
}

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Cell, Row, Table};
use ratatui::Frame;

use sales_dashboard::data::models::PURCHASE_DATE_FORMAT;
use sales_dashboard::data::SalesRecord;

use crate::ui::widgets::charts::chart_block;

/// First row to draw so that `selected_index` stays visible.
pub const fn scroll_offset(
    total_rows: usize,
    max_visible_rows: usize,
    selected_index: usize,
) -> usize {
    if total_rows <= max_visible_rows {
        return 0;
    }

    if selected_index >= max_visible_rows {
        return selected_index.saturating_sub(max_visible_rows) + 1;
    }

    0
}

fn optional<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |value| value.to_string())
}

/// The filtered records, starting at `offset`.
pub fn render_sales_table(f: &mut Frame<'_>, area: Rect, records: &[SalesRecord], offset: usize) {
    let header = Row::new(
        [
            "Date",
            "Product",
            "Category",
            "Price",
            "Freight",
            "Salesperson",
            "Location",
            "Rating",
            "Payment",
            "Inst.",
        ]
        .into_iter()
        .map(Cell::from),
    )
    .style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let visible = usize::from(area.height.saturating_sub(3));
    let rows: Vec<Row<'_>> = records
        .iter()
        .skip(offset)
        .take(visible)
        .map(|record| {
            Row::new(vec![
                Cell::from(record.purchase_date.format(PURCHASE_DATE_FORMAT).to_string()),
                Cell::from(record.product.as_str()),
                Cell::from(record.category.as_str()),
                Cell::from(format!("{:.2}", record.price)),
                Cell::from(format!("{:.2}", record.freight)),
                Cell::from(record.salesperson.as_str()),
                Cell::from(record.location.as_str()),
                Cell::from(optional(record.rating)),
                Cell::from(record.payment_type.as_str()),
                Cell::from(optional(record.installments)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(10),
        Constraint::Min(14),
        Constraint::Length(14),
        Constraint::Length(9),
        Constraint::Length(7),
        Constraint::Length(16),
        Constraint::Length(8),
        Constraint::Length(6),
        Constraint::Length(15),
        Constraint::Length(5),
    ];

    let title = if records.is_empty() {
        "Sales (0)".to_string()
    } else {
        format!(
            "Sales ({}-{} of {})",
            offset + 1,
            (offset + visible).min(records.len()),
            records.len()
        )
    };

    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .block(chart_block(&title));
    f.render_widget(table, area);
}

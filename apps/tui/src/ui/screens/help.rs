use ratatui::layout::Alignment;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::cli::CliArgs;
use crate::ui::widgets::popup::{centered_rect, ClearWidget};

const KEY_BINDINGS: [(&str, &str); 12] = [
    ("Tab / Shift-Tab / 1-3", "Switch tab"),
    ("Up / Down", "Move between filters"),
    ("Left / Right", "Adjust the focused filter"),
    ("Space / Enter", "Toggle all years or the salesperson under the cursor"),
    ("/", "Search salespeople (Enter keeps, Esc clears)"),
    ("c", "Clear the salesperson selection"),
    ("PgUp / PgDn", "Scroll the sales table"),
    ("r", "Fetch again"),
    ("?", "Toggle this help"),
    ("Esc", "Close this help"),
    ("q", "Quit"),
    ("F1", "Toggle this help"),
];

pub fn render_help_popup(f: &mut Frame<'_>) {
    let area = centered_rect(70, 80, f.area());
    f.render_widget(ClearWidget, area);

    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<TextLine<'_>> = KEY_BINDINGS
        .iter()
        .map(|(keys, action)| {
            TextLine::from(vec![
                Span::styled(format!("{keys:<24}"), key_style),
                Span::raw(*action),
            ])
        })
        .collect();

    lines.push(TextLine::from(""));
    lines.extend(
        CliArgs::help_text()
            .lines()
            .map(|line| TextLine::from(Span::styled(line.to_string(), Style::default().fg(Color::Gray)))),
    );

    let block = Block::default()
        .title(" Help ")
        .title_style(key_style)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    f.render_widget(
        Paragraph::new(Text::from(lines))
            .block(block)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: false }),
        area,
    );
}

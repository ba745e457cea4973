use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::convert::TryFrom;
use std::fmt;
use std::io::Stdout;
use std::time::Duration;

use sales_dashboard::charts::{si_label, BarChartSpec};
use sales_dashboard::DashboardView;

use crate::app::{handle_input, App};
use crate::ui;

// States of one dashboard refresh
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum RefreshState {
    Idle,
    Fetching,
    Ready,
    Failed,
}

impl fmt::Display for RefreshState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Fetching => write!(f, "Fetching"),
            Self::Ready => write!(f, "Ready"),
            Self::Failed => write!(f, "Failed"),
        }
    }
}

#[derive(Clone, Debug)]
enum RefreshEvent {
    Start,
    Loaded(usize),
    Failed(String),
    Reset,
}

impl fmt::Display for RefreshEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => write!(f, "Start"),
            Self::Loaded(count) => write!(f, "Loaded({count})"),
            Self::Failed(msg) => write!(f, "Failed({msg})"),
            Self::Reset => write!(f, "Reset"),
        }
    }
}

#[derive(Debug)]
struct StateTransitionError {
    from: RefreshState,
    event: RefreshEvent,
}

impl fmt::Display for StateTransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid transition from {} with event {}",
            self.from, self.event
        )
    }
}

impl std::error::Error for StateTransitionError {}

struct RefreshMachine {
    state: RefreshState,
}

impl RefreshMachine {
    const fn new() -> Self {
        Self {
            state: RefreshState::Idle,
        }
    }

    const fn state(&self) -> RefreshState {
        self.state
    }

    fn process_event(
        &mut self,
        event: &RefreshEvent,
        app: &mut App,
    ) -> std::result::Result<(), StateTransitionError> {
        let next_state = NextState::try_from((self.state, event, app))?;
        self.state = next_state.0;
        Ok(())
    }

    /// Drives one refresh through every state, back to `Idle`.
    async fn refresh<F>(&mut self, app: &mut App, mut redraw: F)
    where
        F: FnMut(&mut App),
    {
        if self.process_event(&RefreshEvent::Start, app).is_err() {
            return;
        }
        redraw(app);

        let event = match app.refresh_view().await {
            Ok(count) => RefreshEvent::Loaded(count),
            Err(err) => RefreshEvent::Failed(err.to_string()),
        };
        if let Err(err) = self.process_event(&event, app) {
            tracing::warn!(%err, "Refresh state machine rejected event");
        }
        if let Err(err) = self.process_event(&RefreshEvent::Reset, app) {
            tracing::warn!(%err, "Refresh state machine rejected reset");
        }
    }
}

struct NextState(RefreshState);

impl TryFrom<(RefreshState, &RefreshEvent, &mut App)> for NextState {
    type Error = StateTransitionError;

    fn try_from(
        value: (RefreshState, &RefreshEvent, &mut App),
    ) -> std::result::Result<Self, Self::Error> {
        let (current_state, event, app) = value;

        match (current_state, event) {
            (RefreshState::Idle, RefreshEvent::Start) => {
                app.loading = true;
                app.status_message = format!("Fetching sales from {}...", app.actions.origin());
                Ok(Self(RefreshState::Fetching))
            }
            (RefreshState::Fetching, RefreshEvent::Loaded(count)) => {
                app.loading = false;
                app.status_message = format!("Showing {count} sales");
                Ok(Self(RefreshState::Ready))
            }
            (RefreshState::Fetching, RefreshEvent::Failed(error)) => {
                app.loading = false;
                app.status_message = format!("Error: {error}");
                Ok(Self(RefreshState::Failed))
            }
            (RefreshState::Ready | RefreshState::Failed, RefreshEvent::Reset) => {
                Ok(Self(RefreshState::Idle))
            }
            _ => Err(StateTransitionError {
                from: current_state,
                event: event.clone(),
            }),
        }
    }
}

/// Renders the dashboard once and prints it.
pub async fn run_headless(app: &mut App, json: bool) -> Result<()> {
    app.refresh_view().await?;
    let Some(view) = app.view.as_ref() else {
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(view)?);
    } else {
        print!("{}", headless_report(view));
    }
    Ok(())
}

fn headless_report(view: &DashboardView) -> String {
    let selection = &view.selection;
    let mut out = String::new();

    out.push_str("\nSales Dashboard\n");
    out.push_str("===============\n");
    out.push_str(&format!(
        "Region: {} | Year: {} | Salespeople: {}\n",
        selection.region,
        selection.year,
        if selection.salespeople.is_empty() {
            "all".to_string()
        } else {
            selection
                .salespeople
                .iter()
                .cloned()
                .collect::<Vec<_>>()
                .join(", ")
        }
    ));
    out.push_str(&format!("Revenue: {}\n", view.metrics.revenue_label));
    out.push_str(&format!("Items sold: {}\n", view.metrics.items_label));

    for chart in [
        &view.revenue.states,
        &view.revenue.categories,
        &view.sales_count.states,
        &view.salespeople.by_revenue,
        &view.salespeople.by_sales,
    ] {
        push_bar_section(&mut out, chart);
    }

    out.push_str(&format!("\n{}:\n", view.revenue.monthly.title));
    for series in &view.revenue.monthly.series {
        let months = series
            .points
            .iter()
            .map(|(month, value)| format!("{month:02}={}", si_label(*value)))
            .collect::<Vec<_>>()
            .join(" ");
        out.push_str(&format!("- {}: {months}\n", series.year));
    }
    out
}

fn push_bar_section(out: &mut String, chart: &BarChartSpec) {
    out.push_str(&format!("\n{}:\n", chart.title));
    if chart.bars.is_empty() {
        out.push_str("- (no data)\n");
    }
    for bar in &chart.bars {
        out.push_str(&format!(
            "- {}: {}\n",
            bar.label,
            chart.value_label.render(bar.value)
        ));
    }
}

/// Run the main application event loop
pub async fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    // Configure event poll timeout (ms)
    const EVENT_POLL_TIMEOUT: u64 = 50;

    let mut refresh_machine = RefreshMachine::new();

    loop {
        app.tick();

        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(color_eyre::eyre::eyre!("Terminal draw error: {e}"));
        }

        if app.refresh_requested && refresh_machine.state() == RefreshState::Idle {
            refresh_machine
                .refresh(app, |app| {
                    if let Err(err) = terminal.draw(|f| ui::ui(app, f)) {
                        tracing::warn!(%err, "Redraw before fetch failed");
                    }
                })
                .await;
            continue;
        }

        if matches!(
            event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT)),
            Ok(true)
        ) {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    handle_input(app, key.code);
                    if !app.running {
                        break;
                    }
                }
                Ok(Event::Resize(_, _)) => {
                    if let Err(err) = terminal.draw(|f| ui::ui(app, f)) {
                        tracing::warn!(%err, "Redraw after resize failed");
                    }
                }
                Ok(_) => {}
                Err(err) => tracing::warn!(%err, "Failed to read terminal event"),
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::tests::{app_with, sale};

    #[tokio::test]
    async fn refresh_machine_returns_to_idle_after_success() {
        let mut app = app_with(vec![sale("SP", "Ana", 10.0)], false);
        let mut machine = RefreshMachine::new();
        let mut redraws = 0;

        machine
            .refresh(&mut app, |app| {
                assert!(app.loading);
                redraws += 1;
            })
            .await;

        assert_eq!(redraws, 1);
        assert_eq!(machine.state(), RefreshState::Idle);
        assert!(!app.loading);
        assert!(!app.refresh_requested);
        assert_eq!(app.status_message, "Showing 1 sales");
    }

    #[tokio::test]
    async fn refresh_machine_records_failures() {
        let mut app = app_with(Vec::new(), true);
        let mut machine = RefreshMachine::new();
        machine.refresh(&mut app, |_| {}).await;

        assert_eq!(machine.state(), RefreshState::Idle);
        assert!(app.status_message.starts_with("Error:"));
        assert!(app.error.is_some());
    }

    #[test]
    fn invalid_transitions_are_rejected() {
        let mut app = app_with(Vec::new(), false);
        let mut machine = RefreshMachine::new();
        let err = machine
            .process_event(&RefreshEvent::Reset, &mut app)
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid transition from Idle with event Reset");
    }

    #[tokio::test]
    async fn headless_report_lists_metrics_and_charts() {
        let mut app = app_with(
            vec![sale("SP", "Ana", 10.0), sale("RJ", "Bruno", 20.0)],
            false,
        );
        app.refresh_view().await.unwrap();
        let report = headless_report(app.view.as_ref().unwrap());

        assert!(report.contains("Region: Brasil | Year: All years | Salespeople: all"));
        assert!(report.contains("Revenue: R$ 30.00 "));
        assert!(report.contains("Items sold: 2.00 "));
        assert!(report.contains("Top 5 Salespeople (revenue):\n- Bruno: 20\n- Ana: 10\n"));
    }
}

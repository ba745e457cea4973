use sales_dashboard::charts::{clamp_top_n, MAX_TOP_SALESPEOPLE, MIN_TOP_SALESPEOPLE};
use sales_dashboard::data::filter::search_options;
use sales_dashboard::data::FetchError;
use sales_dashboard::{DashboardView, FilterSelection, Region, RenderContext, YearFilter};
use std::collections::BTreeSet;
use throbber_widgets_tui::ThrobberState;

use crate::app::actions::AppActions;
use crate::app::input::helpers::{wrap_decrement, wrap_increment, wrap_step};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Revenue,
    SalesCount,
    Salespeople,
}

impl Tab {
    pub const ALL: [Self; 3] = [Self::Revenue, Self::SalesCount, Self::Salespeople];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Revenue => "Revenue",
            Self::SalesCount => "Sales Count",
            Self::Salespeople => "Salespeople",
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Revenue => 0,
            Self::SalesCount => 1,
            Self::Salespeople => 2,
        }
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Revenue),
            1 => Some(Self::SalesCount),
            2 => Some(Self::Salespeople),
            _ => None,
        }
    }
}

/// Sidebar control that currently receives Left / Right / Space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SidebarField {
    #[default]
    Region,
    AllYears,
    Year,
    Salespeople,
    TopN,
}

impl SidebarField {
    pub const ALL: [Self; 5] = [
        Self::Region,
        Self::AllYears,
        Self::Year,
        Self::Salespeople,
        Self::TopN,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Region => "Region",
            Self::AllYears => "All years",
            Self::Year => "Year",
            Self::Salespeople => "Salespeople",
            Self::TopN => "Top N",
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Region => 0,
            Self::AllYears => 1,
            Self::Year => 2,
            Self::Salespeople => 3,
            Self::TopN => 4,
        }
    }
}

#[derive(Debug)]
pub struct App {
    pub running: bool,
    pub actions: AppActions,
    pub region: Region,
    pub all_years: bool,
    pub year: u16,
    pub salespeople: BTreeSet<String>,
    pub top_n: usize,
    pub tab: Tab,
    pub focus: SidebarField,
    pub salesperson_cursor: usize,
    pub salesperson_query: String,
    pub searching: bool,
    pub table_offset: usize,
    pub view: Option<DashboardView>,
    pub error: Option<String>,
    pub status_message: String,
    pub show_help: bool,
    /// Set by any control change; the event loop re-renders and clears it.
    pub refresh_requested: bool,
    pub loading: bool,
    pub throbber: ThrobberState,
}

impl App {
    pub fn new(actions: AppActions, selection: FilterSelection, top_n: usize) -> Self {
        let (all_years, year) = match selection.year {
            YearFilter::All => (true, YearFilter::FIRST_YEAR),
            YearFilter::Year(year) => (false, year),
        };

        Self {
            running: true,
            actions,
            region: selection.region,
            all_years,
            year,
            salespeople: selection.salespeople,
            top_n: clamp_top_n(top_n),
            tab: Tab::default(),
            focus: SidebarField::default(),
            salesperson_cursor: 0,
            salesperson_query: String::new(),
            searching: false,
            table_offset: 0,
            view: None,
            error: None,
            status_message: String::new(),
            show_help: false,
            refresh_requested: true,
            loading: false,
            throbber: ThrobberState::default(),
        }
    }

    pub fn year_filter(&self) -> YearFilter {
        if self.all_years {
            YearFilter::All
        } else {
            YearFilter::year(self.year)
        }
    }

    pub fn render_context(&self) -> RenderContext {
        RenderContext::new(
            FilterSelection {
                region: self.region,
                year: self.year_filter(),
                salespeople: self.salespeople.clone(),
            },
            self.top_n,
        )
    }

    pub fn request_refresh(&mut self) {
        self.refresh_requested = true;
    }

    /// Runs the whole pipeline for the current controls. On failure the
    /// previous view is dropped and the error is kept for the error panel.
    pub async fn refresh_view(&mut self) -> Result<usize, FetchError> {
        self.refresh_requested = false;
        let context = self.render_context();

        match self.actions.render(&context).await {
            Ok(view) => {
                let shown = view.records.len();
                self.salespeople.clone_from(&view.selection.salespeople);
                self.view = Some(view);
                self.error = None;
                self.table_offset = 0;
                self.clamp_salesperson_cursor();
                Ok(shown)
            }
            Err(err) => {
                self.view = None;
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    pub fn tick(&mut self) {
        if self.loading {
            self.throbber.calc_next();
        }
    }

    pub fn salesperson_options(&self) -> &[String] {
        self.view
            .as_ref()
            .map(|view| view.salesperson_options.as_slice())
            .unwrap_or_default()
    }

    /// Options shown in the sidebar list, narrowed by the search query.
    pub fn visible_salespeople(&self) -> Vec<&str> {
        search_options(self.salesperson_options(), &self.salesperson_query)
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.tab = tab;
    }

    pub fn next_tab(&mut self) {
        let index = wrap_increment(self.tab.index(), Tab::ALL.len());
        self.tab = Tab::from_index(index).unwrap_or_default();
    }

    pub fn prev_tab(&mut self) {
        let index = wrap_decrement(self.tab.index(), Tab::ALL.len());
        self.tab = Tab::from_index(index).unwrap_or_default();
    }

    pub fn focus_next(&mut self) {
        self.focus = SidebarField::ALL[wrap_increment(self.focus.index(), SidebarField::ALL.len())];
    }

    pub fn focus_prev(&mut self) {
        self.focus = SidebarField::ALL[wrap_decrement(self.focus.index(), SidebarField::ALL.len())];
    }

    pub fn cycle_region(&mut self, forward: bool) {
        let index = wrap_step(self.region.index(), Region::ALL.len(), forward);
        self.region = Region::from_index(index).unwrap_or_default();
        self.request_refresh();
    }

    pub fn toggle_all_years(&mut self) {
        self.all_years = !self.all_years;
        self.request_refresh();
    }

    /// Moves the year slider. Ignored while every year is selected.
    pub fn step_year(&mut self, forward: bool) {
        if self.all_years {
            self.status_message = "Untick \"All years\" to pick a single year".to_string();
            return;
        }

        let year = if forward {
            self.year.saturating_add(1)
        } else {
            self.year.saturating_sub(1)
        }
        .clamp(YearFilter::FIRST_YEAR, YearFilter::LAST_YEAR);

        if year != self.year {
            self.year = year;
            self.request_refresh();
        }
    }

    pub fn step_top_n(&mut self, forward: bool) {
        let top_n = if forward {
            (self.top_n + 1).min(MAX_TOP_SALESPEOPLE)
        } else {
            self.top_n.saturating_sub(1).max(MIN_TOP_SALESPEOPLE)
        };

        if top_n != self.top_n {
            self.top_n = top_n;
            self.request_refresh();
        }
    }

    pub fn move_salesperson_cursor(&mut self, forward: bool) {
        let len = self.visible_salespeople().len();
        self.salesperson_cursor = wrap_step(self.salesperson_cursor, len, forward);
    }

    pub fn toggle_salesperson_at_cursor(&mut self) {
        let Some(name) = self
            .visible_salespeople()
            .get(self.salesperson_cursor)
            .map(|name| (*name).to_string())
        else {
            return;
        };

        if !self.salespeople.remove(&name) {
            self.salespeople.insert(name);
        }
        self.request_refresh();
    }

    pub fn clear_salespeople(&mut self) {
        if !self.salespeople.is_empty() {
            self.salespeople.clear();
            self.request_refresh();
        }
    }

    pub fn push_search_char(&mut self, ch: char) {
        self.salesperson_query.push(ch);
        self.salesperson_cursor = 0;
    }

    pub fn pop_search_char(&mut self) {
        self.salesperson_query.pop();
        self.salesperson_cursor = 0;
    }

    pub fn scroll_table(&mut self, forward: bool, page: usize) {
        let rows = self.view.as_ref().map_or(0, |view| view.records.len());
        self.table_offset = if forward {
            (self.table_offset + page).min(rows.saturating_sub(1))
        } else {
            self.table_offset.saturating_sub(page)
        };
    }

    fn clamp_salesperson_cursor(&mut self) {
        let len = self.visible_salespeople().len();
        if self.salesperson_cursor >= len {
            self.salesperson_cursor = len.saturating_sub(1);
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use sales_dashboard::data::{SalesRecord, SalesSource};

    pub(crate) struct StubSource {
        pub records: Vec<SalesRecord>,
        pub fail: bool,
    }

    #[async_trait]
    impl SalesSource for StubSource {
        async fn fetch_sales(
            &self,
            _region: Region,
            _year: YearFilter,
        ) -> Result<Vec<SalesRecord>, FetchError> {
            if self.fail {
                return Err(FetchError::Status {
                    url: "http://sales.invalid/produtos".to_string(),
                    status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
                });
            }
            Ok(self.records.clone())
        }
    }

    pub(crate) fn sale(location: &str, salesperson: &str, price: f64) -> SalesRecord {
        SalesRecord {
            product: "Livro".to_string(),
            category: "livros".to_string(),
            price,
            freight: 0.0,
            purchase_date: NaiveDate::from_ymd_opt(2021, 3, 14).unwrap(),
            salesperson: salesperson.to_string(),
            location: location.to_string(),
            rating: Some(4),
            payment_type: "boleto".to_string(),
            installments: Some(1),
            lat: -23.5,
            lon: -46.6,
        }
    }

    pub(crate) fn app_with(records: Vec<SalesRecord>, fail: bool) -> App {
        let actions = AppActions::new(Box::new(StubSource { records, fail }), "stub");
        App::new(actions, FilterSelection::default(), 5)
    }

    fn sample() -> Vec<SalesRecord> {
        vec![
            sale("SP", "Ana", 10.0),
            sale("RJ", "Bruno", 20.0),
            sale("SP", "Carla", 30.0),
        ]
    }

    #[test]
    fn new_app_starts_with_a_pending_refresh() {
        let app = app_with(Vec::new(), false);
        assert!(app.refresh_requested);
        assert_eq!(app.year_filter(), YearFilter::All);
        assert_eq!(app.render_context(), RenderContext::default());
    }

    #[test]
    fn control_changes_schedule_a_refresh() {
        let mut app = app_with(Vec::new(), false);
        app.refresh_requested = false;

        app.cycle_region(true);
        assert_eq!(app.region, Region::CentroOeste);
        assert!(app.refresh_requested);

        app.refresh_requested = false;
        app.toggle_all_years();
        app.step_year(true);
        assert_eq!(app.year_filter(), YearFilter::Year(YearFilter::FIRST_YEAR + 1));
        assert!(app.refresh_requested);

        app.refresh_requested = false;
        app.step_top_n(true);
        assert_eq!(app.top_n, 6);
        assert!(app.refresh_requested);
    }

    #[test]
    fn year_and_top_n_stay_in_range() {
        let mut app = app_with(Vec::new(), false);
        app.step_year(true);
        assert!(app.all_years);

        app.all_years = false;
        for _ in 0..10 {
            app.step_year(true);
        }
        assert_eq!(app.year, YearFilter::LAST_YEAR);

        for _ in 0..20 {
            app.step_top_n(false);
        }
        assert_eq!(app.top_n, MIN_TOP_SALESPEOPLE);
    }

    #[test]
    fn region_cycles_backwards_from_brasil() {
        let mut app = app_with(Vec::new(), false);
        app.cycle_region(false);
        assert_eq!(app.region, Region::Sudeste);
    }

    #[tokio::test]
    async fn refresh_populates_the_view() {
        let mut app = app_with(sample(), false);
        let shown = app.refresh_view().await.unwrap();

        assert_eq!(shown, 3);
        assert!(!app.refresh_requested);
        assert!(app.error.is_none());
        assert_eq!(app.salesperson_options(), ["Ana", "Bruno", "Carla"]);
    }

    #[tokio::test]
    async fn toggling_a_salesperson_narrows_the_next_render() {
        let mut app = app_with(sample(), false);
        app.refresh_view().await.unwrap();

        app.move_salesperson_cursor(true);
        app.toggle_salesperson_at_cursor();
        assert!(app.salespeople.contains("Bruno"));
        assert!(app.refresh_requested);

        let shown = app.refresh_view().await.unwrap();
        assert_eq!(shown, 1);

        app.clear_salespeople();
        assert!(app.salespeople.is_empty());
    }

    #[tokio::test]
    async fn search_narrows_visible_salespeople() {
        let mut app = app_with(sample(), false);
        app.refresh_view().await.unwrap();

        for ch in "carl".chars() {
            app.push_search_char(ch);
        }
        assert_eq!(app.visible_salespeople(), ["Carla"]);

        app.pop_search_char();
        app.salesperson_query.clear();
        assert_eq!(app.visible_salespeople().len(), 3);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_the_error() {
        let mut app = app_with(sample(), true);
        assert!(app.refresh_view().await.is_err());
        assert!(app.view.is_none());
        assert!(app.error.as_deref().is_some_and(|e| e.contains("503")));
    }

    #[tokio::test]
    async fn table_scroll_is_bounded_by_rows() {
        let mut app = app_with(sample(), false);
        app.refresh_view().await.unwrap();

        app.scroll_table(true, 10);
        assert_eq!(app.table_offset, 2);
        app.scroll_table(false, 10);
        assert_eq!(app.table_offset, 0);
    }

    #[test]
    fn tabs_wrap_in_both_directions() {
        let mut app = app_with(Vec::new(), false);
        app.prev_tab();
        assert_eq!(app.tab, Tab::Salespeople);
        app.next_tab();
        assert_eq!(app.tab, Tab::Revenue);

        app.focus_prev();
        assert_eq!(app.focus, SidebarField::TopN);
        app.focus_next();
        assert_eq!(app.focus, SidebarField::Region);
    }
}

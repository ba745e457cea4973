//! The render pipeline: fetch, filter, aggregate, chart.
//!
//! Every interaction calls [`render`] with the current [`RenderContext`]
//! and gets a complete [`DashboardView`] back. Nothing is cached between
//! calls.

use serde::Serialize;

use crate::charts::{self, BarChartSpec, GeoScatterSpec, LineChartSpec};
use crate::data::aggregate::{total_revenue, SalesSummary};
use crate::data::filter::{effective_selection, filter_by_salespeople, salesperson_options};
use crate::data::{FetchError, SalesRecord, SalesSource};
use crate::domain::FilterSelection;
use crate::format::{format_count, format_number};

pub const CURRENCY_PREFIX: &str = "R$";

/// Inputs of one render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderContext {
    pub selection: FilterSelection,
    pub top_n: usize,
}

impl RenderContext {
    pub fn new(selection: FilterSelection, top_n: usize) -> Self {
        Self {
            selection,
            top_n: charts::clamp_top_n(top_n),
        }
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new(FilterSelection::default(), charts::DEFAULT_TOP_SALESPEOPLE)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metrics {
    pub revenue: f64,
    pub items: usize,
    pub revenue_label: String,
    pub items_label: String,
}

impl Metrics {
    pub fn from_records(records: &[SalesRecord]) -> Self {
        let revenue = total_revenue(records);
        Self {
            revenue,
            items: records.len(),
            revenue_label: format_number(revenue, CURRENCY_PREFIX),
            items_label: format_count(records.len()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenueTab {
    pub map: GeoScatterSpec,
    pub monthly: LineChartSpec,
    pub states: BarChartSpec,
    pub categories: BarChartSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesCountTab {
    pub map: GeoScatterSpec,
    pub states: BarChartSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalespeopleTab {
    pub top_n: usize,
    pub by_revenue: BarChartSpec,
    pub by_sales: BarChartSpec,
}

/// Everything the screen shows for one filter selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    /// Selection actually applied; unknown salespeople are dropped.
    pub selection: FilterSelection,
    pub salesperson_options: Vec<String>,
    pub fetched: usize,
    pub metrics: Metrics,
    pub summary: SalesSummary,
    pub revenue: RevenueTab,
    pub sales_count: SalesCountTab,
    pub salespeople: SalespeopleTab,
    #[serde(skip)]
    pub records: Vec<SalesRecord>,
}

/// Fetches the sales for `context` and builds the view from them.
pub async fn render<S>(source: &S, context: &RenderContext) -> Result<DashboardView, FetchError>
where
    S: SalesSource + ?Sized,
{
    let selection = &context.selection;
    let records = source.fetch_sales(selection.region, selection.year).await?;
    Ok(build_view(records, context))
}

/// Builds the view from already fetched records.
pub fn build_view(records: Vec<SalesRecord>, context: &RenderContext) -> DashboardView {
    let fetched = records.len();
    let options = salesperson_options(&records);

    let mut selection = context.selection.clone();
    selection.salespeople = effective_selection(&selection.salespeople, &options);

    let records = filter_by_salespeople(records, &selection.salespeople);
    let summary = SalesSummary::from_records(&records);
    let top_n = charts::clamp_top_n(context.top_n);

    tracing::debug!(
        fetched,
        filtered = records.len(),
        states = summary.revenue_by_state.len(),
        "Built dashboard view"
    );

    DashboardView {
        salesperson_options: options,
        fetched,
        metrics: Metrics::from_records(&records),
        revenue: RevenueTab {
            map: charts::state_revenue_map(&summary.revenue_by_state),
            monthly: charts::monthly_revenue_line(&summary.revenue_by_month),
            states: charts::state_revenue_bar(&summary.revenue_by_state),
            categories: charts::category_revenue_bar(&summary.revenue_by_category),
        },
        sales_count: SalesCountTab {
            map: charts::state_sales_map(&summary.sales_by_state),
            states: charts::state_sales_bar(&summary.sales_by_state),
        },
        salespeople: SalespeopleTab {
            top_n,
            by_revenue: charts::top_salespeople_by_revenue(&summary.salespeople, top_n),
            by_sales: charts::top_salespeople_by_sales(&summary.salespeople, top_n),
        },
        selection,
        summary,
        records,
    }
}

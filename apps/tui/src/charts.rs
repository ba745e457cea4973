//! Chart specifications built from summary tables.
//!
//! Everything here is independent of the terminal: a spec says what to
//! plot (title, ordered points, axis bounds, label style) and the UI layer
//! decides how to draw it.

use serde::Serialize;

use crate::data::{CategoryRevenue, MonthlyRevenue, SalespersonStats, StateRevenue, StateSales};

pub const TOP_STATES: usize = 5;
pub const TOP_CATEGORIES: usize = 5;
pub const MIN_TOP_SALESPEOPLE: usize = 2;
pub const MAX_TOP_SALESPEOPLE: usize = 10;
pub const DEFAULT_TOP_SALESPEOPLE: usize = 5;

pub fn clamp_top_n(n: usize) -> usize {
    n.clamp(MIN_TOP_SALESPEOPLE, MAX_TOP_SALESPEOPLE)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BarOrientation {
    Vertical,
    Horizontal,
}

/// How values are printed next to their bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ValueLabel {
    /// Two significant digits with an SI suffix (`2.5M`, `840k`).
    Si,
    /// The value itself.
    Plain,
}

impl ValueLabel {
    pub fn render(self, value: f64) -> String {
        match self {
            Self::Si => si_label(value),
            Self::Plain => plain_label(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarPoint {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChartSpec {
    pub title: String,
    pub value_title: String,
    pub orientation: BarOrientation,
    pub value_label: ValueLabel,
    pub bars: Vec<BarPoint>,
}

impl BarChartSpec {
    pub fn max_value(&self) -> f64 {
        self.bars.iter().map(|bar| bar.value).fold(0.0, f64::max)
    }
}

/// Geographic window a scatter map is bounded to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GeoScope {
    SouthAmerica,
}

impl GeoScope {
    pub const fn lon_bounds(self) -> [f64; 2] {
        match self {
            Self::SouthAmerica => [-82.0, -34.0],
        }
    }

    pub const fn lat_bounds(self) -> [f64; 2] {
        match self {
            Self::SouthAmerica => [-56.0, 13.0],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoPoint {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    /// Marker size relative to the largest point, in `(0, 1]`.
    pub size: f64,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoScatterSpec {
    pub title: String,
    pub scope: GeoScope,
    pub points: Vec<GeoPoint>,
    /// Whether hover labels include latitude / longitude.
    pub show_coordinates: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineSeries {
    pub year: i32,
    /// `(month, value)` pairs, month in `1..=12`.
    pub points: Vec<(u32, f64)>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineChartSpec {
    pub title: String,
    pub y_title: String,
    pub y_range: [f64; 2],
    pub markers: bool,
    pub series: Vec<LineSeries>,
}

pub fn state_revenue_bar(rows: &[StateRevenue]) -> BarChartSpec {
    BarChartSpec {
        title: "Revenue by State".to_string(),
        value_title: "Revenue".to_string(),
        orientation: BarOrientation::Vertical,
        value_label: ValueLabel::Si,
        bars: rows
            .iter()
            .take(TOP_STATES)
            .map(|row| BarPoint {
                label: row.location.clone(),
                value: row.value,
            })
            .collect(),
    }
}

#[allow(clippy::cast_precision_loss)]
pub fn state_sales_bar(rows: &[StateSales]) -> BarChartSpec {
    BarChartSpec {
        title: "Sales by State".to_string(),
        value_title: "Sales".to_string(),
        orientation: BarOrientation::Vertical,
        value_label: ValueLabel::Plain,
        bars: rows
            .iter()
            .take(TOP_STATES)
            .map(|row| BarPoint {
                label: row.location.clone(),
                value: row.value as f64,
            })
            .collect(),
    }
}

pub fn state_revenue_map(rows: &[StateRevenue]) -> GeoScatterSpec {
    geo_scatter(
        "Revenue by State",
        rows.iter()
            .map(|row| (row.location.as_str(), row.lat, row.lon, row.value)),
    )
}

#[allow(clippy::cast_precision_loss)]
pub fn state_sales_map(rows: &[StateSales]) -> GeoScatterSpec {
    geo_scatter(
        "Sales by State",
        rows.iter()
            .map(|row| (row.location.as_str(), row.lat, row.lon, row.value as f64)),
    )
}

fn geo_scatter<'a>(
    title: &str,
    rows: impl Iterator<Item = (&'a str, f64, f64, f64)> + Clone,
) -> GeoScatterSpec {
    let max = rows.clone().map(|(_, _, _, value)| value).fold(0.0, f64::max);
    let points = rows
        .map(|(name, lat, lon, value)| GeoPoint {
            name: name.to_string(),
            lat,
            lon,
            size: if max > 0.0 { value / max } else { 0.0 },
            value,
        })
        .collect();

    GeoScatterSpec {
        title: title.to_string(),
        scope: GeoScope::SouthAmerica,
        points,
        show_coordinates: false,
    }
}

/// One line per year over the months of that year.
pub fn monthly_revenue_line(rows: &[MonthlyRevenue]) -> LineChartSpec {
    let mut series: Vec<LineSeries> = Vec::new();
    for row in rows {
        match series.last_mut() {
            Some(current) if current.year == row.year => {
                current.points.push((row.month, row.revenue));
            }
            _ => series.push(LineSeries {
                year: row.year,
                points: vec![(row.month, row.revenue)],
            }),
        }
    }

    let max = rows.iter().map(|row| row.revenue).fold(0.0, f64::max);

    LineChartSpec {
        title: "Monthly Revenue".to_string(),
        y_title: "Revenue".to_string(),
        y_range: [0.0, max],
        markers: true,
        series,
    }
}

pub fn category_revenue_bar(rows: &[CategoryRevenue]) -> BarChartSpec {
    BarChartSpec {
        title: "Revenue by Category".to_string(),
        value_title: "Revenue".to_string(),
        orientation: BarOrientation::Vertical,
        value_label: ValueLabel::Plain,
        bars: rows
            .iter()
            .take(TOP_CATEGORIES)
            .map(|row| BarPoint {
                label: row.category.clone(),
                value: row.revenue,
            })
            .collect(),
    }
}

pub fn top_salespeople_by_revenue(stats: &[SalespersonStats], n: usize) -> BarChartSpec {
    let n = clamp_top_n(n);
    top_salespeople(
        format!("Top {n} Salespeople (revenue)"),
        "Revenue",
        stats,
        n,
        |row| row.revenue,
    )
}

#[allow(clippy::cast_precision_loss)]
pub fn top_salespeople_by_sales(stats: &[SalespersonStats], n: usize) -> BarChartSpec {
    let n = clamp_top_n(n);
    top_salespeople(
        format!("Top {n} Salespeople (sales count)"),
        "Sales",
        stats,
        n,
        |row| row.sales as f64,
    )
}

fn top_salespeople(
    title: String,
    value_title: &str,
    stats: &[SalespersonStats],
    n: usize,
    measure: impl Fn(&SalespersonStats) -> f64,
) -> BarChartSpec {
    let mut bars: Vec<BarPoint> = stats
        .iter()
        .map(|row| BarPoint {
            label: row.salesperson.clone(),
            value: measure(row),
        })
        .collect();
    bars.sort_by(|a, b| b.value.total_cmp(&a.value));
    bars.truncate(n);

    BarChartSpec {
        title,
        value_title: value_title.to_string(),
        orientation: BarOrientation::Horizontal,
        value_label: ValueLabel::Plain,
        bars,
    }
}

/// Formats with two significant digits and an SI suffix: `2500000.0`
/// becomes `2.5M`, `842.0` becomes `840`.
pub fn si_label(value: f64) -> String {
    const PREFIXES: [(f64, &str); 4] = [(1e12, "T"), (1e9, "G"), (1e6, "M"), (1e3, "k")];

    if value == 0.0 || !value.is_finite() {
        return plain_label(value);
    }

    let magnitude = value.abs();
    let (scale, suffix) = PREFIXES
        .iter()
        .copied()
        .find(|(scale, _)| magnitude >= *scale * 0.9995)
        .unwrap_or((1.0, ""));

    let scaled = round_significant(value / scale, 2);
    let text = if scaled.abs() >= 10.0 {
        format!("{scaled:.0}")
    } else {
        format!("{scaled:.1}")
    };
    let text = text
        .strip_suffix(".0")
        .map_or_else(|| text.clone(), ToString::to_string);
    format!("{text}{suffix}")
}

#[allow(clippy::cast_possible_truncation)]
fn round_significant(value: f64, digits: i32) -> f64 {
    let exponent = value.abs().log10().floor() as i32;
    let factor = 10_f64.powi(digits - 1 - exponent);
    (value * factor).round() / factor
}

fn plain_label(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::aggregate::{revenue_by_month, revenue_by_state, salesperson_stats};
    use crate::data::models::fixtures::record;

    fn stats(rows: &[(&str, f64, usize)]) -> Vec<SalespersonStats> {
        rows.iter()
            .map(|(name, revenue, sales)| SalespersonStats {
                salesperson: (*name).to_string(),
                revenue: *revenue,
                sales: *sales,
            })
            .collect()
    }

    fn is_non_increasing(spec: &BarChartSpec) -> bool {
        spec.bars.windows(2).all(|w| w[0].value >= w[1].value)
    }

    #[test]
    fn si_labels_use_two_significant_digits() {
        assert_eq!(si_label(2_500_000.0), "2.5M");
        assert_eq!(si_label(842.0), "840");
        assert_eq!(si_label(1_234.0), "1.2k");
        assert_eq!(si_label(56_789.0), "57k");
        assert_eq!(si_label(1_000_000.0), "1M");
        assert_eq!(si_label(7.0), "7");
        assert_eq!(si_label(0.0), "0");
    }

    #[test]
    fn plain_labels_drop_needless_decimals() {
        assert_eq!(ValueLabel::Plain.render(12.0), "12");
        assert_eq!(ValueLabel::Plain.render(12.5), "12.50");
    }

    #[test]
    fn top_n_is_clamped() {
        assert_eq!(clamp_top_n(0), 2);
        assert_eq!(clamp_top_n(7), 7);
        assert_eq!(clamp_top_n(50), 10);
    }

    #[test]
    fn salesperson_charts_sort_each_measure_independently() {
        let rows = stats(&[
            ("Ana", 100.0, 9),
            ("Bruno", 900.0, 1),
            ("Carla", 500.0, 4),
            ("Davi", 50.0, 7),
        ]);

        let by_revenue = top_salespeople_by_revenue(&rows, 3);
        let names: Vec<&str> = by_revenue.bars.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(names, ["Bruno", "Carla", "Ana"]);
        assert!(is_non_increasing(&by_revenue));
        assert_eq!(by_revenue.orientation, BarOrientation::Horizontal);

        let by_sales = top_salespeople_by_sales(&rows, 3);
        let names: Vec<&str> = by_sales.bars.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(names, ["Ana", "Davi", "Carla"]);
        assert!(is_non_increasing(&by_sales));
    }

    #[test]
    fn salesperson_charts_respect_bounds() {
        let rows = stats(&[("Ana", 1.0, 1), ("Bruno", 2.0, 2), ("Carla", 3.0, 3)]);
        assert_eq!(top_salespeople_by_revenue(&rows, 1).bars.len(), 2);
        assert_eq!(top_salespeople_by_sales(&rows, 10).bars.len(), 3);
        assert_eq!(
            top_salespeople_by_revenue(&rows, 1).title,
            "Top 2 Salespeople (revenue)"
        );
    }

    #[test]
    fn state_charts_keep_the_top_five_in_order() {
        let records: Vec<_> = ["A", "B", "C", "D", "E", "F", "G"]
            .iter()
            .enumerate()
            .map(|(i, location)| {
                #[allow(clippy::cast_precision_loss)]
                let price = (i as f64 + 1.0) * 10.0;
                record(location, "Ana", "livros", price, (2020, 1, 1))
            })
            .collect();
        let rows = revenue_by_state(&records);

        let bar = state_revenue_bar(&rows);
        assert_eq!(bar.bars.len(), TOP_STATES);
        assert_eq!(bar.bars[0].label, "G");
        assert!(is_non_increasing(&bar));
        assert_eq!(bar.value_label, ValueLabel::Si);

        let map = state_revenue_map(&rows);
        assert_eq!(map.points.len(), 7);
        assert!(!map.show_coordinates);
        assert!((map.points[0].size - 1.0).abs() < f64::EPSILON);
        assert!(map.points.iter().all(|p| p.size > 0.0 && p.size <= 1.0));
    }

    #[test]
    fn monthly_line_has_one_series_per_year() {
        let records = vec![
            record("SP", "Ana", "livros", 100.0, (2020, 1, 3)),
            record("SP", "Ana", "livros", 300.0, (2020, 2, 3)),
            record("SP", "Ana", "livros", 250.0, (2021, 1, 3)),
        ];
        let line = monthly_revenue_line(&revenue_by_month(&records));

        assert_eq!(line.series.len(), 2);
        assert_eq!(line.series[0].year, 2020);
        assert_eq!(line.series[0].points, [(1, 100.0), (2, 300.0)]);
        assert_eq!(line.series[1].points, [(1, 250.0)]);
        assert!((line.y_range[0]).abs() < f64::EPSILON);
        assert!((line.y_range[1] - 300.0).abs() < f64::EPSILON);
        assert!(line.markers);
    }

    #[test]
    fn empty_tables_make_empty_charts() {
        assert!(state_revenue_bar(&[]).bars.is_empty());
        assert!(top_salespeople_by_revenue(&salesperson_stats(&[]), 5)
            .bars
            .is_empty());
        let line = monthly_revenue_line(&[]);
        assert!(line.series.is_empty());
        assert!((line.y_range[1]).abs() < f64::EPSILON);
    }
}

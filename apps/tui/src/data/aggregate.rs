use chrono::Month;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use crate::data::models::SalesRecord;

/// A per-location measure with the location's coordinates joined back in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationSummary<M> {
    pub location: String,
    pub lat: f64,
    pub lon: f64,
    pub value: M,
}

pub type StateRevenue = LocationSummary<f64>;
pub type StateSales = LocationSummary<usize>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyRevenue {
    pub year: i32,
    pub month: u32,
    pub revenue: f64,
}

impl MonthlyRevenue {
    pub fn month_name(&self) -> &'static str {
        u8::try_from(self.month)
            .ok()
            .and_then(|month| Month::try_from(month).ok())
            .map_or("?", |month| month.name())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRevenue {
    pub category: String,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalespersonStats {
    pub salesperson: String,
    pub revenue: f64,
    pub sales: usize,
}

/// All summary tables derived from one filtered dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SalesSummary {
    pub revenue_by_state: Vec<StateRevenue>,
    pub sales_by_state: Vec<StateSales>,
    pub revenue_by_month: Vec<MonthlyRevenue>,
    pub revenue_by_category: Vec<CategoryRevenue>,
    pub salespeople: Vec<SalespersonStats>,
}

impl SalesSummary {
    pub fn from_records(records: &[SalesRecord]) -> Self {
        Self {
            revenue_by_state: revenue_by_state(records),
            sales_by_state: sales_by_state(records),
            revenue_by_month: revenue_by_month(records),
            revenue_by_category: revenue_by_category(records),
            salespeople: salesperson_stats(records),
        }
    }
}

pub fn total_revenue(records: &[SalesRecord]) -> f64 {
    records.iter().map(|record| record.price).sum()
}

/// Revenue per location, highest first.
pub fn revenue_by_state(records: &[SalesRecord]) -> Vec<StateRevenue> {
    let totals = group_by(records, |record| record.location.clone(), 0.0_f64, |sum, record| {
        *sum += record.price;
    });
    let mut rows = join_coordinates(records, totals);
    rows.sort_by(|a, b| b.value.total_cmp(&a.value));
    rows
}

/// Number of sales per location, highest first.
pub fn sales_by_state(records: &[SalesRecord]) -> Vec<StateSales> {
    let counts = group_by(records, |record| record.location.clone(), 0_usize, |count, _| {
        *count += 1;
    });
    let mut rows = join_coordinates(records, counts);
    rows.sort_by(|a, b| b.value.cmp(&a.value));
    rows
}

/// Revenue per calendar month, in chronological order.
pub fn revenue_by_month(records: &[SalesRecord]) -> Vec<MonthlyRevenue> {
    group_by(
        records,
        |record| (record.year(), record.month()),
        0.0_f64,
        |sum, record| *sum += record.price,
    )
    .into_iter()
    .map(|((year, month), revenue)| MonthlyRevenue {
        year,
        month,
        revenue,
    })
    .collect()
}

/// Revenue per product category, highest first.
pub fn revenue_by_category(records: &[SalesRecord]) -> Vec<CategoryRevenue> {
    let mut rows: Vec<CategoryRevenue> = group_by(
        records,
        |record| record.category.clone(),
        0.0_f64,
        |sum, record| *sum += record.price,
    )
    .into_iter()
    .map(|(category, revenue)| CategoryRevenue { category, revenue })
    .collect();
    rows.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));
    rows
}

/// Revenue and sale count per salesperson, ordered by name.
pub fn salesperson_stats(records: &[SalesRecord]) -> Vec<SalespersonStats> {
    group_by(
        records,
        |record| record.salesperson.clone(),
        (0.0_f64, 0_usize),
        |(revenue, sales), record| {
            *revenue += record.price;
            *sales += 1;
        },
    )
    .into_iter()
    .map(|(salesperson, (revenue, sales))| SalespersonStats {
        salesperson,
        revenue,
        sales,
    })
    .collect()
}

/// Folds every record into the accumulator of its key. Keys come back in
/// ascending order, so later stable sorts break ties by key.
fn group_by<K, A, F, G>(records: &[SalesRecord], key: F, init: A, mut fold: G) -> BTreeMap<K, A>
where
    K: Ord,
    A: Clone,
    F: Fn(&SalesRecord) -> K,
    G: FnMut(&mut A, &SalesRecord),
{
    let mut groups = BTreeMap::new();
    for record in records {
        let acc = groups.entry(key(record)).or_insert_with(|| init.clone());
        fold(acc, record);
    }
    groups
}

/// Joins the first (lat, lon) seen for each location onto its aggregate.
fn join_coordinates<M>(
    records: &[SalesRecord],
    measures: BTreeMap<String, M>,
) -> Vec<LocationSummary<M>> {
    let mut coordinates: HashMap<&str, (f64, f64)> = HashMap::new();
    for record in records {
        coordinates
            .entry(record.location.as_str())
            .or_insert((record.lat, record.lon));
    }

    measures
        .into_iter()
        .filter_map(|(location, value)| {
            let (lat, lon) = coordinates.get(location.as_str()).copied()?;
            Some(LocationSummary {
                location,
                lat,
                lon,
                value,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::models::fixtures::record;
    use std::collections::BTreeSet;

    fn sample() -> Vec<SalesRecord> {
        vec![
            record("SP", "Ana", "livros", 120.0, (2020, 1, 5)),
            record("RJ", "Bruno", "eletronicos", 900.0, (2020, 1, 20)),
            record("SP", "Ana", "moveis", 300.0, (2020, 3, 2)),
            record("BA", "Carla", "livros", 45.5, (2021, 1, 9)),
            record("SP", "Bruno", "eletronicos", 1500.0, (2021, 2, 14)),
            record("BA", "Ana", "moveis", 80.0, (2021, 2, 28)),
        ]
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn scenario_two_locations() {
        let records = vec![
            record("A", "Ana", "livros", 10.0, (2020, 1, 1)),
            record("B", "Ana", "livros", 20.0, (2020, 1, 2)),
            record("B", "Ana", "livros", 30.0, (2020, 1, 3)),
        ];

        let states = revenue_by_state(&records);
        let keys: Vec<&str> = states.iter().map(|row| row.location.as_str()).collect();
        assert_eq!(keys, ["B", "A"]);
        assert!(approx(states[0].value, 50.0));
        assert!(approx(states[1].value, 10.0));
        assert!(approx(total_revenue(&records), 60.0));
    }

    #[test]
    fn grouped_revenue_adds_up_to_total() {
        let records = sample();
        let total = total_revenue(&records);

        let by_state: f64 = revenue_by_state(&records).iter().map(|row| row.value).sum();
        let by_month: f64 = revenue_by_month(&records).iter().map(|row| row.revenue).sum();
        let by_category: f64 = revenue_by_category(&records)
            .iter()
            .map(|row| row.revenue)
            .sum();
        let by_salesperson: f64 = salesperson_stats(&records)
            .iter()
            .map(|row| row.revenue)
            .sum();

        assert!(approx(by_state, total));
        assert!(approx(by_month, total));
        assert!(approx(by_category, total));
        assert!(approx(by_salesperson, total));
    }

    #[test]
    fn sales_counts_add_up_to_record_count() {
        let records = sample();
        let by_state: usize = sales_by_state(&records).iter().map(|row| row.value).sum();
        let by_salesperson: usize = salesperson_stats(&records).iter().map(|row| row.sales).sum();
        assert_eq!(by_state, records.len());
        assert_eq!(by_salesperson, records.len());
    }

    #[test]
    fn location_tables_carry_each_location_once_with_coordinates() {
        let records = sample();
        let distinct: BTreeSet<&str> = records.iter().map(|r| r.location.as_str()).collect();

        let revenue = revenue_by_state(&records);
        let sales = sales_by_state(&records);
        let revenue_keys: BTreeSet<&str> = revenue.iter().map(|r| r.location.as_str()).collect();
        let sales_keys: BTreeSet<&str> = sales.iter().map(|r| r.location.as_str()).collect();

        assert_eq!(revenue.len(), distinct.len());
        assert_eq!(revenue_keys, distinct);
        assert_eq!(sales_keys, distinct);

        for row in &revenue {
            let source = records
                .iter()
                .find(|r| r.location == row.location)
                .map(|r| (r.lat, r.lon));
            assert_eq!(source, Some((row.lat, row.lon)));
        }
    }

    #[test]
    fn location_tables_are_sorted_descending() {
        let records = sample();
        let revenue = revenue_by_state(&records);
        assert!(revenue.windows(2).all(|w| w[0].value >= w[1].value));
        assert_eq!(revenue[0].location, "SP");

        let sales = sales_by_state(&records);
        assert!(sales.windows(2).all(|w| w[0].value >= w[1].value));
        assert_eq!(sales[0].location, "SP");
        assert_eq!(sales[0].value, 3);
    }

    #[test]
    fn months_are_chronological_and_keep_the_year() {
        let months = revenue_by_month(&sample());
        let keys: Vec<(i32, u32)> = months.iter().map(|m| (m.year, m.month)).collect();
        assert_eq!(keys, [(2020, 1), (2020, 3), (2021, 1), (2021, 2)]);
        assert!(approx(months[0].revenue, 1020.0));
        assert!(approx(months[3].revenue, 1580.0));
        assert_eq!(months[0].month_name(), "January");
    }

    #[test]
    fn categories_are_sorted_by_revenue() {
        let categories = revenue_by_category(&sample());
        let keys: Vec<&str> = categories.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(keys, ["eletronicos", "moveis", "livros"]);
    }

    #[test]
    fn salesperson_stats_sum_and_count() {
        let stats = salesperson_stats(&sample());
        let names: Vec<&str> = stats.iter().map(|s| s.salesperson.as_str()).collect();
        assert_eq!(names, ["Ana", "Bruno", "Carla"]);
        assert!(approx(stats[0].revenue, 500.0));
        assert_eq!(stats[0].sales, 3);
        assert!(approx(stats[1].revenue, 2400.0));
        assert_eq!(stats[1].sales, 2);
    }

    #[test]
    fn empty_input_yields_empty_tables() {
        let summary = SalesSummary::from_records(&[]);
        assert_eq!(summary, SalesSummary::default());
    }
}

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use std::collections::{BTreeSet, HashSet};

use crate::data::models::SalesRecord;

/// Distinct salespeople in the order they first appear in the data.
pub fn salesperson_options(records: &[SalesRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter(|record| seen.insert(record.salesperson.as_str()))
        .map(|record| record.salesperson.clone())
        .collect()
}

/// Keeps only the selected names that still exist among `options`.
pub fn effective_selection(selected: &BTreeSet<String>, options: &[String]) -> BTreeSet<String> {
    selected
        .iter()
        .filter(|name| options.contains(name))
        .cloned()
        .collect()
}

/// Retains records sold by one of `selected`. An empty selection keeps
/// every record.
pub fn filter_by_salespeople(
    records: Vec<SalesRecord>,
    selected: &BTreeSet<String>,
) -> Vec<SalesRecord> {
    if selected.is_empty() {
        return records;
    }

    records
        .into_iter()
        .filter(|record| selected.contains(&record.salesperson))
        .collect()
}

/// Narrows `options` to the ones matching `query`, best match first. An
/// empty query keeps the original order.
pub fn search_options<'a>(options: &'a [String], query: &str) -> Vec<&'a str> {
    let query = query.trim();
    if query.is_empty() {
        return options.iter().map(String::as_str).collect();
    }

    let matcher = SkimMatcherV2::default().ignore_case();
    let mut scored: Vec<(i64, &str)> = options
        .iter()
        .filter_map(|name| {
            matcher
                .fuzzy_match(name, query)
                .map(|score| (score, name.as_str()))
        })
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().map(|(_, name)| name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::models::fixtures::record;

    fn sample() -> Vec<SalesRecord> {
        vec![
            record("SP", "Ana", "livros", 10.0, (2020, 1, 5)),
            record("RJ", "Bruno", "livros", 20.0, (2020, 2, 5)),
            record("SP", "Ana", "moveis", 30.0, (2021, 3, 5)),
            record("BA", "Carla", "moveis", 40.0, (2021, 3, 9)),
        ]
    }

    #[test]
    fn options_are_distinct_in_first_seen_order() {
        assert_eq!(salesperson_options(&sample()), ["Ana", "Bruno", "Carla"]);
    }

    #[test]
    fn empty_selection_keeps_everything() {
        let records = sample();
        let filtered = filter_by_salespeople(records.clone(), &BTreeSet::new());
        assert_eq!(filtered, records);
    }

    #[test]
    fn selection_keeps_only_selected_salespeople() {
        let selected: BTreeSet<String> = ["Ana".to_string(), "Carla".to_string()].into();
        let filtered = filter_by_salespeople(sample(), &selected);

        assert_eq!(filtered.len(), 3);
        assert!(filtered
            .iter()
            .all(|record| selected.contains(&record.salesperson)));
    }

    #[test]
    fn filtering_never_grows_the_dataset() {
        let options = salesperson_options(&sample());
        let mut selected = BTreeSet::new();
        for name in &options {
            selected.insert(name.clone());
            let filtered = filter_by_salespeople(sample(), &selected);
            assert!(filtered.len() <= sample().len());
        }
        assert_eq!(filter_by_salespeople(sample(), &selected).len(), 4);
    }

    #[test]
    fn stale_names_drop_out_of_the_selection() {
        let options = salesperson_options(&sample());
        let selected: BTreeSet<String> = ["Ana".to_string(), "Zed".to_string()].into();
        let effective = effective_selection(&selected, &options);
        assert_eq!(effective, BTreeSet::from(["Ana".to_string()]));
    }

    #[test]
    fn search_narrows_options() {
        let options = salesperson_options(&sample());
        assert_eq!(search_options(&options, ""), ["Ana", "Bruno", "Carla"]);
        assert_eq!(search_options(&options, "brn"), ["Bruno"]);
        assert!(search_options(&options, "xyz").is_empty());
    }
}

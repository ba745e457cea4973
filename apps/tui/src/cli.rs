use clap::{CommandFactory, Parser};
use std::collections::BTreeSet;

use sales_dashboard::config::{API_URL_VAR, DEBUG_VAR, LOG_DIR_VAR, TOP_N_VAR};
use sales_dashboard::{FilterSelection, Region, YearFilter};

#[derive(Debug, Parser)]
#[command(name = "sales_dashboard", version, about = "Sales dashboard TUI")]
pub struct CliArgs {
    /// Print the dashboard once and exit
    #[arg(long)]
    pub headless: bool,

    /// Print the headless dashboard as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Override the sales API endpoint
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// Override the log directory
    #[arg(long = "log-dir", value_name = "PATH")]
    pub log_dir: Option<String>,

    /// Initial region (Brasil, Centro-Oeste, Nordeste, Norte, Sul, Sudeste)
    #[arg(long, value_name = "REGION", value_parser = parse_region)]
    pub region: Option<Region>,

    /// Initial year (2020-2023); omit for all years
    #[arg(long, value_name = "YEAR", value_parser = parse_year)]
    pub year: Option<YearFilter>,

    /// Preselect a salesperson; repeat for several
    #[arg(long = "seller", value_name = "NAME")]
    pub sellers: Vec<String>,

    /// Number of salespeople in the ranking charts (2-10)
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(url) = &self.url {
            std::env::set_var(API_URL_VAR, url);
        }
        if let Some(dir) = &self.log_dir {
            std::env::set_var(LOG_DIR_VAR, dir);
        }
        if let Some(top) = self.top {
            std::env::set_var(TOP_N_VAR, top.to_string());
        }
        if self.debug {
            std::env::set_var(DEBUG_VAR, "1");
        }
    }

    /// Sidebar state the dashboard opens with.
    pub fn initial_selection(&self) -> FilterSelection {
        FilterSelection {
            region: self.region.unwrap_or_default(),
            year: self.year.unwrap_or_default(),
            salespeople: self
                .sellers
                .iter()
                .map(|name| name.trim())
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect::<BTreeSet<_>>(),
        }
    }

    pub const fn is_headless(&self) -> bool {
        self.headless || self.json
    }

    pub fn help_text() -> String {
        let mut command = Self::command();
        let mut buffer = Vec::new();
        command.write_help(&mut buffer).ok();
        String::from_utf8_lossy(&buffer).to_string()
    }
}

fn parse_region(value: &str) -> Result<Region, String> {
    Region::parse(value).ok_or_else(|| format!("unknown region '{value}'"))
}

fn parse_year(value: &str) -> Result<YearFilter, String> {
    YearFilter::parse(value).ok_or_else(|| {
        format!(
            "year must be between {} and {} or 'all'",
            YearFilter::FIRST_YEAR,
            YearFilter::LAST_YEAR
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_filters_into_an_initial_selection() {
        let args = CliArgs::try_parse_from([
            "sales_dashboard",
            "--region",
            "nordeste",
            "--year",
            "2021",
            "--seller",
            "Ana",
            "--seller",
            " Bruno ",
        ])
        .unwrap();

        let selection = args.initial_selection();
        assert_eq!(selection.region, Region::Nordeste);
        assert_eq!(selection.year, YearFilter::Year(2021));
        assert_eq!(
            selection.salespeople,
            BTreeSet::from(["Ana".to_string(), "Bruno".to_string()])
        );
        assert!(!args.is_headless());
    }

    #[test]
    fn defaults_select_everything() {
        let args = CliArgs::try_parse_from(["sales_dashboard", "--json"]).unwrap();
        assert_eq!(args.initial_selection(), FilterSelection::default());
        assert!(args.is_headless());
    }

    #[test]
    fn rejects_unknown_region_and_year() {
        assert!(CliArgs::try_parse_from(["sales_dashboard", "--region", "atlantis"]).is_err());
        assert!(CliArgs::try_parse_from(["sales_dashboard", "--year", "1999"]).is_err());
    }

    #[test]
    fn help_mentions_headless_flag() {
        assert!(CliArgs::help_text().contains("--headless"));
    }
}

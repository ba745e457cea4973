use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Region {
    #[default]
    Brasil,
    CentroOeste,
    Nordeste,
    Norte,
    Sul,
    Sudeste,
}

impl Region {
    pub const ALL: [Self; 6] = [
        Self::Brasil,
        Self::CentroOeste,
        Self::Nordeste,
        Self::Norte,
        Self::Sul,
        Self::Sudeste,
    ];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Brasil),
            1 => Some(Self::CentroOeste),
            2 => Some(Self::Nordeste),
            3 => Some(Self::Norte),
            4 => Some(Self::Sul),
            5 => Some(Self::Sudeste),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Brasil => 0,
            Self::CentroOeste => 1,
            Self::Nordeste => 2,
            Self::Norte => 3,
            Self::Sul => 4,
            Self::Sudeste => 5,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "" | "brasil" | "all" => Some(Self::Brasil),
            "centro-oeste" | "centro oeste" | "centro_oeste" => Some(Self::CentroOeste),
            "nordeste" => Some(Self::Nordeste),
            "norte" => Some(Self::Norte),
            "sul" => Some(Self::Sul),
            "sudeste" => Some(Self::Sudeste),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Brasil => "Brasil",
            Self::CentroOeste => "Centro-Oeste",
            Self::Nordeste => "Nordeste",
            Self::Norte => "Norte",
            Self::Sul => "Sul",
            Self::Sudeste => "Sudeste",
        }
    }

    /// Value sent as the `regiao` query parameter. `Brasil` means every
    /// region and is sent empty.
    pub fn query_value(self) -> String {
        match self {
            Self::Brasil => String::new(),
            other => other.label().to_lowercase(),
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum YearFilter {
    #[default]
    All,
    Year(u16),
}

impl YearFilter {
    pub const FIRST_YEAR: u16 = 2020;
    pub const LAST_YEAR: u16 = 2023;

    /// Builds a single-year filter, clamped to the years the source carries.
    pub fn year(year: u16) -> Self {
        Self::Year(year.clamp(Self::FIRST_YEAR, Self::LAST_YEAR))
    }

    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("all") {
            return Some(Self::All);
        }

        value
            .parse::<u16>()
            .ok()
            .filter(|year| (Self::FIRST_YEAR..=Self::LAST_YEAR).contains(year))
            .map(Self::Year)
    }

    /// Value sent as the `ano` query parameter.
    pub fn query_value(self) -> String {
        match self {
            Self::All => String::new(),
            Self::Year(year) => year.to_string(),
        }
    }
}

impl fmt::Display for YearFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("All years"),
            Self::Year(year) => write!(f, "{year}"),
        }
    }
}

/// Current state of the sidebar filters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterSelection {
    pub region: Region,
    pub year: YearFilter,
    /// Selected salespeople. Empty means no salesperson filter.
    pub salespeople: BTreeSet<String>,
}

impl FilterSelection {
    pub fn toggle_salesperson(&mut self, name: &str) {
        if !self.salespeople.remove(name) {
            self.salespeople.insert(name.to_string());
        }
    }
}

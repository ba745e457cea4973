pub mod aggregate;
pub mod fetch;
pub mod filter;
pub mod models;
pub use aggregate::{
    CategoryRevenue, LocationSummary, MonthlyRevenue, SalesSummary, SalespersonStats,
    StateRevenue, StateSales,
};
pub use fetch::{FetchError, SalesClient, SalesSource};
pub use models::SalesRecord;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::data::fetch::FetchError;

/// Date layout used by the sales endpoint (`dd/mm/yyyy`).
pub const PURCHASE_DATE_FORMAT: &str = "%d/%m/%Y";

/// Represents one sale as returned by the sales endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesRecord {
    pub product: String,
    pub category: String,
    pub price: f64,
    pub freight: f64,
    pub purchase_date: NaiveDate,
    pub salesperson: String,
    pub location: String,
    pub rating: Option<u8>,
    pub payment_type: String,
    pub installments: Option<u32>,
    pub lat: f64,
    pub lon: f64,
}

impl SalesRecord {
    pub fn year(&self) -> i32 {
        self.purchase_date.year()
    }

    pub fn month(&self) -> u32 {
        self.purchase_date.month()
    }
}

/// Wire shape of a sale, before the purchase date is parsed
#[derive(Debug, Clone, Deserialize)]
pub struct RawSalesRecord {
    #[serde(rename = "Produto", default)]
    pub product: String,
    #[serde(rename = "Categoria do Produto")]
    pub category: String,
    #[serde(rename = "Preço")]
    pub price: f64,
    #[serde(rename = "Frete", default)]
    pub freight: f64,
    #[serde(rename = "Data da Compra")]
    pub purchase_date: String,
    #[serde(rename = "Vendedor")]
    pub salesperson: String,
    #[serde(rename = "Local da compra")]
    pub location: String,
    #[serde(rename = "Avaliação da compra", default)]
    pub rating: Option<u8>,
    #[serde(rename = "Tipo de pagamento", default)]
    pub payment_type: String,
    #[serde(rename = "Quantidade de parcelas", default)]
    pub installments: Option<u32>,
    pub lat: f64,
    pub lon: f64,
}

impl RawSalesRecord {
    /// Parses the purchase date; `index` is the record's position in the
    /// payload and only feeds the error message.
    pub fn into_record(self, index: usize) -> Result<SalesRecord, FetchError> {
        let purchase_date = NaiveDate::parse_from_str(&self.purchase_date, PURCHASE_DATE_FORMAT)
            .map_err(|source| FetchError::InvalidDate {
                index,
                value: self.purchase_date.clone(),
                source,
            })?;

        Ok(SalesRecord {
            product: self.product,
            category: self.category,
            price: self.price,
            freight: self.freight,
            purchase_date,
            salesperson: self.salesperson,
            location: self.location,
            rating: self.rating,
            payment_type: self.payment_type,
            installments: self.installments,
            lat: self.lat,
            lon: self.lon,
        })
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::SalesRecord;
    use chrono::NaiveDate;

    /// Builds a record with the fields the aggregations look at.
    pub fn record(
        location: &str,
        salesperson: &str,
        category: &str,
        price: f64,
        date: (i32, u32, u32),
    ) -> SalesRecord {
        let (lat, lon) = coordinates(location);
        SalesRecord {
            product: format!("{category} item"),
            category: category.to_string(),
            price,
            freight: 0.0,
            purchase_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2)
                .unwrap_or(NaiveDate::MIN),
            salesperson: salesperson.to_string(),
            location: location.to_string(),
            rating: Some(5),
            payment_type: "cartao_credito".to_string(),
            installments: Some(1),
            lat,
            lon,
        }
    }

    fn coordinates(location: &str) -> (f64, f64) {
        match location {
            "SP" => (-22.19, -48.79),
            "RJ" => (-22.25, -42.66),
            "BA" => (-13.29, -41.71),
            _ => (-15.0, -50.0),
        }
    }
}

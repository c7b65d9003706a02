//! Core types and data structures for the station reconciliation system

use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fuel grades sold at the station
///
/// The grade set is closed: the station sells a small fixed list of products
/// and every price entry and meter reading is keyed by one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Product {
    /// 90-octane gasoline (code "90")
    #[serde(rename = "90")]
    Octane90,
    /// 95-octane gasoline (code "95")
    #[serde(rename = "95")]
    Octane95,
    /// Diesel (code "DL")
    #[serde(rename = "DL")]
    Diesel,
}

impl Product {
    /// All configured grades, in display order
    pub const ALL: [Product; 3] = [Product::Octane90, Product::Octane95, Product::Diesel];

    /// The short code used on dispensers and price boards
    pub fn code(&self) -> &'static str {
        match self {
            Product::Octane90 => "90",
            Product::Octane95 => "95",
            Product::Diesel => "DL",
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Product {
    type Err = StationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "90" => Ok(Product::Octane90),
            "95" => Ok(Product::Octane95),
            "DL" => Ok(Product::Diesel),
            other => Err(StationError::UnknownProduct(other.to_string())),
        }
    }
}

/// One row of a product's price history
///
/// Entries are immutable once recorded; the catalog for a product is an
/// append-only sequence ordered by `effective_from`. The price effective on a
/// given date is the entry with the greatest `effective_from` not after that
/// date; `recorded_at` breaks ties so a same-day correction wins over the
/// entry it corrects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceEntry {
    /// Product the price applies to
    pub product: Product,
    /// Price per gallon in local currency
    pub price_per_gallon: BigDecimal,
    /// First calendar date on which this price applies
    pub effective_from: NaiveDate,
    /// When the entry was recorded
    pub recorded_at: NaiveDateTime,
}

impl PriceEntry {
    /// Create a price entry recorded now
    pub fn new(product: Product, price_per_gallon: BigDecimal, effective_from: NaiveDate) -> Self {
        Self {
            product,
            price_per_gallon,
            effective_from,
            recorded_at: chrono::Utc::now().naive_utc(),
        }
    }

    /// Validate the entry before it is appended to the catalog
    pub fn validate(&self) -> StationResult<()> {
        if self.price_per_gallon <= BigDecimal::from(0) {
            return Err(StationError::Validation(
                "Price per gallon must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// The durable record of one pump on one business day
///
/// Created at shift open with `initial_reading` carried over from the prior
/// day's closing value; `final_reading` stays `None` until the closing value
/// is recorded. Rows are never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeterReading {
    /// Dispenser identifier (e.g. "D-01")
    pub pump_id: String,
    /// Grade dispensed by this pump
    pub product: Product,
    /// Business date of the reading
    pub date: NaiveDate,
    /// Meter value at shift open
    pub initial_reading: u64,
    /// Meter value at shift close; `None` while the day is still open
    pub final_reading: Option<u64>,
}

impl MeterReading {
    /// Create an open reading at shift start
    pub fn open(pump_id: String, product: Product, date: NaiveDate, initial_reading: u64) -> Self {
        Self {
            pump_id,
            product,
            date,
            initial_reading,
            final_reading: None,
        }
    }

    /// Record the day's closing meter value
    pub fn close(&mut self, final_reading: u64) {
        self.final_reading = Some(final_reading);
    }

    /// Whether the closing value has been recorded
    pub fn is_closed(&self) -> bool {
        self.final_reading.is_some()
    }
}

/// Cash-affecting transaction categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CashCategory {
    /// Operating expense paid from the till
    Expense,
    /// Credit voucher ("vale") honored at the pump
    Voucher,
    /// Cash moved from the till to the bank; informational for the
    /// reconciliation since it is already out of the drawer
    Deposit,
    /// Any category this build does not know about; summed separately so
    /// unknown entries are never silently dropped
    #[serde(other)]
    Other,
}

/// A cash-affecting ledger entry for a business day
///
/// Immutable once recorded; the day's ledger is append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashEntry {
    /// Business date the entry applies to
    pub date: NaiveDate,
    /// Expense, voucher, or deposit
    pub category: CashCategory,
    /// Amount in local currency, always positive
    pub amount: BigDecimal,
    /// Free-form concept, e.g. "Compra de aceite" or a voucher client name
    pub description: String,
}

impl CashEntry {
    /// Create a cash entry
    pub fn new(
        date: NaiveDate,
        category: CashCategory,
        amount: BigDecimal,
        description: String,
    ) -> Self {
        Self {
            date,
            category,
            amount,
            description,
        }
    }

    /// Validate the entry before it is appended to the ledger
    pub fn validate(&self) -> StationResult<()> {
        if self.amount <= BigDecimal::from(0) {
            return Err(StationError::Validation(
                "Cash entry amount must be positive".to_string(),
            ));
        }
        if self.description.trim().is_empty() {
            return Err(StationError::Validation(
                "Cash entry description cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Errors that can occur in the reconciliation system
#[derive(Debug, thiserror::Error)]
pub enum StationError {
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Unknown product code: {0}")]
    UnknownProduct(String),
    #[error("No meter readings recorded for {0}; nothing to reconcile")]
    IncompleteData(NaiveDate),
}

/// Result type for station operations
pub type StationResult<T> = Result<T, StationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_codes_round_trip() {
        for product in Product::ALL {
            assert_eq!(product.code().parse::<Product>().unwrap(), product);
        }
    }

    #[test]
    fn unknown_product_code_is_a_hard_error() {
        let err = "84".parse::<Product>().unwrap_err();
        assert!(matches!(err, StationError::UnknownProduct(code) if code == "84"));
    }

    #[test]
    fn cash_category_unknown_wire_value_lands_in_other() {
        let entry: CashEntry = serde_json::from_str(
            r#"{"date":"2024-03-01","category":"Adelanto","amount":"25.0","description":"advance"}"#,
        )
        .unwrap();
        assert_eq!(entry.category, CashCategory::Other);
    }

    #[test]
    fn price_entry_rejects_non_positive_price() {
        let entry = PriceEntry::new(
            Product::Octane90,
            BigDecimal::from(0),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        );
        assert!(entry.validate().is_err());
    }

    #[test]
    fn reading_open_close_lifecycle() {
        let mut reading = MeterReading::open(
            "D-01".to_string(),
            Product::Diesel,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            1000,
        );
        assert!(!reading.is_closed());
        reading.close(1120);
        assert!(reading.is_closed());
        assert_eq!(reading.final_reading, Some(1120));
    }
}

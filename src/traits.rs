//! Traits for storage abstraction and extensibility

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::report::ReportSnapshot;
use crate::types::*;

/// Storage abstraction for the reconciliation core
///
/// This trait is the only seam between the core and the persistence layer.
/// Any backend (Firestore, PostgreSQL, SQLite, in-memory, etc.) can drive the
/// engine by implementing these methods; the engine performs no I/O of its
/// own and holds no connection state.
#[async_trait]
pub trait StationStorage: Send + Sync {
    /// Append a price entry to a product's history
    async fn save_price_entry(&mut self, entry: &PriceEntry) -> StationResult<()>;

    /// Full price history for a product, ordered by `effective_from` ascending
    async fn price_history(&self, product: Product) -> StationResult<Vec<PriceEntry>>;

    /// Save a pump-day reading (insert or record the closing value)
    async fn save_reading(&mut self, reading: &MeterReading) -> StationResult<()>;

    /// All readings within the inclusive date range
    async fn readings_between(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> StationResult<Vec<MeterReading>>;

    /// Append a cash entry to the day's ledger
    async fn save_cash_entry(&mut self, entry: &CashEntry) -> StationResult<()>;

    /// All cash entries within the inclusive date range
    async fn cash_entries_between(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> StationResult<Vec<CashEntry>>;

    /// Persist a computed report as an audit snapshot
    ///
    /// Optional for correctness: reports are derived values and are
    /// recomputable from readings, prices, and cash entries at any time.
    async fn record_report(&mut self, snapshot: &ReportSnapshot) -> StationResult<()>;
}

/// Trait for implementing custom cash-entry validation rules
pub trait CashEntryValidator: Send + Sync {
    /// Validate a cash entry before saving
    fn validate_entry(&self, entry: &CashEntry) -> StationResult<()>;
}

/// Default cash-entry validator with basic rules
pub struct DefaultCashEntryValidator;

impl CashEntryValidator for DefaultCashEntryValidator {
    fn validate_entry(&self, entry: &CashEntry) -> StationResult<()> {
        entry.validate()
    }
}

/// Trait for implementing custom price validation rules
pub trait PriceValidator: Send + Sync {
    /// Validate a price entry before it is appended to the catalog
    fn validate_price(&self, entry: &PriceEntry) -> StationResult<()>;
}

/// Default price validator with basic rules
pub struct DefaultPriceValidator;

impl PriceValidator for DefaultPriceValidator {
    fn validate_price(&self, entry: &PriceEntry) -> StationResult<()> {
        entry.validate()
    }
}

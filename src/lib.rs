//! # Grifo Core
//!
//! A fuel-station reconciliation library: given raw dispenser meter readings,
//! a time-varying price catalog, and the day's cash-affecting entries, it
//! computes the daily reconciliation report (per-pump gallons and subtotals,
//! gross revenue, cash totals, and net balance).
//!
//! ## Features
//!
//! - **Point-in-time pricing**: the price effective on any date is resolved
//!   from an append-only history, with same-day corrections winning by
//!   recording time
//! - **Meter rollover handling**: fixed-width totalizer counters that wrap
//!   past their digit capacity produce modular deltas, never negative gallons
//! - **Cash aggregation**: expenses, vouchers, and deposits are summed per
//!   category; unknown categories are kept in a separate bucket
//! - **Warning-carrying reports**: missing prices, unclosed readings, and
//!   implausible deltas degrade to warnings on the report instead of failing it
//! - **Storage abstraction**: database-agnostic design with a trait-based
//!   storage seam and an in-memory backend for tests
//!
//! ## Quick Start
//!
//! ```rust
//! use grifo_core::{MeterConfig, ReconciliationEngine};
//! use grifo_core::utils::MemoryStorage;
//!
//! // Seed a StationStorage implementation with readings, prices, and cash
//! // entries, then reconcile a day:
//! // let engine = ReconciliationEngine::new(storage, MeterConfig::nine_digit(10_000));
//! // let report = engine.reconcile(date).await?;
//! let _engine = ReconciliationEngine::new(MemoryStorage::new(), MeterConfig::nine_digit(10_000));
//! ```

pub mod cashbook;
pub mod catalog;
pub mod metering;
pub mod report;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use cashbook::{aggregate, CashLedger, DayTotals};
pub use catalog::{resolve_price, PriceCatalog};
pub use metering::{validate_and_diff, MeterConfig, MeterDelta};
pub use report::*;
pub use traits::*;
pub use types::*;

// Re-export cash entry constructors for convenience
pub use cashbook::entries;

//! Daily reconciliation reports

pub mod engine;

pub use engine::*;

use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cashbook::DayTotals;
use crate::types::*;

/// Sales figures for one pump on the report date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PumpSale {
    /// Dispenser identifier
    pub pump_id: String,
    /// Grade dispensed
    pub product: Product,
    /// Meter value at shift open
    pub initial_reading: u64,
    /// Meter value at shift close
    pub final_reading: u64,
    /// Gallons dispensed (rollover-corrected)
    pub gallons: u64,
    /// Price per gallon effective on the report date; zero when no price
    /// entry applies (flagged in the report warnings)
    pub unit_price: BigDecimal,
    /// `gallons * unit_price`
    pub subtotal: BigDecimal,
    /// The meter wrapped past its digit capacity during the shift
    pub meter_wrapped: bool,
    /// The gallons delta exceeds the plausibility ceiling
    pub anomalous: bool,
}

/// Non-fatal conditions found while building a report
///
/// Warnings ride on the report so the operator sees them next to the figures
/// they affect; they never abort the computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ReportWarning {
    /// No price entry applies to this product on the report date; the pump's
    /// rows were priced at zero
    PriceMissing {
        pump_id: String,
        product: Product,
        date: NaiveDate,
    },
    /// A gallons delta exceeded the plausibility ceiling and needs manual
    /// confirmation
    AnomalousDelta {
        pump_id: String,
        gallons: u64,
        ceiling: u64,
    },
    /// A pump's reading could not be used (no closing value or a malformed
    /// meter figure); the pump is excluded from the revenue sum
    MissingReading { pump_id: String, reason: String },
}

/// The daily reconciliation: per-pump sales, cash totals, and net balance
///
/// A derived value, never primary truth. It is recomputed on demand from the
/// readings, price history, and cash entries for the requested date and can
/// be discarded after use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationReport {
    /// Business date the report covers
    pub date: NaiveDate,
    /// Per-pump sales rows, one per usable closed reading
    pub pumps: Vec<PumpSale>,
    /// Pumps whose reading could not be used; excluded from the revenue sum
    /// rather than assumed zero
    pub missing_pumps: Vec<String>,
    /// Sum of all pump subtotals
    pub gross_revenue: BigDecimal,
    /// Per-category cash totals for the date
    pub totals: DayTotals,
    /// Expense detail rows for the date
    pub expense_entries: Vec<CashEntry>,
    /// Voucher detail rows for the date
    pub voucher_entries: Vec<CashEntry>,
    /// `gross_revenue - expenses - vouchers` (deposits excluded)
    pub net_balance: BigDecimal,
    /// Non-fatal conditions surfaced for the operator
    pub warnings: Vec<ReportWarning>,
}

impl ReconciliationReport {
    /// Net balance as a fraction of gross revenue; `None` when gross revenue
    /// is zero
    pub fn net_margin(&self) -> Option<BigDecimal> {
        if self.gross_revenue == BigDecimal::from(0) {
            None
        } else {
            Some(&self.net_balance / &self.gross_revenue)
        }
    }

    /// Whether any non-fatal condition was recorded
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Total gallons dispensed across all pumps
    pub fn total_gallons(&self) -> u64 {
        self.pumps.iter().map(|p| p.gallons).sum()
    }
}

/// Reports for a multi-day range
///
/// Each day is reconciled independently; days with no readings at all are
/// listed in `empty_days` instead of failing the whole range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSet {
    /// First day of the requested range
    pub start_date: NaiveDate,
    /// Last day of the requested range
    pub end_date: NaiveDate,
    /// One report per day that had readings, in date order
    pub reports: Vec<ReconciliationReport>,
    /// Days in the range with no readings recorded
    pub empty_days: Vec<NaiveDate>,
}

impl ReportSet {
    /// Gross revenue summed across every reconciled day
    pub fn total_gross_revenue(&self) -> BigDecimal {
        self.reports.iter().map(|r| &r.gross_revenue).sum()
    }

    /// Net balance summed across every reconciled day
    pub fn total_net_balance(&self) -> BigDecimal {
        self.reports.iter().map(|r| &r.net_balance).sum()
    }
}

/// A persisted audit copy of a computed report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSnapshot {
    /// Snapshot identifier
    pub id: Uuid,
    /// When the snapshot was taken
    pub generated_at: NaiveDateTime,
    /// The report as computed at that moment
    pub report: ReconciliationReport,
}

impl ReportSnapshot {
    /// Wrap a report in a snapshot taken now
    pub fn new(report: ReconciliationReport) -> Self {
        Self {
            id: Uuid::new_v4(),
            generated_at: chrono::Utc::now().naive_utc(),
            report,
        }
    }
}

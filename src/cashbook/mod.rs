//! Cash ledger aggregation
//!
//! Sums a day's cash-affecting entries by category. A pure fold over the
//! input sequence: order never changes the totals, and categories the build
//! does not recognize land in the `other` bucket instead of being dropped.

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::traits::*;
use crate::types::*;

/// Per-category cash totals for a date range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayTotals {
    /// Sum of expense entries
    pub expenses: BigDecimal,
    /// Sum of voucher entries
    pub vouchers: BigDecimal,
    /// Sum of deposit entries; informational only, see [`DayTotals::deducted_total`]
    pub deposits: BigDecimal,
    /// Sum of entries whose category is not recognized
    pub other: BigDecimal,
}

impl DayTotals {
    /// Empty totals
    pub fn zero() -> Self {
        Self {
            expenses: BigDecimal::from(0),
            vouchers: BigDecimal::from(0),
            deposits: BigDecimal::from(0),
            other: BigDecimal::from(0),
        }
    }

    /// Total for a single category
    pub fn for_category(&self, category: CashCategory) -> &BigDecimal {
        match category {
            CashCategory::Expense => &self.expenses,
            CashCategory::Voucher => &self.vouchers,
            CashCategory::Deposit => &self.deposits,
            CashCategory::Other => &self.other,
        }
    }

    /// The amount deducted from gross revenue when computing net balance
    ///
    /// Deposits are excluded: a deposit is money already removed from the
    /// till, not an additional charge against the day's revenue. Business
    /// rule pending confirmation with the station owner; some historical
    /// report revisions disagreed.
    pub fn deducted_total(&self) -> BigDecimal {
        &self.expenses + &self.vouchers
    }
}

impl Default for DayTotals {
    fn default() -> Self {
        Self::zero()
    }
}

/// Sum cash entries within the inclusive date range, grouped by category
pub fn aggregate(entries: &[CashEntry], start_date: NaiveDate, end_date: NaiveDate) -> DayTotals {
    let mut totals = DayTotals::zero();
    for entry in entries {
        if entry.date < start_date || entry.date > end_date {
            continue;
        }
        match entry.category {
            CashCategory::Expense => totals.expenses += &entry.amount,
            CashCategory::Voucher => totals.vouchers += &entry.amount,
            CashCategory::Deposit => totals.deposits += &entry.amount,
            CashCategory::Other => totals.other += &entry.amount,
        }
    }
    totals
}

/// Cash ledger manager over a storage backend
///
/// Validates entries before appending them to the day's ledger. Entries are
/// append-only; corrections are compensating entries, never edits.
pub struct CashLedger<S: StationStorage> {
    storage: S,
    validator: Box<dyn CashEntryValidator>,
}

impl<S: StationStorage> CashLedger<S> {
    /// Create a new cash ledger manager
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            validator: Box::new(DefaultCashEntryValidator),
        }
    }

    /// Create a cash ledger manager with a custom validator
    pub fn with_validator(storage: S, validator: Box<dyn CashEntryValidator>) -> Self {
        Self { storage, validator }
    }

    /// Validate and append a cash entry
    pub async fn record_entry(&mut self, entry: CashEntry) -> StationResult<CashEntry> {
        self.validator.validate_entry(&entry)?;
        self.storage.save_cash_entry(&entry).await?;
        Ok(entry)
    }

    /// Cash entries within the inclusive date range
    pub async fn entries_between(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> StationResult<Vec<CashEntry>> {
        self.storage.cash_entries_between(start_date, end_date).await
    }

    /// Per-category totals for the inclusive date range
    pub async fn totals_between(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> StationResult<DayTotals> {
        let entries = self.entries_between(start_date, end_date).await?;
        Ok(aggregate(&entries, start_date, end_date))
    }
}

/// Constructor helpers for common cash entries
pub mod entries {
    use super::*;

    /// An operating expense paid from the till
    pub fn expense(date: NaiveDate, amount: BigDecimal, description: &str) -> CashEntry {
        CashEntry::new(date, CashCategory::Expense, amount, description.to_string())
    }

    /// A credit voucher honored at the pump
    pub fn voucher(date: NaiveDate, amount: BigDecimal, client: &str) -> CashEntry {
        CashEntry::new(date, CashCategory::Voucher, amount, client.to_string())
    }

    /// A bank deposit taken from the till
    pub fn deposit(date: NaiveDate, amount: BigDecimal, description: &str) -> CashEntry {
        CashEntry::new(date, CashCategory::Deposit, amount, description.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    fn sample_entries() -> Vec<CashEntry> {
        vec![
            entries::expense(date(10), dec("50.00"), "Aceite"),
            entries::expense(date(10), dec("20.50"), "Limpieza"),
            entries::voucher(date(10), dec("35.00"), "Transportes Cusco"),
            entries::deposit(date(10), dec("500.00"), "BCP ventanilla"),
            CashEntry::new(date(10), CashCategory::Other, dec("12.00"), "Adelanto".to_string()),
            // outside the range
            entries::expense(date(11), dec("99.00"), "Otro dia"),
        ]
    }

    #[test]
    fn groups_by_category_within_range() {
        let totals = aggregate(&sample_entries(), date(10), date(10));
        assert_eq!(totals.expenses, dec("70.50"));
        assert_eq!(totals.vouchers, dec("35.00"));
        assert_eq!(totals.deposits, dec("500.00"));
        assert_eq!(totals.other, dec("12.00"));
    }

    #[test]
    fn range_filter_is_inclusive_on_both_ends() {
        let totals = aggregate(&sample_entries(), date(10), date(11));
        assert_eq!(totals.expenses, dec("169.50"));
    }

    #[test]
    fn order_never_changes_totals() {
        let forward = aggregate(&sample_entries(), date(10), date(11));
        let mut shuffled = sample_entries();
        shuffled.reverse();
        shuffled.rotate_left(2);
        let backward = aggregate(&shuffled, date(10), date(11));
        assert_eq!(forward, backward);
    }

    #[test]
    fn empty_input_gives_zero_totals() {
        let totals = aggregate(&[], date(1), date(31));
        assert_eq!(totals, DayTotals::zero());
    }

    #[test]
    fn deposits_are_not_deducted() {
        let totals = aggregate(&sample_entries(), date(10), date(10));
        assert_eq!(totals.deducted_total(), dec("105.50"));
    }

    #[tokio::test]
    async fn ledger_rejects_invalid_entries() {
        let mut ledger = CashLedger::new(crate::utils::memory_storage::MemoryStorage::new());

        let bad = CashEntry::new(date(10), CashCategory::Expense, dec("0"), "Nada".to_string());
        assert!(ledger.record_entry(bad).await.is_err());

        let good = entries::expense(date(10), dec("10.00"), "Trapos");
        ledger.record_entry(good).await.unwrap();
        let totals = ledger.totals_between(date(10), date(10)).await.unwrap();
        assert_eq!(totals.expenses, dec("10.00"));
    }
}

//! Price catalog: append-only price history with point-in-time resolution
//!
//! The catalog answers "what did grade X cost on date D?" by selecting the
//! entry with the greatest `effective_from` not after D. Multiple entries
//! with the same `effective_from` are same-day corrections; the most recently
//! recorded one wins.

use chrono::NaiveDate;

use crate::traits::*;
use crate::types::*;

/// Resolve the price entry effective on `date` from a product's history
///
/// `history` is the full append-only sequence for a single product, in any
/// order. Returns `None` when the history is empty or every entry takes
/// effect after `date`; callers surface that as a data-quality warning and
/// price the affected rows at zero rather than failing the whole report.
pub fn resolve_price(history: &[PriceEntry], date: NaiveDate) -> Option<&PriceEntry> {
    history
        .iter()
        .filter(|entry| entry.effective_from <= date)
        .max_by(|a, b| {
            a.effective_from
                .cmp(&b.effective_from)
                .then(a.recorded_at.cmp(&b.recorded_at))
        })
}

/// Price catalog manager over a storage backend
///
/// Handles price registration (the configuration page's "new price" form)
/// and history reads. Entries are append-only: a correction is a new entry
/// with the same `effective_from`, never an update in place.
pub struct PriceCatalog<S: StationStorage> {
    storage: S,
    validator: Box<dyn PriceValidator>,
}

impl<S: StationStorage> PriceCatalog<S> {
    /// Create a new price catalog manager
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            validator: Box::new(DefaultPriceValidator),
        }
    }

    /// Create a price catalog manager with a custom validator
    pub fn with_validator(storage: S, validator: Box<dyn PriceValidator>) -> Self {
        Self { storage, validator }
    }

    /// Register a new price for a product, effective from the given date
    pub async fn register_price(
        &mut self,
        product: Product,
        price_per_gallon: bigdecimal::BigDecimal,
        effective_from: NaiveDate,
    ) -> StationResult<PriceEntry> {
        let entry = PriceEntry::new(product, price_per_gallon, effective_from);
        self.validator.validate_price(&entry)?;
        self.storage.save_price_entry(&entry).await?;
        Ok(entry)
    }

    /// Full price history for a product, ordered by `effective_from`
    pub async fn price_history(&self, product: Product) -> StationResult<Vec<PriceEntry>> {
        self.storage.price_history(product).await
    }

    /// Price entry effective for `product` on `date`, if any
    pub async fn effective_price(
        &self,
        product: Product,
        date: NaiveDate,
    ) -> StationResult<Option<PriceEntry>> {
        let history = self.storage.price_history(product).await?;
        Ok(resolve_price(&history, date).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;
    use chrono::NaiveDateTime;
    use std::str::FromStr;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entry(price: &str, effective: NaiveDate, recorded: &str) -> PriceEntry {
        PriceEntry {
            product: Product::Octane90,
            price_per_gallon: BigDecimal::from_str(price).unwrap(),
            effective_from: effective,
            recorded_at: NaiveDateTime::parse_from_str(recorded, "%Y-%m-%d %H:%M:%S").unwrap(),
        }
    }

    #[test]
    fn picks_latest_entry_not_after_date() {
        let history = vec![
            entry("13.50", date(2024, 1, 1), "2023-12-30 09:00:00"),
            entry("14.00", date(2024, 2, 1), "2024-01-31 09:00:00"),
            entry("15.00", date(2024, 3, 1), "2024-02-28 09:00:00"),
        ];

        let resolved = resolve_price(&history, date(2024, 2, 15)).unwrap();
        assert_eq!(resolved.price_per_gallon, BigDecimal::from_str("14.00").unwrap());
    }

    #[test]
    fn entry_effective_exactly_on_date_applies() {
        let history = vec![
            entry("13.50", date(2024, 1, 1), "2023-12-30 09:00:00"),
            entry("14.00", date(2024, 2, 1), "2024-01-31 09:00:00"),
        ];

        let resolved = resolve_price(&history, date(2024, 2, 1)).unwrap();
        assert_eq!(resolved.price_per_gallon, BigDecimal::from_str("14.00").unwrap());
    }

    #[test]
    fn empty_history_resolves_to_none() {
        assert!(resolve_price(&[], date(2024, 1, 1)).is_none());
    }

    #[test]
    fn all_entries_in_future_resolve_to_none() {
        let history = vec![entry("14.00", date(2024, 6, 1), "2024-05-31 09:00:00")];
        assert!(resolve_price(&history, date(2024, 1, 1)).is_none());
    }

    #[test]
    fn same_day_correction_wins_by_recorded_at() {
        let history = vec![
            entry("14.00", date(2024, 2, 1), "2024-01-31 09:00:00"),
            // fat-fingered price corrected later the same morning
            entry("14.50", date(2024, 2, 1), "2024-01-31 11:30:00"),
        ];

        let resolved = resolve_price(&history, date(2024, 2, 10)).unwrap();
        assert_eq!(resolved.price_per_gallon, BigDecimal::from_str("14.50").unwrap());
    }

    #[test]
    fn resolution_is_order_independent() {
        let mut history = vec![
            entry("15.00", date(2024, 3, 1), "2024-02-28 09:00:00"),
            entry("13.50", date(2024, 1, 1), "2023-12-30 09:00:00"),
            entry("14.00", date(2024, 2, 1), "2024-01-31 09:00:00"),
        ];

        let forward = resolve_price(&history, date(2024, 12, 1)).unwrap().clone();
        history.reverse();
        let reversed = resolve_price(&history, date(2024, 12, 1)).unwrap().clone();
        assert_eq!(forward, reversed);
    }
}

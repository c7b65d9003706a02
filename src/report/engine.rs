//! Reconciliation engine composing the catalog, metering, and cashbook

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use std::collections::HashMap;

use crate::catalog::resolve_price;
use crate::cashbook;
use crate::metering::{self, MeterConfig};
use crate::report::{PumpSale, ReconciliationReport, ReportSet, ReportSnapshot, ReportWarning};
use crate::traits::StationStorage;
use crate::types::*;

/// Daily reconciliation engine
///
/// Stateless with respect to shared state: each call reads the price
/// history, readings, and cash entries through the injected storage and
/// returns a derived report. The engine mutates nothing, so concurrent
/// calls for different dates need no coordination.
pub struct ReconciliationEngine<S: StationStorage> {
    storage: S,
    meter: MeterConfig,
}

impl<S: StationStorage> ReconciliationEngine<S> {
    /// Create an engine over a storage backend and meter configuration
    pub fn new(storage: S, meter: MeterConfig) -> Self {
        Self { storage, meter }
    }

    /// Reconcile a single business day
    ///
    /// Fails with [`StationError::IncompleteData`] when no readings exist
    /// for the date. Every other per-row problem (unclosed reading, missing
    /// price, implausible delta) degrades to a [`ReportWarning`] so partial
    /// data still yields a usable report.
    pub async fn reconcile(&self, date: NaiveDate) -> StationResult<ReconciliationReport> {
        let readings = self.storage.readings_between(date, date).await?;
        if readings.is_empty() {
            return Err(StationError::IncompleteData(date));
        }

        let cash = self.storage.cash_entries_between(date, date).await?;
        let totals = cashbook::aggregate(&cash, date, date);

        let mut pumps = Vec::with_capacity(readings.len());
        let mut missing_pumps = Vec::new();
        let mut warnings = Vec::new();
        let mut gross_revenue = BigDecimal::from(0);
        // one history fetch per product, not per pump
        let mut histories: HashMap<Product, Vec<PriceEntry>> = HashMap::new();

        for reading in &readings {
            let delta = match metering::validate_and_diff(reading, &self.meter) {
                Ok(delta) => delta,
                Err(err) => {
                    missing_pumps.push(reading.pump_id.clone());
                    warnings.push(ReportWarning::MissingReading {
                        pump_id: reading.pump_id.clone(),
                        reason: err.to_string(),
                    });
                    continue;
                }
            };

            if delta.anomalous {
                warnings.push(ReportWarning::AnomalousDelta {
                    pump_id: reading.pump_id.clone(),
                    gallons: delta.gallons,
                    ceiling: self.meter.max_plausible_delta(),
                });
            }

            let history = match histories.entry(reading.product) {
                std::collections::hash_map::Entry::Occupied(entry) => entry.into_mut(),
                std::collections::hash_map::Entry::Vacant(entry) => {
                    entry.insert(self.storage.price_history(reading.product).await?)
                }
            };

            let unit_price = match resolve_price(history, date) {
                Some(entry) => entry.price_per_gallon.clone(),
                None => {
                    warnings.push(ReportWarning::PriceMissing {
                        pump_id: reading.pump_id.clone(),
                        product: reading.product,
                        date,
                    });
                    BigDecimal::from(0)
                }
            };

            let subtotal = BigDecimal::from(delta.gallons) * &unit_price;
            gross_revenue += &subtotal;

            pumps.push(PumpSale {
                pump_id: reading.pump_id.clone(),
                product: reading.product,
                initial_reading: reading.initial_reading,
                // validate_and_diff already rejected open readings
                final_reading: reading.final_reading.unwrap_or(reading.initial_reading),
                gallons: delta.gallons,
                unit_price,
                subtotal,
                meter_wrapped: delta.wrapped,
                anomalous: delta.anomalous,
            });
        }

        let net_balance = &gross_revenue - totals.deducted_total();

        let expense_entries = cash
            .iter()
            .filter(|e| e.date == date && e.category == CashCategory::Expense)
            .cloned()
            .collect();
        let voucher_entries = cash
            .iter()
            .filter(|e| e.date == date && e.category == CashCategory::Voucher)
            .cloned()
            .collect();

        Ok(ReconciliationReport {
            date,
            pumps,
            missing_pumps,
            gross_revenue,
            totals,
            expense_entries,
            voucher_entries,
            net_balance,
            warnings,
        })
    }

    /// Reconcile every day in the inclusive range
    ///
    /// Days are independent: a day with no readings lands in
    /// [`ReportSet::empty_days`] and never aborts its siblings. Structural
    /// failures (storage errors) still propagate.
    pub async fn reconcile_range(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> StationResult<ReportSet> {
        if end_date < start_date {
            return Err(StationError::Validation(format!(
                "Invalid date range: {} is after {}",
                start_date, end_date
            )));
        }

        let mut reports = Vec::new();
        let mut empty_days = Vec::new();

        let mut day = start_date;
        loop {
            match self.reconcile(day).await {
                Ok(report) => reports.push(report),
                Err(StationError::IncompleteData(date)) => empty_days.push(date),
                Err(err) => return Err(err),
            }
            if day == end_date {
                break;
            }
            day = day.succ_opt().ok_or_else(|| {
                StationError::Validation(format!("Date overflow past {}", day))
            })?;
        }

        Ok(ReportSet {
            start_date,
            end_date,
            reports,
            empty_days,
        })
    }

    /// Persist a computed report as an audit snapshot
    pub async fn snapshot(
        &mut self,
        report: ReconciliationReport,
    ) -> StationResult<ReportSnapshot> {
        let snapshot = ReportSnapshot::new(report);
        self.storage.record_report(&snapshot).await?;
        Ok(snapshot)
    }

    /// Borrow the underlying storage
    pub fn storage(&self) -> &S {
        &self.storage
    }
}

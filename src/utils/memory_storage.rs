//! In-memory storage implementation for testing

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::report::ReportSnapshot;
use crate::traits::*;
use crate::types::*;

/// In-memory storage implementation for testing and development
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    prices: Arc<RwLock<HashMap<Product, Vec<PriceEntry>>>>,
    readings: Arc<RwLock<Vec<MeterReading>>>,
    cash_entries: Arc<RwLock<Vec<CashEntry>>>,
    snapshots: Arc<RwLock<Vec<ReportSnapshot>>>,
}

impl MemoryStorage {
    /// Create a new memory storage instance
    pub fn new() -> Self {
        Self {
            prices: Arc::new(RwLock::new(HashMap::new())),
            readings: Arc::new(RwLock::new(Vec::new())),
            cash_entries: Arc::new(RwLock::new(Vec::new())),
            snapshots: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Clear all data (useful for testing)
    pub fn clear(&self) {
        self.prices.write().unwrap().clear();
        self.readings.write().unwrap().clear();
        self.cash_entries.write().unwrap().clear();
        self.snapshots.write().unwrap().clear();
    }

    /// All recorded audit snapshots
    pub fn snapshots(&self) -> Vec<ReportSnapshot> {
        self.snapshots.read().unwrap().clone()
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StationStorage for MemoryStorage {
    async fn save_price_entry(&mut self, entry: &PriceEntry) -> StationResult<()> {
        let mut prices = self.prices.write().unwrap();
        let history = prices.entry(entry.product).or_default();
        history.push(entry.clone());
        history.sort_by(|a, b| {
            a.effective_from
                .cmp(&b.effective_from)
                .then(a.recorded_at.cmp(&b.recorded_at))
        });
        Ok(())
    }

    async fn price_history(&self, product: Product) -> StationResult<Vec<PriceEntry>> {
        Ok(self
            .prices
            .read()
            .unwrap()
            .get(&product)
            .cloned()
            .unwrap_or_default())
    }

    async fn save_reading(&mut self, reading: &MeterReading) -> StationResult<()> {
        let mut readings = self.readings.write().unwrap();
        // one row per pump-day: recording a closing value replaces the open row
        if let Some(existing) = readings
            .iter_mut()
            .find(|r| r.pump_id == reading.pump_id && r.date == reading.date)
        {
            *existing = reading.clone();
        } else {
            readings.push(reading.clone());
        }
        Ok(())
    }

    async fn readings_between(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> StationResult<Vec<MeterReading>> {
        let readings = self.readings.read().unwrap();
        Ok(readings
            .iter()
            .filter(|r| r.date >= start_date && r.date <= end_date)
            .cloned()
            .collect())
    }

    async fn save_cash_entry(&mut self, entry: &CashEntry) -> StationResult<()> {
        self.cash_entries.write().unwrap().push(entry.clone());
        Ok(())
    }

    async fn cash_entries_between(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> StationResult<Vec<CashEntry>> {
        let entries = self.cash_entries.read().unwrap();
        Ok(entries
            .iter()
            .filter(|e| e.date >= start_date && e.date <= end_date)
            .cloned()
            .collect())
    }

    async fn record_report(&mut self, snapshot: &ReportSnapshot) -> StationResult<()> {
        self.snapshots.write().unwrap().push(snapshot.clone());
        Ok(())
    }
}

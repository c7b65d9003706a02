//! Meter reading validation and gallons computation
//!
//! Dispenser totalizers are fixed-width counters: a 9-digit display wraps
//! from 999_999_999 to 0. A closing value below the opening value therefore
//! means the meter rolled over during the shift, not that fuel flowed
//! backwards, and the delta must be computed modulo the display capacity.

use serde::{Deserialize, Serialize};

use crate::types::*;

/// Meter hardware configuration
///
/// Both knobs are required: the digit capacity depends on the installed
/// dispenser model and the plausibility ceiling on the station's pump
/// throughput, so neither has a safe universal default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeterConfig {
    /// Number of digits on the totalizer display; the counter wraps at
    /// 10^digit_capacity
    digit_capacity: u32,
    /// Largest single-day gallons delta considered plausible for one pump;
    /// larger deltas are flagged for manual review but still counted
    max_plausible_delta: u64,
}

impl MeterConfig {
    /// Create a meter configuration
    pub fn new(digit_capacity: u32, max_plausible_delta: u64) -> Self {
        Self {
            digit_capacity,
            max_plausible_delta,
        }
    }

    /// Configuration for the common 9-digit dispenser display
    pub fn nine_digit(max_plausible_delta: u64) -> Self {
        Self::new(9, max_plausible_delta)
    }

    /// The value at which the counter wraps to zero
    pub fn capacity(&self) -> u64 {
        10u64.pow(self.digit_capacity)
    }

    /// The configured plausibility ceiling
    pub fn max_plausible_delta(&self) -> u64 {
        self.max_plausible_delta
    }
}

/// Gallons dispensed by one pump over one day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeterDelta {
    /// Gallons dispensed
    pub gallons: u64,
    /// The meter wrapped past its digit capacity during the shift
    pub wrapped: bool,
    /// The delta exceeds the plausibility ceiling and needs manual review
    pub anomalous: bool,
}

/// Validate a reading and compute its gallons delta
///
/// Fails only when the reading has no closing value; an implausibly large
/// delta is flagged, never rejected, so operators can see and independently
/// confirm extreme figures.
pub fn validate_and_diff(reading: &MeterReading, config: &MeterConfig) -> StationResult<MeterDelta> {
    let final_reading = reading.final_reading.ok_or_else(|| {
        StationError::Validation(format!(
            "Pump {} has no closing meter value for {}",
            reading.pump_id, reading.date
        ))
    })?;

    let capacity = config.capacity();
    if reading.initial_reading >= capacity || final_reading >= capacity {
        return Err(StationError::Validation(format!(
            "Pump {} meter value exceeds the {}-digit display",
            reading.pump_id, config.digit_capacity
        )));
    }

    let (gallons, wrapped) = if final_reading >= reading.initial_reading {
        (final_reading - reading.initial_reading, false)
    } else {
        ((capacity - reading.initial_reading) + final_reading, true)
    };

    Ok(MeterDelta {
        gallons,
        wrapped,
        anomalous: gallons > config.max_plausible_delta,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn reading(initial: u64, final_reading: Option<u64>) -> MeterReading {
        MeterReading {
            pump_id: "D-01".to_string(),
            product: Product::Octane90,
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            initial_reading: initial,
            final_reading,
        }
    }

    #[test]
    fn plain_delta_when_meter_advances() {
        let config = MeterConfig::nine_digit(10_000);
        let delta = validate_and_diff(&reading(1000, Some(1120)), &config).unwrap();
        assert_eq!(delta.gallons, 120);
        assert!(!delta.wrapped);
        assert!(!delta.anomalous);
    }

    #[test]
    fn zero_delta_for_idle_pump() {
        let config = MeterConfig::nine_digit(10_000);
        let delta = validate_and_diff(&reading(5000, Some(5000)), &config).unwrap();
        assert_eq!(delta.gallons, 0);
    }

    #[test]
    fn rollover_computes_modular_delta() {
        // 3-digit display: 950 -> 40 means the counter passed 1000
        let config = MeterConfig::new(3, 10_000);
        let delta = validate_and_diff(&reading(950, Some(40)), &config).unwrap();
        assert_eq!(delta.gallons, 90);
        assert!(delta.wrapped);
    }

    #[test]
    fn nine_digit_rollover() {
        let config = MeterConfig::nine_digit(10_000);
        let delta = validate_and_diff(&reading(999_999_900, Some(50)), &config).unwrap();
        assert_eq!(delta.gallons, 150);
        assert!(delta.wrapped);
    }

    #[test]
    fn implausible_delta_is_flagged_not_rejected() {
        let config = MeterConfig::nine_digit(5_000);
        let delta = validate_and_diff(&reading(0, Some(80_000)), &config).unwrap();
        assert_eq!(delta.gallons, 80_000);
        assert!(delta.anomalous);
    }

    #[test]
    fn open_reading_fails_validation() {
        let config = MeterConfig::nine_digit(10_000);
        let err = validate_and_diff(&reading(1000, None), &config).unwrap_err();
        assert!(matches!(err, StationError::Validation(_)));
    }

    #[test]
    fn meter_value_beyond_display_width_fails() {
        let config = MeterConfig::new(3, 10_000);
        let err = validate_and_diff(&reading(1_500, Some(1_600)), &config).unwrap_err();
        assert!(matches!(err, StationError::Validation(_)));
    }
}

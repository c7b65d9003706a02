//! Validation utilities

use crate::traits::*;
use crate::types::*;
use bigdecimal::BigDecimal;

/// Validate that an amount is positive
pub fn validate_positive_amount(amount: &BigDecimal) -> StationResult<()> {
    if *amount <= BigDecimal::from(0) {
        Err(StationError::Validation(
            "Amount must be positive".to_string(),
        ))
    } else {
        Ok(())
    }
}

/// Validate that a pump identifier is usable
pub fn validate_pump_id(pump_id: &str) -> StationResult<()> {
    if pump_id.trim().is_empty() {
        return Err(StationError::Validation(
            "Pump ID cannot be empty".to_string(),
        ));
    }

    if pump_id.len() > 20 {
        return Err(StationError::Validation(
            "Pump ID cannot exceed 20 characters".to_string(),
        ));
    }

    if !pump_id
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(StationError::Validation(
            "Pump ID can only contain alphanumeric characters, dashes, and underscores".to_string(),
        ));
    }

    Ok(())
}

/// Validate that a cash entry description is usable
pub fn validate_description(description: &str) -> StationResult<()> {
    if description.trim().is_empty() {
        return Err(StationError::Validation(
            "Description cannot be empty".to_string(),
        ));
    }

    if description.len() > 500 {
        return Err(StationError::Validation(
            "Description cannot exceed 500 characters".to_string(),
        ));
    }

    Ok(())
}

/// Enhanced cash-entry validator with field-level checks
pub struct EnhancedCashEntryValidator;

impl CashEntryValidator for EnhancedCashEntryValidator {
    fn validate_entry(&self, entry: &CashEntry) -> StationResult<()> {
        entry.validate()?;
        validate_positive_amount(&entry.amount)?;
        validate_description(&entry.description)?;
        Ok(())
    }
}

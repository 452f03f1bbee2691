//! Contract domain errors

use thiserror::Error;

use core_kernel::{MoneyError, TemporalError};
use domain_pricing::PricingError;

/// Errors that can occur in the contract lifecycle
#[derive(Debug, Error)]
pub enum ContractError {
    /// The requested transition is not legal from the current state
    #[error("Cannot {action} a contract in {state} state")]
    InvalidTransition {
        state: &'static str,
        action: &'static str,
    },

    /// Void and override operations require a reason
    #[error("A reason is required to {action}")]
    ReasonRequired { action: &'static str },

    /// Extension must cover at least one day
    #[error("Extension must be for at least one day, got {0}")]
    InvalidExtensionDays(u32),

    /// Fee key is not registered
    #[error("Unknown fee type '{0}'")]
    UnknownFeeType(String),

    /// Fee amounts must be positive
    #[error("Fee amount for '{fee_type}' must be positive")]
    NonPositiveFee { fee_type: String },

    /// Return mileage cannot be below pickup mileage
    #[error("Return mileage {return_mileage} is below pickup mileage {pickup_mileage}")]
    MileageRegression {
        pickup_mileage: u32,
        return_mileage: u32,
    },

    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error(transparent)]
    Money(#[from] MoneyError),

    #[error(transparent)]
    Temporal(#[from] TemporalError),
}

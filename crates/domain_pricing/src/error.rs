//! Pricing domain errors

use thiserror::Error;

/// Errors that can occur when building rate cards or pricing rentals
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// Rate card rates carry more than one currency
    #[error("Rate card rates must share a single currency")]
    MixedCurrencies,

    /// A rate on the card is zero or negative
    #[error("Rate card {rate} rate must be positive")]
    NonPositiveRate { rate: String },
}

//! Pricing DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

use core_kernel::{Currency, Money};
use domain_pricing::RateCard;

use crate::error::ApiError;

/// A rate card supplied inline with a request
#[derive(Debug, Clone, Deserialize)]
pub struct RateCardDto {
    pub currency: Currency,
    pub daily: Decimal,
    pub weekly: Decimal,
    pub monthly: Decimal,
}

impl RateCardDto {
    pub fn to_domain(&self) -> Result<RateCard, ApiError> {
        Ok(RateCard::new(
            Money::new(self.daily, self.currency),
            Money::new(self.weekly, self.currency),
            Money::new(self.monthly, self.currency),
        )?)
    }
}

/// Request for a rental quote
///
/// The duration comes either from a date range or from a direct day count.
#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    pub rate_card: RateCardDto,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub days: Option<u32>,
}

/// Request for an extension quote
#[derive(Debug, Deserialize)]
pub struct ExtensionQuoteRequest {
    pub rate_card: RateCardDto,
    pub days: u32,
}

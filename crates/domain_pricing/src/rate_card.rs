//! Vehicle rate cards
//!
//! A rate card carries the daily, weekly, and monthly prices for one
//! vehicle. It is owned by the vehicle entity and treated as immutable for
//! the duration of a pricing call.

use core_kernel::{Currency, Money};
use serde::{Deserialize, Serialize};

use crate::error::PricingError;

/// Daily/weekly/monthly prices for one vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateCard {
    daily: Money,
    weekly: Money,
    monthly: Money,
}

impl RateCard {
    /// Creates a rate card, enforcing a single currency and positive rates
    pub fn new(daily: Money, weekly: Money, monthly: Money) -> Result<Self, PricingError> {
        let currency = daily.currency();
        if weekly.currency() != currency || monthly.currency() != currency {
            return Err(PricingError::MixedCurrencies);
        }
        for (name, rate) in [("daily", daily), ("weekly", weekly), ("monthly", monthly)] {
            if !rate.is_positive() {
                return Err(PricingError::NonPositiveRate {
                    rate: name.to_string(),
                });
            }
        }
        Ok(Self {
            daily,
            weekly,
            monthly,
        })
    }

    pub fn daily(&self) -> Money {
        self.daily
    }

    pub fn weekly(&self) -> Money {
        self.weekly
    }

    pub fn monthly(&self) -> Money {
        self.monthly
    }

    pub fn currency(&self) -> Currency {
        self.daily.currency()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_rate_card_rejects_mixed_currencies() {
        let result = RateCard::new(
            Money::new(dec!(100), Currency::USD),
            Money::new(dec!(600), Currency::EUR),
            Money::new(dec!(2000), Currency::USD),
        );
        assert!(matches!(result, Err(PricingError::MixedCurrencies)));
    }

    #[test]
    fn test_rate_card_rejects_zero_rate() {
        let result = RateCard::new(
            Money::new(dec!(0), Currency::USD),
            Money::new(dec!(600), Currency::USD),
            Money::new(dec!(2000), Currency::USD),
        );
        assert!(matches!(result, Err(PricingError::NonPositiveRate { .. })));
    }
}

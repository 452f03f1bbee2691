//! Tiered rental quote computation
//!
//! The tier is selected once per call from the total rental duration:
//!
//! - 1-6 days: every day at the daily rate
//! - 7-29 days: complete weeks at the weekly rate, remaining days daily
//! - 30+ days: complete 30-day months at the monthly rate, the remainder
//!   split into weeks then days by the same rule
//!
//! Pure and deterministic: the same inputs always produce the same quote,
//! whether the day count comes from a date range or is supplied directly
//! (extension pricing).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{Money, RentalPeriod};

use crate::rate_card::RateCard;

const DAYS_PER_WEEK: u32 = 7;
const DAYS_PER_MONTH: u32 = 30;

/// Rate bracket selected by rental duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceTier {
    Daily,
    Weekly,
    Monthly,
}

impl fmt::Display for PriceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PriceTier::Daily => "daily",
            PriceTier::Weekly => "weekly",
            PriceTier::Monthly => "monthly",
        };
        write!(f, "{}", name)
    }
}

/// Unit of one breakdown line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateUnit {
    Month,
    Week,
    Day,
}

/// One priced component of a quote (e.g. "2 weeks at 600")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownLine {
    pub unit: RateUnit,
    pub quantity: u32,
    pub rate: Money,
    pub subtotal: Money,
}

impl BreakdownLine {
    fn new(unit: RateUnit, quantity: u32, rate: Money) -> Self {
        Self {
            unit,
            quantity,
            rate,
            subtotal: rate.multiply(Decimal::from(quantity)),
        }
    }
}

/// The result of pricing a rental duration against a rate card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalQuote {
    pub tier: PriceTier,
    pub total_days: u32,
    pub effective_daily_rate: Money,
    pub total_amount: Money,
    pub breakdown: Vec<BreakdownLine>,
}

/// Prices a rental over a date range
///
/// Total rental days are `end - start` in whole days, floored at 1.
pub fn price(rate_card: &RateCard, period: &RentalPeriod) -> RentalQuote {
    price_for_days(rate_card, period.billable_days())
}

/// Prices a rental for a day count supplied directly
///
/// Used for extension pricing, where the days are given rather than derived
/// from dates. Day counts are floored at 1.
pub fn price_for_days(rate_card: &RateCard, days: u32) -> RentalQuote {
    let days = days.max(1);
    let tier = tier_for(days);

    let mut breakdown = Vec::new();
    let mut remaining = days;

    if remaining >= DAYS_PER_MONTH {
        let months = remaining / DAYS_PER_MONTH;
        remaining %= DAYS_PER_MONTH;
        breakdown.push(BreakdownLine::new(
            RateUnit::Month,
            months,
            rate_card.monthly(),
        ));
    }
    if remaining >= DAYS_PER_WEEK {
        let weeks = remaining / DAYS_PER_WEEK;
        remaining %= DAYS_PER_WEEK;
        breakdown.push(BreakdownLine::new(RateUnit::Week, weeks, rate_card.weekly()));
    }
    if remaining > 0 {
        breakdown.push(BreakdownLine::new(RateUnit::Day, remaining, rate_card.daily()));
    }

    let total_amount = breakdown
        .iter()
        .fold(Money::zero(rate_card.currency()), |acc, line| {
            acc + line.subtotal
        });

    // Below the weekly tier the effective rate is the raw daily rate, not a
    // recomputed average.
    let effective_daily_rate = match tier {
        PriceTier::Daily => rate_card.daily(),
        _ => Money::new(
            total_amount.amount() / Decimal::from(days),
            rate_card.currency(),
        ),
    };

    RentalQuote {
        tier,
        total_days: days,
        effective_daily_rate,
        total_amount,
        breakdown,
    }
}

fn tier_for(days: u32) -> PriceTier {
    if days >= DAYS_PER_MONTH {
        PriceTier::Monthly
    } else if days >= DAYS_PER_WEEK {
        PriceTier::Weekly
    } else {
        PriceTier::Daily
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;
    use rust_decimal_macros::dec;

    fn card() -> RateCard {
        RateCard::new(
            Money::new(dec!(100), Currency::USD),
            Money::new(dec!(600), Currency::USD),
            Money::new(dec!(2000), Currency::USD),
        )
        .unwrap()
    }

    #[test]
    fn test_six_days_is_pure_daily() {
        let quote = price_for_days(&card(), 6);
        assert_eq!(quote.tier, PriceTier::Daily);
        assert_eq!(quote.total_amount.amount(), dec!(600));
        assert_eq!(quote.effective_daily_rate.amount(), dec!(100));
        assert_eq!(quote.breakdown.len(), 1);
        assert_eq!(quote.breakdown[0].unit, RateUnit::Day);
        assert_eq!(quote.breakdown[0].quantity, 6);
    }

    #[test]
    fn test_seven_days_is_exactly_one_week() {
        let quote = price_for_days(&card(), 7);
        assert_eq!(quote.tier, PriceTier::Weekly);
        assert_eq!(quote.total_amount.amount(), dec!(600));
        assert_eq!(quote.breakdown.len(), 1);
        assert_eq!(quote.breakdown[0].unit, RateUnit::Week);
        assert_eq!(quote.breakdown[0].quantity, 1);
    }

    #[test]
    fn test_ten_days_weekly_tier() {
        // 1 complete week + 3 remaining days: 600 + 300 = 900, effective 90.00
        let quote = price_for_days(&card(), 10);
        assert_eq!(quote.tier, PriceTier::Weekly);
        assert_eq!(quote.total_amount.amount(), dec!(900));
        assert_eq!(quote.effective_daily_rate.amount(), dec!(90.00));
    }

    #[test]
    fn test_twenty_nine_days_stays_weekly() {
        // 4 weeks + 1 day = 2400 + 100
        let quote = price_for_days(&card(), 29);
        assert_eq!(quote.tier, PriceTier::Weekly);
        assert_eq!(quote.total_amount.amount(), dec!(2500));
    }

    #[test]
    fn test_thirty_days_is_one_month() {
        let quote = price_for_days(&card(), 30);
        assert_eq!(quote.tier, PriceTier::Monthly);
        assert_eq!(quote.total_amount.amount(), dec!(2000));
        assert_eq!(quote.breakdown.len(), 1);
    }

    #[test]
    fn test_monthly_remainder_splits_into_weeks_then_days() {
        // 40 days: 1 month + 1 week + 3 days = 2000 + 600 + 300
        let quote = price_for_days(&card(), 40);
        assert_eq!(quote.tier, PriceTier::Monthly);
        assert_eq!(quote.total_amount.amount(), dec!(2900));
        assert_eq!(quote.breakdown.len(), 3);
        assert_eq!(quote.breakdown[0].unit, RateUnit::Month);
        assert_eq!(quote.breakdown[1].unit, RateUnit::Week);
        assert_eq!(quote.breakdown[2].unit, RateUnit::Day);
    }

    #[test]
    fn test_zero_days_floored_to_one() {
        let quote = price_for_days(&card(), 0);
        assert_eq!(quote.total_days, 1);
        assert_eq!(quote.total_amount.amount(), dec!(100));
    }

    #[test]
    fn test_effective_rate_rounded_to_cents() {
        // 8 days: 600 + 100 = 700, 700/8 = 87.50
        let quote = price_for_days(&card(), 8);
        assert_eq!(quote.effective_daily_rate.amount(), dec!(87.50));
    }
}

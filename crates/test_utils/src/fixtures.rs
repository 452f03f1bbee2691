//! Pre-built test fixtures
//!
//! Ready-to-use test data for common entities across the rental system,
//! designed to be consistent and predictable between tests.

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal_macros::dec;
use uuid::Uuid;

use core_kernel::{
    BranchId, ContractId, Currency, CustomerId, Money, RentalPeriod, VehicleId,
};
use domain_pricing::RateCard;

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// Standard daily rate
    pub fn usd_daily_rate() -> Money {
        Money::new(dec!(100.00), Currency::USD)
    }

    /// A zero amount
    pub fn usd_zero() -> Money {
        Money::zero(Currency::USD)
    }

    /// Standard refundable deposit
    pub fn usd_deposit() -> Money {
        Money::new(dec!(500.00), Currency::USD)
    }

    /// EUR amount for currency mismatch tests
    pub fn eur_100() -> Money {
        Money::new(dec!(100.00), Currency::EUR)
    }
}

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Standard rental pickup (Jun 1, 2024, 10:00)
    pub fn pickup() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap()
    }

    /// Standard rental return, ten billable days after pickup
    pub fn ten_day_return() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 11, 10, 0, 0).unwrap()
    }

    /// The standard ten-day rental period
    pub fn ten_day_period() -> RentalPeriod {
        RentalPeriod::new(Self::pickup(), Self::ten_day_return()).unwrap()
    }

    /// A short three-day period, daily tier
    pub fn three_day_period() -> RentalPeriod {
        RentalPeriod::new(
            Self::pickup(),
            Utc.with_ymd_and_hms(2024, 6, 4, 10, 0, 0).unwrap(),
        )
        .unwrap()
    }
}

/// Fixture for rate cards
pub struct RateCardFixtures;

impl RateCardFixtures {
    /// daily=100, weekly=600, monthly=2000 in USD
    pub fn standard_usd() -> RateCard {
        RateCard::new(
            Money::new(dec!(100), Currency::USD),
            Money::new(dec!(600), Currency::USD),
            Money::new(dec!(2000), Currency::USD),
        )
        .unwrap()
    }
}

/// Fixture for identifier test data
pub struct IdFixtures;

impl IdFixtures {
    /// Deterministic contract id
    pub fn contract_id() -> ContractId {
        ContractId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440001").unwrap())
    }

    /// Deterministic customer id
    pub fn customer_id() -> CustomerId {
        CustomerId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440002").unwrap())
    }

    /// Deterministic vehicle id
    pub fn vehicle_id() -> VehicleId {
        VehicleId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440003").unwrap())
    }

    /// Deterministic branch id
    pub fn branch_id() -> BranchId {
        BranchId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440004").unwrap())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_fixtures_are_deterministic() {
        assert_eq!(IdFixtures::contract_id(), IdFixtures::contract_id());
    }

    #[test]
    fn test_standard_card_prices_ten_days_at_900() {
        let quote =
            domain_pricing::price(&RateCardFixtures::standard_usd(), &TemporalFixtures::ten_day_period());
        assert_eq!(quote.total_amount.amount(), dec!(900));
    }
}

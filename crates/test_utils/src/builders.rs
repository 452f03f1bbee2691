//! Test data builders
//!
//! Fluent builders for aggregates whose construction takes many arguments.
//! Defaults come from the fixtures; override what the test cares about.

use core_kernel::{BranchId, CustomerId, Money, RentalPeriod, VehicleId};
use domain_contract::{
    Contract, ContractTerms, Deposit, DepositKind, FuelLevel, VehicleCondition,
};
use domain_pricing::RateCard;
use rust_decimal_macros::dec;

use crate::fixtures::{IdFixtures, MoneyFixtures, RateCardFixtures, TemporalFixtures};

/// Builder for test contracts
pub struct ContractBuilder {
    contract_number: String,
    customer_id: CustomerId,
    vehicle_id: VehicleId,
    branch_id: BranchId,
    period: RentalPeriod,
    rate_card: RateCard,
    deposit: Deposit,
    mileage_limit: Option<u32>,
    excess_mileage_rate: Money,
    fuel_service_rate: Money,
    pickup_mileage: u32,
    pickup_fuel: FuelLevel,
}

impl Default for ContractBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ContractBuilder {
    pub fn new() -> Self {
        Self {
            contract_number: "CTR-202406-000001".to_string(),
            customer_id: IdFixtures::customer_id(),
            vehicle_id: IdFixtures::vehicle_id(),
            branch_id: IdFixtures::branch_id(),
            period: TemporalFixtures::ten_day_period(),
            rate_card: RateCardFixtures::standard_usd(),
            deposit: Deposit {
                amount: MoneyFixtures::usd_deposit(),
                kind: DepositKind::Refundable,
            },
            mileage_limit: Some(1000),
            excess_mileage_rate: Money::new(dec!(0.50), core_kernel::Currency::USD),
            fuel_service_rate: Money::new(dec!(15), core_kernel::Currency::USD),
            pickup_mileage: 42_000,
            pickup_fuel: FuelLevel::Full,
        }
    }

    pub fn with_period(mut self, period: RentalPeriod) -> Self {
        self.period = period;
        self
    }

    pub fn with_rate_card(mut self, rate_card: RateCard) -> Self {
        self.rate_card = rate_card;
        self
    }

    pub fn with_branch(mut self, branch_id: BranchId) -> Self {
        self.branch_id = branch_id;
        self
    }

    pub fn with_deposit(mut self, deposit: Deposit) -> Self {
        self.deposit = deposit;
        self
    }

    pub fn with_mileage_limit(mut self, limit: u32) -> Self {
        self.mileage_limit = Some(limit);
        self
    }

    pub fn with_unlimited_mileage(mut self) -> Self {
        self.mileage_limit = None;
        self
    }

    pub fn with_excess_mileage_rate(mut self, rate: Money) -> Self {
        self.excess_mileage_rate = rate;
        self
    }

    pub fn with_pickup_mileage(mut self, mileage: u32) -> Self {
        self.pickup_mileage = mileage;
        self
    }

    /// Builds a draft contract
    pub fn build(self) -> Contract {
        Contract::draft(
            self.contract_number,
            self.customer_id,
            self.vehicle_id,
            self.branch_id,
            self.period,
            &self.rate_card,
            ContractTerms {
                deposit: self.deposit,
                mileage_limit: self.mileage_limit,
                excess_mileage_rate: self.excess_mileage_rate,
                fuel_service_rate: self.fuel_service_rate,
            },
            VehicleCondition::new(self.pickup_mileage, self.pickup_fuel),
        )
    }

    /// Builds a contract already moved into the active state
    pub fn build_active(self) -> Contract {
        let mut contract = self.build();
        contract
            .activate()
            .expect("draft contract must activate cleanly");
        contract.take_events();
        contract
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_builder_produces_priced_draft() {
        let contract = ContractBuilder::new().build();
        assert_eq!(contract.total_days, 10);
        assert_eq!(contract.total_amount.amount(), dec!(900));
    }

    #[test]
    fn test_build_active() {
        let contract = ContractBuilder::new().build_active();
        assert_eq!(contract.status.name(), "active");
    }
}

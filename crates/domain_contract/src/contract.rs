//! The contract aggregate
//!
//! A contract is a state machine over {draft, active, completed, void}.
//! Every mutating operation checks the current state first and fails with
//! a named transition error, leaving the aggregate untouched, when the
//! operation is not legal. Money amounts on the contract are derived from
//! the pricing engine; manual overrides preserve the computed amount for
//! audit and always require a reason.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use core_kernel::{
    BranchId, ContractId, CustomerId, ExtensionId, Money, RentalPeriod, VehicleId,
};
use domain_pricing::{price, price_for_days, RateCard};

use crate::condition::VehicleCondition;
use crate::error::ContractError;
use crate::events::ContractEvent;
use crate::extension::{Extension, ExtensionStatus};
use crate::fees::{FeeLine, FeeTypeRegistry};

/// Contract lifecycle state, carrying transition metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ContractStatus {
    Draft,
    Active { activated_at: DateTime<Utc> },
    Completed { completed_at: DateTime<Utc> },
    Void { reason: String, voided_at: DateTime<Utc> },
}

impl ContractStatus {
    pub fn name(&self) -> &'static str {
        match self {
            ContractStatus::Draft => "draft",
            ContractStatus::Active { .. } => "active",
            ContractStatus::Completed { .. } => "completed",
            ContractStatus::Void { .. } => "void",
        }
    }
}

/// Whether the deposit is returned at closure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepositKind {
    Refundable,
    NonRefundable,
}

/// Security deposit terms agreed at signing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Deposit {
    pub amount: Money,
    pub kind: DepositKind,
}

/// Audit record of a manual amount override
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmountOverride {
    /// The amount the system computed before the override
    pub computed: Money,
    pub reason: String,
    pub overridden_at: DateTime<Utc>,
}

/// Commercial terms captured at contract creation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractTerms {
    pub deposit: Deposit,
    /// Included kilometres for the whole rental; `None` means unlimited
    pub mileage_limit: Option<u32>,
    /// Charge per kilometre over the limit
    pub excess_mileage_rate: Money,
    /// Charge per fuel-gauge step the vehicle comes back below pickup
    pub fuel_service_rate: Money,
}

/// A rental contract
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    pub id: ContractId,
    /// Sequential human-readable number (CTR-YYYYMM-NNNNNN)
    pub contract_number: String,
    pub customer_id: CustomerId,
    pub vehicle_id: VehicleId,
    pub branch_id: BranchId,
    pub status: ContractStatus,
    /// Current effective period; extensions advance its end
    pub period: RentalPeriod,
    /// The period as originally agreed, untouched by extensions
    pub original_period: RentalPeriod,
    /// The agreed per-day rate, taken straight from the rate card. Tier
    /// discounts live in `total_amount`; per-day charges (base rental at
    /// closure, late days) always use this rate.
    pub daily_rate: Money,
    pub total_days: u32,
    pub total_amount: Money,
    pub terms: ContractTerms,
    pub pickup_condition: VehicleCondition,
    pub return_condition: Option<VehicleCondition>,
    pub excess_mileage_charge: Money,
    pub fuel_charge: Money,
    pub extensions: Vec<Extension>,
    pub fees: Vec<FeeLine>,
    pub rate_override: Option<AmountOverride>,
    pub price_override: Option<AmountOverride>,
    pub created_at: DateTime<Utc>,
    #[serde(skip)]
    events: Vec<ContractEvent>,
}

impl Contract {
    /// Drafts a contract priced from the rate card over the period
    pub fn draft(
        contract_number: String,
        customer_id: CustomerId,
        vehicle_id: VehicleId,
        branch_id: BranchId,
        period: RentalPeriod,
        rate_card: &RateCard,
        terms: ContractTerms,
        pickup_condition: VehicleCondition,
    ) -> Self {
        let quote = price(rate_card, &period);
        let currency = quote.total_amount.currency();
        Self {
            id: ContractId::new(),
            contract_number,
            customer_id,
            vehicle_id,
            branch_id,
            status: ContractStatus::Draft,
            period,
            original_period: period,
            daily_rate: rate_card.daily(),
            total_days: quote.total_days,
            total_amount: quote.total_amount,
            terms,
            pickup_condition,
            return_condition: None,
            excess_mileage_charge: Money::zero(currency),
            fuel_charge: Money::zero(currency),
            extensions: Vec::new(),
            fees: Vec::new(),
            rate_override: None,
            price_override: None,
            created_at: Utc::now(),
            events: Vec::new(),
        }
    }

    pub fn currency(&self) -> core_kernel::Currency {
        self.total_amount.currency()
    }

    /// Drains accumulated domain events
    pub fn take_events(&mut self) -> Vec<ContractEvent> {
        std::mem::take(&mut self.events)
    }

    fn require_active(&self, action: &'static str) -> Result<(), ContractError> {
        match self.status {
            ContractStatus::Active { .. } => Ok(()),
            _ => Err(ContractError::InvalidTransition {
                state: self.status.name(),
                action,
            }),
        }
    }

    /// Moves a draft contract into the active state
    pub fn activate(&mut self) -> Result<(), ContractError> {
        if self.status != ContractStatus::Draft {
            return Err(ContractError::InvalidTransition {
                state: self.status.name(),
                action: "activate",
            });
        }
        let at = Utc::now();
        self.status = ContractStatus::Active { activated_at: at };
        self.events.push(ContractEvent::Activated {
            contract_id: self.id,
            at,
        });
        info!(contract = %self.contract_number, "Contract activated");
        Ok(())
    }

    /// Extends an active contract by whole days
    ///
    /// Prices the extension through the pricing engine, records an
    /// approved extension, advances the period end, and raises the
    /// effective total.
    pub fn extend(
        &mut self,
        rate_card: &RateCard,
        days: u32,
        reason: Option<String>,
    ) -> Result<Extension, ContractError> {
        self.require_active("extend")?;
        if days == 0 {
            return Err(ContractError::InvalidExtensionDays(days));
        }

        let quote = price_for_days(rate_card, days);
        let original_end = self.period.end();
        let extended = self.period.extended_by_days(days);
        let new_total = self.total_amount.checked_add(&quote.total_amount)?;

        let extension = Extension {
            id: ExtensionId::new(),
            number: self.extensions.len() as u32 + 1,
            original_end,
            new_end: extended.end(),
            days,
            daily_rate: quote.effective_daily_rate,
            total_amount: quote.total_amount,
            reason,
            status: ExtensionStatus::Approved,
            approved_at: Some(Utc::now()),
        };

        self.period = extended;
        self.total_days += days;
        self.total_amount = new_total;
        self.events.push(ContractEvent::Extended {
            contract_id: self.id,
            extension_id: extension.id,
            days,
            amount: extension.total_amount,
            new_end: extension.new_end,
        });
        self.extensions.push(extension.clone());
        info!(
            contract = %self.contract_number,
            days,
            "Contract extended"
        );
        Ok(extension)
    }

    /// Records the return condition and derives the return charges
    pub fn record_return(&mut self, condition: VehicleCondition) -> Result<(), ContractError> {
        self.require_active("record a return for")?;
        if condition.mileage < self.pickup_condition.mileage {
            return Err(ContractError::MileageRegression {
                pickup_mileage: self.pickup_condition.mileage,
                return_mileage: condition.mileage,
            });
        }

        let driven = condition.mileage - self.pickup_condition.mileage;
        let excess = match self.terms.mileage_limit {
            Some(limit) => driven.saturating_sub(limit),
            None => 0,
        };
        self.excess_mileage_charge = self
            .terms
            .excess_mileage_rate
            .multiply(Decimal::from(excess));

        let steps = condition.fuel_level.steps_below(self.pickup_condition.fuel_level);
        self.fuel_charge = self.terms.fuel_service_rate.multiply(Decimal::from(steps));

        self.return_condition = Some(condition);
        self.events.push(ContractEvent::ReturnRecorded {
            contract_id: self.id,
            excess_mileage_charge: self.excess_mileage_charge,
            fuel_charge: self.fuel_charge,
        });
        Ok(())
    }

    /// Completes an active contract now
    pub fn complete(&mut self) -> Result<(), ContractError> {
        self.complete_at(Utc::now())
    }

    /// Completes an active contract at the given moment
    ///
    /// The completion time drives the late-return charge at closure.
    pub fn complete_at(&mut self, at: DateTime<Utc>) -> Result<(), ContractError> {
        self.require_active("complete")?;
        self.status = ContractStatus::Completed { completed_at: at };
        self.events.push(ContractEvent::Completed {
            contract_id: self.id,
            at,
        });
        info!(contract = %self.contract_number, "Contract completed");
        Ok(())
    }

    /// Voids the contract; terminal, reason mandatory
    pub fn void(&mut self, reason: impl Into<String>) -> Result<(), ContractError> {
        match self.status {
            ContractStatus::Completed { .. } | ContractStatus::Void { .. } => {
                return Err(ContractError::InvalidTransition {
                    state: self.status.name(),
                    action: "void",
                });
            }
            _ => {}
        }
        let reason = reason.into();
        if reason.trim().is_empty() {
            return Err(ContractError::ReasonRequired { action: "void" });
        }
        self.status = ContractStatus::Void {
            reason: reason.clone(),
            voided_at: Utc::now(),
        };
        self.events.push(ContractEvent::Voided {
            contract_id: self.id,
            reason,
        });
        Ok(())
    }

    /// Replaces the daily rate, preserving the computed one for audit
    ///
    /// The total is recomputed from the new rate over the current total
    /// days.
    pub fn override_daily_rate(
        &mut self,
        new_rate: Money,
        reason: impl Into<String>,
    ) -> Result<(), ContractError> {
        let reason = reason.into();
        if reason.trim().is_empty() {
            return Err(ContractError::ReasonRequired {
                action: "override the daily rate",
            });
        }
        self.rate_override = Some(AmountOverride {
            computed: self.daily_rate,
            reason,
            overridden_at: Utc::now(),
        });
        self.daily_rate = new_rate;
        self.total_amount = new_rate.multiply(Decimal::from(self.total_days));
        Ok(())
    }

    /// Replaces the final price, preserving the computed one for audit
    pub fn override_final_price(
        &mut self,
        new_total: Money,
        reason: impl Into<String>,
    ) -> Result<(), ContractError> {
        let reason = reason.into();
        if reason.trim().is_empty() {
            return Err(ContractError::ReasonRequired {
                action: "override the final price",
            });
        }
        self.price_override = Some(AmountOverride {
            computed: self.total_amount,
            reason,
            overridden_at: Utc::now(),
        });
        self.total_amount = new_total;
        Ok(())
    }

    /// Adds a fee line after validating the key against the registry
    pub fn add_fee(
        &mut self,
        registry: &FeeTypeRegistry,
        key: &str,
        amount: Money,
        memo: Option<String>,
    ) -> Result<(), ContractError> {
        let fee_type = registry.require(key)?;
        if !amount.is_positive() {
            return Err(ContractError::NonPositiveFee {
                fee_type: fee_type.key.clone(),
            });
        }
        self.fees.push(FeeLine {
            fee_type: fee_type.key.clone(),
            amount,
            memo,
            added_at: Utc::now(),
        });
        self.events.push(ContractEvent::FeeAdded {
            contract_id: self.id,
            fee_type: key.to_string(),
            amount,
        });
        Ok(())
    }

    /// Sum of approved extension amounts
    pub fn extensions_total(&self) -> Result<Money, ContractError> {
        let amounts: Vec<Money> = self
            .extensions
            .iter()
            .filter(|e| e.is_approved())
            .map(|e| e.total_amount)
            .collect();
        Ok(Money::sum(self.currency(), amounts.iter())?)
    }

    /// Sum of fee line amounts
    pub fn fees_total(&self) -> Result<Money, ContractError> {
        let amounts: Vec<Money> = self.fees.iter().map(|f| f.amount).collect();
        Ok(Money::sum(self.currency(), amounts.iter())?)
    }
}

/// Issues sequential contract numbers, CTR-YYYYMM-NNNNNN
#[derive(Debug)]
pub struct ContractNumberGenerator {
    sequence: AtomicU64,
}

impl Default for ContractNumberGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ContractNumberGenerator {
    pub fn new() -> Self {
        Self {
            sequence: AtomicU64::new(1),
        }
    }

    pub fn starting_at(first: u64) -> Self {
        Self {
            sequence: AtomicU64::new(first),
        }
    }

    pub fn next(&self) -> String {
        self.next_at(Utc::now())
    }

    pub fn next_at(&self, now: DateTime<Utc>) -> String {
        let n = self.sequence.fetch_add(1, Ordering::SeqCst);
        format!("CTR-{:04}{:02}-{:06}", now.year(), now.month(), n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::FuelLevel;
    use chrono::TimeZone;
    use core_kernel::Currency;
    use rust_decimal_macros::dec;

    fn usd(amount: Decimal) -> Money {
        Money::new(amount, Currency::USD)
    }

    fn card() -> RateCard {
        RateCard::new(usd(dec!(100)), usd(dec!(600)), usd(dec!(2000))).unwrap()
    }

    fn terms() -> ContractTerms {
        ContractTerms {
            deposit: Deposit {
                amount: usd(dec!(500)),
                kind: DepositKind::Refundable,
            },
            mileage_limit: Some(1000),
            excess_mileage_rate: usd(dec!(0.50)),
            fuel_service_rate: usd(dec!(15)),
        }
    }

    fn test_contract_with(terms: ContractTerms) -> Contract {
        let period = RentalPeriod::new(
            Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 6, 11, 10, 0, 0).unwrap(),
        )
        .unwrap();
        Contract::draft(
            "CTR-202406-000001".to_string(),
            CustomerId::new(),
            VehicleId::new(),
            BranchId::new(),
            period,
            &card(),
            terms,
            VehicleCondition::new(42_000, FuelLevel::Full),
        )
    }

    fn test_contract() -> Contract {
        test_contract_with(terms())
    }

    #[test]
    fn test_draft_is_priced_from_the_rate_card() {
        let contract = test_contract();

        assert_eq!(contract.status, ContractStatus::Draft);
        assert_eq!(contract.total_days, 10);
        assert_eq!(contract.total_amount.amount(), dec!(900));
        // The weekly-tier discount lives in the total; the per-day rate
        // stays the agreed card rate.
        assert_eq!(contract.daily_rate.amount(), dec!(100.00));
    }

    #[test]
    fn test_activate_only_from_draft() {
        let mut contract = test_contract();
        contract.activate().unwrap();

        let err = contract.activate().unwrap_err();
        assert!(matches!(
            err,
            ContractError::InvalidTransition {
                state: "active",
                action: "activate"
            }
        ));
    }

    #[test]
    fn test_extend_requires_active() {
        let mut contract = test_contract();

        let err = contract.extend(&card(), 3, None).unwrap_err();
        assert!(matches!(err, ContractError::InvalidTransition { .. }));
        assert!(contract.extensions.is_empty());
        assert_eq!(contract.total_amount.amount(), dec!(900));
    }

    #[test]
    fn test_extend_raises_total_and_advances_end() {
        let mut contract = test_contract();
        contract.activate().unwrap();
        let original_end = contract.period.end();

        contract.extend(&card(), 3, Some("trip extended".into())).unwrap();

        assert_eq!(contract.total_days, 13);
        // 900 + 3 x 100 daily
        assert_eq!(contract.total_amount.amount(), dec!(1200));
        assert_eq!(contract.period.end(), original_end + chrono::Duration::days(3));

        let extension = &contract.extensions[0];
        assert_eq!(extension.number, 1);
        assert_eq!(extension.status, ExtensionStatus::Approved);
        assert_eq!(extension.total_amount.amount(), dec!(300));
    }

    #[test]
    fn test_record_return_computes_charges() {
        let mut contract = test_contract();
        contract.activate().unwrap();

        contract
            .record_return(VehicleCondition::new(43_200, FuelLevel::Quarter))
            .unwrap();

        // 1200 driven - 1000 limit = 200 excess at 0.50
        assert_eq!(contract.excess_mileage_charge.amount(), dec!(100.00));
        // full -> quarter is 3 steps at 15
        assert_eq!(contract.fuel_charge.amount(), dec!(45));
    }

    #[test]
    fn test_return_within_limits_charges_nothing() {
        let mut contract = test_contract();
        contract.activate().unwrap();

        contract
            .record_return(VehicleCondition::new(42_500, FuelLevel::Full))
            .unwrap();

        assert!(contract.excess_mileage_charge.is_zero());
        assert!(contract.fuel_charge.is_zero());
    }

    #[test]
    fn test_no_mileage_limit_means_no_excess_charge() {
        let mut unlimited = terms();
        unlimited.mileage_limit = None;
        let mut contract = test_contract_with(unlimited);
        contract.activate().unwrap();

        contract
            .record_return(VehicleCondition::new(55_000, FuelLevel::Full))
            .unwrap();

        assert!(contract.excess_mileage_charge.is_zero());
    }

    #[test]
    fn test_complete_at_stamps_the_supplied_time() {
        let mut contract = test_contract();
        contract.activate().unwrap();

        let at = Utc.with_ymd_and_hms(2024, 6, 11, 10, 0, 0).unwrap();
        contract.complete_at(at).unwrap();

        assert_eq!(
            contract.status,
            ContractStatus::Completed { completed_at: at }
        );
    }

    #[test]
    fn test_return_mileage_regression_rejected() {
        let mut contract = test_contract();
        contract.activate().unwrap();

        let err = contract
            .record_return(VehicleCondition::new(41_000, FuelLevel::Full))
            .unwrap_err();
        assert!(matches!(err, ContractError::MileageRegression { .. }));
        assert!(contract.return_condition.is_none());
    }

    #[test]
    fn test_void_requires_reason() {
        let mut contract = test_contract();

        assert!(matches!(
            contract.void("   ").unwrap_err(),
            ContractError::ReasonRequired { .. }
        ));
        contract.void("customer cancelled").unwrap();
        assert_eq!(contract.status.name(), "void");
    }

    #[test]
    fn test_void_is_terminal() {
        let mut contract = test_contract();
        contract.void("duplicate booking").unwrap();

        assert!(contract.void("again").is_err());
        assert!(contract.activate().is_err());
    }

    #[test]
    fn test_completed_cannot_be_voided() {
        let mut contract = test_contract();
        contract.activate().unwrap();
        contract.complete().unwrap();

        assert!(matches!(
            contract.void("mistake").unwrap_err(),
            ContractError::InvalidTransition {
                state: "completed",
                action: "void"
            }
        ));
    }

    #[test]
    fn test_override_preserves_computed_amount() {
        let mut contract = test_contract();

        contract
            .override_daily_rate(usd(dec!(80)), "corporate discount")
            .unwrap();

        let audit = contract.rate_override.as_ref().unwrap();
        assert_eq!(audit.computed.amount(), dec!(100.00));
        assert_eq!(contract.daily_rate.amount(), dec!(80));
        assert_eq!(contract.total_amount.amount(), dec!(800));
    }

    #[test]
    fn test_add_fee_rejects_unknown_key() {
        let mut contract = test_contract();
        let registry = FeeTypeRegistry::standard();

        let err = contract
            .add_fee(&registry, "valet", usd(dec!(20)), None)
            .unwrap_err();
        assert!(matches!(err, ContractError::UnknownFeeType(_)));
        assert!(contract.fees.is_empty());

        contract
            .add_fee(&registry, "cleaning", usd(dec!(40)), None)
            .unwrap();
        assert_eq!(contract.fees_total().unwrap().amount(), dec!(40));
    }

    #[test]
    fn test_take_events_drains() {
        let mut contract = test_contract();
        contract.activate().unwrap();

        let events = contract.take_events();
        assert_eq!(events.len(), 1);
        assert!(contract.take_events().is_empty());
    }

    #[test]
    fn test_contract_numbers_are_sequential() {
        let generator = ContractNumberGenerator::new();
        let at = Utc.with_ymd_and_hms(2024, 6, 15, 0, 0, 0).unwrap();

        assert_eq!(generator.next_at(at), "CTR-202406-000001");
        assert_eq!(generator.next_at(at), "CTR-202406-000002");
    }
}

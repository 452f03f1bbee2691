//! Closure reconciliation
//!
//! A pure projection over the contract and its receipts: nothing is
//! persisted, so the summary can be recomputed on every request and is
//! always consistent with the underlying records.
//!
//! The deposit appears exactly once in the arithmetic. It is excluded from
//! payments (net_paid) and added back on the refund side, so it can never
//! be counted both as settlement of charges and as a refundable balance.

use serde::{Deserialize, Serialize};

use core_kernel::{ContractId, Money};
use domain_receipts::PaymentReceipt;

use crate::contract::{Contract, ContractStatus};
use crate::error::ContractError;

/// Allocation row that holds the customer's security deposit
pub const DEPOSIT_ROW_ID: &str = "violation_guarantee";

/// Charges incurred during the rental beyond the agreed rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdditionalCharges {
    pub excess_mileage: Money,
    pub fuel: Money,
    pub late_return: Money,
    pub fees: Money,
    pub total: Money,
}

/// The financial position of a contract at closure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosureSummary {
    pub contract_id: ContractId,
    pub contract_number: String,
    pub status: String,
    pub base_rental: Money,
    pub extensions_total: Money,
    pub additional_charges: AdditionalCharges,
    pub total_due: Money,
    pub payments_received: Money,
    pub security_deposit: Money,
    pub net_paid: Money,
    pub outstanding_balance: Money,
    pub refund_due: Money,
}

/// Computes the closure position of a contract
pub fn summarize(
    contract: &Contract,
    receipts: &[PaymentReceipt],
) -> Result<ClosureSummary, ContractError> {
    let currency = contract.currency();

    // Base covers the originally agreed period only; extension days are
    // billed through their own extension records below.
    let base_rental = contract
        .daily_rate
        .multiply(contract.original_period.inclusive_days().into());
    let extensions_total = contract.extensions_total()?;

    // Late charge applies only once the contract is completed after its
    // agreed end.
    let late_return = match contract.status {
        ContractStatus::Completed { completed_at } => {
            let late_days = contract.period.late_days(completed_at);
            contract.daily_rate.multiply(late_days.into())
        }
        _ => Money::zero(currency),
    };
    let fees = contract.fees_total()?;
    let additional_total = contract
        .excess_mileage_charge
        .checked_add(&contract.fuel_charge)?
        .checked_add(&late_return)?
        .checked_add(&fees)?;

    let mut payments_received = Money::zero(currency);
    let mut security_deposit = Money::zero(currency);
    for receipt in receipts {
        payments_received = payments_received.checked_add(&receipt.total_amount)?;
        security_deposit =
            security_deposit.checked_add(&receipt.allocated_to(DEPOSIT_ROW_ID))?;
    }

    let total_due = base_rental
        .checked_add(&extensions_total)?
        .checked_add(&additional_total)?;
    let net_paid = payments_received.checked_sub(&security_deposit)?;
    let outstanding_balance = total_due.checked_sub(&net_paid)?.max_zero();
    let overpayment = net_paid.checked_sub(&total_due)?.max_zero();
    let refund_due = security_deposit.checked_add(&overpayment)?;

    Ok(ClosureSummary {
        contract_id: contract.id,
        contract_number: contract.contract_number.clone(),
        status: contract.status.name().to_string(),
        base_rental,
        extensions_total,
        additional_charges: AdditionalCharges {
            excess_mileage: contract.excess_mileage_charge,
            fuel: contract.fuel_charge,
            late_return,
            fees,
            total: additional_total,
        },
        total_due,
        payments_received,
        security_deposit,
        net_paid,
        outstanding_balance,
        refund_due,
    })
}

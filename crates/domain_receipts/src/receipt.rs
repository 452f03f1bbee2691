//! Payment receipt records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{BranchId, ContractId, CustomerId, LedgerTransactionId, Money, ReceiptId};
use domain_ledger::SettlementAccount;

use crate::allocation::ReceiptAllocation;

/// How the customer paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Card,
    BankTransfer,
}

impl PaymentMethod {
    /// The settlement account this method's money lands in
    pub fn settlement(&self) -> SettlementAccount {
        match self {
            PaymentMethod::Cash => SettlementAccount::Cash,
            PaymentMethod::Card | PaymentMethod::BankTransfer => SettlementAccount::Bank,
        }
    }
}

/// Receipt lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReceiptStatus {
    Pending,
    Completed,
    Failed,
}

/// A recorded customer payment with its ledger mirror
///
/// A completed receipt always links to the balanced ledger transaction that
/// mirrors it; a receipt is never persisted without that mirror.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub id: ReceiptId,
    /// Sequential human-readable number (RCP-000001)
    pub receipt_number: String,
    pub contract_id: ContractId,
    pub customer_id: CustomerId,
    pub branch_id: BranchId,
    pub total_amount: Money,
    pub method: PaymentMethod,
    /// External payment reference (card auth code, transfer reference)
    pub reference: Option<String>,
    pub check_number: Option<String>,
    pub received_at: DateTime<Utc>,
    pub status: ReceiptStatus,
    pub ledger_transaction_id: Option<LedgerTransactionId>,
    pub allocations: Vec<ReceiptAllocation>,
}

impl PaymentReceipt {
    /// Sum of amounts allocated to the given row id
    pub fn allocated_to(&self, row_id: &str) -> Money {
        let mut total = Money::zero(self.total_amount.currency());
        for allocation in self.allocations.iter().filter(|a| a.row_id == row_id) {
            total = total + allocation.amount;
        }
        total
    }
}

//! Receipt recording service
//!
//! Orchestrates receipt posting as one atomic unit: validate the
//! allocation sum, resolve branch GL mappings, post the balanced ledger
//! transaction, then persist the receipt. The receipt is stored only after
//! the ledger post succeeds, so a failure at any step leaves no receipts,
//! no allocations, and no ledger transactions behind.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use chrono::Utc;
use tracing::{info, instrument, warn};

use core_kernel::{AccountId, BranchId, ContractId, CustomerId, Money, ReceiptId};
use domain_ledger::{
    BusinessEvent, ChartOfAccounts, LedgerRecorder, LedgerStore, SettlementAccount,
};

use crate::allocation::{AllocationRequest, ReceiptAllocation};
use crate::branch::{AccountRef, BranchAccounts};
use crate::error::ReceiptError;
use crate::receipt::{PaymentMethod, PaymentReceipt, ReceiptStatus};

/// Input for recording a receipt
#[derive(Debug, Clone)]
pub struct NewReceipt {
    pub contract_id: ContractId,
    pub customer_id: CustomerId,
    pub branch_id: BranchId,
    pub total_amount: Money,
    pub method: PaymentMethod,
    pub reference: Option<String>,
    pub check_number: Option<String>,
    pub allocations: Vec<AllocationRequest>,
}

/// Records receipts against the ledger
pub struct ReceiptService<L: ChartOfAccounts + LedgerStore> {
    ledger: Arc<L>,
    recorder: LedgerRecorder<L>,
    branches: RwLock<HashMap<BranchId, BranchAccounts>>,
    receipts: RwLock<Vec<PaymentReceipt>>,
    next_number: AtomicU64,
}

impl<L: ChartOfAccounts + LedgerStore> ReceiptService<L> {
    pub fn new(ledger: Arc<L>, recorder: LedgerRecorder<L>) -> Self {
        Self {
            ledger,
            recorder,
            branches: RwLock::new(HashMap::new()),
            receipts: RwLock::new(Vec::new()),
            next_number: AtomicU64::new(1),
        }
    }

    /// Registers the GL account mapping for a branch, replacing any
    /// existing one
    pub fn register_branch(&self, accounts: BranchAccounts) {
        let mut branches = self.branches.write().unwrap_or_else(|e| e.into_inner());
        branches.insert(accounts.branch_id, accounts);
    }

    /// Registers a mapping only for branches that have none yet
    ///
    /// A bespoke mapping registered earlier is left untouched.
    pub fn register_branch_if_absent(&self, accounts: BranchAccounts) {
        let mut branches = self.branches.write().unwrap_or_else(|e| e.into_inner());
        branches.entry(accounts.branch_id).or_insert(accounts);
    }

    /// Records a payment receipt
    #[instrument(skip(self, receipt), fields(contract_id = %receipt.contract_id, total = %receipt.total_amount))]
    pub fn record_receipt(&self, receipt: NewReceipt) -> Result<PaymentReceipt, ReceiptError> {
        let currency = receipt.total_amount.currency();

        // Zero-amount rows are dropped, never stored; negative rows are an
        // input error, named after the offending row.
        let mut requests = Vec::with_capacity(receipt.allocations.len());
        for request in receipt.allocations {
            if request.amount.is_negative() {
                return Err(ReceiptError::NegativeAllocation {
                    row_id: request.row_id,
                });
            }
            if !request.amount.is_zero() {
                requests.push(request);
            }
        }
        if requests.is_empty() {
            return Err(ReceiptError::EmptyAllocations);
        }

        let allocated = Money::sum(currency, requests.iter().map(|r| &r.amount))?;
        if allocated != receipt.total_amount {
            warn!(
                expected = %receipt.total_amount,
                actual = %allocated,
                "Rejected receipt with mismatched allocation sum"
            );
            return Err(ReceiptError::AllocationSumMismatch {
                expected: receipt.total_amount.to_string(),
                actual: allocated.to_string(),
            });
        }

        let branch = {
            let branches = self.branches.read().unwrap_or_else(|e| e.into_inner());
            branches
                .get(&receipt.branch_id)
                .cloned()
                .ok_or(ReceiptError::BranchNotConfigured(receipt.branch_id))?
        };

        // Resolve every row before touching the ledger.
        let mut allocations = Vec::with_capacity(requests.len());
        for request in requests {
            let account = self.resolve(branch.resolve_row(&request.row_id)?)?;
            allocations.push(ReceiptAllocation::from_request(request, account));
        }
        let method_account = match receipt.method.settlement() {
            SettlementAccount::Cash => self.resolve(&branch.cash_account)?,
            SettlementAccount::Bank => self.resolve(&branch.bank_account)?,
        };

        let receipt_id = ReceiptId::new();
        let ledger_transaction_id = self.recorder.record(BusinessEvent::ReceiptPosted {
            receipt_id,
            contract_id: receipt.contract_id,
            total: receipt.total_amount,
            method_account,
            allocations: allocations
                .iter()
                .map(|a| (a.account_id, a.amount, a.memo.clone()))
                .collect(),
        })?;

        // Ledger mirror exists; now it is safe to persist.
        let number = self.next_number.fetch_add(1, Ordering::SeqCst);
        let recorded = PaymentReceipt {
            id: receipt_id,
            receipt_number: format!("RCP-{number:06}"),
            contract_id: receipt.contract_id,
            customer_id: receipt.customer_id,
            branch_id: receipt.branch_id,
            total_amount: receipt.total_amount,
            method: receipt.method,
            reference: receipt.reference,
            check_number: receipt.check_number,
            received_at: Utc::now(),
            status: ReceiptStatus::Completed,
            ledger_transaction_id: Some(ledger_transaction_id),
            allocations,
        };

        let mut receipts = self.receipts.write().unwrap_or_else(|e| e.into_inner());
        receipts.push(recorded.clone());
        info!(
            receipt_number = %recorded.receipt_number,
            ledger_transaction_id = %ledger_transaction_id,
            "Recorded payment receipt"
        );
        Ok(recorded)
    }

    /// Returns all receipts for a contract, oldest first
    pub fn receipts_for_contract(&self, contract_id: ContractId) -> Vec<PaymentReceipt> {
        let receipts = self.receipts.read().unwrap_or_else(|e| e.into_inner());
        receipts
            .iter()
            .filter(|r| r.contract_id == contract_id)
            .cloned()
            .collect()
    }

    /// Looks up a single receipt
    pub fn receipt(&self, id: ReceiptId) -> Option<PaymentReceipt> {
        let receipts = self.receipts.read().unwrap_or_else(|e| e.into_inner());
        receipts.iter().find(|r| r.id == id).cloned()
    }

    /// Total number of recorded receipts
    pub fn receipt_count(&self) -> usize {
        self.receipts.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    fn resolve(&self, account: &AccountRef) -> Result<AccountId, ReceiptError> {
        let account = self.ledger.find_or_create_account(
            &account.code,
            &account.name,
            account.account_type,
        )?;
        Ok(account.id)
    }
}

//! Receipt allocations
//!
//! A receipt's total is split across allocation rows. Each row names the
//! bucket it settles (`row_id`) and, once recorded, the GL account that
//! bucket resolved to at the receipt's branch.

use serde::{Deserialize, Serialize};

use core_kernel::{AccountId, AllocationId, InvoiceId, Money};

/// An allocation as submitted by the caller, before account resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationRequest {
    /// Bucket being settled (e.g., "rental", "violation_guarantee")
    pub row_id: String,
    pub amount: Money,
    pub memo: Option<String>,
    /// Invoice this allocation settles, if any
    pub invoice_id: Option<InvoiceId>,
}

impl AllocationRequest {
    pub fn new(row_id: impl Into<String>, amount: Money) -> Self {
        Self {
            row_id: row_id.into(),
            amount,
            memo: None,
            invoice_id: None,
        }
    }

    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = Some(memo.into());
        self
    }

    pub fn settling(mut self, invoice_id: InvoiceId) -> Self {
        self.invoice_id = Some(invoice_id);
        self
    }
}

/// A recorded allocation with its resolved GL account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptAllocation {
    pub id: AllocationId,
    pub row_id: String,
    pub account_id: AccountId,
    pub amount: Money,
    pub memo: Option<String>,
    pub invoice_id: Option<InvoiceId>,
}

impl ReceiptAllocation {
    pub fn from_request(request: AllocationRequest, account_id: AccountId) -> Self {
        Self {
            id: AllocationId::new(),
            row_id: request.row_id,
            account_id,
            amount: request.amount,
            memo: request.memo,
            invoice_id: request.invoice_id,
        }
    }
}

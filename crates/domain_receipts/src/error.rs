//! Receipt domain errors

use thiserror::Error;

use core_kernel::{BranchId, MoneyError};
use domain_ledger::LedgerError;

/// Errors that can occur while recording payment receipts
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Allocation amounts do not add up to the receipt total
    #[error("Allocations sum to {actual} but receipt total is {expected}")]
    AllocationSumMismatch { expected: String, actual: String },

    /// A receipt needs at least one non-zero allocation
    #[error("Receipt has no allocations after dropping zero-amount rows")]
    EmptyAllocations,

    /// An allocation row carries a negative amount
    #[error("Allocation for row '{row_id}' must not be negative")]
    NegativeAllocation { row_id: String },

    /// No GL account is mapped for the allocation row at this branch
    #[error("No account mapping for allocation row '{row_id}'")]
    MissingRowMapping { row_id: String },

    /// The branch has no GL account configuration at all
    #[error("Branch {0} has no account configuration")]
    BranchNotConfigured(BranchId),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Money(#[from] MoneyError),
}

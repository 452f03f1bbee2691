//! Payment Receipts - Customer payments with GL allocation
//!
//! A receipt splits a payment across allocation rows (rental income,
//! deposits, fees), each resolved to a GL account via the branch's
//! configuration, and is mirrored by exactly one balanced ledger
//! transaction. Recording is atomic: a rejected receipt leaves no state.

pub mod allocation;
pub mod branch;
pub mod error;
pub mod receipt;
pub mod service;

pub use allocation::{AllocationRequest, ReceiptAllocation};
pub use branch::{AccountRef, BranchAccounts};
pub use error::ReceiptError;
pub use receipt::{PaymentMethod, PaymentReceipt, ReceiptStatus};
pub use service::{NewReceipt, ReceiptService};

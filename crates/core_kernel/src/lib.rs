//! Core Kernel - Foundational types for the rental back office
//!
//! This crate provides the building blocks used across all domain modules:
//! - Money types with precise decimal arithmetic
//! - Rental period day arithmetic
//! - Strongly-typed identifiers

pub mod identifiers;
pub mod money;
pub mod temporal;

pub use identifiers::{
    AccountId, AllocationId, AssetId, BranchId, ContractId, CustomerId, EntityId, ExtensionId,
    InvoiceId, LedgerTransactionId, LineItemId, ReceiptId, VehicleId,
};
pub use money::{Currency, Money, MoneyError};
pub use temporal::{RentalPeriod, TemporalError};

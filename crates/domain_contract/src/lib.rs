//! Contract Lifecycle - Rental agreements from draft to closure
//!
//! The contract aggregate owns the state machine, pricing-derived amounts,
//! extensions, vehicle-condition capture, and fee lines. Closure
//! reconciliation projects the final financial position from the contract
//! and its payment receipts.

pub mod closure;
pub mod condition;
pub mod contract;
pub mod error;
pub mod events;
pub mod extension;
pub mod fees;

pub use closure::{summarize, AdditionalCharges, ClosureSummary, DEPOSIT_ROW_ID};
pub use condition::{FuelLevel, VehicleCondition};
pub use contract::{
    AmountOverride, Contract, ContractNumberGenerator, ContractStatus, ContractTerms, Deposit,
    DepositKind,
};
pub use error::ContractError;
pub use events::ContractEvent;
pub use extension::{Extension, ExtensionStatus};
pub use fees::{FeeLine, FeeType, FeeTypeRegistry};

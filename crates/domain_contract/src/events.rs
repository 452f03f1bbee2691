//! Contract domain events
//!
//! The aggregate accumulates events as transitions succeed; callers drain
//! them with `Contract::take_events` and hand them to collaborators (the
//! ledger recorder, notifications).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{ContractId, ExtensionId, Money};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContractEvent {
    Activated {
        contract_id: ContractId,
        at: DateTime<Utc>,
    },
    Extended {
        contract_id: ContractId,
        extension_id: ExtensionId,
        days: u32,
        amount: Money,
        new_end: DateTime<Utc>,
    },
    ReturnRecorded {
        contract_id: ContractId,
        excess_mileage_charge: Money,
        fuel_charge: Money,
    },
    Completed {
        contract_id: ContractId,
        at: DateTime<Utc>,
    },
    Voided {
        contract_id: ContractId,
        reason: String,
    },
    FeeAdded {
        contract_id: ContractId,
        fee_type: String,
        amount: Money,
    },
}

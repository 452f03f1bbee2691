//! Contract extensions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{ExtensionId, Money};

/// Extension review status
///
/// Creation auto-approves; the field exists so a review workflow can be
/// layered on without a data migration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtensionStatus {
    Pending,
    Approved,
    Rejected,
}

/// An approved prolongation of the rental period
///
/// Immutable once approved: the dates, rate, and amount captured here are
/// the audit record of what was agreed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extension {
    pub id: ExtensionId,
    /// Sequential per contract, starting at 1
    pub number: u32,
    pub original_end: DateTime<Utc>,
    pub new_end: DateTime<Utc>,
    pub days: u32,
    pub daily_rate: Money,
    pub total_amount: Money,
    pub reason: Option<String>,
    pub status: ExtensionStatus,
    pub approved_at: Option<DateTime<Utc>>,
}

impl Extension {
    pub fn is_approved(&self) -> bool {
        self.status == ExtensionStatus::Approved
    }
}

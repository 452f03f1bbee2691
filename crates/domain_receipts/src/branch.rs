//! Branch GL account configuration
//!
//! Each branch carries a mapping from allocation row ids to GL accounts,
//! split into a liability section (deposits, guarantees) and an income
//! section (rental, fees), plus the designated cash and bank settlement
//! accounts. The blob is plain serde data: it deserializes from the API
//! config and is resolved against the chart of accounts at posting time.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use core_kernel::BranchId;
use domain_ledger::{rental_chart, AccountSpec, AccountType};

use crate::error::ReceiptError;

/// A reference to a GL account by stable code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRef {
    pub code: String,
    pub name: String,
    pub account_type: AccountType,
}

impl From<&AccountSpec> for AccountRef {
    fn from(spec: &AccountSpec) -> Self {
        Self {
            code: spec.code.to_string(),
            name: spec.name.to_string(),
            account_type: spec.account_type,
        }
    }
}

/// Per-branch row-to-account mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchAccounts {
    pub branch_id: BranchId,
    /// Rows that settle into liability accounts (deposits, guarantees)
    pub liability_rows: HashMap<String, AccountRef>,
    /// Rows that settle into income accounts (rental, fees)
    pub income_rows: HashMap<String, AccountRef>,
    pub cash_account: AccountRef,
    pub bank_account: AccountRef,
}

impl BranchAccounts {
    /// The standard mapping used when a branch has no bespoke configuration
    pub fn standard(branch_id: BranchId) -> Self {
        let mut liability_rows = HashMap::new();
        liability_rows.insert(
            "security_deposit".to_string(),
            AccountRef::from(&rental_chart::SECURITY_DEPOSITS),
        );
        liability_rows.insert(
            "deposit_allowance".to_string(),
            AccountRef::from(&rental_chart::SECURITY_DEPOSITS),
        );
        liability_rows.insert(
            "violation_guarantee".to_string(),
            AccountRef::from(&rental_chart::VIOLATION_GUARANTEE),
        );

        let mut income_rows = HashMap::new();
        income_rows.insert(
            "rental".to_string(),
            AccountRef::from(&rental_chart::RENTAL_INCOME),
        );
        income_rows.insert(
            "fees".to_string(),
            AccountRef::from(&rental_chart::FEE_INCOME),
        );

        Self {
            branch_id,
            liability_rows,
            income_rows,
            cash_account: AccountRef::from(&rental_chart::CASH),
            bank_account: AccountRef::from(&rental_chart::BANK),
        }
    }

    /// Resolves an allocation row id, liability section first
    pub fn resolve_row(&self, row_id: &str) -> Result<&AccountRef, ReceiptError> {
        self.liability_rows
            .get(row_id)
            .or_else(|| self.income_rows.get(row_id))
            .ok_or_else(|| ReceiptError::MissingRowMapping {
                row_id: row_id.to_string(),
            })
    }
}

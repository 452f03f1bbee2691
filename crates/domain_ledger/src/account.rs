//! Account types for the chart of accounts

use serde::{Deserialize, Serialize};

use core_kernel::AccountId;

/// Types of accounts in the chart of accounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountType {
    /// Asset accounts (debit normal balance)
    Asset,
    /// Liability accounts (credit normal balance)
    Liability,
    /// Equity accounts (credit normal balance)
    Equity,
    /// Revenue accounts (credit normal balance)
    Revenue,
    /// Expense accounts (debit normal balance)
    Expense,
}

impl AccountType {
    /// Returns true if this account type has a debit normal balance
    pub fn is_debit_normal(&self) -> bool {
        matches!(self, AccountType::Asset | AccountType::Expense)
    }
}

/// An account in the chart of accounts
///
/// The code is the stable logical identity: find-or-create resolution keys
/// on it, and the same code always maps to the same account row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier
    pub id: AccountId,
    /// Stable account code (e.g., "1000")
    pub code: String,
    /// Account name
    pub name: String,
    /// Account type
    pub account_type: AccountType,
    /// Whether account is active
    pub is_active: bool,
}

impl Account {
    /// Creates a new account
    pub fn new(
        id: AccountId,
        code: impl Into<String>,
        name: impl Into<String>,
        account_type: AccountType,
    ) -> Self {
        Self {
            id,
            code: code.into(),
            name: name.into(),
            account_type,
            is_active: true,
        }
    }
}

/// Static description of a well-known account
///
/// The recorder resolves these through the chart-of-accounts port; the spec
/// is the source of truth for code, name, and classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountSpec {
    pub code: &'static str,
    pub name: &'static str,
    pub account_type: AccountType,
}

/// Well-known accounts of the rental chart
pub mod rental_chart {
    use super::{AccountSpec, AccountType};

    pub const CASH: AccountSpec = AccountSpec {
        code: "1000",
        name: "Cash on Hand",
        account_type: AccountType::Asset,
    };
    pub const BANK: AccountSpec = AccountSpec {
        code: "1010",
        name: "Bank",
        account_type: AccountType::Asset,
    };
    pub const ACCOUNTS_RECEIVABLE: AccountSpec = AccountSpec {
        code: "1100",
        name: "Accounts Receivable",
        account_type: AccountType::Asset,
    };
    pub const VEHICLE_FLEET: AccountSpec = AccountSpec {
        code: "1500",
        name: "Vehicle Fleet",
        account_type: AccountType::Asset,
    };
    pub const ACCUMULATED_DEPRECIATION: AccountSpec = AccountSpec {
        code: "1590",
        name: "Accumulated Depreciation",
        account_type: AccountType::Liability,
    };
    pub const SECURITY_DEPOSITS: AccountSpec = AccountSpec {
        code: "2100",
        name: "Security Deposits Held",
        account_type: AccountType::Liability,
    };
    pub const VIOLATION_GUARANTEE: AccountSpec = AccountSpec {
        code: "2110",
        name: "Violation Guarantee",
        account_type: AccountType::Liability,
    };
    pub const RENTAL_INCOME: AccountSpec = AccountSpec {
        code: "4000",
        name: "Rental Income",
        account_type: AccountType::Revenue,
    };
    pub const FEE_INCOME: AccountSpec = AccountSpec {
        code: "4200",
        name: "Fee Income",
        account_type: AccountType::Revenue,
    };
    pub const DEPRECIATION_EXPENSE: AccountSpec = AccountSpec {
        code: "5000",
        name: "Depreciation Expense",
        account_type: AccountType::Expense,
    };
    pub const DISPOSAL_RESULT: AccountSpec = AccountSpec {
        code: "7000",
        name: "Gain/Loss on Asset Disposal",
        account_type: AccountType::Revenue,
    };

    /// All well-known accounts, for chart bootstrap
    pub fn standard_specs() -> &'static [AccountSpec] {
        &[
            CASH,
            BANK,
            ACCOUNTS_RECEIVABLE,
            VEHICLE_FLEET,
            ACCUMULATED_DEPRECIATION,
            SECURITY_DEPOSITS,
            VIOLATION_GUARANTEE,
            RENTAL_INCOME,
            FEE_INCOME,
            DEPRECIATION_EXPENSE,
            DISPOSAL_RESULT,
        ]
    }
}

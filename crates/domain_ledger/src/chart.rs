//! Ledger ports
//!
//! The recorder talks to the ledger through these traits so the posting
//! logic stays independent of the backing store. The in-memory adapter in
//! [`crate::memory`] implements both; a database-backed adapter would slot
//! in the same way.

use serde::{Deserialize, Serialize};

use core_kernel::{AccountId, Currency, EntityId, LedgerTransactionId};

use crate::account::{Account, AccountSpec, AccountType};
use crate::error::LedgerError;
use crate::transaction::LedgerTransaction;

/// The legal entity and currency postings are recorded under
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountingContext {
    pub entity_id: EntityId,
    pub entity_name: String,
    pub currency: Currency,
}

impl AccountingContext {
    pub fn new(entity_name: impl Into<String>, currency: Currency) -> Self {
        Self {
            entity_id: EntityId::new(),
            entity_name: entity_name.into(),
            currency,
        }
    }
}

/// Chart-of-accounts resolution port
///
/// Resolution keys on the account code: asking twice for the same code
/// returns the same account, creating it on first use.
pub trait ChartOfAccounts: Send + Sync {
    /// Finds an account by code, creating it if absent
    fn find_or_create_account(
        &self,
        code: &str,
        name: &str,
        account_type: AccountType,
    ) -> Result<Account, LedgerError>;

    /// Looks up an existing account by code
    fn account_by_code(&self, code: &str) -> Result<Account, LedgerError>;

    /// Resolves a well-known account spec
    fn find_or_create(&self, spec: &AccountSpec) -> Result<Account, LedgerError> {
        self.find_or_create_account(spec.code, spec.name, spec.account_type)
    }
}

/// Journal posting port
pub trait LedgerStore: Send + Sync {
    /// Validates and appends a transaction to the journal
    ///
    /// Rejects transactions that fail the double-entry invariants or that
    /// reference accounts missing from the chart.
    fn post(&self, transaction: LedgerTransaction) -> Result<LedgerTransactionId, LedgerError>;

    /// Returns the running balance of an account
    ///
    /// Balances are signed by normal side: debits increase debit-normal
    /// accounts and decrease the rest.
    fn account_balance(&self, account_id: AccountId) -> Result<rust_decimal::Decimal, LedgerError>;
}

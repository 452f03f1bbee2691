//! In-memory ledger adapter
//!
//! Backs the chart-of-accounts and journal ports with a single RwLock'd
//! state so find-or-create and posting are atomic with respect to each
//! other. Suitable for tests and single-process deployments.

use std::collections::HashMap;
use std::sync::RwLock;

use rust_decimal::Decimal;

use core_kernel::{AccountId, LedgerTransactionId};

use crate::account::{Account, AccountType};
use crate::chart::{ChartOfAccounts, LedgerStore};
use crate::error::LedgerError;
use crate::transaction::{EntryType, LedgerTransaction};

#[derive(Debug, Default)]
struct LedgerState {
    accounts: HashMap<AccountId, Account>,
    accounts_by_code: HashMap<String, AccountId>,
    balances: HashMap<AccountId, Decimal>,
    journal: Vec<LedgerTransaction>,
}

/// A row of a trial balance report
#[derive(Debug, Clone, PartialEq)]
pub struct TrialBalanceRow {
    pub account: Account,
    pub debit_total: Decimal,
    pub credit_total: Decimal,
}

/// In-memory implementation of both ledger ports
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    state: RwLock<LedgerState>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of transactions in the journal
    pub fn journal_len(&self) -> usize {
        self.state.read().unwrap_or_else(|e| e.into_inner()).journal.len()
    }

    /// Returns a posted transaction by id
    pub fn transaction(
        &self,
        id: LedgerTransactionId,
    ) -> Result<LedgerTransaction, LedgerError> {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        state
            .journal
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| LedgerError::TransactionNotFound(id.to_string()))
    }

    /// Returns all posted transactions, oldest first
    pub fn journal(&self) -> Vec<LedgerTransaction> {
        self.state
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .journal
            .clone()
    }

    /// Produces a trial balance over every account with activity
    ///
    /// The invariant of a well-formed journal is that the debit and credit
    /// column totals are equal.
    pub fn trial_balance(&self) -> Vec<TrialBalanceRow> {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        let mut debits: HashMap<AccountId, Decimal> = HashMap::new();
        let mut credits: HashMap<AccountId, Decimal> = HashMap::new();

        for txn in &state.journal {
            for line in &txn.line_items {
                let bucket = match line.entry_type {
                    EntryType::Debit => &mut debits,
                    EntryType::Credit => &mut credits,
                };
                *bucket.entry(line.account_id).or_default() += line.amount.amount();
            }
        }

        let mut rows: Vec<TrialBalanceRow> = state
            .accounts
            .values()
            .filter(|a| debits.contains_key(&a.id) || credits.contains_key(&a.id))
            .map(|a| TrialBalanceRow {
                account: a.clone(),
                debit_total: debits.get(&a.id).copied().unwrap_or_default(),
                credit_total: credits.get(&a.id).copied().unwrap_or_default(),
            })
            .collect();
        rows.sort_by(|a, b| a.account.code.cmp(&b.account.code));
        rows
    }
}

impl ChartOfAccounts for InMemoryLedger {
    fn find_or_create_account(
        &self,
        code: &str,
        name: &str,
        account_type: AccountType,
    ) -> Result<Account, LedgerError> {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        if let Some(id) = state.accounts_by_code.get(code) {
            if let Some(account) = state.accounts.get(id) {
                return Ok(account.clone());
            }
        }
        let account = Account::new(AccountId::new(), code, name, account_type);
        state.accounts_by_code.insert(code.to_string(), account.id);
        state.accounts.insert(account.id, account.clone());
        Ok(account)
    }

    fn account_by_code(&self, code: &str) -> Result<Account, LedgerError> {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        state
            .accounts_by_code
            .get(code)
            .and_then(|id| state.accounts.get(id))
            .cloned()
            .ok_or_else(|| LedgerError::AccountNotFound(code.to_string()))
    }
}

impl LedgerStore for InMemoryLedger {
    fn post(&self, transaction: LedgerTransaction) -> Result<LedgerTransactionId, LedgerError> {
        transaction.validate()?;

        let mut guard = self.state.write().unwrap_or_else(|e| e.into_inner());
        let state = &mut *guard;
        for line in &transaction.line_items {
            if !state.accounts.contains_key(&line.account_id) {
                return Err(LedgerError::AccountNotFound(line.account_id.to_string()));
            }
        }

        for line in &transaction.line_items {
            let account = &state.accounts[&line.account_id];
            let signed = match (line.entry_type, account.account_type.is_debit_normal()) {
                (EntryType::Debit, true) | (EntryType::Credit, false) => line.amount.amount(),
                _ => -line.amount.amount(),
            };
            *state.balances.entry(line.account_id).or_default() += signed;
        }

        let id = transaction.id;
        state.journal.push(transaction);
        Ok(id)
    }

    fn account_balance(&self, account_id: AccountId) -> Result<Decimal, LedgerError> {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        if !state.accounts.contains_key(&account_id) {
            return Err(LedgerError::AccountNotFound(account_id.to_string()));
        }
        Ok(state.balances.get(&account_id).copied().unwrap_or_default())
    }
}

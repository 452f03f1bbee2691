//! Ledger domain errors

use rust_decimal::Decimal;
use thiserror::Error;

use core_kernel::MoneyError;

/// Errors that can occur when building or posting ledger transactions
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Referenced account does not exist in the chart
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// Transaction debits and credits do not balance
    #[error("Transaction is unbalanced: debits {debits} != credits {credits}")]
    Unbalanced { debits: Decimal, credits: Decimal },

    /// A line item carries a zero or negative amount
    #[error("Line item amount must be positive, got {0}")]
    NonPositiveLineAmount(Decimal),

    /// A balanced transaction needs at least one debit and one credit
    #[error("Transaction must have at least two line items")]
    TooFewLineItems,

    /// Line items carry more than one currency
    #[error("All line items must share the transaction currency")]
    CurrencyMismatch,

    /// Referenced transaction does not exist in the journal
    #[error("Transaction not found: {0}")]
    TransactionNotFound(String),

    #[error(transparent)]
    Money(#[from] MoneyError),
}

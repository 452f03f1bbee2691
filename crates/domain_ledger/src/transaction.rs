//! Double-entry ledger transactions
//!
//! A transaction is built as a draft, line by line, and validated before it
//! is accepted for posting. Validation enforces the double-entry invariants:
//! at least two line items, positive amounts, a single currency, and equal
//! debit and credit totals.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{AccountId, Currency, LedgerTransactionId, LineItemId, Money};

use crate::error::LedgerError;

/// Whether a line item debits or credits its account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    Debit,
    Credit,
}

/// A single line of a ledger transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: LineItemId,
    pub account_id: AccountId,
    pub entry_type: EntryType,
    pub amount: Money,
    /// Optional memo for this line (e.g., the fee type it settles)
    pub memo: Option<String>,
}

impl LineItem {
    /// Creates a debit line
    pub fn debit(account_id: AccountId, amount: Money) -> Self {
        Self {
            id: LineItemId::new(),
            account_id,
            entry_type: EntryType::Debit,
            amount,
            memo: None,
        }
    }

    /// Creates a credit line
    pub fn credit(account_id: AccountId, amount: Money) -> Self {
        Self {
            id: LineItemId::new(),
            account_id,
            entry_type: EntryType::Credit,
            amount,
            memo: None,
        }
    }

    /// Attaches a memo to this line
    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = Some(memo.into());
        self
    }
}

/// A double-entry ledger transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerTransaction {
    pub id: LedgerTransactionId,
    pub description: String,
    pub transaction_date: DateTime<Utc>,
    pub currency: Currency,
    /// Business document this posting originates from (receipt, invoice, ...)
    pub reference: Option<String>,
    pub line_items: Vec<LineItem>,
}

impl LedgerTransaction {
    /// Starts a new draft transaction
    pub fn draft(description: impl Into<String>, currency: Currency) -> Self {
        Self {
            id: LedgerTransactionId::new(),
            description: description.into(),
            transaction_date: Utc::now(),
            currency,
            reference: None,
            line_items: Vec::new(),
        }
    }

    /// Sets the transaction date
    pub fn on(mut self, date: DateTime<Utc>) -> Self {
        self.transaction_date = date;
        self
    }

    /// Sets the business reference
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Adds a line item
    pub fn with_line(mut self, line: LineItem) -> Self {
        self.line_items.push(line);
        self
    }

    /// Sums the debit lines
    pub fn total_debits(&self) -> Decimal {
        self.line_items
            .iter()
            .filter(|l| l.entry_type == EntryType::Debit)
            .map(|l| l.amount.amount())
            .sum()
    }

    /// Sums the credit lines
    pub fn total_credits(&self) -> Decimal {
        self.line_items
            .iter()
            .filter(|l| l.entry_type == EntryType::Credit)
            .map(|l| l.amount.amount())
            .sum()
    }

    /// Returns true when debits equal credits
    pub fn is_balanced(&self) -> bool {
        self.total_debits() == self.total_credits()
    }

    /// Validates the double-entry invariants
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.line_items.len() < 2 {
            return Err(LedgerError::TooFewLineItems);
        }
        for line in &self.line_items {
            if line.amount.currency() != self.currency {
                return Err(LedgerError::CurrencyMismatch);
            }
            if !line.amount.is_positive() {
                return Err(LedgerError::NonPositiveLineAmount(line.amount.amount()));
            }
        }
        if !self.is_balanced() {
            return Err(LedgerError::Unbalanced {
                debits: self.total_debits(),
                credits: self.total_credits(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn usd(amount: Decimal) -> Money {
        Money::new(amount, Currency::USD)
    }

    #[test]
    fn test_balanced_transaction_validates() {
        let txn = LedgerTransaction::draft("Test posting", Currency::USD)
            .with_line(LineItem::debit(AccountId::new(), usd(dec!(100))))
            .with_line(LineItem::credit(AccountId::new(), usd(dec!(100))));

        assert!(txn.validate().is_ok());
    }

    #[test]
    fn test_unbalanced_transaction_fails() {
        let txn = LedgerTransaction::draft("Test posting", Currency::USD)
            .with_line(LineItem::debit(AccountId::new(), usd(dec!(100))))
            .with_line(LineItem::credit(AccountId::new(), usd(dec!(90))));

        assert!(matches!(
            txn.validate(),
            Err(LedgerError::Unbalanced { .. })
        ));
    }

    #[test]
    fn test_single_line_fails() {
        let txn = LedgerTransaction::draft("Test posting", Currency::USD)
            .with_line(LineItem::debit(AccountId::new(), usd(dec!(100))));

        assert!(matches!(txn.validate(), Err(LedgerError::TooFewLineItems)));
    }

    #[test]
    fn test_zero_amount_line_fails() {
        let txn = LedgerTransaction::draft("Test posting", Currency::USD)
            .with_line(LineItem::debit(AccountId::new(), usd(dec!(0))))
            .with_line(LineItem::credit(AccountId::new(), usd(dec!(0))));

        assert!(matches!(
            txn.validate(),
            Err(LedgerError::NonPositiveLineAmount(_))
        ));
    }

    #[test]
    fn test_foreign_currency_line_fails() {
        let txn = LedgerTransaction::draft("Test posting", Currency::USD)
            .with_line(LineItem::debit(AccountId::new(), usd(dec!(100))))
            .with_line(LineItem::credit(
                AccountId::new(),
                Money::new(dec!(100), Currency::EUR),
            ));

        assert!(matches!(txn.validate(), Err(LedgerError::CurrencyMismatch)));
    }

    #[test]
    fn test_multi_line_split_balances() {
        let txn = LedgerTransaction::draft("Receipt allocation", Currency::USD)
            .with_line(LineItem::debit(AccountId::new(), usd(dec!(500))))
            .with_line(
                LineItem::credit(AccountId::new(), usd(dec!(350))).with_memo("rental"),
            )
            .with_line(
                LineItem::credit(AccountId::new(), usd(dec!(150))).with_memo("deposit"),
            );

        assert!(txn.validate().is_ok());
        assert_eq!(txn.total_debits(), dec!(500));
        assert_eq!(txn.total_credits(), dec!(500));
    }
}

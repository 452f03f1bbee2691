//! Business-event ledger recorder
//!
//! Translates domain events into balanced double-entry transactions and
//! posts them through the ledger ports. Each event maps to a fixed posting
//! pattern over the rental chart, so the rest of the system never builds
//! journal lines by hand.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use core_kernel::{AccountId, AssetId, ContractId, InvoiceId, LedgerTransactionId, Money, ReceiptId};

use crate::account::{rental_chart, AccountSpec};
use crate::chart::{AccountingContext, ChartOfAccounts, LedgerStore};
use crate::error::LedgerError;
use crate::transaction::{LedgerTransaction, LineItem};

/// Which asset account money physically settles into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementAccount {
    Cash,
    Bank,
}

impl SettlementAccount {
    fn spec(&self) -> &'static AccountSpec {
        match self {
            SettlementAccount::Cash => &rental_chart::CASH,
            SettlementAccount::Bank => &rental_chart::BANK,
        }
    }
}

/// Financially meaningful events the recorder knows how to post
#[derive(Debug, Clone, PartialEq)]
pub enum BusinessEvent {
    /// Rental charges invoiced to the customer
    InvoiceIssued {
        invoice_id: InvoiceId,
        contract_id: ContractId,
        amount: Money,
    },
    /// Customer payment settling receivables
    PaymentReceived {
        receipt_id: ReceiptId,
        contract_id: ContractId,
        amount: Money,
        settlement: SettlementAccount,
    },
    /// Vehicle purchased into the fleet
    AssetAcquired {
        asset_id: AssetId,
        cost: Money,
        settlement: SettlementAccount,
    },
    /// Periodic depreciation charge against a fleet vehicle
    DepreciationPosted { asset_id: AssetId, amount: Money },
    /// Vehicle sold out of the fleet
    ///
    /// Removes the asset at cost, reverses its accumulated depreciation,
    /// and books the difference against the disposal result account.
    AssetDisposed {
        asset_id: AssetId,
        proceeds: Money,
        cost: Money,
        accumulated_depreciation: Money,
        settlement: SettlementAccount,
    },
    /// A receipt with pre-resolved allocation targets
    ///
    /// The settlement account and each allocation row have already been
    /// mapped to chart accounts by the receipt service; the recorder only
    /// assembles and posts the balanced transaction.
    ReceiptPosted {
        receipt_id: ReceiptId,
        contract_id: ContractId,
        total: Money,
        method_account: AccountId,
        allocations: Vec<(AccountId, Money, Option<String>)>,
    },
}

/// Posts business events to the ledger under a single accounting context
pub struct LedgerRecorder<L: ChartOfAccounts + LedgerStore> {
    ledger: Arc<L>,
    context: AccountingContext,
}

impl<L: ChartOfAccounts + LedgerStore> LedgerRecorder<L> {
    pub fn new(ledger: Arc<L>, context: AccountingContext) -> Self {
        Self { ledger, context }
    }

    pub fn context(&self) -> &AccountingContext {
        &self.context
    }

    /// Records a business event as a balanced transaction
    pub fn record(&self, event: BusinessEvent) -> Result<LedgerTransactionId, LedgerError> {
        self.record_on(event, Utc::now())
    }

    /// Records a business event at an explicit transaction date
    pub fn record_on(
        &self,
        event: BusinessEvent,
        date: DateTime<Utc>,
    ) -> Result<LedgerTransactionId, LedgerError> {
        let transaction = self.build(event, date)?;
        let id = self.ledger.post(transaction)?;
        info!(
            transaction_id = %id,
            entity = %self.context.entity_name,
            "Posted ledger transaction"
        );
        Ok(id)
    }

    fn build(
        &self,
        event: BusinessEvent,
        date: DateTime<Utc>,
    ) -> Result<LedgerTransaction, LedgerError> {
        let currency = self.context.currency;
        match event {
            BusinessEvent::InvoiceIssued {
                invoice_id,
                contract_id,
                amount,
            } => {
                let receivable = self.ledger.find_or_create(&rental_chart::ACCOUNTS_RECEIVABLE)?;
                let income = self.ledger.find_or_create(&rental_chart::RENTAL_INCOME)?;
                Ok(LedgerTransaction::draft(
                    format!("Invoice for contract {contract_id}"),
                    currency,
                )
                .on(date)
                .with_reference(invoice_id.to_string())
                .with_line(LineItem::debit(receivable.id, amount))
                .with_line(LineItem::credit(income.id, amount)))
            }
            BusinessEvent::PaymentReceived {
                receipt_id,
                contract_id,
                amount,
                settlement,
            } => {
                let settled = self.ledger.find_or_create(settlement.spec())?;
                let receivable = self.ledger.find_or_create(&rental_chart::ACCOUNTS_RECEIVABLE)?;
                Ok(LedgerTransaction::draft(
                    format!("Payment on contract {contract_id}"),
                    currency,
                )
                .on(date)
                .with_reference(receipt_id.to_string())
                .with_line(LineItem::debit(settled.id, amount))
                .with_line(LineItem::credit(receivable.id, amount)))
            }
            BusinessEvent::AssetAcquired {
                asset_id,
                cost,
                settlement,
            } => {
                let fleet = self.ledger.find_or_create(&rental_chart::VEHICLE_FLEET)?;
                let settled = self.ledger.find_or_create(settlement.spec())?;
                Ok(
                    LedgerTransaction::draft(format!("Vehicle acquired {asset_id}"), currency)
                        .on(date)
                        .with_reference(asset_id.to_string())
                        .with_line(LineItem::debit(fleet.id, cost))
                        .with_line(LineItem::credit(settled.id, cost)),
                )
            }
            BusinessEvent::DepreciationPosted { asset_id, amount } => {
                let expense = self
                    .ledger
                    .find_or_create(&rental_chart::DEPRECIATION_EXPENSE)?;
                let accumulated = self
                    .ledger
                    .find_or_create(&rental_chart::ACCUMULATED_DEPRECIATION)?;
                Ok(
                    LedgerTransaction::draft(format!("Depreciation on {asset_id}"), currency)
                        .on(date)
                        .with_reference(asset_id.to_string())
                        .with_line(LineItem::debit(expense.id, amount))
                        .with_line(LineItem::credit(accumulated.id, amount)),
                )
            }
            BusinessEvent::AssetDisposed {
                asset_id,
                proceeds,
                cost,
                accumulated_depreciation,
                settlement,
            } => {
                let settled = self.ledger.find_or_create(settlement.spec())?;
                let fleet = self.ledger.find_or_create(&rental_chart::VEHICLE_FLEET)?;
                let accumulated = self
                    .ledger
                    .find_or_create(&rental_chart::ACCUMULATED_DEPRECIATION)?;
                let result = self.ledger.find_or_create(&rental_chart::DISPOSAL_RESULT)?;

                let mut txn =
                    LedgerTransaction::draft(format!("Vehicle disposed {asset_id}"), currency)
                        .on(date)
                        .with_reference(asset_id.to_string())
                        .with_line(LineItem::credit(fleet.id, cost));
                if proceeds.is_positive() {
                    txn = txn.with_line(LineItem::debit(settled.id, proceeds));
                }
                if accumulated_depreciation.is_positive() {
                    txn = txn.with_line(LineItem::debit(accumulated.id, accumulated_depreciation));
                }

                // Book value = cost - accumulated depreciation; the gain or
                // loss is whatever keeps the transaction balanced.
                let book_value = cost.checked_sub(&accumulated_depreciation)?;
                let gain = proceeds.checked_sub(&book_value)?;
                if gain.is_positive() {
                    txn = txn.with_line(LineItem::credit(result.id, gain).with_memo("gain"));
                } else if gain.is_negative() {
                    txn = txn.with_line(LineItem::debit(result.id, gain.abs()).with_memo("loss"));
                }
                Ok(txn)
            }
            BusinessEvent::ReceiptPosted {
                receipt_id,
                contract_id,
                total,
                method_account,
                allocations,
            } => {
                let mut txn = LedgerTransaction::draft(
                    format!("Receipt for contract {contract_id}"),
                    currency,
                )
                .on(date)
                .with_reference(receipt_id.to_string())
                .with_line(LineItem::debit(method_account, total));
                for (account_id, amount, memo) in allocations {
                    let mut line = LineItem::credit(account_id, amount);
                    if let Some(memo) = memo {
                        line = line.with_memo(memo);
                    }
                    txn = txn.with_line(line);
                }
                Ok(txn)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryLedger;
    use core_kernel::Currency;
    use rust_decimal_macros::dec;

    fn usd(amount: rust_decimal::Decimal) -> Money {
        Money::new(amount, Currency::USD)
    }

    fn recorder() -> (Arc<InMemoryLedger>, LedgerRecorder<InMemoryLedger>) {
        let ledger = Arc::new(InMemoryLedger::new());
        let recorder = LedgerRecorder::new(
            ledger.clone(),
            AccountingContext::new("Test Rentals LLC", Currency::USD),
        );
        (ledger, recorder)
    }

    #[test]
    fn test_invoice_posts_receivable_against_income() {
        let (ledger, recorder) = recorder();
        let id = recorder
            .record(BusinessEvent::InvoiceIssued {
                invoice_id: InvoiceId::new(),
                contract_id: ContractId::new(),
                amount: usd(dec!(900)),
            })
            .unwrap();

        let txn = ledger.transaction(id).unwrap();
        assert!(txn.is_balanced());

        let receivable = ledger.account_by_code("1100").unwrap();
        let income = ledger.account_by_code("4000").unwrap();
        assert_eq!(ledger.account_balance(receivable.id).unwrap(), dec!(900));
        assert_eq!(ledger.account_balance(income.id).unwrap(), dec!(900));
    }

    #[test]
    fn test_payment_clears_receivable() {
        let (ledger, recorder) = recorder();
        let contract_id = ContractId::new();
        recorder
            .record(BusinessEvent::InvoiceIssued {
                invoice_id: InvoiceId::new(),
                contract_id,
                amount: usd(dec!(900)),
            })
            .unwrap();
        recorder
            .record(BusinessEvent::PaymentReceived {
                receipt_id: ReceiptId::new(),
                contract_id,
                amount: usd(dec!(900)),
                settlement: SettlementAccount::Bank,
            })
            .unwrap();

        let receivable = ledger.account_by_code("1100").unwrap();
        let bank = ledger.account_by_code("1010").unwrap();
        assert_eq!(ledger.account_balance(receivable.id).unwrap(), dec!(0));
        assert_eq!(ledger.account_balance(bank.id).unwrap(), dec!(900));
    }

    #[test]
    fn test_disposal_at_a_loss_balances() {
        let (ledger, recorder) = recorder();
        let asset_id = AssetId::new();
        recorder
            .record(BusinessEvent::AssetAcquired {
                asset_id,
                cost: usd(dec!(30000)),
                settlement: SettlementAccount::Bank,
            })
            .unwrap();
        recorder
            .record(BusinessEvent::DepreciationPosted {
                asset_id,
                amount: usd(dec!(10000)),
            })
            .unwrap();
        let id = recorder
            .record(BusinessEvent::AssetDisposed {
                asset_id,
                proceeds: usd(dec!(15000)),
                cost: usd(dec!(30000)),
                accumulated_depreciation: usd(dec!(10000)),
                settlement: SettlementAccount::Bank,
            })
            .unwrap();

        let txn = ledger.transaction(id).unwrap();
        assert!(txn.is_balanced());

        // Book value 20000, proceeds 15000: a 5000 loss debited to 7000.
        let result = ledger.account_by_code("7000").unwrap();
        assert_eq!(ledger.account_balance(result.id).unwrap(), dec!(-5000));
    }

    #[test]
    fn test_disposal_at_a_gain_credits_result() {
        let (ledger, recorder) = recorder();
        let asset_id = AssetId::new();
        recorder
            .record(BusinessEvent::AssetAcquired {
                asset_id,
                cost: usd(dec!(30000)),
                settlement: SettlementAccount::Bank,
            })
            .unwrap();
        recorder
            .record(BusinessEvent::DepreciationPosted {
                asset_id,
                amount: usd(dec!(20000)),
            })
            .unwrap();
        recorder
            .record(BusinessEvent::AssetDisposed {
                asset_id,
                proceeds: usd(dec!(12000)),
                cost: usd(dec!(30000)),
                accumulated_depreciation: usd(dec!(20000)),
                settlement: SettlementAccount::Bank,
            })
            .unwrap();

        let result = ledger.account_by_code("7000").unwrap();
        assert_eq!(ledger.account_balance(result.id).unwrap(), dec!(2000));
    }
}

//! Integration tests for the ledger recorder

use std::sync::Arc;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{AssetId, ContractId, Currency, InvoiceId, Money, ReceiptId};
use domain_ledger::{
    rental_chart, AccountingContext, BusinessEvent, ChartOfAccounts, InMemoryLedger,
    LedgerRecorder, LedgerStore, SettlementAccount,
};

fn usd(amount: Decimal) -> Money {
    Money::new(amount, Currency::USD)
}

fn setup() -> (Arc<InMemoryLedger>, LedgerRecorder<InMemoryLedger>) {
    let ledger = Arc::new(InMemoryLedger::new());
    let recorder = LedgerRecorder::new(
        ledger.clone(),
        AccountingContext::new("Fleet Rentals LLC", Currency::USD),
    );
    (ledger, recorder)
}

#[test]
fn invoice_then_payment_settles_receivable() {
    let (ledger, recorder) = setup();
    let contract_id = ContractId::new();

    recorder
        .record(BusinessEvent::InvoiceIssued {
            invoice_id: InvoiceId::new(),
            contract_id,
            amount: usd(dec!(1350)),
        })
        .unwrap();
    recorder
        .record(BusinessEvent::PaymentReceived {
            receipt_id: ReceiptId::new(),
            contract_id,
            amount: usd(dec!(1000)),
            settlement: SettlementAccount::Cash,
        })
        .unwrap();

    let receivable = ledger.account_by_code("1100").unwrap();
    assert_eq!(ledger.account_balance(receivable.id).unwrap(), dec!(350));
}

#[test]
fn asset_lifecycle_keeps_trial_balance_in_balance() {
    let (ledger, recorder) = setup();
    let asset_id = AssetId::new();

    recorder
        .record(BusinessEvent::AssetAcquired {
            asset_id,
            cost: usd(dec!(28000)),
            settlement: SettlementAccount::Bank,
        })
        .unwrap();
    for _ in 0..3 {
        recorder
            .record(BusinessEvent::DepreciationPosted {
                asset_id,
                amount: usd(dec!(500)),
            })
            .unwrap();
    }
    recorder
        .record(BusinessEvent::AssetDisposed {
            asset_id,
            proceeds: usd(dec!(25000)),
            cost: usd(dec!(28000)),
            accumulated_depreciation: usd(dec!(1500)),
            settlement: SettlementAccount::Bank,
        })
        .unwrap();

    let rows = ledger.trial_balance();
    let debits: Decimal = rows.iter().map(|r| r.debit_total).sum();
    let credits: Decimal = rows.iter().map(|r| r.credit_total).sum();
    assert_eq!(debits, credits);

    // Fleet and accumulated depreciation wash out after disposal.
    let fleet = ledger.account_by_code("1500").unwrap();
    let accumulated = ledger.account_by_code("1590").unwrap();
    assert_eq!(ledger.account_balance(fleet.id).unwrap(), dec!(0));
    assert_eq!(ledger.account_balance(accumulated.id).unwrap(), dec!(0));
}

#[test]
fn receipt_posting_splits_allocations_across_accounts() {
    let (ledger, recorder) = setup();
    let income = ledger.find_or_create(&rental_chart::RENTAL_INCOME).unwrap();
    let deposits = ledger
        .find_or_create(&rental_chart::SECURITY_DEPOSITS)
        .unwrap();
    let cash = ledger.find_or_create(&rental_chart::CASH).unwrap();

    recorder
        .record(BusinessEvent::ReceiptPosted {
            receipt_id: ReceiptId::new(),
            contract_id: ContractId::new(),
            total: usd(dec!(1100)),
            method_account: cash.id,
            allocations: vec![
                (income.id, usd(dec!(900)), Some("rental".into())),
                (deposits.id, usd(dec!(200)), Some("deposit".into())),
            ],
        })
        .unwrap();

    assert_eq!(ledger.account_balance(cash.id).unwrap(), dec!(1100));
    assert_eq!(ledger.account_balance(income.id).unwrap(), dec!(900));
    assert_eq!(ledger.account_balance(deposits.id).unwrap(), dec!(200));
}

#[test]
fn receipt_with_mismatched_allocations_is_rejected() {
    let (ledger, recorder) = setup();
    let income = ledger.find_or_create(&rental_chart::RENTAL_INCOME).unwrap();
    let cash = ledger.find_or_create(&rental_chart::CASH).unwrap();

    let result = recorder.record(BusinessEvent::ReceiptPosted {
        receipt_id: ReceiptId::new(),
        contract_id: ContractId::new(),
        total: usd(dec!(1000)),
        method_account: cash.id,
        allocations: vec![(income.id, usd(dec!(900)), None)],
    });

    assert!(result.is_err());
    assert_eq!(ledger.journal_len(), 0);
}

//! Integration tests for receipt recording

use std::sync::Arc;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{BranchId, ContractId, Currency, CustomerId, Money};
use domain_ledger::{
    AccountingContext, ChartOfAccounts, InMemoryLedger, LedgerRecorder, LedgerStore,
};
use domain_receipts::{
    AccountRef, AllocationRequest, BranchAccounts, NewReceipt, PaymentMethod, ReceiptError,
    ReceiptService, ReceiptStatus,
};

fn usd(amount: Decimal) -> Money {
    Money::new(amount, Currency::USD)
}

fn setup() -> (Arc<InMemoryLedger>, ReceiptService<InMemoryLedger>, BranchId) {
    let ledger = Arc::new(InMemoryLedger::new());
    let recorder = LedgerRecorder::new(
        ledger.clone(),
        AccountingContext::new("Fleet Rentals LLC", Currency::USD),
    );
    let service = ReceiptService::new(ledger.clone(), recorder);
    let branch_id = BranchId::new();
    service.register_branch(BranchAccounts::standard(branch_id));
    (ledger, service, branch_id)
}

fn new_receipt(branch_id: BranchId, total: Money, allocations: Vec<AllocationRequest>) -> NewReceipt {
    NewReceipt {
        contract_id: ContractId::new(),
        customer_id: CustomerId::new(),
        branch_id,
        total_amount: total,
        method: PaymentMethod::Cash,
        reference: None,
        check_number: None,
        allocations,
    }
}

#[test]
fn receipt_is_completed_and_mirrored_in_the_ledger() {
    let (ledger, service, branch_id) = setup();

    let recorded = service
        .record_receipt(new_receipt(
            branch_id,
            usd(dec!(1100)),
            vec![
                AllocationRequest::new("rental", usd(dec!(900))),
                AllocationRequest::new("violation_guarantee", usd(dec!(200))),
            ],
        ))
        .unwrap();

    assert_eq!(recorded.status, ReceiptStatus::Completed);
    assert_eq!(recorded.receipt_number, "RCP-000001");
    let txn_id = recorded.ledger_transaction_id.unwrap();
    assert!(ledger.transaction(txn_id).unwrap().is_balanced());

    let cash = ledger.account_by_code("1000").unwrap();
    let guarantee = ledger.account_by_code("2110").unwrap();
    assert_eq!(ledger.account_balance(cash.id).unwrap(), dec!(1100));
    assert_eq!(ledger.account_balance(guarantee.id).unwrap(), dec!(200));
}

#[test]
fn deposit_only_receipt_posts_one_debit_and_one_credit() {
    let (ledger, service, branch_id) = setup();

    let recorded = service
        .record_receipt(new_receipt(
            branch_id,
            usd(dec!(150)),
            vec![AllocationRequest::new("deposit_allowance", usd(dec!(150)))],
        ))
        .unwrap();

    let txn = ledger
        .transaction(recorded.ledger_transaction_id.unwrap())
        .unwrap();
    assert_eq!(txn.line_items.len(), 2);

    let deposits = ledger.account_by_code("2100").unwrap();
    assert_eq!(ledger.account_balance(deposits.id).unwrap(), dec!(150));
}

#[test]
fn mismatched_allocation_sum_leaves_zero_state() {
    let (ledger, service, branch_id) = setup();

    let result = service.record_receipt(new_receipt(
        branch_id,
        usd(dec!(1000)),
        vec![AllocationRequest::new("rental", usd(dec!(900)))],
    ));

    assert!(matches!(
        result,
        Err(ReceiptError::AllocationSumMismatch { .. })
    ));
    assert_eq!(service.receipt_count(), 0);
    assert_eq!(ledger.journal_len(), 0);
}

#[test]
fn missing_row_mapping_names_the_row() {
    let (ledger, service, branch_id) = setup();

    let result = service.record_receipt(new_receipt(
        branch_id,
        usd(dec!(100)),
        vec![AllocationRequest::new("parking_fines", usd(dec!(100)))],
    ));

    match result {
        Err(ReceiptError::MissingRowMapping { row_id }) => {
            assert_eq!(row_id, "parking_fines");
        }
        other => panic!("expected MissingRowMapping, got {other:?}"),
    }
    assert_eq!(service.receipt_count(), 0);
    assert_eq!(ledger.journal_len(), 0);
}

#[test]
fn zero_amount_allocations_are_dropped_not_stored() {
    let (_ledger, service, branch_id) = setup();

    let recorded = service
        .record_receipt(new_receipt(
            branch_id,
            usd(dec!(500)),
            vec![
                AllocationRequest::new("rental", usd(dec!(500))),
                AllocationRequest::new("fees", usd(dec!(0))),
            ],
        ))
        .unwrap();

    assert_eq!(recorded.allocations.len(), 1);
    assert_eq!(recorded.allocations[0].row_id, "rental");
}

#[test]
fn register_if_absent_keeps_a_bespoke_mapping() {
    let (ledger, service, _branch_id) = setup();
    let branch_id = BranchId::new();

    let mut bespoke = BranchAccounts::standard(branch_id);
    bespoke.income_rows.insert(
        "parking_fines".to_string(),
        AccountRef {
            code: "4300".to_string(),
            name: "Parking Fine Recoveries".to_string(),
            account_type: domain_ledger::AccountType::Revenue,
        },
    );
    service.register_branch(bespoke);
    service.register_branch_if_absent(BranchAccounts::standard(branch_id));

    service
        .record_receipt(new_receipt(
            branch_id,
            usd(dec!(80)),
            vec![AllocationRequest::new("parking_fines", usd(dec!(80)))],
        ))
        .unwrap();

    let fines = ledger.account_by_code("4300").unwrap();
    assert_eq!(ledger.account_balance(fines.id).unwrap(), dec!(80));
}

#[test]
fn unconfigured_branch_is_a_configuration_error() {
    let (_ledger, service, _branch_id) = setup();
    let other_branch = BranchId::new();

    let result = service.record_receipt(new_receipt(
        other_branch,
        usd(dec!(100)),
        vec![AllocationRequest::new("rental", usd(dec!(100)))],
    ));

    assert!(matches!(result, Err(ReceiptError::BranchNotConfigured(_))));
}

#[test]
fn card_payments_settle_into_the_bank_account() {
    let (ledger, service, branch_id) = setup();

    let mut receipt = new_receipt(
        branch_id,
        usd(dec!(300)),
        vec![AllocationRequest::new("rental", usd(dec!(300)))],
    );
    receipt.method = PaymentMethod::Card;
    service.record_receipt(receipt).unwrap();

    let bank = ledger.account_by_code("1010").unwrap();
    assert_eq!(ledger.account_balance(bank.id).unwrap(), dec!(300));
}

#[test]
fn receipt_numbers_are_sequential() {
    let (_ledger, service, branch_id) = setup();

    let numbers: Vec<String> = (0..3)
        .map(|_| {
            service
                .record_receipt(new_receipt(
                    branch_id,
                    usd(dec!(100)),
                    vec![AllocationRequest::new("rental", usd(dec!(100)))],
                ))
                .unwrap()
                .receipt_number
        })
        .collect();

    assert_eq!(numbers, vec!["RCP-000001", "RCP-000002", "RCP-000003"]);
}

//! Receipt handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use core_kernel::{ContractId, Money};
use domain_receipts::{AllocationRequest, NewReceipt, PaymentReceipt};

use crate::dto::receipts::CreateReceiptRequest;
use crate::error::ApiError;
use crate::AppState;

/// Records a payment receipt against a contract
pub async fn create_receipt(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<CreateReceiptRequest>,
) -> Result<(StatusCode, Json<PaymentReceipt>), ApiError> {
    let (contract_id, customer_id, branch_id, currency) = {
        let contracts = state.contracts.read().unwrap_or_else(|e| e.into_inner());
        let contract = contracts
            .get(&ContractId::from_uuid(id))
            .ok_or_else(|| ApiError::NotFound(format!("Contract {id} not found")))?;
        (
            contract.id,
            contract.customer_id,
            contract.branch_id,
            contract.currency(),
        )
    };

    let allocations = request
        .allocations
        .into_iter()
        .map(|a| AllocationRequest {
            row_id: a.row_id,
            amount: Money::new(a.amount, currency),
            memo: a.memo,
            invoice_id: None,
        })
        .collect();

    let recorded = state.receipts.record_receipt(NewReceipt {
        contract_id,
        customer_id,
        branch_id,
        total_amount: Money::new(request.total_amount, currency),
        method: request.method,
        reference: request.reference,
        check_number: request.check_number,
        allocations,
    })?;

    Ok((StatusCode::CREATED, Json(recorded)))
}

/// Lists receipts recorded against a contract
pub async fn list_receipts(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<PaymentReceipt>>, ApiError> {
    let contract_id = {
        let contracts = state.contracts.read().unwrap_or_else(|e| e.into_inner());
        contracts
            .get(&ContractId::from_uuid(id))
            .map(|c| c.id)
            .ok_or_else(|| ApiError::NotFound(format!("Contract {id} not found")))?
    };
    Ok(Json(state.receipts.receipts_for_contract(contract_id)))
}

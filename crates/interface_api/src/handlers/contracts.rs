//! Contract lifecycle handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use core_kernel::{BranchId, ContractId, CustomerId, Money, RentalPeriod, VehicleId};
use domain_contract::{
    summarize, ClosureSummary, Contract, ContractTerms, Deposit, VehicleCondition,
};
use domain_pricing::RentalQuote;
use domain_receipts::BranchAccounts;

use crate::dto::contracts::{
    AddFeeRequest, CompleteRequest, ContractResponse, CreateContractRequest, ExtendRequest,
    ReturnRequest, VoidRequest,
};
use crate::dto::pricing::ExtensionQuoteRequest;
use crate::error::ApiError;
use crate::AppState;

fn not_found(id: Uuid) -> ApiError {
    ApiError::NotFound(format!("Contract {id} not found"))
}

/// Runs a closure against a mutable contract, returning NotFound if absent
fn with_contract<R>(
    state: &AppState,
    id: Uuid,
    f: impl FnOnce(&mut Contract) -> Result<R, ApiError>,
) -> Result<R, ApiError> {
    let mut contracts = state.contracts.write().unwrap_or_else(|e| e.into_inner());
    let contract = contracts
        .get_mut(&ContractId::from_uuid(id))
        .ok_or_else(|| not_found(id))?;
    f(contract)
}

fn read_contract(state: &AppState, id: Uuid) -> Result<Contract, ApiError> {
    let contracts = state.contracts.read().unwrap_or_else(|e| e.into_inner());
    contracts
        .get(&ContractId::from_uuid(id))
        .cloned()
        .ok_or_else(|| not_found(id))
}

/// Drafts a new contract priced from the supplied rate card
pub async fn create_contract(
    State(state): State<AppState>,
    Json(request): Json<CreateContractRequest>,
) -> Result<(StatusCode, Json<ContractResponse>), ApiError> {
    let period = RentalPeriod::new(request.start, request.end)
        .map_err(|e| ApiError::Validation(e.to_string()))?;
    let card = request.rate_card.to_domain()?;
    let currency = request.rate_card.currency;

    let terms = ContractTerms {
        deposit: Deposit {
            amount: Money::new(request.deposit_amount, currency),
            kind: request.deposit_kind,
        },
        mileage_limit: request.mileage_limit,
        excess_mileage_rate: Money::new(request.excess_mileage_rate, currency),
        fuel_service_rate: Money::new(request.fuel_service_rate, currency),
    };
    let pickup = VehicleCondition::new(request.pickup_mileage, request.pickup_fuel_level)
        .with_photos(request.pickup_photos);

    let contract = Contract::draft(
        state.contract_numbers.next(),
        CustomerId::from_uuid(request.customer_id),
        VehicleId::from_uuid(request.vehicle_id),
        BranchId::from_uuid(request.branch_id),
        period,
        &card,
        terms,
        pickup,
    );

    // Branches get the standard GL mapping unless one was registered
    // explicitly before.
    state
        .receipts
        .register_branch_if_absent(BranchAccounts::standard(contract.branch_id));

    let response = ContractResponse::from(&contract);
    let mut contracts = state.contracts.write().unwrap_or_else(|e| e.into_inner());
    contracts.insert(contract.id, contract);
    Ok((StatusCode::CREATED, Json(response)))
}

/// Returns a contract by id
pub async fn get_contract(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ContractResponse>, ApiError> {
    let contract = read_contract(&state, id)?;
    Ok(Json(ContractResponse::from(&contract)))
}

/// Moves a draft contract into the active state
pub async fn activate_contract(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ContractResponse>, ApiError> {
    with_contract(&state, id, |contract| {
        contract.activate()?;
        contract.take_events();
        Ok(Json(ContractResponse::from(&*contract)))
    })
}

/// Prices a prospective extension without applying it
pub async fn quote_extension(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ExtensionQuoteRequest>,
) -> Result<Json<RentalQuote>, ApiError> {
    read_contract(&state, id)?;
    let card = request.rate_card.to_domain()?;
    Ok(Json(domain_pricing::price_for_days(&card, request.days)))
}

/// Extends an active contract
pub async fn extend_contract(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ExtendRequest>,
) -> Result<Json<ContractResponse>, ApiError> {
    let card = request.rate_card.to_domain()?;
    with_contract(&state, id, |contract| {
        contract.extend(&card, request.days, request.reason)?;
        contract.take_events();
        Ok(Json(ContractResponse::from(&*contract)))
    })
}

/// Records the vehicle's return condition
pub async fn record_return(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ReturnRequest>,
) -> Result<Json<ContractResponse>, ApiError> {
    with_contract(&state, id, |contract| {
        let condition = VehicleCondition::new(request.mileage, request.fuel_level)
            .with_photos(request.photos);
        contract.record_return(condition)?;
        contract.take_events();
        Ok(Json(ContractResponse::from(&*contract)))
    })
}

/// Completes an active contract
///
/// The body is optional; a supplied `completed_at` backdates the
/// completion, which the closure's late-return charge is computed from.
pub async fn complete_contract(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Option<Json<CompleteRequest>>,
) -> Result<Json<ContractResponse>, ApiError> {
    let completed_at = body.and_then(|Json(request)| request.completed_at);
    with_contract(&state, id, |contract| {
        match completed_at {
            Some(at) => contract.complete_at(at)?,
            None => contract.complete()?,
        }
        contract.take_events();
        Ok(Json(ContractResponse::from(&*contract)))
    })
}

/// Voids a contract
pub async fn void_contract(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<VoidRequest>,
) -> Result<Json<ContractResponse>, ApiError> {
    with_contract(&state, id, |contract| {
        contract.void(request.reason)?;
        contract.take_events();
        Ok(Json(ContractResponse::from(&*contract)))
    })
}

/// Adds a fee line validated against the fee registry
pub async fn add_fee(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AddFeeRequest>,
) -> Result<Json<ContractResponse>, ApiError> {
    with_contract(&state, id, |contract| {
        let amount = Money::new(request.amount, contract.currency());
        contract.add_fee(&state.fee_registry, &request.fee_type, amount, request.memo)?;
        contract.take_events();
        Ok(Json(ContractResponse::from(&*contract)))
    })
}

/// Computes the closure position of a contract
///
/// Pure read over the contract and its receipts; nothing is persisted.
pub async fn closure(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ClosureSummary>, ApiError> {
    let contract = read_contract(&state, id)?;
    let receipts = state.receipts.receipts_for_contract(contract.id);
    let summary = summarize(&contract, &receipts)?;
    Ok(Json(summary))
}

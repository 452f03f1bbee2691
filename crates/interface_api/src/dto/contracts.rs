//! Contract DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use core_kernel::{BranchId, ContractId, CustomerId, Money, VehicleId};
use domain_contract::{
    Contract, ContractStatus, Deposit, DepositKind, Extension, FeeLine, FuelLevel,
};

use crate::dto::pricing::RateCardDto;

/// Request to draft a new contract
#[derive(Debug, Deserialize)]
pub struct CreateContractRequest {
    pub customer_id: Uuid,
    pub vehicle_id: Uuid,
    pub branch_id: Uuid,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub rate_card: RateCardDto,
    pub deposit_amount: Decimal,
    pub deposit_kind: DepositKind,
    /// Omit for unlimited mileage
    pub mileage_limit: Option<u32>,
    pub excess_mileage_rate: Decimal,
    pub fuel_service_rate: Decimal,
    pub pickup_mileage: u32,
    pub pickup_fuel_level: FuelLevel,
    #[serde(default)]
    pub pickup_photos: Vec<String>,
}

/// Request to extend an active contract
#[derive(Debug, Deserialize)]
pub struct ExtendRequest {
    pub rate_card: RateCardDto,
    pub days: u32,
    pub reason: Option<String>,
}

/// Request to record the vehicle's return
#[derive(Debug, Deserialize)]
pub struct ReturnRequest {
    pub mileage: u32,
    pub fuel_level: FuelLevel,
    #[serde(default)]
    pub photos: Vec<String>,
}

/// Request to complete a contract, optionally at a given moment
#[derive(Debug, Deserialize)]
pub struct CompleteRequest {
    pub completed_at: Option<DateTime<Utc>>,
}

/// Request to void a contract
#[derive(Debug, Deserialize)]
pub struct VoidRequest {
    pub reason: String,
}

/// Request to add a fee line
#[derive(Debug, Deserialize)]
pub struct AddFeeRequest {
    pub fee_type: String,
    pub amount: Decimal,
    pub memo: Option<String>,
}

/// Contract view returned by the API
#[derive(Debug, Serialize)]
pub struct ContractResponse {
    pub id: ContractId,
    pub contract_number: String,
    pub customer_id: CustomerId,
    pub vehicle_id: VehicleId,
    pub branch_id: BranchId,
    #[serde(flatten)]
    pub status: ContractStatus,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub daily_rate: Money,
    pub total_days: u32,
    pub total_amount: Money,
    pub deposit: Deposit,
    pub excess_mileage_charge: Money,
    pub fuel_charge: Money,
    pub extensions: Vec<Extension>,
    pub fees: Vec<FeeLine>,
}

impl From<&Contract> for ContractResponse {
    fn from(contract: &Contract) -> Self {
        Self {
            id: contract.id,
            contract_number: contract.contract_number.clone(),
            customer_id: contract.customer_id,
            vehicle_id: contract.vehicle_id,
            branch_id: contract.branch_id,
            status: contract.status.clone(),
            start: contract.period.start(),
            end: contract.period.end(),
            daily_rate: contract.daily_rate,
            total_days: contract.total_days,
            total_amount: contract.total_amount,
            deposit: contract.terms.deposit,
            excess_mileage_charge: contract.excess_mileage_charge,
            fuel_charge: contract.fuel_charge,
            extensions: contract.extensions.clone(),
            fees: contract.fees.clone(),
        }
    }
}

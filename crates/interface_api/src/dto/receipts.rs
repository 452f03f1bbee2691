//! Receipt DTOs

use rust_decimal::Decimal;
use serde::Deserialize;

use domain_receipts::PaymentMethod;

/// One allocation row of a receipt request
#[derive(Debug, Deserialize)]
pub struct AllocationDto {
    pub row_id: String,
    pub amount: Decimal,
    pub memo: Option<String>,
}

/// Request to record a payment receipt against a contract
#[derive(Debug, Deserialize)]
pub struct CreateReceiptRequest {
    pub total_amount: Decimal,
    pub method: PaymentMethod,
    pub reference: Option<String>,
    pub check_number: Option<String>,
    pub allocations: Vec<AllocationDto>,
}

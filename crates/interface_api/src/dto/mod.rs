//! Request/response data transfer objects

pub mod contracts;
pub mod pricing;
pub mod receipts;

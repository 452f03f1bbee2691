//! Request handlers

pub mod contracts;
pub mod health;
pub mod pricing;
pub mod receipts;

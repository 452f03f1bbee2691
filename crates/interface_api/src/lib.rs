//! HTTP API Layer
//!
//! REST surface for the rental finance core using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: request handlers per domain area
//! - **DTOs**: request/response data transfer objects
//! - **Error handling**: consistent JSON error responses mapped from the
//!   domain error taxonomy
//!
//! Application state is in-memory: contracts behind a `RwLock`, the ledger
//! and receipt service behind `Arc`s. All operations are request-scoped;
//! there is no background work.

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use core_kernel::ContractId;
use domain_contract::{Contract, ContractNumberGenerator, FeeTypeRegistry};
use domain_ledger::{AccountingContext, InMemoryLedger, LedgerRecorder};
use domain_receipts::ReceiptService;

use crate::config::ApiConfig;
use crate::handlers::{contracts, health, pricing, receipts};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub contracts: Arc<RwLock<HashMap<ContractId, Contract>>>,
    pub ledger: Arc<InMemoryLedger>,
    pub receipts: Arc<ReceiptService<InMemoryLedger>>,
    pub fee_registry: Arc<FeeTypeRegistry>,
    pub contract_numbers: Arc<ContractNumberGenerator>,
}

impl AppState {
    /// Builds fresh application state from configuration
    pub fn new(config: ApiConfig) -> Self {
        let ledger = Arc::new(InMemoryLedger::new());
        let recorder = LedgerRecorder::new(
            ledger.clone(),
            AccountingContext::new(config.entity_name.clone(), config.currency),
        );
        let receipts = Arc::new(ReceiptService::new(ledger.clone(), recorder));

        Self {
            config,
            contracts: Arc::new(RwLock::new(HashMap::new())),
            ledger,
            receipts,
            fee_registry: Arc::new(FeeTypeRegistry::standard()),
            contract_numbers: Arc::new(ContractNumberGenerator::new()),
        }
    }
}

/// Creates the main API router
pub fn create_router(state: AppState) -> Router {
    let pricing_routes = Router::new().route("/quotes", post(pricing::create_quote));

    let contract_routes = Router::new()
        .route("/", post(contracts::create_contract))
        .route("/:id", get(contracts::get_contract))
        .route("/:id/activate", post(contracts::activate_contract))
        .route("/:id/extension-quotes", post(contracts::quote_extension))
        .route("/:id/extensions", post(contracts::extend_contract))
        .route("/:id/return", post(contracts::record_return))
        .route("/:id/complete", post(contracts::complete_contract))
        .route("/:id/void", post(contracts::void_contract))
        .route("/:id/fees", post(contracts::add_fee))
        .route(
            "/:id/receipts",
            post(receipts::create_receipt).get(receipts::list_receipts),
        )
        .route("/:id/closure", get(contracts::closure));

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api/v1/pricing", pricing_routes)
        .nest("/api/v1/contracts", contract_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

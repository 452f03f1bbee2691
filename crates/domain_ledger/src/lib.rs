//! Ledger Recorder - Double-entry financial records
//!
//! Every financially meaningful event in a rental's life is recorded as a
//! balanced ledger transaction. This crate provides:
//! - The chart of accounts and its well-known rental accounts
//! - Balanced transaction drafting and validation
//! - Ports for chart resolution and journal posting, with an in-memory
//!   adapter
//! - A recorder that maps business events to posting patterns

pub mod account;
pub mod chart;
pub mod error;
pub mod memory;
pub mod recorder;
pub mod transaction;

pub use account::{rental_chart, Account, AccountSpec, AccountType};
pub use chart::{AccountingContext, ChartOfAccounts, LedgerStore};
pub use error::LedgerError;
pub use memory::{InMemoryLedger, TrialBalanceRow};
pub use recorder::{BusinessEvent, LedgerRecorder, SettlementAccount};
pub use transaction::{EntryType, LedgerTransaction, LineItem};

//! Test utilities for the rental finance workspace
//!
//! Fixtures, builders, and assertions shared by integration tests.

pub mod assertions;
pub mod builders;
pub mod fixtures;

pub use assertions::*;
pub use builders::ContractBuilder;
pub use fixtures::{IdFixtures, MoneyFixtures, RateCardFixtures, TemporalFixtures};

//! Pricing Engine - Tiered rental rate computation
//!
//! A pure function from a vehicle rate card and a rental duration to a
//! priced quote. The same computation serves initial contract pricing
//! (days derived from the date range) and extension pricing (days supplied
//! directly), so contract totals and extension totals can never disagree
//! on rounding.

pub mod error;
pub mod quote;
pub mod rate_card;

pub use error::PricingError;
pub use quote::{price, price_for_days, BreakdownLine, PriceTier, RateUnit, RentalQuote};
pub use rate_card::RateCard;

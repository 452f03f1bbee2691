//! Pricing handlers

use axum::Json;

use core_kernel::RentalPeriod;
use domain_pricing::{price, price_for_days, RentalQuote};

use crate::dto::pricing::QuoteRequest;
use crate::error::ApiError;

/// Prices a rental from a rate card and a duration
pub async fn create_quote(Json(request): Json<QuoteRequest>) -> Result<Json<RentalQuote>, ApiError> {
    let card = request.rate_card.to_domain()?;

    let quote = match (request.days, request.start, request.end) {
        (Some(days), _, _) => price_for_days(&card, days),
        (None, Some(start), Some(end)) => {
            let period = RentalPeriod::new(start, end)
                .map_err(|e| ApiError::Validation(e.to_string()))?;
            price(&card, &period)
        }
        _ => {
            return Err(ApiError::Validation(
                "Provide either days or a start/end date range".to_string(),
            ))
        }
    };

    Ok(Json(quote))
}

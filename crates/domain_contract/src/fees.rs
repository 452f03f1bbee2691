//! Fee type registry
//!
//! Ad-hoc contract charges must name a registered fee type. The registry
//! is runtime data, not an enum, so deployments can extend the set without
//! a code change.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use core_kernel::Money;

use crate::error::ContractError;

/// A registered fee type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeType {
    pub key: String,
    pub name: String,
}

/// The set of fee keys contracts may charge
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeeTypeRegistry {
    fee_types: HashMap<String, FeeType>,
}

static STANDARD_FEES: Lazy<Vec<(&str, &str)>> = Lazy::new(|| {
    vec![
        ("late_return", "Late Return Fee"),
        ("cleaning", "Cleaning Fee"),
        ("smoking", "Smoking Penalty"),
        ("refuel_service", "Refuel Service Fee"),
        ("traffic_violation_admin", "Traffic Violation Handling"),
        ("child_seat", "Child Seat"),
        ("gps_unit", "GPS Unit"),
        ("additional_driver", "Additional Driver"),
        ("delivery", "Vehicle Delivery"),
    ]
});

impl FeeTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry used when no deployment-specific set is configured
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for (key, name) in STANDARD_FEES.iter() {
            registry.register(FeeType {
                key: (*key).to_string(),
                name: (*name).to_string(),
            });
        }
        registry
    }

    pub fn register(&mut self, fee_type: FeeType) {
        self.fee_types.insert(fee_type.key.clone(), fee_type);
    }

    pub fn get(&self, key: &str) -> Option<&FeeType> {
        self.fee_types.get(key)
    }

    /// Validates a fee key, naming it on rejection
    pub fn require(&self, key: &str) -> Result<&FeeType, ContractError> {
        self.get(key)
            .ok_or_else(|| ContractError::UnknownFeeType(key.to_string()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fee_types.keys().map(String::as_str)
    }
}

/// A charge added to a contract against a registered fee type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeLine {
    pub fee_type: String,
    pub amount: Money,
    pub memo: Option<String>,
    pub added_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_registry_knows_common_fees() {
        let registry = FeeTypeRegistry::standard();

        assert!(registry.get("cleaning").is_some());
        assert!(registry.get("refuel_service").is_some());
        assert!(registry.get("made_up_fee").is_none());
    }

    #[test]
    fn test_require_names_unknown_key() {
        let registry = FeeTypeRegistry::standard();
        let err = registry.require("valet").unwrap_err();

        assert!(err.to_string().contains("valet"));
    }

    #[test]
    fn test_registry_is_extensible() {
        let mut registry = FeeTypeRegistry::standard();
        registry.register(FeeType {
            key: "winter_tires".to_string(),
            name: "Winter Tires".to_string(),
        });

        assert!(registry.require("winter_tires").is_ok());
    }
}

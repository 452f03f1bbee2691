//! Vehicle condition capture
//!
//! Condition is recorded twice per rental: at pickup and at return. The
//! fuel gauge is an ordered scale so the return reading can be compared
//! against pickup in whole steps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fuel gauge reading, ordered from empty to full
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuelLevel {
    Empty,
    Low,
    Quarter,
    Half,
    ThreeQuarters,
    Full,
}

impl FuelLevel {
    fn index(&self) -> u32 {
        match self {
            FuelLevel::Empty => 0,
            FuelLevel::Low => 1,
            FuelLevel::Quarter => 2,
            FuelLevel::Half => 3,
            FuelLevel::ThreeQuarters => 4,
            FuelLevel::Full => 5,
        }
    }

    /// Whole scale steps this reading sits below another, floored at zero
    pub fn steps_below(&self, other: FuelLevel) -> u32 {
        other.index().saturating_sub(self.index())
    }
}

/// A snapshot of the vehicle's state at pickup or return
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleCondition {
    pub mileage: u32,
    pub fuel_level: FuelLevel,
    /// References to condition photos (storage keys, not file contents)
    pub photos: Vec<String>,
    pub recorded_at: DateTime<Utc>,
}

impl VehicleCondition {
    pub fn new(mileage: u32, fuel_level: FuelLevel) -> Self {
        Self {
            mileage,
            fuel_level,
            photos: Vec::new(),
            recorded_at: Utc::now(),
        }
    }

    pub fn with_photos(mut self, photos: Vec<String>) -> Self {
        self.photos = photos;
        self
    }
}

use serde::{Deserialize, Serialize};

use crate::principal::Principal;

pub type LandId = u64;
pub type Price = u64;
/// Nanoseconds since the unix epoch.
pub type Timestamp = u64;

/// World extent on the x and y axes, inclusive on both sides.
pub const WORLD_XY_LIMIT: i32 = 1_000_000;
/// World extent on the z axis.
pub const WORLD_Z_LIMIT: i32 = 1_000;
/// Largest permitted width or height of a parcel.
pub const MAX_PLAN_EDGE: u32 = 10_000;
/// Largest permitted depth of a parcel.
pub const MAX_DEPTH: u32 = 1_000;

/// Anchor point of a parcel. No two parcels may share one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinates {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Coordinates {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub fn in_world_bounds(&self) -> bool {
        self.x.abs() <= WORLD_XY_LIMIT
            && self.y.abs() <= WORLD_XY_LIMIT
            && self.z.abs() <= WORLD_Z_LIMIT
    }

    pub fn point(&self) -> (i32, i32, i32) {
        (self.x, self.y, self.z)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32, depth: u32) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    pub fn in_build_limits(&self) -> bool {
        self.width > 0
            && self.width <= MAX_PLAN_EDGE
            && self.height > 0
            && self.height <= MAX_PLAN_EDGE
            && self.depth > 0
            && self.depth <= MAX_DEPTH
    }

    /// Footprint in the x/y plane.
    pub fn plan_area(&self) -> u32 {
        self.width * self.height
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LandType {
    Agricultural,
    Commercial,
    Entertainment,
    Industrial,
    Mixed,
    Residential,
}

/// Optional structured extras attached to a parcel, replaced wholesale.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LandMetadata {
    pub environment: Option<String>,
    pub special_features: Vec<String>,
    pub access_roads: Vec<String>,
    pub utilities: Vec<String>,
}

/// A registered unit of virtual land.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParcelRecord {
    pub id: LandId,
    pub owner: Principal,
    pub coordinates: Coordinates,
    pub dimensions: Dimensions,
    pub land_type: LandType,
    pub description: String,
    pub metadata: Option<LandMetadata>,
    pub created_at: Timestamp,
    pub last_updated: Timestamp,
}

/// Caller-supplied payload for registering a new parcel.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LandRegistration {
    pub coordinates: Coordinates,
    pub dimensions: Dimensions,
    pub land_type: LandType,
    pub description: String,
    pub metadata: Option<LandMetadata>,
}

/// Active for-sale state of a parcel. Exists iff the parcel is listed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketplaceListing {
    pub land_id: LandId,
    pub seller: Principal,
    pub price: Price,
    pub listed_at: Timestamp,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionType {
    Registration,
    Transfer,
    Sale,
}

/// Append-only log entry; never mutated or deleted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub land_id: LandId,
    pub from: Principal,
    pub to: Principal,
    pub price: Option<Price>,
    pub transaction_type: TransactionType,
    pub timestamp: Timestamp,
}

/// Aggregate counters derived from the live stores.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LandStatistics {
    pub total_lands: u64,
    pub total_owners: u64,
    pub lands_for_sale: u64,
    pub average_price: Option<Price>,
    pub total_transactions: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn world_bounds_are_inclusive() {
        assert!(Coordinates::new(WORLD_XY_LIMIT, -WORLD_XY_LIMIT, WORLD_Z_LIMIT).in_world_bounds());
        assert!(!Coordinates::new(WORLD_XY_LIMIT + 1, 0, 0).in_world_bounds());
        assert!(!Coordinates::new(0, 0, WORLD_Z_LIMIT + 1).in_world_bounds());
    }

    #[test]
    fn build_limits_require_positive_axes() {
        assert!(Dimensions::new(1, 1, 1).in_build_limits());
        assert!(Dimensions::new(MAX_PLAN_EDGE, MAX_PLAN_EDGE, MAX_DEPTH).in_build_limits());
        assert!(!Dimensions::new(0, 10, 5).in_build_limits());
        assert!(!Dimensions::new(10, 0, 5).in_build_limits());
        assert!(!Dimensions::new(10, 10, 0).in_build_limits());
        assert!(!Dimensions::new(MAX_PLAN_EDGE + 1, 1, 1).in_build_limits());
    }

    #[test]
    fn plan_area_ignores_depth() {
        assert_eq!(Dimensions::new(10, 10, 5).plan_area(), 100);
        assert_eq!(Dimensions::new(10, 10, 999).plan_area(), 100);
    }
}

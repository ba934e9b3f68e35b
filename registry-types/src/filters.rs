use serde::{Deserialize, Serialize};

use crate::types::{Coordinates, LandType, Price};

/// Search parameters for registry and marketplace scans.
///
/// Every field is independently optional; provided filters are ANDed and
/// absent filters impose no constraint. The coordinate range corners are
/// normalized per axis before comparison, so either corner ordering works.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SearchFilters {
    pub land_type: Option<LandType>,
    pub min_price: Option<Price>,
    pub max_price: Option<Price>,
    pub coordinates_range: Option<(Coordinates, Coordinates)>,
    pub min_area: Option<u32>,
    pub features: Option<Vec<String>>,
}

impl SearchFilters {
    /// True when at least one price bound is present.
    pub fn constrains_price(&self) -> bool {
        self.min_price.is_some() || self.max_price.is_some()
    }
}

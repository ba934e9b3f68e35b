//! Pure predicates shared by the registry and marketplace search paths.

use registry_types::{Coordinates, ParcelRecord, Price, SearchFilters};

/// Inclusive axis-aligned box test; corners are normalized per axis, so
/// either ordering of the two corners describes the same box.
pub fn within_box(coordinates: &Coordinates, corner1: &Coordinates, corner2: &Coordinates) -> bool {
    let inside = |value: i32, a: i32, b: i32| value >= a.min(b) && value <= a.max(b);
    inside(coordinates.x, corner1.x, corner2.x)
        && inside(coordinates.y, corner1.y, corner2.y)
        && inside(coordinates.z, corner1.z, corner2.z)
}

/// Per-axis (Chebyshev) distance in the x/y plane; z is ignored.
pub fn within_radius(coordinates: &Coordinates, center: &Coordinates, radius: u32) -> bool {
    let dx = (coordinates.x as i64 - center.x as i64).unsigned_abs();
    let dy = (coordinates.y as i64 - center.y as i64).unsigned_abs();
    dx <= radius as u64 && dy <= radius as u64
}

/// ANDed filter match for one parcel.
///
/// `listing_price` is the parcel's active listing price; a parcel without a
/// listing fails any provided price bound.
pub fn matches_filters(
    parcel: &ParcelRecord,
    listing_price: Option<Price>,
    filters: &SearchFilters,
) -> bool {
    if let Some(land_type) = filters.land_type {
        if parcel.land_type != land_type {
            return false;
        }
    }

    if filters.constrains_price() {
        let Some(price) = listing_price else {
            return false;
        };
        if filters.min_price.is_some_and(|min| price < min) {
            return false;
        }
        if filters.max_price.is_some_and(|max| price > max) {
            return false;
        }
    }

    if let Some(min_area) = filters.min_area {
        if parcel.dimensions.plan_area() < min_area {
            return false;
        }
    }

    if let Some((corner1, corner2)) = &filters.coordinates_range {
        if !within_box(&parcel.coordinates, corner1, corner2) {
            return false;
        }
    }

    if let Some(required) = &filters.features {
        if !required.is_empty() {
            let Some(metadata) = &parcel.metadata else {
                return false;
            };
            if !required
                .iter()
                .all(|feature| metadata.special_features.contains(feature))
            {
                return false;
            }
        }
    }

    true
}

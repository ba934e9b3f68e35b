use std::collections::{BTreeMap, BTreeSet, HashMap};

use registry_types::{
    Coordinates, Dimensions, LandId, LandMetadata, ParcelRecord, Principal, Timestamp,
};

/// Ids start at 1; id 0 is never issued.
pub const FIRST_LAND_ID: LandId = 1;

/// Parcel table plus the ownership and coordinate indexes kept in lockstep.
///
/// The table is keyed by id in a `BTreeMap`, so iteration order equals
/// insertion order (ids are issued monotonically and never reused).
#[derive(Clone, Debug)]
pub struct ParcelStore {
    parcels: BTreeMap<LandId, ParcelRecord>,
    owners: HashMap<Principal, BTreeSet<LandId>>,
    points: HashMap<(i32, i32, i32), LandId>,
    next_id: LandId,
}

impl ParcelStore {
    pub fn new() -> Self {
        Self {
            parcels: BTreeMap::new(),
            owners: HashMap::new(),
            points: HashMap::new(),
            next_id: FIRST_LAND_ID,
        }
    }

    /// Rebuilds the store (and both indexes) from a flat parcel list.
    ///
    /// The allocator is advanced past the maximum restored id and never
    /// below `min_next_id`, so restored state cannot reissue an id.
    pub fn from_parcels(parcels: Vec<ParcelRecord>, min_next_id: LandId) -> Self {
        let mut store = Self::new();
        store.next_id = min_next_id.max(FIRST_LAND_ID);
        for parcel in parcels {
            if parcel.id >= store.next_id {
                store.next_id = parcel.id + 1;
            }
            store.index_insert(parcel);
        }
        store
    }

    pub fn next_id(&self) -> LandId {
        self.next_id
    }

    pub fn allocate_id(&mut self) -> LandId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn insert(&mut self, parcel: ParcelRecord) {
        self.index_insert(parcel);
    }

    fn index_insert(&mut self, parcel: ParcelRecord) {
        self.owners
            .entry(parcel.owner.clone())
            .or_default()
            .insert(parcel.id);
        self.points.insert(parcel.coordinates.point(), parcel.id);
        self.parcels.insert(parcel.id, parcel);
    }

    pub fn get(&self, id: LandId) -> Option<&ParcelRecord> {
        self.parcels.get(&id)
    }

    pub fn remove(&mut self, id: LandId) -> Option<ParcelRecord> {
        let parcel = self.parcels.remove(&id)?;
        self.points.remove(&parcel.coordinates.point());
        self.drop_owner_entry(&parcel.owner, id);
        Some(parcel)
    }

    /// Reassigns ownership and bumps `last_updated`.
    pub fn set_owner(&mut self, id: LandId, new_owner: Principal, now: Timestamp) {
        let Some(parcel) = self.parcels.get_mut(&id) else {
            return;
        };
        let previous = std::mem::replace(&mut parcel.owner, new_owner.clone());
        parcel.last_updated = now;
        self.drop_owner_entry(&previous, id);
        self.owners.entry(new_owner).or_default().insert(id);
    }

    /// Replaces metadata wholesale and bumps `last_updated`.
    pub fn set_metadata(&mut self, id: LandId, metadata: LandMetadata, now: Timestamp) {
        if let Some(parcel) = self.parcels.get_mut(&id) {
            parcel.metadata = Some(metadata);
            parcel.last_updated = now;
        }
    }

    fn drop_owner_entry(&mut self, owner: &Principal, id: LandId) {
        if let Some(owned) = self.owners.get_mut(owner) {
            owned.remove(&id);
            if owned.is_empty() {
                self.owners.remove(owner);
            }
        }
    }

    pub fn point_occupied(&self, coordinates: &Coordinates) -> bool {
        self.points.contains_key(&coordinates.point())
    }

    pub fn overlaps_existing(&self, coordinates: &Coordinates, dimensions: &Dimensions) -> bool {
        self.parcels.values().any(|parcel| {
            extents_overlap(coordinates, dimensions, &parcel.coordinates, &parcel.dimensions)
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParcelRecord> {
        self.parcels.values()
    }

    pub fn all(&self) -> Vec<ParcelRecord> {
        self.parcels.values().cloned().collect()
    }

    pub fn by_owner(&self, owner: &Principal) -> Vec<ParcelRecord> {
        let Some(owned) = self.owners.get(owner) else {
            return Vec::new();
        };
        owned
            .iter()
            .filter_map(|id| self.parcels.get(id).cloned())
            .collect()
    }

    pub fn owned_count(&self, owner: &Principal) -> u64 {
        self.owners
            .get(owner)
            .map(|owned| owned.len() as u64)
            .unwrap_or(0)
    }

    pub fn owner_count(&self) -> u64 {
        self.owners.len() as u64
    }

    pub fn len(&self) -> u64 {
        self.parcels.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.parcels.is_empty()
    }

    /// Sum of x/y plan areas across every parcel.
    pub fn total_plan_area(&self) -> u64 {
        self.parcels
            .values()
            .map(|parcel| parcel.dimensions.plan_area() as u64)
            .sum()
    }
}

impl Default for ParcelStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Half-open 3-D extent intersection; touching faces do not overlap.
pub fn extents_overlap(
    coords_a: &Coordinates,
    dims_a: &Dimensions,
    coords_b: &Coordinates,
    dims_b: &Dimensions,
) -> bool {
    let axis = |a_min: i32, a_len: u32, b_min: i32, b_len: u32| {
        let a_max = a_min as i64 + a_len as i64;
        let b_max = b_min as i64 + b_len as i64;
        (a_min as i64) < b_max && (b_min as i64) < a_max
    };
    axis(coords_a.x, dims_a.width, coords_b.x, dims_b.width)
        && axis(coords_a.y, dims_a.height, coords_b.y, dims_b.height)
        && axis(coords_a.z, dims_a.depth, coords_b.z, dims_b.depth)
}

#[cfg(test)]
mod tests {
    use super::*;
    use registry_types::LandType;

    fn parcel(id: LandId, owner: &str, x: i32) -> ParcelRecord {
        ParcelRecord {
            id,
            owner: Principal::from(owner),
            coordinates: Coordinates::new(x, 0, 0),
            dimensions: Dimensions::new(10, 10, 5),
            land_type: LandType::Residential,
            description: "plot".to_string(),
            metadata: None,
            created_at: 1,
            last_updated: 1,
        }
    }

    #[test]
    fn ids_start_at_one_and_never_repeat() {
        let mut store = ParcelStore::new();
        assert_eq!(store.allocate_id(), 1);
        assert_eq!(store.allocate_id(), 2);
        store.insert(parcel(2, "alice", 0));
        store.remove(2);
        assert_eq!(store.allocate_id(), 3);
    }

    #[test]
    fn remove_clears_both_indexes() {
        let mut store = ParcelStore::new();
        let id = store.allocate_id();
        store.insert(parcel(id, "alice", 5));
        assert!(store.point_occupied(&Coordinates::new(5, 0, 0)));
        assert_eq!(store.owned_count(&Principal::from("alice")), 1);

        store.remove(id);
        assert!(!store.point_occupied(&Coordinates::new(5, 0, 0)));
        assert_eq!(store.owned_count(&Principal::from("alice")), 0);
        assert_eq!(store.owner_count(), 0);
    }

    #[test]
    fn set_owner_moves_ownership_index() {
        let mut store = ParcelStore::new();
        let id = store.allocate_id();
        store.insert(parcel(id, "alice", 0));
        store.set_owner(id, Principal::from("bob"), 9);

        assert_eq!(store.get(id).unwrap().owner, Principal::from("bob"));
        assert_eq!(store.get(id).unwrap().last_updated, 9);
        assert!(store.by_owner(&Principal::from("alice")).is_empty());
        assert_eq!(store.by_owner(&Principal::from("bob")).len(), 1);
    }

    #[test]
    fn from_parcels_advances_allocator_past_max_id() {
        let store = ParcelStore::from_parcels(vec![parcel(7, "alice", 0)], FIRST_LAND_ID);
        assert_eq!(store.next_id(), 8);

        let empty = ParcelStore::from_parcels(Vec::new(), 42);
        assert_eq!(empty.next_id(), 42);
    }

    #[test]
    fn iteration_is_in_id_order() {
        let mut store = ParcelStore::new();
        for x in 0..4 {
            let id = store.allocate_id();
            store.insert(parcel(id, "alice", x * 100));
        }
        let ids: Vec<LandId> = store.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn extent_overlap_is_half_open() {
        let a = Coordinates::new(0, 0, 0);
        let dims = Dimensions::new(10, 10, 5);
        // Touching faces do not overlap.
        assert!(!extents_overlap(&a, &dims, &Coordinates::new(10, 0, 0), &dims));
        assert!(extents_overlap(&a, &dims, &Coordinates::new(9, 9, 4), &dims));
        assert!(!extents_overlap(&a, &dims, &Coordinates::new(0, 0, 5), &dims));
    }
}

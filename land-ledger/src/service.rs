use log::{error, info, warn};
use parking_lot::RwLock;
use time::OffsetDateTime;

use registry_types::{
    LandId, LandMetadata, LandRegistration, LandRegistryError, LandStatistics, LandType,
    MarketplaceListing, ParcelRecord, Price, Principal, RegistryResult, SearchFilters, Timestamp,
    TransactionRecord, TransactionType,
};

use crate::{
    config::LedgerConfig,
    search,
    state::LedgerState,
    storage::{LedgerSnapshot, StorageError},
};

/// Single-writer land ledger service.
///
/// Every mutation checks authorization first, then validates input, then
/// commits atomically across the parcel table, listing board, and
/// transaction log under one write guard. Queries clone a point-in-time
/// view out of the read guard and never mutate.
///
/// The JSON snapshot is rewritten after each committed mutation. A failed
/// write is logged and the call still succeeds: in-memory state is the
/// source of truth for the process lifetime, the snapshot is the restart
/// story.
pub struct LandLedger {
    config: LedgerConfig,
    state: RwLock<LedgerState>,
}

impl LandLedger {
    pub fn bootstrap(config: LedgerConfig) -> Result<Self, StorageError> {
        config.ensure_dirs()?;
        let snapshot = LedgerSnapshot::load_or_init(&config.snapshot_path())?;
        let state = LedgerState::from_snapshot(snapshot, &config.bootstrap_admin);
        info!(
            "land ledger ready: {} parcels, {} listings, {} transactions, next id {}",
            state.parcels.len(),
            state.marketplace.len(),
            state.transactions.len(),
            state.parcels.next_id()
        );
        Ok(Self {
            config,
            state: RwLock::new(state),
        })
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    fn commit(&self, state: &LedgerState) {
        if let Err(err) = state.to_snapshot().persist(&self.config.snapshot_path()) {
            error!("failed to persist ledger snapshot: {err}");
        }
    }

    // --- registry mutations ---

    pub fn register_land(
        &self,
        caller: &Principal,
        registration: LandRegistration,
    ) -> RegistryResult<LandId> {
        let mut state = self.state.write();

        if !registration.coordinates.in_world_bounds() {
            return Err(LandRegistryError::InvalidCoordinates);
        }
        if !registration.dimensions.in_build_limits() {
            return Err(LandRegistryError::InvalidDimensions);
        }
        if registration.description.trim().is_empty() {
            return Err(LandRegistryError::InvalidInput);
        }
        if state.parcels.point_occupied(&registration.coordinates) {
            return Err(LandRegistryError::InvalidCoordinates);
        }
        if state
            .parcels
            .overlaps_existing(&registration.coordinates, &registration.dimensions)
        {
            return Err(LandRegistryError::LandAlreadyExists);
        }

        let now = now_ns();
        let id = state.parcels.allocate_id();
        state.parcels.insert(ParcelRecord {
            id,
            owner: caller.clone(),
            coordinates: registration.coordinates,
            dimensions: registration.dimensions,
            land_type: registration.land_type,
            description: registration.description,
            metadata: registration.metadata,
            created_at: now,
            last_updated: now,
        });
        state.transactions.append(TransactionRecord {
            land_id: id,
            from: Principal::anonymous(),
            to: caller.clone(),
            price: None,
            transaction_type: TransactionType::Registration,
            timestamp: now,
        });

        info!("registered parcel {id} to {caller}");
        self.commit(&state);
        Ok(id)
    }

    pub fn transfer_land(
        &self,
        caller: &Principal,
        id: LandId,
        new_owner: Principal,
    ) -> RegistryResult<()> {
        let mut state = self.state.write();

        let owner = state
            .parcels
            .get(id)
            .map(|parcel| parcel.owner.clone())
            .ok_or(LandRegistryError::LandNotFound)?;
        if &owner != caller {
            return Err(LandRegistryError::Unauthorized);
        }
        if &new_owner == caller {
            return Err(LandRegistryError::InvalidInput);
        }

        let now = now_ns();
        state.marketplace.remove(id);
        state.parcels.set_owner(id, new_owner.clone(), now);
        state.transactions.append(TransactionRecord {
            land_id: id,
            from: owner,
            to: new_owner.clone(),
            price: None,
            transaction_type: TransactionType::Transfer,
            timestamp: now,
        });

        info!("parcel {id} transferred from {caller} to {new_owner}");
        self.commit(&state);
        Ok(())
    }

    pub fn update_land_metadata(
        &self,
        caller: &Principal,
        id: LandId,
        metadata: LandMetadata,
    ) -> RegistryResult<()> {
        let mut state = self.state.write();

        let parcel = state.parcels.get(id).ok_or(LandRegistryError::LandNotFound)?;
        if &parcel.owner != caller {
            return Err(LandRegistryError::Unauthorized);
        }

        state.parcels.set_metadata(id, metadata, now_ns());
        self.commit(&state);
        Ok(())
    }

    pub fn remove_land(&self, caller: &Principal, id: LandId) -> RegistryResult<()> {
        let mut state = self.state.write();

        if !state.admins.contains(caller) {
            return Err(LandRegistryError::Unauthorized);
        }
        if state.parcels.remove(id).is_none() {
            return Err(LandRegistryError::LandNotFound);
        }
        state.marketplace.remove(id);

        warn!("parcel {id} removed by admin {caller}");
        self.commit(&state);
        Ok(())
    }

    // --- marketplace mutations ---

    pub fn list_for_sale(&self, caller: &Principal, id: LandId, price: Price) -> RegistryResult<()> {
        let mut state = self.state.write();

        let parcel = state.parcels.get(id).ok_or(LandRegistryError::LandNotFound)?;
        if &parcel.owner != caller {
            return Err(LandRegistryError::Unauthorized);
        }
        if price == 0 {
            return Err(LandRegistryError::InvalidInput);
        }

        state.marketplace.put(MarketplaceListing {
            land_id: id,
            seller: caller.clone(),
            price,
            listed_at: now_ns(),
        });

        info!("parcel {id} listed by {caller} for {price}");
        self.commit(&state);
        Ok(())
    }

    pub fn remove_from_sale(&self, caller: &Principal, id: LandId) -> RegistryResult<()> {
        let mut state = self.state.write();

        let listing = state
            .marketplace
            .get(id)
            .ok_or(LandRegistryError::LandNotForSale)?;
        if &listing.seller != caller {
            return Err(LandRegistryError::Unauthorized);
        }

        state.marketplace.remove(id);
        self.commit(&state);
        Ok(())
    }

    pub fn buy_land(&self, caller: &Principal, id: LandId) -> RegistryResult<()> {
        let mut state = self.state.write();

        let listing = state
            .marketplace
            .get(id)
            .cloned()
            .ok_or(LandRegistryError::LandNotForSale)?;
        if &listing.seller == caller {
            return Err(LandRegistryError::OwnershipError);
        }

        let now = now_ns();
        state.parcels.set_owner(id, caller.clone(), now);
        state.marketplace.remove(id);
        state.transactions.append(TransactionRecord {
            land_id: id,
            from: listing.seller.clone(),
            to: caller.clone(),
            price: Some(listing.price),
            transaction_type: TransactionType::Sale,
            timestamp: now,
        });

        info!(
            "parcel {id} sold by {} to {caller} for {}",
            listing.seller, listing.price
        );
        self.commit(&state);
        Ok(())
    }

    // --- admin mutations ---

    pub fn add_admin(&self, caller: &Principal, new_admin: Principal) -> RegistryResult<()> {
        let mut state = self.state.write();

        if !state.admins.contains(caller) {
            return Err(LandRegistryError::Unauthorized);
        }
        if state.admins.insert(new_admin.clone()) {
            info!("admin {new_admin} added by {caller}");
            self.commit(&state);
        }
        Ok(())
    }

    pub fn restore_lands(
        &self,
        caller: &Principal,
        parcels: Vec<ParcelRecord>,
    ) -> RegistryResult<()> {
        let mut state = self.state.write();

        if !state.admins.contains(caller) {
            return Err(LandRegistryError::Unauthorized);
        }

        let restored = parcels.len();
        // The allocator never moves backwards, even for an older backup.
        let min_next_id = state.parcels.next_id();
        state.parcels = crate::parcels::ParcelStore::from_parcels(parcels, min_next_id);
        state.repair_listings();

        warn!("{caller} restored {restored} parcels; next id {}", state.parcels.next_id());
        self.commit(&state);
        Ok(())
    }

    // --- registry queries ---

    pub fn get_land(&self, id: LandId) -> Option<ParcelRecord> {
        self.state.read().parcels.get(id).cloned()
    }

    pub fn get_all_lands(&self) -> Vec<ParcelRecord> {
        self.state.read().parcels.all()
    }

    pub fn get_land_owner(&self, id: LandId) -> Option<Principal> {
        self.state
            .read()
            .parcels
            .get(id)
            .map(|parcel| parcel.owner.clone())
    }

    pub fn get_lands_by_owner(&self, owner: &Principal) -> Vec<ParcelRecord> {
        self.state.read().parcels.by_owner(owner)
    }

    pub fn get_lands_by_type(&self, land_type: LandType) -> Vec<ParcelRecord> {
        self.state
            .read()
            .parcels
            .iter()
            .filter(|parcel| parcel.land_type == land_type)
            .cloned()
            .collect()
    }

    pub fn get_land_count_by_owner(&self, owner: &Principal) -> u64 {
        self.state.read().parcels.owned_count(owner)
    }

    pub fn verify_land_ownership(&self, id: LandId, claimed_owner: &Principal) -> bool {
        self.state
            .read()
            .parcels
            .get(id)
            .map(|parcel| &parcel.owner == claimed_owner)
            .unwrap_or(false)
    }

    pub fn get_total_supply(&self) -> u64 {
        self.state.read().parcels.len()
    }

    pub fn get_next_land_id(&self) -> LandId {
        self.state.read().parcels.next_id()
    }

    pub fn total_land_area(&self) -> u64 {
        self.state.read().parcels.total_plan_area()
    }

    // --- marketplace queries ---

    pub fn get_marketplace_listing(&self, id: LandId) -> Option<MarketplaceListing> {
        self.state.read().marketplace.get(id).cloned()
    }

    pub fn get_marketplace_listings(&self) -> Vec<MarketplaceListing> {
        self.state.read().marketplace.all()
    }

    pub fn get_lands_for_sale_by_type(&self, land_type: LandType) -> Vec<MarketplaceListing> {
        let state = self.state.read();
        state
            .marketplace
            .iter()
            .filter(|listing| {
                state
                    .parcels
                    .get(listing.land_id)
                    .is_some_and(|parcel| parcel.land_type == land_type)
            })
            .cloned()
            .collect()
    }

    // --- search queries ---

    pub fn search_lands(&self, filters: &SearchFilters) -> Vec<ParcelRecord> {
        let state = self.state.read();
        state
            .parcels
            .iter()
            .filter(|parcel| {
                let listing_price = state.marketplace.get(parcel.id).map(|l| l.price);
                search::matches_filters(parcel, listing_price, filters)
            })
            .cloned()
            .collect()
    }

    pub fn search_marketplace(&self, filters: &SearchFilters) -> Vec<MarketplaceListing> {
        let state = self.state.read();
        state
            .marketplace
            .iter()
            .filter(|listing| {
                state
                    .parcels
                    .get(listing.land_id)
                    .is_some_and(|parcel| {
                        search::matches_filters(parcel, Some(listing.price), filters)
                    })
            })
            .cloned()
            .collect()
    }

    pub fn search_by_coordinates(
        &self,
        corner1: &registry_types::Coordinates,
        corner2: &registry_types::Coordinates,
    ) -> Vec<ParcelRecord> {
        self.state
            .read()
            .parcels
            .iter()
            .filter(|parcel| search::within_box(&parcel.coordinates, corner1, corner2))
            .cloned()
            .collect()
    }

    /// Per-axis distance in the x/y plane; z is ignored.
    pub fn get_lands_near_coordinates(
        &self,
        center: &registry_types::Coordinates,
        radius: u32,
    ) -> Vec<ParcelRecord> {
        self.state
            .read()
            .parcels
            .iter()
            .filter(|parcel| search::within_radius(&parcel.coordinates, center, radius))
            .cloned()
            .collect()
    }

    pub fn get_land_statistics(&self) -> LandStatistics {
        let state = self.state.read();
        LandStatistics {
            total_lands: state.parcels.len(),
            total_owners: state.parcels.owner_count(),
            lands_for_sale: state.marketplace.len(),
            average_price: state.marketplace.average_price(),
            total_transactions: state.transactions.len(),
        }
    }

    // --- ledger queries ---

    pub fn get_transaction_history(&self, land_id: Option<LandId>) -> Vec<TransactionRecord> {
        let state = self.state.read();
        match land_id {
            Some(id) => state.transactions.for_land(id),
            None => state.transactions.all(),
        }
    }

    pub fn get_user_transactions(&self, user: &Principal) -> Vec<TransactionRecord> {
        self.state.read().transactions.for_user(user)
    }

    pub fn get_recent_transactions(&self, limit: u64) -> Vec<TransactionRecord> {
        self.state.read().transactions.recent(limit)
    }

    pub fn get_price_history(&self, land_id: LandId) -> Vec<(Timestamp, Price)> {
        self.state.read().transactions.price_history(land_id)
    }

    // --- access control ---

    pub fn is_admin(&self, principal: &Principal) -> bool {
        self.state.read().admins.contains(principal)
    }

    pub fn backup_lands(&self, caller: &Principal) -> RegistryResult<Vec<ParcelRecord>> {
        let state = self.state.read();
        if !state.admins.contains(caller) {
            return Err(LandRegistryError::Unauthorized);
        }
        Ok(state.parcels.all())
    }
}

fn now_ns() -> Timestamp {
    OffsetDateTime::now_utc().unix_timestamp_nanos().max(0) as Timestamp
}

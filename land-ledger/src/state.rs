use registry_types::Principal;

use crate::{
    access::AdminRoster, marketplace::ListingBoard, parcels::ParcelStore,
    storage::LedgerSnapshot, transactions::TransactionLog,
};

/// Every table the service owns. Mutated only under the service write lock
/// so cross-table updates are atomic.
#[derive(Clone, Debug)]
pub struct LedgerState {
    pub parcels: ParcelStore,
    pub marketplace: ListingBoard,
    pub transactions: TransactionLog,
    pub admins: AdminRoster,
}

impl LedgerState {
    pub fn from_snapshot(snapshot: LedgerSnapshot, bootstrap_admin: &Principal) -> Self {
        let mut state = Self {
            parcels: ParcelStore::from_parcels(snapshot.parcels, snapshot.next_land_id),
            marketplace: ListingBoard::from_listings(snapshot.listings),
            transactions: TransactionLog::from_records(snapshot.transactions),
            admins: AdminRoster::from_admins(snapshot.admins),
        };
        if state.admins.is_empty() {
            state.admins.insert(bootstrap_admin.clone());
        }
        state.repair_listings();
        state
    }

    pub fn to_snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            parcels: self.parcels.all(),
            listings: self.marketplace.all(),
            transactions: self.transactions.all(),
            admins: self.admins.all(),
            next_land_id: self.parcels.next_id(),
        }
    }

    /// Drops listings whose parcel is gone or whose seller no longer owns
    /// the parcel. A listing exists iff its parcel is genuinely for sale.
    pub fn repair_listings(&mut self) {
        let Self {
            parcels,
            marketplace,
            ..
        } = self;
        marketplace.retain(|listing| {
            parcels
                .get(listing.land_id)
                .is_some_and(|parcel| parcel.owner == listing.seller)
        });
    }
}

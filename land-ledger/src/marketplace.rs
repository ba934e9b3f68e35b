use std::collections::BTreeMap;

use registry_types::{LandId, MarketplaceListing, Price};

/// Listing table keyed by land id.
///
/// A listing exists iff the parcel is currently for sale; callers clear
/// entries on transfer, purchase, and removal to keep that invariant.
#[derive(Clone, Debug, Default)]
pub struct ListingBoard {
    listings: BTreeMap<LandId, MarketplaceListing>,
}

impl ListingBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_listings(listings: Vec<MarketplaceListing>) -> Self {
        Self {
            listings: listings
                .into_iter()
                .map(|listing| (listing.land_id, listing))
                .collect(),
        }
    }

    /// Creates or replaces the listing for its land id.
    pub fn put(&mut self, listing: MarketplaceListing) {
        self.listings.insert(listing.land_id, listing);
    }

    pub fn remove(&mut self, land_id: LandId) -> Option<MarketplaceListing> {
        self.listings.remove(&land_id)
    }

    pub fn get(&self, land_id: LandId) -> Option<&MarketplaceListing> {
        self.listings.get(&land_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MarketplaceListing> {
        self.listings.values()
    }

    pub fn all(&self) -> Vec<MarketplaceListing> {
        self.listings.values().cloned().collect()
    }

    pub fn retain(&mut self, mut keep: impl FnMut(&MarketplaceListing) -> bool) {
        self.listings.retain(|_, listing| keep(listing));
    }

    pub fn len(&self) -> u64 {
        self.listings.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    /// Integer mean over active listings; absent when nothing is listed.
    pub fn average_price(&self) -> Option<Price> {
        if self.listings.is_empty() {
            return None;
        }
        let total: Price = self.listings.values().map(|listing| listing.price).sum();
        Some(total / self.listings.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use registry_types::Principal;

    fn listing(land_id: LandId, price: Price) -> MarketplaceListing {
        MarketplaceListing {
            land_id,
            seller: Principal::from("alice"),
            price,
            listed_at: 1,
        }
    }

    #[test]
    fn put_replaces_existing_listing() {
        let mut board = ListingBoard::new();
        board.put(listing(1, 100));
        board.put(listing(1, 250));
        assert_eq!(board.len(), 1);
        assert_eq!(board.get(1).unwrap().price, 250);
    }

    #[test]
    fn average_price_is_integer_mean() {
        let mut board = ListingBoard::new();
        assert_eq!(board.average_price(), None);
        board.put(listing(1, 100));
        board.put(listing(2, 201));
        assert_eq!(board.average_price(), Some(150));
    }

    #[test]
    fn retain_prunes_listings() {
        let mut board = ListingBoard::new();
        board.put(listing(1, 100));
        board.put(listing(2, 200));
        board.retain(|l| l.land_id != 1);
        assert!(board.get(1).is_none());
        assert_eq!(board.len(), 1);
    }
}

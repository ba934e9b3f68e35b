//! Shared data model for the land ledger workspace.
//!
//! The crate exposes:
//! - [`Principal`]: opaque authenticated caller identity.
//! - Parcel, listing, and transaction record types.
//! - [`LandRegistryError`]: the closed error set surfaced to callers.
//! - [`SearchFilters`]: optional, ANDed search parameters.

pub mod error;
pub mod filters;
pub mod principal;
pub mod types;

pub use error::{LandRegistryError, RegistryResult};
pub use filters::SearchFilters;
pub use principal::Principal;
pub use types::{
    Coordinates, Dimensions, LandId, LandMetadata, LandRegistration, LandStatistics, LandType,
    MarketplaceListing, ParcelRecord, Price, Timestamp, TransactionRecord, TransactionType,
};

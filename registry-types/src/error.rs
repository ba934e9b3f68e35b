use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type RegistryResult<T> = std::result::Result<T, LandRegistryError>;

/// Closed error set surfaced to callers.
///
/// Variants carry no payload so callers can branch on the tag alone.
/// `InsufficientFunds` is reserved for the caller's external settlement
/// step and is never produced by the ledger itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum LandRegistryError {
    #[error("coordinates out of world bounds or already occupied")]
    InvalidCoordinates,
    #[error("dimensions outside build limits")]
    InvalidDimensions,
    #[error("invalid input")]
    InvalidInput,
    #[error("insufficient funds")]
    InsufficientFunds,
    #[error("land not found")]
    LandNotFound,
    #[error("land already registered over an overlapping extent")]
    LandAlreadyExists,
    #[error("land is not for sale")]
    LandNotForSale,
    #[error("ownership rules forbid this operation")]
    OwnershipError,
    #[error("caller is not authorized")]
    Unauthorized,
}

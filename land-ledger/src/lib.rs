//! Land ledger service: parcel registry, marketplace, and transaction log.
//!
//! The crate exposes:
//! - [`LandLedger`]: high-level API owning all state; mutations serialize on
//!   a single write lock and commit atomically across every table.
//! - [`ParcelStore`] / [`ListingBoard`] / [`TransactionLog`] / [`AdminRoster`]:
//!   the individual tables, kept in lockstep by the service.
//! - [`LedgerSnapshot`]: full-state JSON snapshot for restart durability.

pub mod access;
pub mod config;
pub mod marketplace;
pub mod parcels;
pub mod search;
pub mod service;
pub mod state;
pub mod storage;
pub mod transactions;

pub use access::AdminRoster;
pub use config::LedgerConfig;
pub use marketplace::ListingBoard;
pub use parcels::ParcelStore;
pub use service::LandLedger;
pub use state::LedgerState;
pub use storage::{LedgerSnapshot, StorageError};
pub use transactions::TransactionLog;

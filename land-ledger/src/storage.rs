use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use registry_types::{LandId, MarketplaceListing, ParcelRecord, Principal, TransactionRecord};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("ledger snapshot at {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Full-state snapshot written after every committed mutation.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub parcels: Vec<ParcelRecord>,
    pub listings: Vec<MarketplaceListing>,
    pub transactions: Vec<TransactionRecord>,
    pub admins: Vec<Principal>,
    pub next_land_id: LandId,
}

impl LedgerSnapshot {
    /// Missing or empty files start a fresh ledger; a corrupt file is a
    /// hard error rather than silent data loss.
    pub fn load_or_init(path: &Path) -> Result<Self, StorageError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let bytes = fs::read(path)?;
        if bytes.is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_slice(&bytes).map_err(|source| StorageError::Corrupt {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn persist(&self, path: &Path) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec_pretty(self).expect("serialize ledger snapshot");
        fs::write(path, bytes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use registry_types::{Coordinates, Dimensions, LandType};
    use tempfile::tempdir;

    #[test]
    fn missing_file_starts_fresh() {
        let dir = tempdir().unwrap();
        let snapshot = LedgerSnapshot::load_or_init(&dir.path().join("none.json")).unwrap();
        assert!(snapshot.parcels.is_empty());
        assert_eq!(snapshot.next_land_id, 0);
    }

    #[test]
    fn snapshot_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ledger-snapshot.json");
        let snapshot = LedgerSnapshot {
            parcels: vec![ParcelRecord {
                id: 1,
                owner: Principal::from("alice"),
                coordinates: Coordinates::new(1, 2, 3),
                dimensions: Dimensions::new(10, 10, 5),
                land_type: LandType::Residential,
                description: "plot".to_string(),
                metadata: None,
                created_at: 7,
                last_updated: 7,
            }],
            listings: Vec::new(),
            transactions: Vec::new(),
            admins: vec![Principal::from("registrar")],
            next_land_id: 2,
        };
        snapshot.persist(&path).unwrap();

        let loaded = LedgerSnapshot::load_or_init(&path).unwrap();
        assert_eq!(loaded.parcels, snapshot.parcels);
        assert_eq!(loaded.admins, snapshot.admins);
        assert_eq!(loaded.next_land_id, 2);
    }

    #[test]
    fn corrupt_snapshot_is_a_hard_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ledger-snapshot.json");
        fs::write(&path, b"{not json").unwrap();
        let err = LedgerSnapshot::load_or_init(&path).unwrap_err();
        assert!(matches!(err, StorageError::Corrupt { .. }));
    }
}

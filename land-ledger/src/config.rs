use std::{
    fs, io,
    path::{Path, PathBuf},
};

use registry_types::Principal;

pub const DEFAULT_STATE_DIR: &str = "land.state";
pub const DEFAULT_BOOTSTRAP_ADMIN: &str = "registrar";

const SNAPSHOT_FILE: &str = "ledger-snapshot.json";

#[derive(Clone, Debug)]
pub struct LedgerConfig {
    pub state_dir: PathBuf,
    /// Seeded into the admin roster when the loaded roster is empty.
    pub bootstrap_admin: Principal,
}

impl LedgerConfig {
    pub fn new(state_dir: PathBuf, bootstrap_admin: Principal) -> Self {
        Self {
            state_dir,
            bootstrap_admin,
        }
    }

    pub fn state_dir(&self) -> &Path {
        &self.state_dir
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.state_dir.join(SNAPSHOT_FILE)
    }

    pub fn ensure_dirs(&self) -> io::Result<()> {
        if !self.state_dir.exists() {
            fs::create_dir_all(&self.state_dir)?;
        }
        Ok(())
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self::new(
            PathBuf::from(DEFAULT_STATE_DIR),
            Principal::from(DEFAULT_BOOTSTRAP_ADMIN),
        )
    }
}

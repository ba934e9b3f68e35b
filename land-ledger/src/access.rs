use std::collections::BTreeSet;

use registry_types::Principal;

/// Grow-only set of principals allowed to call privileged operations.
#[derive(Clone, Debug, Default)]
pub struct AdminRoster {
    admins: BTreeSet<Principal>,
}

impl AdminRoster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_admins(admins: Vec<Principal>) -> Self {
        Self {
            admins: admins.into_iter().collect(),
        }
    }

    pub fn contains(&self, principal: &Principal) -> bool {
        self.admins.contains(principal)
    }

    /// Idempotent; returns false when the principal was already present.
    pub fn insert(&mut self, principal: Principal) -> bool {
        self.admins.insert(principal)
    }

    pub fn all(&self) -> Vec<Principal> {
        self.admins.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.admins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.admins.is_empty()
    }
}

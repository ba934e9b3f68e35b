use std::fmt;

use serde::{Deserialize, Serialize};

const ANONYMOUS: &str = "anonymous";

/// Opaque authenticated caller identity handed in by the transport layer.
///
/// The ledger never authenticates principals; it only compares them.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Principal(String);

impl Principal {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Sentinel identity used as the `from` side of registration records.
    pub fn anonymous() -> Self {
        Self(ANONYMOUS.to_string())
    }

    pub fn is_anonymous(&self) -> bool {
        self.0 == ANONYMOUS
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Principal {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_is_recognized() {
        assert!(Principal::anonymous().is_anonymous());
        assert!(!Principal::from("alice").is_anonymous());
    }

    #[test]
    fn serializes_transparently() {
        let json = serde_json::to_string(&Principal::from("alice")).unwrap();
        assert_eq!(json, "\"alice\"");
    }
}

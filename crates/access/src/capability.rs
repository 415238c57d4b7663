use serde::{Deserialize, Serialize};
use std::collections::{HashSet, hash_set};

/// A single grantable permission, identified by an opaque token.
///
/// Tokens are not validated against a registry — `"role:edit"` and a typo'd
/// `"roel:edit"` are both legal values. Validation, if any, belongs to
/// whoever resolves the granted set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Capability(String);

impl Capability {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Capability {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

impl From<String> for Capability {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The complete set of capabilities held by a user.
///
/// Membership is order-independent and duplicate-insensitive. Deserializes
/// from the JSON array the session bootstrap response carries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapabilitySet {
    caps: HashSet<Capability>,
}

impl CapabilitySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a capability. Granting twice is a no-op.
    pub fn grant(&mut self, cap: impl Into<Capability>) {
        self.caps.insert(cap.into());
    }

    /// Remove a capability if present.
    pub fn revoke(&mut self, cap: &Capability) {
        self.caps.remove(cap);
    }

    pub fn contains(&self, cap: &Capability) -> bool {
        self.caps.contains(cap)
    }

    pub fn is_empty(&self) -> bool {
        self.caps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.caps.len()
    }

    pub fn iter(&self) -> hash_set::Iter<'_, Capability> {
        self.caps.iter()
    }
}

impl<C: Into<Capability>> FromIterator<C> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = C>>(iter: I) -> Self {
        Self {
            caps: iter.into_iter().map(Into::into).collect(),
        }
    }
}

//! User session context.

use crate::{CapabilitySet, Gate};

/// Holds the granted capability set for the current user, if any.
///
/// The set is resolved elsewhere (login response, permission refresh) and
/// attached here wholesale; this type never fetches or mutates permissions
/// itself. Before authentication resolves there is no set, and every gate
/// denies.
#[derive(Debug, Clone, Default)]
pub struct Session {
    capabilities: Option<CapabilitySet>,
}

impl Session {
    /// An unauthenticated session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the capability set resolved at login.
    pub fn authenticate(&mut self, capabilities: CapabilitySet) {
        self.capabilities = Some(capabilities);
    }

    /// Replace the capability set after a permission refresh.
    pub fn refresh(&mut self, capabilities: CapabilitySet) {
        self.capabilities = Some(capabilities);
    }

    /// Drop the capability set on logout.
    pub fn clear(&mut self) {
        self.capabilities = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.capabilities.is_some()
    }

    /// The current granted set, or `None` before authentication resolves.
    pub fn capabilities(&self) -> Option<&CapabilitySet> {
        self.capabilities.as_ref()
    }

    /// Whether this session opens the given gate.
    pub fn permits(&self, gate: &Gate) -> bool {
        gate.permits(self.capabilities())
    }
}

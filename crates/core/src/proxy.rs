//! Proxies — named relays from a listen address to an upstream address.

use crate::toxic::{Toxic, Toxics};
use std::collections::BTreeMap;

/// A proxy as reported by the service.
#[derive(Debug, Clone, PartialEq)]
pub struct Proxy {
    /// Unique among all proxies known to the service.
    pub name: String,
    pub listen: String,
    pub upstream: String,
    /// A disabled proxy accepts connections but does not forward them.
    pub enabled: bool,
    pub toxics: Toxics,
}

/// Proxies keyed by name.
pub type Proxies = BTreeMap<String, Proxy>;

impl Proxy {
    pub fn new(name: impl Into<String>, listen: impl Into<String>, upstream: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            listen: listen.into(),
            upstream: upstream.into(),
            enabled: true,
            toxics: Toxics::new(),
        }
    }

    /// Look up an active toxic by name.
    pub fn toxic(&self, name: &str) -> Option<&Toxic> {
        self.toxics.get(name)
    }

    /// Flip the enabled flag locally and return the new value.
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.enabled
    }
}

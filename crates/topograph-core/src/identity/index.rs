//! Deduplication index from natural keys to entity handles

use std::collections::HashMap;

use tracing::debug;

use super::NaturalKey;

/// Outcome of resolving a record's keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<H> {
    /// An entity was already indexed under one of the keys
    Existing(H),
    /// No key was known; a new entity was registered
    Created(H),
}

impl<H> Resolution<H> {
    #[must_use]
    pub fn handle(&self) -> &H {
        match self {
            Self::Existing(h) | Self::Created(h) => h,
        }
    }

    #[must_use]
    pub fn into_handle(self) -> H {
        match self {
            Self::Existing(h) | Self::Created(h) => h,
        }
    }

    #[must_use]
    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}

/// Maps natural keys to the handle of the one entity they identify
#[derive(Debug, Clone)]
pub struct IdentityIndex<H> {
    entries: HashMap<NaturalKey, H>,
}

impl<H> Default for IdentityIndex<H> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<H: Clone + PartialEq + std::fmt::Debug> IdentityIndex<H> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn resolve(&self, key: &NaturalKey) -> Option<&H> {
        self.entries.get(key)
    }

    /// First handle found under any of the keys, in the order given
    #[must_use]
    pub fn resolve_any(&self, keys: &[NaturalKey]) -> Option<&H> {
        keys.iter().find_map(|key| self.entries.get(key))
    }

    /// Resolve the entity the keys identify, or register a new one
    ///
    /// Every key not yet indexed is bound to the resolved handle, so a later
    /// record carrying only a secondary key finds the same entity. A key
    /// already bound to a different handle keeps its first binding.
    /// Returns `None` when `keys` is empty.
    pub fn resolve_or_register(
        &mut self,
        keys: &[NaturalKey],
        create: impl FnOnce() -> H,
    ) -> Option<Resolution<H>> {
        if keys.is_empty() {
            return None;
        }

        let resolution = match self.resolve_any(keys) {
            Some(handle) => Resolution::Existing(handle.clone()),
            None => Resolution::Created(create()),
        };

        for key in keys {
            match self.entries.get(key) {
                Some(bound) if bound != resolution.handle() => {
                    debug!(
                        "Key {} stays bound to {:?}, not {:?}",
                        key,
                        bound,
                        resolution.handle()
                    );
                }
                Some(_) => {}
                None => {
                    self.entries
                        .insert(key.clone(), resolution.handle().clone());
                }
            }
        }

        Some(resolution)
    }

    /// Number of keys indexed (not entities)
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

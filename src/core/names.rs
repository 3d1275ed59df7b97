//! Zone name interning.
//!
//! Each distinct zone name is registered once and gets a small sequential
//! id. Call sites are expected to cache their [`ZoneId`], so the lock here is
//! only taken during warm-up and by readers copying the table.

use std::collections::HashMap;
use std::sync::Arc;

use crate::api::error::ProfilerError;
use crate::sync::mutex::Mutex;

/// Interned zone name.
///
/// Ids are only meaningful for the profiler that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ZoneId(pub(crate) u16);

impl ZoneId {
    /// Index into the name table.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Raw id value.
    #[inline]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for ZoneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "zone#{}", self.0)
    }
}

/// Largest number of distinct names a table can hold.
pub const MAX_ZONE_NAMES: usize = u16::MAX as usize + 1;

#[derive(Default)]
struct Inner {
    names: Vec<Arc<str>>,
    index: HashMap<Arc<str>, ZoneId>,
}

/// Append-only name → id table.
pub struct NameTable {
    inner: Mutex<Inner>,
}

impl NameTable {
    /// Create an empty table.
    pub fn new() -> Self {
        let mut inner = Inner::default();
        inner.names.reserve(64);
        Self {
            inner: Mutex::new(inner),
        }
    }

    /// Intern `name`, failing once every id is taken.
    pub fn try_register(&self, name: &str) -> Result<ZoneId, ProfilerError> {
        let mut inner = self.inner.lock();
        if let Some(&id) = inner.index.get(name) {
            return Ok(id);
        }

        let next = inner.names.len();
        if next >= MAX_ZONE_NAMES {
            return Err(ProfilerError::NameTableFull {
                capacity: MAX_ZONE_NAMES,
            });
        }

        let id = ZoneId(next as u16);
        let shared: Arc<str> = Arc::from(name);
        inner.names.push(Arc::clone(&shared));
        inner.index.insert(shared, id);
        Ok(id)
    }

    /// Copy of the id → name list, indexed by [`ZoneId::index`].
    pub fn names(&self) -> Vec<Arc<str>> {
        self.inner.lock().names.clone()
    }

    /// Look up the name for `id`.
    pub fn name(&self, id: ZoneId) -> Option<Arc<str>> {
        self.inner.lock().names.get(id.index()).cloned()
    }

    /// Number of registered names.
    pub fn len(&self) -> usize {
        self.inner.lock().names.len()
    }

    /// Whether no name has been registered yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for NameTable {
    fn default() -> Self {
        Self::new()
    }
}

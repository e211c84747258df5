// In-memory registry of drafts keyed by identifier.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, RwLock};

use tracing::debug;

use crate::draft::Draft;
use crate::error::DraftError;

type Slot = Arc<Mutex<Draft>>;

/// Owns every draft for the lifetime of the process.
///
/// The map lock is only held long enough to find, add or drop an entry.
/// Each draft sits behind its own mutex, so a read-compute-write on one id
/// (see [`Registry::update`]) is atomic with respect to every other
/// operation on that id while other ids proceed in parallel.
///
/// Identifiers are compared exactly; nothing is case-folded or trimmed.
#[derive(Debug, Default)]
pub struct Registry {
    drafts: RwLock<HashMap<String, Slot>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new draft. Never overwrites: an existing `id` yields
    /// [`DraftError::AlreadyExists`].
    pub fn insert(&self, id: &str, draft: Draft) -> Result<(), DraftError> {
        let mut drafts = self.drafts.write().expect("registry lock poisoned");
        match drafts.entry(id.to_string()) {
            Entry::Occupied(_) => Err(DraftError::AlreadyExists { id: id.to_string() }),
            Entry::Vacant(slot) => {
                slot.insert(Arc::new(Mutex::new(draft)));
                debug!("Registered draft '{id}'");
                Ok(())
            }
        }
    }

    /// Snapshot of the draft stored under `id`.
    pub fn get(&self, id: &str) -> Result<Draft, DraftError> {
        let slot = self.slot(id)?;
        let draft = lock(&slot).clone();
        Ok(draft)
    }

    pub fn has(&self, id: &str) -> bool {
        self.drafts
            .read()
            .expect("registry lock poisoned")
            .contains_key(id)
    }

    /// Overwrite the draft stored under an existing `id`.
    pub fn replace(&self, id: &str, draft: Draft) -> Result<(), DraftError> {
        let slot = self.slot(id)?;
        *lock(&slot) = draft;
        Ok(())
    }

    /// Run `f` against the current draft and store its result, holding the
    /// draft's lock for the whole sequence. When `f` fails the stored draft
    /// is left untouched and the error is returned.
    pub fn update<F>(&self, id: &str, f: F) -> Result<Draft, DraftError>
    where
        F: FnOnce(&Draft) -> Result<Draft, DraftError>,
    {
        let slot = self.slot(id)?;
        let mut current = lock(&slot);
        let next = f(&*current)?;
        *current = next.clone();
        Ok(next)
    }

    /// Drop every draft. Used to reset state between tests.
    pub fn clear(&self) {
        self.drafts.write().expect("registry lock poisoned").clear();
    }

    pub fn len(&self) -> usize {
        self.drafts.read().expect("registry lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slot(&self, id: &str) -> Result<Slot, DraftError> {
        self.drafts
            .read()
            .expect("registry lock poisoned")
            .get(id)
            .cloned()
            .ok_or_else(|| DraftError::NotFound { id: id.to_string() })
    }
}

/// Acquire a draft's lock.
///
/// Panics if the mutex is poisoned. Drafts are only ever replaced with a
/// fully built value, so this should never happen in normal operation.
fn lock(slot: &Slot) -> MutexGuard<'_, Draft> {
    slot.lock().expect("draft mutex poisoned")
}

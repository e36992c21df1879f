//! Item store: the ordered entry collection and its persistence.
//!
//! The free functions [`add`], [`update`] and [`remove`] are pure sequence
//! transforms. [`ItemStore`] is the owning object the front end works with:
//! it applies a transform, persists the result through [`save`] and then
//! notifies subscribers so derived statistics can be recomputed.
use core::fmt;

use crate::{
    EngineError, Entry, EntryDraft, ResultEngine, entry::new_entry_id, storage::Storage,
};

/// Name of the slot holding the JSON array of entries.
pub const ITEMS_SLOT: &str = "budget_items";

/// Reads the persisted entries.
///
/// Never fails: a missing slot yields an empty collection, and unreadable or
/// corrupt content is logged and also yields an empty collection.
pub fn load<S: Storage>(storage: &S) -> Vec<Entry> {
    let raw = match storage.read(ITEMS_SLOT) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            tracing::debug!("no persisted entries found, starting empty");
            return Vec::new();
        }
        Err(err) => {
            tracing::warn!("failed to read persisted entries: {err}");
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<Entry>>(&raw) {
        Ok(entries) => {
            tracing::debug!(count = entries.len(), "loaded entries");
            entries
        }
        Err(err) => {
            tracing::warn!("persisted entries are corrupt, starting empty: {err}");
            Vec::new()
        }
    }
}

/// Serializes and persists the full collection.
pub fn save<S: Storage>(storage: &S, entries: &[Entry]) -> ResultEngine<()> {
    let payload = serde_json::to_string(entries)?;
    storage.write(ITEMS_SLOT, &payload)?;
    tracing::debug!(count = entries.len(), "saved entries");
    Ok(())
}

/// Appends `new_entry`. The caller guarantees its id is unique.
#[must_use]
pub fn add(entries: &[Entry], new_entry: Entry) -> Vec<Entry> {
    let mut next = Vec::with_capacity(entries.len() + 1);
    next.extend_from_slice(entries);
    next.push(new_entry);
    next
}

/// Replaces the entry whose id is `id`, keeping that id. Unknown ids leave
/// the sequence unchanged.
#[must_use]
pub fn update(entries: &[Entry], id: &str, new_entry: Entry) -> Vec<Entry> {
    entries
        .iter()
        .map(|entry| {
            if entry.id == id {
                Entry {
                    id: entry.id.clone(),
                    ..new_entry.clone()
                }
            } else {
                entry.clone()
            }
        })
        .collect()
}

/// Drops the entry whose id is `id`, if any.
#[must_use]
pub fn remove(entries: &[Entry], id: &str) -> Vec<Entry> {
    entries
        .iter()
        .filter(|entry| entry.id != id)
        .cloned()
        .collect()
}

type Observer = Box<dyn FnMut(&[Entry])>;

/// Owns the entry collection and keeps the persisted slot in sync with it.
pub struct ItemStore<S: Storage> {
    storage: S,
    entries: Vec<Entry>,
    observers: Vec<Observer>,
}

impl<S: Storage> ItemStore<S> {
    /// Rehydrates the store from `storage`.
    pub fn open(storage: S) -> Self {
        let entries = load(&storage);
        Self {
            storage,
            entries,
            observers: Vec::new(),
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registers a callback run with the new snapshot after every change.
    pub fn subscribe(&mut self, observer: impl FnMut(&[Entry]) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Validates `draft`, assigns it a fresh id and appends it.
    pub fn create(&mut self, draft: EntryDraft) -> ResultEngine<Entry> {
        let mut id = new_entry_id();
        while self.get(&id).is_some() {
            id = new_entry_id();
        }
        let entry = draft.into_entry(id)?;
        self.insert(entry.clone())?;
        Ok(entry)
    }

    /// Appends an already built entry. Rejects ids already in the store.
    pub fn insert(&mut self, entry: Entry) -> ResultEngine<()> {
        if self.get(&entry.id).is_some() {
            return Err(EngineError::ExistingKey(entry.id));
        }
        tracing::debug!(id = %entry.id, "adding entry");
        let next = add(&self.entries, entry);
        self.commit(next)
    }

    /// Replaces every field of entry `id` with `draft`.
    ///
    /// Returns `Ok(false)` without touching storage when `id` is unknown.
    pub fn update(&mut self, id: &str, draft: EntryDraft) -> ResultEngine<bool> {
        let entry = draft.into_entry(id)?;
        if self.get(id).is_none() {
            tracing::debug!(id, "update of unknown entry ignored");
            return Ok(false);
        }
        tracing::debug!(id, "updating entry");
        let next = update(&self.entries, id, entry);
        self.commit(next)?;
        Ok(true)
    }

    /// Deletes entry `id`. Returns `Ok(false)` when it was not present.
    pub fn remove(&mut self, id: &str) -> ResultEngine<bool> {
        if self.get(id).is_none() {
            tracing::debug!(id, "delete of unknown entry ignored");
            return Ok(false);
        }
        tracing::debug!(id, "removing entry");
        let next = remove(&self.entries, id);
        self.commit(next)?;
        Ok(true)
    }

    /// Persists `next` and only then makes it the current state.
    fn commit(&mut self, next: Vec<Entry>) -> ResultEngine<()> {
        save(&self.storage, &next)?;
        self.entries = next;
        for observer in &mut self.observers {
            observer(&self.entries);
        }
        Ok(())
    }
}

impl<S: Storage + fmt::Debug> fmt::Debug for ItemStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemStore")
            .field("storage", &self.storage)
            .field("entries", &self.entries)
            .field("observers", &self.observers.len())
            .finish()
    }
}

//! Local key-value persistence for the budget state.
//!
//! A slot is a named string value. [`FileStorage`] keeps each slot in
//! `<dir>/<slot>.json`; [`MemoryStorage`] keeps them in a map and is what
//! tests and throwaway sessions use.
use std::{
    cell::RefCell,
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
};

/// Minimal key-value store the item store persists through.
pub trait Storage {
    /// Returns `Ok(None)` when the slot has never been written.
    fn read(&self, slot: &str) -> io::Result<Option<String>>;

    fn write(&self, slot: &str, value: &str) -> io::Result<()>;
}

impl<S: Storage + ?Sized> Storage for &S {
    fn read(&self, slot: &str) -> io::Result<Option<String>> {
        (**self).read(slot)
    }

    fn write(&self, slot: &str, value: &str) -> io::Result<()> {
        (**self).write(slot, value)
    }
}

#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, slot: &str) -> PathBuf {
        self.dir.join(format!("{slot}.json"))
    }
}

impl Storage for FileStorage {
    fn read(&self, slot: &str) -> io::Result<Option<String>> {
        match fs::read_to_string(self.slot_path(slot)) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn write(&self, slot: &str, value: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        // Write then rename so a crash never leaves a half-written slot.
        let path = self.slot_path(slot);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(tmp, path)
    }
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn read(&self, slot: &str) -> io::Result<Option<String>> {
        Ok(self.slots.borrow().get(slot).cloned())
    }

    fn write(&self, slot: &str, value: &str) -> io::Result<()> {
        self.slots
            .borrow_mut()
            .insert(slot.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_storage_reads_back_writes() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.read("slot").unwrap(), None);
        storage.write("slot", "[]").unwrap();
        assert_eq!(storage.read("slot").unwrap().as_deref(), Some("[]"));
    }
}

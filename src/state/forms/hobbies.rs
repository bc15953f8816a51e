//! Dynamic list manager for the hobbies field

use super::field::{FieldValue, HobbyEntry, HobbyLevel};
use super::form_state::{FormError, FormResult, FormStore};

/// Ordered, appendable and removable view over a list field of the store
pub struct HobbyList<'a> {
    store: &'a mut FormStore,
    name: &'a str,
}

impl<'a> HobbyList<'a> {
    pub fn new(store: &'a mut FormStore, name: &'a str) -> Self {
        Self { store, name }
    }

    pub fn entries(&self) -> &[HobbyEntry] {
        self.store.values().list(self.name)
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// Add an entry at the end of the list
    pub fn append(&mut self, entry: HobbyEntry) -> FormResult<usize> {
        let mut entries = self.entries().to_vec();
        entries.push(entry);
        let index = entries.len() - 1;
        self.store.set_value(self.name, FieldValue::List(entries))?;
        tracing::debug!("Appended {}[{index}]", self.name);
        Ok(index)
    }

    /// Remove the entry at `index`; later entries move up by one
    pub fn remove_at(&mut self, index: usize) -> FormResult<HobbyEntry> {
        let mut entries = self.entries().to_vec();
        self.check_index(index, entries.len())?;
        let removed = entries.remove(index);
        self.store.set_value(self.name, FieldValue::List(entries))?;
        self.store.errors_mut().remove_list_item(self.name, index);
        tracing::debug!("Removed {}[{index}]", self.name);
        Ok(removed)
    }

    /// Edit the text of the entry at `index`
    pub fn update_value(&mut self, index: usize, f: impl FnOnce(&mut String)) -> FormResult<()> {
        self.update_entry(index, |entry| f(&mut entry.value))
    }

    pub fn set_level(&mut self, index: usize, level: HobbyLevel) -> FormResult<()> {
        self.update_entry(index, |entry| entry.level = level)
    }

    fn update_entry(&mut self, index: usize, f: impl FnOnce(&mut HobbyEntry)) -> FormResult<()> {
        let mut entries = self.entries().to_vec();
        self.check_index(index, entries.len())?;
        f(&mut entries[index]);
        self.store.set_value(self.name, FieldValue::List(entries))
    }

    fn check_index(&self, index: usize, len: usize) -> FormResult<()> {
        if index >= len {
            return Err(FormError::IndexOutOfRange {
                list: self.name.to_string(),
                index,
                len,
            });
        }
        Ok(())
    }
}

impl FormStore {
    /// Manage the list field `name`
    pub fn list<'a>(&'a mut self, name: &'a str) -> HobbyList<'a> {
        HobbyList::new(self, name)
    }
}

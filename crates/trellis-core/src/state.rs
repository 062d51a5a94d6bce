//! Persistent per-element state keyed by [`ElementKey`].
//!
//! The cache is a two-level map: element key → slot name → value. Elements
//! open a scope with [`StateCache::start_element`] while they lay out and
//! read their slots through [`StateCache::use_state`], which hands back the
//! current value together with a [`StateSetter`] that event handlers keep
//! around to write the slot later.
//!
//! Entries are collected by mark-and-sweep: [`StateCache::begin_pass`] starts
//! a generation, every scoped element marks its entry, and
//! [`StateCache::sweep`] drops entries no element visited.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::marker::PhantomData;
use std::rc::{Rc, Weak};

use indexmap::IndexMap;

use crate::collections::map::HashMap;
use crate::identity::ElementKey;

struct Entry {
    slots: IndexMap<String, Box<dyn Any>>,
    generation: u64,
}

impl Entry {
    fn new(generation: u64) -> Self {
        Self {
            slots: IndexMap::new(),
            generation,
        }
    }
}

#[derive(Default)]
struct StateStore {
    entries: HashMap<ElementKey, Entry>,
    scope: Vec<ElementKey>,
    generation: u64,
}

impl StateStore {
    fn entry_mut(&mut self, key: &ElementKey) -> &mut Entry {
        let generation = self.generation;
        self.entries
            .entry(key.clone())
            .or_insert_with(|| Entry::new(generation))
    }

    fn read<T: Clone + 'static>(&self, key: &ElementKey, name: &str) -> Option<T> {
        self.entries
            .get(key)
            .and_then(|entry| entry.slots.get(name))
            .and_then(|value| value.downcast_ref::<T>())
            .cloned()
    }

    fn write<T: 'static>(&mut self, key: &ElementKey, name: &str, value: T) {
        self.entry_mut(key)
            .slots
            .insert(name.to_owned(), Box::new(value));
    }
}

/// Shared handle to the state store. Clones refer to the same store.
#[derive(Clone, Default)]
pub struct StateCache {
    store: Rc<RefCell<StateStore>>,
}

impl StateCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enters the scope of `key`, marking its entry as alive for this pass.
    pub fn start_element(&self, key: &ElementKey) {
        let mut store = self.store.borrow_mut();
        let generation = store.generation;
        if let Some(entry) = store.entries.get_mut(key) {
            entry.generation = generation;
        }
        store.scope.push(key.clone());
    }

    /// Leaves the innermost element scope.
    pub fn end_element(&self) {
        if self.store.borrow_mut().scope.pop().is_none() {
            log::warn!("StateCache::end_element called without an open scope");
        }
    }

    /// Key of the element whose scope is open, if any.
    pub fn current_element(&self) -> Option<ElementKey> {
        self.store.borrow().scope.last().cloned()
    }

    /// Returns the value of slot `name` of the current element, creating it
    /// from `fallback` when absent, plus a setter for later writes.
    ///
    /// Without an open scope the fallback is returned together with a
    /// detached setter, and a warning is logged.
    pub fn use_state<T: Clone + 'static>(
        &self,
        name: &str,
        fallback: impl FnOnce() -> T,
    ) -> (T, StateSetter<T>) {
        let Some(key) = self.current_element() else {
            log::warn!("use_state(\"{name}\") called outside of an element scope");
            return (fallback(), StateSetter::detached());
        };

        // The fallback may read the cache, so it runs with the store released.
        let existing = self
            .store
            .borrow_mut()
            .entry_mut(&key)
            .slots
            .get(name)
            .map(|value| value.downcast_ref::<T>().cloned());
        let value = match existing {
            Some(Some(value)) => value,
            stale => {
                if stale.is_some() {
                    log::warn!(
                        "state slot \"{name}\" of {key} holds a different type; resetting it"
                    );
                }
                let value = fallback();
                self.store.borrow_mut().write(&key, name, value.clone());
                value
            }
        };

        (value, StateSetter::attached(&self.store, key, name))
    }

    /// Reads a slot of any element, outside of layout.
    pub fn get<T: Clone + 'static>(&self, key: &ElementKey, name: &str) -> Option<T> {
        self.store.borrow().read(key, name)
    }

    /// Writes a slot of any element. The write is visible to the next pass.
    pub fn set<T: 'static>(&self, key: &ElementKey, name: &str, value: T) {
        self.store.borrow_mut().write(key, name, value);
    }

    /// Returns a setter bound to `(key, name)` without reading the slot.
    pub fn setter<T: 'static>(&self, key: &ElementKey, name: &str) -> StateSetter<T> {
        StateSetter::attached(&self.store, key.clone(), name)
    }

    pub fn contains(&self, key: &ElementKey) -> bool {
        self.store.borrow().entries.contains_key(key)
    }

    /// Drops every slot of `key`.
    pub fn clear(&self, key: &ElementKey) {
        self.store.borrow_mut().entries.remove(key);
    }

    pub fn clear_all(&self) {
        let mut store = self.store.borrow_mut();
        store.entries.clear();
        store.scope.clear();
    }

    /// Number of elements holding state.
    pub fn len(&self) -> usize {
        self.store.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Starts a new collection generation. Scopes left open by a failed
    /// pass are discarded.
    pub fn begin_pass(&self) {
        let mut store = self.store.borrow_mut();
        store.generation += 1;
        if !store.scope.is_empty() {
            log::debug!("discarding {} unclosed state scopes", store.scope.len());
            store.scope.clear();
        }
    }

    /// Removes entries not visited since the last [`StateCache::begin_pass`].
    /// Returns the number of removed entries.
    pub fn sweep(&self) -> usize {
        let mut store = self.store.borrow_mut();
        let generation = store.generation;
        let before = store.entries.len();
        store
            .entries
            .retain(|_, entry| entry.generation == generation);
        let removed = before - store.entries.len();
        if removed > 0 {
            log::debug!("swept state of {removed} vanished elements");
        }
        removed
    }
}

impl fmt::Debug for StateCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let store = self.store.borrow();
        f.debug_struct("StateCache")
            .field("entries", &store.entries.len())
            .field("depth", &store.scope.len())
            .field("generation", &store.generation)
            .finish()
    }
}

/// Writes one `(element, slot)` pair of a [`StateCache`].
pub struct StateSetter<T> {
    store: Weak<RefCell<StateStore>>,
    target: Option<(ElementKey, Rc<str>)>,
    _marker: PhantomData<fn(T)>,
}

impl<T: 'static> StateSetter<T> {
    fn attached(store: &Rc<RefCell<StateStore>>, key: ElementKey, name: &str) -> Self {
        Self {
            store: Rc::downgrade(store),
            target: Some((key, Rc::from(name))),
            _marker: PhantomData,
        }
    }

    /// A setter that writes nowhere.
    pub fn detached() -> Self {
        Self {
            store: Weak::new(),
            target: None,
            _marker: PhantomData,
        }
    }

    pub fn key(&self) -> Option<&ElementKey> {
        self.target.as_ref().map(|(key, _)| key)
    }

    pub fn set(&self, value: T) {
        let (Some(store), Some((key, name))) = (self.store.upgrade(), self.target.as_ref()) else {
            log::debug!("state write dropped by a detached setter");
            return;
        };
        store.borrow_mut().write(key, name, value);
    }
}

impl<T: Clone + 'static> StateSetter<T> {
    /// Reads the slot's current value, if it is set and of type `T`.
    pub fn get(&self) -> Option<T> {
        let store = self.store.upgrade()?;
        let (key, name) = self.target.as_ref()?;
        let value = store.borrow().read(key, name);
        value
    }

    /// Replaces the value with `f(current)`, starting from `fallback` when
    /// the slot is empty.
    pub fn update(&self, fallback: T, f: impl FnOnce(T) -> T) {
        let current = self.get().unwrap_or(fallback);
        self.set(f(current));
    }
}

impl<T> Clone for StateSetter<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            target: self.target.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for StateSetter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateSetter")
            .field("target", &self.target)
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod tests;

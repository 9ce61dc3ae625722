//! Arena storage for list and map containers.
//!
//! Script values never own their aggregate contents directly. A list or map
//! value holds a [`ContainerId`] into a [`ValueHeap`], so two values can
//! alias the same container and mutation through either is visible to both.
//! Handles are stable for the lifetime of the heap.

use std::collections::BTreeMap;

use crate::value::ScriptValue;

/// Stable handle to a container in a [`ValueHeap`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerId(u32);

impl ContainerId {
    /// Raw slot index.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

/// A mutable aggregate.
#[derive(Clone, Debug)]
pub enum Container {
    /// Ordered list.
    List(Vec<ScriptValue>),
    /// String-keyed map; keys iterate sorted.
    Map(BTreeMap<String, ScriptValue>),
}

/// Owns every list and map reachable from a set of script values.
#[derive(Clone, Debug, Default)]
pub struct ValueHeap {
    containers: Vec<Container>,
}

impl ValueHeap {
    /// Creates an empty heap.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of allocated containers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.containers.len()
    }

    /// Returns true if nothing has been allocated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    fn alloc(&mut self, container: Container) -> ContainerId {
        let id = ContainerId(u32::try_from(self.containers.len()).unwrap_or(u32::MAX));
        self.containers.push(container);
        id
    }

    /// Allocates a list and returns a value referring to it.
    pub fn new_list(&mut self, items: Vec<ScriptValue>) -> ScriptValue {
        let id = self.alloc(Container::List(items));
        ScriptValue::list(id)
    }

    /// Allocates a map and returns a value referring to it.
    pub fn new_map(&mut self, entries: BTreeMap<String, ScriptValue>) -> ScriptValue {
        let id = self.alloc(Container::Map(entries));
        ScriptValue::map(id)
    }

    /// Elements of a list. An unknown or non-list handle reads as empty.
    #[must_use]
    pub fn list(&self, id: ContainerId) -> &[ScriptValue] {
        match self.containers.get(id.0 as usize) {
            Some(Container::List(items)) => items,
            _ => &[],
        }
    }

    /// Mutable access to a list.
    pub fn list_mut(&mut self, id: ContainerId) -> Option<&mut Vec<ScriptValue>> {
        match self.containers.get_mut(id.0 as usize) {
            Some(Container::List(items)) => Some(items),
            _ => None,
        }
    }

    /// Entries of a map.
    #[must_use]
    pub fn map(&self, id: ContainerId) -> Option<&BTreeMap<String, ScriptValue>> {
        match self.containers.get(id.0 as usize) {
            Some(Container::Map(entries)) => Some(entries),
            _ => None,
        }
    }

    /// Mutable access to a map.
    pub fn map_mut(&mut self, id: ContainerId) -> Option<&mut BTreeMap<String, ScriptValue>> {
        match self.containers.get_mut(id.0 as usize) {
            Some(Container::Map(entries)) => Some(entries),
            _ => None,
        }
    }

    /// Number of entries in a list or map; zero for an unknown handle.
    #[must_use]
    pub fn container_len(&self, id: ContainerId) -> usize {
        match self.containers.get(id.0 as usize) {
            Some(Container::List(items)) => items.len(),
            Some(Container::Map(entries)) => entries.len(),
            None => 0,
        }
    }

    /// Replaces a list's contents wholesale, returning the old contents.
    pub(crate) fn take_list(&mut self, id: ContainerId) -> Vec<ScriptValue> {
        self.list_mut(id).map(std::mem::take).unwrap_or_default()
    }

    pub(crate) fn restore_list(&mut self, id: ContainerId, items: Vec<ScriptValue>) {
        if let Some(slot) = self.list_mut(id) {
            *slot = items;
        }
    }
}

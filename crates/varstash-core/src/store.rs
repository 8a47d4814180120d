use std::collections::HashMap;

use crate::alloc::IndexAllocator;
use crate::variant::{VarKind, Variant};

/// A single stored variable: stable index plus current value
///
/// The index is assigned once when the name is first set and survives every
/// later re-set, including re-sets that change the value's kind.
#[derive(Debug, Clone)]
pub struct Variable {
    pub index: u32,
    pub value: Variant,
}

/// Name → variable map for one scope
///
/// Names are ASCII case-insensitive: they are folded to lowercase at
/// creation and at every lookup, so "Score" and "score" denote the same
/// variable. Text values are stored verbatim. The store does not own its
/// index allocator; the scope owner passes it in so the allocator stays
/// unit-testable on its own.
#[derive(Debug, Default)]
pub struct ValueStore {
    vars: HashMap<String, Variable>,
}

fn fold(name: &str) -> String {
    name.to_ascii_lowercase()
}

impl ValueStore {
    pub fn new() -> Self {
        Self {
            vars: HashMap::new(),
        }
    }

    /// Create or update a variable, returning its index
    ///
    /// An existing name keeps its index and only the value is replaced; an
    /// absent name gets a fresh index from the scope's allocator.
    pub fn set(&mut self, alloc: &mut IndexAllocator, name: &str, value: Variant) -> u32 {
        let name = fold(name);
        if let Some(var) = self.vars.get_mut(&name) {
            var.value = value;
            return var.index;
        }
        let index = alloc.acquire();
        // Two live variables sharing an index would be an allocator bug, not
        // something any call sequence can produce.
        debug_assert!(
            self.vars.values().all(|v| v.index != index),
            "duplicate index {} in scope",
            index
        );
        self.vars.insert(name, Variable { index, value });
        index
    }

    /// Look up a variable's current value
    pub fn get(&self, name: &str) -> Option<&Variant> {
        self.vars.get(&fold(name)).map(|v| &v.value)
    }

    /// Get the kind of a variable, or `VarKind::None` if the name is absent
    pub fn type_of(&self, name: &str) -> VarKind {
        self.vars
            .get(&fold(name))
            .map_or(VarKind::None, |v| v.value.kind())
    }

    /// Remove a variable, handing its index back to the allocator
    ///
    /// Returns whether the name existed. On a monotonic allocator the
    /// released index is simply discarded.
    pub fn delete(&mut self, alloc: &mut IndexAllocator, name: &str) -> bool {
        match self.vars.remove(&fold(name)) {
            Some(var) => {
                alloc.release(var.index);
                true
            }
            None => false,
        }
    }

    /// Find the (folded) name holding the given index
    ///
    /// Linear scan over the live entries; enumeration by index is how
    /// scripts walk a scope, and the scan semantics are the observable
    /// contract.
    pub fn name_at(&self, index: u32) -> Option<&str> {
        self.vars
            .iter()
            .find(|(_, var)| var.index == index)
            .map(|(name, _)| name.as_str())
    }

    /// One past the greatest index in this scope, as the legacy query
    /// reports it
    ///
    /// Two branches, inherited as-is: with no freed index waiting, the
    /// allocator's raw watermark; with freed indices waiting, a scan for the
    /// greatest live index plus one. The branches can disagree after the
    /// highest-indexed variable is deleted, and that disagreement is part of
    /// the contract.
    pub fn upper_index(&self, alloc: &IndexAllocator) -> u32 {
        if !alloc.has_free() {
            return alloc.watermark();
        }
        self.vars
            .values()
            .map(|v| v.index)
            .max()
            .map_or(0, |max| max + 1)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Iterate over (folded name, variable) pairs, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Variable)> {
        self.vars.iter().map(|(name, var)| (name.as_str(), var))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scope() -> (ValueStore, IndexAllocator) {
        (ValueStore::new(), IndexAllocator::recycling())
    }

    #[test]
    fn test_set_folds_name_and_stores_value_verbatim() {
        let (mut store, mut alloc) = scope();
        store.set(&mut alloc, "Greeting", Variant::Text("Hello World".into()));

        // Lookup folds too
        let value = store.get("gReeTing").expect("folded lookup");
        assert_eq!(value.as_text(), Some("Hello World"));
        assert_eq!(store.name_at(0), Some("greeting"));
    }

    #[test]
    fn test_reset_keeps_index_across_kind_change() {
        let (mut store, mut alloc) = scope();
        let first = store.set(&mut alloc, "v", Variant::Int(1));
        let second = store.set(&mut alloc, "V", Variant::Float(2.5));
        assert_eq!(first, second);
        assert_eq!(store.type_of("v"), VarKind::Float);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_delete_releases_index() {
        let (mut store, mut alloc) = scope();
        store.set(&mut alloc, "a", Variant::Int(1));
        store.set(&mut alloc, "b", Variant::Int(2));

        assert!(store.delete(&mut alloc, "A"));
        assert!(!store.delete(&mut alloc, "a"));
        assert_eq!(store.iter().count(), 1);

        // Freed index 0 comes back before a fresh mint
        assert_eq!(store.set(&mut alloc, "c", Variant::Int(3)), 0);
    }

    #[test]
    fn test_name_at_misses_unassigned_index() {
        let (mut store, mut alloc) = scope();
        store.set(&mut alloc, "a", Variant::Int(1));
        assert_eq!(store.name_at(0), Some("a"));
        assert_eq!(store.name_at(1), None);
    }

    #[test]
    fn test_upper_index_watermark_branch() {
        let (mut store, mut alloc) = scope();
        store.set(&mut alloc, "a", Variant::Int(1));
        store.set(&mut alloc, "b", Variant::Int(2));
        assert_eq!(store.upper_index(&alloc), 2);
    }

    #[test]
    fn test_upper_index_diverges_after_tail_delete() {
        let (mut store, mut alloc) = scope();
        store.set(&mut alloc, "a", Variant::Int(1)); // 0
        store.set(&mut alloc, "b", Variant::Int(2)); // 1
        store.set(&mut alloc, "c", Variant::Int(3)); // 2

        // Deleting the highest index switches to the scan branch, which
        // reports 2 where the watermark still says 3.
        store.delete(&mut alloc, "c");
        assert_eq!(store.upper_index(&alloc), 2);

        // Reusing the freed index empties the queue and the watermark branch
        // takes over again.
        store.set(&mut alloc, "d", Variant::Int(4));
        assert_eq!(store.upper_index(&alloc), 3);
    }
}

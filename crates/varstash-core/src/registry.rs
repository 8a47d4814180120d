use std::collections::HashMap;

use tracing::debug;

use crate::alloc::IndexAllocator;
use crate::store::ValueStore;
use crate::variant::{VarKind, Variant};

/// One player's variable namespace with its recycling allocator
#[derive(Debug)]
struct PlayerScope {
    store: ValueStore,
    alloc: IndexAllocator,
}

impl PlayerScope {
    fn new() -> Self {
        Self {
            store: ValueStore::new(),
            alloc: IndexAllocator::recycling(),
        }
    }
}

/// Owns every live scope: the global namespace plus one per entity id
///
/// The registry is created empty at host startup and lives for the process.
/// The global scope always exists and never resets. Player scopes are
/// created lazily on first write and torn down, allocator state included,
/// when their last variable is deleted or the entity disconnects; a
/// recreated scope starts allocating from zero as if it had never existed.
///
/// Read-only queries never create a scope.
#[derive(Debug)]
pub struct ScopeRegistry {
    global_store: ValueStore,
    global_alloc: IndexAllocator,
    players: HashMap<u32, PlayerScope>,
}

impl ScopeRegistry {
    pub fn new() -> Self {
        Self {
            global_store: ValueStore::new(),
            global_alloc: IndexAllocator::monotonic(),
            players: HashMap::new(),
        }
    }

    // ===== Global scope =====

    /// Create or update a global variable, returning its index
    pub fn set_global(&mut self, name: &str, value: Variant) -> u32 {
        self.global_store.set(&mut self.global_alloc, name, value)
    }

    /// Look up a global variable
    pub fn get_global(&self, name: &str) -> Option<&Variant> {
        self.global_store.get(name)
    }

    /// Delete a global variable; its index is never reused
    pub fn delete_global(&mut self, name: &str) -> bool {
        self.global_store.delete(&mut self.global_alloc, name)
    }

    /// Kind of a global variable, `VarKind::None` when absent
    pub fn global_type_of(&self, name: &str) -> VarKind {
        self.global_store.type_of(name)
    }

    /// Name holding the given index in the global scope
    pub fn global_name_at(&self, index: u32) -> Option<&str> {
        self.global_store.name_at(index)
    }

    /// Enumeration bound for the global scope
    pub fn global_upper_index(&self) -> u32 {
        self.global_store.upper_index(&self.global_alloc)
    }

    // ===== Player scopes =====

    /// Create or update a variable in an entity's scope, returning its index
    ///
    /// The scope is created on first write.
    pub fn set_player(&mut self, id: u32, name: &str, value: Variant) -> u32 {
        let scope = self.players.entry(id).or_insert_with(|| {
            debug!(target: "varstash", "Creating scope for entity {}", id);
            PlayerScope::new()
        });
        scope.store.set(&mut scope.alloc, name, value)
    }

    /// Look up a variable in an entity's scope
    pub fn get_player(&self, id: u32, name: &str) -> Option<&Variant> {
        self.players.get(&id).and_then(|s| s.store.get(name))
    }

    /// Delete a variable in an entity's scope
    ///
    /// Deleting the last variable tears the whole scope down, exactly like a
    /// disconnect: the next write to this entity restarts indices at zero.
    pub fn delete_player(&mut self, id: u32, name: &str) -> bool {
        let Some(scope) = self.players.get_mut(&id) else {
            return false;
        };
        let removed = scope.store.delete(&mut scope.alloc, name);
        if removed && scope.store.is_empty() {
            debug!(target: "varstash", "Scope for entity {} emptied, tearing down", id);
            self.players.remove(&id);
        }
        removed
    }

    /// Kind of a variable in an entity's scope, `VarKind::None` when absent
    pub fn player_type_of(&self, id: u32, name: &str) -> VarKind {
        self.players
            .get(&id)
            .map_or(VarKind::None, |s| s.store.type_of(name))
    }

    /// Name holding the given index in an entity's scope
    pub fn player_name_at(&self, id: u32, index: u32) -> Option<&str> {
        self.players.get(&id).and_then(|s| s.store.name_at(index))
    }

    /// Enumeration bound for an entity's scope, 0 when the scope is absent
    pub fn player_upper_index(&self, id: u32) -> u32 {
        self.players
            .get(&id)
            .map_or(0, |s| s.store.upper_index(&s.alloc))
    }

    /// Drop an entity's scope unconditionally
    ///
    /// Invoked from the host's disconnect notification. Every variable and
    /// the allocator state are discarded regardless of remaining content.
    pub fn disconnect_player(&mut self, id: u32) {
        if self.players.remove(&id).is_some() {
            debug!(target: "varstash", "Entity {} disconnected, scope dropped", id);
        }
    }

    /// Whether an entity currently owns a scope
    pub fn has_player_scope(&self, id: u32) -> bool {
        self.players.contains_key(&id)
    }

    /// Number of live player scopes
    pub fn player_scope_count(&self) -> usize {
        self.players.len()
    }

    /// Number of variables in the global scope
    pub fn global_len(&self) -> usize {
        self.global_store.len()
    }
}

impl Default for ScopeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

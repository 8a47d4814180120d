//! In-memory typed variable storage for a game-server scripting runtime.
//!
//! Variables live in one of two namespace families: a single process-wide
//! global scope, or a per-entity player scope keyed by entity id. Every
//! variable holds one of three primitive kinds (int, float, text) together
//! with a stable numeric index that scripts use to enumerate a scope without
//! knowing its names. Host adapters should go through `varstash-host` rather
//! than this crate directly.

pub mod alloc;
pub mod registry;
pub mod store;
pub mod variant;

pub use alloc::IndexAllocator;
pub use registry::ScopeRegistry;
pub use store::{ValueStore, Variable};
pub use variant::{VarKind, Variant};

//! Host integration for the varstash variable store.
//!
//! The scripting-engine boundary adapter (argument marshalling, plugin
//! handshake) lives outside this workspace; what it consumes from here is
//! the [`VarOps`] operation surface with the legacy calling conventions, a
//! [`SharedRegistry`] handle it can hold across dispatch threads, and the
//! bounded [`copy_truncated`] helper for writing text into caller-supplied
//! buffers.

pub mod config;
pub mod logging;
pub mod ops;
pub mod paths;
pub mod shared;

pub use config::{ConfigLoadError, VarstashConfig};
pub use logging::init_logging;
pub use ops::{copy_truncated, VarOps};
pub use paths::ProjectPaths;
pub use shared::SharedRegistry;

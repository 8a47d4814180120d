use tracing::trace;
use varstash_core::Variant;

use crate::shared::SharedRegistry;

/// Native-call operation surface consumed by the boundary adapter
///
/// Every method keeps the calling conventions scripts have always seen:
/// success flags are `1`/`0`, kind queries return the raw VARTYPE code,
/// integer and float reads collapse "name absent" and "wrong kind" into the
/// zero value, and text reads hand back the full stored string so the
/// adapter can truncate into whatever buffer the caller declared.
#[derive(Clone)]
pub struct VarOps {
    registry: SharedRegistry,
}

impl VarOps {
    pub fn new(registry: SharedRegistry) -> Self {
        Self { registry }
    }

    /// The underlying registry handle
    pub fn registry(&self) -> &SharedRegistry {
        &self.registry
    }

    // ===== Global scope =====

    pub fn set_int(&self, name: &str, value: i32) -> i32 {
        trace!(target: "varstash", "SetInt {} = {}", name, value);
        self.registry
            .with(|reg| reg.set_global(name, Variant::Int(value)));
        1
    }

    pub fn set_float(&self, name: &str, value: f32) -> i32 {
        trace!(target: "varstash", "SetFloat {} = {}", name, value);
        self.registry
            .with(|reg| reg.set_global(name, Variant::Float(value)));
        1
    }

    pub fn set_text(&self, name: &str, value: &str) -> i32 {
        trace!(target: "varstash", "SetText {}", name);
        self.registry
            .with(|reg| reg.set_global(name, Variant::Text(value.to_string())));
        1
    }

    /// Integer read; absent or non-int names read as 0
    pub fn get_int(&self, name: &str) -> i32 {
        self.registry
            .with(|reg| reg.get_global(name).and_then(|v| v.as_int()))
            .unwrap_or(0)
    }

    /// Float read; absent or non-float names read as 0.0
    pub fn get_float(&self, name: &str) -> f32 {
        self.registry
            .with(|reg| reg.get_global(name).and_then(|v| v.as_float()))
            .unwrap_or(0.0)
    }

    /// Text read; `None` covers both absent and non-text names
    pub fn get_text(&self, name: &str) -> Option<String> {
        self.registry
            .with(|reg| reg.get_global(name).and_then(|v| v.as_text().map(String::from)))
    }

    pub fn delete(&self, name: &str) -> i32 {
        flag(self.registry.with(|reg| reg.delete_global(name)))
    }

    pub fn upper_index(&self) -> u32 {
        self.registry.with(|reg| reg.global_upper_index())
    }

    pub fn name_at(&self, index: u32) -> Option<String> {
        self.registry
            .with(|reg| reg.global_name_at(index).map(String::from))
    }

    /// Raw VARTYPE code for a name (0 when absent)
    pub fn type_of(&self, name: &str) -> u32 {
        self.registry.with(|reg| reg.global_type_of(name).as_raw())
    }

    // ===== Player scopes =====

    pub fn set_player_int(&self, id: u32, name: &str, value: i32) -> i32 {
        trace!(target: "varstash", "SetPVarInt {} {} = {}", id, name, value);
        self.registry
            .with(|reg| reg.set_player(id, name, Variant::Int(value)));
        1
    }

    pub fn set_player_float(&self, id: u32, name: &str, value: f32) -> i32 {
        trace!(target: "varstash", "SetPVarFloat {} {} = {}", id, name, value);
        self.registry
            .with(|reg| reg.set_player(id, name, Variant::Float(value)));
        1
    }

    pub fn set_player_text(&self, id: u32, name: &str, value: &str) -> i32 {
        trace!(target: "varstash", "SetPVarText {} {}", id, name);
        self.registry
            .with(|reg| reg.set_player(id, name, Variant::Text(value.to_string())));
        1
    }

    pub fn get_player_int(&self, id: u32, name: &str) -> i32 {
        self.registry
            .with(|reg| reg.get_player(id, name).and_then(|v| v.as_int()))
            .unwrap_or(0)
    }

    pub fn get_player_float(&self, id: u32, name: &str) -> f32 {
        self.registry
            .with(|reg| reg.get_player(id, name).and_then(|v| v.as_float()))
            .unwrap_or(0.0)
    }

    pub fn get_player_text(&self, id: u32, name: &str) -> Option<String> {
        self.registry.with(|reg| {
            reg.get_player(id, name)
                .and_then(|v| v.as_text().map(String::from))
        })
    }

    pub fn delete_player(&self, id: u32, name: &str) -> i32 {
        flag(self.registry.with(|reg| reg.delete_player(id, name)))
    }

    pub fn player_upper_index(&self, id: u32) -> u32 {
        self.registry.with(|reg| reg.player_upper_index(id))
    }

    pub fn player_name_at(&self, id: u32, index: u32) -> Option<String> {
        self.registry
            .with(|reg| reg.player_name_at(id, index).map(String::from))
    }

    pub fn player_type_of(&self, id: u32, name: &str) -> u32 {
        self.registry
            .with(|reg| reg.player_type_of(id, name).as_raw())
    }

    // ===== Lifecycle =====

    /// Host notification that an entity disconnected
    pub fn on_entity_disconnect(&self, id: u32) {
        self.registry.with(|reg| reg.disconnect_player(id));
    }
}

fn flag(ok: bool) -> i32 {
    if ok {
        1
    } else {
        0
    }
}

/// Copy text into a fixed-capacity destination, truncating as needed
///
/// This is the contract the adapter upholds when a script reads a string
/// into its own buffer: the copy never overflows and never fails, the
/// destination is always NUL-terminated within its capacity, and truncation
/// lands on a UTF-8 character boundary. Returns the number of text bytes
/// written, excluding the terminator. A zero-capacity destination is left
/// untouched.
pub fn copy_truncated(dst: &mut [u8], src: &str) -> usize {
    if dst.is_empty() {
        return 0;
    }
    let mut end = (dst.len() - 1).min(src.len());
    while end > 0 && !src.is_char_boundary(end) {
        end -= 1;
    }
    dst[..end].copy_from_slice(&src.as_bytes()[..end]);
    dst[end] = 0;
    end
}

use std::fmt;

/// Kind tag for a stored value
///
/// The numeric values mirror the VARTYPE constants the scripting side has
/// always used (none = 0, int = 1, text = 2, float = 3) and must not be
/// reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarKind {
    None = 0,
    Int = 1,
    Text = 2,
    Float = 3,
}

impl VarKind {
    /// Convert a raw scripting-side kind code to a VarKind
    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0 => Some(VarKind::None),
            1 => Some(VarKind::Int),
            2 => Some(VarKind::Text),
            3 => Some(VarKind::Float),
            _ => None,
        }
    }

    /// Get the raw scripting-side code for this kind
    pub fn as_raw(self) -> u32 {
        self as u32
    }
}

impl fmt::Display for VarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VarKind::None => "none",
            VarKind::Int => "int",
            VarKind::Text => "text",
            VarKind::Float => "float",
        };
        write!(f, "{}", name)
    }
}

/// A stored value: exactly one of the three primitive kinds
///
/// There is no implicit coercion between kinds. Asking a value for the wrong
/// kind yields `None`, the same observable outcome as the name being absent
/// from its scope entirely; callers rely on that collapse.
#[derive(Debug, Clone, PartialEq)]
pub enum Variant {
    Int(i32),
    Float(f32),
    Text(String),
}

impl Variant {
    /// Get the kind tag for this value
    pub fn kind(&self) -> VarKind {
        match self {
            Variant::Int(_) => VarKind::Int,
            Variant::Float(_) => VarKind::Float,
            Variant::Text(_) => VarKind::Text,
        }
    }

    /// Get the integer payload, or None if this is not an int
    pub fn as_int(&self) -> Option<i32> {
        match self {
            Variant::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Get the float payload, or None if this is not a float
    pub fn as_float(&self) -> Option<f32> {
        match self {
            Variant::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Get the text payload, or None if this is not text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Variant::Text(v) => Some(v),
            _ => None,
        }
    }
}

impl From<i32> for Variant {
    fn from(v: i32) -> Self {
        Variant::Int(v)
    }
}

impl From<f32> for Variant {
    fn from(v: f32) -> Self {
        Variant::Float(v)
    }
}

impl From<String> for Variant {
    fn from(v: String) -> Self {
        Variant::Text(v)
    }
}

impl From<&str> for Variant {
    fn from(v: &str) -> Self {
        Variant::Text(v.to_string())
    }
}

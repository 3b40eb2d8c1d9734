//! Model slot value object

use serde::{Deserialize, Serialize};

/// Fixed positional identity of a primary model (Value Object)
///
/// Slots are ordered `Primary1 < Primary2 < Primary3`. Results are always
/// reported in slot order regardless of which upstream call finished first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ModelSlot {
    #[serde(rename = "MODEL1")]
    Primary1,
    #[serde(rename = "MODEL2")]
    Primary2,
    #[serde(rename = "MODEL3")]
    Primary3,
}

impl ModelSlot {
    /// All slots in identity order
    pub const ALL: [ModelSlot; 3] = [ModelSlot::Primary1, ModelSlot::Primary2, ModelSlot::Primary3];

    /// Get the wire label for this slot
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelSlot::Primary1 => "MODEL1",
            ModelSlot::Primary2 => "MODEL2",
            ModelSlot::Primary3 => "MODEL3",
        }
    }

    /// Zero-based index of this slot
    pub fn index(&self) -> usize {
        match self {
            ModelSlot::Primary1 => 0,
            ModelSlot::Primary2 => 1,
            ModelSlot::Primary3 => 2,
        }
    }

}

impl std::fmt::Display for ModelSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

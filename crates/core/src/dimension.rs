//! Dimension identifiers.
//!
//! The server names every dimension with a namespaced identifier. The client
//! only needs to know which of the vanilla dimensions it is in and how to print it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier for a world dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum DimensionId {
    /// The Overworld dimension.
    Overworld = 0,
    /// The Nether dimension.
    Nether = 1,
    /// The End dimension.
    End = 2,
}

impl DimensionId {
    /// Default (Overworld) dimension.
    pub const DEFAULT: Self = Self::Overworld;

    /// Namespaced identifier as used by the protocol.
    pub const fn identifier(self) -> &'static str {
        match self {
            Self::Overworld => "minecraft:overworld",
            Self::Nether => "minecraft:the_nether",
            Self::End => "minecraft:the_end",
        }
    }

    /// Parse a namespaced identifier. A missing namespace means `minecraft`.
    pub fn from_identifier(identifier: &str) -> Option<Self> {
        let path = identifier.strip_prefix("minecraft:").unwrap_or(identifier);
        match path {
            "overworld" => Some(Self::Overworld),
            "the_nether" => Some(Self::Nether),
            "the_end" => Some(Self::End),
            _ => None,
        }
    }
}

impl Default for DimensionId {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for DimensionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_round_trip() {
        for dimension in [DimensionId::Overworld, DimensionId::Nether, DimensionId::End] {
            assert_eq!(
                DimensionId::from_identifier(dimension.identifier()),
                Some(dimension)
            );
        }
        assert_eq!(
            DimensionId::from_identifier("the_nether"),
            Some(DimensionId::Nether)
        );
        assert_eq!(DimensionId::from_identifier("minecraft:moon"), None);
    }

    #[test]
    fn display_uses_namespaced_identifier() {
        assert_eq!(DimensionId::Overworld.to_string(), "minecraft:overworld");
    }
}

//! Player gamemodes.

use serde::{Deserialize, Serialize};

/// Gamemode of the local player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Gamemode {
    /// Health and hunger apply, blocks can be broken.
    #[default]
    Survival,
    /// Unlimited items, no damage.
    Creative,
    /// Health and hunger apply, blocks can't be broken without the right tool.
    Adventure,
    /// Free flying observer.
    Spectator,
}

impl Gamemode {
    /// Name shown to the player.
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Survival => "Survival",
            Self::Creative => "Creative",
            Self::Adventure => "Adventure",
            Self::Spectator => "Spectator",
        }
    }

    /// Whether health, food and experience are tracked (and shown) in this mode.
    pub const fn has_health(self) -> bool {
        matches!(self, Self::Survival | Self::Adventure)
    }

    /// Convert from the protocol's numeric id.
    pub const fn from_id(id: u8) -> Option<Self> {
        match id {
            0 => Some(Self::Survival),
            1 => Some(Self::Creative),
            2 => Some(Self::Adventure),
            3 => Some(Self::Spectator),
            _ => None,
        }
    }
}

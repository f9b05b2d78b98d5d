//! Biome identifiers received from the server.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Biome identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BiomeId {
    // Cold
    SnowyTundra,
    SnowyMountains,

    // Temperate
    Plains,
    Forest,
    BirchForest,
    Mountains,

    // Warm
    Desert,
    Savanna,

    // Wet
    Swamp,
    Jungle,

    // Ocean
    Ocean,
    DeepOcean,

    // Other dimensions
    NetherWastes,
    TheEnd,
}

impl BiomeId {
    /// Namespaced identifier as used by the protocol.
    pub const fn identifier(self) -> &'static str {
        match self {
            BiomeId::SnowyTundra => "minecraft:snowy_tundra",
            BiomeId::SnowyMountains => "minecraft:snowy_mountains",
            BiomeId::Plains => "minecraft:plains",
            BiomeId::Forest => "minecraft:forest",
            BiomeId::BirchForest => "minecraft:birch_forest",
            BiomeId::Mountains => "minecraft:mountains",
            BiomeId::Desert => "minecraft:desert",
            BiomeId::Savanna => "minecraft:savanna",
            BiomeId::Swamp => "minecraft:swamp",
            BiomeId::Jungle => "minecraft:jungle",
            BiomeId::Ocean => "minecraft:ocean",
            BiomeId::DeepOcean => "minecraft:deep_ocean",
            BiomeId::NetherWastes => "minecraft:nether_wastes",
            BiomeId::TheEnd => "minecraft:the_end",
        }
    }
}

impl fmt::Display for BiomeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::BiomeId;

/// Chunk width (X axis) in blocks.
pub const CHUNK_SIZE_X: i32 = 16;
/// Chunk section height (Y axis) in blocks.
pub const SECTION_HEIGHT: i32 = 16;
/// Chunk depth (Z axis) in blocks.
pub const CHUNK_SIZE_Z: i32 = 16;

/// Integer block coordinate in world space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Position inside the containing chunk column. X and Z wrap into 0..16, Y is unchanged.
    pub const fn relative_to_chunk(self) -> BlockPos {
        BlockPos {
            x: self.x.rem_euclid(CHUNK_SIZE_X),
            y: self.y,
            z: self.z.rem_euclid(CHUNK_SIZE_Z),
        }
    }

    /// Chunk column containing this block.
    pub const fn chunk(self) -> ChunkPos {
        ChunkPos {
            x: self.x.div_euclid(CHUNK_SIZE_X),
            z: self.z.div_euclid(CHUNK_SIZE_Z),
        }
    }

    /// Chunk section containing this block.
    pub const fn chunk_section(self) -> ChunkSectionPos {
        ChunkSectionPos {
            x: self.x.div_euclid(CHUNK_SIZE_X),
            y: self.y.div_euclid(SECTION_HEIGHT),
            z: self.z.div_euclid(CHUNK_SIZE_Z),
        }
    }
}

/// Chunk coordinate (X,Z) in chunk space.
/// Implements Ord for deterministic iteration in BTreeMap/BTreeSet (sorts by x, then z).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct ChunkPos {
    pub x: i32,
    pub z: i32,
}

impl ChunkPos {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }
}

impl fmt::Display for ChunkPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

/// 16x16x16 section of a chunk column, in section coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ChunkSectionPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl ChunkSectionPos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Chunk column the section belongs to.
    pub const fn chunk(self) -> ChunkPos {
        ChunkPos {
            x: self.x,
            z: self.z,
        }
    }
}

impl fmt::Display for ChunkSectionPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.x, self.y, self.z)
    }
}

/// Loaded chunk column. The client only keeps what the overlay needs: biomes per column.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    position: ChunkPos,
    biomes: Vec<BiomeId>,
}

impl Chunk {
    /// Chunk whose columns all share one biome.
    pub fn new(position: ChunkPos, biome: BiomeId) -> Self {
        Self {
            position,
            biomes: vec![biome; (CHUNK_SIZE_X * CHUNK_SIZE_Z) as usize],
        }
    }

    pub fn position(&self) -> ChunkPos {
        self.position
    }

    /// Biome of the column containing `block`. Coordinates outside the chunk wrap.
    pub fn biome_at(&self, block: BlockPos) -> BiomeId {
        self.biomes[column_index(block)]
    }

    pub fn set_biome(&mut self, block: BlockPos, biome: BiomeId) {
        let index = column_index(block);
        self.biomes[index] = biome;
    }
}

fn column_index(block: BlockPos) -> usize {
    let relative = block.relative_to_chunk();
    (relative.z * CHUNK_SIZE_X + relative.x) as usize
}

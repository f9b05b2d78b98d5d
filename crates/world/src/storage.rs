use std::collections::BTreeMap;

use quartz_core::DimensionId;

use crate::{BiomeId, BlockPos, Chunk, ChunkPos};

/// Client-side view of the world the player is in.
/// Uses BTreeMap so chunk iteration order is stable between runs.
#[derive(Debug, Clone, Default)]
pub struct World {
    dimension: DimensionId,
    chunks: BTreeMap<ChunkPos, Chunk>,
}

impl World {
    pub fn new(dimension: DimensionId) -> Self {
        Self {
            dimension,
            chunks: BTreeMap::new(),
        }
    }

    pub fn dimension(&self) -> DimensionId {
        self.dimension
    }

    /// Chunk column at `pos`, if the server has sent it.
    pub fn chunk(&self, pos: ChunkPos) -> Option<&Chunk> {
        self.chunks.get(&pos)
    }

    /// Store a chunk, replacing any previous copy at the same position.
    pub fn insert_chunk(&mut self, chunk: Chunk) -> Option<Chunk> {
        self.chunks.insert(chunk.position(), chunk)
    }

    pub fn remove_chunk(&mut self, pos: ChunkPos) -> Option<Chunk> {
        self.chunks.remove(&pos)
    }

    /// Biome at a block, or `None` when its chunk is not loaded.
    pub fn biome_at(&self, block: BlockPos) -> Option<BiomeId> {
        self.chunk(block.chunk()).map(|chunk| chunk.biome_at(block))
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

//! Property-based tests for block, chunk and section coordinates
//!
//! Critical invariants:
//! - Chunk-relative positions always fall inside 0..16 on X and Z
//! - Chunk origin + relative position reconstructs the block
//! - A block's section lies in the same chunk column as the block

use quartz_world::{BiomeId, BlockPos, Chunk, CHUNK_SIZE_X, CHUNK_SIZE_Z, SECTION_HEIGHT};
use proptest::prelude::*;

const RANGE: std::ops::Range<i32> = -1_000_000..1_000_000;

proptest! {
    #[test]
    fn relative_position_stays_inside_the_chunk(x in RANGE, y in -64i32..320, z in RANGE) {
        let block = BlockPos::new(x, y, z);
        let relative = block.relative_to_chunk();
        let chunk = block.chunk();

        prop_assert!((0..CHUNK_SIZE_X).contains(&relative.x));
        prop_assert!((0..CHUNK_SIZE_Z).contains(&relative.z));
        prop_assert_eq!(relative.y, y);
        prop_assert_eq!(chunk.x * CHUNK_SIZE_X + relative.x, x);
        prop_assert_eq!(chunk.z * CHUNK_SIZE_Z + relative.z, z);
    }

    #[test]
    fn section_belongs_to_the_block_chunk(x in RANGE, y in -64i32..320, z in RANGE) {
        let block = BlockPos::new(x, y, z);
        let section = block.chunk_section();

        prop_assert_eq!(section.chunk(), block.chunk());
        prop_assert!(section.y * SECTION_HEIGHT <= y);
        prop_assert!(y < (section.y + 1) * SECTION_HEIGHT);
    }

    #[test]
    fn biome_applies_to_the_whole_column(x in RANGE, z in RANGE, y1 in 0i32..256, y2 in 0i32..256) {
        let block = BlockPos::new(x, y1, z);
        let mut chunk = Chunk::new(block.chunk(), BiomeId::Plains);
        chunk.set_biome(block, BiomeId::Desert);

        prop_assert_eq!(chunk.biome_at(BlockPos::new(x, y2, z)), BiomeId::Desert);
    }
}

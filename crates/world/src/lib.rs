//! Client-side world model: coordinates, loaded chunks, biomes and the local player.

mod biome;
mod chunk;
mod direction;
mod game;
mod player;
mod storage;

pub use biome::*;
pub use chunk::*;
pub use direction::*;
pub use game::*;
pub use player::*;
pub use storage::*;

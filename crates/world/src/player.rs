use glam::DVec3;
use quartz_core::{Gamemode, ItemStack};
use serde::{Deserialize, Serialize};

use crate::{BlockPos, ChunkSectionPos, Direction};

/// Number of hotbar slots.
pub const HOTBAR_SLOTS: usize = 9;

/// Look direction in radians. Pitch is positive when looking down.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerRotation {
    pub yaw: f32,
    pub pitch: f32,
}

impl PlayerRotation {
    pub fn heading(self) -> Direction {
        Direction::from_yaw(self.yaw)
    }
}

/// State of the local player as last reported by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Feet position at the last tick.
    pub position: DVec3,
    /// Feet position interpolated between ticks for rendering.
    pub smooth_position: DVec3,
    pub rotation: PlayerRotation,
    pub gamemode: Gamemode,
    /// 0-20, may be fractional.
    pub health: f32,
    /// 0-20.
    pub food: i32,
    /// Progress towards the next level in 0-1.
    pub experience_progress: f32,
    pub hotbar: [Option<ItemStack>; HOTBAR_SLOTS],
    pub selected_slot: usize,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            position: DVec3::ZERO,
            smooth_position: DVec3::ZERO,
            rotation: PlayerRotation::default(),
            gamemode: Gamemode::default(),
            health: 20.0,
            food: 20,
            experience_progress: 0.0,
            hotbar: [None; HOTBAR_SLOTS],
            selected_slot: 0,
        }
    }
}

impl Player {
    /// Block directly below the player's feet.
    pub fn block_underneath(&self) -> BlockPos {
        BlockPos::new(
            self.position.x.floor() as i32,
            (self.position.y - 1.0).floor() as i32,
            self.position.z.floor() as i32,
        )
    }

    /// Chunk section containing the player's feet.
    pub fn chunk_section(&self) -> ChunkSectionPos {
        BlockPos::new(
            self.position.x.floor() as i32,
            self.position.y.floor() as i32,
            self.position.z.floor() as i32,
        )
        .chunk_section()
    }

    /// Move to a new position, snapping the interpolated position too.
    pub fn teleport(&mut self, position: DVec3) {
        self.position = position;
        self.smooth_position = position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_underneath_floors_towards_negative_infinity() {
        let mut player = Player::default();
        player.teleport(DVec3::new(-0.5, 64.0, 15.9));
        assert_eq!(player.block_underneath(), BlockPos::new(-1, 63, 15));
        assert_eq!(player.chunk_section(), ChunkSectionPos::new(-1, 4, 0));
    }

    #[test]
    fn heading_comes_from_yaw() {
        let player = Player {
            rotation: PlayerRotation {
                yaw: std::f32::consts::PI,
                pitch: 0.0,
            },
            ..Player::default()
        };
        assert_eq!(player.rotation.heading(), Direction::North);
    }
}

use glam::DVec3;
use quartz_core::{DimensionId, Gamemode, ItemId, ItemStack};
use quartz_world::{BiomeId, Chunk, Game, Player, PlayerRotation, World};

/// Builds a [`Game`] with a player standing in a loaded chunk.
#[derive(Debug, Clone)]
pub struct GameFixture {
    player: Player,
    dimension: DimensionId,
    biome: Option<BiomeId>,
}

impl Default for GameFixture {
    fn default() -> Self {
        let mut player = Player::default();
        player.teleport(DVec3::new(0.5, 64.0, 0.5));
        Self {
            player,
            dimension: DimensionId::Overworld,
            biome: Some(BiomeId::Plains),
        }
    }
}

impl GameFixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(mut self, position: DVec3) -> Self {
        self.player.teleport(position);
        self
    }

    /// Yaw and pitch in degrees.
    pub fn rotation(mut self, yaw: f32, pitch: f32) -> Self {
        self.player.rotation = PlayerRotation {
            yaw: yaw.to_radians(),
            pitch: pitch.to_radians(),
        };
        self
    }

    pub fn gamemode(mut self, gamemode: Gamemode) -> Self {
        self.player.gamemode = gamemode;
        self
    }

    pub fn health(mut self, health: f32) -> Self {
        self.player.health = health;
        self
    }

    pub fn food(mut self, food: i32) -> Self {
        self.player.food = food;
        self
    }

    pub fn hotbar_item(mut self, slot: usize, item: u32, count: u8) -> Self {
        self.player.hotbar[slot] = Some(ItemStack::new(ItemId(item), count));
        self
    }

    pub fn selected_slot(mut self, slot: usize) -> Self {
        self.player.selected_slot = slot;
        self
    }

    pub fn dimension(mut self, dimension: DimensionId) -> Self {
        self.dimension = dimension;
        self
    }

    /// Leave the player's chunk unloaded.
    pub fn unloaded(mut self) -> Self {
        self.biome = None;
        self
    }

    pub fn build(self) -> Game {
        let mut world = World::new(self.dimension);
        if let Some(biome) = self.biome {
            let chunk = self.player.chunk_section().chunk();
            world.insert_chunk(Chunk::new(chunk, biome));
        }
        Game::new(self.player, world)
    }
}

use parking_lot::RwLock;

use crate::{Player, World};

/// Lock-guarded game state shared between the network thread and the renderer.
///
/// Readers pass a closure that runs while the relevant lock is held, so every field it
/// reads belongs to the same snapshot.
#[derive(Debug, Default)]
pub struct Game {
    player: RwLock<Player>,
    world: RwLock<World>,
}

impl Game {
    pub fn new(player: Player, world: World) -> Self {
        Self {
            player: RwLock::new(player),
            world: RwLock::new(world),
        }
    }

    /// Read the player under lock.
    pub fn access_player<R>(&self, read: impl FnOnce(&Player) -> R) -> R {
        read(&*self.player.read())
    }

    /// Mutate the player under lock.
    pub fn update_player<R>(&self, update: impl FnOnce(&mut Player) -> R) -> R {
        update(&mut *self.player.write())
    }

    /// Read the world under lock.
    pub fn access_world<R>(&self, read: impl FnOnce(&World) -> R) -> R {
        read(&*self.world.read())
    }

    /// Mutate the world under lock.
    pub fn update_world<R>(&self, update: impl FnOnce(&mut World) -> R) -> R {
        update(&mut *self.world.write())
    }

    /// Swap in a new world (joining a server or changing dimension).
    pub fn replace_world(&self, world: World) -> World {
        tracing::debug!(dimension = %world.dimension(), "replacing world");
        std::mem::replace(&mut *self.world.write(), world)
    }
}

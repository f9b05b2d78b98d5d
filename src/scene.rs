//! Demo content for the windowed client: a cleared world pass, no entities,
//! and a small loaded area around spawn.

use glam::DVec3;
use quartz_core::{DimensionId, Gamemode, ItemId, ItemStack};
use quartz_render::{ContentRenderer, PassContext, RenderFailure, RendererFactory, WgpuBackend};
use quartz_world::{BiomeId, Chunk, ChunkPos, Game, Player, World};
use tracing::info;

const SPAWN: DVec3 = DVec3::new(0.5, 70.0, 0.5);
const LOADED_RADIUS: i32 = 2;

/// Opens and closes the frame's first render pass so the targets get cleared.
struct ClearPass;

impl ContentRenderer<WgpuBackend> for ClearPass {
    fn render(&mut self, pass: &mut PassContext<'_, WgpuBackend>) -> Result<(), RenderFailure> {
        let render_pass = pass.encoder.begin_pass(&mut *pass.commands, "world");
        drop(render_pass);
        Ok(())
    }
}

struct NoEntities;

impl ContentRenderer<WgpuBackend> for NoEntities {
    fn render(&mut self, _pass: &mut PassContext<'_, WgpuBackend>) -> Result<(), RenderFailure> {
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct DemoFactory {
    world_builds: u32,
}

impl RendererFactory<WgpuBackend> for DemoFactory {
    fn world_renderer(
        &mut self,
        _backend: &WgpuBackend,
        game: &Game,
    ) -> Result<Box<dyn ContentRenderer<WgpuBackend>>, RenderFailure> {
        self.world_builds += 1;
        let chunks = game.access_world(|world| world.len());
        info!(
            generation = self.world_builds,
            chunks, "Built world renderer"
        );
        Ok(Box::new(ClearPass))
    }

    fn entity_renderer(
        &mut self,
        _backend: &WgpuBackend,
        _game: &Game,
    ) -> Result<Box<dyn ContentRenderer<WgpuBackend>>, RenderFailure> {
        Ok(Box::new(NoEntities))
    }
}

/// A survival player at spawn with a few items and the surrounding chunks loaded.
pub fn demo_game() -> Game {
    let mut player = Player::default();
    player.teleport(SPAWN);
    player.gamemode = Gamemode::Survival;
    player.health = 17.0;
    player.food = 14;
    player.experience_progress = 0.35;
    player.hotbar[0] = Some(ItemStack::new(ItemId(276), 1));
    player.hotbar[1] = Some(ItemStack::new(ItemId(1), 64));
    player.hotbar[4] = Some(ItemStack::new(ItemId(297), 12));

    let mut world = World::new(DimensionId::Overworld);
    for x in -LOADED_RADIUS..=LOADED_RADIUS {
        for z in -LOADED_RADIUS..=LOADED_RADIUS {
            let biome = if x < 0 { BiomeId::Forest } else { BiomeId::Plains };
            world.insert_chunk(Chunk::new(ChunkPos::new(x, z), biome));
        }
    }
    Game::new(player, world)
}

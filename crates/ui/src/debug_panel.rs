//! The F3 debug panel.

use glam::DVec3;
use quartz_core::{DimensionId, Gamemode, RenderStatistics, CLIENT_BRAND, GAME_VERSION};
use quartz_world::{BiomeId, BlockPos, ChunkSectionPos, Direction, Game};

use crate::text::TextList;

/// Height of each line of the panel.
pub const DEBUG_ROW_HEIGHT: i32 = 10;

/// Everything the panel shows about the player, read in one pass.
#[derive(Debug, Clone, PartialEq)]
pub struct DebugSnapshot {
    pub position: DVec3,
    pub block: BlockPos,
    pub chunk_section: ChunkSectionPos,
    pub heading: Direction,
    /// Degrees.
    pub yaw: f32,
    /// Degrees.
    pub pitch: f32,
    pub gamemode: Gamemode,
    pub dimension: DimensionId,
    /// `None` when the chunk containing the player is not loaded.
    pub biome: Option<BiomeId>,
}

impl DebugSnapshot {
    pub fn capture(game: &Game) -> Self {
        let (position, block, chunk_section, heading, yaw, pitch, gamemode) =
            game.access_player(|player| {
                (
                    player.position,
                    player.block_underneath(),
                    player.chunk_section(),
                    player.rotation.heading(),
                    player.rotation.yaw.to_degrees(),
                    player.rotation.pitch.to_degrees(),
                    player.gamemode,
                )
            });

        let (dimension, biome) = game.access_world(|world| {
            let biome = world
                .chunk(chunk_section.chunk())
                .map(|chunk| chunk.biome_at(block));
            (world.dimension(), biome)
        });

        Self {
            position,
            block,
            chunk_section,
            heading,
            yaw,
            pitch,
            gamemode,
            dimension,
            biome,
        }
    }
}

/// Build the panel's text. Rebuilt from scratch on every call.
pub fn debug_panel(
    snapshot: &DebugSnapshot,
    statistics: &RenderStatistics,
    spacer_height: i32,
) -> TextList {
    let mut list = TextList::new(DEBUG_ROW_HEIGHT);
    list.add(format!("Minecraft {GAME_VERSION} ({CLIENT_BRAND})"));
    list.add(statistics_line(statistics));
    list.add(format!("Dimension: {}", snapshot.dimension));
    list.add_spacer(spacer_height);

    let position = snapshot.position;
    list.add(format!(
        "XYZ: {:.2} / {:.2} / {:.2}",
        position.x, position.y, position.z
    ));

    let block = snapshot.block;
    list.add(format!("Block: {} {} {}", block.x, block.y, block.z));

    let relative = block.relative_to_chunk();
    list.add(format!(
        "Chunk: {} {} {} in {}",
        relative.x, relative.y, relative.z, snapshot.chunk_section
    ));

    let heading = snapshot.heading;
    let sign = if heading.is_positive() {
        "positive"
    } else {
        "negative"
    };
    list.add(format!(
        "Facing: {heading} (Towards {sign} {}) ({:.1} / {:.1})",
        heading.axis(),
        snapshot.yaw,
        snapshot.pitch
    ));

    let biome = snapshot
        .biome
        .map_or("not loaded", |biome| biome.identifier());
    list.add(format!("Biome: {biome}"));

    list.add(format!("Gamemode: {}", snapshot.gamemode.display_name()));
    list
}

fn statistics_line(statistics: &RenderStatistics) -> String {
    let theoretical = statistics
        .average_theoretical_fps
        .map(|fps| format!(" ({fps} theoretical)"))
        .unwrap_or_default();
    let gpu = statistics
        .average_gpu_ms()
        .map(|ms| format!(", {ms:.2}ms gpu"))
        .unwrap_or_default();
    format!(
        "{:.0} fps{theoretical} ({:.2}ms cpu{gpu})",
        statistics.average_fps,
        statistics.average_cpu_ms()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use quartz_world::{Chunk, Player, PlayerRotation, World};

    fn game_at(position: DVec3, loaded: bool) -> Game {
        let mut player = Player::default();
        player.teleport(position);
        player.rotation = PlayerRotation {
            yaw: 180f32.to_radians(),
            pitch: 12.5f32.to_radians(),
        };
        player.gamemode = Gamemode::Creative;

        let mut world = World::new(DimensionId::Overworld);
        if loaded {
            let block = player.block_underneath();
            world.insert_chunk(Chunk::new(block.chunk(), BiomeId::Plains));
        }
        Game::new(player, world)
    }

    fn lines(list: &TextList) -> Vec<String> {
        list.lines().map(str::to_owned).collect()
    }

    #[test]
    fn missing_chunk_shows_not_loaded() {
        let snapshot = DebugSnapshot::capture(&game_at(DVec3::new(0.5, 70.0, 0.5), false));
        let list = debug_panel(&snapshot, &RenderStatistics::default(), 6);
        assert!(lines(&list).contains(&"Biome: not loaded".to_string()));
    }

    #[test]
    fn panel_lines_follow_the_fixed_format() {
        let snapshot = DebugSnapshot::capture(&game_at(DVec3::new(-20.25, 64.5, 33.3), true));
        let statistics = RenderStatistics {
            average_cpu_time: 0.004,
            average_gpu_time: Some(0.002),
            average_fps: 59.6,
            average_theoretical_fps: Some(235),
        };
        let list = debug_panel(&snapshot, &statistics, 6);

        assert_eq!(
            lines(&list),
            [
                format!("Minecraft {GAME_VERSION} ({CLIENT_BRAND})"),
                "60 fps (235 theoretical) (4.00ms cpu, 2.00ms gpu)".to_string(),
                "Dimension: minecraft:overworld".to_string(),
                "XYZ: -20.25 / 64.50 / 33.30".to_string(),
                "Block: -21 63 33".to_string(),
                "Chunk: 11 63 1 in -2 4 2".to_string(),
                "Facing: north (Towards negative z) (180.0 / 12.5)".to_string(),
                "Biome: minecraft:plains".to_string(),
                "Gamemode: Creative".to_string(),
            ]
        );
    }

    #[test]
    fn spacer_follows_the_statistics_block() {
        let snapshot = DebugSnapshot::capture(&game_at(DVec3::ZERO, true));
        let list = debug_panel(&snapshot, &RenderStatistics::default(), 9);
        assert_eq!(list.rows()[3], crate::text::TextRow::Spacer(9));
    }

    #[test]
    fn optional_timings_are_omitted() {
        let statistics = RenderStatistics {
            average_cpu_time: 0.01,
            average_gpu_time: None,
            average_fps: 100.0,
            average_theoretical_fps: None,
        };
        assert_eq!(statistics_line(&statistics), "100 fps (10.00ms cpu)");
    }
}

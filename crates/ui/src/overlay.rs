//! Per-frame overlay: HUD, debug panel and crosshair.

use std::sync::Arc;
use std::time::Duration;

use glam::IVec2;
use quartz_core::{Clock, Gamemode, ItemStack, RenderStatistics};
use quartz_world::{Game, HOTBAR_SLOTS};

use crate::composite::{ExperienceBar, StatBar};
use crate::constraint::{ConstraintPair, HorizontalConstraint, VerticalConstraint};
use crate::debug_panel::{debug_panel, DebugSnapshot};
use crate::element::{GuiContext, ItemIcon, LayoutElement};
use crate::geometry::GeometryBatch;
use crate::group::{GroupBuilder, GroupElement};
use crate::sprite::Sprite;
use crate::throttle::{StatisticsThrottle, DEFAULT_STATISTICS_INTERVAL};

/// Size of the area holding the hotbar and the bars above it.
pub const HOTBAR_AREA_SIZE: IVec2 = IVec2::new(184, 40);

/// Horizontal distance between hotbar slots.
const SLOT_SPACING: i32 = 20;

/// Tunables for [`OverlayBuilder`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlaySettings {
    pub show_debug_screen: bool,
    /// Height of the gap after the statistics block of the debug panel.
    pub debug_spacer_height: i32,
    /// Physical pixels per layout unit.
    pub gui_scale: i32,
    pub statistics_interval: Duration,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            show_debug_screen: false,
            debug_spacer_height: 6,
            gui_scale: 2,
            statistics_interval: DEFAULT_STATISTICS_INTERVAL,
        }
    }
}

/// What the HUD needs from the player, read under one lock.
#[derive(Debug, Clone, PartialEq)]
struct HudSnapshot {
    gamemode: Gamemode,
    health: i32,
    food: i32,
    experience_progress: f32,
    hotbar: [Option<ItemStack>; HOTBAR_SLOTS],
    selected_slot: usize,
}

impl HudSnapshot {
    fn capture(game: &Game) -> Self {
        game.access_player(|player| Self {
            gamemode: player.gamemode,
            health: player.health.round() as i32,
            food: player.food,
            experience_progress: player.experience_progress,
            hotbar: player.hotbar,
            selected_slot: player.selected_slot,
        })
    }
}

/// Assembles the overlay tree every frame from the live game state.
#[derive(Debug)]
pub struct OverlayBuilder {
    context: GuiContext,
    throttle: StatisticsThrottle,
    settings: OverlaySettings,
}

impl OverlayBuilder {
    pub fn new(context: GuiContext, clock: Arc<dyn Clock>, settings: OverlaySettings) -> Self {
        Self {
            context,
            throttle: StatisticsThrottle::new(clock, settings.statistics_interval),
            settings,
        }
    }

    pub fn context(&self) -> &GuiContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut GuiContext {
        &mut self.context
    }

    pub fn settings(&self) -> &OverlaySettings {
        &self.settings
    }

    /// Offer the latest frame statistics. The debug panel only picks them up once the
    /// throttle interval has passed.
    pub fn set_render_statistics(&mut self, statistics: RenderStatistics) {
        self.throttle.observe(statistics);
    }

    /// Statistics currently shown by the debug panel.
    pub fn displayed_statistics(&self) -> RenderStatistics {
        self.throttle.saved()
    }

    pub fn debug_screen_shown(&self) -> bool {
        self.settings.show_debug_screen
    }

    /// Flip the debug panel and return whether it is now shown.
    pub fn toggle_debug_screen(&mut self) -> bool {
        self.settings.show_debug_screen = !self.settings.show_debug_screen;
        tracing::debug!(shown = self.settings.show_debug_screen, "debug screen toggled");
        self.settings.show_debug_screen
    }

    /// Size of the root group for a viewport in physical pixels.
    pub fn root_size(&self, viewport: IVec2) -> IVec2 {
        viewport / self.settings.gui_scale.max(1)
    }

    /// Build the overlay tree for the current game state.
    pub fn build(&self, game: &Game, viewport: IVec2) -> GroupElement {
        let mut root = GroupElement::builder(self.root_size(viewport));

        if self.settings.show_debug_screen {
            let snapshot = DebugSnapshot::capture(game);
            let panel = debug_panel(
                &snapshot,
                &self.throttle.saved(),
                self.settings.debug_spacer_height,
            );
            root.add(panel, ConstraintPair::position(4, 4));
        }

        root.add(
            hotbar_area(&HudSnapshot::capture(game)),
            ConstraintPair::new(VerticalConstraint::Bottom(-1), HorizontalConstraint::Center),
        );
        root.add(Sprite::Crosshair, ConstraintPair::CENTER);

        root.build()
    }

    /// Build the overlay and emit its geometry.
    pub fn meshes(&self, game: &Game, viewport: IVec2) -> Vec<GeometryBatch> {
        let overlay = LayoutElement::from(self.build(game, viewport));
        let batches = overlay.meshes(&self.context);
        tracing::trace!(batches = batches.len(), "overlay geometry built");
        batches
    }
}

fn hotbar_area(hud: &HudSnapshot) -> GroupElement {
    let mut area = GroupElement::builder(HOTBAR_AREA_SIZE);

    if hud.gamemode.has_health() {
        add_stat_bars(&mut area, hud);
    }

    area.add(
        Sprite::Hotbar,
        ConstraintPair::new(VerticalConstraint::Bottom(1), HorizontalConstraint::Center),
    );
    area.add(
        Sprite::SelectedHotbarSlot,
        ConstraintPair::new(
            VerticalConstraint::Bottom(0),
            HorizontalConstraint::Left(SLOT_SPACING * hud.selected_slot as i32),
        ),
    );

    for (slot, stack) in hud.hotbar.iter().enumerate() {
        let Some(stack) = stack else {
            continue;
        };
        area.add(
            ItemIcon::new(stack.item),
            ConstraintPair::new(
                VerticalConstraint::Bottom(4),
                HorizontalConstraint::Left(SLOT_SPACING * slot as i32 + 4),
            ),
        );
    }

    area.build()
}

fn add_stat_bars(area: &mut GroupBuilder, hud: &HudSnapshot) {
    area.add(
        StatBar::hearts(hud.health),
        ConstraintPair::new(VerticalConstraint::Top(0), HorizontalConstraint::Left(1)),
    );
    area.add(
        StatBar::food(hud.food),
        ConstraintPair::new(VerticalConstraint::Top(0), HorizontalConstraint::Right(1)),
    );
    area.add(
        ExperienceBar {
            progress: hud.experience_progress,
        },
        ConstraintPair::new(VerticalConstraint::Top(10), HorizontalConstraint::Center),
    );
}

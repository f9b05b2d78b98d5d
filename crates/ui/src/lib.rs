//! Anchor-based layout for the in-game overlay.
//!
//! Overlays are trees of [`LayoutElement`]s. Groups have a fixed declared size and place
//! each child with a [`ConstraintPair`] when the tree is emitted; emission turns the tree
//! into [`GeometryBatch`]es ready for upload.

mod composite;
mod constraint;
mod debug_panel;
mod element;
mod error;
mod geometry;
mod group;
mod overlay;
mod sprite;
mod text;
mod throttle;

pub use composite::{
    Composite, ExperienceBar, IconDirection, StatBar, STAT_BAR_ICONS, STAT_BAR_SIZE,
};
pub use constraint::{Constraint, ConstraintPair, HorizontalConstraint, VerticalConstraint};
pub use debug_panel::{debug_panel, DebugSnapshot, DEBUG_ROW_HEIGHT};
pub use element::{GuiContext, ItemIcon, LayoutElement, ITEM_ICON_SIZE};
pub use error::LayoutError;
pub use geometry::{GeometryBatch, GeometryBuilder, GuiVertex, Quad, TextureSource};
pub use group::{GroupBuilder, GroupChild, GroupElement};
pub use overlay::{OverlayBuilder, OverlaySettings, HOTBAR_AREA_SIZE};
pub use sprite::{GuiSheet, Sprite, SpriteDescriptor};
pub use text::{Font, Glyph, TextList, TextRow, GLYPH_HEIGHT};
pub use throttle::{StatisticsThrottle, DEFAULT_STATISTICS_INTERVAL};

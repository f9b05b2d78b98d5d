#![warn(missing_docs)]
//! Core primitives shared across the client workspace.

pub mod clock;
pub mod dimension;
pub mod event;
pub mod gamemode;
pub mod stats;

use serde::{Deserialize, Serialize};

pub use clock::{Clock, ManualClock, SystemClock};
pub use dimension::DimensionId;
pub use event::{ClientEvent, ErrorEvent, EventBus, SubscriptionId};
pub use gamemode::Gamemode;
pub use stats::RenderStatistics;

/// Game version the client speaks.
pub const GAME_VERSION: &str = "1.16.1";

/// Client name shown next to the game version.
pub const CLIENT_BRAND: &str = "Quartz";

/// Numeric item identifier as sent by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub u32);

/// Stack of items occupying an inventory slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    /// Item in the slot.
    pub item: ItemId,
    /// Number of items (1-64).
    pub count: u8,
}

impl ItemStack {
    /// Create a stack of `count` items.
    pub const fn new(item: ItemId, count: u8) -> Self {
        Self { item, count }
    }
}

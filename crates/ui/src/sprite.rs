use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Sprite sheet inside the GUI array texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GuiSheet {
    /// `gui/icons.png`: crosshair, hearts, food, experience bar.
    Icons,
    /// `gui/widgets.png`: hotbar and slot highlight.
    Widgets,
}

impl GuiSheet {
    /// Layer of the sheet within the GUI array texture.
    pub const fn layer(self) -> u32 {
        match self {
            Self::Icons => 0,
            Self::Widgets => 1,
        }
    }
}

/// A rectangle of a GUI sheet drawn at its natural size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpriteDescriptor {
    pub sheet: GuiSheet,
    /// Top-left pixel in the sheet.
    pub position: IVec2,
    /// Size in pixels, both in the sheet and on screen.
    pub size: IVec2,
}

impl SpriteDescriptor {
    pub const fn new(sheet: GuiSheet, position: IVec2, size: IVec2) -> Self {
        Self {
            sheet,
            position,
            size,
        }
    }
}

/// Sprites used by the in-game overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sprite {
    Crosshair,
    Hotbar,
    SelectedHotbarSlot,
    HeartOutline,
    FullHeart,
    HalfHeart,
    FoodOutline,
    FullFood,
    HalfFood,
    XpBarBackground,
    XpBarForeground,
}

impl Sprite {
    pub const fn descriptor(self) -> SpriteDescriptor {
        use GuiSheet::{Icons, Widgets};

        let (sheet, x, y, width, height) = match self {
            Sprite::Crosshair => (Icons, 0, 0, 15, 15),
            Sprite::Hotbar => (Widgets, 0, 0, 182, 22),
            Sprite::SelectedHotbarSlot => (Widgets, 0, 22, 24, 24),
            Sprite::HeartOutline => (Icons, 16, 0, 9, 9),
            Sprite::FullHeart => (Icons, 52, 0, 9, 9),
            Sprite::HalfHeart => (Icons, 61, 0, 9, 9),
            Sprite::FoodOutline => (Icons, 16, 27, 9, 9),
            Sprite::FullFood => (Icons, 52, 27, 9, 9),
            Sprite::HalfFood => (Icons, 61, 27, 9, 9),
            Sprite::XpBarBackground => (Icons, 0, 64, 182, 5),
            Sprite::XpBarForeground => (Icons, 0, 69, 182, 5),
        };

        SpriteDescriptor::new(sheet, IVec2::new(x, y), IVec2::new(width, height))
    }
}

impl From<Sprite> for SpriteDescriptor {
    fn from(sprite: Sprite) -> Self {
        sprite.descriptor()
    }
}

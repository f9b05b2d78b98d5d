//! The layout tree.
//!
//! Every node can report its size and emit quads at a resolved origin. The set of node
//! kinds is closed so a tree can be serialized, compared and tested without a GPU.

use std::collections::HashMap;

use glam::IVec2;
use quartz_core::ItemId;
use serde::{Deserialize, Serialize};

use crate::composite::{Composite, ExperienceBar, StatBar};
use crate::geometry::{GeometryBatch, GeometryBuilder, Quad, TextureSource};
use crate::group::GroupElement;
use crate::sprite::{Sprite, SpriteDescriptor};
use crate::text::{Font, TextList};

/// Size of an item icon.
pub const ITEM_ICON_SIZE: i32 = 16;

/// Resources needed to measure and emit elements.
#[derive(Debug, Clone, Default)]
pub struct GuiContext {
    pub font: Font,
    item_layers: HashMap<ItemId, u32>,
}

impl GuiContext {
    pub fn new(font: Font) -> Self {
        Self {
            font,
            item_layers: HashMap::new(),
        }
    }

    /// Register the item texture layer used to draw `item`.
    pub fn register_item(&mut self, item: ItemId, layer: u32) {
        self.item_layers.insert(item, layer);
    }

    pub fn item_layer(&self, item: ItemId) -> Option<u32> {
        self.item_layers.get(&item).copied()
    }
}

/// Inventory item drawn as a 16x16 icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemIcon {
    pub item: ItemId,
}

impl ItemIcon {
    pub const fn new(item: ItemId) -> Self {
        Self { item }
    }
}

/// Any node of the layout tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LayoutElement {
    Sprite(SpriteDescriptor),
    Text(TextList),
    Group(GroupElement),
    Item(ItemIcon),
    Composite(Composite),
}

impl LayoutElement {
    /// Size of the element in layout units.
    pub fn measure(&self, context: &GuiContext) -> IVec2 {
        match self {
            LayoutElement::Sprite(sprite) => sprite.size,
            LayoutElement::Text(list) => list.measure(&context.font),
            LayoutElement::Group(group) => group.size(),
            LayoutElement::Item(_) => IVec2::splat(ITEM_ICON_SIZE),
            LayoutElement::Composite(composite) => composite.size(),
        }
    }

    /// Append this element's quads, with its top-left corner at `origin`.
    pub fn emit(&self, origin: IVec2, context: &GuiContext, out: &mut GeometryBuilder) {
        match self {
            LayoutElement::Sprite(sprite) => out.push(
                TextureSource::Gui,
                Quad {
                    position: origin,
                    size: sprite.size,
                    uv_origin: sprite.position,
                    uv_size: sprite.size,
                    layer: sprite.sheet.layer(),
                    tint: Quad::WHITE,
                },
            ),
            LayoutElement::Text(list) => list.emit(origin, &context.font, out),
            LayoutElement::Group(group) => group.emit(origin, context, out),
            LayoutElement::Item(icon) => match context.item_layer(icon.item) {
                Some(layer) => out.push(
                    TextureSource::Items,
                    Quad {
                        position: origin,
                        size: IVec2::splat(ITEM_ICON_SIZE),
                        uv_origin: IVec2::ZERO,
                        uv_size: IVec2::splat(ITEM_ICON_SIZE),
                        layer,
                        tint: Quad::WHITE,
                    },
                ),
                None => tracing::trace!(item = icon.item.0, "no texture for item, skipping"),
            },
            LayoutElement::Composite(composite) => composite.to_group().emit(origin, context, out),
        }
    }

    /// Emit the whole element at the origin and return the batches.
    pub fn meshes(&self, context: &GuiContext) -> Vec<GeometryBatch> {
        let mut out = GeometryBuilder::new();
        self.emit(IVec2::ZERO, context, &mut out);
        out.finish()
    }
}

impl From<Sprite> for LayoutElement {
    fn from(sprite: Sprite) -> Self {
        LayoutElement::Sprite(sprite.descriptor())
    }
}

impl From<SpriteDescriptor> for LayoutElement {
    fn from(sprite: SpriteDescriptor) -> Self {
        LayoutElement::Sprite(sprite)
    }
}

impl From<TextList> for LayoutElement {
    fn from(list: TextList) -> Self {
        LayoutElement::Text(list)
    }
}

impl From<GroupElement> for LayoutElement {
    fn from(group: GroupElement) -> Self {
        LayoutElement::Group(group)
    }
}

impl From<ItemIcon> for LayoutElement {
    fn from(icon: ItemIcon) -> Self {
        LayoutElement::Item(icon)
    }
}

impl From<Composite> for LayoutElement {
    fn from(composite: Composite) -> Self {
        LayoutElement::Composite(composite)
    }
}

impl From<StatBar> for LayoutElement {
    fn from(bar: StatBar) -> Self {
        LayoutElement::Composite(Composite::StatBar(bar))
    }
}

impl From<ExperienceBar> for LayoutElement {
    fn from(bar: ExperienceBar) -> Self {
        LayoutElement::Composite(Composite::ExperienceBar(bar))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sprites_sample_their_sheet_region() {
        let context = GuiContext::default();
        let element = LayoutElement::from(Sprite::FullHeart);
        assert_eq!(element.measure(&context), IVec2::new(9, 9));

        let batches = element.meshes(&context);
        let quad = batches[0].quads[0];
        assert_eq!(batches[0].texture, TextureSource::Gui);
        assert_eq!(quad.uv_origin, IVec2::new(52, 0));
        assert_eq!(quad.layer, 0);
    }

    #[test]
    fn unknown_items_emit_nothing() {
        let mut context = GuiContext::default();
        context.register_item(ItemId(1), 7);

        let known = LayoutElement::from(ItemIcon::new(ItemId(1)));
        let unknown = LayoutElement::from(ItemIcon::new(ItemId(2)));

        assert_eq!(unknown.measure(&context), IVec2::splat(16));
        assert!(unknown.meshes(&context).is_empty());
        assert_eq!(known.meshes(&context)[0].quads[0].layer, 7);
    }

    #[test]
    fn bars_convert_into_composites() {
        let context = GuiContext::default();
        let hearts = LayoutElement::from(StatBar::hearts(7));
        let xp = LayoutElement::from(ExperienceBar { progress: 0.5 });

        assert_eq!(
            hearts,
            LayoutElement::Composite(Composite::StatBar(StatBar::hearts(7)))
        );
        assert_eq!(hearts.measure(&context), IVec2::new(81, 9));
        assert_eq!(xp.measure(&context), IVec2::new(182, 5));
    }
}

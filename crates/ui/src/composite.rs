//! Widgets assembled from primitive elements: stat bars and the experience bar.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::constraint::{ConstraintPair, HorizontalConstraint, VerticalConstraint};
use crate::group::GroupElement;
use crate::sprite::Sprite;

/// Number of icons in a stat bar.
pub const STAT_BAR_ICONS: i32 = 10;

/// Horizontal distance between consecutive icons.
const ICON_SPACING: i32 = 8;

/// Size of a stat bar: ten 9-pixel icons overlapping by one pixel.
pub const STAT_BAR_SIZE: IVec2 = IVec2::new(81, 9);

/// Edge of the bar that icon 0 sits at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IconDirection {
    /// Icons fill from the left edge (health).
    LeftToRight,
    /// Icons fill from the right edge (food).
    RightToLeft,
}

impl IconDirection {
    pub fn constraint(self, offset: i32) -> HorizontalConstraint {
        match self {
            IconDirection::LeftToRight => HorizontalConstraint::Left(offset),
            IconDirection::RightToLeft => HorizontalConstraint::Right(offset),
        }
    }
}

/// Ten-icon bar showing a value in 0..=20 with half-icon granularity.
///
/// `value` is expected to already be within 0..=20; it is not clamped here. Values
/// above 20 show ten full icons, negative values show only outlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatBar {
    pub value: i32,
    pub outline: Sprite,
    pub full_icon: Sprite,
    pub half_icon: Sprite,
    pub direction: IconDirection,
    /// When false, outlines past the last filled or half icon are the only ones drawn.
    pub always_has_outline: bool,
}

impl StatBar {
    pub fn hearts(value: i32) -> Self {
        Self {
            value,
            outline: Sprite::HeartOutline,
            full_icon: Sprite::FullHeart,
            half_icon: Sprite::HalfHeart,
            direction: IconDirection::LeftToRight,
            always_has_outline: true,
        }
    }

    pub fn food(value: i32) -> Self {
        Self {
            value,
            outline: Sprite::FoodOutline,
            full_icon: Sprite::FullFood,
            half_icon: Sprite::HalfFood,
            direction: IconDirection::RightToLeft,
            always_has_outline: true,
        }
    }

    pub fn to_group(&self) -> GroupElement {
        let mut group = GroupElement::builder(STAT_BAR_SIZE);

        let full_icon_count = self.value / 2;
        let has_half_icon = self.value % 2 == 1;
        for i in 0..STAT_BAR_ICONS {
            let position = ConstraintPair::new(
                VerticalConstraint::Top(0),
                self.direction.constraint(i * ICON_SPACING),
            );

            if self.always_has_outline || i > full_icon_count {
                group.add(self.outline, position);
            }

            if i < full_icon_count {
                group.add(self.full_icon, position);
            } else if i == full_icon_count && has_half_icon {
                group.add(self.half_icon, position);
            }
        }

        group.build()
    }
}

/// Experience bar: background plus a foreground cut to `progress` of its width.
///
/// `progress` is expected in 0..=1 and is not clamped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExperienceBar {
    pub progress: f32,
}

impl ExperienceBar {
    pub fn size() -> IVec2 {
        Sprite::XpBarBackground.descriptor().size
    }

    pub fn to_group(&self) -> GroupElement {
        let mut group = GroupElement::builder(Self::size());
        group.add(Sprite::XpBarBackground, ConstraintPair::position(0, 0));

        let mut foreground = Sprite::XpBarForeground.descriptor();
        foreground.size.x = (foreground.size.x as f32 * self.progress).floor() as i32;
        group.add(foreground, ConstraintPair::position(0, 0));

        group.build()
    }
}

/// Widgets that expand into a [`GroupElement`] when measured or emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Composite {
    StatBar(StatBar),
    ExperienceBar(ExperienceBar),
}

impl Composite {
    pub fn size(&self) -> IVec2 {
        match self {
            Composite::StatBar(_) => STAT_BAR_SIZE,
            Composite::ExperienceBar(_) => ExperienceBar::size(),
        }
    }

    pub fn to_group(&self) -> GroupElement {
        match self {
            Composite::StatBar(bar) => bar.to_group(),
            Composite::ExperienceBar(bar) => bar.to_group(),
        }
    }
}

impl From<StatBar> for Composite {
    fn from(bar: StatBar) -> Self {
        Composite::StatBar(bar)
    }
}

impl From<ExperienceBar> for Composite {
    fn from(bar: ExperienceBar) -> Self {
        Composite::ExperienceBar(bar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{GuiContext, LayoutElement};
    use std::collections::HashSet;

    fn sprites_and_slots(bar: &StatBar) -> Vec<(Sprite, IVec2)> {
        let context = GuiContext::default();
        let group = bar.to_group();
        let origins = group.child_origins(&context);
        group
            .children()
            .iter()
            .zip(origins)
            .map(|(child, origin)| {
                let sprite = [
                    bar.outline,
                    bar.full_icon,
                    bar.half_icon,
                ]
                .into_iter()
                .find(|sprite| LayoutElement::from(*sprite) == child.element)
                .unwrap();
                (sprite, origin)
            })
            .collect()
    }

    fn slots_with(entries: &[(Sprite, IVec2)], sprite: Sprite) -> Vec<i32> {
        entries
            .iter()
            .filter(|(s, _)| *s == sprite)
            .map(|(_, origin)| origin.x / ICON_SPACING)
            .collect()
    }

    #[test]
    fn odd_value_ends_with_a_half_icon() {
        let bar = StatBar::hearts(7);
        let entries = sprites_and_slots(&bar);

        assert_eq!(slots_with(&entries, Sprite::FullHeart), [0, 1, 2]);
        assert_eq!(slots_with(&entries, Sprite::HalfHeart), [3]);
        assert_eq!(
            slots_with(&entries, Sprite::HeartOutline),
            (0..10).collect::<Vec<_>>()
        );

        let slots: HashSet<_> = entries.iter().map(|(_, origin)| *origin).collect();
        assert_eq!(slots.len(), 10);
    }

    #[test]
    fn zero_value_is_outlines_only() {
        let entries = sprites_and_slots(&StatBar::hearts(0));
        assert_eq!(entries.len(), 10);
        assert!(entries.iter().all(|(sprite, _)| *sprite == Sprite::HeartOutline));
    }

    #[test]
    fn outline_sits_under_its_icon() {
        let bar = StatBar::hearts(20);
        let group = bar.to_group();
        let children = group.children();

        // Outline first, then the full icon, for each slot.
        assert_eq!(children.len(), 20);
        assert_eq!(children[0].element, LayoutElement::from(Sprite::HeartOutline));
        assert_eq!(children[1].element, LayoutElement::from(Sprite::FullHeart));
        assert_eq!(children[0].constraints, children[1].constraints);
    }

    #[test]
    fn food_fills_from_the_right() {
        let entries = sprites_and_slots(&StatBar::food(2));
        let full: Vec<_> = entries
            .iter()
            .filter(|(sprite, _)| *sprite == Sprite::FullFood)
            .map(|(_, origin)| origin.x)
            .collect();
        assert_eq!(full, [72]);
    }

    #[test]
    fn outlines_can_be_limited_to_the_empty_tail() {
        let bar = StatBar {
            always_has_outline: false,
            ..StatBar::hearts(7)
        };
        let entries = sprites_and_slots(&bar);
        assert_eq!(slots_with(&entries, Sprite::HeartOutline), [4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn experience_foreground_is_floored() {
        let group = ExperienceBar { progress: 0.5 }.to_group();
        let foreground = &group.children()[1].element;
        let context = GuiContext::default();
        assert_eq!(foreground.measure(&context), IVec2::new(91, 5));

        let group = ExperienceBar { progress: 0.999 }.to_group();
        assert_eq!(group.children()[1].element.measure(&context), IVec2::new(181, 5));
        assert_eq!(group.size(), IVec2::new(182, 5));
    }
}

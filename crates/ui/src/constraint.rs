//! Anchor constraints positioning an element inside its parent.
//!
//! All arithmetic is integral. Centering uses Rust's integer division, which truncates
//! towards zero, so identical inputs always resolve to identical positions.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::LayoutError;

/// Horizontal anchor. Offsets are in layout units and may be negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HorizontalConstraint {
    /// Left edge `offset` units from the parent's left edge.
    Left(i32),
    /// Right edge `offset` units from the parent's right edge.
    Right(i32),
    /// Centered horizontally.
    Center,
}

impl HorizontalConstraint {
    /// Resolve to an x coordinate relative to the parent's left edge.
    pub fn resolve(self, parent_width: i32, child_width: i32) -> i32 {
        match self {
            Self::Left(offset) => offset,
            Self::Right(offset) => parent_width - child_width - offset,
            Self::Center => (parent_width - child_width) / 2,
        }
    }
}

/// Vertical anchor. Offsets are in layout units and may be negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerticalConstraint {
    /// Top edge `offset` units below the parent's top edge.
    Top(i32),
    /// Bottom edge `offset` units above the parent's bottom edge.
    Bottom(i32),
    /// Centered vertically.
    Center,
}

impl VerticalConstraint {
    /// Resolve to a y coordinate relative to the parent's top edge.
    pub fn resolve(self, parent_height: i32, child_height: i32) -> i32 {
        match self {
            Self::Top(offset) => offset,
            Self::Bottom(offset) => parent_height - child_height - offset,
            Self::Center => (parent_height - child_height) / 2,
        }
    }
}

/// A single anchor on either axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Constraint {
    Top(i32),
    Bottom(i32),
    Left(i32),
    Right(i32),
    /// Ambiguous on its own: centers on whichever axis is not otherwise constrained.
    Center,
}

impl From<HorizontalConstraint> for Constraint {
    fn from(constraint: HorizontalConstraint) -> Self {
        match constraint {
            HorizontalConstraint::Left(offset) => Constraint::Left(offset),
            HorizontalConstraint::Right(offset) => Constraint::Right(offset),
            HorizontalConstraint::Center => Constraint::Center,
        }
    }
}

impl From<VerticalConstraint> for Constraint {
    fn from(constraint: VerticalConstraint) -> Self {
        match constraint {
            VerticalConstraint::Top(offset) => Constraint::Top(offset),
            VerticalConstraint::Bottom(offset) => Constraint::Bottom(offset),
            VerticalConstraint::Center => Constraint::Center,
        }
    }
}

/// One vertical and one horizontal anchor; together they fix an element's origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConstraintPair {
    pub vertical: VerticalConstraint,
    pub horizontal: HorizontalConstraint,
}

impl ConstraintPair {
    /// Centered on both axes.
    pub const CENTER: Self = Self::new(VerticalConstraint::Center, HorizontalConstraint::Center);

    pub const fn new(vertical: VerticalConstraint, horizontal: HorizontalConstraint) -> Self {
        Self {
            vertical,
            horizontal,
        }
    }

    /// Top-left anchored at `(x, y)`.
    pub const fn position(x: i32, y: i32) -> Self {
        Self::new(VerticalConstraint::Top(y), HorizontalConstraint::Left(x))
    }

    /// Build a pair from two untyped anchors given in any order.
    ///
    /// Two anchors on the same axis are rejected. `Center` fills whichever axis the other
    /// anchor leaves open; two `Center`s center on both axes.
    pub fn from_constraints(first: Constraint, second: Constraint) -> Result<Self, LayoutError> {
        use Constraint::*;

        let vertical = |constraint: Constraint| match constraint {
            Top(offset) => Some(VerticalConstraint::Top(offset)),
            Bottom(offset) => Some(VerticalConstraint::Bottom(offset)),
            _ => None,
        };
        let horizontal = |constraint: Constraint| match constraint {
            Left(offset) => Some(HorizontalConstraint::Left(offset)),
            Right(offset) => Some(HorizontalConstraint::Right(offset)),
            _ => None,
        };

        match (first, second) {
            (Center, Center) => Ok(Self::CENTER),
            (Center, other) | (other, Center) => match (vertical(other), horizontal(other)) {
                (Some(v), _) => Ok(Self::new(v, HorizontalConstraint::Center)),
                (_, Some(h)) => Ok(Self::new(VerticalConstraint::Center, h)),
                _ => Err(LayoutError::SameAxis(first, second)),
            },
            _ => match (
                vertical(first).or(vertical(second)),
                horizontal(first).or(horizontal(second)),
            ) {
                (Some(v), Some(h)) => Ok(Self::new(v, h)),
                _ => Err(LayoutError::SameAxis(first, second)),
            },
        }
    }

    /// Origin of a `child` sized element inside a `parent` sized one.
    pub fn resolve(self, parent: IVec2, child: IVec2) -> IVec2 {
        IVec2::new(
            self.horizontal.resolve(parent.x, child.x),
            self.vertical.resolve(parent.y, child.y),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn edge_anchors_measure_from_their_edge() {
        let parent = IVec2::new(184, 40);
        let child = IVec2::new(182, 22);

        let pair = ConstraintPair::new(VerticalConstraint::Bottom(1), HorizontalConstraint::Center);
        assert_eq!(pair.resolve(parent, child), IVec2::new(1, 17));

        let pair = ConstraintPair::new(VerticalConstraint::Top(0), HorizontalConstraint::Right(1));
        assert_eq!(pair.resolve(parent, IVec2::new(81, 9)), IVec2::new(102, 0));
    }

    #[test]
    fn negative_offsets_push_outside_the_parent() {
        let pair =
            ConstraintPair::new(VerticalConstraint::Bottom(-1), HorizontalConstraint::Left(-3));
        let origin = pair.resolve(IVec2::new(100, 100), IVec2::new(10, 10));
        assert_eq!(origin, IVec2::new(-3, 91));
    }

    #[test]
    fn centering_truncates_towards_zero() {
        let pair = ConstraintPair::CENTER;
        assert_eq!(pair.resolve(IVec2::new(15, 15), IVec2::new(2, 2)), IVec2::new(6, 6));
        // Child larger than parent: -3 / 2 truncates to -1.
        assert_eq!(pair.resolve(IVec2::new(10, 10), IVec2::new(13, 13)), IVec2::new(-1, -1));
    }

    #[test]
    fn untyped_constraints_pair_up_in_any_order() {
        assert_eq!(
            ConstraintPair::from_constraints(Constraint::Bottom(-1), Constraint::Center),
            Ok(ConstraintPair::new(
                VerticalConstraint::Bottom(-1),
                HorizontalConstraint::Center
            ))
        );
        assert_eq!(
            ConstraintPair::from_constraints(Constraint::Left(4), Constraint::Top(4)),
            Ok(ConstraintPair::position(4, 4))
        );
        assert_eq!(
            ConstraintPair::from_constraints(Constraint::Center, Constraint::Right(2)),
            Ok(ConstraintPair::new(
                VerticalConstraint::Center,
                HorizontalConstraint::Right(2)
            ))
        );
        assert_eq!(
            ConstraintPair::from_constraints(Constraint::Center, Constraint::Center),
            Ok(ConstraintPair::CENTER)
        );
    }

    #[test]
    fn two_anchors_on_one_axis_are_rejected() {
        assert!(matches!(
            ConstraintPair::from_constraints(Constraint::Top(0), Constraint::Bottom(0)),
            Err(LayoutError::SameAxis(..))
        ));
        assert!(matches!(
            ConstraintPair::from_constraints(Constraint::Left(1), Constraint::Right(1)),
            Err(LayoutError::SameAxis(..))
        ));
    }

    fn edge_pair() -> impl Strategy<Value = (VerticalConstraint, HorizontalConstraint)> {
        (
            prop_oneof![Just(VerticalConstraint::Top(0)), Just(VerticalConstraint::Bottom(0))],
            prop_oneof![
                Just(HorizontalConstraint::Left(0)),
                Just(HorizontalConstraint::Right(0))
            ],
        )
    }

    proptest! {
        /// Zero-offset edge anchors keep a child that fits entirely inside its parent.
        #[test]
        fn zero_offset_edges_stay_inside(
            (vertical, horizontal) in edge_pair(),
            child_w in 0i32..500,
            child_h in 0i32..500,
            extra_w in 0i32..500,
            extra_h in 0i32..500,
        ) {
            let parent = IVec2::new(child_w + extra_w, child_h + extra_h);
            let child = IVec2::new(child_w, child_h);
            let origin = ConstraintPair::new(vertical, horizontal).resolve(parent, child);

            prop_assert!(origin.x >= 0 && origin.x <= parent.x - child.x);
            prop_assert!(origin.y >= 0 && origin.y <= parent.y - child.y);
        }

        /// Centering is exactly the truncated half of the leftover space, every time.
        #[test]
        fn center_is_reproducible(
            parent_w in 0i32..2000,
            parent_h in 0i32..2000,
            child_w in 0i32..2000,
            child_h in 0i32..2000,
        ) {
            let parent = IVec2::new(parent_w, parent_h);
            let child = IVec2::new(child_w, child_h);
            let first = ConstraintPair::CENTER.resolve(parent, child);
            let second = ConstraintPair::CENTER.resolve(parent, child);

            prop_assert_eq!(first, second);
            prop_assert_eq!(first.x, (parent_w - child_w) / 2);
            prop_assert_eq!(first.y, (parent_h - child_h) / 2);
        }
    }
}

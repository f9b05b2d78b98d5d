use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::constraint::ConstraintPair;
use crate::element::{GuiContext, LayoutElement};
use crate::geometry::GeometryBuilder;

/// A child and the anchors positioning it within its group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupChild {
    pub element: LayoutElement,
    pub constraints: ConstraintPair,
}

/// Fixed-size container of anchored children.
///
/// The size is declared up front and never derived from the children; children may
/// overflow it. Children are drawn in insertion order, later ones on top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupElement {
    size: IVec2,
    children: Vec<GroupChild>,
}

impl GroupElement {
    /// Start building a group of the given size.
    pub fn builder(size: IVec2) -> GroupBuilder {
        GroupBuilder {
            group: GroupElement {
                size,
                children: Vec::new(),
            },
        }
    }

    /// Declared size.
    pub fn size(&self) -> IVec2 {
        self.size
    }

    pub fn children(&self) -> &[GroupChild] {
        &self.children
    }

    /// Resolve every child against this group and emit it.
    pub fn emit(&self, origin: IVec2, context: &GuiContext, out: &mut GeometryBuilder) {
        for child in &self.children {
            let child_size = child.element.measure(context);
            let offset = child.constraints.resolve(self.size, child_size);
            child.element.emit(origin + offset, context, out);
        }
    }

    /// Top-left corner of every child relative to this group, in draw order.
    pub fn child_origins(&self, context: &GuiContext) -> Vec<IVec2> {
        self.children
            .iter()
            .map(|child| {
                child
                    .constraints
                    .resolve(self.size, child.element.measure(context))
            })
            .collect()
    }
}

/// Owned, mutable stage of a [`GroupElement`]. Consumed by [`GroupBuilder::build`].
#[derive(Debug, Clone)]
pub struct GroupBuilder {
    group: GroupElement,
}

impl GroupBuilder {
    /// Append a child. Layout is resolved when the group is emitted.
    pub fn add(&mut self, element: impl Into<LayoutElement>, constraints: ConstraintPair) {
        self.group.children.push(GroupChild {
            element: element.into(),
            constraints,
        });
    }

    pub fn size(&self) -> IVec2 {
        self.group.size
    }

    pub fn build(self) -> GroupElement {
        self.group
    }
}

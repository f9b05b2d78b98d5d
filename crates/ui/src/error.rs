use thiserror::Error;

use crate::constraint::Constraint;

/// Errors raised while building a layout tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// Both constraints of a pair anchor the same axis.
    #[error("constraints {0:?} and {1:?} anchor the same axis")]
    SameAxis(Constraint, Constraint),
}

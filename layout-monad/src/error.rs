use std::fmt;

/// Failure to resolve a layout's value.
///
/// Layout names are kept in their `Debug` rendering so that a single error
/// type can travel across [`crate::LayoutMonad::map_layouts`], where the
/// layout type changes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LayoutError {
    /// The layout is not part of the monad's layout set.
    KeyNotFound { layout: String },
    /// An explicit layout list named a layout with no thunk to back it.
    MissingThunk { layout: String },
}

impl LayoutError {
    pub(crate) fn key_not_found(layout: &impl fmt::Debug) -> Self {
        LayoutError::KeyNotFound {
            layout: format!("{layout:?}"),
        }
    }

    pub(crate) fn missing_thunk(layout: &impl fmt::Debug) -> Self {
        LayoutError::MissingThunk {
            layout: format!("{layout:?}"),
        }
    }
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::KeyNotFound { layout } => write!(f, "layout {layout} not found"),
            LayoutError::MissingThunk { layout } => {
                write!(f, "no thunk provided for layout {layout}")
            }
        }
    }
}

impl std::error::Error for LayoutError {}

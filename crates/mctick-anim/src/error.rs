//! Errors raised by [`crate::AnimationManager`].

use std::fmt;

/// Argument and state errors surfaced by the animation manager.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ManagerError {
    /// `create_*` was called with a name already present in the catalog.
    DuplicateName {
        /// The offending name.
        name: String,
    },
    /// An operation referenced a shape name that is not in the catalog.
    UnknownShape {
        /// The offending name.
        name: String,
    },
    /// A mutating call was made after `precompute()` froze the manager.
    AlreadyPrecomputed,
    /// `precompute()` was called a second time.
    PrecomputeTwice,
    /// `precompute()` was called with no shapes registered.
    EmptyCatalog,
    /// A `max_tick` override was smaller than the animation horizon.
    OverrideBelowHorizon {
        /// The requested override.
        requested: u64,
        /// The minimum horizon implied by registered shapes.
        horizon: u64,
    },
    /// A shape constructor or trajectory call rejected its arguments.
    InvalidArgument {
        /// The underlying geometry/tick-range complaint.
        reason: String,
    },
}

impl fmt::Display for ManagerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateName { name } => write!(f, "shape {name:?} already exists"),
            Self::UnknownShape { name } => write!(f, "shape {name:?} not found"),
            Self::AlreadyPrecomputed => {
                write!(f, "animate state already precomputed; no further modifications allowed")
            }
            Self::PrecomputeTwice => write!(f, "animations already precomputed"),
            Self::EmptyCatalog => write!(f, "no shapes to precompute"),
            Self::OverrideBelowHorizon { requested, horizon } => write!(
                f,
                "max_tick {requested} is smaller than animation horizon {horizon}"
            ),
            Self::InvalidArgument { reason } => write!(f, "invalid argument: {reason}"),
        }
    }
}

impl std::error::Error for ManagerError {}

impl From<mctick_shapes::shape::ShapeError> for ManagerError {
    fn from(e: mctick_shapes::shape::ShapeError) -> Self {
        Self::InvalidArgument {
            reason: e.to_string(),
        }
    }
}

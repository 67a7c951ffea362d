//! Network error types.
//!
//! These errors represent precondition violations: inputs that would break
//! the layered structure if applied. Expected conditions such as removing a
//! stop that isn't there are not errors; the mutators report them as no-ops.

use super::{LayerKind, Location};

/// Errors from building or mutating a [`Network`](crate::network::Network).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NetworkError {
    /// A stop refers to a location the layer beneath doesn't have
    #[error("{layer} stop at {location} has no matching location in the layer beneath")]
    UnknownLocation { layer: LayerKind, location: Location },

    /// Stops were not given in strictly increasing order
    #[error("{layer} stop at {location} is out of order (stops must strictly increase)")]
    Unordered { layer: LayerKind, location: Location },

    /// A stop in the layer above would lose its down-link
    #[error("{layer} stop at {location} would have nothing to drop down to")]
    Unreachable { layer: LayerKind, location: Location },

    /// The finest layer can't gain or lose stops
    #[error("the {0} layer is the finest layer and cannot be modified")]
    TerminalLayer(LayerKind),

    /// A stop is still the down-target of a coarser stop
    #[error("{layer} stop at {location} is still referenced by the layer above")]
    StillReferenced { layer: LayerKind, location: Location },

    /// Layer index is out of bounds
    #[error("layer index {0} is out of bounds")]
    InvalidLayerIndex(usize),

    /// A new layer can only go strictly between two existing layers
    #[error("cannot insert a layer at position {0}")]
    InvalidLayerPosition(usize),

    /// The structure violates one of its invariants
    #[error("corrupt network: {0}")]
    Corrupt(String),
}

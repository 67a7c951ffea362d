//! Domain types for the layered transit network.
//!
//! This module contains the small value types shared by every part of the
//! network engine: physical locations, node identities, layer kinds and the
//! error type for precondition violations.

mod error;
mod layer;
mod location;

pub use error::NetworkError;
pub use layer::LayerKind;
pub use location::{Location, NodeId};

//! Location and node identity types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A physical point on the network.
///
/// Locations are shared across layers: the train station at location 3, the
/// bus stop at location 3 and the walking location 3 are the same place at
/// different granularities. Location 0 is reserved for layer sentinels.
///
/// # Examples
///
/// ```
/// use transit_network::domain::Location;
///
/// let loc = Location(4);
/// assert_eq!(loc.0, 4);
/// assert!(Location::ZERO < loc);
/// assert!(Location::ZERO.is_sentinel());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Location(pub u32);

impl Location {
    /// The location every layer's sentinel sits at.
    pub const ZERO: Location = Location(0);

    /// Returns true for the sentinel location.
    pub fn is_sentinel(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Location {
    fn from(value: u32) -> Self {
        Location(value)
    }
}

impl From<Location> for u32 {
    fn from(value: Location) -> Self {
        value.0
    }
}

/// Identity of a node within one [`Network`](crate::network::Network).
///
/// Locations repeat across layers, so anything that needs to tell two nodes
/// apart (path membership, for instance) compares `NodeId`s. An id is only
/// meaningful for the network that issued it; a duplicated network hands out
/// its own ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Returns the raw arena slot.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_location() {
        assert!(Location::ZERO.is_sentinel());
        assert!(!Location(1).is_sentinel());
        assert_eq!(Location::default(), Location::ZERO);
    }

    #[test]
    fn location_ordering() {
        assert!(Location(2) < Location(3));
        assert_eq!(Location(5).cmp(&Location(5)), std::cmp::Ordering::Equal);
    }

    #[test]
    fn location_conversions() {
        let loc: Location = 7.into();
        assert_eq!(loc, Location(7));
        assert_eq!(u32::from(loc), 7);
    }

    #[test]
    fn display() {
        assert_eq!(Location(12).to_string(), "12");
        assert_eq!(NodeId(3).to_string(), "#3");
    }

    #[test]
    fn serde_transparent() {
        let json = serde_json::to_string(&Location(9)).unwrap();
        assert_eq!(json, "9");
        let back: Location = serde_json::from_str("9").unwrap();
        assert_eq!(back, Location(9));
    }
}

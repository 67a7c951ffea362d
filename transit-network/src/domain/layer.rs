//! Layer kinds.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The mode of transport a layer represents.
///
/// Coarser modes sit higher in the stack: a journey rides trains first, then
/// buses, scooters and finally walks the last stretch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    Train,
    Bus,
    Scooter,
    Walking,
}

impl LayerKind {
    /// Returns the lowercase name of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            LayerKind::Train => "train",
            LayerKind::Bus => "bus",
            LayerKind::Scooter => "scooter",
            LayerKind::Walking => "walking",
        }
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(LayerKind::Train.to_string(), "train");
        assert_eq!(LayerKind::Bus.to_string(), "bus");
        assert_eq!(LayerKind::Scooter.to_string(), "scooter");
        assert_eq!(LayerKind::Walking.to_string(), "walking");
    }

    #[test]
    fn serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&LayerKind::Scooter).unwrap(),
            "\"scooter\""
        );
        let kind: LayerKind = serde_json::from_str("\"bus\"").unwrap();
        assert_eq!(kind, LayerKind::Bus);
    }
}

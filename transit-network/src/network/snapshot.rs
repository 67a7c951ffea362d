//! Structural snapshots.
//!
//! A snapshot captures everything observable about a network's shape (layer
//! kinds, locations and where each node drops down to) without node
//! identities, so two networks can be compared structurally and a network
//! can be reported as JSON.

use serde::{Deserialize, Serialize};

use super::Network;
use crate::domain::{LayerKind, Location};

/// One node: its location and the location it drops down to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopSnapshot {
    pub location: Location,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub down: Option<Location>,
}

/// One layer, sentinel included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerSnapshot {
    pub kind: LayerKind,
    pub stops: Vec<StopSnapshot>,
}

impl LayerSnapshot {
    /// Returns the layer's locations in order.
    pub fn locations(&self) -> Vec<Location> {
        self.stops.iter().map(|s| s.location).collect()
    }
}

/// The whole network, coarsest layer first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub layers: Vec<LayerSnapshot>,
}

impl Network {
    /// Capture the network's current structure.
    pub fn snapshot(&self) -> Snapshot {
        let layers = self
            .layers
            .iter()
            .enumerate()
            .map(|(index, layer)| LayerSnapshot {
                kind: layer.kind,
                stops: self
                    .stops(index)
                    .map(|id| StopSnapshot {
                        location: self.location(id),
                        down: self.down(id).map(|down| self.location(down)),
                    })
                    .collect(),
            })
            .collect();

        Snapshot { layers }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::test_support::sample;

    #[test]
    fn snapshot_shape() {
        let snapshot = sample().snapshot();

        assert_eq!(snapshot.layers.len(), 3);
        assert_eq!(snapshot.layers[0].kind, LayerKind::Train);
        assert_eq!(
            snapshot.layers[1].locations(),
            vec![Location(0), Location(2), Location(3), Location(5), Location(7)]
        );
        assert!(snapshot.layers[2].stops.iter().all(|s| s.down.is_none()));
        assert!(
            snapshot.layers[0]
                .stops
                .iter()
                .all(|s| s.down == Some(s.location))
        );
    }

    #[test]
    fn snapshot_json() {
        let network = Network::build(&[1], &[1], 1).unwrap();
        let json = serde_json::to_value(network.snapshot()).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "layers": [
                    {"kind": "train", "stops": [
                        {"location": 0, "down": 0},
                        {"location": 1, "down": 1}
                    ]},
                    {"kind": "bus", "stops": [
                        {"location": 0, "down": 0},
                        {"location": 1, "down": 1}
                    ]},
                    {"kind": "walking", "stops": [
                        {"location": 0},
                        {"location": 1}
                    ]}
                ]
            })
        );

        let back: Snapshot = serde_json::from_value(json).unwrap();
        assert_eq!(back, network.snapshot());
    }

    #[test]
    fn snapshots_differ_after_mutation() {
        let mut network = sample();
        let before = network.snapshot();

        network.add_bus_stop(4);

        assert_ne!(network.snapshot(), before);
    }
}

//! Deep copies.

use std::collections::HashMap;

use tracing::debug;

use super::{Layer, Network};
use crate::domain::{Location, NodeId};

impl Network {
    /// Produce an independent copy of the network.
    ///
    /// The copy has the same layers, locations and down-links, but its own
    /// nodes: mutating one never affects the other. Layers are copied from
    /// the finest up, and each copied node's down-link is resolved against
    /// the freshly copied layer beneath it. Stops removed from the source
    /// are left behind, so the copy's arena is compact.
    pub fn duplicate(&self) -> Network {
        let mut copy = Network {
            nodes: Vec::with_capacity(self.node_count()),
            layers: Vec::with_capacity(self.layers.len()),
        };

        let mut beneath: HashMap<Location, NodeId> = HashMap::new();
        for layer in self.layers.iter().rev() {
            let mut copied: HashMap<Location, NodeId> = HashMap::new();
            let mut tail: Option<NodeId> = None;

            for id in self.chain(layer.sentinel) {
                let source = self.node(id);
                let new_id = copy.alloc(source.location);
                copy.node_mut(new_id).down = source
                    .down
                    .and_then(|_| beneath.get(&source.location).copied());
                if let Some(tail) = tail {
                    copy.node_mut(tail).next = Some(new_id);
                }
                copied.insert(source.location, new_id);
                tail = Some(new_id);
            }

            // The chain always yields the sentinel first
            if let Some(&sentinel) = copied.get(&Location::ZERO) {
                copy.layers.push(Layer {
                    kind: layer.kind,
                    sentinel,
                });
            }
            beneath = copied;
        }
        copy.layers.reverse();

        debug!(
            layers = copy.layers.len(),
            nodes = copy.nodes.len(),
            dropped = self.nodes.len() - copy.nodes.len(),
            "Duplicated network"
        );

        copy
    }
}

impl Clone for Network {
    fn clone(&self) -> Self {
        self.duplicate()
    }
}

//! The layered transit network.
//!
//! A network is a stack of linked layers, coarsest (trains) at the top and
//! finest (walking) at the bottom. Every layer is a forward chain that starts
//! at a location-0 sentinel and visits strictly increasing locations. Each
//! node in a coarser layer drops down to the node at the same location in the
//! layer directly beneath it; several coarser nodes may share a down target.
//!
//! Nodes live in an arena and refer to each other by [`NodeId`], so fan-in is
//! just two nodes holding the same index. The layers themselves are a
//! first-class list of sentinel handles, which turns "splice a new layer in"
//! into a list insertion plus one re-resolution pass over the layer above.

mod build;
mod duplicate;
mod mutate;
mod path;
mod snapshot;

use std::collections::HashSet;

use crate::domain::{LayerKind, Location, NetworkError, NodeId};

pub use build::NetworkBuilder;
pub use path::Path;
pub use snapshot::{LayerSnapshot, Snapshot, StopSnapshot};

/// One stop in one layer.
#[derive(Debug, Clone)]
struct Node {
    location: Location,
    next: Option<NodeId>,
    down: Option<NodeId>,
}

/// Handle for a layer: its kind and the sentinel its chain starts at.
#[derive(Debug, Clone, Copy)]
struct Layer {
    kind: LayerKind,
    sentinel: NodeId,
}

/// Read-only view of a layer, for traversal by renderers and reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerRef {
    /// Position in the stack, 0 being the root (coarsest) layer.
    pub index: usize,
    pub kind: LayerKind,
    /// The layer's location-0 node.
    pub sentinel: NodeId,
}

/// A layered transit network.
///
/// Built once with [`Network::build`] (or [`NetworkBuilder`]), then queried
/// and mutated in place. A network always has at least three layers, and the
/// finest one holds every location from 1 up to [`Network::walking_count`]
/// without gaps.
///
/// # Examples
///
/// ```
/// use transit_network::domain::Location;
/// use transit_network::network::Network;
///
/// let network = Network::build(&[3, 7], &[2, 3, 5, 7], 8).unwrap();
///
/// assert_eq!(network.layer_count(), 3);
/// assert_eq!(
///     network.locations(0),
///     vec![Location(0), Location(3), Location(7)]
/// );
/// ```
#[derive(Debug)]
pub struct Network {
    /// Arena storage. Removed stops stay here, unreachable, until the next
    /// duplicate compacts them away.
    nodes: Vec<Node>,

    /// Layers from coarsest to finest. Never empty.
    layers: Vec<Layer>,
}

impl Network {
    fn alloc(&mut self, location: Location) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            location,
            next: None,
            down: None,
        });
        id
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    fn layer_handle(&self, index: usize) -> Result<Layer, NetworkError> {
        self.layers
            .get(index)
            .copied()
            .ok_or(NetworkError::InvalidLayerIndex(index))
    }

    fn is_finest(&self, index: usize) -> bool {
        index + 1 == self.layers.len()
    }

    /// Walks the chain starting at `start` looking for `location`.
    fn find_in_chain(&self, start: NodeId, location: Location) -> Option<NodeId> {
        self.chain(start).find(|&id| self.node(id).location == location)
    }

    fn chain(&self, start: NodeId) -> Stops<'_> {
        Stops {
            network: self,
            cursor: Some(start),
        }
    }

    /// Returns the root sentinel (the coarsest layer's location-0 node).
    pub fn root(&self) -> NodeId {
        self.layers[0].sentinel
    }

    /// Returns the number of layers.
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Returns the layer at `index`, if any.
    pub fn layer(&self, index: usize) -> Option<LayerRef> {
        self.layers.get(index).map(|layer| LayerRef {
            index,
            kind: layer.kind,
            sentinel: layer.sentinel,
        })
    }

    /// Iterates over the layers from coarsest to finest.
    pub fn layers(&self) -> impl Iterator<Item = LayerRef> + '_ {
        (0..self.layers.len()).filter_map(|index| self.layer(index))
    }

    /// Returns the index of the first (coarsest) layer of the given kind.
    pub fn layer_of_kind(&self, kind: LayerKind) -> Option<usize> {
        self.layers.iter().position(|layer| layer.kind == kind)
    }

    /// Returns the location of a node.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this network.
    pub fn location(&self, id: NodeId) -> Location {
        self.node(id).location
    }

    /// Returns the next node along the node's layer.
    pub fn next(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).next
    }

    /// Returns the node one layer down at the same location.
    pub fn down(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).down
    }

    /// Iterates over a layer's nodes, sentinel first.
    ///
    /// An out-of-range index yields nothing.
    pub fn stops(&self, layer: usize) -> Stops<'_> {
        Stops {
            network: self,
            cursor: self.layers.get(layer).map(|l| l.sentinel),
        }
    }

    /// Returns the locations along a layer, sentinel included.
    pub fn locations(&self, layer: usize) -> Vec<Location> {
        self.stops(layer).map(|id| self.location(id)).collect()
    }

    /// Finds the node at `location` in a layer.
    pub fn find(&self, layer: usize, location: Location) -> Option<NodeId> {
        let sentinel = self.layers.get(layer)?.sentinel;
        self.find_in_chain(sentinel, location)
    }

    /// Returns the number of walking locations (the finest layer's last
    /// location).
    pub fn walking_count(&self) -> u32 {
        self.stops(self.layers.len() - 1)
            .last()
            .map_or(0, |id| self.location(id).0)
    }

    /// Returns the number of nodes reachable from the layer sentinels.
    pub fn node_count(&self) -> usize {
        (0..self.layers.len()).map(|i| self.stops(i).count()).sum()
    }

    /// Verifies every structural invariant of the network.
    ///
    /// Checks that:
    /// - each layer starts at a location-0 sentinel, and the sentinels chain
    ///   down layer by layer
    /// - locations strictly increase along each layer
    /// - every non-sentinel node above the finest layer drops down to a node
    ///   at the same location in the layer directly beneath
    /// - the finest layer holds `1..=N` without gaps and has no down-links
    pub fn check_invariants(&self) -> Result<(), NetworkError> {
        if self.layers.is_empty() {
            return Err(NetworkError::Corrupt("network has no layers".into()));
        }

        let mut members: Vec<HashSet<NodeId>> = Vec::with_capacity(self.layers.len());
        for (index, layer) in self.layers.iter().enumerate() {
            let mut seen = HashSet::new();
            let mut cursor = Some(layer.sentinel);
            while let Some(id) = cursor {
                if id.0 >= self.nodes.len() {
                    return Err(NetworkError::Corrupt(format!(
                        "{} layer links to unknown node {id}",
                        layer.kind
                    )));
                }
                if !seen.insert(id) {
                    return Err(NetworkError::Corrupt(format!(
                        "{} layer (index {index}) contains a cycle",
                        layer.kind
                    )));
                }
                cursor = self.node(id).next;
            }
            members.push(seen);
        }

        for (index, layer) in self.layers.iter().enumerate() {
            let sentinel = self.node(layer.sentinel);
            if !sentinel.location.is_sentinel() {
                return Err(NetworkError::Corrupt(format!(
                    "{} layer starts at {} instead of 0",
                    layer.kind, sentinel.location
                )));
            }

            let expected_down = self.layers.get(index + 1).map(|l| l.sentinel);
            if sentinel.down != expected_down {
                return Err(NetworkError::Corrupt(format!(
                    "{} sentinel does not drop down to the next layer's sentinel",
                    layer.kind
                )));
            }

            let finest = self.is_finest(index);
            let mut previous: Option<Location> = None;
            for (position, id) in self.chain(layer.sentinel).enumerate() {
                let node = self.node(id);

                if let Some(prev) = previous.filter(|&prev| node.location <= prev) {
                    return Err(NetworkError::Corrupt(format!(
                        "{} layer is out of order: {} follows {}",
                        layer.kind, node.location, prev
                    )));
                }
                previous = Some(node.location);

                if finest {
                    if node.down.is_some() {
                        return Err(NetworkError::Corrupt(format!(
                            "{} location {} in the finest layer has a down-link",
                            layer.kind, node.location
                        )));
                    }
                    if node.location.0 as usize != position {
                        return Err(NetworkError::Corrupt(format!(
                            "{} layer has a gap before {}",
                            layer.kind, node.location
                        )));
                    }
                    continue;
                }

                if node.location.is_sentinel() {
                    continue;
                }

                let Some(down) = node.down else {
                    return Err(NetworkError::Corrupt(format!(
                        "{} stop at {} has no down-link",
                        layer.kind, node.location
                    )));
                };
                if !members[index + 1].contains(&down) {
                    return Err(NetworkError::Corrupt(format!(
                        "{} stop at {} drops down outside the layer beneath",
                        layer.kind, node.location
                    )));
                }
                if self.node(down).location != node.location {
                    return Err(NetworkError::Corrupt(format!(
                        "{} stop at {} drops down to location {}",
                        layer.kind,
                        node.location,
                        self.node(down).location
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Iterator over the nodes of one layer, following `next` links.
pub struct Stops<'a> {
    network: &'a Network,
    cursor: Option<NodeId>,
}

impl Iterator for Stops<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.cursor?;
        self.cursor = self.network.node(id).next;
        Some(id)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use proptest::prelude::*;

    /// The three-layer network used throughout the tests.
    pub fn sample() -> Network {
        Network::build(&[3, 7], &[2, 3, 5, 7], 8).unwrap()
    }

    pub fn locs(network: &Network, layer: usize) -> Vec<u32> {
        network.locations(layer).into_iter().map(|l| l.0).collect()
    }

    /// Strategy for a consistent (train, bus, walking_count) input.
    pub fn network_input() -> impl Strategy<Value = (Vec<u32>, Vec<u32>, u32)> {
        (1u32..40)
            .prop_flat_map(|count| {
                (
                    Just(count),
                    proptest::collection::btree_set(1..=count, 0..count as usize),
                )
            })
            .prop_flat_map(|(count, bus)| {
                let bus: Vec<u32> = bus.into_iter().collect();
                let n = bus.len();
                (
                    Just(count),
                    Just(bus),
                    proptest::collection::vec(any::<bool>(), n),
                )
            })
            .prop_map(|(count, bus, keep)| {
                let train = bus
                    .iter()
                    .zip(keep)
                    .filter_map(|(&stop, keep)| keep.then_some(stop))
                    .collect();
                (train, bus, count)
            })
    }
}

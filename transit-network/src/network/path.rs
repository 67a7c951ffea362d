//! Layer-by-layer path search.
//!
//! The search rides each layer as far as it can without passing the
//! destination, then drops down and continues in the next finer layer. In the
//! finest layer it walks hop by hop until it reaches the destination exactly.

use tracing::trace;

use super::Network;
use crate::domain::{Location, NetworkError, NodeId};

/// The nodes visited on the way to a destination, in visiting order.
///
/// Membership is by node identity: the same location appears in several
/// layers, and a renderer highlighting the path needs to know which of those
/// nodes were actually visited.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Path {
    nodes: Vec<NodeId>,
}

impl Path {
    /// Returns the visited nodes in order.
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Returns true if the path visits this exact node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the node the path ends at.
    pub fn last(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }

    /// Returns the location of each visited node.
    pub fn locations(&self, network: &Network) -> Vec<Location> {
        self.nodes.iter().map(|&id| network.location(id)).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NodeId> {
        self.nodes.iter()
    }
}

impl IntoIterator for Path {
    type Item = NodeId;
    type IntoIter = std::vec::IntoIter<NodeId>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.into_iter()
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a NodeId;
    type IntoIter = std::slice::Iter<'a, NodeId>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

impl Network {
    /// Find the nodes visited when travelling from the root to `destination`.
    ///
    /// `destination` must be a location in the finest layer (0 included).
    /// The path is not deduplicated: a hand-off node and the node it drops
    /// down to are both recorded.
    pub fn best_path(&self, destination: u32) -> Result<Path, NetworkError> {
        let destination = Location(destination);
        let finest = self.layers.len() - 1;
        if self.find(finest, destination).is_none() {
            return Err(NetworkError::UnknownLocation {
                layer: self.layers[finest].kind,
                location: destination,
            });
        }

        let mut nodes = Vec::new();
        let mut cursor = self.root();

        for layer in &self.layers[..finest] {
            let hand_off = self.ride(cursor, destination, &mut nodes);
            trace!(
                layer = %layer.kind,
                hand_off = self.node(hand_off).location.0,
                "Dropping down"
            );
            cursor = self.node(hand_off).down.ok_or_else(|| {
                NetworkError::Corrupt(format!(
                    "{} stop at {} has no down-link",
                    layer.kind,
                    self.node(hand_off).location
                ))
            })?;
        }

        self.walk(cursor, destination, &mut nodes);

        Ok(Path { nodes })
    }

    /// Rides a layer forward from `start` while the next stop doesn't pass
    /// `destination`, recording each node, and returns the hand-off node.
    fn ride(&self, start: NodeId, destination: Location, nodes: &mut Vec<NodeId>) -> NodeId {
        let mut prev = start;
        let mut current = self.node(prev).next;

        while let Some(id) = current {
            nodes.push(prev);
            if self.node(id).location > destination {
                return prev;
            }
            prev = id;
            current = self.node(id).next;
        }

        nodes.push(prev);
        prev
    }

    /// Walks the finest layer from `start` until reaching `destination`.
    fn walk(&self, start: NodeId, destination: Location, nodes: &mut Vec<NodeId>) {
        let mut prev = start;
        let mut current = self.node(prev).next;

        while let Some(id) = current {
            nodes.push(prev);
            if self.node(prev).location == destination {
                return;
            }
            prev = id;
            current = self.node(id).next;
        }

        nodes.push(prev);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::test_support::sample;

    /// (layer index, location) for each visited node.
    fn visits(network: &Network, path: &Path) -> Vec<(usize, u32)> {
        path.iter()
            .map(|&id| {
                let layer = (0..network.layer_count())
                    .find(|&l| network.stops(l).any(|n| n == id))
                    .unwrap();
                (layer, network.location(id).0)
            })
            .collect()
    }

    #[test]
    fn path_to_six() {
        let network = sample();
        let path = network.best_path(6).unwrap();

        assert_eq!(
            visits(&network, &path),
            vec![(0, 0), (0, 3), (1, 3), (1, 5), (2, 5), (2, 6)]
        );
    }

    #[test]
    fn path_to_last_location() {
        let network = sample();
        let path = network.best_path(8).unwrap();

        assert_eq!(
            visits(&network, &path),
            vec![
                (0, 0),
                (0, 3),
                (0, 7),
                (1, 7),
                (2, 7),
                (2, 8)
            ]
        );
        assert_eq!(network.location(path.last().unwrap()), Location(8));
    }

    #[test]
    fn path_to_train_station() {
        let network = sample();
        let path = network.best_path(7).unwrap();

        assert_eq!(
            visits(&network, &path),
            vec![(0, 0), (0, 3), (0, 7), (1, 7), (2, 7)]
        );
    }

    #[test]
    fn path_before_every_stop() {
        let network = sample();
        let path = network.best_path(1).unwrap();

        assert_eq!(visits(&network, &path), vec![(0, 0), (1, 0), (2, 0), (2, 1)]);
    }

    #[test]
    fn path_to_zero_is_only_sentinels() {
        let network = sample();
        let path = network.best_path(0).unwrap();

        assert_eq!(path.len(), 3);
        assert!(path.locations(&network).iter().all(|l| l.is_sentinel()));
        assert_eq!(path.nodes()[0], network.root());
    }

    #[test]
    fn path_through_empty_upper_layers() {
        let network = Network::build(&[], &[], 5).unwrap();
        let path = network.best_path(4).unwrap();

        assert_eq!(
            visits(&network, &path),
            vec![(0, 0), (1, 0), (2, 0), (2, 1), (2, 2), (2, 3), (2, 4)]
        );
    }

    #[test]
    fn path_through_scooter_layer() {
        let mut network = sample();
        network.add_layer(&[2, 3, 5, 6, 7]).unwrap();

        let path = network.best_path(6).unwrap();

        assert_eq!(
            visits(&network, &path),
            vec![(0, 0), (0, 3), (1, 3), (1, 5), (2, 5), (2, 6), (3, 6)]
        );
    }

    #[test]
    fn path_after_removing_station() {
        let mut network = sample();
        network.remove_train_station(3);

        let path = network.best_path(6).unwrap();

        assert_eq!(
            visits(&network, &path),
            vec![(0, 0), (1, 0), (1, 2), (1, 3), (1, 5), (2, 5), (2, 6)]
        );
    }

    #[test]
    fn membership_is_by_identity() {
        let network = sample();
        let path = network.best_path(6).unwrap();

        let train3 = network.find(0, Location(3)).unwrap();
        let bus3 = network.find(1, Location(3)).unwrap();
        let walk3 = network.find(2, Location(3)).unwrap();

        assert!(path.contains(train3));
        assert!(path.contains(bus3));
        assert!(!path.contains(walk3));
    }

    #[test]
    fn unknown_destination() {
        let network = sample();

        assert!(matches!(
            network.best_path(9),
            Err(NetworkError::UnknownLocation { .. })
        ));
    }

    #[test]
    fn path_iteration() {
        let network = sample();
        let path = network.best_path(2).unwrap();

        let by_ref: Vec<NodeId> = (&path).into_iter().copied().collect();
        let owned: Vec<NodeId> = path.clone().into_iter().collect();
        assert_eq!(by_ref, owned);
        assert!(!path.is_empty());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::network::test_support::network_input;
    use proptest::prelude::*;

    proptest! {
        /// Every path ends at the exact destination in the finest layer
        #[test]
        fn path_ends_at_destination(
            (train, bus, count) in network_input(),
            pick in any::<prop::sample::Index>(),
        ) {
            let network = Network::build(&train, &bus, count).unwrap();
            let destination = pick.index(count as usize + 1) as u32;

            let path = network.best_path(destination).unwrap();
            let last = path.last().unwrap();

            prop_assert_eq!(network.location(last), Location(destination));
            prop_assert!(network.stops(2).any(|id| id == last));
        }

        /// Locations never decrease along a path, and never pass the destination
        #[test]
        fn path_is_monotonic(
            (train, bus, count) in network_input(),
            pick in any::<prop::sample::Index>(),
        ) {
            let network = Network::build(&train, &bus, count).unwrap();
            let destination = pick.index(count as usize + 1) as u32;

            let locations = network.best_path(destination).unwrap().locations(&network);
            for pair in locations.windows(2) {
                prop_assert!(pair[0] <= pair[1]);
            }
            prop_assert!(locations.iter().all(|l| l.0 <= destination));
        }
    }
}

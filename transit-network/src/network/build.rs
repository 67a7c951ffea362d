//! Building the initial three-layer network.

use tracing::debug;

use super::{Layer, Network};
use crate::domain::{LayerKind, Location, NetworkError, NodeId};

impl Network {
    /// Build a train/bus/walking network.
    ///
    /// Walking locations are numbered `1..=walking_count`. Bus stops and
    /// train stations must be given in strictly increasing order, every bus
    /// stop must be a walking location, and every train station must also be
    /// a bus stop, so each station can drop down exactly one layer.
    ///
    /// Inputs are validated before anything is built; on error no network
    /// is produced.
    pub fn build(
        train_stations: &[u32],
        bus_stops: &[u32],
        walking_count: u32,
    ) -> Result<Self, NetworkError> {
        validate_order(LayerKind::Bus, bus_stops, walking_count)?;
        validate_order(LayerKind::Train, train_stations, walking_count)?;
        for &station in train_stations {
            if bus_stops.binary_search(&station).is_err() {
                return Err(NetworkError::UnknownLocation {
                    layer: LayerKind::Train,
                    location: Location(station),
                });
            }
        }

        let capacity = 3 + train_stations.len() + bus_stops.len() + walking_count as usize;
        let mut network = Network {
            nodes: Vec::with_capacity(capacity),
            layers: Vec::with_capacity(3),
        };

        let train_zero = network.alloc(Location::ZERO);
        let bus_zero = network.alloc(Location::ZERO);
        let walk_zero = network.alloc(Location::ZERO);
        network.node_mut(train_zero).down = Some(bus_zero);
        network.node_mut(bus_zero).down = Some(walk_zero);

        // Location -> the node a coarser stop at that location drops down to.
        // Starts out as the walking node; a bus stop takes over its slot so
        // that train stations resolve to the bus stop instead.
        let mut lookup: Vec<NodeId> = Vec::with_capacity(walking_count as usize);

        let mut tail = walk_zero;
        for location in 1..=walking_count {
            let id = network.alloc(Location(location));
            network.node_mut(tail).next = Some(id);
            lookup.push(id);
            tail = id;
        }

        let mut tail = bus_zero;
        for &stop in bus_stops {
            let slot = stop as usize - 1;
            let id = network.alloc(Location(stop));
            network.node_mut(id).down = Some(lookup[slot]);
            network.node_mut(tail).next = Some(id);
            lookup[slot] = id;
            tail = id;
        }

        let mut tail = train_zero;
        for &station in train_stations {
            let id = network.alloc(Location(station));
            network.node_mut(id).down = Some(lookup[station as usize - 1]);
            network.node_mut(tail).next = Some(id);
            tail = id;
        }

        network.layers.extend([
            Layer {
                kind: LayerKind::Train,
                sentinel: train_zero,
            },
            Layer {
                kind: LayerKind::Bus,
                sentinel: bus_zero,
            },
            Layer {
                kind: LayerKind::Walking,
                sentinel: walk_zero,
            },
        ]);

        debug!(
            train_stations = train_stations.len(),
            bus_stops = bus_stops.len(),
            walking_count,
            "Built transit network"
        );

        Ok(network)
    }
}

/// Checks that stops are walking locations in strictly increasing order.
fn validate_order(
    layer: LayerKind,
    stops: &[u32],
    walking_count: u32,
) -> Result<(), NetworkError> {
    let mut previous = Location::ZERO;
    for &stop in stops {
        let location = Location(stop);
        if location.is_sentinel() || stop > walking_count {
            return Err(NetworkError::UnknownLocation { layer, location });
        }
        if location <= previous {
            return Err(NetworkError::Unordered { layer, location });
        }
        previous = location;
    }
    Ok(())
}

/// Builder for creating a network.
///
/// Provides a fluent API over [`Network::build`].
///
/// # Example
///
/// ```
/// use transit_network::network::NetworkBuilder;
///
/// let network = NetworkBuilder::new()
///     .walking(8)
///     .bus_stops([2, 3, 5, 7])
///     .train_stations([3, 7])
///     .build()
///     .unwrap();
///
/// assert_eq!(network.walking_count(), 8);
/// ```
#[derive(Debug, Clone, Default)]
pub struct NetworkBuilder {
    train_stations: Vec<u32>,
    bus_stops: Vec<u32>,
    walking_count: u32,
}

impl NetworkBuilder {
    /// Create a new builder for an empty network.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of walking locations.
    pub fn walking(mut self, count: u32) -> Self {
        self.walking_count = count;
        self
    }

    /// Add bus stops.
    pub fn bus_stops(mut self, stops: impl IntoIterator<Item = u32>) -> Self {
        self.bus_stops.extend(stops);
        self
    }

    /// Add train stations.
    pub fn train_stations(mut self, stations: impl IntoIterator<Item = u32>) -> Self {
        self.train_stations.extend(stations);
        self
    }

    /// Build the network.
    pub fn build(self) -> Result<Network, NetworkError> {
        Network::build(&self.train_stations, &self.bus_stops, self.walking_count)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::network::test_support::network_input;
    use proptest::prelude::*;

    proptest! {
        /// Any consistent input builds a network satisfying every invariant
        #[test]
        fn build_satisfies_invariants((train, bus, count) in network_input()) {
            let network = Network::build(&train, &bus, count).unwrap();
            prop_assert!(network.check_invariants().is_ok());
            prop_assert_eq!(network.walking_count(), count);
            prop_assert_eq!(network.stops(0).count(), train.len() + 1);
            prop_assert_eq!(network.stops(1).count(), bus.len() + 1);
        }

        /// Stops beyond the walking layer are always rejected
        #[test]
        fn out_of_range_rejected(count in 1u32..40, extra in 1u32..10) {
            let result = Network::build(&[], &[count + extra], count);
            let is_unknown = matches!(result, Err(NetworkError::UnknownLocation { .. }));
            prop_assert!(is_unknown);
        }
    }
}

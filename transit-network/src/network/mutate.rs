//! Structural mutation: adding and removing stops, splicing in layers.
//!
//! Every mutation validates its input before touching the arena, so an error
//! always leaves the network exactly as it was.

use std::collections::HashMap;

use tracing::{debug, trace};

use super::{Layer, Network};
use crate::domain::{LayerKind, Location, NetworkError, NodeId};

impl Network {
    /// Remove a train station, leaving its bus stop and walking location in
    /// place.
    ///
    /// Returns `false` if there is no station at `location`.
    pub fn remove_train_station(&mut self, location: u32) -> bool {
        let removed = self.unlink_stop(0, Location(location)).is_some();
        if removed {
            debug!(location, "Removed train station");
        }
        removed
    }

    /// Add a bus stop at `location`, dropping down to the layer beneath the
    /// bus layer.
    ///
    /// Returns `false` without changing anything if the stop already exists
    /// or if nothing beneath the bus layer sits at `location`.
    pub fn add_bus_stop(&mut self, location: u32) -> bool {
        match self.layer_of_kind(LayerKind::Bus) {
            Some(layer) => self.insert_stop(layer, Location(location)),
            None => false,
        }
    }

    /// Splice a scooter layer in directly beneath the bus layer.
    ///
    /// See [`Network::insert_layer`] for the rules `stops` must follow.
    pub fn add_layer(&mut self, stops: &[u32]) -> Result<(), NetworkError> {
        let bus = self
            .layer_of_kind(LayerKind::Bus)
            .ok_or_else(|| NetworkError::Corrupt("network has no bus layer".into()))?;
        self.insert_layer(bus + 1, LayerKind::Scooter, stops)
    }

    /// Remove the stop at `location` from a layer.
    ///
    /// Returns `Ok(false)` if the layer has no such stop. Sentinels are never
    /// removed. Fails if the layer is the finest one, or if a stop in the
    /// layer above still drops down to the stop being removed.
    pub fn remove_stop(&mut self, layer: usize, location: u32) -> Result<bool, NetworkError> {
        let handle = self.layer_handle(layer)?;
        if self.is_finest(layer) {
            return Err(NetworkError::TerminalLayer(handle.kind));
        }

        let location = Location(location);
        if location.is_sentinel() {
            return Ok(false);
        }
        let Some(target) = self.find_in_chain(handle.sentinel, location) else {
            return Ok(false);
        };

        if layer > 0 {
            let above = self.layers[layer - 1].sentinel;
            if self.chain(above).any(|id| self.node(id).down == Some(target)) {
                return Err(NetworkError::StillReferenced {
                    layer: handle.kind,
                    location,
                });
            }
        }

        self.unlink_stop(layer, location);
        debug!(layer = %handle.kind, location = location.0, "Removed stop");
        Ok(true)
    }

    /// Add a stop at `location` to a layer.
    ///
    /// Returns `Ok(false)` if the stop already exists or the layer beneath
    /// has nothing at `location`. Fails if the layer is the finest one.
    pub fn add_stop(&mut self, layer: usize, location: u32) -> Result<bool, NetworkError> {
        let handle = self.layer_handle(layer)?;
        if self.is_finest(layer) {
            return Err(NetworkError::TerminalLayer(handle.kind));
        }
        Ok(self.insert_stop(layer, Location(location)))
    }

    /// Insert a new layer at `position`, between two existing layers.
    ///
    /// `position` must be at least 1 and less than the current layer count;
    /// the layer now at `position` moves down one place. The new layer's
    /// stops must strictly increase and each must exist in the layer beneath,
    /// and every stop in the layer above must have a counterpart among them,
    /// since the layer above is re-pointed to drop into the new layer.
    pub fn insert_layer(
        &mut self,
        position: usize,
        kind: LayerKind,
        stops: &[u32],
    ) -> Result<(), NetworkError> {
        if position == 0 || position >= self.layers.len() {
            return Err(NetworkError::InvalidLayerPosition(position));
        }
        let above = self.layers[position - 1];
        let below = self.layers[position];

        let mut resolved: Vec<(Location, NodeId)> = Vec::with_capacity(stops.len());
        let mut previous = Location::ZERO;
        for &stop in stops {
            let location = Location(stop);
            if location.is_sentinel() {
                return Err(NetworkError::UnknownLocation {
                    layer: kind,
                    location,
                });
            }
            if location <= previous {
                return Err(NetworkError::Unordered {
                    layer: kind,
                    location,
                });
            }
            let down = self.find_in_chain(below.sentinel, location).ok_or(
                NetworkError::UnknownLocation {
                    layer: kind,
                    location,
                },
            )?;
            resolved.push((location, down));
            previous = location;
        }

        let above_stops: Vec<NodeId> = self.chain(above.sentinel).skip(1).collect();
        for &id in &above_stops {
            let location = self.node(id).location;
            if resolved.binary_search_by_key(&location, |&(l, _)| l).is_err() {
                return Err(NetworkError::Unreachable {
                    layer: above.kind,
                    location,
                });
            }
        }

        let sentinel = self.alloc(Location::ZERO);
        let former = self.node(above.sentinel).down;
        self.node_mut(sentinel).down = former;
        self.node_mut(above.sentinel).down = Some(sentinel);

        let mut index: HashMap<Location, NodeId> = HashMap::with_capacity(resolved.len());
        let mut tail = sentinel;
        for (location, down) in resolved {
            let id = self.alloc(location);
            self.node_mut(id).down = Some(down);
            self.node_mut(tail).next = Some(id);
            index.insert(location, id);
            tail = id;
        }

        for id in above_stops {
            let location = self.node(id).location;
            self.node_mut(id).down = index.get(&location).copied();
        }

        self.layers.insert(position, Layer { kind, sentinel });

        debug!(
            layer = %kind,
            position,
            stops = index.len(),
            "Inserted layer"
        );
        Ok(())
    }

    /// Inserts `location` into a non-finest layer in sorted position.
    fn insert_stop(&mut self, layer: usize, location: Location) -> bool {
        if location.is_sentinel() {
            return false;
        }
        let handle = self.layers[layer];

        let mut prev = handle.sentinel;
        let mut current = self.node(prev).next;
        while let Some(id) = current {
            let here = self.node(id).location;
            if here == location {
                trace!(layer = %handle.kind, location = location.0, "Stop already exists");
                return false;
            }
            if here > location {
                break;
            }
            prev = id;
            current = self.node(id).next;
        }

        // No index survives the build, so scan the whole layer beneath.
        let beneath = self.layers[layer + 1].sentinel;
        let Some(down) = self.find_in_chain(beneath, location) else {
            trace!(layer = %handle.kind, location = location.0, "Nothing beneath to drop down to");
            return false;
        };

        let id = self.alloc(location);
        let node = self.node_mut(id);
        node.next = current;
        node.down = Some(down);
        self.node_mut(prev).next = Some(id);

        debug!(layer = %handle.kind, location = location.0, "Added stop");
        true
    }

    /// Splices the node at `location` out of a layer, returning it.
    fn unlink_stop(&mut self, layer: usize, location: Location) -> Option<NodeId> {
        if location.is_sentinel() {
            return None;
        }

        let mut prev = self.layers[layer].sentinel;
        let mut current = self.node(prev).next;
        while let Some(id) = current {
            let here = self.node(id).location;
            if here == location {
                let next = self.node(id).next;
                self.node_mut(prev).next = next;
                let node = self.node_mut(id);
                node.next = None;
                node.down = None;
                return Some(id);
            }
            if here > location {
                return None;
            }
            prev = id;
            current = self.node(id).next;
        }
        None
    }
}

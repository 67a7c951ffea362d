//! Running a definition and reporting the result.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::{NetworkDefinition, Operation};
use crate::domain::{LayerKind, Location, NetworkError, NodeId};
use crate::network::{Network, Path, Snapshot};

/// One visited node, identified by its layer and location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visit {
    pub layer: LayerKind,
    pub location: Location,
}

/// A path found while running a definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathReport {
    pub destination: Location,
    pub visits: Vec<Visit>,
}

impl PathReport {
    /// Describe a path in terms of layers and locations.
    pub fn new(network: &Network, destination: Location, path: &Path) -> Self {
        let kinds: HashMap<NodeId, LayerKind> = network
            .layers()
            .flat_map(|layer| network.stops(layer.index).map(move |id| (id, layer.kind)))
            .collect();

        let visits = path
            .iter()
            .filter_map(|id| {
                kinds.get(id).map(|&layer| Visit {
                    layer,
                    location: network.location(*id),
                })
            })
            .collect();

        Self {
            destination,
            visits,
        }
    }
}

/// Outcome of running a definition: every path found, and the final network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub paths: Vec<PathReport>,
    pub network: Snapshot,
}

/// Build the definition's network and apply its operations in order.
///
/// Operations that turn out to be no-ops (removing an absent station, adding
/// a duplicate bus stop) are logged and skipped over; precondition violations
/// stop the run.
pub fn run(definition: &NetworkDefinition) -> Result<Report, NetworkError> {
    let mut network = definition.build()?;
    let mut paths = Vec::new();

    for operation in &definition.operations {
        match operation {
            Operation::RemoveTrainStation { location } => {
                let removed = network.remove_train_station(*location);
                info!(location, removed, "remove_train_station");
            }
            Operation::AddBusStop { location } => {
                let added = network.add_bus_stop(*location);
                info!(location, added, "add_bus_stop");
            }
            Operation::AddLayer { stops } => {
                network.add_layer(stops)?;
                info!(stops = stops.len(), "add_layer");
            }
            Operation::BestPath { destination } => {
                let path = network.best_path(*destination)?;
                info!(destination, visited = path.len(), "best_path");
                paths.push(PathReport::new(&network, Location(*destination), &path));
            }
        }
    }

    Ok(Report {
        paths,
        network: network.snapshot(),
    })
}

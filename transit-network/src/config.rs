//! Network definitions.
//!
//! A definition is everything needed to build a network and exercise it: the
//! initial stops plus an ordered list of operations to apply afterwards. It
//! is loaded from JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::NetworkError;
use crate::network::Network;

/// Error loading a network definition.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Reading the definition file failed
    #[error("failed to read definition: {0}")]
    Io(#[from] std::io::Error),

    /// The definition is not valid JSON for this schema
    #[error("invalid definition: {0}")]
    Json(#[from] serde_json::Error),
}

/// An operation to apply to a built network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    RemoveTrainStation { location: u32 },
    AddBusStop { location: u32 },
    AddLayer { stops: Vec<u32> },
    BestPath { destination: u32 },
}

/// Build input for a network, plus operations to run against it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkDefinition {
    /// Train station locations, strictly increasing.
    pub train_stations: Vec<u32>,

    /// Bus stop locations, strictly increasing.
    pub bus_stops: Vec<u32>,

    /// Number of walking locations, numbered from 1.
    pub walking_count: u32,

    /// Operations applied in order after building.
    #[serde(default)]
    pub operations: Vec<Operation>,
}

impl NetworkDefinition {
    /// Create a definition with no operations.
    pub fn new(train_stations: Vec<u32>, bus_stops: Vec<u32>, walking_count: u32) -> Self {
        Self {
            train_stations,
            bus_stops,
            walking_count,
            operations: Vec::new(),
        }
    }

    /// Append an operation.
    pub fn with_operation(mut self, operation: Operation) -> Self {
        self.operations.push(operation);
        self
    }

    /// Parse a definition from JSON.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a definition from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Build the initial network (operations are not applied).
    pub fn build(&self) -> Result<Network, NetworkError> {
        Network::build(&self.train_stations, &self.bus_stops, self.walking_count)
    }
}

impl Default for NetworkDefinition {
    /// A small eight-location network that exercises every operation.
    fn default() -> Self {
        Self::new(vec![3, 7], vec![2, 3, 5, 7], 8)
            .with_operation(Operation::BestPath { destination: 6 })
            .with_operation(Operation::AddBusStop { location: 4 })
            .with_operation(Operation::RemoveTrainStation { location: 3 })
            .with_operation(Operation::AddLayer {
                stops: vec![1, 2, 3, 4, 5, 6, 7],
            })
            .with_operation(Operation::BestPath { destination: 6 })
    }
}

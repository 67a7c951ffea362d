//! Layered transit network.
//!
//! Models a transit network as a stack of linked layers (trains, buses,
//! optionally scooters, and walking) joined by vertical drop-down links, and
//! answers: "which stops do I pass through to reach this location?"

pub mod config;
pub mod domain;
pub mod network;
pub mod report;

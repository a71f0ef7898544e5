//! Network layer: transport boundary, error taxonomy, wire types, and the
//! REST auth binding. Everything that leaves the process goes through here.

pub mod api;
pub mod error;
pub mod transport;
pub mod types;

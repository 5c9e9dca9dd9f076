pub mod alerts;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod export;
pub mod fleet;
pub mod geo;
pub mod map;
pub mod radar;
pub mod snapshot;

pub use errors::{FleetError, FleetResult};

//! Per-entity operations over the fleet store.
//!
//! Every call sleeps for its simulated latency before touching storage.

pub mod alerts;
pub mod events;
pub mod news;
pub mod ocean;
pub mod regions;
pub mod reminders;
pub mod services;
pub mod users;
pub mod vessels;

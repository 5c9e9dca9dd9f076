pub mod collection;
pub mod migrations;
pub mod models;
pub mod queries;
pub mod seed;
pub mod store;

pub use migrations::{create_database_pool, create_memory_pool, setup_database};
pub use store::Store;

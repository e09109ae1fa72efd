// src/lib.rs
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod memory;
pub mod models;
pub mod poll;
pub mod routes;
pub mod templates;

pub use memory::MemoryPollStore;
pub use poll::{PgPollStore, PollStore};
pub use routes::{create_routes, AppState};

//! Library surface of the Haven server binary: configuration, routing,
//! handlers, and HTTP error mapping.
#![allow(missing_docs)]

pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod routes;
pub mod state;

pub use state::AppState;

//! Task lifecycle management.
//!
//! Creating tasks against external references, partial field updates,
//! reassigning every applicable kind of work on a reference, deadline-window
//! queries, priority changes and comments, each recorded in an append-only
//! activity history. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]
//! - Wire payloads and the response envelope in [`api`]
//! - Configuration-driven assembly in [`wiring`]

pub mod adapters;
pub mod api;
pub mod domain;
pub mod ports;
pub mod services;
pub mod wiring;

#[cfg(test)]
mod tests;

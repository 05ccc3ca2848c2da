//! Workforce: task lifecycle and assignment reconciliation.
//!
//! Tasks track work owed against external business references such as
//! orders or customer entities. This crate creates and updates them, hands a
//! reference's open work to a new assignee, filters tasks by deadline
//! window, and keeps an append-only activity and comment history for every
//! task.
//!
//! # Architecture
//!
//! Workforce follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for storage and caller identity
//! - **Adapters**: Concrete implementations of ports (in-memory, `PostgreSQL`)
//!
//! # Modules
//!
//! - [`task`]: Task domain, services and presentation boundary
//! - [`config`]: Layered configuration loading
//! - [`telemetry`]: Tracing subscriber setup

pub mod config;
pub mod task;
pub mod telemetry;

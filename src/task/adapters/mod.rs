//! Adapter implementations for task lifecycle ports.

pub mod actor;
pub mod memory;
pub mod postgres;

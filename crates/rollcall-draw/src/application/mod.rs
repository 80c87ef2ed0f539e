//! Application layer for the Draw context.

pub mod animator;
pub mod command_handlers;
pub mod query_handlers;

//! Domain layer for the Draw context.

pub mod aggregates;
pub mod animation;
pub mod commands;
pub mod events;
pub mod sampler;

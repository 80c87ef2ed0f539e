//! Rollcall Core: shared domain abstractions.
//!
//! This crate defines the fundamental traits and types that the draw
//! context and the API depend on. It contains no infrastructure code.

pub mod clock;
pub mod command;
pub mod error;
pub mod event;
pub mod rng;
pub mod roster;

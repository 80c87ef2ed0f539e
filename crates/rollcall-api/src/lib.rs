//! Rollcall API: HTTP surface over the draw engine.

pub mod config;
pub mod error;
pub mod roster_file;
pub mod routes;
pub mod state;

//! Domain logic for the sagashelf game collection.
//!
//! Everything in this crate is pure: no I/O, no environment reads. The
//! record store and cover-art clients live in their own crates and the
//! HTTP server wires them together.

pub mod collection;
pub mod error;
pub mod filters;
pub mod game;
pub mod grouping;
pub mod reorder;
pub mod saga;
pub mod types;

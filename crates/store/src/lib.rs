//! Client for the JSON record store holding the game collection.
//!
//! The store is a generic REST backend exposing `/games` with list, create,
//! replace and delete semantics (json-server style).

pub mod client;

pub use client::{RecordStoreClient, RecordStoreConfig, StoreError};

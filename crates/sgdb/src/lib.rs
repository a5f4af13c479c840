//! SteamGridDB client.
//!
//! Used by the proxy server so the API key never reaches the browser. Raw
//! calls hand the upstream status and body back untouched for pass-through;
//! typed calls decode the `{ "data": [...] }` envelope.

pub mod client;

pub use client::{SgdbClient, SgdbConfig, SgdbError, SgdbGame, SgdbGrid, UpstreamResponse};

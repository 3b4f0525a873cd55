//! SSE HTTP handler for the web layer.
//!
//! This module contains only the Axum handler for the `/sse` endpoint.
//! The broadcast hub and subscriptions live in the `sse` crate.

pub mod handler;

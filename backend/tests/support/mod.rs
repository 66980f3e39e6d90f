//! Shared helpers for backend integration tests.
//!
//! Integration tests compile as separate crates, so the in-memory adapters
//! and HTTP wiring they share live here.

pub mod http;
pub mod in_memory;

//! Property tests for paver.
//!
//! Properties use randomized input generation to explore edge cases and
//! protect invariants like "never panics" and "round-trips".
//!
//! Run with: `cargo test --test properties`

#[path = "properties/manifest.rs"]
mod manifest;

#[path = "properties/classify.rs"]
mod classify;

#[path = "properties/hash.rs"]
mod hash;

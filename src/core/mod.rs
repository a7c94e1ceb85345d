// CiteSleuth - core/mod.rs
//
// Core business logic layer.
// Dependencies: standard library plus pure-data crates (serde, regex, chrono).
// Must NOT depend on: ui, platform, app, or any I/O directly.

pub mod brief;
pub mod export;
pub mod filter;
pub mod markup;
pub mod model;
pub mod review;

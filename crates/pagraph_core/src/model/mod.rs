//! Domain model for audio objects and their graph projection.
//!
//! # Responsibility
//! - Define the records delivered by the snapshot feed.
//! - Define the node/edge handles a projection is built from.
//! - Carry the user preferences that shape projection and control.
//!
//! # Invariants
//! - Graph identity is `type` + `index`; nothing else participates.
//! - Core never mutates snapshot records.

pub mod graph;
pub mod object;
pub mod preferences;
pub mod snapshot;

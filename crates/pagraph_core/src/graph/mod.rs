//! Graph derivation: object adapter and projector.
//!
//! # Responsibility
//! - Turn raw snapshot objects into stable node/edge handles.
//! - Filter those handles into a consistent projection.
//!
//! # Invariants
//! - No projection ever contains a dangling edge.

pub mod adapter;
pub mod projector;

//! Host-facing services.
//!
//! # Responsibility
//! - Combine projection, selection and cascade into one command surface.
//! - Keep host/UI layers decoupled from per-kind dispatch.

pub mod command;
pub mod graph_session;

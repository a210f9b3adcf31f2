//! Control layer: requests for the audio server and the cascade that
//! produces them.
//!
//! # Responsibility
//! - Keep all mutation intent index-addressed and fire-and-forget.
//! - Keep the UI command surface free of per-kind dispatch.

pub mod cascade;
pub mod request;

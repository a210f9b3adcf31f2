//! Audio graph engine for a sound-server patchbay.
//!
//! Projects a snapshot of sinks, sources, clients, modules and streams into
//! a filtered node/edge graph, keeps a keyboard-navigable selection on it and
//! turns mute, volume, delete and re-route commands into control requests.

pub mod control;
pub mod graph;
pub mod logging;
pub mod model;
pub mod selection;
pub mod service;

pub use control::cascade::{CascadeOutcome, MixerCascade, NoOpReason, VolumeDirection};
pub use control::request::{AudioControl, ControlRequest, MixerKind};
pub use graph::adapter::{AdapterError, ObjectAdapter};
pub use graph::projector::{GraphProjector, Projection};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::graph::{EdgeId, EdgeKind, ElementRef, GraphEdge, GraphNode, NodeId, NodeKind};
pub use model::object::{AudioObjectInfo, AudioObjectKind, ObjectIndex, VOLUME_NORM};
pub use model::preferences::{Preferences, PreferencesError};
pub use model::snapshot::{MonitorSource, ObjectSnapshot};
pub use selection::category::{HorizontalDirection, LogicalCategory, VerticalDirection};
pub use selection::model::{SelectedElement, Selection};
pub use service::command::{CommandOutcome, GraphCommand, GraphCommandParseError};
pub use service::graph_session::GraphSession;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

//! Graph identity records.
//!
//! # Responsibility
//! - Define the stable node/edge handles a projection is made of.
//! - Derive element ids from `type` + `index` only.
//!
//! # Invariants
//! - Records carry no mutable audio state; they are handles.
//! - An edge's `source` and `target` name nodes of the same projection.

use crate::model::object::{AudioObjectKind, ObjectIndex};
use serde::{Serialize, Serializer};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Kinds of objects drawn as graph nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeKind {
    Sink,
    Source,
    Client,
    Module,
}

impl NodeKind {
    pub fn as_str(self) -> &'static str {
        self.object_kind().as_str()
    }

    pub fn object_kind(self) -> AudioObjectKind {
        match self {
            Self::Sink => AudioObjectKind::Sink,
            Self::Source => AudioObjectKind::Source,
            Self::Client => AudioObjectKind::Client,
            Self::Module => AudioObjectKind::Module,
        }
    }

    fn from_name(value: &str) -> Option<Self> {
        match value {
            "sink" => Some(Self::Sink),
            "source" => Some(Self::Source),
            "client" => Some(Self::Client),
            "module" => Some(Self::Module),
            _ => None,
        }
    }

    /// Returns `None` for stream kinds, which are drawn as edges.
    pub fn from_object_kind(kind: AudioObjectKind) -> Option<Self> {
        match kind {
            AudioObjectKind::Sink => Some(Self::Sink),
            AudioObjectKind::Source => Some(Self::Source),
            AudioObjectKind::Client => Some(Self::Client),
            AudioObjectKind::Module => Some(Self::Module),
            AudioObjectKind::SinkInput | AudioObjectKind::SourceOutput => None,
        }
    }
}

/// Kinds of relations drawn as graph edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EdgeKind {
    SinkInput,
    SourceOutput,
    /// Derived: a source tapping a sink's output.
    MonitorSource,
}

impl EdgeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SinkInput => "sinkInput",
            Self::SourceOutput => "sourceOutput",
            Self::MonitorSource => "monitorSource",
        }
    }

    fn from_name(value: &str) -> Option<Self> {
        match value {
            "sinkInput" => Some(Self::SinkInput),
            "sourceOutput" => Some(Self::SourceOutput),
            "monitorSource" => Some(Self::MonitorSource),
            _ => None,
        }
    }

    pub fn from_object_kind(kind: AudioObjectKind) -> Option<Self> {
        match kind {
            AudioObjectKind::SinkInput => Some(Self::SinkInput),
            AudioObjectKind::SourceOutput => Some(Self::SourceOutput),
            AudioObjectKind::Sink
            | AudioObjectKind::Source
            | AudioObjectKind::Client
            | AudioObjectKind::Module => None,
        }
    }
}

/// Node id, displayed as `<type>-<index>` (e.g. `client-12`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId {
    pub kind: NodeKind,
    pub index: ObjectIndex,
}

impl NodeId {
    pub fn new(kind: NodeKind, index: ObjectIndex) -> Self {
        Self { kind, index }
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.kind.as_str(), self.index)
    }
}

impl Serialize for NodeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Edge id, displayed as `<type>-<index>` (e.g. `sinkInput-40`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeId {
    pub kind: EdgeKind,
    pub index: ObjectIndex,
}

impl EdgeId {
    pub fn new(kind: EdgeKind, index: ObjectIndex) -> Self {
        Self { kind, index }
    }
}

impl Display for EdgeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.kind.as_str(), self.index)
    }
}

impl Serialize for EdgeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Identity of any graph element: node or edge id plus its type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ElementRef {
    Node(NodeId),
    Edge(EdgeId),
}

impl Display for ElementRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Node(id) => write!(f, "{id}"),
            Self::Edge(id) => write!(f, "{id}"),
        }
    }
}

/// Parse failure for `<type>-<index>` element ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementIdParseError(pub String);

impl Display for ElementIdParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid element id `{}`; expected <type>-<index>", self.0)
    }
}

impl Error for ElementIdParseError {}

impl FromStr for ElementRef {
    type Err = ElementIdParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || ElementIdParseError(value.to_string());
        let (kind, index) = value.trim().rsplit_once('-').ok_or_else(invalid)?;
        let index: ObjectIndex = index.parse().map_err(|_| invalid())?;
        if let Some(kind) = NodeKind::from_name(kind) {
            return Ok(Self::Node(NodeId::new(kind, index)));
        }
        EdgeKind::from_name(kind)
            .map(|kind| Self::Edge(EdgeId::new(kind, index)))
            .ok_or_else(invalid)
    }
}

impl From<NodeId> for ElementRef {
    fn from(value: NodeId) -> Self {
        Self::Node(value)
    }
}

impl From<EdgeId> for ElementRef {
    fn from(value: EdgeId) -> Self {
        Self::Edge(value)
    }
}

/// Graph node handle for one sink, source, client or module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphNode {
    pub id: NodeId,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub index: ObjectIndex,
}

impl GraphNode {
    pub fn new(kind: NodeKind, index: ObjectIndex) -> Self {
        Self {
            id: NodeId::new(kind, index),
            kind,
            index,
        }
    }
}

/// Graph edge handle for one stream or monitor relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphEdge {
    pub id: EdgeId,
    #[serde(rename = "type")]
    pub kind: EdgeKind,
    pub index: ObjectIndex,
    pub source: NodeId,
    pub target: NodeId,
}

impl GraphEdge {
    pub fn new(kind: EdgeKind, index: ObjectIndex, source: NodeId, target: NodeId) -> Self {
        Self {
            id: EdgeId::new(kind, index),
            kind,
            index,
            source,
            target,
        }
    }

    /// Returns whether `node` is one of this edge's endpoints.
    pub fn touches(&self, node: NodeId) -> bool {
        self.source == node || self.target == node
    }
}

#[cfg(test)]
mod tests {
    use super::{EdgeKind, ElementRef, GraphEdge, GraphNode, NodeId, NodeKind};

    #[test]
    fn ids_display_as_type_dash_index() {
        assert_eq!(NodeId::new(NodeKind::Client, 12).to_string(), "client-12");
        let edge = GraphEdge::new(
            EdgeKind::SinkInput,
            40,
            NodeId::new(NodeKind::Client, 12),
            NodeId::new(NodeKind::Sink, 0),
        );
        assert_eq!(edge.id.to_string(), "sinkInput-40");
        assert_eq!(ElementRef::from(edge.id).to_string(), "sinkInput-40");
    }

    #[test]
    fn element_ids_parse_back() {
        assert_eq!(
            "client-12".parse::<ElementRef>().expect("node id"),
            ElementRef::Node(NodeId::new(NodeKind::Client, 12))
        );
        assert_eq!(
            "monitorSource-3".parse::<ElementRef>().expect("edge id"),
            ElementRef::Edge(super::EdgeId::new(EdgeKind::MonitorSource, 3))
        );
        assert!("speaker-1".parse::<ElementRef>().is_err());
        assert!("sink-x".parse::<ElementRef>().is_err());
        assert!("sink".parse::<ElementRef>().is_err());
    }

    #[test]
    fn records_serialize_with_string_ids() {
        let node = GraphNode::new(NodeKind::Module, 3);
        let json = serde_json::to_value(&node).expect("node should encode");
        assert_eq!(json["id"], "module-3");
        assert_eq!(json["type"], "module");
        assert_eq!(json["index"], 3);
    }
}

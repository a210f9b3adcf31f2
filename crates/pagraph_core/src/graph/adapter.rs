//! Object model adapter.
//!
//! # Responsibility
//! - Map audio objects to graph node/edge identity records.
//! - Compute edge endpoint keys from relation fields.
//! - Memoize records by object identity so unchanged objects keep their
//!   record instance across projections.
//!
//! # Invariants
//! - Same `Arc` allocation in, same record instance out.
//! - Distinct allocations yield distinct records even when value-equal.
//! - An edge without resolvable endpoints is rejected, never built.

use crate::model::graph::{EdgeKind, GraphEdge, GraphNode, NodeId, NodeKind};
use crate::model::object::{AudioObjectInfo, AudioObjectKind, ObjectIndex};
use crate::model::snapshot::MonitorSource;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Arc, Weak};

/// Adapter rejection for objects that cannot become the requested record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdapterError {
    NotANode {
        kind: AudioObjectKind,
        index: ObjectIndex,
    },
    NotAnEdge {
        kind: AudioObjectKind,
        index: ObjectIndex,
    },
    MissingRelation {
        kind: AudioObjectKind,
        index: ObjectIndex,
        relation: &'static str,
    },
}

impl Display for AdapterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotANode { kind, index } => {
                write!(f, "{kind}-{index} is not drawn as a node")
            }
            Self::NotAnEdge { kind, index } => {
                write!(f, "{kind}-{index} is not drawn as an edge")
            }
            Self::MissingRelation {
                kind,
                index,
                relation,
            } => write!(f, "{kind}-{index} has no `{relation}`"),
        }
    }
}

impl Error for AdapterError {}

/// Builds the node record for a device, client or module.
pub fn node_for(info: &AudioObjectInfo) -> Result<GraphNode, AdapterError> {
    let kind = NodeKind::from_object_kind(info.kind).ok_or(AdapterError::NotANode {
        kind: info.kind,
        index: info.index,
    })?;
    Ok(GraphNode::new(kind, info.index))
}

/// Builds the edge record for a sink-input or source-output.
pub fn edge_for(info: &AudioObjectInfo) -> Result<GraphEdge, AdapterError> {
    let kind = EdgeKind::from_object_kind(info.kind).ok_or(AdapterError::NotAnEdge {
        kind: info.kind,
        index: info.index,
    })?;
    Ok(GraphEdge::new(
        kind,
        info.index,
        source_key(info)?,
        target_key(info)?,
    ))
}

/// Builds the edge record for a monitor relation (sink -> monitor source).
pub fn monitor_edge_for(relation: &MonitorSource) -> GraphEdge {
    GraphEdge::new(
        EdgeKind::MonitorSource,
        relation.index,
        NodeId::new(NodeKind::Sink, relation.sink_index),
        NodeId::new(NodeKind::Source, relation.source_index),
    )
}

/// Owning node of a stream: its client, or its module when clientless.
pub fn source_key(info: &AudioObjectInfo) -> Result<NodeId, AdapterError> {
    match info.client_index {
        Some(client) => Ok(NodeId::new(NodeKind::Client, client)),
        None => info
            .module_index
            .map(|module| NodeId::new(NodeKind::Module, module))
            .ok_or(AdapterError::MissingRelation {
                kind: info.kind,
                index: info.index,
                relation: "moduleIndex",
            }),
    }
}

/// Device end of a stream: its sink for sink-inputs, else its source.
pub fn target_key(info: &AudioObjectInfo) -> Result<NodeId, AdapterError> {
    let (kind, index, relation) = if info.kind == AudioObjectKind::SinkInput {
        (NodeKind::Sink, info.sink_index, "sinkIndex")
    } else {
        (NodeKind::Source, info.source_index, "sourceIndex")
    };
    index
        .map(|index| NodeId::new(kind, index))
        .ok_or(AdapterError::MissingRelation {
            kind: info.kind,
            index: info.index,
            relation,
        })
}

struct MemoEntry<T, R> {
    object: Weak<T>,
    record: Arc<R>,
}

/// Record cache keyed by the address of the source `Arc` allocation.
///
/// Each entry holds a `Weak` to its object, which keeps the allocation (and
/// so the address) reserved until the entry is pruned.
pub struct IdentityMemo<T, R> {
    entries: HashMap<usize, MemoEntry<T, R>>,
}

impl<T, R> Default for IdentityMemo<T, R> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<T, R> IdentityMemo<T, R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached record for `object`, building it on first sight.
    pub fn get_or_insert_with(
        &mut self,
        object: &Arc<T>,
        build: impl FnOnce(&T) -> R,
    ) -> Arc<R> {
        let key = Arc::as_ptr(object) as usize;
        if let Some(entry) = self.entries.get(&key) {
            return Arc::clone(&entry.record);
        }
        let record = Arc::new(build(object));
        self.entries.insert(
            key,
            MemoEntry {
                object: Arc::downgrade(object),
                record: Arc::clone(&record),
            },
        );
        record
    }

    /// Fallible variant of `get_or_insert_with`; failures are not cached.
    pub fn get_or_try_insert_with<E>(
        &mut self,
        object: &Arc<T>,
        build: impl FnOnce(&T) -> Result<R, E>,
    ) -> Result<Arc<R>, E> {
        if let Some(entry) = self.entries.get(&(Arc::as_ptr(object) as usize)) {
            return Ok(Arc::clone(&entry.record));
        }
        let record = build(object)?;
        Ok(self.get_or_insert_with(object, |_| record))
    }

    /// Drops entries whose object has been released; returns how many.
    pub fn prune(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.object.strong_count() > 0);
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Identity-memoizing adapter used by the projector.
#[derive(Default)]
pub struct ObjectAdapter {
    nodes: IdentityMemo<AudioObjectInfo, GraphNode>,
    stream_edges: IdentityMemo<AudioObjectInfo, GraphEdge>,
    monitor_edges: IdentityMemo<MonitorSource, GraphEdge>,
}

impl ObjectAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn to_node(
        &mut self,
        object: &Arc<AudioObjectInfo>,
    ) -> Result<Arc<GraphNode>, AdapterError> {
        self.nodes.get_or_try_insert_with(object, node_for)
    }

    pub fn to_edge(
        &mut self,
        object: &Arc<AudioObjectInfo>,
    ) -> Result<Arc<GraphEdge>, AdapterError> {
        self.stream_edges.get_or_try_insert_with(object, edge_for)
    }

    pub fn monitor_to_edge(&mut self, relation: &Arc<MonitorSource>) -> Arc<GraphEdge> {
        self.monitor_edges.get_or_insert_with(relation, monitor_edge_for)
    }

    /// Releases records of objects no longer alive anywhere.
    pub fn prune(&mut self) -> usize {
        self.nodes.prune() + self.stream_edges.prune() + self.monitor_edges.prune()
    }

    /// Number of cached records across all record kinds.
    pub fn cached_records(&self) -> usize {
        self.nodes.len() + self.stream_edges.len() + self.monitor_edges.len()
    }
}

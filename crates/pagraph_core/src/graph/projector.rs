//! Graph projector.
//!
//! # Responsibility
//! - Derive the visible `(nodes, edges)` graph from an object snapshot and
//!   the user's visibility filters.
//! - Rebuild the element -> info side-table with every projection.
//!
//! # Invariants
//! - Node connectivity is judged against the full, unfiltered edge set.
//! - Every returned edge has both endpoints among the returned nodes.
//! - Same snapshot and preferences always give the same id sets.

use crate::graph::adapter::ObjectAdapter;
use crate::model::graph::{EdgeId, EdgeKind, ElementRef, GraphEdge, GraphNode, NodeId, NodeKind};
use crate::model::object::AudioObjectInfo;
use crate::model::preferences::Preferences;
use crate::model::snapshot::ObjectSnapshot;
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

static SOUND_SERVER_APP_BINARY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:pavucontrol|kmix|pulseaudio|pagraphcontrol)")
        .expect("valid sound server binary regex")
});
const SOUND_SERVER_APP_NAMES: &[&str] = &["paclient.js"];

/// Returns whether `info` belongs to a sound-server control application.
///
/// Binary names match by case-sensitive prefix, application names exactly.
pub fn is_sound_server_app(info: &AudioObjectInfo) -> bool {
    let binary_match = info
        .application_binary()
        .is_some_and(|binary| SOUND_SERVER_APP_BINARY_RE.is_match(binary));
    let name_match = info
        .application_name()
        .is_some_and(|name| SOUND_SERVER_APP_NAMES.contains(&name));
    binary_match || name_match
}

/// Element -> current info association for one projection.
///
/// Only built by the projector; never updated in place.
#[derive(Debug, Clone, Default)]
pub struct InfoTable {
    entries: BTreeMap<ElementRef, Arc<AudioObjectInfo>>,
}

impl InfoTable {
    pub fn get(&self, element: ElementRef) -> Option<&Arc<AudioObjectInfo>> {
        self.entries.get(&element)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Filtered, connectivity-consistent graph at one point in time.
#[derive(Debug, Clone, Default)]
pub struct Projection {
    nodes: BTreeMap<NodeId, Arc<GraphNode>>,
    edges: BTreeMap<EdgeId, Arc<GraphEdge>>,
    infos: InfoTable,
}

impl Projection {
    pub fn nodes(&self) -> impl Iterator<Item = &Arc<GraphNode>> + '_ {
        self.nodes.values()
    }

    pub fn edges(&self) -> impl Iterator<Item = &Arc<GraphEdge>> + '_ {
        self.edges.values()
    }

    pub fn node(&self, id: NodeId) -> Option<&Arc<GraphNode>> {
        self.nodes.get(&id)
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Arc<GraphEdge>> {
        self.edges.get(&id)
    }

    pub fn contains(&self, element: ElementRef) -> bool {
        match element {
            ElementRef::Node(id) => self.nodes.contains_key(&id),
            ElementRef::Edge(id) => self.edges.contains_key(&id),
        }
    }

    pub fn node_ids(&self) -> BTreeSet<NodeId> {
        self.nodes.keys().copied().collect()
    }

    pub fn edge_ids(&self) -> BTreeSet<EdgeId> {
        self.edges.keys().copied().collect()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Info currently represented by `element`, if it has one.
    pub fn info(&self, element: ElementRef) -> Option<&Arc<AudioObjectInfo>> {
        self.infos.get(element)
    }

    pub fn infos(&self) -> &InfoTable {
        &self.infos
    }
}

/// Projects snapshots into graphs, reusing records across projections.
#[derive(Default)]
pub struct GraphProjector {
    adapter: ObjectAdapter,
}

impl GraphProjector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn adapter(&self) -> &ObjectAdapter {
        &self.adapter
    }

    /// Builds the projection for `snapshot` under `preferences`.
    ///
    /// Objects the adapter rejects are skipped and logged.
    pub fn project(&mut self, snapshot: &ObjectSnapshot, preferences: &Preferences) -> Projection {
        let released = self.adapter.prune();

        let mut all_edges: Vec<(Arc<GraphEdge>, Option<&Arc<AudioObjectInfo>>)> = Vec::new();
        for info in snapshot.sink_inputs.iter().chain(&snapshot.source_outputs) {
            match self.adapter.to_edge(info) {
                Ok(edge) => all_edges.push((edge, Some(info))),
                Err(err) => warn!(
                    "event=project_skip module=graph status=skipped reason=edge error={}",
                    err
                ),
            }
        }
        for relation in &snapshot.monitor_sources {
            all_edges.push((self.adapter.monitor_to_edge(relation), None));
        }

        let connected: BTreeSet<NodeId> = all_edges
            .iter()
            .flat_map(|(edge, _)| [edge.source, edge.target])
            .collect();

        let mut nodes = BTreeMap::new();
        let mut infos = BTreeMap::new();
        let node_objects = snapshot
            .sinks
            .iter()
            .chain(&snapshot.sources)
            .chain(&snapshot.clients)
            .chain(&snapshot.modules);
        for info in node_objects {
            let node = match self.adapter.to_node(info) {
                Ok(node) => node,
                Err(err) => {
                    warn!(
                        "event=project_skip module=graph status=skipped reason=node error={}",
                        err
                    );
                    continue;
                }
            };
            if !node_visible(&node, info, &connected, preferences) {
                continue;
            }
            infos.insert(ElementRef::Node(node.id), Arc::clone(info));
            nodes.insert(node.id, node);
        }

        let mut edges = BTreeMap::new();
        for (edge, info) in all_edges {
            if !nodes.contains_key(&edge.source) || !nodes.contains_key(&edge.target) {
                continue;
            }
            if edge.kind == EdgeKind::MonitorSource && preferences.hide_monitor_source_edges {
                continue;
            }
            if let Some(info) = info {
                infos.insert(ElementRef::Edge(edge.id), Arc::clone(info));
            }
            edges.insert(edge.id, edge);
        }

        debug!(
            "event=project module=graph status=ok nodes={} edges={} released_records={}",
            nodes.len(),
            edges.len(),
            released
        );

        Projection {
            nodes,
            edges,
            infos: InfoTable { entries: infos },
        }
    }
}

fn node_visible(
    node: &GraphNode,
    info: &AudioObjectInfo,
    connected: &BTreeSet<NodeId>,
    preferences: &Preferences,
) -> bool {
    let hide_disconnected = match node.kind {
        NodeKind::Client => preferences.hide_disconnected_clients,
        NodeKind::Module => preferences.hide_disconnected_modules,
        NodeKind::Source => preferences.hide_disconnected_sources,
        NodeKind::Sink => preferences.hide_disconnected_sinks,
    };
    if hide_disconnected && !connected.contains(&node.id) {
        return false;
    }
    if preferences.hide_monitors && info.is_monitor() {
        return false;
    }
    if preferences.hide_pulseaudio_apps && is_sound_server_app(info) {
        return false;
    }
    true
}

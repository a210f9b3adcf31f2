//! Snapshot of every audio-server object collection.
//!
//! # Responsibility
//! - Hold the object collections one projection is derived from.
//! - Provide `(kind, index)` lookup and stream-ownership derivation.
//! - Derive monitor-source relations from sink/source pairs.
//!
//! # Invariants
//! - Each collection only holds objects of its own kind.
//! - Objects are shared as `Arc`; a changed object is a new `Arc`.

use crate::model::object::{AudioObjectInfo, AudioObjectKind, ObjectIndex};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Derived relation: source `source_index` monitors sink `sink_index`.
///
/// `index` equals `source_index`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorSource {
    pub index: ObjectIndex,
    pub sink_index: ObjectIndex,
    pub source_index: ObjectIndex,
}

impl MonitorSource {
    pub fn new(sink_index: ObjectIndex, source_index: ObjectIndex) -> Self {
        Self {
            index: source_index,
            sink_index,
            source_index,
        }
    }
}

/// All object collections at one point in time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ObjectSnapshot {
    pub sinks: Vec<Arc<AudioObjectInfo>>,
    pub sources: Vec<Arc<AudioObjectInfo>>,
    pub clients: Vec<Arc<AudioObjectInfo>>,
    pub modules: Vec<Arc<AudioObjectInfo>>,
    pub sink_inputs: Vec<Arc<AudioObjectInfo>>,
    pub source_outputs: Vec<Arc<AudioObjectInfo>>,
    pub monitor_sources: Vec<Arc<MonitorSource>>,
}

impl ObjectSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a snapshot from the feed's JSON form.
    pub fn from_json_str(value: &str) -> serde_json::Result<Self> {
        serde_json::from_str(value)
    }

    /// Adds one object to the collection of its kind.
    ///
    /// Returns the shared instance so callers can keep identity handles.
    pub fn insert(&mut self, info: AudioObjectInfo) -> Arc<AudioObjectInfo> {
        let shared = Arc::new(info);
        self.collection_mut(shared.kind).push(Arc::clone(&shared));
        shared
    }

    /// Replaces the object with the same kind and index, or adds it.
    pub fn upsert(&mut self, info: AudioObjectInfo) -> Arc<AudioObjectInfo> {
        let shared = Arc::new(info);
        let collection = self.collection_mut(shared.kind);
        match collection.iter_mut().find(|item| item.index == shared.index) {
            Some(slot) => *slot = Arc::clone(&shared),
            None => collection.push(Arc::clone(&shared)),
        }
        shared
    }

    /// Removes an object; returns whether it existed.
    pub fn remove(&mut self, kind: AudioObjectKind, index: ObjectIndex) -> bool {
        let collection = self.collection_mut(kind);
        let before = collection.len();
        collection.retain(|item| item.index != index);
        collection.len() < before
    }

    pub fn collection(&self, kind: AudioObjectKind) -> &[Arc<AudioObjectInfo>] {
        match kind {
            AudioObjectKind::Sink => &self.sinks,
            AudioObjectKind::Source => &self.sources,
            AudioObjectKind::Client => &self.clients,
            AudioObjectKind::Module => &self.modules,
            AudioObjectKind::SinkInput => &self.sink_inputs,
            AudioObjectKind::SourceOutput => &self.source_outputs,
        }
    }

    fn collection_mut(&mut self, kind: AudioObjectKind) -> &mut Vec<Arc<AudioObjectInfo>> {
        match kind {
            AudioObjectKind::Sink => &mut self.sinks,
            AudioObjectKind::Source => &mut self.sources,
            AudioObjectKind::Client => &mut self.clients,
            AudioObjectKind::Module => &mut self.modules,
            AudioObjectKind::SinkInput => &mut self.sink_inputs,
            AudioObjectKind::SourceOutput => &mut self.source_outputs,
        }
    }

    pub fn find(&self, kind: AudioObjectKind, index: ObjectIndex) -> Option<&Arc<AudioObjectInfo>> {
        self.collection(kind).iter().find(|item| item.index == index)
    }

    /// Sink-inputs drawn as edges leaving `owner`.
    ///
    /// A sink-input belongs to its client; it belongs to its module only
    /// when it has no client. Non-owner kinds own nothing.
    pub fn sink_inputs_owned_by(&self, owner: &AudioObjectInfo) -> Vec<&Arc<AudioObjectInfo>> {
        match owner.kind {
            AudioObjectKind::Client => self
                .sink_inputs
                .iter()
                .filter(|input| input.client_index == Some(owner.index))
                .collect(),
            AudioObjectKind::Module => self
                .sink_inputs
                .iter()
                .filter(|input| {
                    input.client_index.is_none() && input.module_index == Some(owner.index)
                })
                .collect(),
            AudioObjectKind::Sink
            | AudioObjectKind::Source
            | AudioObjectKind::SinkInput
            | AudioObjectKind::SourceOutput => Vec::new(),
        }
    }

    /// Computes monitor relations for sources whose monitored sink exists.
    pub fn derive_monitor_sources(&self) -> Vec<Arc<MonitorSource>> {
        self.sources
            .iter()
            .filter_map(|source| {
                let sink_index = source.monitor_of_sink?;
                self.find(AudioObjectKind::Sink, sink_index)?;
                Some(Arc::new(MonitorSource::new(sink_index, source.index)))
            })
            .collect()
    }

    /// Replaces `monitor_sources` with freshly derived relations.
    pub fn refresh_monitor_sources(&mut self) {
        self.monitor_sources = self.derive_monitor_sources();
    }
}

#[cfg(test)]
mod tests {
    use super::{MonitorSource, ObjectSnapshot};
    use crate::model::object::{AudioObjectInfo, AudioObjectKind};
    use std::sync::Arc;

    #[test]
    fn insert_routes_objects_by_kind() {
        let mut snapshot = ObjectSnapshot::new();
        snapshot.insert(AudioObjectInfo::sink(0, "out"));
        snapshot.insert(AudioObjectInfo::client(4, "app"));
        snapshot.insert(AudioObjectInfo::sink_input(9, Some(4), None, 0));

        assert_eq!(snapshot.sinks.len(), 1);
        assert_eq!(snapshot.clients.len(), 1);
        assert_eq!(snapshot.sink_inputs.len(), 1);
        assert!(snapshot.find(AudioObjectKind::SinkInput, 9).is_some());
        assert!(snapshot.find(AudioObjectKind::Sink, 9).is_none());
    }

    #[test]
    fn upsert_replaces_instance_in_place() {
        let mut snapshot = ObjectSnapshot::new();
        let first = snapshot.insert(AudioObjectInfo::sink(0, "out"));
        let second = snapshot.upsert(AudioObjectInfo::sink(0, "out").with_muted(true));

        assert_eq!(snapshot.sinks.len(), 1);
        assert!(!Arc::ptr_eq(&first, &second));
        assert!(snapshot.sinks[0].muted);
        assert!(snapshot.remove(AudioObjectKind::Sink, 0));
        assert!(!snapshot.remove(AudioObjectKind::Sink, 0));
    }

    #[test]
    fn module_owns_only_clientless_sink_inputs() {
        let mut snapshot = ObjectSnapshot::new();
        let module = snapshot.insert(AudioObjectInfo::module(2, "module-loopback"));
        snapshot.insert(AudioObjectInfo::sink_input(10, None, Some(2), 0));
        snapshot.insert(AudioObjectInfo::sink_input(11, Some(7), Some(2), 0));

        let owned = snapshot.sink_inputs_owned_by(&module);
        assert_eq!(owned.len(), 1);
        assert_eq!(owned[0].index, 10);
    }

    #[test]
    fn monitor_relations_require_existing_sink() {
        let mut snapshot = ObjectSnapshot::new();
        snapshot.insert(AudioObjectInfo::sink(0, "out"));
        snapshot.insert(AudioObjectInfo::source(1, "out.monitor").with_monitor_of_sink(0));
        snapshot.insert(AudioObjectInfo::source(2, "orphan.monitor").with_monitor_of_sink(5));
        snapshot.refresh_monitor_sources();

        assert_eq!(snapshot.monitor_sources.len(), 1);
        assert_eq!(*snapshot.monitor_sources[0], MonitorSource::new(0, 1));
    }
}

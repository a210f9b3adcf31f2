//! Audio-server object records.
//!
//! # Responsibility
//! - Describe one audio-server object (device, stream, client or module) as
//!   delivered by the snapshot feed.
//! - Decode the wire sentinel for "no relation" into `Option`.
//!
//! # Invariants
//! - Records are immutable once shared; an update arrives as a new instance.
//! - `index` is unique within one `AudioObjectKind`, never across kinds.
//! - Core code never mutates a record; it only issues control requests.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Server-assigned object index, unique per object kind.
pub type ObjectIndex = u32;

/// Volume value meaning 100% (no amplification, no attenuation).
pub const VOLUME_NORM: u32 = 0x10000;

/// Wire value used by the snapshot feed for "no related object".
pub const NO_INDEX: i64 = -1;

/// Closed set of audio-server object kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AudioObjectKind {
    /// Output device.
    Sink,
    /// Input device, including monitor taps of a sink.
    Source,
    /// Connected client process.
    Client,
    /// Loaded server module.
    Module,
    /// Playback stream flowing into a sink.
    SinkInput,
    /// Record stream flowing out of a source.
    SourceOutput,
}

impl AudioObjectKind {
    /// Stable wire name, also used as the graph id prefix.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sink => "sink",
            Self::Source => "source",
            Self::Client => "client",
            Self::Module => "module",
            Self::SinkInput => "sinkInput",
            Self::SourceOutput => "sourceOutput",
        }
    }
}

impl Display for AudioObjectKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stream sample format summary.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleSpec {
    pub channels: u8,
    #[serde(default)]
    pub rate: u32,
}

/// Property list subset the graph view reads.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ObjectProperties {
    pub application: Option<ApplicationProperties>,
    pub device: Option<DeviceProperties>,
    pub module: Option<ModuleProperties>,
}

/// `application.*` properties of a client or stream.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicationProperties {
    pub name: Option<String>,
    pub process: Option<ProcessProperties>,
}

/// `application.process.*` properties.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProcessProperties {
    pub binary: Option<String>,
}

/// `device.*` properties of a sink or source.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeviceProperties {
    pub class: Option<String>,
}

/// `module.*` properties of a module.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModuleProperties {
    pub description: Option<String>,
}

/// Text shown for a graph node plus its hover tooltip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeLabel {
    pub text: String,
    pub tooltip: Option<String>,
}

/// One audio-server object as seen in the latest snapshot.
///
/// Kind-specific fields stay optional so one record shape covers devices,
/// streams, clients and modules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioObjectInfo {
    /// Serialized as `type` to match the snapshot feed.
    #[serde(rename = "type")]
    pub kind: AudioObjectKind,
    pub index: ObjectIndex,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub muted: bool,
    /// One level per channel, in `VOLUME_NORM` units.
    #[serde(default)]
    pub channel_volumes: Vec<u32>,
    #[serde(default = "default_base_volume")]
    pub base_volume: u32,
    #[serde(default)]
    pub sample_spec: SampleSpec,
    #[serde(default, with = "sentinel_index")]
    pub client_index: Option<ObjectIndex>,
    #[serde(default, with = "sentinel_index")]
    pub module_index: Option<ObjectIndex>,
    #[serde(default, with = "sentinel_index")]
    pub sink_index: Option<ObjectIndex>,
    #[serde(default, with = "sentinel_index")]
    pub source_index: Option<ObjectIndex>,
    /// Set on sources that tap a sink's output.
    #[serde(default, with = "sentinel_index")]
    pub monitor_of_sink: Option<ObjectIndex>,
    #[serde(default)]
    pub properties: ObjectProperties,
}

fn default_base_volume() -> u32 {
    VOLUME_NORM
}

impl AudioObjectInfo {
    /// Creates a record with no relations, unmuted, and no channels.
    pub fn new(kind: AudioObjectKind, index: ObjectIndex, name: impl Into<String>) -> Self {
        Self {
            kind,
            index,
            name: name.into(),
            description: None,
            muted: false,
            channel_volumes: Vec::new(),
            base_volume: VOLUME_NORM,
            sample_spec: SampleSpec::default(),
            client_index: None,
            module_index: None,
            sink_index: None,
            source_index: None,
            monitor_of_sink: None,
            properties: ObjectProperties::default(),
        }
    }

    pub fn sink(index: ObjectIndex, name: impl Into<String>) -> Self {
        Self::new(AudioObjectKind::Sink, index, name).with_channel_volumes(vec![VOLUME_NORM; 2])
    }

    pub fn source(index: ObjectIndex, name: impl Into<String>) -> Self {
        Self::new(AudioObjectKind::Source, index, name).with_channel_volumes(vec![VOLUME_NORM; 2])
    }

    pub fn client(index: ObjectIndex, name: impl Into<String>) -> Self {
        Self::new(AudioObjectKind::Client, index, name)
    }

    pub fn module(index: ObjectIndex, name: impl Into<String>) -> Self {
        Self::new(AudioObjectKind::Module, index, name)
    }

    /// Playback stream owned by `client` (or by `module` when no client).
    pub fn sink_input(
        index: ObjectIndex,
        client: Option<ObjectIndex>,
        module: Option<ObjectIndex>,
        sink: ObjectIndex,
    ) -> Self {
        let mut info = Self::new(AudioObjectKind::SinkInput, index, format!("sink input {index}"))
            .with_channel_volumes(vec![VOLUME_NORM; 2]);
        info.client_index = client;
        info.module_index = module;
        info.sink_index = Some(sink);
        info
    }

    /// Record stream owned by `client` (or by `module` when no client).
    pub fn source_output(
        index: ObjectIndex,
        client: Option<ObjectIndex>,
        module: Option<ObjectIndex>,
        source: ObjectIndex,
    ) -> Self {
        let mut info = Self::new(
            AudioObjectKind::SourceOutput,
            index,
            format!("source output {index}"),
        )
        .with_channel_volumes(vec![VOLUME_NORM; 2]);
        info.client_index = client;
        info.module_index = module;
        info.source_index = Some(source);
        info
    }

    pub fn with_muted(mut self, muted: bool) -> Self {
        self.muted = muted;
        self
    }

    /// Replaces channel levels and keeps `sample_spec.channels` in sync.
    pub fn with_channel_volumes(mut self, volumes: Vec<u32>) -> Self {
        self.sample_spec.channels = u8::try_from(volumes.len()).unwrap_or(u8::MAX);
        self.channel_volumes = volumes;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_owner_module(mut self, module: ObjectIndex) -> Self {
        self.module_index = Some(module);
        self
    }

    pub fn with_monitor_of_sink(mut self, sink: ObjectIndex) -> Self {
        self.monitor_of_sink = Some(sink);
        self
    }

    /// Sets `application.name` and `application.process.binary`.
    pub fn with_application(mut self, name: Option<&str>, binary: Option<&str>) -> Self {
        self.properties.application = Some(ApplicationProperties {
            name: name.map(str::to_string),
            process: Some(ProcessProperties {
                binary: binary.map(str::to_string),
            }),
        });
        self
    }

    pub fn channel_count(&self) -> usize {
        usize::from(self.sample_spec.channels)
    }

    pub fn application_name(&self) -> Option<&str> {
        self.properties.application.as_ref()?.name.as_deref()
    }

    pub fn application_binary(&self) -> Option<&str> {
        self.properties
            .application
            .as_ref()?
            .process
            .as_ref()?
            .binary
            .as_deref()
    }

    /// Returns whether this device only taps another device's signal.
    pub fn is_monitor(&self) -> bool {
        if self.kind != AudioObjectKind::Source {
            return false;
        }
        let monitor_class = self
            .properties
            .device
            .as_ref()
            .and_then(|device| device.class.as_deref())
            == Some("monitor");
        self.monitor_of_sink.is_some() || monitor_class
    }

    /// Text and tooltip for the node this object is drawn as.
    pub fn label(&self) -> NodeLabel {
        match self.kind {
            AudioObjectKind::Sink | AudioObjectKind::Source => NodeLabel {
                text: self.description.clone().unwrap_or_else(|| self.name.clone()),
                tooltip: Some(self.name.clone()),
            },
            AudioObjectKind::Client => NodeLabel {
                text: self.name.clone(),
                tooltip: self.application_binary().map(str::to_string),
            },
            AudioObjectKind::Module => NodeLabel {
                text: self.name.clone(),
                tooltip: self
                    .properties
                    .module
                    .as_ref()
                    .and_then(|module| module.description.clone()),
            },
            AudioObjectKind::SinkInput | AudioObjectKind::SourceOutput => NodeLabel {
                text: self
                    .application_name()
                    .map(str::to_string)
                    .unwrap_or_else(|| self.name.clone()),
                tooltip: None,
            },
        }
    }
}

/// Serde adapter for relation fields: negative values and the server's
/// invalid-index marker both mean "none".
mod sentinel_index {
    use super::{ObjectIndex, NO_INDEX};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<ObjectIndex>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(index) => serializer.serialize_i64(i64::from(*index)),
            None => serializer.serialize_i64(NO_INDEX),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<ObjectIndex>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<i64>::deserialize(deserializer)? {
            None => Ok(None),
            Some(value) if value < 0 || value == i64::from(u32::MAX) => Ok(None),
            Some(value) => ObjectIndex::try_from(value)
                .map(Some)
                .map_err(|_| D::Error::custom(format!("object index out of range: {value}"))),
        }
    }
}

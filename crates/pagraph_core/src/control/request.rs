//! Control requests sent to the audio-server collaborator.
//!
//! # Invariants
//! - Requests are index-addressed and fire-and-forget; their effect shows up
//!   in a later snapshot, if at all.

use crate::model::object::{AudioObjectKind, ObjectIndex};
use serde::Serialize;

/// Object kinds that carry mute and volume state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MixerKind {
    Sink,
    Source,
    SinkInput,
    SourceOutput,
}

impl MixerKind {
    /// Returns `None` for clients and modules, which have no own levels.
    pub fn from_object_kind(kind: AudioObjectKind) -> Option<Self> {
        match kind {
            AudioObjectKind::Sink => Some(Self::Sink),
            AudioObjectKind::Source => Some(Self::Source),
            AudioObjectKind::SinkInput => Some(Self::SinkInput),
            AudioObjectKind::SourceOutput => Some(Self::SourceOutput),
            AudioObjectKind::Client | AudioObjectKind::Module => None,
        }
    }
}

/// One mutation request for the control collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum ControlRequest {
    SetMute {
        kind: MixerKind,
        index: ObjectIndex,
        muted: bool,
    },
    #[serde(rename_all = "camelCase")]
    SetVolume {
        kind: MixerKind,
        index: ObjectIndex,
        channel_volumes: Vec<u32>,
    },
    KillClient {
        index: ObjectIndex,
    },
    KillSinkInput {
        index: ObjectIndex,
    },
    KillSourceOutput {
        index: ObjectIndex,
    },
    UnloadModule {
        index: ObjectIndex,
    },
    #[serde(rename_all = "camelCase")]
    MoveSinkInput {
        index: ObjectIndex,
        sink_index: ObjectIndex,
    },
    #[serde(rename_all = "camelCase")]
    MoveSourceOutput {
        index: ObjectIndex,
        source_index: ObjectIndex,
    },
}

/// Receiver of control requests.
pub trait AudioControl {
    fn submit(&mut self, request: ControlRequest);
}

/// Records requests in order; used by the CLI and by tests.
impl AudioControl for Vec<ControlRequest> {
    fn submit(&mut self, request: ControlRequest) {
        self.push(request);
    }
}

#[cfg(test)]
mod tests {
    use super::{ControlRequest, MixerKind};

    #[test]
    fn requests_serialize_with_op_tag() {
        let json = serde_json::to_value(ControlRequest::SetVolume {
            kind: MixerKind::SinkInput,
            index: 4,
            channel_volumes: vec![100, 200],
        })
        .expect("request should encode");
        assert_eq!(json["op"], "setVolume");
        assert_eq!(json["kind"], "sinkInput");
        assert_eq!(json["channelVolumes"][1], 200);

        let json = serde_json::to_value(ControlRequest::MoveSinkInput {
            index: 4,
            sink_index: 2,
        })
        .expect("request should encode");
        assert_eq!(json["op"], "moveSinkInput");
        assert_eq!(json["sinkIndex"], 2);
    }
}

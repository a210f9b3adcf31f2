//! Mute/volume cascade and graph-level mutations.
//!
//! # Responsibility
//! - Turn mute, volume, delete and re-route commands into control requests.
//! - Cascade mute from clients/modules to the sink-inputs they own.
//! - Clamp volume changes and apply channel locking.
//!
//! # Invariants
//! - Unsupported kinds and already-satisfied states are no-ops, never errors.
//! - Volumes stay within `[0, max_volume * VOLUME_NORM]`.
//! - Each group member is judged against its own muted state.

use crate::control::request::{AudioControl, ControlRequest, MixerKind};
use crate::model::graph::{EdgeKind, GraphEdge, GraphNode, NodeKind};
use crate::model::object::{AudioObjectInfo, AudioObjectKind, VOLUME_NORM};
use crate::model::preferences::Preferences;
use crate::model::snapshot::ObjectSnapshot;
use log::debug;
use std::fmt::{Display, Formatter};

/// Why a command resolved to no request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoOpReason {
    /// Target already has the requested state.
    AlreadyInState,
    /// Operation does not apply to this object kind.
    UnsupportedKind(AudioObjectKind),
    /// Nothing selected, or the element has no live info.
    MissingInfo,
    /// Device is not owned by a module, so there is nothing to unload.
    NotModuleOwned,
    /// Client or module owns no sink-inputs.
    EmptyGroup,
    /// Object reports no channels.
    NoChannels,
    /// Edge cannot be moved onto the given node.
    IncompatibleTarget,
}

impl Display for NoOpReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyInState => write!(f, "already in requested state"),
            Self::UnsupportedKind(kind) => write!(f, "unsupported for {kind}"),
            Self::MissingInfo => write!(f, "no live object for element"),
            Self::NotModuleOwned => write!(f, "device is not owned by a module"),
            Self::EmptyGroup => write!(f, "owner has no sink inputs"),
            Self::NoChannels => write!(f, "object has no channels"),
            Self::IncompatibleTarget => write!(f, "edge cannot be moved to target"),
        }
    }
}

/// Result of one cascade operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CascadeOutcome {
    /// Number of requests submitted.
    Issued(usize),
    NoOp(NoOpReason),
}

impl CascadeOutcome {
    /// Number of requests submitted (zero for no-ops).
    pub fn issued(self) -> usize {
        match self {
            Self::Issued(count) => count,
            Self::NoOp(_) => 0,
        }
    }
}

/// Direction of a volume change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeDirection {
    Up,
    Down,
}

/// Step, ceiling and channel lock for volume changes.
///
/// `step` and `max` are fractions of `VOLUME_NORM`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeAdjustment {
    pub step: f64,
    pub max: f64,
    pub lock_channels: bool,
}

impl VolumeAdjustment {
    pub fn from_preferences(preferences: &Preferences) -> Self {
        Self {
            step: preferences.volume_step,
            max: preferences.max_volume,
            lock_channels: preferences.lock_channels_together,
        }
    }

    /// Converts a fraction of `VOLUME_NORM` to volume units in `[0, u32::MAX]`.
    fn to_units(fraction: f64) -> i64 {
        (fraction * f64::from(VOLUME_NORM))
            .round()
            .clamp(0.0, f64::from(u32::MAX)) as i64
    }
}

/// Applies one volume step to every channel, clamped to `[0, max]`.
///
/// With channel lock every channel takes the loudest resulting value.
pub fn adjusted_channel_volumes(
    volumes: &[u32],
    direction: VolumeDirection,
    adjustment: &VolumeAdjustment,
) -> Vec<u32> {
    let step = VolumeAdjustment::to_units(adjustment.step);
    let max = VolumeAdjustment::to_units(adjustment.max);
    let delta = match direction {
        VolumeDirection::Up => step,
        VolumeDirection::Down => -step,
    };
    let adjusted: Vec<u32> = volumes
        .iter()
        .map(|volume| {
            // `max` never exceeds `u32::MAX`, so the cast is lossless.
            (i64::from(*volume) + delta).clamp(0, max) as u32
        })
        .collect();

    if !adjustment.lock_channels {
        return adjusted;
    }
    let loudest = adjusted.iter().copied().max().unwrap_or(0);
    vec![loudest; adjusted.len()]
}

/// Cascade operations evaluated against one snapshot.
pub struct MixerCascade<'a> {
    snapshot: &'a ObjectSnapshot,
    adjustment: VolumeAdjustment,
}

impl<'a> MixerCascade<'a> {
    pub fn new(snapshot: &'a ObjectSnapshot, preferences: &Preferences) -> Self {
        Self {
            snapshot,
            adjustment: VolumeAdjustment::from_preferences(preferences),
        }
    }

    /// Sets mute to `desired`, or toggles it when `desired` is `None`.
    ///
    /// For a client or module the current state is "all owned sink-inputs
    /// muted", so a partially muted group toggles to fully muted.
    pub fn toggle_mute(
        &self,
        info: &AudioObjectInfo,
        desired: Option<bool>,
        control: &mut dyn AudioControl,
    ) -> CascadeOutcome {
        let Some(kind) = MixerKind::from_object_kind(info.kind) else {
            return self.toggle_group_mute(info, desired, control);
        };
        let desired = desired.unwrap_or(!info.muted);
        if info.muted == desired {
            return CascadeOutcome::NoOp(NoOpReason::AlreadyInState);
        }
        submit(
            control,
            ControlRequest::SetMute {
                kind,
                index: info.index,
                muted: desired,
            },
        );
        CascadeOutcome::Issued(1)
    }

    fn toggle_group_mute(
        &self,
        owner: &AudioObjectInfo,
        desired: Option<bool>,
        control: &mut dyn AudioControl,
    ) -> CascadeOutcome {
        let owned = self.snapshot.sink_inputs_owned_by(owner);
        if owned.is_empty() {
            return CascadeOutcome::NoOp(NoOpReason::EmptyGroup);
        }
        let group_muted = owned.iter().all(|input| input.muted);
        let desired = desired.unwrap_or(!group_muted);
        let issued: usize = owned
            .iter()
            .map(|input| self.toggle_mute(input, Some(desired), control).issued())
            .sum();
        if issued == 0 {
            CascadeOutcome::NoOp(NoOpReason::AlreadyInState)
        } else {
            CascadeOutcome::Issued(issued)
        }
    }

    /// Steps every channel of a device or stream up or down.
    pub fn adjust_volume(
        &self,
        info: &AudioObjectInfo,
        direction: VolumeDirection,
        control: &mut dyn AudioControl,
    ) -> CascadeOutcome {
        let Some(kind) = MixerKind::from_object_kind(info.kind) else {
            return CascadeOutcome::NoOp(NoOpReason::UnsupportedKind(info.kind));
        };
        if info.channel_volumes.is_empty() {
            return CascadeOutcome::NoOp(NoOpReason::NoChannels);
        }
        let channel_volumes =
            adjusted_channel_volumes(&info.channel_volumes, direction, &self.adjustment);
        if channel_volumes == info.channel_volumes {
            return CascadeOutcome::NoOp(NoOpReason::AlreadyInState);
        }
        submit(
            control,
            ControlRequest::SetVolume {
                kind,
                index: info.index,
                channel_volumes,
            },
        );
        CascadeOutcome::Issued(1)
    }

    /// Removes the object behind a graph element.
    ///
    /// Clients are killed, modules unloaded, module-owned devices unload
    /// their module, streams are killed.
    pub fn delete(&self, info: &AudioObjectInfo, control: &mut dyn AudioControl) -> CascadeOutcome {
        let request = match info.kind {
            AudioObjectKind::Client => ControlRequest::KillClient { index: info.index },
            AudioObjectKind::Module => ControlRequest::UnloadModule { index: info.index },
            AudioObjectKind::Sink | AudioObjectKind::Source => match info.module_index {
                Some(module) => ControlRequest::UnloadModule { index: module },
                None => return CascadeOutcome::NoOp(NoOpReason::NotModuleOwned),
            },
            AudioObjectKind::SinkInput => ControlRequest::KillSinkInput { index: info.index },
            AudioObjectKind::SourceOutput => {
                ControlRequest::KillSourceOutput { index: info.index }
            }
        };
        submit(control, request);
        CascadeOutcome::Issued(1)
    }
}

/// Re-routes a stream edge onto a new device node.
///
/// Sink-inputs move to sinks, source-outputs to sources; anything else is
/// rejected.
pub fn swap_edge(
    edge: &GraphEdge,
    target: &GraphNode,
    control: &mut dyn AudioControl,
) -> CascadeOutcome {
    if edge.target == target.id {
        return CascadeOutcome::NoOp(NoOpReason::AlreadyInState);
    }
    let request = match (edge.kind, target.kind) {
        (EdgeKind::SinkInput, NodeKind::Sink) => ControlRequest::MoveSinkInput {
            index: edge.index,
            sink_index: target.index,
        },
        (EdgeKind::SourceOutput, NodeKind::Source) => ControlRequest::MoveSourceOutput {
            index: edge.index,
            source_index: target.index,
        },
        _ => return CascadeOutcome::NoOp(NoOpReason::IncompatibleTarget),
    };
    submit(control, request);
    CascadeOutcome::Issued(1)
}

fn submit(control: &mut dyn AudioControl, request: ControlRequest) {
    debug!(
        "event=control_request module=control status=submitted request={:?}",
        request
    );
    control.submit(request);
}

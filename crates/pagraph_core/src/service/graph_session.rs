//! Graph session service.
//!
//! # Responsibility
//! - Own the projector, current projection, selection and preferences.
//! - Re-project on every snapshot or preference change and heal the
//!   selection against the result.
//! - Resolve selected elements to live info and route commands to the
//!   selection model or the mixer cascade.
//!
//! # Invariants
//! - `projection` always reflects the latest `snapshot` and `preferences`.
//! - The selection only ever names an element of `projection`.
//! - Mutations go out through `AudioControl`; the session never edits the
//!   snapshot it was given.

use crate::control::cascade::{
    swap_edge, CascadeOutcome, MixerCascade, NoOpReason, VolumeDirection,
};
use crate::control::request::AudioControl;
use crate::graph::projector::{GraphProjector, Projection};
use crate::model::graph::{EdgeId, ElementRef, NodeId};
use crate::model::object::AudioObjectInfo;
use crate::model::preferences::Preferences;
use crate::model::snapshot::ObjectSnapshot;
use crate::selection::category::{HorizontalDirection, VerticalDirection};
use crate::selection::model::Selection;
use crate::service::command::{CommandOutcome, GraphCommand};
use log::{debug, info};
use std::sync::Arc;

/// Projection, selection and command routing for one graph view.
pub struct GraphSession {
    projector: GraphProjector,
    preferences: Preferences,
    snapshot: Arc<ObjectSnapshot>,
    projection: Projection,
    selection: Selection,
}

impl GraphSession {
    /// Creates an empty session; call [`GraphSession::reproject`] with the
    /// first snapshot.
    pub fn new(preferences: Preferences) -> Self {
        Self {
            projector: GraphProjector::new(),
            preferences,
            snapshot: Arc::new(ObjectSnapshot::new()),
            projection: Projection::default(),
            selection: Selection::new(),
        }
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    /// Replaces the preferences and re-projects the current snapshot.
    pub fn set_preferences(&mut self, preferences: Preferences) {
        self.preferences = preferences;
        self.rebuild("preferences");
    }

    pub fn snapshot(&self) -> &Arc<ObjectSnapshot> {
        &self.snapshot
    }

    /// Projects `snapshot` and re-resolves the selection against it.
    pub fn reproject(&mut self, snapshot: Arc<ObjectSnapshot>) {
        self.snapshot = snapshot;
        self.rebuild("snapshot");
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Live object backing `element`, if it is part of the projection.
    pub fn element_to_info(&self, element: ElementRef) -> Option<&Arc<AudioObjectInfo>> {
        self.projection.info(element)
    }

    /// Live object backing the current selection.
    pub fn selected_info(&self) -> Option<&Arc<AudioObjectInfo>> {
        self.selection
            .element_ref()
            .and_then(|element| self.element_to_info(element))
    }

    /// Selects `element`; unknown ids leave the selection unchanged.
    pub fn select(&mut self, element: ElementRef) -> bool {
        self.selection.select(&self.projection, element)
    }

    pub fn deselect(&mut self) {
        self.selection.deselect();
    }

    pub fn navigate(&mut self, direction: VerticalDirection) -> bool {
        self.selection.navigate(&self.projection, direction)
    }

    pub fn navigate_horizontal(&mut self, direction: HorizontalDirection) -> bool {
        self.selection
            .navigate_horizontal(&self.projection, direction)
    }

    pub fn toggle_mute_selected(&self, control: &mut dyn AudioControl) -> CascadeOutcome {
        match self.selected_info() {
            Some(info) => self.cascade().toggle_mute(info, None, control),
            None => CascadeOutcome::NoOp(NoOpReason::MissingInfo),
        }
    }

    pub fn adjust_volume_selected(
        &self,
        direction: VolumeDirection,
        control: &mut dyn AudioControl,
    ) -> CascadeOutcome {
        match self.selected_info() {
            Some(info) => self.cascade().adjust_volume(info, direction, control),
            None => CascadeOutcome::NoOp(NoOpReason::MissingInfo),
        }
    }

    pub fn delete_selected(&self, control: &mut dyn AudioControl) -> CascadeOutcome {
        match self.selected_info() {
            Some(info) => self.cascade().delete(info, control),
            None => CascadeOutcome::NoOp(NoOpReason::MissingInfo),
        }
    }

    /// Moves the stream behind `edge` onto `target`; both must be projected.
    pub fn swap_edge(
        &self,
        edge: EdgeId,
        target: NodeId,
        control: &mut dyn AudioControl,
    ) -> CascadeOutcome {
        match (self.projection.edge(edge), self.projection.node(target)) {
            (Some(edge), Some(target)) => swap_edge(edge, target, control),
            _ => CascadeOutcome::NoOp(NoOpReason::MissingInfo),
        }
    }

    /// Routes one command to the selection model or the cascade.
    pub fn dispatch(
        &mut self,
        command: GraphCommand,
        control: &mut dyn AudioControl,
    ) -> CommandOutcome {
        let outcome = match command {
            GraphCommand::Navigate(direction) => {
                CommandOutcome::Selection(self.navigate(direction))
            }
            GraphCommand::NavigateHorizontal(direction) => {
                CommandOutcome::Selection(self.navigate_horizontal(direction))
            }
            GraphCommand::Select(element) => CommandOutcome::Selection(self.select(element)),
            GraphCommand::Deselect => {
                let changed = !self.selection.is_empty();
                self.deselect();
                CommandOutcome::Selection(changed)
            }
            GraphCommand::ToggleMute => {
                CommandOutcome::Control(self.toggle_mute_selected(control))
            }
            GraphCommand::AdjustVolume(direction) => {
                CommandOutcome::Control(self.adjust_volume_selected(direction, control))
            }
            GraphCommand::DeleteSelected => {
                CommandOutcome::Control(self.delete_selected(control))
            }
            GraphCommand::SwapEdge { edge, target } => {
                CommandOutcome::Control(self.swap_edge(edge, target, control))
            }
        };

        match outcome {
            CommandOutcome::Control(CascadeOutcome::NoOp(reason)) => debug!(
                "event=command_dispatch module=service status=noop command={:?} reason={}",
                command, reason
            ),
            _ => debug!(
                "event=command_dispatch module=service status=ok command={:?} outcome={:?}",
                command, outcome
            ),
        }
        outcome
    }

    fn cascade(&self) -> MixerCascade<'_> {
        MixerCascade::new(&self.snapshot, &self.preferences)
    }

    fn rebuild(&mut self, trigger: &str) {
        self.projection = self.projector.project(&self.snapshot, &self.preferences);
        let had_selection = !self.selection.is_empty();
        let kept = self.selection.refresh(&self.projection);
        info!(
            "event=graph_reproject module=service status=ok trigger={} nodes={} edges={} selection_dropped={}",
            trigger,
            self.projection.node_count(),
            self.projection.edge_count(),
            had_selection && !kept
        );
    }
}

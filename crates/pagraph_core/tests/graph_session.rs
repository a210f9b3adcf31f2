use pagraph_core::{
    AudioObjectInfo, CascadeOutcome, CommandOutcome, ControlRequest, ElementRef, GraphCommand,
    GraphSession, MixerKind, NoOpReason, NodeId, NodeKind, ObjectSnapshot, Preferences,
    VOLUME_NORM,
};
use std::sync::Arc;

fn session() -> GraphSession {
    let mut snapshot = ObjectSnapshot::new();
    snapshot.insert(AudioObjectInfo::sink(0, "speakers"));
    snapshot.insert(AudioObjectInfo::sink(1, "headphones"));
    snapshot.insert(AudioObjectInfo::client(7, "player"));
    snapshot.insert(AudioObjectInfo::sink_input(40, Some(7), None, 0));

    let mut session = GraphSession::new(Preferences::default());
    session.reproject(Arc::new(snapshot));
    session
}

fn run(session: &mut GraphSession, commands: &[&str]) -> Vec<ControlRequest> {
    let mut requests = Vec::new();
    for name in commands {
        let command: GraphCommand = name.parse().unwrap();
        session.dispatch(command, &mut requests);
    }
    requests
}

#[test]
fn keyboard_script_mutes_the_selected_client() {
    let mut session = session();
    let requests = run(&mut session, &["down", "mute"]);

    assert_eq!(
        session.selection().element_ref(),
        Some(ElementRef::Node(NodeId::new(NodeKind::Client, 7)))
    );
    assert_eq!(
        requests,
        vec![ControlRequest::SetMute {
            kind: MixerKind::SinkInput,
            index: 40,
            muted: true,
        }]
    );
}

#[test]
fn keyboard_script_lowers_the_stream_volume() {
    let mut session = session();
    let requests = run(&mut session, &["right", "volume-down"]);

    let step = (0.05 * f64::from(VOLUME_NORM)).round() as u32;
    assert_eq!(
        requests,
        vec![ControlRequest::SetVolume {
            kind: MixerKind::SinkInput,
            index: 40,
            channel_volumes: vec![VOLUME_NORM - step; 2],
        }]
    );
}

#[test]
fn select_and_swap_commands_take_element_ids() {
    let mut session = session();
    let requests = run(&mut session, &["select:sink-1", "delete", "swap:sinkInput-40:sink-1"]);

    assert_eq!(
        requests,
        vec![ControlRequest::MoveSinkInput {
            index: 40,
            sink_index: 1,
        }]
    );
}

#[test]
fn mutations_without_selection_are_no_ops() {
    let mut session = session();
    let mut requests: Vec<ControlRequest> = Vec::new();

    let outcome = session.dispatch(GraphCommand::DeleteSelected, &mut requests);
    assert_eq!(
        outcome,
        CommandOutcome::Control(CascadeOutcome::NoOp(NoOpReason::MissingInfo))
    );
    assert!(requests.is_empty());
}

#[test]
fn deselect_reports_whether_anything_changed() {
    let mut session = session();
    let mut requests: Vec<ControlRequest> = Vec::new();

    session.dispatch(GraphCommand::Select(NodeId::new(NodeKind::Sink, 0).into()), &mut requests);
    assert_eq!(
        session.dispatch(GraphCommand::Deselect, &mut requests),
        CommandOutcome::Selection(true)
    );
    assert_eq!(
        session.dispatch(GraphCommand::Deselect, &mut requests),
        CommandOutcome::Selection(false)
    );
}

#[test]
fn element_to_info_resolves_live_objects() {
    let session = session();
    let info = session
        .element_to_info(ElementRef::Node(NodeId::new(NodeKind::Client, 7)))
        .unwrap();
    assert_eq!(info.name, "player");
    assert!(session
        .element_to_info(ElementRef::Node(NodeId::new(NodeKind::Client, 8)))
        .is_none());
}

use pagraph_core::{
    AudioObjectInfo, AudioObjectKind, EdgeId, EdgeKind, ElementRef, GraphProjector, GraphSession,
    HorizontalDirection, NodeId, NodeKind, ObjectSnapshot, Preferences, SelectedElement,
    Selection, VerticalDirection,
};
use std::sync::Arc;

fn node_ref(kind: NodeKind, index: u32) -> ElementRef {
    ElementRef::Node(NodeId::new(kind, index))
}

fn edge_ref(kind: EdgeKind, index: u32) -> ElementRef {
    ElementRef::Edge(EdgeId::new(kind, index))
}

fn three_clients() -> ObjectSnapshot {
    let mut snapshot = ObjectSnapshot::new();
    snapshot.insert(AudioObjectInfo::sink(0, "out"));
    for index in 0..3 {
        snapshot.insert(AudioObjectInfo::client(index, format!("app {index}")));
        snapshot.insert(AudioObjectInfo::sink_input(20 + index, Some(index), None, 0));
    }
    snapshot
}

/// client-10 plays to sink-0 and records from source-2.
fn one_app_path() -> ObjectSnapshot {
    let mut snapshot = ObjectSnapshot::new();
    snapshot.insert(AudioObjectInfo::sink(0, "out"));
    snapshot.insert(AudioObjectInfo::source(2, "mic"));
    snapshot.insert(AudioObjectInfo::client(10, "call"));
    snapshot.insert(AudioObjectInfo::sink_input(40, Some(10), None, 0));
    snapshot.insert(AudioObjectInfo::source_output(50, Some(10), None, 2));
    snapshot
}

fn session_for(snapshot: ObjectSnapshot) -> GraphSession {
    let mut session = GraphSession::new(Preferences::default());
    session.reproject(Arc::new(snapshot));
    session
}

#[test]
fn vertical_navigation_wraps_in_both_directions() {
    let mut session = session_for(three_clients());
    assert!(session.select(node_ref(NodeKind::Client, 0)));

    let mut visited = Vec::new();
    for _ in 0..3 {
        session.navigate(VerticalDirection::Down);
        visited.push(session.selection().element_ref().unwrap().to_string());
    }
    assert_eq!(visited, vec!["client-1", "client-2", "client-0"]);

    session.navigate(VerticalDirection::Up);
    assert_eq!(
        session.selection().element_ref(),
        Some(node_ref(NodeKind::Client, 2))
    );
}

#[test]
fn vertical_navigation_from_nothing_starts_with_clients() {
    let mut session = session_for(three_clients());
    assert!(session.navigate(VerticalDirection::Down));
    assert_eq!(
        session.selection().element_ref(),
        Some(node_ref(NodeKind::Client, 0))
    );

    session.deselect();
    assert!(session.navigate(VerticalDirection::Up));
    assert_eq!(
        session.selection().element_ref(),
        Some(node_ref(NodeKind::Client, 2))
    );
}

#[test]
fn vertical_navigation_walks_edges_of_a_stream_category() {
    let mut session = session_for(three_clients());
    assert!(session.select(edge_ref(EdgeKind::SinkInput, 22)));
    session.navigate(VerticalDirection::Down);
    assert_eq!(
        session.selection().element_ref(),
        Some(edge_ref(EdgeKind::SinkInput, 20))
    );
}

#[test]
fn horizontal_navigation_follows_the_signal_path() {
    let mut session = session_for(one_app_path());
    session.select(node_ref(NodeKind::Client, 10));

    session.navigate_horizontal(HorizontalDirection::Right);
    assert_eq!(
        session.selection().element_ref(),
        Some(edge_ref(EdgeKind::SinkInput, 40))
    );
    session.navigate_horizontal(HorizontalDirection::Right);
    assert_eq!(
        session.selection().element_ref(),
        Some(node_ref(NodeKind::Sink, 0))
    );

    session.select(node_ref(NodeKind::Client, 10));
    session.navigate_horizontal(HorizontalDirection::Left);
    assert_eq!(
        session.selection().element_ref(),
        Some(edge_ref(EdgeKind::SourceOutput, 50))
    );
    session.navigate_horizontal(HorizontalDirection::Left);
    assert_eq!(
        session.selection().element_ref(),
        Some(node_ref(NodeKind::Source, 2))
    );
}

#[test]
fn horizontal_navigation_prefers_connected_over_lower_index() {
    let mut snapshot = ObjectSnapshot::new();
    snapshot.insert(AudioObjectInfo::sink(0, "speakers"));
    snapshot.insert(AudioObjectInfo::sink(1, "headphones"));
    snapshot.insert(AudioObjectInfo::client(1, "music"));
    snapshot.insert(AudioObjectInfo::client(10, "call"));
    snapshot.insert(AudioObjectInfo::sink_input(5, Some(1), None, 0));
    snapshot.insert(AudioObjectInfo::sink_input(40, Some(10), None, 1));
    let mut session = session_for(snapshot);
    session.select(node_ref(NodeKind::Client, 10));

    session.navigate_horizontal(HorizontalDirection::Right);
    assert_eq!(
        session.selection().element_ref(),
        Some(edge_ref(EdgeKind::SinkInput, 40))
    );
    session.navigate_horizontal(HorizontalDirection::Right);
    assert_eq!(
        session.selection().element_ref(),
        Some(node_ref(NodeKind::Sink, 1))
    );

    session.navigate_horizontal(HorizontalDirection::Left);
    assert_eq!(
        session.selection().element_ref(),
        Some(edge_ref(EdgeKind::SinkInput, 40))
    );
    session.navigate_horizontal(HorizontalDirection::Left);
    assert_eq!(
        session.selection().element_ref(),
        Some(node_ref(NodeKind::Client, 10))
    );
}

#[test]
fn horizontal_navigation_wraps_from_sinks_to_sources() {
    let mut session = session_for(one_app_path());
    session.select(node_ref(NodeKind::Sink, 0));

    session.navigate_horizontal(HorizontalDirection::Right);
    assert_eq!(
        session.selection().element_ref(),
        Some(node_ref(NodeKind::Source, 2))
    );
}

#[test]
fn horizontal_navigation_from_nothing_picks_streams_first() {
    let mut session = session_for(one_app_path());
    session.navigate_horizontal(HorizontalDirection::Left);
    assert_eq!(
        session.selection().element_ref(),
        Some(edge_ref(EdgeKind::SourceOutput, 50))
    );

    session.deselect();
    session.navigate_horizontal(HorizontalDirection::Right);
    assert_eq!(
        session.selection().element_ref(),
        Some(edge_ref(EdgeKind::SinkInput, 40))
    );
}

#[test]
fn horizontal_navigation_from_nothing_falls_back_to_devices() {
    let mut snapshot = ObjectSnapshot::new();
    snapshot.insert(AudioObjectInfo::sink(0, "out"));
    snapshot.insert(AudioObjectInfo::source(2, "mic"));
    let mut session = session_for(snapshot);

    session.navigate_horizontal(HorizontalDirection::Left);
    assert_eq!(
        session.selection().element_ref(),
        Some(node_ref(NodeKind::Source, 2))
    );
    session.deselect();
    session.navigate_horizontal(HorizontalDirection::Right);
    assert_eq!(
        session.selection().element_ref(),
        Some(node_ref(NodeKind::Sink, 0))
    );
}

#[test]
fn navigation_in_an_empty_graph_is_a_no_op() {
    let mut session = session_for(ObjectSnapshot::new());
    assert!(!session.navigate(VerticalDirection::Down));
    assert!(!session.navigate_horizontal(HorizontalDirection::Left));
    assert!(session.selection().is_empty());
}

#[test]
fn monitor_edges_do_not_navigate_vertically() {
    let mut snapshot = ObjectSnapshot::new();
    snapshot.insert(AudioObjectInfo::sink(0, "out"));
    snapshot.insert(AudioObjectInfo::source(1, "out.monitor").with_monitor_of_sink(0));
    snapshot.refresh_monitor_sources();
    let mut session = session_for(snapshot);

    assert!(session.select(edge_ref(EdgeKind::MonitorSource, 1)));
    assert!(!session.navigate(VerticalDirection::Down));
    assert_eq!(
        session.selection().element_ref(),
        Some(edge_ref(EdgeKind::MonitorSource, 1))
    );
}

#[test]
fn unknown_ids_leave_selection_unchanged() {
    let mut session = session_for(three_clients());
    session.select(node_ref(NodeKind::Client, 1));
    assert!(!session.select(node_ref(NodeKind::Client, 99)));
    assert_eq!(
        session.selection().element_ref(),
        Some(node_ref(NodeKind::Client, 1))
    );
}

#[test]
fn selection_moves_to_the_fresh_instance_after_reprojection() {
    let mut snapshot = three_clients();
    let mut projector = GraphProjector::new();
    let preferences = Preferences::default();
    let first = projector.project(&snapshot, &preferences);

    let mut selection = Selection::new();
    assert!(selection.select(&first, node_ref(NodeKind::Client, 1)));

    snapshot.upsert(AudioObjectInfo::client(1, "app 1 renamed"));
    let second = projector.project(&snapshot, &preferences);
    assert!(selection.refresh(&second));

    let Some(SelectedElement::Node(selected)) = selection.current() else {
        panic!("client should stay selected");
    };
    let fresh = second.node(NodeId::new(NodeKind::Client, 1)).unwrap();
    assert!(Arc::ptr_eq(selected, fresh));
}

#[test]
fn selection_clears_when_its_element_disappears() {
    let mut snapshot = three_clients();
    let mut session = GraphSession::new(Preferences::default());
    session.reproject(Arc::new(snapshot.clone()));
    session.select(node_ref(NodeKind::Client, 2));

    snapshot.remove(AudioObjectKind::SinkInput, 22);
    session.reproject(Arc::new(snapshot));
    assert!(session.selection().is_empty());
}

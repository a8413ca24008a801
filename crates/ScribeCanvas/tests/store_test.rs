use glam::Vec2;
use scribe_canvas::model::{
    GroupData, HandleSide, NodePayload, NodeType, ProcessData, VisualEdge, VisualNode, VisualShape,
};
use scribe_canvas::store::{FlowStore, StoreError};

fn process(id: &str) -> VisualNode {
    VisualNode::process(
        id,
        Vec2::ZERO,
        ProcessData::new(id, NodeType::Action, VisualShape::Rectangle),
    )
}

fn group(id: &str) -> VisualNode {
    VisualNode::group(
        id,
        Vec2::ZERO,
        GroupData {
            label: id.to_string(),
            color_index: 0,
            size: None,
        },
    )
}

#[test]
fn test_connect_defaults_handles() {
    let mut store = FlowStore::new();
    store.add_node(process("a")).unwrap();
    store.add_node(process("b")).unwrap();

    let id = store.connect("a", "b", None, None).unwrap();
    let edge = store.edges().iter().find(|e| e.id == id).unwrap();
    assert_eq!(edge.source_handle, Some(HandleSide::Bottom));
    assert_eq!(edge.target_handle, Some(HandleSide::Top));

    let id = store
        .connect("a", "b", Some(HandleSide::Right), Some(HandleSide::Left))
        .unwrap();
    let edge = store.edges().iter().find(|e| e.id == id).unwrap();
    assert_eq!(edge.source_handle, Some(HandleSide::Right));
}

#[test]
fn test_edges_never_attach_to_groups() {
    let mut store = FlowStore::new();
    store.add_node(process("a")).unwrap();
    store.add_node(group("g")).unwrap();

    assert_eq!(
        store.connect("a", "g", None, None),
        Err(StoreError::UnknownEndpoint("g".to_string()))
    );
    assert_eq!(
        store.add_edge(VisualEdge::new("e1", "g", "a")),
        Err(StoreError::UnknownEndpoint("g".to_string()))
    );
}

#[test]
fn test_delete_selection_cascades_to_touching_edges() {
    let mut store = FlowStore::new();
    store.add_node(process("a")).unwrap();
    store.add_node(process("b")).unwrap();
    store.add_node(process("c")).unwrap();
    store.connect("a", "b", None, None).unwrap();
    store.connect("b", "c", None, None).unwrap();
    store.connect("a", "c", None, None).unwrap();

    store.set_selected("b", true);
    store.delete_selection();

    assert_eq!(store.nodes().len(), 2);
    // Exactly the edges touching `b` are gone; a->c survives.
    assert_eq!(store.edges().len(), 1);
    assert_eq!(store.edges()[0].source, "a");
    assert_eq!(store.edges()[0].target, "c");
}

#[test]
fn test_deleting_a_group_unparents_children() {
    let mut store = FlowStore::new();
    store.add_node(group("g")).unwrap();
    let mut child = process("a");
    child.parent_id = Some("g".to_string());
    store.add_node(child).unwrap();

    store.set_selected("g", true);
    store.delete_selection();

    assert_eq!(store.nodes().len(), 1);
    let orphan = store.node("a").unwrap();
    assert_eq!(orphan.parent_id, None);
}

#[test]
fn test_delete_selection_without_selection_is_a_noop() {
    let mut store = FlowStore::new();
    store.add_node(process("a")).unwrap();
    let history = store.history_len();

    store.delete_selection();
    assert_eq!(store.nodes().len(), 1);
    assert_eq!(store.history_len(), history);
}

#[test]
fn test_parent_must_be_an_existing_group() {
    let mut store = FlowStore::new();
    store.add_node(process("a")).unwrap();

    let mut child = process("b");
    child.parent_id = Some("missing".to_string());
    assert!(matches!(
        store.add_node(child),
        Err(StoreError::InvalidParent(_))
    ));

    // A process node cannot serve as a parent either.
    let mut child = process("c");
    child.parent_id = Some("a".to_string());
    assert!(matches!(
        store.add_node(child),
        Err(StoreError::InvalidParent(_))
    ));
}

#[test]
fn test_update_node_data() {
    let mut store = FlowStore::new();
    store.add_node(process("a")).unwrap();

    store
        .update_node_data("a", |payload| {
            if let NodePayload::Process(data) = payload {
                data.description = Some("first step".to_string());
                data.node_type = NodeType::Trigger;
            }
        })
        .unwrap();

    let data = store.node("a").unwrap().process_data().unwrap();
    assert_eq!(data.description.as_deref(), Some("first step"));
    assert_eq!(data.node_type, NodeType::Trigger);

    assert!(store.update_node_data("ghost", |_| {}).is_err());
}

#[test]
fn test_replace_graph_is_one_history_entry() {
    let mut store = FlowStore::new();
    store.add_node(process("a")).unwrap();
    let before = store.history_len();

    store.replace_graph(vec![process("x"), process("y")], Vec::new());
    assert_eq!(store.history_len(), before + 1);
    assert_eq!(store.nodes().len(), 2);

    // History entries are pre-mutation snapshots and the cursor walk
    // exposes them verbatim: stepping back from the replace lands on the
    // empty snapshot recorded before `a` was added, and stepping forward
    // lands on the snapshot recorded before the replace.
    store.undo();
    assert!(store.nodes().is_empty());
    store.redo();
    assert_eq!(store.nodes().len(), 1);
    assert_eq!(store.nodes()[0].id, "a");
}

#[test]
fn test_clear_empties_the_graph() {
    let mut store = FlowStore::new();
    store.add_node(process("a")).unwrap();
    store.add_node(process("b")).unwrap();
    store.connect("a", "b", None, None).unwrap();

    store.clear();
    assert!(store.nodes().is_empty());
    assert!(store.edges().is_empty());

    // Undo moves the cursor one entry back: onto the snapshot taken before
    // the connect, so both nodes return but the edge does not.
    store.undo();
    assert_eq!(store.nodes().len(), 2);
    assert!(store.edges().is_empty());

    // The pre-clear snapshot (with the edge) sits one step forward.
    store.redo();
    assert_eq!(store.edges().len(), 1);
}

use glam::Vec2;
use scribe_canvas::model::{
    GroupData, NodeFlags, NodeType, ProcessData, ToolRef, VisualEdge, VisualNode, VisualShape,
};

#[test]
fn test_process_node_serializes_with_kind_tag() {
    let mut data = ProcessData::new("Post to Slack", NodeType::Tool, VisualShape::Rectangle);
    data.tool = Some(ToolRef {
        id: "slack".into(),
        domain: "slack.com".into(),
    });
    let node = VisualNode::process("n1", Vec2::new(10.0, 20.0), data);

    let json = serde_json::to_value(&node).unwrap();
    assert_eq!(json["kind"], "process");
    assert_eq!(json["node_type"], "tool");
    assert_eq!(json["tool"]["domain"], "slack.com");

    let back: VisualNode = serde_json::from_value(json).unwrap();
    assert_eq!(back, node);
}

#[test]
fn test_group_node_serializes_with_kind_tag() {
    let node = VisualNode::group(
        "g1",
        Vec2::ZERO,
        GroupData {
            label: "Phase One".into(),
            color_index: 2,
            size: None,
        },
    );
    let json = serde_json::to_value(&node).unwrap();
    assert_eq!(json["kind"], "group");
    assert_eq!(json["color_index"], 2);

    let back: VisualNode = serde_json::from_value(json).unwrap();
    assert_eq!(back, node);
}

#[test]
fn test_flags_round_trip_as_bits() {
    let mut node = VisualNode::process(
        "n1",
        Vec2::ZERO,
        ProcessData::new("Step", NodeType::Action, VisualShape::Rectangle),
    );
    node.flags = NodeFlags::SELECTED | NodeFlags::LOCKED;

    let json = serde_json::to_value(&node).unwrap();
    assert_eq!(json["flags"], u64::from((NodeFlags::SELECTED | NodeFlags::LOCKED).bits()));

    let back: VisualNode = serde_json::from_value(json).unwrap();
    assert!(back.flags.contains(NodeFlags::SELECTED));
    assert!(back.flags.contains(NodeFlags::LOCKED));
}

#[test]
fn test_edge_omits_empty_options() {
    let edge = VisualEdge::new("e1", "a", "b");
    let json = serde_json::to_string(&edge).unwrap();
    assert!(!json.contains("label"));
    assert!(!json.contains("source_handle"));

    let labeled = VisualEdge::new("e2", "a", "b").with_label("Yes");
    let back: VisualEdge = serde_json::from_str(&serde_json::to_string(&labeled).unwrap()).unwrap();
    assert_eq!(back.label.as_deref(), Some("Yes"));
}

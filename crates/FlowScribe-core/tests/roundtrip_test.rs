use flowscribe_core::convert::{ConvertOptions, convert};
use flowscribe_core::parse::{NodeShape, ParsedFlow, parse};
use flowscribe_core::serialize::serialize;
use scribe_canvas::model::{NodePayload, NodeType, VisualShape};
use std::collections::BTreeSet;

const SAMPLE: &str = "graph TD
    A([Start]) --> B[Process]
    B --> C{Decision?}
    C -->|Yes| D[Action]
    C -->|No| E([End])
";

const GROUPED: &str = "graph TD
subgraph intake [Intake]
    A([Form submitted]) --> B[Validate fields]
end
subgraph fulfillment [Fulfillment]
    C[Reserve stock] --> D[Ship]
end
B --> C
D --> E([Done])
";

fn shape_label_set(flow: &ParsedFlow) -> BTreeSet<(String, String)> {
    flow.nodes
        .iter()
        .map(|n| (format!("{:?}", canonical(n.shape)), n.label.clone()))
        .collect()
}

// Rounded collapses into Rect across a round trip; compare modulo that.
fn canonical(shape: NodeShape) -> NodeShape {
    match shape {
        NodeShape::Rounded => NodeShape::Rect,
        other => other,
    }
}

fn round_trip(source: &str) -> (ParsedFlow, ParsedFlow) {
    let first = parse(source).unwrap();
    let (nodes, edges) = convert(&first, &ConvertOptions::default());
    let text = serialize(&nodes, &edges, first.direction);
    let second = parse(&text).unwrap();
    (first, second)
}

#[test]
fn test_round_trip_preserves_structure() {
    for source in [SAMPLE, GROUPED] {
        let (first, second) = round_trip(source);
        assert_eq!(first.direction, second.direction);
        assert_eq!(first.nodes.len(), second.nodes.len());
        assert_eq!(first.edges.len(), second.edges.len());
        assert_eq!(shape_label_set(&first), shape_label_set(&second));
    }
}

#[test]
fn test_round_trip_preserves_grouping() {
    let (first, second) = round_trip(GROUPED);
    assert_eq!(first.subgraphs.len(), second.subgraphs.len());
    for (a, b) in first.subgraphs.iter().zip(&second.subgraphs) {
        assert_eq!(a.label, b.label);
        assert_eq!(a.node_ids.len(), b.node_ids.len());
    }
}

#[test]
fn test_round_trip_preserves_edge_labels() {
    let (first, second) = round_trip(SAMPLE);
    let labels = |flow: &ParsedFlow| -> BTreeSet<Option<String>> {
        flow.edges.iter().map(|e| e.label.clone()).collect()
    };
    assert_eq!(labels(&first), labels(&second));
}

#[test]
fn test_round_trip_is_stable_after_one_pass() {
    // The second and third serializations are byte-identical: all lossy
    // collapses happen in the first pass.
    let first = parse(GROUPED).unwrap();
    let (nodes, edges) = convert(&first, &ConvertOptions::default());
    let text1 = serialize(&nodes, &edges, first.direction);

    let second = parse(&text1).unwrap();
    let (nodes, edges) = convert(&second, &ConvertOptions::default());
    let text2 = serialize(&nodes, &edges, second.direction);
    assert_eq!(text1, text2);
}

#[test]
fn test_reconversion_is_deterministic() {
    let flow = parse(GROUPED).unwrap();
    let opts = ConvertOptions::default();
    let (nodes_a, edges_a) = convert(&flow, &opts);
    let (nodes_b, edges_b) = convert(&flow, &opts);
    assert_eq!(nodes_a, nodes_b);
    assert_eq!(edges_a, edges_b);
}

#[test]
fn test_convert_assigns_types_and_groups() {
    let flow = parse(SAMPLE).unwrap();
    let (nodes, edges) = convert(&flow, &ConvertOptions::default());
    assert_eq!(nodes.len(), 5);
    assert_eq!(edges.len(), 4);

    let data = |id: &str| match &nodes.iter().find(|n| n.id == id).unwrap().payload {
        NodePayload::Process(data) => data.clone(),
        NodePayload::Group(_) => panic!("expected process node"),
    };
    assert_eq!(data("A").node_type, NodeType::Trigger);
    assert_eq!(data("C").node_type, NodeType::Decision);
    assert_eq!(data("C").shape, VisualShape::Diamond);
    assert_eq!(data("E").node_type, NodeType::Outcome);
    assert_eq!(data("A").shape, VisualShape::Stadium);
}

#[test]
fn test_convert_with_groups_emits_group_nodes() {
    let flow = parse(GROUPED).unwrap();
    let (nodes, _) = convert(&flow, &ConvertOptions { enable_groups: true });

    let groups: Vec<_> = nodes.iter().filter(|n| n.is_group()).collect();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].id, "intake");
    if let NodePayload::Group(data) = &groups[1].payload {
        assert_eq!(data.color_index, 1);
    } else {
        panic!("expected group payload");
    }

    let a = nodes.iter().find(|n| n.id == "A").unwrap();
    assert_eq!(a.parent_id.as_deref(), Some("intake"));
    let e = nodes.iter().find(|n| n.id == "E").unwrap();
    assert_eq!(e.parent_id, None);
}

#[test]
fn test_convert_without_groups_leaves_nodes_unparented() {
    let flow = parse(GROUPED).unwrap();
    let (nodes, _) = convert(&flow, &ConvertOptions { enable_groups: false });
    assert!(nodes.iter().all(|n| !n.is_group()));
    assert!(nodes.iter().all(|n| n.parent_id.is_none()));
}

#[test]
fn test_serializer_sanitizes_ids_and_labels() {
    let flow = parse(SAMPLE).unwrap();
    let (mut nodes, edges) = convert(&flow, &ConvertOptions::default());
    // Force awkward content through the writer.
    for node in &mut nodes {
        if node.id == "B"
            && let NodePayload::Process(data) = &mut node.payload
        {
            data.label = "Say \"hello\"".to_string();
        }
    }
    let text = serialize(&nodes, &edges, flow.direction);
    assert!(text.contains("B[Say 'hello']"), "{text}");

    let reparsed = parse(&text).unwrap();
    assert_eq!(reparsed.nodes.len(), 5);
}

#[test]
fn test_empty_groups_are_not_serialized() {
    let flow = parse(GROUPED).unwrap();
    let (mut nodes, edges) = convert(&flow, &ConvertOptions::default());
    // Orphan every child of the first group.
    for node in &mut nodes {
        if node.parent_id.as_deref() == Some("intake") {
            node.parent_id = None;
        }
    }
    let text = serialize(&nodes, &edges, flow.direction);
    assert!(!text.contains("subgraph intake"), "{text}");
    assert!(text.contains("subgraph fulfillment"), "{text}");
}

use flowscribe_core::convert::{ConvertOptions, convert};
use flowscribe_core::layout::{LayoutConfig, layout};
use flowscribe_core::parse::{Direction, parse};
use glam::Vec2;
use scribe_canvas::model::{NODE_WIDTH, VisualEdge, VisualNode};

fn lay_out(source: &str) -> (Vec<VisualNode>, Vec<VisualEdge>, Direction) {
    let flow = parse(source).unwrap();
    let (mut nodes, edges) = convert(&flow, &ConvertOptions::default());
    layout(&mut nodes, &edges, flow.direction, &LayoutConfig::default());
    (nodes, edges, flow.direction)
}

fn position(nodes: &[VisualNode], id: &str) -> Vec2 {
    nodes.iter().find(|n| n.id == id).unwrap().position
}

const SAMPLE: &str = "graph TD
    A([Start]) --> B[Process]
    B --> C{Decision?}
    C -->|Yes| D[Action]
    C -->|No| E([End])
";

#[test]
fn test_ranks_follow_edge_direction_top_down() {
    let (nodes, _, _) = lay_out(SAMPLE);
    let a = position(&nodes, "A");
    let b = position(&nodes, "B");
    let c = position(&nodes, "C");
    let d = position(&nodes, "D");
    let e = position(&nodes, "E");

    assert!(a.y < b.y, "A above B");
    assert!(b.y < c.y, "B above C");
    assert!(c.y < d.y, "C above D");
    assert!(c.y < e.y, "C above E");
    // D and E share the final rank.
    assert_eq!(d.y, e.y);
}

#[test]
fn test_no_overlap_within_a_rank() {
    let (nodes, _, _) = lay_out(SAMPLE);
    let d = position(&nodes, "D");
    let e = position(&nodes, "E");
    assert!((d.x - e.x).abs() >= NODE_WIDTH, "siblings must not overlap");
}

#[test]
fn test_left_right_direction_ranks_along_x() {
    let (nodes, _, direction) = lay_out("graph LR\nA --> B\nB --> C\n");
    assert_eq!(direction, Direction::LeftRight);
    let a = position(&nodes, "A");
    let b = position(&nodes, "B");
    let c = position(&nodes, "C");
    assert!(a.x < b.x && b.x < c.x);
    // A single chain stays on one row.
    assert_eq!(a.y, b.y);
    assert_eq!(b.y, c.y);
}

#[test]
fn test_positions_are_top_left_corners() {
    // The first rank's center sits margin + half a footprint in; the stored
    // position is the corner.
    let cfg = LayoutConfig::default();
    let (nodes, _, _) = lay_out("graph TD\nA --> B\n");
    let a = position(&nodes, "A");
    assert_eq!(a.y, cfg.margin);
    // A single-node rank in a single-column graph starts at the margin on
    // the cross axis too.
    assert_eq!(a.x, cfg.margin);
}

#[test]
fn test_groups_are_not_repositioned() {
    let source = "graph TD
subgraph grp [Group]
    A --> B
end
B --> C
";
    let flow = parse(source).unwrap();
    let (mut nodes, edges) = convert(&flow, &ConvertOptions::default());
    let before = position(&nodes, "grp");
    layout(&mut nodes, &edges, flow.direction, &LayoutConfig::default());
    assert_eq!(position(&nodes, "grp"), before);
    // While the processes inside did move off their provisional stack.
    assert_ne!(position(&nodes, "B"), Vec2::new(0.0, 150.0));
}

#[test]
fn test_disconnected_components_are_tolerated() {
    let (nodes, _, _) = lay_out("graph TD\nA --> B\nX --> Y\n");
    // Both roots land on rank zero, side by side.
    assert_eq!(position(&nodes, "A").y, position(&nodes, "X").y);
    assert!((position(&nodes, "A").x - position(&nodes, "X").x).abs() >= NODE_WIDTH);
}

#[test]
fn test_cycles_do_not_hang_the_layout() {
    let (nodes, _, _) = lay_out("graph TD\nA --> B\nB --> C\nC --> A\n");
    // Every node still gets a rank; the back edge is simply not honored.
    let ys: Vec<f32> = ["A", "B", "C"].iter().map(|id| position(&nodes, id).y).collect();
    assert!(ys[0] < ys[1] && ys[1] < ys[2]);
}

#[test]
fn test_self_loop_is_ignored_for_ranking() {
    let (nodes, _, _) = lay_out("graph TD\nA --> A\nA --> B\n");
    assert!(position(&nodes, "A").y < position(&nodes, "B").y);
}

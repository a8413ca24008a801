//! # Layout Engine
//!
//! Layered/rank-based placement for the process nodes of a flow. Ranks
//! follow edge direction (top-down or left-to-right), node order within a
//! rank is refined with barycenter sweeps, and every node gets the fixed
//! footprint. Group nodes are not layout participants: they keep whatever
//! position creation or dragging gave them.

use crate::parse::Direction;
use glam::Vec2;
use petgraph::Direction::{Incoming, Outgoing};
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use scribe_canvas::model::{NODE_HEIGHT, NODE_WIDTH, VisualEdge, VisualNode};
use std::collections::{HashMap, VecDeque};

#[derive(Clone, Copy, Debug)]
pub struct LayoutConfig {
    /// Spacing between neighboring nodes within a rank.
    pub node_sep: f32,
    /// Spacing between consecutive ranks.
    pub rank_sep: f32,
    /// Margin applied on both axes before the first node.
    pub margin: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_sep: 60.0,
            rank_sep: 120.0,
            margin: 40.0,
        }
    }
}

/// Assigns final positions to the process nodes in place.
///
/// The algorithm reasons in node-center coordinates; the stored `position`
/// is the center minus half the fixed footprint, i.e. a top-left corner.
/// Disconnected components and cycles are tolerated: cyclic remainders fall
/// back to first-seen order for ranking.
pub fn layout(nodes: &mut [VisualNode], edges: &[VisualEdge], direction: Direction, cfg: &LayoutConfig) {
    let process: Vec<usize> = nodes
        .iter()
        .enumerate()
        .filter(|(_, n)| !n.is_group())
        .map(|(i, _)| i)
        .collect();
    if process.is_empty() {
        tracing::debug!("layout skipped: no process nodes");
        return;
    }

    let mut graph: DiGraph<usize, ()> = DiGraph::new();
    let mut by_id: HashMap<&str, NodeIndex> = HashMap::new();
    for &i in &process {
        let idx = graph.add_node(i);
        by_id.insert(nodes[i].id.as_str(), idx);
    }
    for edge in edges {
        if let (Some(&a), Some(&b)) = (by_id.get(edge.source.as_str()), by_id.get(edge.target.as_str()))
            && a != b
        {
            // Self-loops carry no rank information and are left out.
            graph.add_edge(a, b, ());
        }
    }

    let order = toposort(&graph, None).unwrap_or_else(|_| cycle_tolerant_order(&graph));

    // Longest-path ranking over the (pseudo-)topological order. Only edges
    // pointing forward in that order contribute: in a cyclic input the back
    // edges are simply not honored.
    let position_in_order: HashMap<NodeIndex, usize> =
        order.iter().enumerate().map(|(i, &n)| (n, i)).collect();
    let mut rank: HashMap<NodeIndex, usize> = order.iter().map(|&n| (n, 0)).collect();
    for &n in &order {
        let base = rank[&n];
        for succ in graph.neighbors_directed(n, Outgoing) {
            if position_in_order[&succ] > position_in_order[&n] {
                let entry = rank.entry(succ).or_insert(0);
                *entry = (*entry).max(base + 1);
            }
        }
    }

    let max_rank = rank.values().copied().max().unwrap_or(0);
    let mut buckets: Vec<Vec<NodeIndex>> = vec![Vec::new(); max_rank + 1];
    for &n in &order {
        buckets[rank[&n]].push(n);
    }

    reduce_crossings(&graph, &mut buckets);
    assign_positions(nodes, &graph, &buckets, direction, cfg);
}

/// Kahn's algorithm with leftovers: nodes still unvisited once the queue
/// runs dry (members of cycles) are appended in first-seen order.
fn cycle_tolerant_order(graph: &DiGraph<usize, ()>) -> Vec<NodeIndex> {
    let mut indegree: HashMap<NodeIndex, usize> = graph
        .node_indices()
        .map(|n| (n, graph.neighbors_directed(n, Incoming).count()))
        .collect();
    let mut queue: VecDeque<NodeIndex> = graph
        .node_indices()
        .filter(|n| indegree[n] == 0)
        .collect();

    let mut order = Vec::with_capacity(graph.node_count());
    while let Some(n) = queue.pop_front() {
        order.push(n);
        for succ in graph.neighbors_directed(n, Outgoing) {
            let deg = indegree.get_mut(&succ).expect("known node");
            *deg = deg.saturating_sub(1);
            if *deg == 0 {
                queue.push_back(succ);
            }
        }
    }
    for n in graph.node_indices() {
        if !order.contains(&n) {
            order.push(n);
        }
    }
    order
}

/// Barycenter sweeps: each rank is reordered by the mean in-rank position
/// of its neighbors in the adjacent rank, alternating downward and upward
/// passes. Cheap and good enough for graphs of this size.
fn reduce_crossings(graph: &DiGraph<usize, ()>, buckets: &mut [Vec<NodeIndex>]) {
    if buckets.len() <= 1 {
        return;
    }
    for _ in 0..2 {
        for r in 1..buckets.len() {
            sort_by_barycenter(graph, buckets, r, Incoming);
        }
        for r in (0..buckets.len() - 1).rev() {
            sort_by_barycenter(graph, buckets, r, Outgoing);
        }
    }
}

fn sort_by_barycenter(
    graph: &DiGraph<usize, ()>,
    buckets: &mut [Vec<NodeIndex>],
    rank: usize,
    neighbors: petgraph::Direction,
) {
    let in_rank_pos: HashMap<NodeIndex, usize> = buckets
        .iter()
        .flat_map(|bucket| bucket.iter().enumerate().map(|(i, &n)| (n, i)))
        .collect();

    let score = |n: NodeIndex| -> f32 {
        let mut sum = 0.0;
        let mut count = 0usize;
        for other in graph.neighbors_directed(n, neighbors) {
            if let Some(&p) = in_rank_pos.get(&other) {
                sum += p as f32;
                count += 1;
            }
        }
        if count == 0 {
            in_rank_pos.get(&n).copied().unwrap_or(0) as f32
        } else {
            sum / count as f32
        }
    };

    buckets[rank].sort_by(|&a, &b| {
        score(a)
            .partial_cmp(&score(b))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

fn assign_positions(
    nodes: &mut [VisualNode],
    graph: &DiGraph<usize, ()>,
    buckets: &[Vec<NodeIndex>],
    direction: Direction,
    cfg: &LayoutConfig,
) {
    // Cross-axis extent of a rank, used to center shorter ranks against
    // the widest one.
    let cross_unit = match direction {
        Direction::TopBottom => NODE_WIDTH,
        Direction::LeftRight => NODE_HEIGHT,
    };
    let rank_unit = match direction {
        Direction::TopBottom => NODE_HEIGHT,
        Direction::LeftRight => NODE_WIDTH,
    };
    let rank_extent = |len: usize| len as f32 * cross_unit + (len.saturating_sub(1)) as f32 * cfg.node_sep;
    let widest = buckets
        .iter()
        .map(|b| rank_extent(b.len()))
        .fold(0.0, f32::max);

    for (r, bucket) in buckets.iter().enumerate() {
        let offset = (widest - rank_extent(bucket.len())) / 2.0;
        let rank_center = cfg.margin + r as f32 * (rank_unit + cfg.rank_sep) + rank_unit / 2.0;
        for (i, &idx) in bucket.iter().enumerate() {
            let cross_center = cfg.margin + offset + i as f32 * (cross_unit + cfg.node_sep) + cross_unit / 2.0;
            let center = match direction {
                Direction::TopBottom => Vec2::new(cross_center, rank_center),
                Direction::LeftRight => Vec2::new(rank_center, cross_center),
            };
            let node = &mut nodes[graph[idx]];
            node.position = center - Vec2::new(NODE_WIDTH, NODE_HEIGHT) / 2.0;
        }
    }
}

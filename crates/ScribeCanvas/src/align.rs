//! Post-hoc alignment and even distribution of a node subset.
//!
//! These operate on whatever slice the caller hands in (typically the
//! current selection) and touch positions only.

use crate::model::VisualNode;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlignMode {
    Left,
    Center,
    Right,
    Top,
    Middle,
    Bottom,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DistributeAxis {
    Horizontal,
    Vertical,
}

/// Aligns all nodes in the slice along one edge or center line.
///
/// No-op below two nodes: there is nothing to align a single node against.
pub fn align(nodes: &mut [VisualNode], mode: AlignMode) {
    if nodes.len() < 2 {
        return;
    }

    match mode {
        AlignMode::Left => {
            let min = fold_min(nodes.iter().map(|n| n.position.x));
            for node in nodes {
                node.position.x = min;
            }
        }
        AlignMode::Top => {
            let min = fold_min(nodes.iter().map(|n| n.position.y));
            for node in nodes {
                node.position.y = min;
            }
        }
        AlignMode::Right => {
            let max = fold_max(nodes.iter().map(|n| n.position.x + n.size_or_default().x));
            for node in nodes.iter_mut() {
                node.position.x = max - node.size_or_default().x;
            }
        }
        AlignMode::Bottom => {
            let max = fold_max(nodes.iter().map(|n| n.position.y + n.size_or_default().y));
            for node in nodes.iter_mut() {
                node.position.y = max - node.size_or_default().y;
            }
        }
        AlignMode::Center => {
            let min = fold_min(nodes.iter().map(|n| n.position.x + n.size_or_default().x / 2.0));
            let max = fold_max(nodes.iter().map(|n| n.position.x + n.size_or_default().x / 2.0));
            let mid = (min + max) / 2.0;
            for node in nodes.iter_mut() {
                node.position.x = mid - node.size_or_default().x / 2.0;
            }
        }
        AlignMode::Middle => {
            let min = fold_min(nodes.iter().map(|n| n.position.y + n.size_or_default().y / 2.0));
            let max = fold_max(nodes.iter().map(|n| n.position.y + n.size_or_default().y / 2.0));
            let mid = (min + max) / 2.0;
            for node in nodes.iter_mut() {
                node.position.y = mid - node.size_or_default().y / 2.0;
            }
        }
    }
}

/// Spreads the nodes evenly along one axis.
///
/// The outermost two nodes stay fixed; the span between the first node's
/// leading edge and the last node's trailing edge, minus the sum of node
/// sizes, divides into equal gaps. No-op below three nodes: a gap cannot be
/// computed meaningfully with only two.
pub fn distribute(nodes: &mut [VisualNode], axis: DistributeAxis) {
    if nodes.len() < 3 {
        return;
    }

    let coord = |n: &VisualNode| match axis {
        DistributeAxis::Horizontal => n.position.x,
        DistributeAxis::Vertical => n.position.y,
    };
    let extent = |n: &VisualNode| match axis {
        DistributeAxis::Horizontal => n.size_or_default().x,
        DistributeAxis::Vertical => n.size_or_default().y,
    };

    let mut order: Vec<usize> = (0..nodes.len()).collect();
    order.sort_by(|&a, &b| {
        coord(&nodes[a])
            .partial_cmp(&coord(&nodes[b]))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let first = &nodes[order[0]];
    let last = &nodes[*order.last().unwrap()];
    let span = (coord(last) + extent(last)) - coord(first);
    let total_size: f32 = order.iter().map(|&i| extent(&nodes[i])).sum();
    let gap = (span - total_size) / (nodes.len() - 1) as f32;

    let mut cursor = coord(first);
    for &i in &order {
        match axis {
            DistributeAxis::Horizontal => nodes[i].position.x = cursor,
            DistributeAxis::Vertical => nodes[i].position.y = cursor,
        }
        cursor += extent(&nodes[i]) + gap;
    }
}

fn fold_min(values: impl Iterator<Item = f32>) -> f32 {
    values.fold(f32::INFINITY, f32::min)
}

fn fold_max(values: impl Iterator<Item = f32>) -> f32 {
    values.fold(f32::NEG_INFINITY, f32::max)
}

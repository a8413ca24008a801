//! Line-level lexer for the flowchart subset.
//!
//! A statement line is cut into alternating node-text and arrow tokens.
//! Scanning is bracket- and quote-aware: an arrow sequence inside `[...]`,
//! `(...)`, `{...}`, or a quoted label belongs to the label text and never
//! splits the line.

use super::NodeShape;

/// One arrow occurrence; the dotted/thick variants are recognized but the
/// distinction is not retained (edge style does not survive conversion).
#[derive(Debug)]
pub(crate) struct ArrowToken {
    pub label: Option<String>,
}

/// A statement line split at its arrows: `sides.len() == arrows.len() + 1`.
#[derive(Debug)]
pub(crate) struct EdgeLine {
    pub sides: Vec<String>,
    pub arrows: Vec<ArrowToken>,
}

/// Splits a line at top-level arrow tokens. Returns `None` when the line
/// contains no arrow.
pub(crate) fn split_edge_line(line: &str) -> Option<EdgeLine> {
    let mut sides = Vec::new();
    let mut arrows = Vec::new();
    let mut depth: i32 = 0;
    let mut in_quotes = false;
    let mut seg_start = 0;
    let mut i = 0;

    while i < line.len() {
        let c = line[i..].chars().next().expect("index on char boundary");
        match c {
            '"' => in_quotes = !in_quotes,
            '[' | '(' | '{' if !in_quotes => depth += 1,
            ']' | ')' | '}' if !in_quotes => depth -= 1,
            '-' | '=' if !in_quotes && depth == 0 => {
                if let Some((label, consumed)) = match_arrow(&line[i..]) {
                    sides.push(line[seg_start..i].to_string());
                    arrows.push(ArrowToken { label });
                    i += consumed;
                    seg_start = i;
                    continue;
                }
            }
            _ => {}
        }
        i += c.len_utf8();
    }

    if arrows.is_empty() {
        return None;
    }
    sides.push(line[seg_start..].to_string());
    Some(EdgeLine { sides, arrows })
}

/// Matches an arrow at the start of `rest`, returning its label and the
/// number of bytes consumed. Recognized forms, most specific first:
/// `-.->`, `==>`, `-->` (each optionally followed by `|label|`), and the
/// inline-label form `-- label -->`.
fn match_arrow(rest: &str) -> Option<(Option<String>, usize)> {
    for head in ["-.->", "==>", "-->"] {
        if let Some(after) = rest.strip_prefix(head) {
            let (label, extra) = match_pipe_label(after);
            return Some((label, head.len() + extra));
        }
    }

    // `-- label -->`: an opening dash pair whose closing arrow appears
    // later in the line.
    if let Some(after) = rest.strip_prefix("--") {
        if let Some(close) = after.find("-->") {
            let label = after[..close].trim();
            let label = (!label.is_empty()).then(|| label.to_string());
            return Some((label, 2 + close + 3));
        }
    }

    None
}

/// Matches an optional `|label|` immediately after an arrow head.
fn match_pipe_label(rest: &str) -> (Option<String>, usize) {
    let Some(after) = rest.strip_prefix('|') else {
        return (None, 0);
    };
    let Some(close) = after.find('|') else {
        return (None, 0);
    };
    let label = after[..close].trim();
    let label = (!label.is_empty()).then(|| label.to_string());
    (label, 1 + close + 1)
}

/// Splits one side of an arrow at top-level `&` separators (fan-out/fan-in).
pub(crate) fn split_fanout(side: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth: i32 = 0;
    let mut in_quotes = false;
    let mut seg_start = 0;

    for (i, c) in side.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            '[' | '(' | '{' if !in_quotes => depth += 1,
            ']' | ')' | '}' if !in_quotes => depth -= 1,
            '&' if !in_quotes && depth == 0 => {
                parts.push(&side[seg_start..i]);
                seg_start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&side[seg_start..]);
    parts
}

/// A node reference or definition: `id`, `id[Label]`, `id{Label}`, ...
#[derive(Debug)]
pub(crate) struct NodeToken {
    pub id: String,
    pub label: String,
    pub shape: NodeShape,
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Returns the inner text when `s` is wrapped in the given delimiter pair.
fn enclosed<'a>(s: &'a str, open: &str, close: &str) -> Option<&'a str> {
    if s.len() >= open.len() + close.len() && s.starts_with(open) && s.ends_with(close) {
        Some(&s[open.len()..s.len() - close.len()])
    } else {
        None
    }
}

/// Parses a node text into id, label, and shape.
///
/// The bracket combinations are tried most specific first; the ordering is
/// load-bearing (`[(` must win over `[`, `((` over `(`).
pub(crate) fn parse_node_text(text: &str) -> Option<NodeToken> {
    let t = text.trim();
    if t.is_empty() {
        return None;
    }

    let id_len = t.find(|c: char| !is_ident_char(c)).unwrap_or(t.len());
    if id_len == 0 {
        return None;
    }
    let id = &t[..id_len];
    let rest = t[id_len..].trim();

    if rest.is_empty() {
        // Bare identifier: the label defaults to the id.
        return Some(NodeToken {
            id: id.to_string(),
            label: id.to_string(),
            shape: NodeShape::Rect,
        });
    }

    const SHAPES: [(&str, &str, NodeShape); 6] = [
        ("[(", ")]", NodeShape::Database),
        ("[[", "]]", NodeShape::Subroutine),
        ("([", "])", NodeShape::Stadium),
        ("((", "))", NodeShape::Circle),
        ("{", "}", NodeShape::Diamond),
        ("(", ")", NodeShape::Rounded),
    ];
    for (open, close, shape) in SHAPES {
        if let Some(inner) = enclosed(rest, open, close) {
            return Some(NodeToken {
                id: id.to_string(),
                label: inner.trim().to_string(),
                shape,
            });
        }
    }

    if let Some(inner) = enclosed(rest, "[", "]") {
        let inner = inner.trim();
        // `["..."]` is a quoted rectangle; the quotes are not label text.
        let label = inner
            .strip_prefix('"')
            .and_then(|s| s.strip_suffix('"'))
            .unwrap_or(inner);
        return Some(NodeToken {
            id: id.to_string(),
            label: label.to_string(),
            shape: NodeShape::Rect,
        });
    }

    None
}

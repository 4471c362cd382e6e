//! Mapping between text-flow offsets and document nodes.

use crate::document::{Document, NodeId};
use crate::toolbar::selection::{Ancestor, TextRange};

/// Which text node wins when an offset sits on a boundary between two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bias {
    /// The node that starts at the offset.
    Forward,
    /// The node that ends at the offset.
    Backward,
}

/// A text node with the part of it a range covers, in local char offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub node: NodeId,
    pub start: usize,
    pub end: usize,
    pub len: usize,
}

/// Resolve a text-flow offset to a text node and local offset.
pub fn locate(doc: &Document, offset: usize, bias: Bias) -> Option<(NodeId, usize)> {
    let mut start = 0;
    let mut last = None;
    for id in doc.text_nodes() {
        let len = doc.text(id).map_or(0, |t| t.chars().count());
        if len == 0 {
            continue;
        }
        let end = start + len;
        let hit = match bias {
            Bias::Forward => offset >= start && offset < end,
            Bias::Backward => offset > start && offset <= end,
        };
        if hit {
            return Some((id, offset - start));
        }
        last = Some((id, start, len));
        start = end;
    }
    // Past either end: clamp to the nearest node.
    match (bias, last) {
        (Bias::Forward, Some((id, s, len))) if offset == s + len => Some((id, len)),
        (Bias::Backward, _) if offset == 0 => first_text(doc).map(|id| (id, 0)),
        _ => None,
    }
}

fn first_text(doc: &Document) -> Option<NodeId> {
    doc.text_nodes()
        .into_iter()
        .find(|&id| doc.text(id).is_some_and(|t| !t.is_empty()))
}

/// The text nodes at either edge of `range`.
///
/// A collapsed caret belongs to the text before it, except at the very start.
pub fn boundary_nodes(doc: &Document, range: &TextRange) -> Option<(NodeId, NodeId)> {
    if range.is_collapsed() {
        let bias = if range.start() > 0 {
            Bias::Backward
        } else {
            Bias::Forward
        };
        let (node, _) = locate(doc, range.start(), bias)?;
        return Some((node, node));
    }
    let (first, _) = locate(doc, range.start(), Bias::Forward)?;
    let (last, _) = locate(doc, range.end(), Bias::Backward)?;
    Some((first, last))
}

/// Deepest element containing both nodes (the root if nothing closer).
pub fn common_ancestor(doc: &Document, a: NodeId, b: NodeId) -> NodeId {
    let mut chain_a = vec![a];
    chain_a.extend(doc.ancestors(a));
    let mut cur = Some(b);
    while let Some(id) = cur {
        if chain_a.contains(&id) {
            return id;
        }
        if id == doc.root() {
            break;
        }
        cur = doc.parent(id);
    }
    doc.root()
}

/// Element ids containing the whole range, nearest first, excluding root.
pub fn containing_elements(doc: &Document, range: &TextRange) -> Vec<NodeId> {
    let Some((first, last)) = boundary_nodes(doc, range) else {
        return Vec::new();
    };
    let common = common_ancestor(doc, first, last);
    if common == doc.root() {
        return Vec::new();
    }
    let mut out = Vec::new();
    if doc.tag(common).is_some() {
        out.push(common);
    }
    out.extend(doc.ancestors(common));
    out
}

/// Describe an element for the toolbar. `None` for text nodes.
pub fn ancestor_of(doc: &Document, id: NodeId) -> Option<Ancestor> {
    let tag = doc.tag(id)?;
    let ancestor = doc
        .attributes(id)
        .iter()
        .fold(Ancestor::new(tag, doc.is_block(id)), |a, (k, v)| {
            a.with_attribute(k, v)
        });
    Some(ancestor)
}

pub fn ancestor_chain(doc: &Document, range: &TextRange) -> Vec<Ancestor> {
    containing_elements(doc, range)
        .into_iter()
        .filter_map(|id| ancestor_of(doc, id))
        .collect()
}

/// Text nodes overlapping `[start, end)` with the covered local span.
pub fn segments(doc: &Document, range: &TextRange) -> Vec<Segment> {
    let (from, to) = (range.start(), range.end());
    let mut out = Vec::new();
    let mut start = 0;
    for id in doc.text_nodes() {
        let len = doc.text(id).map_or(0, |t| t.chars().count());
        let end = start + len;
        if len > 0 && from < end && to > start {
            out.push(Segment {
                node: id,
                start: from.saturating_sub(start),
                end: to.min(end) - start,
                len,
            });
        }
        start = end;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(doc: &Document, range: TextRange) -> Vec<String> {
        ancestor_chain(doc, &range)
            .into_iter()
            .map(|a| a.tag)
            .collect()
    }

    #[test]
    fn test_locate_bias_at_boundary() {
        let doc = Document::parse("<b>abc</b>def").unwrap();
        let nodes = doc.text_nodes();
        assert_eq!(locate(&doc, 3, Bias::Forward), Some((nodes[1], 0)));
        assert_eq!(locate(&doc, 3, Bias::Backward), Some((nodes[0], 3)));
        assert_eq!(locate(&doc, 6, Bias::Forward), Some((nodes[1], 3)));
        assert_eq!(locate(&doc, 0, Bias::Backward), Some((nodes[0], 0)));
        assert_eq!(locate(&doc, 7, Bias::Forward), None);
    }

    #[test]
    fn test_chain_requires_whole_selection() {
        let doc = Document::parse("<p><b>lorem</b> ipsum</p>").unwrap();
        assert_eq!(tags(&doc, TextRange::new(0, 5)), vec!["b", "p"]);
        assert_eq!(tags(&doc, TextRange::new(0, 8)), vec!["p"]);
        assert_eq!(tags(&doc, TextRange::new(8, 2)), vec!["p"]);
    }

    #[test]
    fn test_caret_takes_text_before_it() {
        let doc = Document::parse("<p><b>lorem</b> ipsum</p>").unwrap();
        assert_eq!(tags(&doc, TextRange::caret(5)), vec!["b", "p"]);
        assert_eq!(tags(&doc, TextRange::caret(6)), vec!["p"]);
        assert_eq!(tags(&doc, TextRange::caret(0)), vec!["b", "p"]);
    }

    #[test]
    fn test_chain_carries_attributes_and_block_flag() {
        let doc = Document::parse("<blockquote><a href=\"u\">x</a></blockquote>").unwrap();
        let chain = ancestor_chain(&doc, &TextRange::new(0, 1));
        assert_eq!(chain[0].attribute("href"), Some("u"));
        assert!(!chain[0].block);
        assert!(chain[1].block);
    }

    #[test]
    fn test_segments_cover_partial_nodes() {
        let doc = Document::parse("ab<i>cd</i>ef").unwrap();
        let segs = segments(&doc, &TextRange::new(1, 5));
        let spans: Vec<_> = segs.iter().map(|s| (s.start, s.end)).collect();
        assert_eq!(spans, vec![(1, 2), (0, 2), (0, 1)]);
    }
}

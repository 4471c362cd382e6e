//! Formatting mutations over a [`Document`].

use crate::document::selection::{boundary_nodes, containing_elements, segments};
use crate::document::{is_block_tag, Document, NodeId};
use crate::error::HostError;
use crate::toolbar::selection::TextRange;

/// An inline command: the tag it creates and the tags that count as
/// already applied.
#[derive(Debug, Clone, Copy)]
pub struct InlineCommand {
    pub name: &'static str,
    pub tag: &'static str,
    pub matches: &'static [&'static str],
}

pub const INLINE_COMMANDS: &[InlineCommand] = &[
    InlineCommand {
        name: "bold",
        tag: "b",
        matches: &["b", "strong"],
    },
    InlineCommand {
        name: "italic",
        tag: "i",
        matches: &["i", "em"],
    },
    InlineCommand {
        name: "underline",
        tag: "u",
        matches: &["u"],
    },
    InlineCommand {
        name: "strikethrough",
        tag: "strike",
        matches: &["strike", "s", "del"],
    },
    InlineCommand {
        name: "superscript",
        tag: "sup",
        matches: &["sup"],
    },
    InlineCommand {
        name: "subscript",
        tag: "sub",
        matches: &["sub"],
    },
];

pub fn inline_command(name: &str) -> Option<&'static InlineCommand> {
    INLINE_COMMANDS
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(name))
}

fn tag_in(doc: &Document, id: NodeId, tags: &[&str]) -> bool {
    doc.tag(id)
        .is_some_and(|t| tags.iter().any(|m| m.eq_ignore_ascii_case(t)))
}

/// Toggle inline formatting over `range`.
///
/// Inside an element that already matches, that element is unwrapped.
/// Otherwise every uncovered text segment is wrapped in `command.tag`.
/// Returns `false` when there was nothing to do.
pub fn toggle_inline(doc: &mut Document, range: &TextRange, command: &InlineCommand) -> bool {
    let existing = containing_elements(doc, range)
        .into_iter()
        .find(|&id| tag_in(doc, id, command.matches));
    if let Some(id) = existing {
        doc.unwrap(id);
        return true;
    }
    if range.is_collapsed() {
        return false;
    }
    wrap_range(doc, range, command.tag, Vec::new(), command.matches) > 0
}

/// Wrap each text segment of `range` in a new `tag` element, skipping
/// segments already inside one of `skip_inside`. Returns segments wrapped.
pub fn wrap_range(
    doc: &mut Document,
    range: &TextRange,
    tag: &str,
    attributes: Vec<(String, String)>,
    skip_inside: &[&str],
) -> usize {
    let mut wrapped = 0;
    for seg in segments(doc, range) {
        if doc
            .ancestors(seg.node)
            .iter()
            .any(|&a| tag_in(doc, a, skip_inside))
        {
            continue;
        }
        let mut target = seg.node;
        if seg.end < seg.len {
            doc.split_text(target, seg.end);
        }
        if seg.start > 0 {
            match doc.split_text(target, seg.start) {
                Some(tail) => target = tail,
                None => continue,
            }
        }
        doc.wrap(target, tag, attributes.clone());
        wrapped += 1;
    }
    wrapped
}

/// Remove the nearest element matching `tags` around `range`.
pub fn unwrap_nearest(doc: &mut Document, range: &TextRange, tags: &[&str]) -> bool {
    let found = containing_elements(doc, range)
        .into_iter()
        .find(|&id| tag_in(doc, id, tags));
    match found {
        Some(id) => {
            doc.unwrap(id);
            true
        }
        None => false,
    }
}

/// The block [`replace_block`] converts for `range`: the nearest block
/// containing the whole range, otherwise the block holding its start. `None`
/// when the start sits in inline content directly under the root.
pub fn replacement_block(doc: &Document, range: &TextRange) -> Option<NodeId> {
    if let Some(id) = containing_elements(doc, range)
        .into_iter()
        .find(|&id| doc.is_block(id))
    {
        return Some(id);
    }
    let (first, _) = boundary_nodes(doc, range)?;
    doc.ancestors(first).into_iter().find(|&id| doc.is_block(id))
}

/// Convert the block around `range` into `block`.
///
/// The block chosen by [`replacement_block`] is renamed in place so inline
/// children survive. Text sitting directly under the root gets the
/// contiguous run of inline siblings around it wrapped in a new block
/// instead.
pub fn replace_block(doc: &mut Document, range: &TextRange, block: &str) -> Result<(), HostError> {
    if let Some(id) = replacement_block(doc, range) {
        doc.rename(id, block);
        return Ok(());
    }

    let (first, _) = boundary_nodes(doc, range).ok_or(HostError::NoSelection)?;
    let top = doc.ancestors(first).last().copied().unwrap_or(first);
    let siblings = doc.children(doc.root()).to_vec();
    let index = siblings
        .iter()
        .position(|&id| id == top)
        .ok_or(HostError::InvalidNode)?;
    let is_inline = |id: NodeId| doc.tag(id).map_or(true, |t| !is_block_tag(t));
    let mut first = index;
    while first > 0 && is_inline(siblings[first - 1]) {
        first -= 1;
    }
    let mut last = index;
    while last + 1 < siblings.len() && is_inline(siblings[last + 1]) {
        last += 1;
    }
    let run = siblings[first..=last].to_vec();
    doc.wrap_siblings(&run, block).ok_or(HostError::InvalidNode)?;
    Ok(())
}

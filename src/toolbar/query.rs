//! Ancestor predicates parsed from an action's `query` string.
//!
//! The grammar is a comma-separated list of alternatives, each one of:
//!
//! - `tag` (e.g. `b`)
//! - `tag[attr]` or `tag[attr=value]` (e.g. `a[href]`)
//! - `[attr]` or `[attr=value]` (any element carrying the attribute)
//!
//! Tag and attribute names are compared case-insensitively; attribute values
//! are compared exactly. Quotes around values are optional.

use crate::toolbar::selection::Ancestor;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Selector {
    tag: Option<String>,
    attribute: Option<(String, Option<String>)>,
}

impl Selector {
    fn matches(&self, ancestor: &Ancestor) -> bool {
        if let Some(tag) = &self.tag {
            if !ancestor.tag.eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        match &self.attribute {
            None => true,
            Some((name, None)) => ancestor.attribute(name).is_some(),
            Some((name, Some(value))) => ancestor.attribute(name) == Some(value.as_str()),
        }
    }
}

/// A parsed `tagOrQuery`: the action is active when any alternative matches
/// any ancestor of the selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagQuery {
    source: String,
    alternatives: Vec<Selector>,
}

impl TagQuery {
    pub fn parse(source: &str) -> Result<Self, String> {
        let mut alternatives = Vec::new();
        for raw in source.split(',') {
            let part = raw.trim();
            if part.is_empty() {
                return Err("empty alternative".to_string());
            }
            alternatives.push(parse_selector(part)?);
        }
        Ok(Self {
            source: source.trim().to_string(),
            alternatives,
        })
    }

    pub fn matches(&self, ancestor: &Ancestor) -> bool {
        self.alternatives.iter().any(|s| s.matches(ancestor))
    }

    /// The tag of the first alternative, if it names one.
    pub fn primary_tag(&self) -> Option<&str> {
        self.alternatives.first().and_then(|s| s.tag.as_deref())
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl fmt::Display for TagQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn parse_selector(part: &str) -> Result<Selector, String> {
    let (tag_part, attr_part) = match part.find('[') {
        Some(open) => {
            let Some(inner) = part[open + 1..].strip_suffix(']') else {
                return Err(format!("unterminated attribute in `{}`", part));
            };
            (&part[..open], Some(inner))
        }
        None => (part, None),
    };

    let tag = if tag_part.is_empty() {
        None
    } else if is_name(tag_part) {
        Some(tag_part.to_ascii_lowercase())
    } else {
        return Err(format!("invalid tag name `{}`", tag_part));
    };

    let attribute = match attr_part {
        None => None,
        Some(inner) => {
            let (name, value) = match inner.split_once('=') {
                Some((name, value)) => {
                    let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
                    (name.trim(), Some(value.to_string()))
                }
                None => (inner.trim(), None),
            };
            if !is_name(name) {
                return Err(format!("invalid attribute name `{}`", name));
            }
            Some((name.to_ascii_lowercase(), value))
        }
    };

    if tag.is_none() && attribute.is_none() {
        return Err(format!("`{}` selects nothing", part));
    }
    Ok(Selector { tag, attribute })
}

fn is_name(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

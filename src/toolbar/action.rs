//! Action descriptors and the built-in button catalogue.

use crate::error::ToolbarError;
use crate::toolbar::query::TagQuery;
use serde::{Deserialize, Serialize};

/// How an action is executed when its button is activated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ActionKind {
    /// A host formatting command, e.g. `bold`.
    Native { command: String },
    /// Convert the enclosing block to `block`, or back to the default block
    /// when it already is one.
    #[serde(rename = "block")]
    BlockToggle { block: String },
    /// Delegated to a named handler outside the engine.
    Custom { handler: String },
}

impl ActionKind {
    pub fn label(&self) -> &'static str {
        match self {
            ActionKind::Native { .. } => "native",
            ActionKind::BlockToggle { .. } => "block",
            ActionKind::Custom { .. } => "custom",
        }
    }
}

/// Static definition of one toolbar capability. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionDescriptor {
    name: String,
    kind: ActionKind,
    query: TagQuery,
    label: String,
}

impl ActionDescriptor {
    pub fn new(
        name: impl Into<String>,
        kind: ActionKind,
        query: &str,
        label: impl Into<String>,
    ) -> Result<Self, ToolbarError> {
        let name = name.into();
        let query = TagQuery::parse(query).map_err(|reason| ToolbarError::InvalidQuery {
            name: name.clone(),
            query: query.to_string(),
            reason,
        })?;
        Ok(Self {
            name,
            kind,
            query,
            label: label.into(),
        })
    }

    /// A native action whose command shares the action's name.
    pub fn native(name: &str, query: &str, label: &str) -> Result<Self, ToolbarError> {
        let kind = ActionKind::Native {
            command: name.to_string(),
        };
        Self::new(name, kind, query, label)
    }

    /// A block toggle detected by the block's own tag.
    pub fn block_toggle(name: &str, block: &str, label: &str) -> Result<Self, ToolbarError> {
        let kind = ActionKind::BlockToggle {
            block: block.to_ascii_lowercase(),
        };
        Self::new(name, kind, block, label)
    }

    /// A custom action whose handler shares the action's name.
    pub fn custom(name: &str, query: &str, label: &str) -> Result<Self, ToolbarError> {
        let kind = ActionKind::Custom {
            handler: name.to_string(),
        };
        Self::new(name, kind, query, label)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &ActionKind {
        &self.kind
    }

    pub fn query(&self) -> &TagQuery {
        &self.query
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

enum Builtin {
    Native(&'static str),
    Block(&'static str),
    Custom,
}

/// Button key, action name, execution, query, label.
const BUILTINS: &[(&str, &str, Builtin, &str, &str)] = &[
    ("bold", "bold", Builtin::Native("bold"), "b,strong", "B"),
    ("italic", "italic", Builtin::Native("italic"), "i,em", "I"),
    ("underline", "underline", Builtin::Native("underline"), "u", "U"),
    (
        "strikethrough",
        "strikethrough",
        Builtin::Native("strikethrough"),
        "strike,s,del",
        "S",
    ),
    ("superscript", "superscript", Builtin::Native("superscript"), "sup", "x²"),
    ("subscript", "subscript", Builtin::Native("subscript"), "sub", "x₂"),
    ("anchor", "anchor", Builtin::Custom, "a", "#"),
    ("header1", "append-h3", Builtin::Block("h3"), "h3", "H1"),
    ("header2", "append-h4", Builtin::Block("h4"), "h4", "H2"),
    ("quote", "append-blockquote", Builtin::Block("blockquote"), "blockquote", "“"),
    ("pre", "append-pre", Builtin::Block("pre"), "pre", "0101"),
    (
        "orderedlist",
        "insertorderedlist",
        Builtin::Native("insertorderedlist"),
        "ol",
        "1.",
    ),
    (
        "unorderedlist",
        "insertunorderedlist",
        Builtin::Native("insertunorderedlist"),
        "ul",
        "•",
    ),
];

/// Default toolbar layout.
pub const DEFAULT_BUTTONS: &[&str] = &[
    "bold",
    "italic",
    "underline",
    "anchor",
    "header1",
    "header2",
    "quote",
];

/// Look up a built-in button by its configuration key.
pub fn builtin(key: &str) -> Result<Option<ActionDescriptor>, ToolbarError> {
    let Some((_, name, exec, query, label)) = BUILTINS.iter().find(|(k, ..)| *k == key) else {
        return Ok(None);
    };
    let kind = match exec {
        Builtin::Native(command) => ActionKind::Native {
            command: command.to_string(),
        },
        Builtin::Block(block) => ActionKind::BlockToggle {
            block: block.to_string(),
        },
        Builtin::Custom => ActionKind::Custom {
            handler: name.to_string(),
        },
    };
    ActionDescriptor::new(*name, kind, query, *label).map(Some)
}

/// Resolve an ordered list of button keys into descriptors.
///
/// `extra` actions are matched by name before the built-ins, so a
/// configuration can override a built-in key. Unknown keys are a
/// configuration error.
pub fn resolve_buttons(
    keys: &[String],
    extra: &[ActionDescriptor],
) -> Result<Vec<ActionDescriptor>, ToolbarError> {
    keys.iter()
        .map(|key| {
            if let Some(found) = extra.iter().find(|a| a.name() == key) {
                return Ok(found.clone());
            }
            builtin(key)?.ok_or_else(|| ToolbarError::UnregisteredAction(key.clone()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_header_is_block_toggle() {
        let h1 = builtin("header1").unwrap().unwrap();
        assert_eq!(h1.name(), "append-h3");
        assert_eq!(
            h1.kind(),
            &ActionKind::BlockToggle {
                block: "h3".into()
            }
        );
        assert_eq!(h1.query().as_str(), "h3");
    }

    #[test]
    fn test_every_builtin_parses() {
        for (key, ..) in BUILTINS {
            assert!(builtin(key).unwrap().is_some(), "{}", key);
        }
        assert!(builtin("nope").unwrap().is_none());
    }

    #[test]
    fn test_resolve_buttons_prefers_extra() {
        let mark = ActionDescriptor::native("bold", "mark", "M").unwrap();
        let keys = vec!["bold".to_string(), "italic".to_string()];
        let resolved = resolve_buttons(&keys, &[mark]).unwrap();
        assert_eq!(resolved[0].query().as_str(), "mark");
        assert_eq!(resolved[1].name(), "italic");
    }

    #[test]
    fn test_resolve_buttons_unknown_key() {
        let keys = vec!["bold".to_string(), "sparkles".to_string()];
        assert_eq!(
            resolve_buttons(&keys, &[]),
            Err(ToolbarError::UnregisteredAction("sparkles".into()))
        );
    }

    #[test]
    fn test_invalid_query_names_action() {
        let err = ActionDescriptor::native("mark", "a[", "M").unwrap_err();
        assert!(matches!(err, ToolbarError::InvalidQuery { ref name, .. } if name == "mark"));
    }

    #[test]
    fn test_kind_deserializes_from_toml() {
        let kind: ActionKind = toml::from_str("kind = \"block\"\nblock = \"h2\"").unwrap();
        assert_eq!(
            kind,
            ActionKind::BlockToggle {
                block: "h2".into()
            }
        );
    }
}

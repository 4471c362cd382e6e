//! Configuration data model.
//!
//! All structs derive `Serialize`/`Deserialize` for TOML persistence.
//! Every field has a sensible default so the application works out of the box.

use crate::error::ToolbarError;
use crate::toolbar::action::{self, ActionDescriptor, ActionKind};
use crate::toolbar::{ButtonClasses, ToolbarSettings};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub toolbar: ToolbarConfig,
    #[serde(default)]
    pub actions: Vec<ActionConfig>,
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    pub fn toolbar_settings(&self) -> ToolbarSettings {
        ToolbarSettings {
            settle_delay: Duration::from_millis(self.toolbar.settle_delay_ms),
            default_block: self.toolbar.default_block.clone(),
            classes: ButtonClasses {
                active: self.toolbar.active_class.clone(),
                first: self.toolbar.first_class.clone(),
                last: self.toolbar.last_class.clone(),
            },
        }
    }

    /// Resolve `toolbar.buttons` into descriptors, in order.
    pub fn descriptors(&self) -> Result<Vec<ActionDescriptor>, ToolbarError> {
        let extra = self
            .actions
            .iter()
            .map(ActionConfig::to_descriptor)
            .collect::<Result<Vec<_>, _>>()?;
        action::resolve_buttons(&self.toolbar.buttons, &extra)
    }
}

/// Toolbar layout and behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolbarConfig {
    #[serde(default = "default_buttons")]
    pub buttons: Vec<String>,
    /// Quiet time before a selection change is resolved. 0 means next tick.
    #[serde(default)]
    pub settle_delay_ms: u64,
    #[serde(default = "default_block")]
    pub default_block: String,
    #[serde(default = "default_active_class")]
    pub active_class: String,
    #[serde(default = "default_first_class")]
    pub first_class: String,
    #[serde(default = "default_last_class")]
    pub last_class: String,
}

impl Default for ToolbarConfig {
    fn default() -> Self {
        Self {
            buttons: default_buttons(),
            settle_delay_ms: 0,
            default_block: default_block(),
            active_class: default_active_class(),
            first_class: default_first_class(),
            last_class: default_last_class(),
        }
    }
}

/// A user-defined action, e.g.
///
/// ```toml
/// [[actions]]
/// name = "append-h2"
/// kind = "block"
/// block = "h2"
/// label = "H2"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionConfig {
    pub name: String,
    #[serde(flatten)]
    pub kind: ActionKind,
    /// Defaults to the block tag for block actions; required otherwise.
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
}

impl ActionConfig {
    pub fn to_descriptor(&self) -> Result<ActionDescriptor, ToolbarError> {
        let query = match (&self.query, &self.kind) {
            (Some(q), _) => q.clone(),
            (None, ActionKind::BlockToggle { block }) => block.clone(),
            (None, _) => {
                return Err(ToolbarError::InvalidQuery {
                    name: self.name.clone(),
                    query: String::new(),
                    reason: "a query is required for native and custom actions".into(),
                })
            }
        };
        let label = self.label.clone().unwrap_or_else(|| self.name.clone());
        ActionDescriptor::new(self.name.clone(), self.kind.clone(), &query, label)
    }
}

/// Demo editor settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorConfig {
    #[serde(default = "default_initial_html")]
    pub initial_html: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            initial_html: default_initial_html(),
        }
    }
}

/// Diagnostic log settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            log_dir: default_log_dir(),
            level: default_level(),
        }
    }
}

fn default_buttons() -> Vec<String> {
    action::DEFAULT_BUTTONS
        .iter()
        .map(|s| s.to_string())
        .collect()
}
fn default_block() -> String {
    "p".to_string()
}
fn default_active_class() -> String {
    "toolbar-button-active".to_string()
}
fn default_first_class() -> String {
    "toolbar-button-first".to_string()
}
fn default_last_class() -> String {
    "toolbar-button-last".to_string()
}
fn default_initial_html() -> String {
    "<h3>inkbar</h3><p>Select some <b>text</b> and press a number to format it.</p>\
     <p>Links open a prompt: <a href=\"https://example.com\">like this one</a>.</p>"
        .to_string()
}
fn default_log_dir() -> String {
    "~/.local/share/inkbar/logs".to_string()
}
fn default_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_resolves() {
        let cfg = AppConfig::default();
        let names: Vec<_> = cfg
            .descriptors()
            .unwrap()
            .iter()
            .map(|d| d.name().to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "bold",
                "italic",
                "underline",
                "anchor",
                "append-h3",
                "append-h4",
                "append-blockquote"
            ]
        );
        assert_eq!(cfg.toolbar_settings().settle_delay, Duration::ZERO);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [toolbar]
            buttons = ["bold", "append-h2", "pre"]
            settle_delay_ms = 16

            [[actions]]
            name = "append-h2"
            kind = "block"
            block = "h2"
            label = "H2"
            "#,
        )
        .unwrap();
        let descriptors = cfg.descriptors().unwrap();
        assert_eq!(descriptors.len(), 3);
        assert_eq!(
            descriptors[1].kind(),
            &ActionKind::BlockToggle {
                block: "h2".into()
            }
        );
        assert_eq!(descriptors[1].query().as_str(), "h2");
        assert_eq!(cfg.toolbar.default_block, "p");
        assert_eq!(
            cfg.toolbar_settings().settle_delay,
            Duration::from_millis(16)
        );
        assert!(!cfg.logging.enabled);
    }

    #[test]
    fn test_custom_action_requires_query() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [[actions]]
            name = "image"
            kind = "custom"
            handler = "image"
            "#,
        )
        .unwrap();
        assert!(matches!(
            cfg.descriptors(),
            Err(ToolbarError::InvalidQuery { .. })
        ));
    }

    #[test]
    fn test_unknown_button_is_config_error() {
        let cfg: AppConfig = toml::from_str("[toolbar]\nbuttons = [\"bold\", \"glitter\"]").unwrap();
        assert_eq!(
            cfg.descriptors(),
            Err(ToolbarError::UnregisteredAction("glitter".into()))
        );
    }
}

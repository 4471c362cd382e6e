//! Button registry: the ordered buttons, their paint state, and markup.

use crate::error::ToolbarError;
use crate::toolbar::action::ActionDescriptor;
use crate::toolbar::resolver::ActiveSet;
use std::collections::HashMap;
use tracing::debug;

/// CSS class names applied to rendered buttons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonClasses {
    pub active: String,
    pub first: String,
    pub last: String,
}

impl Default for ButtonClasses {
    fn default() -> Self {
        Self {
            active: "toolbar-button-active".into(),
            first: "toolbar-button-first".into(),
            last: "toolbar-button-last".into(),
        }
    }
}

/// One rendered toolbar button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonInstance {
    descriptor: ActionDescriptor,
    active: bool,
    is_first: bool,
    is_last: bool,
}

impl ButtonInstance {
    pub fn descriptor(&self) -> &ActionDescriptor {
        &self.descriptor
    }

    pub fn name(&self) -> &str {
        self.descriptor.name()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_first(&self) -> bool {
        self.is_first
    }

    pub fn is_last(&self) -> bool {
        self.is_last
    }

    pub fn class_names<'a>(&self, classes: &'a ButtonClasses) -> Vec<&'a str> {
        let mut out = Vec::new();
        if self.is_first {
            out.push(classes.first.as_str());
        }
        if self.is_last {
            out.push(classes.last.as_str());
        }
        if self.active {
            out.push(classes.active.as_str());
        }
        out
    }

    /// `<button class="…" data-action="…">label</button>`
    pub fn to_html(&self, classes: &ButtonClasses) -> String {
        let class = self.class_names(classes).join(" ");
        format!(
            "<button class=\"{}\" data-action=\"{}\">{}</button>",
            escape(&class),
            escape(self.name()),
            escape(self.descriptor.label())
        )
    }
}

/// Ordered, name-indexed collection of [`ButtonInstance`]s.
#[derive(Debug, Clone, Default)]
pub struct ButtonRegistry {
    buttons: Vec<ButtonInstance>,
    index: HashMap<String, usize>,
}

impl ButtonRegistry {
    /// Build one button per descriptor, preserving order. Edge flags are
    /// fixed here and never recomputed.
    pub fn build(descriptors: &[ActionDescriptor]) -> Result<Self, ToolbarError> {
        if descriptors.is_empty() {
            return Err(ToolbarError::EmptyRegistry);
        }
        let last = descriptors.len() - 1;
        let mut buttons = Vec::with_capacity(descriptors.len());
        let mut index = HashMap::with_capacity(descriptors.len());
        for (i, descriptor) in descriptors.iter().enumerate() {
            if index.insert(descriptor.name().to_string(), i).is_some() {
                return Err(ToolbarError::DuplicateAction(descriptor.name().to_string()));
            }
            buttons.push(ButtonInstance {
                descriptor: descriptor.clone(),
                active: false,
                is_first: i == 0,
                is_last: i == last,
            });
        }
        Ok(Self { buttons, index })
    }

    /// Set every button's active flag from `active`. Returns how many buttons
    /// changed; a second call with the same set returns 0.
    pub fn repaint(&mut self, active: &ActiveSet) -> usize {
        let mut changed = 0;
        for button in &mut self.buttons {
            let next = active.contains(button.descriptor.name());
            if button.active != next {
                button.active = next;
                changed += 1;
            }
        }
        if changed > 0 {
            debug!(changed, active = ?active, "toolbar repainted");
        }
        changed
    }

    pub fn find_button(&self, name: &str) -> Option<&ButtonInstance> {
        self.index.get(name).map(|&i| &self.buttons[i])
    }

    pub fn buttons(&self) -> &[ButtonInstance] {
        &self.buttons
    }

    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }

    /// Toolbar markup as a `<ul>` of buttons.
    pub fn render_html(&self, classes: &ButtonClasses) -> String {
        let mut out = String::from("<ul class=\"toolbar-actions\">");
        for button in &self.buttons {
            out.push_str("<li>");
            out.push_str(&button.to_html(classes));
            out.push_str("</li>");
        }
        out.push_str("</ul>");
        out
    }
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toolbar::action::builtin;

    fn descriptors(keys: &[&str]) -> Vec<ActionDescriptor> {
        keys.iter().map(|k| builtin(k).unwrap().unwrap()).collect()
    }

    fn set(names: &[&str]) -> ActiveSet {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_first_and_last_flags() {
        let reg = ButtonRegistry::build(&descriptors(&["bold", "italic", "underline", "anchor"]))
            .unwrap();
        let flags: Vec<_> = reg
            .buttons()
            .iter()
            .map(|b| (b.is_first(), b.is_last()))
            .collect();
        assert_eq!(
            flags,
            vec![(true, false), (false, false), (false, false), (false, true)]
        );
    }

    #[test]
    fn test_single_button_is_first_and_last() {
        let reg = ButtonRegistry::build(&descriptors(&["bold"])).unwrap();
        assert!(reg.buttons()[0].is_first());
        assert!(reg.buttons()[0].is_last());
    }

    #[test]
    fn test_edge_flags_survive_repaint() {
        let mut reg = ButtonRegistry::build(&descriptors(&["bold", "italic", "quote"])).unwrap();
        reg.repaint(&set(&["bold", "append-blockquote"]));
        reg.repaint(&set(&[]));
        assert!(reg.buttons()[0].is_first());
        assert!(!reg.buttons()[1].is_first() && !reg.buttons()[1].is_last());
        assert!(reg.buttons()[2].is_last());
    }

    #[test]
    fn test_repaint_is_idempotent() {
        let mut reg = ButtonRegistry::build(&descriptors(&["bold", "italic", "underline"])).unwrap();
        let active = set(&["italic"]);
        assert_eq!(reg.repaint(&active), 1);
        let once = reg.buttons().to_vec();
        assert_eq!(reg.repaint(&active), 0);
        assert_eq!(reg.buttons(), once.as_slice());
    }

    #[test]
    fn test_repaint_only_touches_named_buttons() {
        let mut reg = ButtonRegistry::build(&descriptors(&["bold", "italic", "underline"])).unwrap();
        reg.repaint(&set(&["bold", "underline"]));
        reg.repaint(&set(&["underline"]));
        assert!(!reg.find_button("bold").unwrap().is_active());
        assert!(!reg.find_button("italic").unwrap().is_active());
        assert!(reg.find_button("underline").unwrap().is_active());
    }

    #[test]
    fn test_duplicate_and_empty_registries_fail() {
        assert_eq!(
            ButtonRegistry::build(&descriptors(&["bold", "bold"])).unwrap_err(),
            ToolbarError::DuplicateAction("bold".into())
        );
        assert_eq!(
            ButtonRegistry::build(&[]).unwrap_err(),
            ToolbarError::EmptyRegistry
        );
    }

    #[test]
    fn test_find_unregistered_button() {
        let reg = ButtonRegistry::build(&descriptors(&["bold"])).unwrap();
        assert!(reg.find_button("append-h3").is_none());
    }

    #[test]
    fn test_render_html_classes() {
        let mut reg = ButtonRegistry::build(&descriptors(&["bold", "italic", "header1"])).unwrap();
        reg.repaint(&set(&["bold"]));
        let html = reg.render_html(&ButtonClasses::default());
        assert!(html.starts_with("<ul class=\"toolbar-actions\"><li><button class=\"toolbar-button-first toolbar-button-active\" data-action=\"bold\">B</button></li>"));
        assert!(html.contains("<button class=\"\" data-action=\"italic\">I</button>"));
        assert!(html.contains("<button class=\"toolbar-button-last\" data-action=\"append-h3\">H1</button>"));
    }
}

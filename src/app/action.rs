/// Side effects requested by the handler, applied to the toolbar in `main`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Move the caret by characters; `extend` keeps the anchor.
    MoveFocus { delta: isize, extend: bool },
    /// Jump to a text offset (clamped by the host).
    MoveFocusTo { offset: usize, extend: bool },
    SelectAll,
    Blur,
    Activate { name: String },
    SubmitLink { url: String },
    CancelLink,
    Quit,
}

impl Action {
    /// Whether applying this action changes the host selection.
    pub fn moves_selection(&self) -> bool {
        matches!(
            self,
            Action::MoveFocus { .. } | Action::MoveFocusTo { .. } | Action::SelectAll | Action::Blur
        )
    }
}

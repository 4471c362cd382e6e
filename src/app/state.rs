use inkbar::config::AppConfig;
use inkbar::document::DocumentHost;
use inkbar::toolbar::{
    Activation, ButtonInstance, CustomFinished, CustomOutcome, DispatchOutcome, TextRange, Toolbar,
};
use unicode_width::UnicodeWidthStr;

/// Render-side copy of a toolbar button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonView {
    pub name: String,
    pub label: String,
    pub active: bool,
    pub first: bool,
    pub last: bool,
}

impl ButtonView {
    pub fn from_instance(button: &ButtonInstance) -> Self {
        Self {
            name: button.name().to_string(),
            label: button.descriptor().label().to_string(),
            active: button.is_active(),
            first: button.is_first(),
            last: button.is_last(),
        }
    }
}

/// Single-line editor for the link prompt.
#[derive(Debug, Default)]
pub struct InputState {
    pub text: String,
    /// Byte offset into `text`.
    pub cursor: usize,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn delete_back(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.text.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    pub fn delete_forward(&mut self) {
        if let Some(next) = self.next_boundary() {
            self.text.drain(self.cursor..next);
        }
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.cursor = prev;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(next) = self.next_boundary() {
            self.cursor = next;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }

    pub fn take_text(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Display column of the cursor.
    pub fn cursor_column(&self) -> usize {
        self.text[..self.cursor].width()
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.text[..self.cursor].char_indices().next_back().map(|(i, _)| i)
    }

    fn next_boundary(&self) -> Option<usize> {
        let c = self.text[self.cursor..].chars().next()?;
        Some(self.cursor + c.len_utf8())
    }
}

pub struct AppState {
    pub config: AppConfig,
    pub buttons: Vec<ButtonView>,
    pub active: Vec<String>,
    pub selection: Option<TextRange>,
    /// Range waiting for a link URL, if a prompt is open.
    pub prompt: Option<TextRange>,
    pub pending_custom: usize,
    pub input: InputState,
    pub status_message: Option<String>,
    pub terminal_size: (u16, u16),
    pub should_quit: bool,
    pub dirty: bool,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            buttons: Vec::new(),
            active: Vec::new(),
            selection: None,
            prompt: None,
            pending_custom: 0,
            input: InputState::new(),
            status_message: None,
            terminal_size: (80, 24),
            should_quit: false,
            dirty: true,
        }
    }

    pub fn in_prompt(&self) -> bool {
        self.prompt.is_some()
    }

    /// Copy what the UI needs out of the toolbar.
    pub fn sync(&mut self, toolbar: &Toolbar<DocumentHost>) {
        let buttons: Vec<ButtonView> = toolbar.buttons().iter().map(ButtonView::from_instance).collect();
        let active: Vec<String> = toolbar.active_actions().iter().cloned().collect();
        let host = toolbar.host();
        let selection = host.selection();
        let prompt = host.current_prompt();
        let pending = toolbar.pending_custom_actions();

        if prompt != self.prompt {
            self.input.clear();
        }
        if buttons != self.buttons
            || active != self.active
            || selection != self.selection
            || prompt != self.prompt
            || pending != self.pending_custom
        {
            self.dirty = true;
        }
        self.buttons = buttons;
        self.active = active;
        self.selection = selection;
        self.prompt = prompt;
        self.pending_custom = pending;
    }

    pub fn button_at(&self, index: usize) -> Option<&ButtonView> {
        self.buttons.get(index)
    }

    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status_message = Some(text.into());
        self.dirty = true;
    }

    pub fn record_activation(&mut self, activation: &Activation) {
        let text = describe_outcome(&activation.outcome);
        self.set_status(format!("{}: {}", activation.action, text));
    }

    pub fn record_completion(&mut self, finished: &CustomFinished) {
        let text = describe_custom(&finished.outcome);
        self.set_status(format!("{}: {}", finished.action, text));
    }

    pub fn status_line(&self) -> String {
        if let Some(msg) = &self.status_message {
            return msg.clone();
        }
        if self.in_prompt() {
            return "Enter a link URL (Enter to apply, Esc to cancel)".to_string();
        }
        "arrows move, shift extends, 1-9 apply, q quits".to_string()
    }
}

pub fn describe_outcome(outcome: &DispatchOutcome) -> String {
    match outcome {
        DispatchOutcome::NativeApplied { command } => format!("{command} applied"),
        DispatchOutcome::NativeRejected { command, error: None } => {
            format!("{command} not supported here")
        }
        DispatchOutcome::NativeRejected {
            command,
            error: Some(e),
        } => format!("{command} failed: {e}"),
        DispatchOutcome::BlockReplaced { from, to } => match from {
            Some(from) => format!("{from} -> {to}"),
            None => format!("block -> {to}"),
        },
        DispatchOutcome::BlockUnchanged { block } => format!("already {block}"),
        DispatchOutcome::BlockSkipped { error: None } => "nothing selected".to_string(),
        DispatchOutcome::BlockSkipped { error: Some(e) } => format!("block change failed: {e}"),
        DispatchOutcome::CustomFinished { outcome, .. } => describe_custom(outcome),
        DispatchOutcome::CustomPending { .. } => "waiting for input".to_string(),
    }
}

fn describe_custom(outcome: &CustomOutcome) -> String {
    match outcome {
        CustomOutcome::Applied => "done".to_string(),
        CustomOutcome::Cancelled => "cancelled".to_string(),
        CustomOutcome::Failed(reason) => format!("failed: {reason}"),
    }
}

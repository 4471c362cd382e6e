//! [`DocumentHost`]: a [`Document`] plus a selection, implementing every
//! toolbar collaborator.

use crate::document::commands::{self, inline_command};
use crate::document::selection::{ancestor_chain, ancestor_of};
use crate::document::Document;
use crate::error::{HostError, ParseError};
use crate::toolbar::selection::{
    Ancestor, CommandExecutor, CustomActionHandler, CustomCompleter, CustomCompletion,
    CustomOutcome, SelectionSnapshot, SelectionSource, TextRange,
};
use std::collections::VecDeque;
use tracing::{debug, info};

/// Name of the built-in link handler.
pub const ANCHOR_HANDLER: &str = "anchor";

/// A link waiting for its URL.
#[derive(Debug)]
struct LinkPrompt {
    range: TextRange,
    completer: CustomCompleter,
}

#[derive(Debug)]
pub struct DocumentHost {
    doc: Document,
    selection: Option<TextRange>,
    prompts: VecDeque<LinkPrompt>,
}

impl DocumentHost {
    pub fn new(doc: Document) -> Self {
        Self {
            doc,
            selection: None,
            prompts: VecDeque::new(),
        }
    }

    pub fn from_html(html: &str) -> Result<Self, ParseError> {
        Ok(Self::new(Document::parse(html)?))
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn html(&self) -> String {
        self.doc.to_html()
    }

    pub fn text_len(&self) -> usize {
        self.doc.text_len()
    }

    pub fn selection(&self) -> Option<TextRange> {
        self.selection
    }

    /// Replace the selection, clamped to the text flow.
    pub fn set_selection(&mut self, range: Option<TextRange>) {
        let max = self.text_len();
        self.selection = range.map(|r| TextRange::new(r.anchor.min(max), r.focus.min(max)));
    }

    pub fn select_all(&mut self) {
        self.set_selection(Some(TextRange::new(0, self.text_len())));
    }

    /// Move the focus by `delta` characters. Without `extend` the selection
    /// collapses to the new focus. The first move enters the document at 0.
    pub fn move_focus(&mut self, delta: isize, extend: bool) {
        let Some(current) = self.selection else {
            self.set_selection(Some(TextRange::caret(0)));
            return;
        };
        let focus = current.focus.saturating_add_signed(delta);
        self.move_focus_to(focus, extend);
    }

    pub fn move_focus_to(&mut self, focus: usize, extend: bool) {
        let anchor = match self.selection {
            Some(r) if extend => r.anchor,
            _ => focus,
        };
        self.set_selection(Some(TextRange::new(anchor, focus)));
    }

    /// Leave the editable region.
    pub fn blur(&mut self) {
        self.selection = None;
    }

    pub fn pending_prompts(&self) -> usize {
        self.prompts.len()
    }

    /// Range of the oldest link prompt.
    pub fn current_prompt(&self) -> Option<TextRange> {
        self.prompts.front().map(|p| p.range)
    }

    /// Answer the oldest link prompt. An empty URL cancels it.
    pub fn submit_link(&mut self, url: &str) -> Result<(), HostError> {
        let prompt = self.prompts.pop_front().ok_or(HostError::NoSelection)?;
        let url = url.trim();
        if url.is_empty() {
            prompt.completer.complete(CustomOutcome::Cancelled);
            return Ok(());
        }
        let wrapped = commands::wrap_range(
            &mut self.doc,
            &prompt.range,
            "a",
            vec![("href".to_string(), url.to_string())],
            &["a"],
        );
        if wrapped == 0 {
            prompt
                .completer
                .complete(CustomOutcome::Failed("selection no longer has text".into()));
            return Ok(());
        }
        info!(url, "link created");
        prompt.completer.complete(CustomOutcome::Applied);
        Ok(())
    }

    /// Dismiss the oldest link prompt.
    pub fn cancel_link(&mut self) -> bool {
        match self.prompts.pop_front() {
            Some(prompt) => {
                prompt.completer.complete(CustomOutcome::Cancelled);
                true
            }
            None => false,
        }
    }

    fn anchor_action(&mut self, snapshot: Option<&SelectionSnapshot>) -> Result<CustomCompletion, HostError> {
        let snapshot = snapshot.ok_or_else(|| HostError::CustomHandlerFailure {
            name: ANCHOR_HANDLER.into(),
            reason: "no selection".into(),
        })?;
        if snapshot.ancestors.iter().any(|a: &Ancestor| a.tag == "a") {
            commands::unwrap_nearest(&mut self.doc, &snapshot.range, &["a"]);
            debug!("link removed");
            return Ok(CustomCompletion::ready(CustomOutcome::Applied));
        }
        if snapshot.is_collapsed() {
            return Ok(CustomCompletion::ready(CustomOutcome::Cancelled));
        }
        let (completer, completion) = CustomCompletion::channel();
        self.prompts.push_back(LinkPrompt {
            range: snapshot.range,
            completer,
        });
        debug!(pending = self.prompts.len(), "link prompt opened");
        Ok(completion)
    }
}

impl SelectionSource for DocumentHost {
    fn current_range(&self) -> Result<Option<TextRange>, HostError> {
        if self.doc.text_len() == 0 {
            return Ok(None);
        }
        Ok(self.selection)
    }

    fn ancestor_chain(&self, range: &TextRange) -> Result<Vec<Ancestor>, HostError> {
        Ok(ancestor_chain(&self.doc, range))
    }

    fn replacement_block(&self, range: &TextRange) -> Result<Option<Ancestor>, HostError> {
        Ok(commands::replacement_block(&self.doc, range).and_then(|id| ancestor_of(&self.doc, id)))
    }
}

impl CommandExecutor for DocumentHost {
    fn exec_native_command(&mut self, command: &str) -> Result<bool, HostError> {
        let Some(cmd) = inline_command(command) else {
            return Ok(false);
        };
        let range = self.selection.ok_or(HostError::NoSelection)?;
        if !commands::toggle_inline(&mut self.doc, &range, cmd) {
            debug!(command, "nothing to toggle at a bare caret");
        }
        Ok(true)
    }

    fn replace_block(&mut self, snapshot: &SelectionSnapshot, block: &str) -> Result<(), HostError> {
        commands::replace_block(&mut self.doc, &snapshot.range, block)
    }
}

impl CustomActionHandler for DocumentHost {
    fn invoke_custom_handler(
        &mut self,
        name: &str,
        snapshot: Option<&SelectionSnapshot>,
    ) -> Result<CustomCompletion, HostError> {
        match name {
            ANCHOR_HANDLER => self.anchor_action(snapshot),
            other => Err(HostError::CustomHandlerFailure {
                name: other.to_string(),
                reason: "no such handler".into(),
            }),
        }
    }
}

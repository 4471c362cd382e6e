//! Toolbar action engine.
//!
//! [`Toolbar`] owns the host collaborators and wires the four parts together:
//!
//! ```text
//! selection events -> SelectionObserver -> resolve() -> ButtonRegistry::repaint
//! button activation -> Dispatcher -> host mutation -> resolve() -> repaint
//! ```
//!
//! Everything runs on the caller's thread. Resolution always completes before
//! the repaint it feeds, and a repaint always completes before the next
//! activation is dispatched, because each entry point runs to completion.

pub mod action;
pub mod dispatcher;
pub mod observer;
pub mod query;
pub mod registry;
pub mod resolver;
pub mod selection;

use crate::error::ToolbarError;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

pub use action::{ActionDescriptor, ActionKind};
pub use dispatcher::{CustomFinished, DispatchOutcome, Dispatcher, Ticket};
pub use observer::{SelectionCause, SelectionObserver};
pub use registry::{ButtonClasses, ButtonInstance, ButtonRegistry};
pub use resolver::{resolve, ActiveSet};
pub use selection::{
    Ancestor, CustomCompleter, CustomCompletion, CustomOutcome, EditorHost, SelectionSnapshot,
    TextRange,
};

/// Engine settings; usually derived from the `[toolbar]` config table.
#[derive(Debug, Clone)]
pub struct ToolbarSettings {
    pub settle_delay: Duration,
    pub default_block: String,
    pub classes: ButtonClasses,
}

impl Default for ToolbarSettings {
    fn default() -> Self {
        Self {
            settle_delay: Duration::ZERO,
            default_block: "p".into(),
            classes: ButtonClasses::default(),
        }
    }
}

/// Result of reading the selection and repainting from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionCheck {
    /// A selection was found and the buttons reflect it.
    Resolved,
    /// The selection went away (or the host failed); everything is inactive.
    Cleared,
    /// No selection before or after; nothing to do.
    Skipped,
}

/// What one [`Toolbar::tick`] did.
#[derive(Debug, Default)]
pub struct TickReport {
    pub settle: Option<SelectionCheck>,
    pub completed: Vec<CustomFinished>,
}

impl TickReport {
    pub fn is_idle(&self) -> bool {
        self.settle.is_none() && self.completed.is_empty()
    }
}

/// Record of one button activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activation {
    pub action: String,
    /// The selection was missing or stale and had to be re-read first.
    pub rechecked: bool,
    pub outcome: DispatchOutcome,
}

pub struct Toolbar<H> {
    host: H,
    settings: ToolbarSettings,
    descriptors: Vec<ActionDescriptor>,
    registry: Option<ButtonRegistry>,
    observer: SelectionObserver,
    dispatcher: Dispatcher,
    selection: Option<SelectionSnapshot>,
    active: ActiveSet,
    checks: u64,
}

impl<H: EditorHost> Toolbar<H> {
    pub fn new(host: H, settings: ToolbarSettings) -> Self {
        let observer = SelectionObserver::new(settings.settle_delay);
        let dispatcher = Dispatcher::new(settings.default_block.clone());
        Self {
            host,
            settings,
            descriptors: Vec::new(),
            registry: None,
            observer,
            dispatcher,
            selection: None,
            active: ActiveSet::new(),
            checks: 0,
        }
    }

    /// Append actions in toolbar order. Fails without registering anything if
    /// a name repeats, either within `actions` or against earlier calls.
    /// Registering after [`build`](Self::build) requires building again.
    pub fn register_actions<I>(&mut self, actions: I) -> Result<(), ToolbarError>
    where
        I: IntoIterator<Item = ActionDescriptor>,
    {
        let incoming: Vec<ActionDescriptor> = actions.into_iter().collect();
        for (i, action) in incoming.iter().enumerate() {
            let seen_before = self.descriptors.iter().any(|d| d.name() == action.name())
                || incoming[..i].iter().any(|d| d.name() == action.name());
            if seen_before {
                error!(action = action.name(), "duplicate toolbar action");
                return Err(ToolbarError::DuplicateAction(action.name().to_string()));
            }
        }
        info!(count = incoming.len(), "registering toolbar actions");
        self.descriptors.extend(incoming);
        if self.registry.take().is_some() {
            debug!("toolbar invalidated by late registration");
        }
        Ok(())
    }

    /// Create the buttons for every registered action.
    pub fn build(&mut self) -> Result<&[ButtonInstance], ToolbarError> {
        let mut registry = ButtonRegistry::build(&self.descriptors)?;
        registry.repaint(&self.active);
        info!(buttons = registry.len(), "toolbar built");
        Ok(self.registry.insert(registry).buttons())
    }

    /// Feed a raw selection-change event to the observer.
    pub fn selection_changed(&mut self, now: Instant, cause: SelectionCause) {
        self.observer.notify(now, cause);
    }

    /// Drop the cached selection, e.g. when the editor loses focus. The next
    /// activation re-reads it before dispatching.
    pub fn invalidate_selection(&mut self) {
        self.selection = None;
    }

    /// Advance timers: fire a due settle and collect finished custom actions.
    pub fn tick(&mut self, now: Instant) -> TickReport {
        let mut report = TickReport::default();
        if let Some(settle) = self.observer.poll(now) {
            debug!(
                generation = settle.generation,
                coalesced = settle.coalesced,
                "selection settled"
            );
            report.settle = Some(self.check_selection());
        }
        report.completed = self.dispatcher.poll_completions();
        if !report.completed.is_empty() {
            self.check_selection();
        }
        report
    }

    /// Read the selection now, resolve it, and repaint.
    ///
    /// Host failures and a missing range both leave every button inactive.
    pub fn check_selection(&mut self) -> SelectionCheck {
        self.observer.cancel();
        self.checks += 1;
        let had_selection = self.selection.is_some() || !self.active.is_empty();
        self.selection = match selection::take_snapshot(&self.host) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(error = %e, "selection unavailable, clearing toolbar state");
                None
            }
        };
        let check = match (&self.selection, had_selection) {
            (Some(_), _) => SelectionCheck::Resolved,
            (None, true) => SelectionCheck::Cleared,
            (None, false) => return SelectionCheck::Skipped,
        };
        self.active = resolve(self.selection.as_ref(), &self.descriptors);
        if let Some(registry) = self.registry.as_mut() {
            registry.repaint(&self.active);
        }
        check
    }

    /// Entry point for UI wiring: activate the button for `name`.
    ///
    /// Only configuration mistakes (unbuilt toolbar, unknown name) are
    /// errors. Every document-level failure is absorbed into the returned
    /// outcome, and the buttons are repainted either way, except for custom
    /// actions still pending.
    pub fn on_button_activated(&mut self, name: &str) -> Result<Activation, ToolbarError> {
        let registry = self.registry.as_ref().ok_or(ToolbarError::NotBuilt)?;
        let Some(button) = registry.find_button(name) else {
            error!(action = name, "activation for unregistered action");
            return Err(ToolbarError::UnregisteredAction(name.to_string()));
        };
        let descriptor = button.descriptor().clone();

        let rechecked = self.selection.is_none() || self.observer.is_pending();
        if rechecked {
            debug!(action = name, "selection stale at activation, re-checking");
            self.check_selection();
        }

        let outcome = self
            .dispatcher
            .dispatch(&mut self.host, &descriptor, self.selection.as_ref());
        if outcome.repaints_now() {
            self.check_selection();
        }
        Ok(Activation {
            action: name.to_string(),
            rechecked,
            outcome,
        })
    }

    pub fn active_actions(&self) -> &ActiveSet {
        &self.active
    }

    pub fn is_active(&self, name: &str) -> bool {
        self.active.contains(name)
    }

    /// Buttons in toolbar order; empty before [`build`](Self::build).
    pub fn buttons(&self) -> &[ButtonInstance] {
        self.registry.as_ref().map(|r| r.buttons()).unwrap_or(&[])
    }

    pub fn find_button(&self, name: &str) -> Option<&ButtonInstance> {
        self.registry.as_ref().and_then(|r| r.find_button(name))
    }

    pub fn render_html(&self) -> Option<String> {
        self.registry
            .as_ref()
            .map(|r| r.render_html(&self.settings.classes))
    }

    pub fn settings(&self) -> &ToolbarSettings {
        &self.settings
    }

    pub fn selection(&self) -> Option<&SelectionSnapshot> {
        self.selection.as_ref()
    }

    /// How many times the selection has been read.
    pub fn selection_checks(&self) -> u64 {
        self.checks
    }

    pub fn settle_pending(&self) -> bool {
        self.observer.is_pending()
    }

    pub fn pending_custom_actions(&self) -> usize {
        self.dispatcher.pending_count()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Destroy the buttons, abandon pending custom actions, and hand the
    /// host back.
    pub fn teardown(mut self) -> H {
        self.dispatcher.abandon_all();
        self.observer.cancel();
        self.registry = None;
        info!("toolbar torn down");
        self.host
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentHost;
    use crate::error::HostError;
    use crate::toolbar::action::builtin;
    use crate::toolbar::selection::{CommandExecutor, CustomActionHandler, SelectionSource};

    /// Scriptable host that records every call.
    #[derive(Default)]
    struct FakeHost {
        range: Option<TextRange>,
        chain: Vec<Ancestor>,
        selection_fails: bool,
        native_supported: bool,
        natives: Vec<String>,
        blocks: Vec<String>,
        customs: Vec<String>,
        completers: Vec<CustomCompleter>,
        range_reads: std::cell::Cell<usize>,
    }

    impl SelectionSource for FakeHost {
        fn current_range(&self) -> Result<Option<TextRange>, HostError> {
            self.range_reads.set(self.range_reads.get() + 1);
            if self.selection_fails {
                return Err(HostError::NoSelection);
            }
            Ok(self.range)
        }

        fn ancestor_chain(&self, _: &TextRange) -> Result<Vec<Ancestor>, HostError> {
            Ok(self.chain.clone())
        }
    }

    impl CommandExecutor for FakeHost {
        fn exec_native_command(&mut self, command: &str) -> Result<bool, HostError> {
            self.natives.push(command.to_string());
            if !self.native_supported {
                return Ok(false);
            }
            // Toggle the matching inline element like a browser would.
            let tag = match command {
                "bold" => "b",
                "italic" => "i",
                _ => return Ok(false),
            };
            if let Some(pos) = self.chain.iter().position(|a| a.tag == tag) {
                self.chain.remove(pos);
            } else {
                self.chain.insert(0, Ancestor::new(tag, false));
            }
            Ok(true)
        }

        fn replace_block(&mut self, _: &SelectionSnapshot, block: &str) -> Result<(), HostError> {
            self.blocks.push(block.to_string());
            Ok(())
        }
    }

    impl CustomActionHandler for FakeHost {
        fn invoke_custom_handler(
            &mut self,
            name: &str,
            _: Option<&SelectionSnapshot>,
        ) -> Result<CustomCompletion, HostError> {
            self.customs.push(name.to_string());
            let (completer, completion) = CustomCompletion::channel();
            self.completers.push(completer);
            Ok(completion)
        }
    }

    fn toolbar(host: FakeHost, keys: &[&str]) -> Toolbar<FakeHost> {
        let mut tb = Toolbar::new(host, ToolbarSettings::default());
        tb.register_actions(keys.iter().map(|k| builtin(k).unwrap().unwrap()))
            .unwrap();
        tb.build().unwrap();
        tb
    }

    fn bold_selection() -> FakeHost {
        FakeHost {
            range: Some(TextRange::new(0, 5)),
            chain: vec![Ancestor::new("b", false), Ancestor::new("p", true)],
            native_supported: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_settle_resolves_once_per_burst() {
        let mut tb = toolbar(bold_selection(), &["bold", "italic"]);
        let now = Instant::now();
        tb.selection_changed(now, SelectionCause::KeyUp);
        tb.selection_changed(now, SelectionCause::KeyUp);
        tb.selection_changed(now, SelectionCause::PointerUp);
        assert!(tb.settle_pending());

        let report = tb.tick(now);
        assert_eq!(report.settle, Some(SelectionCheck::Resolved));
        assert_eq!(tb.host().range_reads.get(), 1);
        assert!(tb.find_button("bold").unwrap().is_active());
        assert!(!tb.find_button("italic").unwrap().is_active());
        assert!(tb.tick(now).is_idle());
    }

    #[test]
    fn test_no_selection_does_not_fire_until_entry() {
        let mut tb = toolbar(FakeHost::default(), &["bold"]);
        let now = Instant::now();
        tb.selection_changed(now, SelectionCause::PointerUp);
        assert_eq!(tb.tick(now).settle, Some(SelectionCheck::Skipped));

        tb.host_mut().range = Some(TextRange::caret(0));
        tb.host_mut().chain = vec![Ancestor::new("b", false)];
        tb.selection_changed(now, SelectionCause::PointerUp);
        assert_eq!(tb.tick(now).settle, Some(SelectionCheck::Resolved));
        assert!(tb.is_active("bold"));

        tb.host_mut().range = None;
        tb.selection_changed(now, SelectionCause::PointerUp);
        assert_eq!(tb.tick(now).settle, Some(SelectionCheck::Cleared));
        assert!(tb.active_actions().is_empty());
    }

    #[test]
    fn test_selection_failure_clears_buttons() {
        let mut tb = toolbar(bold_selection(), &["bold"]);
        tb.check_selection();
        assert!(tb.is_active("bold"));
        tb.host_mut().selection_fails = true;
        assert_eq!(tb.check_selection(), SelectionCheck::Cleared);
        assert!(!tb.find_button("bold").unwrap().is_active());
    }

    #[test]
    fn test_click_on_active_bold_turns_it_off() {
        let mut tb = toolbar(bold_selection(), &["bold", "italic"]);
        tb.check_selection();
        assert!(tb.find_button("bold").unwrap().is_active());

        let activation = tb.on_button_activated("bold").unwrap();
        assert!(!activation.rechecked);
        assert_eq!(tb.host().natives, vec!["bold"]);
        assert!(!tb.find_button("bold").unwrap().is_active());
    }

    #[test]
    fn test_undefined_selection_is_rechecked_before_dispatch() {
        let mut tb = toolbar(bold_selection(), &["bold"]);
        tb.check_selection();
        tb.invalidate_selection();
        let before = tb.selection_checks();

        let activation = tb.on_button_activated("bold").unwrap();
        assert!(activation.rechecked);
        // One re-check before dispatch, one resolution after.
        assert_eq!(tb.selection_checks(), before + 2);
        assert!(matches!(
            activation.outcome,
            DispatchOutcome::NativeApplied { .. }
        ));
    }

    #[test]
    fn test_pending_settle_counts_as_stale() {
        let mut tb = toolbar(bold_selection(), &["bold"]);
        tb.check_selection();
        tb.selection_changed(Instant::now(), SelectionCause::KeyUp);
        let activation = tb.on_button_activated("bold").unwrap();
        assert!(activation.rechecked);
        assert!(!tb.settle_pending());
    }

    #[test]
    fn test_unsupported_native_still_repaints() {
        let mut host = bold_selection();
        host.native_supported = false;
        let mut tb = toolbar(host, &["bold", "italic"]);
        tb.check_selection();
        let checks = tb.selection_checks();

        let activation = tb.on_button_activated("italic").unwrap();
        assert!(matches!(
            activation.outcome,
            DispatchOutcome::NativeRejected { error: None, .. }
        ));
        assert_eq!(tb.selection_checks(), checks + 1);
        assert!(!tb.is_active("italic"));
        assert!(tb.is_active("bold"));
    }

    #[test]
    fn test_custom_action_defers_repaint_until_completion() {
        let mut tb = toolbar(bold_selection(), &["bold", "anchor"]);
        tb.check_selection();
        let checks = tb.selection_checks();

        let activation = tb.on_button_activated("anchor").unwrap();
        assert!(matches!(
            activation.outcome,
            DispatchOutcome::CustomPending { .. }
        ));
        assert!(tb.host().natives.is_empty());
        assert!(tb.host().blocks.is_empty());
        assert_eq!(tb.selection_checks(), checks);
        assert_eq!(tb.pending_custom_actions(), 1);

        // Another click goes through while the link prompt is open.
        tb.on_button_activated("bold").unwrap();
        assert!(!tb.is_active("bold"));
        assert_eq!(tb.pending_custom_actions(), 1);

        tb.host_mut().chain.insert(0, Ancestor::new("a", false));
        let completer = tb.host_mut().completers.pop().unwrap();
        completer.complete(CustomOutcome::Applied);
        let report = tb.tick(Instant::now());
        assert_eq!(report.completed.len(), 1);
        assert!(tb.is_active("anchor"));
        assert_eq!(tb.pending_custom_actions(), 0);
    }

    #[test]
    fn test_cancelled_custom_action_still_repaints() {
        let mut tb = toolbar(bold_selection(), &["anchor"]);
        tb.check_selection();
        tb.on_button_activated("anchor").unwrap();
        let checks = tb.selection_checks();
        tb.host_mut()
            .completers
            .pop()
            .unwrap()
            .complete(CustomOutcome::Cancelled);
        let report = tb.tick(Instant::now());
        assert_eq!(report.completed[0].outcome, CustomOutcome::Cancelled);
        assert_eq!(tb.selection_checks(), checks + 1);
    }

    #[test]
    fn test_unregistered_activation_is_an_error() {
        let mut tb = toolbar(bold_selection(), &["bold"]);
        assert_eq!(
            tb.on_button_activated("append-h3").unwrap_err(),
            ToolbarError::UnregisteredAction("append-h3".into())
        );
        assert!(tb.host().natives.is_empty());
    }

    #[test]
    fn test_duplicate_registration_registers_nothing() {
        let mut tb = Toolbar::new(FakeHost::default(), ToolbarSettings::default());
        let bold = builtin("bold").unwrap().unwrap();
        let italic = builtin("italic").unwrap().unwrap();
        assert_eq!(
            tb.register_actions(vec![italic, bold.clone(), bold]),
            Err(ToolbarError::DuplicateAction("bold".into()))
        );
        assert_eq!(tb.build().unwrap_err(), ToolbarError::EmptyRegistry);
    }

    #[test]
    fn test_activation_before_build() {
        let mut tb = Toolbar::new(FakeHost::default(), ToolbarSettings::default());
        tb.register_actions(vec![builtin("bold").unwrap().unwrap()])
            .unwrap();
        assert_eq!(
            tb.on_button_activated("bold").unwrap_err(),
            ToolbarError::NotBuilt
        );
        assert!(tb.buttons().is_empty());
    }

    #[test]
    fn test_teardown_abandons_pending_custom() {
        let mut tb = toolbar(bold_selection(), &["anchor"]);
        tb.on_button_activated("anchor").unwrap();
        let host = tb.teardown();
        assert_eq!(host.customs, vec!["anchor"]);
    }

    // End-to-end scenarios against the in-memory document.

    fn editor(html: &str) -> Toolbar<DocumentHost> {
        let host = DocumentHost::from_html(html).unwrap();
        let mut tb = Toolbar::new(host, ToolbarSettings::default());
        let keys = ["bold", "italic", "underline", "anchor", "header1", "header2", "quote"];
        tb.register_actions(keys.iter().map(|k| builtin(k).unwrap().unwrap()))
            .unwrap();
        tb.build().unwrap();
        tb
    }

    fn select_all_and_settle(tb: &mut Toolbar<DocumentHost>) {
        tb.host_mut().select_all();
        let now = Instant::now();
        tb.selection_changed(now, SelectionCause::Programmatic);
        tb.tick(now);
    }

    #[test]
    fn test_button_active_when_selection_already_bold() {
        let mut tb = editor("<b>lorem ipsum</b>");
        select_all_and_settle(&mut tb);
        assert!(tb.find_button("bold").unwrap().is_active());
        let html = tb.render_html().unwrap();
        assert!(html.contains("toolbar-button-first toolbar-button-active\" data-action=\"bold\""));
    }

    #[test]
    fn test_click_sets_active_class() {
        let mut tb = editor("lorem ipsum");
        select_all_and_settle(&mut tb);
        assert!(!tb.is_active("bold"));
        tb.on_button_activated("bold").unwrap();
        assert!(tb.find_button("bold").unwrap().is_active());
        assert_eq!(tb.host().html(), "<b>lorem ipsum</b>");
    }

    #[test]
    fn test_click_removes_active_class() {
        let mut tb = editor("<b>lorem ipsum</b>");
        select_all_and_settle(&mut tb);
        tb.on_button_activated("bold").unwrap();
        assert!(!tb.find_button("bold").unwrap().is_active());
        assert_eq!(tb.host().html(), "lorem ipsum");
    }

    #[test]
    fn test_native_italic_wraps_selection() {
        let mut tb = editor("lorem ipsum");
        select_all_and_settle(&mut tb);
        tb.on_button_activated("italic").unwrap();
        assert_eq!(tb.host().html(), "<i>lorem ipsum</i>");
    }

    #[test]
    fn test_header_wraps_paragraph_keeping_bold() {
        let mut tb = editor("<p><b>lorem ipsum</b></p>");
        select_all_and_settle(&mut tb);
        let activation = tb.on_button_activated("append-h3").unwrap();
        assert_eq!(
            activation.outcome,
            DispatchOutcome::BlockReplaced {
                from: Some("p".into()),
                to: "h3".into()
            }
        );
        assert_eq!(tb.host().html(), "<h3><b>lorem ipsum</b></h3>");
        assert!(tb.is_active("append-h3"));
        assert!(tb.is_active("bold"));
    }

    #[test]
    fn test_header_toggles_back_to_paragraph() {
        let mut tb = editor("<h3><b>lorem ipsum</b></h3>");
        select_all_and_settle(&mut tb);
        assert!(tb.is_active("append-h3"));
        tb.on_button_activated("append-h3").unwrap();
        assert_eq!(tb.host().html(), "<p><b>lorem ipsum</b></p>");
        assert!(!tb.is_active("append-h3"));
    }

    #[test]
    fn test_header_toggle_over_two_blocks_converts_the_first() {
        let mut tb = editor("<h3>one</h3><h3>two</h3>");
        tb.host_mut().set_selection(Some(TextRange::new(1, 5)));
        let now = Instant::now();
        tb.selection_changed(now, SelectionCause::PointerUp);
        tb.tick(now);

        let first = tb.on_button_activated("append-h3").unwrap();
        assert_eq!(
            first.outcome,
            DispatchOutcome::BlockReplaced {
                from: Some("h3".into()),
                to: "p".into()
            }
        );
        assert_eq!(tb.host().html(), "<p>one</p><h3>two</h3>");

        let second = tb.on_button_activated("append-h3").unwrap();
        assert_eq!(
            second.outcome,
            DispatchOutcome::BlockReplaced {
                from: Some("p".into()),
                to: "h3".into()
            }
        );
        assert_eq!(tb.host().html(), "<h3>one</h3><h3>two</h3>");
    }

    #[test]
    fn test_bold_at_bare_caret_is_applied_not_rejected() {
        let mut tb = editor("<p>lorem</p>");
        tb.host_mut().set_selection(Some(TextRange::caret(2)));
        let now = Instant::now();
        tb.selection_changed(now, SelectionCause::KeyUp);
        tb.tick(now);

        let activation = tb.on_button_activated("bold").unwrap();
        assert_eq!(
            activation.outcome,
            DispatchOutcome::NativeApplied {
                command: "bold".into()
            }
        );
        assert_eq!(tb.host().html(), "<p>lorem</p>");
        assert!(!tb.is_active("bold"));
    }

    #[test]
    fn test_anchor_opens_prompt_without_mutating() {
        let mut tb = editor("<p>lorem ipsum</p>");
        select_all_and_settle(&mut tb);
        let activation = tb.on_button_activated("anchor").unwrap();
        assert!(matches!(
            activation.outcome,
            DispatchOutcome::CustomPending { .. }
        ));
        assert_eq!(tb.host().html(), "<p>lorem ipsum</p>");
        assert_eq!(tb.host().pending_prompts(), 1);

        tb.host_mut().submit_link("https://example.com").unwrap();
        tb.tick(Instant::now());
        assert_eq!(
            tb.host().html(),
            "<p><a href=\"https://example.com\">lorem ipsum</a></p>"
        );
        assert!(tb.is_active("anchor"));
    }

    #[test]
    fn test_dispatch_with_undefined_selection_completes() {
        let mut tb = editor("<p>lorem ipsum</p>");
        select_all_and_settle(&mut tb);
        tb.invalidate_selection();
        let activation = tb.on_button_activated("bold").unwrap();
        assert!(activation.rechecked);
        assert_eq!(tb.host().html(), "<p><b>lorem ipsum</b></p>");
    }
}

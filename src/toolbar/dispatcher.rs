//! Action dispatch: classify an activated action and run its strategy.
//!
//! Every host failure is absorbed here and reported through
//! [`DispatchOutcome`]; none of them propagate to the caller.

use crate::error::HostError;
use crate::toolbar::action::{ActionDescriptor, ActionKind};
use crate::toolbar::selection::{
    CustomCompletion, CustomOutcome, EditorHost, SelectionSnapshot,
};
use tracing::{debug, info, warn};

/// Identifies one in-flight custom action.
pub type Ticket = u64;

/// What a single activation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    NativeApplied {
        command: String,
    },
    /// The host refused, lacked, or failed the command. The document is
    /// unchanged.
    NativeRejected {
        command: String,
        error: Option<HostError>,
    },
    BlockReplaced {
        from: Option<String>,
        to: String,
    },
    /// The block already had the target tag; the host was not called.
    BlockUnchanged {
        block: String,
    },
    /// No selection to take a block from, or the host failed.
    BlockSkipped {
        error: Option<HostError>,
    },
    CustomFinished {
        handler: String,
        outcome: CustomOutcome,
    },
    /// Repaint is deferred until the handler signals.
    CustomPending {
        handler: String,
        ticket: Ticket,
    },
}

impl DispatchOutcome {
    /// Whether the caller should resolve and repaint now.
    pub fn repaints_now(&self) -> bool {
        !matches!(self, DispatchOutcome::CustomPending { .. })
    }
}

/// A custom action that finished after its dispatch returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomFinished {
    pub ticket: Ticket,
    pub action: String,
    pub outcome: CustomOutcome,
}

struct PendingCustom {
    ticket: Ticket,
    action: String,
    completion: CustomCompletion,
}

/// Runs activations against a host and tracks pending custom actions.
///
/// Pending custom actions are independent of each other and of later
/// activations: nothing here cancels one.
pub struct Dispatcher {
    default_block: String,
    pending: Vec<PendingCustom>,
    next_ticket: Ticket,
}

impl Dispatcher {
    pub fn new(default_block: impl Into<String>) -> Self {
        Self {
            default_block: default_block.into().to_ascii_lowercase(),
            pending: Vec::new(),
            next_ticket: 0,
        }
    }

    pub fn default_block(&self) -> &str {
        &self.default_block
    }

    /// Execute exactly one action.
    pub fn dispatch<H>(
        &mut self,
        host: &mut H,
        action: &ActionDescriptor,
        snapshot: Option<&SelectionSnapshot>,
    ) -> DispatchOutcome
    where
        H: EditorHost + ?Sized,
    {
        debug!(action = action.name(), kind = action.kind().label(), "dispatching");
        match action.kind() {
            ActionKind::Native { command } => run_native(host, command),
            ActionKind::BlockToggle { block } => self.run_block_toggle(host, block, snapshot),
            ActionKind::Custom { handler } => self.run_custom(host, action.name(), handler, snapshot),
        }
    }

    fn run_block_toggle<H>(
        &self,
        host: &mut H,
        block: &str,
        snapshot: Option<&SelectionSnapshot>,
    ) -> DispatchOutcome
    where
        H: EditorHost + ?Sized,
    {
        let Some(snapshot) = snapshot else {
            debug!(block, "block toggle without a selection");
            return DispatchOutcome::BlockSkipped { error: None };
        };
        let target = block_target(snapshot, block, &self.default_block);
        let from = snapshot.replacement_block().map(|a| a.tag.clone());
        if from.as_deref() == Some(target.as_str()) {
            debug!(block = %target, "block already has the target tag");
            return DispatchOutcome::BlockUnchanged { block: target };
        }
        match host.replace_block(snapshot, &target) {
            Ok(()) => DispatchOutcome::BlockReplaced { from, to: target },
            Err(e) => {
                warn!(block, error = %e, "block replacement failed");
                DispatchOutcome::BlockSkipped { error: Some(e) }
            }
        }
    }

    fn run_custom<H>(
        &mut self,
        host: &mut H,
        action: &str,
        handler: &str,
        snapshot: Option<&SelectionSnapshot>,
    ) -> DispatchOutcome
    where
        H: EditorHost + ?Sized,
    {
        let mut completion = match host.invoke_custom_handler(handler, snapshot) {
            Ok(completion) => completion,
            Err(e) => {
                warn!(handler, error = %e, "custom handler failed to start");
                return DispatchOutcome::CustomFinished {
                    handler: handler.to_string(),
                    outcome: CustomOutcome::Failed(e.to_string()),
                };
            }
        };
        if let Some(outcome) = completion.try_finish() {
            debug!(handler, ?outcome, "custom action finished immediately");
            return DispatchOutcome::CustomFinished {
                handler: handler.to_string(),
                outcome,
            };
        }
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        info!(handler, ticket, "custom action pending");
        self.pending.push(PendingCustom {
            ticket,
            action: action.to_string(),
            completion,
        });
        DispatchOutcome::CustomPending {
            handler: handler.to_string(),
            ticket,
        }
    }

    /// Collect every pending custom action that has signalled, in the order
    /// they were started.
    pub fn poll_completions(&mut self) -> Vec<CustomFinished> {
        let mut finished = Vec::new();
        self.pending.retain_mut(|p| match p.completion.try_finish() {
            Some(outcome) => {
                if let CustomOutcome::Failed(reason) = &outcome {
                    warn!(action = %p.action, ticket = p.ticket, %reason, "custom action failed");
                } else {
                    debug!(action = %p.action, ticket = p.ticket, ?outcome, "custom action completed");
                }
                finished.push(CustomFinished {
                    ticket: p.ticket,
                    action: p.action.clone(),
                    outcome,
                });
                false
            }
            None => true,
        });
        finished
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn pending_tickets(&self) -> Vec<Ticket> {
        self.pending.iter().map(|p| p.ticket).collect()
    }

    /// Forget every pending custom action. Used at teardown.
    pub fn abandon_all(&mut self) -> usize {
        let n = self.pending.len();
        if n > 0 {
            info!(count = n, "abandoning pending custom actions");
        }
        self.pending.clear();
        n
    }
}

fn run_native<H>(host: &mut H, command: &str) -> DispatchOutcome
where
    H: EditorHost + ?Sized,
{
    match host.exec_native_command(command) {
        Ok(true) => DispatchOutcome::NativeApplied {
            command: command.to_string(),
        },
        Ok(false) => {
            warn!(command, "native command not supported by host");
            DispatchOutcome::NativeRejected {
                command: command.to_string(),
                error: None,
            }
        }
        Err(e) => {
            warn!(command, error = %e, "native command failed");
            DispatchOutcome::NativeRejected {
                command: command.to_string(),
                error: Some(e),
            }
        }
    }
}

/// The block a toggle should produce: the default block when the block
/// being replaced already is `requested`, otherwise `requested`.
pub fn block_target(snapshot: &SelectionSnapshot, requested: &str, default_block: &str) -> String {
    match snapshot.replacement_block() {
        Some(block) if block.tag.eq_ignore_ascii_case(requested) => default_block.to_string(),
        _ => requested.to_ascii_lowercase(),
    }
}

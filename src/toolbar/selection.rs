//! Selection snapshots and the collaborator seams the engine is built over.
//!
//! The engine never touches a document directly. Everything it needs from the
//! host goes through [`SelectionSource`], [`CommandExecutor`] and
//! [`CustomActionHandler`], so tests can substitute fakes.

use crate::error::HostError;
use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;

/// A host-defined character range over the editable text flow.
///
/// `anchor` is where the selection started and `focus` where it ends; either
/// may come first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextRange {
    pub anchor: usize,
    pub focus: usize,
}

impl TextRange {
    pub fn new(anchor: usize, focus: usize) -> Self {
        Self { anchor, focus }
    }

    pub fn caret(at: usize) -> Self {
        Self::new(at, at)
    }

    pub fn start(&self) -> usize {
        self.anchor.min(self.focus)
    }

    pub fn end(&self) -> usize {
        self.anchor.max(self.focus)
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }
}

/// One element on the path from the selection up to the editable root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ancestor {
    /// Lowercase tag name.
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    /// Whether the host treats this element as block-level.
    pub block: bool,
}

impl Ancestor {
    pub fn new(tag: &str, block: bool) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attributes: Vec::new(),
            block,
        }
    }

    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes
            .push((name.to_ascii_lowercase(), value.to_string()));
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Point-in-time read of the selection: the range plus every element that
/// structurally contains all of it, nearest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSnapshot {
    pub range: TextRange,
    pub ancestors: Vec<Ancestor>,
    /// The block [`CommandExecutor::replace_block`] would convert. For a
    /// range spanning blocks this is the one holding the start, which no
    /// entry of `ancestors` describes.
    pub target_block: Option<Ancestor>,
}

impl SelectionSnapshot {
    pub fn new(range: TextRange, ancestors: Vec<Ancestor>) -> Self {
        Self {
            range,
            ancestors,
            target_block: None,
        }
    }

    pub fn with_target_block(mut self, block: Option<Ancestor>) -> Self {
        self.target_block = block;
        self
    }

    pub fn is_collapsed(&self) -> bool {
        self.range.is_collapsed()
    }

    pub fn nearest_block(&self) -> Option<&Ancestor> {
        self.ancestors.iter().find(|a| a.block)
    }

    /// The block a replacement applies to: the host's answer when it gave
    /// one, otherwise the nearest block ancestor.
    pub fn replacement_block(&self) -> Option<&Ancestor> {
        self.target_block.as_ref().or_else(|| self.nearest_block())
    }
}

/// Read access to the host's selection.
pub trait SelectionSource {
    /// The current range, or `None` when nothing inside the editable region
    /// is selected.
    fn current_range(&self) -> Result<Option<TextRange>, HostError>;

    /// Elements containing the whole of `range`, nearest first, stopping
    /// before the editable root.
    fn ancestor_chain(&self, range: &TextRange) -> Result<Vec<Ancestor>, HostError>;

    /// The block `replace_block` would convert for `range`. Hosts that pick
    /// the same block as the nearest entry of the ancestor chain can leave
    /// this as `None`.
    fn replacement_block(&self, _range: &TextRange) -> Result<Option<Ancestor>, HostError> {
        Ok(None)
    }
}

/// Document mutations the dispatcher may request.
pub trait CommandExecutor {
    /// Run a native formatting command. `Ok(true)` means the host handled
    /// it, even when there was nothing to change. `Ok(false)` means the host
    /// rejected or does not know it; the document must then be unchanged.
    fn exec_native_command(&mut self, command: &str) -> Result<bool, HostError>;

    /// Convert the block around `snapshot` into `block`, keeping inline
    /// children.
    fn replace_block(&mut self, snapshot: &SelectionSnapshot, block: &str)
        -> Result<(), HostError>;
}

/// Named handlers for actions executed outside the engine.
pub trait CustomActionHandler {
    fn invoke_custom_handler(
        &mut self,
        name: &str,
        snapshot: Option<&SelectionSnapshot>,
    ) -> Result<CustomCompletion, HostError>;
}

/// Everything a toolbar needs from its host.
pub trait EditorHost: SelectionSource + CommandExecutor + CustomActionHandler {}

impl<T> EditorHost for T where T: SelectionSource + CommandExecutor + CustomActionHandler {}

/// Read the host selection into a snapshot.
pub fn take_snapshot<S>(source: &S) -> Result<Option<SelectionSnapshot>, HostError>
where
    S: SelectionSource + ?Sized,
{
    let Some(range) = source.current_range()? else {
        return Ok(None);
    };
    let ancestors = source.ancestor_chain(&range)?;
    let target = source.replacement_block(&range)?;
    Ok(Some(
        SelectionSnapshot::new(range, ancestors).with_target_block(target),
    ))
}

/// How a custom action ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomOutcome {
    Applied,
    Cancelled,
    Failed(String),
}

#[derive(Debug)]
enum CompletionState {
    Ready(CustomOutcome),
    Pending(oneshot::Receiver<CustomOutcome>),
}

/// Completion signal returned by a custom handler.
///
/// Either already finished, or pending until the paired [`CustomCompleter`]
/// fires. Dropping the completer without firing counts as a failure.
#[derive(Debug)]
pub struct CustomCompletion(CompletionState);

impl CustomCompletion {
    pub fn ready(outcome: CustomOutcome) -> Self {
        Self(CompletionState::Ready(outcome))
    }

    pub fn channel() -> (CustomCompleter, Self) {
        let (tx, rx) = oneshot::channel();
        (CustomCompleter(tx), Self(CompletionState::Pending(rx)))
    }

    /// Non-blocking poll. `None` while still pending.
    pub fn try_finish(&mut self) -> Option<CustomOutcome> {
        match &mut self.0 {
            CompletionState::Ready(outcome) => Some(outcome.clone()),
            CompletionState::Pending(rx) => match rx.try_recv() {
                Ok(outcome) => Some(outcome),
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Closed) => {
                    Some(CustomOutcome::Failed("handler dropped its completer".into()))
                }
            },
        }
    }
}

/// Sending half of a pending [`CustomCompletion`].
#[derive(Debug)]
pub struct CustomCompleter(oneshot::Sender<CustomOutcome>);

impl CustomCompleter {
    pub fn complete(self, outcome: CustomOutcome) {
        // The toolbar may already have been torn down.
        let _ = self.0.send(outcome);
    }
}

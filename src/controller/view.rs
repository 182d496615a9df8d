//! Presentation surface driven by the controller.

use crate::core::{DisplayState, LoadState};

/// Rendering side of a list screen.
///
/// The controller calls at most one `show_*` method per event.
/// `on_status_changed` and `on_error` are only called while
/// [`ListView::is_attached`] returns `true`. A status update signals that load flags changed while content stays
/// visible (footer spinner, retry row, pull-to-refresh indicator).
pub trait ListView {
    /// Whether the presentation surface currently exists.
    fn is_attached(&self) -> bool {
        true
    }

    fn on_status_changed(&mut self, state: &LoadState);

    fn show_progress(&mut self);

    fn show_content(&mut self);

    fn show_empty(&mut self);

    fn show_network_error(&mut self);

    /// User-facing notification for a failed load (toast, snackbar).
    fn on_error(&mut self, _message: &str) {}

    /// Dispatch to the matching `show_*` method.
    fn show(&mut self, display: DisplayState) {
        match display {
            DisplayState::Progress => self.show_progress(),
            DisplayState::Content => self.show_content(),
            DisplayState::Empty => self.show_empty(),
            DisplayState::NetworkError => self.show_network_error(),
        }
    }
}

/// One call received by a [`RecordingView`].
#[derive(Clone, Debug, PartialEq)]
pub enum ViewCall {
    Status(LoadState),
    Show(DisplayState),
    Error(String),
}

/// Headless view that records every call it receives.
///
/// Useful for tests and for driving a controller without a UI.
#[derive(Clone, Debug)]
pub struct RecordingView {
    calls: Vec<ViewCall>,
    attached: bool,
}

impl Default for RecordingView {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingView {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            attached: true,
        }
    }

    pub fn detached() -> Self {
        Self {
            calls: Vec::new(),
            attached: false,
        }
    }

    pub fn set_attached(&mut self, attached: bool) {
        self.attached = attached;
    }

    pub fn calls(&self) -> &[ViewCall] {
        &self.calls
    }

    /// Remove and return everything recorded so far.
    pub fn take(&mut self) -> Vec<ViewCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn status_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, ViewCall::Status(_)))
            .count()
    }

    pub fn shown(&self) -> Vec<DisplayState> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                ViewCall::Show(d) => Some(*d),
                _ => None,
            })
            .collect()
    }

    pub fn last_shown(&self) -> Option<DisplayState> {
        self.shown().last().copied()
    }

    pub fn errors(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                ViewCall::Error(m) => Some(m.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl ListView for RecordingView {
    fn is_attached(&self) -> bool {
        self.attached
    }

    fn on_status_changed(&mut self, state: &LoadState) {
        self.calls.push(ViewCall::Status(*state));
    }

    fn show_progress(&mut self) {
        self.calls.push(ViewCall::Show(DisplayState::Progress));
    }

    fn show_content(&mut self) {
        self.calls.push(ViewCall::Show(DisplayState::Content));
    }

    fn show_empty(&mut self) {
        self.calls.push(ViewCall::Show(DisplayState::Empty));
    }

    fn show_network_error(&mut self) {
        self.calls.push(ViewCall::Show(DisplayState::NetworkError));
    }

    fn on_error(&mut self, message: &str) {
        self.calls.push(ViewCall::Error(message.to_string()));
    }
}

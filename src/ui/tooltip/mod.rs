//! Headless hover tooltip for a rendered timestamp.
//!
//! Reducer-style state updates + side-effect commands: pointer and focus
//! events open the overlay, each row copies its value to the clipboard and
//! shows a transient "Copied" caption, and the overlay aligns itself to
//! whichever half of the viewport its trigger sits in.

mod action;
mod command;
mod reducer;
mod runtime;
mod state;


pub use action::TooltipAction;
pub use command::Command;
pub use runtime::{CopyErrorCallback, TooltipRuntime};
pub use state::{Alignment, COPIED_CAPTION, CopyTarget, TooltipRow, TooltipState};

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::{ClipboardError, DomainError, RenderedTimestamp};
use crate::infra::clipboard::ClipboardSink;

pub struct TimestampTooltip {
    state: TooltipState,
    runtime: TooltipRuntime,
}

impl TimestampTooltip {
    pub fn new(rendered: RenderedTimestamp, clipboard: Arc<dyn ClipboardSink>) -> Self {
        Self {
            state: TooltipState::new(rendered),
            runtime: TooltipRuntime::new(clipboard),
        }
    }

    pub fn with_ack_duration(mut self, duration: Duration) -> Self {
        self.state.ack_duration = duration;
        self
    }

    /// Observe clipboard writes the environment rejected.
    pub fn on_copy_error(
        mut self,
        callback: impl Fn(CopyTarget, &ClipboardError) + Send + Sync + 'static,
    ) -> Self {
        self.runtime.set_copy_error_callback(Box::new(callback));
        self
    }

    pub fn state(&self) -> &TooltipState {
        &self.state
    }

    pub fn label(&self) -> &str {
        self.state.label()
    }

    pub fn rows(&self) -> Vec<TooltipRow> {
        self.state.rows()
    }

    pub fn has_pending_ack(&self) -> bool {
        self.runtime.has_pending_ack()
    }

    pub fn dispatch(&mut self, action: TooltipAction) {
        let mut queue = VecDeque::from([action]);
        while let Some(action) = queue.pop_front() {
            for command in reducer::reduce(&mut self.state, action) {
                if let Some(follow_up) = self.runtime.run(command) {
                    queue.push_back(follow_up);
                }
            }
        }
    }

    /// Copy one row and return the text written, or why it was not.
    pub fn copy(&mut self, target: CopyTarget) -> Result<String, DomainError> {
        if self.state.torn_down {
            return Err("tooltip has been torn down".into());
        }
        self.dispatch(TooltipAction::Copy(target));
        if let Some(err) = &self.state.last_copy_error {
            return Err(err.clone().into());
        }
        Ok(self.state.value_for(target))
    }

    /// Apply acknowledgement timers that have fired since the last poll.
    pub fn poll_actions(&mut self) {
        for action in self.runtime.poll_actions() {
            self.dispatch(action);
        }
    }
}

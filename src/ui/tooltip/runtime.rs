use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::action::TooltipAction;
use super::command::Command;
use super::state::CopyTarget;
use crate::domain::ClipboardError;
use crate::infra::clipboard::ClipboardSink;

pub type CopyErrorCallback = Box<dyn Fn(CopyTarget, &ClipboardError) + Send + Sync>;

/// Executes tooltip commands and feeds their outcomes back as actions.
pub struct TooltipRuntime {
    clipboard: Arc<dyn ClipboardSink>,
    on_copy_error: Option<CopyErrorCallback>,
    action_tx: mpsc::UnboundedSender<TooltipAction>,
    action_rx: mpsc::UnboundedReceiver<TooltipAction>,
    pending_ack: Option<CancellationToken>,
    /// Expiry tracked by `poll_actions` when no tokio runtime is available.
    ack_deadline: Option<(u64, Instant)>,
}

impl TooltipRuntime {
    pub fn new(clipboard: Arc<dyn ClipboardSink>) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        Self {
            clipboard,
            on_copy_error: None,
            action_tx,
            action_rx,
            pending_ack: None,
            ack_deadline: None,
        }
    }

    pub fn set_copy_error_callback(&mut self, callback: CopyErrorCallback) {
        self.on_copy_error = Some(callback);
    }

    /// Execute `command`; a synchronous failure comes back as a follow-up action.
    pub fn run(&mut self, command: Command) -> Option<TooltipAction> {
        match command {
            Command::WriteClipboard {
                target,
                text,
                generation,
            } => self.write_clipboard(target, &text, generation),
            Command::ScheduleAckReset { generation, after } => {
                self.schedule_ack_reset(generation, after);
                None
            }
            Command::CancelAckReset => {
                self.cancel_ack_reset();
                None
            }
        }
    }

    /// Drain actions produced by finished timers.
    pub fn poll_actions(&mut self) -> Vec<TooltipAction> {
        let mut actions = Vec::new();
        while let Ok(action) = self.action_rx.try_recv() {
            actions.push(action);
        }
        if let Some((generation, deadline)) = self.ack_deadline
            && Instant::now() >= deadline
        {
            self.ack_deadline = None;
            actions.push(TooltipAction::AckExpired { generation });
        }
        actions
    }

    pub fn has_pending_ack(&self) -> bool {
        self.ack_deadline.is_some()
            || self
                .pending_ack
                .as_ref()
                .is_some_and(|token| !token.is_cancelled())
    }

    fn write_clipboard(
        &mut self,
        target: CopyTarget,
        text: &str,
        generation: u64,
    ) -> Option<TooltipAction> {
        let error = self.clipboard.write_text(text).err()?;

        log::warn!("Failed to copy {} value: {}", target.label(), error);
        if let Some(callback) = &self.on_copy_error {
            callback(target, &error);
        }
        Some(TooltipAction::CopyFailed { generation, error })
    }

    fn schedule_ack_reset(&mut self, generation: u64, after: Duration) {
        self.cancel_ack_reset();

        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(err) => {
                log::debug!("No async runtime ({}); ack expires on the next poll", err);
                self.ack_deadline = Some((generation, Instant::now() + after));
                return;
            }
        };

        let token = CancellationToken::new();
        self.pending_ack = Some(token.clone());
        let action_tx = self.action_tx.clone();
        let fired = token.clone();

        handle.spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(after) => {
                    let _ = action_tx.send(TooltipAction::AckExpired { generation });
                    fired.cancel();
                }
            }
        });
    }

    fn cancel_ack_reset(&mut self) {
        self.ack_deadline = None;
        if let Some(token) = self.pending_ack.take() {
            token.cancel();
        }
    }
}

impl Drop for TooltipRuntime {
    fn drop(&mut self) {
        self.cancel_ack_reset();
    }
}

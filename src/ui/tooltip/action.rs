use crate::domain::{ClipboardError, RenderedTimestamp};

use super::state::CopyTarget;

#[derive(Debug)]
pub enum TooltipAction {
    PointerEnter,
    PointerLeave,
    Focus,
    Blur,
    Copy(CopyTarget),
    CopyFailed {
        generation: u64,
        error: ClipboardError,
    },
    AckExpired {
        generation: u64,
    },
    /// Sent on scroll and resize.
    Reposition {
        trigger_top: f32,
        viewport_height: f32,
    },
    Refresh(RenderedTimestamp),
    Teardown,
}

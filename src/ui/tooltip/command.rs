use std::time::Duration;

use super::state::CopyTarget;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    WriteClipboard {
        target: CopyTarget,
        text: String,
        generation: u64,
    },
    ScheduleAckReset {
        generation: u64,
        after: Duration,
    },
    CancelAckReset,
}

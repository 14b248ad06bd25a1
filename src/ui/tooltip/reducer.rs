use super::action::TooltipAction;
use super::command::Command;
use super::state::{Alignment, TooltipState};

pub fn reduce(state: &mut TooltipState, action: TooltipAction) -> Vec<Command> {
    if state.torn_down {
        log::debug!("tooltip torn down, dropping {:?}", action);
        return Vec::new();
    }

    match action {
        TooltipAction::PointerEnter => {
            state.hovered = true;
            state.open = true;
            Vec::new()
        }
        TooltipAction::PointerLeave => {
            state.hovered = false;
            state.open = state.focused;
            Vec::new()
        }
        TooltipAction::Focus => {
            state.focused = true;
            state.open = true;
            Vec::new()
        }
        TooltipAction::Blur => {
            state.focused = false;
            state.open = state.hovered;
            Vec::new()
        }
        TooltipAction::Copy(target) => {
            state.ack_generation += 1;
            state.copied = Some(target);
            state.last_copy_error = None;
            vec![
                Command::WriteClipboard {
                    target,
                    text: state.value_for(target),
                    generation: state.ack_generation,
                },
                Command::ScheduleAckReset {
                    generation: state.ack_generation,
                    after: state.ack_duration,
                },
            ]
        }
        TooltipAction::CopyFailed { generation, error } => {
            if generation != state.ack_generation {
                return Vec::new();
            }
            state.copied = None;
            state.last_copy_error = Some(error);
            vec![Command::CancelAckReset]
        }
        TooltipAction::AckExpired { generation } => {
            // A newer copy restarted the window.
            if generation == state.ack_generation {
                state.copied = None;
            }
            Vec::new()
        }
        TooltipAction::Reposition {
            trigger_top,
            viewport_height,
        } => {
            state.alignment = Alignment::for_trigger(trigger_top, viewport_height);
            Vec::new()
        }
        TooltipAction::Refresh(rendered) => {
            state.rendered = rendered;
            Vec::new()
        }
        TooltipAction::Teardown => {
            state.torn_down = true;
            state.open = false;
            state.copied = None;
            vec![Command::CancelAckReset]
        }
    }
}

use std::time::Duration;

use crate::domain::{ClipboardError, RenderedTimestamp};
use crate::infra::app_config::DEFAULT_COPY_ACK;

/// Caption shown on a row while its copy acknowledgement is live.
pub const COPIED_CAPTION: &str = "Copied";

/// Which rendered form a tooltip row holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CopyTarget {
    Utc,
    Local,
    Relative,
    Raw,
}

impl CopyTarget {
    /// Display order of the overlay rows.
    pub const ALL: [CopyTarget; 4] = [
        CopyTarget::Utc,
        CopyTarget::Local,
        CopyTarget::Relative,
        CopyTarget::Raw,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CopyTarget::Utc => "UTC",
            CopyTarget::Local => "Local",
            CopyTarget::Relative => "Relative",
            CopyTarget::Raw => "Timestamp",
        }
    }
}

/// Horizontal alignment of the overlay against its trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Start,
    End,
}

impl Alignment {
    /// Triggers in the top half of the viewport align to the start,
    /// those in the bottom half to the end.
    pub fn for_trigger(trigger_top: f32, viewport_height: f32) -> Self {
        if trigger_top < viewport_height / 2.0 {
            Alignment::Start
        } else {
            Alignment::End
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TooltipRow {
    pub target: CopyTarget,
    pub label: &'static str,
    pub value: String,
    pub copied: bool,
}

impl TooltipRow {
    pub fn caption(&self) -> &str {
        if self.copied {
            COPIED_CAPTION
        } else {
            self.value.as_str()
        }
    }
}

#[derive(Debug, Clone)]
pub struct TooltipState {
    pub rendered: RenderedTimestamp,
    pub open: bool,
    pub hovered: bool,
    pub focused: bool,
    pub alignment: Alignment,
    pub copied: Option<CopyTarget>,
    /// Bumped on every copy; only the latest generation may clear `copied`.
    pub ack_generation: u64,
    pub ack_duration: Duration,
    pub last_copy_error: Option<ClipboardError>,
    pub torn_down: bool,
}

impl TooltipState {
    pub fn new(rendered: RenderedTimestamp) -> Self {
        Self {
            rendered,
            open: false,
            hovered: false,
            focused: false,
            alignment: Alignment::default(),
            copied: None,
            ack_generation: 0,
            ack_duration: DEFAULT_COPY_ACK,
            last_copy_error: None,
            torn_down: false,
        }
    }

    /// The always-visible label.
    pub fn label(&self) -> &str {
        &self.rendered.local
    }

    pub fn value_for(&self, target: CopyTarget) -> String {
        match target {
            CopyTarget::Utc => self.rendered.utc.clone(),
            CopyTarget::Local => self.rendered.local_with_zone(),
            CopyTarget::Relative => self.rendered.relative.clone(),
            CopyTarget::Raw => self.rendered.raw.clone(),
        }
    }

    pub fn rows(&self) -> Vec<TooltipRow> {
        CopyTarget::ALL
            .iter()
            .map(|target| TooltipRow {
                target: *target,
                label: target.label(),
                value: self.value_for(*target),
                copied: self.copied == Some(*target),
            })
            .collect()
    }
}

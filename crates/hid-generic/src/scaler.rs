//! Wheel event scaling on the input path.
//!
//! Each wheel or pan report becomes one frame: the high-resolution event,
//! then the legacy detent event, then a sync. Consumers that understand
//! high-resolution scrolling rely on the refinement arriving in the same frame
//! as the detent it refines.

#![deny(static_mut_refs)]

use crate::multiplier::MultiplierState;
use crate::sink::{InputSink, Resolution, WheelAxis};

/// Whether an input usage was consumed by the wheel path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventDisposition {
    Handled,
    Ignored,
}

/// Emit the events for one input field change.
pub fn scale_event(
    state: &MultiplierState,
    usage: u32,
    value: i32,
    sink: &mut dyn InputSink,
) -> EventDisposition {
    let Some(axis) = WheelAxis::from_usage(usage) else {
        return EventDisposition::Ignored;
    };

    sink.emit_relative(axis, Resolution::High, hi_res_value(value, state.multiplier(axis)));
    sink.emit_relative(axis, Resolution::Low, value);
    sink.sync_frame();
    EventDisposition::Handled
}

/// `value * multiplier`, saturating at the `i32` range.
pub fn hi_res_value(value: i32, multiplier: u32) -> i32 {
    let multiplier = i32::try_from(multiplier).unwrap_or(i32::MAX);
    value.saturating_mul(multiplier)
}

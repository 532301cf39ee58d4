//! Capability declaration for the input sink.

#![deny(static_mut_refs)]

use crate::multiplier::MultiplierState;
use crate::sink::{InputSink, Resolution, WheelAxis};
use hid_report_model::usages::{CP_AC_PAN, GD_WHEEL, rel};

/// Usages this driver takes over from the generic input mapping, with the
/// relative axis each maps to.
pub const GRABBED_USAGES: [(u32, u16); 2] = [
    (GD_WHEEL, rel::REL_WHEEL),
    (CP_AC_PAN, rel::REL_HWHEEL),
];

/// Declare the wheel capabilities. High resolution is only declared for an
/// axis whose multiplier is above 1.
///
/// Must run after discovery and before the first event is scaled.
pub fn advertise_capabilities(state: &MultiplierState, sink: &mut dyn InputSink) {
    for axis in [WheelAxis::Vertical, WheelAxis::Horizontal] {
        sink.declare_capability(axis, Resolution::Low);
        if state.multiplier(axis) > 1 {
            sink.declare_capability(axis, Resolution::High);
        }
    }
}

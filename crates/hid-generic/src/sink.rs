//! Output side: the input-event sink the driver reports scroll motion to.

#![deny(static_mut_refs)]

use hid_report_model::usages::{CP_AC_PAN, GD_WHEEL, rel};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Scroll axis tracked by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WheelAxis {
    /// Primary wheel.
    Vertical,
    /// AC Pan.
    Horizontal,
}

/// Resolution class of a relative event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resolution {
    /// One unit per physical detent.
    Low,
    /// Detents pre-multiplied by the resolution multiplier.
    High,
}

impl WheelAxis {
    /// Axis driven by a usage, if any.
    pub fn from_usage(usage: u32) -> Option<Self> {
        match usage {
            GD_WHEEL => Some(WheelAxis::Vertical),
            CP_AC_PAN => Some(WheelAxis::Horizontal),
            _ => None,
        }
    }

    /// Usage that drives this axis.
    pub fn usage(self) -> u32 {
        match self {
            WheelAxis::Vertical => GD_WHEEL,
            WheelAxis::Horizontal => CP_AC_PAN,
        }
    }

    /// Relative-axis event code for this axis at the given resolution.
    pub fn rel_code(self, resolution: Resolution) -> u16 {
        match (self, resolution) {
            (WheelAxis::Vertical, Resolution::Low) => rel::REL_WHEEL,
            (WheelAxis::Vertical, Resolution::High) => rel::REL_WHEEL_HI_RES,
            (WheelAxis::Horizontal, Resolution::Low) => rel::REL_HWHEEL,
            (WheelAxis::Horizontal, Resolution::High) => rel::REL_HWHEEL_HI_RES,
        }
    }
}

/// Consumer of relative-motion events, e.g. an evdev/uinput device.
pub trait InputSink {
    fn declare_capability(&mut self, axis: WheelAxis, resolution: Resolution);

    fn emit_relative(&mut self, axis: WheelAxis, resolution: Resolution, value: i32);

    /// Close the current event frame.
    fn sync_frame(&mut self);
}

/// One call made on an [`InputSink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SinkEvent {
    Capability(WheelAxis, Resolution),
    Relative(WheelAxis, Resolution, i32),
    Sync,
}

impl fmt::Display for SinkEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkEvent::Capability(axis, resolution) => {
                write!(f, "EV_REL {}", rel_name(axis.rel_code(*resolution)))
            }
            SinkEvent::Relative(axis, resolution, value) => {
                write!(f, "{} {}", rel_name(axis.rel_code(*resolution)), value)
            }
            SinkEvent::Sync => f.write_str("SYN_REPORT"),
        }
    }
}

fn rel_name(code: u16) -> &'static str {
    match code {
        rel::REL_HWHEEL => "REL_HWHEEL",
        rel::REL_WHEEL => "REL_WHEEL",
        rel::REL_WHEEL_HI_RES => "REL_WHEEL_HI_RES",
        rel::REL_HWHEEL_HI_RES => "REL_HWHEEL_HI_RES",
        _ => "REL_UNKNOWN",
    }
}

/// Sinks that just collect events.
impl InputSink for Vec<SinkEvent> {
    fn declare_capability(&mut self, axis: WheelAxis, resolution: Resolution) {
        self.push(SinkEvent::Capability(axis, resolution));
    }

    fn emit_relative(&mut self, axis: WheelAxis, resolution: Resolution, value: i32) {
        self.push(SinkEvent::Relative(axis, resolution, value));
    }

    fn sync_frame(&mut self) {
        self.push(SinkEvent::Sync);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_from_usage() {
        assert_eq!(WheelAxis::from_usage(GD_WHEEL), Some(WheelAxis::Vertical));
        assert_eq!(WheelAxis::from_usage(CP_AC_PAN), Some(WheelAxis::Horizontal));
        assert_eq!(WheelAxis::from_usage(0x0001_0030), None);
    }

    #[test]
    fn test_axis_usage_round_trip() {
        for axis in [WheelAxis::Vertical, WheelAxis::Horizontal] {
            assert_eq!(WheelAxis::from_usage(axis.usage()), Some(axis));
        }
    }

    #[test]
    fn test_rel_codes() {
        assert_eq!(WheelAxis::Vertical.rel_code(Resolution::Low), 0x08);
        assert_eq!(WheelAxis::Vertical.rel_code(Resolution::High), 0x0b);
        assert_eq!(WheelAxis::Horizontal.rel_code(Resolution::Low), 0x06);
        assert_eq!(WheelAxis::Horizontal.rel_code(Resolution::High), 0x0c);
    }

    #[test]
    fn test_event_display() {
        assert_eq!(
            SinkEvent::Relative(WheelAxis::Horizontal, Resolution::High, -30).to_string(),
            "REL_HWHEEL_HI_RES -30"
        );
        assert_eq!(
            SinkEvent::Capability(WheelAxis::Vertical, Resolution::Low).to_string(),
            "EV_REL REL_WHEEL"
        );
        assert_eq!(SinkEvent::Sync.to_string(), "SYN_REPORT");
    }

    #[test]
    fn test_vec_sink_records_in_order() {
        let mut events: Vec<SinkEvent> = Vec::new();
        events.declare_capability(WheelAxis::Vertical, Resolution::High);
        events.emit_relative(WheelAxis::Vertical, Resolution::Low, -1);
        events.sync_frame();

        assert_eq!(
            events,
            vec![
                SinkEvent::Capability(WheelAxis::Vertical, Resolution::High),
                SinkEvent::Relative(WheelAxis::Vertical, Resolution::Low, -1),
                SinkEvent::Sync,
            ]
        );
    }
}

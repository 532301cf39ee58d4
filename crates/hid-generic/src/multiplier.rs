//! Resolution-multiplier discovery.
//!
//! A wheel that supports high-resolution scrolling exposes a Resolution
//! Multiplier control in a feature report. The control's logical maximum is
//! the number of high-resolution units per physical detent, so a multiplier
//! declared as `0..8` means "8 units per notch" once it is set to 8.
//!
//! # Pairing
//!
//! Vendors do not enumerate multipliers in a fixed order, so position in the
//! feature report says nothing about which wheel a multiplier scales. A
//! multiplier applies to a wheel when the wheel's input usage is declared in
//! the same collection. A single multiplier can scale both the wheel and the
//! pan axis when both live in its collection.
//!
//! # Slots
//!
//! At most two multipliers are tracked, one per axis. The `(report id, field
//! index)` location of each is remembered so the device can be reprogrammed
//! after a resume without walking the descriptor again. A third multiplier
//! paired with a tracked axis is a firmware defect: scaling is disabled for
//! both axes and the device falls back to plain detents.

#![deny(static_mut_refs)]

use crate::collection::usage_in_collection;
use crate::sink::WheelAxis;
use hid_report_model::usages::{CP_AC_PAN, GD_RESOLUTION_MULTIPLIER, GD_WHEEL};
use hid_report_model::{Field, ReportDescriptor, ReportKind};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};

/// Number of independently programmable multipliers tracked per device.
pub const MULTIPLIER_SLOTS: usize = 2;

/// Location of a multiplier control inside the feature reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MultiplierSlot {
    pub report_id: u8,
    pub field_index: usize,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultiplierError {
    #[error(
        "Invalid Resolution Multipliers: feature report {report_id} field {field_index} is a third multiplier paired with a wheel"
    )]
    TooManyMultipliers { report_id: u8, field_index: usize },
}

/// Per-device multiplier state produced at attach time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiplierState {
    wheel_multiplier: u32,
    hwheel_multiplier: u32,
    slots: [Option<MultiplierSlot>; MULTIPLIER_SLOTS],
    #[serde(skip)]
    anomaly: Option<MultiplierError>,
}

impl Default for MultiplierState {
    fn default() -> Self {
        Self {
            wheel_multiplier: 1,
            hwheel_multiplier: 1,
            slots: [None; MULTIPLIER_SLOTS],
            anomaly: None,
        }
    }
}

impl MultiplierState {
    /// Unit multipliers, no slots.
    pub fn new() -> Self {
        Self::default()
    }

    /// Walk every feature report and allocate the multipliers it declares.
    pub fn discover(descriptor: &ReportDescriptor) -> Self {
        let mut state = Self::new();

        for report in descriptor.reports(ReportKind::Feature) {
            for field in report
                .fields
                .iter()
                .filter(|f| f.is_usage(GD_RESOLUTION_MULTIPLIER))
            {
                if let Err(e) = state.allocate(descriptor, report.id, field) {
                    error!("{}", e);
                    state.anomaly = Some(e);
                }
            }
        }

        debug!(
            "Resolution multipliers: wheel={} hwheel={} slots={:?}",
            state.wheel_multiplier, state.hwheel_multiplier, state.slots
        );
        state
    }

    fn allocate(
        &mut self,
        descriptor: &ReportDescriptor,
        report_id: u8,
        field: &Field,
    ) -> Result<(), MultiplierError> {
        let multiplier = scale_factor(field);
        let collection = field.usage.collection_index;

        let w = usage_in_collection(descriptor, GD_WHEEL, collection);
        let h = usage_in_collection(descriptor, CP_AC_PAN, collection);

        if !w && !h {
            debug!(
                "Ignoring multiplier in feature report {} field {}: collection {} has no wheel",
                report_id, field.index, collection
            );
            return Ok(());
        }
        if w {
            self.wheel_multiplier = multiplier;
        }
        if h {
            self.hwheel_multiplier = multiplier;
        }

        let Some(slot) = self.slots.iter_mut().find(|s| s.is_none()) else {
            self.wheel_multiplier = 1;
            self.hwheel_multiplier = 1;
            return Err(MultiplierError::TooManyMultipliers {
                report_id,
                field_index: field.index,
            });
        };

        *slot = Some(MultiplierSlot {
            report_id,
            field_index: field.index,
        });
        Ok(())
    }

    pub fn wheel_multiplier(&self) -> u32 {
        self.wheel_multiplier
    }

    pub fn hwheel_multiplier(&self) -> u32 {
        self.hwheel_multiplier
    }

    pub fn multiplier(&self, axis: WheelAxis) -> u32 {
        match axis {
            WheelAxis::Vertical => self.wheel_multiplier,
            WheelAxis::Horizontal => self.hwheel_multiplier,
        }
    }

    pub fn slots(&self) -> &[Option<MultiplierSlot>; MULTIPLIER_SLOTS] {
        &self.slots
    }

    /// Filled slots, in allocation order. Slots fill from index 0 upwards, so
    /// the first empty slot ends the sequence.
    pub fn active_slots(&self) -> impl Iterator<Item = MultiplierSlot> + '_ {
        self.slots.iter().map_while(|s| *s)
    }

    /// True when neither axis is scaled and there is nothing to program.
    pub fn is_trivial(&self) -> bool {
        self.wheel_multiplier == 1 && self.hwheel_multiplier == 1
    }

    /// The allocation anomaly seen during discovery, if any.
    pub fn anomaly(&self) -> Option<MultiplierError> {
        self.anomaly
    }
}

/// Units per detent declared by a multiplier control.
fn scale_factor(field: &Field) -> u32 {
    u32::try_from(field.logical_maximum)
        .ok()
        .filter(|m| *m > 0)
        .unwrap_or(1)
}

//! Programming discovered multipliers into the device.
//!
//! Every filled slot has its field set to the field's logical maximum and the
//! owning feature report is written back. This is the highest resolution the
//! device offers, matching what other hosts do with these controls. The
//! in-memory [`MultiplierState`] is never modified here, so a resume can
//! re-run activation as often as needed.

#![deny(static_mut_refs)]

use crate::error::{HidGenericError, HidGenericResult};
use crate::multiplier::{MultiplierSlot, MultiplierState};
use crate::transport::FeatureReportTransport;
use hid_report_model::{ReportDescriptor, ReportKind};
use tracing::{debug, warn};

/// Result of one activation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActivationOutcome {
    /// Feature reports written successfully.
    pub written: usize,
    /// Slots that could not be programmed.
    pub failed: usize,
}

impl ActivationOutcome {
    pub fn is_complete(&self) -> bool {
        self.failed == 0
    }
}

/// Program every active slot. Failures are logged and counted, never fatal.
pub fn activate<T>(
    state: &MultiplierState,
    descriptor: &mut ReportDescriptor,
    transport: &mut T,
) -> ActivationOutcome
where
    T: FeatureReportTransport + ?Sized,
{
    let mut outcome = ActivationOutcome::default();

    if state.is_trivial() {
        debug!("No resolution multiplier to activate");
        return outcome;
    }

    for slot in state.active_slots() {
        match program_slot(slot, descriptor, transport) {
            Ok(()) => outcome.written = outcome.written.saturating_add(1),
            Err(e) => {
                warn!(
                    "Failed to set resolution multiplier (report {}, field {}): {}",
                    slot.report_id, slot.field_index, e
                );
                outcome.failed = outcome.failed.saturating_add(1);
            }
        }
    }

    outcome
}

fn program_slot<T>(
    slot: MultiplierSlot,
    descriptor: &mut ReportDescriptor,
    transport: &mut T,
) -> HidGenericResult<()>
where
    T: FeatureReportTransport + ?Sized,
{
    let missing = || HidGenericError::SlotTargetMissing {
        report_id: slot.report_id,
        field_index: slot.field_index,
    };
    let report = descriptor
        .report_mut(ReportKind::Feature, slot.report_id)
        .ok_or_else(missing)?;
    let field = report.field_mut(slot.field_index).ok_or_else(missing)?;

    let maximum = field.logical_maximum;
    field.set_value(maximum);
    transport.send_feature_report(report)?;
    Ok(())
}

//! Driver error type.

#![deny(static_mut_refs)]

use crate::multiplier::MultiplierError;
use crate::transport::TransportError;
use hid_report_model::DescriptorError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HidGenericError {
    #[error("Failed to parse report descriptor: {0}")]
    Descriptor(#[from] DescriptorError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("{0}")]
    Multiplier(#[from] MultiplierError),

    #[error("Multiplier slot points at missing feature report {report_id} field {field_index}")]
    SlotTargetMissing { report_id: u8, field_index: usize },
}

pub type HidGenericResult<T> = Result<T, HidGenericError>;

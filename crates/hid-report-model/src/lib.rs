//! Decoded HID report descriptor model.
//!
//! This crate is intentionally I/O-free. It describes the already-parsed
//! shape of a device's reports (reports, fields, usages and the collection
//! each usage belongs to) so that drivers can reason about a descriptor
//! without touching the bus-specific parser that produced it.

#![deny(static_mut_refs)]
#![deny(clippy::unwrap_used)]

pub mod descriptor;
pub mod usages;

pub use descriptor::{
    DescriptorError, DescriptorResult, DescriptorSource, Field, Report, ReportDescriptor,
    ReportKind, Usage,
};
pub use usages::{make_usage, usage_id, usage_page};

//! Collection membership queries over the input reports.

#![deny(static_mut_refs)]

use hid_report_model::{ReportDescriptor, ReportKind};

/// Whether `usage` is declared in collection `collection` by any input report.
///
/// Only input reports are scanned: a multiplier belongs to a wheel when the
/// wheel's input usage shares its collection index.
pub fn usage_in_collection(descriptor: &ReportDescriptor, usage: u32, collection: u32) -> bool {
    descriptor
        .reports(ReportKind::Input)
        .iter()
        .flat_map(|report| report.fields.iter())
        .any(|field| field.usage.hid == usage && field.usage.collection_index == collection)
}

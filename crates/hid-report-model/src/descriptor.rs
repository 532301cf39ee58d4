//! Reports, fields and usages of a decoded report descriptor.
//!
//! Each [`Field`] carries exactly one [`Usage`]. A usage records the
//! collection it was declared in, which is how related controls (a wheel and
//! the multiplier scaling it) are paired.

#![deny(static_mut_refs)]

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Direction class of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportKind {
    /// Device to host telemetry.
    Input,
    /// Host to device data.
    Output,
    /// Configuration, readable and writable by the host.
    Feature,
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReportKind::Input => "input",
            ReportKind::Output => "output",
            ReportKind::Feature => "feature",
        };
        f.write_str(name)
    }
}

/// Errors raised while producing a [`ReportDescriptor`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DescriptorError {
    #[error("Report descriptor is empty")]
    Empty,

    #[error("Malformed report descriptor at byte {offset}: {reason}")]
    Malformed { offset: usize, reason: String },

    #[error("Duplicate {kind} report id {id}")]
    DuplicateReportId { kind: ReportKind, id: u8 },
}

pub type DescriptorResult<T> = Result<T, DescriptorError>;

/// Semantic tag attached to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Usage {
    /// Extended usage, `(page << 16) | id`.
    pub hid: u32,
    /// Index of the collection the usage was declared in.
    pub collection_index: u32,
    /// Position of this usage's value inside the owning field.
    pub usage_index: usize,
}

impl Usage {
    pub fn new(hid: u32, collection_index: u32) -> Self {
        Self {
            hid,
            collection_index,
            usage_index: 0,
        }
    }

    pub fn with_usage_index(mut self, usage_index: usize) -> Self {
        self.usage_index = usage_index;
        self
    }
}

/// One control within a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Position of the field within its report.
    pub index: usize,
    pub logical_minimum: i32,
    pub logical_maximum: i32,
    /// Current values, addressed by `usage.usage_index`.
    pub values: Vec<i32>,
    pub usage: Usage,
}

impl Field {
    pub fn new(index: usize, usage: Usage, logical_minimum: i32, logical_maximum: i32) -> Self {
        Self {
            index,
            logical_minimum,
            logical_maximum,
            values: vec![0; usage.usage_index.saturating_add(1)],
            usage,
        }
    }

    /// Current value of the field's usage, if value storage exists for it.
    pub fn value(&self) -> Option<i32> {
        self.values.get(self.usage.usage_index).copied()
    }

    /// Set the value of the field's usage, growing storage when needed.
    pub fn set_value(&mut self, value: i32) {
        let slot = self.usage.usage_index;
        if self.values.len() <= slot {
            self.values.resize(slot.saturating_add(1), 0);
        }
        if let Some(v) = self.values.get_mut(slot) {
            *v = value;
        }
    }

    pub fn is_usage(&self, hid: u32) -> bool {
        self.usage.hid == hid
    }
}

/// An addressable unit of device I/O.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub id: u8,
    pub kind: ReportKind,
    pub fields: Vec<Field>,
}

impl Report {
    pub fn new(id: u8, kind: ReportKind) -> Self {
        Self {
            id,
            kind,
            fields: Vec::new(),
        }
    }

    pub fn input(id: u8) -> Self {
        Self::new(id, ReportKind::Input)
    }

    pub fn feature(id: u8) -> Self {
        Self::new(id, ReportKind::Feature)
    }

    /// Append a field; its index is its position in the report.
    pub fn with_field(mut self, usage: Usage, logical_minimum: i32, logical_maximum: i32) -> Self {
        let index = self.fields.len();
        self.fields
            .push(Field::new(index, usage, logical_minimum, logical_maximum));
        self
    }

    /// Field with the given declared index. A decoder may list fields in any
    /// order, so this is not a position lookup.
    pub fn field(&self, index: usize) -> Option<&Field> {
        self.fields.iter().find(|f| f.index == index)
    }

    pub fn field_mut(&mut self, index: usize) -> Option<&mut Field> {
        self.fields.iter_mut().find(|f| f.index == index)
    }
}

/// The decoded descriptor of one device, partitioned by report kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportDescriptor {
    input: Vec<Report>,
    output: Vec<Report>,
    feature: Vec<Report>,
}

impl ReportDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder for hand-written descriptors. Unlike [`insert`](Self::insert),
    /// a report with the same kind and id replaces the earlier one; decoders
    /// go through `insert` so duplicates surface as errors.
    pub fn with_report(mut self, report: Report) -> Self {
        let list = self.list_mut(report.kind);
        match list.iter_mut().find(|r| r.id == report.id) {
            Some(existing) => *existing = report,
            None => list.push(report),
        }
        self
    }

    /// Add a report, rejecting a second report of the same kind and id.
    pub fn insert(&mut self, report: Report) -> DescriptorResult<()> {
        if self.report(report.kind, report.id).is_some() {
            return Err(DescriptorError::DuplicateReportId {
                kind: report.kind,
                id: report.id,
            });
        }
        self.list_mut(report.kind).push(report);
        Ok(())
    }

    /// Reports of the given kind, in declaration order.
    pub fn reports(&self, kind: ReportKind) -> &[Report] {
        match kind {
            ReportKind::Input => &self.input,
            ReportKind::Output => &self.output,
            ReportKind::Feature => &self.feature,
        }
    }

    pub fn report(&self, kind: ReportKind, id: u8) -> Option<&Report> {
        self.reports(kind).iter().find(|r| r.id == id)
    }

    pub fn report_mut(&mut self, kind: ReportKind, id: u8) -> Option<&mut Report> {
        self.list_mut(kind).iter_mut().find(|r| r.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.input.is_empty() && self.output.is_empty() && self.feature.is_empty()
    }

    fn list_mut(&mut self, kind: ReportKind) -> &mut Vec<Report> {
        match kind {
            ReportKind::Input => &mut self.input,
            ReportKind::Output => &mut self.output,
            ReportKind::Feature => &mut self.feature,
        }
    }
}

/// Producer of a decoded descriptor, typically the bus-specific parser.
///
/// Implementations must reject a second report of the same kind and id with
/// [`DescriptorError::DuplicateReportId`], which [`ReportDescriptor::insert`]
/// does for them. Field indices must be unique within a report; their order
/// in [`Report::fields`] is free.
pub trait DescriptorSource {
    fn parse(&self) -> DescriptorResult<ReportDescriptor>;
}

/// An already-decoded descriptor parses to itself.
impl DescriptorSource for ReportDescriptor {
    fn parse(&self) -> DescriptorResult<ReportDescriptor> {
        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usages::{CP_AC_PAN, GD_RESOLUTION_MULTIPLIER, GD_WHEEL};

    #[test]
    fn test_field_indices_follow_declaration_order() {
        let report = Report::input(1)
            .with_field(Usage::new(GD_WHEEL, 1), -127, 127)
            .with_field(Usage::new(CP_AC_PAN, 1), -127, 127);

        assert_eq!(report.field(0).map(|f| f.index), Some(0));
        assert_eq!(report.field(1).map(|f| f.index), Some(1));
        assert!(report.field(2).is_none());
    }

    #[test]
    fn test_field_lookup_uses_declared_index() {
        let mut report = Report::feature(4);
        report.fields = vec![
            Field::new(1, Usage::new(GD_RESOLUTION_MULTIPLIER, 3), 0, 8),
            Field::new(0, Usage::new(GD_WHEEL, 3), 0, 1),
        ];

        assert_eq!(report.field(1).map(|f| f.usage.hid), Some(GD_RESOLUTION_MULTIPLIER));
        assert_eq!(report.field(0).map(|f| f.usage.hid), Some(GD_WHEEL));

        if let Some(field) = report.field_mut(1) {
            field.set_value(8);
        }
        assert_eq!(report.fields.first().and_then(Field::value), Some(8));
        assert_eq!(report.fields.get(1).and_then(Field::value), Some(0));
        assert!(report.field(2).is_none());
    }

    #[test]
    fn test_field_value_uses_usage_index() {
        let usage = Usage::new(GD_RESOLUTION_MULTIPLIER, 2).with_usage_index(2);
        let mut field = Field::new(0, usage, 0, 15);
        assert_eq!(field.values.len(), 3);
        assert_eq!(field.value(), Some(0));

        field.set_value(15);
        assert_eq!(field.value(), Some(15));
        assert_eq!(field.values, vec![0, 0, 15]);
    }

    #[test]
    fn test_set_value_grows_empty_storage() {
        let mut field = Field::new(0, Usage::new(GD_WHEEL, 0).with_usage_index(1), -1, 1);
        field.values.clear();
        assert_eq!(field.value(), None);

        field.set_value(-1);
        assert_eq!(field.value(), Some(-1));
    }

    #[test]
    fn test_descriptor_partitions_by_kind() {
        let desc = ReportDescriptor::new()
            .with_report(Report::input(2))
            .with_report(Report::feature(2))
            .with_report(Report::new(3, ReportKind::Output));

        assert_eq!(desc.reports(ReportKind::Input).len(), 1);
        assert_eq!(desc.reports(ReportKind::Feature).len(), 1);
        assert_eq!(desc.reports(ReportKind::Output).len(), 1);
        assert!(desc.report(ReportKind::Feature, 3).is_none());
        assert!(!desc.is_empty());
    }

    #[test]
    fn test_with_report_replaces_same_id() {
        let desc = ReportDescriptor::new()
            .with_report(Report::feature(4))
            .with_report(Report::feature(4).with_field(Usage::new(GD_WHEEL, 0), 0, 1));

        assert_eq!(desc.reports(ReportKind::Feature).len(), 1);
        assert_eq!(
            desc.report(ReportKind::Feature, 4).map(|r| r.fields.len()),
            Some(1)
        );
    }

    #[test]
    fn test_insert_rejects_duplicate() {
        let mut desc = ReportDescriptor::new();
        assert!(desc.insert(Report::feature(9)).is_ok());
        assert_eq!(
            desc.insert(Report::feature(9)),
            Err(DescriptorError::DuplicateReportId {
                kind: ReportKind::Feature,
                id: 9
            })
        );
        assert!(desc.insert(Report::input(9)).is_ok());
    }

    #[test]
    fn test_error_display() {
        let err = DescriptorError::DuplicateReportId {
            kind: ReportKind::Feature,
            id: 7,
        };
        assert_eq!(format!("{}", err), "Duplicate feature report id 7");
        assert_eq!(
            DescriptorError::Empty.to_string(),
            "Report descriptor is empty"
        );
    }

    #[test]
    fn test_decoded_descriptor_is_its_own_source() -> Result<(), DescriptorError> {
        let desc = ReportDescriptor::new().with_report(Report::input(1));
        assert_eq!(desc.parse()?, desc);
        Ok(())
    }
}

//! Outbound feature-report transport.

#![deny(static_mut_refs)]

use hid_report_model::Report;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Device disconnected")]
    Disconnected,

    #[error("Feature report {report_id} timed out after {timeout_ms}ms")]
    Timeout { report_id: u8, timeout_ms: u64 },

    #[error("Feature report {report_id} rejected: {reason}")]
    Rejected { report_id: u8, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TransportError {
    pub fn rejected(report_id: u8, reason: impl Into<String>) -> Self {
        TransportError::Rejected {
            report_id,
            reason: reason.into(),
        }
    }
}

/// Issues "set feature report" requests to the device.
///
/// Implementations may block. The driver only calls this while attaching or
/// resuming, never from the input event path.
pub trait FeatureReportTransport: Send {
    fn send_feature_report(&mut self, report: &Report) -> Result<(), TransportError>;
}

impl<T: FeatureReportTransport + ?Sized> FeatureReportTransport for Box<T> {
    fn send_feature_report(&mut self, report: &Report) -> Result<(), TransportError> {
        (**self).send_feature_report(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TransportError::Timeout {
            report_id: 5,
            timeout_ms: 250,
        };
        assert_eq!(format!("{}", err), "Feature report 5 timed out after 250ms");

        let err = TransportError::rejected(2, "stall");
        assert_eq!(err.to_string(), "Feature report 2 rejected: stall");

        assert_eq!(TransportError::Disconnected.to_string(), "Device disconnected");
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe");
        let err: TransportError = io.into();
        assert!(matches!(err, TransportError::Io(_)));
    }
}

//! Test doubles for the transport collaborator.

#![deny(static_mut_refs)]

use crate::transport::{FeatureReportTransport, TransportError};
use hid_report_model::Report;
use std::sync::{Arc, Mutex};

/// Transport that records every feature report it is asked to send.
///
/// Clones share state, so a test can keep a handle after moving the
/// transport into a driver.
#[derive(Debug, Clone)]
pub struct RecordingTransport {
    sent: Arc<Mutex<Vec<Report>>>,
    connected: Arc<Mutex<bool>>,
    failing_reports: Arc<Mutex<Vec<u8>>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            connected: Arc::new(Mutex::new(true)),
            failing_reports: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Snapshot of every report sent so far, in order.
    pub fn sent(&self) -> Vec<Report> {
        let sent = self.sent.lock().unwrap_or_else(|e| e.into_inner());
        sent.clone()
    }

    pub fn sent_report_ids(&self) -> Vec<u8> {
        self.sent().iter().map(|r| r.id).collect()
    }

    pub fn clear(&self) {
        let mut sent = self.sent.lock().unwrap_or_else(|e| e.into_inner());
        sent.clear();
    }

    pub fn disconnect(&self) {
        let mut connected = self.connected.lock().unwrap_or_else(|e| e.into_inner());
        *connected = false;
    }

    pub fn reconnect(&self) {
        let mut connected = self.connected.lock().unwrap_or_else(|e| e.into_inner());
        *connected = true;
    }

    /// Make every write of `report_id` fail with a rejection.
    pub fn fail_report(&self, report_id: u8) {
        let mut failing = self
            .failing_reports
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        failing.push(report_id);
    }
}

impl Default for RecordingTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureReportTransport for RecordingTransport {
    fn send_feature_report(&mut self, report: &Report) -> Result<(), TransportError> {
        let connected = *self.connected.lock().unwrap_or_else(|e| e.into_inner());
        if !connected {
            return Err(TransportError::Disconnected);
        }

        let failing = self
            .failing_reports
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        if failing.contains(&report.id) {
            return Err(TransportError::rejected(report.id, "injected failure"));
        }

        let mut sent = self.sent.lock().unwrap_or_else(|e| e.into_inner());
        sent.push(report.clone());
        Ok(())
    }
}

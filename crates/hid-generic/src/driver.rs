//! Per-device driver instance and its lifecycle hooks.

#![deny(static_mut_refs)]

use crate::activation::{ActivationOutcome, activate};
use crate::capabilities::advertise_capabilities;
use crate::config::DriverConfig;
use crate::error::{HidGenericError, HidGenericResult};
use crate::matching::{DeviceIdentity, DeviceQuirks, DriverRegistry, should_bind};
use crate::multiplier::MultiplierState;
use crate::scaler::{EventDisposition, scale_event};
use crate::sink::InputSink;
use crate::transport::FeatureReportTransport;
use hid_report_model::{DescriptorSource, ReportDescriptor};
use tracing::{debug, info};

/// State owned by the driver for one attached device.
///
/// The host serialises attach, resume and detach, and delivers input events
/// only between a successful attach and the next suspend, so no locking is
/// done here.
pub struct HidGenericDevice<T: FeatureReportTransport> {
    transport: T,
    config: DriverConfig,
    quirks: DeviceQuirks,
    descriptor: Option<ReportDescriptor>,
    multipliers: MultiplierState,
}

impl<T: FeatureReportTransport> HidGenericDevice<T> {
    pub fn new(transport: T, config: DriverConfig) -> Self {
        Self {
            transport,
            config,
            quirks: DeviceQuirks::NONE,
            descriptor: None,
            multipliers: MultiplierState::new(),
        }
    }

    pub fn with_quirks(mut self, quirks: DeviceQuirks) -> Self {
        self.quirks = quirks;
        self
    }

    /// Whether this driver should take the device, honouring the configured
    /// special-driver override.
    pub fn should_bind(&self, identity: &DeviceIdentity, registry: &dyn DriverRegistry) -> bool {
        should_bind(
            identity,
            self.quirks,
            registry,
            self.config.ignore_special_driver,
        )
    }

    /// Parse the descriptor, discover multipliers and program the device.
    ///
    /// # Errors
    ///
    /// Returns [`HidGenericError::Descriptor`](crate::HidGenericError::Descriptor)
    /// when the descriptor cannot be parsed. Failing to program a multiplier
    /// is logged and leaves the device at its default resolution.
    pub fn on_attach(&mut self, source: &dyn DescriptorSource) -> HidGenericResult<()> {
        self.quirks.insert(DeviceQuirks::INPUT_PER_APP);

        let mut descriptor = source.parse()?;

        self.multipliers = if self.config.high_resolution {
            MultiplierState::discover(&descriptor)
        } else {
            debug!("High-resolution scrolling disabled by configuration");
            MultiplierState::new()
        };

        let outcome = activate(&self.multipliers, &mut descriptor, &mut self.transport);
        if outcome.written > 0 {
            info!(
                "High-resolution scrolling enabled: wheel x{}, hwheel x{}",
                self.multipliers.wheel_multiplier(),
                self.multipliers.hwheel_multiplier()
            );
        }

        self.descriptor = Some(descriptor);
        Ok(())
    }

    /// Declare capabilities once the host has created the input device.
    pub fn input_configured(&self, sink: &mut dyn InputSink) {
        advertise_capabilities(&self.multipliers, sink);
    }

    /// Handle one input field change.
    pub fn on_event(&self, usage: u32, value: i32, sink: &mut dyn InputSink) -> EventDisposition {
        scale_event(&self.multipliers, usage, value, sink)
    }

    /// Re-program the multipliers after the device lost its settings in a
    /// suspend. Discovery is not repeated.
    pub fn on_resume(&mut self) -> ActivationOutcome {
        match self.descriptor.as_mut() {
            Some(descriptor) => activate(&self.multipliers, descriptor, &mut self.transport),
            None => {
                debug!("Resume before attach, nothing to re-program");
                ActivationOutcome::default()
            }
        }
    }

    pub fn wheel_multiplier(&self) -> u32 {
        self.multipliers.wheel_multiplier()
    }

    pub fn hwheel_multiplier(&self) -> u32 {
        self.multipliers.hwheel_multiplier()
    }

    pub fn state(&self) -> &MultiplierState {
        &self.multipliers
    }

    /// Why high-resolution scrolling was abandoned during discovery, if it was.
    pub fn anomaly(&self) -> Option<HidGenericError> {
        self.multipliers.anomaly().map(HidGenericError::from)
    }

    pub fn descriptor(&self) -> Option<&ReportDescriptor> {
        self.descriptor.as_ref()
    }

    pub fn quirks(&self) -> DeviceQuirks {
        self.quirks
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

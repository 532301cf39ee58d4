//! Fallback HID driver for wheel-equipped pointing devices.
//!
//! Turns wheel and pan input into relative-motion events and, when the device
//! advertises a Resolution Multiplier, programs it to its finest setting and
//! emits high-resolution scroll events alongside the legacy detent events.
//!
//! Descriptor parsing, transport I/O and the event sink are collaborators
//! supplied by the host through [`DescriptorSource`](hid_report_model::DescriptorSource),
//! [`FeatureReportTransport`] and [`InputSink`].

#![deny(static_mut_refs)]
#![deny(clippy::unwrap_used)]

pub mod activation;
pub mod capabilities;
pub mod collection;
pub mod config;
pub mod driver;
pub mod error;
pub mod matching;
pub mod mock;
pub mod multiplier;
pub mod scaler;
pub mod sink;
pub mod transport;

pub use activation::{ActivationOutcome, activate};
pub use capabilities::{GRABBED_USAGES, advertise_capabilities};
pub use collection::usage_in_collection;
pub use config::DriverConfig;
pub use driver::HidGenericDevice;
pub use error::{HidGenericError, HidGenericResult};
pub use matching::{
    DeviceIdMatch, DeviceIdentity, DeviceQuirks, DriverRegistry, FALLBACK_ID_TABLE, should_bind,
};
pub use multiplier::{MULTIPLIER_SLOTS, MultiplierError, MultiplierSlot, MultiplierState};
pub use scaler::{EventDisposition, hi_res_value, scale_event};
pub use sink::{InputSink, Resolution, SinkEvent, WheelAxis};
pub use transport::{FeatureReportTransport, TransportError};

//! Binding policy for the fallback driver.
//!
//! The generic driver matches every HID device but steps aside whenever a
//! specialised driver wants it, unless the host explicitly asks to ignore
//! special drivers.

#![deny(static_mut_refs)]

use serde::{Deserialize, Serialize};
use std::ops::BitOr;

/// Bus type of a HID device, as reported by the transport.
pub mod bus {
    pub const USB: u16 = 0x03;
    pub const BLUETOOTH: u16 = 0x05;
    pub const VIRTUAL: u16 = 0x06;
    pub const I2C: u16 = 0x18;
}

/// Per-device quirk bits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceQuirks(u32);

impl DeviceQuirks {
    pub const NONE: Self = Self(0);
    /// Create one input device per application collection.
    pub const INPUT_PER_APP: Self = Self(1 << 11);
    /// A device-specific driver exists for this device.
    pub const HAVE_SPECIAL_DRIVER: Self = Self(1 << 19);

    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }
}

impl BitOr for DeviceQuirks {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Identity of an attached device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceIdentity {
    pub bus: u16,
    pub vendor_id: u16,
    pub product_id: u16,
}

impl DeviceIdentity {
    pub fn new(bus: u16, vendor_id: u16, product_id: u16) -> Self {
        Self {
            bus,
            vendor_id,
            product_id,
        }
    }
}

/// Entry of a driver's id table. `None` matches anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceIdMatch {
    pub bus: Option<u16>,
    pub vendor_id: Option<u16>,
    pub product_id: Option<u16>,
}

impl DeviceIdMatch {
    pub const ANY: Self = Self {
        bus: None,
        vendor_id: None,
        product_id: None,
    };

    pub const fn device(bus: u16, vendor_id: u16, product_id: u16) -> Self {
        Self {
            bus: Some(bus),
            vendor_id: Some(vendor_id),
            product_id: Some(product_id),
        }
    }

    pub fn matches(&self, id: &DeviceIdentity) -> bool {
        self.bus.is_none_or(|b| b == id.bus)
            && self.vendor_id.is_none_or(|v| v == id.vendor_id)
            && self.product_id.is_none_or(|p| p == id.product_id)
    }
}

/// Id table of the fallback driver: every bus, vendor and product.
pub const FALLBACK_ID_TABLE: [DeviceIdMatch; 1] = [DeviceIdMatch::ANY];

/// View of the other registered drivers.
pub trait DriverRegistry {
    /// Whether a driver other than the fallback one matches the device.
    fn other_driver_claims(&self, identity: &DeviceIdentity) -> bool;
}

/// A flat list of the other drivers' id entries.
impl DriverRegistry for Vec<DeviceIdMatch> {
    fn other_driver_claims(&self, identity: &DeviceIdentity) -> bool {
        self.iter().any(|entry| entry.matches(identity))
    }
}

impl<const N: usize> DriverRegistry for [DeviceIdMatch; N] {
    fn other_driver_claims(&self, identity: &DeviceIdentity) -> bool {
        self.iter().any(|entry| entry.matches(identity))
    }
}

/// Decide whether the fallback driver binds to a device.
pub fn should_bind(
    identity: &DeviceIdentity,
    quirks: DeviceQuirks,
    registry: &dyn DriverRegistry,
    ignore_special_driver: bool,
) -> bool {
    if ignore_special_driver {
        return true;
    }

    if quirks.contains(DeviceQuirks::HAVE_SPECIAL_DRIVER) {
        return false;
    }

    !registry.other_driver_claims(identity)
}

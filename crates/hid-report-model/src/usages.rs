//! HID usage ids and relative-axis event codes.
//!
//! Usages are 32-bit values packing the usage page into the high half and the
//! usage id into the low half, matching how report descriptor parsers expose
//! extended usages.

#![deny(static_mut_refs)]

/// Usage pages referenced by the wheel driver.
pub mod pages {
    /// Generic Desktop page.
    pub const GENERIC_DESKTOP: u16 = 0x0001;
    /// Consumer page.
    pub const CONSUMER: u16 = 0x000C;
}

/// Generic Desktop: Wheel (vertical scroll).
pub const GD_WHEEL: u32 = 0x0001_0038;
/// Generic Desktop: Resolution Multiplier.
pub const GD_RESOLUTION_MULTIPLIER: u32 = 0x0001_0048;
/// Consumer: AC Pan (horizontal scroll).
pub const CP_AC_PAN: u32 = 0x000C_0238;

/// Relative-axis codes understood by the input event sink.
pub mod rel {
    /// Horizontal wheel, one unit per detent.
    pub const REL_HWHEEL: u16 = 0x06;
    /// Vertical wheel, one unit per detent.
    pub const REL_WHEEL: u16 = 0x08;
    /// Vertical wheel in high-resolution units.
    pub const REL_WHEEL_HI_RES: u16 = 0x0b;
    /// Horizontal wheel in high-resolution units.
    pub const REL_HWHEEL_HI_RES: u16 = 0x0c;
}

/// Build an extended usage from a page and an id.
pub const fn make_usage(page: u16, id: u16) -> u32 {
    ((page as u32) << 16) | id as u32
}

/// Usage page of an extended usage.
pub const fn usage_page(usage: u32) -> u16 {
    (usage >> 16) as u16
}

/// Usage id (low half) of an extended usage.
pub const fn usage_id(usage: u32) -> u16 {
    (usage & 0xFFFF) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wheel_usages_pack_page_and_id() {
        assert_eq!(make_usage(pages::GENERIC_DESKTOP, 0x38), GD_WHEEL);
        assert_eq!(make_usage(pages::GENERIC_DESKTOP, 0x48), GD_RESOLUTION_MULTIPLIER);
        assert_eq!(make_usage(pages::CONSUMER, 0x0238), CP_AC_PAN);
    }

    #[test]
    fn test_usage_split() {
        assert_eq!(usage_page(CP_AC_PAN), pages::CONSUMER);
        assert_eq!(usage_id(CP_AC_PAN), 0x0238);
        assert_eq!(usage_page(GD_WHEEL), pages::GENERIC_DESKTOP);
        assert_eq!(usage_id(GD_WHEEL), 0x38);
    }

    #[test]
    fn test_rel_codes_are_distinct() {
        let codes = [
            rel::REL_HWHEEL,
            rel::REL_WHEEL,
            rel::REL_WHEEL_HI_RES,
            rel::REL_HWHEEL_HI_RES,
        ];
        for (i, a) in codes.iter().enumerate() {
            for b in codes.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}

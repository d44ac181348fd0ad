//! Logical and physical CEC addressing.

use crate::error::{CecError, CecResult};
use crate::hex::{nibble_char, parse_nibble};
use num_enum::{IntoPrimitive, TryFromPrimitive};
use std::{fmt, str::FromStr};

/// Primary Device Type Operand (prim_devtype), as sent in [ReportPhysicalAddress](crate::Command::ReportPhysicalAddress).
#[derive(Debug, Eq, PartialEq, Hash, TryFromPrimitive, IntoPrimitive, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum DeviceType {
    Tv = 0,
    RecordingDevice = 1,
    Tuner = 3,
    PlaybackDevice = 4,
    AudioSystem = 5,
}

/**
 * The logical addresses defined by CEC 1.4
 *
 * Every value of the 4 bit nibble has a variant, so decoding a nibble never fails.
 * [LogicalAddress::Unregistered] is both the broadcast destination and the
 * address of a device that did not claim one yet.
 */
#[derive(Debug, Eq, PartialEq, Hash, TryFromPrimitive, IntoPrimitive, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum LogicalAddress {
    Tv = 0,
    RecordingDevice1 = 1,
    RecordingDevice2 = 2,
    Tuner1 = 3,
    PlaybackDevice1 = 4,
    AudioSystem = 5,
    Tuner2 = 6,
    Tuner3 = 7,
    PlaybackDevice2 = 8,
    RecordingDevice3 = 9,
    Tuner4 = 10,
    PlaybackDevice3 = 11,
    Reserved1 = 12,
    Reserved2 = 13,
    FreeUse = 14,
    ///as initiator: no address claimed; as destination: broadcast
    Unregistered = 15,
}

/// Role of each logical address, indexed by the address nibble.
const ROLE_TABLE: [Option<DeviceType>; 16] = [
    Some(DeviceType::Tv),
    Some(DeviceType::RecordingDevice),
    Some(DeviceType::RecordingDevice),
    Some(DeviceType::Tuner),
    Some(DeviceType::PlaybackDevice),
    Some(DeviceType::AudioSystem),
    Some(DeviceType::Tuner),
    Some(DeviceType::Tuner),
    Some(DeviceType::PlaybackDevice),
    Some(DeviceType::RecordingDevice),
    Some(DeviceType::Tuner),
    Some(DeviceType::PlaybackDevice),
    None,
    None,
    None,
    None,
];

impl LogicalAddress {
    /// Decode the low nibble of `n`.
    pub fn from_nibble(n: u8) -> Self {
        match Self::try_from(n & 0xf) {
            Ok(addr) => addr,
            // all 16 nibble values have a variant
            Err(_) => Self::Unregistered,
        }
    }
    /// The device role this address is reserved for.
    ///
    /// [Reserved1](Self::Reserved1), [Reserved2](Self::Reserved2),
    /// [FreeUse](Self::FreeUse) and [Unregistered](Self::Unregistered)
    /// belong to no role and yield `None`.
    #[inline]
    pub fn device_type(self) -> Option<DeviceType> {
        ROLE_TABLE[u8::from(self) as usize]
    }
    #[inline]
    pub fn is_broadcast(self) -> bool {
        self == Self::Unregistered
    }
    /// Single uppercase hex digit, as used on the wire.
    pub fn as_char(self) -> char {
        nibble_char(self.into())
    }
}

impl fmt::Display for LogicalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} ({})", self, self.as_char())
    }
}

impl DeviceType {
    /// All logical addresses a device of this type may claim, in claiming order.
    pub fn logical_addresses(self) -> &'static [LogicalAddress] {
        use LogicalAddress as L;
        match self {
            DeviceType::Tv => &[L::Tv],
            DeviceType::RecordingDevice => {
                &[L::RecordingDevice1, L::RecordingDevice2, L::RecordingDevice3]
            }
            DeviceType::Tuner => &[L::Tuner1, L::Tuner2, L::Tuner3, L::Tuner4],
            DeviceType::PlaybackDevice => {
                &[L::PlaybackDevice1, L::PlaybackDevice2, L::PlaybackDevice3]
            }
            DeviceType::AudioSystem => &[L::AudioSystem],
        }
    }
    /// As [DeviceType::logical_addresses] but with `preferred` moved to the front.
    ///
    /// Used to retry a previously claimed address first.
    pub fn logical_addresses_preferring(self, preferred: LogicalAddress) -> Vec<LogicalAddress> {
        let all = self.logical_addresses();
        all.iter()
            .filter(|a| **a == preferred)
            .chain(all.iter().filter(|a| **a != preferred))
            .copied()
            .collect()
    }
}

/// Delimiter between the nibbles of a physical address.
const ADDRESS_DELIMITER: char = '.';

/**
 * Position in the HDMI topology: four nibbles `a.b.c.d`.
 *
 * The CEC root device (usually the TV) has address 0.0.0.0. Every device that is hooked up to an input of the TV has
 * address a.0.0.0 (where ‘a’ is ≥ 1), devices hooked up to those in turn have addresses a.b.0.0, etc.
 * If nothing is connected, then the address is [PhysicalAddress::NONE] (F.F.F.F).
 * ```
 * # use cec_follower::PhysicalAddress;
 * let addr: PhysicalAddress = "2.1.0.0".parse().unwrap();
 * assert_eq!(addr.to_bytes(), [0x21, 0x00]);
 * assert_eq!(addr.to_string(), "2.1.0.0");
 * ```
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PhysicalAddress(u16);

impl PhysicalAddress {
    /// No address assigned
    pub const NONE: PhysicalAddress = PhysicalAddress(0xffff);
    /// The root of the topology
    pub const ROOT: PhysicalAddress = PhysicalAddress(0x0000);

    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }
    pub const fn from_bytes(bytes: [u8; 2]) -> Self {
        Self(u16::from_be_bytes(bytes))
    }
    /// The two bytes sent on the wire
    pub const fn to_bytes(self) -> [u8; 2] {
        self.0.to_be_bytes()
    }
    /// e.g. 0x3300 -> 3.3.0.0
    pub const fn raw(self) -> u16 {
        self.0
    }
    pub const fn is_none(self) -> bool {
        self.0 == Self::NONE.0
    }
    /// The four nibbles, most significant first.
    pub fn nibbles(self) -> [u8; 4] {
        let [hi, lo] = self.to_bytes();
        [hi >> 4, hi & 0xf, lo >> 4, lo & 0xf]
    }
}

impl Default for PhysicalAddress {
    fn default() -> Self {
        Self::NONE
    }
}

impl fmt::Display for PhysicalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.nibbles().map(nibble_char);
        write!(f, "{a}.{b}.{c}.{d}")
    }
}

impl FromStr for PhysicalAddress {
    type Err = CecError;

    /// Accepts exactly `n.n.n.n` with one hex digit per segment.
    ///
    /// Wrong segment count or width is an [InvalidArgument](CecError::InvalidArgument),
    /// a segment that is not a hex digit is [Malformed](CecError::Malformed).
    fn from_str(s: &str) -> CecResult<Self> {
        if s.trim().is_empty() {
            return Err(CecError::MissingInput("physical address"));
        }
        let segments: Vec<&str> = s.split(ADDRESS_DELIMITER).collect();
        if segments.len() != 4 || segments.iter().any(|seg| seg.chars().count() != 1) {
            return Err(CecError::invalid(
                "physical_address",
                format!("expected `n.n.n.n`, got `{s}`"),
            ));
        }
        let mut raw = 0u16;
        for seg in segments {
            // exactly one char, checked above
            let c = seg.chars().next().unwrap_or_default();
            let n = parse_nibble(c)
                .ok_or_else(|| CecError::malformed(s, format!("`{seg}` is not a hex digit")))?;
            raw = raw << 4 | u16::from(n);
        }
        Ok(Self(raw))
    }
}

impl From<[u8; 2]> for PhysicalAddress {
    fn from(bytes: [u8; 2]) -> Self {
        Self::from_bytes(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_format() {
        let addr: PhysicalAddress = "2.1.0.0".parse().unwrap();
        assert_eq!(addr.raw(), 0x2100);
        assert_eq!(addr.to_string(), "2.1.0.0");

        let addr: PhysicalAddress = "a.b.c.d".parse().unwrap();
        assert_eq!(addr.to_string(), "A.B.C.D");
    }

    #[test]
    fn test_none_is_ffff() {
        assert_eq!("F.F.F.F".parse::<PhysicalAddress>().unwrap(), PhysicalAddress::NONE);
        assert!(PhysicalAddress::default().is_none());
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            "G.1.0.0".parse::<PhysicalAddress>(),
            Err(CecError::Malformed { .. })
        ));
        assert!(matches!(
            "2.1.0.10".parse::<PhysicalAddress>(),
            Err(CecError::InvalidArgument { .. })
        ));
        assert!(matches!(
            "2.1.0".parse::<PhysicalAddress>(),
            Err(CecError::InvalidArgument { .. })
        ));
        assert!(matches!(
            "2.1..0.0".parse::<PhysicalAddress>(),
            Err(CecError::InvalidArgument { .. })
        ));
        assert!(matches!(
            "".parse::<PhysicalAddress>(),
            Err(CecError::MissingInput(_))
        ));
    }

    #[test]
    fn test_role_table() {
        assert_eq!(LogicalAddress::Tv.device_type(), Some(DeviceType::Tv));
        assert_eq!(
            LogicalAddress::PlaybackDevice3.device_type(),
            Some(DeviceType::PlaybackDevice)
        );
        assert_eq!(LogicalAddress::Tuner4.device_type(), Some(DeviceType::Tuner));
        for unmapped in [
            LogicalAddress::Reserved1,
            LogicalAddress::Reserved2,
            LogicalAddress::FreeUse,
            LogicalAddress::Unregistered,
        ] {
            assert_eq!(unmapped.device_type(), None, "{unmapped:?}");
        }
    }

    #[test]
    fn test_addresses_map_back_to_their_type() {
        for ty in [
            DeviceType::Tv,
            DeviceType::RecordingDevice,
            DeviceType::Tuner,
            DeviceType::PlaybackDevice,
            DeviceType::AudioSystem,
        ] {
            for addr in ty.logical_addresses() {
                assert_eq!(addr.device_type(), Some(ty));
            }
        }
        assert_eq!(
            DeviceType::PlaybackDevice.logical_addresses(),
            &[
                LogicalAddress::PlaybackDevice1,
                LogicalAddress::PlaybackDevice2,
                LogicalAddress::PlaybackDevice3
            ]
        );
    }

    #[test]
    fn test_preferred_address_first() {
        let order =
            DeviceType::PlaybackDevice.logical_addresses_preferring(LogicalAddress::PlaybackDevice2);
        assert_eq!(
            order,
            vec![
                LogicalAddress::PlaybackDevice2,
                LogicalAddress::PlaybackDevice1,
                LogicalAddress::PlaybackDevice3
            ]
        );
        // foreign addresses leave the order untouched
        let order = DeviceType::Tuner.logical_addresses_preferring(LogicalAddress::Unregistered);
        assert_eq!(order, DeviceType::Tuner.logical_addresses());
    }

    #[test]
    fn test_nibble_decoding() {
        assert_eq!(LogicalAddress::from_nibble(0xb), LogicalAddress::PlaybackDevice3);
        assert_eq!(LogicalAddress::from_nibble(0xf), LogicalAddress::Unregistered);
        assert_eq!(LogicalAddress::FreeUse.as_char(), 'E');
    }
}

//! Declarative construction of a [CecDevice].

use crate::address::{DeviceType, LogicalAddress, PhysicalAddress};
use crate::device::CecDevice;
use crate::error::CecResult;
use crate::language::DEFAULT_LANGUAGE;
use crate::types::VendorId;

/**
 * Everything needed to set up a follower.
 *
 * With the `serde` feature this can be read from any serde format.
 * Missing fields take their [Default] value.
 * ```
 * # use cec_follower::{CecDeviceConfig, DeviceType, LogicalAddress};
 * let dev = CecDeviceConfig {
 *     device_type: DeviceType::PlaybackDevice,
 *     osd_name: "pi4".into(),
 *     physical_address: Some("2.1.0.0".into()),
 *     logical_address: Some(LogicalAddress::PlaybackDevice1),
 *     ..Default::default()
 * }
 * .build()
 * .unwrap();
 * assert_eq!(dev.physical_address().to_string(), "2.1.0.0");
 * ```
 */
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CecDeviceConfig {
    pub device_type: DeviceType,
    pub osd_name: String,
    pub vendor_id: VendorId,
    /// `n.n.n.n`, unassigned if absent
    pub physical_address: Option<String>,
    /// unregistered if absent
    pub logical_address: Option<LogicalAddress>,
    /// ISO 639-2 code
    pub language: Option<String>,
    pub lock_physical_address: bool,
}

impl Default for CecDeviceConfig {
    fn default() -> Self {
        Self {
            device_type: DeviceType::PlaybackDevice,
            osd_name: "cec-follower".to_string(),
            vendor_id: VendorId::default(),
            physical_address: None,
            logical_address: None,
            language: Some(DEFAULT_LANGUAGE.to_string()),
            lock_physical_address: false,
        }
    }
}

impl CecDeviceConfig {
    /// Validate and create the device.
    pub fn build(&self) -> CecResult<CecDevice> {
        let physical_address = match &self.physical_address {
            Some(addr) => addr.parse()?,
            None => PhysicalAddress::NONE,
        };
        let mut dev = CecDevice::with_addresses(
            self.device_type,
            &self.osd_name,
            self.vendor_id,
            physical_address,
            self.logical_address.unwrap_or(LogicalAddress::Unregistered),
        )?;
        if let Some(language) = &self.language {
            dev.set_language(language)?;
        }
        dev.set_lock_physical_address(self.lock_physical_address);
        Ok(dev)
    }
}

//! A CEC follower: device state plus the rules for answering inbound frames.

use crate::address::{DeviceType, LogicalAddress, PhysicalAddress};
use crate::builder;
use crate::edid::EdidMessage;
use crate::error::{CecError, CecResult};
use crate::language::{is_valid_language_code, DEFAULT_LANGUAGE};
use crate::message::CecMessage;
use crate::types::{
    AbortReason, AudioMuteStatus, CecVersion, Command, MenuRequestType, MenuState, OsdStr,
    PowerStatus, SystemAudioStatus, VendorId,
};
use log::{debug, trace, warn};

/// Version reported in reply to [Command::GetCecVersion].
pub const SUPPORTED_CEC_VERSION: CecVersion = CecVersion::V1_4;

/// Answers one inbound frame. `Ok(None)` means nothing is sent back.
type Handler = fn(&mut CecDevice, &CecMessage) -> CecResult<Option<CecMessage>>;

/// Frames sent to this device's logical address.
static DIRECTED: &[(Command, Handler)] = &[
    (Command::GivePhysicalAddress, CecDevice::on_give_physical_address),
    (Command::GiveDeviceVendorId, CecDevice::on_give_device_vendor_id),
    (Command::GiveOsdName, CecDevice::on_give_osd_name),
    (Command::GetCecVersion, CecDevice::on_get_cec_version),
    (Command::GiveDevicePowerStatus, CecDevice::on_give_device_power_status),
    (Command::GetMenuLanguage, CecDevice::on_get_menu_language),
    (Command::MenuRequest, CecDevice::on_menu_request),
    (Command::Standby, CecDevice::on_standby),
    // only relevant for a TV
    (Command::SetOsdString, CecDevice::ignore),
    (Command::SetOsdName, CecDevice::ignore),
    // passed through to the application
    (Command::UserControlPressed, CecDevice::ignore),
    (Command::UserControlReleased, CecDevice::ignore),
    (Command::VendorCommand, CecDevice::ignore),
    (Command::VendorCommandWithId, CecDevice::ignore),
    (Command::VendorRemoteButtonDown, CecDevice::ignore),
    (Command::VendorRemoteButtonUp, CecDevice::ignore),
    // answers from peers
    (Command::FeatureAbort, CecDevice::ignore),
    (Command::ReportPowerStatus, CecDevice::ignore),
    (Command::CecVersion, CecDevice::ignore),
    (Command::DeviceVendorId, CecDevice::ignore),
    (Command::None, CecDevice::ignore),
];

/// Frames sent to [LogicalAddress::Unregistered].
static BROADCAST: &[(Command, Handler)] = &[
    (Command::SetStreamPath, CecDevice::on_set_stream_path),
    (Command::ActiveSource, CecDevice::on_active_source),
    (Command::RoutingChange, CecDevice::on_routing_change),
    (Command::RequestActiveSource, CecDevice::on_request_active_source),
    (Command::SetMenuLanguage, CecDevice::on_set_menu_language),
    (Command::RoutingInformation, CecDevice::on_routing_information),
    (Command::Standby, CecDevice::on_standby),
    // not valid as broadcast
    (Command::GetMenuLanguage, CecDevice::ignore),
    (Command::DeviceVendorId, CecDevice::ignore),
    (Command::ReportPhysicalAddress, CecDevice::ignore),
    (Command::ReportPowerStatus, CecDevice::ignore),
];

fn lookup(table: &[(Command, Handler)], command: Command) -> Option<Handler> {
    table
        .iter()
        .find(|(c, _)| *c == command)
        .map(|(_, handler)| *handler)
}

/**
 * State of a single CEC follower.
 *
 * Feed every frame read from the bus into [CecDevice::process] and transmit
 * whatever it returns.
 * ```
 * # use cec_follower::{CecDevice, CecMessage, DeviceType, LogicalAddress, VendorId};
 * # fn main() -> cec_follower::CecResult<()> {
 * let mut dev = CecDevice::with_addresses(
 *     DeviceType::PlaybackDevice,
 *     "pi4",
 *     VendorId::new(0x0010fa)?,
 *     "2.1.0.0".parse()?,
 *     LogicalAddress::PlaybackDevice1,
 * )?;
 * let reply = dev.process(&"04:83".parse()?)?;
 * assert_eq!(reply.map(|m| m.to_cec()).as_deref(), Some("4F:84:21:00:04"));
 * # Ok(())
 * # }
 * ```
 *
 * The device is not synchronized: a single bus reader should own it.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CecDevice {
    device_type: DeviceType,
    osd_name: OsdStr<14>,
    vendor_id: VendorId,
    logical_address: LogicalAddress,
    physical_address: PhysicalAddress,
    power_status: PowerStatus,
    menu_state: MenuState,
    language: String,
    is_active_source: bool,
    lock_physical_address: bool,
}

impl CecDevice {
    /// A device without addresses. `osd_name` must be 1 to 14 ascii characters.
    pub fn new(device_type: DeviceType, osd_name: &str, vendor_id: VendorId) -> CecResult<Self> {
        Self::with_addresses(
            device_type,
            osd_name,
            vendor_id,
            PhysicalAddress::NONE,
            LogicalAddress::Unregistered,
        )
    }

    /// Fails with [CecError::IllegalState] if `logical_address` belongs to another device type.
    pub fn with_addresses(
        device_type: DeviceType,
        osd_name: &str,
        vendor_id: VendorId,
        physical_address: PhysicalAddress,
        logical_address: LogicalAddress,
    ) -> CecResult<Self> {
        let mut dev = Self {
            device_type,
            osd_name: OsdStr::new("osd_name", osd_name)?,
            vendor_id,
            logical_address: LogicalAddress::Unregistered,
            physical_address,
            power_status: PowerStatus::Standby,
            menu_state: MenuState::Deactivated,
            language: DEFAULT_LANGUAGE.to_string(),
            is_active_source: false,
            lock_physical_address: false,
        };
        dev.set_logical_address(logical_address)?;
        Ok(dev)
    }

    /* Accessors */

    pub fn device_type(&self) -> DeviceType {
        self.device_type
    }
    pub fn osd_name(&self) -> &OsdStr<14> {
        &self.osd_name
    }
    pub fn vendor_id(&self) -> VendorId {
        self.vendor_id
    }
    pub fn logical_address(&self) -> LogicalAddress {
        self.logical_address
    }
    /// [LogicalAddress::Unregistered] is always accepted, [LogicalAddress::FreeUse] only for a TV.
    pub fn set_logical_address(&mut self, addr: LogicalAddress) -> CecResult<()> {
        let allowed = match addr {
            LogicalAddress::Unregistered => true,
            LogicalAddress::FreeUse => self.device_type == DeviceType::Tv,
            _ => addr.device_type() == Some(self.device_type),
        };
        if !allowed {
            return Err(CecError::IllegalState(format!(
                "logical address {addr:?} does not belong to a {:?}",
                self.device_type
            )));
        }
        if addr != self.logical_address {
            debug!("logical address {:?} -> {:?}", self.logical_address, addr);
        }
        self.logical_address = addr;
        Ok(())
    }
    pub fn physical_address(&self) -> PhysicalAddress {
        self.physical_address
    }
    pub fn set_physical_address(&mut self, addr: PhysicalAddress) {
        if addr != self.physical_address {
            debug!("physical address {} -> {}", self.physical_address, addr);
        }
        self.physical_address = addr;
    }
    /// Take the physical address from an EDID block unless the address is locked.
    ///
    /// Returns whether the address was taken.
    pub fn update_physical_address(&mut self, edid: &EdidMessage) -> CecResult<bool> {
        let addr = edid.physical_address()?;
        if self.lock_physical_address {
            debug!("physical address locked, ignoring {addr} from EDID");
            return Ok(false);
        }
        self.set_physical_address(addr);
        Ok(true)
    }
    pub fn lock_physical_address(&self) -> bool {
        self.lock_physical_address
    }
    pub fn set_lock_physical_address(&mut self, lock: bool) {
        self.lock_physical_address = lock;
    }
    pub fn power_status(&self) -> PowerStatus {
        self.power_status
    }
    pub fn set_power_status(&mut self, status: PowerStatus) {
        if status != self.power_status {
            debug!("power status {:?} -> {:?}", self.power_status, status);
        }
        self.power_status = status;
    }
    pub fn menu_state(&self) -> MenuState {
        self.menu_state
    }
    pub fn set_menu_state(&mut self, state: MenuState) {
        if state != self.menu_state {
            debug!("menu state {:?} -> {:?}", self.menu_state, state);
        }
        self.menu_state = state;
    }
    /// ISO 639-2 menu language
    pub fn language(&self) -> &str {
        &self.language
    }
    pub fn set_language(&mut self, language: &str) -> CecResult<()> {
        if !is_valid_language_code(language) {
            return Err(CecError::invalid(
                "language",
                format!("`{language}` is not an ISO 639-2 code"),
            ));
        }
        if language != self.language {
            debug!("menu language {} -> {}", self.language, language);
        }
        self.language = language.to_string();
        Ok(())
    }
    pub fn is_active_source(&self) -> bool {
        self.is_active_source
    }
    fn set_active_source(&mut self, active: bool) {
        if active != self.is_active_source {
            debug!("active source {} -> {}", self.is_active_source, active);
        }
        self.is_active_source = active;
    }

    /// Logical addresses to try when claiming one, the current address first.
    pub fn claim_candidates(&self) -> Vec<LogicalAddress> {
        self.device_type
            .logical_addresses_preferring(self.logical_address)
    }

    /* Inbound */

    /**
     * Answer an inbound frame.
     *
     * Frames to this device and broadcasts are looked up in separate tables.
     * The own address is checked first, so an unregistered device treats
     * everything sent to [LogicalAddress::Unregistered] as directed to it.
     * Opcodes without an entry are refused with a
     * [FeatureAbort](Command::FeatureAbort) to the sender, frames for other
     * devices are ignored.
     *
     * The only error on well formed input is [CecError::NotSupported] for a
     * [RoutingInformation](Command::RoutingInformation) broadcast, since
     * switch behaviour is not implemented.
     */
    pub fn process(&mut self, msg: &CecMessage) -> CecResult<Option<CecMessage>> {
        trace!("<- {}", msg);
        let table = if msg.destination() == self.logical_address {
            DIRECTED
        } else if msg.is_broadcast() {
            BROADCAST
        } else {
            debug!("ignoring frame for {:?}: {}", msg.destination(), msg);
            return Ok(None);
        };
        match lookup(table, msg.command()) {
            Some(handler) => handler(self, msg),
            None => {
                warn!("unrecognized opcode {:?} from {:?}", msg.command(), msg.source());
                Ok(Some(self.feature_abort(
                    msg.source(),
                    msg.command(),
                    AbortReason::UnrecognizedOpcode,
                )))
            }
        }
    }

    fn ignore(&mut self, _msg: &CecMessage) -> CecResult<Option<CecMessage>> {
        Ok(None)
    }

    fn on_give_physical_address(&mut self, _msg: &CecMessage) -> CecResult<Option<CecMessage>> {
        Ok(Some(self.report_physical_address()))
    }

    fn on_give_device_vendor_id(&mut self, _msg: &CecMessage) -> CecResult<Option<CecMessage>> {
        Ok(Some(self.device_vendor_id()))
    }

    fn on_give_osd_name(&mut self, msg: &CecMessage) -> CecResult<Option<CecMessage>> {
        Ok(Some(self.osd_name_to(msg.source())))
    }

    fn on_get_cec_version(&mut self, msg: &CecMessage) -> CecResult<Option<CecMessage>> {
        Ok(Some(self.cec_version_to(msg.source())))
    }

    fn on_give_device_power_status(&mut self, msg: &CecMessage) -> CecResult<Option<CecMessage>> {
        Ok(Some(self.report_power_status_to(msg.source())))
    }

    /// Only the TV (at address 0, or 14 if it is a TV) owns the menu language.
    fn on_get_menu_language(&mut self, msg: &CecMessage) -> CecResult<Option<CecMessage>> {
        let owns_language = self.logical_address == LogicalAddress::Tv
            || (self.logical_address == LogicalAddress::FreeUse
                && self.device_type == DeviceType::Tv);
        if owns_language {
            return builder::set_menu_language(self.logical_address, &self.language).map(Some);
        }
        warn!("{:?} asked for the menu language, refusing", msg.source());
        Ok(Some(self.feature_abort(
            msg.source(),
            Command::GetMenuLanguage,
            AbortReason::UnrecognizedOpcode,
        )))
    }

    fn on_menu_request(&mut self, msg: &CecMessage) -> CecResult<Option<CecMessage>> {
        let request = msg
            .parameter(0)
            .and_then(|b| MenuRequestType::try_from(b).ok());
        match request {
            Some(MenuRequestType::Activate) => self.set_menu_state(MenuState::Activated),
            Some(MenuRequestType::Deactivate) => self.set_menu_state(MenuState::Deactivated),
            Some(MenuRequestType::Query) => {}
            None => {
                warn!("menu request with bad operand: {}", msg);
                return Ok(Some(self.feature_abort(
                    msg.source(),
                    Command::MenuRequest,
                    AbortReason::InvalidOperand,
                )));
            }
        }
        Ok(Some(self.menu_status()))
    }

    fn on_standby(&mut self, _msg: &CecMessage) -> CecResult<Option<CecMessage>> {
        self.set_power_status(PowerStatus::Standby);
        Ok(None)
    }

    fn on_set_stream_path(&mut self, msg: &CecMessage) -> CecResult<Option<CecMessage>> {
        if self.is_own_address(msg, 0) {
            return self.active_source().map(Some);
        }
        self.set_active_source(false);
        Ok(None)
    }

    fn on_active_source(&mut self, msg: &CecMessage) -> CecResult<Option<CecMessage>> {
        let active = self.is_own_address(msg, 0);
        self.set_active_source(active);
        Ok(None)
    }

    /// Operands are the old and the new route, only the new one matters.
    fn on_routing_change(&mut self, msg: &CecMessage) -> CecResult<Option<CecMessage>> {
        let new_route = msg.parameters().map_or(0, <[u8]>::len).saturating_sub(2);
        let active = self.is_own_address(msg, new_route);
        self.set_active_source(active);
        Ok(None)
    }

    fn on_request_active_source(&mut self, _msg: &CecMessage) -> CecResult<Option<CecMessage>> {
        if self.is_active_source {
            return self.active_source().map(Some);
        }
        Ok(None)
    }

    fn on_set_menu_language(&mut self, msg: &CecMessage) -> CecResult<Option<CecMessage>> {
        let language = msg
            .parameters()
            .and_then(|p| std::str::from_utf8(p).ok())
            .filter(|l| is_valid_language_code(l));
        match language {
            Some(language) => self.set_language(language)?,
            None => warn!("ignoring menu language with bad operand: {}", msg),
        }
        Ok(None)
    }

    fn on_routing_information(&mut self, _msg: &CecMessage) -> CecResult<Option<CecMessage>> {
        Err(CecError::NotSupported(
            "switch behaviour (RoutingInformation) is not implemented".to_string(),
        ))
    }

    /// Whether the two operand bytes at `offset` are this device's physical address.
    ///
    /// An unassigned address never matches.
    fn is_own_address(&self, msg: &CecMessage, offset: usize) -> bool {
        if self.physical_address.is_none() {
            return false;
        }
        match (msg.parameter(offset), msg.parameter(offset + 1)) {
            (Some(hi), Some(lo)) => PhysicalAddress::from_bytes([hi, lo]) == self.physical_address,
            _ => {
                warn!("missing physical address operand: {}", msg);
                false
            }
        }
    }

    /* Outbound */

    /// Broadcast the own physical address, F.F.F.F if none is assigned.
    pub fn report_physical_address(&self) -> CecMessage {
        builder::report_physical_address(
            self.logical_address,
            self.device_type,
            self.physical_address,
        )
    }
    pub fn device_vendor_id(&self) -> CecMessage {
        builder::device_vendor_id(self.logical_address, self.vendor_id)
    }
    pub fn osd_name_to(&self, destination: LogicalAddress) -> CecMessage {
        builder::osd_name(self.logical_address, destination, &self.osd_name)
    }
    pub fn cec_version_to(&self, destination: LogicalAddress) -> CecMessage {
        builder::cec_version(self.logical_address, destination, SUPPORTED_CEC_VERSION)
    }
    pub fn report_power_status_to(&self, destination: LogicalAddress) -> CecMessage {
        builder::report_power_status(self.logical_address, destination, self.power_status)
    }
    /// Current menu state, sent to the TV.
    pub fn menu_status(&self) -> CecMessage {
        builder::menu_status(self.logical_address, self.menu_state)
    }
    pub fn feature_abort(
        &self,
        destination: LogicalAddress,
        opcode: Command,
        reason: AbortReason,
    ) -> CecMessage {
        builder::feature_abort(self.logical_address, destination, opcode, reason)
    }
    /// Poll `address` to find out whether it is taken, see [CecDevice::claim_candidates].
    pub fn polling(&self, address: LogicalAddress) -> CecMessage {
        builder::polling(address)
    }
    pub fn report_audio_status(
        &self,
        destination: LogicalAddress,
        mute: AudioMuteStatus,
        volume: u8,
    ) -> CecResult<CecMessage> {
        builder::report_audio_status(self.logical_address, destination, mute, volume)
    }
    pub fn set_system_audio_mode(
        &self,
        destination: LogicalAddress,
        status: SystemAudioStatus,
    ) -> CecMessage {
        builder::set_system_audio_mode(self.logical_address, destination, status)
    }

    /// Become the active source and announce it.
    pub fn active_source(&mut self) -> CecResult<CecMessage> {
        self.require_physical_address()?;
        self.set_active_source(true);
        Ok(builder::active_source(
            self.logical_address,
            self.physical_address,
        ))
    }
    /// Stop being the active source and tell the TV.
    pub fn inactive_source(&mut self) -> CecResult<CecMessage> {
        self.require_physical_address()?;
        self.set_active_source(false);
        Ok(builder::inactive_source(
            self.logical_address,
            self.physical_address,
        ))
    }

    fn require_physical_address(&self) -> CecResult<()> {
        if self.physical_address.is_none() {
            return Err(CecError::IllegalState(
                "no physical address assigned".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use LogicalAddress as L;

    fn playback(pa: &str) -> CecDevice {
        CecDevice::with_addresses(
            DeviceType::PlaybackDevice,
            "pi4",
            VendorId::new(999).unwrap(),
            pa.parse().unwrap(),
            L::PlaybackDevice1,
        )
        .unwrap()
    }

    fn reply(dev: &mut CecDevice, wire: &str) -> Option<String> {
        dev.process(&wire.parse().unwrap())
            .unwrap()
            .map(|m| m.to_cec())
    }

    #[test]
    fn test_defaults() {
        let dev = CecDevice::new(DeviceType::Tuner, "tuner", VendorId::default()).unwrap();
        assert_eq!(dev.logical_address(), L::Unregistered);
        assert!(dev.physical_address().is_none());
        assert_eq!(dev.power_status(), PowerStatus::Standby);
        assert_eq!(dev.menu_state(), MenuState::Deactivated);
        assert_eq!(dev.language(), "eng");
        assert!(!dev.is_active_source());
        assert!(!dev.lock_physical_address());
    }

    #[test]
    fn test_logical_address_must_match_type() {
        let err = CecDevice::with_addresses(
            DeviceType::PlaybackDevice,
            "pi4",
            VendorId::default(),
            PhysicalAddress::NONE,
            L::Tuner3,
        )
        .unwrap_err();
        assert!(matches!(err, CecError::IllegalState(_)));

        let mut dev = playback("2.1.0.0");
        assert!(dev.set_logical_address(L::FreeUse).is_err());
        assert_eq!(dev.logical_address(), L::PlaybackDevice1);
        dev.set_logical_address(L::PlaybackDevice3).unwrap();
        dev.set_logical_address(L::Unregistered).unwrap();
    }

    #[test]
    fn test_osd_name_is_validated() {
        assert!(CecDevice::new(DeviceType::Tv, "", VendorId::default()).is_err());
        assert!(CecDevice::new(DeviceType::Tv, "fifteen chars!!", VendorId::default()).is_err());
    }

    #[test]
    fn test_informational_requests() {
        let mut dev = playback("2.1.0.0");
        assert_eq!(reply(&mut dev, "04:83").as_deref(), Some("4F:84:21:00:04"));
        assert_eq!(reply(&mut dev, "04:8C").as_deref(), Some("4F:87:00:03:E7"));
        assert_eq!(reply(&mut dev, "04:46").as_deref(), Some("40:47:70:69:34"));
        assert_eq!(reply(&mut dev, "54:9F").as_deref(), Some("45:9E:05"));
        assert_eq!(reply(&mut dev, "04:8F").as_deref(), Some("40:90:01"));
        dev.set_power_status(PowerStatus::On);
        assert_eq!(reply(&mut dev, "04:8F").as_deref(), Some("40:90:00"));
    }

    #[test]
    fn test_unassigned_physical_address_is_reported() {
        let mut dev = CecDevice::new(DeviceType::PlaybackDevice, "pi4", VendorId::default()).unwrap();
        dev.set_logical_address(L::PlaybackDevice2).unwrap();
        assert_eq!(reply(&mut dev, "08:83").as_deref(), Some("8F:84:FF:FF:04"));
        assert!(dev.active_source().is_err());
        assert!(dev.inactive_source().is_err());
    }

    #[test]
    fn test_get_menu_language_only_for_tv() {
        let mut dev = playback("2.1.0.0");
        assert_eq!(reply(&mut dev, "04:91").as_deref(), Some("40:00:91:00"));

        let mut tv = CecDevice::with_addresses(
            DeviceType::Tv,
            "tv",
            VendorId::default(),
            PhysicalAddress::ROOT,
            L::Tv,
        )
        .unwrap();
        assert_eq!(reply(&mut tv, "40:91").as_deref(), Some("0F:32:65:6E:67"));

        tv.set_logical_address(L::FreeUse).unwrap();
        assert_eq!(reply(&mut tv, "4E:91").as_deref(), Some("EF:32:65:6E:67"));
    }

    #[test]
    fn test_menu_request() {
        let mut dev = playback("2.1.0.0");
        assert_eq!(reply(&mut dev, "04:8D:00").as_deref(), Some("40:8E:00"));
        assert_eq!(dev.menu_state(), MenuState::Activated);
        assert_eq!(reply(&mut dev, "04:8D:02").as_deref(), Some("40:8E:00"));
        assert_eq!(dev.menu_state(), MenuState::Activated);
        assert_eq!(reply(&mut dev, "04:8D:01").as_deref(), Some("40:8E:01"));
        assert_eq!(dev.menu_state(), MenuState::Deactivated);
        // bad or missing operand
        assert_eq!(reply(&mut dev, "04:8D:07").as_deref(), Some("40:00:8D:03"));
        assert_eq!(reply(&mut dev, "04:8D").as_deref(), Some("40:00:8D:03"));
        assert_eq!(dev.menu_state(), MenuState::Deactivated);
    }

    #[test]
    fn test_standby() {
        let mut dev = playback("2.1.0.0");
        dev.set_power_status(PowerStatus::On);
        assert_eq!(reply(&mut dev, "04:36"), None);
        assert_eq!(dev.power_status(), PowerStatus::Standby);
        dev.set_power_status(PowerStatus::On);
        assert_eq!(reply(&mut dev, "0F:36"), None);
        assert_eq!(dev.power_status(), PowerStatus::Standby);
    }

    #[test]
    fn test_notifications_get_no_reply() {
        let mut dev = playback("2.1.0.0");
        for wire in [
            "04:44:30", "04:45", "04:89:01", "04:A0:00:00:01:01", "04:8A:01", "04:8B",
            "04:64:00:48", "04:47:41", "04:00:91:00", "04:90:00", "04:9E:05", "04:87:00:00:01",
            "04",
        ] {
            assert_eq!(reply(&mut dev, wire), None, "{wire}");
        }
    }

    #[test]
    fn test_unknown_opcodes_are_refused() {
        let mut dev = playback("2.1.0.0");
        assert_eq!(reply(&mut dev, "04:41:24").as_deref(), Some("40:00:41:00"));
        assert_eq!(reply(&mut dev, "0F:41:24").as_deref(), Some("40:00:41:00"));
        assert_eq!(reply(&mut dev, "04:08:01").as_deref(), Some("40:00:08:00"));
    }

    #[test]
    fn test_frames_for_others_are_ignored() {
        let mut dev = playback("2.1.0.0");
        assert_eq!(reply(&mut dev, "08:83"), None);
        assert_eq!(reply(&mut dev, "05:41:24"), None);
    }

    #[test]
    fn test_set_stream_path() {
        let mut dev = playback("2.1.0.0");
        assert_eq!(reply(&mut dev, "0F:86:21:00").as_deref(), Some("4F:82:21:00"));
        assert!(dev.is_active_source());
        assert_eq!(reply(&mut dev, "0F:86:30:00"), None);
        assert!(!dev.is_active_source());
    }

    #[test]
    fn test_active_source_and_request() {
        let mut dev = playback("2.1.0.0");
        assert_eq!(reply(&mut dev, "0F:85"), None);
        assert_eq!(reply(&mut dev, "8F:82:21:00"), None);
        assert!(dev.is_active_source());
        assert_eq!(reply(&mut dev, "0F:85").as_deref(), Some("4F:82:21:00"));
        assert_eq!(reply(&mut dev, "8F:82:30:00"), None);
        assert!(!dev.is_active_source());
        assert_eq!(reply(&mut dev, "0F:85"), None);
    }

    #[test]
    fn test_routing_change_uses_new_route() {
        let mut dev = playback("2.1.0.0");
        assert_eq!(reply(&mut dev, "0F:80:30:00:21:00"), None);
        assert!(dev.is_active_source());
        assert_eq!(reply(&mut dev, "0F:80:21:00:30:00"), None);
        assert!(!dev.is_active_source());
    }

    #[test]
    fn test_unregistered_device_answers_frames_to_f() {
        let mut dev = CecDevice::with_addresses(
            DeviceType::PlaybackDevice,
            "pi4",
            VendorId::default(),
            "2.1.0.0".parse().unwrap(),
            L::Unregistered,
        )
        .unwrap();
        dev.set_power_status(PowerStatus::Standby);
        assert_eq!(reply(&mut dev, "0F:83").as_deref(), Some("FF:84:21:00:04"));
        assert_eq!(reply(&mut dev, "0F:8F").as_deref(), Some("F0:90:01"));
        // no directed handler for SetStreamPath
        assert_eq!(reply(&mut dev, "0F:86:21:00").as_deref(), Some("F0:00:86:00"));
        assert!(!dev.is_active_source());
    }

    #[test]
    fn test_unassigned_address_never_matches() {
        let mut dev = CecDevice::new(DeviceType::PlaybackDevice, "pi4", VendorId::default()).unwrap();
        dev.set_logical_address(L::PlaybackDevice1).unwrap();
        assert_eq!(reply(&mut dev, "0F:86:FF:FF"), None);
        assert!(!dev.is_active_source());
    }

    #[test]
    fn test_set_menu_language() {
        let mut dev = playback("2.1.0.0");
        assert_eq!(reply(&mut dev, "0F:32:64:65:75"), None);
        assert_eq!(dev.language(), "deu");
        assert_eq!(reply(&mut dev, "0F:32:78:79:7A"), None);
        assert_eq!(dev.language(), "deu");
        assert_eq!(reply(&mut dev, "0F:32"), None);
        assert_eq!(dev.language(), "deu");
        // ISO 639-3 only
        assert_eq!(reply(&mut dev, "0F:32:63:6B:62"), None);
        assert_eq!(dev.language(), "ckb");
    }

    #[test]
    fn test_broadcasts_without_reaction() {
        let mut dev = playback("2.1.0.0");
        for wire in ["0F:91", "8F:87:00:00:01", "8F:84:30:00:04", "8F:90:00"] {
            assert_eq!(reply(&mut dev, wire), None, "{wire}");
        }
    }

    #[test]
    fn test_routing_information_is_not_supported() {
        let mut dev = playback("2.1.0.0");
        let msg: CecMessage = "5F:81:21:00".parse().unwrap();
        assert!(matches!(dev.process(&msg), Err(CecError::NotSupported(_))));
    }

    #[test]
    fn test_device_initiated() {
        let mut dev = playback("2.1.0.0");
        assert_eq!(dev.polling(L::PlaybackDevice2).to_cec(), "88");
        assert_eq!(dev.active_source().unwrap().to_cec(), "4F:82:21:00");
        assert!(dev.is_active_source());
        assert_eq!(dev.inactive_source().unwrap().to_cec(), "40:9D:21:00");
        assert!(!dev.is_active_source());
        assert_eq!(
            dev.report_audio_status(L::Tv, AudioMuteStatus::On, 3).unwrap().to_cec(),
            "40:7A:83"
        );
        assert_eq!(
            dev.set_system_audio_mode(L::Tv, SystemAudioStatus::On).to_cec(),
            "40:72:01"
        );
    }

    #[test]
    fn test_claim_candidates() {
        let mut dev = playback("2.1.0.0");
        dev.set_logical_address(L::PlaybackDevice3).unwrap();
        assert_eq!(
            dev.claim_candidates(),
            vec![L::PlaybackDevice3, L::PlaybackDevice1, L::PlaybackDevice2]
        );
    }

    #[test]
    fn test_language_setter() {
        let mut dev = playback("2.1.0.0");
        assert!(dev.set_language("fra").is_ok());
        assert!(matches!(
            dev.set_language("french"),
            Err(CecError::InvalidArgument { name: "language", .. })
        ));
        assert_eq!(dev.language(), "fra");
    }
}

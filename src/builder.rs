/*!
 * One factory per opcode.
 *
 * Every factory is backed by an [OpcodeSpec] in [OPCODE_SPECS] that fixes who may send the
 * opcode, where it goes and how many operand bytes it carries. Decoded frames can be checked
 * against the same table with [OpcodeSpec::validate].
 * ```
 * # use cec_follower::{builder, LogicalAddress, PhysicalAddress};
 * let pa: PhysicalAddress = "2.0.0.0".parse().unwrap();
 * let msg = builder::active_source(LogicalAddress::Unregistered, pa);
 * assert_eq!(msg.to_cec(), "FF:82:20:00");
 * ```
 */

use crate::address::{DeviceType, LogicalAddress, PhysicalAddress};
use crate::error::{CecError, CecResult};
use crate::language::is_valid_language_code;
use crate::message::CecMessage;
use crate::types::{
    AbortReason, AudioMuteStatus, CecVersion, Command, DisplayControl, MenuRequestType, MenuState,
    OsdStr, PowerStatus, SystemAudioStatus, UserControlCode, VendorId,
};

/// Where a message built for an opcode is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// chosen by the caller
    Given,
    /// always this address, [LogicalAddress::Unregistered] for broadcasts
    Fixed(LogicalAddress),
    /// back to the initiator (polling)
    Initiator,
}

/// Number of operand bytes an opcode carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operands {
    Empty,
    Exact(usize),
    /// inclusive
    Between(usize, usize),
}

impl Operands {
    pub fn accepts(self, len: usize) -> bool {
        match self {
            Operands::Empty => len == 0,
            Operands::Exact(n) => len == n,
            Operands::Between(min, max) => (min..=max).contains(&len),
        }
    }
    /// `name` identifies the offending parameter in the error.
    pub fn check(self, name: &'static str, len: usize) -> CecResult<()> {
        if self.accepts(len) {
            return Ok(());
        }
        let expected = match self {
            Operands::Empty => "no bytes".to_string(),
            Operands::Exact(n) => format!("exactly {n} bytes"),
            Operands::Between(min, max) => format!("between {min} and {max} bytes"),
        };
        Err(CecError::invalid(
            name,
            format!("expected {expected}, got {len}"),
        ))
    }
}

/// Routing and operand shape of one opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeSpec {
    pub command: Command,
    /// set when only one address may send this opcode
    pub initiator: Option<LogicalAddress>,
    pub destination: Destination,
    pub operands: Operands,
}

const BROADCAST: Destination = Destination::Fixed(LogicalAddress::Unregistered);
const TO_TV: Destination = Destination::Fixed(LogicalAddress::Tv);

impl OpcodeSpec {
    const fn new(command: Command, destination: Destination, operands: Operands) -> Self {
        Self {
            command,
            initiator: None,
            destination,
            operands,
        }
    }
    const fn directed(command: Command, operands: Operands) -> Self {
        Self::new(command, Destination::Given, operands)
    }
    const fn broadcast(command: Command, operands: Operands) -> Self {
        Self::new(command, BROADCAST, operands)
    }
    const fn from_tv(self) -> Self {
        Self {
            initiator: Some(LogicalAddress::Tv),
            ..self
        }
    }

    /// Resolve initiator and destination for a message of this opcode.
    pub fn route(
        &self,
        source: LogicalAddress,
        destination: LogicalAddress,
    ) -> (LogicalAddress, LogicalAddress) {
        let source = self.initiator.unwrap_or(source);
        let destination = match self.destination {
            Destination::Given => destination,
            Destination::Fixed(addr) => addr,
            Destination::Initiator => source,
        };
        (source, destination)
    }

    /// Check that `msg` is routed and shaped the way this opcode demands.
    pub fn validate(&self, msg: &CecMessage) -> CecResult<()> {
        if msg.command() != self.command {
            return Err(CecError::invalid(
                "command",
                format!("expected {:?}, got {:?}", self.command, msg.command()),
            ));
        }
        if let Some(initiator) = self.initiator {
            if msg.source() != initiator {
                return Err(CecError::invalid(
                    "source",
                    format!("{:?} is only sent by {initiator:?}", self.command),
                ));
            }
        }
        let (_, expected) = self.route(msg.source(), msg.destination());
        if msg.destination() != expected {
            return Err(CecError::invalid(
                "destination",
                format!("{:?} is sent to {expected:?}", self.command),
            ));
        }
        self.operands
            .check("parameters", msg.parameters().map_or(0, <[u8]>::len))
    }

    fn message(
        &self,
        source: LogicalAddress,
        destination: LogicalAddress,
        operands: Vec<u8>,
    ) -> CecMessage {
        debug_assert!(self.operands.accepts(operands.len()), "{:?}", self.command);
        let (source, destination) = self.route(source, destination);
        CecMessage::new(source, destination, self.command, Some(operands))
    }
    /// For opcodes whose destination does not depend on the caller.
    fn routed(&self, source: LogicalAddress, operands: Vec<u8>) -> CecMessage {
        self.message(source, LogicalAddress::Unregistered, operands)
    }
}

use Operands::{Between, Empty, Exact};

const GIVE_PHYSICAL_ADDRESS: OpcodeSpec = OpcodeSpec::directed(Command::GivePhysicalAddress, Empty);
const REPORT_PHYSICAL_ADDRESS: OpcodeSpec =
    OpcodeSpec::broadcast(Command::ReportPhysicalAddress, Exact(3));
const REPORT_AUDIO_STATUS: OpcodeSpec = OpcodeSpec::directed(Command::ReportAudioStatus, Exact(1));
const SET_SYSTEM_AUDIO_MODE: OpcodeSpec =
    OpcodeSpec::directed(Command::SetSystemAudioMode, Exact(1));
const GIVE_AUDIO_STATUS: OpcodeSpec = OpcodeSpec::directed(Command::GiveAudioStatus, Empty);
const DEVICE_VENDOR_ID: OpcodeSpec = OpcodeSpec::broadcast(Command::DeviceVendorId, Exact(3));
const GIVE_DEVICE_VENDOR_ID: OpcodeSpec = OpcodeSpec::directed(Command::GiveDeviceVendorId, Empty);
const SET_OSD_NAME: OpcodeSpec = OpcodeSpec::directed(Command::SetOsdName, Between(1, 14));
const GIVE_OSD_NAME: OpcodeSpec = OpcodeSpec::directed(Command::GiveOsdName, Empty);
const SET_OSD_STRING: OpcodeSpec = OpcodeSpec::new(Command::SetOsdString, TO_TV, Between(2, 14));
const MENU_STATUS: OpcodeSpec = OpcodeSpec::new(Command::MenuStatus, TO_TV, Exact(1));
const MENU_REQUEST: OpcodeSpec = OpcodeSpec::directed(Command::MenuRequest, Exact(1)).from_tv();
const INACTIVE_SOURCE: OpcodeSpec = OpcodeSpec::new(Command::InactiveSource, TO_TV, Exact(2));
const ACTIVE_SOURCE: OpcodeSpec = OpcodeSpec::broadcast(Command::ActiveSource, Exact(2));
const REQUEST_ACTIVE_SOURCE: OpcodeSpec =
    OpcodeSpec::broadcast(Command::RequestActiveSource, Empty);
const SET_STREAM_PATH: OpcodeSpec =
    OpcodeSpec::broadcast(Command::SetStreamPath, Exact(2)).from_tv();
const ROUTING_CHANGE: OpcodeSpec = OpcodeSpec::broadcast(Command::RoutingChange, Exact(4));
const ROUTING_INFORMATION: OpcodeSpec =
    OpcodeSpec::broadcast(Command::RoutingInformation, Exact(2));
const IMAGE_VIEW_ON: OpcodeSpec = OpcodeSpec::new(Command::ImageViewOn, TO_TV, Empty);
const TEXT_VIEW_ON: OpcodeSpec = OpcodeSpec::new(Command::TextViewOn, TO_TV, Empty);
const FEATURE_ABORT: OpcodeSpec = OpcodeSpec::directed(Command::FeatureAbort, Exact(2));
const CEC_VERSION: OpcodeSpec = OpcodeSpec::directed(Command::CecVersion, Exact(1));
const GET_CEC_VERSION: OpcodeSpec = OpcodeSpec::directed(Command::GetCecVersion, Empty);
const REPORT_POWER_STATUS: OpcodeSpec = OpcodeSpec::directed(Command::ReportPowerStatus, Exact(1));
const GIVE_DEVICE_POWER_STATUS: OpcodeSpec =
    OpcodeSpec::directed(Command::GiveDevicePowerStatus, Empty);
const POLLING: OpcodeSpec = OpcodeSpec::new(Command::None, Destination::Initiator, Empty);
const SET_MENU_LANGUAGE: OpcodeSpec = OpcodeSpec::broadcast(Command::SetMenuLanguage, Exact(3));
const GET_MENU_LANGUAGE: OpcodeSpec = OpcodeSpec::directed(Command::GetMenuLanguage, Empty);
const VENDOR_COMMAND: OpcodeSpec = OpcodeSpec::directed(Command::VendorCommand, Between(1, 14));
const VENDOR_COMMAND_WITH_ID: OpcodeSpec =
    OpcodeSpec::directed(Command::VendorCommandWithId, Between(4, 17));
const VENDOR_REMOTE_BUTTON_DOWN: OpcodeSpec =
    OpcodeSpec::directed(Command::VendorRemoteButtonDown, Between(1, 14));
const VENDOR_REMOTE_BUTTON_UP: OpcodeSpec =
    OpcodeSpec::directed(Command::VendorRemoteButtonUp, Empty);
const STANDBY: OpcodeSpec = OpcodeSpec::directed(Command::Standby, Empty);
const USER_CONTROL_PRESSED: OpcodeSpec =
    OpcodeSpec::directed(Command::UserControlPressed, Exact(1));
const USER_CONTROL_RELEASED: OpcodeSpec =
    OpcodeSpec::directed(Command::UserControlReleased, Empty);

/// Every opcode this module can build.
pub static OPCODE_SPECS: &[OpcodeSpec] = &[
    GIVE_PHYSICAL_ADDRESS,
    REPORT_PHYSICAL_ADDRESS,
    REPORT_AUDIO_STATUS,
    SET_SYSTEM_AUDIO_MODE,
    GIVE_AUDIO_STATUS,
    DEVICE_VENDOR_ID,
    GIVE_DEVICE_VENDOR_ID,
    SET_OSD_NAME,
    GIVE_OSD_NAME,
    SET_OSD_STRING,
    MENU_STATUS,
    MENU_REQUEST,
    INACTIVE_SOURCE,
    ACTIVE_SOURCE,
    REQUEST_ACTIVE_SOURCE,
    SET_STREAM_PATH,
    ROUTING_CHANGE,
    ROUTING_INFORMATION,
    IMAGE_VIEW_ON,
    TEXT_VIEW_ON,
    FEATURE_ABORT,
    CEC_VERSION,
    GET_CEC_VERSION,
    REPORT_POWER_STATUS,
    GIVE_DEVICE_POWER_STATUS,
    POLLING,
    SET_MENU_LANGUAGE,
    GET_MENU_LANGUAGE,
    VENDOR_COMMAND,
    VENDOR_COMMAND_WITH_ID,
    VENDOR_REMOTE_BUTTON_DOWN,
    VENDOR_REMOTE_BUTTON_UP,
    STANDBY,
    USER_CONTROL_PRESSED,
    USER_CONTROL_RELEASED,
];

/// Look up the routing and operand shape of `command`.
pub fn opcode_spec(command: Command) -> Option<&'static OpcodeSpec> {
    OPCODE_SPECS.iter().find(|spec| spec.command == command)
}

/* System Information */

pub fn give_physical_address(source: LogicalAddress, destination: LogicalAddress) -> CecMessage {
    GIVE_PHYSICAL_ADDRESS.message(source, destination, vec![])
}

/// Broadcast the mapping of `physical_address` to `source`.
pub fn report_physical_address(
    source: LogicalAddress,
    device_type: DeviceType,
    physical_address: PhysicalAddress,
) -> CecMessage {
    let [hi, lo] = physical_address.to_bytes();
    REPORT_PHYSICAL_ADDRESS.routed(source, vec![hi, lo, device_type.into()])
}

pub fn cec_version(
    source: LogicalAddress,
    destination: LogicalAddress,
    version: CecVersion,
) -> CecMessage {
    CEC_VERSION.message(source, destination, vec![version.into()])
}

pub fn get_cec_version(source: LogicalAddress, destination: LogicalAddress) -> CecMessage {
    GET_CEC_VERSION.message(source, destination, vec![])
}

/// Broadcast the menu language. Only a TV sends this.
///
/// `language` must be a known ISO 639-2 code.
pub fn set_menu_language(source: LogicalAddress, language: &str) -> CecResult<CecMessage> {
    if language.is_empty() {
        return Err(CecError::invalid("language", "must not be empty"));
    }
    if !is_valid_language_code(language) {
        return Err(CecError::invalid(
            "language",
            format!("`{language}` is not an ISO 639-2 code"),
        ));
    }
    Ok(SET_MENU_LANGUAGE.routed(source, language.as_bytes().to_vec()))
}

pub fn get_menu_language(source: LogicalAddress, destination: LogicalAddress) -> CecMessage {
    GET_MENU_LANGUAGE.message(source, destination, vec![])
}

/// Header only frame from `source` to itself.
pub fn polling(source: LogicalAddress) -> CecMessage {
    POLLING.routed(source, vec![])
}

/* General Protocol */

pub fn feature_abort(
    source: LogicalAddress,
    destination: LogicalAddress,
    opcode: Command,
    reason: AbortReason,
) -> CecMessage {
    FEATURE_ABORT.message(source, destination, vec![opcode.into(), reason.into()])
}

/* System Audio Control */

/// `volume` must be within 0..=127.
pub fn report_audio_status(
    source: LogicalAddress,
    destination: LogicalAddress,
    mute: AudioMuteStatus,
    volume: u8,
) -> CecResult<CecMessage> {
    if volume > 0x7f {
        return Err(CecError::invalid(
            "volume",
            format!("must be within 0..=127, got {volume}"),
        ));
    }
    Ok(REPORT_AUDIO_STATUS.message(source, destination, vec![u8::from(mute) | volume]))
}

pub fn set_system_audio_mode(
    source: LogicalAddress,
    destination: LogicalAddress,
    status: SystemAudioStatus,
) -> CecMessage {
    SET_SYSTEM_AUDIO_MODE.message(source, destination, vec![status.into()])
}

pub fn give_audio_status(source: LogicalAddress, destination: LogicalAddress) -> CecMessage {
    GIVE_AUDIO_STATUS.message(source, destination, vec![])
}

/* Vendor Specific Commands */

/// Broadcast the 24 bit vendor id of `source`.
pub fn device_vendor_id(source: LogicalAddress, vendor_id: VendorId) -> CecMessage {
    DEVICE_VENDOR_ID.routed(source, vendor_id.to_bytes().to_vec())
}

pub fn give_device_vendor_id(source: LogicalAddress, destination: LogicalAddress) -> CecMessage {
    GIVE_DEVICE_VENDOR_ID.message(source, destination, vec![])
}

/// `data` must be 1 to 14 bytes.
pub fn vendor_command(
    source: LogicalAddress,
    destination: LogicalAddress,
    data: impl AsRef<[u8]>,
) -> CecResult<CecMessage> {
    let data = data.as_ref();
    VENDOR_COMMAND.operands.check("data", data.len())?;
    Ok(VENDOR_COMMAND.message(source, destination, data.to_vec()))
}

/// `data` must be 1 to 14 bytes, the vendor id is prepended.
pub fn vendor_command_with_id(
    source: LogicalAddress,
    destination: LogicalAddress,
    vendor_id: VendorId,
    data: impl AsRef<[u8]>,
) -> CecResult<CecMessage> {
    let data = data.as_ref();
    VENDOR_PAYLOAD.check("data", data.len())?;
    let mut operands = vendor_id.to_bytes().to_vec();
    operands.extend_from_slice(data);
    Ok(VENDOR_COMMAND_WITH_ID.message(source, destination, operands))
}

const VENDOR_PAYLOAD: Operands = Between(1, 14);

/// `data` is the vendor specific key code, 1 to 14 bytes.
pub fn vendor_remote_button_down(
    source: LogicalAddress,
    destination: LogicalAddress,
    data: impl AsRef<[u8]>,
) -> CecResult<CecMessage> {
    let data = data.as_ref();
    VENDOR_REMOTE_BUTTON_DOWN.operands.check("data", data.len())?;
    Ok(VENDOR_REMOTE_BUTTON_DOWN.message(source, destination, data.to_vec()))
}

pub fn vendor_remote_button_up(source: LogicalAddress, destination: LogicalAddress) -> CecMessage {
    VENDOR_REMOTE_BUTTON_UP.message(source, destination, vec![])
}

/* OSD */

/// `name` must be 1 to 14 ascii characters.
pub fn set_osd_name(
    source: LogicalAddress,
    destination: LogicalAddress,
    name: &str,
) -> CecResult<CecMessage> {
    let name = OsdStr::<14>::new("osd_name", name)?;
    Ok(osd_name(source, destination, &name))
}

/// As [set_osd_name] with an already validated name.
pub fn osd_name(
    source: LogicalAddress,
    destination: LogicalAddress,
    name: &OsdStr<14>,
) -> CecMessage {
    SET_OSD_NAME.message(source, destination, name.as_bytes().to_vec())
}

pub fn give_osd_name(source: LogicalAddress, destination: LogicalAddress) -> CecMessage {
    GIVE_OSD_NAME.message(source, destination, vec![])
}

/// Show `text` (1 to 13 ascii characters) on the TV.
pub fn set_osd_string(
    source: LogicalAddress,
    display: DisplayControl,
    text: &str,
) -> CecResult<CecMessage> {
    let text = OsdStr::<13>::new("osd_string", text)?;
    let mut operands = vec![display.into()];
    operands.extend_from_slice(text.as_bytes());
    Ok(SET_OSD_STRING.routed(source, operands))
}

/* Device Menu Control */

/// Sent to the TV.
pub fn menu_status(source: LogicalAddress, state: MenuState) -> CecMessage {
    MENU_STATUS.routed(source, vec![state.into()])
}

/// Sent by the TV.
pub fn menu_request(destination: LogicalAddress, request: MenuRequestType) -> CecMessage {
    MENU_REQUEST.message(LogicalAddress::Tv, destination, vec![request.into()])
}

/* Remote Control Passthrough */

pub fn user_control_pressed(
    source: LogicalAddress,
    destination: LogicalAddress,
    key: UserControlCode,
) -> CecMessage {
    USER_CONTROL_PRESSED.message(source, destination, vec![key.into()])
}

pub fn user_control_released(source: LogicalAddress, destination: LogicalAddress) -> CecMessage {
    USER_CONTROL_RELEASED.message(source, destination, vec![])
}

/* One Touch Play / Routing Control */

/// Broadcast that `physical_address` is now streaming.
pub fn active_source(source: LogicalAddress, physical_address: PhysicalAddress) -> CecMessage {
    ACTIVE_SOURCE.routed(source, physical_address.to_bytes().to_vec())
}

/// Tell the TV that `physical_address` stopped streaming.
pub fn inactive_source(source: LogicalAddress, physical_address: PhysicalAddress) -> CecMessage {
    INACTIVE_SOURCE.routed(source, physical_address.to_bytes().to_vec())
}

pub fn request_active_source(source: LogicalAddress) -> CecMessage {
    REQUEST_ACTIVE_SOURCE.routed(source, vec![])
}

/// Sent by the TV to select the device at `physical_address`.
pub fn set_stream_path(physical_address: PhysicalAddress) -> CecMessage {
    SET_STREAM_PATH.routed(LogicalAddress::Tv, physical_address.to_bytes().to_vec())
}

pub fn routing_change(
    source: LogicalAddress,
    original: PhysicalAddress,
    new: PhysicalAddress,
) -> CecMessage {
    let mut operands = original.to_bytes().to_vec();
    operands.extend_from_slice(&new.to_bytes());
    ROUTING_CHANGE.routed(source, operands)
}

pub fn routing_information(
    source: LogicalAddress,
    physical_address: PhysicalAddress,
) -> CecMessage {
    ROUTING_INFORMATION.routed(source, physical_address.to_bytes().to_vec())
}

pub fn image_view_on(source: LogicalAddress) -> CecMessage {
    IMAGE_VIEW_ON.routed(source, vec![])
}

pub fn text_view_on(source: LogicalAddress) -> CecMessage {
    TEXT_VIEW_ON.routed(source, vec![])
}

/* Power Status / Standby */

pub fn report_power_status(
    source: LogicalAddress,
    destination: LogicalAddress,
    status: PowerStatus,
) -> CecMessage {
    REPORT_POWER_STATUS.message(source, destination, vec![status.into()])
}

pub fn give_device_power_status(
    source: LogicalAddress,
    destination: LogicalAddress,
) -> CecMessage {
    GIVE_DEVICE_POWER_STATUS.message(source, destination, vec![])
}

/// Use [LogicalAddress::Unregistered] as destination to turn off all devices.
pub fn standby(source: LogicalAddress, destination: LogicalAddress) -> CecMessage {
    STANDBY.message(source, destination, vec![])
}

#[cfg(test)]
mod tests {
    use super::*;
    use LogicalAddress as L;

    fn pa(s: &str) -> PhysicalAddress {
        s.parse().unwrap()
    }

    fn assert_wire(msg: &CecMessage, wire: &str) {
        assert_eq!(msg.to_cec(), wire);
        let spec = opcode_spec(msg.command()).unwrap();
        spec.validate(msg).unwrap();
    }

    #[test]
    fn test_system_information() {
        assert_wire(&give_physical_address(L::Tv, L::PlaybackDevice1), "04:83");
        assert_wire(
            &report_physical_address(L::Tuner3, DeviceType::PlaybackDevice, pa("2.0.0.0")),
            "7F:84:20:00:04",
        );
        assert_wire(
            &report_physical_address(L::PlaybackDevice1, DeviceType::PlaybackDevice, pa("2.1.0.0")),
            "4F:84:21:00:04",
        );
        assert_wire(&cec_version(L::Unregistered, L::Unregistered, CecVersion::V1_3A), "FF:9E:04");
        assert_wire(&get_cec_version(L::Tv, L::AudioSystem), "05:9F");
        assert_wire(&set_menu_language(L::Tv, "heb").unwrap(), "0F:32:68:65:62");
        assert_wire(&get_menu_language(L::Tv, L::Tuner3), "07:91");
        assert_wire(&polling(L::Tuner1), "33");
    }

    #[test]
    fn test_menu_language_is_validated() {
        assert!(matches!(
            set_menu_language(L::Tv, ""),
            Err(CecError::InvalidArgument { name: "language", .. })
        ));
        assert!(matches!(
            set_menu_language(L::Tv, "xyz"),
            Err(CecError::InvalidArgument { name: "language", .. })
        ));
    }

    #[test]
    fn test_audio() {
        assert_wire(
            &report_audio_status(L::Unregistered, L::Unregistered, AudioMuteStatus::Off, 127).unwrap(),
            "FF:7A:7F",
        );
        assert_wire(
            &report_audio_status(L::Unregistered, L::Unregistered, AudioMuteStatus::On, 3).unwrap(),
            "FF:7A:83",
        );
        assert!(matches!(
            report_audio_status(L::AudioSystem, L::Tv, AudioMuteStatus::Off, 128),
            Err(CecError::InvalidArgument { name: "volume", .. })
        ));
        assert_wire(
            &set_system_audio_mode(L::Unregistered, L::Unregistered, SystemAudioStatus::On),
            "FF:72:01",
        );
        assert_wire(&give_audio_status(L::Tv, L::AudioSystem), "05:71");
    }

    #[test]
    fn test_vendor() {
        let id = VendorId::new(999).unwrap();
        assert_wire(&device_vendor_id(L::PlaybackDevice1, id), "4F:87:00:03:E7");
        assert_wire(&give_device_vendor_id(L::Tv, L::PlaybackDevice3), "0B:8C");
        assert_wire(
            &vendor_command(L::Tv, L::PlaybackDevice3, "Hello").unwrap(),
            "0B:89:48:65:6C:6C:6F",
        );
        assert_wire(
            &vendor_command_with_id(L::Tv, L::PlaybackDevice3, id, "Hello").unwrap(),
            "0B:A0:00:03:E7:48:65:6C:6C:6F",
        );
        assert_wire(
            &vendor_remote_button_down(L::Tv, L::PlaybackDevice3, b"Hello").unwrap(),
            "0B:8A:48:65:6C:6C:6F",
        );
        assert_wire(&vendor_remote_button_up(L::Tv, L::PlaybackDevice3), "0B:8B");
    }

    #[test]
    fn test_vendor_payload_limits() {
        let id = VendorId::default();
        for data in [&b""[..], &[0u8; 15][..]] {
            assert!(vendor_command(L::Tv, L::Tuner1, data).is_err());
            assert!(vendor_command_with_id(L::Tv, L::Tuner1, id, data).is_err());
            assert!(vendor_remote_button_down(L::Tv, L::Tuner1, data).is_err());
        }
        assert!(vendor_command(L::Tv, L::Tuner1, [0u8; 14]).is_ok());
        let msg = vendor_command_with_id(L::Tv, L::Tuner1, id, [0u8; 14]).unwrap();
        assert_eq!(msg.parameters().map(<[u8]>::len), Some(17));
    }

    #[test]
    fn test_osd() {
        assert_wire(
            &set_osd_name(L::Tuner3, L::Tv, "MyName").unwrap(),
            "70:47:4D:79:4E:61:6D:65",
        );
        assert!(set_osd_name(L::Tuner3, L::Tv, "").is_err());
        assert!(set_osd_name(L::Tuner3, L::Tv, "a name that is too long").is_err());
        assert_wire(&give_osd_name(L::Tv, L::Tuner3), "07:46");

        let cases = [
            (DisplayControl::Default, "70:64:00:48:65:6C:6C:6F"),
            (DisplayControl::UntilCleared, "70:64:40:48:65:6C:6C:6F"),
            (DisplayControl::Clear, "70:64:80:48:65:6C:6C:6F"),
            (DisplayControl::Reserved, "70:64:C0:48:65:6C:6C:6F"),
        ];
        for (display, wire) in cases {
            assert_wire(&set_osd_string(L::Tuner3, display, "Hello").unwrap(), wire);
        }
        assert!(matches!(
            set_osd_string(L::Tuner3, DisplayControl::Default, "fourteen chars"),
            Err(CecError::InvalidArgument { name: "osd_string", .. })
        ));
    }

    #[test]
    fn test_menus_and_keys() {
        assert_wire(&menu_status(L::PlaybackDevice3, MenuState::Deactivated), "B0:8E:01");
        assert_wire(&menu_request(L::PlaybackDevice3, MenuRequestType::Query), "0B:8D:02");
        assert_wire(
            &user_control_pressed(L::Tv, L::PlaybackDevice3, UserControlCode::RootMenu),
            "0B:44:09",
        );
        assert_wire(&user_control_released(L::Tv, L::PlaybackDevice3), "0B:45");
    }

    #[test]
    fn test_routing() {
        assert_wire(&inactive_source(L::Tuner3, pa("2.0.0.0")), "70:9D:20:00");
        assert_wire(&active_source(L::Unregistered, pa("2.0.0.0")), "FF:82:20:00");
        assert_wire(&request_active_source(L::Tuner3), "7F:85");
        assert_wire(&set_stream_path(pa("2.0.0.0")), "0F:86:20:00");
        assert_wire(
            &routing_change(L::Reserved1, pa("2.0.0.0"), pa("2.1.0.0")),
            "CF:80:20:00:21:00",
        );
        assert_wire(&routing_information(L::Reserved1, pa("2.0.0.0")), "CF:81:20:00");
        assert_wire(&image_view_on(L::PlaybackDevice1), "40:04");
        assert_wire(&text_view_on(L::PlaybackDevice1), "40:0D");
    }

    #[test]
    fn test_power_and_abort() {
        assert_wire(
            &feature_abort(L::Tuner3, L::Tv, Command::GetMenuLanguage, AbortReason::UnrecognizedOpcode),
            "70:00:91:00",
        );
        assert_wire(&report_power_status(L::PlaybackDevice1, L::Tv, PowerStatus::On), "40:90:00");
        assert_wire(&give_device_power_status(L::Tv, L::PlaybackDevice1), "04:8F");
        assert_wire(&standby(L::Tv, L::PlaybackDevice3), "0B:36");
    }

    #[test]
    fn test_registry_has_one_entry_per_opcode() {
        for (i, spec) in OPCODE_SPECS.iter().enumerate() {
            assert!(
                OPCODE_SPECS[i + 1..].iter().all(|other| other.command != spec.command),
                "{:?} listed twice",
                spec.command
            );
        }
        assert_eq!(opcode_spec(Command::Play), None);
    }

    #[test]
    fn test_validate_rejects_misrouted_frames() {
        let spec = opcode_spec(Command::SetStreamPath).unwrap();
        let msg: CecMessage = "4F:86:20:00".parse().unwrap();
        assert!(matches!(
            spec.validate(&msg),
            Err(CecError::InvalidArgument { name: "source", .. })
        ));
        let spec = opcode_spec(Command::ActiveSource).unwrap();
        let msg: CecMessage = "40:82:20:00".parse().unwrap();
        assert!(matches!(
            spec.validate(&msg),
            Err(CecError::InvalidArgument { name: "destination", .. })
        ));
        let msg: CecMessage = "4F:82:20".parse().unwrap();
        assert!(matches!(
            spec.validate(&msg),
            Err(CecError::InvalidArgument { name: "parameters", .. })
        ));
    }
}

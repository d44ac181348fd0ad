//https://www.avsforum.com/attachments/hdmi-cec-v1-3a-specifications-pdf.2579760/

use crate::error::{CecError, CecResult};
use bitflags::bitflags;
use num_enum::{IntoPrimitive, TryFromPrimitive};

/// CEC opcodes.
///
/// [Command::None] is not an opcode on the bus: it marks a poll, a frame that
/// only carries the initiator and destination nibbles.
#[derive(Debug, Eq, PartialEq, Hash, TryFromPrimitive, IntoPrimitive, Clone, Copy)]
#[repr(u8)]
pub enum Command {
    /* General Protocol Messages */
    /// Refuse a directly addressed message.
    /// __Parameters:__
    /// - [Command] being refused
    /// - [AbortReason]
    FeatureAbort = 0x00,

    /* One Touch Play Feature */
    /// Used by a new source to indicate that it has started to transmit a stream OR used in response to a [Command::RequestActiveSource]
    /// __Parameters:__ 2byte - physical address of active source
    ActiveSource = 0x82,
    /// Sent by a source device to the TV whenever it enters the active state.
    ImageViewOn = 0x04,
    /// As [Command::ImageViewOn], but also removes text, menus and PIP windows.
    TextViewOn = 0x0d,

    /* Routing Control Feature */
    /// The active source has no video to present or is going to standby.
    /// __Parameters:__ 2byte - physical address of active source
    InactiveSource = 0x9d,
    /// Used by a new device to discover the status of the system.
    RequestActiveSource = 0x85,
    /// Sent by a switch when its active route changed.
    /// __Parameters:__
    /// - 2byte - old physical address
    /// - 2byte - new physical address
    RoutingChange = 0x80,
    /// Sent by a switch to indicate the active route below it.
    /// __Parameters:__ 2byte - physical address
    RoutingInformation = 0x81,
    /// Used by the TV to request a streaming path from the specified physical address.
    /// __Parameters:__ 2byte - physical address
    SetStreamPath = 0x86,

    /* Standby Feature */
    /// Turn off remote device. Can be used as a broadcast. No Payload
    Standby = 0x36,

    /* System Information Feature */
    /// Answer to [Command::GetCecVersion]
    /// __Parameters:__ [CecVersion]
    CecVersion = 0x9e,
    GetCecVersion = 0x9f,
    /// requests [Command::ReportPhysicalAddress]
    GivePhysicalAddress = 0x83,
    /// requests [Command::SetMenuLanguage]. Only the TV answers it.
    GetMenuLanguage = 0x91,
    /// Broadcast mapping between physical and logical address of the initiator.
    /// __Parameters:__
    /// - 2b physical address
    /// - 1b [DeviceType](crate::DeviceType)
    ReportPhysicalAddress = 0x84,
    /// Used by a TV to indicate the menu language.
    /// __Parameters:__ 3 ascii bytes, ISO-639-2
    SetMenuLanguage = 0x32,
    /// HDMI 2.0
    ReportFeatures = 0xa6,
    /// HDMI 2.0
    GiveFeatures = 0xa5,

    /* Deck Control Feature */
    DeckControl = 0x42,
    DeckStatus = 0x1b,
    GiveDeckStatus = 0x1a,
    Play = 0x41,

    /* Vendor Specific Commands Feature */
    /// Reports the vendor ID of this device.
    /// __Parameters:__ 3byte [VendorId]
    DeviceVendorId = 0x87,
    GiveDeviceVendorId = 0x8c,
    /// __Parameters:__ 1 to 14 vendor specific bytes
    VendorCommand = 0x89,
    /// __Parameters:__
    /// - 3byte [VendorId]
    /// - 1 to 14 vendor specific bytes
    VendorCommandWithId = 0xa0,
    /// __Parameters:__ 1 to 14 bytes, vendor specific RC code
    VendorRemoteButtonDown = 0x8a,
    VendorRemoteButtonUp = 0x8b,

    /* OSD Display Feature */
    /// Text message to output on a TV.
    /// __Parameters:__
    /// - [DisplayControl]
    /// - 1 to 13 ascii bytes, not terminated
    SetOsdString = 0x64,

    /* Device OSD Transfer Feature */
    /// requests [Command::SetOsdName]
    GiveOsdName = 0x46,
    /// __Parameters:__ 1 to 14 ascii bytes, not terminated
    SetOsdName = 0x47,

    /* Device Menu Control Feature */
    /// __Parameters:__ [MenuRequestType]
    MenuRequest = 0x8d,
    /// __Parameters:__ [MenuState]
    MenuStatus = 0x8e,
    /// __Parameters:__ [UserControlCode]
    UserControlPressed = 0x44,
    UserControlReleased = 0x45,

    /* Power Status Feature */
    /// request [Command::ReportPowerStatus]
    GiveDevicePowerStatus = 0x8f,
    /// __Parameters:__ [PowerStatus]
    ReportPowerStatus = 0x90,

    /* System Audio Control Feature */
    GiveAudioStatus = 0x71,
    GiveSystemAudioModeStatus = 0x7d,
    /// __Parameters:__ 1 byte, [AudioMuteStatus] bit | volume 0..=127
    ReportAudioStatus = 0x7a,
    ReportShortAudioDescriptor = 0xa3,
    RequestShortAudioDescriptor = 0xa4,
    /// __Parameters:__ [SystemAudioStatus]
    SetSystemAudioMode = 0x72,
    SystemAudioModeRequest = 0x70,
    SystemAudioModeStatus = 0x7e,
    SetAudioRate = 0x9a,

    /* One Touch Record Feature */
    RecordOff = 0x0b,
    RecordOn = 0x09,
    RecordStatus = 0x0a,
    RecordTvScreen = 0x0f,

    /* Timer Programming Feature */
    ClearAnalogueTimer = 0x33,
    ClearDigitalTimer = 0x99,
    ClearExtTimer = 0xa1,
    SetAnalogueTimer = 0x34,
    SetDigitalTimer = 0x97,
    SetExtTimer = 0xa2,
    SetTimerProgramTitle = 0x67,
    TimerClearedStatus = 0x43,
    TimerStatus = 0x35,

    /* Tuner Control Feature */
    GiveTunerDeviceStatus = 0x08,
    SelectAnalogueService = 0x92,
    SelectDigitalService = 0x93,
    TunerDeviceStatus = 0x07,
    TunerStepDecrement = 0x06,
    TunerStepIncrement = 0x05,

    /* Audio Return Channel Control Feature */
    InitiateArc = 0xc0,
    ReportArcInitiated = 0xc1,
    ReportArcTerminated = 0xc2,
    RequestArcInitiation = 0xc3,
    RequestArcTermination = 0xc4,
    TerminateArc = 0xc5,

    /* Dynamic Audio Lipsync Feature */
    RequestCurrentLatency = 0xa7,
    ReportCurrentLatency = 0xa8,
    /* Capability Discovery and Control Feature */
    CdcMessage = 0xf8,

    /// Poll: no opcode on the wire.
    None = 0xff,
}

bitflags! {
    /// CEC feature groups an opcode belongs to.
    ///
    /// Only used for documentation and grouping, the follower never looks at them.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Features: u32 {
        const GENERAL_PROTOCOL = 1 << 0;
        const ONE_TOUCH_PLAY = 1 << 1;
        const ROUTING_CONTROL = 1 << 2;
        const STANDBY = 1 << 3;
        const SYSTEM_INFORMATION = 1 << 4;
        const DECK_CONTROL = 1 << 5;
        const VENDOR_SPECIFIC_COMMANDS = 1 << 6;
        const OSD_DISPLAY = 1 << 7;
        const DEVICE_OSD_NAME_TRANSFER = 1 << 8;
        const DEVICE_MENU_CONTROL = 1 << 9;
        const REMOTE_CONTROL_PASSTHROUGH = 1 << 10;
        const POWER_STATUS = 1 << 11;
        const SYSTEM_AUDIO_CONTROL = 1 << 12;
        const AUDIO_RATE_CONTROL = 1 << 13;
        const ONE_TOUCH_RECORD = 1 << 14;
        const TIMER_PROGRAMMING = 1 << 15;
        const TUNER_CONTROL = 1 << 16;
        const AUDIO_RETURN_CHANNEL = 1 << 17;
        const DYNAMIC_AUDIO_LIPSYNC = 1 << 18;
        const CAPABILITY_DISCOVERY = 1 << 19;
    }
}

impl Command {
    /// Feature groups this opcode is part of.
    pub const fn features(self) -> Features {
        use Command as C;
        match self {
            C::FeatureAbort => Features::GENERAL_PROTOCOL,
            C::ActiveSource => Features::ONE_TOUCH_PLAY.union(Features::ROUTING_CONTROL),
            C::ImageViewOn | C::TextViewOn => Features::ONE_TOUCH_PLAY,
            C::InactiveSource | C::RequestActiveSource | C::RoutingChange | C::RoutingInformation
            | C::SetStreamPath => Features::ROUTING_CONTROL,
            C::Standby => Features::STANDBY,
            C::CecVersion | C::GetCecVersion | C::GivePhysicalAddress | C::GetMenuLanguage
            | C::ReportPhysicalAddress | C::SetMenuLanguage | C::ReportFeatures | C::GiveFeatures => {
                Features::SYSTEM_INFORMATION
            }
            C::DeckControl | C::DeckStatus | C::GiveDeckStatus | C::Play => Features::DECK_CONTROL,
            C::DeviceVendorId | C::GiveDeviceVendorId | C::VendorCommand | C::VendorCommandWithId
            | C::VendorRemoteButtonDown | C::VendorRemoteButtonUp => Features::VENDOR_SPECIFIC_COMMANDS,
            C::SetOsdString => Features::OSD_DISPLAY,
            C::GiveOsdName | C::SetOsdName => Features::DEVICE_OSD_NAME_TRANSFER,
            C::MenuRequest | C::MenuStatus => Features::DEVICE_MENU_CONTROL,
            C::UserControlPressed | C::UserControlReleased => {
                Features::DEVICE_MENU_CONTROL.union(Features::REMOTE_CONTROL_PASSTHROUGH)
            }
            C::GiveDevicePowerStatus | C::ReportPowerStatus => Features::POWER_STATUS,
            C::GiveAudioStatus | C::GiveSystemAudioModeStatus | C::ReportAudioStatus
            | C::ReportShortAudioDescriptor | C::RequestShortAudioDescriptor | C::SetSystemAudioMode
            | C::SystemAudioModeRequest | C::SystemAudioModeStatus => Features::SYSTEM_AUDIO_CONTROL,
            C::SetAudioRate => Features::AUDIO_RATE_CONTROL,
            C::RecordOff | C::RecordOn | C::RecordStatus | C::RecordTvScreen => Features::ONE_TOUCH_RECORD,
            C::ClearAnalogueTimer | C::ClearDigitalTimer | C::ClearExtTimer | C::SetAnalogueTimer
            | C::SetDigitalTimer | C::SetExtTimer | C::SetTimerProgramTitle | C::TimerClearedStatus
            | C::TimerStatus => Features::TIMER_PROGRAMMING,
            C::GiveTunerDeviceStatus | C::SelectAnalogueService | C::SelectDigitalService
            | C::TunerDeviceStatus | C::TunerStepDecrement | C::TunerStepIncrement => {
                Features::TUNER_CONTROL
            }
            C::InitiateArc | C::ReportArcInitiated | C::ReportArcTerminated | C::RequestArcInitiation
            | C::RequestArcTermination | C::TerminateArc => Features::AUDIO_RETURN_CHANNEL,
            C::RequestCurrentLatency | C::ReportCurrentLatency => Features::DYNAMIC_AUDIO_LIPSYNC,
            C::CdcMessage => Features::CAPABILITY_DISCOVERY,
            C::None => Features::empty(),
        }
    }
}

/// used by [Command::FeatureAbort]
#[derive(Debug, Eq, PartialEq, Hash, TryFromPrimitive, IntoPrimitive, Clone, Copy)]
#[repr(u8)]
pub enum AbortReason {
    UnrecognizedOpcode = 0,
    NotInCorrectModeToRespond = 1,
    CannotProvideSource = 2,
    InvalidOperand = 3,
    Refused = 4,
}

// ---  Power Status Operand (pwr_state)  ---
/// Payload of [Command::ReportPowerStatus]
#[derive(Debug, Eq, PartialEq, Hash, TryFromPrimitive, IntoPrimitive, Clone, Copy)]
#[repr(u8)]
pub enum PowerStatus {
    On = 0,
    Standby = 1,
    TransitionStandbyToOn = 2,
    TransitionOnToStandby = 3,
}

/// Payload of [Command::MenuStatus]
#[derive(Debug, Eq, PartialEq, Hash, TryFromPrimitive, IntoPrimitive, Clone, Copy)]
#[repr(u8)]
pub enum MenuState {
    Activated = 0x00,
    Deactivated = 0x01,
}

/// used by [Command::MenuRequest]
#[derive(Debug, Eq, PartialEq, Hash, TryFromPrimitive, IntoPrimitive, Clone, Copy)]
#[repr(u8)]
pub enum MenuRequestType {
    Activate = 0x00,
    Deactivate = 0x01,
    Query = 0x02,
}

/// CEC Version Operand for [Command::CecVersion]
#[derive(Debug, Eq, PartialEq, Hash, TryFromPrimitive, IntoPrimitive, Copy, Clone)]
#[repr(u8)]
pub enum CecVersion {
    V1_1 = 0,
    V1_2 = 1,
    V1_2A = 2,
    V1_3 = 3,
    V1_3A = 4,
    V1_4 = 5,
}

/// used by [Command::SetOsdString]
#[derive(Debug, Eq, PartialEq, Hash, TryFromPrimitive, IntoPrimitive, Clone, Copy)]
#[repr(u8)]
pub enum DisplayControl {
    Default = 0x00,
    UntilCleared = 0x40,
    Clear = 0x80,
    Reserved = 0xc0,
}

/// Mute bit of [Command::ReportAudioStatus]
#[derive(Debug, Eq, PartialEq, Hash, TryFromPrimitive, IntoPrimitive, Clone, Copy)]
#[repr(u8)]
pub enum AudioMuteStatus {
    Off = 0x00,
    On = 0x80,
}

/// used by [Command::SetSystemAudioMode]
#[derive(Debug, Eq, PartialEq, Hash, TryFromPrimitive, IntoPrimitive, Clone, Copy)]
#[repr(u8)]
pub enum SystemAudioStatus {
    Off = 0x00,
    On = 0x01,
}

/// parameter for [Command::UserControlPressed]
#[derive(Debug, Eq, PartialEq, Hash, TryFromPrimitive, IntoPrimitive, Clone, Copy)]
#[repr(u8)]
pub enum UserControlCode {
    Select = 0x00,
    Up = 0x01,
    Down = 0x02,
    Left = 0x03,
    Right = 0x04,
    RightUp = 0x05,
    RightDown = 0x06,
    LeftUp = 0x07,
    LeftDown = 0x08,
    RootMenu = 0x09,
    SetupMenu = 0x0a,
    ContentsMenu = 0x0b,
    FavoriteMenu = 0x0c,
    Exit = 0x0d,
    TopMenu = 0x10,
    DvdMenu = 0x11,
    NumberEntryMode = 0x1d,
    Number11 = 0x1e,
    Number12 = 0x1f,
    Number0 = 0x20,
    Number1 = 0x21,
    Number2 = 0x22,
    Number3 = 0x23,
    Number4 = 0x24,
    Number5 = 0x25,
    Number6 = 0x26,
    Number7 = 0x27,
    Number8 = 0x28,
    Number9 = 0x29,
    Dot = 0x2a,
    Enter = 0x2b,
    Clear = 0x2c,
    NextFavorite = 0x2f,
    ChannelUp = 0x30,
    ChannelDown = 0x31,
    PreviousChannel = 0x32,
    SoundSelect = 0x33,
    InputSelect = 0x34,
    DisplayInformation = 0x35,
    Help = 0x36,
    PageUp = 0x37,
    PageDown = 0x38,
    Power = 0x40,
    VolumeUp = 0x41,
    VolumeDown = 0x42,
    Mute = 0x43,
    Play = 0x44,
    Stop = 0x45,
    Pause = 0x46,
    Record = 0x47,
    Rewind = 0x48,
    FastForward = 0x49,
    Eject = 0x4a,
    Forward = 0x4b,
    Backward = 0x4c,
    StopRecord = 0x4d,
    PauseRecord = 0x4e,
    Angle = 0x50,
    SubPicture = 0x51,
    VideoOnDemand = 0x52,
    ElectronicProgramGuide = 0x53,
    TimerProgramming = 0x54,
    InitialConfiguration = 0x55,
    SelectBroadcastType = 0x56,
    SelectSoundPresentation = 0x57,
    PlayFunction = 0x60,
    PausePlayFunction = 0x61,
    RecordFunction = 0x62,
    PauseRecordFunction = 0x63,
    StopFunction = 0x64,
    MuteFunction = 0x65,
    RestoreVolumeFunction = 0x66,
    TuneFunction = 0x67,
    SelectMediaFunction = 0x68,
    SelectAvInputFunction = 0x69,
    SelectAudioInputFunction = 0x6a,
    PowerToggleFunction = 0x6b,
    PowerOffFunction = 0x6c,
    PowerOnFunction = 0x6d,
    F1Blue = 0x71,
    F2Red = 0x72,
    F3Green = 0x73,
    F4Yellow = 0x74,
    F5 = 0x75,
    Data = 0x76,
}

/**
 * Non empty ascii text of at most `MAX` characters, as carried by
 * [Command::SetOsdName] (14) and [Command::SetOsdString] (13).
 * ```
 * # use cec_follower::OsdStr;
 * let name = OsdStr::<14>::new("osd_name", "pi4").unwrap();
 * assert_eq!(name.as_bytes(), b"pi4");
 * assert!(OsdStr::<14>::new("osd_name", "").is_err());
 * ```
 */
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct OsdStr<const MAX: usize>(String);

impl<const MAX: usize> OsdStr<MAX> {
    /// Validate `value`. `name` identifies the parameter in the error.
    pub fn new(name: &'static str, value: &str) -> CecResult<Self> {
        if value.is_empty() || value.len() > MAX {
            return Err(CecError::invalid(
                name,
                format!("must be 1 to {MAX} characters, got {}", value.len()),
            ));
        }
        if !value.is_ascii() {
            return Err(CecError::invalid(name, "must be ascii"));
        }
        Ok(Self(value.to_string()))
    }
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl<const MAX: usize> TryFrom<&str> for OsdStr<MAX> {
    type Error = CecError;
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new("osd_str", value)
    }
}

impl<const MAX: usize> AsRef<str> for OsdStr<MAX> {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
impl<const MAX: usize> std::fmt::Display for OsdStr<MAX> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
impl<const MAX: usize> std::fmt::Debug for OsdStr<MAX> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

/// IEEE OUI of a vendor, 24 bit. Sent as 3 bytes, most significant first.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u32", into = "u32"))]
pub struct VendorId(u32);

impl VendorId {
    pub const MAX: u32 = 0x00ff_ffff;

    pub fn new(id: u32) -> CecResult<Self> {
        if id > Self::MAX {
            return Err(CecError::invalid(
                "vendor_id",
                format!("{id:#x} does not fit in 24 bits"),
            ));
        }
        Ok(Self(id))
    }
    pub fn from_bytes(bytes: [u8; 3]) -> Self {
        Self(u32::from_be_bytes([0, bytes[0], bytes[1], bytes[2]]))
    }
    pub fn to_bytes(self) -> [u8; 3] {
        let [_, a, b, c] = self.0.to_be_bytes();
        [a, b, c]
    }
    #[inline]
    pub fn value(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for VendorId {
    type Error = CecError;
    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
impl From<VendorId> for u32 {
    fn from(value: VendorId) -> Self {
        value.0
    }
}

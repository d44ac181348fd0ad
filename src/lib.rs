#![cfg_attr(docsrs, feature(doc_cfg))]
/*!
 * HDMI-CEC messages and a follower that answers them, without any transport.
 *
 * Decode the text a CEC adapter reports into a [CecMessage], let a [CecDevice]
 * decide on the reply and send the reply's [wire text](CecMessage::to_cec) back.
 * Messages of your own are created with the factories in [builder].
 *
 * ```
 * # use cec_follower::{CecDevice, CecMessage, DeviceType, LogicalAddress, PowerStatus, VendorId};
 * # fn main() -> cec_follower::CecResult<()> {
 * let mut dev = CecDevice::with_addresses(
 *     DeviceType::PlaybackDevice,
 *     "pi4",
 *     VendorId::default(),
 *     "2.1.0.0".parse()?,
 *     LogicalAddress::PlaybackDevice1,
 * )?;
 * dev.set_power_status(PowerStatus::On);
 *
 * let msg: CecMessage = "04:8F".parse()?;
 * let reply = dev.process(&msg)?.expect("power status is answered");
 * assert_eq!(reply.to_cec(), "40:90:00");
 * # Ok(())
 * # }
 * ```
 */
mod address;
pub mod builder;
mod config;
mod device;
mod edid;
mod error;
pub mod hex;
pub mod language;
mod message;
mod types;

pub use address::{DeviceType, LogicalAddress, PhysicalAddress};
pub use builder::{opcode_spec, OpcodeSpec, OPCODE_SPECS};
pub use config::CecDeviceConfig;
pub use device::{CecDevice, SUPPORTED_CEC_VERSION};
pub use edid::EdidMessage;
pub use error::{CecError, CecResult};
pub use message::{CecMessage, ACK_MARKER};
pub use types::{
    AbortReason, AudioMuteStatus, CecVersion, Command, DisplayControl, Features, MenuRequestType,
    MenuState, OsdStr, PowerStatus, SystemAudioStatus, UserControlCode, VendorId,
};

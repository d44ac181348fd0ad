//! The [CecMessage] value and its colon delimited wire text.

use crate::address::LogicalAddress;
use crate::builder::{opcode_spec, Operands};
use crate::error::{CecError, CecResult};
use crate::hex::{parse_hex_byte, to_hex, BYTE_DELIMITER};
use crate::types::Command;
use log::warn;
use std::{fmt, str::FromStr};

/// Suffix marking a frame the destination acknowledged.
pub const ACK_MARKER: char = '#';

/**
 * A single CEC frame.
 *
 * The wire text is `SD[:OO[:PP...]][#]`: initiator and destination nibble,
 * the opcode, operand bytes and an optional acknowledgement marker.
 * ```
 * # use cec_follower::{CecMessage, Command, LogicalAddress};
 * let msg: CecMessage = "04:44:30".parse().unwrap();
 * assert_eq!(msg.source(), LogicalAddress::Tv);
 * assert_eq!(msg.destination(), LogicalAddress::PlaybackDevice1);
 * assert_eq!(msg.command(), Command::UserControlPressed);
 * assert_eq!(msg.parameters(), Some(&[0x30][..]));
 * assert_eq!(msg.to_string(), "04:44:30");
 * ```
 *
 * Equality covers all fields, the acknowledgement flag included.
 */
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CecMessage {
    source: LogicalAddress,
    destination: LogicalAddress,
    command: Command,
    parameters: Option<Vec<u8>>,
    acknowledged: bool,
}

impl CecMessage {
    /// An empty operand list is stored as `None`.
    ///
    /// Operands passed for a poll or another opcode that takes none are dropped,
    /// see [CecMessage::try_new] to reject them instead.
    pub fn new(
        source: LogicalAddress,
        destination: LogicalAddress,
        command: Command,
        parameters: Option<Vec<u8>>,
    ) -> Self {
        let mut parameters = parameters.filter(|p| !p.is_empty());
        if parameters.is_some() && is_nullary(command) {
            warn!("dropping operands of {:?}", command);
            parameters = None;
        }
        Self {
            source,
            destination,
            command,
            parameters,
            acknowledged: false,
        }
    }
    /// Like [CecMessage::new], but operands for an opcode that takes none are an error.
    pub fn try_new(
        source: LogicalAddress,
        destination: LogicalAddress,
        command: Command,
        parameters: Option<Vec<u8>>,
    ) -> CecResult<Self> {
        if is_nullary(command) && parameters.as_ref().is_some_and(|p| !p.is_empty()) {
            return Err(CecError::invalid(
                "parameters",
                format!("{command:?} takes no operands"),
            ));
        }
        Ok(Self::new(source, destination, command, parameters))
    }
    /// A message without operands.
    pub fn nullary(source: LogicalAddress, destination: LogicalAddress, command: Command) -> Self {
        Self::new(source, destination, command, None)
    }
    /// A frame consisting of the header only.
    pub fn poll(source: LogicalAddress, destination: LogicalAddress) -> Self {
        Self::new(source, destination, Command::None, None)
    }
    /// Set the acknowledgement flag.
    pub fn with_ack(mut self, acknowledged: bool) -> Self {
        self.acknowledged = acknowledged;
        self
    }

    /// return the initiator's logical address
    #[inline]
    pub fn source(&self) -> LogicalAddress {
        self.source
    }
    /// return the destination's logical address
    #[inline]
    pub fn destination(&self) -> LogicalAddress {
        self.destination
    }
    /// return the opcode of the message, [Command::None] for a poll
    #[inline]
    pub fn command(&self) -> Command {
        self.command
    }
    pub fn parameters(&self) -> Option<&[u8]> {
        self.parameters.as_deref()
    }
    /// Operand byte at `index`, if present.
    pub fn parameter(&self, index: usize) -> Option<u8> {
        self.parameters().and_then(|p| p.get(index).copied())
    }
    #[inline]
    pub fn is_acknowledged(&self) -> bool {
        self.acknowledged
    }
    /// return true if this is a broadcast message
    pub fn is_broadcast(&self) -> bool {
        self.destination.is_broadcast()
    }
    /// return true if the frame only carries a header
    pub fn is_poll(&self) -> bool {
        self.command == Command::None
    }
    /// A poll sent to the initiator's own address, used to claim it.
    pub fn is_self_poll(&self) -> bool {
        self.is_poll() && self.source == self.destination
    }

    /// Wire text without the acknowledgement marker.
    pub fn to_cec(&self) -> String {
        let mut out = String::with_capacity(2 + 3 * (1 + self.parameters().map_or(0, <[u8]>::len)));
        out.push(self.source.as_char());
        out.push(self.destination.as_char());
        if !self.is_poll() {
            out.push(BYTE_DELIMITER);
            out.push_str(&to_hex(&[self.command.into()]));
        }
        if let Some(params) = self.parameters() {
            out.push(BYTE_DELIMITER);
            out.push_str(&to_hex(params));
        }
        out
    }

    /// Human readable summary, e.g. `SetOsdName - OSD Name: pi4`.
    pub fn describe(&self) -> String {
        match self.command {
            Command::None => "Polling".to_string(),
            Command::SetOsdName => format!(
                "{:?} - OSD Name: {}",
                self.command,
                String::from_utf8_lossy(self.parameters().unwrap_or_default())
            ),
            other => format!("{other:?}"),
        }
    }

    /// Raw frame bytes: header, opcode (if any), operands.
    pub fn to_frame(&self) -> Vec<u8> {
        let header = u8::from(self.source) << 4 | u8::from(self.destination);
        let mut frame = vec![header];
        if !self.is_poll() {
            frame.push(self.command.into());
        }
        frame.extend_from_slice(self.parameters().unwrap_or_default());
        frame
    }

    /// Decode raw frame bytes as received from a CEC adapter.
    pub fn from_frame(frame: &[u8]) -> CecResult<Self> {
        let (&header, rest) = frame
            .split_first()
            .ok_or(CecError::MissingInput("cec frame"))?;
        let source = LogicalAddress::from_nibble(header >> 4);
        let destination = LogicalAddress::from_nibble(header);
        match rest.split_first() {
            None => Ok(Self::poll(source, destination)),
            Some((&opcode, params)) => {
                let input = to_hex(frame);
                let command = decode_command(opcode, &input)?;
                check_nullary_operands(command, params, &input)?;
                Ok(Self::new(source, destination, command, Some(params.to_vec())))
            }
        }
    }

    /// Decode wire text, see [CecMessage]. Surrounding whitespace is ignored.
    pub fn parse(text: &str) -> CecResult<Self> {
        let input = text.trim();
        if input.is_empty() {
            return Err(CecError::MissingInput("cec message"));
        }
        let (body, acknowledged) = match input.strip_suffix(ACK_MARKER) {
            Some(body) => (body, true),
            None => (input, false),
        };

        let mut tokens = body.split(BYTE_DELIMITER);
        let header = tokens.next().unwrap_or_default();
        if header.len() != 2 {
            return Err(CecError::malformed(
                input,
                format!("address token `{header}` must be two hex digits"),
            ));
        }
        let header = parse_hex_byte(header, input)?;
        let source = LogicalAddress::from_nibble(header >> 4);
        let destination = LogicalAddress::from_nibble(header);

        let command = match tokens.next() {
            Some(token) => decode_command(parse_hex_byte(token, input)?, input)?,
            None => Command::None,
        };
        let params = tokens
            .map(|token| parse_hex_byte(token, input))
            .collect::<CecResult<Vec<u8>>>()?;
        check_nullary_operands(command, &params, input)?;

        Ok(Self::new(source, destination, command, Some(params)).with_ack(acknowledged))
    }
}

fn decode_command(opcode: u8, input: &str) -> CecResult<Command> {
    Command::try_from(opcode)
        .map_err(|_| CecError::malformed(input, format!("unknown opcode {opcode:#04x}")))
}

/// Polls and the requests registered without operands.
fn is_nullary(command: Command) -> bool {
    command == Command::None
        || opcode_spec(command).is_some_and(|spec| spec.operands == Operands::Empty)
}

fn check_nullary_operands(command: Command, params: &[u8], input: &str) -> CecResult<()> {
    if is_nullary(command) && !params.is_empty() {
        return Err(CecError::malformed(
            input,
            format!("{command:?} carries no operands"),
        ));
    }
    Ok(())
}

impl FromStr for CecMessage {
    type Err = CecError;
    fn from_str(s: &str) -> CecResult<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for CecMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_cec())
    }
}

//! EDID blocks as reported by the HDMI adapter: `0xBB B0:B1:...`.

use crate::address::PhysicalAddress;
use crate::error::{CecError, CecResult};
use crate::hex::{parse_hex, to_hex};
use std::{fmt, str::FromStr};

/// Separator between block index and data.
const SECTION_DELIMITER: char = ' ';

/// Offset of the physical address within the CEA extension block.
const PHYSICAL_ADDRESS_OFFSET: usize = 0x28;

/**
 * One EDID block: its index and the raw bytes.
 * ```
 * # use cec_follower::EdidMessage;
 * let edid: EdidMessage = "0x01 02:03".parse().unwrap();
 * assert_eq!(edid.block(), 1);
 * assert_eq!(edid.data(), &[2, 3]);
 * assert_eq!(edid.to_string(), "0x01 02:03");
 * ```
 */
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EdidMessage {
    block: u8,
    data: Vec<u8>,
}

impl EdidMessage {
    pub fn new(block: u8, data: Vec<u8>) -> Self {
        Self { block, data }
    }
    pub fn block(&self) -> u8 {
        self.block
    }
    pub fn data(&self) -> &[u8] {
        &self.data
    }
    /// The physical address this block assigns to the sink's input.
    pub fn physical_address(&self) -> CecResult<PhysicalAddress> {
        match self
            .data
            .get(PHYSICAL_ADDRESS_OFFSET..PHYSICAL_ADDRESS_OFFSET + 2)
        {
            Some(&[hi, lo]) => Ok(PhysicalAddress::from_bytes([hi, lo])),
            _ => Err(CecError::invalid(
                "edid",
                format!(
                    "block {:#04x} has {} bytes, the physical address is at {PHYSICAL_ADDRESS_OFFSET:#x}",
                    self.block,
                    self.data.len()
                ),
            )),
        }
    }
}

impl FromStr for EdidMessage {
    type Err = CecError;

    fn from_str(s: &str) -> CecResult<Self> {
        let input = s.trim();
        if input.is_empty() {
            return Err(CecError::MissingInput("edid message"));
        }
        let sections: Vec<&str> = input.split(SECTION_DELIMITER).collect();
        let &[block, data] = &sections[..] else {
            return Err(CecError::invalid(
                "edid",
                format!("expected `0xNN NN:NN:...`, got `{input}`"),
            ));
        };
        let digits = block
            .strip_prefix("0x")
            .or_else(|| block.strip_prefix("0X"))
            .unwrap_or(block);
        let block = u8::from_str_radix(digits, 16)
            .map_err(|e| CecError::malformed(input, format!("block index `{block}`: {e}")))?;
        let data = parse_hex(data).map_err(|e| match e {
            CecError::MissingInput(_) => CecError::malformed(input, "no data bytes"),
            other => other,
        })?;
        Ok(Self { block, data })
    }
}

impl fmt::Display for EdidMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:02X} {}", self.block, to_hex(&self.data))
    }
}

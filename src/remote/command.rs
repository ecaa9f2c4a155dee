//! Infrared command strings sent to the transmitter firmware.
//!
//! A command is plain text of the form `<protocol-id>,<hex-code>[,<bit-count>]`,
//! for example `3,180c,13` (RC5, code 0x180C, 13 bits) or `5,37c107`
//! (Panasonic Old, fixed width). The firmware does all protocol encoding;
//! this module only makes sure a command names a protocol the firmware can
//! transmit and that the code fits in that protocol's frame.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors produced while parsing or validating a command string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// The string did not have two or three comma separated fields.
    #[error("Malformed command '{0}': expected <protocol>,<hex-code>[,<bits>]")]
    Malformed(String),

    /// The protocol id is not a number.
    #[error("Invalid protocol id '{0}'")]
    InvalidProtocolId(String),

    /// The protocol id is known but cannot be transmitted, or is unknown.
    #[error("Protocol {0} cannot be transmitted")]
    UnsupportedProtocol(u8),

    /// The code field is not hexadecimal.
    #[error("Invalid hex code '{0}'")]
    InvalidCode(String),

    /// The bit count field is not a number.
    #[error("Invalid bit count '{0}'")]
    InvalidBits(String),

    /// The protocol needs an explicit bit count.
    #[error("{0} commands require a bit count")]
    MissingBits(Protocol),

    /// JVC's first-frame flag must be 0 or 1.
    #[error("JVC first-frame flag must be 0 or 1, got {0}")]
    InvalidFlag(u16),

    /// The code does not fit in the frame.
    #[error("Code {code:#x} does not fit in {bits} bits")]
    CodeTooWide { code: u32, bits: u16 },
}

/// Transmittable protocols and their ids as understood by the firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Protocol {
    Nec,
    Sony,
    Rc5,
    Rc6,
    PanasonicOld,
    Jvc,
    NecX,
}

impl Protocol {
    /// All transmittable protocols, in id order.
    pub const ALL: [Protocol; 7] = [
        Protocol::Nec,
        Protocol::Sony,
        Protocol::Rc5,
        Protocol::Rc6,
        Protocol::PanasonicOld,
        Protocol::Jvc,
        Protocol::NecX,
    ];

    /// Numeric id written on the wire.
    pub const fn id(self) -> u8 {
        match self {
            Protocol::Nec => 1,
            Protocol::Sony => 2,
            Protocol::Rc5 => 3,
            Protocol::Rc6 => 4,
            Protocol::PanasonicOld => 5,
            Protocol::Jvc => 6,
            Protocol::NecX => 7,
        }
    }

    /// Look up a protocol by its wire id.
    ///
    /// Ids 0 (unknown) and 8 (hash code) only exist on the receive side and
    /// are rejected along with anything out of range.
    pub fn from_id(id: u8) -> Result<Self, CommandError> {
        Protocol::ALL
            .into_iter()
            .find(|p| p.id() == id)
            .ok_or(CommandError::UnsupportedProtocol(id))
    }

    /// Human-readable protocol name.
    pub const fn name(self) -> &'static str {
        match self {
            Protocol::Nec => "NEC",
            Protocol::Sony => "Sony",
            Protocol::Rc5 => "RC5",
            Protocol::Rc6 => "RC6",
            Protocol::PanasonicOld => "Panasonic Old",
            Protocol::Jvc => "JVC",
            Protocol::NecX => "NECx",
        }
    }

    /// Frame width for protocols whose length is fixed by the firmware.
    ///
    /// `None` means the width comes from the command's bit count.
    pub const fn fixed_width(self) -> Option<u16> {
        match self {
            Protocol::Nec | Protocol::NecX => Some(32),
            Protocol::Rc5 => Some(13),
            Protocol::PanasonicOld => Some(22),
            Protocol::Jvc => Some(16),
            Protocol::Sony | Protocol::Rc6 => None,
        }
    }

    /// Whether the third field is mandatory.
    pub const fn requires_bits(self) -> bool {
        self.fixed_width().is_none()
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A validated infrared command.
///
/// For JVC the optional third field is the firmware's "first frame" flag
/// rather than a bit count; it is carried through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IrCommand {
    protocol: Protocol,
    code: u32,
    bits: Option<u16>,
}

impl IrCommand {
    /// Build and validate a command.
    pub fn new(protocol: Protocol, code: u32, bits: Option<u16>) -> Result<Self, CommandError> {
        if let (Protocol::Jvc, Some(flag @ 2..)) = (protocol, bits) {
            return Err(CommandError::InvalidFlag(flag));
        }
        let width = match (protocol.fixed_width(), bits) {
            (Some(width), _) => width,
            (None, Some(bits)) => bits,
            (None, None) => return Err(CommandError::MissingBits(protocol)),
        };
        if width < 32 && u64::from(code) >= 1u64 << width {
            return Err(CommandError::CodeTooWide { code, bits: width });
        }
        Ok(Self {
            protocol,
            code,
            bits,
        })
    }

    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    pub fn code(&self) -> u32 {
        self.code
    }

    pub fn bits(&self) -> Option<u16> {
        self.bits
    }

    /// The exact bytes written to the serial port, without any terminator.
    pub fn to_wire(&self) -> Vec<u8> {
        self.to_string().into_bytes()
    }
}

impl fmt::Display for IrCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{:x}", self.protocol.id(), self.code)?;
        if let Some(bits) = self.bits {
            write!(f, ",{bits}")?;
        }
        Ok(())
    }
}

impl FromStr for IrCommand {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.trim().split(',').map(str::trim).collect();
        let (protocol, code, bits) = match fields.as_slice() {
            [protocol, code] => (*protocol, *code, None),
            [protocol, code, bits] => (*protocol, *code, Some(*bits)),
            _ => return Err(CommandError::Malformed(s.to_string())),
        };

        let id: u8 = protocol
            .parse()
            .map_err(|_| CommandError::InvalidProtocolId(protocol.to_string()))?;
        let protocol = Protocol::from_id(id)?;

        let digits = code
            .strip_prefix("0x")
            .or_else(|| code.strip_prefix("0X"))
            .unwrap_or(code);
        let code = u32::from_str_radix(digits, 16)
            .map_err(|_| CommandError::InvalidCode(code.to_string()))?;

        let bits = bits
            .map(|b| {
                b.parse::<u16>()
                    .map_err(|_| CommandError::InvalidBits(b.to_string()))
            })
            .transpose()?;

        Self::new(protocol, code, bits)
    }
}

impl TryFrom<String> for IrCommand {
    type Error = CommandError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<IrCommand> for String {
    fn from(command: IrCommand) -> Self {
        command.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_rc5_with_bits() {
        let cmd: IrCommand = "3,180c,13".parse().unwrap();
        assert_eq!(cmd.protocol(), Protocol::Rc5);
        assert_eq!(cmd.code(), 0x180c);
        assert_eq!(cmd.bits(), Some(13));
        assert_eq!(cmd.to_string(), "3,180c,13");
    }

    #[test]
    fn test_parse_panasonic_without_bits() {
        let cmd: IrCommand = "5,37c107".parse().unwrap();
        assert_eq!(cmd.protocol(), Protocol::PanasonicOld);
        assert_eq!(cmd.bits(), None);
        assert_eq!(cmd.to_wire(), b"5,37c107".to_vec());
    }

    #[test]
    fn test_parse_accepts_prefix_and_uppercase() {
        let cmd: IrCommand = " 1, 0x20DF10EF ".parse().unwrap();
        assert_eq!(cmd.protocol(), Protocol::Nec);
        assert_eq!(cmd.to_string(), "1,20df10ef");
    }

    #[test]
    fn test_receive_only_protocols_rejected() {
        assert_eq!(
            "0,1234".parse::<IrCommand>(),
            Err(CommandError::UnsupportedProtocol(0))
        );
        assert_eq!(
            "8,1234".parse::<IrCommand>(),
            Err(CommandError::UnsupportedProtocol(8))
        );
    }

    #[test]
    fn test_sony_requires_bits() {
        assert_eq!(
            "2,a90".parse::<IrCommand>(),
            Err(CommandError::MissingBits(Protocol::Sony))
        );
        assert!("2,a90,12".parse::<IrCommand>().is_ok());
    }

    #[test]
    fn test_jvc_flag_is_zero_or_one() {
        assert_eq!(
            "6,ffff,7".parse::<IrCommand>(),
            Err(CommandError::InvalidFlag(7))
        );
        assert_eq!("6,ffff,1".parse::<IrCommand>().unwrap().bits(), Some(1));
        assert_eq!("6,ffff,0".parse::<IrCommand>().unwrap().to_string(), "6,ffff,0");
        assert_eq!("6,ffff".parse::<IrCommand>().unwrap().bits(), None);
    }

    #[test]
    fn test_code_width_checked() {
        assert_eq!(
            "3,2000".parse::<IrCommand>(),
            Err(CommandError::CodeTooWide {
                code: 0x2000,
                bits: 13
            })
        );
        assert!(matches!(
            "2,1000,12".parse::<IrCommand>(),
            Err(CommandError::CodeTooWide { bits: 12, .. })
        ));
    }

    #[test]
    fn test_malformed_fields() {
        assert!(matches!(
            "3".parse::<IrCommand>(),
            Err(CommandError::Malformed(_))
        ));
        assert!(matches!(
            "3,1,2,3".parse::<IrCommand>(),
            Err(CommandError::Malformed(_))
        ));
        assert!(matches!(
            "x,1".parse::<IrCommand>(),
            Err(CommandError::InvalidProtocolId(_))
        ));
        assert!(matches!(
            "3,zz".parse::<IrCommand>(),
            Err(CommandError::InvalidCode(_))
        ));
        assert!(matches!(
            "4,1,many".parse::<IrCommand>(),
            Err(CommandError::InvalidBits(_))
        ));
    }

    #[test]
    fn test_serde_as_string() {
        let cmd: IrCommand = serde_json::from_str("\"3,1811,13\"").unwrap();
        assert_eq!(serde_json::to_string(&cmd).unwrap(), "\"3,1811,13\"");
        assert!(serde_json::from_str::<IrCommand>("\"9,1\"").is_err());
    }

    #[test]
    fn test_protocol_ids() {
        for protocol in Protocol::ALL {
            assert_eq!(Protocol::from_id(protocol.id()), Ok(protocol));
        }
        assert_eq!(Protocol::PanasonicOld.to_string(), "Panasonic Old");
    }
}

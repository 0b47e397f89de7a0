//! Command catalog of the ICP-101xx.
//!
//! The device has no register map. Every exchange starts with a 16-bit opcode written
//! big-endian, optionally followed by a payload, after which the response (if any) is read back
//! with a plain I2C read.

use heapless::Vec;

/// Longest encoded command: `SET_ADDR` opcode + 16-bit address + checksum byte.
pub const MAX_COMMAND_BYTES: usize = 5;

pub(crate) const CMD_READ_ID: u16 = 0xEFC8;
pub(crate) const CMD_SET_ADDR: u16 = 0xC595;
pub(crate) const CMD_READ_OTP: u16 = 0xC7F7;

/// Start of the OTP block holding the four calibration words.
pub const OTP_BASE_ADDRESS: u16 = 0x0066;

/// CRC-8 of [`OTP_BASE_ADDRESS`], sent along with the address.
pub const OTP_BASE_ADDRESS_CRC: u8 = 0x9C;

/// Measurement modes supported by the device.
///
/// The datasheet calls these low power, normal, low noise and ultra-low noise. Noise drops as
/// conversion time goes up.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MeasurementMode {
    /// Low power, 3 ms conversion
    Fast = 0,
    /// 7 ms conversion
    #[default]
    Normal = 1,
    /// Low noise, 24 ms conversion
    Accurate = 2,
    /// Ultra-low noise, 95 ms conversion
    VeryAccurate = 3,
}

/// Opcode and worst-case conversion time of a measurement mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeTiming {
    pub opcode: u16,
    pub duration_ms: u8,
}

/// Indexed by `MeasurementMode as usize`. All modes measure temperature first.
const MODE_TABLE: [ModeTiming; 4] = [
    ModeTiming { opcode: 0x609C, duration_ms: 3 },
    ModeTiming { opcode: 0x6825, duration_ms: 7 },
    ModeTiming { opcode: 0x70DF, duration_ms: 24 },
    ModeTiming { opcode: 0x7866, duration_ms: 95 },
];

impl MeasurementMode {
    pub const fn timing(self) -> ModeTiming {
        MODE_TABLE[self as usize]
    }

    /// Opcode that starts a measurement in this mode.
    pub const fn opcode(self) -> u16 {
        self.timing().opcode
    }

    /// Time in milliseconds before the result of a measurement in this mode may be read.
    pub const fn duration_ms(self) -> u8 {
        self.timing().duration_ms
    }
}

/// A command understood by the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Read the 16-bit product id. Answered with 2 bytes.
    ReadId,
    /// Point the OTP read pointer at the calibration block. No response.
    SelectCalibration,
    /// Read the OTP word under the read pointer and advance it. Answered with 3 bytes.
    ReadOtp,
    /// Start a measurement. The 9 byte result may be read once the mode's duration has passed.
    Measure(MeasurementMode),
}

impl Command {
    pub const fn opcode(&self) -> u16 {
        match self {
            Command::ReadId => CMD_READ_ID,
            Command::SelectCalibration => CMD_SET_ADDR,
            Command::ReadOtp => CMD_READ_OTP,
            Command::Measure(mode) => mode.opcode(),
        }
    }

    /// Encodes the command into the bytes put on the wire.
    pub fn encode(&self) -> Vec<u8, MAX_COMMAND_BYTES> {
        let mut out = Vec::new();
        // Capacity is never exceeded, the longest command is MAX_COMMAND_BYTES long.
        let _ = out.extend_from_slice(&self.opcode().to_be_bytes());
        if let Command::SelectCalibration = self {
            let _ = out.extend_from_slice(&OTP_BASE_ADDRESS.to_be_bytes());
            let _ = out.push(OTP_BASE_ADDRESS_CRC);
        }
        out
    }
}

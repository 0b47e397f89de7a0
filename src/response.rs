//! Responses returned by the ICP-101xx.
//!
//! Every response is a sequence of 16-bit big-endian words, each of them followed by a CRC-8
//! byte. The identity response is the exception: it is read as a bare 2 byte word.
//!
//! ### Measurement result layout (9 bytes)
//! | Offset | Content |
//! |---|---|
//! | 0, 1 | raw temperature, MSB first |
//! | 2 | checksum over bytes 0..2 |
//! | 3, 4 | raw pressure bits 23..8 |
//! | 5 | checksum over bytes 3..5 |
//! | 6 | raw pressure bits 7..0 |
//! | 7 | unused |
//! | 8 | checksum over bytes 6..8 |

/// Largest response the device produces, a measurement result.
pub const MAX_RESPONSE_BYTES: usize = 9;

/// Offsets of the raw temperature bytes, most significant first.
const TEMPERATURE_BYTES: [usize; 2] = [0, 1];

/// Offsets of the raw pressure bytes, most significant first.
const PRESSURE_BYTES: [usize; 3] = [3, 4, 6];

/// Offsets of the checksum bytes in a measurement result. Each covers the two bytes before it.
const SAMPLE_CHECKSUM_BYTES: [usize; 3] = [2, 5, 8];

/// A checksum byte did not match the word it protects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidChecksum {
    /// Offset of the checksum byte within the response
    pub offset: u8,
    /// Checksum computed over the received word
    pub expected: u8,
    /// Checksum received from the device
    pub actual: u8,
}

pub trait Response {
    type Out;
    const N: usize;
    fn decode(b: &[u8]) -> Result<Self::Out, InvalidChecksum>;
}

/// Computes the CRC-8 (polynomial 0x31, init 0xFF) the device appends to every word.
#[cfg(feature = "crc")]
pub fn checksum(word: &[u8]) -> u8 {
    const CRC: crc::Crc<u8> = crc::Crc::<u8>::new(&crc::CRC_8_NRSC_5);
    CRC.checksum(word)
}

/// Checks the checksum byte at `offset` against the two bytes before it.
#[cfg(feature = "crc")]
fn verify(b: &[u8], offset: usize) -> Result<(), InvalidChecksum> {
    let expected = checksum(&b[offset - 2..offset]);
    let actual = b[offset];
    if expected != actual {
        warn!("checksum mismatch at offset {}: {:#x} != {:#x}", offset, expected, actual);
        return Err(InvalidChecksum { offset: offset as u8, expected, actual });
    }

    Ok(())
}

#[cfg(not(feature = "crc"))]
#[inline]
fn verify(_b: &[u8], _offset: usize) -> Result<(), InvalidChecksum> {
    Ok(())
}

/// Family signature check on the product id: the low 6 bits are always `0b001000`.
pub const fn is_product_id(id: u16) -> bool {
    (id & 0x3F) == 0x08
}

/// Response to [`Command::ReadId`](crate::command::Command::ReadId).
pub struct ProductId;

impl Response for ProductId {
    type Out = u16;
    const N: usize = 2;

    fn decode(b: &[u8]) -> Result<Self::Out, InvalidChecksum> {
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }
}

/// Response to [`Command::ReadOtp`](crate::command::Command::ReadOtp): one calibration word
/// followed by its checksum.
pub struct OtpWord;

impl Response for OtpWord {
    type Out = u16;
    const N: usize = 3;

    fn decode(b: &[u8]) -> Result<Self::Out, InvalidChecksum> {
        verify(b, 2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }
}

/// Uncompensated result of one conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawSample {
    temperature: u16,
    pressure: u32,
}

impl RawSample {
    pub fn new(temperature: u16, pressure: u32) -> Self {
        Self { temperature, pressure: pressure & 0x00FF_FFFF }
    }

    /// Returns the raw 16-bit temperature
    pub fn temperature(&self) -> u16 { self.temperature }

    /// Returns the raw 24-bit pressure
    pub fn pressure(&self) -> u32 { self.pressure }
}

/// Response to [`Command::Measure`](crate::command::Command::Measure). Note that this is the
/// raw uncalibrated measurement data, [`Icp101xx::is_data_ready`](crate::Icp101xx::is_data_ready)
/// compensates it for you.
pub struct Sample;

impl Response for Sample {
    type Out = RawSample;
    const N: usize = MAX_RESPONSE_BYTES;

    fn decode(b: &[u8]) -> Result<Self::Out, InvalidChecksum> {
        for offset in SAMPLE_CHECKSUM_BYTES {
            verify(b, offset)?;
        }

        let temperature = TEMPERATURE_BYTES
            .iter()
            .fold(0u16, |acc, &i| (acc << 8) | b[i] as u16);
        let pressure = PRESSURE_BYTES
            .iter()
            .fold(0u32, |acc, &i| (acc << 8) | b[i] as u32);

        Ok(RawSample::new(temperature, pressure))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_id_signature() {
        for id in [0x08, 0x48, 0xC8, 0x0848] {
            assert!(is_product_id(id), "{:#x} should be accepted", id);
        }
        for id in [0x09, 0x00, 0xFFFF, 0x0847] {
            assert!(!is_product_id(id), "{:#x} should be rejected", id);
        }
    }

    #[test]
    fn product_id_decode() {
        assert_eq!(0x0848, ProductId::decode(&[0x08, 0x48]).unwrap());
    }

    #[test]
    fn otp_word_decode() {
        assert_eq!(1964, OtpWord::decode(&[0x07, 0xAC, 0xAE]).unwrap());
    }

    #[test]
    fn sample_decode_skips_checksum_bytes() {
        let raw = Sample::decode(&[0x65, 0x90, 0x9A, 0x81, 0xB3, 0xBA, 0x20, 0x00, 0x5D]).unwrap();

        assert_eq!(26000, raw.temperature());
        assert_eq!(8_500_000, raw.pressure());
    }

    #[test]
    fn sample_decode_ignores_unused_byte() {
        let raw = Sample::decode(&[0x80, 0x00, 0xA2, 0x7A, 0x12, 0x75, 0x00, 0x00, 0x81]).unwrap();

        assert_eq!(32768, raw.temperature());
        assert_eq!(0x7A1200, raw.pressure());
    }

    #[cfg(not(feature = "crc"))]
    #[test]
    fn sample_decode_without_crc_accepts_any_checksum() {
        let raw = Sample::decode(&[0xAA, 0xBB, 0x00, 0xCC, 0xDD, 0x00, 0xEE, 0xFF, 0x00]).unwrap();

        assert_eq!(0xAABB, raw.temperature());
        assert_eq!(0xCCDDEE, raw.pressure());
    }

    #[cfg(feature = "crc")]
    #[test]
    fn checksum_matches_datasheet_example() {
        assert_eq!(0x92, checksum(&[0xBE, 0xEF]));
    }

    #[cfg(feature = "crc")]
    #[test]
    fn sample_decode_rejects_corrupted_word() {
        let err = Sample::decode(&[0x65, 0x90, 0x9A, 0x81, 0xB3, 0xBA, 0x21, 0x00, 0x5D]).unwrap_err();

        assert_eq!(8, err.offset);
        assert_eq!(0x5D, err.actual);
    }

    #[cfg(feature = "crc")]
    #[test]
    fn otp_word_decode_rejects_corrupted_word() {
        let err = OtpWord::decode(&[0x07, 0xAD, 0xAE]).unwrap_err();

        assert_eq!(2, err.offset);
        assert_eq!(0xAE, err.actual);
    }
}

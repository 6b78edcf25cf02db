//! Bit-level I/O for the Huffman payload.
//!
//! Both directions are MSB-first: the first bit written lands in bit 7 of
//! the first byte.
//!
//! # Padding Rules
//! - [`BitWriter`]: a final partial byte (1-7 bits) is left-shifted and
//!   filled with zeros; if no bits are pending nothing extra is written
//! - [`BitReader`]: padding bits are indistinguishable from data, so the
//!   caller decides when to stop reading
//!
//! # Example
//! ```
//! use huffc_core::bitio::{BitReader, BitWriter};
//!
//! let mut writer = BitWriter::new(Vec::new());
//! writer.write_bits(0b101, 3).unwrap();
//! writer.write_bits(0b11, 2).unwrap();
//! let bytes = writer.finish().unwrap();
//! assert_eq!(bytes, vec![0b1011_1000]);
//!
//! let mut reader = BitReader::new(&bytes);
//! assert_eq!(reader.read_bits(3).unwrap(), 0b101);
//! assert_eq!(reader.read_bits(2).unwrap(), 0b11);
//! ```

use std::io::Write;

use crate::codes::Code;
use crate::error::{BitIoError, Error, Phase, Result};

/// Packs bits MSB-first and pushes each completed byte to a sink.
///
/// # Invariants
/// - `pending` holds 0-7 bits, right-aligned
/// - `pending_len` is always < 8
#[derive(Debug)]
pub struct BitWriter<W: Write> {
    inner: W,
    pending: u8,
    pending_len: u8,
    bytes_written: u64,
}

impl<W: Write> BitWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            pending: 0,
            pending_len: 0,
            bytes_written: 0,
        }
    }

    /// Append one bit; a full byte is written through immediately.
    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        self.pending = (self.pending << 1) | bit as u8;
        self.pending_len += 1;
        if self.pending_len == 8 {
            self.flush_byte()?;
        }
        Ok(())
    }

    /// Append the lowest `count` bits of `value`, most significant first.
    ///
    /// # Errors
    /// `BitIoError::InvalidBitCount` if `count > 64`.
    pub fn write_bits(&mut self, value: u64, count: usize) -> Result<()> {
        if count > 64 {
            return Err(BitIoError::InvalidBitCount(count).into());
        }
        for shift in (0..count).rev() {
            self.write_bit((value >> shift) & 1 == 1)?;
        }
        Ok(())
    }

    /// Append a whole code. Empty codes write nothing.
    pub fn write_code(&mut self, code: &Code) -> Result<()> {
        for bit in code.iter().by_vals() {
            self.write_bit(bit)?;
        }
        Ok(())
    }

    /// Total bits accepted so far, including the pending partial byte.
    pub fn bit_len(&self) -> u64 {
        self.bytes_written * 8 + self.pending_len as u64
    }

    /// Pad and write any partial byte, flush the sink and hand it back.
    pub fn finish(mut self) -> Result<W> {
        if self.pending_len > 0 {
            self.pending <<= 8 - self.pending_len;
            self.flush_byte()?;
        }
        self.inner
            .flush()
            .map_err(Error::sink_unavailable(Phase::Encode))?;
        Ok(self.inner)
    }

    fn flush_byte(&mut self) -> Result<()> {
        self.inner
            .write_all(&[self.pending])
            .map_err(Error::sink_unavailable(Phase::Encode))?;
        self.bytes_written += 1;
        self.pending = 0;
        self.pending_len = 0;
        Ok(())
    }
}

/// Reads bits MSB-first from a byte buffer.
///
/// # Invariants
/// - `position` never exceeds `data.len() * 8`
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Read a single bit.
    ///
    /// # Errors
    /// `BitIoError::UnexpectedEof` once every bit has been consumed.
    pub fn read_bit(&mut self) -> Result<bool> {
        let byte = self
            .data
            .get(self.position / 8)
            .ok_or(BitIoError::UnexpectedEof)?;
        let bit = (byte >> (7 - self.position % 8)) & 1 == 1;
        self.position += 1;
        Ok(bit)
    }

    /// Read up to 64 bits as an integer, first bit most significant.
    pub fn read_bits(&mut self, count: usize) -> Result<u64> {
        if count > 64 {
            return Err(BitIoError::InvalidBitCount(count).into());
        }
        if count > self.bits_remaining() {
            return Err(BitIoError::UnexpectedEof.into());
        }
        let mut value = 0u64;
        for _ in 0..count {
            value = (value << 1) | self.read_bit()? as u64;
        }
        Ok(value)
    }

    pub fn bits_remaining(&self) -> usize {
        self.data.len() * 8 - self.position
    }

    /// Current bit position (0 = MSB of the first byte).
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_empty(&self) -> bool {
        self.bits_remaining() == 0
    }
}

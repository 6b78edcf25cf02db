//! Container header serialization and parsing.
//!
//! # Container Format
//!
//! ```text
//! +-------------------------+
//! | symbol_count (4)        |  i32, native byte order
//! +-------------------------+
//! | symbol (1) | freq (8)   |  repeated symbol_count times,
//! | ...                     |  ascending symbol order, u64 native order
//! +-------------------------+
//! | payload                 |  bit-packed codes, MSB-first,
//! | (variable)              |  zero-padded to the last byte
//! +-------------------------+
//! ```
//!
//! There is no magic number, version, checksum or payload length. The
//! decoded length is recovered as the sum of the frequencies.

use std::io::Write;

use crate::error::{Error, MalformedContainer, Phase, Result};
use crate::frequency::{FrequencyTable, SYMBOL_COUNT};

/// Width of the symbol count field.
pub const HEADER_COUNT_SIZE: usize = std::mem::size_of::<i32>();

/// Width of one `(symbol, frequency)` record.
pub const SYMBOL_RECORD_SIZE: usize = 1 + std::mem::size_of::<u64>();

/// The frequency table as it appears at the front of a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    table: FrequencyTable,
}

impl Header {
    pub fn from_table(table: &FrequencyTable) -> Self {
        Self {
            table: table.clone(),
        }
    }

    pub fn table(&self) -> &FrequencyTable {
        &self.table
    }

    pub fn into_table(self) -> FrequencyTable {
        self.table
    }

    pub fn symbol_count(&self) -> usize {
        self.table.distinct_symbols()
    }

    /// Serialized size in bytes.
    pub fn encoded_len(&self) -> usize {
        HEADER_COUNT_SIZE + self.symbol_count() * SYMBOL_RECORD_SIZE
    }

    /// Serialize into a byte vector.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        // At most 256 symbols, always fits an i32
        let count = self.symbol_count() as i32;
        out.extend_from_slice(&count.to_ne_bytes());
        for (symbol, freq) in self.table.symbols() {
            out.push(symbol);
            out.extend_from_slice(&freq.to_ne_bytes());
        }
        out
    }

    /// Write the header to `sink`, returning the number of bytes written.
    ///
    /// # Errors
    /// `Error::SinkUnavailable` tagged with [`Phase::Encode`].
    pub fn write_to<W: Write>(&self, sink: &mut W) -> Result<usize> {
        let bytes = self.to_bytes();
        sink.write_all(&bytes)
            .map_err(Error::sink_unavailable(Phase::Encode))?;
        Ok(bytes.len())
    }

    /// Parse a header from the front of `bytes`.
    ///
    /// Returns the header and the number of bytes it occupied; the rest of
    /// `bytes` is the payload.
    ///
    /// # Errors
    /// - `MalformedContainer::TruncatedHeader` if the count or any record is cut short
    /// - `MalformedContainer::NegativeSymbolCount` / `TooManySymbols` for an
    ///   out-of-range count
    /// - `MalformedContainer::DuplicateSymbol` / `ZeroFrequency` for records that
    ///   could not have come from a real table
    /// - `MalformedContainer::TotalOverflow` if frequencies sum past `u64::MAX`
    pub fn read_from(bytes: &[u8]) -> Result<(Self, usize)> {
        let count_bytes: [u8; HEADER_COUNT_SIZE] = bytes
            .get(..HEADER_COUNT_SIZE)
            .and_then(|b| b.try_into().ok())
            .ok_or(MalformedContainer::TruncatedHeader {
                expected: HEADER_COUNT_SIZE,
                actual: bytes.len(),
            })?;
        let raw_count = i32::from_ne_bytes(count_bytes);
        if raw_count < 0 {
            return Err(MalformedContainer::NegativeSymbolCount(raw_count).into());
        }
        let count = raw_count as usize;
        if count > SYMBOL_COUNT {
            return Err(MalformedContainer::TooManySymbols(count).into());
        }

        let header_len = HEADER_COUNT_SIZE + count * SYMBOL_RECORD_SIZE;
        if bytes.len() < header_len {
            return Err(MalformedContainer::TruncatedHeader {
                expected: header_len,
                actual: bytes.len(),
            }
            .into());
        }

        let mut table = FrequencyTable::new();
        for record in bytes[HEADER_COUNT_SIZE..header_len].chunks_exact(SYMBOL_RECORD_SIZE) {
            let symbol = record[0];
            let mut freq_bytes = [0u8; 8];
            freq_bytes.copy_from_slice(&record[1..]);
            let freq = u64::from_ne_bytes(freq_bytes);

            if freq == 0 {
                return Err(MalformedContainer::ZeroFrequency(symbol).into());
            }
            if table.get(symbol) != 0 {
                return Err(MalformedContainer::DuplicateSymbol(symbol).into());
            }
            table.set(symbol, freq);
        }
        table.total()?;

        log::debug!("read header: {} symbols, {} bytes", count, header_len);
        Ok((Self { table }, header_len))
    }
}

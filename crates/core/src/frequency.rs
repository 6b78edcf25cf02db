//! Byte frequency modeling.
//!
//! A [`FrequencyTable`] holds one `u64` counter per byte value. It is built
//! once per encode pass (or rebuilt from a container header on decode) and
//! handed explicitly to the tree builder; nothing here is global.

use std::io::{BufReader, Read};

use crate::error::{Error, MalformedContainer, Phase, Result};

/// Number of distinct byte values.
pub const SYMBOL_COUNT: usize = 256;

/// Occurrence count for every byte value 0-255.
#[derive(Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; SYMBOL_COUNT],
}

impl FrequencyTable {
    /// An all-zero table.
    pub fn new() -> Self {
        Self {
            counts: [0; SYMBOL_COUNT],
        }
    }

    /// Tally the bytes of an in-memory slice.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut table = Self::new();
        table.update(data);
        table
    }

    /// Tally every byte a reader yields until EOF.
    ///
    /// # Errors
    /// `Error::SourceUnavailable` tagged with [`Phase::FrequencyScan`].
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = BufReader::new(reader);
        let mut table = Self::new();
        let mut buf = [0u8; 8192];
        loop {
            let n = match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::source_unavailable(Phase::FrequencyScan)(e)),
            };
            table.update(&buf[..n]);
        }
        Ok(table)
    }

    /// Add the bytes of `data` to the running counts.
    pub fn update(&mut self, data: &[u8]) {
        for &byte in data {
            self.counts[byte as usize] += 1;
        }
    }

    pub fn get(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    pub fn set(&mut self, symbol: u8, count: u64) {
        self.counts[symbol as usize] = count;
    }

    /// Number of byte values with a non-zero count.
    pub fn distinct_symbols(&self) -> usize {
        self.counts.iter().filter(|&&c| c != 0).count()
    }

    /// Sum of all counts, i.e. the length of the input that produced them.
    ///
    /// # Errors
    /// `MalformedContainer::TotalOverflow` if the sum exceeds `u64::MAX`,
    /// which can only happen for a table read from a hostile header.
    pub fn total(&self) -> Result<u64> {
        self.counts
            .iter()
            .try_fold(0u64, |acc, &c| acc.checked_add(c))
            .ok_or_else(|| MalformedContainer::TotalOverflow.into())
    }

    /// Non-zero `(symbol, count)` pairs in ascending symbol order.
    pub fn symbols(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c != 0)
            .map(|(s, &c)| (s as u8, c))
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FrequencyTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.symbols()).finish()
    }
}

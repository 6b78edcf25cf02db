//! Statistics for a single encode or decode pass.
//!
//! `CodecStats` is filled in by [`crate::codec::encode`] and
//! [`crate::codec::decode`] and returned to the caller. It is plain data:
//! no atomics, no sharing between passes.

use std::time::{Duration, Instant};

/// Counts and timing for one pass.
#[derive(Debug, Clone)]
pub struct CodecStats {
    /// When the pass started
    pub start_time: Instant,

    /// When the pass ended (set on completion)
    pub end_time: Option<Instant>,

    /// Bytes read from the source
    pub input_bytes: u64,

    /// Bytes written to the sink
    pub output_bytes: u64,

    /// Symbols with a non-zero frequency
    pub distinct_symbols: usize,

    /// Size of the container header
    pub header_bytes: u64,

    /// Size of the bit-packed payload, including padding
    pub payload_bytes: u64,

    /// Meaningful payload bits, excluding padding
    pub payload_bits: u64,
}

impl CodecStats {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            end_time: None,
            input_bytes: 0,
            output_bytes: 0,
            distinct_symbols: 0,
            header_bytes: 0,
            payload_bytes: 0,
            payload_bits: 0,
        }
    }

    /// Mark the pass as complete.
    pub fn complete(&mut self) {
        self.end_time = Some(Instant::now());
    }

    /// Total duration (or current elapsed if not complete).
    pub fn duration(&self) -> Duration {
        match self.end_time {
            Some(end) => end.duration_since(self.start_time),
            None => self.start_time.elapsed(),
        }
    }

    /// Output size over input size; 0.0 when nothing was read.
    pub fn compression_ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            0.0
        } else {
            self.output_bytes as f64 / self.input_bytes as f64
        }
    }

    /// Average payload bits per encoded symbol.
    ///
    /// On an encode pass the symbol count is `input_bytes`; on a decode pass
    /// it is `output_bytes`.
    pub fn bits_per_symbol(&self, symbols: u64) -> f64 {
        if symbols == 0 {
            0.0
        } else {
            self.payload_bits as f64 / symbols as f64
        }
    }

    /// Print a human-readable summary to stdout.
    pub fn print_summary(&self, label: &str) {
        println!("=== {} ===", label);
        println!("Duration: {} ms", self.duration().as_millis());
        println!("Input:  {} bytes", self.input_bytes);
        println!("Output: {} bytes", self.output_bytes);
        println!("Distinct symbols: {}", self.distinct_symbols);
        println!(
            "Header: {} bytes, payload: {} bytes ({} bits)",
            self.header_bytes, self.payload_bytes, self.payload_bits
        );
        println!("Ratio: {:.1}%", self.compression_ratio() * 100.0);
        println!();
    }

    /// Export as `key=value` lines (for parsing/testing).
    pub fn export_text(&self) -> String {
        format!(
            "duration_ms={}\n\
             input_bytes={}\n\
             output_bytes={}\n\
             distinct_symbols={}\n\
             header_bytes={}\n\
             payload_bytes={}\n\
             payload_bits={}\n\
             compression_ratio={:.4}\n",
            self.duration().as_millis(),
            self.input_bytes,
            self.output_bytes,
            self.distinct_symbols,
            self.header_bytes,
            self.payload_bytes,
            self.payload_bits,
            self.compression_ratio(),
        )
    }
}

impl Default for CodecStats {
    fn default() -> Self {
        Self::new()
    }
}

//! Configuration for the huffc application.
//!
//! File locations are fixed: the tool always compresses `input.txt` into
//! `encoded.bin` and restores it into `decoded.txt` in the working
//! directory. Log verbosity comes from `RUST_LOG`.

use std::path::PathBuf;

pub const INPUT_FILE: &str = "input.txt";
pub const ENCODED_FILE: &str = "encoded.bin";
pub const DECODED_FILE: &str = "decoded.txt";

/// Complete configuration for one encode-then-decode run.
#[derive(Debug, Clone)]
pub struct Config {
    /// File to compress
    pub input_file: PathBuf,

    /// Container written by the encode pass
    pub encoded_file: PathBuf,

    /// Output of the decode pass
    pub decoded_file: PathBuf,

    /// Whether to print per-pass statistics
    pub print_summary: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_file: PathBuf::from(INPUT_FILE),
            encoded_file: PathBuf::from(ENCODED_FILE),
            decoded_file: PathBuf::from(DECODED_FILE),
            print_summary: true,
        }
    }
}

impl Config {
    /// Print the configuration in human-readable form.
    pub fn print(&self) {
        println!("=== Configuration ===");
        println!("Input file:   {}", self.input_file.display());
        println!("Encoded file: {}", self.encoded_file.display());
        println!("Decoded file: {}", self.decoded_file.display());
        println!();
    }
}

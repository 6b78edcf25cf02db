//! huffc-core: static Huffman compression codec
//!
//! Derives a prefix-free code from the byte frequencies of an input, writes
//! the frequency table and the bit-packed payload to a container, and
//! restores the original bytes from that container.
//!
//! # Architecture
//!
//! Leaf-first:
//! - `frequency`: per-byte occurrence counts
//! - `heap`: min-heap with insertion-order tie-break
//! - `tree`: Huffman tree construction
//! - `codes`: root-to-leaf code assignment
//! - `bitio`: MSB-first bit writer and reader
//! - `container`: frequency-table header format
//! - `decoder`: tree-walking payload decoder
//! - `codec`: complete encode/decode passes
//! - `stats`: per-pass counts and timing
//!
//! # Example
//! ```
//! let container = huffc_core::compress(b"abracadabra").unwrap();
//! assert_eq!(huffc_core::decompress(&container).unwrap(), b"abracadabra");
//! ```

pub mod bitio;
pub mod codec;
pub mod codes;
pub mod container;
pub mod decoder;
pub mod error;
pub mod frequency;
pub mod heap;
pub mod stats;
pub mod tree;

pub use codec::{compress, decode, decode_file, decompress, encode, encode_file};
pub use error::{Error, Phase, Result};

//! Tree-walking payload decoder.
//!
//! The walk starts at the root, follows left on `0` and right on `1`, and on
//! reaching a leaf emits its symbol and returns to the root. The header's
//! frequency total says how many symbols to emit, so decoding stops there
//! and never interprets padding bits as data.

use std::io::Write;

use crate::bitio::BitReader;
use crate::error::{BitIoError, Error, MalformedContainer, Phase, Result};
use crate::tree::{HuffNode, HuffmanTree};

const OUTPUT_BUFFER: usize = 8192;

/// Bit-at-a-time walker over a tree with at least one internal node.
#[derive(Debug, Clone)]
pub struct Decoder<'t> {
    root: &'t HuffNode,
    current: &'t HuffNode,
}

impl<'t> Decoder<'t> {
    /// Returns `None` for a single-leaf tree, which has no edges to walk.
    pub fn new(tree: &'t HuffmanTree) -> Option<Self> {
        if tree.is_single_leaf() {
            return None;
        }
        Some(Self {
            root: tree.root(),
            current: tree.root(),
        })
    }

    /// Follow one edge; yields the symbol when a leaf is reached.
    pub fn step(&mut self, bit: bool) -> Option<u8> {
        let next = self.current.child(bit)?;
        match next {
            HuffNode::Leaf { symbol, .. } => {
                self.current = self.root;
                Some(*symbol)
            }
            HuffNode::Internal { .. } => {
                self.current = next;
                None
            }
        }
    }

    /// True between symbols.
    pub fn at_root(&self) -> bool {
        std::ptr::eq(self.current, self.root)
    }
}

/// Decode `expected` symbols from `payload` into `sink`.
///
/// `tree` is `None` when the header listed no symbols.
///
/// # Errors
/// - `Error::TraversalOnEmptyTree` if there is no tree but the payload is non-empty
/// - `MalformedContainer::TruncatedPayload` if bits run out early
/// - `MalformedContainer::TrailingData` if whole bytes follow the last symbol
/// - `MalformedContainer::NonZeroPadding` if the final byte's padding is not zero
/// - `Error::SinkUnavailable` tagged with [`Phase::Decode`]
pub fn decode_payload<W: Write>(
    tree: Option<&HuffmanTree>,
    expected: u64,
    payload: &[u8],
    sink: &mut W,
) -> Result<u64> {
    let Some(tree) = tree else {
        if !payload.is_empty() {
            return Err(Error::TraversalOnEmptyTree {
                payload_bytes: payload.len(),
            });
        }
        return Ok(0);
    };

    let mut out = OutputBuffer::new(sink);

    let Some(mut decoder) = Decoder::new(tree) else {
        // Zero-length code: the frequency is the only record of the run length
        if !payload.is_empty() {
            return Err(MalformedContainer::TrailingData {
                extra_bytes: payload.len(),
            }
            .into());
        }
        if let HuffNode::Leaf { symbol, .. } = tree.root() {
            out.repeat(*symbol, expected)?;
        }
        out.flush()?;
        return Ok(expected);
    };

    let mut reader = BitReader::new(payload);
    let mut decoded = 0u64;
    while decoded < expected {
        let bit = reader.read_bit().map_err(|e| match e {
            Error::BitIo(BitIoError::UnexpectedEof) => {
                MalformedContainer::TruncatedPayload { decoded, expected }.into()
            }
            other => other,
        })?;
        if let Some(symbol) = decoder.step(bit) {
            out.push(symbol)?;
            decoded += 1;
        }
    }
    out.flush()?;

    check_padding(&mut reader)?;
    Ok(decoded)
}

/// Everything after the last code must be zero bits within the final byte.
fn check_padding(reader: &mut BitReader<'_>) -> Result<()> {
    let remaining = reader.bits_remaining();
    if remaining >= 8 {
        return Err(MalformedContainer::TrailingData {
            extra_bytes: remaining / 8,
        }
        .into());
    }
    if reader.read_bits(remaining)? != 0 {
        return Err(MalformedContainer::NonZeroPadding.into());
    }
    Ok(())
}

struct OutputBuffer<'w, W: Write> {
    sink: &'w mut W,
    buf: Vec<u8>,
}

impl<'w, W: Write> OutputBuffer<'w, W> {
    fn new(sink: &'w mut W) -> Self {
        Self {
            sink,
            buf: Vec::with_capacity(OUTPUT_BUFFER),
        }
    }

    fn push(&mut self, byte: u8) -> Result<()> {
        self.buf.push(byte);
        if self.buf.len() == OUTPUT_BUFFER {
            self.drain()?;
        }
        Ok(())
    }

    fn repeat(&mut self, byte: u8, mut count: u64) -> Result<()> {
        while count > 0 {
            let room = (OUTPUT_BUFFER - self.buf.len()) as u64;
            let n = count.min(room);
            self.buf.resize(self.buf.len() + n as usize, byte);
            count -= n;
            if self.buf.len() == OUTPUT_BUFFER {
                self.drain()?;
            }
        }
        Ok(())
    }

    fn drain(&mut self) -> Result<()> {
        self.sink
            .write_all(&self.buf)
            .map_err(Error::sink_unavailable(Phase::Decode))?;
        self.buf.clear();
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.drain()?;
        self.sink
            .flush()
            .map_err(Error::sink_unavailable(Phase::Decode))
    }
}

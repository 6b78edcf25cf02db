//! Error types for the huffc codec.
//!
//! Every pass (encode or decode) aborts on the first failure. Errors that
//! involve I/O carry the [`Phase`] that was running so callers can report
//! which stage failed and against which resource.

use std::fmt;
use std::io;

use thiserror::Error;

/// Pipeline stage in which an error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Counting byte occurrences in the source
    FrequencyScan,
    /// Building the Huffman tree from the frequency table
    TreeBuild,
    /// Writing the header and bit-packed payload
    Encode,
    /// Reading the container and regenerating the original bytes
    Decode,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::FrequencyScan => "frequency scan",
            Phase::TreeBuild => "tree build",
            Phase::Encode => "encode",
            Phase::Decode => "decode",
        };
        f.write_str(name)
    }
}

/// Top-level error type for all codec operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The input could not be opened, read or rewound
    #[error("{phase}: source unavailable: {source}")]
    SourceUnavailable {
        phase: Phase,
        #[source]
        source: io::Error,
    },

    /// The output could not be opened, written or flushed
    #[error("{phase}: sink unavailable: {source}")]
    SinkUnavailable {
        phase: Phase,
        #[source]
        source: io::Error,
    },

    /// The container header or payload is inconsistent
    #[error("decode: malformed container: {0}")]
    MalformedContainer(#[from] MalformedContainer),

    /// Payload bits are present but the header describes no symbols
    #[error("decode: {payload_bytes} payload bytes present but no tree was built")]
    TraversalOnEmptyTree { payload_bytes: usize },

    /// Bit-level reader/writer misuse
    #[error("bit I/O error: {0}")]
    BitIo(#[from] BitIoError),
}

impl Error {
    pub(crate) fn source_unavailable(phase: Phase) -> impl FnOnce(io::Error) -> Error {
        move |source| Error::SourceUnavailable { phase, source }
    }

    pub(crate) fn sink_unavailable(phase: Phase) -> impl FnOnce(io::Error) -> Error {
        move |source| Error::SinkUnavailable { phase, source }
    }

    /// The phase this error was raised in.
    pub fn phase(&self) -> Phase {
        match self {
            Error::SourceUnavailable { phase, .. } | Error::SinkUnavailable { phase, .. } => *phase,
            Error::MalformedContainer(_) | Error::TraversalOnEmptyTree { .. } => Phase::Decode,
            Error::BitIo(_) => Phase::Encode,
        }
    }
}

/// Ways a container can fail validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MalformedContainer {
    /// Header count field is negative
    #[error("negative symbol count {0}")]
    NegativeSymbolCount(i32),

    /// Header claims more symbols than a byte alphabet holds
    #[error("symbol count {0} exceeds 256")]
    TooManySymbols(usize),

    /// Not enough bytes for the declared header
    #[error("header truncated: need {expected} bytes, got {actual}")]
    TruncatedHeader { expected: usize, actual: usize },

    /// The same symbol appears twice in the header
    #[error("symbol {0:#04x} listed more than once")]
    DuplicateSymbol(u8),

    /// A listed symbol has a zero frequency
    #[error("symbol {0:#04x} listed with zero frequency")]
    ZeroFrequency(u8),

    /// Sum of frequencies does not fit in 64 bits
    #[error("frequency total overflows u64")]
    TotalOverflow,

    /// Payload ran out before every symbol was decoded
    #[error("payload truncated after {decoded} of {expected} symbols")]
    TruncatedPayload { decoded: u64, expected: u64 },

    /// Whole bytes follow the last decoded symbol
    #[error("{extra_bytes} unexpected bytes after payload")]
    TrailingData { extra_bytes: usize },

    /// Padding bits in the final byte are not zero
    #[error("non-zero padding bits in final payload byte")]
    NonZeroPadding,
}

/// Bit-level I/O errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BitIoError {
    /// Attempted to read past the end of the buffer
    #[error("unexpected end of bit stream")]
    UnexpectedEof,

    /// Requested more than 64 bits in one call
    #[error("invalid bit count: {0}")]
    InvalidBitCount(usize),
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;

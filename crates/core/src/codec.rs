//! End-to-end encode and decode passes.
//!
//! Encoding reads the source twice: once to count frequencies, then (after
//! an explicit rewind) again to emit codes. Decoding reads the whole
//! container, rebuilds the tree from the header and walks the payload.
//!
//! Any error aborts the pass. The in-memory helpers return nothing on
//! failure; the file helpers remove the partially written output.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Cursor, Read, Seek, Write};
use std::path::Path;

use crate::bitio::BitWriter;
use crate::codes::CodeTable;
use crate::container::Header;
use crate::decoder::decode_payload;
use crate::error::{Error, Phase, Result};
use crate::frequency::FrequencyTable;
use crate::stats::CodecStats;
use crate::tree::HuffmanTree;

/// Compress everything `source` yields into a container written to `sink`.
///
/// # Errors
/// - `Error::SourceUnavailable` if the source cannot be read or rewound, or
///   its content changes between the two reads
/// - `Error::SinkUnavailable` if the sink rejects a write or flush
pub fn encode<R, W>(mut source: R, mut sink: W) -> Result<CodecStats>
where
    R: Read + Seek,
    W: Write,
{
    let mut stats = CodecStats::new();

    let table = FrequencyTable::from_reader(&mut source)?;
    let total = table.total()?;
    stats.input_bytes = total;
    stats.distinct_symbols = table.distinct_symbols();
    log::debug!(
        "frequency scan: {} bytes, {} distinct symbols",
        total,
        stats.distinct_symbols
    );

    let tree = HuffmanTree::build(&table);
    let codes = tree.as_ref().map(CodeTable::from_tree);
    if let Some(codes) = &codes {
        log::debug!(
            "assigned {} codes, longest {} bits, payload {} bits",
            codes.len(),
            codes.max_code_len(),
            codes.encoded_bits(&table)
        );
    }

    let header = Header::from_table(&table);
    stats.header_bytes = header.write_to(&mut sink)? as u64;

    source
        .rewind()
        .map_err(Error::source_unavailable(Phase::Encode))?;

    let mut writer = BitWriter::new(&mut sink);
    let mut reader = BufReader::new(source);
    let mut buf = [0u8; 8192];
    let mut seen = 0u64;
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(Error::source_unavailable(Phase::Encode)(e)),
        };
        for &byte in &buf[..n] {
            let code = codes
                .as_ref()
                .and_then(|c| c.get(byte))
                .ok_or_else(|| source_changed(format!("byte {:#04x} was not counted", byte)))?;
            writer.write_code(code)?;
        }
        seen += n as u64;
    }
    if seen != total {
        return Err(source_changed(format!(
            "counted {} bytes, re-read {}",
            total, seen
        )));
    }

    stats.payload_bits = writer.bit_len();
    stats.payload_bytes = stats.payload_bits.div_ceil(8);
    writer.finish()?;

    stats.output_bytes = stats.header_bytes + stats.payload_bytes;
    stats.complete();
    log::debug!(
        "encoded {} -> {} bytes in {} ms",
        stats.input_bytes,
        stats.output_bytes,
        stats.duration().as_millis()
    );
    Ok(stats)
}

/// Restore the original bytes from a container read from `source`.
///
/// # Errors
/// - `Error::SourceUnavailable` if the container cannot be read
/// - `Error::MalformedContainer` if the header or payload is inconsistent
/// - `Error::TraversalOnEmptyTree` if there are payload bytes but no symbols
/// - `Error::SinkUnavailable` if the sink rejects a write or flush
pub fn decode<R, W>(mut source: R, mut sink: W) -> Result<CodecStats>
where
    R: Read,
    W: Write,
{
    let mut stats = CodecStats::new();

    let mut container = Vec::new();
    source
        .read_to_end(&mut container)
        .map_err(Error::source_unavailable(Phase::Decode))?;
    stats.input_bytes = container.len() as u64;

    let (header, header_len) = Header::read_from(&container)?;
    let payload = &container[header_len..];
    let table = header.into_table();
    let expected = table.total()?;
    stats.header_bytes = header_len as u64;
    stats.payload_bytes = payload.len() as u64;
    stats.distinct_symbols = table.distinct_symbols();

    let tree = HuffmanTree::build(&table);
    if let Some(tree) = &tree {
        stats.payload_bits = CodeTable::from_tree(tree).encoded_bits(&table);
    }
    log::debug!(
        "decoding {} symbols from {} payload bytes",
        expected,
        payload.len()
    );

    stats.output_bytes = decode_payload(tree.as_ref(), expected, payload, &mut sink)?;
    stats.complete();
    Ok(stats)
}

/// Encode an in-memory buffer into a container.
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    encode(Cursor::new(data), &mut out)?;
    Ok(out)
}

/// Decode an in-memory container.
pub fn decompress(container: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    decode(container, &mut out)?;
    Ok(out)
}

/// Encode the file at `input` into a new container file at `output`.
pub fn encode_file(input: &Path, output: &Path) -> Result<CodecStats> {
    let source = File::open(input).map_err(Error::source_unavailable(Phase::FrequencyScan))?;
    let sink = File::create(output).map_err(Error::sink_unavailable(Phase::Encode))?;
    discard_on_error(output, encode(source, BufWriter::new(sink)))
}

/// Decode the container file at `input` into a new file at `output`.
pub fn decode_file(input: &Path, output: &Path) -> Result<CodecStats> {
    let source = File::open(input).map_err(Error::source_unavailable(Phase::Decode))?;
    let sink = File::create(output).map_err(Error::sink_unavailable(Phase::Decode))?;
    discard_on_error(output, decode(BufReader::new(source), BufWriter::new(sink)))
}

fn discard_on_error(output: &Path, result: Result<CodecStats>) -> Result<CodecStats> {
    if result.is_err() {
        if let Err(e) = fs::remove_file(output) {
            log::warn!("could not remove partial output {}: {}", output.display(), e);
        }
    }
    result
}

fn source_changed(detail: String) -> Error {
    Error::SourceUnavailable {
        phase: Phase::Encode,
        source: io::Error::new(
            io::ErrorKind::InvalidData,
            format!("input changed after frequency scan: {}", detail),
        ),
    }
}

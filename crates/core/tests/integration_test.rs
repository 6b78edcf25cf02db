//! Integration tests for the full huffc pipeline.
//!
//! These tests verify end-to-end behavior: input -> frequency scan -> tree ->
//! codes -> container -> decode -> output, through both in-memory buffers and
//! real files.

use std::fs;
use std::io::Cursor;
use std::path::PathBuf;

use huffc_core::{
    codes::CodeTable,
    container::Header,
    error::MalformedContainer,
    frequency::FrequencyTable,
    tree::HuffmanTree,
    compress, decode, decode_file, decompress, encode, encode_file, Error, Phase,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seeded data with mixed compressibility: runs, text, patterns and noise.
fn sample_data(seed: u64, size_bytes: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut data = Vec::with_capacity(size_bytes);

    while data.len() < size_bytes {
        let chunk_size = (size_bytes - data.len()).min(4096);
        match rng.gen_range(0..10u8) {
            0..=2 => {
                let byte: u8 = rng.gen();
                data.extend(std::iter::repeat(byte).take(chunk_size));
            }
            3..=5 => {
                let alphabet = b"abcdefghijklmnopqrstuvwxyz .!,\n";
                for _ in 0..chunk_size {
                    data.push(alphabet[rng.gen_range(0..alphabet.len())]);
                }
            }
            6..=7 => {
                let pattern: Vec<u8> = (0..rng.gen_range(4..=32)).map(|_| rng.gen()).collect();
                data.extend(pattern.iter().cycle().take(chunk_size));
            }
            _ => {
                for _ in 0..chunk_size {
                    data.push(rng.gen());
                }
            }
        }
    }

    data
}

struct TempDir(PathBuf);

impl TempDir {
    fn new(name: &str) -> Self {
        let path = std::env::temp_dir().join(format!("huffc-{}-{}", name, std::process::id()));
        fs::create_dir_all(&path).expect("create temp dir");
        Self(path)
    }

    fn file(&self, name: &str) -> PathBuf {
        self.0.join(name)
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.0);
    }
}

#[test]
fn test_sample_round_trips() {
    for seed in [1, 42, 12345] {
        let input = sample_data(seed, 50_000);
        let container = compress(&input).expect("compression failed");
        let output = decompress(&container).expect("decompression failed");
        assert_eq!(output, input, "seed {} did not round-trip", seed);
    }
}

#[test]
fn test_text_compresses() {
    let input = b"The quick brown fox jumps over the lazy dog. ".repeat(200);
    let container = compress(&input).unwrap();
    assert!(container.len() < input.len() * 3 / 4);
    assert_eq!(decompress(&container).unwrap(), input);
}

#[test]
fn test_all_symbols() {
    let input: Vec<u8> = (0..=255).collect();
    let container = compress(&input).unwrap();
    // 256 equal weights give 8-bit codes, so the payload is exactly 256 bytes
    assert_eq!(container.len(), 4 + 256 * 9 + 256);
    assert_eq!(decompress(&container).unwrap(), input);
}

#[test]
fn test_degenerate_thousand_a() {
    let input = vec![0x41u8; 1000];
    let container = compress(&input).unwrap();

    let (header, consumed) = Header::read_from(&container).unwrap();
    assert_eq!(consumed, container.len(), "single symbol must not emit payload");
    assert_eq!(header.table().get(0x41), 1000);

    assert_eq!(decompress(&container).unwrap(), input);
}

#[test]
fn test_aaab_scenario() {
    let input = b"aaab";
    let table = FrequencyTable::from_bytes(input);
    assert_eq!(table.get(b'a'), 3);
    assert_eq!(table.get(b'b'), 1);

    let tree = HuffmanTree::build(&table).unwrap();
    assert_eq!(tree.weight(), 4);

    let codes = CodeTable::from_tree(&tree);
    let a = codes.get(b'a').unwrap();
    let b = codes.get(b'b').unwrap();
    assert_eq!(a.len(), 1);
    assert_eq!(b.len(), 1);
    assert_ne!(a, b);

    assert_eq!(decompress(&compress(input).unwrap()).unwrap(), input);
}

#[test]
fn test_header_fidelity_on_sample() {
    let input = sample_data(7, 10_000);
    let table = FrequencyTable::from_bytes(&input);
    let container = compress(&input).unwrap();

    let count = i32::from_ne_bytes(container[..4].try_into().unwrap());
    assert_eq!(count as usize, table.distinct_symbols());

    let (header, _) = Header::read_from(&container).unwrap();
    assert_eq!(header.table().total().unwrap(), input.len() as u64);
}

#[test]
fn test_encoding_is_reproducible() {
    let input = sample_data(99, 20_000);
    assert_eq!(compress(&input).unwrap(), compress(&input).unwrap());
}

#[test]
fn test_stream_api_matches_helpers() {
    let input = sample_data(3, 5_000);
    let mut container = Vec::new();
    let enc = encode(Cursor::new(&input), &mut container).unwrap();
    assert_eq!(container, compress(&input).unwrap());
    assert_eq!(enc.output_bytes, container.len() as u64);

    let mut output = Vec::new();
    let dec = decode(&container[..], &mut output).unwrap();
    assert_eq!(output, input);
    assert_eq!(dec.output_bytes, input.len() as u64);
    assert_eq!(dec.payload_bits, enc.payload_bits);
}

#[test]
fn test_file_round_trip() {
    let dir = TempDir::new("files");
    let input_path = dir.file("input.txt");
    let encoded_path = dir.file("encoded.bin");
    let decoded_path = dir.file("decoded.txt");

    let input = sample_data(2024, 100_000);
    fs::write(&input_path, &input).unwrap();

    let enc = encode_file(&input_path, &encoded_path).unwrap();
    assert_eq!(enc.input_bytes, input.len() as u64);
    assert_eq!(fs::metadata(&encoded_path).unwrap().len(), enc.output_bytes);

    let dec = decode_file(&encoded_path, &decoded_path).unwrap();
    assert_eq!(dec.output_bytes, input.len() as u64);
    assert_eq!(fs::read(&decoded_path).unwrap(), input);
}

#[test]
fn test_empty_file_round_trip() {
    let dir = TempDir::new("empty");
    let input_path = dir.file("input.txt");
    let encoded_path = dir.file("encoded.bin");
    let decoded_path = dir.file("decoded.txt");
    fs::write(&input_path, b"").unwrap();

    encode_file(&input_path, &encoded_path).unwrap();
    assert_eq!(fs::read(&encoded_path).unwrap(), 0i32.to_ne_bytes().to_vec());

    decode_file(&encoded_path, &decoded_path).unwrap();
    assert!(fs::read(&decoded_path).unwrap().is_empty());
}

#[test]
fn test_corrupt_container_leaves_no_output() {
    let dir = TempDir::new("corrupt");
    let encoded_path = dir.file("encoded.bin");
    let decoded_path = dir.file("decoded.txt");

    let mut container = compress(b"some text to corrupt").unwrap();
    container.extend_from_slice(&[0, 0]);
    fs::write(&encoded_path, &container).unwrap();

    let err = decode_file(&encoded_path, &decoded_path).unwrap_err();
    assert!(matches!(
        err,
        Error::MalformedContainer(MalformedContainer::TrailingData { extra_bytes: 2 })
    ));
    assert_eq!(err.phase(), Phase::Decode);
    assert!(!decoded_path.exists());
}

#[test]
fn test_decode_missing_container() {
    let dir = TempDir::new("missing");
    let err = decode_file(&dir.file("encoded.bin"), &dir.file("decoded.txt")).unwrap_err();
    assert!(matches!(
        err,
        Error::SourceUnavailable {
            phase: Phase::Decode,
            ..
        }
    ));
}

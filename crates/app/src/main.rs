//! huffc: compress `input.txt` to `encoded.bin`, then restore it to
//! `decoded.txt`.
//!
//! Exit codes: 1 when the input cannot be read, 2 when the encode pass
//! fails, 3 when the decode pass fails, 4 when the decoded size differs.

mod config;

use std::path::Path;
use std::process::ExitCode;

use config::Config;
use huffc_core::{decode_file, encode_file, Error, Phase};

fn main() -> ExitCode {
    env_logger::init();

    let config = Config::default();
    if config.print_summary {
        config.print();
    }

    let encoded = match encode_file(&config.input_file, &config.encoded_file) {
        Ok(stats) => stats,
        Err(e) => {
            let code = encode_exit_code(&e);
            return fail(&e, code, &config.input_file, &config.encoded_file);
        }
    };
    log::info!(
        "{} -> {}: {} bytes",
        config.input_file.display(),
        config.encoded_file.display(),
        encoded.output_bytes
    );

    let decoded = match decode_file(&config.encoded_file, &config.decoded_file) {
        Ok(stats) => stats,
        Err(e) => return fail(&e, 3, &config.encoded_file, &config.decoded_file),
    };
    log::info!(
        "{} -> {}: {} bytes",
        config.encoded_file.display(),
        config.decoded_file.display(),
        decoded.output_bytes
    );

    if config.print_summary {
        encoded.print_summary("Encode");
        decoded.print_summary("Decode");
    }

    if decoded.output_bytes != encoded.input_bytes {
        eprintln!(
            "error: size mismatch: read {} bytes, restored {}",
            encoded.input_bytes, decoded.output_bytes
        );
        return ExitCode::from(4);
    }

    println!(
        "OK: {} bytes -> {} bytes ({:.1}%)",
        encoded.input_bytes,
        encoded.output_bytes,
        encoded.compression_ratio() * 100.0
    );
    ExitCode::SUCCESS
}

fn encode_exit_code(err: &Error) -> u8 {
    match err {
        Error::SourceUnavailable {
            phase: Phase::FrequencyScan,
            ..
        } => 1,
        _ => 2,
    }
}

/// Report `<resource>: <phase>: <cause>` on stderr.
fn fail(err: &Error, code: u8, source: &Path, sink: &Path) -> ExitCode {
    let resource = match err {
        Error::SinkUnavailable { .. } => sink,
        _ => source,
    };
    eprintln!("error: {}: {}", resource.display(), err);
    ExitCode::from(code)
}

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::time::Instant;

use anyhow::{Context, Result};

use crate::cli::{self, CliError, CompressArgs};
use crate::huffman;

pub fn compress(args: CompressArgs) -> Result<()> {
    let input_path = &args.input;
    let output_path = args.output.unwrap_or_else(|| cli::compressed_name(input_path));
    if output_path == *input_path {
        return Err(cli::CliError::OutputCollision(output_path).into());
    }
    let extension = cli::source_extension(input_path)?;

    let input = File::open(input_path).with_context(|| format!("failed to open {}", input_path.display()))?;
    let mut reader = BufReader::new(input);
    let output =
        File::create(&output_path).with_context(|| format!("failed to create {}", output_path.display()))?;
    let mut writer = BufWriter::new(output);

    let start = Instant::now();
    let result: Result<u64, CliError> = huffman::encode(&mut reader, &extension, &mut writer)
        .map_err(CliError::from)
        .and_then(|n| {
            writer.flush()?;
            Ok(n)
        });
    match result {
        Ok(original_len) => {
            let compressed_len = fs::metadata(&output_path).map(|m| m.len()).unwrap_or(0);
            tracing::info!(
                event = "compress_complete",
                input = %input_path.display(),
                output = %output_path.display(),
                elapsed_us = %start.elapsed().as_micros(),
                original_len,
                compressed_len,
                "compress finished"
            );
            Ok(())
        }
        Err(err) => {
            // Never leave a half-written container behind looking like a success.
            drop(writer);
            let _ = fs::remove_file(&output_path);
            Err(err).with_context(|| format!("failed to compress {}", input_path.display()))
        }
    }
}

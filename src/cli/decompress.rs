use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::time::Instant;

use anyhow::{Context, Result};

use crate::cli::{self, CliError, DecompressArgs};
use crate::huffman::{self, Header};

pub fn decompress(args: DecompressArgs) -> Result<()> {
    let input_path = &args.input;
    let input = File::open(input_path).with_context(|| format!("failed to open {}", input_path.display()))?;
    let mut reader = BufReader::new(input);

    let start = Instant::now();
    // The header comes first: the recovered extension decides the output name
    // before any payload byte is touched.
    let header = Header::read(&mut reader)
        .map_err(CliError::from)
        .with_context(|| format!("failed to parse {}", input_path.display()))?;
    let output_path = args
        .output
        .unwrap_or_else(|| cli::restored_name(input_path, &header.extension));
    if output_path == *input_path {
        return Err(cli::CliError::OutputCollision(output_path).into());
    }

    let output =
        File::create(&output_path).with_context(|| format!("failed to create {}", output_path.display()))?;
    let mut writer = BufWriter::new(output);

    let result: Result<(), CliError> = huffman::decode_payload(&header, &mut reader, &mut writer)
        .map_err(CliError::from)
        .and_then(|()| {
            writer.flush()?;
            Ok(())
        });
    match result {
        Ok(()) => {
            tracing::info!(
                event = "decompress_complete",
                input = %input_path.display(),
                output = %output_path.display(),
                elapsed_us = %start.elapsed().as_micros(),
                restored_len = header.symbol_count,
                extension = %header.extension,
                "decompress finished"
            );
            Ok(())
        }
        Err(err) => {
            // A partial restoration is worse than none.
            drop(writer);
            let _ = fs::remove_file(&output_path);
            Err(err).with_context(|| format!("failed to decompress {}", input_path.display()))
        }
    }
}

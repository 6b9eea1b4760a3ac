//! cli component of the huffpack project.
//!
//! Three subcommands, mirrored on the container format's two directions plus a
//! sanity check:
//!
//! > `$exename compress <input> [output]` (alias `c`) reads the input file,
//! > stores its extension in the container header, and writes a `.huffman`
//! > sibling (or the explicit output path).
//!
//! > `$exename decompress <input> [output]` (alias `d`) parses the container
//! > header first, recovers the original extension, and restores the original
//! > bytes next to the container (or at the explicit output path).
//!
//! > `$exename test <input>` compresses and decompresses the file in memory
//! > and reports whether the round trip was byte-exact, along with sizes,
//! > ratio and timings.
//!
//! The naming helpers in this module are the "naming collaborator" the codec
//! itself stays out of: deriving the stored extension from the input path and
//! turning a recovered extension back into an output file name.
use std::io;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use thiserror::Error;

pub mod compress;
pub mod decompress;

/// Extension attached to compressed containers.
pub const COMPRESSED_EXTENSION: &str = "huffman";

/// Error types for CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("file name {} is not representable", .0.display())]
    InvalidFileName(PathBuf),

    #[error("output path {} would overwrite the input", .0.display())]
    OutputCollision(PathBuf),

    #[error(transparent)]
    Huffman(#[from] crate::huffman::HuffmanError),
}

/// CLI arguments for the huffpack application
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Supported commands for huffpack
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compress a file into a .huffman container
    #[command(alias = "c")]
    Compress(CompressArgs),

    /// Restore the original file from a .huffman container
    #[command(alias = "d")]
    Decompress(DecompressArgs),

    /// Round-trip a file in memory and report the compression ratio
    Test(TestArgs),
}

/// Arguments specific to the compress command
#[derive(Args, Debug)]
pub struct CompressArgs {
    /// Path to the file to compress
    pub input: PathBuf,

    /// Where to write the container (defaults to a .huffman sibling)
    pub output: Option<PathBuf>,
}

/// Arguments specific to the decompress command
#[derive(Args, Debug)]
pub struct DecompressArgs {
    /// Path to the .huffman container
    pub input: PathBuf,

    /// Where to restore the original file (defaults to the container's base
    /// name with the recovered extension)
    pub output: Option<PathBuf>,
}

/// Arguments specific to the test command
#[derive(Args, Debug)]
pub struct TestArgs {
    /// Path to the file to round-trip
    pub input: PathBuf,
}

/// The extension stored in the container header so the decompressor can
/// restore the original name. A file without an extension stores the empty
/// string.
pub fn source_extension(path: &Path) -> Result<String, CliError> {
    match path.extension() {
        None => Ok(String::new()),
        Some(ext) => ext
            .to_str()
            .map(str::to_owned)
            .ok_or_else(|| CliError::InvalidFileName(path.to_path_buf())),
    }
}

/// `foo.txt` compresses into the sibling `foo.huffman`; the dropped `txt`
/// travels in the container header.
pub fn compressed_name(input: &Path) -> PathBuf {
    input.with_extension(COMPRESSED_EXTENSION)
}

/// `foo.huffman` restores to `foo.<extension>`, or bare `foo` when the
/// recovered extension is empty.
pub fn restored_name(input: &Path, extension: &str) -> PathBuf {
    input.with_extension(extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compressed_name_replaces_the_extension() {
        assert_eq!(compressed_name(Path::new("dir/foo.txt")), Path::new("dir/foo.huffman"));
        assert_eq!(compressed_name(Path::new("foo")), Path::new("foo.huffman"));
        assert_eq!(
            compressed_name(Path::new("archive.tar.gz")),
            Path::new("archive.tar.huffman")
        );
    }

    #[test]
    fn restored_name_reattaches_the_recovered_extension() {
        assert_eq!(
            restored_name(Path::new("dir/foo.huffman"), "txt"),
            Path::new("dir/foo.txt")
        );
        assert_eq!(restored_name(Path::new("foo.huffman"), ""), Path::new("foo"));
    }

    #[test]
    fn source_extension_defaults_to_empty() {
        assert_eq!(source_extension(Path::new("foo.txt")).unwrap(), "txt");
        assert_eq!(source_extension(Path::new("foo")).unwrap(), "");
        assert_eq!(source_extension(Path::new("archive.tar.gz")).unwrap(), "gz");
    }
}

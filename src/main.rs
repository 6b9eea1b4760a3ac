use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::{Cli, Command};

mod cli;
mod compressor;
mod huffman;
#[cfg(test)]
mod tests;

fn main() {
    let subscriber = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Compress(args) => cli::compress::compress(args),
        Command::Decompress(args) => cli::decompress::decompress(args),
        Command::Test(args) => cli::test::test(args),
    };
    if let Err(err) = result {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "pbodev CLI", long_about = None)]
pub struct Cli {
    /// Log every enumerated file, header and payload (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Pack a directory into a PBO archive
    Pack {
        /// source directory
        from: PathBuf,
        /// destination archive (created or truncated)
        to: PathBuf,

        /// archive prefix written to the product entry
        #[arg(long, default_value = "")]
        prefix: String,

        /// product version written after the prefix
        #[arg(long = "product-version", default_value = "")]
        product_version: String,

        /// write zero timestamps so repeated packs are byte-identical
        #[arg(long)]
        deterministic: bool,
    },

    /// List the files a pack of this directory would contain, in archive order
    Files {
        /// source directory
        from: PathBuf,
    },
}

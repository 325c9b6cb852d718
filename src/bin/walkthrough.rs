//! Writes the Afric Froid platform walkthrough as a `.docx` file.
//!
//! # Usage
//!
//! ```sh
//! cargo run --bin walkthrough
//! cargo run --bin walkthrough -- out/walkthrough.docx --a4
//! ```

use clap::Parser;
use docwright::ooxml::docx::writer::SectionProperties;
use docwright::ooxml::opc::Compression;
use docwright::walkthrough::{self, DEFAULT_OUTPUT_NAME};
use docwright::{SerializeOptions, Serializer};
use std::error::Error;
use std::path::PathBuf;

/// Generate the platform walkthrough document
#[derive(Parser, Debug)]
#[command(name = "walkthrough", version)]
struct Args {
    /// Output file
    #[arg(value_name = "OUTPUT", default_value = DEFAULT_OUTPUT_NAME)]
    output: PathBuf,

    /// Use A4 paper instead of Letter
    #[arg(long)]
    a4: bool,

    /// Landscape orientation
    #[arg(long)]
    landscape: bool,

    /// Store parts without compression
    #[arg(long)]
    stored: bool,
}

impl Args {
    fn options(&self) -> SerializeOptions {
        let mut section = if self.a4 {
            SectionProperties::a4()
        } else {
            SectionProperties::letter()
        };
        if self.landscape {
            section = section.landscape();
        }
        let compression = if self.stored {
            Compression::Stored
        } else {
            Compression::Deflated
        };
        SerializeOptions::new()
            .with_section(section)
            .with_compression(compression)
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let result = walkthrough::build().and_then(|tree| {
        Serializer::with_options(args.options()).serialize_to_path(&tree, &args.output)
    });

    match result {
        Ok(path) => println!("Document saved successfully to {}", path.display()),
        Err(e) => {
            if e.is_build_error() {
                eprintln!("Invalid document content: {}", e);
            } else {
                eprintln!("Error writing document: {}", e);
            }
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {}", cause);
                source = cause.source();
            }
            std::process::exit(1);
        },
    }
}

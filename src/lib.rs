//! Docwright - builds word-processing documents and writes them as `.docx`
//!
//! A document is an ordered list of blocks (headings, paragraphs, bulleted list
//! items and page breaks) made of styled text runs. Default styling lives in an
//! immutable [`StyleRegistry`]; each run resolves its font family, size, weight
//! and color through the run itself, then the block's heading tier, then the
//! registry. The [`Serializer`] renders the tree into a WordprocessingML package.
//!
//! # Features
//!
//! - **Content model**: append-only [`DocumentTree`] builder with validation
//! - **Serializer**: styles, bullet numbering, core/app properties and page setup
//! - **Atomic writes**: output goes through a temporary file in the target directory
//! - **Reader**: re-opens a package and yields resolved blocks for round-trips
//!
//! # Example
//!
//! ```no_run
//! use docwright::ooxml::docx::format::{Alignment, RgbColor};
//! use docwright::{DocumentTree, HeadingOptions, Run, Serializer, StyleRegistry};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut tree = DocumentTree::new(StyleRegistry::new("Segoe UI", 11.0)?);
//! tree.add_heading(
//!     "Afric Froid IIoT Platform",
//!     1,
//!     HeadingOptions::new()
//!         .with_alignment(Alignment::Center)
//!         .with_size(28.0)
//!         .with_color(RgbColor(0, 32, 96)),
//! )?;
//! tree.add_page_break();
//! tree.add_list_item(
//!     Run::new("Bilingual Interface: ").bold(true),
//!     vec![Run::new("Full support for English and French.")],
//! )?;
//!
//! let path = Serializer::new().serialize_to_path(&tree, "walkthrough.docx")?;
//! println!("Document saved successfully to {}", path.display());
//! # Ok(())
//! # }
//! ```

pub mod ooxml;
pub mod walkthrough;

pub use ooxml::docx::reader::{DocxReader, ParsedBlock};
pub use ooxml::docx::writer::{
    Block, BlockKind, BlockRef, DocumentProperties, DocumentTree, HeadingOptions, Run,
    SerializeOptions, Serializer, StyleRegistry,
};
pub use ooxml::error::{OoxmlError, Result};

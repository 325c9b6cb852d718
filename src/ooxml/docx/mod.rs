//! Word (.docx) document support.
//!
//! - [`writer`]: the block-level content model and the package serializer
//! - [`reader`]: reads a package back into resolved blocks
//! - [`format`], [`enums`]: value types shared by both
//!
//! # Example
//!
//! ```rust,no_run
//! use docwright::ooxml::docx::format::Alignment;
//! use docwright::ooxml::docx::reader::DocxReader;
//! use docwright::ooxml::docx::writer::{DocumentTree, HeadingOptions, Run, Serializer, StyleRegistry};
//!
//! let mut tree = DocumentTree::new(StyleRegistry::new("Calibri", 11.0)?);
//! tree.add_heading("Objective", 1, HeadingOptions::new())?;
//! tree.add_paragraph(vec![Run::new("Monitor every cold room.")], Alignment::Start)?;
//!
//! let path = Serializer::new().serialize_to_path(&tree, "objective.docx")?;
//! let blocks = DocxReader::open(&path)?.blocks()?;
//! assert_eq!(blocks, tree.resolved_blocks());
//! # Ok::<(), docwright::ooxml::error::OoxmlError>(())
//! ```
pub mod enums;
pub mod format;
pub mod reader;
pub mod writer;

pub use reader::{DocxReader, ParsedBlock};
pub use writer::{DocumentTree, Serializer, StyleRegistry};

//! Document builder and serializer for DOCX.
//!
//! Build a [`DocumentTree`] against a [`StyleRegistry`], then hand it to a
//! [`Serializer`] to produce a `.docx` package.

pub mod doc;
pub mod numbering;
pub mod options;
pub mod paragraph;
pub mod props;
pub mod run;
pub mod section;
pub mod serializer;
pub mod style;

pub use doc::{BlockRef, DocumentTree};
pub use options::SerializeOptions;
pub use paragraph::{Block, BlockKind, HeadingOptions, ResolvedBlock};
pub use props::DocumentProperties;
pub use run::{ResolvedRun, Run, RunDefaults};
pub use section::SectionProperties;
pub use serializer::Serializer;
pub use style::{HeadingTier, MutableStyle, StyleRegistry, generate_styles_xml, heading_tier};

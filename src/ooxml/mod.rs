//! Office Open XML (OOXML) word-processing documents.
//!
//! # Architecture
//!
//! 1. **OPC Layer** (`opc`): package handling (ZIP, parts, relationships, content types)
//! 2. **Shared Utilities** (`shared`, `error`): XML escaping and the error type
//! 3. **Word documents** (`docx`): the content model, its serializer and a reader
pub mod docx;
pub mod error;
pub mod opc;
pub mod shared;

pub use opc::{OpcPackage, PackURI};

pub use error::{OoxmlError, Result};

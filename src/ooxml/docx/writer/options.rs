/// Configuration for serializing a document.
use crate::ooxml::docx::writer::section::SectionProperties;
use crate::ooxml::opc::Compression;

/// Options controlling how a [`DocumentTree`] is packaged.
///
/// # Examples
///
/// ```rust
/// use docwright::ooxml::docx::writer::{SectionProperties, SerializeOptions};
/// use docwright::ooxml::opc::Compression;
///
/// let options = SerializeOptions::new()
///     .with_section(SectionProperties::a4())
///     .with_compression(Compression::Stored);
/// assert_eq!(options.section.page_width, 11906);
/// ```
///
/// [`DocumentTree`]: crate::ooxml::docx::writer::DocumentTree
#[derive(Debug, Clone, PartialEq)]
pub struct SerializeOptions {
    /// How archive members are stored
    pub compression: Compression,
    /// Page size and margins for the single body section
    pub section: SectionProperties,
    /// Whether to write `docProps/core.xml` and `docProps/app.xml`
    pub write_core_properties: bool,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            compression: Compression::Deflated,
            section: SectionProperties::default(),
            write_core_properties: true,
        }
    }
}

impl SerializeOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    pub fn with_section(mut self, section: SectionProperties) -> Self {
        self.section = section;
        self
    }

    pub fn with_core_properties(mut self, write: bool) -> Self {
        self.write_core_properties = write;
        self
    }
}

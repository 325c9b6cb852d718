/// Serializes a [`DocumentTree`] into a WordprocessingML package.
///
/// The whole package is rendered in memory before anything touches the output,
/// so a formatting error never leaves a partial file behind. File output goes
/// through a temporary file in the target directory that is renamed over the
/// target only once it is complete.
use crate::ooxml::docx::writer::doc::DocumentTree;
use crate::ooxml::docx::writer::numbering::generate_numbering_xml;
use crate::ooxml::docx::writer::options::SerializeOptions;
use crate::ooxml::docx::writer::paragraph::BlockKind;
use crate::ooxml::docx::writer::props::{DocumentStats, generate_app_xml, generate_core_xml};
use crate::ooxml::docx::writer::style::generate_styles_xml;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::constants::{content_type as ct, namespace, relationship_type as rt};
use crate::ooxml::opc::{OpcPackage, PackURI, PackageWriter, Part};
use chrono::Utc;
use std::fmt::Write as FmtWrite;
use std::io::{Seek, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

const DOCUMENT_URI: &str = "/word/document.xml";
const STYLES_URI: &str = "/word/styles.xml";
const NUMBERING_URI: &str = "/word/numbering.xml";
const SETTINGS_URI: &str = "/word/settings.xml";
const CORE_PROPERTIES_URI: &str = "/docProps/core.xml";
const APP_PROPERTIES_URI: &str = "/docProps/app.xml";

/// Writes document trees as `.docx` packages.
///
/// # Examples
///
/// ```
/// use docwright::ooxml::docx::format::Alignment;
/// use docwright::ooxml::docx::writer::{DocumentTree, Run, Serializer, StyleRegistry};
///
/// let mut tree = DocumentTree::new(StyleRegistry::default());
/// tree.add_paragraph(vec![Run::new("Hello")], Alignment::Start)?;
///
/// let bytes = Serializer::new().serialize(&tree)?;
/// assert!(bytes.starts_with(b"PK"));
/// # Ok::<(), docwright::ooxml::error::OoxmlError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Serializer {
    options: SerializeOptions,
}

impl Serializer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: SerializeOptions) -> Self {
        Self { options }
    }

    #[inline]
    pub fn options(&self) -> &SerializeOptions {
        &self.options
    }

    /// Serialize `tree` to package bytes.
    pub fn serialize(&self, tree: &DocumentTree) -> Result<Vec<u8>> {
        let package = self.build_package(tree)?;
        Ok(PackageWriter::to_bytes(&package, self.options.compression)?)
    }

    /// Serialize `tree` into a seekable stream.
    pub fn serialize_to_writer<W: Write + Seek>(&self, tree: &DocumentTree, writer: W) -> Result<()> {
        let package = self.build_package(tree)?;
        PackageWriter::write_to(writer, &package, self.options.compression)?;
        Ok(())
    }

    /// Serialize `tree` to `path`, replacing any existing file.
    ///
    /// Returns the absolute path written. On any error the target is left as it
    /// was.
    pub fn serialize_to_path(&self, tree: &DocumentTree, path: impl AsRef<Path>) -> Result<PathBuf> {
        let path = path.as_ref();
        let target = std::path::absolute(path).map_err(|e| OoxmlError::io(path, e))?;
        let bytes = self.serialize(tree)?;

        let parent = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let mut temp = NamedTempFile::new_in(&parent).map_err(|e| OoxmlError::io(&target, e))?;
        log::debug!("staging {} in {}", target.display(), temp.path().display());

        temp.write_all(&bytes)
            .and_then(|()| temp.flush())
            .and_then(|()| temp.as_file().sync_all())
            .map_err(|e| OoxmlError::io(&target, e))?;

        temp.persist(&target).map_err(|e| {
            let temp_path = e.file.path().to_path_buf();
            if let Err(cleanup) = e.file.close() {
                log::warn!(
                    "could not remove temporary file {}: {}",
                    temp_path.display(),
                    cleanup
                );
            }
            OoxmlError::io(&target, e.error)
        })?;

        log::info!(
            "wrote {} blocks ({} bytes) to {}",
            tree.len(),
            bytes.len(),
            target.display()
        );
        Ok(target)
    }

    /// Check every block before any output is produced.
    fn validate(tree: &DocumentTree) -> Result<()> {
        tree.blocks()
            .iter()
            .enumerate()
            .try_for_each(|(index, block)| block.validate(index))
    }

    fn build_package(&self, tree: &DocumentTree) -> Result<OpcPackage> {
        Self::validate(tree)?;

        let document_uri = PackURI::new(DOCUMENT_URI)?;
        let styles_uri = PackURI::new(STYLES_URI)?;
        let numbering_uri = PackURI::new(NUMBERING_URI)?;
        let settings_uri = PackURI::new(SETTINGS_URI)?;

        let mut document = Part::new(
            document_uri.clone(),
            ct::WML_DOCUMENT_MAIN,
            self.generate_document_xml(tree)?.into_bytes(),
        );
        document.relate_to(&styles_uri, rt::STYLES);
        document.relate_to(&numbering_uri, rt::NUMBERING);
        document.relate_to(&settings_uri, rt::SETTINGS);

        let mut package = OpcPackage::new();
        package.relate_to(&document_uri, rt::OFFICE_DOCUMENT);
        package.add_part(document)?;
        package.add_part(Part::new(
            styles_uri,
            ct::WML_STYLES,
            generate_styles_xml(tree.registry())?.into_bytes(),
        ))?;
        package.add_part(Part::new(
            numbering_uri,
            ct::WML_NUMBERING,
            generate_numbering_xml()?.into_bytes(),
        ))?;
        package.add_part(Part::new(
            settings_uri,
            ct::WML_SETTINGS,
            generate_settings_xml().into_bytes(),
        ))?;

        if self.options.write_core_properties {
            let core_uri = PackURI::new(CORE_PROPERTIES_URI)?;
            let app_uri = PackURI::new(APP_PROPERTIES_URI)?;

            let mut stats = DocumentStats::default();
            for block in tree.blocks() {
                if block.kind() != BlockKind::PageBreak {
                    let text: String = block.runs().iter().map(|run| run.text()).collect();
                    stats.add_paragraph(&text);
                }
            }

            package.relate_to(&core_uri, rt::CORE_PROPERTIES);
            package.relate_to(&app_uri, rt::EXTENDED_PROPERTIES);
            package.add_part(Part::new(
                core_uri,
                ct::OPC_CORE_PROPERTIES,
                generate_core_xml(tree.properties(), Utc::now())?.into_bytes(),
            ))?;
            package.add_part(Part::new(
                app_uri,
                ct::OFC_EXTENDED_PROPERTIES,
                generate_app_xml(&stats)?.into_bytes(),
            ))?;
        }

        Ok(package)
    }

    /// Render `word/document.xml`: blocks in order, then the section properties.
    fn generate_document_xml(&self, tree: &DocumentTree) -> Result<String> {
        let mut xml = String::with_capacity(1024 + tree.len() * 320);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        write!(
            xml,
            r#"<w:document xmlns:w="{}" xmlns:r="{}">"#,
            namespace::WML_MAIN,
            namespace::OFC_RELATIONSHIPS
        )?;
        xml.push_str("<w:body>");

        for block in tree.blocks() {
            block.to_xml(&mut xml, tree.registry())?;
        }
        self.options.section.to_xml(&mut xml)?;

        xml.push_str("</w:body></w:document>");
        log::debug!(
            "rendered {} blocks into {} bytes of document XML",
            tree.len(),
            xml.len()
        );
        Ok(xml)
    }
}

fn generate_settings_xml() -> String {
    let mut xml = String::with_capacity(512);
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push('\n');
    xml.push_str(r#"<w:settings xmlns:w=""#);
    xml.push_str(namespace::WML_MAIN);
    xml.push_str(r#"">"#);
    xml.push_str(r#"<w:zoom w:percent="100"/>"#);
    xml.push_str(r#"<w:defaultTabStop w:val="720"/>"#);
    xml.push_str(r#"<w:characterSpacingControl w:val="doNotCompress"/>"#);
    xml.push_str(concat!(
        r#"<w:compat><w:compatSetting w:name="compatibilityMode""#,
        r#" w:uri="http://schemas.microsoft.com/office/word" w:val="15"/></w:compat>"#,
    ));
    xml.push_str("</w:settings>");
    xml
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::docx::format::Alignment;
    use crate::ooxml::docx::writer::paragraph::{Block, HeadingOptions};
    use crate::ooxml::docx::writer::run::Run;
    use crate::ooxml::docx::writer::style::StyleRegistry;
    use crate::ooxml::opc::Compression;
    use std::io::Cursor;

    fn sample_tree() -> DocumentTree {
        let mut tree = DocumentTree::new(StyleRegistry::default());
        tree.add_heading("Objective", 1, HeadingOptions::new())
            .unwrap();
        tree.add_paragraph(vec![Run::new("Keep produce cold.")], Alignment::Justify)
            .unwrap();
        tree.add_page_break();
        tree
    }

    fn document_xml(bytes: Vec<u8>) -> String {
        let package = OpcPackage::from_reader(Cursor::new(bytes)).unwrap();
        let main = package.main_document_part().unwrap();
        String::from_utf8(main.blob().to_vec()).unwrap()
    }

    #[test]
    fn test_package_parts() {
        let bytes = Serializer::new().serialize(&sample_tree()).unwrap();
        let package = OpcPackage::from_reader(Cursor::new(bytes)).unwrap();

        let main = package.main_document_part().unwrap();
        for reltype in [rt::STYLES, rt::NUMBERING, rt::SETTINGS] {
            assert!(package.related_part(main, reltype).is_ok());
        }
        assert!(package.rels().target_of(rt::CORE_PROPERTIES).is_ok());
        assert!(package.rels().target_of(rt::EXTENDED_PROPERTIES).is_ok());
    }

    #[test]
    fn test_body_order_and_section() {
        let xml = document_xml(Serializer::new().serialize(&sample_tree()).unwrap());
        let heading = xml.find("Objective").unwrap();
        let body = xml.find("Keep produce cold.").unwrap();
        let page_break = xml.find(r#"w:type="page""#).unwrap();
        let section = xml.find("<w:sectPr>").unwrap();
        assert!(heading < body && body < page_break && page_break < section);
        assert_eq!(xml.matches("<w:p>").count(), 3);
    }

    #[test]
    fn test_empty_tree_is_a_valid_package() {
        let tree = DocumentTree::new(StyleRegistry::default());
        let xml = document_xml(Serializer::new().serialize(&tree).unwrap());
        assert!(xml.contains("<w:body><w:sectPr>"));
    }

    #[test]
    fn test_unsupported_level_fails_before_output() {
        let mut tree = sample_tree();
        tree.push(Block::heading(-1, vec![Run::new("bad")])).unwrap();

        let mut sink = Cursor::new(Vec::new());
        let err = Serializer::new()
            .serialize_to_writer(&tree, &mut sink)
            .unwrap_err();
        assert!(matches!(
            err,
            OoxmlError::UnsupportedFormatting { block: 3, .. }
        ));
        assert!(sink.get_ref().is_empty());
    }

    #[test]
    fn test_options_without_core_properties() {
        let serializer = Serializer::with_options(
            SerializeOptions::new()
                .with_core_properties(false)
                .with_compression(Compression::Stored),
        );
        let bytes = serializer.serialize(&sample_tree()).unwrap();
        let package = OpcPackage::from_reader(Cursor::new(bytes)).unwrap();
        assert!(package.rels().target_of(rt::CORE_PROPERTIES).is_err());
        assert!(package.main_document_part().is_ok());
    }
}

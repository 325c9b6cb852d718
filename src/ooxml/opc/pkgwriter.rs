//! Package writer for OPC packages.
//!
//! Serializes an [`OpcPackage`] into a ZIP stream: `[Content_Types].xml` first,
//! then the package relationships, then every part followed by its own
//! relationships.

use crate::ooxml::opc::constants::{content_type as ct, namespace};
use crate::ooxml::opc::error::Result;
use crate::ooxml::opc::package::OpcPackage;
use crate::ooxml::opc::packuri::{CONTENT_TYPES_URI, PACKAGE_URI, PackURI};
use crate::ooxml::opc::phys_pkg::{Compression, PhysPkgWriter};
use crate::ooxml::shared::escape_xml;
use std::collections::BTreeMap;
use std::io::{Cursor, Seek, Write};

/// Serializes an OPC package to a ZIP archive.
///
/// # Example
///
/// ```
/// use docwright::ooxml::opc::{Compression, OpcPackage, PackageWriter};
///
/// let pkg = OpcPackage::new();
/// let bytes = PackageWriter::to_bytes(&pkg, Compression::Deflated)?;
/// assert!(bytes.starts_with(b"PK"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct PackageWriter;

impl PackageWriter {
    /// Write a package to any seekable stream, returning the stream.
    pub fn write_to<W: Write + Seek>(
        writer: W,
        package: &OpcPackage,
        compression: Compression,
    ) -> Result<W> {
        let mut phys_writer = PhysPkgWriter::new(writer, compression);

        Self::write_content_types(&mut phys_writer, package)?;
        Self::write_pkg_rels(&mut phys_writer, package)?;
        Self::write_parts(&mut phys_writer, package)?;

        phys_writer.finish()
    }

    /// Serialize a package to bytes.
    pub fn to_bytes(package: &OpcPackage, compression: Compression) -> Result<Vec<u8>> {
        let cursor = Self::write_to(Cursor::new(Vec::new()), package, compression)?;
        Ok(cursor.into_inner())
    }

    fn write_content_types<W: Write + Seek>(
        phys_writer: &mut PhysPkgWriter<W>,
        package: &OpcPackage,
    ) -> Result<()> {
        let cti = ContentTypesItem::from_package(package);
        let content_types_uri = PackURI::new(CONTENT_TYPES_URI)?;
        phys_writer.write(&content_types_uri, cti.to_xml().as_bytes())
    }

    fn write_pkg_rels<W: Write + Seek>(
        phys_writer: &mut PhysPkgWriter<W>,
        package: &OpcPackage,
    ) -> Result<()> {
        let rels_uri = PackURI::new(PACKAGE_URI)?.rels_uri()?;
        phys_writer.write(&rels_uri, package.rels().to_xml().as_bytes())
    }

    fn write_parts<W: Write + Seek>(
        phys_writer: &mut PhysPkgWriter<W>,
        package: &OpcPackage,
    ) -> Result<()> {
        for part in package.iter_parts() {
            phys_writer.write(part.partname(), part.blob())?;

            if !part.rels().is_empty() {
                let rels_uri = part.partname().rels_uri()?;
                phys_writer.write(&rels_uri, part.rels().to_xml().as_bytes())?;
            }
        }
        Ok(())
    }
}

/// Default and Override entries of `[Content_Types].xml`.
struct ContentTypesItem {
    /// Default content types by extension
    defaults: BTreeMap<String, String>,
    /// Override content types by partname
    overrides: BTreeMap<String, String>,
}

impl ContentTypesItem {
    fn new() -> Self {
        let mut defaults = BTreeMap::new();
        defaults.insert("rels".to_string(), ct::OPC_RELATIONSHIPS.to_string());
        defaults.insert("xml".to_string(), ct::XML.to_string());

        Self {
            defaults,
            overrides: BTreeMap::new(),
        }
    }

    fn from_package(package: &OpcPackage) -> Self {
        let mut cti = Self::new();
        for part in package.iter_parts() {
            cti.add_content_type(part.partname(), part.content_type());
        }
        cti
    }

    /// Well-known extension pairs become Defaults; everything else is an Override.
    fn add_content_type(&mut self, partname: &PackURI, content_type: &str) {
        let ext = partname.ext();
        if matches!(
            (ext, content_type),
            ("rels", ct::OPC_RELATIONSHIPS) | ("xml", ct::XML)
        ) {
            self.defaults
                .insert(ext.to_string(), content_type.to_string());
        } else {
            self.overrides
                .insert(partname.to_string(), content_type.to_string());
        }
    }

    fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(1024 + self.overrides.len() * 160);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(r#"<Types xmlns=""#);
        xml.push_str(namespace::OPC_CONTENT_TYPES);
        xml.push_str(r#"">"#);

        for (ext, content_type) in &self.defaults {
            xml.push_str(&format!(
                r#"<Default Extension="{}" ContentType="{}"/>"#,
                escape_xml(ext),
                escape_xml(content_type)
            ));
        }
        for (partname, content_type) in &self.overrides {
            xml.push_str(&format!(
                r#"<Override PartName="{}" ContentType="{}"/>"#,
                escape_xml(partname),
                escape_xml(content_type)
            ));
        }

        xml.push_str("</Types>");
        xml
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::constants::relationship_type as rt;
    use crate::ooxml::opc::part::Part;
    use std::io::Cursor;

    fn sample_package() -> OpcPackage {
        let document = PackURI::new("/word/document.xml").unwrap();
        let styles = PackURI::new("/word/styles.xml").unwrap();

        let mut doc_part = Part::new(document.clone(), ct::WML_DOCUMENT_MAIN, b"<doc/>".to_vec());
        doc_part.relate_to(&styles, rt::STYLES);

        let mut package = OpcPackage::new();
        package.relate_to(&document, rt::OFFICE_DOCUMENT);
        package.add_part(doc_part).unwrap();
        package
            .add_part(Part::new(styles, ct::WML_STYLES, b"<styles/>".to_vec()))
            .unwrap();
        package
    }

    #[test]
    fn test_content_types_xml() {
        let cti = ContentTypesItem::from_package(&sample_package());
        let xml = cti.to_xml();
        assert!(xml.contains(r#"<Default Extension="rels""#));
        assert!(xml.contains(r#"<Override PartName="/word/document.xml""#));
        assert!(xml.contains(r#"<Override PartName="/word/styles.xml""#));
    }

    #[test]
    fn test_package_round_trip() {
        let bytes = PackageWriter::to_bytes(&sample_package(), Compression::Deflated).unwrap();
        let package = OpcPackage::from_reader(Cursor::new(bytes)).unwrap();

        let main = package.main_document_part().unwrap();
        assert_eq!(main.blob(), b"<doc/>");
        assert_eq!(main.content_type(), ct::WML_DOCUMENT_MAIN);

        let styles = package.related_part(main, rt::STYLES).unwrap();
        assert_eq!(styles.blob(), b"<styles/>");
    }

    #[test]
    fn test_stored_compression() {
        let deflated = PackageWriter::to_bytes(&sample_package(), Compression::Deflated).unwrap();
        let stored = PackageWriter::to_bytes(&sample_package(), Compression::Stored).unwrap();
        assert!(OpcPackage::from_reader(Cursor::new(stored)).is_ok());
        assert!(OpcPackage::from_reader(Cursor::new(deflated)).is_ok());
    }
}

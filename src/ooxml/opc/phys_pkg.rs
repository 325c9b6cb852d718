/// Physical (ZIP) layer of an OPC package.
///
/// `PhysPkgWriter` streams parts into a `zip::ZipWriter`; `PhysPkgReader` looks
/// members up by part name in a `zip::ZipArchive`.
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::{CONTENT_TYPES_URI, PackURI};
use std::io::{Read, Seek, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// How part data is stored in the archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compression {
    /// Deflate every member (smallest output)
    #[default]
    Deflated,
    /// Store members uncompressed
    Stored,
}

impl Compression {
    fn method(self) -> CompressionMethod {
        match self {
            Compression::Deflated => CompressionMethod::Deflated,
            Compression::Stored => CompressionMethod::Stored,
        }
    }
}

/// Writes package members into a ZIP archive.
pub struct PhysPkgWriter<W: Write + Seek> {
    zip_writer: ZipWriter<W>,
    options: SimpleFileOptions,
    written: Vec<String>,
}

impl<W: Write + Seek> PhysPkgWriter<W> {
    pub fn new(writer: W, compression: Compression) -> Self {
        Self {
            zip_writer: ZipWriter::new(writer),
            options: SimpleFileOptions::default().compression_method(compression.method()),
            written: Vec::new(),
        }
    }

    /// Write `blob` as the member for `pack_uri`.
    pub fn write(&mut self, pack_uri: &PackURI, blob: &[u8]) -> Result<()> {
        let membername = pack_uri.membername();
        if self.written.iter().any(|name| name == membername) {
            return Err(OpcError::DuplicatePart(pack_uri.to_string()));
        }

        self.zip_writer.start_file(membername, self.options)?;
        self.zip_writer.write_all(blob)?;
        self.written.push(membername.to_string());
        log::debug!("wrote part {} ({} bytes)", pack_uri, blob.len());
        Ok(())
    }

    /// Number of members written so far.
    pub fn len(&self) -> usize {
        self.written.len()
    }

    pub fn is_empty(&self) -> bool {
        self.written.is_empty()
    }

    /// Write the central directory and hand back the underlying writer.
    pub fn finish(self) -> Result<W> {
        Ok(self.zip_writer.finish()?)
    }
}

/// Reads package members out of a ZIP archive.
pub struct PhysPkgReader<R: Read + Seek> {
    archive: ZipArchive<R>,
}

impl<R: Read + Seek> PhysPkgReader<R> {
    pub fn new(reader: R) -> Result<Self> {
        Ok(Self {
            archive: ZipArchive::new(reader)?,
        })
    }

    /// Binary content of the member for `pack_uri`.
    pub fn blob_for(&mut self, pack_uri: &PackURI) -> Result<Vec<u8>> {
        let mut file = match self.archive.by_name(pack_uri.membername()) {
            Ok(file) => file,
            Err(zip::result::ZipError::FileNotFound) => {
                return Err(OpcError::PartNotFound(pack_uri.to_string()));
            },
            Err(e) => return Err(e.into()),
        };
        let mut blob = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut blob)?;
        Ok(blob)
    }

    /// The `[Content_Types].xml` member.
    pub fn content_types_xml(&mut self) -> Result<Vec<u8>> {
        let uri = PackURI::new(CONTENT_TYPES_URI)?;
        self.blob_for(&uri)
    }

    /// The `.rels` member for `source_uri`, if the source has relationships.
    pub fn rels_xml_for(&mut self, source_uri: &PackURI) -> Result<Option<Vec<u8>>> {
        match self.blob_for(&source_uri.rels_uri()?) {
            Ok(blob) => Ok(Some(blob)),
            Err(OpcError::PartNotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// All member names, in archive order.
    pub fn member_names(&self) -> Vec<String> {
        self.archive.file_names().map(str::to_string).collect()
    }

    pub fn len(&self) -> usize {
        self.archive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.archive.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_write_then_read() {
        let mut writer = PhysPkgWriter::new(Cursor::new(Vec::new()), Compression::Deflated);
        let uri = PackURI::new("/word/document.xml").unwrap();
        writer.write(&uri, b"<w:document/>").unwrap();
        assert_eq!(writer.len(), 1);
        let bytes = writer.finish().unwrap().into_inner();

        let mut reader = PhysPkgReader::new(Cursor::new(bytes)).unwrap();
        assert_eq!(reader.blob_for(&uri).unwrap(), b"<w:document/>");
        assert_eq!(reader.member_names(), vec!["word/document.xml".to_string()]);
        assert!(reader.rels_xml_for(&uri).unwrap().is_none());
    }

    #[test]
    fn test_duplicate_member_rejected() {
        let mut writer = PhysPkgWriter::new(Cursor::new(Vec::new()), Compression::Stored);
        let uri = PackURI::new("/word/styles.xml").unwrap();
        writer.write(&uri, b"a").unwrap();
        assert!(matches!(
            writer.write(&uri, b"b"),
            Err(OpcError::DuplicatePart(_))
        ));
    }

    #[test]
    fn test_missing_member() {
        let writer = PhysPkgWriter::new(Cursor::new(Vec::new()), Compression::Deflated);
        let bytes = writer.finish().unwrap().into_inner();
        let mut reader = PhysPkgReader::new(Cursor::new(bytes)).unwrap();
        assert!(reader.is_empty());
        let uri = PackURI::new("/word/document.xml").unwrap();
        assert!(matches!(
            reader.blob_for(&uri),
            Err(OpcError::PartNotFound(_))
        ));
    }
}

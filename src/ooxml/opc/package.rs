/// In-memory OPC package.
///
/// `OpcPackage` holds the package-level relationships and every part in the
/// order it was added. Writing goes through [`PackageWriter`]; reading loads all
/// parts reachable through `[Content_Types].xml`.
///
/// [`PackageWriter`]: crate::ooxml::opc::pkgwriter::PackageWriter
use crate::ooxml::opc::constants::relationship_type;
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::{PACKAGE_URI, PackURI};
use crate::ooxml::opc::part::Part;
use crate::ooxml::opc::phys_pkg::PhysPkgReader;
use crate::ooxml::opc::rel::Relationships;
use crate::ooxml::shared::attr_value;
use quick_xml::Reader;
use quick_xml::events::Event;
use std::collections::HashMap;
use std::io::{Read, Seek};

#[derive(Debug, Clone)]
pub struct OpcPackage {
    rels: Relationships,
    parts: Vec<Part>,
}

impl OpcPackage {
    pub fn new() -> Self {
        Self {
            rels: Relationships::new(PACKAGE_URI),
            parts: Vec::new(),
        }
    }

    /// Load a package from a ZIP stream.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut phys_reader = PhysPkgReader::new(reader)?;
        let content_types = ContentTypeMap::parse(&phys_reader.content_types_xml()?)?;

        let mut package = Self::new();
        let package_uri = PackURI::new(PACKAGE_URI)?;
        if let Some(xml) = phys_reader.rels_xml_for(&package_uri)? {
            package.rels = Relationships::parse(PACKAGE_URI, &xml)?;
        }

        for membername in phys_reader.member_names() {
            if membername.ends_with(".rels") || membername == "[Content_Types].xml" {
                continue;
            }
            let partname = PackURI::new(format!("/{}", membername))?;
            let Some(content_type) = content_types.lookup(&partname) else {
                log::warn!("skipping {} with no content type", partname);
                continue;
            };
            let content_type = content_type.to_string();

            let blob = phys_reader.blob_for(&partname)?;
            let rels = match phys_reader.rels_xml_for(&partname)? {
                Some(xml) => Relationships::parse(partname.base_uri(), &xml)?,
                None => Relationships::new(partname.base_uri()),
            };
            package
                .parts
                .push(Part::with_rels(partname, content_type, blob, rels));
        }

        Ok(package)
    }

    /// Add a part; part names must be unique.
    pub fn add_part(&mut self, part: Part) -> Result<()> {
        if self.part(part.partname()).is_some() {
            return Err(OpcError::DuplicatePart(part.partname().to_string()));
        }
        self.parts.push(part);
        Ok(())
    }

    /// Add or get a package-level relationship, returning its rId.
    pub fn relate_to(&mut self, target: &PackURI, reltype: &str) -> String {
        self.rels.get_or_add(reltype, target)
    }

    pub fn part(&self, partname: &PackURI) -> Option<&Part> {
        self.parts.iter().find(|part| part.partname() == partname)
    }

    /// The part the package's officeDocument relationship points at.
    pub fn main_document_part(&self) -> Result<&Part> {
        let partname = self.rels.target_of(relationship_type::OFFICE_DOCUMENT)?;
        self.part(&partname)
            .ok_or_else(|| OpcError::PartNotFound(partname.to_string()))
    }

    /// The part `source` relates to with `reltype`.
    pub fn related_part(&self, source: &Part, reltype: &str) -> Result<&Part> {
        let partname = source.rels().target_of(reltype)?;
        self.part(&partname)
            .ok_or_else(|| OpcError::PartNotFound(partname.to_string()))
    }

    #[inline]
    pub fn rels(&self) -> &Relationships {
        &self.rels
    }

    pub fn iter_parts(&self) -> impl Iterator<Item = &Part> {
        self.parts.iter()
    }
}

impl Default for OpcPackage {
    fn default() -> Self {
        Self::new()
    }
}

/// Parsed `[Content_Types].xml`.
struct ContentTypeMap {
    defaults: HashMap<String, String>,
    overrides: HashMap<String, String>,
}

impl ContentTypeMap {
    fn parse(xml: &[u8]) -> Result<Self> {
        let mut map = Self {
            defaults: HashMap::new(),
            overrides: HashMap::new(),
        };
        let mut reader = Reader::from_reader(xml);
        let mut buf = Vec::with_capacity(512);

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                    let content_type = attr_value(&e, b"ContentType");
                    match (e.local_name().as_ref(), content_type) {
                        (b"Default", Some(ct)) => {
                            if let Some(ext) = attr_value(&e, b"Extension") {
                                map.defaults.insert(ext.to_ascii_lowercase(), ct);
                            }
                        },
                        (b"Override", Some(ct)) => {
                            if let Some(partname) = attr_value(&e, b"PartName") {
                                map.overrides.insert(partname.to_ascii_lowercase(), ct);
                            }
                        },
                        _ => {},
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(OpcError::Xml(e.to_string())),
                _ => {},
            }
            buf.clear();
        }

        Ok(map)
    }

    /// Override first, then the extension default. Matching is case-insensitive.
    fn lookup(&self, partname: &PackURI) -> Option<&str> {
        self.overrides
            .get(&partname.as_str().to_ascii_lowercase())
            .or_else(|| self.defaults.get(&partname.ext().to_ascii_lowercase()))
            .map(String::as_str)
    }
}

/// Relationship-related objects for OPC packages.
///
/// A `.rels` part lists the parts its source part points at. Every part this
/// crate writes is internal, so targets are always stored relative to the
/// source part's directory.
use crate::ooxml::opc::constants::namespace;
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::PackURI;
use crate::ooxml::shared::{attr_value, escape_xml};
use quick_xml::Reader;
use quick_xml::events::Event;

/// A single relationship from a source part to a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// Relationship ID (e.g., "rId1", "rId2")
    r_id: String,
    /// Relationship type URI
    reltype: String,
    /// Target reference relative to the source part's directory
    target_ref: String,
}

impl Relationship {
    pub fn new(r_id: String, reltype: String, target_ref: String) -> Self {
        Self {
            r_id,
            reltype,
            target_ref,
        }
    }

    #[inline]
    pub fn r_id(&self) -> &str {
        &self.r_id
    }

    #[inline]
    pub fn reltype(&self) -> &str {
        &self.reltype
    }

    #[inline]
    pub fn target_ref(&self) -> &str {
        &self.target_ref
    }
}

/// Collection of relationships from a single source, in insertion order.
#[derive(Debug, Clone)]
pub struct Relationships {
    /// Directory of the source part, used to resolve targets
    base_uri: String,
    rels: Vec<Relationship>,
}

impl Relationships {
    pub fn new(base_uri: impl Into<String>) -> Self {
        Self {
            base_uri: base_uri.into(),
            rels: Vec::new(),
        }
    }

    /// Get or add a relationship of `reltype` pointing at `target`.
    ///
    /// Returns the relationship ID. Existing relationships to the same target are
    /// reused; new ones take the next free `rIdN`.
    pub fn get_or_add(&mut self, reltype: &str, target: &PackURI) -> String {
        let target_ref = target.relative_ref(&self.base_uri);
        if let Some(rel) = self
            .rels
            .iter()
            .find(|rel| rel.reltype == reltype && rel.target_ref == target_ref)
        {
            return rel.r_id.clone();
        }

        let r_id = self.next_r_id();
        self.rels.push(Relationship::new(
            r_id.clone(),
            reltype.to_string(),
            target_ref,
        ));
        r_id
    }

    /// Next `rIdN` not yet in use, filling gaps first.
    fn next_r_id(&self) -> String {
        let mut used: Vec<u32> = self
            .rels
            .iter()
            .filter_map(|rel| rel.r_id.strip_prefix("rId")?.parse().ok())
            .collect();
        used.sort_unstable();

        let mut next = 1u32;
        for num in used {
            match num.cmp(&next) {
                std::cmp::Ordering::Equal => next += 1,
                std::cmp::Ordering::Greater => break,
                std::cmp::Ordering::Less => {},
            }
        }
        format!("rId{}", next)
    }

    #[inline]
    pub fn get(&self, r_id: &str) -> Option<&Relationship> {
        self.rels.iter().find(|rel| rel.r_id == r_id)
    }

    /// Resolve the single relationship of `reltype` to an absolute part name.
    pub fn target_of(&self, reltype: &str) -> Result<PackURI> {
        let rel = self
            .rels
            .iter()
            .find(|rel| rel.reltype == reltype)
            .ok_or_else(|| {
                OpcError::PartNotFound(format!("no relationship of type '{}'", reltype))
            })?;
        PackURI::from_rel_ref(&self.base_uri, &rel.target_ref)
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.rels.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rels.is_empty()
    }

    /// Serialize relationships to `.rels` XML.
    pub fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(256 + self.rels.len() * 160);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(r#"<Relationships xmlns=""#);
        xml.push_str(namespace::OPC_RELATIONSHIPS);
        xml.push_str(r#"">"#);

        for rel in &self.rels {
            xml.push_str(&format!(
                r#"<Relationship Id="{}" Type="{}" Target="{}"/>"#,
                escape_xml(&rel.r_id),
                escape_xml(&rel.reltype),
                escape_xml(&rel.target_ref),
            ));
        }

        xml.push_str("</Relationships>");
        xml
    }

    /// Parse a `.rels` part whose source part lives in `base_uri`.
    pub fn parse(base_uri: impl Into<String>, xml: &[u8]) -> Result<Self> {
        let mut rels = Self::new(base_uri);
        let mut reader = Reader::from_reader(xml);
        let mut buf = Vec::with_capacity(512);

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) | Ok(Event::Empty(e))
                    if e.local_name().as_ref() == b"Relationship" =>
                {
                    let r_id = attr_value(&e, b"Id");
                    let reltype = attr_value(&e, b"Type");
                    let target = attr_value(&e, b"Target");
                    if let (Some(r_id), Some(reltype), Some(target)) = (r_id, reltype, target) {
                        rels.rels.push(Relationship::new(r_id, reltype, target));
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(OpcError::Xml(e.to_string())),
                _ => {},
            }
            buf.clear();
        }

        Ok(rels)
    }
}

impl Default for Relationships {
    fn default() -> Self {
        Self::new("/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::constants::relationship_type as rt;

    #[test]
    fn test_get_or_add_reuses_ids() {
        let mut rels = Relationships::new("/word");
        let styles = PackURI::new("/word/styles.xml").unwrap();
        let numbering = PackURI::new("/word/numbering.xml").unwrap();

        assert_eq!(rels.get_or_add(rt::STYLES, &styles), "rId1");
        assert_eq!(rels.get_or_add(rt::STYLES, &styles), "rId1");
        assert_eq!(rels.get_or_add(rt::NUMBERING, &numbering), "rId2");
        assert_eq!(rels.len(), 2);
        assert_eq!(rels.get("rId1").unwrap().target_ref(), "styles.xml");
    }

    #[test]
    fn test_xml_round_trip() {
        let mut rels = Relationships::new("/");
        let document = PackURI::new("/word/document.xml").unwrap();
        rels.get_or_add(rt::OFFICE_DOCUMENT, &document);

        let xml = rels.to_xml();
        assert!(xml.contains(r#"Target="word/document.xml""#));

        let parsed = Relationships::parse("/", xml.as_bytes()).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(
            parsed.target_of(rt::OFFICE_DOCUMENT).unwrap().as_str(),
            "/word/document.xml"
        );
    }

    #[test]
    fn test_missing_reltype() {
        let rels = Relationships::new("/");
        assert!(rels.target_of(rt::STYLES).is_err());
    }
}

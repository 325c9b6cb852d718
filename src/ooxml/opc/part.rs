/// Parts of an OPC package.
///
/// A part is a named blob with a content type and its own outgoing relationships.
use crate::ooxml::opc::packuri::PackURI;
use crate::ooxml::opc::rel::Relationships;

#[derive(Debug, Clone)]
pub struct Part {
    partname: PackURI,
    content_type: String,
    blob: Vec<u8>,
    rels: Relationships,
}

impl Part {
    pub fn new(partname: PackURI, content_type: impl Into<String>, blob: Vec<u8>) -> Self {
        let rels = Relationships::new(partname.base_uri());
        Self {
            partname,
            content_type: content_type.into(),
            blob,
            rels,
        }
    }

    /// Build a part around relationships read from the package.
    pub(crate) fn with_rels(
        partname: PackURI,
        content_type: impl Into<String>,
        blob: Vec<u8>,
        rels: Relationships,
    ) -> Self {
        Self {
            partname,
            content_type: content_type.into(),
            blob,
            rels,
        }
    }

    #[inline]
    pub fn partname(&self) -> &PackURI {
        &self.partname
    }

    #[inline]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    #[inline]
    pub fn blob(&self) -> &[u8] {
        &self.blob
    }

    #[inline]
    pub fn rels(&self) -> &Relationships {
        &self.rels
    }

    /// Add or get a relationship from this part to `target`, returning its rId.
    pub fn relate_to(&mut self, target: &PackURI, reltype: &str) -> String {
        self.rels.get_or_add(reltype, target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::constants::{content_type as ct, relationship_type as rt};

    #[test]
    fn test_relate_to() {
        let document = PackURI::new("/word/document.xml").unwrap();
        let styles = PackURI::new("/word/styles.xml").unwrap();
        let mut part = Part::new(document, ct::WML_DOCUMENT_MAIN, Vec::new());

        let r_id = part.relate_to(&styles, rt::STYLES);
        assert_eq!(r_id, "rId1");
        assert_eq!(part.relate_to(&styles, rt::STYLES), "rId1");
        assert_eq!(part.rels().get("rId1").unwrap().target_ref(), "styles.xml");
    }
}

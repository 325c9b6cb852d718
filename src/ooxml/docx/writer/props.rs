/// Document properties: `docProps/core.xml` and `docProps/app.xml`.
///
/// Core properties follow Dublin Core plus the OPC extensions. Timestamps are
/// written as W3CDTF (`2024-05-01T09:30:00Z`).
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::constants::namespace;
use crate::ooxml::shared::{escape_xml, resolve_entity, unescape_str};
use chrono::{DateTime, SecondsFormat, Utc};
use quick_xml::Reader;
use quick_xml::events::Event;
use std::fmt::Write as FmtWrite;

/// Name written to `app.xml` as the producing application.
pub const APPLICATION_NAME: &str = "docwright";

/// Descriptive metadata for a document.
///
/// ```
/// use docwright::ooxml::docx::writer::DocumentProperties;
///
/// let props = DocumentProperties::new()
///     .with_title("Afric Froid App Walkthrough")
///     .with_creator("Afric Froid");
/// assert_eq!(props.title.as_deref(), Some("Afric Froid App Walkthrough"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentProperties {
    pub title: Option<String>,
    pub subject: Option<String>,
    pub creator: Option<String>,
    pub keywords: Option<String>,
    pub description: Option<String>,
    /// Fixed creation time; `None` stamps the time of serialization
    pub created: Option<DateTime<Utc>>,
}

impl DocumentProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn with_creator(mut self, creator: impl Into<String>) -> Self {
        self.creator = Some(creator.into());
        self
    }

    pub fn with_keywords(mut self, keywords: impl Into<String>) -> Self {
        self.keywords = Some(keywords.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Pin the creation (and modification) timestamp, for reproducible output.
    pub fn with_created(mut self, created: DateTime<Utc>) -> Self {
        self.created = Some(created);
        self
    }
}

/// Counts written to `app.xml`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocumentStats {
    pub paragraphs: usize,
    pub words: usize,
    pub characters: usize,
}

impl DocumentStats {
    /// Accumulate one paragraph's text.
    pub fn add_paragraph(&mut self, text: &str) {
        self.paragraphs += 1;
        self.words += text.split_whitespace().count();
        self.characters += text.chars().filter(|c| !c.is_whitespace()).count();
    }
}

fn w3cdtf(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn write_text_element(xml: &mut String, tag: &str, value: Option<&str>) -> std::fmt::Result {
    match value {
        Some(value) => write!(xml, "<{0}>{1}</{0}>", tag, escape_xml(value)),
        None => Ok(()),
    }
}

/// Generate `docProps/core.xml`.
///
/// `now` is used for both timestamps unless the properties pin a creation time.
pub fn generate_core_xml(props: &DocumentProperties, now: DateTime<Utc>) -> Result<String> {
    let stamp = w3cdtf(&props.created.unwrap_or(now));

    let mut xml = String::with_capacity(1024);
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push('\n');
    write!(
        &mut xml,
        r#"<cp:coreProperties xmlns:cp="{}""#,
        namespace::OPC_CORE_PROPERTIES
    )?;
    xml.push_str(concat!(
        r#" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/""#,
        r#" xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#,
    ));

    write_text_element(&mut xml, "dc:title", props.title.as_deref())?;
    write_text_element(&mut xml, "dc:subject", props.subject.as_deref())?;
    write_text_element(&mut xml, "dc:creator", props.creator.as_deref())?;
    write_text_element(&mut xml, "cp:keywords", props.keywords.as_deref())?;
    write_text_element(&mut xml, "dc:description", props.description.as_deref())?;
    write_text_element(&mut xml, "cp:lastModifiedBy", props.creator.as_deref())?;
    xml.push_str("<cp:revision>1</cp:revision>");
    write!(
        &mut xml,
        r#"<dcterms:created xsi:type="dcterms:W3CDTF">{}</dcterms:created>"#,
        stamp
    )?;
    write!(
        &mut xml,
        r#"<dcterms:modified xsi:type="dcterms:W3CDTF">{}</dcterms:modified>"#,
        stamp
    )?;

    xml.push_str("</cp:coreProperties>");
    Ok(xml)
}

/// Generate `docProps/app.xml`.
pub fn generate_app_xml(stats: &DocumentStats) -> Result<String> {
    let mut xml = String::with_capacity(512);
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push('\n');
    write!(
        &mut xml,
        r#"<Properties xmlns="{}" xmlns:vt="{}">"#,
        namespace::OFC_EXTENDED_PROPERTIES,
        namespace::OFC_DOC_PROPS_VTYPES
    )?;
    write!(&mut xml, "<Application>{}</Application>", APPLICATION_NAME)?;
    xml.push_str("<DocSecurity>0</DocSecurity>");
    write!(&mut xml, "<Words>{}</Words>", stats.words)?;
    write!(&mut xml, "<Characters>{}</Characters>", stats.characters)?;
    write!(&mut xml, "<Paragraphs>{}</Paragraphs>", stats.paragraphs)?;
    xml.push_str("<ScaleCrop>false</ScaleCrop><LinksUpToDate>false</LinksUpToDate>");
    xml.push_str("<SharedDoc>false</SharedDoc><HyperlinksChanged>false</HyperlinksChanged>");
    xml.push_str("</Properties>");
    Ok(xml)
}

/// Parse `docProps/core.xml` back into properties.
pub fn parse_core_xml(xml: &[u8]) -> Result<DocumentProperties> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();
    let mut props = DocumentProperties::default();
    let mut current: Option<Vec<u8>> = None;
    let mut text = String::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                current = Some(e.name().as_ref().to_vec());
                text.clear();
            },
            Ok(Event::Text(e)) if current.is_some() => {
                let raw = std::str::from_utf8(e.as_ref())
                    .map_err(|e| OoxmlError::Xml(format!("Invalid UTF-8 in core properties: {}", e)))?;
                text.push_str(&unescape_str(raw));
            },
            Ok(Event::GeneralRef(e)) if current.is_some() => {
                let name = std::str::from_utf8(e.as_ref())
                    .map_err(|e| OoxmlError::Xml(format!("Invalid UTF-8 in core properties: {}", e)))?;
                if let Some(ch) = resolve_entity(name) {
                    text.push(ch);
                }
            },
            Ok(Event::End(_)) => {
                if let Some(name) = current.take() {
                    let value = std::mem::take(&mut text);
                    match name.as_slice() {
                        b"dc:title" => props.title = Some(value),
                        b"dc:subject" => props.subject = Some(value),
                        b"dc:creator" => props.creator = Some(value),
                        b"cp:keywords" => props.keywords = Some(value),
                        b"dc:description" => props.description = Some(value),
                        b"dcterms:created" => {
                            props.created = DateTime::parse_from_rfc3339(value.trim())
                                .ok()
                                .map(|dt| dt.with_timezone(&Utc));
                        },
                        _ => {},
                    }
                }
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(OoxmlError::Xml(format!("XML parsing error: {}", e))),
            _ => {},
        }
        buf.clear();
    }

    Ok(props)
}

//! Reads a `.docx` package back into resolved blocks.
//!
//! Each body paragraph becomes a [`ParsedBlock`] whose runs carry fully resolved
//! formatting: explicit run properties first, then the paragraph style and the
//! styles it is based on, then the document defaults.
use crate::ooxml::docx::enums::WdStyleType;
use crate::ooxml::docx::format::{Alignment, RgbColor};
use crate::ooxml::docx::writer::paragraph::{BlockKind, ResolvedBlock};
use crate::ooxml::docx::writer::props::{DocumentProperties, parse_core_xml};
use crate::ooxml::docx::writer::run::ResolvedRun;
use crate::ooxml::docx::writer::style::LIST_BULLET_STYLE_ID;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::constants::relationship_type as rt;
use crate::ooxml::opc::{OpcError, OpcPackage, Part};
use crate::ooxml::shared::{attr_value, resolve_entity, unescape_str};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::collections::HashMap;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;

/// A block as read from a package.
pub type ParsedBlock = ResolvedBlock;

/// Word's built-in fallbacks when neither styles nor defaults say anything.
const FALLBACK_FONT_FAMILY: &str = "Times New Roman";
const FALLBACK_SIZE_HALF_POINTS: u32 = 20;

/// Limit on `w:basedOn` hops, guarding against cycles.
const MAX_STYLE_DEPTH: usize = 16;

pub struct DocxReader {
    package: OpcPackage,
}

impl DocxReader {
    /// Open a package from disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| OoxmlError::io(path, e))?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        Self::from_reader(Cursor::new(bytes))
    }

    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        Ok(Self {
            package: OpcPackage::from_reader(reader)?,
        })
    }

    #[inline]
    pub fn package(&self) -> &OpcPackage {
        &self.package
    }

    /// Body paragraphs in document order.
    pub fn blocks(&self) -> Result<Vec<ParsedBlock>> {
        let document = self.package.main_document_part()?;
        let styles = match self.package.related_part(document, rt::STYLES) {
            Ok(part) => StyleSheet::parse(part.blob())?,
            Err(OpcError::PartNotFound(_)) => StyleSheet::default(),
            Err(e) => return Err(e.into()),
        };
        parse_body(document.blob(), &styles)
    }

    /// Core properties, or defaults when the package has none.
    pub fn properties(&self) -> Result<DocumentProperties> {
        match self.core_properties_part() {
            Some(part) => parse_core_xml(part.blob()),
            None => Ok(DocumentProperties::default()),
        }
    }

    fn core_properties_part(&self) -> Option<&Part> {
        let partname = self.package.rels().target_of(rt::CORE_PROPERTIES).ok()?;
        self.package.part(&partname)
    }
}

/// Run formatting carried by a style or by `w:rPr`.
#[derive(Debug, Clone, Default)]
struct RunStyle {
    font_family: Option<String>,
    size_half_points: Option<u32>,
    bold: Option<bool>,
    color: Option<RgbColor>,
}

impl RunStyle {
    /// Apply one child element of a `w:rPr`.
    fn apply(&mut self, e: &BytesStart<'_>) {
        match e.local_name().as_ref() {
            b"rFonts" => {
                if let Some(family) = attr_value(e, b"ascii").or_else(|| attr_value(e, b"hAnsi")) {
                    self.font_family = Some(family);
                }
            },
            b"b" => self.bold = Some(on_off(e)),
            b"sz" => {
                if let Some(size) = attr_value(e, b"val").and_then(|v| v.parse().ok()) {
                    self.size_half_points = Some(size);
                }
            },
            b"color" => {
                // "auto" and anything unparseable fall back to the theme color.
                self.color = attr_value(e, b"val").and_then(|v| RgbColor::from_hex(&v).ok());
            },
            _ => {},
        }
    }
}

/// `w:val` of an on/off property; a missing value means on.
fn on_off(e: &BytesStart<'_>) -> bool {
    match attr_value(e, b"val") {
        Some(value) => !matches!(value.as_str(), "0" | "false" | "off"),
        None => true,
    }
}

#[derive(Debug, Clone, Default)]
struct StyleDef {
    based_on: Option<String>,
    run: RunStyle,
}

/// The parts of `styles.xml` that affect run resolution.
#[derive(Debug, Default)]
struct StyleSheet {
    defaults: RunStyle,
    styles: HashMap<String, StyleDef>,
    default_paragraph_style: Option<String>,
}

impl StyleSheet {
    fn parse(xml: &[u8]) -> Result<Self> {
        let mut sheet = Self::default();
        let mut reader = Reader::from_reader(xml);
        let mut buf = Vec::with_capacity(1024);

        let mut in_defaults = false;
        let mut in_rpr = false;
        let mut current: Option<(String, StyleDef)> = None;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => match e.local_name().as_ref() {
                    b"rPrDefault" => in_defaults = true,
                    b"rPr" => in_rpr = true,
                    b"style" => {
                        let is_paragraph = attr_value(&e, b"type")
                            .is_none_or(|t| WdStyleType::from_xml(&t) == Some(WdStyleType::Paragraph));
                        if let Some(style_id) = attr_value(&e, b"styleId") {
                            if is_paragraph
                                && attr_value(&e, b"default").is_some_and(|d| d == "1" || d == "true")
                            {
                                sheet.default_paragraph_style = Some(style_id.clone());
                            }
                            current = Some((style_id, StyleDef::default()));
                        }
                    },
                    _ => {},
                },
                Ok(Event::Empty(e)) => {
                    if in_rpr {
                        if in_defaults {
                            sheet.defaults.apply(&e);
                        } else if let Some((_, ref mut def)) = current {
                            def.run.apply(&e);
                        }
                    } else if e.local_name().as_ref() == b"basedOn"
                        && let Some((_, ref mut def)) = current
                    {
                        def.based_on = attr_value(&e, b"val");
                    }
                },
                Ok(Event::End(e)) => match e.local_name().as_ref() {
                    b"rPrDefault" => in_defaults = false,
                    b"rPr" => in_rpr = false,
                    b"style" => {
                        if let Some((style_id, def)) = current.take() {
                            sheet.styles.insert(style_id, def);
                        }
                    },
                    _ => {},
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(OoxmlError::Xml(format!("styles.xml: {}", e))),
                _ => {},
            }
            buf.clear();
        }

        Ok(sheet)
    }

    /// Formatting a paragraph style gives its runs, following `w:basedOn`.
    fn paragraph_run_style(&self, style_id: Option<&str>) -> RunStyle {
        let mut chain = Vec::new();
        let mut next = style_id
            .map(str::to_string)
            .or_else(|| self.default_paragraph_style.clone());
        while let Some(id) = next {
            if chain.len() >= MAX_STYLE_DEPTH {
                break;
            }
            match self.styles.get(&id) {
                Some(def) => {
                    next = def.based_on.clone();
                    chain.push(def);
                },
                None => break,
            }
        }

        // Nearest style wins, so fold from the root of the chain outward.
        let mut resolved = self.defaults.clone();
        for def in chain.iter().rev() {
            let run = &def.run;
            if run.font_family.is_some() {
                resolved.font_family = run.font_family.clone();
            }
            resolved.size_half_points = run.size_half_points.or(resolved.size_half_points);
            resolved.bold = run.bold.or(resolved.bold);
            resolved.color = run.color.or(resolved.color);
        }
        resolved
    }
}

/// A run being read.
#[derive(Default)]
struct RunState {
    text: String,
    props: RunStyle,
    page_break: bool,
}

impl RunState {
    fn is_page_break_only(&self) -> bool {
        self.page_break && self.text.is_empty()
    }

    fn resolve(self, inherited: &RunStyle) -> ResolvedRun {
        ResolvedRun {
            text: self.text,
            font_family: self
                .props
                .font_family
                .or_else(|| inherited.font_family.clone())
                .unwrap_or_else(|| FALLBACK_FONT_FAMILY.to_string()),
            size_half_points: self
                .props
                .size_half_points
                .or(inherited.size_half_points)
                .unwrap_or(FALLBACK_SIZE_HALF_POINTS),
            bold: self.props.bold.or(inherited.bold).unwrap_or(false),
            color: self.props.color.or(inherited.color),
        }
    }
}

/// A paragraph being read.
#[derive(Default)]
struct ParagraphState {
    style_id: Option<String>,
    alignment: Alignment,
    numbered: bool,
    runs: Vec<RunState>,
}

impl ParagraphState {
    fn finish(self, styles: &StyleSheet) -> ParsedBlock {
        if !self.runs.is_empty() && self.runs.iter().all(RunState::is_page_break_only) {
            return ParsedBlock {
                kind: BlockKind::PageBreak,
                alignment: Alignment::Start,
                runs: Vec::new(),
            };
        }

        let kind = match self.style_id.as_deref() {
            Some(id) if id.starts_with("Heading") => match id["Heading".len()..].parse() {
                Ok(level) => BlockKind::Heading { level },
                Err(_) => BlockKind::Paragraph,
            },
            Some(LIST_BULLET_STYLE_ID) => BlockKind::ListItem,
            _ if self.numbered => BlockKind::ListItem,
            _ => BlockKind::Paragraph,
        };

        let inherited = styles.paragraph_run_style(self.style_id.as_deref());
        let runs = self
            .runs
            .into_iter()
            .filter(|run| !run.is_page_break_only())
            .map(|run| run.resolve(&inherited))
            .collect();

        ParsedBlock {
            kind,
            alignment: self.alignment,
            runs,
        }
    }
}

fn parse_body(xml: &[u8], styles: &StyleSheet) -> Result<Vec<ParsedBlock>> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::with_capacity(4096);
    let mut blocks = Vec::new();

    let mut paragraph: Option<ParagraphState> = None;
    let mut run: Option<RunState> = None;
    let mut in_ppr = false;
    let mut in_rpr = false;
    let mut in_text = false;

    loop {
        let event = reader.read_event_into(&mut buf);
        match event {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                let is_empty = matches!(event, Ok(Event::Empty(_)));
                match e.local_name().as_ref() {
                    b"p" if is_empty => blocks.push(ParagraphState::default().finish(styles)),
                    b"p" => paragraph = Some(ParagraphState::default()),
                    b"pPr" if !is_empty => in_ppr = true,
                    b"r" if paragraph.is_some() => {
                        if is_empty {
                            if let Some(ref mut p) = paragraph {
                                p.runs.push(RunState::default());
                            }
                        } else {
                            run = Some(RunState::default());
                        }
                    },
                    b"rPr" if run.is_some() && !is_empty => in_rpr = true,
                    b"t" if run.is_some() && !is_empty => in_text = true,
                    name => {
                        if let Some(ref mut r) = run {
                            if in_rpr {
                                r.props.apply(e);
                            } else {
                                match name {
                                    b"tab" => r.text.push('\t'),
                                    b"cr" => r.text.push('\n'),
                                    b"br" => {
                                        if attr_value(e, b"type").as_deref() == Some("page") {
                                            r.page_break = true;
                                        } else {
                                            r.text.push('\n');
                                        }
                                    },
                                    _ => {},
                                }
                            }
                        } else if in_ppr && let Some(ref mut p) = paragraph {
                            match name {
                                b"pStyle" => p.style_id = attr_value(e, b"val"),
                                b"jc" => {
                                    if let Some(alignment) =
                                        attr_value(e, b"val").as_deref().and_then(Alignment::from_xml)
                                    {
                                        p.alignment = alignment;
                                    }
                                },
                                b"numPr" | b"numId" => p.numbered = true,
                                _ => {},
                            }
                        }
                    },
                }
            },
            Ok(Event::Text(ref e)) if in_text => {
                if let Some(ref mut r) = run {
                    let raw = std::str::from_utf8(e.as_ref())
                        .map_err(|e| OoxmlError::Xml(format!("Invalid UTF-8 in text: {}", e)))?;
                    r.text.push_str(&unescape_str(raw));
                }
            },
            Ok(Event::GeneralRef(ref e)) if in_text => {
                if let Some(ref mut r) = run {
                    let name = std::str::from_utf8(e.as_ref())
                        .map_err(|e| OoxmlError::Xml(format!("Invalid UTF-8 in text: {}", e)))?;
                    match resolve_entity(name) {
                        Some(ch) => r.text.push(ch),
                        None => {
                            return Err(OoxmlError::Xml(format!("unknown entity &{};", name)));
                        },
                    }
                }
            },
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"p" => {
                    if let Some(p) = paragraph.take() {
                        blocks.push(p.finish(styles));
                    }
                },
                b"pPr" => in_ppr = false,
                b"r" => {
                    if let (Some(r), Some(p)) = (run.take(), paragraph.as_mut()) {
                        p.runs.push(r);
                    }
                },
                b"rPr" => in_rpr = false,
                b"t" => in_text = false,
                _ => {},
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(OoxmlError::Xml(format!("document.xml: {}", e))),
            _ => {},
        }
        buf.clear();
    }

    Ok(blocks)
}

/// Blocks: the top-level units of a document body.
///
/// Every block serializes to exactly one `<w:p>`. Headings, plain paragraphs and
/// bulleted list items carry runs; a page break carries none.
use crate::ooxml::docx::format::{Alignment, RgbColor};
use crate::ooxml::docx::writer::run::{MAX_FONT_SIZE_PT, ResolvedRun, Run, RunDefaults};
use crate::ooxml::docx::writer::style::{
    BULLET_NUM_ID, LIST_BULLET_STYLE_ID, MAX_HEADING_LEVEL, MIN_HEADING_LEVEL, StyleRegistry,
    heading_tier,
};
use crate::ooxml::error::{OoxmlError, Result};
use std::fmt::Write as FmtWrite;

/// What a block is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// Heading at `level`; levels `1..=9` have a style.
    Heading { level: i32 },
    Paragraph,
    /// Bulleted list item
    ListItem,
    PageBreak,
}

/// One block of the document body.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    kind: BlockKind,
    alignment: Alignment,
    runs: Vec<Run>,
}

impl Block {
    pub fn new(kind: BlockKind, runs: Vec<Run>) -> Self {
        Self {
            kind,
            alignment: Alignment::Start,
            runs,
        }
    }

    pub fn heading(level: i32, runs: Vec<Run>) -> Self {
        Self::new(BlockKind::Heading { level }, runs)
    }

    pub fn paragraph(runs: Vec<Run>) -> Self {
        Self::new(BlockKind::Paragraph, runs)
    }

    pub fn list_item(runs: Vec<Run>) -> Self {
        Self::new(BlockKind::ListItem, runs)
    }

    pub fn page_break() -> Self {
        Self::new(BlockKind::PageBreak, Vec::new())
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    #[inline]
    pub fn kind(&self) -> BlockKind {
        self.kind
    }

    #[inline]
    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    #[inline]
    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    /// Structural checks applied when a block enters a tree.
    ///
    /// Formatting ranges (heading level, maximum size) are left to the serializer.
    pub(crate) fn check(&self) -> std::result::Result<(), String> {
        match self.kind {
            BlockKind::PageBreak if !self.runs.is_empty() => {
                return Err("page break must not hold runs".to_string());
            },
            BlockKind::Paragraph | BlockKind::ListItem if self.runs.is_empty() => {
                return Err("runs must not be empty".to_string());
            },
            _ => {},
        }
        for (i, run) in self.runs.iter().enumerate() {
            run.check().map_err(|reason| format!("run {}: {}", i, reason))?;
        }
        Ok(())
    }

    /// Formatting checks run before any output is produced.
    pub(crate) fn validate(&self, index: usize) -> Result<()> {
        if let BlockKind::Heading { level } = self.kind
            && heading_tier(level).is_none()
        {
            return Err(OoxmlError::UnsupportedFormatting {
                block: index,
                detail: format!(
                    "heading level {} is outside {}..={}",
                    level, MIN_HEADING_LEVEL, MAX_HEADING_LEVEL
                ),
            });
        }
        for (i, run) in self.runs.iter().enumerate() {
            if let Some(size) = run.size_pt()
                && size > MAX_FONT_SIZE_PT
            {
                return Err(OoxmlError::UnsupportedFormatting {
                    block: index,
                    detail: format!(
                        "run {} size {}pt exceeds {}pt",
                        i, size, MAX_FONT_SIZE_PT
                    ),
                });
            }
        }
        Ok(())
    }

    /// Defaults this block hands to its runs.
    pub fn run_defaults(&self) -> RunDefaults {
        match self.kind {
            BlockKind::Heading { level } => match heading_tier(level) {
                Some(tier) => RunDefaults {
                    font_family: None,
                    size_half_points: Some(tier.size_half_points),
                    bold: Some(tier.bold),
                    color: tier.color,
                },
                None => RunDefaults::default(),
            },
            _ => RunDefaults::default(),
        }
    }

    /// This block as it will read back: alignment and runs fully resolved.
    ///
    /// A page break is always written without paragraph properties, so its
    /// alignment resolves to `Start`.
    pub fn resolve(&self, registry: &StyleRegistry) -> ResolvedBlock {
        let alignment = match self.kind {
            BlockKind::PageBreak => Alignment::Start,
            _ => self.alignment,
        };
        ResolvedBlock {
            kind: self.kind,
            alignment,
            runs: self.resolved_runs(registry),
        }
    }

    /// Runs with every field settled against `registry`.
    pub fn resolved_runs(&self, registry: &StyleRegistry) -> Vec<ResolvedRun> {
        let defaults = self.run_defaults();
        self.runs
            .iter()
            .map(|run| run.resolve(&defaults, registry))
            .collect()
    }

    /// Paragraph style id, `None` for `Normal`.
    pub fn style_id(&self) -> Option<String> {
        match self.kind {
            BlockKind::Heading { level } => Some(format!("Heading{}", level)),
            BlockKind::ListItem => Some(LIST_BULLET_STYLE_ID.to_string()),
            BlockKind::Paragraph | BlockKind::PageBreak => None,
        }
    }

    /// Append this block's `<w:p>` to `xml`. The block must have been validated.
    pub(crate) fn to_xml(&self, xml: &mut String, registry: &StyleRegistry) -> Result<()> {
        if self.kind == BlockKind::PageBreak {
            xml.push_str(r#"<w:p><w:r><w:br w:type="page"/></w:r></w:p>"#);
            return Ok(());
        }

        xml.push_str("<w:p>");

        let style_id = self.style_id();
        let has_props = style_id.is_some() || self.alignment != Alignment::Start;
        if has_props {
            xml.push_str("<w:pPr>");
            if let Some(ref style_id) = style_id {
                write!(xml, r#"<w:pStyle w:val="{}"/>"#, style_id)?;
            }
            if self.kind == BlockKind::ListItem {
                write!(
                    xml,
                    r#"<w:numPr><w:ilvl w:val="0"/><w:numId w:val="{}"/></w:numPr>"#,
                    BULLET_NUM_ID
                )?;
            }
            if self.alignment != Alignment::Start {
                write!(xml, r#"<w:jc w:val="{}"/>"#, self.alignment.as_str())?;
            }
            xml.push_str("</w:pPr>");
        }

        let style_bold = self.run_defaults().bold.unwrap_or(false);
        for run in self.resolved_runs(registry) {
            run.to_xml(xml, style_bold)?;
        }

        xml.push_str("</w:p>");
        Ok(())
    }
}

/// A block with its formatting resolved, comparable with what a reader sees.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedBlock {
    pub kind: BlockKind,
    pub alignment: Alignment,
    pub runs: Vec<ResolvedRun>,
}

impl ResolvedBlock {
    /// Concatenated run text.
    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }
}

/// Formatting for the single run of a heading added through the builder.
///
/// Unset fields fall back to the heading tier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeadingOptions {
    pub alignment: Alignment,
    pub bold: Option<bool>,
    /// Font size in points
    pub size_pt: Option<f64>,
    pub color: Option<RgbColor>,
}

impl HeadingOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = Some(bold);
        self
    }

    pub fn with_size(mut self, size_pt: f64) -> Self {
        self.size_pt = Some(size_pt);
        self
    }

    pub fn with_color(mut self, color: RgbColor) -> Self {
        self.color = Some(color);
        self
    }

    /// The heading's run carrying these overrides.
    pub(crate) fn to_run(&self, text: impl Into<String>) -> Run {
        let mut run = Run::new(text);
        if let Some(bold) = self.bold {
            run = run.bold(bold);
        }
        if let Some(size) = self.size_pt {
            run = run.size(size);
        }
        if let Some(color) = self.color {
            run = run.color(color);
        }
        run
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(block: &Block) -> String {
        let mut xml = String::new();
        block
            .to_xml(&mut xml, &StyleRegistry::default())
            .unwrap();
        xml
    }

    #[test]
    fn test_check() {
        assert!(Block::paragraph(Vec::new()).check().is_err());
        assert!(Block::list_item(Vec::new()).check().is_err());
        assert!(Block::heading(1, Vec::new()).check().is_ok());
        assert!(Block::page_break().check().is_ok());
        assert!(
            Block::new(BlockKind::PageBreak, vec![Run::new("x")])
                .check()
                .is_err()
        );
        let err = Block::paragraph(vec![Run::new("a"), Run::new("b").size(-1.0)])
            .check()
            .unwrap_err();
        assert!(err.starts_with("run 1:"));
    }

    #[test]
    fn test_validate_heading_levels() {
        for level in [0, -1, 10] {
            let err = Block::heading(level, vec![Run::new("h")])
                .validate(4)
                .unwrap_err();
            assert!(matches!(
                err,
                OoxmlError::UnsupportedFormatting { block: 4, .. }
            ));
        }
        assert!(
            Block::heading(9, vec![Run::new("h")])
                .validate(0)
                .is_ok()
        );
        assert!(
            Block::paragraph(vec![Run::new("huge").size(2000.0)])
                .validate(0)
                .is_err()
        );
    }

    #[test]
    fn test_heading_xml() {
        let block = Block::heading(1, vec![Run::new("Title")]).with_alignment(Alignment::Center);
        let xml = render(&block);
        assert!(xml.starts_with(r#"<w:p><w:pPr><w:pStyle w:val="Heading1"/><w:jc w:val="center"/></w:pPr>"#));
        assert!(xml.contains("<w:b/>"));
        assert!(xml.contains(r#"<w:sz w:val="40"/>"#));
    }

    #[test]
    fn test_plain_paragraph_has_no_properties() {
        let xml = render(&Block::paragraph(vec![Run::new("body")]));
        assert!(xml.starts_with("<w:p><w:r>"));
        assert!(!xml.contains("<w:pPr>"));
    }

    #[test]
    fn test_list_item_xml() {
        let xml = render(&Block::list_item(vec![
            Run::new("Title: ").bold(true),
            Run::new("description"),
        ]));
        assert!(xml.contains(r#"<w:pStyle w:val="ListBullet"/>"#));
        assert!(xml.contains(r#"<w:numId w:val="1"/>"#));
        assert_eq!(xml.matches("<w:r>").count(), 2);
        assert_eq!(xml.matches("<w:b/>").count(), 1);
    }

    #[test]
    fn test_page_break_xml() {
        assert_eq!(
            render(&Block::page_break()),
            r#"<w:p><w:r><w:br w:type="page"/></w:r></w:p>"#
        );
    }

    #[test]
    fn test_resolve_page_break_alignment() {
        let resolved = Block::page_break()
            .with_alignment(Alignment::Center)
            .resolve(&StyleRegistry::default());
        assert_eq!(resolved.alignment, Alignment::Start);
        assert!(resolved.runs.is_empty());
    }

    #[test]
    fn test_heading_options_run() {
        let run = HeadingOptions::new()
            .with_bold(true)
            .with_size(28.0)
            .to_run("Afric Froid");
        assert_eq!(run.bold_override(), Some(true));
        assert_eq!(run.size_pt(), Some(28.0));
        assert_eq!(run.color_override(), None);
    }
}

/// Runs: contiguous text with uniform character formatting.
///
/// A [`Run`] only records what its caller set. Everything left unset resolves
/// through the enclosing block's defaults and then the [`StyleRegistry`] into a
/// [`ResolvedRun`], which is what actually gets written.
use crate::ooxml::docx::format::{RgbColor, half_points_to_pt, pt_to_half_points};
use crate::ooxml::docx::writer::style::{StyleRegistry, write_fonts};
use crate::ooxml::error::Result;
use crate::ooxml::shared::escape_xml;
use std::fmt::Write as FmtWrite;

/// Largest font size `w:sz` can hold, in points.
pub const MAX_FONT_SIZE_PT: f64 = 1638.0;

/// Text with optional formatting overrides.
///
/// ```
/// use docwright::ooxml::docx::format::RgbColor;
/// use docwright::ooxml::docx::writer::Run;
///
/// let run = Run::new("Objective: ")
///     .bold(true)
///     .size(12.0)
///     .color(RgbColor(0x1F, 0x38, 0x64));
/// assert_eq!(run.text(), "Objective: ");
/// assert_eq!(run.size_pt(), Some(12.0));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Run {
    text: String,
    bold: Option<bool>,
    size_pt: Option<f64>,
    color: Option<RgbColor>,
    font_family: Option<String>,
}

impl Run {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = Some(bold);
        self
    }

    /// Font size in points.
    pub fn size(mut self, size_pt: f64) -> Self {
        self.size_pt = Some(size_pt);
        self
    }

    pub fn color(mut self, color: RgbColor) -> Self {
        self.color = Some(color);
        self
    }

    pub fn font(mut self, family: impl Into<String>) -> Self {
        self.font_family = Some(family.into());
        self
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn bold_override(&self) -> Option<bool> {
        self.bold
    }

    #[inline]
    pub fn size_pt(&self) -> Option<f64> {
        self.size_pt
    }

    #[inline]
    pub fn color_override(&self) -> Option<RgbColor> {
        self.color
    }

    #[inline]
    pub fn font_family(&self) -> Option<&str> {
        self.font_family.as_deref()
    }

    /// Structural check applied when the run is added to a tree.
    pub(crate) fn check(&self) -> std::result::Result<(), String> {
        if let Some(size) = self.size_pt
            && (!size.is_finite() || pt_to_half_points(size) == 0)
        {
            return Err(format!("size_pt must be a positive size, got {}", size));
        }
        if let Some(ref family) = self.font_family
            && family.trim().is_empty()
        {
            return Err("font_family must not be empty".to_string());
        }
        Ok(())
    }

    /// Resolve every formatting field: run override, then block default, then registry.
    pub fn resolve(&self, defaults: &RunDefaults, registry: &StyleRegistry) -> ResolvedRun {
        let font_family = self
            .font_family
            .as_deref()
            .or(defaults.font_family.as_deref())
            .unwrap_or(registry.default_font_family())
            .to_string();
        let size_half_points = self
            .size_pt
            .map(pt_to_half_points)
            .or(defaults.size_half_points)
            .unwrap_or_else(|| registry.default_font_size_half_points());

        ResolvedRun {
            text: self.text.clone(),
            font_family,
            size_half_points,
            bold: self.bold.or(defaults.bold).unwrap_or(false),
            color: self.color.or(defaults.color),
        }
    }
}

/// Formatting a block supplies to its runs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RunDefaults {
    pub font_family: Option<String>,
    /// Font size in half-points
    pub size_half_points: Option<u32>,
    pub bold: Option<bool>,
    pub color: Option<RgbColor>,
}

/// A run with every formatting field settled.
///
/// `color: None` means the reader's theme default, never black.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRun {
    pub text: String,
    pub font_family: String,
    /// Font size in half-points
    pub size_half_points: u32,
    pub bold: bool,
    pub color: Option<RgbColor>,
}

impl ResolvedRun {
    #[inline]
    pub fn size_pt(&self) -> f64 {
        half_points_to_pt(self.size_half_points)
    }

    /// Append `<w:r>` to `xml`.
    ///
    /// `style_bold` is the paragraph style's weight; a run that resolves to
    /// regular weight under a bold style needs an explicit `w:b w:val="0"`.
    pub(crate) fn to_xml(&self, xml: &mut String, style_bold: bool) -> Result<()> {
        xml.push_str("<w:r><w:rPr>");
        write_fonts(xml, &self.font_family)?;
        if self.bold {
            xml.push_str("<w:b/><w:bCs/>");
        } else if style_bold {
            xml.push_str(r#"<w:b w:val="0"/><w:bCs w:val="0"/>"#);
        }
        if let Some(color) = self.color {
            write!(xml, r#"<w:color w:val="{}"/>"#, color.to_hex())?;
        }
        write!(
            xml,
            r#"<w:sz w:val="{0}"/><w:szCs w:val="{0}"/>"#,
            self.size_half_points
        )?;
        xml.push_str("</w:rPr>");
        write_text(xml, &self.text);
        xml.push_str("</w:r>");
        Ok(())
    }
}

/// Emit run text, turning tabs into `w:tab` and line breaks into `w:br`.
///
/// `\r\n` and a lone `\r` both count as one line break.
fn write_text(xml: &mut String, text: &str) {
    let mut segment_start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        let element = match ch {
            '\t' => "<w:tab/>",
            '\n' => "<w:br/>",
            '\r' => {
                if let Some(&(_, '\n')) = chars.peek() {
                    chars.next();
                }
                "<w:br/>"
            },
            _ => continue,
        };
        push_text_segment(xml, &text[segment_start..idx]);
        xml.push_str(element);
        segment_start = match chars.peek() {
            Some(&(next, _)) => next,
            None => text.len(),
        };
    }
    push_text_segment(xml, &text[segment_start..]);
}

fn push_text_segment(xml: &mut String, segment: &str) {
    if !segment.is_empty() {
        xml.push_str(r#"<w:t xml:space="preserve">"#);
        xml.push_str(&escape_xml(segment));
        xml.push_str("</w:t>");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> StyleRegistry {
        StyleRegistry::new("Calibri", 11.0).unwrap()
    }

    #[test]
    fn test_unset_fields_resolve_from_registry() {
        let resolved = Run::new("plain").resolve(&RunDefaults::default(), &registry());
        assert_eq!(resolved.font_family, "Calibri");
        assert_eq!(resolved.size_half_points, 22);
        assert!(!resolved.bold);
        assert_eq!(resolved.color, None);
    }

    #[test]
    fn test_block_defaults_sit_between_run_and_registry() {
        let defaults = RunDefaults {
            font_family: None,
            size_half_points: Some(40),
            bold: Some(true),
            color: Some(RgbColor(0x1F, 0x38, 0x64)),
        };

        let inherited = Run::new("title").resolve(&defaults, &registry());
        assert_eq!(inherited.size_pt(), 20.0);
        assert!(inherited.bold);
        assert_eq!(inherited.font_family, "Calibri");

        let overridden = Run::new("title")
            .size(28.0)
            .bold(false)
            .font("Cambria")
            .resolve(&defaults, &registry());
        assert_eq!(overridden.size_half_points, 56);
        assert!(!overridden.bold);
        assert_eq!(overridden.font_family, "Cambria");
        assert_eq!(overridden.color, Some(RgbColor(0x1F, 0x38, 0x64)));
    }

    #[test]
    fn test_check_rejects_bad_sizes() {
        assert!(Run::new("x").size(0.0).check().is_err());
        assert!(Run::new("x").size(-3.0).check().is_err());
        assert!(Run::new("x").size(f64::NAN).check().is_err());
        assert!(Run::new("x").font("").check().is_err());
        assert!(Run::new("x").size(9.5).check().is_ok());
    }

    #[test]
    fn test_run_xml() {
        let resolved = Run::new("A & B")
            .color(RgbColor(0x4F, 0x81, 0xBD))
            .resolve(&RunDefaults::default(), &registry());
        let mut xml = String::new();
        resolved.to_xml(&mut xml, false).unwrap();

        assert!(xml.contains(r#"w:ascii="Calibri""#));
        assert!(xml.contains(r#"<w:sz w:val="22"/>"#));
        assert!(xml.contains(r#"<w:color w:val="4F81BD"/>"#));
        assert!(xml.contains(r#"<w:t xml:space="preserve">A &amp; B</w:t>"#));
        assert!(!xml.contains("<w:b"));
    }

    #[test]
    fn test_regular_run_under_bold_style() {
        let resolved = Run::new("x")
            .bold(false)
            .resolve(&RunDefaults::default(), &registry());
        let mut xml = String::new();
        resolved.to_xml(&mut xml, true).unwrap();
        assert!(xml.contains(r#"<w:b w:val="0"/>"#));
    }

    #[test]
    fn test_tabs_and_breaks() {
        let mut xml = String::new();
        write_text(&mut xml, "a\tb\nc\r\nd\t");
        assert_eq!(
            xml,
            concat!(
                r#"<w:t xml:space="preserve">a</w:t><w:tab/>"#,
                r#"<w:t xml:space="preserve">b</w:t><w:br/>"#,
                r#"<w:t xml:space="preserve">c</w:t><w:br/>"#,
                r#"<w:t xml:space="preserve">d</w:t><w:tab/>"#,
            )
        );

        let mut xml = String::new();
        write_text(&mut xml, "");
        assert!(xml.is_empty());
    }
}

/// Style support for written DOCX documents.
///
/// `StyleRegistry` holds the document-wide run defaults. The heading tier
/// table gives every heading level its own size, weight and color, and
/// `MutableStyle` renders both into `word/styles.xml`.
use crate::ooxml::docx::enums::WdStyleType;
use crate::ooxml::docx::format::{RgbColor, half_points_to_pt, pt_to_half_points};
use crate::ooxml::docx::writer::run::MAX_FONT_SIZE_PT;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::constants::namespace;
use crate::ooxml::shared::escape_xml;
use std::fmt::Write as FmtWrite;

/// Style id of the bulleted list paragraph style.
pub const LIST_BULLET_STYLE_ID: &str = "ListBullet";

/// Numbering instance the `ListBullet` style points at.
pub const BULLET_NUM_ID: u32 = 1;

/// Document-wide run defaults, applied wherever neither the run nor its block
/// says otherwise.
///
/// # Examples
///
/// ```
/// use docwright::ooxml::docx::writer::StyleRegistry;
///
/// let registry = StyleRegistry::new("Calibri", 11.0)?;
/// assert_eq!(registry.default_font_family(), "Calibri");
/// assert!(StyleRegistry::new("Calibri", 0.0).is_err());
/// # Ok::<(), docwright::ooxml::error::OoxmlError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StyleRegistry {
    default_font_family: String,
    default_font_size_pt: f64,
}

impl StyleRegistry {
    /// Create a registry; the size must be a finite positive point value no larger
    /// than [`MAX_FONT_SIZE_PT`] and the family must not be blank.
    pub fn new(default_font_family: impl Into<String>, default_font_size_pt: f64) -> Result<Self> {
        let default_font_family = default_font_family.into();
        if default_font_family.trim().is_empty() {
            return Err(OoxmlError::InvalidStyle {
                field: "default_font_family",
                reason: "font family must not be empty".to_string(),
            });
        }
        if !default_font_size_pt.is_finite() || default_font_size_pt <= 0.0 {
            return Err(OoxmlError::InvalidStyle {
                field: "default_font_size_pt",
                reason: format!("expected a positive size, got {}", default_font_size_pt),
            });
        }
        if default_font_size_pt > MAX_FONT_SIZE_PT {
            return Err(OoxmlError::InvalidStyle {
                field: "default_font_size_pt",
                reason: format!(
                    "{}pt exceeds the largest writable size of {}pt",
                    default_font_size_pt, MAX_FONT_SIZE_PT
                ),
            });
        }
        // Anything under a quarter point rounds to a zero half-point size.
        if pt_to_half_points(default_font_size_pt) == 0 {
            return Err(OoxmlError::InvalidStyle {
                field: "default_font_size_pt",
                reason: format!("{}pt is below the smallest writable size", default_font_size_pt),
            });
        }

        Ok(Self {
            default_font_family,
            default_font_size_pt,
        })
    }

    #[inline]
    pub fn default_font_family(&self) -> &str {
        &self.default_font_family
    }

    #[inline]
    pub fn default_font_size_pt(&self) -> f64 {
        self.default_font_size_pt
    }

    /// Default size in half-points, as written to `w:sz`.
    #[inline]
    pub fn default_font_size_half_points(&self) -> u32 {
        pt_to_half_points(self.default_font_size_pt)
    }
}

impl Default for StyleRegistry {
    /// Calibri 11pt.
    fn default() -> Self {
        Self {
            default_font_family: "Calibri".to_string(),
            default_font_size_pt: 11.0,
        }
    }
}

/// Formatting of one heading level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadingTier {
    pub level: u8,
    /// Font size in half-points
    pub size_half_points: u32,
    pub bold: bool,
    pub color: Option<RgbColor>,
    /// Space before the paragraph in twips
    pub space_before: u32,
    /// Space after the paragraph in twips
    pub space_after: u32,
}

impl HeadingTier {
    #[inline]
    pub fn size_pt(&self) -> f64 {
        half_points_to_pt(self.size_half_points)
    }

    /// `Heading1` .. `Heading9`
    pub fn style_id(&self) -> String {
        format!("Heading{}", self.level)
    }
}

/// Lowest and highest heading levels with a tier.
pub const MIN_HEADING_LEVEL: i32 = 1;
pub const MAX_HEADING_LEVEL: i32 = 9;

const HEADING_TIERS: [HeadingTier; 9] = [
    tier(1, 40, true, RgbColor(0x1F, 0x38, 0x64), 480, 120),
    tier(2, 32, true, RgbColor(0x2F, 0x54, 0x96), 360, 80),
    tier(3, 28, true, RgbColor(0x2F, 0x54, 0x96), 240, 60),
    tier(4, 26, true, RgbColor(0x36, 0x5F, 0x91), 200, 40),
    tier(5, 24, false, RgbColor(0x36, 0x5F, 0x91), 200, 40),
    tier(6, 23, false, RgbColor(0x24, 0x3F, 0x60), 160, 40),
    tier(7, 22, false, RgbColor(0x24, 0x3F, 0x60), 160, 40),
    tier(8, 21, false, RgbColor(0x40, 0x40, 0x40), 120, 40),
    tier(9, 20, false, RgbColor(0x40, 0x40, 0x40), 120, 40),
];

const fn tier(
    level: u8,
    size_half_points: u32,
    bold: bool,
    color: RgbColor,
    space_before: u32,
    space_after: u32,
) -> HeadingTier {
    HeadingTier {
        level,
        size_half_points,
        bold,
        color: Some(color),
        space_before,
        space_after,
    }
}

/// Tier for a heading level, `None` outside `1..=9`.
pub fn heading_tier(level: i32) -> Option<&'static HeadingTier> {
    if (MIN_HEADING_LEVEL..=MAX_HEADING_LEVEL).contains(&level) {
        HEADING_TIERS.get((level - 1) as usize)
    } else {
        None
    }
}

/// A style definition for `styles.xml`.
#[derive(Debug, Clone)]
pub struct MutableStyle {
    /// Style identifier (e.g., "Heading1")
    style_id: String,
    /// UI-visible name (e.g., "heading 1")
    name: String,
    style_type: WdStyleType,
    /// Whether this is the default style for its type
    is_default: bool,
    based_on: Option<String>,
    /// Style applied to the following paragraph
    next: Option<String>,
    /// UI priority (lower = higher priority)
    priority: Option<i32>,
    is_quick_style: bool,
    is_semi_hidden: bool,
    keep_next: bool,
    /// Outline level, 0-based
    outline_level: Option<u8>,
    /// Numbering instance for list styles
    num_id: Option<u32>,
    /// Left indent in twips
    indent_left: Option<u32>,
    /// Hanging indent in twips
    indent_hanging: Option<u32>,
    space_before: Option<u32>,
    space_after: Option<u32>,
    font_name: Option<String>,
    /// Font size in half-points
    font_size: Option<u32>,
    bold: Option<bool>,
    color: Option<RgbColor>,
}

impl MutableStyle {
    pub fn new(
        style_id: impl Into<String>,
        name: impl Into<String>,
        style_type: WdStyleType,
    ) -> Self {
        Self {
            style_id: style_id.into(),
            name: name.into(),
            style_type,
            is_default: false,
            based_on: None,
            next: None,
            priority: None,
            is_quick_style: false,
            is_semi_hidden: false,
            keep_next: false,
            outline_level: None,
            num_id: None,
            indent_left: None,
            indent_hanging: None,
            space_before: None,
            space_after: None,
            font_name: None,
            font_size: None,
            bold: None,
            color: None,
        }
    }

    #[inline]
    pub fn style_id(&self) -> &str {
        &self.style_id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn style_type(&self) -> WdStyleType {
        self.style_type
    }

    #[inline]
    pub fn font_size(&self) -> Option<u32> {
        self.font_size
    }

    #[inline]
    pub fn bold(&self) -> Option<bool> {
        self.bold
    }

    #[inline]
    pub fn color(&self) -> Option<RgbColor> {
        self.color
    }

    /// The `Normal` paragraph style, carrying the registry defaults.
    pub fn normal(registry: &StyleRegistry) -> Self {
        let mut style = Self::new("Normal", "Normal", WdStyleType::Paragraph);
        style.is_default = true;
        style.is_quick_style = true;
        style.font_name = Some(registry.default_font_family().to_string());
        style.font_size = Some(registry.default_font_size_half_points());
        style
    }

    /// `Heading{n}` for a tier. The family is left to `Normal`.
    pub fn heading(tier: &HeadingTier) -> Self {
        let mut style = Self::new(
            tier.style_id(),
            format!("heading {}", tier.level),
            WdStyleType::Paragraph,
        );
        style.based_on = Some("Normal".to_string());
        style.next = Some("Normal".to_string());
        style.priority = Some(9);
        style.is_quick_style = true;
        style.keep_next = true;
        style.outline_level = Some(tier.level - 1);
        style.space_before = Some(tier.space_before);
        style.space_after = Some(tier.space_after);
        style.font_size = Some(tier.size_half_points);
        style.bold = Some(tier.bold);
        style.color = tier.color;
        style
    }

    /// `ListBullet`, bound to the bullet numbering definition.
    pub fn list_bullet() -> Self {
        let mut style = Self::new(LIST_BULLET_STYLE_ID, "List Bullet", WdStyleType::Paragraph);
        style.based_on = Some("Normal".to_string());
        style.priority = Some(99);
        style.num_id = Some(BULLET_NUM_ID);
        style.indent_left = Some(720);
        style.indent_hanging = Some(360);
        style
    }

    pub fn default_paragraph_font() -> Self {
        let mut style = Self::new(
            "DefaultParagraphFont",
            "Default Paragraph Font",
            WdStyleType::Character,
        );
        style.is_default = true;
        style.is_semi_hidden = true;
        style.priority = Some(1);
        style
    }

    /// Render the `<w:style>` element.
    pub fn to_xml(&self) -> Result<String> {
        let mut xml = String::with_capacity(512);

        write!(
            &mut xml,
            r#"<w:style w:type="{}""#,
            self.style_type.to_xml()
        )?;
        if self.is_default {
            xml.push_str(r#" w:default="1""#);
        }
        write!(&mut xml, r#" w:styleId="{}">"#, escape_xml(&self.style_id))?;
        write!(&mut xml, r#"<w:name w:val="{}"/>"#, escape_xml(&self.name))?;

        if let Some(ref based_on) = self.based_on {
            write!(&mut xml, r#"<w:basedOn w:val="{}"/>"#, escape_xml(based_on))?;
        }
        if let Some(ref next) = self.next {
            write!(&mut xml, r#"<w:next w:val="{}"/>"#, escape_xml(next))?;
        }
        if let Some(priority) = self.priority {
            write!(&mut xml, r#"<w:uiPriority w:val="{}"/>"#, priority)?;
        }
        if self.is_semi_hidden {
            xml.push_str("<w:semiHidden/><w:unhideWhenUsed/>");
        }
        if self.is_quick_style {
            xml.push_str("<w:qFormat/>");
        }

        if self.style_type == WdStyleType::Paragraph {
            self.write_paragraph_properties(&mut xml)?;
        }
        self.write_run_properties(&mut xml)?;

        xml.push_str("</w:style>");
        Ok(xml)
    }

    fn write_paragraph_properties(&self, xml: &mut String) -> Result<()> {
        let has_para_props = self.keep_next
            || self.num_id.is_some()
            || self.space_before.is_some()
            || self.space_after.is_some()
            || self.indent_left.is_some()
            || self.outline_level.is_some();
        if !has_para_props {
            return Ok(());
        }

        xml.push_str("<w:pPr>");
        if self.keep_next {
            xml.push_str("<w:keepNext/><w:keepLines/>");
        }
        if let Some(num_id) = self.num_id {
            write!(
                xml,
                r#"<w:numPr><w:ilvl w:val="0"/><w:numId w:val="{}"/></w:numPr>"#,
                num_id
            )?;
        }
        if self.space_before.is_some() || self.space_after.is_some() {
            xml.push_str("<w:spacing");
            if let Some(before) = self.space_before {
                write!(xml, r#" w:before="{}""#, before)?;
            }
            if let Some(after) = self.space_after {
                write!(xml, r#" w:after="{}""#, after)?;
            }
            xml.push_str("/>");
        }
        if let Some(left) = self.indent_left {
            write!(xml, r#"<w:ind w:left="{}""#, left)?;
            if let Some(hanging) = self.indent_hanging {
                write!(xml, r#" w:hanging="{}""#, hanging)?;
            }
            xml.push_str("/>");
        }
        if let Some(level) = self.outline_level {
            write!(xml, r#"<w:outlineLvl w:val="{}"/>"#, level)?;
        }
        xml.push_str("</w:pPr>");
        Ok(())
    }

    fn write_run_properties(&self, xml: &mut String) -> Result<()> {
        let has_run_props = self.font_name.is_some()
            || self.font_size.is_some()
            || self.bold.is_some()
            || self.color.is_some();
        if !has_run_props {
            return Ok(());
        }

        xml.push_str("<w:rPr>");
        if let Some(ref font_name) = self.font_name {
            write_fonts(xml, font_name)?;
        }
        match self.bold {
            Some(true) => xml.push_str("<w:b/><w:bCs/>"),
            Some(false) => xml.push_str(r#"<w:b w:val="0"/><w:bCs w:val="0"/>"#),
            None => {},
        }
        if let Some(ref color) = self.color {
            write!(xml, r#"<w:color w:val="{}"/>"#, color.to_hex())?;
        }
        if let Some(size) = self.font_size {
            write!(xml, r#"<w:sz w:val="{}"/><w:szCs w:val="{}"/>"#, size, size)?;
        }
        xml.push_str("</w:rPr>");
        Ok(())
    }
}

/// `<w:rFonts>` naming one family for every script slot.
pub(crate) fn write_fonts(xml: &mut String, family: &str) -> std::fmt::Result {
    let family = escape_xml(family);
    write!(
        xml,
        r#"<w:rFonts w:ascii="{0}" w:hAnsi="{0}" w:eastAsia="{0}" w:cs="{0}"/>"#,
        family
    )
}

/// Generate `word/styles.xml` for a registry.
pub fn generate_styles_xml(registry: &StyleRegistry) -> Result<String> {
    let mut xml = String::with_capacity(8192);

    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push('\n');
    xml.push_str(r#"<w:styles xmlns:w=""#);
    xml.push_str(namespace::WML_MAIN);
    xml.push_str(r#"">"#);

    xml.push_str("<w:docDefaults><w:rPrDefault><w:rPr>");
    write_fonts(&mut xml, registry.default_font_family())?;
    let size = registry.default_font_size_half_points();
    write!(
        &mut xml,
        r#"<w:sz w:val="{}"/><w:szCs w:val="{}"/><w:lang w:val="en-US"/>"#,
        size, size
    )?;
    xml.push_str("</w:rPr></w:rPrDefault>");
    xml.push_str(
        r#"<w:pPrDefault><w:pPr><w:spacing w:after="160" w:line="259" w:lineRule="auto"/></w:pPr></w:pPrDefault>"#,
    );
    xml.push_str("</w:docDefaults>");

    xml.push_str(&MutableStyle::normal(registry).to_xml()?);
    xml.push_str(&MutableStyle::default_paragraph_font().to_xml()?);
    for tier in &HEADING_TIERS {
        xml.push_str(&MutableStyle::heading(tier).to_xml()?);
    }
    xml.push_str(&MutableStyle::list_bullet().to_xml()?);

    xml.push_str("</w:styles>");
    Ok(xml)
}

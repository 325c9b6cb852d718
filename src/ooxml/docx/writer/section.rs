use crate::ooxml::docx::enums::WdOrientation;
use std::fmt::Write as FmtWrite;

/// Twips per inch (a twip is a twentieth of a point).
const TWIPS_PER_INCH: f64 = 1440.0;

/// Page setup written as the body's trailing `w:sectPr`.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionProperties {
    /// Page width in twips (1440 = 1 inch)
    pub page_width: u32,
    /// Page height in twips
    pub page_height: u32,
    pub orientation: WdOrientation,
    /// Top margin in twips
    pub margin_top: u32,
    /// Bottom margin in twips
    pub margin_bottom: u32,
    /// Left margin in twips
    pub margin_left: u32,
    /// Right margin in twips
    pub margin_right: u32,
    /// Header distance from top in twips
    pub header_distance: u32,
    /// Footer distance from bottom in twips
    pub footer_distance: u32,
}

impl Default for SectionProperties {
    fn default() -> Self {
        // US Letter, 8.5" x 11"
        Self {
            page_width: 12240,
            page_height: 15840,
            orientation: WdOrientation::Portrait,
            margin_top: 1440,
            margin_bottom: 1440,
            margin_left: 1440,
            margin_right: 1440,
            header_distance: 720,
            footer_distance: 720,
        }
    }
}

impl SectionProperties {
    /// US Letter (8.5" x 11") with one-inch margins.
    pub fn letter() -> Self {
        Self::default()
    }

    /// A4 (210mm x 297mm) with one-inch margins.
    pub fn a4() -> Self {
        Self {
            page_width: 11906,
            page_height: 16838,
            ..Default::default()
        }
    }

    /// Turn the page sideways, swapping width and height.
    pub fn landscape(mut self) -> Self {
        if self.orientation != WdOrientation::Landscape {
            self.orientation = WdOrientation::Landscape;
            std::mem::swap(&mut self.page_width, &mut self.page_height);
        }
        self
    }

    /// Set margins, all in inches.
    pub fn margins(mut self, top: f64, bottom: f64, left: f64, right: f64) -> Self {
        self.margin_top = inches_to_twips(top);
        self.margin_bottom = inches_to_twips(bottom);
        self.margin_left = inches_to_twips(left);
        self.margin_right = inches_to_twips(right);
        self
    }

    pub(crate) fn to_xml(&self, xml: &mut String) -> std::fmt::Result {
        xml.push_str("<w:sectPr>");
        write!(
            xml,
            r#"<w:pgSz w:w="{}" w:h="{}""#,
            self.page_width, self.page_height
        )?;
        if self.orientation == WdOrientation::Landscape {
            write!(xml, r#" w:orient="{}""#, self.orientation.to_xml())?;
        }
        xml.push_str("/>");
        write!(
            xml,
            r#"<w:pgMar w:top="{}" w:right="{}" w:bottom="{}" w:left="{}" w:header="{}" w:footer="{}" w:gutter="0"/>"#,
            self.margin_top,
            self.margin_right,
            self.margin_bottom,
            self.margin_left,
            self.header_distance,
            self.footer_distance
        )?;
        xml.push_str(r#"<w:cols w:space="720"/>"#);
        xml.push_str("</w:sectPr>");
        Ok(())
    }
}

fn inches_to_twips(inches: f64) -> u32 {
    (inches.max(0.0) * TWIPS_PER_INCH).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_default() {
        let mut xml = String::new();
        SectionProperties::default().to_xml(&mut xml).unwrap();
        assert!(xml.contains(r#"<w:pgSz w:w="12240" w:h="15840"/>"#));
        assert!(xml.contains(r#"w:top="1440""#));
        assert!(!xml.contains("w:orient"));
    }

    #[test]
    fn test_a4_landscape() {
        let section = SectionProperties::a4().landscape();
        assert_eq!(section.page_width, 16838);
        assert_eq!(section.page_height, 11906);

        // Applying landscape twice must not swap back.
        let section = section.landscape();
        assert_eq!(section.page_width, 16838);

        let mut xml = String::new();
        section.to_xml(&mut xml).unwrap();
        assert!(xml.contains(r#"w:orient="landscape""#));
    }

    #[test]
    fn test_margins_in_inches() {
        let section = SectionProperties::letter().margins(0.5, 0.75, 1.25, 1.0);
        assert_eq!(section.margin_top, 720);
        assert_eq!(section.margin_bottom, 1080);
        assert_eq!(section.margin_left, 1800);
        assert_eq!(section.margin_right, 1440);
    }
}

/// Bullet list numbering for `word/numbering.xml`.
///
/// One abstract definition with nine bullet levels, and one numbering instance
/// (`BULLET_NUM_ID`) that the `ListBullet` style points at.
use crate::ooxml::docx::writer::style::BULLET_NUM_ID;
use crate::ooxml::error::Result;
use crate::ooxml::opc::constants::namespace;
use crate::ooxml::shared::escape_xml;
use std::fmt::Write as FmtWrite;

const BULLET_ABSTRACT_NUM_ID: u32 = 0;

/// Bullet glyph and its font, cycling through three shapes by level.
const BULLET_GLYPHS: [(&str, &str); 3] = [
    ("\u{F0B7}", "Symbol"),
    ("o", "Courier New"),
    ("\u{F0A7}", "Wingdings"),
];

/// Indent step per level in twips.
const INDENT_STEP: u32 = 720;
const HANGING_INDENT: u32 = 360;

/// Generate `word/numbering.xml`.
pub fn generate_numbering_xml() -> Result<String> {
    let mut xml = String::with_capacity(4096);

    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push('\n');
    xml.push_str(r#"<w:numbering xmlns:w=""#);
    xml.push_str(namespace::WML_MAIN);
    xml.push_str(r#"">"#);

    write!(
        &mut xml,
        r#"<w:abstractNum w:abstractNumId="{}"><w:multiLevelType w:val="hybridMultilevel"/>"#,
        BULLET_ABSTRACT_NUM_ID
    )?;
    for level in 0..9u32 {
        let (glyph, font) = BULLET_GLYPHS[level as usize % BULLET_GLYPHS.len()];
        write!(
            &mut xml,
            r#"<w:lvl w:ilvl="{}"><w:start w:val="1"/><w:numFmt w:val="bullet"/><w:lvlText w:val="{}"/><w:lvlJc w:val="left"/>"#,
            level,
            escape_xml(glyph)
        )?;
        write!(
            &mut xml,
            r#"<w:pPr><w:ind w:left="{}" w:hanging="{}"/></w:pPr>"#,
            INDENT_STEP * (level + 1),
            HANGING_INDENT
        )?;
        write!(
            &mut xml,
            r#"<w:rPr><w:rFonts w:ascii="{0}" w:hAnsi="{0}" w:hint="default"/></w:rPr></w:lvl>"#,
            font
        )?;
    }
    xml.push_str("</w:abstractNum>");

    write!(
        &mut xml,
        r#"<w:num w:numId="{}"><w:abstractNumId w:val="{}"/></w:num>"#,
        BULLET_NUM_ID, BULLET_ABSTRACT_NUM_ID
    )?;

    xml.push_str("</w:numbering>");
    Ok(xml)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbering_xml() {
        let xml = generate_numbering_xml().unwrap();
        assert_eq!(xml.matches("<w:lvl ").count(), 9);
        assert_eq!(xml.matches(r#"<w:numFmt w:val="bullet"/>"#).count(), 9);
        assert!(xml.contains(r#"<w:num w:numId="1"><w:abstractNumId w:val="0"/></w:num>"#));
        assert!(xml.contains(r#"<w:ind w:left="720" w:hanging="360"/>"#));
    }
}

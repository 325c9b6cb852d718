/// Enumerations for WordprocessingML attribute values.
use std::fmt;

/// Page orientation of a section (`w:pgSz/@w:orient`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WdOrientation {
    #[default]
    Portrait,
    Landscape,
}

impl WdOrientation {
    #[inline]
    pub const fn to_xml(self) -> &'static str {
        match self {
            Self::Portrait => "portrait",
            Self::Landscape => "landscape",
        }
    }

    #[inline]
    pub fn from_xml(s: &str) -> Option<Self> {
        match s {
            "portrait" => Some(Self::Portrait),
            "landscape" => Some(Self::Landscape),
            _ => None,
        }
    }
}

impl fmt::Display for WdOrientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_xml())
    }
}

/// Kind of style definition in `styles.xml` (`w:style/@w:type`).
///
/// Only the kinds the writer emits are listed: paragraph styles for
/// `Normal`, the heading tiers and `ListBullet`, and the character style
/// `DefaultParagraphFont`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WdStyleType {
    #[default]
    Paragraph,
    Character,
}

impl WdStyleType {
    #[inline]
    pub const fn to_xml(self) -> &'static str {
        match self {
            Self::Paragraph => "paragraph",
            Self::Character => "character",
        }
    }

    #[inline]
    pub fn from_xml(s: &str) -> Option<Self> {
        match s {
            "paragraph" => Some(Self::Paragraph),
            "character" => Some(Self::Character),
            _ => None,
        }
    }
}

impl fmt::Display for WdStyleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_xml())
    }
}

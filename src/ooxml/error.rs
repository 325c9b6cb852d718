/// Error types for OOXML operations.
use std::path::PathBuf;
use thiserror::Error;

/// Result type for OOXML operations.
pub type Result<T> = std::result::Result<T, OoxmlError>;

/// Error types for OOXML operations.
///
/// Build-time problems (`InvalidStyle`, `InvalidBlock`) are reported by the call that
/// introduced them. Serialize-time problems (`UnsupportedFormatting`, `Io`, `Opc`)
/// abort the whole serialization.
#[derive(Error, Debug)]
pub enum OoxmlError {
    /// Bad default style parameters
    #[error("Invalid style: {field}: {reason}")]
    InvalidStyle { field: &'static str, reason: String },

    /// Malformed block or run input at build time
    #[error("Invalid block at index {index}: {reason}")]
    InvalidBlock { index: usize, reason: String },

    /// Formatting outside the supported range, detected at serialize time
    #[error("Unsupported formatting in block {block}: {detail}")]
    UnsupportedFormatting { block: usize, detail: String },

    /// Output could not be opened, written or finalized
    #[error("IO error writing {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// OPC package error
    #[error("OPC error: {0}")]
    Opc(#[from] crate::ooxml::opc::error::OpcError),

    /// XML parsing error
    #[error("XML error: {0}")]
    Xml(String),
}

impl OoxmlError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        OoxmlError::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error was raised while building the tree rather than serializing it.
    pub fn is_build_error(&self) -> bool {
        matches!(
            self,
            OoxmlError::InvalidStyle { .. } | OoxmlError::InvalidBlock { .. }
        )
    }
}

impl From<quick_xml::Error> for OoxmlError {
    fn from(err: quick_xml::Error) -> Self {
        OoxmlError::Xml(err.to_string())
    }
}

impl From<std::fmt::Error> for OoxmlError {
    fn from(err: std::fmt::Error) -> Self {
        OoxmlError::Xml(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_errors_are_classified() {
        let style = OoxmlError::InvalidStyle {
            field: "default_font_family",
            reason: "blank".to_string(),
        };
        let block = OoxmlError::InvalidBlock {
            index: 3,
            reason: "heading level 0".to_string(),
        };
        assert!(style.is_build_error());
        assert!(block.is_build_error());

        let formatting = OoxmlError::UnsupportedFormatting {
            block: 0,
            detail: "heading level 10".to_string(),
        };
        let io = OoxmlError::io(
            "missing/out.docx",
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such directory"),
        );
        assert!(!formatting.is_build_error());
        assert!(!io.is_build_error());
        assert!(!OoxmlError::Xml("bad".to_string()).is_build_error());
    }
}

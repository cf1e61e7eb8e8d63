use std::fmt;
use std::path::PathBuf;

/// Failure to resolve or load an asset.
#[derive(Debug, Clone, PartialEq)]
pub enum AssetError {
    /// No sprite region registered under this name.
    UnknownTexture(String),
    /// The font exists but has no glyph for this character, or the font itself is missing.
    UnknownGlyph { font: String, glyph: char },
    /// An atlas image could not be read or decoded.
    Decode { path: PathBuf, message: String },
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetError::UnknownTexture(name) => write!(f, "no such texture as {name:?}"),
            AssetError::UnknownGlyph { font, glyph } => {
                write!(f, "font {font:?} has no glyph for {glyph:?}")
            }
            AssetError::Decode { path, message } => {
                write!(f, "failed to load atlas image {}: {message}", path.display())
            }
        }
    }
}

impl std::error::Error for AssetError {}

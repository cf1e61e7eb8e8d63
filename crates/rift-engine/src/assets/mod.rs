//! Texture atlases: named regions of uploaded images.

mod atlas;
mod error;
mod canvas;

pub use atlas::{Atlas, AtlasEntry, Region};
pub use error::AssetError;
pub use canvas::AtlasImage;

//! Rendering subsystem.
//!
//! Draw calls are recorded into a CPU-side [`DrawBatch`] during the frame and
//! replayed by the [`SpriteRenderer`] once the frame is flushed.
//!
//! Convention:
//! - CPU geometry is in logical screen pixels (top-left origin, +Y down).
//! - Vertex shader converts to NDC using a viewport uniform.
//! - The logical screen is letterboxed into the surface with an integer scale.

mod batch;
mod common;
mod ctx;
mod painter;
mod sprite;

pub use batch::{Batch, DrawBatch, Quad, SpriteVertex, TextureId, UvRect, MAX_BATCH_QUADS};
pub use ctx::{RenderCtx, RenderTarget};
pub use painter::{AssetGuard, MissingAssetPolicy, Painter, SOLID};
pub use sprite::SpriteRenderer;

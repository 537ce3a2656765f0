pub mod commands;
pub mod traits;

pub use commands::{RenderCommand, RenderQueue, TileView};
pub use traits::TileRenderer;

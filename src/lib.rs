//! ogpgen - OGP Image Generator
//!
//! Renders a line of text onto a fixed-size background image. Text is broken
//! to the image width following Japanese line-breaking rules (kinsoku shori)
//! and centered as a block.
//!
//! # Layers
//! 1. `kinsoku` / `linebreak` / `layout` - pure, total core
//! 2. `font` / `render` - measurement and rasterization
//! 3. `options` / `pipeline` / `report` - resources, files, errors

pub mod kinsoku;
pub mod linebreak;
pub mod layout;
pub mod color;
pub mod font;
pub mod render;
pub mod options;
pub mod pipeline;
pub mod report;

pub use linebreak::{break_lines, break_lines_detailed, resolve_break_index, LineBreaker, LineSequence, TextMeasurer};
pub use layout::{compute_positions, layout_lines, DrawPosition, LayoutParams, PlacedLine};
pub use color::{ColorError, Rgba};
pub use font::{FontFace, Typeface};
pub use render::{compose, Rendered, TextStyle};
pub use options::RenderOptions;
pub use pipeline::{write_image, OgpError, OgpImage};
pub use report::{sha256_hex, RenderReport};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

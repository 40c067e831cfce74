//! Palette widget - sidebar of addable node templates plus the tips box.

mod palette;

pub use palette::{render, AddNodeEvent, PaletteConfig};

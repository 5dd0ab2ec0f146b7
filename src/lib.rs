//! kksubs burns styled subtitles into still images.
//!
//! A [`SubtitleGroup`] targets one image and holds an ordered list of [`Subtitle`]s, each pairing
//! logical text lines with a [`StyleProfile`]. Applying a group folds over its subtitles:
//!
//! 1. **Wrap**: logical lines become physical lines of at most `wrap_columns` characters.
//! 2. **Measure**: each line gets an integer pixel width; all lines share one height basis taken
//!    from the reference glyph `"l"`.
//! 3. **Position**: alignment, anchor and push direction give every line a top-left origin.
//! 4. **Composite**: outline layers, the fill layer and an optional background are drawn into
//!    transparent layers and pasted onto the [`Canvas`], bottom to top: background, outline 2,
//!    outline 1, fill.
//!
//! Glyph work goes through the [`TextRasterizer`] trait; [`VelloTextRasterizer`] shapes with
//! Parley and rasterizes with vello_cpu. Canvases are premultiplied RGBA8 internally.
//!
//! [`SubtitleScript`] loads profiles and groups from JSON, and [`BatchJob`] applies scripts to a
//! folder of images in parallel.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod apply;
mod batch;
mod model;
mod script;

mod foundation {
    pub(crate) mod core;
    pub(crate) mod error;
}

mod layout {
    pub(crate) mod positioner;
}

mod render {
    pub(crate) mod blur;
    pub(crate) mod composite;
    pub(crate) mod compositor;
    pub(crate) mod surface;
}

mod text {
    pub(crate) mod engine;
    pub(crate) mod metrics;
    pub(crate) mod raster;
    pub(crate) mod wrap;
}

#[cfg(test)]
#[path = "../tests/unit/support.rs"]
mod test_support;

pub use apply::Applicator;
pub use batch::{
    BatchFailure, BatchJob, BatchReport, IMAGE_EXTENSIONS, apply_group_to_file, list_images,
    save_image,
};
pub use foundation::core::{Point, Rgba8, Vec2, premul_px, unpremul_px};
pub use foundation::error::{SubsError, SubsResult};
pub use layout::positioner::position_lines;
pub use model::{
    Alignment, FontSpec, OutlineSpec, Push, StrokeSpec, StyleProfile, StyleProfileBuilder,
    Subtitle, SubtitleGroup, TextboxSpec,
};
pub use render::blur::{blur_layer, blur_rgba8_premul, kernel_half_width};
pub use render::composite::{over, over_in_place, paste_at, paste_layer};
pub use render::compositor::render_subtitle;
pub use render::surface::{Canvas, PremulRgba8, RenderLayer};
pub use script::SubtitleScript;
pub use text::engine::{LoadedFont, VelloTextRasterizer};
pub use text::metrics::{
    BlockMetrics, HEIGHT_REFERENCE, LineMeasure, height_basis, line_width, measure, measure_block,
};
pub use text::raster::{Pen, TextRasterizer};
pub use text::wrap::wrap_lines;

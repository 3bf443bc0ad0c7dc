//! Fill styles for closed shapes.
//!
//! Every style except [`FillStyle::Solid`] starts from the scan-line
//! segments in [`crate::hatch`] and decorates them with rough strokes.

mod dashed;
mod dots;
mod hachure;
mod zigzag;
mod zigzag_line;

pub use dashed::dashed_fill;
pub use dots::dots_fill;
pub use hachure::{cross_hatch_fill, hachure_fill, render_lines};
pub use zigzag::zigzag_fill;
pub use zigzag_line::zigzag_line_fill;

use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::ops::OpSet;
use crate::options::ResolvedOptions;
use crate::rng::Rng;
use crate::sketchy::solid_fill_polygon;

/// Available fill styles.
///
/// ## Rust Lesson #25: serde `from`/`into`
///
/// `#[serde(from = "String", into = "String")]` routes (de)serialization
/// through the `From` impls below. Unknown names never fail to parse; they
/// become [`FillStyle::Hachure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FillStyle {
    #[default]
    Hachure,
    CrossHatch,
    Zigzag,
    ZigzagLine,
    Dots,
    Dashed,
    Solid,
}

impl FillStyle {
    /// Get all fill styles.
    pub fn all() -> &'static [FillStyle] {
        &[
            FillStyle::Hachure,
            FillStyle::CrossHatch,
            FillStyle::Zigzag,
            FillStyle::ZigzagLine,
            FillStyle::Dots,
            FillStyle::Dashed,
            FillStyle::Solid,
        ]
    }

    /// Get style name as used in configuration.
    pub fn name(&self) -> &'static str {
        match self {
            FillStyle::Hachure => "hachure",
            FillStyle::CrossHatch => "cross-hatch",
            FillStyle::Zigzag => "zigzag",
            FillStyle::ZigzagLine => "zigzag-line",
            FillStyle::Dots => "dots",
            FillStyle::Dashed => "dashed",
            FillStyle::Solid => "solid",
        }
    }

    /// Parse a style from its name.
    pub fn from_name(name: &str) -> Option<FillStyle> {
        match name.to_lowercase().as_str() {
            "hachure" => Some(FillStyle::Hachure),
            "cross-hatch" => Some(FillStyle::CrossHatch),
            "zigzag" => Some(FillStyle::Zigzag),
            "zigzag-line" => Some(FillStyle::ZigzagLine),
            "dots" => Some(FillStyle::Dots),
            "dashed" => Some(FillStyle::Dashed),
            "solid" => Some(FillStyle::Solid),
            _ => None,
        }
    }

    /// Fill the polygons in this style.
    ///
    /// Solid fills come back as a `FillPath` set, the rest as `FillSketch`.
    pub fn fill(&self, polygons: &[Vec<Point>], o: &ResolvedOptions, rng: &mut Rng) -> OpSet {
        match self {
            FillStyle::Hachure => OpSet::fill_sketch(hachure_fill(polygons, o, rng)),
            FillStyle::CrossHatch => OpSet::fill_sketch(cross_hatch_fill(polygons, o, rng)),
            FillStyle::Zigzag => OpSet::fill_sketch(zigzag_fill(polygons, o, rng)),
            FillStyle::ZigzagLine => OpSet::fill_sketch(zigzag_line_fill(polygons, o, rng)),
            FillStyle::Dots => OpSet::fill_sketch(dots_fill(polygons, o, rng)),
            FillStyle::Dashed => OpSet::fill_sketch(dashed_fill(polygons, o, rng)),
            FillStyle::Solid => OpSet::fill_path(solid_fill_polygon(polygons)),
        }
    }
}

impl From<String> for FillStyle {
    fn from(name: String) -> Self {
        FillStyle::from_name(&name).unwrap_or_else(|| {
            log::debug!("unknown fill style {name:?}, using hachure");
            FillStyle::Hachure
        })
    }
}

impl From<FillStyle> for String {
    fn from(style: FillStyle) -> Self {
        style.name().to_string()
    }
}

impl std::fmt::Display for FillStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

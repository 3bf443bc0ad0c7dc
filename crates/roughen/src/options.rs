//! Drawing options and their resolution into a complete configuration.
//!
//! [`Options`] is the sparse record callers build (or deserialize from JSON):
//! every field is optional. [`resolve`] merges generator-wide defaults and
//! per-call options over the library constants and enforces the visibility
//! rules, producing a [`ResolvedOptions`] that the sketch and fill code reads.
//!
//! ## Rust Lesson #24: Option<T> for sparse records
//!
//! A JS options bag relies on `undefined` for "not set". Here every field is
//! an `Option<T>`; merging is just "take the first `Some`".

use serde::{Deserialize, Serialize};

use crate::patterns::FillStyle;
use crate::rng::random_seed;

/// Fill paint: a single color or an ordered list of gradient colors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Fill {
    Color(String),
    Gradient(Vec<String>),
}

impl Fill {
    /// True when the fill paints nothing ("", "none", or no gradient stops).
    pub fn is_empty(&self) -> bool {
        match self {
            Fill::Color(color) => color.is_empty() || color == "none",
            Fill::Gradient(stops) => stops.is_empty(),
        }
    }
}

impl From<&str> for Fill {
    fn from(color: &str) -> Self {
        Fill::Color(color.to_string())
    }
}

impl From<String> for Fill {
    fn from(color: String) -> Self {
        Fill::Color(color)
    }
}

impl From<Vec<String>> for Fill {
    fn from(stops: Vec<String>) -> Self {
        Fill::Gradient(stops)
    }
}

/// Sparse drawing options. Unset fields fall back to generator defaults,
/// then to the library constants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Options {
    pub max_randomness_offset: Option<f64>,
    pub roughness: Option<f64>,
    pub bowing: Option<f64>,
    /// 0 means "pick a fresh seed for this call".
    pub seed: Option<u64>,

    pub stroke: Option<String>,
    pub stroke_width: Option<f64>,
    pub disable_multi_stroke: Option<bool>,
    pub disable_multi_stroke_fill: Option<bool>,
    pub stroke_line_dash: Option<Vec<f64>>,
    pub stroke_line_dash_offset: Option<f64>,

    pub fill: Option<Fill>,
    pub fill_style: Option<FillStyle>,
    pub fill_weight: Option<f64>,
    pub fill_line_dash: Option<Vec<f64>>,
    pub fill_line_dash_offset: Option<f64>,
    pub fill_shape_roughness_gain: Option<f64>,
    /// Color used when neither stroke nor fill would paint anything.
    pub fallback_fill: Option<String>,

    pub curve_fitting: Option<f64>,
    pub curve_tightness: Option<f64>,
    pub curve_step_count: Option<usize>,

    pub hachure_angle: Option<f64>,
    pub hachure_gap: Option<f64>,
    pub dash_offset: Option<f64>,
    pub dash_gap: Option<f64>,
    pub zigzag_offset: Option<f64>,

    pub font_family: Option<String>,
    pub font_size: Option<f64>,
    pub font_path: Option<String>,
    pub font_weight: Option<String>,

    pub gradient_angle: Option<f64>,
    pub gradient_smoothness: Option<f64>,

    pub fixed_decimal_place_digits: Option<u32>,
    pub preserve_vertices: Option<bool>,
}

macro_rules! setters {
    ($($name:ident => $field:ident: $ty:ty;)*) => {
        impl Options {
            $(
                pub fn $name(mut self, value: $ty) -> Self {
                    self.$field = Some(value);
                    self
                }
            )*
        }
    };
}

macro_rules! string_setters {
    ($($name:ident => $field:ident;)*) => {
        impl Options {
            $(
                pub fn $name(mut self, value: impl Into<String>) -> Self {
                    self.$field = Some(value.into());
                    self
                }
            )*
        }
    };
}

setters! {
    with_max_randomness_offset => max_randomness_offset: f64;
    with_roughness => roughness: f64;
    with_bowing => bowing: f64;
    with_seed => seed: u64;
    with_stroke_width => stroke_width: f64;
    with_disable_multi_stroke => disable_multi_stroke: bool;
    with_disable_multi_stroke_fill => disable_multi_stroke_fill: bool;
    with_stroke_line_dash => stroke_line_dash: Vec<f64>;
    with_stroke_line_dash_offset => stroke_line_dash_offset: f64;
    with_fill_style => fill_style: FillStyle;
    with_fill_weight => fill_weight: f64;
    with_fill_line_dash => fill_line_dash: Vec<f64>;
    with_fill_line_dash_offset => fill_line_dash_offset: f64;
    with_fill_shape_roughness_gain => fill_shape_roughness_gain: f64;
    with_curve_fitting => curve_fitting: f64;
    with_curve_tightness => curve_tightness: f64;
    with_curve_step_count => curve_step_count: usize;
    with_hachure_angle => hachure_angle: f64;
    with_hachure_gap => hachure_gap: f64;
    with_dash_offset => dash_offset: f64;
    with_dash_gap => dash_gap: f64;
    with_zigzag_offset => zigzag_offset: f64;
    with_font_size => font_size: f64;
    with_gradient_angle => gradient_angle: f64;
    with_gradient_smoothness => gradient_smoothness: f64;
    with_fixed_decimal_place_digits => fixed_decimal_place_digits: u32;
    with_preserve_vertices => preserve_vertices: bool;
}

string_setters! {
    with_stroke => stroke;
    with_fallback_fill => fallback_fill;
    with_font_family => font_family;
    with_font_path => font_path;
    with_font_weight => font_weight;
}

impl Options {
    /// Set the fill paint (a color string or a list of gradient stops).
    pub fn with_fill(mut self, fill: impl Into<Fill>) -> Self {
        self.fill = Some(fill.into());
        self
    }
}

/// Fully specified drawing configuration.
///
/// Built by [`resolve`]; variants for internal passes come from
/// [`ResolvedOptions::overridden`], never from mutating a shared instance.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedOptions {
    pub max_randomness_offset: f64,
    pub roughness: f64,
    pub bowing: f64,
    pub seed: u64,

    pub stroke: String,
    pub stroke_width: f64,
    pub disable_multi_stroke: bool,
    pub disable_multi_stroke_fill: bool,
    pub stroke_line_dash: Vec<f64>,
    pub stroke_line_dash_offset: f64,

    pub fill: Option<Fill>,
    pub fill_style: FillStyle,
    pub fill_weight: f64,
    pub fill_line_dash: Vec<f64>,
    pub fill_line_dash_offset: f64,
    pub fill_shape_roughness_gain: f64,
    pub fallback_fill: String,

    pub curve_fitting: f64,
    pub curve_tightness: f64,
    pub curve_step_count: usize,

    pub hachure_angle: f64,
    pub hachure_gap: f64,
    pub dash_offset: Option<f64>,
    pub dash_gap: Option<f64>,
    pub zigzag_offset: Option<f64>,

    pub font_family: String,
    pub font_size: f64,
    pub font_path: Option<String>,
    pub font_weight: String,

    pub gradient_angle: f64,
    pub gradient_smoothness: f64,

    pub fixed_decimal_place_digits: Option<u32>,
    pub preserve_vertices: bool,
}

impl Default for ResolvedOptions {
    /// The library constants.
    fn default() -> Self {
        Self {
            max_randomness_offset: 2.0,
            roughness: 1.0,
            bowing: 2.0,
            seed: 0,
            stroke: "none".to_string(),
            stroke_width: 2.0,
            disable_multi_stroke: false,
            disable_multi_stroke_fill: false,
            stroke_line_dash: Vec::new(),
            stroke_line_dash_offset: 0.0,
            fill: None,
            fill_style: FillStyle::Hachure,
            fill_weight: 1.0,
            fill_line_dash: Vec::new(),
            fill_line_dash_offset: 0.0,
            fill_shape_roughness_gain: 0.8,
            fallback_fill: "#0f0".to_string(),
            curve_fitting: 0.95,
            curve_tightness: 0.1,
            curve_step_count: 9,
            hachure_angle: -41.0,
            hachure_gap: 3.5,
            dash_offset: None,
            dash_gap: None,
            zigzag_offset: None,
            font_family: "sans-serif".to_string(),
            font_size: 25.0,
            font_path: None,
            font_weight: "normal".to_string(),
            gradient_angle: 0.0,
            gradient_smoothness: 1.0,
            fixed_decimal_place_digits: None,
            preserve_vertices: false,
        }
    }
}

/// Merge `defaults` and `local` over the library constants.
///
/// For every field the local value wins, then the default, then the
/// constant. Afterwards the visibility rules run in order:
/// 1. zero stroke width hides the stroke,
/// 2. no stroke and no fill gives a black stroke,
/// 3. still nothing painted gives the fallback fill color.
pub fn resolve(defaults: &Options, local: &Options) -> ResolvedOptions {
    let mut resolved = ResolvedOptions::default();
    resolved.apply(defaults);
    resolved.apply(local);
    resolved.enforce_visibility();
    resolved
}

impl ResolvedOptions {
    /// A copy of these options with the fields set in `overrides` replaced.
    ///
    /// Visibility rules are not re-applied; this is for internal pass
    /// variants (fill passes, rotated hatch, etc.).
    pub fn overridden(&self, overrides: &Options) -> ResolvedOptions {
        let mut next = self.clone();
        next.apply(overrides);
        next
    }

    /// Replace seed 0 with a fresh random seed so the result can be replayed.
    pub fn with_concrete_seed(mut self) -> Self {
        if self.seed == 0 {
            self.seed = random_seed();
            log::debug!("no seed supplied, using {}", self.seed);
        }
        self
    }

    fn apply(&mut self, o: &Options) {
        if let Some(v) = o.max_randomness_offset {
            self.max_randomness_offset = v;
        }
        if let Some(v) = o.roughness {
            self.roughness = v;
        }
        if let Some(v) = o.bowing {
            self.bowing = v;
        }
        if let Some(v) = o.seed {
            self.seed = v;
        }
        if let Some(v) = &o.stroke {
            self.stroke = v.clone();
        }
        if let Some(v) = o.stroke_width {
            self.stroke_width = v;
        }
        if let Some(v) = o.disable_multi_stroke {
            self.disable_multi_stroke = v;
        }
        if let Some(v) = o.disable_multi_stroke_fill {
            self.disable_multi_stroke_fill = v;
        }
        if let Some(v) = &o.stroke_line_dash {
            self.stroke_line_dash = v.clone();
        }
        if let Some(v) = o.stroke_line_dash_offset {
            self.stroke_line_dash_offset = v;
        }
        if let Some(v) = &o.fill {
            self.fill = Some(v.clone());
        }
        if let Some(v) = o.fill_style {
            self.fill_style = v;
        }
        if let Some(v) = o.fill_weight {
            self.fill_weight = v;
        }
        if let Some(v) = &o.fill_line_dash {
            self.fill_line_dash = v.clone();
        }
        if let Some(v) = o.fill_line_dash_offset {
            self.fill_line_dash_offset = v;
        }
        if let Some(v) = o.fill_shape_roughness_gain {
            self.fill_shape_roughness_gain = v;
        }
        if let Some(v) = &o.fallback_fill {
            self.fallback_fill = v.clone();
        }
        if let Some(v) = o.curve_fitting {
            self.curve_fitting = v;
        }
        if let Some(v) = o.curve_tightness {
            self.curve_tightness = v;
        }
        if let Some(v) = o.curve_step_count {
            self.curve_step_count = v;
        }
        if let Some(v) = o.hachure_angle {
            self.hachure_angle = v;
        }
        if let Some(v) = o.hachure_gap {
            self.hachure_gap = v;
        }
        if let Some(v) = o.dash_offset {
            self.dash_offset = Some(v);
        }
        if let Some(v) = o.dash_gap {
            self.dash_gap = Some(v);
        }
        if let Some(v) = o.zigzag_offset {
            self.zigzag_offset = Some(v);
        }
        if let Some(v) = &o.font_family {
            self.font_family = v.clone();
        }
        if let Some(v) = o.font_size {
            self.font_size = v;
        }
        if let Some(v) = &o.font_path {
            self.font_path = Some(v.clone());
        }
        if let Some(v) = &o.font_weight {
            self.font_weight = v.clone();
        }
        if let Some(v) = o.gradient_angle {
            self.gradient_angle = v;
        }
        if let Some(v) = o.gradient_smoothness {
            self.gradient_smoothness = v;
        }
        if let Some(v) = o.fixed_decimal_place_digits {
            self.fixed_decimal_place_digits = Some(v);
        }
        if let Some(v) = o.preserve_vertices {
            self.preserve_vertices = v;
        }
    }

    fn enforce_visibility(&mut self) {
        if self.stroke_width == 0.0 {
            self.stroke = "none".to_string();
        }
        let fill_empty = self.fill.as_ref().is_none_or(Fill::is_empty);
        if self.stroke == "none" && fill_empty {
            self.stroke = "#000".to_string();
        }
        if fill_empty && (self.stroke.is_empty() || self.stroke == "none") {
            log::debug!("nothing visible, falling back to fill {}", self.fallback_fill);
            self.fill = Some(Fill::Color(self.fallback_fill.clone()));
        }
    }

    /// Whether a fill pass should be generated.
    pub fn has_fill(&self) -> bool {
        match &self.fill {
            Some(Fill::Color(color)) => !color.is_empty() && color != "none" && color != "transparent",
            Some(Fill::Gradient(stops)) => !stops.is_empty(),
            None => false,
        }
    }

    /// Whether the outline pass should be emitted.
    pub fn has_stroke(&self) -> bool {
        !self.stroke.is_empty() && self.stroke != "none"
    }

    /// Hachure spacing, or four stroke widths when the gap is negative.
    pub fn hachure_gap_or_stroke(&self) -> f64 {
        if self.hachure_gap >= 0.0 {
            self.hachure_gap
        } else {
            self.stroke_width * 4.0
        }
    }

    /// Dash length for the dashed fill.
    pub fn dash_offset_or_gap(&self) -> f64 {
        match self.dash_offset {
            Some(offset) if offset >= 0.0 => offset,
            _ => self.hachure_gap_or_stroke(),
        }
    }

    /// Space between dashes for the dashed fill.
    pub fn dash_gap_or_gap(&self) -> f64 {
        match self.dash_gap {
            Some(gap) if gap >= 0.0 => gap,
            _ => self.hachure_gap_or_stroke(),
        }
    }

    /// Saw-tooth size for the zigzag-line fill.
    pub fn zigzag_offset_or_gap(&self) -> f64 {
        match self.zigzag_offset {
            Some(offset) if offset >= 0.0 => offset,
            _ => self.hachure_gap_or_stroke(),
        }
    }

    /// Fill line weight, or half the stroke width when negative.
    pub fn effective_fill_weight(&self) -> f64 {
        if self.fill_weight >= 0.0 {
            self.fill_weight
        } else {
            self.stroke_width * 0.5
        }
    }
}

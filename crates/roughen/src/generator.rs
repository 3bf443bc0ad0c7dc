//! Shape-level entry point.
//!
//! A [`Generator`] holds default [`Options`]. Each call resolves its own
//! options on top of those defaults, creates a fresh [`Rng`] from the
//! resolved seed, draws the outline, then the fill, and packages both into
//! a [`Drawable`] with the fill first.
//!
//! # Example
//! ```
//! use roughen::{Generator, Options, Point};
//!
//! let generator = Generator::new();
//! let options = Options::default().with_seed(42).with_fill("#c00").with_stroke("#000");
//! let drawable = generator.rectangle(10.0, 10.0, 80.0, 40.0, &options);
//! assert_eq!(drawable.sets.len(), 2); // fill, then outline
//! ```

use crate::geometry::Point;
use crate::ops::{Drawable, OpSet, OpSetKind, Shape};
use crate::options::{resolve, Options, ResolvedOptions};
use crate::path::{self, PathError};
use crate::patterns::FillStyle;
use crate::rng::{random_seed, Rng};
use crate::sketchy;
use crate::text::{layout, text_placeholder, GlyphSource, TextAlign, TextBaseline};

/// Builds rough [`Drawable`]s from shape requests.
#[derive(Debug, Clone, Default)]
pub struct Generator {
    defaults: Options,
}

impl Generator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generator whose calls start from `defaults` instead of the built-in
    /// values.
    pub fn with_defaults(defaults: Options) -> Self {
        Self { defaults }
    }

    pub fn defaults(&self) -> &Options {
        &self.defaults
    }

    /// A fresh seed for callers that want to record and replay drawings.
    pub fn new_seed() -> u64 {
        random_seed()
    }

    /// Resolved options and the call's random source.
    fn prepare(&self, options: &Options) -> (ResolvedOptions, Rng) {
        let o = resolve(&self.defaults, options).with_concrete_seed();
        let rng = Rng::new(o.seed);
        (o, rng)
    }

    /// Rough line between two points.
    pub fn line(&self, from: Point, to: Point, options: &Options) -> Drawable {
        let (o, mut rng) = self.prepare(options);
        let outline = OpSet::outline(sketchy::double_line(from, to, &o, &mut rng, false));
        Drawable::new(Shape::Line, o, vec![outline])
    }

    /// Rough rectangle with its top-left corner at (x, y).
    pub fn rectangle(&self, x: f64, y: f64, width: f64, height: f64, options: &Options) -> Drawable {
        let (o, mut rng) = self.prepare(options);
        let outline = OpSet::outline(sketchy::rectangle(x, y, width, height, &o, &mut rng));

        let mut sets = Vec::new();
        if o.has_fill() {
            let points = sketchy::rectangle_points(x, y, width, height).to_vec();
            sets.push(o.fill_style.fill(&[points], &o, &mut rng));
        }
        finish(Shape::Rectangle, o, sets, outline)
    }

    /// Rough ellipse centered on `center`.
    pub fn ellipse(&self, center: Point, width: f64, height: f64, options: &Options) -> Drawable {
        self.ellipse_shape(Shape::Ellipse, center, width, height, options)
    }

    /// Rough circle; an ellipse with equal axes.
    pub fn circle(&self, center: Point, diameter: f64, options: &Options) -> Drawable {
        self.ellipse_shape(Shape::Circle, center, diameter, diameter, options)
    }

    fn ellipse_shape(&self, shape: Shape, center: Point, width: f64, height: f64, options: &Options) -> Drawable {
        let (o, mut rng) = self.prepare(options);
        let params = sketchy::ellipse_params(width, height, &o, &mut rng);
        let drawn = sketchy::ellipse_with_params(center, &o, &mut rng, &params);

        let mut sets = Vec::new();
        if o.has_fill() {
            if o.fill_style == FillStyle::Solid {
                let solid = sketchy::ellipse_with_params(center, &o, &mut rng, &params);
                sets.push(OpSet::fill_path(solid.ops));
            } else {
                sets.push(o.fill_style.fill(&[drawn.core_points], &o, &mut rng));
            }
        }
        finish(shape, o, sets, OpSet::outline(drawn.ops))
    }

    /// Open polyline through `points`.
    pub fn linear_path(&self, points: &[Point], options: &Options) -> Drawable {
        let (o, mut rng) = self.prepare(options);
        let outline = OpSet::outline(sketchy::linear_path(points, false, &o, &mut rng));
        Drawable::new(Shape::LinearPath, o, vec![outline])
    }

    /// Closed polygon through `points`.
    pub fn polygon(&self, points: &[Point], options: &Options) -> Drawable {
        let (o, mut rng) = self.prepare(options);
        let outline = OpSet::outline(sketchy::polygon(points, &o, &mut rng));

        let mut sets = Vec::new();
        if o.has_fill() {
            sets.push(o.fill_style.fill(&[points.to_vec()], &o, &mut rng));
        }
        finish(Shape::Polygon, o, sets, outline)
    }

    /// Elliptical arc from `start` to `stop` radians.
    ///
    /// Only closed arcs (pie slices) are filled.
    #[allow(clippy::too_many_arguments)]
    pub fn arc(
        &self,
        center: Point,
        width: f64,
        height: f64,
        start: f64,
        stop: f64,
        closed: bool,
        options: &Options,
    ) -> Drawable {
        let (o, mut rng) = self.prepare(options);
        let outline = OpSet::outline(sketchy::arc(
            center, width, height, start, stop, closed, true, &o, &mut rng,
        ));

        let mut sets = Vec::new();
        if closed && o.has_fill() {
            if o.fill_style == FillStyle::Solid {
                let fill_o = o.overridden(&Options::default().with_disable_multi_stroke(true));
                let ops = sketchy::arc(center, width, height, start, stop, true, false, &fill_o, &mut rng);
                sets.push(OpSet::fill_path(ops));
            } else {
                let points = sketchy::arc_fill_polygon(center, width, height, start, stop, &o, &mut rng);
                sets.push(o.fill_style.fill(&[points], &o, &mut rng));
            }
        }
        finish(Shape::Arc, o, sets, outline)
    }

    /// Smooth rough curve through `points`.
    pub fn curve(&self, points: &[Point], options: &Options) -> Drawable {
        let (o, mut rng) = self.prepare(options);
        let outline = OpSet::outline(sketchy::curve(points, &o, &mut rng));

        let mut sets = Vec::new();
        if o.has_fill() {
            if o.fill_style == FillStyle::Solid {
                let ops = sketchy::curve(points, &solid_fill_options(&o), &mut rng);
                sets.push(OpSet::fill_path(ops));
            } else if !points.is_empty() {
                sets.push(o.fill_style.fill(&[points.to_vec()], &o, &mut rng));
            }
        }
        finish(Shape::Curve, o, sets, outline)
    }

    /// Several curves drawn as one continuous shape.
    ///
    /// A pattern fill covers all their points as a single polygon.
    pub fn curves(&self, point_sets: &[Vec<Point>], options: &Options) -> Drawable {
        let (o, mut rng) = self.prepare(options);
        let outline = OpSet::outline(sketchy::curves(point_sets, &o, &mut rng));

        let mut sets = Vec::new();
        if o.has_fill() {
            if o.fill_style == FillStyle::Solid {
                let ops = sketchy::curves(point_sets, &solid_fill_options(&o), &mut rng);
                sets.push(OpSet::fill_path(ops));
            } else {
                let flat: Vec<Point> = point_sets.iter().flatten().copied().collect();
                if !flat.is_empty() {
                    sets.push(o.fill_style.fill(&[flat], &o, &mut rng));
                }
            }
        }
        finish(Shape::Curve, o, sets, outline)
    }

    /// Rough rendering of SVG path data.
    ///
    /// Unusable chunks of `d` are skipped; see [`Generator::path_with_diagnostics`]
    /// to find out which.
    pub fn path(&self, d: &str, options: &Options) -> Drawable {
        self.path_with_diagnostics(d, options).0
    }

    /// Like [`Generator::path`], also returning every skipped chunk.
    pub fn path_with_diagnostics(&self, d: &str, options: &Options) -> (Drawable, Vec<PathError>) {
        let (o, mut rng) = self.prepare(options);
        if d.trim().is_empty() {
            return (Drawable::new(Shape::Path, o, Vec::new()), Vec::new());
        }

        let parsed = path::parse(d);
        let outline = OpSet::outline(path::sketch(&parsed.segments, &o, &mut rng));

        let mut sets = Vec::new();
        if o.has_fill() {
            let fill_o = solid_fill_options(&o);
            if o.fill_style == FillStyle::Solid {
                sets.push(OpSet::fill_path(path::sketch(&parsed.segments, &fill_o, &mut rng)));
            } else {
                let polygons = path::polygons(&parsed.segments);
                if !polygons.is_empty() {
                    sets.push(o.fill_style.fill(&polygons, &fill_o, &mut rng));
                }
            }
        }
        (finish(Shape::Path, o, sets, outline), parsed.errors)
    }

    /// Text placeholder anchored at `anchor`, sized from the font size.
    pub fn text(
        &self,
        anchor: Point,
        text: &str,
        align: TextAlign,
        baseline: TextBaseline,
        options: &Options,
    ) -> Drawable {
        let (o, _) = self.prepare(options);
        let set = text_placeholder(anchor, text, o.font_size, align, baseline);
        Drawable::new(Shape::Text, o, vec![set])
    }

    /// Text drawn as rough glyph outlines from `glyphs`.
    ///
    /// Each glyph is filled and stroked like a polygon. The first set records
    /// the aligned bounding box. Falls back to [`Generator::text`] when no
    /// character has a glyph.
    pub fn text_outline(
        &self,
        anchor: Point,
        text: &str,
        glyphs: &dyn GlyphSource,
        align: TextAlign,
        baseline: TextBaseline,
        options: &Options,
    ) -> Drawable {
        let (o, mut rng) = self.prepare(options);
        let Some(laid) = layout(anchor, text, o.font_size, glyphs) else {
            log::debug!("no glyphs for {text:?}, drawing a text placeholder");
            let set = text_placeholder(anchor, text, o.font_size, align, baseline);
            return Drawable::new(Shape::TextOutline, o, vec![set]);
        };

        let mut sets = Vec::new();
        for glyph in &laid.glyphs {
            if o.has_fill() && !glyph.contours.is_empty() {
                sets.push(o.fill_style.fill(&glyph.contours, &o, &mut rng));
            }
            if o.has_stroke() {
                for contour in &glyph.contours {
                    let ops = sketchy::polygon(open_contour(contour), &o, &mut rng);
                    sets.push(OpSet::new(OpSetKind::TextOutline, ops));
                }
            }
        }

        let (min_x, min_y, max_x, max_y) = laid.bounds;
        let (width, height) = (max_x - min_x, max_y - min_y);
        let (dx, dy) = (align.shift(width), baseline.shift(height));
        if dx != 0.0 || dy != 0.0 {
            for set in &mut sets {
                for op in &mut set.ops {
                    *op = op.translated(dx, dy);
                }
            }
        }

        if let Some(first) = sets.first_mut() {
            first.anchor = Some(Point::new(min_x + dx, min_y + dy));
            first.size = Some((width, height));
            first.text = Some(text.to_string());
        }
        Drawable::new(Shape::TextOutline, o, sets)
    }
}

/// `contour` without a trailing point that repeats the first; the polygon
/// closes itself.
fn open_contour(contour: &[Point]) -> &[Point] {
    match contour {
        [first, rest @ .., last] if first == last && !rest.is_empty() => {
            &contour[..contour.len() - 1]
        }
        _ => contour,
    }
}

/// Options for solid fills and path fills: a single, rougher pass.
fn solid_fill_options(o: &ResolvedOptions) -> ResolvedOptions {
    o.overridden(
        &Options::default()
            .with_disable_multi_stroke(true)
            .with_roughness(o.roughness + o.fill_shape_roughness_gain),
    )
}

/// Append the outline when it is visible.
fn finish(shape: Shape, o: ResolvedOptions, mut sets: Vec<OpSet>, outline: OpSet) -> Drawable {
    if o.has_stroke() {
        sets.push(outline);
    }
    Drawable::new(shape, o, sets)
}

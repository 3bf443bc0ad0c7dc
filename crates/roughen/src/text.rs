//! Text placement and glyph outline layout.
//!
//! Plain text becomes a [`OpSetKind::Text`] placeholder: an anchor, an
//! estimated box and the string, left for a writer to render with a real
//! font. Outlined text needs glyph shapes, which come from a [`GlyphSource`]
//! supplied by the caller (a font parser, a test fixture, ...).

use serde::{Deserialize, Serialize};

use crate::geometry::{bounding_box, Point};
use crate::ops::{OpSet, OpSetKind};

/// Average glyph width as a fraction of the font size.
const WIDTH_PER_CHAR: f64 = 0.6;

/// Advance of a space as a fraction of the font size.
pub const SPACE_ADVANCE: f64 = 0.35;

/// Horizontal placement of text relative to its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl TextAlign {
    /// Horizontal shift for text `width` wide.
    pub fn shift(&self, width: f64) -> f64 {
        match self {
            TextAlign::Left => 0.0,
            TextAlign::Center => -width / 2.0,
            TextAlign::Right => -width,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

/// Vertical placement of text relative to its anchor.
///
/// `Top` and `Baseline` leave the anchor where it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextBaseline {
    #[default]
    Baseline,
    Top,
    Middle,
    Bottom,
}

impl TextBaseline {
    /// Vertical shift for text `height` tall.
    pub fn shift(&self, height: f64) -> f64 {
        match self {
            TextBaseline::Baseline | TextBaseline::Top => 0.0,
            TextBaseline::Middle => -height / 2.0,
            TextBaseline::Bottom => -height,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TextBaseline::Baseline => "baseline",
            TextBaseline::Top => "top",
            TextBaseline::Middle => "middle",
            TextBaseline::Bottom => "bottom",
        }
    }
}

/// One glyph in font units, y pointing up.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Glyph {
    /// Closed or open contours; each is closed during layout.
    pub contours: Vec<Vec<Point>>,
    /// Horizontal advance after this glyph.
    pub advance: f64,
}

/// Supplies glyph outlines for outlined text.
///
/// ## Rust Lesson #26: Traits as Seams
///
/// The crate never reads font files itself. Anything that can answer these
/// two questions can drive [`crate::Generator::text_outline`], and tests use
/// a tiny in-memory implementation.
pub trait GlyphSource {
    /// Height of a line in font units (ascender minus descender).
    fn text_height(&self) -> f64;

    /// The glyph for `ch`, or `None` when the font has no outline for it.
    fn glyph(&self, ch: char) -> Option<Glyph>;
}

/// Placeholder set for text drawn by a writer with a real font.
pub fn text_placeholder(
    anchor: Point,
    text: &str,
    font_size: f64,
    align: TextAlign,
    baseline: TextBaseline,
) -> OpSet {
    let width = text.chars().count() as f64 * font_size * WIDTH_PER_CHAR;
    let height = font_size;
    let position = anchor.translated(align.shift(width), baseline.shift(height));

    OpSet::new(OpSetKind::Text, Vec::new())
        .with_anchor(position)
        .with_size(width, height)
        .with_text(text)
        .with_extra("align", align.name())
        .with_extra("baseline", baseline.name())
}

/// A glyph's contours placed on the page.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedGlyph {
    pub contours: Vec<Vec<Point>>,
}

/// Glyphs laid out along a line, with their combined bounding box.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLayout {
    pub glyphs: Vec<PlacedGlyph>,
    /// (min_x, min_y, max_x, max_y)
    pub bounds: (f64, f64, f64, f64),
}

/// Scale, flip and position every glyph of `text` starting at `anchor`.
///
/// Spaces only advance the cursor. Characters without a glyph are skipped
/// without advancing. Returns `None` when nothing drawable was placed.
pub fn layout(anchor: Point, text: &str, font_size: f64, glyphs: &dyn GlyphSource) -> Option<TextLayout> {
    let text_height = glyphs.text_height();
    if !(text_height.is_finite() && text_height > 0.0) {
        log::debug!("glyph source reports text height {text_height}, cannot lay out");
        return None;
    }
    let scale = font_size / text_height;

    let mut cursor = 0.0;
    let mut placed = Vec::new();

    for ch in text.chars() {
        if ch == ' ' {
            cursor += SPACE_ADVANCE * font_size;
            continue;
        }
        let Some(glyph) = glyphs.glyph(ch) else {
            continue;
        };

        let mut contours = Vec::new();
        for contour in glyph.contours.iter().filter(|c| c.len() >= 2) {
            let mut points: Vec<Point> = contour
                .iter()
                .map(|p| Point::new(anchor.x + cursor + p.x * scale, anchor.y - p.y * scale))
                .collect();
            if points.first() != points.last() {
                points.push(points[0]);
            }
            contours.push(points);
        }

        placed.push(PlacedGlyph { contours });
        cursor += glyph.advance * scale;
    }

    let all: Vec<Point> = placed
        .iter()
        .flat_map(|g| g.contours.iter().flatten().copied())
        .collect();
    bounding_box(&all).map(|bounds| TextLayout { glyphs: placed, bounds })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every letter is a unit square 1000 units tall with advance 1000.
    struct Boxes;

    impl GlyphSource for Boxes {
        fn text_height(&self) -> f64 {
            1000.0
        }

        fn glyph(&self, ch: char) -> Option<Glyph> {
            ch.is_ascii_alphabetic().then(|| Glyph {
                contours: vec![vec![
                    Point::new(0.0, 0.0),
                    Point::new(1000.0, 0.0),
                    Point::new(1000.0, 1000.0),
                    Point::new(0.0, 1000.0),
                ]],
                advance: 1000.0,
            })
        }
    }

    #[test]
    fn placeholder_size_and_alignment() {
        let set = text_placeholder(
            Point::new(100.0, 50.0),
            "abcd",
            10.0,
            TextAlign::Center,
            TextBaseline::Bottom,
        );
        assert_eq!(set.kind, OpSetKind::Text);
        assert_eq!(set.size, Some((24.0, 10.0)));
        assert_eq!(set.anchor, Some(Point::new(88.0, 40.0)));
        assert_eq!(set.text.as_deref(), Some("abcd"));
        assert_eq!(set.extras.get("align").map(String::as_str), Some("center"));
    }

    #[test]
    fn glyphs_scale_flip_and_advance() {
        let laid = layout(Point::new(0.0, 100.0), "a b", 20.0, &Boxes).unwrap();
        assert_eq!(laid.glyphs.len(), 2);

        // Closed during layout.
        let first = &laid.glyphs[0].contours[0];
        assert_eq!(first.len(), 5);
        assert_eq!(first[0], first[4]);
        assert_eq!(first[2], Point::new(20.0, 80.0));

        // 20 for "a", then 7 for the space.
        let second = &laid.glyphs[1].contours[0];
        assert!((second[0].x - 27.0).abs() < 1e-9);
        let (min_x, min_y, max_x, max_y) = laid.bounds;
        assert_eq!((min_x, min_y, max_y), (0.0, 80.0, 100.0));
        assert!((max_x - 47.0).abs() < 1e-9);
    }

    #[test]
    fn no_glyphs_gives_none() {
        assert!(layout(Point::new(0.0, 0.0), "123 ", 12.0, &Boxes).is_none());
    }
}

//! Drawing operations: the output of every generator in the crate.
//!
//! A [`Drawable`] holds ordered [`OpSet`]s; each set is a list of
//! pen-plotter style [`Op`]s tagged with the role it plays (outline, fill
//! hatching, solid fill path, text). Downstream writers turn these into SVG
//! path data, canvas calls, or plotter moves.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::geometry::Point;
use crate::options::ResolvedOptions;

/// One pen instruction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Op {
    Move(Point),
    LineTo(Point),
    CurveTo { ctrl1: Point, ctrl2: Point, to: Point },
}

impl Op {
    /// Flat coordinate list: 2 numbers for moves and lines, 6 for curves.
    pub fn data(&self) -> Vec<f64> {
        match self {
            Op::Move(p) | Op::LineTo(p) => vec![p.x, p.y],
            Op::CurveTo { ctrl1, ctrl2, to } => {
                vec![ctrl1.x, ctrl1.y, ctrl2.x, ctrl2.y, to.x, to.y]
            }
        }
    }

    /// Where the pen sits after this op.
    #[inline]
    pub fn end(&self) -> Point {
        match self {
            Op::Move(p) | Op::LineTo(p) => *p,
            Op::CurveTo { to, .. } => *to,
        }
    }

    /// Same op shifted by (dx, dy).
    pub fn translated(&self, dx: f64, dy: f64) -> Op {
        match self {
            Op::Move(p) => Op::Move(p.translated(dx, dy)),
            Op::LineTo(p) => Op::LineTo(p.translated(dx, dy)),
            Op::CurveTo { ctrl1, ctrl2, to } => Op::CurveTo {
                ctrl1: ctrl1.translated(dx, dy),
                ctrl2: ctrl2.translated(dx, dy),
                to: to.translated(dx, dy),
            },
        }
    }

    /// SVG path command letter for this op.
    pub fn command(&self) -> char {
        match self {
            Op::Move(_) => 'M',
            Op::LineTo(_) => 'L',
            Op::CurveTo { .. } => 'C',
        }
    }
}

/// What an [`OpSet`] is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum OpSetKind {
    /// Sketched stroke of the shape.
    Outline,
    /// Closed path to be filled solid.
    FillPath,
    /// Pattern strokes (hachure, dots, ...) painted with the fill color.
    FillSketch,
    /// Plain text placeholder with an anchor and an approximate size.
    Text,
    /// Glyph outlines laid out as paths.
    TextOutline,
}

/// A role plus its ops and optional metadata for serializers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpSet {
    pub kind: OpSetKind,
    pub ops: Vec<Op>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<Point>,
    /// (width, height)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<(f64, f64)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Free-form hints for writers (alignment, baseline, ...).
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extras: BTreeMap<String, String>,
}

impl OpSet {
    pub fn new(kind: OpSetKind, ops: Vec<Op>) -> Self {
        Self {
            kind,
            ops,
            anchor: None,
            size: None,
            text: None,
            extras: BTreeMap::new(),
        }
    }

    pub fn outline(ops: Vec<Op>) -> Self {
        Self::new(OpSetKind::Outline, ops)
    }

    pub fn fill_path(ops: Vec<Op>) -> Self {
        Self::new(OpSetKind::FillPath, ops)
    }

    pub fn fill_sketch(ops: Vec<Op>) -> Self {
        Self::new(OpSetKind::FillSketch, ops)
    }

    pub fn with_anchor(mut self, anchor: Point) -> Self {
        self.anchor = Some(anchor);
        self
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.size = Some((width, height));
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extras.insert(key.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Render the ops as SVG path data, `"M x y C ..."`.
    ///
    /// With `digits`, coordinates are rounded to that many decimals.
    pub fn to_path_data(&self, digits: Option<u32>) -> String {
        let fmt = |v: f64| match digits {
            Some(d) => format!("{:.*}", d as usize, v),
            None => format!("{v}"),
        };

        let mut parts = Vec::with_capacity(self.ops.len());
        for op in &self.ops {
            let coords: Vec<String> = op.data().into_iter().map(fmt).collect();
            parts.push(format!("{} {}", op.command(), coords.join(" ")));
        }
        parts.join(" ")
    }
}

/// Kind of shape a [`Drawable`] was generated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Shape {
    Line,
    Rectangle,
    Ellipse,
    Circle,
    LinearPath,
    Polygon,
    Arc,
    Curve,
    Path,
    Text,
    TextOutline,
}

/// Generated output for one shape request.
///
/// Fill sets come before the outline set so the stroke paints on top.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Drawable {
    pub shape: Shape,
    pub options: ResolvedOptions,
    pub sets: Vec<OpSet>,
}

impl Drawable {
    pub fn new(shape: Shape, options: ResolvedOptions, sets: Vec<OpSet>) -> Self {
        Self { shape, options, sets }
    }

    /// First set with the given role, if any.
    pub fn set(&self, kind: OpSetKind) -> Option<&OpSet> {
        self.sets.iter().find(|s| s.kind == kind)
    }

    /// All ops of every set, in paint order.
    pub fn ops(&self) -> impl Iterator<Item = &Op> {
        self.sets.iter().flat_map(|s| s.ops.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_arity() {
        let p = Point::new(1.0, 2.0);
        assert_eq!(Op::Move(p).data().len(), 2);
        assert_eq!(Op::LineTo(p).data().len(), 2);
        let c = Op::CurveTo { ctrl1: p, ctrl2: p, to: Point::new(5.0, 6.0) };
        assert_eq!(c.data(), vec![1.0, 2.0, 1.0, 2.0, 5.0, 6.0]);
        assert_eq!(c.end(), Point::new(5.0, 6.0));
    }

    #[test]
    fn path_data_rounds() {
        let set = OpSet::outline(vec![
            Op::Move(Point::new(0.0, 0.5)),
            Op::LineTo(Point::new(10.123, 3.0)),
        ]);
        assert_eq!(set.to_path_data(Some(1)), "M 0.0 0.5 L 10.1 3.0");
        assert_eq!(set.to_path_data(None), "M 0 0.5 L 10.123 3");
    }

    #[test]
    fn drawable_ops_follow_paint_order() {
        let fill = OpSet::new(OpSetKind::FillSketch, vec![Op::Move(Point::new(1.0, 1.0))]);
        let stroke = OpSet::outline(vec![
            Op::Move(Point::new(0.0, 0.0)),
            Op::LineTo(Point::new(4.0, 0.0)),
        ]);
        let d = Drawable::new(Shape::Polygon, ResolvedOptions::default(), vec![fill, stroke]);
        let ends: Vec<Point> = d.ops().map(Op::end).collect();
        assert_eq!(
            ends,
            vec![Point::new(1.0, 1.0), Point::new(0.0, 0.0), Point::new(4.0, 0.0)]
        );
    }

    #[test]
    fn translate_moves_every_point() {
        let c = Op::CurveTo {
            ctrl1: Point::new(0.0, 0.0),
            ctrl2: Point::new(1.0, 1.0),
            to: Point::new(2.0, 2.0),
        };
        assert_eq!(c.translated(1.0, -1.0).data(), vec![1.0, -1.0, 2.0, 0.0, 3.0, 1.0]);
    }
}

//! SVG path data: parsing, normalization and sketching.
//!
//! Tokenizing is done by `svgtypes`. The data string is cut into one chunk
//! per command letter and each chunk is parsed on its own, so one malformed
//! command is reported and skipped instead of discarding the whole path.
//! Parsed commands are normalized to absolute [`Segment`]s with the smooth
//! variants (`S`, `T`) expanded.
//!
//! ## Curve Flattening
//!
//! Pattern fills need polygons. [`polygons`] flattens each subpath with
//! lyon_geom at a fixed tolerance.

use lyon_geom::{CubicBezierSegment, QuadraticBezierSegment, point};
use svgtypes::{PathParser, PathSegment};

use crate::arc::arc_to_cubics;
use crate::geometry::Point;
use crate::ops::Op;
use crate::options::ResolvedOptions;
use crate::rng::Rng;
use crate::sketchy::{
    cubic_bezier_ops, double_line, quadratic_bezier_ops, single_cubic, single_quadratic,
};

/// Flattening tolerance for fill polygons, in user units.
const CURVE_TOLERANCE: f64 = 0.1;

const COMMANDS: &str = "MmLlHhVvCcSsQqTtAaZz";

/// A path data chunk that could not be used.
///
/// ## Rust Lesson #20: Error Handling
///
/// Skipped chunks are not fatal, so they are collected as values next to the
/// parsed result instead of being returned through `Err`.
#[derive(Debug, Clone, PartialEq)]
pub enum PathError {
    /// The chunk has a known command but its numbers do not parse.
    Malformed { chunk: String, message: String },
    /// The chunk starts with something that is not a path command.
    UnknownCommand { chunk: String },
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::Malformed { chunk, message } => {
                write!(f, "malformed path command '{}': {}", chunk, message)
            }
            PathError::UnknownCommand { chunk } => {
                write!(f, "unknown path command '{}'", chunk)
            }
        }
    }
}

impl std::error::Error for PathError {}

/// One absolute path command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    Move(Point),
    Line(Point),
    /// Absolute x of a horizontal line.
    Horizontal(f64),
    /// Absolute y of a vertical line.
    Vertical(f64),
    Cubic { ctrl1: Point, ctrl2: Point, to: Point },
    Quadratic { ctrl: Point, to: Point },
    Arc {
        rx: f64,
        ry: f64,
        x_axis_rotation: f64,
        large_arc: bool,
        sweep: bool,
        to: Point,
    },
    Close,
}

/// Normalized segments plus every chunk that was skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedPath {
    pub segments: Vec<Segment>,
    pub errors: Vec<PathError>,
}

/// Split path data into chunks that each start at a command letter.
///
/// `e`/`E` belong to number exponents and never start a chunk. Text before
/// the first command is kept as its own chunk so it can be reported.
fn split_commands(d: &str) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut start = 0;
    for (i, c) in d.char_indices() {
        if c.is_ascii_alphabetic() && c != 'e' && c != 'E' && i > start {
            chunks.push(&d[start..i]);
            start = i;
        }
    }
    if start < d.len() {
        chunks.push(&d[start..]);
    }
    chunks
        .into_iter()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .collect()
}

/// Tracks the pen while turning relative commands into absolute segments.
#[derive(Default)]
struct Normalizer {
    current: Point,
    subpath_start: Point,
    /// Second control point of the previous cubic, for `S`.
    last_cubic_ctrl: Option<Point>,
    /// Control point of the previous quadratic, for `T`.
    last_quad_ctrl: Option<Point>,
    segments: Vec<Segment>,
}

impl Normalizer {
    fn resolve(&self, abs: bool, x: f64, y: f64) -> Point {
        if abs {
            Point::new(x, y)
        } else {
            Point::new(self.current.x + x, self.current.y + y)
        }
    }

    fn reflect(&self, ctrl: Option<Point>) -> Point {
        match ctrl {
            Some(c) => Point::new(2.0 * self.current.x - c.x, 2.0 * self.current.y - c.y),
            None => self.current,
        }
    }

    /// ## Rust Lesson #22: Pattern Matching on Enums with Data
    ///
    /// Each `PathSegment` variant carries its own fields; destructuring in
    /// the match arm binds exactly the ones we need.
    fn push(&mut self, segment: PathSegment) {
        let mut cubic_ctrl = None;
        let mut quad_ctrl = None;

        match segment {
            PathSegment::MoveTo { abs, x, y } => {
                let p = self.resolve(abs, x, y);
                self.segments.push(Segment::Move(p));
                self.current = p;
                self.subpath_start = p;
            }
            PathSegment::LineTo { abs, x, y } => {
                let p = self.resolve(abs, x, y);
                self.segments.push(Segment::Line(p));
                self.current = p;
            }
            PathSegment::HorizontalLineTo { abs, x } => {
                let x = if abs { x } else { self.current.x + x };
                self.segments.push(Segment::Horizontal(x));
                self.current.x = x;
            }
            PathSegment::VerticalLineTo { abs, y } => {
                let y = if abs { y } else { self.current.y + y };
                self.segments.push(Segment::Vertical(y));
                self.current.y = y;
            }
            PathSegment::CurveTo { abs, x1, y1, x2, y2, x, y } => {
                let ctrl1 = self.resolve(abs, x1, y1);
                let ctrl2 = self.resolve(abs, x2, y2);
                let to = self.resolve(abs, x, y);
                self.segments.push(Segment::Cubic { ctrl1, ctrl2, to });
                cubic_ctrl = Some(ctrl2);
                self.current = to;
            }
            PathSegment::SmoothCurveTo { abs, x2, y2, x, y } => {
                let ctrl1 = self.reflect(self.last_cubic_ctrl);
                let ctrl2 = self.resolve(abs, x2, y2);
                let to = self.resolve(abs, x, y);
                self.segments.push(Segment::Cubic { ctrl1, ctrl2, to });
                cubic_ctrl = Some(ctrl2);
                self.current = to;
            }
            PathSegment::Quadratic { abs, x1, y1, x, y } => {
                let ctrl = self.resolve(abs, x1, y1);
                let to = self.resolve(abs, x, y);
                self.segments.push(Segment::Quadratic { ctrl, to });
                quad_ctrl = Some(ctrl);
                self.current = to;
            }
            PathSegment::SmoothQuadratic { abs, x, y } => {
                let ctrl = self.reflect(self.last_quad_ctrl);
                let to = self.resolve(abs, x, y);
                self.segments.push(Segment::Quadratic { ctrl, to });
                quad_ctrl = Some(ctrl);
                self.current = to;
            }
            PathSegment::EllipticalArc { abs, rx, ry, x_axis_rotation, large_arc, sweep, x, y } => {
                let to = self.resolve(abs, x, y);
                self.segments.push(Segment::Arc { rx, ry, x_axis_rotation, large_arc, sweep, to });
                self.current = to;
            }
            PathSegment::ClosePath { .. } => {
                self.segments.push(Segment::Close);
                self.current = self.subpath_start;
            }
        }

        self.last_cubic_ctrl = cubic_ctrl;
        self.last_quad_ctrl = quad_ctrl;
    }
}

/// Parse path data into absolute segments.
///
/// Never fails: unusable chunks are skipped, logged, and listed in
/// [`ParsedPath::errors`].
pub fn parse(d: &str) -> ParsedPath {
    let mut normalizer = Normalizer::default();
    let mut errors = Vec::new();

    for chunk in split_commands(d) {
        let Some(command) = chunk.chars().next().filter(|c| COMMANDS.contains(*c)) else {
            log::warn!("skipping unknown path command '{chunk}'");
            errors.push(PathError::UnknownCommand { chunk: chunk.to_string() });
            continue;
        };

        // svgtypes wants data to open with a move; the synthetic one is
        // dropped and relative coordinates are resolved against our own pen.
        let text = format!("M0 0 {chunk}");
        let mut parser = PathParser::from(text.as_str());
        // The synthetic `M0 0` always parses.
        parser.next();

        for segment in parser {
            match segment {
                Ok(segment) => normalizer.push(segment),
                Err(err) => {
                    log::warn!("skipping malformed path command '{chunk}' ({command}): {err}");
                    errors.push(PathError::Malformed {
                        chunk: chunk.to_string(),
                        message: err.to_string(),
                    });
                    break;
                }
            }
        }
    }

    ParsedPath { segments: normalizer.segments, errors }
}

/// Sketch normalized segments.
///
/// With multi-stroke disabled, lines are exact `LineTo`s and curves are
/// exact single cubics; otherwise every segment is drawn rough.
pub fn sketch(segments: &[Segment], o: &ResolvedOptions, rng: &mut Rng) -> Vec<Op> {
    let single = o.disable_multi_stroke;
    let mut ops = Vec::new();
    let mut current = Point::default();
    let mut first = Point::default();

    let line_to = |ops: &mut Vec<Op>, rng: &mut Rng, from: Point, to: Point| {
        if single {
            ops.push(Op::LineTo(to));
        } else {
            ops.extend(double_line(from, to, o, rng, false));
        }
    };

    for segment in segments {
        match *segment {
            Segment::Move(p) => {
                ops.push(Op::Move(p));
                current = p;
                first = p;
            }
            Segment::Line(p) => {
                line_to(&mut ops, rng, current, p);
                current = p;
            }
            Segment::Horizontal(x) => {
                let p = Point::new(x, current.y);
                line_to(&mut ops, rng, current, p);
                current = p;
            }
            Segment::Vertical(y) => {
                let p = Point::new(current.x, y);
                line_to(&mut ops, rng, current, p);
                current = p;
            }
            Segment::Cubic { ctrl1, ctrl2, to } => {
                if single {
                    ops.extend(single_cubic(current, ctrl1, ctrl2, to));
                } else {
                    ops.extend(cubic_bezier_ops(current, ctrl1, ctrl2, to, o, rng));
                }
                current = to;
            }
            Segment::Quadratic { ctrl, to } => {
                if single {
                    ops.extend(single_quadratic(current, ctrl, to));
                } else {
                    ops.extend(quadratic_bezier_ops(current, ctrl, to, o, rng));
                }
                current = to;
            }
            Segment::Arc { rx, ry, x_axis_rotation, large_arc, sweep, to } => {
                let mut last = current;
                for piece in arc_to_cubics(current, to, rx, ry, x_axis_rotation, large_arc, sweep) {
                    if single {
                        ops.extend(single_cubic(last, piece.ctrl1, piece.ctrl2, piece.to));
                    } else {
                        ops.extend(cubic_bezier_ops(last, piece.ctrl1, piece.ctrl2, piece.to, o, rng));
                    }
                    last = piece.to;
                }
                current = to;
            }
            Segment::Close => {
                line_to(&mut ops, rng, current, first);
                current = first;
            }
        }
    }
    ops
}

/// Flatten segments into one polygon per subpath.
///
/// Subpaths with fewer than three points are dropped.
pub fn polygons(segments: &[Segment]) -> Vec<Vec<Point>> {
    let mut result = Vec::new();
    let mut points: Vec<Point> = Vec::new();
    let mut current = Point::default();
    let mut first = Point::default();

    let mut finish = |points: &mut Vec<Point>| {
        let done = std::mem::take(points);
        if done.len() > 2 {
            result.push(done);
        }
    };

    for segment in segments {
        // Drawing without a leading move starts at the current point.
        if points.is_empty() && !matches!(segment, Segment::Move(_) | Segment::Close) {
            points.push(current);
        }
        match *segment {
            Segment::Move(p) => {
                finish(&mut points);
                points.push(p);
                current = p;
                first = p;
            }
            Segment::Line(p) => {
                points.push(p);
                current = p;
            }
            Segment::Horizontal(x) => {
                current = Point::new(x, current.y);
                points.push(current);
            }
            Segment::Vertical(y) => {
                current = Point::new(current.x, y);
                points.push(current);
            }
            Segment::Cubic { ctrl1, ctrl2, to } => {
                flatten_cubic(current, ctrl1, ctrl2, to, &mut points);
                current = to;
            }
            Segment::Quadratic { ctrl, to } => {
                let curve = QuadraticBezierSegment {
                    from: point(current.x, current.y),
                    ctrl: point(ctrl.x, ctrl.y),
                    to: point(to.x, to.y),
                };
                curve.for_each_flattened(CURVE_TOLERANCE, &mut |segment| {
                    points.push(Point::new(segment.to.x, segment.to.y));
                });
                current = to;
            }
            Segment::Arc { rx, ry, x_axis_rotation, large_arc, sweep, to } => {
                let mut last = current;
                for piece in arc_to_cubics(current, to, rx, ry, x_axis_rotation, large_arc, sweep) {
                    flatten_cubic(last, piece.ctrl1, piece.ctrl2, piece.to, &mut points);
                    last = piece.to;
                }
                current = to;
            }
            Segment::Close => {
                current = first;
            }
        }
    }
    finish(&mut points);
    result
}

fn flatten_cubic(from: Point, ctrl1: Point, ctrl2: Point, to: Point, points: &mut Vec<Point>) {
    let curve = CubicBezierSegment {
        from: point(from.x, from.y),
        ctrl1: point(ctrl1.x, ctrl1.y),
        ctrl2: point(ctrl2.x, ctrl2.y),
        to: point(to.x, to.y),
    };
    curve.for_each_flattened(CURVE_TOLERANCE, &mut |segment| {
        points.push(Point::new(segment.to.x, segment.to.y));
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{resolve, Options};

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn split_keeps_exponents() {
        assert_eq!(split_commands("M1e2 3L4,5z"), vec!["M1e2 3", "L4,5", "z"]);
        assert_eq!(split_commands("  10 M0 0"), vec!["10", "M0 0"]);
    }

    #[test]
    fn relative_commands_become_absolute() {
        let parsed = parse("m10 10 l5 0 h5 v5 c0 5 5 5 5 0 z");
        assert!(parsed.errors.is_empty());
        assert_eq!(
            parsed.segments,
            vec![
                Segment::Move(p(10.0, 10.0)),
                Segment::Line(p(15.0, 10.0)),
                Segment::Horizontal(20.0),
                Segment::Vertical(15.0),
                Segment::Cubic { ctrl1: p(20.0, 20.0), ctrl2: p(25.0, 20.0), to: p(25.0, 15.0) },
                Segment::Close,
            ]
        );
    }

    #[test]
    fn implicit_line_after_move() {
        let parsed = parse("M0 0 10 0 10 10");
        assert_eq!(
            parsed.segments,
            vec![
                Segment::Move(p(0.0, 0.0)),
                Segment::Line(p(10.0, 0.0)),
                Segment::Line(p(10.0, 10.0)),
            ]
        );
    }

    #[test]
    fn smooth_commands_reflect() {
        let parsed = parse("M0 0 C0 10 10 10 10 0 S20 -10 20 0");
        assert_eq!(
            parsed.segments[2],
            Segment::Cubic { ctrl1: p(10.0, -10.0), ctrl2: p(20.0, -10.0), to: p(20.0, 0.0) }
        );

        let parsed = parse("M0 0 Q5 10 10 0 T20 0");
        assert_eq!(parsed.segments[2], Segment::Quadratic { ctrl: p(15.0, -10.0), to: p(20.0, 0.0) });

        // Without a previous curve the control point is the current point.
        let parsed = parse("M0 0 T20 0");
        assert_eq!(parsed.segments[1], Segment::Quadratic { ctrl: p(0.0, 0.0), to: p(20.0, 0.0) });
    }

    #[test]
    fn bad_chunks_are_skipped() {
        let parsed = parse("M0 0 L10 X 5 5 L10 10");
        assert_eq!(parsed.errors.len(), 2);
        assert!(matches!(parsed.errors[0], PathError::Malformed { .. }));
        assert!(matches!(parsed.errors[1], PathError::UnknownCommand { .. }));
        assert_eq!(
            parsed.segments,
            vec![Segment::Move(p(0.0, 0.0)), Segment::Line(p(10.0, 10.0))]
        );
        assert!(parsed.errors[1].to_string().contains("X 5 5"));
    }

    #[test]
    fn single_stroke_lines_are_exact() {
        let o = resolve(&Options::default(), &Options::default().with_disable_multi_stroke(true).with_seed(3));
        let mut rng = Rng::new(o.seed);
        let ops = sketch(&parse("M0 0 L10 0 L10 10 Z").segments, &o, &mut rng);
        assert_eq!(
            ops,
            vec![
                Op::Move(p(0.0, 0.0)),
                Op::LineTo(p(10.0, 0.0)),
                Op::LineTo(p(10.0, 10.0)),
                Op::LineTo(p(0.0, 0.0)),
            ]
        );
    }

    #[test]
    fn rough_lines_double() {
        let o = resolve(&Options::default(), &Options::default().with_seed(3));
        let mut rng = Rng::new(o.seed);
        let ops = sketch(&parse("M0 0 H50").segments, &o, &mut rng);
        assert_eq!(ops.len(), 5);
    }

    #[test]
    fn polygons_split_subpaths() {
        let parsed = parse("M0 0 H10 V10 H0 Z M20 20 h10 v10 h-10 z M50 50 L60 60");
        let polys = polygons(&parsed.segments);
        assert_eq!(polys.len(), 2);
        assert_eq!(polys[0], vec![p(0.0, 0.0), p(10.0, 0.0), p(10.0, 10.0), p(0.0, 10.0)]);
        assert_eq!(polys[1][0], p(20.0, 20.0));
    }

    #[test]
    fn polygons_flatten_curves() {
        let parsed = parse("M0 0 C0 50 100 50 100 0 Z");
        let polys = polygons(&parsed.segments);
        assert_eq!(polys.len(), 1);
        assert!(polys[0].len() > 4);
        assert_eq!(*polys[0].last().unwrap(), p(100.0, 0.0));
    }
}

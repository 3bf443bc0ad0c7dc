//! Sketchy/hand-drawn primitives.
//!
//! Turns ideal lines, polygons, ellipses, arcs, curves and bezier segments
//! into perturbed [`Op`] sequences:
//! - endpoint randomization scaled by roughness
//! - perpendicular bowing of straight segments
//! - a second, independently jittered overlay stroke
//!
//! Every function takes the resolved options and the call's [`Rng`]. The
//! order in which random values are drawn is part of the output contract:
//! reordering draws changes every seeded drawing.
//!
//! # Example
//! ```
//! use roughen::geometry::Point;
//! use roughen::options::{resolve, Options};
//! use roughen::rng::Rng;
//! use roughen::sketchy::double_line;
//!
//! let o = resolve(&Options::default(), &Options::default().with_seed(7));
//! let mut rng = Rng::new(o.seed);
//! let ops = double_line(Point::new(0.0, 0.0), Point::new(100.0, 0.0), &o, &mut rng, false);
//! assert_eq!(ops.len(), 4); // two passes of move + curve
//! ```

use std::f64::consts::{PI, TAU};

use crate::geometry::Point;
use crate::ops::Op;
use crate::options::ResolvedOptions;
use crate::rng::Rng;

#[inline]
fn jitter(rng: &mut Rng, x: f64, o: &ResolvedOptions) -> f64 {
    rng.offset(x, o.roughness, 1.0)
}

/// Roughness gain for a straight segment of the given length.
///
/// Long lines get proportionally less wobble.
pub fn length_gain(length: f64) -> f64 {
    if length > 500.0 {
        0.4
    } else if length >= 200.0 {
        -0.0016668 * length + 1.233334
    } else {
        1.0
    }
}

/// One pass of a rough line: a move and a single bowed cubic.
///
/// `overlay` passes jitter by half the offset of the first pass.
pub fn line_ops(
    from: Point,
    to: Point,
    o: &ResolvedOptions,
    rng: &mut Rng,
    overlay: bool,
) -> [Op; 2] {
    let (x1, y1, x2, y2) = (from.x, from.y, to.x, to.y);
    let length_sq = (x1 - x2).powi(2) + (y1 - y2).powi(2);
    let length = length_sq.sqrt();
    let gain = length_gain(length);

    let mut max_offset = o.max_randomness_offset;
    if max_offset * max_offset * 100.0 > length_sq {
        max_offset = length / 10.0;
    }

    let diverge = 0.2 + rng.next_f64() * 0.2;
    let mid_x = rng.offset(o.bowing * max_offset * (y2 - y1) / 200.0, o.roughness, gain);
    let mid_y = rng.offset(o.bowing * max_offset * (x1 - x2) / 200.0, o.roughness, gain);

    let amount = if overlay { max_offset / 2.0 } else { max_offset };
    let pin = o.preserve_vertices;
    let mut wobble = || rng.offset(amount, o.roughness, gain);

    let start = if pin {
        from
    } else {
        Point::new(x1 + wobble(), y1 + wobble())
    };

    let ctrl1 = Point::new(
        mid_x + x1 + (x2 - x1) * diverge + wobble(),
        mid_y + y1 + (y2 - y1) * diverge + wobble(),
    );
    let ctrl2 = Point::new(
        mid_x + x1 + 2.0 * (x2 - x1) * diverge + wobble(),
        mid_y + y1 + 2.0 * (y2 - y1) * diverge + wobble(),
    );
    let end = if pin {
        to
    } else {
        Point::new(x2 + wobble(), y2 + wobble())
    };

    [Op::Move(start), Op::CurveTo { ctrl1, ctrl2, to: end }]
}

/// A rough line drawn once or twice.
///
/// `filling` selects `disable_multi_stroke_fill` instead of
/// `disable_multi_stroke` as the single-pass switch.
pub fn double_line(
    from: Point,
    to: Point,
    o: &ResolvedOptions,
    rng: &mut Rng,
    filling: bool,
) -> Vec<Op> {
    let single = if filling {
        o.disable_multi_stroke_fill
    } else {
        o.disable_multi_stroke
    };

    let mut ops = Vec::with_capacity(4);
    ops.extend(line_ops(from, to, o, rng, false));
    if !single {
        ops.extend(line_ops(from, to, o, rng, true));
    }
    ops
}

/// Consecutive rough lines through `points`, optionally closed.
///
/// Two points give a single line; fewer give nothing.
pub fn linear_path(points: &[Point], close: bool, o: &ResolvedOptions, rng: &mut Rng) -> Vec<Op> {
    match points {
        [] | [_] => Vec::new(),
        [a, b] => double_line(*a, *b, o, rng, false),
        _ => {
            let mut ops = Vec::with_capacity(points.len() * 4 + 4);
            for pair in points.windows(2) {
                ops.extend(double_line(pair[0], pair[1], o, rng, false));
            }
            if close {
                ops.extend(double_line(points[points.len() - 1], points[0], o, rng, false));
            }
            ops
        }
    }
}

/// Closed rough polygon.
pub fn polygon(points: &[Point], o: &ResolvedOptions, rng: &mut Rng) -> Vec<Op> {
    linear_path(points, true, o, rng)
}

/// Rough rectangle with top-left corner (x, y).
pub fn rectangle(x: f64, y: f64, width: f64, height: f64, o: &ResolvedOptions, rng: &mut Rng) -> Vec<Op> {
    polygon(&rectangle_points(x, y, width, height), o, rng)
}

/// Corner points of a rectangle, clockwise from (x, y).
pub fn rectangle_points(x: f64, y: f64, width: f64, height: f64) -> [Point; 4] {
    [
        Point::new(x, y),
        Point::new(x + width, y),
        Point::new(x + width, y + height),
        Point::new(x, y + height),
    ]
}

// ============================================================================
// Ellipses
// ============================================================================

/// Jittered radii and angular step for one ellipse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipseParams {
    pub rx: f64,
    pub ry: f64,
    pub increment: f64,
}

/// Ellipse ops plus the perimeter points of its first pass.
///
/// The core points are what a pattern fill hatches, so the fill follows the
/// same wobble as the outline.
#[derive(Debug, Clone, PartialEq)]
pub struct EllipseResult {
    pub ops: Vec<Op>,
    pub core_points: Vec<Point>,
}

/// Compute step count and jittered radii for a `width` x `height` ellipse.
pub fn ellipse_params(width: f64, height: f64, o: &ResolvedOptions, rng: &mut Rng) -> EllipseParams {
    let step = o.curve_step_count.max(1) as f64;
    let psq = (TAU * (((width / 2.0).powi(2) + (height / 2.0).powi(2)) / 2.0).sqrt()).sqrt();
    let step_count = step.max((step / 200f64.sqrt() * psq).floor());
    let increment = TAU / step_count;

    let mut rx = (width / 2.0).abs();
    let mut ry = (height / 2.0).abs();
    let curve_fit = 1.0 - o.curve_fitting;
    rx += jitter(rng, rx * curve_fit, o);
    ry += jitter(rng, ry * curve_fit, o);

    EllipseParams { rx, ry, increment }
}

/// Rough ellipse centered on `center` using precomputed params.
pub fn ellipse_with_params(
    center: Point,
    o: &ResolvedOptions,
    rng: &mut Rng,
    params: &EllipseParams,
) -> EllipseResult {
    let spread = rng.offset_range(0.4, 1.0, o.roughness, 1.0);
    let overlap = params.increment * rng.offset_range(0.1, spread, o.roughness, 1.0);

    let (all_points, core_points) = ellipse_points(center, params, 1.0, overlap, o, rng);
    let mut ops = curve_ops(&all_points, o, rng);

    if !o.disable_multi_stroke && o.roughness != 0.0 {
        let (second, _) = ellipse_points(center, params, 1.5, 0.0, o, rng);
        ops.extend(curve_ops(&second, o, rng));
    }

    EllipseResult { ops, core_points }
}

/// Rough ellipse of the given size centered on `center`.
pub fn ellipse(center: Point, width: f64, height: f64, o: &ResolvedOptions, rng: &mut Rng) -> Vec<Op> {
    let params = ellipse_params(width, height, o, rng);
    ellipse_with_params(center, o, rng, &params).ops
}

/// Perimeter points for one ellipse pass: (curve points, core points).
///
/// With zero roughness the points sit on an exact grid of `increment / 4`.
/// Otherwise the start angle is randomized and extra points before and after
/// the loop make the stroke overshoot its own start.
fn ellipse_points(
    center: Point,
    params: &EllipseParams,
    offset: f64,
    overlap: f64,
    o: &ResolvedOptions,
    rng: &mut Rng,
) -> (Vec<Point>, Vec<Point>) {
    let EllipseParams { rx, ry, increment } = *params;
    let (cx, cy) = (center.x, center.y);
    let on_ellipse = |scale: f64, angle: f64| {
        Point::new(cx + scale * rx * angle.cos(), cy + scale * ry * angle.sin())
    };

    let mut all = Vec::new();
    let mut core = Vec::new();

    if !(increment.is_finite() && increment > 0.0) {
        log::debug!("ellipse increment {increment} is not usable, skipping");
        return (all, core);
    }

    if o.roughness == 0.0 {
        let inc = increment / 4.0;
        all.push(on_ellipse(1.0, -inc));
        let mut angle = 0.0;
        while angle <= TAU {
            let p = on_ellipse(1.0, angle);
            core.push(p);
            all.push(p);
            angle += inc;
        }
        all.push(on_ellipse(1.0, 0.0));
        all.push(on_ellipse(1.0, inc));
        return (all, core);
    }

    let rad_offset = jitter(rng, 0.5, o) - PI / 2.0;
    let jittered = |rng: &mut Rng, scale: f64, angle: f64| {
        let x = jitter(rng, offset, o) + cx + scale * rx * angle.cos();
        let y = jitter(rng, offset, o) + cy + scale * ry * angle.sin();
        Point::new(x, y)
    };

    all.push(jittered(rng, 0.9, rad_offset - increment));
    let end_angle = TAU + rad_offset - 0.01;
    let mut angle = rad_offset;
    while angle < end_angle {
        let p = jittered(rng, 1.0, angle);
        core.push(p);
        all.push(p);
        angle += increment;
    }
    all.push(jittered(rng, 1.0, rad_offset + TAU + overlap * 0.5));
    all.push(jittered(rng, 0.98, rad_offset + overlap));
    all.push(jittered(rng, 0.9, rad_offset + overlap * 0.5));

    (all, core)
}

// ============================================================================
// Arcs
// ============================================================================

/// Normalize arc angles: lift a negative start by whole turns and clamp a
/// sweep larger than a full turn to `[0, 2π]`.
pub fn normalize_arc_angles(start: f64, stop: f64) -> (f64, f64) {
    let (mut start, mut stop) = (start, stop);
    if !(start.is_finite() && stop.is_finite()) {
        return (start, stop);
    }
    if start < 0.0 {
        let turns = (-start / TAU).ceil();
        start += turns * TAU;
        stop += turns * TAU;
        // rounding can leave a tiny negative start
        while start < 0.0 {
            start += TAU;
            stop += TAU;
        }
    }
    if stop - start > TAU {
        start = 0.0;
        stop = TAU;
    }
    (start, stop)
}

/// Rough elliptical arc from `start` to `stop` radians.
///
/// A closed arc joins its ends through the center: with `rough_closure` as
/// two rough spokes, otherwise as plain line segments.
#[allow(clippy::too_many_arguments)]
pub fn arc(
    center: Point,
    width: f64,
    height: f64,
    start: f64,
    stop: f64,
    closed: bool,
    rough_closure: bool,
    o: &ResolvedOptions,
    rng: &mut Rng,
) -> Vec<Op> {
    let mut rx = (width / 2.0).abs();
    let mut ry = (height / 2.0).abs();
    rx += jitter(rng, rx * 0.01, o);
    ry += jitter(rng, ry * 0.01, o);

    let (start, stop) = normalize_arc_angles(start, stop);
    let ellipse_inc = TAU / o.curve_step_count.max(1) as f64;
    let arc_inc = (ellipse_inc / 2.0).min((stop - start) / 2.0);

    let mut ops = arc_ops(arc_inc, center, rx, ry, start, stop, 1.0, o, rng);
    if !o.disable_multi_stroke {
        ops.extend(arc_ops(arc_inc, center, rx, ry, start, stop, 1.5, o, rng));
    }

    if closed {
        let start_point = Point::new(center.x + rx * start.cos(), center.y + ry * start.sin());
        if rough_closure {
            let stop_point = Point::new(center.x + rx * stop.cos(), center.y + ry * stop.sin());
            ops.extend(double_line(center, start_point, o, rng, false));
            ops.extend(double_line(center, stop_point, o, rng, false));
        } else {
            ops.push(Op::LineTo(center));
            ops.push(Op::LineTo(start_point));
        }
    }
    ops
}

#[allow(clippy::too_many_arguments)]
fn arc_ops(
    arc_inc: f64,
    center: Point,
    rx: f64,
    ry: f64,
    start: f64,
    stop: f64,
    offset: f64,
    o: &ResolvedOptions,
    rng: &mut Rng,
) -> Vec<Op> {
    let (cx, cy) = (center.x, center.y);
    let rad_offset = start + jitter(rng, 0.1, o);

    let mut points = Vec::new();
    let lead = rad_offset - arc_inc;
    points.push(Point::new(cx + 0.9 * rx * lead.cos(), cy + 0.9 * ry * lead.sin()));

    // A zero or NaN increment would never advance.
    if arc_inc > 0.0 {
        let mut angle = rad_offset;
        while angle <= stop {
            let x = jitter(rng, offset, o) + cx + rx * angle.cos();
            let y = jitter(rng, offset, o) + cy + ry * angle.sin();
            points.push(Point::new(x, y));
            angle += arc_inc;
        }
    }

    let end = Point::new(cx + rx * stop.cos(), cy + ry * stop.sin());
    points.push(end);
    points.push(end);
    curve_ops(&points, o, rng)
}

/// Ideal (unjittered except for radii) perimeter of an arc plus its center,
/// used as the polygon for pattern-filling closed arcs.
pub fn arc_fill_polygon(
    center: Point,
    width: f64,
    height: f64,
    start: f64,
    stop: f64,
    o: &ResolvedOptions,
    rng: &mut Rng,
) -> Vec<Point> {
    let mut rx = (width / 2.0).abs();
    let mut ry = (height / 2.0).abs();
    rx += jitter(rng, rx * 0.01, o);
    ry += jitter(rng, ry * 0.01, o);

    let (start, stop) = normalize_arc_angles(start, stop);
    let inc = (stop - start) / o.curve_step_count.max(1) as f64;
    let on_arc = |angle: f64| Point::new(center.x + rx * angle.cos(), center.y + ry * angle.sin());

    let mut points = Vec::new();
    if inc > 0.0 {
        let mut angle = start;
        while angle <= stop {
            points.push(on_arc(angle));
            angle += inc;
        }
    }
    points.push(on_arc(stop));
    points.push(center);
    points
}

// ============================================================================
// Curves
// ============================================================================

/// Smooth ops through `points`.
///
/// More than three points: Catmull-Rom spline from the second to the
/// second-to-last point with tension `1 - curve_tightness`. Three points: a
/// single bridging cubic. Two points: one overlay line pass.
pub fn curve_ops(points: &[Point], o: &ResolvedOptions, rng: &mut Rng) -> Vec<Op> {
    match points.len() {
        0 | 1 => Vec::new(),
        2 => line_ops(points[0], points[1], o, rng, true).to_vec(),
        3 => vec![
            Op::Move(points[1]),
            Op::CurveTo { ctrl1: points[1], ctrl2: points[2], to: points[2] },
        ],
        n => {
            let s = 1.0 - o.curve_tightness;
            let mut ops = Vec::with_capacity(n - 2);
            ops.push(Op::Move(points[1]));
            for i in 1..n - 2 {
                let (prev, cur, next, after) = (points[i - 1], points[i], points[i + 1], points[i + 2]);
                let ctrl1 = Point::new(
                    cur.x + s * (next.x - prev.x) / 6.0,
                    cur.y + s * (next.y - prev.y) / 6.0,
                );
                let ctrl2 = Point::new(
                    next.x + s * (cur.x - after.x) / 6.0,
                    next.y + s * (cur.y - after.y) / 6.0,
                );
                ops.push(Op::CurveTo { ctrl1, ctrl2, to: next });
            }
            ops
        }
    }
}

/// Jitter every point by up to `offset`, doubling the first and last so the
/// spline passes through both ends, then build the curve.
pub fn curve_with_offset(points: &[Point], offset: f64, o: &ResolvedOptions, rng: &mut Rng) -> Vec<Op> {
    let Some(first) = points.first() else {
        return Vec::new();
    };

    let mut jittered = Vec::with_capacity(points.len() + 2);
    for _ in 0..2 {
        let x = first.x + jitter(rng, offset, o);
        let y = first.y + jitter(rng, offset, o);
        jittered.push(Point::new(x, y));
    }
    for (i, p) in points.iter().enumerate().skip(1) {
        let x = p.x + jitter(rng, offset, o);
        let y = p.y + jitter(rng, offset, o);
        jittered.push(Point::new(x, y));
        if i == points.len() - 1 {
            jittered.push(Point::new(x, y));
        }
    }
    curve_ops(&jittered, o, rng)
}

/// Both passes of a rough curve: (under, over).
///
/// The over pass draws from its own generator seeded `seed + 1` so it stays
/// independent of how many values the under pass consumed.
fn curve_passes(points: &[Point], o: &ResolvedOptions, rng: &mut Rng) -> (Vec<Op>, Vec<Op>) {
    let under = curve_with_offset(points, 1.0 + o.roughness * 0.2, o, rng);
    if o.disable_multi_stroke {
        return (under, Vec::new());
    }
    let mut over_rng = Rng::new(o.seed.wrapping_add(1));
    let over = curve_with_offset(points, 1.5 * (1.0 + o.roughness * 0.22), o, &mut over_rng);
    (under, over)
}

/// Rough curve through `points`.
pub fn curve(points: &[Point], o: &ResolvedOptions, rng: &mut Rng) -> Vec<Op> {
    let (mut under, over) = curve_passes(points, o, rng);
    under.extend(over);
    under
}

/// Several curves concatenated into one op list.
///
/// Later curves drop their leading move in both passes so the pen continues
/// from where the previous curve ended.
pub fn curves(point_sets: &[Vec<Point>], o: &ResolvedOptions, rng: &mut Rng) -> Vec<Op> {
    let mut ops = Vec::new();
    for (index, points) in point_sets.iter().enumerate() {
        let (under, over) = curve_passes(points, o, rng);
        if index == 0 {
            ops.extend(under);
            ops.extend(over);
            continue;
        }
        for pass in [under, over] {
            let skip = usize::from(matches!(pass.first(), Some(Op::Move(_))));
            ops.extend(pass.into_iter().skip(skip));
        }
    }
    ops
}

// ============================================================================
// Bezier segments
// ============================================================================

/// Rough cubic bezier from `current`.
///
/// Drawn twice unless multi-stroke is disabled. The second pass jitters its
/// move by `max_randomness_offset` and everything else by 0.3 more.
pub fn cubic_bezier_ops(
    current: Point,
    ctrl1: Point,
    ctrl2: Point,
    to: Point,
    o: &ResolvedOptions,
    rng: &mut Rng,
) -> Vec<Op> {
    let passes = if o.disable_multi_stroke { 1 } else { 2 };
    let base = o.max_randomness_offset;
    let pin = o.preserve_vertices;
    let mut ops = Vec::with_capacity(passes * 2);

    let moved = |rng: &mut Rng, p: Point, amount: f64| {
        if pin {
            p
        } else {
            let x = p.x + jitter(rng, amount, o);
            let y = p.y + jitter(rng, amount, o);
            Point::new(x, y)
        }
    };

    for pass in 0..passes {
        let ro = if pass == 0 { base } else { base + 0.3 };
        if pass == 0 {
            ops.push(Op::Move(current));
        } else {
            ops.push(Op::Move(moved(rng, current, base)));
        }
        let c1 = moved(rng, ctrl1, ro);
        let c2 = moved(rng, ctrl2, ro);
        let end = moved(rng, to, ro);
        ops.push(Op::CurveTo { ctrl1: c1, ctrl2: c2, to: end });
    }
    ops
}

/// Cubic control points equivalent to the quadratic `current -> ctrl -> to`.
pub fn quadratic_controls(current: Point, ctrl: Point, to: Point) -> (Point, Point) {
    let c1 = Point::new(
        current.x + 2.0 / 3.0 * (ctrl.x - current.x),
        current.y + 2.0 / 3.0 * (ctrl.y - current.y),
    );
    let c2 = Point::new(
        to.x + 2.0 / 3.0 * (ctrl.x - to.x),
        to.y + 2.0 / 3.0 * (ctrl.y - to.y),
    );
    (c1, c2)
}

/// Rough quadratic bezier, promoted to a cubic.
pub fn quadratic_bezier_ops(current: Point, ctrl: Point, to: Point, o: &ResolvedOptions, rng: &mut Rng) -> Vec<Op> {
    let (c1, c2) = quadratic_controls(current, ctrl, to);
    cubic_bezier_ops(current, c1, c2, to, o, rng)
}

/// Exact cubic from `current`, no jitter.
pub fn single_cubic(current: Point, ctrl1: Point, ctrl2: Point, to: Point) -> [Op; 2] {
    [Op::Move(current), Op::CurveTo { ctrl1, ctrl2, to }]
}

/// Exact quadratic from `current` as a cubic, no jitter.
pub fn single_quadratic(current: Point, ctrl: Point, to: Point) -> [Op; 2] {
    let (ctrl1, ctrl2) = quadratic_controls(current, ctrl, to);
    single_cubic(current, ctrl1, ctrl2, to)
}

/// Move + line chain around each polygon with more than two points.
pub fn solid_fill_polygon(polygons: &[Vec<Point>]) -> Vec<Op> {
    let mut ops = Vec::new();
    for points in polygons.iter().filter(|p| p.len() > 2) {
        ops.push(Op::Move(points[0]));
        ops.extend(points[1..].iter().map(|p| Op::LineTo(*p)));
    }
    ops
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{resolve, Options};

    fn opts(local: Options) -> ResolvedOptions {
        resolve(&Options::default(), &local.with_seed(42))
    }

    fn endpoints(ops: &[Op]) -> Vec<Point> {
        ops.iter().map(Op::end).collect()
    }

    #[test]
    fn gain_by_length() {
        assert_eq!(length_gain(100.0), 1.0);
        assert!((length_gain(200.0) - 0.89997).abs() < 1e-4);
        assert!((length_gain(500.0) - 0.400934).abs() < 1e-4);
        assert_eq!(length_gain(800.0), 0.4);
    }

    #[test]
    fn double_line_has_two_passes() {
        let o = opts(Options::default());
        let mut rng = Rng::new(o.seed);
        let ops = double_line(Point::new(0.0, 0.0), Point::new(100.0, 0.0), &o, &mut rng, false);
        assert_eq!(ops.len(), 4);
        assert!(matches!(ops[0], Op::Move(_)));
        assert!(matches!(ops[1], Op::CurveTo { .. }));
        assert!(matches!(ops[2], Op::Move(_)));
    }

    #[test]
    fn disabled_multi_stroke_is_single_pass() {
        let o = opts(Options::default().with_disable_multi_stroke(true));
        let mut rng = Rng::new(o.seed);
        let ops = double_line(Point::new(0.0, 0.0), Point::new(100.0, 0.0), &o, &mut rng, false);
        assert_eq!(ops.len(), 2);

        // The fill flag only looks at the fill switch.
        let mut rng = Rng::new(o.seed);
        let ops = double_line(Point::new(0.0, 0.0), Point::new(100.0, 0.0), &o, &mut rng, true);
        assert_eq!(ops.len(), 4);
    }

    #[test]
    fn zero_roughness_is_exact() {
        let o = opts(Options::default().with_roughness(0.0));
        let mut rng = Rng::new(o.seed);
        let ops = double_line(Point::new(3.0, 4.0), Point::new(50.0, 60.0), &o, &mut rng, false);
        assert_eq!(ops[0], Op::Move(Point::new(3.0, 4.0)));
        assert_eq!(ops[1].end(), Point::new(50.0, 60.0));
    }

    #[test]
    fn endpoints_stay_within_offset() {
        let o = opts(Options::default().with_roughness(1.5));
        let mut rng = Rng::new(o.seed);
        let (a, b) = (Point::new(0.0, 0.0), Point::new(120.0, 40.0));
        let ops = double_line(a, b, &o, &mut rng, false);
        let bound = o.max_randomness_offset * o.roughness;
        for (i, p) in endpoints(&ops).into_iter().enumerate() {
            let target = if i % 2 == 0 { a } else { b };
            assert!((p.x - target.x).abs() <= bound);
            assert!((p.y - target.y).abs() <= bound);
        }
    }

    #[test]
    fn preserve_vertices_pins_endpoints() {
        let o = opts(Options::default().with_preserve_vertices(true).with_roughness(3.0));
        let mut rng = Rng::new(o.seed);
        let pts = rectangle_points(10.0, 10.0, 80.0, 40.0);
        let ops = polygon(&pts, &o, &mut rng);
        for op in &ops {
            let p = op.end();
            assert!(pts.contains(&p), "{p:?} is not an input vertex");
        }
    }

    #[test]
    fn linear_path_counts() {
        let o = opts(Options::default());
        let mut rng = Rng::new(o.seed);
        let pts = [Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 10.0)];
        assert_eq!(linear_path(&pts, false, &o, &mut rng).len(), 8);
        assert_eq!(linear_path(&pts, true, &o, &mut rng).len(), 12);
        assert_eq!(linear_path(&pts[..2], true, &o, &mut rng).len(), 4);
        assert!(linear_path(&pts[..1], true, &o, &mut rng).is_empty());
    }

    #[test]
    fn smooth_ellipse_points_on_curve() {
        let o = opts(Options::default().with_roughness(0.0));
        let mut rng = Rng::new(o.seed);
        let params = ellipse_params(100.0, 50.0, &o, &mut rng);
        assert_eq!((params.rx, params.ry), (50.0, 25.0));

        let result = ellipse_with_params(Point::new(0.0, 0.0), &o, &mut rng, &params);
        assert!(!result.core_points.is_empty());
        for p in &result.core_points {
            let v = (p.x / 50.0).powi(2) + (p.y / 25.0).powi(2);
            assert!((v - 1.0).abs() < 1e-9);
        }
        // Single pass: exactly one move.
        let moves = result.ops.iter().filter(|op| matches!(op, Op::Move(_))).count();
        assert_eq!(moves, 1);
    }

    #[test]
    fn rough_ellipse_has_two_passes() {
        let o = opts(Options::default());
        let mut rng = Rng::new(o.seed);
        let ops = ellipse(Point::new(50.0, 50.0), 80.0, 60.0, &o, &mut rng);
        let moves = ops.iter().filter(|op| matches!(op, Op::Move(_))).count();
        assert_eq!(moves, 2);
    }

    #[test]
    fn ellipse_step_count_grows_with_size() {
        let o = opts(Options::default().with_roughness(0.0));
        let mut rng = Rng::new(1);
        let small = ellipse_params(10.0, 10.0, &o, &mut rng);
        let large = ellipse_params(1000.0, 1000.0, &o, &mut rng);
        assert!((small.increment - TAU / 9.0).abs() < 1e-12);
        assert!(large.increment < small.increment);
    }

    #[test]
    fn arc_angles_normalize() {
        let (s, e) = normalize_arc_angles(-PI / 2.0, PI / 2.0);
        assert!((s - 3.0 * PI / 2.0).abs() < 1e-12);
        assert!((e - 5.0 * PI / 2.0).abs() < 1e-12);
        assert_eq!(normalize_arc_angles(0.0, 10.0), (0.0, TAU));
    }

    #[test]
    fn zero_sweep_arc_terminates() {
        let o = opts(Options::default());
        let mut rng = Rng::new(o.seed);
        let ops = arc(Point::new(0.0, 0.0), 50.0, 50.0, 1.0, 1.0, false, false, &o, &mut rng);
        assert!(!ops.is_empty());
    }

    #[test]
    fn closed_arc_plain_closure() {
        let o = opts(Options::default().with_disable_multi_stroke(true));
        let mut rng = Rng::new(o.seed);
        let center = Point::new(100.0, 100.0);
        let ops = arc(center, 100.0, 100.0, 0.0, PI / 2.0, true, false, &o, &mut rng);
        let n = ops.len();
        assert_eq!(ops[n - 2], Op::LineTo(center));
        assert!(matches!(ops[n - 1], Op::LineTo(_)));
    }

    #[test]
    fn curve_ops_shapes() {
        let o = opts(Options::default());
        let mut rng = Rng::new(o.seed);
        let p = |x: f64| Point::new(x, x * 2.0);

        let three = curve_ops(&[p(0.0), p(1.0), p(2.0)], &o, &mut rng);
        assert_eq!(three[0], Op::Move(p(1.0)));
        assert_eq!(three[1], Op::CurveTo { ctrl1: p(1.0), ctrl2: p(2.0), to: p(2.0) });

        let five = curve_ops(&[p(0.0), p(1.0), p(2.0), p(3.0), p(4.0)], &o, &mut rng);
        assert_eq!(five.len(), 3);
        assert_eq!(five[0], Op::Move(p(1.0)));
        assert_eq!(five[2].end(), p(3.0));
    }

    #[test]
    fn curves_drop_later_moves() {
        let o = opts(Options::default());
        let a = vec![Point::new(0.0, 0.0), Point::new(50.0, 20.0), Point::new(100.0, 0.0)];
        let b = vec![Point::new(100.0, 0.0), Point::new(150.0, 30.0), Point::new(200.0, 0.0)];

        let mut rng = Rng::new(o.seed);
        let single = curve(&a, &o, &mut rng);
        let mut rng = Rng::new(o.seed);
        let both = curves(&[a, b], &o, &mut rng);

        let moves = |ops: &[Op]| ops.iter().filter(|op| matches!(op, Op::Move(_))).count();
        assert_eq!(moves(&both), moves(&single));
    }

    #[test]
    fn bezier_passes() {
        let o = opts(Options::default());
        let mut rng = Rng::new(o.seed);
        let ops = cubic_bezier_ops(
            Point::new(0.0, 0.0),
            Point::new(10.0, 20.0),
            Point::new(30.0, 20.0),
            Point::new(40.0, 0.0),
            &o,
            &mut rng,
        );
        assert_eq!(ops.len(), 4);
        assert_eq!(ops[0], Op::Move(Point::new(0.0, 0.0)));
    }

    #[test]
    fn quadratic_promotion() {
        let ops = single_quadratic(Point::new(0.0, 0.0), Point::new(30.0, 30.0), Point::new(60.0, 0.0));
        assert_eq!(
            ops[1],
            Op::CurveTo {
                ctrl1: Point::new(20.0, 20.0),
                ctrl2: Point::new(40.0, 20.0),
                to: Point::new(60.0, 0.0),
            }
        );
    }

    #[test]
    fn solid_fill_skips_degenerate() {
        let tri = vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(0.0, 1.0)];
        let seg = vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)];
        let ops = solid_fill_polygon(&[tri, seg]);
        assert_eq!(ops.len(), 3);
        assert_eq!(ops[0], Op::Move(Point::new(0.0, 0.0)));
    }
}

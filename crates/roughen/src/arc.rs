//! Elliptical arc (SVG `A` command) to cubic bezier conversion.
//!
//! Converts the endpoint parameterization used by path data into a center
//! parameterization, splits the sweep into pieces of at most 90°, and
//! approximates each piece with one cubic.

use std::f64::consts::{FRAC_PI_2, TAU};

use crate::geometry::Point;

const EPSILON: f64 = 1e-9;

/// One cubic piece of an arc. The start is the previous piece's `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicSegment {
    pub ctrl1: Point,
    pub ctrl2: Point,
    pub to: Point,
}

/// Approximate the arc from `from` to `to` with cubic segments.
///
/// `x_axis_rotation` is in degrees. Coincident endpoints give no segments; a
/// zero radius gives one straight cubic to `to`. Radii too small to span the
/// endpoints are scaled up uniformly.
pub fn arc_to_cubics(
    from: Point,
    to: Point,
    rx: f64,
    ry: f64,
    x_axis_rotation: f64,
    large_arc: bool,
    sweep: bool,
) -> Vec<CubicSegment> {
    let (x1, y1, x2, y2) = (from.x, from.y, to.x, to.y);
    if (x1 - x2).abs() < EPSILON && (y1 - y2).abs() < EPSILON {
        return Vec::new();
    }

    let (mut rx, mut ry) = (rx.abs(), ry.abs());
    if rx == 0.0 || ry == 0.0 {
        return vec![CubicSegment { ctrl1: from, ctrl2: to, to }];
    }

    let phi = x_axis_rotation.rem_euclid(360.0).to_radians();
    let (sin_phi, cos_phi) = phi.sin_cos();

    // Midpoint in the ellipse's own frame.
    let x1p = cos_phi * (x1 - x2) / 2.0 + sin_phi * (y1 - y2) / 2.0;
    let y1p = -sin_phi * (x1 - x2) / 2.0 + cos_phi * (y1 - y2) / 2.0;
    if x1p.abs() < EPSILON && y1p.abs() < EPSILON {
        return Vec::new();
    }

    let (x1p2, y1p2) = (x1p * x1p, y1p * y1p);
    let lambda = x1p2 / (rx * rx) + y1p2 / (ry * ry);
    if lambda > 1.0 {
        let scale = lambda.sqrt();
        rx *= scale;
        ry *= scale;
    }
    let (rx2, ry2) = (rx * rx, ry * ry);

    let sign = if large_arc != sweep { 1.0 } else { -1.0 };
    let num = (rx2 * ry2 - rx2 * y1p2 - ry2 * x1p2).max(0.0);
    let den = rx2 * y1p2 + ry2 * x1p2;
    if den.abs() < 1e-12 {
        return Vec::new();
    }

    let c = sign * (num / den).sqrt();
    let cxp = c * (rx * y1p / ry);
    let cyp = c * (-ry * x1p / rx);
    let cx = cos_phi * cxp - sin_phi * cyp + (x1 + x2) / 2.0;
    let cy = sin_phi * cxp + cos_phi * cyp + (y1 + y2) / 2.0;

    let u = ((x1p - cxp) / rx, (y1p - cyp) / ry);
    let v = ((-x1p - cxp) / rx, (-y1p - cyp) / ry);
    let start_angle = vector_angle((1.0, 0.0), u);
    let mut sweep_angle = vector_angle(u, v);

    if !sweep && sweep_angle > 0.0 {
        sweep_angle -= TAU;
    } else if sweep && sweep_angle < 0.0 {
        sweep_angle += TAU;
    }
    sweep_angle %= TAU;

    // Exact multiples of 90° must not gain a sliver segment from rounding.
    let count = (sweep_angle.abs() / FRAC_PI_2 - EPSILON).ceil();
    if !(count.is_finite() && count >= 1.0) {
        return Vec::new();
    }
    let piece = sweep_angle / count;

    let ellipse = Ellipse { cx, cy, rx, ry, sin_phi, cos_phi };
    (0..count as usize)
        .map(|i| {
            let start = start_angle + i as f64 * piece;
            ellipse.segment(start, start + piece)
        })
        .collect()
}

/// Signed angle from `u` to `v`.
fn vector_angle(u: (f64, f64), v: (f64, f64)) -> f64 {
    let dot = u.0 * v.0 + u.1 * v.1;
    let mag = ((u.0 * u.0 + u.1 * u.1) * (v.0 * v.0 + v.1 * v.1)).sqrt();
    if mag < 1e-12 {
        return 0.0;
    }
    let sign = if u.0 * v.1 - u.1 * v.0 < 0.0 { -1.0 } else { 1.0 };
    sign * (dot / mag).clamp(-1.0, 1.0).acos()
}

struct Ellipse {
    cx: f64,
    cy: f64,
    rx: f64,
    ry: f64,
    sin_phi: f64,
    cos_phi: f64,
}

impl Ellipse {
    fn to_global(&self, x: f64, y: f64) -> Point {
        Point::new(
            x * self.cos_phi - y * self.sin_phi + self.cx,
            x * self.sin_phi + y * self.cos_phi + self.cy,
        )
    }

    /// One cubic for the piece between two parametric angles.
    fn segment(&self, start: f64, end: f64) -> CubicSegment {
        let alpha = (end - start) / 2.0;
        if alpha.abs() < EPSILON {
            let mid = (start + end) / 2.0;
            let p = self.to_global(self.rx * mid.cos(), self.ry * mid.sin());
            return CubicSegment { ctrl1: p, ctrl2: p, to: p };
        }

        let k = if alpha.sin().abs() < EPSILON {
            0.0
        } else {
            4.0 / 3.0 * (alpha / 2.0).tan()
        };

        let (sin_s, cos_s) = start.sin_cos();
        let (sin_e, cos_e) = end.sin_cos();
        let (x1, y1) = (self.rx * cos_s, self.ry * sin_s);
        let (x2, y2) = (self.rx * cos_e, self.ry * sin_e);

        CubicSegment {
            ctrl1: self.to_global(x1 - k * self.rx * sin_s, y1 + k * self.ry * cos_s),
            ctrl2: self.to_global(x2 + k * self.rx * sin_e, y2 - k * self.ry * cos_e),
            to: self.to_global(x2, y2),
        }
    }
}

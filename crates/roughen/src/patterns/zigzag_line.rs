//! Zigzag-line fill: saw-tooth strokes running along each hachure segment.

use std::f64::consts::FRAC_PI_4;

use crate::geometry::Point;
use crate::hatch::hachure_lines;
use crate::ops::Op;
use crate::options::{Options, ResolvedOptions};
use crate::rng::Rng;
use crate::sketchy::double_line;

/// Generate zigzag-line fill ops for the polygons.
///
/// The hachure gap grows by the tooth size so neighbouring rows do not
/// overlap. Each tooth is `2 * zigzag_offset` long with its apex at 45°.
pub fn zigzag_line_fill(polygons: &[Vec<Point>], o: &ResolvedOptions, rng: &mut Rng) -> Vec<Op> {
    let gap = o.hachure_gap_or_stroke();
    let tooth = o.zigzag_offset_or_gap();
    if tooth <= 0.0 {
        log::debug!("zigzag-line fill with non-positive offset, nothing to draw");
        return Vec::new();
    }

    let spread = o.overridden(&Options::default().with_hachure_gap(gap + tooth));
    let lines = hachure_lines(polygons, &spread);

    let rise = (2.0 * tooth * tooth).sqrt();
    let mut ops = Vec::new();
    for line in lines.iter().map(|l| l.left_to_right()) {
        let count = (line.length() / (2.0 * tooth)).round() as usize;
        let start = line.start();
        let alpha = (line.y2 - line.y1).atan2(line.x2 - line.x1);
        let along = |d: f64| Point::new(start.x + d * alpha.cos(), start.y + d * alpha.sin());

        for i in 0..count {
            let from = along(i as f64 * 2.0 * tooth);
            let to = along((i + 1) as f64 * 2.0 * tooth);
            let apex = Point::new(
                from.x + rise * (alpha + FRAC_PI_4).cos(),
                from.y + rise * (alpha + FRAC_PI_4).sin(),
            );
            ops.extend(double_line(from, apex, &spread, rng, true));
            ops.extend(double_line(apex, to, &spread, rng, true));
        }
    }
    ops
}

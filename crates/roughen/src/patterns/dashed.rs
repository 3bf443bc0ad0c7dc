//! Dashed fill: hachure segments broken into evenly spaced dashes.

use crate::geometry::Point;
use crate::hatch::hachure_lines;
use crate::ops::Op;
use crate::options::ResolvedOptions;
use crate::rng::Rng;
use crate::sketchy::double_line;

/// Generate dashed fill ops for the polygons.
///
/// Dashes are `dash_offset` long with `dash_gap` between them, and the run
/// of dashes is centered on each segment.
pub fn dashed_fill(polygons: &[Vec<Point>], o: &ResolvedOptions, rng: &mut Rng) -> Vec<Op> {
    let dash = o.dash_offset_or_gap();
    let gap = o.dash_gap_or_gap();
    let period = if dash + gap == 0.0 { 1e-5 } else { dash + gap };

    let mut ops = Vec::new();
    for line in hachure_lines(polygons, o).iter().map(|l| l.left_to_right()) {
        let length = line.length();
        let count = (length / period).floor().max(0.0) as usize;
        let lead = (length + gap - count as f64 * (dash + gap)) * 0.5;

        let start = line.start();
        let alpha = (line.y2 - line.y1).atan2(line.x2 - line.x1);
        let along = |d: f64| {
            Point::new(
                start.x + (d + lead) * alpha.cos(),
                start.y + (d + lead) * alpha.sin(),
            )
        };

        for i in 0..count {
            let from = i as f64 * (dash + gap);
            ops.extend(double_line(along(from), along(from + dash), o, rng, true));
        }
    }
    ops
}

//! Dot fill - small rough circles stepped down vertical scan lines.

use crate::geometry::Point;
use crate::hatch::{hachure_lines, MIN_GAP};
use crate::ops::Op;
use crate::options::{Options, ResolvedOptions};
use crate::rng::Rng;
use crate::sketchy::ellipse;

/// Generate dot fill ops for the polygons.
///
/// Dots sit `gap` apart on vertical hachure lines, each nudged by up to a
/// quarter gap in x and y. The nudges come from `rng`, so a seeded drawing
/// replays its dots exactly.
pub fn dots_fill(polygons: &[Vec<Point>], o: &ResolvedOptions, rng: &mut Rng) -> Vec<Op> {
    let vertical = o.overridden(&Options::default().with_hachure_angle(0.0));
    let lines = hachure_lines(polygons, &vertical);

    let gap = o.hachure_gap_or_stroke().max(MIN_GAP);
    let size = o.effective_fill_weight();
    let nudge = gap / 4.0;

    let mut ops = Vec::new();
    for line in &lines {
        let length = line.length();
        let count = ((length / gap).ceil() - 1.0).max(0.0) as usize;
        let offset = length - count as f64 * gap;
        let x = line.midpoint().x - gap / 4.0;
        let min_y = line.y1.min(line.y2);

        for i in 0..count {
            let y = min_y + offset + i as f64 * gap;
            let cx = x - nudge + rng.next_f64() * 2.0 * nudge;
            let cy = y - nudge + rng.next_f64() * 2.0 * nudge;
            ops.extend(ellipse(Point::new(cx, cy), size, size, o, rng));
        }
    }
    ops
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::resolve;

    fn square() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(100.0, 100.0),
            Point::new(0.0, 100.0),
        ]
    }

    fn opts(seed: u64) -> ResolvedOptions {
        resolve(
            &Options::default(),
            &Options::default().with_seed(seed).with_hachure_gap(20.0),
        )
    }

    #[test]
    fn dots_stay_near_polygon() {
        let o = opts(5);
        let mut rng = Rng::new(o.seed);
        let ops = dots_fill(&[square()], &o, &mut rng);
        assert!(!ops.is_empty());
        for op in &ops {
            let p = op.end();
            assert!(p.x > -10.0 && p.x < 110.0, "x out of range: {}", p.x);
            assert!(p.y > -10.0 && p.y < 110.0, "y out of range: {}", p.y);
        }
    }

    #[test]
    fn seeded_dots_replay() {
        let o = opts(77);
        let a = dots_fill(&[square()], &o, &mut Rng::new(o.seed));
        let b = dots_fill(&[square()], &o, &mut Rng::new(o.seed));
        assert_eq!(a, b);

        let c = dots_fill(&[square()], &o, &mut Rng::new(78));
        assert_ne!(a, c);
    }
}

//! Hachure and cross-hatch fills.

use crate::geometry::{Line, Point};
use crate::hatch::hachure_lines;
use crate::ops::Op;
use crate::options::{Options, ResolvedOptions};
use crate::rng::Rng;
use crate::sketchy::double_line;

/// Parallel rough strokes across the polygons.
pub fn hachure_fill(polygons: &[Vec<Point>], o: &ResolvedOptions, rng: &mut Rng) -> Vec<Op> {
    render_lines(&hachure_lines(polygons, o), o, rng)
}

/// Hachure plus a second pass rotated by 90°.
pub fn cross_hatch_fill(polygons: &[Vec<Point>], o: &ResolvedOptions, rng: &mut Rng) -> Vec<Op> {
    let mut ops = hachure_fill(polygons, o, rng);
    let crossed = o.overridden(&Options::default().with_hachure_angle(o.hachure_angle + 90.0));
    ops.extend(hachure_fill(polygons, &crossed, rng));
    ops
}

/// Each segment as a rough fill line.
pub fn render_lines(lines: &[Line], o: &ResolvedOptions, rng: &mut Rng) -> Vec<Op> {
    lines
        .iter()
        .flat_map(|line| double_line(line.start(), line.end(), o, rng, true))
        .collect()
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

    fn opts(local: Options) -> ResolvedOptions {
        resolve(&Options::default(), &local.with_seed(3).with_hachure_gap(10.0))
    }

    fn moves(ops: &[Op]) -> usize {
        ops.iter().filter(|op| matches!(op, Op::Move(_))).count()
    }

    #[test]
    fn two_passes_per_line() {
        let o = opts(Options::default().with_hachure_angle(0.0));
        let mut rng = Rng::new(o.seed);
        let ops = hachure_fill(&[square()], &o, &mut rng);
        assert_eq!(moves(&ops), 18);
    }

    #[test]
    fn single_pass_when_disabled() {
        let o = opts(Options::default().with_hachure_angle(0.0).with_disable_multi_stroke_fill(true));
        let mut rng = Rng::new(o.seed);
        let ops = hachure_fill(&[square()], &o, &mut rng);
        assert_eq!(moves(&ops), 9);
    }

    #[test]
    fn cross_hatch_adds_second_direction() {
        let o = opts(Options::default().with_hachure_angle(0.0));
        let mut rng = Rng::new(o.seed);
        let single = hachure_fill(&[square()], &o, &mut rng);
        let mut rng = Rng::new(o.seed);
        let crossed = cross_hatch_fill(&[square()], &o, &mut rng);
        assert_eq!(moves(&crossed), 2 * moves(&single));
        // The first half replays the plain hachure exactly.
        assert_eq!(&crossed[..single.len()], &single[..]);
    }
}

//! Zigzag fill - every hachure segment becomes a narrow "V".
//!
//! The two arms of each V start half a gap to either side of the segment's
//! first point, measured along the hachure angle, and meet at its end.

use crate::geometry::{Line, Point};
use crate::hatch::{hachure_lines, MIN_GAP};
use crate::ops::Op;
use crate::options::ResolvedOptions;
use crate::rng::Rng;

use super::hachure::render_lines;

/// Generate zigzag fill ops for the polygons.
pub fn zigzag_fill(polygons: &[Vec<Point>], o: &ResolvedOptions, rng: &mut Rng) -> Vec<Op> {
    let gap = o.hachure_gap_or_stroke().max(MIN_GAP);
    let angle = o.hachure_angle.to_radians();
    let dx = gap * 0.5 * angle.cos();
    let dy = gap * 0.5 * angle.sin();

    let arms: Vec<Line> = hachure_lines(polygons, o)
        .iter()
        .filter(|line| line.length() > 0.0)
        .flat_map(|line| {
            [
                Line::new(line.x1 - dx, line.y1 + dy, line.x2, line.y2),
                Line::new(line.x1 + dx, line.y1 - dy, line.x2, line.y2),
            ]
        })
        .collect();

    render_lines(&arms, o, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{resolve, Options};

    fn square() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(100.0, 100.0),
            Point::new(0.0, 100.0),
        ]
    }

    #[test]
    fn two_arms_per_segment() {
        let o = resolve(
            &Options::default(),
            &Options::default()
                .with_seed(9)
                .with_hachure_angle(0.0)
                .with_hachure_gap(10.0)
                .with_disable_multi_stroke_fill(true),
        );
        let mut rng = Rng::new(o.seed);
        let ops = zigzag_fill(&[square()], &o, &mut rng);
        let moves = ops.iter().filter(|op| matches!(op, Op::Move(_))).count();
        assert_eq!(moves, 18);
    }

    #[test]
    fn arms_meet_at_segment_end() {
        let o = resolve(
            &Options::default(),
            &Options::default()
                .with_seed(9)
                .with_roughness(0.0)
                .with_preserve_vertices(true)
                .with_hachure_angle(0.0)
                .with_hachure_gap(10.0)
                .with_disable_multi_stroke_fill(true),
        );
        let mut rng = Rng::new(o.seed);
        let ops = zigzag_fill(&[square()], &o, &mut rng);
        // Each arm is Move + CurveTo; both arms of a V end at the same point.
        for pair in ops.chunks(4) {
            assert_eq!(pair[1].end(), pair[3].end());
            let spread = pair[0].end().distance(pair[2].end());
            assert!((spread - 10.0).abs() < 1e-9);
        }
    }
}

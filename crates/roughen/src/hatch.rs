//! Scan-line hachure: parallel fill segments inside polygons.
//!
//! Every fill style starts from the same set of segments. The polygons are
//! rotated so the hachure direction becomes horizontal, swept by scan lines
//! `gap` apart, and the spans that lie inside the shape under the non-zero
//! winding rule are rotated back.

use crate::geometry::{Line, Point};
use crate::options::ResolvedOptions;

/// Smallest scan line spacing.
pub const MIN_GAP: f64 = 0.1;

/// Hachure segments for a set of polygons.
///
/// ## Rust Lesson #17: f64 Methods
///
/// Rust's f64 has methods for math: `.sin()`, `.cos()`, `.to_radians()`.
/// `total_cmp` gives floats a total order so they can be sorted.
pub fn hachure_lines(polygons: &[Vec<Point>], o: &ResolvedOptions) -> Vec<Line> {
    let gap = o.hachure_gap_or_stroke().max(MIN_GAP);
    let angle = (o.hachure_angle + 90.0).to_radians();

    let mut lines = Vec::new();
    for polygon in polygons.iter().filter(|p| p.len() >= 3) {
        let rotated: Vec<Point> = polygon.iter().map(|p| p.rotated(angle)).collect();
        scan_polygon(&rotated, gap, -angle, &mut lines);
    }
    lines
}

fn scan_polygon(rotated: &[Point], gap: f64, back: f64, lines: &mut Vec<Line>) {
    let min_y = rotated.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
    let max_y = rotated.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
    if !(min_y.is_finite() && max_y.is_finite()) {
        log::debug!("skipping polygon with non-finite coordinates");
        return;
    }

    let mut y = min_y;
    while y <= max_y {
        let crossings = crossings(rotated, y);

        let mut winding = 0;
        let mut prev_x: Option<f64> = None;
        for (x, dir) in crossings {
            if let Some(px) = prev_x
                && winding != 0
                && x > px
            {
                let start = Point::new(px, y).rotated(back);
                let end = Point::new(x, y).rotated(back);
                lines.push(Line::between(start, end));
            }
            winding += dir;
            prev_x = Some(x);
        }

        y += gap;
    }
}

/// Edge crossings of the horizontal line at `y`, sorted by x, with the
/// winding direction of each edge (+1 going down, -1 going up).
fn crossings(polygon: &[Point], y: f64) -> Vec<(f64, i32)> {
    let n = polygon.len();
    let mut result = Vec::new();
    for i in 0..n {
        let p1 = polygon[i];
        let p2 = polygon[(i + 1) % n];
        let (lo, hi) = if p1.y < p2.y { (p1.y, p2.y) } else { (p2.y, p1.y) };
        // Strictly inside the edge's span; touching a vertex does not count.
        if y <= lo || y >= hi {
            continue;
        }
        let t = (y - p1.y) / (p2.y - p1.y);
        let x = p1.x + t * (p2.x - p1.x);
        let dir = if p2.y > p1.y { 1 } else { -1 };
        result.push((x, dir));
    }
    result.sort_by(|a, b| a.0.total_cmp(&b.0));
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{resolve, Options};

    fn square(size: f64) -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(size, 0.0),
            Point::new(size, size),
            Point::new(0.0, size),
        ]
    }

    fn opts(angle: f64, gap: f64) -> ResolvedOptions {
        resolve(
            &Options::default(),
            &Options::default().with_hachure_angle(angle).with_hachure_gap(gap),
        )
    }

    #[test]
    fn vertical_lines_at_zero_angle() {
        let lines = hachure_lines(&[square(100.0)], &opts(0.0, 10.0));
        // x = 0 and x = 100 touch vertices only, leaving 9 interior scans.
        assert_eq!(lines.len(), 9);
        for line in &lines {
            assert!((line.x1 - line.x2).abs() < 1e-9);
            assert!((line.length() - 100.0).abs() < 1e-9);
        }
    }

    #[test]
    fn lines_stay_inside_polygon() {
        let lines = hachure_lines(&[square(50.0)], &opts(-41.0, 4.0));
        assert!(!lines.is_empty());
        for line in &lines {
            for p in [line.start(), line.end()] {
                assert!(p.x >= -1e-9 && p.x <= 50.0 + 1e-9);
                assert!(p.y >= -1e-9 && p.y <= 50.0 + 1e-9);
            }
        }
    }

    #[test]
    fn smaller_gap_gives_more_lines() {
        let wide = hachure_lines(&[square(100.0)], &opts(-41.0, 10.0)).len();
        let narrow = hachure_lines(&[square(100.0)], &opts(-41.0, 5.0)).len();
        assert!(narrow >= wide);
        assert!(narrow > 0);
    }

    #[test]
    fn concave_shape_splits_spans() {
        // A "U": rows through the notch produce two spans.
        let u = vec![
            Point::new(0.0, 0.0),
            Point::new(30.0, 0.0),
            Point::new(30.0, 30.0),
            Point::new(20.0, 30.0),
            Point::new(20.0, 10.0),
            Point::new(10.0, 10.0),
            Point::new(10.0, 30.0),
            Point::new(0.0, 30.0),
        ];
        let lines = hachure_lines(&[u], &opts(-90.0, 5.0));
        assert_eq!(lines.len(), 8);
        let row: Vec<&Line> = lines.iter().filter(|l| l.y1 == 20.0).collect();
        assert_eq!(row.len(), 2);
        assert_eq!((row[0].x1, row[0].x2), (0.0, 10.0));
        assert_eq!((row[1].x1, row[1].x2), (20.0, 30.0));
    }

    #[test]
    fn degenerate_polygons_skipped() {
        let line = vec![Point::new(0.0, 0.0), Point::new(10.0, 10.0)];
        assert!(hachure_lines(&[line], &opts(0.0, 1.0)).is_empty());
    }

    #[test]
    fn negative_gap_uses_stroke_width() {
        let o = resolve(
            &Options::default(),
            &Options::default()
                .with_hachure_angle(0.0)
                .with_hachure_gap(-1.0)
                .with_stroke_width(2.5),
        );
        // gap = 10
        assert_eq!(hachure_lines(&[square(100.0)], &o).len(), 9);
    }
}

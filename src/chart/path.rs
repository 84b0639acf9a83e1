//! Smoothed series paths and their lengths.
//!
//! Consecutive data points are joined with cubic segments whose control
//! points sit at horizontal thirds of the span, keeping endpoint y values.
//! The draw-in animation needs the total path length, which is approximated
//! by sampling each cubic.

use crate::chart::fmt_num;

/// Samples per cubic segment when approximating length.
const LENGTH_SAMPLES: u32 = 16;

/// Build the SVG path data for a smoothed line through `points`.
///
/// Empty input yields an empty string; a single point yields a bare move.
#[must_use]
pub fn smooth_path(points: &[(f64, f64)]) -> String {
    let Some(((first_x, first_y), _)) = points.split_first() else {
        return String::new();
    };

    let mut path = format!("M {},{}", fmt_num(*first_x), fmt_num(*first_y));

    for ((x0, y0), (x1, y1)) in points.iter().zip(points.iter().skip(1)) {
        let (cp1x, cp2x) = control_xs(*x0, *x1);
        path.push_str(&format!(
            " C {},{} {},{} {},{}",
            fmt_num(cp1x),
            fmt_num(*y0),
            fmt_num(cp2x),
            fmt_num(*y1),
            fmt_num(*x1),
            fmt_num(*y1)
        ));
    }

    path
}

/// Approximate length of the smoothed path through `points`.
#[must_use]
pub fn path_length(points: &[(f64, f64)]) -> f64 {
    points
        .iter()
        .zip(points.iter().skip(1))
        .map(|(&(x0, y0), &(x1, y1))| {
            let (cp1x, cp2x) = control_xs(x0, x1);
            segment_length((x0, y0), (cp1x, y0), (cp2x, y1), (x1, y1))
        })
        .sum()
}

const fn control_xs(x0: f64, x1: f64) -> (f64, f64) {
    (x0 + (x1 - x0) / 3.0, x1 - (x1 - x0) / 3.0)
}

fn segment_length(p0: (f64, f64), p1: (f64, f64), p2: (f64, f64), p3: (f64, f64)) -> f64 {
    let mut length = 0.0;
    let mut prev = p0;

    for i in 1..=LENGTH_SAMPLES {
        let t = f64::from(i) / f64::from(LENGTH_SAMPLES);
        let point = cubic_at(p0, p1, p2, p3, t);
        length += (point.0 - prev.0).hypot(point.1 - prev.1);
        prev = point;
    }

    length
}

fn cubic_at(p0: (f64, f64), p1: (f64, f64), p2: (f64, f64), p3: (f64, f64), t: f64) -> (f64, f64) {
    let u = 1.0 - t;
    let b0 = u * u * u;
    let b1 = 3.0 * u * u * t;
    let b2 = 3.0 * u * t * t;
    let b3 = t * t * t;
    (
        b0 * p0.0 + b1 * p1.0 + b2 * p2.0 + b3 * p3.0,
        b0 * p0.1 + b1 * p1.1 + b2 * p2.1 + b3 * p3.1,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_points_yield_empty_path() {
        assert_eq!(smooth_path(&[]), "");
        assert!(path_length(&[]).abs() < f64::EPSILON);
    }

    #[test]
    fn test_single_point_is_a_bare_move() {
        assert_eq!(smooth_path(&[(60.0, 320.0)]), "M 60,320");
        assert!(path_length(&[(60.0, 320.0)]).abs() < f64::EPSILON);
    }

    #[test]
    fn test_control_points_sit_at_horizontal_thirds() {
        let path = smooth_path(&[(0.0, 10.0), (30.0, 40.0)]);
        assert_eq!(path, "M 0,10 C 10,10 20,40 30,40");
    }

    #[test]
    fn test_segment_count_matches_input() {
        let points = [(0.0, 0.0), (10.0, 5.0), (20.0, 2.0), (30.0, 8.0)];
        let path = smooth_path(&points);
        assert_eq!(path.matches(" C ").count(), points.len() - 1);
    }

    #[test]
    fn test_horizontal_line_length_is_the_distance() {
        // A flat run degenerates to a straight line, so the sampled length
        // must match the point distance closely.
        let length = path_length(&[(0.0, 50.0), (100.0, 50.0)]);
        assert!((length - 100.0).abs() < 0.01, "got {length}");
    }

    #[test]
    fn test_length_exceeds_straight_line_when_curved() {
        let straight = (200.0f64.powi(2) + 100.0f64.powi(2)).sqrt();
        let length = path_length(&[(0.0, 0.0), (200.0, 100.0)]);
        assert!(length >= straight - 0.01);
    }
}

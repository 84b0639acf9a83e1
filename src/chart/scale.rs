//! Axis scale computation.

/// Y-axis layout: a rounded-up axis maximum and the tick values to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct YAxis {
    pub max: f64,
    pub ticks: Vec<f64>,
}

/// Pick y-axis ticks so the axis ends on a round number.
///
/// Tries units of 1, 2, 5, and 10 times `magnitude / 10` (where magnitude is
/// the largest power of ten at or below the data maximum) and takes the first
/// whose tick count fits `target_ticks`. When even a unit of one magnitude
/// overflows the target, that unit is used anyway so the data always fits.
#[must_use]
pub fn nice_ticks(max_value: f64, target_ticks: usize) -> YAxis {
    if max_value <= 0.0 {
        return YAxis {
            max: 0.0,
            ticks: vec![0.0],
        };
    }

    let magnitude = 10f64.powf(max_value.log10().floor());

    for step in [1.0, 2.0, 5.0, 10.0] {
        let unit = step * magnitude / 10.0;
        let count = segments(max_value, unit);
        if count <= target_ticks {
            return build_axis(count, unit);
        }
    }

    build_axis(segments(max_value, magnitude), magnitude)
}

/// Horizontal distance between adjacent data points.
#[must_use]
pub fn x_step(plot_width: f64, point_count: usize) -> f64 {
    if point_count > 1 {
        #[expect(clippy::cast_precision_loss, reason = "point counts are small")]
        let divisor = (point_count - 1) as f64;
        plot_width / divisor
    } else {
        plot_width
    }
}

#[expect(clippy::cast_possible_truncation, reason = "segment counts are small positive integers")]
#[expect(clippy::cast_sign_loss, reason = "max_value and unit are positive here")]
fn segments(max_value: f64, unit: f64) -> usize {
    (max_value / unit).ceil() as usize
}

fn build_axis(count: usize, unit: f64) -> YAxis {
    #[expect(clippy::cast_precision_loss, reason = "tick indices are small")]
    let ticks: Vec<f64> = (0..=count).map(|i| i as f64 * unit).collect();
    YAxis {
        max: ticks.last().copied().unwrap_or(0.0),
        ticks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_max_gives_single_tick() {
        let axis = nice_ticks(0.0, 5);
        assert_eq!(axis.ticks, vec![0.0]);
        assert!(axis.max.abs() < f64::EPSILON);
    }

    #[test]
    fn test_axis_max_covers_data() {
        for max in [1.0, 3.0, 7.0, 12.0, 47.0, 99.0, 101.0, 12345.0] {
            let axis = nice_ticks(max, 5);
            assert!(axis.max >= max, "axis max {} must cover data max {max}", axis.max);
        }
    }

    #[test]
    fn test_tick_spacing_is_uniform() {
        let axis = nice_ticks(47.0, 5);
        let diffs: Vec<f64> = axis.ticks.windows(2).map(|pair| pair[1] - pair[0]).collect();
        for diff in &diffs {
            assert!((diff - diffs[0]).abs() < 1e-9);
        }
    }

    #[test]
    fn test_round_units_selected() {
        // max 47 with 5 target ticks: unit 10 fits (ceil(47/10) = 5)
        let axis = nice_ticks(47.0, 5);
        assert_eq!(axis.ticks, vec![0.0, 10.0, 20.0, 30.0, 40.0, 50.0]);
        assert!((axis.max - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_more_ticks_allows_finer_units() {
        let coarse = nice_ticks(47.0, 5);
        let fine = nice_ticks(47.0, 10);
        assert!(fine.ticks.len() >= coarse.ticks.len());
        assert!(fine.max <= coarse.max);
    }

    #[test]
    fn test_fallback_unit_when_target_too_small() {
        // max 9.5: every unit down to magnitude 1 needs 10 segments, which
        // exceeds a target of 5, so the magnitude unit is used regardless.
        let axis = nice_ticks(9.5, 5);
        assert_eq!(axis.ticks.len(), 11);
        assert!((axis.max - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_x_step_divides_plot_width() {
        assert!((x_step(690.0, 4) - 230.0).abs() < 1e-9);
        assert!((x_step(690.0, 1) - 690.0).abs() < 1e-9);
        assert!((x_step(690.0, 0) - 690.0).abs() < 1e-9);
    }
}

//! Statistics Calculator Module
//! Summary statistics and running averages for simulated values.

use statrs::statistics::Statistics;

/// Summary of one simulated series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesStats {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

impl Default for SeriesStats {
    fn default() -> Self {
        Self {
            count: 0,
            mean: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            max: f64::NAN,
        }
    }
}

pub struct StatsCalculator;

impl StatsCalculator {
    /// Count, mean, sample standard deviation and range of a series.
    pub fn summarize(values: &[f64]) -> SeriesStats {
        if values.is_empty() {
            return SeriesStats::default();
        }

        let (min, max) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });

        SeriesStats {
            count: values.len(),
            mean: values.iter().mean(),
            // statrs yields NaN for a single observation
            std: if values.len() > 1 {
                values.iter().std_dev()
            } else {
                0.0
            },
            min,
            max,
        }
    }

    /// Cumulative mean: element `i` is the average of `values[..=i]`.
    ///
    /// Used as the expected return after `i + 1` simulations.
    pub fn running_mean(values: &[f64]) -> Vec<f64> {
        let mut sum = 0.0;
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                sum += v;
                sum / (i + 1) as f64
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize() {
        let stats = StatsCalculator::summarize(&[4.0, 1.0, 3.0, 2.0]);
        assert_eq!(stats.count, 4);
        assert!((stats.mean - 2.5).abs() < 1e-12);
        assert!((stats.std - (5.0f64 / 3.0).sqrt()).abs() < 1e-12);
        assert_eq!((stats.min, stats.max), (1.0, 4.0));
    }

    #[test]
    fn test_single_value_has_zero_spread() {
        let stats = StatsCalculator::summarize(&[7.5]);
        assert_eq!(stats.count, 1);
        assert_eq!(stats.std, 0.0);
        assert_eq!((stats.min, stats.max), (7.5, 7.5));
    }

    #[test]
    fn test_empty_is_nan() {
        let stats = StatsCalculator::summarize(&[]);
        assert_eq!(stats.count, 0);
        assert!(stats.mean.is_nan());
    }

    #[test]
    fn test_running_mean() {
        let means = StatsCalculator::running_mean(&[2.0, 4.0, 6.0, -4.0]);
        assert_eq!(means, vec![2.0, 3.0, 4.0, 2.0]);
        assert!(StatsCalculator::running_mean(&[]).is_empty());
    }
}

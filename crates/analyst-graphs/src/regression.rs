//! Ordinary least squares fit and Pearson correlation.

/// Result of fitting `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegressionFit {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
}

struct Moments {
    mean_x: f64,
    mean_y: f64,
    sxx: f64,
    syy: f64,
    sxy: f64,
}

fn moments(points: &[(f64, f64)]) -> Option<Moments> {
    if points.len() < 2 {
        return None;
    }
    let n = points.len() as f64;
    let mean_x = points.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = points.iter().map(|p| p.1).sum::<f64>() / n;

    let (sxx, syy, sxy) = points.iter().fold((0.0, 0.0, 0.0), |(sxx, syy, sxy), &(x, y)| {
        let dx = x - mean_x;
        let dy = y - mean_y;
        (sxx + dx * dx, syy + dy * dy, sxy + dx * dy)
    });

    // Sums of values near the f64 limits overflow.
    [mean_x, mean_y, sxx, syy, sxy]
        .iter()
        .all(|v| v.is_finite())
        .then_some(Moments {
            mean_x,
            mean_y,
            sxx,
            syy,
            sxy,
        })
}

impl RegressionFit {
    /// Fits the points, or `None` when n < 2, x has zero variance or the
    /// moments are not representable.
    pub fn fit(points: &[(f64, f64)]) -> Option<Self> {
        let m = moments(points)?;
        if m.sxx <= f64::EPSILON * m.mean_x.abs().max(1.0) {
            return None;
        }

        let slope = m.sxy / m.sxx;
        let intercept = m.mean_y - slope * m.mean_x;
        if !slope.is_finite() || !intercept.is_finite() {
            return None;
        }
        // Horizontal data is fitted exactly.
        let r_squared = if m.syy == 0.0 {
            1.0
        } else {
            (m.sxy * m.sxy) / (m.sxx * m.syy)
        };

        Some(Self {
            slope,
            intercept,
            r_squared,
        })
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Pearson correlation coefficient, `None` when either side is constant.
pub fn pearson_correlation(points: &[(f64, f64)]) -> Option<f64> {
    let m = moments(points)?;
    if m.sxx == 0.0 || m.syy == 0.0 {
        return None;
    }
    let r = m.sxy / (m.sxx.sqrt() * m.syy.sqrt());
    r.is_finite().then_some(r)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SamplePair;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_demo_sample_fit() {
        let fit = RegressionFit::fit(&SamplePair::demo().finite_points()).unwrap();
        assert!(close(fit.slope, 0.3));
        assert!(close(fit.intercept, 2.1));
        assert!(close(fit.r_squared, 0.09));
        assert!(close(fit.predict(10.0), 5.1));
    }

    #[test]
    fn test_perfect_line() {
        let points: Vec<_> = (0..10).map(|i| (f64::from(i), 3.0 * f64::from(i) - 1.0)).collect();
        let fit = RegressionFit::fit(&points).unwrap();
        assert!(close(fit.slope, 3.0));
        assert!(close(fit.intercept, -1.0));
        assert!(close(fit.r_squared, 1.0));
        assert!(close(pearson_correlation(&points).unwrap(), 1.0));
    }

    #[test]
    fn test_degenerate_inputs() {
        assert!(RegressionFit::fit(&[]).is_none());
        assert!(RegressionFit::fit(&[(1.0, 2.0)]).is_none());
        assert!(RegressionFit::fit(&[(2.0, 1.0), (2.0, 5.0), (2.0, 3.0)]).is_none());
        assert!(pearson_correlation(&[(1.0, 2.0), (2.0, 2.0)]).is_none());
    }

    #[test]
    fn test_flat_y_has_zero_slope() {
        let fit = RegressionFit::fit(&[(1.0, 4.0), (2.0, 4.0), (3.0, 4.0)]).unwrap();
        assert!(close(fit.slope, 0.0));
        assert!(close(fit.intercept, 4.0));
    }

    #[test]
    fn test_overflowing_moments() {
        assert!(RegressionFit::fit(&[(-1e308, 0.0), (1e308, 1.0)]).is_none());
        assert!(RegressionFit::fit(&[(0.0, 1e308), (1.0, -1e308), (2.0, 1e308)]).is_none());
        assert!(RegressionFit::fit(&[(1e308, 1.0), (1e308, 2.0), (-1e308, 3.0)]).is_none());
        assert!(pearson_correlation(&[(-1e308, 0.0), (1e308, 1.0)]).is_none());

        // Large but representable values still fit.
        let fit = RegressionFit::fit(&[(1e15, 1.0), (2e15, 2.0), (3e15, 3.0)]).unwrap();
        assert!(fit.slope.is_finite() && fit.slope > 0.0);
    }

    #[test]
    fn test_demo_correlation() {
        let r = pearson_correlation(&SamplePair::demo().finite_points()).unwrap();
        assert!(close(r, 0.3));
    }
}

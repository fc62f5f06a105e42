//! Paired numeric samples fed to the renderer.

use analyst_common::{AnalystError, Result};

/// Equal-length x and y sequences.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SamplePair {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl SamplePair {
    /// Pairs two sequences, rejecting a length mismatch.
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self> {
        if x.len() != y.len() {
            return Err(AnalystError::validation(format!(
                "Sample lengths differ: x has {}, y has {}",
                x.len(),
                y.len()
            )));
        }
        Ok(Self { x, y })
    }

    /// Builds a pair from `(x, y)` points.
    pub fn from_points(points: impl IntoIterator<Item = (f64, f64)>) -> Self {
        let (x, y) = points.into_iter().unzip();
        Self { x, y }
    }

    /// The x = [1..5], y = [2, 4, 1, 5, 3] demonstration sample.
    pub fn demo() -> Self {
        Self {
            x: vec![1.0, 2.0, 3.0, 4.0, 5.0],
            y: vec![2.0, 4.0, 1.0, 5.0, 3.0],
        }
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Points where both coordinates are finite, in input order.
    pub fn finite_points(&self) -> Vec<(f64, f64)> {
        self.x
            .iter()
            .zip(&self.y)
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .map(|(&x, &y)| (x, y))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_mismatch() {
        let error = SamplePair::new(vec![1.0, 2.0], vec![1.0]).unwrap_err();
        assert!(matches!(error, AnalystError::Validation { .. }));
        assert!(error.to_string().contains("x has 2, y has 1"));
    }

    #[test]
    fn test_finite_points_drop_nan_and_infinity() {
        let sample = SamplePair::new(
            vec![1.0, f64::NAN, 3.0, 4.0],
            vec![1.0, 2.0, f64::INFINITY, 4.0],
        )
        .unwrap();

        assert_eq!(sample.len(), 4);
        assert_eq!(sample.finite_points(), vec![(1.0, 1.0), (4.0, 4.0)]);
    }

    #[test]
    fn test_from_points() {
        let sample = SamplePair::from_points([(1.0, 2.0), (3.0, 4.0)]);
        assert_eq!(sample.x(), &[1.0, 3.0]);
        assert_eq!(sample.y(), &[2.0, 4.0]);
        assert!(!sample.is_empty());
        assert!(SamplePair::default().is_empty());
    }
}

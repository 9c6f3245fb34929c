//! Rating prediction error: RMSE and MAE.
//!
//! Only (user, item) pairs present in both the predictions and the test set
//! contribute. The aggregate is taken over all pairs at once, not as a mean
//! of per-user values.

use super::ErrorMetric;

/// Root-mean-square error
#[derive(Debug, Clone, Copy, Default)]
pub struct Rmse;

impl ErrorMetric for Rmse {
    fn name(&self) -> &str {
        "RMSE"
    }

    fn aggregate(&self, errors: &[f64]) -> f64 {
        let squared: f64 = errors.iter().map(|e| e * e).sum();
        (squared / errors.len() as f64).sqrt()
    }
}

/// Mean absolute error
#[derive(Debug, Clone, Copy, Default)]
pub struct Mae;

impl ErrorMetric for Mae {
    fn name(&self) -> &str {
        "MAE"
    }

    fn aggregate(&self, errors: &[f64]) -> f64 {
        errors.iter().map(|e| e.abs()).sum::<f64>() / errors.len() as f64
    }
}

//! Evaluation metrics for fitted pricing models.
//!
//! Regression metrics only: R², MSE, RMSE, MAE.

use crate::primitives::Vector;

/// Coefficient of determination, `1 - SS_res / SS_tot`.
///
/// Measures the share of rent variation the predictions explain. A
/// constant target makes `SS_tot` zero; that case reports 0.0 instead of
/// dividing by zero. Predictions worse than the target mean drive the
/// value negative.
///
/// # Examples
///
/// ```
/// use tasar::metrics::r_squared;
/// use tasar::primitives::Vector;
///
/// let rent = Vector::from_slice(&[1030.0, 1190.0, 1310.0, 1460.0]);
/// let predicted = Vector::from_slice(&[1040.0, 1180.0, 1305.0, 1470.0]);
/// assert!(r_squared(&predicted, &rent) > 0.99);
/// ```
///
/// # Panics
///
/// Panics if vectors have different lengths.
#[must_use]
pub fn r_squared(y_pred: &Vector<f64>, y_true: &Vector<f64>) -> f64 {
    assert_eq!(y_pred.len(), y_true.len(), "Vectors must have same length");

    let mean = y_true.mean();
    let mut ss_res = 0.0;
    let mut ss_tot = 0.0;
    for (p, t) in y_pred.iter().zip(y_true.iter()) {
        ss_res += (t - p) * (t - p);
        ss_tot += (t - mean) * (t - mean);
    }

    if ss_tot == 0.0 {
        0.0
    } else {
        1.0 - ss_res / ss_tot
    }
}

/// Mean squared error of the predictions.
///
/// # Panics
///
/// Panics if vectors have different lengths or are empty.
#[must_use]
pub fn mse(y_pred: &Vector<f64>, y_true: &Vector<f64>) -> f64 {
    assert_eq!(y_pred.len(), y_true.len(), "Vectors must have same length");
    assert!(!y_true.is_empty(), "Vectors cannot be empty");

    let sum: f64 = y_pred
        .iter()
        .zip(y_true.iter())
        .map(|(p, t)| {
            let d = t - p;
            d * d
        })
        .sum();
    sum / y_true.len() as f64
}

/// Root mean squared error, in the units of the target.
///
/// # Panics
///
/// Panics if vectors have different lengths or are empty.
#[must_use]
pub fn rmse(y_pred: &Vector<f64>, y_true: &Vector<f64>) -> f64 {
    mse(y_pred, y_true).sqrt()
}

/// Mean absolute error, less sensitive to single bad listings than MSE.
///
/// # Panics
///
/// Panics if vectors have different lengths or are empty.
#[must_use]
pub fn mae(y_pred: &Vector<f64>, y_true: &Vector<f64>) -> f64 {
    assert_eq!(y_pred.len(), y_true.len(), "Vectors must have same length");
    assert!(!y_true.is_empty(), "Vectors cannot be empty");

    let sum: f64 = y_pred
        .iter()
        .zip(y_true.iter())
        .map(|(p, t)| (t - p).abs())
        .sum();
    sum / y_true.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_r_squared_perfect_predictions() {
        let rent = Vector::from_slice(&[990.0, 1200.0, 1850.0]);
        assert!((r_squared(&rent, &rent) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_r_squared_mean_prediction_scores_zero() {
        // Predicting the average rent for every listing explains nothing.
        let rent = Vector::from_slice(&[1000.0, 1200.0, 1400.0]);
        let mean_only = Vector::from_slice(&[1200.0, 1200.0, 1200.0]);
        assert!(r_squared(&mean_only, &rent).abs() < 1e-12);
    }

    #[test]
    fn test_r_squared_constant_target_reports_zero() {
        let rent = Vector::from_slice(&[1500.0, 1500.0, 1500.0]);
        let predicted = Vector::from_slice(&[1400.0, 1500.0, 1600.0]);
        assert_eq!(r_squared(&predicted, &rent), 0.0);
    }

    #[test]
    fn test_r_squared_goes_negative_for_bad_predictions() {
        let rent = Vector::from_slice(&[1000.0, 1200.0, 1400.0]);
        let wild = Vector::from_slice(&[5000.0, 5000.0, 5000.0]);
        assert!(r_squared(&wild, &rent) < 0.0);
    }

    #[test]
    fn test_mse_averages_squared_misses() {
        // Misses of -100, 0, +200 square-average to 50000/3.
        let rent = Vector::from_slice(&[1000.0, 1200.0, 1400.0]);
        let predicted = Vector::from_slice(&[1100.0, 1200.0, 1200.0]);
        assert!((mse(&predicted, &rent) - 50_000.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_rmse_back_in_rent_units() {
        // Every prediction is off by exactly 50 either way.
        let rent = Vector::from_slice(&[1000.0, 1200.0, 1400.0, 1600.0]);
        let predicted = Vector::from_slice(&[1050.0, 1150.0, 1450.0, 1550.0]);
        assert!((rmse(&predicted, &rent) - 50.0).abs() < 1e-12);
    }

    #[test]
    fn test_mae_averages_absolute_misses() {
        let rent = Vector::from_slice(&[1000.0, 1200.0, 1400.0]);
        let predicted = Vector::from_slice(&[1100.0, 1200.0, 1200.0]);
        assert!((mae(&predicted, &rent) - 100.0).abs() < 1e-12);
    }

    #[test]
    fn test_mae_shrugs_off_one_outlier() {
        // A single corrupted listing moves MAE far less than RMSE.
        let rent = Vector::from_slice(&[1000.0, 1200.0, 1400.0, 14_000.0]);
        let predicted = Vector::from_slice(&[1000.0, 1200.0, 1400.0, 1400.0]);
        assert!((mae(&predicted, &rent) - 3150.0).abs() < 1e-9);
        assert!(rmse(&predicted, &rent) > 6000.0);
    }

    #[test]
    #[should_panic(expected = "same length")]
    fn test_length_mismatch_panics() {
        let rent = Vector::from_slice(&[1000.0, 1200.0]);
        let predicted = Vector::from_slice(&[1000.0]);
        let _ = mse(&predicted, &rent);
    }

    #[test]
    #[should_panic(expected = "cannot be empty")]
    fn test_empty_input_panics() {
        let empty: Vector<f64> = Vector::from_vec(vec![]);
        let _ = mae(&empty, &empty);
    }
}

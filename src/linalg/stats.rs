//! Small reductions over dense matrices.
//!
//! Every axis-dependent helper takes an explicit [`Axis`]. `Axis::Rows`
//! treats each row as one item (one result per row, or a row-shaped mean
//! applied to every row); `Axis::Cols` does the same for columns.
use crate::error::{FeatureError, Result};
use crate::scalar::{from_usize, Real};
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    #[default]
    Rows,
    Cols,
}

/// Running sum: `out[i] = values[0] + … + values[i]`.
pub fn cum_sum<T: Real>(values: &[T]) -> Vec<T> {
    let mut acc = T::zero();
    values
        .iter()
        .map(|&v| {
            acc += v;
            acc
        })
        .collect()
}

/// Sum of a row or column vector.
pub fn sum_1d<T: Real>(mat: &DMatrix<T>) -> Result<T> {
    if mat.nrows() != 1 && mat.ncols() != 1 {
        return Err(FeatureError::InvalidShape(format!(
            "sum_1d expects a vector, got {}x{}",
            mat.nrows(),
            mat.ncols()
        )));
    }
    Ok(sum_2d(mat))
}

/// Sum of every element.
pub fn sum_2d<T: Real>(mat: &DMatrix<T>) -> T {
    mat.iter().fold(T::zero(), |acc, &v| acc + v)
}

/// One sum per row (`Axis::Rows`) or per column (`Axis::Cols`).
pub fn sum_along<T: Real>(mat: &DMatrix<T>, axis: Axis) -> DVector<T> {
    match axis {
        Axis::Rows => DVector::from_fn(mat.nrows(), |i, _| {
            mat.row(i).iter().fold(T::zero(), |acc, &v| acc + v)
        }),
        Axis::Cols => DVector::from_fn(mat.ncols(), |j, _| {
            mat.column(j).iter().fold(T::zero(), |acc, &v| acc + v)
        }),
    }
}

/// Arg-max of each row (`Axis::Rows`) or column (`Axis::Cols`).
///
/// With `labels`, position `k` maps to `labels[k]`; without, the 1-based
/// position is returned. Ties resolve to the first position.
pub fn max_index<T: Real>(
    mat: &DMatrix<T>,
    labels: Option<&[i32]>,
    axis: Axis,
) -> Result<DVector<i32>> {
    if mat.is_empty() {
        return Err(FeatureError::InvalidShape(
            "max_index of an empty matrix".to_string(),
        ));
    }
    let (items, span) = match axis {
        Axis::Rows => (mat.nrows(), mat.ncols()),
        Axis::Cols => (mat.ncols(), mat.nrows()),
    };
    if let Some(l) = labels {
        if l.len() != span {
            return Err(FeatureError::DimensionMismatch(format!(
                "{} labels for {} candidates",
                l.len(),
                span
            )));
        }
    }
    let at = |item: usize, k: usize| match axis {
        Axis::Rows => mat[(item, k)],
        Axis::Cols => mat[(k, item)],
    };
    Ok(DVector::from_fn(items, |item, _| {
        let mut best = 0;
        let mut best_value = at(item, 0);
        for k in 1..span {
            let v = at(item, k);
            if v > best_value {
                best_value = v;
                best = k;
            }
        }
        match labels {
            Some(l) => l[best],
            None => best as i32 + 1,
        }
    }))
}

/// Subtract `mean` from every row (`Axis::Rows`, `mean.len() == ncols`) or
/// every column (`Axis::Cols`, `mean.len() == nrows`).
pub fn mean_subtraction<T: Real>(mat: &DMatrix<T>, mean: &[T], axis: Axis) -> Result<DMatrix<T>> {
    let expected = match axis {
        Axis::Rows => mat.ncols(),
        Axis::Cols => mat.nrows(),
    };
    if mean.len() != expected {
        return Err(FeatureError::DimensionMismatch(format!(
            "mean of length {} for a {}x{} matrix ({:?})",
            mean.len(),
            mat.nrows(),
            mat.ncols(),
            axis
        )));
    }
    Ok(DMatrix::from_fn(mat.nrows(), mat.ncols(), |i, j| match axis {
        Axis::Rows => mat[(i, j)] - mean[j],
        Axis::Cols => mat[(i, j)] - mean[i],
    }))
}

/// Mean item along `axis`: the average row for `Axis::Rows`, the average
/// column for `Axis::Cols`.
pub fn mean_along<T: Real>(mat: &DMatrix<T>, axis: Axis) -> Vec<T> {
    match axis {
        Axis::Rows => {
            let n = from_usize::<T>(mat.nrows().max(1));
            sum_along(mat, Axis::Cols).iter().map(|&s| s / n).collect()
        }
        Axis::Cols => {
            let n = from_usize::<T>(mat.ncols().max(1));
            sum_along(mat, Axis::Rows).iter().map(|&s| s / n).collect()
        }
    }
}

/// Centre the items along `axis` on their mean.
pub fn mean_normalize<T: Real>(mat: &DMatrix<T>, axis: Axis) -> Result<DMatrix<T>> {
    let mean = mean_along(mat, axis);
    mean_subtraction(mat, &mean, axis)
}

/// `(mean, sample standard deviation)` with the `n - 1` denominator.
pub fn mean_std<T: Real>(values: &[T]) -> Result<(T, T)> {
    if values.len() < 2 {
        return Err(FeatureError::InvalidShape(format!(
            "mean_std needs at least two values, got {}",
            values.len()
        )));
    }
    let n = from_usize::<T>(values.len());
    let mean = values.iter().fold(T::zero(), |acc, &v| acc + v) / n;
    let ss = values
        .iter()
        .fold(T::zero(), |acc, &v| acc + (v - mean) * (v - mean));
    Ok((mean, (ss / (n - T::one())).sqrt()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DMatrix<f64> {
        DMatrix::from_row_slice(3, 3, &[1.0, 5.0, 2.0, 7.0, 7.0, 0.0, -1.0, -3.0, -2.0])
    }

    #[test]
    fn cumulative_and_total_sums() {
        assert_eq!(cum_sum(&[4.0, 3.0, 2.0, 1.0]), vec![4.0, 7.0, 9.0, 10.0]);
        assert_eq!(sum_2d(&sample()), 16.0);
        let row = DMatrix::from_row_slice(1, 3, &[1.0, 2.0, 3.0]);
        assert_eq!(sum_1d(&row).unwrap(), 6.0);
        assert!(matches!(sum_1d(&sample()), Err(FeatureError::InvalidShape(_))));
        assert_eq!(sum_along(&sample(), Axis::Rows).as_slice(), &[8.0, 14.0, -6.0]);
        assert_eq!(sum_along(&sample(), Axis::Cols).as_slice(), &[7.0, 9.0, 0.0]);
    }

    #[test]
    fn max_index_prefers_first_on_ties() {
        let m = sample();
        assert_eq!(max_index(&m, None, Axis::Rows).unwrap().as_slice(), &[2, 1, 1]);
        assert_eq!(max_index(&m, None, Axis::Cols).unwrap().as_slice(), &[2, 2, 1]);
        let labels = [10, 20, 30];
        assert_eq!(
            max_index(&m, Some(&labels), Axis::Rows).unwrap().as_slice(),
            &[20, 10, 10]
        );
        assert!(matches!(
            max_index(&m, Some(&labels[..2]), Axis::Rows),
            Err(FeatureError::DimensionMismatch(_))
        ));
    }

    #[test]
    fn mean_normalize_centres_rows() {
        let centred = mean_normalize(&sample(), Axis::Rows).unwrap();
        for total in sum_along(&centred, Axis::Cols).iter() {
            assert!(total.abs() < 1e-12);
        }
        let by_cols = mean_normalize(&sample(), Axis::Cols).unwrap();
        for total in sum_along(&by_cols, Axis::Rows).iter() {
            assert!(total.abs() < 1e-12);
        }
    }

    #[test]
    fn mean_subtraction_checks_length() {
        let out = mean_subtraction(&sample(), &[1.0, 1.0, 1.0], Axis::Cols).unwrap();
        assert_eq!(out[(1, 2)], -1.0);
        assert!(mean_subtraction(&sample(), &[1.0], Axis::Rows).is_err());
    }

    #[test]
    fn sample_standard_deviation() {
        let (mean, sd) = mean_std(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert!((mean - 5.0f64).abs() < 1e-12);
        assert!((sd - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
        assert!(mean_std(&[1.0f64]).is_err());
    }
}

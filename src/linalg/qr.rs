//! QR factorisation `A = Q·R` for tall or square matrices.
//!
//! Two strategies are available: bottom-up Givens rotations (default) and
//! nalgebra's Householder QR. Both produce an orthonormal `Q` and an upper
//! triangular `R`; signs of matching rows/columns may differ between them.
use crate::error::{FeatureError, Result};
use crate::scalar::Real;
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

/// Output shape for an `m × n` input (`m ≥ n`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QrMode {
    /// `Q: m×n`, `R: n×n`.
    #[default]
    Economy,
    /// `Q: m×m`, `R: m×n`.
    Full,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QrStrategy {
    #[default]
    Givens,
    Householder,
}

#[derive(Clone, Debug)]
pub struct QrDecomposition<T: Real> {
    pub q: DMatrix<T>,
    pub r: DMatrix<T>,
}

pub fn qr<T: Real>(a: &DMatrix<T>, mode: QrMode, strategy: QrStrategy) -> Result<QrDecomposition<T>> {
    let (m, n) = a.shape();
    if m == 0 || n == 0 || m < n {
        return Err(FeatureError::InvalidShape(format!(
            "QR needs rows >= cols > 0, got {m}x{n}"
        )));
    }
    let (q, r) = match strategy {
        QrStrategy::Givens => givens_full(a),
        QrStrategy::Householder => householder_full(a),
    };
    Ok(match mode {
        QrMode::Full => QrDecomposition { q, r },
        QrMode::Economy => QrDecomposition {
            q: q.columns(0, n).into_owned(),
            r: r.rows(0, n).into_owned(),
        },
    })
}

fn givens_full<T: Real>(a: &DMatrix<T>) -> (DMatrix<T>, DMatrix<T>) {
    let (m, n) = a.shape();
    let mut r = a.clone();
    let mut q = DMatrix::<T>::identity(m, m);

    for j in 0..n {
        for i in (j + 1..m).rev() {
            let x = r[(i - 1, j)];
            let y = r[(i, j)];
            if y == T::zero() {
                continue;
            }
            let h = (x * x + y * y).sqrt();
            let (c, s) = (x / h, y / h);

            for k in j..n {
                let (t1, t2) = (r[(i - 1, k)], r[(i, k)]);
                r[(i - 1, k)] = c * t1 + s * t2;
                r[(i, k)] = c * t2 - s * t1;
            }
            r[(i, j)] = T::zero();

            for k in 0..m {
                let (t1, t2) = (q[(k, i - 1)], q[(k, i)]);
                q[(k, i - 1)] = c * t1 + s * t2;
                q[(k, i)] = c * t2 - s * t1;
            }
        }
    }
    (q, r)
}

/// Householder QR of `[A | I]` yields a square `Q` whose leading columns are
/// those of the thin factorisation of `A`.
fn householder_full<T: Real>(a: &DMatrix<T>) -> (DMatrix<T>, DMatrix<T>) {
    let (m, n) = a.shape();
    let mut augmented = DMatrix::<T>::zeros(m, n + m);
    augmented.columns_mut(0, n).copy_from(a);
    augmented
        .columns_mut(n, m)
        .copy_from(&DMatrix::<T>::identity(m, m));
    let decomposition = augmented.qr();
    let q = decomposition.q();
    let r = decomposition.r().columns(0, n).into_owned();
    (q, r)
}

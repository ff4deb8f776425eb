//! Guard-zone boundary conditions shared by the single-patch 1D/2D Euler
//! driver and the SRHD multi-patch exchange.

use ndarray::{Array1, Array2};

use crate::numeric::Vector;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryCondition {
    Periodic,
    Outflow,
}

/// Refresh the `NG` guard zones at each end of a single-patch 1D domain.
/// Periodic wraps to the opposite interior edge; outflow copies the
/// adjacent interior cell outward.
pub fn apply_1d<const N: usize>(primitive: &mut Array1<Vector<N>>, ng: usize, bc: BoundaryCondition) {
    let ni = primitive.len();
    if ni < 2 * ng {
        return;
    }
    match bc {
        BoundaryCondition::Periodic => {
            for g in 0..ng {
                primitive[g] = primitive[ni - 2 * ng + g];
                primitive[ni - ng + g] = primitive[ng + g];
            }
        }
        BoundaryCondition::Outflow => {
            let left = primitive[ng];
            let right = primitive[ni - ng - 1];
            for g in 0..ng {
                primitive[g] = left;
                primitive[ni - ng + g] = right;
            }
        }
    }
}

/// Refresh the `NG` guard zones around a single-patch 2D domain on both
/// axes.
pub fn apply_2d<const N: usize>(primitive: &mut Array2<Vector<N>>, ng: usize, bc: BoundaryCondition) {
    let (ni, nj) = primitive.dim();
    if ni < 2 * ng || nj < 2 * ng {
        return;
    }
    match bc {
        BoundaryCondition::Periodic => {
            for j in 0..nj {
                for g in 0..ng {
                    primitive[[g, j]] = primitive[[ni - 2 * ng + g, j]];
                    primitive[[ni - ng + g, j]] = primitive[[ng + g, j]];
                }
            }
            for i in 0..ni {
                for g in 0..ng {
                    primitive[[i, g]] = primitive[[i, nj - 2 * ng + g]];
                    primitive[[i, nj - ng + g]] = primitive[[i, ng + g]];
                }
            }
        }
        BoundaryCondition::Outflow => {
            for j in 0..nj {
                let left = primitive[[ng, j]];
                let right = primitive[[ni - ng - 1, j]];
                for g in 0..ng {
                    primitive[[g, j]] = left;
                    primitive[[ni - ng + g, j]] = right;
                }
            }
            for i in 0..ni {
                let bottom = primitive[[i, ng]];
                let top = primitive[[i, nj - ng - 1]];
                for g in 0..ng {
                    primitive[[i, g]] = bottom;
                    primitive[[i, nj - ng + g]] = top;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn periodic_1d_wraps_around() {
        let mut p: Array1<Vector<1>> = Array1::from_shape_fn(8, |i| Vector([i as f64]));
        apply_1d(&mut p, 2, BoundaryCondition::Periodic);
        assert_eq!(p[0].0[0], 4.0);
        assert_eq!(p[1].0[0], 5.0);
        assert_eq!(p[6].0[0], 2.0);
        assert_eq!(p[7].0[0], 3.0);
    }

    #[test]
    fn outflow_1d_extrapolates() {
        let mut p: Array1<Vector<1>> = Array1::from_shape_fn(8, |i| Vector([i as f64]));
        apply_1d(&mut p, 2, BoundaryCondition::Outflow);
        assert_eq!(p[0].0[0], 2.0);
        assert_eq!(p[1].0[0], 2.0);
        assert_eq!(p[6].0[0], 5.0);
        assert_eq!(p[7].0[0], 5.0);
    }
}

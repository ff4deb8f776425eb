//! The per-zone fluxing strategy: each zone's update is computed from its
//! own reconstructed face states in a single fused pass, written into a
//! fresh output buffer (never in place, since a zone's neighbors still need
//! its old value). This is the only strategy available in 2D, and the 2D
//! sweep is parallelized across rows with `rayon`.

use ndarray::{Array1, Array2};
use rayon::prelude::*;

use crate::godunov::reconstruct::reconstruct_zone;
use crate::godunov::Reconstruction;
use crate::numeric::Vector;
use crate::physics::{Axis as SweepAxis, NonPhysical};

pub const NG: usize = 2;

/// One Runge-Kutta stage of a 1D per-zone update. Returns a fresh primitive
/// buffer; guard zones are copied through unchanged (the caller is
/// expected to have already applied boundary conditions to `primitive`'s
/// guard zones before calling this).
#[allow(clippy::too_many_arguments)]
pub fn advance_1d<const N: usize>(
    primitive: &Array1<Vector<N>>,
    recon: Reconstruction,
    to_conserved: impl Fn(&Vector<N>) -> Vector<N> + Sync,
    to_primitive: impl Fn(&Vector<N>) -> Result<Vector<N>, NonPhysical> + Sync,
    riemann: impl Fn(&Vector<N>, &Vector<N>) -> Vector<N> + Sync,
    dt: f64,
    dx: f64,
    urk: Option<(&Array1<Vector<N>>, f64)>,
) -> Result<Array1<Vector<N>>, NonPhysical> {
    let ni = primitive.len();
    let mut out = primitive.clone();
    if ni < 2 * NG + 1 {
        return Ok(out);
    }
    for i in NG..ni - NG {
        let zf = reconstruct_zone(
            &primitive[i - 2],
            &primitive[i - 1],
            &primitive[i],
            &primitive[i + 1],
            &primitive[i + 2],
            recon,
        );
        let fm = riemann(&zf.left.0, &zf.left.1);
        let fp = riemann(&zf.right.0, &zf.right.1);
        let du = (fp - fm) * (dt / dx);
        let mut u = to_conserved(&primitive[i]) - du;
        if let Some((urk, alpha)) = urk {
            u = u * (1.0 - alpha) + urk[i] * alpha;
        }
        out[i] = to_primitive(&u)?;
    }
    Ok(out)
}

/// One Runge-Kutta stage of a 2D per-zone update on a uniform Cartesian
/// grid, unsplit (both axes' flux divergence applied in the same stage).
/// Rows (fixed `i`) are independent of one another given the unmodified
/// input buffer, so they're processed in parallel; each row collects its
/// updated conserved states before any of them are written back.
#[allow(clippy::too_many_arguments)]
pub fn advance_2d<const N: usize>(
    primitive: &Array2<Vector<N>>,
    recon: Reconstruction,
    to_conserved: impl Fn(&Vector<N>) -> Vector<N> + Sync,
    to_primitive: impl Fn(&Vector<N>) -> Result<Vector<N>, NonPhysical> + Sync,
    riemann: impl Fn(&Vector<N>, &Vector<N>, SweepAxis) -> Vector<N> + Sync,
    dt: f64,
    dx: f64,
    dy: f64,
    urk: Option<(&Array2<Vector<N>>, f64)>,
) -> Result<Array2<Vector<N>>, NonPhysical> {
    let (ni, nj) = primitive.dim();
    let mut out = primitive.clone();
    if ni < 2 * NG + 1 || nj < 2 * NG + 1 {
        return Ok(out);
    }

    let rows: Vec<(usize, Vec<Vector<N>>)> = (NG..ni - NG)
        .into_par_iter()
        .map(|i| {
            let mut row = vec![Vector::zeros(); nj];
            for j in NG..nj - NG {
                let zx = reconstruct_zone(
                    &primitive[[i - 2, j]],
                    &primitive[[i - 1, j]],
                    &primitive[[i, j]],
                    &primitive[[i + 1, j]],
                    &primitive[[i + 2, j]],
                    recon,
                );
                let zy = reconstruct_zone(
                    &primitive[[i, j - 2]],
                    &primitive[[i, j - 1]],
                    &primitive[[i, j]],
                    &primitive[[i, j + 1]],
                    &primitive[[i, j + 2]],
                    recon,
                );
                let fxm = riemann(&zx.left.0, &zx.left.1, SweepAxis::X);
                let fxp = riemann(&zx.right.0, &zx.right.1, SweepAxis::X);
                let fym = riemann(&zy.left.0, &zy.left.1, SweepAxis::Y);
                let fyp = riemann(&zy.right.0, &zy.right.1, SweepAxis::Y);
                let du = (fxp - fxm) * (dt / dx) + (fyp - fym) * (dt / dy);
                let mut u = to_conserved(&primitive[[i, j]]) - du;
                if let Some((urk, alpha)) = urk {
                    u = u * (1.0 - alpha) + urk[[i, j]] * alpha;
                }
                row[j] = u;
            }
            (i, row)
        })
        .collect();

    for (i, row) in rows {
        for j in NG..nj - NG {
            out[[i, j]] = to_primitive(&row[j])?;
        }
    }

    Ok(out)
}

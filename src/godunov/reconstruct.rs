//! Piecewise-constant and piecewise-linear face reconstruction.
//!
//! Both the per-face and the per-zone kernels reduce to the same primitive
//! operation: given the four cell states surrounding a face, produce the
//! extrapolated state on each side of it. Per-zone reconstruction of a cell
//! is then just two overlapping calls to that one operation (one for the
//! cell's left face, one for its right), which is how `sailfish0.6.py`'s
//! `FluxPerZoneSolver` derives `plp`/`pcm`/`pcp`/`prm` from `gl`/`gc`/`gr`.

use crate::godunov::minmod::plm_gradient;
use crate::numeric::Vector;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Reconstruction {
    Pcm,
    Plm(f64),
}

impl Reconstruction {
    /// Number of guard zones this reconstruction needs on each side of the
    /// active domain. PCM only ever looks one zone either side of a face;
    /// PLM looks two.
    pub fn stencil_radius(&self) -> usize {
        match self {
            Reconstruction::Pcm => 1,
            Reconstruction::Plm(_) => 2,
        }
    }
}

/// Extrapolate the states on either side of the face between `p_i` and
/// `p_ip1`, given their immediate neighbors `p_im1` and `p_ip2`.
///
/// For PCM, the face states are just `p_i` and `p_ip1` unmodified. For PLM,
/// each side is nudged by half its zone's minmod-limited slope:
/// `pm = p_i + 0.5 * minmod(p_im1, p_i, p_ip1)`,
/// `pp = p_ip1 - 0.5 * minmod(p_i, p_ip1, p_ip2)`.
pub fn reconstruct_face<const N: usize>(
    p_im1: &Vector<N>,
    p_i: &Vector<N>,
    p_ip1: &Vector<N>,
    p_ip2: &Vector<N>,
    recon: Reconstruction,
) -> (Vector<N>, Vector<N>) {
    match recon {
        Reconstruction::Pcm => (*p_i, *p_ip1),
        Reconstruction::Plm(theta) => {
            let gm = plm_gradient(p_im1, p_i, p_ip1, theta);
            let gp = plm_gradient(p_i, p_ip1, p_ip2, theta);
            (*p_i + gm * 0.5, *p_ip1 - gp * 0.5)
        }
    }
}

/// Face states on the left and right boundary of zone `i`, derived from the
/// five-point stencil `[p_im2, p_im1, p_i, p_ip1, p_ip2]` centered on it.
pub struct ZoneFaces<const N: usize> {
    pub left: (Vector<N>, Vector<N>),
    pub right: (Vector<N>, Vector<N>),
}

pub fn reconstruct_zone<const N: usize>(
    p_im2: &Vector<N>,
    p_im1: &Vector<N>,
    p_i: &Vector<N>,
    p_ip1: &Vector<N>,
    p_ip2: &Vector<N>,
    recon: Reconstruction,
) -> ZoneFaces<N> {
    ZoneFaces {
        left: reconstruct_face(p_im2, p_im1, p_i, p_ip1, recon),
        right: reconstruct_face(p_im1, p_i, p_ip1, p_ip2, recon),
    }
}

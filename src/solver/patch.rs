//! SRHD 1D multi-patch subdivision and boundary exchange.
//!
//! Grounded directly on `srhd_1d.py`'s `Patch`/`Solver` pair: the domain is
//! split into contiguous patches that each own a guarded primitive buffer,
//! and before every stage the two guard zones at each patch edge are
//! refreshed either from the neighboring patch's interior (periodic, with
//! wraparound at the domain ends) or by extrapolating the patch's own edge
//! zone outward (outflow, only meaningful at the domain's own ends).

use crate::boundary::BoundaryCondition;
use crate::error::{Error, Result};
use crate::godunov::reconstruct::Reconstruction;
use crate::numeric::Vector;
use ndarray::Array1;

pub const NG: usize = 2;

/// One contiguous slice of the 1D domain, indexed `0..num_patches`. Owns a
/// guarded primitive buffer of its own cells plus `NG` guard zones on each
/// side, and tracks its own stage time the way `srhd_1d.py`'s `Patch` does
/// (needed because each patch can be advanced independently before guard
/// zones are re-synced).
#[derive(Clone, Debug)]
pub struct Patch {
    pub index: usize,
    pub num_patches: usize,
    /// Absolute coordinate of this patch's left edge (excluding guard
    /// zones), in comoving units; the driver scales it by `a(t)` for
    /// spherical-geometry face areas.
    pub x0: f64,
    pub primitive: Array1<Vector<4>>,
    pub time: f64,
    pub time0: f64,
}

impl Patch {
    pub fn num_interior_zones(&self) -> usize {
        self.primitive.len() - 2 * NG
    }

    /// Stage time for a Shu-Osher RK stage with blend coefficient `alpha`,
    /// following `Patch.advance_rk` literally: `t = t0*alpha + (t0+dt)*(1-alpha)`.
    pub fn stage_time(&self, alpha: f64, dt: f64) -> f64 {
        self.time0 * alpha + (self.time0 + dt) * (1.0 - alpha)
    }

    pub fn begin_step(&mut self) {
        self.time0 = self.time;
    }
}

/// Subdivide a domain of `num_zones` interior cells spanning `dx`-wide
/// zones into `num_patches` contiguous, equally-sized pieces, each padded
/// with `NG` guard zones. `num_zones` must be divisible by `num_patches`;
/// an ordinary config that doesn't satisfy this fails cleanly here rather
/// than panicking at runtime.
pub fn subdivide(num_zones: usize, num_patches: usize, dx: f64, fill: Vector<4>) -> Result<Vec<Patch>> {
    if num_patches == 0 || num_zones % num_patches != 0 {
        return Err(Error::InvalidConfiguration(format!(
            "domain size {} not divisible by patch count {}",
            num_zones, num_patches
        )));
    }
    let per_patch = num_zones / num_patches;
    Ok((0..num_patches)
        .map(|index| Patch {
            index,
            num_patches,
            x0: (index * per_patch) as f64 * dx,
            primitive: Array1::from_elem(per_patch + 2 * NG, fill),
            time: 0.0,
            time0: 0.0,
        })
        .collect())
}

/// Refresh guard zones on every patch from its neighbors' interiors (or,
/// at the domain ends, according to `bc`). Patches are addressed
/// cyclically so periodic wraparound reaches from the last patch to the
/// first and back.
pub fn exchange_guard_zones(patches: &mut [Patch], bc: BoundaryCondition) {
    let n = patches.len();
    if n == 0 {
        return;
    }
    let interiors: Vec<Array1<Vector<4>>> = patches
        .iter()
        .map(|p| {
            let ni = p.primitive.len();
            p.primitive.slice(ndarray::s![NG..ni - NG]).to_owned()
        })
        .collect();

    for i in 0..n {
        let ni = patches[i].primitive.len();
        let left_interior = &interiors[(i + n - 1) % n];
        let right_interior = &interiors[(i + 1) % n];

        // left guard zones: last NG cells of the left neighbor's interior.
        if i > 0 {
            let lo = left_interior.len() - NG;
            for g in 0..NG {
                patches[i].primitive[g] = left_interior[lo + g];
            }
        } else {
            match bc {
                BoundaryCondition::Periodic => {
                    let lo = left_interior.len() - NG;
                    for g in 0..NG {
                        patches[i].primitive[g] = left_interior[lo + g];
                    }
                }
                BoundaryCondition::Outflow => {
                    let edge = patches[i].primitive[NG];
                    for g in 0..NG {
                        patches[i].primitive[g] = edge;
                    }
                }
            }
        }

        // right guard zones: first NG cells of the right neighbor's interior.
        if i + 1 < n {
            for g in 0..NG {
                patches[i].primitive[ni - NG + g] = right_interior[g];
            }
        } else {
            match bc {
                BoundaryCondition::Periodic => {
                    for g in 0..NG {
                        patches[i].primitive[ni - NG + g] = right_interior[g];
                    }
                }
                BoundaryCondition::Outflow => {
                    let edge = patches[i].primitive[ni - NG - 1];
                    for g in 0..NG {
                        patches[i].primitive[ni - NG + g] = edge;
                    }
                }
            }
        }
    }
}

pub const DEFAULT_RECONSTRUCTION: Reconstruction = Reconstruction::Pcm;

#[cfg(test)]
mod tests {
    use super::*;

    fn fill() -> Vector<4> {
        Vector([1.0, 0.0, 0.0, 1.0])
    }

    #[test]
    fn subdivide_produces_guarded_equal_patches() {
        let patches = subdivide(100, 4, 0.01, fill()).unwrap();
        assert_eq!(patches.len(), 4);
        for (k, p) in patches.iter().enumerate() {
            assert_eq!(p.num_interior_zones(), 25);
            assert_eq!(p.primitive.len(), 25 + 2 * NG);
            assert_eq!(p.x0, k as f64 * 25.0 * 0.01);
        }
    }

    #[test]
    fn subdivide_rejects_an_indivisible_patch_count() {
        assert!(subdivide(100, 3, 0.01, fill()).is_err());
    }

    #[test]
    fn periodic_exchange_wraps_domain_ends() {
        let mut patches = subdivide(10, 2, 0.1, fill()).unwrap();
        for (p, marker) in patches.iter_mut().zip([10.0, 20.0]) {
            let ni = p.primitive.len();
            for i in NG..ni - NG {
                p.primitive[i] = Vector([marker, 0.0, 0.0, 1.0]);
            }
        }
        exchange_guard_zones(&mut patches, BoundaryCondition::Periodic);
        // patch 0's left guard should come from patch 1 (wraparound).
        assert_eq!(patches[0].primitive[0].0[0], 20.0);
        // patch 1's right guard should come from patch 0 (wraparound).
        let ni1 = patches[1].primitive.len();
        assert_eq!(patches[1].primitive[ni1 - 1].0[0], 10.0);
    }

    #[test]
    fn outflow_exchange_extrapolates_domain_ends() {
        let mut patches = subdivide(10, 1, 0.1, fill()).unwrap();
        let ni = patches[0].primitive.len();
        patches[0].primitive[NG] = Vector([7.0, 0.0, 0.0, 1.0]);
        patches[0].primitive[ni - NG - 1] = Vector([9.0, 0.0, 0.0, 1.0]);
        exchange_guard_zones(&mut patches, BoundaryCondition::Outflow);
        assert_eq!(patches[0].primitive[0].0[0], 7.0);
        assert_eq!(patches[0].primitive[ni - 1].0[0], 9.0);
    }
}

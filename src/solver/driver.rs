//! Top-level time-stepping drivers.
//!
//! One `step()` call advances the whole domain by one full time step,
//! including every Runge-Kutta stage, in the ordering: apply boundary
//! conditions, snapshot the pre-step conserved state (RK schemes only),
//! then for each stage reconstruct, flux, update, and convert back to
//! primitive, blending toward the snapshot.

use ndarray::{Array1, Array2};

use crate::boundary::{self, BoundaryCondition};
use crate::error::{Error, Result};
use crate::godunov::Reconstruction;
use crate::numeric::Vector;
use crate::physics::{Axis as SweepAxis, NonPhysical};
use crate::solver::kernel::{Fluxing, SolverKind};
use crate::solver::patch::{self, Patch};
use crate::solver::per_face;
use crate::solver::per_zone;

fn to_error(iteration: u64, time: f64, e: NonPhysical) -> Error {
    Error::NonPhysical {
        iteration,
        time,
        detail: e.0,
    }
}

/// Single-patch Euler driver, parameterized over the cell width `N`
/// (3 in 1D, 4 in 2D) so the same stepping skeleton serves both.
pub struct EulerDriver1D {
    pub kind: SolverKind,
    pub gamma: f64,
    pub dx: f64,
    pub bc: BoundaryCondition,
    pub primitive: Array1<Vector<3>>,
    pub time: f64,
    pub iteration: u64,
}

impl EulerDriver1D {
    pub fn step(&mut self, dt: f64) -> Result<()> {
        use crate::physics::euler::{riemann_hlle_1d, Conserved1D, Primitive1D};
        let gamma = self.gamma;
        let recon = self.kind.reconstruction;
        let to_conserved = |p: &Vector<3>| Primitive1D(*p).to_conserved(gamma).0;
        let to_primitive = |u: &Vector<3>| Conserved1D(*u).to_primitive(gamma).map(|p| p.0);
        let riemann = |pl: &Vector<3>, pr: &Vector<3>| {
            riemann_hlle_1d(&Primitive1D(*pl), &Primitive1D(*pr), gamma).0
        };

        boundary::apply_1d(&mut self.primitive, per_face::NG, self.bc);
        let urk = if self.kind.time_integration.needs_snapshot() {
            Some(self.primitive.map(|p| to_conserved(p)))
        } else {
            None
        };

        for &alpha in self.kind.time_integration.stages() {
            boundary::apply_1d(&mut self.primitive, per_face::NG, self.bc);
            match self.kind.fluxing {
                Fluxing::PerFace => {
                    let mut conserved = self.primitive.map(|p| to_conserved(p));
                    let flux = per_face::compute_godunov_fluxes(&self.primitive, recon, riemann);
                    per_face::update_conserved(&mut conserved, &flux, dt, self.dx, urk.as_ref().map(|u| (u, alpha)));
                    let mut next = self.primitive.clone();
                    for i in per_face::NG..conserved.len() - per_face::NG {
                        next[i] = to_primitive(&conserved[i]).map_err(|e| to_error(self.iteration, self.time, e))?;
                    }
                    self.primitive = next;
                }
                Fluxing::PerZone => {
                    self.primitive = per_zone::advance_1d(
                        &self.primitive,
                        recon,
                        to_conserved,
                        to_primitive,
                        riemann,
                        dt,
                        self.dx,
                        urk.as_ref().map(|u| (u, alpha)),
                    )
                    .map_err(|e| to_error(self.iteration, self.time, e))?;
                }
            }
        }

        self.time += dt;
        self.iteration += 1;
        Ok(())
    }
}

/// Single-patch Euler driver in 2D. Only `Fluxing::PerZone` is valid here;
/// `SolverKind::select` already rejects the other combination.
pub struct EulerDriver2D {
    pub kind: SolverKind,
    pub gamma: f64,
    pub dx: f64,
    pub dy: f64,
    pub bc: BoundaryCondition,
    pub primitive: Array2<Vector<4>>,
    pub time: f64,
    pub iteration: u64,
}

impl EulerDriver2D {
    pub fn step(&mut self, dt: f64) -> Result<()> {
        use crate::physics::euler::{riemann_hlle_2d, Conserved2D, Primitive2D};
        let gamma = self.gamma;
        let recon = self.kind.reconstruction;
        let to_conserved = |p: &Vector<4>| Primitive2D(*p).to_conserved(gamma).0;
        let to_primitive = |u: &Vector<4>| Conserved2D(*u).to_primitive(gamma).map(|p| p.0);
        let riemann = |pl: &Vector<4>, pr: &Vector<4>, axis: SweepAxis| {
            riemann_hlle_2d(&Primitive2D(*pl), &Primitive2D(*pr), axis, gamma).0
        };

        boundary::apply_2d(&mut self.primitive, per_zone::NG, self.bc);
        let urk = if self.kind.time_integration.needs_snapshot() {
            Some(self.primitive.map(|p| to_conserved(p)))
        } else {
            None
        };

        for &alpha in self.kind.time_integration.stages() {
            boundary::apply_2d(&mut self.primitive, per_zone::NG, self.bc);
            self.primitive = per_zone::advance_2d(
                &self.primitive,
                recon,
                to_conserved,
                to_primitive,
                riemann,
                dt,
                self.dx,
                self.dy,
                urk.as_ref().map(|u| (u, alpha)),
            )
            .map_err(|e| to_error(self.iteration, self.time, e))?;
        }

        self.time += dt;
        self.iteration += 1;
        Ok(())
    }
}

/// SRHD 1D multi-patch driver. Each patch is advanced with the same
/// per-zone kernel the Euler system uses (`per_zone::advance_1d`); what
/// differs is the physics closures and the guard-zone exchange, which
/// pulls from neighboring patches instead of wrapping a single buffer.
pub struct SrhdDriver1D {
    pub patches: Vec<Patch>,
    pub gamma: f64,
    pub dx: f64,
    pub bc: BoundaryCondition,
    pub recon: Reconstruction,
    pub time_integration: crate::solver::rk::TimeIntegration,
    pub coordinates: crate::physics::srhd::Coordinates,
    pub scale_factor0: f64,
    pub scale_factor_dot: f64,
    pub iteration: u64,
}

impl SrhdDriver1D {
    pub fn step(&mut self, dt: f64) -> Result<()> {
        use crate::physics::srhd::{srhd_1d_primitive_to_conserved, srhd_1d_advance_rk, Primitive};
        let gamma = self.gamma;
        let to_conserved = |p: &Vector<4>| srhd_1d_primitive_to_conserved(&Primitive(*p), gamma).0;

        for p in &mut self.patches {
            p.begin_step();
        }

        let urk: Option<Vec<Array1<Vector<4>>>> = if self.time_integration.needs_snapshot() {
            Some(self.patches.iter().map(|p| p.primitive.map(|x| to_conserved(x))).collect())
        } else {
            None
        };

        for &alpha in self.time_integration.stages() {
            patch::exchange_guard_zones(&mut self.patches, self.bc);

            for (i, p) in self.patches.iter_mut().enumerate() {
                let urk_i = urk.as_ref().map(|snaps| (&snaps[i], alpha));
                let stage_time = p.stage_time(alpha, dt);
                p.primitive = srhd_1d_advance_rk(
                    &p.primitive,
                    self.recon,
                    gamma,
                    self.scale_factor0,
                    self.scale_factor_dot,
                    stage_time,
                    dt,
                    self.dx,
                    p.x0,
                    self.coordinates,
                    urk_i,
                )
                .map_err(|e| to_error(self.iteration, p.time, e))?;
                p.time = stage_time;
            }
        }

        self.iteration += 1;
        Ok(())
    }

    pub fn time(&self) -> f64 {
        self.patches.first().map(|p| p.time).unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::euler::Primitive1D;
    use crate::solver::kernel::{Dimension, SolverKind};
    use crate::solver::rk::TimeIntegration;

    fn uniform_driver(fluxing: Fluxing, ti: TimeIntegration) -> EulerDriver1D {
        let kind = SolverKind::select(Dimension::One, fluxing, Reconstruction::Pcm, ti).unwrap();
        let primitive = Array1::from_elem(20, Primitive1D::new(1.0, 0.0, 1.0).0);
        EulerDriver1D {
            kind,
            gamma: 5.0 / 3.0,
            dx: 1.0 / 16.0,
            bc: BoundaryCondition::Periodic,
            primitive,
            time: 0.0,
            iteration: 0,
        }
    }

    #[test]
    fn uniform_state_is_a_fixed_point_per_face_fwd() {
        let mut d = uniform_driver(Fluxing::PerFace, TimeIntegration::Fwd);
        let before = d.primitive.clone();
        d.step(1e-3).unwrap();
        for i in per_face::NG..d.primitive.len() - per_face::NG {
            for k in 0..3 {
                assert!((d.primitive[i][k] - before[i][k]).abs() < 1e-10);
            }
        }
    }

    #[test]
    fn uniform_state_is_a_fixed_point_per_zone_rk3() {
        let mut d = uniform_driver(Fluxing::PerZone, TimeIntegration::Rk3);
        let before = d.primitive.clone();
        d.step(1e-3).unwrap();
        for i in per_zone::NG..d.primitive.len() - per_zone::NG {
            for k in 0..3 {
                assert!((d.primitive[i][k] - before[i][k]).abs() < 1e-8);
            }
        }
    }

    #[test]
    fn srhd_uniform_state_is_a_fixed_point_cartesian() {
        use crate::physics::srhd::{Coordinates, Primitive};

        let patches = patch::subdivide(40, 2, 0.1, Primitive::new(1.0, 0.0, 0.0, 1.0).0).unwrap();
        let mut d = SrhdDriver1D {
            patches,
            gamma: 4.0 / 3.0,
            dx: 0.1,
            bc: BoundaryCondition::Periodic,
            recon: Reconstruction::Pcm,
            time_integration: crate::solver::rk::TimeIntegration::Rk2,
            coordinates: Coordinates::Cartesian,
            scale_factor0: 1.0,
            scale_factor_dot: 0.0,
            iteration: 0,
        };
        let before: Vec<_> = d.patches.iter().map(|p| p.primitive.clone()).collect();
        d.step(1e-3).unwrap();
        for (p, b) in d.patches.iter().zip(&before) {
            for i in patch::NG..p.primitive.len() - patch::NG {
                for k in 0..4 {
                    assert!((p.primitive[i][k] - b[i][k]).abs() < 1e-8);
                }
            }
        }
    }

    #[test]
    fn srhd_uniform_state_is_a_fixed_point_spherical() {
        use crate::physics::srhd::{Coordinates, Primitive};

        let patches = patch::subdivide(40, 1, 0.1, Primitive::new(1.0, 0.0, 0.0, 1.0).0).unwrap();
        let mut d = SrhdDriver1D {
            patches,
            gamma: 4.0 / 3.0,
            dx: 0.1,
            bc: BoundaryCondition::Outflow,
            recon: Reconstruction::Pcm,
            time_integration: crate::solver::rk::TimeIntegration::Fwd,
            coordinates: Coordinates::Spherical,
            scale_factor0: 1.0,
            scale_factor_dot: 0.0,
            iteration: 0,
        };
        let before = d.patches[0].primitive.clone();
        d.step(1e-4).unwrap();
        for i in patch::NG..d.patches[0].primitive.len() - patch::NG {
            for k in 0..4 {
                assert!((d.patches[0].primitive[i][k] - before[i][k]).abs() < 1e-8);
            }
        }
    }

    #[test]
    fn dt_zero_is_idempotent() {
        let mut d = uniform_driver(Fluxing::PerZone, TimeIntegration::Rk2);
        d.primitive[10] = Primitive1D::new(2.0, 0.3, 1.5).0;
        let before = d.primitive.clone();
        d.step(0.0).unwrap();
        for i in 0..d.primitive.len() {
            for k in 0..3 {
                assert!((d.primitive[i][k] - before[i][k]).abs() < 1e-9);
            }
        }
    }
}

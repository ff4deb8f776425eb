//! Ideal gas-law Euler equations in one and two dimensions.
//!
//! Mirrors the shape of the teacher's `hydro_euler::euler_2d` call site in
//! `physics/newtonian_hydro.rs`: a primitive/conserved pair, a gamma-law
//! index carried alongside them, and a Riemann solver keyed on the sweep
//! axis. The 1D system is kept distinct from the 2D one (rather than a
//! zero-padded 2D special case) because the per-face 1D kernel needs a
//! 3-wide cell and the 2D kernel a 4-wide one.

use ndarray::{Array1, Array2};

use crate::numeric::Vector;
use crate::physics::{Axis, NonPhysical, PResult, DEFAULT_GAMMA};
use crate::traits::{Arithmetic, Conserved, Primitive, Zeros};

// ============================================================================
// 1D: (rho, vx, p) <-> (rho, rho*vx, E)
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Primitive1D(pub Vector<3>);

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Conserved1D(pub Vector<3>);

impl Primitive1D {
    pub fn new(rho: f64, vx: f64, p: f64) -> Self {
        Self(Vector([rho, vx, p]))
    }
    pub fn rho(&self) -> f64 {
        self.0[0]
    }
    pub fn vx(&self) -> f64 {
        self.0[1]
    }
    pub fn p(&self) -> f64 {
        self.0[2]
    }

    pub fn sound_speed(&self, gamma: f64) -> f64 {
        (gamma * self.p() / self.rho()).sqrt()
    }

    pub fn to_conserved(&self, gamma: f64) -> Conserved1D {
        let rho = self.rho();
        let vx = self.vx();
        let p = self.p();
        let e = p / (gamma - 1.0) + 0.5 * rho * vx * vx;
        Conserved1D(Vector([rho, rho * vx, e]))
    }
}

impl Conserved1D {
    pub fn to_primitive(&self, gamma: f64) -> PResult<Primitive1D> {
        let rho = self.0[0];
        if !(rho > 0.0) {
            return Err(NonPhysical(format!("non-positive density {}", rho)));
        }
        let vx = self.0[1] / rho;
        let kinetic = 0.5 * rho * vx * vx;
        let p = (gamma - 1.0) * (self.0[2] - kinetic);
        if !(p > 0.0) {
            return Err(NonPhysical(format!("non-positive pressure {}", p)));
        }
        Ok(Primitive1D::new(rho, vx, p))
    }

    pub fn flux(&self, gamma: f64) -> PResult<Conserved1D> {
        let p = self.to_primitive(gamma)?;
        Ok(self.flux_given(&p))
    }

    fn flux_given(&self, p: &Primitive1D) -> Conserved1D {
        let mx = self.0[1];
        let e = self.0[2];
        Conserved1D(Vector([mx, mx * p.vx() + p.p(), (e + p.p()) * p.vx()]))
    }
}

impl Zeros for Conserved1D {
    fn zeros() -> Self {
        Self(Vector::zeros())
    }
}
impl Arithmetic for Conserved1D {}
impl std::ops::Add for Conserved1D {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}
impl std::ops::Sub for Conserved1D {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}
impl std::ops::Mul<f64> for Conserved1D {
    type Output = Self;
    fn mul(self, s: f64) -> Self {
        Self(self.0 * s)
    }
}
impl std::ops::Div<f64> for Conserved1D {
    type Output = Self;
    fn div(self, s: f64) -> Self {
        Self(self.0 / s)
    }
}
impl Conserved for Conserved1D {
    fn density(&self) -> f64 {
        self.0[0]
    }
}
impl Primitive for Primitive1D {
    fn mass_density(&self) -> f64 {
        self.rho()
    }
    fn gas_pressure(&self) -> f64 {
        self.p()
    }
}

// ============================================================================
// 2D: (rho, vx, vy, p) <-> (rho, rho*vx, rho*vy, E)
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Primitive2D(pub Vector<4>);

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Conserved2D(pub Vector<4>);

impl Primitive2D {
    pub fn new(rho: f64, vx: f64, vy: f64, p: f64) -> Self {
        Self(Vector([rho, vx, vy, p]))
    }
    pub fn rho(&self) -> f64 {
        self.0[0]
    }
    pub fn vx(&self) -> f64 {
        self.0[1]
    }
    pub fn vy(&self) -> f64 {
        self.0[2]
    }
    pub fn p(&self) -> f64 {
        self.0[3]
    }

    pub fn velocity_along(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.vx(),
            Axis::Y => self.vy(),
        }
    }

    pub fn sound_speed(&self, gamma: f64) -> f64 {
        (gamma * self.p() / self.rho()).sqrt()
    }

    pub fn to_conserved(&self, gamma: f64) -> Conserved2D {
        let rho = self.rho();
        let (vx, vy, p) = (self.vx(), self.vy(), self.p());
        let e = p / (gamma - 1.0) + 0.5 * rho * (vx * vx + vy * vy);
        Conserved2D(Vector([rho, rho * vx, rho * vy, e]))
    }
}

impl Conserved2D {
    pub fn to_primitive(&self, gamma: f64) -> PResult<Primitive2D> {
        let rho = self.0[0];
        if !(rho > 0.0) {
            return Err(NonPhysical(format!("non-positive density {}", rho)));
        }
        let vx = self.0[1] / rho;
        let vy = self.0[2] / rho;
        let kinetic = 0.5 * rho * (vx * vx + vy * vy);
        let p = (gamma - 1.0) * (self.0[3] - kinetic);
        if !(p > 0.0) {
            return Err(NonPhysical(format!("non-positive pressure {}", p)));
        }
        Ok(Primitive2D::new(rho, vx, vy, p))
    }

    pub fn flux(&self, axis: Axis, gamma: f64) -> PResult<Conserved2D> {
        let p = self.to_primitive(gamma)?;
        Ok(flux_2d(&p, axis, gamma))
    }
}

fn flux_2d(p: &Primitive2D, axis: Axis, gamma: f64) -> Conserved2D {
    let e = p.to_conserved(gamma).0[3];
    let rho = p.rho();
    let (vx, vy) = (p.vx(), p.vy());
    match axis {
        Axis::X => Conserved2D(Vector([
            rho * vx,
            rho * vx * vx + p.p(),
            rho * vx * vy,
            (e + p.p()) * vx,
        ])),
        Axis::Y => Conserved2D(Vector([
            rho * vy,
            rho * vy * vx,
            rho * vy * vy + p.p(),
            (e + p.p()) * vy,
        ])),
    }
}

impl Zeros for Conserved2D {
    fn zeros() -> Self {
        Self(Vector::zeros())
    }
}
impl Arithmetic for Conserved2D {}
impl std::ops::Add for Conserved2D {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}
impl std::ops::Sub for Conserved2D {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}
impl std::ops::Mul<f64> for Conserved2D {
    type Output = Self;
    fn mul(self, s: f64) -> Self {
        Self(self.0 * s)
    }
}
impl std::ops::Div<f64> for Conserved2D {
    type Output = Self;
    fn div(self, s: f64) -> Self {
        Self(self.0 / s)
    }
}
impl Conserved for Conserved2D {
    fn density(&self) -> f64 {
        self.0[0]
    }
}
impl Primitive for Primitive2D {
    fn mass_density(&self) -> f64 {
        self.rho()
    }
    fn gas_pressure(&self) -> f64 {
        self.p()
    }
}

// ============================================================================
// HLLE Riemann solver
// ============================================================================

/// Einfeldt wave-speed bounds: `S_L = min(v_L - c_L, v_R - c_R)`,
/// `S_R = max(v_L + c_L, v_R + c_R)`.
fn wave_speeds(vl: f64, cl: f64, vr: f64, cr: f64) -> (f64, f64) {
    ((vl - cl).min(vr - cr), (vl + cl).max(vr + cr))
}

/// HLLE flux for the 1D system. The sweep axis is always x.
pub fn riemann_hlle_1d(pl: &Primitive1D, pr: &Primitive1D, gamma: f64) -> Conserved1D {
    let (sl, sr) = wave_speeds(pl.vx(), pl.sound_speed(gamma), pr.vx(), pr.sound_speed(gamma));
    let ul = pl.to_conserved(gamma);
    let ur = pr.to_conserved(gamma);
    let fl = ul.flux_given(pl);
    let fr = ur.flux_given(pr);

    if sl >= 0.0 {
        fl
    } else if sr <= 0.0 {
        fr
    } else {
        (fl * sr - fr * sl + (ur - ul) * (sl * sr)) / (sr - sl)
    }
}

/// HLLE flux for the 2D system along the given sweep axis.
pub fn riemann_hlle_2d(pl: &Primitive2D, pr: &Primitive2D, axis: Axis, gamma: f64) -> Conserved2D {
    let (vl, vr) = (pl.velocity_along(axis), pr.velocity_along(axis));
    let (sl, sr) = wave_speeds(vl, pl.sound_speed(gamma), vr, pr.sound_speed(gamma));
    let ul = pl.to_conserved(gamma);
    let ur = pr.to_conserved(gamma);
    let fl = flux_2d(pl, axis, gamma);
    let fr = flux_2d(pr, axis, gamma);

    if sl >= 0.0 {
        fl
    } else if sr <= 0.0 {
        fr
    } else {
        (fl * sr - fr * sl + (ur - ul) * (sl * sr)) / (sr - sl)
    }
}

/// Largest signal speed `|v| + c_s` anywhere on the 1D grid, used to pick a
/// CFL-limited time step.
pub fn max_wave_speed_1d(primitive: &Array1<Vector<3>>, gamma: f64) -> f64 {
    primitive
        .iter()
        .map(|p| {
            let p = Primitive1D(*p);
            p.vx().abs() + p.sound_speed(gamma)
        })
        .fold(0.0, f64::max)
}

/// Largest signal speed anywhere on the 2D grid, over both axes.
pub fn max_wave_speed_2d(primitive: &Array2<Vector<4>>, gamma: f64) -> f64 {
    primitive
        .iter()
        .map(|p| {
            let p = Primitive2D(*p);
            let c = p.sound_speed(gamma);
            (p.vx().abs() + c).max(p.vy().abs() + c)
        })
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prim_cons_roundtrip_1d() {
        let p = Primitive1D::new(1.0, 0.25, 2.0);
        let u = p.to_conserved(DEFAULT_GAMMA);
        let p2 = u.to_primitive(DEFAULT_GAMMA).unwrap();
        assert!((p.rho() - p2.rho()).abs() < 1e-12);
        assert!((p.vx() - p2.vx()).abs() < 1e-12);
        assert!((p.p() - p2.p()).abs() < 1e-12);
    }

    #[test]
    fn prim_cons_roundtrip_2d() {
        let p = Primitive2D::new(1.2, 0.1, -0.3, 0.8);
        let u = p.to_conserved(DEFAULT_GAMMA);
        let p2 = u.to_primitive(DEFAULT_GAMMA).unwrap();
        assert!((p.rho() - p2.rho()).abs() < 1e-12);
        assert!((p.vx() - p2.vx()).abs() < 1e-12);
        assert!((p.vy() - p2.vy()).abs() < 1e-12);
        assert!((p.p() - p2.p()).abs() < 1e-12);
    }

    #[test]
    fn negative_density_is_non_physical() {
        let u = Conserved1D(Vector([-1.0, 0.0, 1.0]));
        assert!(u.to_primitive(DEFAULT_GAMMA).is_err());
    }

    #[test]
    fn riemann_of_identical_states_matches_either_flux() {
        let p = Primitive1D::new(1.0, 0.0, 1.0);
        let f = riemann_hlle_1d(&p, &p, DEFAULT_GAMMA);
        let direct = p.to_conserved(DEFAULT_GAMMA).flux_given(&p);
        assert!((f.0[0] - direct.0[0]).abs() < 1e-12);
        assert!((f.0[1] - direct.0[1]).abs() < 1e-12);
        assert!((f.0[2] - direct.0[2]).abs() < 1e-12);
    }

    #[test]
    fn supersonic_flow_picks_upwind_flux() {
        // very large leftward velocity puts both wave speeds negative.
        let pl = Primitive1D::new(1.0, -10.0, 1.0);
        let pr = Primitive1D::new(1.0, -10.0, 1.0);
        let f = riemann_hlle_1d(&pl, &pr, DEFAULT_GAMMA);
        let fr = pr.to_conserved(DEFAULT_GAMMA).flux_given(&pr);
        assert!((f.0[0] - fr.0[0]).abs() < 1e-10);
    }

    #[test]
    fn max_wave_speed_picks_out_the_fastest_zone() {
        let mut prim = Array1::from_elem(4, Primitive1D::new(1.0, 0.0, 1.0).0);
        prim[2] = Primitive1D::new(1.0, 2.0, 1.0).0;
        let fast = max_wave_speed_1d(&prim, DEFAULT_GAMMA);
        let slow = max_wave_speed_1d(&Array1::from_elem(4, Primitive1D::new(1.0, 0.0, 1.0).0), DEFAULT_GAMMA);
        assert!(fast > slow);
    }
}

use sailfish::boundary::BoundaryCondition;
use sailfish::config::Configuration;
use sailfish::godunov::Reconstruction;
use sailfish::initial_data::InitialData;
use sailfish::mesh::Mesh1D;
use sailfish::physics::euler::max_wave_speed_1d;
use sailfish::solver::driver::EulerDriver1D;
use sailfish::solver::kernel::{Dimension, Fluxing, SolverKind};
use sailfish::solver::rk::TimeIntegration;

const GAMMA: f64 = 5.0 / 3.0;

fn make_driver(fluxing: Fluxing, recon: Reconstruction, ti: TimeIntegration, n: usize) -> EulerDriver1D {
    let mesh = Mesh1D::new(n);
    let kind = SolverKind::select(Dimension::One, fluxing, recon, ti).unwrap();
    EulerDriver1D {
        kind,
        gamma: GAMMA,
        dx: mesh.dx(),
        bc: BoundaryCondition::Outflow,
        primitive: InitialData::Shocktube.primitive_1d(&mesh).unwrap(),
        time: 0.0,
        iteration: 0,
    }
}

fn run_to(driver: &mut EulerDriver1D, final_time: f64, cfl: f64) {
    while driver.time < final_time {
        let speed = max_wave_speed_1d(&driver.primitive, GAMMA);
        let dt = (cfl * driver.dx / speed.max(1e-9)).min(final_time - driver.time);
        driver.step(dt).unwrap();
    }
}

#[test]
fn sod_shocktube_stays_physical_and_develops_structure() {
    let mut driver = make_driver(Fluxing::PerZone, Reconstruction::Pcm, TimeIntegration::Rk2, 400);
    run_to(&mut driver, 0.1, 0.4);

    for p in driver.primitive.iter() {
        assert!(p.is_finite());
        assert!(p[0] > 0.0, "density went non-positive");
        assert!(p[2] > 0.0, "pressure went non-positive");
    }

    // A shock and rarefaction should have smeared the initial jump: not
    // every interior cell is still at one of the two initial states.
    let distinct = driver
        .primitive
        .iter()
        .filter(|p| (p[0] - 1.0).abs() > 1e-6 && (p[0] - 0.1).abs() > 1e-6)
        .count();
    assert!(distinct > 10);
}

#[test]
fn per_face_and_per_zone_agree_on_pcm_fwd() {
    let mut face = make_driver(Fluxing::PerFace, Reconstruction::Pcm, TimeIntegration::Fwd, 200);
    let mut zone = make_driver(Fluxing::PerZone, Reconstruction::Pcm, TimeIntegration::Fwd, 200);

    for _ in 0..20 {
        face.step(1e-5).unwrap();
        zone.step(1e-5).unwrap();
    }

    for i in 0..face.primitive.len() {
        for k in 0..3 {
            assert!(
                (face.primitive[i][k] - zone.primitive[i][k]).abs() < 1e-9,
                "per-face and per-zone diverged at zone {} component {}",
                i,
                k
            );
        }
    }
}

#[test]
fn plm_reduces_to_pcm_result_on_a_flat_region() {
    // Away from the shocktube's discontinuity the slopes are all zero, so
    // PLM and PCM should give identical short-time evolution there.
    let mut pcm = make_driver(Fluxing::PerZone, Reconstruction::Pcm, TimeIntegration::Fwd, 100);
    let mut plm = make_driver(Fluxing::PerZone, Reconstruction::Plm(1.5), TimeIntegration::Fwd, 100);

    pcm.step(1e-5).unwrap();
    plm.step(1e-5).unwrap();

    // zones far from the midpoint discontinuity (index 50) are flat.
    for i in 10..40 {
        for k in 0..3 {
            assert!((pcm.primitive[i][k] - plm.primitive[i][k]).abs() < 1e-12);
        }
    }
}

#[test]
fn higher_order_rk_is_no_less_accurate_than_forward_euler() {
    // On a flat state (no gradients anywhere) all time integrators must
    // leave the solution exactly alone, regardless of stage count.
    let n = 50;
    for ti in [TimeIntegration::Fwd, TimeIntegration::Rk1, TimeIntegration::Rk2, TimeIntegration::Rk3] {
        let mesh = Mesh1D::new(n);
        let kind = SolverKind::select(Dimension::One, Fluxing::PerZone, Reconstruction::Pcm, ti).unwrap();
        let primitive =
            ndarray::Array1::from_elem(n + 2 * sailfish::solver::per_zone::NG, sailfish::numeric::Vector([1.0, 0.0, 1.0]));
        let mut driver = EulerDriver1D {
            kind,
            gamma: GAMMA,
            dx: mesh.dx(),
            bc: BoundaryCondition::Periodic,
            primitive: primitive.clone(),
            time: 0.0,
            iteration: 0,
        };
        driver.step(1e-3).unwrap();
        for i in 0..driver.primitive.len() {
            for k in 0..3 {
                assert!((driver.primitive[i][k] - primitive[i][k]).abs() < 1e-9);
            }
        }
    }
}

#[test]
fn configuration_overrides_merge_onto_defaults() {
    let config = Configuration::from_overrides(&[
        "driver.reconstruction=plm".to_string(),
        "driver.tfinal=0.2".to_string(),
    ])
    .unwrap();
    assert_eq!(config.driver.tfinal, 0.2);
    matches!(config.driver.reconstruction().unwrap(), Reconstruction::Plm(_));
}

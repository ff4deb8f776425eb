use clap::Clap;

use sailfish::backend;
use sailfish::cli::{self, Command, Opts};
use sailfish::config::{Configuration, Physics};
use sailfish::error::Result;
use sailfish::io::{self, Checkpoint};
use sailfish::mesh::{Mesh1D, Mesh2D};
use sailfish::physics::euler::{max_wave_speed_1d, max_wave_speed_2d};
use sailfish::physics::srhd::Primitive as SrhdPrimitive;
use sailfish::reporter;
use sailfish::solver::driver::{EulerDriver1D, EulerDriver2D, SrhdDriver1D};
use sailfish::solver::kernel::{Dimension, Fluxing, SolverKind};
use sailfish::solver::patch;
use sailfish::state::{AnyPrimitive, State};
use sailfish::tasks::Tasks;

fn cfl_time_step(dx: f64, cfl: f64, max_wave_speed: f64) -> f64 {
    cfl * dx / max_wave_speed.max(1e-12)
}

fn run_euler_1d(config: &Configuration, gamma: f64, mut tasks: Tasks, resume: Option<(u64, f64, ndarray::Array1<sailfish::numeric::Vector<3>>)>) -> Result<()> {
    let mesh = Mesh1D::new(config.driver.resolution);
    let kind = SolverKind::select(
        Dimension::One,
        config.driver.fluxing,
        config.driver.reconstruction()?,
        config.driver.time_integration,
    )?;
    let bc = config.mesh.boundary_condition()?;

    let (iteration, time, primitive) = match resume {
        Some(r) => r,
        None => (0, config.control.start_time, config.initial_data.primitive_1d(&mesh)?),
    };

    let mut driver = EulerDriver1D {
        kind,
        gamma,
        dx: mesh.dx(),
        bc,
        primitive,
        time,
        iteration,
    };

    while driver.time < config.driver.tfinal {
        let max_speed = max_wave_speed_1d(&driver.primitive, gamma);
        let dt = cfl_time_step(driver.dx, config.solver.cfl_number, max_speed).min(config.driver.tfinal - driver.time);
        driver.step(dt)?;

        if tasks.report_progress.is_due(driver.iteration) {
            let elapsed = tasks.report_progress.elapsed_secs();
            let state = State::new(driver.iteration, driver.time, AnyPrimitive::Euler1D(driver.primitive.clone()));
            reporter::report_progress(&state, config.driver.fold, elapsed);
            tasks.report_progress.advance();
        }

        if tasks.write_checkpoint.is_due(driver.time) {
            let state = State::new(driver.iteration, driver.time, AnyPrimitive::Euler1D(driver.primitive.clone()));
            let checkpoint = Checkpoint {
                state,
                tasks: tasks.clone(),
                config: config.clone(),
                version: git_version::git_version!(prefix = "v").to_string(),
            };
            let path = format!("{}/chkpt.{:04}.cbor", config.control.output_directory, tasks.write_checkpoint.count());
            io::write_checkpoint(&path, &checkpoint)?;
            tasks.write_checkpoint.advance(config.control.checkpoint_interval);
        }
    }
    Ok(())
}

fn run_euler_2d(config: &Configuration, gamma: f64, mut tasks: Tasks) -> Result<()> {
    let mesh = Mesh2D::centered_square(config.driver.resolution, 0, 1);
    let kind = SolverKind::select(
        Dimension::Two,
        Fluxing::PerZone,
        config.driver.reconstruction()?,
        config.driver.time_integration,
    )?;
    let bc = config.mesh.boundary_condition()?;
    let primitive = config.initial_data.primitive_2d(&mesh)?;

    let mut driver = EulerDriver2D {
        kind,
        gamma,
        dx: mesh.dx,
        dy: mesh.dy,
        bc,
        primitive,
        time: config.control.start_time,
        iteration: 0,
    };

    while driver.time < config.driver.tfinal {
        let max_speed = max_wave_speed_2d(&driver.primitive, gamma);
        let dt = cfl_time_step(driver.dx.min(driver.dy), config.solver.cfl_number, max_speed)
            .min(config.driver.tfinal - driver.time);
        driver.step(dt)?;

        if tasks.report_progress.is_due(driver.iteration) {
            let elapsed = tasks.report_progress.elapsed_secs();
            let state = State::new(driver.iteration, driver.time, AnyPrimitive::Euler2D(driver.primitive.clone()));
            reporter::report_progress(&state, config.driver.fold, elapsed);
            tasks.report_progress.advance();
        }
    }
    Ok(())
}

fn run_srhd_1d(config: &Configuration, gamma: f64, num_patches: usize, coordinates: sailfish::physics::srhd::Coordinates, scale_factor0: f64, scale_factor_dot: f64, mut tasks: Tasks) -> Result<()> {
    let mesh = Mesh1D::new(config.driver.resolution);
    let bc = config.mesh.boundary_condition()?;
    let fill = SrhdPrimitive::new(0.1, 0.0, 0.0, 0.125).0;
    let patches = patch::subdivide(config.driver.resolution, num_patches, mesh.dx(), fill)?;

    let mut driver = SrhdDriver1D {
        patches,
        gamma,
        dx: mesh.dx(),
        bc,
        recon: config.driver.reconstruction()?,
        time_integration: config.driver.time_integration,
        coordinates,
        scale_factor0,
        scale_factor_dot,
        iteration: 0,
    };

    while driver.time() < config.driver.tfinal {
        let max_speed = driver
            .patches
            .iter()
            .map(|p| sailfish::physics::srhd::max_wave_speed_1d(&p.primitive, gamma))
            .fold(0.0, f64::max);
        let dt = cfl_time_step(driver.dx, config.solver.cfl_number, max_speed).min(config.driver.tfinal - driver.time());
        driver.step(dt)?;

        if tasks.report_progress.is_due(driver.iteration) {
            let elapsed = tasks.report_progress.elapsed_secs();
            log::info!("[{:05}] t={:.6} ({:.3} iter/s)", driver.iteration, driver.time(), 1.0 / elapsed.max(1e-9));
            tasks.report_progress.advance();
        }
    }
    Ok(())
}

fn run(configs: &[String], checkpoint: Option<String>) -> Result<()> {
    let (mut config, tasks, resume) = match &checkpoint {
        Some(path) => {
            let chk = io::read_checkpoint(path)?;
            let resume = match chk.state.primitive {
                AnyPrimitive::Euler1D(p) => Some((chk.state.iteration, chk.state.time, p)),
                _ => None,
            };
            (chk.config, chk.tasks, resume)
        }
        None => (Configuration::default(), Tasks::new(100), None),
    };
    config.patch_from(configs)?;
    config.validate()?;
    backend::select_backend(config.driver.exec_mode)?;

    match &config.physics {
        Physics::Srhd {
            gamma_law_index,
            num_patches,
            coordinates,
            scale_factor0,
            scale_factor_dot,
        } => run_srhd_1d(&config, *gamma_law_index, *num_patches, *coordinates, *scale_factor0, *scale_factor_dot, tasks),
        Physics::Euler { gamma_law_index } => match config.driver.dim {
            1 => run_euler_1d(&config, *gamma_law_index, tasks, resume),
            2 => run_euler_2d(&config, *gamma_law_index, tasks),
            n => Err(sailfish::error::Error::UnsupportedConfiguration(format!(
                "unsupported driver.dim {}",
                n
            ))),
        },
    }
}

fn main() {
    simple_logger::SimpleLogger::new().init().ok();
    let opts = Opts::parse();

    let result = match opts.command {
        Command::ShowConfig { configs, format, defaults } => cli::show_config(&configs, &format, defaults),
        Command::Run { configs, checkpoint, driver } => {
            let mut all_configs = configs;
            all_configs.extend(driver.as_overrides());
            run(&all_configs, checkpoint)
        }
    };

    if let Err(e) = result {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

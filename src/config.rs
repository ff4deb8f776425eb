//! The user-facing configuration schema, and the YAML/JSON + command-line
//! override pipeline that builds one. Shaped after the teacher's own
//! `Configuration`/`Control` split, with a flat `driver` section mirroring
//! `sailfish0.6.py`'s `driver()` entry point (`exec_mode`, `resolution`,
//! `tfinal`, `fluxing`, `reconstruction`, `plm_theta`, `time_integration`,
//! `dim`, `fold`, `plot`) rather than scattering those knobs across `mesh`
//! and `solver`. Everything is merged with [`crate::yaml_patch::Patch`]
//! rather than hand-rolled section-by-section parsing.

use serde::{Deserialize, Serialize};

use crate::backend::ExecMode;
use crate::boundary::BoundaryCondition;
use crate::error::{Error, Result};
use crate::godunov::Reconstruction;
use crate::initial_data::InitialData;
use crate::physics::srhd::Coordinates;
use crate::solver::kernel::{Dimension, Fluxing};
use crate::solver::rk::TimeIntegration;
use crate::yaml_patch::Patch;

/// Which physical system this run solves, and its system-specific knobs.
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "system", rename_all = "snake_case")]
pub enum Physics {
    Euler {
        #[serde(default = "default_gamma")]
        gamma_law_index: f64,
    },
    Srhd {
        #[serde(default = "default_gamma")]
        gamma_law_index: f64,
        #[serde(default = "default_num_patches")]
        num_patches: usize,
        #[serde(default)]
        coordinates: Coordinates,
        #[serde(default)]
        scale_factor0: f64,
        #[serde(default)]
        scale_factor_dot: f64,
    },
}

fn default_gamma() -> f64 {
    crate::physics::DEFAULT_GAMMA
}
fn default_num_patches() -> usize {
    1
}

impl Default for Physics {
    fn default() -> Self {
        Physics::Euler {
            gamma_law_index: default_gamma(),
        }
    }
}

/// Mesh-level concerns that aren't resolution/dimensionality (those live on
/// [`DriverConfig`], matching the teacher's `driver()` signature).
#[derive(Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MeshConfig {
    #[serde(default = "default_boundary_condition_str")]
    pub boundary_condition: String,
}

fn default_boundary_condition_str() -> String {
    "outflow".into()
}

impl MeshConfig {
    pub fn boundary_condition(&self) -> Result<BoundaryCondition> {
        match self.boundary_condition.as_str() {
            "periodic" => Ok(BoundaryCondition::Periodic),
            "outflow" => Ok(BoundaryCondition::Outflow),
            other => Err(Error::BoundaryPolicyInvalid(other.to_string())),
        }
    }
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            boundary_condition: default_boundary_condition_str(),
        }
    }
}

/// The run's driver knobs, named and grouped exactly like `driver()`'s
/// keyword arguments in the teacher's own Python prototype: execution
/// backend, grid resolution and dimensionality, stopping time, the kernel
/// selection inputs (fluxing/reconstruction/time integration), the report
/// fold count, and whether to plot at the end.
#[derive(Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DriverConfig {
    #[serde(default)]
    pub exec_mode: ExecMode,

    #[serde(default = "DriverConfig::default_resolution")]
    pub resolution: usize,

    #[serde(default = "DriverConfig::default_tfinal")]
    pub tfinal: f64,

    #[serde(default = "DriverConfig::default_fluxing")]
    pub fluxing: Fluxing,

    #[serde(default = "DriverConfig::default_reconstruction")]
    pub reconstruction: String,

    #[serde(default = "DriverConfig::default_plm_theta")]
    pub plm_theta: f64,

    #[serde(default = "DriverConfig::default_time_integration")]
    pub time_integration: TimeIntegration,

    #[serde(default = "DriverConfig::default_dim")]
    pub dim: usize,

    #[serde(default = "DriverConfig::default_fold")]
    pub fold: usize,

    #[serde(default)]
    pub plot: bool,
}

impl DriverConfig {
    fn default_resolution() -> usize {
        10_000
    }
    fn default_tfinal() -> f64 {
        0.1
    }
    fn default_fluxing() -> Fluxing {
        Fluxing::PerZone
    }
    fn default_reconstruction() -> String {
        "pcm".into()
    }
    fn default_plm_theta() -> f64 {
        1.5
    }
    fn default_time_integration() -> TimeIntegration {
        TimeIntegration::Fwd
    }
    fn default_dim() -> usize {
        1
    }
    fn default_fold() -> usize {
        100
    }

    pub fn dimension(&self) -> Result<Dimension> {
        match self.dim {
            1 => Ok(Dimension::One),
            2 => Ok(Dimension::Two),
            n => Err(Error::InvalidConfiguration(format!("unsupported mesh dimension {}", n))),
        }
    }

    pub fn reconstruction(&self) -> Result<Reconstruction> {
        match self.reconstruction.as_str() {
            "pcm" => Ok(Reconstruction::Pcm),
            "plm" => Ok(Reconstruction::Plm(self.plm_theta)),
            other => Err(Error::InvalidConfiguration(format!(
                "unrecognized reconstruction '{}' (expected 'pcm' or 'plm')",
                other
            ))),
        }
    }
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            exec_mode: ExecMode::default(),
            resolution: Self::default_resolution(),
            tfinal: Self::default_tfinal(),
            fluxing: Self::default_fluxing(),
            reconstruction: Self::default_reconstruction(),
            plm_theta: Self::default_plm_theta(),
            time_integration: Self::default_time_integration(),
            dim: Self::default_dim(),
            fold: Self::default_fold(),
            plot: false,
        }
    }
}

/// Solver-internal numerics not covered by the driver section.
#[derive(Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SolverConfig {
    #[serde(default = "SolverConfig::default_cfl")]
    pub cfl_number: f64,
}

impl SolverConfig {
    fn default_cfl() -> f64 {
        0.4
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            cfl_number: Self::default_cfl(),
        }
    }
}

/// Run cadence and I/O policy, mirroring the teacher's `Control` section.
#[derive(Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Control {
    #[serde(default)]
    pub start_time: f64,

    #[serde(default = "Control::default_checkpoint_interval")]
    pub checkpoint_interval: f64,

    #[serde(default)]
    pub products_interval: Option<f64>,

    #[serde(default)]
    pub num_threads: Option<usize>,

    #[serde(default = "Control::default_output_directory")]
    pub output_directory: String,
}

impl Control {
    fn default_checkpoint_interval() -> f64 {
        1.0
    }
    fn default_output_directory() -> String {
        ".".into()
    }

    pub fn num_threads(&self) -> usize {
        self.num_threads.unwrap_or_else(num_cpus::get)
    }

    pub fn validate(&self) -> Result<()> {
        if self.checkpoint_interval <= 0.0 {
            return Err(Error::InvalidConfiguration("checkpoint_interval must be > 0".into()));
        }
        if self.products_interval.map_or(false, |p| p <= 0.0) {
            return Err(Error::InvalidConfiguration("products_interval must be > 0".into()));
        }
        Ok(())
    }
}

impl Default for Control {
    fn default() -> Self {
        Self {
            start_time: 0.0,
            checkpoint_interval: Self::default_checkpoint_interval(),
            products_interval: None,
            num_threads: None,
            output_directory: Self::default_output_directory(),
        }
    }
}

/// The complete user configuration for one run.
#[derive(Clone, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct Configuration {
    #[serde(default)]
    pub physics: Physics,
    #[serde(default)]
    pub mesh: MeshConfig,
    #[serde(default)]
    pub driver: DriverConfig,
    #[serde(default)]
    pub solver: SolverConfig,
    #[serde(default)]
    pub control: Control,
    #[serde(default)]
    pub initial_data: InitialData,
}

impl Configuration {
    pub fn validate(&self) -> Result<()> {
        self.driver.dimension()?;
        self.driver.reconstruction()?;
        self.mesh.boundary_condition()?;
        self.control.validate()?;

        if self.driver.tfinal < self.control.start_time {
            return Err(Error::InvalidConfiguration("driver.tfinal < control.start_time".into()));
        }
        if self.driver.fold == 0 {
            return Err(Error::InvalidConfiguration("driver.fold must be > 0".into()));
        }
        if self.driver.dim == 2 && self.driver.fluxing == Fluxing::PerFace {
            return Err(Error::UnsupportedConfiguration(
                "per-face fluxing is only implemented in 1D".into(),
            ));
        }
        if self.initial_data.dimension() != self.driver.dim {
            return Err(Error::InvalidConfiguration(format!(
                "initial_data is {}D but driver.dim is {}",
                self.initial_data.dimension(),
                self.driver.dim
            )));
        }
        if let Physics::Srhd { num_patches, .. } = self.physics {
            if self.driver.resolution % num_patches != 0 {
                return Err(Error::InvalidConfiguration(format!(
                    "driver.resolution {} is not divisible by physics.num_patches {}",
                    self.driver.resolution, num_patches
                )));
            }
        }
        Ok(())
    }

    /// Apply a list of overrides, each either a path to a `.yaml`/`.yml` or
    /// `.json` file, or a `key.path=value` command-line override, in order.
    pub fn patch_from(&mut self, overrides: &[String]) -> Result<()> {
        for entry in overrides {
            if entry.ends_with(".yaml") || entry.ends_with(".yml") {
                let text = std::fs::read_to_string(entry)?;
                self.patch_from_str(&text)
                    .map_err(|e| Error::InvalidConfiguration(e.to_string()))?;
            } else if entry.ends_with(".json") {
                let text = std::fs::read_to_string(entry)?;
                let json: serde_json::Value =
                    serde_json::from_str(&text).map_err(|e| Error::InvalidConfiguration(e.to_string()))?;
                let yaml_text =
                    serde_yaml::to_string(&json).map_err(|e| Error::InvalidConfiguration(e.to_string()))?;
                self.patch_from_str(&yaml_text)
                    .map_err(|e| Error::InvalidConfiguration(e.to_string()))?;
            } else {
                self.patch_from_key_val(entry)
                    .map_err(|e| Error::InvalidConfiguration(e.to_string()))?;
            }
        }
        Ok(())
    }

    pub fn from_overrides(overrides: &[String]) -> Result<Self> {
        let mut config = Self::default();
        config.patch_from(overrides)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(Configuration::default().validate().is_ok());
    }

    #[test]
    fn key_val_override_merges_onto_defaults() {
        let config = Configuration::from_overrides(&["driver.fold=25".to_string()]).unwrap();
        assert_eq!(config.driver.fold, 25);
        assert_eq!(config.driver.tfinal, DriverConfig::default_tfinal());
    }

    #[test]
    fn per_face_in_2d_is_rejected() {
        let mut config = Configuration::default();
        config.driver.dim = 2;
        config.driver.fluxing = Fluxing::PerFace;
        config.initial_data = InitialData::CylindricalShocktube {
            radius: 0.1,
            pressure: 1.0,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn unknown_reconstruction_is_rejected() {
        let mut config = Configuration::default();
        config.driver.reconstruction = "weno5".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn unknown_boundary_condition_is_a_typed_error() {
        let mut config = Configuration::default();
        config.mesh.boundary_condition = "reflecting".into();
        match config.validate() {
            Err(Error::BoundaryPolicyInvalid(bad)) => assert_eq!(bad, "reflecting"),
            other => panic!("expected Err(BoundaryPolicyInvalid), got {:?}", other.map_err(|e| e.to_string())),
        }
    }

    #[test]
    fn mismatched_initial_data_and_dim_is_rejected() {
        let mut config = Configuration::default();
        config.driver.dim = 2;
        assert!(config.validate().is_err());
    }

    #[test]
    fn srhd_resolution_must_divide_by_num_patches() {
        let mut config = Configuration::default();
        config.physics = Physics::Srhd {
            gamma_law_index: default_gamma(),
            num_patches: 3,
            coordinates: Coordinates::Cartesian,
            scale_factor0: 1.0,
            scale_factor_dot: 0.0,
        };
        config.driver.resolution = 100;
        assert!(config.validate().is_err());
    }
}

//! Command-line interface: `show-config` prints the resolved configuration
//! (defaults merged with whatever overrides were given) without running
//! anything, `run` executes the step loop to `driver.tfinal`.

use clap::Clap;

use crate::config::Configuration;
use crate::error::{Error, Result};

#[derive(Debug, Clap)]
#[clap(version = git_version::git_version!(prefix = concat!("v", env!("CARGO_PKG_VERSION"), " ")))]
#[clap(setting = clap::AppSettings::ColoredHelp)]
pub struct Opts {
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clap)]
pub enum Command {
    /// Print the fully-resolved configuration and exit without running.
    ShowConfig {
        /// YAML/JSON files and/or `key.path=value` overrides, applied in order.
        configs: Vec<String>,

        /// Output format.
        #[clap(long, possible_values = &["json", "yaml"], default_value = "yaml")]
        format: String,

        /// Print the built-in defaults, ignoring any given configs/overrides.
        #[clap(long)]
        defaults: bool,
    },
    /// Run the solver to `driver.tfinal`.
    Run {
        /// YAML/JSON files and/or `key.path=value` overrides, applied in order.
        configs: Vec<String>,

        /// Resume from a checkpoint file instead of starting fresh.
        #[clap(long)]
        checkpoint: Option<String>,

        #[clap(flatten)]
        driver: DriverOverrides,
    },
}

/// One `--driver.<field> VALUE` flag per [`crate::config::DriverConfig`]
/// field, matching `driver.schema.argument_parser(run_parser,
/// dest_prefix="driver")`'s auto-generated flags. Each present flag is
/// turned into a `driver.field=value` override string and merged the same
/// way a file override would be.
#[derive(Debug, Clap)]
pub struct DriverOverrides {
    #[clap(long = "driver.exec-mode")]
    pub exec_mode: Option<String>,
    #[clap(long = "driver.resolution")]
    pub resolution: Option<usize>,
    #[clap(long = "driver.tfinal")]
    pub tfinal: Option<f64>,
    #[clap(long = "driver.fluxing")]
    pub fluxing: Option<String>,
    #[clap(long = "driver.reconstruction")]
    pub reconstruction: Option<String>,
    #[clap(long = "driver.plm-theta")]
    pub plm_theta: Option<f64>,
    #[clap(long = "driver.time-integration")]
    pub time_integration: Option<String>,
    #[clap(long = "driver.dim")]
    pub dim: Option<usize>,
    #[clap(long = "driver.fold")]
    pub fold: Option<usize>,
    #[clap(long = "driver.plot")]
    pub plot: bool,
}

impl DriverOverrides {
    /// Render the flags the user actually passed as `driver.field=value`
    /// override strings, in field declaration order.
    pub fn as_overrides(&self) -> Vec<String> {
        let mut overrides = Vec::new();
        macro_rules! push {
            ($field:ident, $name:literal) => {
                if let Some(v) = &self.$field {
                    overrides.push(format!(concat!("driver.", $name, "={}"), v));
                }
            };
        }
        push!(exec_mode, "exec_mode");
        push!(resolution, "resolution");
        push!(tfinal, "tfinal");
        push!(fluxing, "fluxing");
        push!(reconstruction, "reconstruction");
        push!(plm_theta, "plm_theta");
        push!(time_integration, "time_integration");
        push!(dim, "dim");
        push!(fold, "fold");
        if self.plot {
            overrides.push("driver.plot=true".to_string());
        }
        overrides
    }
}

pub fn show_config(configs: &[String], format: &str, defaults: bool) -> Result<()> {
    let config = if defaults {
        Configuration::default()
    } else {
        Configuration::from_overrides(configs)?
    };

    match format {
        "yaml" => {
            let yaml = serde_yaml::to_string(&config).expect("Configuration always serializes");
            print!("{}", yaml);
        }
        "json" => {
            let json = serde_json::to_string_pretty(&config).expect("Configuration always serializes");
            println!("{}", json);
        }
        other => return Err(Error::InvalidConfiguration(format!("unrecognized output format '{}'", other))),
    }
    Ok(())
}

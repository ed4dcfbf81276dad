use anyhow::Result;
use clap::Parser;
use config::{Config, Environment, File};
use log::info;
use serde::Deserialize;
use std::env;
use std::fmt;

use crate::params::{EmpiricalConstants, SoilParameters};

/// Runtime configuration for the application.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Settings {
    /// Soil brightness.
    pub b: f64,
    /// Spectral-shape latitude angle in degrees.
    pub lat: f64,
    /// Spectral-shape longitude angle in degrees.
    pub lon: f64,
    /// Volumetric soil moisture in percent.
    pub smp: f64,
    /// Soil moisture capacity constant.
    pub smc: f64,
    /// Effective water film thickness.
    pub film: f64,
    /// Directory holding the reference spectral tables.
    pub data_dir: String,
    #[serde(default = "default_output_file")]
    pub output_file: String,
    /// Optional moisture sweep replacing the single run.
    #[serde(default)]
    pub sweep: Option<SweepRange>,
}

fn default_output_file() -> String {
    "bsm_result.txt".to_string()
}

/// Evenly spaced moisture range for sweep runs.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
pub struct SweepRange {
    pub start: f64,
    pub stop: f64,
    pub steps: usize,
}

impl Settings {
    pub fn soil_parameters(&self) -> SoilParameters {
        SoilParameters {
            b: self.b,
            lat: self.lat,
            lon: self.lon,
            smp: self.smp,
        }
    }

    pub fn empirical_constants(&self) -> EmpiricalConstants {
        EmpiricalConstants {
            smc: self.smc,
            film: self.film,
        }
    }
}

pub fn load_default_config() -> Result<Settings> {
    let bsm_dir = retrieve_project_root();
    let default_config_file = bsm_dir.join("config/default.toml");

    let settings: Config = Config::builder()
        .add_source(File::from(default_config_file).required(true))
        .build()
        .unwrap_or_else(|err| {
            eprintln!("Error loading configuration: {}", err);
            std::process::exit(1);
        });

    let config: Settings = settings.try_deserialize().unwrap_or_else(|err| {
        eprintln!("Error deserializing configuration: {}", err);
        std::process::exit(1);
    });

    validate_config(&config);

    Ok(config)
}

pub fn load_config() -> Result<Settings> {
    let bsm_dir = retrieve_project_root();

    let default_config_file = bsm_dir.join("config/default.toml");
    let local_config = bsm_dir.join("config/local.toml");

    // Check if local config exists, if not use default
    let config_file = if local_config.exists() {
        info!("using local configuration: {:?}", local_config);
        local_config
    } else {
        info!("using default configuration: {:?}", default_config_file);
        default_config_file
    };

    let settings: Config = Config::builder()
        .add_source(File::from(config_file).required(true))
        .add_source(Environment::with_prefix("bsm"))
        .build()
        .unwrap_or_else(|err| {
            eprintln!("Error loading configuration: {}", err);
            std::process::exit(1);
        });

    let mut config: Settings = settings.try_deserialize().unwrap_or_else(|err| {
        eprintln!("Error deserializing configuration: {}", err);
        std::process::exit(1);
    });

    // Parse command-line arguments and override values
    let args = CliArgs::parse();

    if let Some(b) = args.b {
        config.b = b;
    }
    if let Some(lat) = args.lat {
        config.lat = lat;
    }
    if let Some(lon) = args.lon {
        config.lon = lon;
    }
    if let Some(smp) = args.smp {
        config.smp = smp;
    }
    if let Some(smc) = args.smc {
        config.smc = smc;
    }
    if let Some(film) = args.film {
        config.film = film;
    }
    if let Some(data) = args.data {
        config.data_dir = data;
    }
    if let Some(output) = args.output {
        config.output_file = output;
    }

    if let Some(sweep) = &args.sweep {
        if sweep.len() == 3 && sweep[2].fract() == 0.0 && sweep[2] >= 2.0 {
            config.sweep = Some(SweepRange {
                start: sweep[0],
                stop: sweep[1],
                steps: sweep[2] as usize,
            });
        } else {
            eprintln!(
                "Warning: --sweep requires START STOP STEPS with integer STEPS >= 2. Ignoring."
            );
        }
    }

    validate_config(&config);

    info!("{}", config);

    Ok(config)
}

/// Retrieve the project root directory.
/// This function tries to find the project root directory in different ways:
/// 1. If the CARGO_MANIFEST_DIR environment variable is set, use it.
/// 2. If the BSM_ROOT_DIR environment variable is set, use it.
/// 3. If the "config" subdirectory is found in the executable directory or any of its parents, use it.
/// If none of these methods work, the function will panic.
fn retrieve_project_root() -> std::path::PathBuf {
    let bsm_dir = if let Ok(manifest_dir) = env::var("CARGO_MANIFEST_DIR") {
        // When running through cargo (e.g. cargo run, cargo test)
        std::path::PathBuf::from(manifest_dir)
    } else if let Ok(path) = env::var("BSM_ROOT_DIR") {
        // Allow explicit configuration via environment variable
        std::path::PathBuf::from(path)
    } else {
        // Fallback: try to find the nearest directory containing a "config" subdirectory
        // Start from the executable directory and walk upward
        let exe_path = env::current_exe().expect("Failed to get current executable path");
        let mut current_dir = exe_path
            .parent()
            .expect("Failed to get executable directory")
            .to_path_buf();
        let mut found = false;

        while !found && current_dir.parent().is_some() {
            if current_dir.join("config").is_dir() {
                found = true;
            } else {
                current_dir = current_dir.parent().unwrap().to_path_buf();
            }
        }

        if found {
            current_dir
        } else {
            panic!("Could not find project root directory");
        }
    };
    bsm_dir
}

fn validate_config(config: &Settings) {
    assert!(
        config.smc > 0.0,
        "Soil moisture capacity must be greater than 0"
    );
    assert!(config.smp >= 0.0, "Soil moisture must be non-negative");
    assert!(config.film >= 0.0, "Film thickness must be non-negative");
    if let Some(sweep) = &config.sweep {
        assert!(sweep.steps >= 2, "Sweep must have at least 2 steps");
        assert!(
            sweep.stop >= sweep.start,
            "Sweep stop must not be below start"
        );
    }
}

#[derive(Parser, Debug)]
#[command(version, about = "BSM - Brightness-Shape-Moisture soil reflectance simulator")]
pub struct CliArgs {
    /// Soil brightness.
    #[arg(short, long)]
    b: Option<f64>,

    /// Spectral-shape latitude angle in degrees.
    #[arg(long)]
    lat: Option<f64>,

    /// Spectral-shape longitude angle in degrees.
    #[arg(long)]
    lon: Option<f64>,

    /// Volumetric soil moisture in percent.
    #[arg(long)]
    smp: Option<f64>,

    /// Soil moisture capacity constant.
    #[arg(long)]
    smc: Option<f64>,

    /// Effective water film thickness.
    #[arg(long)]
    film: Option<f64>,

    /// Directory containing wavelengths.txt, GSV.txt, nw.txt and kw.txt.
    #[arg(short, long)]
    data: Option<String>,

    /// Output file for the simulated spectra.
    #[arg(short, long)]
    output: Option<String>,

    /// Run a moisture sweep instead of a single simulation.
    /// Format: START STOP STEPS
    #[arg(long, num_args = 3, value_delimiter = ' ')]
    sweep: Option<Vec<f64>>,
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Settings:
  - Brightness: {:.3}
  - Latitude: {:.2} deg
  - Longitude: {:.2} deg
  - Soil Moisture: {:.2} %
  - Soil Moisture Capacity: {:.2}
  - Film Thickness: {:.4}
  - Data Directory: {}
  ",
            self.b, self.lat, self.lon, self.smp, self.smc, self.film, self.data_dir,
        )
    }
}

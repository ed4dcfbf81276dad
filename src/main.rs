use std::path::{Path, PathBuf};

use anyhow::Result;
use log::info;

use bsm::library::SpectralLibrary;
use bsm::output;
use bsm::problem::Problem;
use bsm::sweep::MoistureSweep;

fn main() -> Result<()> {
    env_logger::init();

    let settings = bsm::settings::load_config()?;
    let library = SpectralLibrary::from_dir(Path::new(&settings.data_dir))?;

    let params = settings.soil_parameters();
    let constants = settings.empirical_constants();

    match settings.sweep {
        Some(range) => {
            let sweep = MoistureSweep::from_range(
                params,
                constants,
                range.start,
                range.stop,
                range.steps,
            );
            for (smp, spectra) in sweep.solve(&library)? {
                let path = sweep_output_path(&settings.output_file, smp);
                let label = format!("{}", bsm::params::SoilParameters { smp, ..params });
                output::writeup(&path, &library.wavelength, &spectra, &label)?;
                info!("wrote {:?}", path);
            }
        }
        None => {
            let spectra = Problem::new(params, constants, &library).solve()?;
            let path = PathBuf::from(&settings.output_file);
            output::writeup(&path, &library.wavelength, &spectra, &params.to_string())?;
            info!("wrote {:?}", path);
        }
    }

    Ok(())
}

/// Derives a per-moisture output path by tagging the configured file stem.
fn sweep_output_path(output_file: &str, smp: f64) -> PathBuf {
    let base = Path::new(output_file);
    let stem = base.file_stem().and_then(|s| s.to_str()).unwrap_or("bsm_result");
    let ext = base.extension().and_then(|s| s.to_str()).unwrap_or("txt");
    base.with_file_name(format!("{}_smp{:.1}.{}", stem, smp, ext))
}

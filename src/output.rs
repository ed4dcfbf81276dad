//! Text export of simulation results.
//!
//! Results are written as tab-separated tables with a commented parameter
//! header, one wavelength per row, matching the layout downstream plotting
//! scripts expect:
//!
//! ```text
//! # Simulation parameters: B=0.5, lat=10, lon=100, SMp=20
//! Wavelength (nm)	Dry Reflectance	Wet Reflectance
//! 400.00	0.102524	0.088934
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use ndarray::Array1;

use crate::result::SoilSpectra;

/// Writes one dry/wet spectrum pair against the wavelength grid.
pub fn writeup(
    path: &Path,
    wavelength: &Array1<f64>,
    spectra: &SoilSpectra,
    label: &str,
) -> Result<()> {
    let file = File::create(path).with_context(|| format!("failed to create {:?}", path))?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "# Simulation parameters: {}", label)?;
    writeln!(writer, "Wavelength (nm)\tDry Reflectance\tWet Reflectance")?;
    for ((wl, rd), rw) in wavelength
        .iter()
        .zip(spectra.rdry.iter())
        .zip(spectra.rwet.iter())
    {
        writeln!(writer, "{:.2}\t{:.6}\t{:.6}", wl, rd, rw)?;
    }
    Ok(())
}

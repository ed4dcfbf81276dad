//! Reference spectral library storage and loading.
//!
//! The model consumes three reference spectra aligned to a shared wavelength
//! grid: the GSV dry-soil basis (three columns per wavelength), the
//! refractive index of water `nw` and the absorption coefficient of water
//! `kw`. The library is loaded once from whitespace-delimited text tables and
//! shared read-only across simulations; the numeric model itself never
//! touches the file system.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use log::info;
use ndarray::{Array1, Array2};

use crate::error::BsmError;

/// Number of basis vectors in the GSV parameterization.
pub const GSV_COLUMNS: usize = 3;

/// Immutable spectral reference data shared by all simulations.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectralLibrary {
    /// Wavelength grid in nm.
    pub wavelength: Array1<f64>,
    /// GSV basis, one 3-component row per wavelength.
    pub gsv: Array2<f64>,
    /// Refractive index of water per wavelength.
    pub nw: Array1<f64>,
    /// Absorption coefficient of water per wavelength.
    pub kw: Array1<f64>,
}

impl SpectralLibrary {
    /// Builds a library from pre-loaded arrays, validating the shape
    /// invariants before returning.
    pub fn new(
        wavelength: Array1<f64>,
        gsv: Array2<f64>,
        nw: Array1<f64>,
        kw: Array1<f64>,
    ) -> Result<Self, BsmError> {
        let library = Self {
            wavelength,
            gsv,
            nw,
            kw,
        };
        library.validate()?;
        Ok(library)
    }

    /// Checks that all arrays share the wavelength grid length and that the
    /// basis has exactly [`GSV_COLUMNS`] columns.
    pub fn validate(&self) -> Result<(), BsmError> {
        if self.gsv.ncols() != GSV_COLUMNS {
            return Err(BsmError::BasisShape(self.gsv.ncols()));
        }
        let n = self.wavelength.len();
        if self.gsv.nrows() != n || self.nw.len() != n || self.kw.len() != n {
            return Err(BsmError::ShapeMismatch {
                wavelength: n,
                gsv: self.gsv.nrows(),
                nw: self.nw.len(),
                kw: self.kw.len(),
            });
        }
        Ok(())
    }

    /// Number of wavelength samples.
    pub fn len(&self) -> usize {
        self.wavelength.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wavelength.is_empty()
    }

    /// Loads the four reference tables from a directory.
    ///
    /// Expects `wavelengths.txt`, `GSV.txt`, `nw.txt` and `kw.txt` as
    /// whitespace-delimited text, one wavelength per line, `#` comment lines
    /// skipped.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let wavelength = read_column(&dir.join("wavelengths.txt"))?;
        let gsv = read_table(&dir.join("GSV.txt"), GSV_COLUMNS)?;
        let nw = read_column(&dir.join("nw.txt"))?;
        let kw = read_column(&dir.join("kw.txt"))?;

        let library = Self::new(wavelength, gsv, nw, kw)
            .with_context(|| format!("inconsistent spectral tables in {:?}", dir))?;
        info!(
            "loaded spectral library from {:?}: {} wavelengths",
            dir,
            library.len()
        );
        Ok(library)
    }
}

fn read_rows(path: &Path) -> Result<Vec<Vec<f64>>> {
    let file = File::open(path).with_context(|| format!("failed to open {:?}", path))?;
    let mut rows = Vec::new();
    for (lineno, line) in BufReader::new(file).lines().enumerate() {
        let line = line.with_context(|| format!("failed to read {:?}", path))?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let row = line
            .split_whitespace()
            .map(|field| {
                field
                    .parse::<f64>()
                    .with_context(|| format!("{:?} line {}: bad number {:?}", path, lineno + 1, field))
            })
            .collect::<Result<Vec<f64>>>()?;
        rows.push(row);
    }
    Ok(rows)
}

/// Reads a single-column table into a 1D array.
fn read_column(path: &Path) -> Result<Array1<f64>> {
    let rows = read_rows(path)?;
    let mut values = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        if row.len() != 1 {
            return Err(anyhow!(
                "{:?} row {}: expected 1 column, got {}",
                path,
                i + 1,
                row.len()
            ));
        }
        values.push(row[0]);
    }
    Ok(Array1::from(values))
}

/// Reads a fixed-width table into a 2D array with `ncols` columns.
fn read_table(path: &Path, ncols: usize) -> Result<Array2<f64>> {
    let rows = read_rows(path)?;
    let mut values = Vec::with_capacity(rows.len() * ncols);
    for (i, row) in rows.iter().enumerate() {
        if row.len() != ncols {
            return Err(anyhow!(
                "{:?} row {}: expected {} columns, got {}",
                path,
                i + 1,
                ncols,
                row.len()
            ));
        }
        values.extend_from_slice(row);
    }
    Array2::from_shape_vec((rows.len(), ncols), values)
        .with_context(|| format!("failed to shape table from {:?}", path))
}

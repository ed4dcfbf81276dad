//! Batch evaluation over a range of soil moisture values.
//!
//! Moisture studies evaluate the same soil and library at many `SMp` values.
//! Every simulation is independent and the library is read-only, so the sweep
//! runs the per-moisture solves in parallel with rayon and tracks progress
//! with an indicatif bar. Results are collected in sweep order as
//! `(SMp, SoilSpectra)` pairs.

use anyhow::Result;
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use log::info;
use ndarray::Array1;
use rayon::prelude::*;

use crate::library::SpectralLibrary;
use crate::params::{EmpiricalConstants, SoilParameters};
use crate::problem::Problem;
use crate::result::SoilSpectra;

/// A moisture sweep of one soil parameterization.
#[derive(Debug, Clone)]
pub struct MoistureSweep {
    pub params: SoilParameters,
    pub constants: EmpiricalConstants,
    pub smp_values: Vec<f64>,
}

impl MoistureSweep {
    /// Builds a sweep over `steps` evenly spaced moisture values in
    /// `[start, stop]`.
    pub fn from_range(
        params: SoilParameters,
        constants: EmpiricalConstants,
        start: f64,
        stop: f64,
        steps: usize,
    ) -> Self {
        let smp_values = Array1::linspace(start, stop, steps).to_vec();
        Self {
            params,
            constants,
            smp_values,
        }
    }

    /// Solves the sweep in parallel against a shared library.
    pub fn solve(&self, library: &SpectralLibrary) -> Result<Vec<(f64, SoilSpectra)>> {
        info!(
            "sweeping {} moisture values for {}",
            self.smp_values.len(),
            self.params
        );
        let bar = ProgressBar::new(self.smp_values.len() as u64).with_style(
            ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} moisture values")?,
        );

        let results = self
            .smp_values
            .par_iter()
            .progress_with(bar)
            .map(|&smp| -> Result<(f64, SoilSpectra)> {
                let params = SoilParameters { smp, ..self.params };
                let spectra = Problem::new(params, self.constants, library).solve()?;
                Ok((smp, spectra))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn sweep_preserves_order_and_dry_spectrum() {
        let library = SpectralLibrary::new(
            array![450.0, 1940.0],
            array![[0.40, 0.10, 0.05], [0.60, 0.08, 0.03]],
            array![1.33, 1.31],
            array![0.005, 0.5],
        )
        .unwrap();
        let sweep = MoistureSweep::from_range(
            SoilParameters {
                b: 0.5,
                lat: 10.0,
                lon: 100.0,
                smp: 0.0,
            },
            EmpiricalConstants {
                smc: 25.0,
                film: 0.015,
            },
            5.0,
            45.0,
            9,
        );
        let results = sweep.solve(&library).unwrap();
        assert_eq!(results.len(), 9);
        assert!((results[0].0 - 5.0).abs() < 1e-12);
        assert!((results[8].0 - 45.0).abs() < 1e-12);
        // The dry spectrum does not depend on moisture.
        for (_, spectra) in &results[1..] {
            assert_eq!(spectra.rdry, results[0].1.rdry);
        }
    }
}

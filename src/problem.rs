//! Single soil reflectance simulation.
//!
//! A [`Problem`] bundles one parameter set with the shared spectral library
//! and evaluates the model pipeline: dry-spectrum synthesis from the GSV
//! basis followed by the moisture transform. Each solve is a pure function of
//! its inputs; nothing is retained between calls and the library is only ever
//! borrowed, so independent problems can run concurrently against the same
//! library.

use log::debug;

use crate::drysoil;
use crate::error::BsmError;
use crate::library::SpectralLibrary;
use crate::params::{EmpiricalConstants, SoilParameters};
use crate::result::SoilSpectra;
use crate::wetness;

/// One simulation request against a shared spectral library.
#[derive(Debug, Clone)]
pub struct Problem<'a> {
    pub params: SoilParameters,
    pub constants: EmpiricalConstants,
    pub library: &'a SpectralLibrary,
}

impl<'a> Problem<'a> {
    pub fn new(
        params: SoilParameters,
        constants: EmpiricalConstants,
        library: &'a SpectralLibrary,
    ) -> Self {
        Self {
            params,
            constants,
            library,
        }
    }

    /// Runs the model and returns the dry/wet spectrum pair.
    ///
    /// All shape and sign invariants are checked before any spectral
    /// arithmetic; after that the computation cannot fail, though degenerate
    /// refractive indices propagate NaN/Inf through the output.
    pub fn solve(&self) -> Result<SoilSpectra, BsmError> {
        self.library.validate()?;
        self.params.validate()?;
        self.constants.validate()?;

        debug!("solving problem: {}", self.params);

        let rdry = drysoil::synthesize(
            self.params.b,
            self.params.lat,
            self.params.lon,
            &self.library.gsv,
        );
        let rwet = wetness::wetten(
            &rdry,
            &self.library.nw,
            &self.library.kw,
            self.params.smp,
            self.constants.smc,
            self.constants.film,
        );
        Ok(SoilSpectra { rdry, rwet })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn test_library() -> SpectralLibrary {
        SpectralLibrary::new(
            array![450.0, 1450.0, 1940.0],
            array![[0.40, 0.10, 0.05], [0.55, 0.12, 0.04], [0.60, 0.08, 0.03]],
            array![1.33, 1.32, 1.31],
            array![0.005, 0.05, 0.5],
        )
        .unwrap()
    }

    #[test]
    fn reference_simulation() {
        let library = test_library();
        let problem = Problem::new(
            SoilParameters {
                b: 0.5,
                lat: 10.0,
                lon: 100.0,
                smp: 20.0,
            },
            EmpiricalConstants {
                smc: 25.0,
                film: 0.015,
            },
            &library,
        );
        let spectra = problem.solve().unwrap();

        let rdry_ref = [0.07894669926146292, 0.1025238260487264, 0.08832315464085475];
        let rwet_ref = [0.07051200474394385, 0.0889338320803671, 0.07725630275539629];
        for i in 0..library.len() {
            assert!((spectra.rdry[i] - rdry_ref[i]).abs() < 1e-12, "i: {}", i);
            assert!((spectra.rwet[i] - rwet_ref[i]).abs() < 1e-12, "i: {}", i);
        }
    }

    #[test]
    fn invalid_library_fails_before_compute() {
        let mut library = test_library();
        library.kw = array![0.005, 0.05];
        let problem = Problem::new(
            SoilParameters {
                b: 0.5,
                lat: 10.0,
                lon: 100.0,
                smp: 20.0,
            },
            EmpiricalConstants {
                smc: 25.0,
                film: 0.015,
            },
            &library,
        );
        assert!(matches!(
            problem.solve(),
            Err(BsmError::ShapeMismatch { .. })
        ));
    }
}
